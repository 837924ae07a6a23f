//! High-level decode runtime

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use bej_codec::{Dictionary, Transcoder};
use bej_format::{Result, StreamSource};

/// Everything one decode run needs
#[derive(Debug, Clone)]
pub struct DecodeRequest {
    /// Packed schema dictionary path
    pub schema_dictionary: PathBuf,
    /// Packed annotation dictionary path
    pub annotation_dictionary: PathBuf,
    /// BEJ-encoded input path
    pub input: PathBuf,
    /// JSON output path
    pub output: PathBuf,
}

/// Outcome of a successful decode run
#[derive(Debug, Clone)]
pub struct DecodeSummary {
    /// Size of the BEJ input file
    pub input_bytes: u64,
    /// Bytes of JSON written
    pub output_bytes: u64,
    /// Wall-clock decode time
    pub elapsed: Duration,
}

/// Load a packed dictionary from disk
pub fn load_dictionary(path: &Path) -> Result<Dictionary> {
    let blob = std::fs::read(path)?;
    let dictionary = Dictionary::parse(&blob)?;
    tracing::debug!(
        path = %path.display(),
        entries = dictionary.len(),
        "dictionary loaded"
    );
    Ok(dictionary)
}

/// Execute one decode run: load both dictionaries, open the input and
/// output files, and transcode a single document.
///
/// On failure the output file is left behind with whatever partial JSON
/// was emitted before the error; it will not be well-formed.
pub fn execute_decode(request: &DecodeRequest) -> Result<DecodeSummary> {
    let start = Instant::now();

    let schema = load_dictionary(&request.schema_dictionary)?;
    let annotations = load_dictionary(&request.annotation_dictionary)?;

    let input_file = File::open(&request.input)?;
    let input_bytes = input_file.metadata()?.len();
    let mut input = StreamSource::new(BufReader::new(input_file));
    tracing::debug!(path = %request.input.display(), input_bytes, "decoding input");

    let mut writer = BufWriter::new(File::create(&request.output)?);
    let result = {
        let mut transcoder = Transcoder::new(&schema, &annotations, &mut writer);
        transcoder.transcode(&mut input)
    };

    // Flush before inspecting the result so a failed run still leaves
    // its partial JSON on disk for inspection
    writer.flush()?;
    result?;

    let output_bytes = std::fs::metadata(&request.output).map(|m| m.len()).unwrap_or(0);
    Ok(DecodeSummary {
        input_bytes,
        output_bytes,
        elapsed: start.elapsed(),
    })
}
