//! BEJ CLI - Command-line BEJ-to-JSON decoder
//!
//! This binary decodes a BEJ-encoded payload against a schema dictionary
//! and an annotation dictionary, writing the JSON document next to the
//! input with a `.json` extension.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bej_io::{execute_decode, DecodeRequest};

#[derive(Parser)]
#[command(name = "bej")]
#[command(about = "Binary Encoded JSON decoding tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a BEJ-encoded file to JSON
    Decode {
        /// Schema dictionary file
        #[arg(short = 's', long = "schema-dictionary", value_name = "FILE")]
        schema_dictionary: PathBuf,
        /// Annotation dictionary file
        #[arg(short = 'a', long = "annotation-dictionary", value_name = "FILE")]
        annotation_dictionary: PathBuf,
        /// BEJ encoded file to decode
        #[arg(short = 'b', long = "bej-file", value_name = "FILE")]
        bej_file: PathBuf,
        /// Verbose progress logging on stderr
        #[arg(short = 'v', long)]
        verbose: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Decode {
            schema_dictionary,
            annotation_dictionary,
            bej_file,
            verbose,
        } => {
            init_logging(verbose);
            handle_decode(schema_dictionary, annotation_dictionary, bej_file)
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_decode(
    schema_dictionary: PathBuf,
    annotation_dictionary: PathBuf,
    bej_file: PathBuf,
) -> ExitCode {
    // The output lands next to the input: last extension replaced by
    // .json, or .json appended when there is none
    let output = bej_file.with_extension("json");
    tracing::debug!(
        input = %bej_file.display(),
        output = %output.display(),
        "starting decode"
    );

    let request = DecodeRequest {
        schema_dictionary,
        annotation_dictionary,
        input: bej_file,
        output,
    };

    match execute_decode(&request) {
        Ok(summary) => {
            eprintln!(
                "Decoded {} to {} ({} bytes in, {} bytes out, elapsed: {:.2?})",
                request.input.display(),
                request.output.display(),
                summary.input_bytes,
                summary.output_bytes,
                summary.elapsed
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Decoding failed: {}", err);
            ExitCode::FAILURE
        }
    }
}
