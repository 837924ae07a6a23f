//! File-level decode runtime tests

use std::fs;
use std::path::PathBuf;

use bej_format::BejError;
use bej_io::{execute_decode, load_dictionary, DecodeRequest};
use bej_test_utils::{container_payload, document, sflv, DictionaryBuilder};
use tempfile::TempDir;

use bej_format::DictionarySelector::Schema;

struct Fixture {
    _dir: TempDir,
    request: DecodeRequest,
}

fn write_fixture(doc: &[u8]) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let schema_path = dir.path().join("schema.bin");
    let annotation_path = dir.path().join("annotation.bin");
    let input_path = dir.path().join("input.bej");
    let output_path = dir.path().join("output.json");

    let schema = DictionaryBuilder::new()
        .entry_with_children(0x00, 0, "Root", 1, 2)
        .entry(0x30, 0, "Id")
        .entry(0x50, 1, "Name")
        .build();
    fs::write(&schema_path, schema).unwrap();
    fs::write(&annotation_path, DictionaryBuilder::new().build()).unwrap();
    fs::write(&input_path, doc).unwrap();

    Fixture {
        _dir: dir,
        request: DecodeRequest {
            schema_dictionary: schema_path,
            annotation_dictionary: annotation_path,
            input: input_path,
            output: output_path,
        },
    }
}

fn sample_document() -> Vec<u8> {
    let payload = container_payload(
        2,
        &[
            sflv(0, Schema, 0x30, &[42]),
            sflv(1, Schema, 0x50, b"alpha"),
        ],
    );
    document(&sflv(0, Schema, 0x00, &payload))
}

#[test]
fn decode_writes_json_and_reports_sizes() {
    let fixture = write_fixture(&sample_document());
    let summary = execute_decode(&fixture.request).unwrap();

    let output = fs::read_to_string(&fixture.request.output).unwrap();
    assert_eq!(output, "{\n\t\"Id\": 42,\n\t\"Name\": \"alpha\"\n}\n");
    assert_eq!(summary.output_bytes, output.len() as u64);
    assert_eq!(
        summary.input_bytes,
        fs::metadata(&fixture.request.input).unwrap().len()
    );

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["Id"], 42);
    assert_eq!(value["Name"], "alpha");
}

#[test]
fn truncated_input_fails_before_decoding() {
    let mut doc = sample_document();
    doc.truncate(doc.len() - 4);
    let fixture = write_fixture(&doc);

    // The root tuple itself comes up short, so nothing is emitted
    match execute_decode(&fixture.request) {
        Err(BejError::UnexpectedEof) => {}
        other => panic!("expected UnexpectedEof, got {:?}", other),
    }
    assert_eq!(fs::read_to_string(&fixture.request.output).unwrap(), "");
}

#[test]
fn corrupt_member_leaves_partial_output_on_disk() {
    // Second member claims nine payload bytes; the container holds five
    let mut broken = vec![0x01, 0x02, 0x50, 0x01, 0x09];
    broken.extend_from_slice(b"alpha");
    let payload = container_payload(2, &[sflv(0, Schema, 0x30, &[42]), broken]);
    let fixture = write_fixture(&document(&sflv(0, Schema, 0x00, &payload)));

    match execute_decode(&fixture.request) {
        Err(BejError::UnexpectedEof) => {}
        other => panic!("expected UnexpectedEof, got {:?}", other),
    }

    // Partial JSON is on disk and is not well-formed
    let output = fs::read_to_string(&fixture.request.output).unwrap();
    assert_eq!(output, "{\n\t\"Id\": 42,\n");
    assert!(serde_json::from_str::<serde_json::Value>(&output).is_err());
}

#[test]
fn missing_input_file_is_an_io_error() {
    let fixture = write_fixture(&sample_document());
    let mut request = fixture.request.clone();
    request.input = PathBuf::from("/nonexistent/input.bej");

    match execute_decode(&request) {
        Err(BejError::Io(_)) => {}
        other => panic!("expected Io error, got {:?}", other),
    }
}

#[test]
fn corrupt_dictionary_fails_before_any_output() {
    let fixture = write_fixture(&sample_document());
    fs::write(&fixture.request.schema_dictionary, [0u8; 4]).unwrap();

    match execute_decode(&fixture.request) {
        Err(BejError::CorruptDictionary(_)) => {}
        other => panic!("expected CorruptDictionary, got {:?}", other),
    }
    assert!(!fixture.request.output.exists());
}

#[test]
fn load_dictionary_reads_packed_blobs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dict.bin");
    fs::write(
        &path,
        DictionaryBuilder::new().entry(0x50, 3, "Model").build(),
    )
    .unwrap();

    let dictionary = load_dictionary(&path).unwrap();
    assert_eq!(dictionary.len(), 1);
    assert_eq!(
        dictionary.find(None, 3, None).unwrap().name.as_deref(),
        Some(b"Model".as_ref())
    );
}
