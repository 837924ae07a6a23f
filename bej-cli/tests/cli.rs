use std::error::Error;
use std::fs;
use std::path::PathBuf;

use bej_format::DictionarySelector::Schema;
use bej_test_utils::{container_payload, document, sflv, DictionaryBuilder};
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

struct SampleFiles {
    _dir: TempDir,
    schema_path: PathBuf,
    annotation_path: PathBuf,
    bej_path: PathBuf,
    json_path: PathBuf,
}

fn build_sample_files(doc: &[u8]) -> Result<SampleFiles, Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let schema_path = dir.path().join("schema.bin");
    let annotation_path = dir.path().join("annotation.bin");
    let bej_path = dir.path().join("payload.bej");
    let json_path = dir.path().join("payload.json");

    let schema = DictionaryBuilder::new()
        .entry_with_children(0x00, 0, "Root", 1, 2)
        .entry(0x30, 0, "Id")
        .entry(0x50, 1, "Name")
        .build();
    fs::write(&schema_path, schema)?;
    fs::write(&annotation_path, DictionaryBuilder::new().build())?;
    fs::write(&bej_path, doc)?;

    Ok(SampleFiles {
        _dir: dir,
        schema_path,
        annotation_path,
        bej_path,
        json_path,
    })
}

fn sample_document() -> Vec<u8> {
    let payload = container_payload(
        2,
        &[
            sflv(0, Schema, 0x30, &[7]),
            sflv(1, Schema, 0x50, b"PSU-1"),
        ],
    );
    document(&sflv(0, Schema, 0x00, &payload))
}

#[test]
fn decode_writes_json_next_to_the_input() -> Result<(), Box<dyn Error>> {
    let files = build_sample_files(&sample_document())?;

    assert_cmd::Command::cargo_bin("bej")?
        .args([
            "decode",
            "-s",
            files.schema_path.to_str().unwrap(),
            "-a",
            files.annotation_path.to_str().unwrap(),
            "-b",
            files.bej_path.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Decoded"));

    let output = fs::read_to_string(&files.json_path)?;
    assert_eq!(output, "{\n\t\"Id\": 7,\n\t\"Name\": \"PSU-1\"\n}\n");

    let value: Value = serde_json::from_str(&output)?;
    assert_eq!(value["Id"], 7);
    assert_eq!(value["Name"], "PSU-1");
    Ok(())
}

#[test]
fn output_extension_is_appended_when_input_has_none() -> Result<(), Box<dyn Error>> {
    let files = build_sample_files(&sample_document())?;
    let bare_input = files.bej_path.with_file_name("payload");
    fs::rename(&files.bej_path, &bare_input)?;

    assert_cmd::Command::cargo_bin("bej")?
        .args([
            "decode",
            "-s",
            files.schema_path.to_str().unwrap(),
            "-a",
            files.annotation_path.to_str().unwrap(),
            "-b",
            bare_input.to_str().unwrap(),
        ])
        .assert()
        .success();

    assert!(bare_input.with_file_name("payload.json").exists());
    Ok(())
}

#[test]
fn verbose_flag_logs_decode_progress() -> Result<(), Box<dyn Error>> {
    let files = build_sample_files(&sample_document())?;

    assert_cmd::Command::cargo_bin("bej")?
        .args([
            "decode",
            "-s",
            files.schema_path.to_str().unwrap(),
            "-a",
            files.annotation_path.to_str().unwrap(),
            "-b",
            files.bej_path.to_str().unwrap(),
            "-v",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("dictionary loaded"))
        .stderr(predicate::str::contains("stream header"));
    Ok(())
}

#[test]
fn corrupt_input_exits_nonzero() -> Result<(), Box<dyn Error>> {
    let mut doc = sample_document();
    doc.truncate(doc.len() - 3);
    let files = build_sample_files(&doc)?;

    assert_cmd::Command::cargo_bin("bej")?
        .args([
            "decode",
            "-s",
            files.schema_path.to_str().unwrap(),
            "-a",
            files.annotation_path.to_str().unwrap(),
            "-b",
            files.bej_path.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Decoding failed"));
    Ok(())
}

#[test]
fn missing_dictionary_exits_nonzero() -> Result<(), Box<dyn Error>> {
    let files = build_sample_files(&sample_document())?;

    assert_cmd::Command::cargo_bin("bej")?
        .args([
            "decode",
            "-s",
            "/nonexistent/schema.bin",
            "-a",
            files.annotation_path.to_str().unwrap(),
            "-b",
            files.bej_path.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Decoding failed"));
    Ok(())
}

#[test]
fn decode_requires_all_three_files() -> Result<(), Box<dyn Error>> {
    assert_cmd::Command::cargo_bin("bej")?
        .args(["decode", "-s", "only-schema.bin"])
        .assert()
        .failure();
    Ok(())
}
