use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::Value;

fn call_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fretboard"))
        .args(args)
        .output()
        .unwrap()
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(ToOwned::to_owned)
        .collect()
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = env::temp_dir().join(format!("fretboard-cli-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn chords_lists_the_whole_catalog() {
    let output = call_cli(&["chords"]);
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 51);
    assert!(lines[0].starts_with("Maj."));
    assert!(lines.iter().any(|line| line.contains("1,3b,5")));
}

#[test]
fn tunings_filter_by_string_count() {
    let output = call_cli(&["tunings", "-s", "4"]);
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("Bass Standard"));
}

#[test]
fn scales_list_interval_patterns() {
    let output = call_cli(&["scales"]);
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 20);
    assert!(lines.iter().any(|line| line.contains("2,1,2,2,2,1,2")));
}

#[test]
fn find_prints_ranked_fingerings() {
    let output = call_cli(&["find", "C7", "-n", "5"]);
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    assert!(!lines.is_empty());
    assert!(lines.len() <= 5);
    for line in &lines {
        assert!(line.contains("playability"), "{line}");
        assert!(line.contains("inversion"), "{line}");
        // Six fields before the first separator: one per guitar string.
        let pattern = line.split('|').next().unwrap();
        assert_eq!(pattern.split_whitespace().count(), 6, "{line}");
    }
}

#[test]
fn find_rejects_unknown_chords_and_tunings() {
    assert!(!call_cli(&["find", "Cxyz"]).status.success());
    assert!(!call_cli(&["find", "C", "--tuning", "Open H"]).status.success());
}

#[test]
fn cache_writes_fingering_artifacts() {
    let dir = scratch_dir("cache");
    let output = call_cli(&["cache", dir.to_str().unwrap()]);
    assert!(output.status.success());

    // One file per catalog chord and root.
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 51 * 12);

    let file = dir.join("Guitar_Standard_Maj._0.json");
    let parsed: Value = serde_json::from_str(&fs::read_to_string(file).unwrap()).unwrap();

    let entries = parsed.as_array().unwrap();
    assert!(!entries.is_empty());
    for entry in entries {
        let notes = entry["notes"].as_array().unwrap();
        assert_eq!(notes.len(), 6);
        let frets: Vec<_> = notes.iter().map(|note| note.as_i64().unwrap()).collect();
        assert!(frets.iter().all(|&fret| fret == -1 || (0..22).contains(&fret)));

        let sounding: Vec<_> = frets.iter().filter(|&&fret| fret != -1).collect();
        let span = sounding.iter().copied().max().unwrap() - sounding.iter().copied().min().unwrap();
        assert!(span <= 4);
    }

    fs::remove_dir_all(&dir).unwrap();
}
