use modelconf::cli::commands::diff::diff_files;
use modelconf::cli::commands::patch::patch_files;
use modelconf::delta::{KeyClass, classify, diff};
use modelconf::io::{load_flat_document, persist_json};
use modelconf::{FlatDocument, PatchMode, Patcher};
use serde_json::json;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn doc(value: serde_json::Value) -> FlatDocument {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_fixture_delta_file() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("out").join("delta.json");

    let delta = diff_files(
        &fixture("config.json"),
        &fixture("patched_config.json"),
        &output,
    )
    .unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(
        written,
        json!({
            "additions": [{"key": "timezone", "value": "UTC+3"}],
            "deletions": ["alarm_sink"],
            "updates": [
                {"key": "site_name", "from": "North Ridge", "to": "North Ridge 2"},
                {
                    "key": "carrier",
                    "from": {"arfcn": 62, "power_dbm": 43.0},
                    "to": {"arfcn": 62, "power_dbm": 40.5}
                }
            ]
        })
    );
    assert_eq!(delta.len(), 4);
}

#[test]
fn test_fixture_patch_modes() {
    let temp_dir = TempDir::new().unwrap();
    let delta_path = temp_dir.path().join("delta.json");
    diff_files(
        &fixture("config.json"),
        &fixture("patched_config.json"),
        &delta_path,
    )
    .unwrap();

    let delta_only = patch_files(
        &fixture("config.json"),
        &delta_path,
        &temp_dir.path().join("delta_only.json"),
        PatchMode::DeltaOnly,
    )
    .unwrap();
    let keys: Vec<_> = delta_only.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["site_name", "carrier", "timezone"]);

    let in_place = patch_files(
        &fixture("config.json"),
        &delta_path,
        &temp_dir.path().join("in_place.json"),
        PatchMode::InPlace,
    )
    .unwrap();
    assert_eq!(in_place, load_flat_document(&fixture("patched_config.json")).unwrap());
}

#[test]
fn test_round_trip_per_contract() {
    let a = doc(json!({"x": 1, "y": 2}));
    let b = doc(json!({"y": 3, "z": 4}));

    let patched = Patcher::new(PatchMode::DeltaOnly).apply(&a, &diff(&a, &b));
    assert_eq!(patched, doc(json!({"y": 3, "z": 4})));
}

#[test]
fn test_partition_law_over_samples() {
    let samples = [
        (json!({}), json!({})),
        (json!({"a": 1}), json!({})),
        (json!({}), json!({"a": 1})),
        (json!({"a": 1, "b": [1]}), json!({"b": [1], "a": 2, "c": null})),
        (
            json!({"k": {"deep": {"x": 1}}, "m": "s"}),
            json!({"k": {"deep": {"x": 2}}, "n": "s"}),
        ),
    ];

    for (a, b) in samples {
        let (a, b) = (doc(a), doc(b));
        let classes = classify(&a, &b);
        let delta = diff(&a, &b);

        let union: HashSet<_> = a.keys().chain(b.keys()).cloned().collect();
        assert_eq!(classes.len(), union.len());

        let unchanged: HashSet<_> = classes
            .iter()
            .filter(|(_, class)| **class == KeyClass::Unchanged)
            .map(|(key, _)| key.clone())
            .collect();
        let deleted: HashSet<_> = delta.deletions.iter().cloned().collect();
        let updated: HashSet<_> = delta.updates.iter().map(|u| u.key.clone()).collect();
        let added: HashSet<_> = delta.additions.iter().map(|a| a.key.clone()).collect();

        let total = unchanged.len() + deleted.len() + updated.len() + added.len();
        assert_eq!(total, union.len(), "sets overlap for {a:?} / {b:?}");

        let mut covered = unchanged;
        covered.extend(deleted);
        covered.extend(updated);
        covered.extend(added.iter().cloned());
        assert_eq!(covered, union);

        let only_in_b: HashSet<_> = b.keys().filter(|k| !a.contains_key(*k)).cloned().collect();
        assert_eq!(added, only_in_b);
    }
}

#[test]
fn test_persisted_output_is_byte_identical() {
    let temp_dir = TempDir::new().unwrap();
    let a = load_flat_document(&fixture("config.json")).unwrap();
    let b = load_flat_document(&fixture("patched_config.json")).unwrap();

    let first = temp_dir.path().join("first.json");
    let second = temp_dir.path().join("second.json");
    persist_json(&diff(&a, &b), &first).unwrap();
    persist_json(&diff(&a, &b), &second).unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}
