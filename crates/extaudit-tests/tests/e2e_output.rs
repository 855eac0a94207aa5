//! End-to-end tests for the output channel envelope.

use extaudit_cli::commands::collect::write_inventory;
use extaudit_cli::output::OutputChannel;
use extaudit_tests::fixtures::ProfileFixture;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::fs;

fn read_envelope(path: &std::path::Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_inventory_envelope_written_to_file_channel() {
    let fixture = ProfileFixture::new();
    fixture
        .add_localized_extension(
            "ghbmnnjooekpmoecnnnilnnbdlolhkhi",
            "1.73.1_0",
            "extName",
            "en",
            "Google Docs Offline",
        )
        .set_state("ghbmnnjooekpmoecnnnilnnbdlolhkhi", 1);
    fixture.add_extension_dir("felcaaldnbdncclmgdcncolpebgiejap");

    let out = fixture.path().join("inventory.json");
    write_inventory(&fixture.layout(), &OutputChannel::File(out.clone())).unwrap();

    let doc = read_envelope(&out);
    assert_eq!(doc["schema_version"], 1);
    assert_eq!(doc["kind"], "extension_inventory");
    assert!(doc["generated_at_unix_ms"].as_u64().unwrap() > 0);
    assert_eq!(
        doc["outputs"],
        json!({
            "extension_count": {"type": "uint32", "value": 2},
            "extension_names": {
                "type": "string_list",
                "value": ["Google Docs Offline 1.73.1.0; enabled"]
            }
        })
    );
    assert_eq!(doc["diagnostics"][0]["code"], "D001");
    assert_eq!(
        doc["diagnostics"][0]["extension_id"],
        "felcaaldnbdncclmgdcncolpebgiejap"
    );
}

#[test]
fn test_empty_profile_envelope_uses_placeholder() {
    let fixture = ProfileFixture::new();
    let out = fixture.path().join("inventory.json");

    write_inventory(&fixture.layout(), &OutputChannel::File(out.clone())).unwrap();

    let doc = read_envelope(&out);
    assert_eq!(doc["outputs"]["extension_count"]["value"], 0);
    assert_eq!(doc["outputs"]["extension_names"]["value"], json!(["-"]));
    assert_eq!(doc["diagnostics"].as_array().unwrap().len(), 1);
    assert_eq!(doc["diagnostics"][0]["code"], "D030");
}

#[test]
fn test_unwritable_channel_is_fatal() {
    let fixture = ProfileFixture::new();
    let out = fixture.path().join("no-such-dir").join("inventory.json");

    let err = write_inventory(&fixture.layout(), &OutputChannel::File(out)).unwrap_err();
    assert!(err.to_string().contains("inventory.json"));
}
