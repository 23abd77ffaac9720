use std::path::Path;
use std::process::{Command, Output};

fn shipcheck(args: &[&str], dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_shipcheck"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run shipcheck")
}

fn write_clean_session(dir: &Path) {
    std::fs::write(
        dir.join("session.toml"),
        r#"
name = "CLI test session"
extractions = ["packing.json"]

[boq]
file = "boq.csv"
"#,
    )
    .unwrap();
    std::fs::write(
        dir.join("packing.json"),
        r#"{
            "sourceFileName": "packing.pdf",
            "extractedAt": "2026-08-12T09:00:00Z",
            "currency": "EUR",
            "confidence": 0.95,
            "items": [
                {"articleNumber": "A-1", "description": "Steel beam", "quantity": 100, "unit": "pcs"}
            ]
        }"#,
    )
    .unwrap();
    std::fs::write(
        dir.join("boq.csv"),
        "item_number,description,unit,quantity\nA-1,Steel beam,pcs,100\n",
    )
    .unwrap();
}

#[test]
fn check_clean_session_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    write_clean_session(dir.path());

    let out = shipcheck(&["check", "session.toml", "--json"], dir.path());
    assert_eq!(out.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let result: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(result["summary"]["missing_from_shipment"], 0);
    assert_eq!(result["meta"]["session_name"], "CLI test session");
}

#[test]
fn check_with_findings_exits_three() {
    let dir = tempfile::tempdir().unwrap();
    write_clean_session(dir.path());
    // Add a BOQ row nothing declares
    std::fs::write(
        dir.path().join("boq.csv"),
        "item_number,description,unit,quantity\nA-1,Steel beam,pcs,100\nB2,Bracket,pcs,10\n",
    )
    .unwrap();

    let out = shipcheck(&["check", "session.toml", "--json"], dir.path());
    assert_eq!(out.status.code(), Some(3));

    let result: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(result["summary"]["missing_from_shipment"], 1);
    assert_eq!(result["report"]["missing_from_shipment"][0]["item_number"], "B2");
}

#[test]
fn check_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    write_clean_session(dir.path());

    let out = shipcheck(&["check", "session.toml", "--output", "report.json"], dir.path());
    assert_eq!(out.status.code(), Some(0));
    let written = std::fs::read_to_string(dir.path().join("report.json")).unwrap();
    let result: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert!(result["meta"]["engine_version"].is_string());
}

#[test]
fn invalid_config_exits_four() {
    let dir = tempfile::tempdir().unwrap();
    write_clean_session(dir.path());
    std::fs::write(
        dir.path().join("session.toml"),
        "name = \"x\"\nextractions = []\n\n[boq]\nfile = \"boq.csv\"\n",
    )
    .unwrap();

    let out = shipcheck(&["check", "session.toml"], dir.path());
    assert_eq!(out.status.code(), Some(4));
}

#[test]
fn duplicate_boq_exits_five() {
    let dir = tempfile::tempdir().unwrap();
    write_clean_session(dir.path());
    std::fs::write(
        dir.path().join("boq.csv"),
        "item_number,description,unit,quantity\nA-1,Steel beam,pcs,100\na1,Steel beam,pcs,5\n",
    )
    .unwrap();

    let out = shipcheck(&["validate", "session.toml"], dir.path());
    assert_eq!(out.status.code(), Some(5));
    assert!(String::from_utf8_lossy(&out.stderr).contains("collides"));
}

#[test]
fn validate_ok() {
    let dir = tempfile::tempdir().unwrap();
    write_clean_session(dir.path());
    let out = shipcheck(&["validate", "session.toml"], dir.path());
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stderr).contains("ok:"));
}

#[test]
fn submit_payload_strips_internal_ids() {
    let dir = tempfile::tempdir().unwrap();
    write_clean_session(dir.path());

    let out = shipcheck(&["submit-payload", "session.toml"], dir.path());
    assert_eq!(out.status.code(), Some(0));

    let payload: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let items = payload.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["articleNumber"], "A-1");
    assert!(items[0].get("id").is_none());
    assert!(items[0].get("documentId").is_none());
}

#[test]
fn summary_json_exposes_aggregate_and_documents() {
    let dir = tempfile::tempdir().unwrap();
    write_clean_session(dir.path());

    let out = shipcheck(&["summary", "session.toml", "--json"], dir.path());
    assert_eq!(out.status.code(), Some(0));

    let summary: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(summary["documents"][0]["document_id"], "doc_1");
    assert_eq!(summary["aggregate"]["currencies_match"], true);
    assert_eq!(summary["aggregate"]["header"]["currency"], "EUR");
}
