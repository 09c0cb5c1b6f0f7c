use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "routesim-rs-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write_file(dir: &PathBuf, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write temp file");
    path
}

const TOPOLOGY: &str = "1 2 2\n1 3 1\n2 3 1\n2 4 3\n3 4 1\n5 6 1\n";
const MESSAGES: &str = "1 6 hello\n6 1 back\n";
const CHANGES: &str = "4 5 1\n";

#[test]
fn dvr_writes_rounds_to_output_file() {
    let dir = unique_temp_dir("dvr-text");
    let topology = write_file(&dir, "topology.txt", TOPOLOGY);
    let messages = write_file(&dir, "message.txt", MESSAGES);
    let changes = write_file(&dir, "changes.txt", CHANGES);
    let out = dir.join("output.txt");

    let output = Command::new(env!("CARGO_BIN_EXE_dvr"))
        .args([
            topology.to_str().unwrap(),
            messages.to_str().unwrap(),
            changes.to_str().unwrap(),
            out.to_str().unwrap(),
        ])
        .output()
        .expect("run dvr");
    assert!(
        output.status.success(),
        "dvr failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let text = fs::read_to_string(&out).expect("read output.txt");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(&lines[..6], &["1 1 0", "2 2 2", "3 3 1", "4 3 2", "", "1 1 2"]);
    assert!(text.contains("from 1 to 6 cost infinite hops unreachable message hello\n"));
    assert!(text.contains("from 1 to 6 cost 4 hops 1 3 4 5 message hello\n"));
    assert!(text.contains("from 6 to 1 cost 4 hops 6 5 4 3 message back\n"));
    assert!(text.ends_with("message back\n\n"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn dvr_writes_json_rounds() {
    let dir = unique_temp_dir("dvr-json");
    let topology = write_file(&dir, "topology.txt", TOPOLOGY);
    let messages = write_file(&dir, "message.txt", MESSAGES);
    let changes = write_file(&dir, "changes.txt", CHANGES);
    let out = dir.join("output.txt");
    let out_json = dir.join("rounds.json");

    let output = Command::new(env!("CARGO_BIN_EXE_dvr"))
        .args([
            topology.to_str().unwrap(),
            messages.to_str().unwrap(),
            changes.to_str().unwrap(),
            out.to_str().unwrap(),
            "--json",
            out_json.to_str().unwrap(),
        ])
        .output()
        .expect("run dvr");
    assert!(
        output.status.success(),
        "dvr failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let raw = fs::read_to_string(&out_json).expect("read rounds.json");
    let v: Value = serde_json::from_str(&raw).expect("parse rounds.json");
    let arr = v.as_array().expect("rounds.json must be a JSON array");
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[1]["round"], 1);
    assert_eq!(arr[1]["change"]["a"], 4);
    assert_eq!(arr[1]["change"]["b"], 5);
    let hops: Vec<u64> = arr[1]["messages"][0]["delivery"]["hops"]
        .as_array()
        .expect("hops array")
        .iter()
        .filter_map(|h| h.as_u64())
        .collect();
    assert_eq!(hops, vec![1, 3, 4, 5]);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn dvr_rejects_malformed_topology() {
    let dir = unique_temp_dir("dvr-bad");
    let topology = write_file(&dir, "topology.txt", "1 2\n");
    let messages = write_file(&dir, "message.txt", "");
    let changes = write_file(&dir, "changes.txt", "");
    let out = dir.join("output.txt");

    let output = Command::new(env!("CARGO_BIN_EXE_dvr"))
        .args([
            topology.to_str().unwrap(),
            messages.to_str().unwrap(),
            changes.to_str().unwrap(),
            out.to_str().unwrap(),
        ])
        .output()
        .expect("run dvr");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 1"), "stderr={stderr}");
    assert!(!out.exists());

    let _ = fs::remove_dir_all(&dir);
}
