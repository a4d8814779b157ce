use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::Output;
use tempfile::TempDir;

fn exec(data_dir: &Path, args: &[&str]) -> Output {
    cargo_bin_cmd!("pocketbook")
        .env("XDG_CONFIG_HOME", data_dir.join("config"))
        .args(["--data-dir", data_dir.to_str().expect("data dir")])
        .args(args)
        .output()
        .expect("run command")
}

fn run_cmd(data_dir: &Path, args: &[&str]) -> String {
    let output = exec(data_dir, args);
    assert!(output.status.success(), "command failed: {:?}", output);
    String::from_utf8(output.stdout).expect("utf8")
}

fn run_cmd_json(data_dir: &Path, args: &[&str]) -> Value {
    let mut full = vec!["--json"];
    full.extend_from_slice(args);
    let output = exec(data_dir, &full);
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("parse json")
}

fn exit_code(data_dir: &Path, args: &[&str]) -> Option<i32> {
    exec(data_dir, args).status.code()
}

#[test]
fn cli_contact_phone_birthday_flow() {
    let temp = TempDir::new().expect("temp dir");
    let dir = temp.path();

    run_cmd(
        dir,
        &[
            "contact", "add", "--name", "Alice", "--phone", "050 123 45 67", "--birthday",
            "25.05.1990",
        ],
    );
    run_cmd(dir, &["contact", "add", "--name", "Alice", "--phone", "0671112233"]);
    run_cmd(dir, &["phone", "edit", "Alice", "0671112233", "0931112233"]);

    let shown = run_cmd_json(dir, &["contact", "show", "Alice"]);
    assert_eq!(shown["name"], "Alice");
    assert_eq!(shown["phones"][0], "+380501234567");
    assert_eq!(shown["phones"][1], "+380931112233");
    assert_eq!(shown["birthday"], "25.05.1990");

    let found = run_cmd_json(dir, &["contact", "search", "phone=+380931112233"]);
    assert_eq!(found.as_array().expect("array").len(), 1);

    let days = run_cmd_json(
        dir,
        &["birthday", "days", "Alice", "--today", "20.05.2024"],
    );
    assert_eq!(days["days"], 5);

    let upcoming = run_cmd_json(
        dir,
        &["birthday", "upcoming", "--days", "7", "--today", "20.05.2024"],
    );
    assert_eq!(upcoming[0]["name"], "Alice");

    run_cmd(dir, &["contact", "edit", "Alice", "--name", "Alicia", "--email", "alicia@example.com"]);
    let shown = run_cmd_json(dir, &["contact", "show", "Alicia"]);
    assert_eq!(shown["email"], "alicia@example.com");
    assert_eq!(exit_code(dir, &["contact", "show", "Alice"]), Some(2));
}

#[test]
fn cli_rejects_invalid_input() {
    let temp = TempDir::new().expect("temp dir");
    let dir = temp.path();

    assert_eq!(
        exit_code(dir, &["contact", "add", "--name", "Bob", "--phone", "12345"]),
        Some(3)
    );
    assert_eq!(
        exit_code(dir, &["contact", "add", "--name", "Bob", "--email", "bad@@x"]),
        Some(3)
    );
    assert_eq!(exit_code(dir, &["phone", "add", "Nobody", "0501234567"]), Some(2));
    assert_eq!(exit_code(dir, &["contact", "search", "email=x"]), Some(3));
    assert!(!dir.join("contacts.json").exists());
}

#[test]
fn cli_lists_contacts_in_pages() {
    let temp = TempDir::new().expect("temp dir");
    let dir = temp.path();
    for i in 0..7 {
        run_cmd(dir, &["contact", "add", "--name", &format!("Contact {i}")]);
    }

    let first = run_cmd_json(dir, &["contact", "list"]);
    assert_eq!(first["page_count"], 2);
    assert_eq!(first["contacts"].as_array().expect("array").len(), 5);

    let second = run_cmd_json(dir, &["contact", "list", "--page", "2"]);
    assert_eq!(second["contacts"].as_array().expect("array").len(), 2);
    assert_eq!(second["contacts"][0]["name"], "Contact 5");

    assert_eq!(exit_code(dir, &["contact", "list", "--page", "0"]), Some(3));
}

#[test]
fn cli_note_locators_and_tags() {
    let temp = TempDir::new().expect("temp dir");
    let dir = temp.path();

    run_cmd(dir, &["note", "add", "Buy milk", "--tag", "errand"]);
    run_cmd(dir, &["note", "add", "Buy bread"]);

    assert_eq!(exit_code(dir, &["note", "rm", "buy"]), Some(4));

    let tagged = run_cmd_json(dir, &["note", "tag", "bread", "shop"]);
    assert_eq!(tagged["tags"][0], "shop");

    run_cmd(dir, &["note", "rm", "buy", "--pick", "1"]);
    let remaining = run_cmd_json(dir, &["note", "list"]);
    let remaining = remaining.as_array().expect("array");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["text"], "Buy bread");

    let id = remaining[0]["id"].as_str().expect("id").to_string();
    run_cmd(dir, &["note", "edit", &id, "Buy rye bread"]);
    let hits = run_cmd_json(dir, &["note", "search", "--word", "RYE", "--tag", "shop"]);
    assert_eq!(hits.as_array().expect("array").len(), 1);

    let tags = run_cmd_json(dir, &["note", "tags"]);
    assert_eq!(tags[0]["tag"], "shop");
    assert_eq!(tags[0]["count"], 1);

    assert_eq!(exit_code(dir, &["note", "rm", "eggs"]), Some(2));
}

#[test]
fn cli_note_lines_round_trip() {
    let temp = TempDir::new().expect("temp dir");
    let dir = temp.path();
    let input = dir.join("notes.txt");
    fs::write(&input, "Call mom;family\n\nPlan trip;travel;summer\n").expect("write");

    let report = run_cmd_json(dir, &["note", "import-lines", input.to_str().expect("path")]);
    assert_eq!(report["notes"], 2);

    let output = dir.join("out.txt");
    run_cmd(dir, &["note", "export-lines", output.to_str().expect("path")]);
    let written = fs::read_to_string(&output).expect("read");
    assert_eq!(written, "Call mom;family\nPlan trip;summer;travel\n");
}

#[test]
fn cli_sorts_a_directory() {
    let temp = TempDir::new().expect("temp dir");
    let dir = temp.path();
    let target = dir.join("downloads");
    fs::create_dir_all(target.join("old")).expect("mkdir");
    fs::write(target.join("song.mp3"), "a").expect("write");
    fs::write(target.join("old/report.pdf"), "b").expect("write");

    let report = run_cmd_json(dir, &["sort", target.to_str().expect("path")]);
    assert_eq!(report["moved"].as_array().expect("array").len(), 2);
    assert!(target.join("Audio/song.mp3").is_file());
    assert!(target.join("Documents/report.pdf").is_file());
    assert!(!target.join("old").exists());

    assert_eq!(
        exit_code(dir, &["sort", dir.join("missing").to_str().expect("path")]),
        Some(2)
    );
}

#[test]
fn cli_backup_and_restore() {
    let temp = TempDir::new().expect("temp dir");
    let dir = temp.path();
    run_cmd(dir, &["contact", "add", "--name", "Alice"]);
    run_cmd(dir, &["note", "add", "Remember"]);

    let backup = dir.join("backup.json");
    run_cmd(dir, &["backup", "--out", backup.to_str().expect("path")]);

    run_cmd(dir, &["contact", "delete", "Alice"]);
    let report = run_cmd_json(dir, &["restore", backup.to_str().expect("path")]);
    assert_eq!(report["contacts"], 1);
    assert_eq!(report["notes"], 1);

    let shown = run_cmd_json(dir, &["contact", "show", "Alice"]);
    assert_eq!(shown["name"], "Alice");

    let live = dir.join("contacts.json");
    assert_eq!(
        exit_code(dir, &["backup", "--out", live.to_str().expect("path")]),
        Some(3)
    );
    assert_eq!(
        exit_code(dir, &["restore", dir.join("nope.json").to_str().expect("path")]),
        Some(2)
    );
}

#[test]
fn cli_moves_corrupt_contacts_aside() {
    let temp = TempDir::new().expect("temp dir");
    let dir = temp.path();
    fs::write(dir.join("contacts.json"), "{not json").expect("write");

    let page = run_cmd_json(dir, &["contact", "list"]);
    assert_eq!(page["total"], 0);
    assert!(dir.join("contacts.json.corrupt").exists());
}
