mod common;
use assert_cmd::Command;
use common::*;
use comparadb::provider::save_snapshot;
use tempfile::TempDir;

fn comparadb(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("comparadb").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("COMPARADB_OLD")
        .env_remove("COMPARADB_NEW")
        .env_remove("COMPARADB_SCHEMA");
    cmd
}

fn write_snapshots(dir: &TempDir, old: &Schema, new: &Schema) {
    save_snapshot(old, &dir.path().join("old.json")).unwrap();
    save_snapshot(new, &dir.path().join("new.json")).unwrap();
}

fn orders(extra: Vec<Column>) -> Table {
    let mut columns = vec![not_null(column("id", "integer"))];
    columns.extend(extra);
    table("orders", columns, &["id"])
}

#[test]
fn compare_prints_script_to_stdout() {
    let dir = TempDir::new().unwrap();
    write_snapshots(
        &dir,
        &schema_with(vec![orders(vec![])]),
        &schema_with(vec![orders(vec![not_null(column("status", "text"))])]),
    );

    let output = comparadb(&dir)
        .args(["compare", "--old", "old.json", "--new", "new.json", "--stdout"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(
        stdout,
        "-- Add column status to orders\nALTER TABLE orders ADD COLUMN IF NOT EXISTS status text NOT NULL;\n\n"
    );
}

#[test]
fn compare_writes_timestamped_script_file() {
    let dir = TempDir::new().unwrap();
    write_snapshots(
        &dir,
        &schema_with(vec![orders(vec![]), table("archive", vec![], &[])]),
        &schema_with(vec![orders(vec![])]),
    );

    let output = comparadb(&dir)
        .args(["compare", "--old", "old.json", "--new", "new.json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Update script written to"));

    let scripts: Vec<_> = std::fs::read_dir(dir.path().join("SqlScripts"))
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(scripts.len(), 1);

    let name = scripts[0].file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("UpdateScript_"));
    assert!(name.ends_with(".sql"));

    let content = std::fs::read_to_string(&scripts[0]).unwrap();
    assert!(content.contains("DROP TABLE IF EXISTS archive CASCADE;"));
}

#[test]
fn compare_reports_no_differences_without_writing() {
    let dir = TempDir::new().unwrap();
    let schema = schema_with(vec![orders(vec![])]);
    write_snapshots(&dir, &schema, &schema);

    let output = comparadb(&dir)
        .args(["compare", "--old", "old.json", "--new", "new.json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap().trim(),
        "No differences found between the two databases."
    );
    assert!(!dir.path().join("SqlScripts").exists());
}

#[test]
fn compare_reads_sources_from_settings_file() {
    let dir = TempDir::new().unwrap();
    write_snapshots(
        &dir,
        &schema_with(vec![]),
        &schema_with(vec![orders(vec![])]),
    );
    std::fs::write(
        dir.path().join("appsettings.json"),
        r#"{"ConnectionStrings": {"OldDb": "old.json", "NewDb": "json:new.json"}}"#,
    )
    .unwrap();

    let output = comparadb(&dir)
        .args(["compare", "--stdout"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("CREATE TABLE orders ("));
    assert!(stdout.contains("ALTER TABLE orders ADD PRIMARY KEY (id);"));
}

#[test]
fn compare_reads_sources_from_environment() {
    let dir = TempDir::new().unwrap();
    write_snapshots(
        &dir,
        &schema_with(vec![orders(vec![])]),
        &schema_with(vec![]),
    );

    let output = comparadb(&dir)
        .env("COMPARADB_OLD", "old.json")
        .env("COMPARADB_NEW", "new.json")
        .args(["compare", "--stdout"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout)
        .unwrap()
        .contains("DROP TABLE IF EXISTS orders CASCADE;"));
}

#[test]
fn compare_without_sources_fails() {
    let dir = TempDir::new().unwrap();

    let output = comparadb(&dir).args(["compare"]).output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("No old schema source given"));
}

#[test]
fn compare_rejects_unknown_source_kind() {
    let dir = TempDir::new().unwrap();

    let output = comparadb(&dir)
        .args(["compare", "--old", "schema.sql", "--new", "new.json"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr)
        .unwrap()
        .contains("Invalid schema source: schema.sql"));
}

#[test]
fn snapshot_copies_a_snapshot_file() {
    let dir = TempDir::new().unwrap();
    let schema = schema_with(vec![orders(vec![column("note", "text")])]);
    write_snapshots(&dir, &schema, &Schema::new());

    let output = comparadb(&dir)
        .args(["snapshot", "--source", "old.json", "--output", "copy.json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let copy = comparadb::provider::load_snapshot(&dir.path().join("copy.json")).unwrap();
    assert_eq!(copy, schema);
}
