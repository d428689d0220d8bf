// Integration tests for the adbook binary: CRUD actions, import counting,
// export/template output.
// Run with: cargo test -p adbook-cli --test cli_tests -- --nocapture

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self { dir: TempDir::new().unwrap() }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn adbook(&self, args: &[&str]) -> Output {
        let db = self.path().join("records.db");
        let uploads = self.path().join("uploads");
        Command::new(env!("CARGO_BIN_EXE_adbook"))
            .arg("--db")
            .arg(&db)
            .arg("--uploads")
            .arg(&uploads)
            .args(args)
            .current_dir(self.path())
            .output()
            .expect("adbook invocation")
    }

    fn ok(&self, args: &[&str]) -> String {
        let output = self.adbook(args);
        assert!(
            output.status.success(),
            "command {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }
}

#[test]
fn company_add_and_list() {
    let ws = Workspace::new();

    let id = ws.ok(&["company", "add", "--name", "Acme", "--phone", "555-0100"]);
    assert_eq!(id, "1");

    let listing = ws.ok(&["company", "list", "--json"]);
    let companies: Vec<serde_json::Value> = serde_json::from_str(&listing).expect("valid JSON");
    assert_eq!(companies.len(), 1);
    assert_eq!(companies[0]["name"], "Acme");
    assert_eq!(companies[0]["phone"], "555-0100");
}

#[test]
fn blank_client_name_is_rejected_with_validation_exit_code() {
    let ws = Workspace::new();

    ws.ok(&["client", "add", "--name", "Jane"]);

    let output = ws.adbook(&["client", "add", "--name", "   "]);
    assert_eq!(output.status.code(), Some(5), "expected validation exit code");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("required field"), "stderr was: {stderr}");

    // Client count unchanged
    let listing = ws.ok(&["client", "list", "--json"]);
    let clients: Vec<serde_json::Value> = serde_json::from_str(&listing).unwrap();
    assert_eq!(clients.len(), 1);
}

#[test]
fn client_search_finds_substring() {
    let ws = Workspace::new();
    ws.ok(&["client", "add", "--name", "Jane Doe"]);
    ws.ok(&["client", "add", "--name", "John Roe"]);

    let hits = ws.ok(&["client", "search", "Doe", "--json"]);
    let clients: Vec<serde_json::Value> = serde_json::from_str(&hits).unwrap();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0]["name"], "Jane Doe");
}

#[test]
fn import_counts_only_inserted_rows() {
    let ws = Workspace::new();

    // Row 2 has an empty date and must be skipped
    std::fs::write(
        ws.path().join("ads.csv"),
        "name,date,company,money\n\
         Jane,2025-06-01,Acme,100\n\
         Bob,,Acme,50\n\
         Rita,2025-06-03,Globex,75\n",
    )
    .unwrap();

    let count = ws.ok(&["import", "ads.csv", "--kind", "ads", "-q"]);
    assert_eq!(count, "2");

    let listing = ws.ok(&["ad", "list", "--json"]);
    let ads: Vec<serde_json::Value> = serde_json::from_str(&listing).unwrap();
    assert_eq!(ads.len(), 2);
}

#[test]
fn import_of_unreadable_file_fails_with_parse_exit_code() {
    let ws = Workspace::new();
    std::fs::write(ws.path().join("broken.xlsx"), b"not a workbook").unwrap();

    let output = ws.adbook(&["import", "broken.xlsx", "--kind", "ads"]);
    assert_eq!(output.status.code(), Some(4));

    let listing = ws.ok(&["ad", "list", "--json"]);
    let ads: Vec<serde_json::Value> = serde_json::from_str(&listing).unwrap();
    assert!(ads.is_empty());
}

#[test]
fn export_writes_an_xlsx_document() {
    let ws = Workspace::new();
    ws.ok(&[
        "ad", "add", "--client", "Jane", "--company", "Acme", "--date", "2025-06-01",
        "--amount", "120.5",
    ]);

    ws.ok(&["export", "ads", "--out", "report.xlsx", "-q"]);

    let bytes = std::fs::read(ws.path().join("report.xlsx")).unwrap();
    // xlsx documents are zip archives
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn template_writes_an_xlsx_document() {
    let ws = Workspace::new();
    ws.ok(&["template", "--out", "template.xlsx", "-q"]);

    let bytes = std::fs::read(ws.path().join("template.xlsx")).unwrap();
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn contract_number_suggestion_is_max_plus_one() {
    let ws = Workspace::new();

    assert_eq!(ws.ok(&["contract", "next-number"]), "1");

    ws.ok(&["contract", "add", "--number", "5", "--client", "Jane"]);
    assert_eq!(ws.ok(&["contract", "next-number"]), "6");

    // Default number for the next add picks up the suggestion
    ws.ok(&["contract", "add", "--client", "Bob"]);
    let listing = ws.ok(&["contract", "list", "--json"]);
    let contracts: Vec<serde_json::Value> = serde_json::from_str(&listing).unwrap();
    assert_eq!(contracts[0]["invoke_number"], 6);
}

#[test]
fn unknown_ad_status_is_a_usage_error() {
    let ws = Workspace::new();
    let output = ws.adbook(&["ad", "add", "--client", "Jane", "--status", "archived"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown status"), "stderr was: {stderr}");
}

#[test]
fn attach_stores_a_sanitized_file_name() {
    let ws = Workspace::new();
    std::fs::write(ws.path().join("my logo.png"), b"png bytes").unwrap();

    let stored = ws.ok(&["attach", "my logo.png"]);
    assert_eq!(stored, "my_logo.png");
    assert!(ws.path().join("uploads").join("my_logo.png").is_file());
}

#[test]
fn company_delete_leaves_ad_references_behind() {
    let ws = Workspace::new();
    let company_id = ws.ok(&["company", "add", "--name", "Acme"]);
    ws.ok(&[
        "ad", "add", "--client", "Jane", "--company-id", &company_id, "--date", "2025-06-01",
    ]);
    ws.ok(&["company", "delete", "--id", &company_id]);

    let listing = ws.ok(&["ad", "list", "--json"]);
    let ads: Vec<serde_json::Value> = serde_json::from_str(&listing).unwrap();
    assert_eq!(ads[0]["company"]["linked"]["name"], "Acme");
}
