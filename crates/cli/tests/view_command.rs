use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const CATEGORIES: &str = r#"[
    {"id": 1, "parentId": null, "name": "Akademik", "type": "akademik"},
    {"id": 2, "parentId": 1, "name": "Nöroloji", "type": "akademik"},
    {"id": 3, "parentId": 2, "name": "Sinir Sistemi", "type": "akademik"},
    {"id": 4, "parentId": null, "name": "Seminerler", "type": "seminer"},
    {"id": 5, "parentId": 4, "name": "Fizik Tedavi", "type": "seminer"},
    {"id": 6, "parentId": null, "name": "Klinik", "type": "seminer"}
]"#;

const CONTENT: &str = r#"[
    {"id": 100, "categoryId": 5, "title": "Fizik tedavi semineri", "speaker": "Dr. A"},
    {"id": 101, "categoryId": 3, "title": "Fizik muayenesi", "description": "Nörolojik vaka"},
    {"id": 102, "categoryId": 6, "title": "Klinik sunum"}
]"#;

fn setup_snapshot() -> tempfile::TempDir {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("categories.json"), CATEGORIES).unwrap();
    fs::write(temp.path().join("content.json"), CONTENT).unwrap();
    temp
}

#[allow(deprecated)]
fn catalog(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("catalog").expect("binary");
    cmd.current_dir(workdir).env_remove("CATALOG_CONFIG");
    cmd
}

fn run_view(workdir: &Path, extra: &[&str]) -> Value {
    let output = catalog(workdir)
        .args(["--quiet", "view", "--categories", "categories.json", "--content", "content.json"])
        .args(extra)
        .output()
        .expect("command run");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid json")
}

fn item_ids(view: &Value) -> Vec<i64> {
    view["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect()
}

#[test]
fn view_resolves_selected_leaf() {
    let temp = setup_snapshot();
    let view = run_view(temp.path(), &["--query", "?type=akademik&category_id=3"]);

    assert_eq!(view["active_tag"], "akademik");
    assert_eq!(view["selected_category_id"], 3);
    assert_eq!(view["shows_content"], true);
    assert_eq!(item_ids(&view), vec![101]);
    assert_eq!(view["query"], "type=akademik&category_id=3");

    let trail: Vec<_> = view["breadcrumb"]["trail"]
        .as_array()
        .unwrap()
        .iter()
        .map(|node| node["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(trail, vec!["Akademik", "Nöroloji", "Sinir Sistemi"]);
}

#[test]
fn view_search_stays_inside_tag() {
    let temp = setup_snapshot();
    let view = run_view(temp.path(), &["--query", "type=seminer", "--search", "fizik"]);

    assert_eq!(view["search_term"], "fizik");
    assert_eq!(item_ids(&view), vec![100]);
    assert_eq!(view["items"][0]["speaker"], "Dr. A");
}

#[test]
fn view_repairs_unknown_parameters() {
    let temp = setup_snapshot();
    let view = run_view(temp.path(), &["--query", "type=video&category_id=abc"]);

    assert_eq!(view["active_tag"], "all");
    assert!(view["selected_category_id"].is_null());
    assert_eq!(item_ids(&view), vec![100, 101, 102]);
    assert_eq!(view["query"], "");
}

#[test]
fn view_reads_snapshot_paths_from_config() {
    let temp = setup_snapshot();
    fs::write(
        temp.path().join("catalog.toml"),
        "[snapshot]\ncategories = \"categories.json\"\ncontent = \"content.json\"\n",
    )
    .unwrap();
    let elsewhere = tempdir().unwrap();

    let output = catalog(elsewhere.path())
        .arg("--config")
        .arg(temp.path().join("catalog.toml"))
        .args(["--quiet", "view", "--query", "category_id=5"])
        .output()
        .expect("command run");
    assert!(output.status.success());

    let view: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(view["active_tag"], "seminer");
    assert_eq!(item_ids(&view), vec![100]);
}

#[test]
fn view_without_categories_fails() {
    let temp = tempdir().unwrap();
    catalog(temp.path())
        .args(["--quiet", "view"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No categories snapshot given"));
}

#[test]
fn tree_prints_outline() {
    let temp = setup_snapshot();
    catalog(temp.path())
        .args(["--quiet", "tree", "--categories", "categories.json", "--tag", "seminer"])
        .assert()
        .success()
        .stdout("Seminerler #4 [seminer]\n  Fizik Tedavi #5\nKlinik #6 [seminer]\n");
}

#[test]
fn cyclic_snapshot_still_renders() {
    let temp = tempdir().unwrap();
    fs::write(
        temp.path().join("categories.json"),
        r#"[
            {"id": 1, "parentId": 2, "name": "A", "type": "akademik"},
            {"id": 2, "parentId": 1, "name": "B", "type": "akademik"}
        ]"#,
    )
    .unwrap();

    catalog(temp.path())
        .args(["tree", "--categories", "categories.json"])
        .assert()
        .success()
        .stdout("A #1 [akademik]\n  B #2\n")
        .stderr(predicate::str::contains("parent cycles"));
}
