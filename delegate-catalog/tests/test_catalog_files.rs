use delegate_catalog::{check_catalog, export_demo, FileCatalog};
use delegate_core::catalog::{Catalog, StaticCatalog};
use delegate_core::fixtures::demo_catalog;
use delegate_core::model::{Impact, Improvement};
use delegate_core::{GoalPage, ReviewPage};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn write_demo(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("catalog.json");
    let file = std::fs::File::create(&path).unwrap();
    export_demo(file).unwrap();
    path
}

#[test]
fn exported_demo_loads_back_unchanged() {
    let dir = TempDir::new().unwrap();
    let path = write_demo(&dir);

    let catalog = FileCatalog::load(&path, None).unwrap();
    assert_eq!(catalog.data(), &demo_catalog());
    assert_eq!(catalog.source(), path.as_path());
    assert_eq!(catalog.recommended().map(|r| r.id.as_str()), Some("allstate"));
}

#[test]
fn comparison_csv_replaces_table() {
    let dir = TempDir::new().unwrap();
    let path = write_demo(&dir);

    let csv = fixture("comparison.csv");
    let catalog = FileCatalog::load(&path, Some(csv.as_path())).unwrap();
    let rows = catalog.comparison_rows();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].feature, "Annual Premium");
    assert_eq!(rows[0].current, "$1,200");
    assert_eq!(rows[3].improvement, Improvement::Same);
    assert_eq!(rows[2].impact, Impact::Low);
}

#[test]
fn file_catalog_drives_pages() {
    let dir = TempDir::new().unwrap();
    let path = write_demo(&dir);
    let catalog = Arc::new(FileCatalog::load(&path, None).unwrap());

    let mut goal = GoalPage::new(catalog.clone());
    goal.add_constraint("budget", "$150/month").unwrap();

    let review = ReviewPage::mount(catalog).unwrap();
    assert_eq!(review.summary().annual_premium, 695);
}

#[test]
fn check_reports_broken_invariants() {
    let dir = TempDir::new().unwrap();
    let mut data = demo_catalog();
    for r in &mut data.recommendations {
        r.recommended = true;
    }
    let path = dir.path().join("broken.json");
    std::fs::write(&path, serde_json::to_string(&data).unwrap()).unwrap();

    let err = check_catalog(&path).unwrap_err();
    assert!(format!("{err:#}").contains("exactly one recommendation"));
    assert!(FileCatalog::load(&path, None).is_err());
    assert!(StaticCatalog::new(data).is_err());
}

#[test]
fn missing_and_malformed_files_fail_with_context() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.json");
    let err = FileCatalog::load(&missing, None).unwrap_err();
    assert!(err.to_string().contains("reading"));

    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, "{ not json").unwrap();
    let err = check_catalog(&bad).unwrap_err();
    assert!(err.to_string().contains("parsing"));
}
