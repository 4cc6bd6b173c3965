use clap::Parser;
use dupefind::cli::Cli;
use dupefind::duplicates::{filter_groups, DuplicateGroup, DuplicateMatcher};
use dupefind::output::{write_groups, OutputFormat};
use dupefind::session::{load_groups, resolve_to_cwd, InputFormat};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn populate(root: &Path) {
    fs::write(root.join("a.txt"), b"alpha alpha").unwrap();
    fs::write(root.join("b.txt"), b"alpha alpha").unwrap();
    fs::create_dir(root.join("backup")).unwrap();
    fs::write(root.join("backup/a.txt"), b"alpha alpha").unwrap();
    fs::write(root.join("x.bin"), b"xyz").unwrap();
    fs::write(root.join("backup/x.bin"), b"xyz").unwrap();
}

fn save(groups: &[DuplicateGroup], format: OutputFormat, path: &Path) {
    let file = fs::File::create(path).unwrap();
    write_groups(groups, format, file).unwrap();
}

#[test]
fn test_json_save_load_rescan() {
    let dir = tempdir().unwrap();
    populate(dir.path());
    let groups = DuplicateMatcher::with_defaults().scan(&[dir.path()]).unwrap();

    let out = tempdir().unwrap();
    let list = out.path().join("groups.json");
    save(&groups, OutputFormat::Json, &list);

    let loaded = load_groups(&list, InputFormat::Json).unwrap();
    assert_eq!(loaded, groups);

    let mut matcher = DuplicateMatcher::with_defaults();
    let rescanned = matcher.rescan(&loaded).unwrap();
    assert_eq!(rescanned, groups);
}

#[test]
fn test_csv_save_load_rescan() {
    let dir = tempdir().unwrap();
    populate(dir.path());
    let groups = DuplicateMatcher::with_defaults().scan(&[dir.path()]).unwrap();

    let out = tempdir().unwrap();
    let list = out.path().join("groups.csv");
    save(&groups, OutputFormat::Csv, &list);

    let loaded = load_groups(&list, InputFormat::Csv).unwrap();
    assert_eq!(loaded, groups);

    let rescanned = DuplicateMatcher::with_defaults().rescan(&loaded).unwrap();
    assert_eq!(rescanned, groups);
}

#[test]
fn test_rescan_after_changes() {
    let dir = tempdir().unwrap();
    populate(dir.path());
    let groups = DuplicateMatcher::with_defaults().scan(&[dir.path()]).unwrap();

    fs::remove_file(dir.path().join("backup/x.bin")).unwrap();
    fs::write(dir.path().join("b.txt"), b"alpha omega").unwrap();

    let mut matcher = DuplicateMatcher::with_defaults();
    let rescanned = matcher.rescan(&groups).unwrap();

    assert_eq!(rescanned.len(), 1);
    assert_eq!(rescanned[0].len(), 2);
    assert_eq!(matcher.summary().errors.len(), 1);
}

#[test]
fn test_rescan_does_not_discover_new_files() {
    let dir = tempdir().unwrap();
    populate(dir.path());
    let groups = DuplicateMatcher::with_defaults().scan(&[dir.path()]).unwrap();

    fs::write(dir.path().join("c.txt"), b"alpha alpha").unwrap();

    let rescanned = DuplicateMatcher::with_defaults().rescan(&groups).unwrap();
    assert_eq!(rescanned, groups);
}

#[test]
fn test_load_relative_paths_resolved_lexically() {
    let out = tempdir().unwrap();
    let list = out.path().join("groups.json");
    fs::write(&list, r#"[["docs/a.txt", "/abs/b.txt"], []]"#).unwrap();

    let loaded = load_groups(&list, InputFormat::Json).unwrap();
    let resolved = resolve_to_cwd(loaded, Path::new("/home/me/../me"));

    assert_eq!(resolved.len(), 1);
    assert_eq!(
        resolved[0].files,
        vec![
            PathBuf::from("/home/me/../me/docs/a.txt"),
            PathBuf::from("/abs/b.txt")
        ]
    );
}

#[test]
fn test_filter_loaded_groups() {
    let dir = tempdir().unwrap();
    populate(dir.path());
    let groups = DuplicateMatcher::with_defaults().scan(&[dir.path()]).unwrap();

    let filtered = filter_groups(&groups, &Regex::new("/backup/").unwrap());

    assert_eq!(filtered.len(), 2);
    for group in &filtered {
        assert_eq!(group.len(), 1);
        assert!(group.files[0].to_string_lossy().contains("/backup/"));
    }
}

#[test]
fn test_filter_matches_saved_relative_paths() {
    let out = tempdir().unwrap();
    let list = out.path().join("groups.json");
    fs::write(&list, r#"[["backup/a.txt", "photos/a.txt"]]"#).unwrap();
    let out_file = out.path().join("filtered.json");

    let cli = Cli::try_parse_from([
        "dupefind",
        "-q",
        "-i",
        list.to_str().unwrap(),
        "-f",
        "^backup/",
        "--out-type",
        "json",
        "-o",
        out_file.to_str().unwrap(),
    ])
    .unwrap();
    let code = dupefind::run_app(cli).unwrap();

    let written: Vec<Vec<String>> =
        serde_json::from_str(&fs::read_to_string(&out_file).unwrap()).unwrap();
    let cwd = std::env::current_dir().unwrap();
    assert_eq!(code, dupefind::error::ExitCode::Success);
    assert_eq!(
        written,
        vec![vec![cwd.join("backup/a.txt").to_string_lossy().into_owned()]]
    );
}

#[test]
fn test_load_wrong_format_fails() {
    let out = tempdir().unwrap();
    let list = out.path().join("groups.csv");
    fs::write(&list, "Count,Path\n1,/a\n").unwrap();

    assert!(load_groups(&list, InputFormat::Json).is_err());
}
