use dupefind::duplicates::DuplicateMatcher;
use dupefind::output::{write_groups, OutputFormat};
use dupefind::session::io::{read_csv, read_json};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_paths_with_quotes() {
    let dir = tempdir().unwrap();

    // Windows does not allow double quotes in filenames.
    if cfg!(not(windows)) {
        fs::write(dir.path().join("file_with_\"quote\".txt"), b"content").unwrap();
        fs::write(dir.path().join("duplicate.txt"), b"content").unwrap();

        let groups = DuplicateMatcher::with_defaults().scan(&[dir.path()]).unwrap();
        assert_eq!(groups.len(), 1);

        let mut plain = Vec::new();
        write_groups(&groups, OutputFormat::Plain, &mut plain).unwrap();
        let plain = String::from_utf8(plain).unwrap();
        assert!(plain.contains("file_with_\\\"quote\\\".txt\""));

        let mut csv = Vec::new();
        write_groups(&groups, OutputFormat::Csv, &mut csv).unwrap();
        assert_eq!(read_csv(csv.as_slice()).unwrap(), groups);
    }
}

#[test]
fn test_paths_with_newlines() {
    let dir = tempdir().unwrap();

    // Windows does not allow newlines in filenames.
    if cfg!(not(windows)) {
        fs::write(dir.path().join("file_with\nnewline.txt"), b"content").unwrap();
        fs::write(dir.path().join("plain.txt"), b"content").unwrap();

        let groups = DuplicateMatcher::with_defaults().scan(&[dir.path()]).unwrap();
        assert_eq!(groups.len(), 1);

        let mut json = Vec::new();
        write_groups(&groups, OutputFormat::Json, &mut json).unwrap();
        assert_eq!(read_json(json.as_slice()).unwrap(), groups);

        let mut csv = Vec::new();
        write_groups(&groups, OutputFormat::Csv, &mut csv).unwrap();
        assert_eq!(read_csv(csv.as_slice()).unwrap(), groups);
    }
}

#[test]
fn test_unicode_paths() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("café.txt"), b"unicode").unwrap();
    fs::write(dir.path().join("日本語.txt"), b"unicode").unwrap();
    fs::write(dir.path().join("emoji_🎉.txt"), b"unicode").unwrap();

    let groups = DuplicateMatcher::with_defaults().scan(&[dir.path()]).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 3);

    let mut json = Vec::new();
    write_groups(&groups, OutputFormat::Json, &mut json).unwrap();
    assert_eq!(read_json(json.as_slice()).unwrap(), groups);
}

#[test]
fn test_paths_with_commas_and_spaces() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a, b.txt"), b"comma").unwrap();
    fs::write(dir.path().join("c d.txt"), b"comma").unwrap();

    let groups = DuplicateMatcher::with_defaults().scan(&[dir.path()]).unwrap();

    let mut csv = Vec::new();
    write_groups(&groups, OutputFormat::Csv, &mut csv).unwrap();
    assert_eq!(read_csv(csv.as_slice()).unwrap(), groups);
}
