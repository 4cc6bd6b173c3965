use dupefind::duplicates::{DuplicateMatcher, MatcherConfig};
use dupefind::scanner::Metric;
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tempfile::tempdir;

fn write(path: &Path, content: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    File::create(path).unwrap().write_all(content).unwrap();
}

fn file_names(paths: &[std::path::PathBuf]) -> BTreeSet<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();
    let mut matcher = DuplicateMatcher::with_defaults();

    let groups = matcher.scan(&[dir.path()]).unwrap();

    assert!(groups.is_empty());
    assert_eq!(matcher.summary().files_examined, 0);
    assert_eq!(matcher.summary().duplicate_groups, 0);
}

#[test]
fn test_scan_unique_files() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("a.txt"), b"content a");
    write(&dir.path().join("b.txt"), b"content b");
    write(&dir.path().join("c.txt"), b"content c");

    let mut matcher = DuplicateMatcher::with_defaults();
    let groups = matcher.scan(&[dir.path()]).unwrap();

    assert!(groups.is_empty());
    assert_eq!(matcher.summary().files_examined, 3);
    // Same size, so partial hashes were needed, but they settled it.
    assert_eq!(matcher.ladder_stats().evaluations_at(Metric::PartialHash), 3);
}

#[test]
fn test_scan_reference_tree() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("file1.txt"), b"duplicate content");
    write(&dir.path().join("file2.txt"), b"duplicate content");
    write(&dir.path().join("unique.txt"), b"unique content");
    write(&dir.path().join("dupeA"), b"abc");
    write(&dir.path().join("dupeB"), b"abc");
    write(&dir.path().join("subdir/file3.txt"), b"duplicate content");

    let mut matcher = DuplicateMatcher::with_defaults();
    let groups = matcher.scan(&[dir.path()]).unwrap();

    let sets: BTreeSet<BTreeSet<String>> = groups.iter().map(|g| file_names(&g.files)).collect();
    let expected: BTreeSet<BTreeSet<String>> = [
        vec!["file1.txt", "file2.txt", "file3.txt"],
        vec!["dupeA", "dupeB"],
    ]
    .into_iter()
    .map(|names| names.into_iter().map(String::from).collect())
    .collect();
    assert_eq!(sets, expected);
    assert_eq!(matcher.summary().duplicate_files, 3);
}

#[test]
fn test_unique_large_files_never_fully_hashed() {
    let dir = tempdir().unwrap();
    for (i, len) in [5000usize, 6000, 7000, 8000].iter().enumerate() {
        write(&dir.path().join(format!("f{i}")), &vec![b'x'; *len]);
    }

    let mut matcher = DuplicateMatcher::with_defaults();
    matcher.scan(&[dir.path()]).unwrap();

    let stats = matcher.ladder_stats();
    assert_eq!(stats.full_hashes_computed, 0);
    assert_eq!(stats.bytes_hashed, 0);
}

#[test]
fn test_hash_work_is_bounded_to_collisions() {
    let dir = tempdir().unwrap();
    // Two true duplicates and many unique-sized bystanders.
    write(&dir.path().join("dup1"), &vec![7u8; 3000]);
    write(&dir.path().join("dup2"), &vec![7u8; 3000]);
    for i in 0..20 {
        write(&dir.path().join(format!("other{i}")), &vec![1u8; 100 + i]);
    }

    let mut matcher = DuplicateMatcher::with_defaults();
    let groups = matcher.scan(&[dir.path()]).unwrap();

    assert_eq!(groups.len(), 1);
    let stats = matcher.ladder_stats();
    assert_eq!(stats.evaluations_at(Metric::PartialHash), 2);
    assert_eq!(stats.full_hashes_computed, 2);
}

#[test]
fn test_custom_partial_window() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("a"), b"0123456789-A");
    write(&dir.path().join("b"), b"0123456789-B");

    let config = MatcherConfig::default().with_partial_size(4);
    let mut matcher = DuplicateMatcher::new(config);
    let groups = matcher.scan(&[dir.path()]).unwrap();

    assert!(groups.is_empty());
    assert_eq!(matcher.ladder_stats().full_hashes_computed, 2);
}

#[test]
fn test_nested_directories() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("a/b/c/d/deep.txt"), b"nested");
    write(&dir.path().join("top.txt"), b"nested");

    let mut matcher = DuplicateMatcher::with_defaults();
    let groups = matcher.scan(&[dir.path()]).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(matcher.summary().directories_visited, 5);
}

#[test]
fn test_scan_is_idempotent() {
    let dir = tempdir().unwrap();
    for i in 0..5 {
        write(&dir.path().join(format!("x{i}")), b"same bytes");
        write(&dir.path().join(format!("sub/y{i}")), format!("distinct {i}").as_bytes());
    }

    let first = DuplicateMatcher::with_defaults().scan(&[dir.path()]).unwrap();
    let second = DuplicateMatcher::with_defaults().scan(&[dir.path()]).unwrap();
    assert_eq!(first, second);
}
