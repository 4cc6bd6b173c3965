use dupefind::duplicates::{DuplicateMatcher, FinderError};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_duplicates_across_roots() {
    let dir1 = tempdir().unwrap();
    let dir2 = tempdir().unwrap();
    fs::write(dir1.path().join("photo.jpg"), b"jpeg bytes").unwrap();
    fs::write(dir2.path().join("photo-copy.jpg"), b"jpeg bytes").unwrap();
    fs::write(dir2.path().join("other.jpg"), b"other").unwrap();

    let mut matcher = DuplicateMatcher::with_defaults();
    let groups = matcher.scan(&[dir1.path(), dir2.path()]).unwrap();

    assert_eq!(groups.len(), 1);
    assert!(groups[0].files.iter().any(|p| p.starts_with(dir1.path().canonicalize().unwrap())));
    assert!(groups[0].files.iter().any(|p| p.starts_with(dir2.path().canonicalize().unwrap())));
}

#[test]
fn test_same_root_twice() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("only.txt"), b"one of a kind").unwrap();

    let mut matcher = DuplicateMatcher::with_defaults();
    let groups = matcher.scan(&[dir.path(), dir.path()]).unwrap();

    assert!(groups.is_empty());
    assert_eq!(matcher.summary().files_examined, 1);
}

#[test]
fn test_nested_root_overlap() {
    let dir = tempdir().unwrap();
    let inner = dir.path().join("inner");
    fs::create_dir(&inner).unwrap();
    fs::write(inner.join("a"), b"pair").unwrap();
    fs::write(dir.path().join("b"), b"pair").unwrap();

    let mut matcher = DuplicateMatcher::with_defaults();
    let groups = matcher.scan(&[inner.clone(), dir.path().to_path_buf()]).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 2);
}

#[test]
fn test_one_bad_root_fails_whole_scan() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("file.txt");
    fs::write(&file, b"x").unwrap();

    let mut matcher = DuplicateMatcher::with_defaults();
    let result = matcher.scan(&[dir.path().to_path_buf(), file]);
    assert!(matches!(result, Err(FinderError::NotADirectory(_))));

    let mut matcher = DuplicateMatcher::with_defaults();
    let result = matcher.scan(&[dir.path().join("missing")]);
    assert!(matches!(result, Err(FinderError::PathNotFound(_))));
}
