use clap::Parser;
use dupefind::cli::Cli;
use dupefind::error::ExitCode;
use dupefind::session::{load_groups, InputFormat};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn populate(root: &Path) {
    fs::write(root.join("one.txt"), b"same same").unwrap();
    fs::write(root.join("two.txt"), b"same same").unwrap();
    fs::create_dir(root.join("nested")).unwrap();
    fs::write(root.join("nested/three.txt"), b"same same").unwrap();
    fs::write(root.join("alone.txt"), b"different").unwrap();
}

fn run(args: &[&str]) -> ExitCode {
    let mut argv = vec!["dupefind", "-q"];
    argv.extend_from_slice(args);
    dupefind::run_app(Cli::try_parse_from(argv).unwrap()).unwrap()
}

#[test]
fn test_plain_output_file() {
    let dir = tempdir().unwrap();
    populate(dir.path());
    let out = tempdir().unwrap();
    let out_file = out.path().join("dupes.txt");

    let code = run(&[
        "-d",
        dir.path().to_str().unwrap(),
        "-o",
        out_file.to_str().unwrap(),
    ]);
    assert_eq!(code, ExitCode::Success);

    let text = fs::read_to_string(&out_file).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].matches('"').count(), 6);
    assert!(lines[0].contains("one.txt\" \""));
    assert!(!text.contains("alone.txt"));
}

#[test]
fn test_csv_output_file() {
    let dir = tempdir().unwrap();
    populate(dir.path());
    let out = tempdir().unwrap();
    let out_file = out.path().join("dupes.csv");

    run(&[
        "-d",
        dir.path().to_str().unwrap(),
        "-o",
        out_file.to_str().unwrap(),
        "--out-type",
        "csv",
    ]);

    let text = fs::read_to_string(&out_file).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("Count,Path,Path,Path"));
    assert!(lines.next().unwrap().starts_with("3,"));
    assert_eq!(lines.next(), None);
}

#[test]
fn test_json_output_reads_back() {
    let dir = tempdir().unwrap();
    populate(dir.path());
    let out = tempdir().unwrap();
    let out_file = out.path().join("dupes.json");

    run(&[
        "-d",
        dir.path().to_str().unwrap(),
        "-o",
        out_file.to_str().unwrap(),
        "--out-type",
        "json",
    ]);

    let text = fs::read_to_string(&out_file).unwrap();
    assert!(text.starts_with("[\n    [\n        \""));
    let groups = load_groups(&out_file, InputFormat::Json).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 3);
}

#[test]
fn test_convert_csv_to_json_with_filter() {
    let out = tempdir().unwrap();
    let csv_file = out.path().join("in.csv");
    let json_file = out.path().join("out.json");
    fs::write(
        &csv_file,
        "Count,Path,Path,Path\n3,/data/a,/old/a,/old/b\n2,/data/c,/data/d\n",
    )
    .unwrap();

    let code = run(&[
        "-i",
        csv_file.to_str().unwrap(),
        "--in-type",
        "csv",
        "-f",
        "^/old/",
        "--out-type",
        "json",
        "-o",
        json_file.to_str().unwrap(),
    ]);
    assert_eq!(code, ExitCode::Success);

    let groups = load_groups(&json_file, InputFormat::Json).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].path_strings(), vec!["/old/a", "/old/b"]);
}

#[test]
fn test_empty_result_writes_header_only_csv() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("solo"), b"solo").unwrap();
    let out = tempdir().unwrap();
    let out_file = out.path().join("none.csv");

    let code = run(&[
        "-d",
        dir.path().to_str().unwrap(),
        "--out-type",
        "csv",
        "-o",
        out_file.to_str().unwrap(),
    ]);

    assert_eq!(code, ExitCode::NoDuplicates);
    assert_eq!(fs::read_to_string(&out_file).unwrap(), "Count\n");
}
