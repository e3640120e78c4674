use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn symhuff() -> Command {
    Command::cargo_bin("symhuff").unwrap()
}

#[test]
fn test_encode_decode_round_trip() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("sample.txt");
    std::fs::write(&input, "this is a test string").unwrap();

    symhuff()
        .arg("encode")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Input symbols: 21"));

    let container = temp.path().join("sample.txt.huff");
    assert!(container.exists());

    let decoded = temp.path().join("decoded.txt");
    symhuff()
        .arg("decode")
        .arg(&container)
        .arg("--output")
        .arg(&decoded)
        .assert()
        .success();

    assert_eq!(
        std::fs::read_to_string(&decoded).unwrap(),
        "this is a test string"
    );
}

#[test]
fn test_decode_default_output_strips_extension() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("notes.txt");
    std::fs::write(&input, "abaa").unwrap();

    symhuff().arg("encode").arg("-q").arg(&input).assert().success();
    std::fs::remove_file(&input).unwrap();

    symhuff()
        .arg("decode")
        .arg(temp.path().join("notes.txt.huff"))
        .assert()
        .success();
    assert_eq!(std::fs::read_to_string(&input).unwrap(), "abaa");
}

#[test]
fn test_empty_file() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("empty.txt");
    let container = temp.path().join("empty.huff");
    std::fs::write(&input, "").unwrap();

    symhuff()
        .args(["encode", "--quiet", "-o"])
        .arg(&container)
        .arg(&input)
        .assert()
        .success();
    assert_eq!(std::fs::read(&container).unwrap(), vec![0, 0]);

    let decoded = temp.path().join("empty.out");
    symhuff()
        .arg("decode")
        .arg(&container)
        .arg("-o")
        .arg(&decoded)
        .assert()
        .success();
    assert_eq!(std::fs::read(&decoded).unwrap(), Vec::<u8>::new());
}

#[test]
fn test_stats_text() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("abaa.txt");
    std::fs::write(&input, "abaa").unwrap();

    symhuff()
        .arg("encode")
        .arg("--stats-text")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("distinct_symbols=2"))
        .stdout(predicate::str::contains("tree_bytes=3"))
        .stdout(predicate::str::contains("container_bytes=6"));
}

#[test]
fn test_inspect_prints_code_table() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("abaa.txt");
    std::fs::write(&input, "abaa").unwrap();
    symhuff().arg("encode").arg("-q").arg(&input).assert().success();

    symhuff()
        .arg("inspect")
        .arg(temp.path().join("abaa.txt.huff"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Tree: 3 bytes"))
        .stdout(predicate::str::contains("Code Table (2 symbols)"))
        .stdout(predicate::str::contains("'a'"));
}

#[test]
fn test_missing_input_fails() {
    let temp = tempdir().unwrap();

    symhuff()
        .arg("decode")
        .arg(temp.path().join("fictional.bin"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no such file"));
}

#[test]
fn test_non_utf8_input_fails() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("binary.dat");
    std::fs::write(&input, [0xFF, 0xFE, 0x00]).unwrap();

    symhuff()
        .arg("encode")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid UTF-8"));
}

#[test]
fn test_generate_is_reproducible() {
    let first = symhuff()
        .args(["generate", "3", "--seed", "7"])
        .output()
        .unwrap();
    let second = symhuff()
        .args(["generate", "3", "--seed", "7"])
        .output()
        .unwrap();

    assert!(first.status.success());
    assert_eq!(first.stdout.len(), 1000);
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_generate_to_file_then_encode() {
    let temp = tempdir().unwrap();
    let data = temp.path().join("mixed.txt");

    symhuff()
        .args(["generate", "4", "--mixed", "--seed", "3", "-o"])
        .arg(&data)
        .assert()
        .success();

    symhuff()
        .args(["encode", "-q"])
        .arg(&data)
        .assert()
        .success();

    let decoded = temp.path().join("mixed.out");
    symhuff()
        .arg("decode")
        .arg(temp.path().join("mixed.txt.huff"))
        .arg("-o")
        .arg(&decoded)
        .assert()
        .success();
    assert_eq!(
        std::fs::read(&decoded).unwrap(),
        std::fs::read(&data).unwrap()
    );
}

#[test]
fn test_generate_rejects_large_magnitude() {
    symhuff()
        .args(["generate", "12"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("magnitude must be at most 9"));
}

#[test]
fn test_print_config() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("x.txt");
    std::fs::write(&input, "xyz").unwrap();

    symhuff()
        .args(["--print-config", "encode", "-q"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Algorithm: Huffman"));
}
