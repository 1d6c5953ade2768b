//! 바이너리 통합 테스트
//!
//! 표준 입력으로 대화형 흐름을 끝까지 진행합니다.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn tabconv() -> Command {
    let mut cmd = Command::cargo_bin("tabconv").unwrap();
    cmd.arg("--no-progress")
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_full_flow_with_concatenation() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.csv"), "x\n1\n2\n").unwrap();
    fs::write(temp_dir.path().join("b.csv"), "x\n3\n").unwrap();

    tabconv()
        .write_stdin(format!("{}\ncsv\njson\noui\n", temp_dir.path().display()))
        .assert()
        .success()
        .stdout(predicate::str::contains("Fichier converti:"))
        .stdout(predicate::str::contains("concatenated.json"));

    let merged = temp_dir
        .path()
        .join("converted_files")
        .join("concatenated.json");
    assert_eq!(
        fs::read_to_string(merged).unwrap(),
        "{\"x\":1}\n{\"x\":2}\n{\"x\":3}\n"
    );
}

#[test]
fn test_invalid_directory_is_reprompted() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.xlsx"), b"").unwrap();

    tabconv()
        .write_stdin(format!(
            "/pas/un/dossier\n{}\nods\n",
            temp_dir.path().display()
        ))
        .assert()
        .success()
        .stdout(predicate::str::contains("n'est pas un répertoire valide"))
        .stdout(predicate::str::contains("Format non reconnu"));
}

#[test]
fn test_no_matching_files_exits_cleanly() {
    let temp_dir = TempDir::new().unwrap();

    tabconv()
        .write_stdin(format!("{}\nxlsx\n", temp_dir.path().display()))
        .assert()
        .success()
        .stdout(predicate::str::contains("Aucun fichier avec le format xlsx"));

    assert!(!temp_dir.path().join("converted_files").exists());
}

#[test]
fn test_unreadable_file_fails_run() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("bad.csv"), b"a,b\n1,2,3\n4").unwrap();

    tabconv()
        .write_stdin(format!("{}\ncsv\njson\n", temp_dir.path().display()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Erreur avec l'encodage utf-8"))
        .stderr(predicate::str::contains("Impossible de lire le fichier"));
}

#[test]
fn test_invalid_pattern_fails_before_prompting() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.csv"), "x\n1\n").unwrap();

    tabconv()
        .args(["--pattern", "[abc"])
        .write_stdin(format!("{}\ncsv\njson\n", temp_dir.path().display()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Motif invalide: [abc"))
        .stdout(predicate::str::contains("Entrez le chemin").not());

    assert!(!temp_dir.path().join("converted_files").exists());
}

#[test]
fn test_version_flag() {
    Command::cargo_bin("tabconv")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tabconv"));
}
