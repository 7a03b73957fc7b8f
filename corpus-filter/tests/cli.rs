//! Integration tests for the corpus-filter binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

static SUBJECTS: &str = "testdata/subjects.conllu";

static EMPTY: &str = "testdata/empty.conllu";

fn corpus_filter() -> Command {
    Command::cargo_bin("corpus-filter").unwrap()
}

#[test]
fn lists_filters() {
    corpus_filter()
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("pp-mod-subj"))
        .stdout(predicate::str::contains("binding-complementizer"))
        .stdout(predicate::str::contains("requires --word-list"));
}

#[test]
fn partitions_sentences() {
    let dir = TempDir::new().unwrap();
    let accept = dir.path().join("accept.txt");
    let reject = dir.path().join("reject.txt");

    corpus_filter()
        .args(&["-q", "-b", "2", "pp-mod-subj", SUBJECTS])
        .arg(&accept)
        .arg("--reject")
        .arg(&reject)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&accept).unwrap(),
        "Dogs bark.\nThe cat slept.\nThe dog that barked left.\n"
    );
    assert_eq!(
        fs::read_to_string(&reject).unwrap(),
        "The man near Paris left.\nA woman from Lyon called.\n"
    );
}

#[test]
fn writes_tokenized_sentences() {
    let dir = TempDir::new().unwrap();
    let accept = dir.path().join("accept.txt");

    corpus_filter()
        .args(&["-q", "--tokenized", "rel-cl", SUBJECTS])
        .arg(&accept)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&accept).unwrap(),
        "The man near Paris left .\nDogs bark .\nThe cat slept .\nA woman from Lyon called .\n"
    );
}

#[test]
fn reads_word_list() {
    let dir = TempDir::new().unwrap();
    let accept = dir.path().join("accept.txt");
    let nouns = dir.path().join("nouns.txt");
    fs::write(&nouns, "Woman\ncat\n").unwrap();

    corpus_filter()
        .args(&["-q", "sv-agr", SUBJECTS])
        .arg(&accept)
        .arg("-w")
        .arg(&nouns)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&accept).unwrap(),
        "The man near Paris left.\nDogs bark.\nThe dog that barked left.\n"
    );
}

#[test]
fn unknown_filter_fails() {
    let dir = TempDir::new().unwrap();
    let accept = dir.path().join("accept.txt");

    corpus_filter()
        .args(&["no-such-filter", SUBJECTS])
        .arg(&accept)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown filter \"no-such-filter\""));

    assert!(!accept.exists());
}

#[test]
fn missing_word_list_fails() {
    let dir = TempDir::new().unwrap();
    let accept = dir.path().join("accept.txt");

    corpus_filter()
        .args(&["-q", "det-noun", SUBJECTS])
        .arg(&accept)
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a word list"));

    assert!(!accept.exists());
}

#[test]
fn empty_corpus_creates_outputs() {
    let dir = TempDir::new().unwrap();
    let accept = dir.path().join("accept.txt");
    let reject = dir.path().join("reject.txt");

    corpus_filter()
        .args(&["-q", "subj-aux-inversion", EMPTY])
        .arg(&accept)
        .arg("-r")
        .arg(&reject)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&accept).unwrap(), "");
    assert_eq!(fs::read_to_string(&reject).unwrap(), "");
}

#[test]
fn missing_corpus_fails() {
    let dir = TempDir::new().unwrap();

    corpus_filter()
        .args(&["-q", "pp-mod-subj", "testdata/missing.conllu"])
        .arg(dir.path().join("accept.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.conllu"));
}

#[test]
fn requires_positional_arguments() {
    corpus_filter()
        .arg("pp-mod-subj")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}
