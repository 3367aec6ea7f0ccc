use std::io::Write;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn bin() -> Command {
    let path = assert_cmd::cargo::cargo_bin!("faq");
    Command::new(path)
}

fn faq_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(
        br#"{"faqs": [
            {"questions": ["what are your hours", "when are you open"],
             "answer": {"en": "We are open 9 to 5.", "hi": "Hindi hours"}},
            {"questions": ["where is the library"],
             "answer": {"en": "Next to the main gate."}}
        ]}"#,
    )
    .unwrap();
    file
}

fn workspace_file(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .join(relative)
}

fn cases_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[test]
fn query_prints_matched_answer() {
    let faq = faq_file();
    bin()
        .arg("--faq-path")
        .arg(faq.path())
        .args(["query", "--question", "When are you open?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("decision=Hit"))
        .stdout(predicate::str::contains("answer=We are open 9 to 5."));
}

#[test]
fn query_uses_requested_language() {
    let faq = faq_file();
    bin()
        .arg("--faq-path")
        .arg(faq.path())
        .args(["query", "--question", "what are your hours", "--language", "hi"])
        .assert()
        .success()
        .stdout(predicate::str::contains("answer=Hindi hours"));
}

#[test]
fn query_miss_prints_not_found_message() {
    let faq = faq_file();
    bin()
        .arg("--faq-path")
        .arg(faq.path())
        .args(["query", "--question", "asdkjasdkj random gibberish"])
        .assert()
        .success()
        .stdout(predicate::str::contains("decision=Miss"))
        .stdout(predicate::str::contains("couldn't find a relevant answer"));
}

#[test]
fn query_rejects_unsupported_language() {
    let faq = faq_file();
    bin()
        .arg("--faq-path")
        .arg(faq.path())
        .args(["query", "--question", "hours", "--language", "fr"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported language: fr"));
}

#[test]
fn eval_passes_when_rate_is_met() {
    let faq = faq_file();
    let cases = cases_file(
        r#"[
            {"case_id": "hours", "question": "when are you open", "expected_phrasing": "when are you open"},
            {"case_id": "junk", "question": "zzzz qqqq", "expected_phrasing": null}
        ]"#,
    );
    bin()
        .arg("--faq-path")
        .arg(faq.path())
        .arg("eval")
        .arg("--cases")
        .arg(cases.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("total=2 passed=2 failed=0"));
}

#[test]
fn eval_fails_below_required_rate() {
    let faq = faq_file();
    let cases = cases_file(r#"[{"case_id": "junk", "question": "zzzz qqqq"}]"#);
    bin()
        .arg("--faq-path")
        .arg(faq.path())
        .arg("eval")
        .arg("--cases")
        .arg(cases.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("below required"));
}

#[test]
fn missing_faq_file_is_reported() {
    bin()
        .args(["--faq-path", "/nonexistent/faq.json", "query", "--question", "hi"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: load /nonexistent/faq.json"));
}

#[test]
fn query_without_fallback_translation_fails() {
    let mut faq = NamedTempFile::new().unwrap();
    faq.write_all(
        br#"{"faqs": [{"questions": ["where is the library"], "answer": {"hi": "Hindi only"}}]}"#,
    )
    .unwrap();
    bin()
        .arg("--faq-path")
        .arg(faq.path())
        .args(["query", "--question", "where is the library", "--language", "te"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Answer has no text for language te"));
}

#[test]
fn bundled_eval_cases_all_pass() {
    bin()
        .arg("--faq-path")
        .arg(workspace_file("faq_data.json"))
        .arg("eval")
        .arg("--cases")
        .arg(workspace_file("data/eval_cases.json"))
        .args(["--min-pass-rate", "1.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("total=9 passed=9 failed=0"))
        .stdout(predicate::str::contains(
            "case=canteen passed=true decision=Hit phrasing=where is the canteen",
        ))
        .stdout(predicate::str::contains(
            "case=gibberish passed=true decision=Miss phrasing=null",
        ));
}
