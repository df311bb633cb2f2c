mod common;

use common::{fixture, init_test_logging};
use errno_table::{EmitSummary, Emitter, StaticSource};
use regex::Regex;
use tracing::info;

fn emit(listing: &str) -> (String, EmitSummary) {
    let mut out = Vec::new();
    let summary = Emitter::new(StaticSource::new(listing))
        .emit(&mut out)
        .expect("emit should succeed");
    (String::from_utf8(out).expect("utf-8 output"), summary)
}

#[test]
fn test_emit_enoent_and_eperm() {
    init_test_logging();

    let (out, _) = emit("ENOENT          2 No such file or directory\n");
    assert_eq!(out, "{ 2 ,{ \"ENOENT\", \"No such file or directory\" } },\n");

    let (out, _) = emit("EPERM           1 Operation not permitted\n");
    assert_eq!(out, "{ 1 ,{ \"EPERM\", \"Operation not permitted\" } },\n");
}

#[test]
fn test_emit_ids_are_copied_as_listed() {
    init_test_logging();
    info!(test = "test_emit_ids_are_copied_as_listed", phase = "setup");

    let (out, summary) = emit(
        "EFOO 007 Leading zeros\n\
         EBIG 4294967296 Bigger than u32\n\
         E 99999999999 F 3 rest\n",
    );

    info!(
        test = "test_emit_ids_are_copied_as_listed",
        phase = "assert",
        emitted = summary.emitted
    );
    assert_eq!(
        out,
        concat!(
            "{ 007 ,{ \"EFOO\", \"Leading zeros\" } },\n",
            "{ 4294967296 ,{ \"EBIG\", \"Bigger than u32\" } },\n",
            "{ 99999999999 ,{ \"E\", \"F 3 rest\" } },\n",
        )
    );
    assert_eq!(summary, EmitSummary { emitted: 3, skipped: 0 });

    info!(
        test = "test_emit_ids_are_copied_as_listed",
        phase = "complete",
        status = "passed"
    );
}

#[test]
fn test_emit_splits_lone_carriage_returns() {
    init_test_logging();

    let (out, summary) = emit("EFOO 1 a\rEBAR 2 b");
    assert_eq!(
        out,
        "{ 1 ,{ \"EFOO\", \"a\" } },\n{ 2 ,{ \"EBAR\", \"b\" } },\n"
    );
    assert_eq!(summary.emitted, 2);
}

#[test]
fn test_emit_linux_fixture_shape_and_order() {
    init_test_logging();
    info!(test = "test_emit_linux_fixture_shape_and_order", phase = "setup");

    let listing = fixture("errno_list_linux.txt");
    let (out, summary) = emit(listing);

    let shape = Regex::new(r#"^\{ (\d+) ,\{ "(\w+)", "(.+)" \} \},$"#).unwrap();
    let mut emitted = Vec::new();
    for line in out.lines() {
        let caps = shape
            .captures(line)
            .unwrap_or_else(|| panic!("unexpected output line: {line}"));
        emitted.push((caps[2].to_string(), caps[1].to_string(), caps[3].to_string()));
    }

    let expected: Vec<(String, String, String)> = listing
        .lines()
        .map(|line| {
            let mut parts = line.splitn(3, ' ');
            let name = parts.next().unwrap().to_string();
            let id = parts.next().unwrap().to_string();
            let description = parts.next().unwrap().to_string();
            (name, id, description)
        })
        .collect();

    info!(
        test = "test_emit_linux_fixture_shape_and_order",
        phase = "assert",
        emitted = summary.emitted
    );
    assert_eq!(summary, EmitSummary { emitted: 23, skipped: 0 });
    assert_eq!(emitted, expected);
    assert!(out.ends_with("} },\n"), "every line keeps its trailing comma");

    info!(
        test = "test_emit_linux_fixture_shape_and_order",
        phase = "complete",
        status = "passed"
    );
}

#[test]
fn test_emit_noisy_fixture() {
    init_test_logging();

    let (out, summary) = emit(fixture("errno_list_noisy.txt"));

    assert_eq!(
        out,
        concat!(
            "{ 1 ,{ \"EPERM\", \"Operation not permitted\" } },\n",
            "{ 2 ,{ \"ENOENT\", \"No such file or directory\" } },\n",
            "{ 200 ,{ \"EQUOTE\", \"Says \"hello\" to you\" } },\n",
            "{ 5 ,{ \"EIO\", \"Input/output error\" } },\n",
        )
    );
    assert_eq!(summary, EmitSummary { emitted: 4, skipped: 3 });
}

#[test]
fn test_emit_is_idempotent() {
    init_test_logging();

    let source = StaticSource::new(fixture("errno_list_linux.txt"));
    let emitter = Emitter::new(&source);

    let mut first = Vec::new();
    let mut second = Vec::new();
    emitter.emit(&mut first).unwrap();
    emitter.emit(&mut second).unwrap();

    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_emit_keeps_duplicates() {
    init_test_logging();

    let (out, summary) = emit("EAGAIN 11 Try again\nEAGAIN 11 Try again\n");
    assert_eq!(summary.emitted, 2);
    assert_eq!(out.lines().count(), 2);
    assert_eq!(out.lines().next(), out.lines().nth(1));
}
