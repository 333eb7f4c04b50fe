use fancytest::{
    detect_tests, CaseStatus, TestCase, TestReporter, TestRunner, TestSuite, Verbosity,
};

fn all_outcomes_suite() -> TestSuite {
    let mut suite = TestSuite::new();
    suite.add(
        TestCase::new("passes", || CaseStatus::Pass)
            .in_group("Sample Suite")
            .with_description("adds small numbers"),
    );
    suite.add(
        TestCase::new("fails", || CaseStatus::Fail("1 != 2".into())).in_group("Sample Suite"),
    );
    suite.add(
        TestCase::new("errors", || CaseStatus::Error("fixture missing".into()))
            .in_group("Sample Suite"),
    );
    suite.add(
        TestCase::new("skips", || CaseStatus::Pass)
            .in_group("Sample Suite")
            .skipped("needs a tty"),
    );
    suite.add(
        TestCase::new("known bad", || CaseStatus::Fail("still broken".into()))
            .in_group("Sample Suite")
            .expect_failure(),
    );
    suite.add(
        TestCase::new("surprise", || CaseStatus::Pass)
            .in_group("Sample Suite")
            .expect_failure(),
    );
    suite
}

#[test]
fn verbose_run_renders_every_outcome_once() {
    let suite = all_outcomes_suite();
    let reporter = TestReporter::new(Vec::new())
        .with_verbosity(Verbosity::Verbose)
        .with_color(false);
    let mut runner = TestRunner::new(reporter);
    let report = runner.run(&suite).unwrap();

    assert_eq!(report.counts.tests_run, 6);
    assert_eq!(report.counts.successes, 1);
    assert_eq!(report.counts.failures, 1);
    assert_eq!(report.counts.errors, 1);
    assert_eq!(report.counts.skipped, 1);
    assert_eq!(report.counts.expected_failures, 1);
    assert_eq!(report.counts.unexpected_successes, 1);
    assert!(!report.was_successful());

    let rendered = String::from_utf8(runner.into_inner()).unwrap();
    assert!(rendered.contains("♢ Sample Suite"));
    assert!(rendered.contains("  ✓ adds small numbers"));
    assert!(rendered.contains("  ✗ fails"));
    assert!(rendered.contains("  - skips (skipped: needs a tty)"));
    assert!(rendered.contains("  ✗ known bad (expected failure)"));
    assert!(rendered.contains("  ✓ surprise (unexpected success)"));

    // Deferred lists come after the per-case lines, errors first.
    let error_at = rendered.find("ERROR: errors").unwrap();
    let fail_at = rendered.find("FAIL: fails").unwrap();
    assert!(error_at < fail_at);
    assert!(rendered.contains("  fixture missing"));
    assert!(rendered.contains("  1 != 2"));

    assert!(rendered.contains(
        "✗ FAILED (failures=1, errors=1, skipped=1, expected failures=1, \
         unexpected successes=1, tests=6)"
    ));
}

#[test]
fn dots_run_emits_one_character_per_test() {
    let suite = all_outcomes_suite();
    let reporter = TestReporter::new(Vec::new())
        .with_verbosity(Verbosity::Dots)
        .with_color(false);
    let mut runner = TestRunner::new(reporter);
    runner.run(&suite).unwrap();

    let rendered = String::from_utf8(runner.into_inner()).unwrap();
    assert!(rendered.starts_with(".FEsxu"));
}

#[test]
fn all_passing_run_prints_the_ok_line() {
    let mut suite = TestSuite::new();
    for name in ["one", "two"] {
        suite.add(TestCase::new(name, || CaseStatus::Pass));
    }
    let reporter = TestReporter::new(Vec::new()).with_color(false);
    let mut runner = TestRunner::new(reporter);
    let report = runner.run(&suite).unwrap();

    assert!(report.was_successful());
    let rendered = String::from_utf8(runner.into_inner()).unwrap();
    assert_eq!(rendered, "..\n✓ OK 2 tests complete\n");
}

#[test]
fn panicking_case_fails_the_run_with_its_message() {
    let mut suite = TestSuite::new();
    suite.add(TestCase::new("explodes", || panic!("left != right")));
    let reporter = TestReporter::new(Vec::new())
        .with_verbosity(Verbosity::Quiet)
        .with_color(false);
    let mut runner = TestRunner::new(reporter);
    let report = runner.run(&suite).unwrap();

    assert_eq!(report.counts.failures, 1);
    let rendered = String::from_utf8(runner.into_inner()).unwrap();
    assert!(rendered.contains("FAIL: explodes"));
    assert!(rendered.contains("  left != right"));
}

#[test]
fn detected_command_suite_runs_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(fancytest::MANIFEST_NAME),
        r#"
        suite = "Shell checks"

        [tests.succeeds]
        command = "true"

        [tests.wrong_code]
        command = "exit 7"
        return_code = 5
        "#,
    )
    .unwrap();

    let suite = detect_tests(dir.path()).unwrap();
    let reporter = TestReporter::new(Vec::new())
        .with_verbosity(Verbosity::Verbose)
        .with_color(false);
    let mut runner = TestRunner::new(reporter);
    let report = runner.run(&suite).unwrap();

    assert_eq!(report.counts.tests_run, 2);
    assert_eq!(report.counts.successes, 1);
    assert_eq!(report.counts.failures, 1);

    let rendered = String::from_utf8(runner.into_inner()).unwrap();
    assert!(rendered.contains("♢ Shell checks"));
    assert!(rendered.contains("  ✓ succeeds"));
    assert!(rendered.contains("expected return code 5, got 7"));
}
