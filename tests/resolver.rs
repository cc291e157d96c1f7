//! Tests for rule resolution: first-match scanning, tie-breaking, and the
//! handling of disqualified rules.
mod common;
use bunki::prelude::*;
use bunki::trace::RuleVerdict;
use common::*;

#[test]
fn test_no_rules_resolves_to_default() {
    let survey = compile(vec![question("q1", 1), question("q2", 2)], vec![]);
    let resolver = RuleResolver::new(&survey);

    let mut answers = AnswerStore::new();
    answers.record("q1", "anything");
    assert_eq!(resolver.resolve("q1", &answers), None);
}

#[test]
fn test_oldest_satisfied_rule_wins() {
    let questions = vec![question("q1", 1), question("q2", 2), question("q3", 3)];
    // Declared newest-first to prove creation time decides, not list order
    let rules = vec![
        rule("r_new", "q1", vec![answered("q1")], skip_to_end(), 200),
        rule("r_old", "q1", vec![answered("q1")], skip_to("q3"), 100),
    ];
    let survey = compile(questions, rules);
    let resolver = RuleResolver::new(&survey);

    let mut answers = AnswerStore::new();
    answers.record("q1", "x");
    assert_eq!(resolver.resolve("q1", &answers), Some(&skip_to("q3")));
}

#[test]
fn test_equal_timestamps_fall_back_to_rule_id() {
    let questions = vec![question("q1", 1), question("q2", 2), question("q3", 3)];
    let rules = vec![
        rule("b", "q1", vec![answered("q1")], skip_to_end(), 100),
        rule("a", "q1", vec![answered("q1")], skip_to("q3"), 100),
    ];
    let survey = compile(questions, rules);
    let resolver = RuleResolver::new(&survey);

    let mut answers = AnswerStore::new();
    answers.record("q1", "x");
    assert_eq!(resolver.resolve("q1", &answers), Some(&skip_to("q3")));
}

#[test]
fn test_unsatisfied_older_rule_falls_through() {
    let questions = vec![question("q1", 1), question("q2", 2), question("q3", 3)];
    let rules = vec![
        rule("r_old", "q1", vec![equals("q1", "no")], skip_to("q3"), 100),
        rule("r_new", "q1", vec![equals("q1", "yes")], skip_to_end(), 200),
    ];
    let survey = compile(questions, rules);
    let resolver = RuleResolver::new(&survey);

    let mut answers = AnswerStore::new();
    answers.record("q1", "yes");
    assert_eq!(resolver.resolve("q1", &answers), Some(&skip_to_end()));
}

#[test]
fn test_dangling_condition_reference_disqualifies() {
    let questions = vec![question("q1", 1), question("q2", 2)];
    // IS_NOT_ANSWERED on a ghost question would trivially hold if the rule
    // were ever evaluated; disqualification must keep it out entirely.
    let ghost_cond = condition("ghost", ConditionOperator::IsNotAnswered, None);
    let rules = vec![rule("r1", "q1", vec![ghost_cond], skip_to_end(), 100)];
    let survey = compile(questions, rules);

    assert!(survey.is_disqualified("r1"));

    let resolver = RuleResolver::new(&survey);
    let mut answers = AnswerStore::new();
    answers.record("q1", "x");
    assert_eq!(resolver.resolve("q1", &answers), None);
}

#[test]
fn test_dangling_target_disqualifies() {
    let questions = vec![question("q1", 1), question("q2", 2)];
    let rules = vec![rule("r1", "q1", vec![answered("q1")], skip_to("ghost"), 100)];
    let survey = compile(questions, rules);

    assert!(survey.is_disqualified("r1"));

    let resolver = RuleResolver::new(&survey);
    let mut answers = AnswerStore::new();
    answers.record("q1", "x");
    assert_eq!(resolver.resolve("q1", &answers), None);
}

#[test]
fn test_empty_conditions_rule_is_skipped() {
    let questions = vec![question("q1", 1), question("q2", 2)];
    let rules = vec![rule("r1", "q1", vec![], skip_to_end(), 100)];
    let survey = compile(questions, rules);

    assert!(survey.is_disqualified("r1"));
    assert!(survey.warnings().iter().any(|violation| matches!(
        violation,
        RuleViolation::EmptyConditions { rule_id } if rule_id == "r1"
    )));

    let resolver = RuleResolver::new(&survey);
    let mut answers = AnswerStore::new();
    answers.record("q1", "x");
    assert_eq!(resolver.resolve("q1", &answers), None);
}

#[test]
fn test_resolution_is_repeatable() {
    let questions = vec![question("q1", 1), question("q2", 2), question("q3", 3)];
    let rules = vec![rule("r1", "q1", vec![equals("q1", "yes")], skip_to("q3"), 100)];
    let survey = compile(questions, rules);
    let resolver = RuleResolver::new(&survey);

    let mut answers = AnswerStore::new();
    answers.record("q1", "yes");

    let first = resolver.resolve("q1", &answers);
    for _ in 0..5 {
        assert_eq!(resolver.resolve("q1", &answers), first);
    }
}

#[test]
fn test_rules_stay_with_their_source_question() {
    let questions = vec![question("q1", 1), question("q2", 2), question("q3", 3)];
    let rules = vec![rule("r1", "q1", vec![answered("q1")], skip_to_end(), 100)];
    let survey = compile(questions, rules);
    let resolver = RuleResolver::new(&survey);

    let mut answers = AnswerStore::new();
    answers.record("q1", "x");
    answers.record("q2", "x");
    // r1's conditions hold, but it is attached to q1, not q2
    assert_eq!(resolver.resolve("q2", &answers), None);
}

#[test]
fn test_traced_resolution_reports_verdicts() {
    let questions = vec![question("q1", 1), question("q2", 2), question("q3", 3)];
    let rules = vec![
        rule("r1", "q1", vec![equals("q1", "no")], skip_to("q2"), 100),
        rule("r2", "q1", vec![equals("q1", "yes")], skip_to("q3"), 200),
        rule("r3", "q1", vec![answered("q1")], skip_to_end(), 300),
    ];
    let survey = compile(questions, rules);
    let resolver = RuleResolver::new(&survey);

    let mut answers = AnswerStore::new();
    answers.record("q1", "yes");
    let trace = resolver.resolve_traced("q1", &answers);

    assert!(trace.is_match());
    assert_eq!(trace.matched_rule_id(), Some("r2"));
    assert_eq!(trace.action(), Some(&skip_to("q3")));

    assert_eq!(trace.rules[0].verdict, RuleVerdict::ConditionFailed { index: 0 });
    assert_eq!(trace.rules[1].verdict, RuleVerdict::Matched);
    assert_eq!(trace.rules[2].verdict, RuleVerdict::NotEvaluated);

    let report = TraceFormatter::format_trace(&trace);
    println!("{}", report);
    assert!(report.contains("via rule 'r2'"));
    assert!(report.contains("[r1] failed on condition 1"));
    assert!(report.contains("[r3] not evaluated"));
    assert!(report.contains("(was \"yes\")"));
}

#[test]
fn test_traced_resolution_marks_disqualified_rules() {
    let questions = vec![question("q1", 1), question("q2", 2)];
    let rules = vec![
        rule("r1", "q1", vec![], skip_to_end(), 100),
        rule("r2", "q1", vec![answered("q1")], skip_to("q2"), 200),
    ];
    let survey = compile(questions, rules);
    let resolver = RuleResolver::new(&survey);

    let mut answers = AnswerStore::new();
    answers.record("q1", "x");
    let trace = resolver.resolve_traced("q1", &answers);

    assert_eq!(trace.rules[0].verdict, RuleVerdict::Disqualified);
    assert_eq!(trace.matched_rule_id(), Some("r2"));
}

#[test]
fn test_trace_reports_no_match() {
    let questions = vec![question("q1", 1), question("q2", 2)];
    let rules = vec![rule("r1", "q1", vec![equals("q1", "no")], skip_to_end(), 100)];
    let survey = compile(questions, rules);
    let resolver = RuleResolver::new(&survey);

    let mut answers = AnswerStore::new();
    answers.record("q1", "yes");
    let trace = resolver.resolve_traced("q1", &answers);

    assert!(!trace.is_match());
    assert_eq!(trace.action(), None);
    let report = TraceFormatter::format_trace(&trace);
    assert!(report.contains("default advance"));
}
