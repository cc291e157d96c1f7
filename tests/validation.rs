//! Tests for compile-time validation: structural errors, rule violations,
//! disqualification, and strict mode.
mod common;
use bunki::prelude::*;
use common::*;

#[test]
fn test_duplicate_question_id_is_rejected() {
    let definition = SurveyDefinition {
        questions: vec![question("q1", 1), question("q1", 2)],
        rules: vec![],
    };
    let result = SurveyCompiler::builder(definition).build().compile();

    assert!(matches!(
        result,
        Err(SurveyBuildError::DuplicateQuestionId { ref question_id }) if question_id == "q1"
    ));
}

#[test]
fn test_duplicate_order_is_rejected() {
    let definition = SurveyDefinition {
        questions: vec![question("q1", 1), question("q2", 1)],
        rules: vec![],
    };
    let result = SurveyCompiler::builder(definition).build().compile();

    assert!(matches!(
        result,
        Err(SurveyBuildError::DuplicateOrder { order: 1, .. })
    ));
}

#[test]
fn test_backward_and_self_targets_are_flagged() {
    let questions = vec![question("q1", 1), question("q2", 2), question("q3", 3)];
    let rules = vec![
        rule("r_back", "q3", vec![answered("q3")], skip_to("q1"), 100),
        // A self-target has equal order, which is just as backward
        rule("r_self", "q2", vec![answered("q2")], skip_to("q2"), 200),
    ];
    let compiled = compile(questions, rules);

    for rule_id in ["r_back", "r_self"] {
        assert!(
            compiled.warnings().iter().any(|violation| matches!(
                violation,
                RuleViolation::BackwardTarget { rule_id: id, .. } if id == rule_id
            )),
            "Expected a backward-target warning for {rule_id}"
        );
        // The rule still compiles and still fires; only its jump degrades
        assert!(!compiled.is_disqualified(rule_id));
    }
}

#[test]
fn test_unknown_references_disqualify() {
    let questions = vec![question("q1", 1), question("q2", 2)];
    let rules = vec![
        rule("r_src", "ghost", vec![answered("q1")], skip_to("q2"), 100),
        rule("r_cond", "q1", vec![equals("ghost", "x")], skip_to("q2"), 200),
        rule("r_tgt", "q1", vec![answered("q1")], skip_to("ghost"), 300),
    ];
    let compiled = compile(questions, rules);

    assert!(compiled.warnings().iter().any(|violation| matches!(
        violation,
        RuleViolation::UnknownSourceQuestion { rule_id, .. } if rule_id == "r_src"
    )));
    assert!(compiled.warnings().iter().any(|violation| matches!(
        violation,
        RuleViolation::UnknownConditionQuestion { rule_id, .. } if rule_id == "r_cond"
    )));
    assert!(compiled.warnings().iter().any(|violation| matches!(
        violation,
        RuleViolation::UnknownTargetQuestion { rule_id, .. } if rule_id == "r_tgt"
    )));

    for rule_id in ["r_src", "r_cond", "r_tgt"] {
        assert!(compiled.is_disqualified(rule_id));
    }

    // Disqualified rules never resolve, even with satisfied conditions
    let mut answers = AnswerStore::new();
    answers.record("q1", "x");
    let resolver = RuleResolver::new(&compiled);
    assert!(resolver.resolve("q1", &answers).is_none());
    assert!(resolver.resolve("ghost", &answers).is_none());
}

#[test]
fn test_missing_comparison_value_is_only_a_warning() {
    let questions = vec![question("q1", 1), question("q2", 2)];
    let rules = vec![rule(
        "r1",
        "q1",
        vec![condition("q1", ConditionOperator::Equals, None)],
        skip_to("q2"),
        100,
    )];
    let compiled = compile(questions, rules);

    assert!(compiled.warnings().iter().any(|violation| matches!(
        violation,
        RuleViolation::MissingComparisonValue { rule_id, .. } if rule_id == "r1"
    )));
    assert!(!compiled.is_disqualified("r1"));

    // At runtime the broken condition simply never holds
    let mut answers = AnswerStore::new();
    answers.record("q1", "anything");
    let resolver = RuleResolver::new(&compiled);
    assert!(resolver.resolve("q1", &answers).is_none());
}

#[test]
fn test_clean_rules_produce_no_warnings() {
    let questions = vec![question("q1", 1), question("q2", 2), question("q3", 3)];
    let rules = vec![
        rule("r1", "q1", vec![equals("q1", "yes")], skip_to("q3"), 100),
        rule("r2", "q2", vec![answered("q2")], skip_to_end(), 200),
    ];
    let compiled = compile(questions, rules);

    assert!(compiled.warnings().is_empty());
    assert!(!compiled.is_disqualified("r1"));
    assert!(!compiled.is_disqualified("r2"));
    assert_eq!(compiled.rule_count(), 2);
}

#[test]
fn test_strict_mode_rejects_flawed_surveys() {
    let flawed = SurveyDefinition {
        questions: vec![question("q1", 1), question("q2", 2)],
        rules: vec![rule("r1", "q1", vec![], skip_to("q2"), 100)],
    };
    let result = SurveyCompiler::builder(flawed).strict().build().compile();
    let error = result.expect_err("Strict compilation should have failed");

    match &error {
        SurveyBuildError::InvalidRules { violations } => {
            assert_eq!(violations.len(), 1);
            assert!(matches!(
                violations[0],
                RuleViolation::EmptyConditions { ref rule_id } if rule_id == "r1"
            ));
        }
        other => panic!("Expected InvalidRules, got {other:?}"),
    }
    assert!(
        error
            .to_string()
            .contains("Strict validation found 1 rule violation(s)")
    );

    // A clean survey passes strict compilation untouched
    let clean = SurveyDefinition {
        questions: vec![question("q1", 1), question("q2", 2)],
        rules: vec![rule("r1", "q1", vec![answered("q1")], skip_to("q2"), 100)],
    };
    let compiled = SurveyCompiler::builder(clean)
        .strict()
        .build()
        .compile()
        .expect("Failed to compile a clean survey strictly");
    assert!(compiled.warnings().is_empty());
}

#[test]
fn test_standalone_rule_validation() {
    let catalog = QuestionCatalog::from_questions(vec![
        question("q1", 1),
        question("q2", 2),
        question("q3", 3),
    ])
    .expect("Failed to build catalog");

    // A clean rule produces nothing to report
    let clean = rule("r1", "q1", vec![equals("q1", "yes")], skip_to("q2"), 100);
    assert!(validate_rule(&clean, &catalog).is_empty());

    // A backward rule is caught before it is ever persisted
    let backward = rule("r2", "q3", vec![answered("q3")], skip_to("q1"), 200);
    let violations = validate_rule(&backward, &catalog);
    assert_eq!(violations.len(), 1);
    assert!(matches!(
        violations[0],
        RuleViolation::BackwardTarget {
            source_order: 3,
            target_order: 1,
            ..
        }
    ));

    // One flawed rule can rack up several violations at once
    let broken = rule("r3", "ghost", vec![], skip_to("ghost"), 300);
    let violations = validate_rule(&broken, &catalog);
    assert_eq!(violations.len(), 3);
}

#[test]
fn test_unrecognized_operator_parses_and_degrades() {
    let json = r#"{
        "questions": [
            {"id": "q1", "order": 1},
            {"id": "q2", "order": 2}
        ],
        "rules": [
            {
                "id": "r1",
                "sourceQuestionId": "q1",
                "type": "SKIP_LOGIC",
                "conditions": [
                    {"questionId": "q1", "operator": "BETWEEN", "value": 5}
                ],
                "action": {"action": "SKIP_TO_QUESTION", "targetQuestionId": "q2"},
                "createdAt": 1700000000000
            }
        ]
    }"#;

    let authored = AuthoringSurvey::from_json(json).expect("Failed to parse survey JSON");
    let definition = authored.into_survey().expect("Failed to convert survey");
    assert_eq!(definition.rules[0].conditions[0].operator, ConditionOperator::Unknown);

    let compiled = SurveyCompiler::builder(definition)
        .build()
        .compile()
        .expect("Failed to compile survey");
    assert!(compiled.warnings().iter().any(|violation| matches!(
        violation,
        RuleViolation::UnknownOperator { rule_id, .. } if rule_id == "r1"
    )));
    assert!(!compiled.is_disqualified("r1"));

    // The unrecognized condition can never hold, so the rule never fires
    let mut answers = AnswerStore::new();
    answers.record("q1", 5.0);
    let resolver = RuleResolver::new(&compiled);
    assert!(resolver.resolve("q1", &answers).is_none());
}
