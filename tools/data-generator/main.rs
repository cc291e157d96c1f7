use bunki::answer::{AnswerStore, AnswerValue};
use bunki::authoring::{AuthoringCondition, AuthoringQuestion, AuthoringRule, AuthoringSurvey};
use bunki::rule::{ActionKind, ConditionOperator, LogicActionData, RuleKind};
use clap::Parser;
use rand::{Rng, rngs::ThreadRng};
use std::fs;

/// A CLI tool to generate random survey definitions for the Bunki engine
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated survey JSON file to
    #[arg(short, long, default_value = "generated_survey.json")]
    output: String,

    /// The number of questions to generate
    #[arg(long, default_value_t = 10)]
    questions: usize,

    /// The number of logic rules to generate
    #[arg(long, default_value_t = 6)]
    rules: usize,

    /// Optional path to also write a matching random answer script to
    #[arg(short, long)]
    answers: Option<String>,
}

/// Text answers are drawn from this palette so rule conditions have a
/// realistic chance of matching the generated script.
const CHOICES: [&str; 5] = ["yes", "no", "maybe", "often", "never"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    // Rules need at least one question after their source
    if cli.questions < 2 {
        eprintln!(
            "Error: --questions ({}) must be at least 2",
            cli.questions
        );
        std::process::exit(1);
    }

    println!(
        "Generating a survey with {} question(s) and {} rule(s)...",
        cli.questions, cli.rules
    );

    let questions = generate_questions(&mut rng, cli.questions);
    let rules = generate_rules(&mut rng, &questions, cli.rules);
    let survey = AuthoringSurvey { questions, rules };

    let json_output = serde_json::to_string_pretty(&survey)?;
    fs::write(&cli.output, json_output)?;

    println!(
        "Successfully generated and saved survey to '{}'",
        cli.output
    );

    if let Some(answers_path) = &cli.answers {
        let script = generate_answers(&mut rng, &survey.questions);
        let json_output = serde_json::to_string_pretty(&script)?;
        fs::write(answers_path, json_output)?;
        println!(
            "Successfully generated and saved answer script to '{}'",
            answers_path
        );
    }

    Ok(())
}

/// Generates the ordered question list. Roughly a fifth of the questions
/// are hidden by default, but never the first one.
fn generate_questions(rng: &mut ThreadRng, count: usize) -> Vec<AuthoringQuestion> {
    let questions: Vec<AuthoringQuestion> = (1..=count)
        .map(|i| AuthoringQuestion {
            id: format!("q{}", i),
            order: i as u32,
            hidden: i > 1 && rng.random_bool(0.2),
        })
        .collect();

    let hidden = questions.iter().filter(|q| q.hidden).count();
    println!(
        "-> Generated {} question(s) ({} hidden).",
        questions.len(),
        hidden
    );
    questions
}

/// Generates rules whose sources and targets keep the survey valid: every
/// target sits strictly after its source.
fn generate_rules(
    rng: &mut ThreadRng,
    questions: &[AuthoringQuestion],
    count: usize,
) -> Vec<AuthoringRule> {
    let base_ms: i64 = 1_700_000_000_000;
    let mut rules = Vec::with_capacity(count);

    for i in 0..count {
        // The last question cannot source a rule; it has no forward target
        let source_index = rng.random_range(0..questions.len() - 1);
        let source_id = questions[source_index].id.clone();

        let condition = generate_condition(rng, &source_id);
        let action = generate_action(rng, questions, source_index);
        let kind = match action.action {
            ActionKind::ShowQuestion | ActionKind::HideQuestion => RuleKind::DisplayLogic,
            ActionKind::SkipToEnd => RuleKind::SkipLogic,
            ActionKind::SkipToQuestion if rng.random_bool(0.5) => RuleKind::Branching,
            ActionKind::SkipToQuestion => RuleKind::SkipLogic,
        };

        println!(
            "-> Generated rule 'r{}' on '{}': {} {}.",
            i + 1,
            source_id,
            action.action,
            action.target_question_id.as_deref().unwrap_or("-")
        );

        rules.push(AuthoringRule {
            id: format!("r{}", i + 1),
            source_question_id: source_id,
            kind,
            conditions: vec![condition],
            action,
            created_at: base_ms + rng.random_range(0..86_400_000),
        });
    }

    rules
}

fn generate_condition(rng: &mut ThreadRng, question_id: &str) -> AuthoringCondition {
    let (operator, value) = match rng.random_range(0..4) {
        0 => (
            ConditionOperator::Equals,
            Some(AnswerValue::Text(pick_choice(rng).to_string())),
        ),
        1 => (
            ConditionOperator::GreaterThan,
            Some(AnswerValue::Number(rng.random_range(1..100) as f64)),
        ),
        2 => (ConditionOperator::IsAnswered, None),
        _ => (
            ConditionOperator::Contains,
            Some(AnswerValue::Text(pick_choice(rng).to_string())),
        ),
    };

    AuthoringCondition {
        question_id: question_id.to_string(),
        operator,
        value,
    }
}

fn generate_action(
    rng: &mut ThreadRng,
    questions: &[AuthoringQuestion],
    source_index: usize,
) -> LogicActionData {
    let target_index = rng.random_range(source_index + 1..questions.len());
    let target = questions[target_index].id.clone();

    let (action, target_question_id) = match rng.random_range(0..5) {
        0 => (ActionKind::SkipToEnd, None),
        1 => (ActionKind::ShowQuestion, Some(target)),
        2 => (ActionKind::HideQuestion, Some(target)),
        _ => (ActionKind::SkipToQuestion, Some(target)),
    };

    LogicActionData {
        action,
        target_question_id,
    }
}

/// Generates one answer per question with a random type mix.
fn generate_answers(rng: &mut ThreadRng, questions: &[AuthoringQuestion]) -> AnswerStore {
    let script: AnswerStore = questions
        .iter()
        .map(|question| {
            let value = match rng.random_range(0..4) {
                0 => AnswerValue::Text(pick_choice(rng).to_string()),
                1 => AnswerValue::Number(rng.random_range(1..100) as f64),
                2 => AnswerValue::Bool(rng.random_bool(0.5)),
                _ => AnswerValue::Multi(vec![
                    pick_choice(rng).to_string(),
                    pick_choice(rng).to_string(),
                ]),
            };
            (question.id.clone(), value)
        })
        .collect();

    println!("-> Generated {} scripted answer(s).", script.len());
    script
}

fn pick_choice(rng: &mut ThreadRng) -> &'static str {
    CHOICES[rng.random_range(0..CHOICES.len())]
}
