use bunki::prelude::*;
use clap::Parser;
use std::fs;
use std::io::{self, Write};
use std::time::Instant;

/// A rule-resolution and navigation engine CLI for branching surveys
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the survey definition JSON file
    survey_path: Option<String>,
    /// Optional path to an answer script JSON file to replay
    answers_path: Option<String>,

    /// Reject the survey if any rule fails validation
    #[arg(short, long)]
    strict: bool,

    /// Print a resolution trace after every submitted answer
    #[arg(short, long)]
    trace: bool,

    /// Print the compiled flow map before the session starts
    #[arg(short, long)]
    map: bool,

    /// Run in interactive mode to be prompted for inputs
    #[arg(short = 'i', long, help = "Run in interactive 'human' mode")]
    human: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.human {
        run_interactive();
    } else {
        run_non_interactive(cli);
    }
}

fn run_session(
    survey_path: String,
    answers_path: Option<String>,
    strict: bool,
    show_trace: bool,
    show_map: bool,
) {
    let total_start = Instant::now();

    // --- 1. File Loading ---
    let load_start = Instant::now();
    let survey_json = fs::read_to_string(&survey_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read survey file '{}': {}",
            &survey_path, e
        ))
    });

    let script = answers_path.map(|path| {
        AnswerStore::from_file(&path).unwrap_or_else(|e| {
            exit_with_error(&format!(
                "Failed to load answer script from '{}': {}",
                path, e
            ))
        })
    });
    if script.is_none() {
        println!("No answer script provided. Answers will be read from stdin.");
    }
    let load_duration = load_start.elapsed();

    // --- 2. Parsing and Conversion ---
    let definition = AuthoringSurvey::from_json(&survey_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse survey JSON: {}", e)))
        .into_survey()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to convert survey: {}", e)));

    // --- 3. Compilation ---
    println!("\nStarting Bunki Survey Compilation...");
    let compile_start = Instant::now();
    let mut builder = SurveyCompiler::builder(definition);
    if strict {
        builder = builder.strict();
    }
    let compiled = builder
        .build()
        .compile()
        .unwrap_or_else(|e| exit_with_error(&format!("Survey compilation failed: {}", e)));
    let compile_duration = compile_start.elapsed();

    println!(
        "Compilation Successful! {} rule(s) attached across {} question(s) in {:?}",
        compiled.rule_count(),
        compiled.catalog().len(),
        compile_duration
    );
    if !compiled.warnings().is_empty() {
        println!("{} validation warning(s):", compiled.warnings().len());
        for violation in compiled.warnings() {
            println!("  warning: {}", violation);
        }
    }

    if show_map {
        println!("\n--- Flow Map ---");
        print!("{}", compiled.flow_map());
    }

    // --- 4. Session Run ---
    println!("\nRunning Survey Session...");
    let navigator = Navigator::new(compiled);
    let resolver = RuleResolver::new(navigator.survey());
    let session_start = Instant::now();

    let mut state = navigator.start();
    let mut steps = 0usize;
    while let Some(current) = state.current_question_id().map(str::to_string) {
        let answer = match &script {
            Some(store) => store.get(&current).cloned().unwrap_or_else(|| {
                println!("No scripted answer for '{}'; submitting null.", current);
                AnswerValue::Null
            }),
            None => parse_answer(&prompt_for_input(
                &format!("Answer for '{}'", current),
                None,
            )),
        };
        let shown = answer.to_string();

        state = navigator
            .submit(&state, &current, answer)
            .unwrap_or_else(|e| {
                exit_with_error(&format!("Transition failed at '{}': {}", current, e))
            });
        steps += 1;

        let next_stop = state.current_question_id().unwrap_or("END");
        println!("  '{}' answered {} -> {}", current, shown, next_stop);
        if show_trace {
            let trace = resolver.resolve_traced(&current, state.answers());
            println!("{}", TraceFormatter::format_trace(&trace));
        }
    }
    let session_duration = session_start.elapsed();

    // --- 5. Results and Summary ---
    println!("\nSession Finished!");
    println!("  -> Questions answered: {}", steps);
    println!("  -> Answers recorded: {}", state.answers().len());

    let total_duration = total_start.elapsed();
    println!("\n--- Performance Summary ---");
    println!("File Loading:         {:?}", load_duration);
    println!("Compilation:          {:?}", compile_duration);
    println!("Session Run:          {:?}", session_duration);
    println!("-----------------------------");
    println!("Total Execution:      {:?}", total_duration);
    println!();
}

/// Runs the CLI in non-interactive mode, taking all arguments from the command line.
fn run_non_interactive(cli: Cli) {
    let survey_path = cli.survey_path.unwrap_or_else(|| {
        exit_with_error("Survey path is required in non-interactive mode.");
    });

    run_session(survey_path, cli.answers_path, cli.strict, cli.trace, cli.map);
}

/// Runs the CLI in an interactive, human-friendly mode with prompts.
fn run_interactive() {
    println!("--- Bunki Interactive Mode ---");

    let survey_path = prompt_for_input("Enter survey path", Some("data/survey.json"));
    let answers_path_str = prompt_for_input("Enter answer script path (optional)", None);
    let answers_path = if answers_path_str.is_empty() {
        None
    } else {
        Some(answers_path_str)
    };

    let strict = loop {
        println!("\nPlease select a validation mode:");
        println!("  1: Lenient (compile with warnings)");
        println!("  2: Strict (reject surveys with flawed rules)");
        let choice_str = prompt_for_input("Enter choice", Some("1"));

        match choice_str.trim() {
            "1" => break false,
            "2" => break true,
            _ => println!("Invalid choice. Please enter 1 or 2."),
        }
    };

    run_session(survey_path, answers_path, strict, true, true);
}

/// Interprets a raw input line as an answer value.
///
/// Valid JSON becomes the corresponding typed value, so `42`, `true` and
/// `["a", "b"]` all work. Anything else is taken as plain text, and an
/// empty line stands for no answer.
fn parse_answer(raw: &str) -> AnswerValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return AnswerValue::Null;
    }
    serde_json::from_str(trimmed).unwrap_or_else(|_| AnswerValue::Text(trimmed.to_string()))
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str, default: Option<&str>) -> String {
    let mut line = String::new();
    let default_prompt = default.map_or("".to_string(), |d| format!(" [default: {}]", d));

    print!("> {}{}: ", prompt_text, default_prompt);
    io::stdout().flush().unwrap();

    io::stdin()
        .read_line(&mut line)
        .expect("Failed to read line");
    let trimmed = line.trim().to_string();

    if trimmed.is_empty() {
        default.unwrap_or("").to_string()
    } else {
        trimmed
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
