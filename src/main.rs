use beatnik::{
    lang::tokenizing::tokenize_from_source,
    runtime::{
        data_structures::score_tables::{load_action_scores, load_character_scores},
        error::{self, ErrorKind, ScriptError},
        interpreter::{
            Interpreter, InterpreterOptions, WordManagement,
            beatnik_interpreter::BeatnikInterpreter,
        },
    },
};
use std::env::{args, var};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Environment variable naming a character score table file, used when `--scores` is absent.
const CHARACTER_SCORES_VAR: &str = "BEATNIK_CHARACTER_SCORES";

/// Environment variable naming an action score table file, used when `--actions` is absent.
const ACTION_SCORES_VAR: &str = "BEATNIK_ACTION_SCORES";

const USAGE: &str = "\
Usage: beatnik [--scores FILE] [--actions FILE] [--max-depth N] SCRIPT
       beatnik [--scores FILE] --score WORD...
       beatnik --words

Options:
  --scores FILE    Character score table, `letter = points` per line.
  --actions FILE   Action score table, `score = action` per line.
  --max-depth N    Fail with a stack overflow past N values.
  --score          Print the score of each WORD instead of running a script.  The words run up
                   to the next option.
  --words          List the actions and what they do.
  --help, -h       Print this message.";

/// What the command line asked for.
enum Mode {
    Run(String),
    Score(Vec<String>),
    Words,
    Help,
}

struct CommandLine {
    scores: Option<String>,
    actions: Option<String>,
    max_depth: Option<usize>,
    mode: Mode,
}

fn config_error<T>(message: String) -> error::Result<T> {
    ScriptError::new_as_result(None, ErrorKind::Config, format!("{}\n\n{}", message, USAGE))
}

/// Pull the value following a flag.
fn flag_value(flag: &str, arguments: &mut impl Iterator<Item = String>) -> error::Result<String> {
    match arguments.next() {
        Some(value) => Ok(value),
        None => config_error(format!("{} expects a value.", flag)),
    }
}

fn parse_command_line(arguments: impl Iterator<Item = String>) -> error::Result<CommandLine> {
    let mut arguments = arguments.peekable();
    let mut scores = None;
    let mut actions = None;
    let mut max_depth = None;
    let mut score_words = None;
    let mut list_words = false;
    let mut script = None;

    while let Some(argument) = arguments.next() {
        match argument.as_str() {
            "--scores" => scores = Some(flag_value("--scores", &mut arguments)?),
            "--actions" => actions = Some(flag_value("--actions", &mut arguments)?),
            "--max-depth" => {
                let value = flag_value("--max-depth", &mut arguments)?;

                match value.parse::<usize>() {
                    Ok(depth) => max_depth = Some(depth),
                    Err(_) => config_error(format!("Invalid stack depth {}.", value))?,
                }
            }
            "--score" => {
                let mut words = Vec::new();

                while let Some(word) = arguments.next_if(|next| !next.starts_with("--")) {
                    words.push(word);
                }

                score_words = Some(words);
            }
            "--words" => list_words = true,
            "--help" | "-h" => {
                return Ok(CommandLine {
                    scores: None,
                    actions: None,
                    max_depth: None,
                    mode: Mode::Help,
                });
            }
            flag if flag.starts_with("--") => config_error(format!("Unknown option {}.", flag))?,
            _ if script.is_none() => script = Some(argument),
            _ => config_error(format!("Unexpected argument {}.", argument))?,
        }
    }

    let mode = match (score_words, list_words, script) {
        (Some(words), false, None) => Mode::Score(words),
        (None, true, None) => Mode::Words,
        (None, false, Some(script)) => Mode::Run(script),
        (None, false, None) => config_error("No script given.".to_string())?,
        _ => config_error("Choose one of a script, --score or --words.".to_string())?,
    };

    Ok(CommandLine {
        scores: scores.or_else(|| var(CHARACTER_SCORES_VAR).ok()),
        actions: actions.or_else(|| var(ACTION_SCORES_VAR).ok()),
        max_depth,
        mode,
    })
}

/// Build the interpreter options from the table files the command line or environment named.
fn interpreter_options(command_line: &CommandLine) -> error::Result<InterpreterOptions> {
    let mut options = InterpreterOptions::new();

    if let Some(path) = &command_line.scores {
        debug!(path, "loading character scores");
        options = options.with_character_scores(load_character_scores(path)?);
    }

    if let Some(path) = &command_line.actions {
        debug!(path, "loading action scores");
        options = options.with_action_scores(load_action_scores(path)?);
    }

    if let Some(depth) = command_line.max_depth {
        options = options.with_max_stack_depth(depth);
    }

    Ok(options)
}

/// Log to stderr so the program's own output on stdout stays untouched.  RUST_LOG overrides the
/// default level.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> error::Result<()> {
    init_logging();

    let command_line = parse_command_line(args().skip(1))?;

    let options = interpreter_options(&command_line)?;
    let mut interpreter = BeatnikInterpreter::with_options(options);

    match &command_line.mode {
        Mode::Run(script) => interpreter.run_file(script)?,

        // Score whole arguments word by word, so `--score "a,b"` reports both words.
        Mode::Score(arguments) => {
            for argument in arguments {
                for word in tokenize_from_source("<arguments>", argument) {
                    println!("{}: {}", word, interpreter.score(word.text()));
                }
            }
        }

        Mode::Words => {
            let action_scores = interpreter.action_scores();

            for info in interpreter.dictionary().words() {
                let mut scores: Vec<i64> = action_scores
                    .iter()
                    .filter(|(_, action)| *action == info.action)
                    .map(|(score, _)| score)
                    .collect();

                scores.sort();

                let scores: Vec<String> = scores.iter().map(|score| score.to_string()).collect();

                println!("{:>8}  {}", scores.join(","), info);
            }
        }

        Mode::Help => println!("{}", USAGE),
    }

    Ok(())
}
