use crate::{
    checker::check_derivation,
    config::{ConfigError, ProblemConfig, find_config_file},
    diagnostics::{rejection_report, script_error_report},
    formula::parse_formula,
    script::parse_script,
    util::ansi::{ANSI_BOLD, ANSI_GRAY, ANSI_RED, ANSI_RESET},
    verdict::{StatusClass, Verdict, display_report},
};
use argh::FromArgs;
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use itertools::Itertools;
use notify::Watcher;
use std::{fmt, fs, io, path::PathBuf, sync::mpsc};

/// Check the configured problem's proof.
#[derive(FromArgs)]
#[argh(subcommand, name = "check")]
pub struct CheckCommand {
    /// continually recheck on file changes.
    #[argh(switch, short = 'w')]
    watch: bool,

    /// path to lukas.toml config file.
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,
}

pub fn run_check(cmd: CheckCommand) {
    match run(cmd) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{ANSI_RED}{ANSI_BOLD}error:{ANSI_RESET} {err}");
            std::process::exit(1);
        }
    }
}

fn run(cmd: CheckCommand) -> Result<i32, CheckError> {
    // Find the lukas.toml config file.
    let config_file_path = match cmd.config {
        Some(file) => file,
        None => find_config_file()?,
    };
    let config = ProblemConfig::from_file(&config_file_path)?;

    if cmd.watch {
        let (tx, rx) = mpsc::channel::<notify::Result<notify::Event>>();
        let mut watcher = notify::recommended_watcher(tx).map_err(CheckError::Watch)?;
        watcher
            .watch(config.problem_dir(), notify::RecursiveMode::Recursive)
            .map_err(CheckError::Watch)?;

        for run in 1.. {
            let _ = rx.try_iter().count();

            // Clear the screen to print the new outcome.
            _ = execute!(io::stdout(), Clear(ClearType::Purge), MoveTo(0, 0));
            println!("{ANSI_GRAY}run {run}{ANSI_RESET}");
            check_problem(&config)?;

            while let Ok(event) = rx.recv().unwrap() {
                if !matches!(event.kind, notify::EventKind::Access(_)) {
                    break;
                }
            }
        }

        Ok(0)
    } else {
        check_problem(&config)
    }
}

fn check_problem(config: &ProblemConfig) -> Result<i32, CheckError> {
    let proof_path = config.proof_path();
    let proof_text = fs::read_to_string(proof_path)
        .map_err(|e| CheckError::Io(proof_path.to_path_buf(), e))?;
    let origin = proof_path.display().to_string();

    if config.premises().is_empty() {
        println!("{ANSI_BOLD}premises:{ANSI_RESET} (none)");
    } else {
        println!(
            "{ANSI_BOLD}premises:{ANSI_RESET} {}",
            config.premises().iter().join(", ")
        );
    }
    println!("{ANSI_BOLD}goal:{ANSI_RESET} {}", config.goal());
    println!();

    Ok(verify_problem(config.premises(), config.goal(), &proof_text, &origin))
}

/// Parse the premises, goal, and proof text, run the checker, and print the
/// outcome. Returns the process exit code. Shared with the verify command.
pub(crate) fn verify_problem(
    premises: &[String],
    goal: &str,
    proof_text: &str,
    origin: &str,
) -> i32 {
    let mut premise_formulas = Vec::with_capacity(premises.len());
    for (i, text) in premises.iter().enumerate() {
        match parse_formula(text) {
            Ok(formula) => premise_formulas.push(formula),
            Err(error) => {
                eprintln!(
                    "{ANSI_RED}{ANSI_BOLD}error:{ANSI_RESET} premise {} `{text}`: {error}",
                    i + 1
                );
                return StatusClass::ParseError.code();
            }
        }
    }

    let goal_formula = match parse_formula(goal) {
        Ok(formula) => formula,
        Err(error) => {
            eprintln!("{ANSI_RED}{ANSI_BOLD}error:{ANSI_RESET} goal `{goal}`: {error}");
            return StatusClass::ParseError.code();
        }
    };

    let lines = match parse_script(proof_text) {
        Ok(lines) => lines,
        Err(error) => {
            eprintln!("{}", script_error_report(&error).render(origin, proof_text));
            return Verdict::from_script_error(&error).status().code();
        }
    };

    let verdict = check_derivation(&premise_formulas, &goal_formula, &lines);
    display_report(&verdict);

    if let Some(failing) = verdict.failing_line()
        && let Some(line) = lines.get(failing - 1)
        && let Some(message) = verdict.diagnostics().last()
    {
        println!();
        println!("{}", rejection_report(message, line.span()).render(origin, proof_text));
    }

    verdict.status().code()
}

#[derive(Debug)]
enum CheckError {
    Config(ConfigError),
    Io(PathBuf, io::Error),
    Watch(notify::Error),
}

impl From<ConfigError> for CheckError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Io(path, err) => write!(f, "cannot read `{}`: {err}", path.display()),
            Self::Watch(err) => write!(f, "cannot watch the problem directory: {err}"),
        }
    }
}
