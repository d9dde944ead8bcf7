use crate::{
    cli::check_command,
    util::ansi::{ANSI_BOLD, ANSI_RED, ANSI_RESET},
};
use argh::FromArgs;
use std::{fs, io, path::{Path, PathBuf}};

/// Verify a proof file against premises and a goal given on the command
/// line.
#[derive(FromArgs)]
#[argh(subcommand, name = "verify")]
pub struct VerifyCommand {
    /// a premise formula; may be given multiple times.
    #[argh(option, short = 'p')]
    premise: Vec<String>,

    /// the goal formula.
    #[argh(option, short = 'g')]
    goal: String,

    /// path of the proof file, or `-` to read the proof from stdin.
    #[argh(positional)]
    proof: PathBuf,
}

pub fn run_verify(cmd: VerifyCommand) {
    match run(cmd) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{ANSI_RED}{ANSI_BOLD}error:{ANSI_RESET} {err}");
            std::process::exit(1);
        }
    }
}

fn run(cmd: VerifyCommand) -> Result<i32, io::Error> {
    let (proof_text, origin) = if cmd.proof == Path::new("-") {
        (io::read_to_string(io::stdin())?, "<stdin>".to_string())
    } else {
        (fs::read_to_string(&cmd.proof)?, cmd.proof.display().to_string())
    };

    Ok(check_command::verify_problem(&cmd.premise, &cmd.goal, &proof_text, &origin))
}
