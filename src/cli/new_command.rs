use crate::util::ansi::{ANSI_BOLD, ANSI_GREEN, ANSI_RED, ANSI_RESET};
use argh::FromArgs;
use std::{fs, path::PathBuf};

/// Create a new lukas problem.
#[derive(FromArgs)]
#[argh(subcommand, name = "new")]
pub struct NewCommand {
    /// the name of the problem directory to create
    #[argh(positional)]
    name: String,
}

pub fn run_new(cmd: NewCommand) {
    match run(cmd) {
        Ok(_) => {}
        Err(err) => {
            eprintln!("{ANSI_RED}{ANSI_BOLD}error:{ANSI_RESET} {err}");
            std::process::exit(1);
        }
    }
}

fn run(cmd: NewCommand) -> Result<(), std::io::Error> {
    let problem_path = PathBuf::from(&cmd.name);

    if problem_path.exists() {
        eprintln!(
            "{ANSI_RED}{ANSI_BOLD}error:{ANSI_RESET} directory '{}' already exists",
            cmd.name
        );
        std::process::exit(1);
    }

    fs::create_dir(&problem_path)?;

    // Create lukas.toml with a worked example problem
    let toml_path = problem_path.join("lukas.toml");
    let toml_content = r#"[problem]
premises = ["P"]
goal = "cQP"
proof = "proof.p2"
"#;
    fs::write(&toml_path, toml_content)?;

    // Create proof.p2 with the matching derivation
    let proof_path = problem_path.join("proof.p2");
    let proof_content = r#"# cQP follows from premise P by AX1 and modus ponens.
1 cPcQP AX1
2 P Premise
3 cQP MP 2 1
"#;
    fs::write(&proof_path, proof_content)?;

    println!(
        "{ANSI_GREEN}{ANSI_BOLD}Created{ANSI_RESET} problem '{}'",
        cmd.name
    );

    Ok(())
}
