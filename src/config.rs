use serde::Deserialize;
use std::{
    env, fmt, fs,
    path::{Path, PathBuf},
};

const CONFIG_FILE_NAME: &str = "lukas.toml";

/// Search for lukas.toml starting from the current directory and moving up
/// the directory tree.
pub fn find_config_file() -> Result<PathBuf, ConfigError> {
    let current_dir = env::current_dir().map_err(|e| ConfigError::IoError(PathBuf::from("."), e))?;

    let start_dir = current_dir
        .canonicalize()
        .map_err(|e| ConfigError::IoError(current_dir.clone(), e))?;

    let mut current = start_dir.as_path();

    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.exists() {
            return Ok(candidate);
        }

        current = match current.parent() {
            Some(parent) => parent,
            None => return Err(ConfigError::NotFound),
        };
    }
}

/// A problem statement: the premises, the goal, and where the candidate
/// proof lives.
#[derive(Debug, Clone)]
pub struct ProblemConfig {
    problem_dir: PathBuf,
    premises: Vec<String>,
    goal: String,
    proof_path: PathBuf,
}

impl ProblemConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let config_file = ProblemConfigFile::from_file(path)?;
        let problem_dir = path
            .parent()
            .unwrap_or(Path::new("."))
            .canonicalize()
            .map_err(|e| ConfigError::IoError(path.to_path_buf(), e))?;

        let proof = config_file.problem.proof.unwrap_or_else(|| "proof.p2".into());

        Ok(Self {
            proof_path: problem_dir.join(proof),
            problem_dir,
            premises: config_file.problem.premises,
            goal: config_file.problem.goal,
        })
    }

    pub fn problem_dir(&self) -> &Path {
        &self.problem_dir
    }

    /// Premise formula strings, in file order.
    pub fn premises(&self) -> &[String] {
        &self.premises
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    pub fn proof_path(&self) -> &Path {
        &self.proof_path
    }
}

#[derive(Debug, Deserialize)]
struct ProblemConfigFile {
    problem: ProblemSection,
}

#[derive(Debug, Deserialize)]
struct ProblemSection {
    #[serde(default)]
    premises: Vec<String>,
    goal: String,
    /// Proof file path, relative to the config file. Defaults to proof.p2.
    proof: Option<String>,
}

impl ProblemConfigFile {
    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            fs::read_to_string(path).map_err(|e| ConfigError::IoError(path.to_path_buf(), e))?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError(path.to_path_buf(), e))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    NotFound,
    IoError(PathBuf, std::io::Error),
    ParseError(PathBuf, toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => {
                write!(f, "no {CONFIG_FILE_NAME} found in this directory or any parent")
            }
            Self::IoError(path, e) => write!(f, "cannot read `{}`: {e}", path.display()),
            Self::ParseError(path, e) => write!(f, "cannot parse `{}`: {e}", path.display()),
        }
    }
}
