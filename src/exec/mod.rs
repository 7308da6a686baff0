pub mod command;

use std::fmt;

/// Result of one deployment attempt. Never turned into a run failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    Succeeded,
    Failed { code: Option<i32> },
    SpawnFailed { reason: String },
}

impl DeployOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DeployOutcome::Succeeded)
    }
}

impl fmt::Display for DeployOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeployOutcome::Succeeded => write!(f, "succeeded"),
            DeployOutcome::Failed { code: Some(code) } => write!(f, "failed with exit code {code}"),
            DeployOutcome::Failed { code: None } => write!(f, "terminated by signal"),
            DeployOutcome::SpawnFailed { reason } => write!(f, "could not start: {reason}"),
        }
    }
}
