use fskpress_core::{PressError, RunSummary, SequenceError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Press(#[from] PressError),

    #[error(transparent)]
    Sequence(#[from] SequenceError),

    #[error("Interrupted")]
    Interrupted,

    #[error("Transmit task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl CliError {
    /// Process exit status: 1 for usage and synthesis problems, 2 when the
    /// radio failed, 130 after ctrl-c.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Press(_) => 1,
            CliError::Sequence(SequenceError::Synthesis(_)) => 1,
            CliError::Sequence(SequenceError::Transmit(_)) => 2,
            CliError::Sequence(SequenceError::Cancelled) | CliError::Interrupted => 130,
            CliError::Join(_) => 1,
        }
    }
}

/// Fold the result of a run with whether ctrl-c was seen. An interrupt wins
/// even when the final press completed.
pub fn finish_run(
    outcome: Result<RunSummary, SequenceError>,
    interrupted: bool,
) -> Result<RunSummary, CliError> {
    match outcome {
        _ if interrupted => Err(CliError::Interrupted),
        Ok(summary) => Ok(summary),
        Err(SequenceError::Cancelled) => Err(CliError::Interrupted),
        Err(e) => Err(e.into()),
    }
}
