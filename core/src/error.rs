use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PressError {
    #[error("Invalid hex character {ch:?} at position {position}")]
    InvalidHex { ch: char, position: usize },

    #[error("Invalid cadence: {0}")]
    InvalidCadence(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("No hex payloads supplied")]
    NoPayloads,
}

/// Failure reported by a transmit backend. Kept apart from [`PressError`] so
/// callers can tell a bad payload from a misbehaving radio.
#[derive(Debug, Error)]
pub enum TransmitError {
    #[error("Failed to start transmitter: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("I/O error while streaming samples: {0}")]
    Io(#[from] std::io::Error),

    #[error("Transmitter exited with status {code:?}")]
    Exit { code: Option<i32> },

    #[error("Device error: {0}")]
    Device(String),
}

#[derive(Debug, Error)]
pub enum SequenceError {
    #[error(transparent)]
    Synthesis(#[from] PressError),

    #[error("Transmit failed: {0}")]
    Transmit(#[from] TransmitError),

    #[error("Press sequence cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, PressError>;
