use thiserror::Error;

pub mod brackets;
pub mod interpreter;

pub use self::interpreter::Interpreter;

/// Tape size used when nothing else is asked for
pub const DEFAULT_TAPE_SIZE: usize = 30_000;

#[derive(Error, Debug)]
pub enum InterpreterError {
    #[error("Tape size must be positive (got {size:})")]
    InvalidSize { size: usize },

    /// The program is malformed: a loop bracket has no counterpart
    #[error("Malformed program: can't find other symbol ({other:}) for {symbol:} at {position:}")]
    UnmatchedBracket {
        symbol: char,
        other: char,
        position: usize,
    },

    #[error("Data pointer ({index:}) out of bounds (max length {len:})")]
    TapeIndexOutOfRange { index: isize, len: usize },

    #[error("Step limit of {limit:} exceeded")]
    StepLimitExceeded { limit: u64 },

    #[error("IO Error")]
    Io(
        #[from]
        std::io::Error,
    ),
}
