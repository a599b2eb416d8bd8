use thiserror::Error;

/// Runtime faults. Any of these halts the cpu until the next load,
/// except `IllegalKey` which only rejects the offending host call.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ChipError {
    #[error("illegal memory access at {0:#05x}")]
    IllegalAddr(u16),
    #[error("stack overflow: call depth exceeded")]
    StackOverflow,
    #[error("stack underflow: return without call")]
    StackUnderflow,
    #[error("illegal key index {0}")]
    IllegalKey(u8),
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("rom is too large ({size} bytes), max size is {max} bytes")]
    RomTooLarge { size: usize, max: usize },
    #[error("rom could not be read")]
    RomUnreadable,
}
