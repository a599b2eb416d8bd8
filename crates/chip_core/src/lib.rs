#![no_std]
mod cpu;
mod display;
mod errors;
mod font;
pub mod globals;
mod instruction;
mod utils;

pub use cpu::{Cpu, Quirks, StepOutcome};
pub use errors::{ChipError, LoadError};
pub use instruction::{decode, Fields, Instruction};
