//! A small step-by-step interpreter for the eight-symbol tape language
//! (`> < + - [ ] . ,`) running on a fixed-size byte tape.

extern crate thiserror;

pub mod interpreter;
pub mod lexer;
pub mod stream;

pub use interpreter::{Interpreter, InterpreterError};
pub use lexer::{lexer::filter, lexer::filter_source, Opcode};
