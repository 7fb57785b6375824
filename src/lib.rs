//! A small line-oriented command interpreter.
//!
//! Each input line is split into segments on `&`. Every segment is either a
//! builtin (`exit`, `cd`, `path`), run inside the interpreter, or an external
//! command, resolved against a search path and spawned as a child process,
//! optionally with its standard output redirected to a file (`cmd > file`).
//! All children launched from one line run concurrently and are waited on
//! before the next line is read.
//!
//! The main entry point is [`Interpreter`]. Input comes from any
//! [`LineSource`]: [`Interactive`] for a terminal, [`Batch`] for a file.
//! Whatever goes wrong, the user only ever sees [`ERROR_MESSAGE`] on standard
//! error; the cause is available through [`ShellError`] and the `log` facade.

pub mod barrier;
mod builtin;
pub mod command;
pub mod config;
pub mod env;
pub mod error;
pub mod external;
mod interpreter;
pub mod lexer;
pub mod path;
pub mod redirect;
pub mod source;

pub use builtin::Flow;
pub use config::Config;
pub use error::{ERROR_MESSAGE, ShellError};
pub use interpreter::Interpreter;
pub use source::{Batch, Interactive, LineSource};
