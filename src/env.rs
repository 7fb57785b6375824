use crate::path::PathTable;
use std::env as stdenv;
use std::path::PathBuf;

/// State the interpreter owns and the builtins mutate.
///
/// - `path`: the search path for external commands.
/// - `current_dir`: working directory given to every spawned child.
///
/// Children only ever see a copy of this taken when they are spawned.
#[derive(Debug, Clone)]
pub struct Environment {
    pub path: PathTable,
    pub current_dir: PathBuf,
}

impl Environment {
    /// Start from `path` and the process's current working directory.
    pub fn new(path: PathTable) -> Self {
        let current_dir = stdenv::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self { path, current_dir }
    }
}
