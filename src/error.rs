use std::io::{self, Write};
use std::path::PathBuf;
use thiserror::Error;

/// The one diagnostic the interpreter ever shows, whatever went wrong.
pub const ERROR_MESSAGE: &str = "An error has occurred\n";

/// Malformed redirection clause within one segment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RedirectError {
    #[error("more than one redirection in a command")]
    Multiple,
    #[error("redirection has no target")]
    MissingTarget,
    #[error("redirection has more than one target")]
    ExtraTarget,
    #[error("redirection without a command")]
    MissingCommand,
}

/// Everything that can go wrong while handling a line.
///
/// Variants carry the cause for logs and tests only; users always see
/// [`ERROR_MESSAGE`].
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("{0}: invalid arguments")]
    BuiltinUsage(&'static str),
    #[error("cd: can't chdir to {}", .path.display())]
    ChangeDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Redirect(#[from] RedirectError),
    #[error("can't open {} for writing", .path.display())]
    OpenTarget {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("command not found: {0}")]
    NotFound(String),
    #[error("failed to launch {}", .path.display())]
    Launch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to wait for child {pid}")]
    Wait {
        pid: u32,
        #[source]
        source: io::Error,
    },
    #[error("usage: wish [batch-file]")]
    Startup,
    #[error("can't open batch file {}", .path.display())]
    OpenBatch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read input")]
    Read(#[source] io::Error),
}

/// Logs the cause and writes the fixed diagnostic to `err`.
pub fn report(err: &mut dyn Write, error: &ShellError) {
    log::warn!("{error:#}");
    // Nowhere left to report a failing error stream.
    let _ = err.write_all(ERROR_MESSAGE.as_bytes());
    let _ = err.flush();
}
