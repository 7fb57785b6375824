//! Where input lines come from: a terminal (interactive) or a batch file.

use crate::error::ShellError;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// A supplier of input lines for the read loop.
pub trait LineSource {
    /// The next line without its terminator, or `None` at end of input.
    fn next_line(&mut self) -> Result<Option<String>, ShellError>;
}

/// Reads lines from a file or any other buffered reader, without prompting.
pub struct Batch<R> {
    reader: R,
}

impl<R: BufRead> Batch<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl Batch<BufReader<File>> {
    /// Open a batch file for reading.
    pub fn open(path: &Path) -> Result<Self, ShellError> {
        let file = File::open(path).map_err(|source| ShellError::OpenBatch {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> LineSource for Batch<R> {
    fn next_line(&mut self) -> Result<Option<String>, ShellError> {
        let mut buf = Vec::new();
        let n = self
            .reader
            .read_until(b'\n', &mut buf)
            .map_err(ShellError::Read)?;
        if n == 0 {
            return Ok(None);
        }
        if buf.ends_with(b"\n") {
            buf.pop();
            if buf.ends_with(b"\r") {
                buf.pop();
            }
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }
}

/// Reads lines from the terminal, printing a prompt before each one.
///
/// Ctrl-C abandons the line being typed; Ctrl-D ends the input.
pub struct Interactive {
    editor: DefaultEditor,
    prompt: String,
}

impl Interactive {
    pub fn new(prompt: impl Into<String>) -> Result<Self, ShellError> {
        let editor = DefaultEditor::new().map_err(readline_error)?;
        Ok(Self {
            editor,
            prompt: prompt.into(),
        })
    }
}

impl LineSource for Interactive {
    fn next_line(&mut self) -> Result<Option<String>, ShellError> {
        loop {
            match self.editor.readline(&self.prompt) {
                Ok(line) => return Ok(Some(line)),
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => return Ok(None),
                Err(err) => return Err(readline_error(err)),
            }
        }
    }
}

fn readline_error(err: ReadlineError) -> ShellError {
    match err {
        ReadlineError::Io(e) => ShellError::Read(e),
        other => ShellError::Read(io::Error::other(other.to_string())),
    }
}
