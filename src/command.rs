use crate::error::ShellError;
use crate::lexer::{self, Token};
use crate::redirect::{self, Redirect};

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
pub type ExitCode = i32;

/// One command segment, ready for dispatch.
///
/// Only [`Command::parse`] builds one, so the name is always present. The
/// redirection clause, if there was one, is kept apart from the words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    argv: Vec<String>,
    redirect: Option<Redirect>,
}

impl Command {
    /// Parse one segment of a line.
    ///
    /// Returns `Ok(None)` for a segment with no words at all (blank, or only
    /// redirection delimiters): such a segment is skipped without error.
    pub fn parse(segment: &str) -> Result<Option<Command>, ShellError> {
        let tokens = lexer::split_into_tokens(segment);
        if !tokens.iter().any(|t| matches!(t, Token::Word(_))) {
            return Ok(None);
        }
        let (argv, redirect) = redirect::extract(tokens)?;
        Ok(Some(Command { argv, redirect }))
    }

    pub fn name(&self) -> &str {
        &self.argv[0]
    }

    pub fn args(&self) -> &[String] {
        &self.argv[1..]
    }

    pub fn redirect(&self) -> Option<&Redirect> {
        self.redirect.as_ref()
    }
}
