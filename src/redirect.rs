//! Output redirection: finding and validating the `> target` clause of a
//! segment, and opening its target.

use crate::error::{RedirectError, ShellError};
use crate::lexer::Token;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// Where a command's standard output goes instead of the inherited stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    target: PathBuf,
}

impl Redirect {
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
        }
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Open the target for writing, creating it or truncating it.
    ///
    /// A relative target is taken relative to `dir`.
    pub fn open_in(&self, dir: &Path) -> Result<File, ShellError> {
        let path = dir.join(&self.target);
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .map_err(|source| ShellError::OpenTarget { path, source })
    }
}

/// Separate a segment's tokens into its argument words and its redirection.
///
/// At most one `>` is allowed, it must come after at least one word and be
/// followed by exactly one word, the target.
pub fn extract(tokens: Vec<Token>) -> Result<(Vec<String>, Option<Redirect>), RedirectError> {
    let delimiters = tokens
        .iter()
        .filter(|t| matches!(t, Token::RedirectOut))
        .count();
    if delimiters > 1 {
        return Err(RedirectError::Multiple);
    }

    let mut argv = Vec::with_capacity(tokens.len());
    let mut tokens = tokens.into_iter();
    for token in tokens.by_ref() {
        match token {
            Token::Word(w) => argv.push(w),
            Token::RedirectOut => break,
        }
    }
    if delimiters == 0 {
        return Ok((argv, None));
    }

    // Only words remain after the single delimiter.
    let mut rest = tokens.filter_map(|t| match t {
        Token::Word(w) => Some(w),
        Token::RedirectOut => None,
    });
    let target = rest.next().ok_or(RedirectError::MissingTarget)?;
    if rest.next().is_some() {
        return Err(RedirectError::ExtraTarget);
    }
    if argv.is_empty() {
        return Err(RedirectError::MissingCommand);
    }
    Ok((argv, Some(Redirect::new(target))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::split_into_tokens;
    use std::io::Write;

    fn extract_str(s: &str) -> Result<(Vec<String>, Option<Redirect>), RedirectError> {
        extract(split_into_tokens(s))
    }

    #[test]
    fn no_clause() {
        let (argv, redirect) = extract_str("ls -la /tmp").unwrap();
        assert_eq!(argv, ["ls", "-la", "/tmp"]);
        assert_eq!(redirect, None);
    }

    #[test]
    fn single_clause_is_stripped_from_argv() {
        let (argv, redirect) = extract_str("ls -la > out.txt").unwrap();
        assert_eq!(argv, ["ls", "-la"]);
        assert_eq!(redirect, Some(Redirect::new("out.txt")));
    }

    #[test]
    fn malformed_clauses() {
        assert_eq!(extract_str("ls > a > b"), Err(RedirectError::Multiple));
        assert_eq!(extract_str("ls >> a"), Err(RedirectError::Multiple));
        assert_eq!(extract_str("ls >"), Err(RedirectError::MissingTarget));
        assert_eq!(extract_str("ls > a b"), Err(RedirectError::ExtraTarget));
        assert_eq!(extract_str("> a"), Err(RedirectError::MissingCommand));
    }

    #[test]
    fn open_truncates_existing_target() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.txt");
        std::fs::write(&target, "old contents that are long").unwrap();

        let mut file = Redirect::new("out.txt").open_in(dir.path()).unwrap();
        file.write_all(b"new").unwrap();
        drop(file);

        assert_eq!(std::fs::read_to_string(&target).unwrap(), "new");
    }

    #[test]
    fn open_fails_for_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Redirect::new("no/such/dir/out.txt").open_in(dir.path()),
            Err(ShellError::OpenTarget { .. })
        ));
    }
}
