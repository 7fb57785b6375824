//! Lexical analysis for the command language: splitting a line into command
//! segments and a segment into tokens.
//!
//! There is no quoting or escaping. Whitespace, the concurrency delimiter and
//! the redirection delimiter can never be part of a word.

/// Separates independently launched commands on one line.
pub const CONCURRENCY_DELIMITER: char = '&';

/// Precedes the target path of an output redirection.
pub const REDIRECT_DELIMITER: char = '>';

/// A token of a single command segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A non-empty run of ordinary characters.
    Word(String),
    /// Output redirection symbol, `>`.
    RedirectOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexingState {
    Start,
    ReadingWord,
}

struct LexingFSM<'a> {
    input: std::str::Chars<'a>,
    state: LexingState,
    buffer: String,
}

fn is_blank(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r' | '\n')
}

impl<'a> LexingFSM<'a> {
    fn new(segment: &'a str) -> Self {
        LexingFSM {
            input: segment.chars(),
            state: LexingState::Start,
            buffer: String::new(),
        }
    }

    fn make_tokens(mut self) -> Vec<Token> {
        let mut out = Vec::new();

        while let Some(ch) = self.input.next() {
            match self.state {
                LexingState::Start => self.handle_start(ch, &mut out),
                LexingState::ReadingWord => self.handle_word(ch, &mut out),
            }
        }
        self.finish_word(&mut out);

        out
    }

    fn handle_start(&mut self, ch: char, out: &mut Vec<Token>) {
        match ch {
            c if is_blank(c) => {}
            REDIRECT_DELIMITER => out.push(Token::RedirectOut),
            c => {
                self.buffer.push(c);
                self.state = LexingState::ReadingWord;
            }
        }
    }

    fn handle_word(&mut self, ch: char, out: &mut Vec<Token>) {
        match ch {
            c if is_blank(c) => self.finish_word(out),
            REDIRECT_DELIMITER => {
                self.finish_word(out);
                out.push(Token::RedirectOut);
            }
            c => self.buffer.push(c),
        }
    }

    fn finish_word(&mut self, out: &mut Vec<Token>) {
        if !self.buffer.is_empty() {
            out.push(Token::Word(std::mem::take(&mut self.buffer)));
        }
        self.state = LexingState::Start;
    }
}

/// Splits a line into command segments on [`CONCURRENCY_DELIMITER`].
///
/// Segments come back in left-to-right order. Segments made only of
/// whitespace are dropped.
pub fn split_segments(line: &str) -> Vec<&str> {
    line.split(CONCURRENCY_DELIMITER)
        .filter(|segment| !segment.chars().all(is_blank))
        .collect()
}

/// Tokenizes one command segment.
///
/// Words are separated by spaces and tabs (a stray line terminator counts as
/// whitespace too). The redirection delimiter always forms a token of its
/// own, so `ls>out` yields three tokens.
pub fn split_into_tokens(segment: &str) -> Vec<Token> {
    LexingFSM::new(segment).make_tokens()
}
