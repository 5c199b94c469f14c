pub(crate) mod labels;

use crate::TreeParseError;
use std::fmt::Display;

pub use labels::edge_number;
pub use labels::leaf_name;

/// Checks if a character is a NEWICK structural delimiter.
fn is_structural_delimiter(character: char) -> bool {
    matches!(character, ';' | '(' | ')' | ',')
}

/// A lexical unit of a NEWICK string.
///
/// Tokens borrow from the input. `Close` carries everything written after
/// the closing parenthesis (internal node label, branch length and edge
/// number), `Leaf` carries the raw leaf text including its annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Open,
    Close(&'a str),
    Leaf(&'a str),
    Terminator,
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Open => write!(f, "("),
            Token::Close(annotation) => write!(f, "){annotation}"),
            Token::Leaf(raw) => write!(f, "{raw}"),
            Token::Terminator => write!(f, ";"),
        }
    }
}

/// Manages the quote state while scanning a label.
///
/// A quote opens only at the start of a label or right after a closing
/// quote of the same kind, so an apostrophe inside an unquoted name such
/// as `O'Brien` is plain text.
#[derive(Debug, Clone, Default)]
struct QuoteState {
    in_single_quotes: bool,
    in_double_quotes: bool,
    just_closed: Option<char>,
}

impl QuoteState {
    fn in_quotes(&self) -> bool {
        self.in_single_quotes || self.in_double_quotes
    }

    /// Returns true if the character toggled a quote.
    ///
    /// A doubled quote inside a quoted label closes and reopens it, so
    /// escaped quotes need no special handling here.
    fn update_quote_state(
        &mut self,
        character: char,
        at_label_start: bool,
    ) -> bool {
        let reopens = self.just_closed == Some(character);
        self.just_closed = None;
        match character {
            '\'' if self.in_single_quotes => {
                self.in_single_quotes = false;
                self.just_closed = Some(character);
                true
            }
            '"' if self.in_double_quotes => {
                self.in_double_quotes = false;
                self.just_closed = Some(character);
                true
            }
            '\'' | '"'
                if !self.in_quotes() && (at_label_start || reopens) =>
            {
                if character == '\'' {
                    self.in_single_quotes = true;
                } else {
                    self.in_double_quotes = true;
                }
                true
            }
            _ => false,
        }
    }
}

/// Lazy tokenizer over a single NEWICK tree string.
///
/// Commas and whitespace between tokens are separators and produce no
/// token. Structural characters inside quotes or square brackets belong to
/// the surrounding label.
#[derive(Debug, Clone)]
pub struct NewickTokenizer<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> NewickTokenizer<'a> {
    pub fn new(input: &'a str) -> Result<Self, TreeParseError> {
        let input = input.trim();
        if !input.starts_with('(') {
            return Err(TreeParseError::MissingOpenParen);
        }
        Ok(Self { input, position: 0 })
    }

    /// Byte offset where the label starting at `start` ends.
    fn label_end(&self, start: usize) -> usize {
        let mut quote_state = QuoteState::default();
        let mut bracket_depth: usize = 0;
        let mut at_label_start = true;
        for (offset, character) in self.input[start..].char_indices() {
            let toggled =
                quote_state.update_quote_state(character, at_label_start);
            if !character.is_whitespace() {
                at_label_start = false;
            }
            if toggled || quote_state.in_quotes() {
                continue;
            }
            match character {
                '[' => bracket_depth += 1,
                ']' => bracket_depth = bracket_depth.saturating_sub(1),
                c if bracket_depth == 0 && is_structural_delimiter(c) => {
                    return start + offset;
                }
                _ => (),
            }
        }
        self.input.len()
    }
}

impl<'a> Iterator for NewickTokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        loop {
            let start = self.position;
            let character = self.input[start..].chars().next()?;
            match character {
                '(' => {
                    self.position += 1;
                    return Some(Token::Open);
                }
                ')' => {
                    let end = self.label_end(start + 1);
                    self.position = end;
                    return Some(Token::Close(self.input[start + 1..end].trim()));
                }
                ';' => {
                    self.position += 1;
                    return Some(Token::Terminator);
                }
                ',' => self.position += 1,
                c if c.is_whitespace() => self.position += c.len_utf8(),
                _ => {
                    let end = self.label_end(start);
                    self.position = end;
                    return Some(Token::Leaf(self.input[start..end].trim()));
                }
            }
        }
    }
}
