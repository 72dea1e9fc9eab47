//! Newick tree documents.
//!
//! ```text
//! ((A:0.1,B:0.2)95:0.3,'C d':0.4)root;
//! ```
//!
//! - labels are unquoted (underscores read as spaces) or single-quoted
//!   (`''` escapes a quote),
//! - `[...]` comments are skipped anywhere between tokens,
//! - a numeric label on an internal node is its support value,
//! - `:` introduces a branch length.
//!
//! Loading happens in two passes: [`lexer::tokenize`] collects every lexical
//! error at once, then [`parser::build_tree`] assembles the tree with an
//! explicit stack, so nesting depth is bounded only by memory.

mod lexer;
mod parser;

use canopy_core::tree::Tree;
use log::debug;

use crate::{error::DataError, span::Span};

#[derive(Debug, Clone, PartialEq)]
enum Token<'a> {
    LeftParen,
    RightParen,
    Comma,
    Colon,
    Semicolon,
    /// Quote-delimited label with `''` already unescaped.
    Quoted(String),
    /// Bare label or number, verbatim.
    Unquoted(&'a str),
    Comment,
    Whitespace,
}

impl Token<'_> {
    fn is_trivia(&self) -> bool {
        matches!(self, Token::Comment | Token::Whitespace)
    }

    /// How the token reads in an error message.
    fn describe(&self) -> String {
        match self {
            Token::LeftParen => "`(`".to_string(),
            Token::RightParen => "`)`".to_string(),
            Token::Comma => "`,`".to_string(),
            Token::Colon => "`:`".to_string(),
            Token::Semicolon => "`;`".to_string(),
            Token::Quoted(label) => format!("label '{label}'"),
            Token::Unquoted(label) => format!("`{label}`"),
            Token::Comment => "comment".to_string(),
            Token::Whitespace => "whitespace".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct PositionedToken<'a> {
    token: Token<'a>,
    span: Span,
}

impl<'a> PositionedToken<'a> {
    fn new(token: Token<'a>, span: Span) -> Self {
        Self { token, span }
    }
}

/// Loads a Newick tree.
pub fn parse_tree(source: &str) -> Result<Tree, DataError> {
    let tokens = lexer::tokenize(source)?;
    let tree = parser::build_tree(&tokens, source.len())?;
    debug!(nodes = tree.len(), leaves = tree.leaf_count(); "Loaded Newick tree");
    Ok(tree)
}
