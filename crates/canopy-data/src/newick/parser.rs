//! Assembles a [`Tree`] from Newick tokens.
//!
//! The parser walks the token list once, keeping the chain of open
//! parentheses on an explicit stack instead of recursing.

use canopy_core::tree::{NodeData, NodeId, Tree, TreeBuilder};
use log::warn;

use super::{PositionedToken, Token};
use crate::{
    error::{Diagnostic, ErrorCode, Result},
    span::Span,
};

/// What has been read for the node under construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeState {
    Fresh,
    /// Its `(...)` child list just closed.
    Closed,
    Labelled,
    Measured,
}

struct TreeParser {
    builder: TreeBuilder,
    current: NodeId,
    state: NodeState,
    internal: bool,
    /// Internal nodes whose `)` is still pending, with their `(` span.
    open: Vec<(NodeId, Span)>,
}

impl TreeParser {
    fn new() -> Self {
        let builder = TreeBuilder::new(NodeData::new());
        let current = builder.root();
        Self {
            builder,
            current,
            state: NodeState::Fresh,
            internal: false,
            open: Vec::new(),
        }
    }

    fn start_child(&mut self, parent: NodeId) {
        self.current = self.builder.add_child(parent, NodeData::new());
        self.state = NodeState::Fresh;
        self.internal = false;
    }

    fn open_children(&mut self, token: &PositionedToken<'_>) -> Result<()> {
        if self.state != NodeState::Fresh {
            return Err(unexpected(token, "separate sibling nodes with `,`"));
        }
        self.open.push((self.current, token.span));
        self.start_child(self.current);
        Ok(())
    }

    fn next_sibling(&mut self, token: &PositionedToken<'_>) -> Result<()> {
        let Some(&(parent, _)) = self.open.last() else {
            return Err(unexpected(token, "`,` separates children inside `(...)`"));
        };
        self.start_child(parent);
        Ok(())
    }

    fn close_children(&mut self, token: &PositionedToken<'_>) -> Result<()> {
        let Some((parent, _)) = self.open.pop() else {
            return Err(unexpected(token, "this `)` has no matching `(`"));
        };
        self.current = parent;
        self.state = NodeState::Closed;
        self.internal = true;
        Ok(())
    }

    fn label(&mut self, token: &PositionedToken<'_>) -> Result<()> {
        if !matches!(self.state, NodeState::Fresh | NodeState::Closed) {
            return Err(unexpected(
                token,
                "a node takes one label, before its branch length",
            ));
        }

        let data = self.builder.data_mut(self.current);
        match &token.token {
            Token::Quoted(label) => data.set_name(Some(label.clone())),
            Token::Unquoted(label) => match label.parse::<f64>() {
                Ok(support) if self.internal && support.is_finite() => {
                    data.set_support(Some(support));
                }
                _ => data.set_name(Some(label.replace('_', " "))),
            },
            _ => {}
        }
        self.state = NodeState::Labelled;
        Ok(())
    }

    fn branch_length(
        &mut self,
        colon: &PositionedToken<'_>,
        value: Option<&PositionedToken<'_>>,
        end: usize,
    ) -> Result<()> {
        if self.state == NodeState::Measured {
            return Err(unexpected(colon, "a node takes a single branch length"));
        }

        let Some(value) = value else {
            return Err(Diagnostic::error("expected a branch length after `:`")
                .with_code(ErrorCode::E007)
                .with_label(Span::new(end..end), "document ends here")
                .with_secondary_label(colon.span, "branch length starts here"));
        };
        let Token::Unquoted(text) = &value.token else {
            return Err(Diagnostic::error(format!(
                "expected a branch length after `:`, found {}",
                value.token.describe()
            ))
            .with_code(ErrorCode::E005)
            .with_label(value.span, "not a number"));
        };
        let length = text.parse::<f64>().map_err(|_| {
            Diagnostic::error(format!("`{text}` is not a valid branch length"))
                .with_code(ErrorCode::E005)
                .with_label(value.span, ErrorCode::E005.description())
                .with_help("branch lengths are decimal numbers such as `0.25` or `1e-3`")
        })?;
        if !length.is_finite() || length < 0.0 {
            return Err(Diagnostic::error(format!("branch length {text} is not allowed"))
                .with_code(ErrorCode::E100)
                .with_label(value.span, ErrorCode::E100.description())
                .with_help("branch lengths must be finite and non-negative"));
        }

        self.builder
            .data_mut(self.current)
            .set_branch_length(Some(length));
        self.state = NodeState::Measured;
        Ok(())
    }

    fn unclosed(&self, at: Span) -> Diagnostic {
        let mut diagnostic = Diagnostic::error("tree ends with unclosed `(`")
            .with_code(ErrorCode::E007)
            .with_label(at, "tree ends here");
        if let Some(&(_, opened)) = self.open.last() {
            diagnostic = diagnostic.with_secondary_label(opened, "opened here");
        }
        diagnostic.with_help("add the missing `)`")
    }

    fn finish(self) -> Result<Tree> {
        self.builder.build().map_err(Diagnostic::from)
    }
}

fn unexpected(token: &PositionedToken<'_>, help: &str) -> Diagnostic {
    Diagnostic::error(format!("unexpected {}", token.token.describe()))
        .with_code(ErrorCode::E006)
        .with_label(token.span, ErrorCode::E006.description())
        .with_help(help)
}

/// Builds a tree from non-trivia tokens.
///
/// `source_len` positions errors that happen at the end of the document.
pub(super) fn build_tree(tokens: &[PositionedToken<'_>], source_len: usize) -> Result<Tree> {
    if tokens.is_empty() {
        return Err(Diagnostic::error("Newick document contains no tree")
            .with_code(ErrorCode::E008)
            .with_label(Span::new(0..source_len), ErrorCode::E008.description()));
    }

    let mut parser = TreeParser::new();
    let mut iter = tokens.iter();
    while let Some(token) = iter.next() {
        match &token.token {
            Token::LeftParen => parser.open_children(token)?,
            Token::Comma => parser.next_sibling(token)?,
            Token::RightParen => parser.close_children(token)?,
            Token::Quoted(_) | Token::Unquoted(_) => parser.label(token)?,
            Token::Colon => parser.branch_length(token, iter.next(), source_len)?,
            Token::Semicolon => {
                if !parser.open.is_empty() {
                    return Err(parser.unclosed(token.span));
                }
                if let Some(extra) = iter.next() {
                    return Err(unexpected(extra, "a Newick document holds a single tree"));
                }
                return parser.finish();
            }
            Token::Comment | Token::Whitespace => {}
        }
    }

    if !parser.open.is_empty() {
        return Err(parser.unclosed(Span::new(source_len..source_len)));
    }
    warn!("Newick tree is missing its terminating `;`");
    parser.finish()
}
