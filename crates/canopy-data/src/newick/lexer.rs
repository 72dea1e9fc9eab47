//! Tokenizer for Newick text.
//!
//! Errors do not stop tokenization: each failure is recorded and the lexer
//! skips one character, so a document with several problems reports them all.

use winnow::{
    Parser as _,
    combinator::{alt, cut_err, repeat, terminated},
    error::{ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{none_of, take_till, take_while},
};

use super::{PositionedToken, Token};
use crate::{
    error::{DataError, Diagnostic, DiagnosticCollector, ErrorCode},
    span::Span,
};

/// Diagnostic details attached to winnow errors via `.context()`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LexerDiagnostic {
    code: ErrorCode,
    message: &'static str,
    help: Option<&'static str>,
    /// The error span runs from `start` to the failure position.
    start: usize,
}

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError<LexerDiagnostic>>;

fn is_delimiter(c: char) -> bool {
    matches!(c, '(' | ')' | '[' | ']' | '\'' | ':' | ';' | ',') || c.is_whitespace()
}

/// `'label'`, where `''` stands for a single quote.
fn quoted_label<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    let start = input.current_token_start();
    '\''.parse_next(input)?;

    let piece = alt(("''".value('\''), none_of('\'')));
    cut_err(terminated(
        repeat(0.., piece).fold(String::new, |mut acc, c| {
            acc.push(c);
            acc
        }),
        '\'',
    ))
    .context(LexerDiagnostic {
        code: ErrorCode::E003,
        message: "unterminated quoted label",
        help: Some("close the label with `'`; write `''` for a literal quote"),
        start,
    })
    .map(Token::Quoted)
    .parse_next(input)
}

/// `[ ... ]` comment; Newick comments do not nest.
fn comment<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    let start = input.current_token_start();
    '['.parse_next(input)?;

    cut_err(terminated(take_till(0.., ']'), ']'))
        .context(LexerDiagnostic {
            code: ErrorCode::E004,
            message: "unterminated comment",
            help: Some("close the comment with `]`"),
            start,
        })
        .value(Token::Comment)
        .parse_next(input)
}

fn unquoted_label<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    take_while(1.., |c: char| !is_delimiter(c))
        .map(Token::Unquoted)
        .parse_next(input)
}

fn punctuation<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    alt((
        '('.value(Token::LeftParen),
        ')'.value(Token::RightParen),
        ','.value(Token::Comma),
        ':'.value(Token::Colon),
        ';'.value(Token::Semicolon),
    ))
    .parse_next(input)
}

fn whitespace<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    take_while(1.., char::is_whitespace)
        .value(Token::Whitespace)
        .parse_next(input)
}

fn positioned_token<'a>(input: &mut Input<'a>) -> IResult<PositionedToken<'a>> {
    let start_pos = input.current_token_start();

    let token = alt((
        comment,
        quoted_label,
        punctuation,
        whitespace,
        unquoted_label,
    ))
    .parse_next(input)?;

    let end_pos = input.current_token_start();
    Ok(PositionedToken::new(token, Span::new(start_pos..end_pos)))
}

struct Lexer<'a> {
    source: &'a str,
    tokens: Vec<PositionedToken<'a>>,
    diagnostics: DiagnosticCollector,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    fn tokenize(&mut self, mut input: Input<'a>) {
        while input.eof_offset() > 0 {
            match positioned_token(&mut input) {
                Ok(token) => {
                    if !token.token.is_trivia() {
                        self.tokens.push(token);
                    }
                }
                Err(err) => {
                    let error_pos = input.current_token_start();
                    let diagnostic = self.convert_err_mode(err, error_pos);
                    self.diagnostics.emit(diagnostic);

                    if input.eof_offset() > 0 {
                        input.next_token();
                    }
                }
            }
        }
    }

    fn finish(self) -> Result<Vec<PositionedToken<'a>>, DataError> {
        self.diagnostics.finish().map(|()| self.tokens)
    }

    /// Builds a diagnostic from the attached context, falling back to
    /// E002 (unexpected character) at `error_pos`.
    fn convert_err_mode(
        &self,
        err: ErrMode<ContextError<LexerDiagnostic>>,
        error_pos: usize,
    ) -> Diagnostic {
        let context_error = match err {
            ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
            ErrMode::Incomplete(_) => ContextError::new(),
        };

        if let Some(LexerDiagnostic {
            code,
            message,
            help,
            start,
        }) = context_error.context().next()
        {
            let span = Span::new(*start..error_pos);
            let mut diag = Diagnostic::error(*message)
                .with_code(*code)
                .with_label(span, code.description());
            if let Some(help) = help {
                diag = diag.with_help(*help);
            }
            return diag;
        }

        let width = self.source[error_pos..]
            .chars()
            .next()
            .map_or(1, char::len_utf8);
        let span = Span::new(error_pos..error_pos + width);
        Diagnostic::error("unexpected character")
            .with_code(ErrorCode::E002)
            .with_label(span, ErrorCode::E002.description())
            .with_help("quote labels that contain `]` or other punctuation")
    }
}

/// Splits Newick text into tokens, dropping whitespace and comments.
///
/// # Errors
///
/// Returns every lexical error found in the document.
pub(super) fn tokenize(source: &str) -> Result<Vec<PositionedToken<'_>>, DataError> {
    let mut lexer = Lexer::new(source);
    lexer.tokenize(LocatingSlice::new(source));
    lexer.finish()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn tokens(source: &str) -> Vec<Token<'_>> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|positioned| positioned.token)
            .collect()
    }

    fn error_codes(source: &str) -> Vec<ErrorCode> {
        tokenize(source)
            .unwrap_err()
            .diagnostics()
            .iter()
            .filter_map(Diagnostic::code)
            .collect()
    }

    #[test]
    fn test_punctuation_and_labels() {
        assert_eq!(
            tokens("(A:0.1,B)x;"),
            vec![
                Token::LeftParen,
                Token::Unquoted("A"),
                Token::Colon,
                Token::Unquoted("0.1"),
                Token::Comma,
                Token::Unquoted("B"),
                Token::RightParen,
                Token::Unquoted("x"),
                Token::Semicolon,
            ]
        );
    }

    #[test]
    fn test_quoted_label_with_escaped_quote() {
        assert_eq!(
            tokens("'it''s here';"),
            vec![Token::Quoted("it's here".to_string()), Token::Semicolon]
        );
    }

    #[test]
    fn test_comments_and_whitespace_dropped() {
        assert_eq!(
            tokens("( A [&&NHX:S=human] ,\n B );"),
            vec![
                Token::LeftParen,
                Token::Unquoted("A"),
                Token::Comma,
                Token::Unquoted("B"),
                Token::RightParen,
                Token::Semicolon,
            ]
        );
    }

    #[test]
    fn test_span_tracking() {
        let positioned = tokenize("(ab, 'c d')").unwrap();
        assert_eq!(positioned[1].span, Span::new(1..3));
        assert_eq!(positioned[3].span, Span::new(5..10));
    }

    #[test]
    fn test_unterminated_quote() {
        let err = tokenize("(A,'B C);").unwrap_err();
        let diagnostic = &err.diagnostics()[0];
        assert_eq!(diagnostic.code(), Some(ErrorCode::E003));
        assert_eq!(diagnostic.labels()[0].span().start(), 3);
    }

    #[test]
    fn test_unterminated_comment() {
        assert_eq!(error_codes("(A,B)[open;"), vec![ErrorCode::E004]);
    }

    #[test]
    fn test_stray_bracket_is_unexpected_character() {
        let err = tokenize("(A]B);").unwrap_err();
        let diagnostic = &err.diagnostics()[0];
        assert_eq!(diagnostic.code(), Some(ErrorCode::E002));
        assert_eq!(diagnostic.labels()[0].span(), Span::new(2..3));
    }

    #[test]
    fn test_multiple_errors_collected() {
        assert_eq!(
            error_codes("(A]B]C);"),
            vec![ErrorCode::E002, ErrorCode::E002]
        );
    }

    fn unquoted_label_strategy() -> impl Strategy<Value = String> {
        "[A-Za-z0-9_.|-]{1,24}"
    }

    proptest! {
        #[test]
        fn unquoted_labels_tokenize_verbatim(label in unquoted_label_strategy()) {
            let source = format!("{label};");
            let tokens = tokenize(&source).unwrap();
            prop_assert_eq!(tokens.len(), 2);
            prop_assert_eq!(&tokens[0].token, &Token::Unquoted(label.as_str()));
        }

        #[test]
        fn quoted_labels_round_trip(label in "[^']{0,24}") {
            let source = format!("'{label}'");
            let tokens = tokenize(&source).unwrap();
            prop_assert_eq!(&tokens[0].token, &Token::Quoted(label.clone()));
        }
    }
}
