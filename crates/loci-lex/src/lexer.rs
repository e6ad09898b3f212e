//! Main lexer implementation.
//!
//! Transforms script text into a token stream. The lexer makes a single
//! left-to-right pass, applies longest match, and never backtracks across a
//! completed token. It is stateless beyond its cursor: keywords are
//! recognised by post-scan lookup of identifier spellings, not by scanning
//! states.
//!
//! The stream is guaranteed to end with exactly one [`TokenKind::Eof`]
//! token whose span is zero-length at the end of input. Whitespace and
//! comments are skipped unless the caller asks for non-significant tokens
//! (pretty-printers and the source round-trip tests do).

use loci_util::diagnostic;
use loci_util::{Result, ScriptError, Span};

use crate::cursor::Cursor;
use crate::token::{keyword_from_ident, Token, TokenKind};

/// Tokenize `source`, reporting positions offset by `start_offset` (the
/// position of `source[0]` in the enclosing buffer; 0 for a standalone
/// script).
///
/// With `keep_nonsignificant` set, whitespace runs and comments are emitted
/// as tokens; otherwise they are consumed silently.
///
/// On failure the offending character range is published to the highlight
/// slots and a [`ScriptError::Lexical`] is returned.
///
/// # Examples
///
/// ```
/// use loci_lex::{tokenize, TokenKind};
///
/// let tokens = tokenize("x = 42;", 0, false).unwrap();
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(
///     kinds,
///     vec![
///         TokenKind::Identifier,
///         TokenKind::Assign,
///         TokenKind::Number,
///         TokenKind::Semicolon,
///         TokenKind::Eof,
///     ]
/// );
/// ```
pub fn tokenize(source: &str, start_offset: usize, keep_nonsignificant: bool) -> Result<Vec<Token>> {
    let mut lexer = Lexer::new(source, start_offset, keep_nonsignificant);
    let mut tokens = Vec::new();

    loop {
        let token = lexer.next_token().map_err(diagnostic::publish)?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            break;
        }
    }

    Ok(tokens)
}

/// Append a synthetic semicolon before the EOF token, so REPL-style input
/// such as `6 + 7` parses as an expression statement.
///
/// No-op when the last significant token is already a semicolon (or the
/// stream is empty of significant tokens).
pub fn add_optional_semicolon(tokens: &mut Vec<Token>) {
    let Some(eof_index) = tokens.iter().rposition(|t| t.kind == TokenKind::Eof) else {
        return;
    };

    let last_significant = tokens[..eof_index]
        .iter()
        .rev()
        .find(|t| !t.kind.is_nonsignificant());
    match last_significant {
        None => return,
        Some(t) if t.kind == TokenKind::Semicolon => return,
        Some(_) => {}
    }

    let at = tokens[eof_index].span.start;
    tokens.insert(
        eof_index,
        Token::new(TokenKind::Semicolon, ";", Span::point(at)),
    );
}

/// The lexer proper: a cursor plus the position where the current token
/// began.
struct Lexer<'a> {
    cursor: Cursor<'a>,
    keep_nonsignificant: bool,
    token_start: usize,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str, start_offset: usize, keep_nonsignificant: bool) -> Self {
        Self {
            cursor: Cursor::new(source, start_offset),
            keep_nonsignificant,
            token_start: start_offset,
        }
    }

    /// Scan and return the next token.
    fn next_token(&mut self) -> Result<Token> {
        loop {
            self.token_start = self.cursor.position();

            if self.cursor.is_at_end() {
                return Ok(Token::eof_at(self.cursor.position()));
            }

            let c = self.cursor.current_char();

            if c.is_whitespace() {
                let token = self.lex_whitespace();
                if self.keep_nonsignificant {
                    return Ok(token);
                }
                continue;
            }
            if c == '/' && self.cursor.char_at(1) == '/' {
                let token = self.lex_line_comment();
                if self.keep_nonsignificant {
                    return Ok(token);
                }
                continue;
            }
            if c == '/' && self.cursor.char_at(1) == '*' {
                let token = self.lex_block_comment()?;
                if self.keep_nonsignificant {
                    return Ok(token);
                }
                continue;
            }

            return self.lex_significant(c);
        }
    }

    /// Dispatch on the first character of a significant token.
    fn lex_significant(&mut self, c: char) -> Result<Token> {
        match c {
            ';' => Ok(self.punctuator(TokenKind::Semicolon)),
            ':' => Ok(self.punctuator(TokenKind::Colon)),
            ',' => Ok(self.punctuator(TokenKind::Comma)),
            '{' => Ok(self.punctuator(TokenKind::LBrace)),
            '}' => Ok(self.punctuator(TokenKind::RBrace)),
            '(' => Ok(self.punctuator(TokenKind::LParen)),
            ')' => Ok(self.punctuator(TokenKind::RParen)),
            '[' => Ok(self.punctuator(TokenKind::LBracket)),
            ']' => Ok(self.punctuator(TokenKind::RBracket)),
            '.' => Ok(self.punctuator(TokenKind::Dot)),
            '+' => Ok(self.punctuator(TokenKind::Plus)),
            '-' => Ok(self.punctuator(TokenKind::Minus)),
            '*' => Ok(self.punctuator(TokenKind::Mult)),
            '/' => Ok(self.punctuator(TokenKind::Div)),
            '%' => Ok(self.punctuator(TokenKind::Mod)),
            '^' => Ok(self.punctuator(TokenKind::Exp)),
            '&' => Ok(self.punctuator(TokenKind::And)),
            '|' => Ok(self.punctuator(TokenKind::Or)),

            '=' => {
                self.cursor.advance();
                if self.cursor.match_char('=') {
                    Ok(self.finish(TokenKind::Eq))
                } else {
                    Ok(self.finish(TokenKind::Assign))
                }
            }
            '!' => {
                self.cursor.advance();
                if self.cursor.match_char('=') {
                    Ok(self.finish(TokenKind::NotEq))
                } else {
                    Ok(self.finish(TokenKind::Not))
                }
            }
            '<' => {
                self.cursor.advance();
                if self.cursor.match_char('=') {
                    Ok(self.finish(TokenKind::LtEq))
                } else {
                    Ok(self.finish(TokenKind::Lt))
                }
            }
            '>' => {
                self.cursor.advance();
                if self.cursor.match_char('=') {
                    Ok(self.finish(TokenKind::GtEq))
                } else {
                    Ok(self.finish(TokenKind::Gt))
                }
            }

            '"' | '\'' => self.lex_string(c),

            c if c.is_ascii_digit() => self.lex_number(),
            c if is_ident_start(c) => Ok(self.lex_identifier()),

            c => self.fail(format!("unexpected character '{c}'"), c.len_utf8()),
        }
    }

    /// Single-character punctuator.
    fn punctuator(&mut self, kind: TokenKind) -> Token {
        self.cursor.advance();
        self.finish(kind)
    }

    /// Build a token from `token_start` to the cursor, with the source
    /// slice as its text.
    fn finish(&mut self, kind: TokenKind) -> Token {
        let span = Span::new(self.token_start, self.cursor.position());
        Token::new(kind, self.cursor.slice_from(self.token_start), span)
    }

    fn lex_whitespace(&mut self) -> Token {
        while !self.cursor.is_at_end() && self.cursor.current_char().is_whitespace() {
            self.cursor.advance();
        }
        self.finish(TokenKind::Whitespace)
    }

    fn lex_line_comment(&mut self) -> Token {
        while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
            self.cursor.advance();
        }
        self.finish(TokenKind::Comment)
    }

    fn lex_block_comment(&mut self) -> Result<Token> {
        self.cursor.advance(); // '/'
        self.cursor.advance(); // '*'

        loop {
            if self.cursor.is_at_end() {
                let consumed = self.cursor.position() - self.token_start;
                return self.fail("unterminated block comment".to_string(), consumed);
            }
            if self.cursor.current_char() == '*' && self.cursor.char_at(1) == '/' {
                self.cursor.advance();
                self.cursor.advance();
                return Ok(self.finish(TokenKind::Comment));
            }
            self.cursor.advance();
        }
    }

    /// Identifier or keyword: `[A-Za-z_][A-Za-z0-9_]*`, reclassified by
    /// table lookup afterwards.
    fn lex_identifier(&mut self) -> Token {
        while is_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(self.token_start);
        let kind = keyword_from_ident(text).unwrap_or(TokenKind::Identifier);
        self.finish(kind)
    }

    /// Number literal: integer, or float with a fraction and/or exponent.
    ///
    /// The text is kept verbatim; numeric interpretation (and 64-bit range
    /// checking) happens where the value is needed.
    fn lex_number(&mut self) -> Result<Token> {
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        // Fraction: a dot continues the number only when a digit follows,
        // so member access on a literal still lexes as Number Dot Ident.
        if self.cursor.current_char() == '.' && self.cursor.char_at(1).is_ascii_digit() {
            self.cursor.advance();
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }
        }

        // Exponent
        if matches!(self.cursor.current_char(), 'e' | 'E') {
            self.cursor.advance();
            if matches!(self.cursor.current_char(), '+' | '-') {
                self.cursor.advance();
            }
            if !self.cursor.current_char().is_ascii_digit() {
                let consumed = self.cursor.position() - self.token_start;
                return self.fail("no digits in float exponent".to_string(), consumed);
            }
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }
        }

        Ok(self.finish(TokenKind::Number))
    }

    /// String literal, single- or double-quoted. The token's text is the
    /// unescaped contents; the span covers the quotes.
    fn lex_string(&mut self, quote: char) -> Result<Token> {
        self.cursor.advance(); // opening quote
        let mut contents = String::new();

        loop {
            if self.cursor.is_at_end() {
                let consumed = self.cursor.position() - self.token_start;
                return self.fail("unterminated string literal".to_string(), consumed);
            }

            let c = self.cursor.current_char();
            match c {
                '\n' => {
                    let consumed = self.cursor.position() - self.token_start;
                    return self.fail(
                        "illegal newline in string literal".to_string(),
                        consumed,
                    );
                }
                '\\' => {
                    self.cursor.advance();
                    if self.cursor.is_at_end() {
                        let consumed = self.cursor.position() - self.token_start;
                        return self.fail("unterminated string literal".to_string(), consumed);
                    }
                    let escaped = self.cursor.current_char();
                    self.cursor.advance();
                    contents.push(match escaped {
                        't' => '\t',
                        'r' => '\r',
                        'n' => '\n',
                        // \\, \", \', and anything else: the character itself
                        other => other,
                    });
                }
                c if c == quote => {
                    self.cursor.advance();
                    let span = Span::new(self.token_start, self.cursor.position());
                    return Ok(Token::new(TokenKind::String, contents, span));
                }
                c => {
                    self.cursor.advance();
                    contents.push(c);
                }
            }
        }
    }

    /// Fail with a lexical error covering `len` characters from the start
    /// of the current token.
    fn fail<T>(&self, message: String, len: usize) -> Result<T> {
        Err(ScriptError::Lexical {
            message,
            span: Span::new(self.token_start, self.token_start + len),
        })
    }
}

#[inline]
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

#[inline]
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
