// Copyright Floe Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! DDL lexer.
//!
//! This module lexes the platform's DDL dialect: bare words, single-quoted
//! string literals with `''` escaping, double-quoted identifiers, numbers,
//! and a small amount of punctuation. Keywords are not distinguished from
//! other bare words here; the property-grammar layer decides what counts as
//! a keyword, because the keyword vocabulary is supplied by resource
//! schemas at runtime rather than fixed at compile time.

use std::char;

use floe_ore::lex::LexBuf;

use crate::parser::ParserError;

/// A lexical token, paired by [`lex`] with its byte offset in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A bare word: an unquoted identifier or keyword, original case
    /// preserved.
    Word(String),
    /// A double-quoted identifier, quotes stripped.
    Ident(String),
    /// A single-quoted string literal, quotes stripped and `''` unescaped.
    String(String),
    /// A numeric literal, verbatim.
    Number(String),
    /// An equals sign.
    Eq,
    /// A left parenthesis.
    LParen,
    /// A right parenthesis.
    RParen,
    /// A dot.
    Dot,
    /// A comma.
    Comma,
    /// A semicolon.
    Semicolon,
}

impl Token {
    /// Reports the name of the token's category for use in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Token::Word(_) => "word",
            Token::Ident(_) => "quoted identifier",
            Token::String(_) => "string literal",
            Token::Number(_) => "number",
            Token::Eq => "equals sign",
            Token::LParen => "left parenthesis",
            Token::RParen => "right parenthesis",
            Token::Dot => "dot",
            Token::Comma => "comma",
            Token::Semicolon => "semicolon",
        }
    }

    /// Returns the token's text as it would appear in the input.
    pub fn value(&self) -> String {
        match self {
            Token::Word(s) | Token::Ident(s) | Token::String(s) | Token::Number(s) => s.clone(),
            Token::Eq => "=".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),
            Token::Dot => ".".into(),
            Token::Comma => ",".into(),
            Token::Semicolon => ";".into(),
        }
    }
}

macro_rules! bail {
    ($pos:expr, $($fmt:expr),*) => {
        return Err(ParserError::new($pos, format!($($fmt),*)))
    }
}

/// Lexes a DDL string.
///
/// Returns a list of tokens alongside their corresponding byte offset in
/// the input string. Returns an error if the input is lexically invalid.
pub fn lex(ddl: &str) -> Result<Vec<(Token, usize)>, ParserError> {
    let buf = &mut LexBuf::new(ddl);
    let mut tokens = vec![];
    while let Some(ch) = buf.next() {
        let pos = buf.pos() - ch.len_utf8();
        let token = match ch {
            _ if ch.is_ascii_whitespace() => continue,
            '-' if buf.consume('-') => {
                lex_line_comment(buf);
                continue;
            }
            '/' if buf.consume('*') => {
                lex_multiline_comment(buf)?;
                continue;
            }
            '\'' => Token::String(lex_string(buf)?),
            '"' => lex_quoted_ident(buf)?,
            'A'..='Z' | 'a'..='z' | '_' | '\u{80}'..=char::MAX => lex_word(buf),
            '0'..='9' => lex_number(buf),
            '.' if matches!(buf.peek(), Some('0'..='9')) => lex_number(buf),
            '=' => Token::Eq,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '.' => Token::Dot,
            ',' => Token::Comma,
            ';' => Token::Semicolon,
            _ => bail!(pos, "unexpected character in input: {}", ch),
        };
        tokens.push((token, pos))
    }
    Ok(tokens)
}

fn lex_line_comment(buf: &mut LexBuf) {
    buf.take_while(|ch| ch != '\n');
}

fn lex_multiline_comment(buf: &mut LexBuf) -> Result<(), ParserError> {
    let pos = buf.pos() - 2;
    let mut nesting = 0;
    while let Some(ch) = buf.next() {
        match ch {
            '*' if buf.consume('/') => {
                if nesting == 0 {
                    return Ok(());
                } else {
                    nesting -= 1;
                }
            }
            '/' if buf.consume('*') => nesting += 1,
            _ => (),
        }
    }
    bail!(pos, "unterminated multiline comment")
}

fn lex_word(buf: &mut LexBuf) -> Token {
    buf.prev();
    // Hyphens are word characters here: several platform enum members
    // (e.g. SNOWPARK-OPTIMIZED) are spelled with them, and this grammar has
    // no infix arithmetic to claim the character. A leading `-` still
    // starts a comment or an error, never a word.
    let word = buf.take_while(
        |ch| matches!(ch, 'A'..='Z' | 'a'..='z' | '0'..='9' | '$' | '_' | '-' | '\u{80}'..=char::MAX),
    );
    Token::Word(word.into())
}

fn lex_quoted_ident(buf: &mut LexBuf) -> Result<Token, ParserError> {
    let mut s = String::new();
    let pos = buf.pos() - 1;
    loop {
        match buf.next() {
            Some('"') if buf.consume('"') => s.push('"'),
            Some('"') => break,
            Some(c) => s.push(c),
            None => bail!(pos, "unterminated quoted identifier"),
        }
    }
    Ok(Token::Ident(s))
}

fn lex_string(buf: &mut LexBuf) -> Result<String, ParserError> {
    let mut s = String::new();
    let pos = buf.pos() - 1;
    loop {
        match buf.next() {
            Some('\'') if buf.consume('\'') => s.push('\''),
            Some('\'') => return Ok(s),
            Some(c) => s.push(c),
            None => bail!(pos, "unterminated quoted string"),
        }
    }
}

fn lex_number(buf: &mut LexBuf) -> Token {
    buf.prev();
    let mut s = buf.take_while(|ch| matches!(ch, '0'..='9')).to_owned();
    if buf.consume('.') {
        s.push('.');
        s.push_str(buf.take_while(|ch| matches!(ch, '0'..='9')));
    }
    Token::Number(s)
}
