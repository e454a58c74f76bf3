// Copyright Floe Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Token cursor and parse errors.
//!
//! Parsing in this crate is a sequence of fallible attempts over a
//! [`Cursor`] into the token buffer. An attempt that does not recognize the
//! input saves and restores the cursor index and reports a no-match; an
//! attempt that has committed (its anchoring keyword matched) reports any
//! further trouble as a hard [`ParserError`] carrying the byte position of
//! the offending token.

use std::error::Error;
use std::fmt;

use crate::lexer::{self, Token};

/// An error that occurred while lexing or parsing DDL text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserError {
    /// The byte position with which the error is associated.
    pub pos: usize,
    /// A human-readable description of the error.
    pub message: String,
}

impl ParserError {
    /// Constructs an error at `pos` with the given message.
    pub fn new<S>(pos: usize, message: S) -> ParserError
    where
        S: Into<String>,
    {
        ParserError {
            pos,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for ParserError {}

/// An error produced by the property-grammar engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DdlError {
    /// The input did not match the grammar.
    Parser(ParserError),
    /// A tag map assigned the same key twice.
    DuplicateTagKey {
        /// The repeated key.
        key: String,
        /// The byte position of the second assignment.
        pos: usize,
    },
}

impl fmt::Display for DdlError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DdlError::Parser(e) => fmt::Display::fmt(e, f),
            DdlError::DuplicateTagKey { key, .. } => {
                write!(f, "tag key {} is assigned more than once", key)
            }
        }
    }
}

impl Error for DdlError {}

impl From<ParserError> for DdlError {
    fn from(e: ParserError) -> DdlError {
        DdlError::Parser(e)
    }
}

/// A cursor over a lexed token stream.
///
/// The cursor records the original text so errors can carry byte positions
/// and the unconsumed remainder can be reported verbatim.
#[derive(Debug)]
pub struct Cursor<'a> {
    ddl: &'a str,
    tokens: Vec<(Token, usize)>,
    index: usize,
}

impl<'a> Cursor<'a> {
    /// Lexes `ddl` and positions a cursor at its first token.
    pub fn new(ddl: &'a str) -> Result<Cursor<'a>, ParserError> {
        let tokens = lexer::lex(ddl)?;
        Ok(Cursor {
            ddl,
            tokens,
            index: 0,
        })
    }

    /// Returns an opaque checkpoint for the current position.
    pub fn checkpoint(&self) -> usize {
        self.index
    }

    /// Rewinds the cursor to a previously saved checkpoint.
    pub fn rollback(&mut self, checkpoint: usize) {
        self.index = checkpoint;
    }

    /// Returns the byte position of the next token, or the end of the input
    /// if no tokens remain.
    pub fn pos(&self) -> usize {
        match self.tokens.get(self.index) {
            Some((_, pos)) => *pos,
            None => self.ddl.len(),
        }
    }

    /// Returns the next token without advancing.
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index).map(|(t, _)| t)
    }

    /// Returns the next token and advances past it.
    pub fn next_token(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.index).map(|(t, _)| t.clone());
        if token.is_some() {
            self.index += 1;
        }
        token
    }

    /// Consumes the next token if it is the bare word `word`, compared
    /// case-insensitively.
    pub fn consume_word(&mut self, word: &str) -> bool {
        match self.peek() {
            Some(Token::Word(w)) if w.eq_ignore_ascii_case(word) => {
                self.index += 1;
                true
            }
            _ => false,
        }
    }

    /// Consumes each word of the space-separated phrase `phrase` in order,
    /// or leaves the cursor untouched and returns false.
    pub fn consume_phrase(&mut self, phrase: &str) -> bool {
        let start = self.checkpoint();
        for word in phrase.split(' ') {
            if !self.consume_word(word) {
                self.rollback(start);
                return false;
            }
        }
        true
    }

    /// Like [`Cursor::consume_word`], but produces an error on mismatch.
    pub fn expect_word(&mut self, word: &str) -> Result<(), ParserError> {
        if self.consume_word(word) {
            Ok(())
        } else {
            Err(self.error(format!("expected {}", word)))
        }
    }

    /// Consumes the next token if it equals `token`.
    pub fn consume_token(&mut self, token: &Token) -> bool {
        match self.peek() {
            Some(t) if t == token => {
                self.index += 1;
                true
            }
            _ => false,
        }
    }

    /// Like [`Cursor::consume_token`], but produces an error on mismatch.
    pub fn expect_token(&mut self, token: &Token) -> Result<(), ParserError> {
        if self.consume_token(token) {
            Ok(())
        } else {
            Err(self.error(format!("expected {}", token.name())))
        }
    }

    /// Consumes a bare word or quoted identifier, returning its text.
    pub fn expect_ident(&mut self, what: &str) -> Result<String, ParserError> {
        match self.peek() {
            Some(Token::Word(s)) | Some(Token::Ident(s)) => {
                let s = s.clone();
                self.index += 1;
                Ok(s)
            }
            _ => Err(self.error(format!("expected {}", what))),
        }
    }

    /// Reports whether every token has been consumed. A single trailing
    /// semicolon is tolerated.
    pub fn expect_end(&mut self) -> Result<(), ParserError> {
        self.consume_token(&Token::Semicolon);
        match self.peek() {
            None => Ok(()),
            Some(_) => Err(self.error(format!(
                "unexpected trailing input: {}",
                self.remaining_text()
            ))),
        }
    }

    /// Returns the unconsumed portion of the original text.
    pub fn remaining_text(&self) -> &'a str {
        self.ddl[self.pos()..].trim_end()
    }

    /// Constructs an error at the cursor's current position.
    pub fn error<S>(&self, message: S) -> ParserError
    where
        S: Into<String>,
    {
        ParserError::new(self.pos(), message)
    }
}
