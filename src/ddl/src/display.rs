// Copyright Floe Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Canonical DDL rendering.
//!
//! Every syntax node implements [`DdlDisplay`] rather than `fmt::Display`
//! directly, so that rendering always goes through a [`DdlFormatter`] and
//! produces the one canonical spelling of the node: uppercase keywords,
//! single spaces, `''`-escaped string literals. Parsing is whitespace- and
//! case-tolerant; rendering is not.

use std::fmt;

/// A trait for objects that can be rendered as canonical DDL text.
pub trait DdlDisplay {
    /// Renders `self` into `f`.
    fn fmt<W: fmt::Write>(&self, f: &mut DdlFormatter<W>);

    /// Renders `self` into a fresh string.
    fn to_ddl_string(&self) -> String {
        let mut buf = String::new();
        let mut f = DdlFormatter::new(&mut buf);
        self.fmt(&mut f);
        buf
    }
}

impl<T: DdlDisplay + ?Sized> DdlDisplay for &T {
    fn fmt<W: fmt::Write>(&self, f: &mut DdlFormatter<W>) {
        (*self).fmt(f)
    }
}

/// Renders a `DdlDisplay` node into an underlying writer.
#[derive(Debug)]
pub struct DdlFormatter<W> {
    buf: W,
}

impl<W: fmt::Write> DdlFormatter<W> {
    /// Creates a formatter that writes into `buf`.
    pub fn new(buf: W) -> DdlFormatter<W> {
        DdlFormatter { buf }
    }

    /// Writes any `fmt::Display`-able value verbatim.
    pub fn write_str<T: fmt::Display>(&mut self, s: T) {
        write!(self.buf, "{}", s).expect("formatter write cannot fail");
    }

    /// Writes a `DdlDisplay` node.
    pub fn write_node<T: DdlDisplay>(&mut self, node: &T) {
        node.fmt(self);
    }
}

/// Implements `fmt::Display` in terms of an existing `DdlDisplay`
/// implementation.
macro_rules! impl_display {
    ($name:ident) => {
        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                use $crate::display::DdlDisplay;
                f.write_str(&self.to_ddl_string())
            }
        }
    };
}

/// Escapes a string literal for embedding between single quotes, doubling
/// any embedded single quotes.
pub fn escape_single_quote_string(s: &str) -> EscapeSingleQuoteString<'_> {
    EscapeSingleQuoteString(s)
}

/// The return type of [`escape_single_quote_string`].
#[derive(Debug)]
pub struct EscapeSingleQuoteString<'a>(&'a str);

impl DdlDisplay for EscapeSingleQuoteString<'_> {
    fn fmt<W: fmt::Write>(&self, f: &mut DdlFormatter<W>) {
        for ch in self.0.chars() {
            if ch == '\'' {
                f.write_str("''");
            } else {
                f.write_str(ch);
            }
        }
    }
}

/// Renders a slice of nodes separated by `, `.
pub fn comma_separated<T>(slice: &[T]) -> CommaSeparated<'_, T> {
    CommaSeparated(slice)
}

/// The return type of [`comma_separated`].
#[derive(Debug)]
pub struct CommaSeparated<'a, T>(&'a [T]);

impl<T: DdlDisplay> DdlDisplay for CommaSeparated<'_, T> {
    fn fmt<W: fmt::Write>(&self, f: &mut DdlFormatter<W>) {
        let mut delim = "";
        for node in self.0 {
            f.write_str(delim);
            f.write_node(node);
            delim = ", ";
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_single_quote_string() {
        let escaped = escape_single_quote_string("it's a 'test'").to_ddl_string();
        assert_eq!(escaped, "it''s a ''test''");
    }

    #[test]
    fn test_comma_separated() {
        let nodes = [
            escape_single_quote_string("a"),
            escape_single_quote_string("b"),
        ];
        assert_eq!(comma_separated(&nodes).to_ddl_string(), "a, b");
    }
}
