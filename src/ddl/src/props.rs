// Copyright Floe Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The declarative property grammar.
//!
//! A resource's keyword syntax is a [`Props`] schema: an ordered table of
//! named [`Prop`] descriptors. Rendering walks the table in declared order
//! and emits the fields that are present; parsing repeatedly offers the
//! remaining descriptors the current cursor position until none of them
//! recognize the input. Keyword properties may therefore appear in any
//! order in the input, while rendering always produces the schema's
//! canonical order.
//!
//! A descriptor that does not recognize the input reports a no-match and
//! leaves the cursor untouched; that is ordinary control flow, not an
//! error. Once a descriptor's keyword has matched, everything after it must
//! be well-formed or the parse fails hard.

use std::collections::BTreeMap;
use std::fmt;

use crate::display::DdlFormatter;
use crate::lexer::Token;
use crate::parser::{Cursor, DdlError, ParserError};
use crate::value::Value;

/// The shape of a property's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropKind {
    /// A bare keyword with no value; presence means true.
    Flag,
    /// `KEYWORD [=] TRUE|FALSE`.
    Bool,
    /// `KEYWORD [=] <integer>`.
    Int,
    /// `KEYWORD [=] '<string literal>'`.
    String,
    /// `KEYWORD [=] <identifier>`.
    Ident,
    /// `KEYWORD [=] <member>` where the member must belong to a closed,
    /// case-insensitive set.
    Enum {
        /// The canonical spellings of the allowed members.
        members: &'static [&'static str],
    },
    /// `KEYWORD [=] '<s>', ...`, parenthesized or not.
    StringList {
        /// Whether the list is surrounded by parentheses.
        parens: bool,
    },
    /// `[WITH] TAG (<key> = '<value>', ...)`.
    Tags,
}

/// A typed, named description of one keyword/value unit of DDL syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prop {
    /// The anchoring keyword, possibly a multi-word phrase (`NOT NULL`),
    /// matched case-insensitively.
    pub keyword: &'static str,
    /// The shape of the value that follows the keyword.
    pub kind: PropKind,
    /// Whether an equals sign separates keyword and value. Rendering emits
    /// it and parsing requires it exactly when this is set.
    pub eq: bool,
    /// Literal tokens accepted in place of a normal value, e.g. `NULL`.
    /// Matching one produces the explicit-null sentinel [`Value::Null`].
    pub alt_tokens: &'static [&'static str],
}

impl Prop {
    /// A flag property. Flags never take a value or an equals sign.
    pub const fn flag(keyword: &'static str) -> Prop {
        Prop {
            keyword,
            kind: PropKind::Flag,
            eq: false,
            alt_tokens: &[],
        }
    }

    /// A boolean property.
    pub const fn boolean(keyword: &'static str) -> Prop {
        Prop {
            keyword,
            kind: PropKind::Bool,
            eq: true,
            alt_tokens: &[],
        }
    }

    /// An integer property.
    pub const fn int(keyword: &'static str) -> Prop {
        Prop {
            keyword,
            kind: PropKind::Int,
            eq: true,
            alt_tokens: &[],
        }
    }

    /// A string-literal property.
    pub const fn string(keyword: &'static str) -> Prop {
        Prop {
            keyword,
            kind: PropKind::String,
            eq: true,
            alt_tokens: &[],
        }
    }

    /// An identifier property.
    pub const fn ident(keyword: &'static str) -> Prop {
        Prop {
            keyword,
            kind: PropKind::Ident,
            eq: true,
            alt_tokens: &[],
        }
    }

    /// An enum property over a closed member set.
    pub const fn enumeration(keyword: &'static str, members: &'static [&'static str]) -> Prop {
        Prop {
            keyword,
            kind: PropKind::Enum { members },
            eq: true,
            alt_tokens: &[],
        }
    }

    /// A string-list property.
    pub const fn string_list(keyword: &'static str, parens: bool) -> Prop {
        Prop {
            keyword,
            kind: PropKind::StringList { parens },
            eq: true,
            alt_tokens: &[],
        }
    }

    /// The tag-map property.
    pub const fn tags() -> Prop {
        Prop {
            keyword: "TAG",
            kind: PropKind::Tags,
            eq: false,
            alt_tokens: &[],
        }
    }

    /// Drops the equals sign from the property's syntax.
    pub const fn no_eq(mut self) -> Prop {
        self.eq = false;
        self
    }

    /// Adds literal alternate tokens accepted in place of a value.
    pub const fn or_alt(mut self, alt_tokens: &'static [&'static str]) -> Prop {
        self.alt_tokens = alt_tokens;
        self
    }

    /// Attempts to recognize this property at the cursor.
    ///
    /// Returns `Ok(None)` with the cursor untouched when the anchoring
    /// keyword is not next; the caller is expected to offer the remaining
    /// descriptors instead. Once the keyword has matched, malformed input
    /// is a hard error.
    pub fn try_consume(&self, cursor: &mut Cursor) -> Result<Option<Value>, DdlError> {
        let start = cursor.checkpoint();
        if matches!(self.kind, PropKind::Tags) {
            // The platform permits `WITH TAG (...)` wherever `TAG (...)`
            // appears.
            cursor.consume_word("WITH");
        }
        if !cursor.consume_phrase(self.keyword) {
            cursor.rollback(start);
            return Ok(None);
        }
        if matches!(self.kind, PropKind::Flag) {
            return Ok(Some(Value::Boolean(true)));
        }
        if self.eq {
            cursor.expect_token(&Token::Eq)?;
        } else if cursor.peek() == Some(&Token::Eq) {
            return Err(cursor
                .error(format!("{} does not take an equals sign", self.keyword))
                .into());
        }
        let alt = match cursor.peek() {
            Some(Token::Word(w)) => self
                .alt_tokens
                .iter()
                .any(|alt| w.eq_ignore_ascii_case(alt)),
            _ => false,
        };
        if alt {
            cursor.next_token();
            return Ok(Some(Value::Null));
        }
        let value = match &self.kind {
            PropKind::Flag => unreachable!("flags are handled above"),
            PropKind::Bool => self.consume_bool(cursor)?,
            PropKind::Int => self.consume_int(cursor)?,
            PropKind::String => self.consume_string(cursor)?,
            PropKind::Ident => self.consume_ident(cursor)?,
            PropKind::Enum { members } => self.consume_enum(cursor, *members)?,
            PropKind::StringList { parens } => self.consume_string_list(cursor, *parens)?,
            PropKind::Tags => self.consume_tags(cursor)?,
        };
        Ok(Some(value))
    }

    fn consume_bool(&self, cursor: &mut Cursor) -> Result<Value, ParserError> {
        let pos = cursor.pos();
        match cursor.next_token() {
            Some(Token::Word(w)) if w.eq_ignore_ascii_case("TRUE") => Ok(Value::Boolean(true)),
            Some(Token::Word(w)) if w.eq_ignore_ascii_case("FALSE") => Ok(Value::Boolean(false)),
            _ => Err(ParserError::new(
                pos,
                format!("expected TRUE or FALSE after {}", self.keyword),
            )),
        }
    }

    fn consume_int(&self, cursor: &mut Cursor) -> Result<Value, ParserError> {
        let pos = cursor.pos();
        match cursor.next_token() {
            Some(Token::Number(n)) => match n.parse::<i64>() {
                Ok(n) => Ok(Value::Number(n)),
                Err(_) => Err(ParserError::new(
                    pos,
                    format!("expected an integer after {}", self.keyword),
                )),
            },
            _ => Err(ParserError::new(
                pos,
                format!("expected an integer after {}", self.keyword),
            )),
        }
    }

    fn consume_string(&self, cursor: &mut Cursor) -> Result<Value, ParserError> {
        let pos = cursor.pos();
        match cursor.next_token() {
            Some(Token::String(s)) => Ok(Value::String(s)),
            _ => Err(ParserError::new(
                pos,
                format!("expected a string literal after {}", self.keyword),
            )),
        }
    }

    fn consume_ident(&self, cursor: &mut Cursor) -> Result<Value, ParserError> {
        let pos = cursor.pos();
        match cursor.next_token() {
            Some(Token::Word(s)) | Some(Token::Ident(s)) => Ok(Value::Ident(s)),
            _ => Err(ParserError::new(
                pos,
                format!("expected an identifier after {}", self.keyword),
            )),
        }
    }

    fn consume_enum(
        &self,
        cursor: &mut Cursor,
        members: &'static [&'static str],
    ) -> Result<Value, ParserError> {
        let pos = cursor.pos();
        let token = cursor.next_token();
        let spelled = match &token {
            Some(Token::Word(w)) => w.as_str(),
            Some(Token::String(s)) => s.as_str(),
            _ => {
                return Err(ParserError::new(
                    pos,
                    format!("expected a value after {}", self.keyword),
                ))
            }
        };
        match members.iter().find(|m| m.eq_ignore_ascii_case(spelled)) {
            Some(member) => Ok(Value::Ident((*member).to_string())),
            None => Err(ParserError::new(
                pos,
                format!(
                    "invalid {} value {}; expected one of {}",
                    self.keyword,
                    spelled,
                    members.join(", ")
                ),
            )),
        }
    }

    fn consume_string_list(&self, cursor: &mut Cursor, parens: bool) -> Result<Value, ParserError> {
        let mut items = vec![];
        if parens {
            cursor.expect_token(&Token::LParen)?;
            if cursor.consume_token(&Token::RParen) {
                return Ok(Value::List(items));
            }
        }
        loop {
            let pos = cursor.pos();
            match cursor.next_token() {
                Some(Token::String(s)) => items.push(s),
                _ => {
                    return Err(ParserError::new(
                        pos,
                        format!("expected a string literal in {} list", self.keyword),
                    ))
                }
            }
            if cursor.consume_token(&Token::Comma) {
                continue;
            }
            if parens {
                cursor.expect_token(&Token::RParen)?;
            }
            return Ok(Value::List(items));
        }
    }

    fn consume_tags(&self, cursor: &mut Cursor) -> Result<Value, DdlError> {
        cursor.expect_token(&Token::LParen).map_err(DdlError::from)?;
        let mut entries: Vec<(String, String)> = vec![];
        loop {
            let key_pos = cursor.pos();
            let key = cursor.expect_ident("a tag name").map_err(DdlError::from)?;
            if entries.iter().any(|(k, _)| k.eq_ignore_ascii_case(&key)) {
                return Err(DdlError::DuplicateTagKey { key, pos: key_pos });
            }
            cursor.expect_token(&Token::Eq).map_err(DdlError::from)?;
            let value_pos = cursor.pos();
            let value = match cursor.next_token() {
                Some(Token::String(s)) => s,
                _ => {
                    return Err(
                        ParserError::new(value_pos, "expected a string literal tag value").into(),
                    )
                }
            };
            entries.push((key, value));
            if cursor.consume_token(&Token::Comma) {
                continue;
            }
            cursor.expect_token(&Token::RParen).map_err(DdlError::from)?;
            return Ok(Value::Map(entries));
        }
    }

    /// Reports whether the given value produces any output when rendered.
    /// A false flag renders nothing, like an absent field.
    fn is_rendered(&self, value: &Value) -> bool {
        !matches!(
            (&self.kind, value),
            (PropKind::Flag, Value::Boolean(false))
        )
    }

    /// Renders `KEYWORD [=] value` for this property.
    pub fn render<W: fmt::Write>(&self, f: &mut DdlFormatter<W>, value: &Value) {
        match (&self.kind, value) {
            (PropKind::Flag, _) => f.write_str(self.keyword),
            (PropKind::Tags, Value::Map(_)) => {
                f.write_str(self.keyword);
                f.write_str(" (");
                f.write_node(value);
                f.write_str(")");
            }
            (PropKind::StringList { parens: true }, Value::List(_)) => {
                f.write_str(self.keyword);
                f.write_str(if self.eq { " = (" } else { " (" });
                f.write_node(value);
                f.write_str(")");
            }
            _ => {
                f.write_str(self.keyword);
                f.write_str(if self.eq { " = " } else { " " });
                f.write_node(value);
            }
        }
    }
}

/// An ordered mapping from field name to property descriptor, plus
/// schema-level layout rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Props {
    /// An optional keyword emitted before the first keyword property when
    /// at least one renders, and consumed from the input if present.
    pub leading_keyword: Option<&'static str>,
    /// The schema's fields, in canonical rendering order.
    pub fields: &'static [(&'static str, Prop)],
}

impl Props {
    /// Looks up the descriptor for a field name.
    pub fn prop(&self, field: &str) -> Option<&Prop> {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, prop)| prop)
    }

    /// Renders the present fields in declared order, each preceded by a
    /// single space, with the leading keyword (if configured) before the
    /// first one.
    pub fn render<W: fmt::Write>(&self, f: &mut DdlFormatter<W>, values: &BTreeMap<String, Value>) {
        let mut first = true;
        for (name, prop) in self.fields {
            let Some(value) = values.get(*name) else {
                continue;
            };
            if !prop.is_rendered(value) {
                continue;
            }
            if first {
                if let Some(keyword) = self.leading_keyword {
                    f.write_str(" ");
                    f.write_str(keyword);
                }
                first = false;
            }
            f.write_str(" ");
            prop.render(f, value);
        }
    }

    /// Consumes keyword properties from the cursor until none of the
    /// schema's remaining descriptors match.
    ///
    /// The cursor is left at the first unrecognized token; whether that
    /// remainder is legal is the caller's decision. A keyword that appears
    /// twice is not consumed twice — the second occurrence is left in the
    /// remainder, where statement-level parsing rejects it as trailing
    /// input.
    pub fn parse(&self, cursor: &mut Cursor) -> Result<BTreeMap<String, Value>, DdlError> {
        let mut values = BTreeMap::new();
        if let Some(keyword) = self.leading_keyword {
            cursor.consume_word(keyword);
        }
        loop {
            let mut matched = false;
            for (name, prop) in self.fields {
                if values.contains_key(*name) {
                    continue;
                }
                if let Some(value) = prop.try_consume(cursor)? {
                    values.insert((*name).to_string(), value);
                    matched = true;
                    break;
                }
            }
            if !matched {
                return Ok(values);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SIZES: &[&str] = &["XSMALL", "SMALL", "MEDIUM"];

    static TEST_PROPS: Props = Props {
        leading_keyword: Some("WITH"),
        fields: &[
            ("size", Prop::enumeration("SIZE", TEST_SIZES)),
            ("auto_suspend", Prop::int("AUTO_SUSPEND").or_alt(&["NULL"])),
            ("auto_resume", Prop::boolean("AUTO_RESUME")),
            ("collate", Prop::string("COLLATE").no_eq()),
            ("not_null", Prop::flag("NOT NULL")),
            ("allowlist", Prop::string_list("ALLOWLIST", true)),
            ("after", Prop::string_list("AFTER", false).no_eq()),
            ("tags", Prop::tags()),
        ],
    };

    fn parse(ddl: &str) -> Result<BTreeMap<String, Value>, DdlError> {
        let mut cursor = Cursor::new(ddl).unwrap();
        let values = TEST_PROPS.parse(&mut cursor)?;
        cursor.expect_end()?;
        Ok(values)
    }

    fn render(values: &BTreeMap<String, Value>) -> String {
        let mut buf = String::new();
        let mut f = DdlFormatter::new(&mut buf);
        TEST_PROPS.render(&mut f, values);
        buf
    }

    #[test]
    fn test_out_of_order_parse_canonical_render() {
        let values = parse("AUTO_RESUME = TRUE SIZE = small").unwrap();
        assert_eq!(values["size"], Value::Ident("SMALL".into()));
        assert_eq!(values["auto_resume"], Value::Boolean(true));
        assert_eq!(render(&values), " WITH SIZE = SMALL AUTO_RESUME = TRUE");
    }

    #[test]
    fn test_leading_keyword_optional_on_parse() {
        let with = parse("WITH SIZE = XSMALL").unwrap();
        let without = parse("SIZE = XSMALL").unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn test_flag_and_no_eq() {
        let values = parse("COLLATE 'en-ci' NOT NULL").unwrap();
        assert_eq!(values["collate"], Value::String("en-ci".into()));
        assert_eq!(values["not_null"], Value::Boolean(true));
        assert_eq!(render(&values), " WITH COLLATE 'en-ci' NOT NULL");
    }

    #[test]
    fn test_alt_token_null() {
        let values = parse("AUTO_SUSPEND = NULL").unwrap();
        assert_eq!(values["auto_suspend"], Value::Null);
        assert_eq!(render(&values), " WITH AUTO_SUSPEND = NULL");
    }

    #[test]
    fn test_enum_rejects_non_member() {
        let err = parse("SIZE = humongous").unwrap_err();
        match err {
            DdlError::Parser(e) => {
                assert!(e.message.contains("invalid SIZE value humongous"));
                assert!(e.message.contains("XSMALL, SMALL, MEDIUM"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_string_lists() {
        let values = parse("ALLOWLIST = ('a', 'b') AFTER 't1', 't2'").unwrap();
        assert_eq!(
            values["allowlist"],
            Value::List(vec!["a".into(), "b".into()])
        );
        assert_eq!(values["after"], Value::List(vec!["t1".into(), "t2".into()]));
        assert_eq!(
            render(&values),
            " WITH ALLOWLIST = ('a', 'b') AFTER 't1', 't2'"
        );
    }

    #[test]
    fn test_empty_parenthesized_list() {
        let values = parse("ALLOWLIST = ()").unwrap();
        assert_eq!(values["allowlist"], Value::List(vec![]));
    }

    #[test]
    fn test_tags_with_optional_with() {
        let plain = parse("TAG (dept = 'finance', env = 'prod')").unwrap();
        let with = parse("WITH TAG (dept = 'finance', env = 'prod')").unwrap();
        assert_eq!(plain, with);
        assert_eq!(
            plain["tags"],
            Value::Map(vec![
                ("dept".into(), "finance".into()),
                ("env".into(), "prod".into()),
            ])
        );
    }

    #[test]
    fn test_duplicate_tag_key() {
        let err = parse("TAG (dept = 'a', DEPT = 'b')").unwrap_err();
        match err {
            DdlError::DuplicateTagKey { key, .. } => assert_eq!(key, "DEPT"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_trailing_text_is_left_for_caller() {
        let mut cursor = Cursor::new("SIZE = XSMALL MYSTERY_OPTION = 1").unwrap();
        let values = TEST_PROPS.parse(&mut cursor).unwrap();
        assert_eq!(values.len(), 1);
        let err = cursor.expect_end().unwrap_err();
        assert!(err.message.contains("MYSTERY_OPTION"));
    }

    #[test]
    fn test_missing_equals_is_hard_error() {
        let err = parse("SIZE XSMALL").unwrap_err();
        match err {
            DdlError::Parser(e) => assert!(e.message.contains("equals sign")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unexpected_equals_is_hard_error() {
        let err = parse("COLLATE = 'en-ci'").unwrap_err();
        match err {
            DdlError::Parser(e) => assert!(e.message.contains("does not take")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_repeated_keyword_not_reconsumed() {
        let mut cursor = Cursor::new("SIZE = XSMALL SIZE = SMALL").unwrap();
        let values = TEST_PROPS.parse(&mut cursor).unwrap();
        assert_eq!(values["size"], Value::Ident("XSMALL".into()));
        assert!(cursor.expect_end().is_err());
    }

    #[test]
    fn test_false_flag_renders_nothing() {
        let mut values = BTreeMap::new();
        values.insert("not_null".to_string(), Value::Boolean(false));
        assert_eq!(render(&values), "");
    }
}
