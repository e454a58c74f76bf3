// Copyright Floe Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Property values.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::display::{self, DdlDisplay, DdlFormatter};

/// The value of one resource field.
///
/// A field that is absent from a resource's record simply has no entry
/// there; [`Value::Null`] is the *explicit* null produced when DDL spells a
/// property's value with a literal alternate token such as `NULL`, which is
/// a different statement than leaving the property out.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    /// A string literal.
    String(String),
    /// An integer.
    Number(i64),
    /// A boolean.
    Boolean(bool),
    /// An identifier or enum member, stored in canonical spelling.
    Ident(String),
    /// A list of string literals.
    List(Vec<String>),
    /// An ordered key/value mapping (tag assignments).
    Map(Vec<(String, String)>),
    /// An explicit null.
    Null,
}

impl Value {
    /// Reports the name of the value's category for use in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Number(_) => "integer",
            Value::Boolean(_) => "boolean",
            Value::Ident(_) => "identifier",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Null => "null",
        }
    }
}

impl DdlDisplay for Value {
    fn fmt<W: fmt::Write>(&self, f: &mut DdlFormatter<W>) {
        match self {
            Value::String(s) => {
                f.write_str("'");
                f.write_node(&display::escape_single_quote_string(s));
                f.write_str("'");
            }
            Value::Number(n) => f.write_str(n),
            Value::Boolean(true) => f.write_str("TRUE"),
            Value::Boolean(false) => f.write_str("FALSE"),
            Value::Ident(s) => f.write_str(s),
            Value::List(items) => {
                let mut delim = "";
                for item in items {
                    f.write_str(delim);
                    f.write_str("'");
                    f.write_node(&display::escape_single_quote_string(item));
                    f.write_str("'");
                    delim = ", ";
                }
            }
            Value::Map(entries) => {
                let mut delim = "";
                for (key, value) in entries {
                    f.write_str(delim);
                    f.write_str(key);
                    f.write_str(" = '");
                    f.write_node(&display::escape_single_quote_string(value));
                    f.write_str("'");
                    delim = ", ";
                }
            }
            Value::Null => f.write_str("NULL"),
        }
    }
}
impl_display!(Value);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_display() {
        assert_eq!(Value::String("it's".into()).to_string(), "'it''s'");
        assert_eq!(Value::Number(600).to_string(), "600");
        assert_eq!(Value::Boolean(true).to_string(), "TRUE");
        assert_eq!(
            Value::List(vec!["a".into(), "b".into()]).to_string(),
            "'a', 'b'"
        );
        assert_eq!(
            Value::Map(vec![("dept".into(), "finance".into())]).to_string(),
            "dept = 'finance'"
        );
        assert_eq!(Value::Null.to_string(), "NULL");
    }
}
