// Copyright Floe Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Columns.
//!
//! A column is not a statement of its own: its definition is the fragment
//! `<name> <data_type> [ COLLATE '<spec>' ] [ COMMENT '<text>' ]
//! [ NOT NULL ]` embedded in a table definition. The data type is a
//! positional field, parsed before the keyword-property loop runs.

use std::collections::BTreeMap;

use floe_ddl::props::{Prop, Props};
use floe_ddl::value::Value;

use crate::error::ModelError;
use crate::identifiers::Fqn;
use crate::kind::ResourceKind;
use crate::resource::{Resource, ResourceClass, StatementShape};
use crate::scope::Scope;

/// The column class.
pub static COLUMN: ResourceClass = ResourceClass {
    kind: ResourceKind::Column,
    scope: Scope::Table,
    statement: StatementShape::ColumnDef,
    props: Props {
        leading_keyword: None,
        fields: &[
            ("collate", Prop::string("COLLATE").no_eq()),
            ("comment", Prop::string("COMMENT").no_eq()),
            ("not_null", Prop::flag("NOT NULL")),
        ],
    },
};

/// A typed column builder.
#[derive(Debug, Clone, Default)]
pub struct Column {
    pub name: String,
    pub data_type: String,
    pub collate: Option<String>,
    pub comment: Option<String>,
    pub not_null: bool,
}

impl Column {
    /// Creates a builder for a column with the given name and data type.
    pub fn new(name: &str, data_type: &str) -> Column {
        Column {
            name: name.to_string(),
            data_type: data_type.to_string(),
            ..Default::default()
        }
    }

    /// Validates the builder into a [`Resource`].
    pub fn build(self) -> Result<Resource, ModelError> {
        let mut fields = BTreeMap::new();
        fields.insert(
            "data_type".into(),
            Value::Ident(self.data_type.to_uppercase()),
        );
        if let Some(v) = self.collate {
            fields.insert("collate".into(), Value::String(v));
        }
        if let Some(v) = self.comment {
            fields.insert("comment".into(), Value::String(v));
        }
        if self.not_null {
            fields.insert("not_null".into(), Value::Boolean(true));
        }
        Resource::new(&COLUMN, Fqn::new(&self.name), fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let column = Column {
            collate: Some("en-ci".into()),
            comment: Some("taxpayer id".into()),
            not_null: true,
            ..Column::new("ssn", "varchar(11)")
        }
        .build()
        .unwrap();
        assert_eq!(
            column.to_sql(),
            "SSN VARCHAR(11) COLLATE 'en-ci' COMMENT 'taxpayer id' NOT NULL"
        );
    }

    #[test]
    fn test_parse() {
        let column = Resource::from_sql("ssn varchar(11) not null").unwrap();
        assert_eq!(column.kind(), ResourceKind::Column);
        assert_eq!(column.fqn().name, "SSN");
        assert_eq!(
            column.field("data_type"),
            Some(&Value::Ident("VARCHAR(11)".into()))
        );
        assert_eq!(column.field("not_null"), Some(&Value::Boolean(true)));
        assert_eq!(column.field("collate"), None);
    }

    #[test]
    fn test_round_trip() {
        let built = Column {
            comment: Some("2 decimal places".into()),
            ..Column::new("amount", "number(10,2)")
        }
        .build()
        .unwrap();
        let parsed = Resource::from_sql(&built.to_sql()).unwrap();
        assert_eq!(parsed, built);
        assert_eq!(parsed.to_sql(), built.to_sql());
    }

    #[test]
    fn test_trailing_junk_rejected() {
        let err = Resource::from_sql("ssn varchar(11) sparkly").unwrap_err();
        assert!(err.to_string().contains("sparkly"));
    }
}
