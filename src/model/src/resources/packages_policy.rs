// Copyright Floe Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Packages policies.
//!
//! ```text
//! CREATE [ OR REPLACE ] PACKAGES POLICY [ IF NOT EXISTS ] <name>
//!   LANGUAGE PYTHON
//!   [ ALLOWLIST = ( [ '<packageSpec>' ] [ , '<packageSpec>' ... ] ) ]
//!   [ BLOCKLIST = ( [ '<packageSpec>' ] [ , '<packageSpec>' ... ] ) ]
//!   [ ADDITIONAL_CREATION_BLOCKLIST = ( [ '<packageSpec>' ] [ , ... ] ) ]
//!   [ COMMENT = '<string_literal>' ]
//! ```

use std::collections::BTreeMap;
use std::fmt;

use floe_ddl::props::{Prop, Props};
use floe_ddl::value::Value;

use crate::error::ModelError;
use crate::identifiers::Fqn;
use crate::kind::ResourceKind;
use crate::resource::{Resource, ResourceClass, StatementShape};
use crate::scope::Scope;

/// The policy language members. Only Python package policies exist today.
pub const LANGUAGES: &[&str] = &["PYTHON"];

/// A packages policy's language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    Python,
}

impl Language {
    /// The member's DDL spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "PYTHON",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The packages policy class.
pub static PACKAGES_POLICY: ResourceClass = ResourceClass {
    kind: ResourceKind::PackagesPolicy,
    scope: Scope::Schema,
    statement: StatementShape::Create {
        object: "PACKAGES POLICY",
    },
    props: Props {
        leading_keyword: None,
        fields: &[
            ("language", Prop::enumeration("LANGUAGE", LANGUAGES).no_eq()),
            ("allowlist", Prop::string_list("ALLOWLIST", true)),
            ("blocklist", Prop::string_list("BLOCKLIST", true)),
            (
                "additional_creation_blocklist",
                Prop::string_list("ADDITIONAL_CREATION_BLOCKLIST", true),
            ),
            ("comment", Prop::string("COMMENT")),
        ],
    },
};

/// A typed packages policy builder.
#[derive(Debug, Clone, Default)]
pub struct PackagesPolicy {
    pub name: String,
    pub database: Option<String>,
    pub schema: Option<String>,
    pub language: Language,
    pub allowlist: Option<Vec<String>>,
    pub blocklist: Option<Vec<String>>,
    pub additional_creation_blocklist: Option<Vec<String>>,
    pub comment: Option<String>,
}

impl PackagesPolicy {
    /// Creates a builder for a policy with the given name.
    pub fn new(name: &str) -> PackagesPolicy {
        PackagesPolicy {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Validates the builder into a [`Resource`].
    pub fn build(self) -> Result<Resource, ModelError> {
        let mut fqn = Fqn::new(&self.name);
        if let Some(database) = &self.database {
            fqn = fqn.in_database(database);
        }
        if let Some(schema) = &self.schema {
            fqn = fqn.in_schema(schema);
        }
        let mut fields = BTreeMap::new();
        fields.insert(
            "language".into(),
            Value::Ident(self.language.as_str().into()),
        );
        if let Some(v) = self.allowlist {
            fields.insert("allowlist".into(), Value::List(v));
        }
        if let Some(v) = self.blocklist {
            fields.insert("blocklist".into(), Value::List(v));
        }
        if let Some(v) = self.additional_creation_blocklist {
            fields.insert("additional_creation_blocklist".into(), Value::List(v));
        }
        if let Some(v) = self.comment {
            fields.insert("comment".into(), Value::String(v));
        }
        Resource::new(&PACKAGES_POLICY, fqn, fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let policy = PackagesPolicy {
            database: Some("db".into()),
            schema: Some("sec".into()),
            allowlist: Some(vec!["numpy".into(), "pandas".into()]),
            blocklist: Some(vec![]),
            comment: Some("data science default".into()),
            ..PackagesPolicy::new("ds_default")
        }
        .build()
        .unwrap();
        assert_eq!(
            policy.to_sql(),
            "CREATE PACKAGES POLICY DB.SEC.DS_DEFAULT LANGUAGE PYTHON \
             ALLOWLIST = ('numpy', 'pandas') BLOCKLIST = () \
             COMMENT = 'data science default'"
        );
    }

    #[test]
    fn test_round_trip() {
        let built = PackagesPolicy {
            database: Some("db".into()),
            schema: Some("sec".into()),
            allowlist: Some(vec!["requests".into()]),
            additional_creation_blocklist: Some(vec!["ctypes".into()]),
            ..PackagesPolicy::new("locked_down")
        }
        .build()
        .unwrap();
        let parsed = Resource::from_sql(&built.to_sql()).unwrap();
        assert_eq!(parsed, built);
        assert_eq!(parsed.to_sql(), built.to_sql());
    }

    #[test]
    fn test_two_word_object_phrase_resolves() {
        let policy = Resource::from_sql("create packages policy pp language python").unwrap();
        assert_eq!(policy.kind(), ResourceKind::PackagesPolicy);
    }
}
