// Copyright Floe Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::error::Error;
use std::fmt;

use floe_ddl::parser::{DdlError, ParserError};
use floe_ore::str::StrExt;

/// An error produced by the resource model.
///
/// Every failure in this crate is one of these variants; nothing is logged
/// and swallowed, and nothing is retried. The model's operations are pure,
/// so retrying without different input cannot succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A string did not name a member of the closed resource-kind set.
    InvalidResourceKind(String),
    /// A field value failed its descriptor-level check at construction.
    SchemaValidation {
        /// The offending field.
        field: String,
        /// What was wrong with it.
        message: String,
    },
    /// DDL text did not match the expected grammar.
    Parse(ParserError),
    /// A tag map assigned the same key twice.
    DuplicateTagKey {
        /// The repeated key.
        key: String,
    },
    /// A required enclosing identifier level was absent.
    MissingScope {
        /// The identifier that lacks the level.
        name: String,
        /// The absent level ("database" or "schema").
        level: &'static str,
    },
    /// A resource locator string was not `*` or `kind:pattern`.
    InvalidLocatorSyntax(String),
    /// A qualified name did not have between one and three components.
    MisqualifiedName(String),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidResourceKind(kind) => {
                write!(f, "invalid resource kind: {}", kind.quoted())
            }
            Self::SchemaValidation { field, message } => {
                write!(f, "invalid value for field {}: {}", field.quoted(), message)
            }
            Self::Parse(e) => fmt::Display::fmt(e, f),
            Self::DuplicateTagKey { key } => {
                write!(f, "tag key {} is assigned more than once", key.quoted())
            }
            Self::MissingScope { name, level } => {
                write!(f, "{} does not have a {}", name, level)
            }
            Self::InvalidLocatorSyntax(locator) => {
                write!(f, "invalid resource locator string: {}", locator.quoted())
            }
            Self::MisqualifiedName(name) => write!(
                f,
                "qualified name did not have between 1 and 3 components: {}",
                name
            ),
        }
    }
}

impl Error for ModelError {}

impl From<ParserError> for ModelError {
    fn from(e: ParserError) -> ModelError {
        ModelError::Parse(e)
    }
}

impl From<DdlError> for ModelError {
    fn from(e: DdlError) -> ModelError {
        match e {
            DdlError::Parser(e) => ModelError::Parse(e),
            DdlError::DuplicateTagKey { key, .. } => ModelError::DuplicateTagKey { key },
        }
    }
}
