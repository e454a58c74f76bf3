// Copyright Floe Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Resource scopes.

use crate::error::ModelError;
use crate::identifiers::Fqn;

/// The enclosing identifier levels a resource kind requires.
///
/// A resource may be *constructed* without its enclosing context — the
/// caller attaches database/schema qualifiers when it has them — but
/// deriving a URN for the resource checks the scope, because an address
/// without its required levels is meaningless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The resource lives directly in an account (warehouse, task, …).
    Account,
    /// The resource lives in a database (schema, …).
    Database,
    /// The resource lives in a schema (table, policy, …).
    Schema,
    /// The resource lives in a table (column). The FQN carries the
    /// database and schema levels; the enclosing table itself is the
    /// caller's context.
    Table,
}

impl Scope {
    /// Checks that `fqn` carries every level this scope requires.
    pub fn check(&self, fqn: &Fqn) -> Result<(), ModelError> {
        let missing = |level| ModelError::MissingScope {
            name: fqn.to_string(),
            level,
        };
        match self {
            Scope::Account => Ok(()),
            Scope::Database => {
                if fqn.database.is_none() {
                    return Err(missing("database"));
                }
                Ok(())
            }
            Scope::Schema | Scope::Table => {
                if fqn.database.is_none() {
                    return Err(missing("database"));
                }
                if fqn.schema.is_none() {
                    return Err(missing("schema"));
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_check() {
        let bare = Fqn::new("pp");
        assert!(Scope::Account.check(&bare).is_ok());
        assert_eq!(
            Scope::Schema.check(&bare),
            Err(ModelError::MissingScope {
                name: "PP".into(),
                level: "database",
            })
        );
        let qualified = Fqn::new("pp").in_database("db").in_schema("sch");
        assert!(Scope::Schema.check(&qualified).is_ok());
    }
}
