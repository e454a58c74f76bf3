// Copyright Floe Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Structured identifier types.
//!
//! The canonical string forms defined here are persisted and compared as
//! text at system boundaries, so they must be stable: a change to either
//! the FQN or URN rendering is a breaking change.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::kind::ResourceKind;
use crate::resource::Resource;

/// A fully-qualified resource name.
///
/// The name and any database/schema qualifiers are canonicalized to
/// uppercase at construction; equality and hashing are over the
/// canonicalized tuple. The canonical string form is
/// `[database.][schema.]NAME[(arg_types)][?key=value&...]`, with parameters
/// rendered in ascending key order (keys are lowercased; the map is
/// ordered, so rendering is deterministic).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fqn {
    /// The resource's own name.
    pub name: String,
    /// The enclosing database, if any.
    pub database: Option<String>,
    /// The enclosing schema, if any.
    pub schema: Option<String>,
    /// Argument types, for callable resources.
    pub arg_types: Option<Vec<String>>,
    /// Name-level parameters.
    pub params: BTreeMap<String, String>,
}

impl Fqn {
    /// Creates an unqualified FQN.
    pub fn new(name: &str) -> Fqn {
        Fqn {
            name: name.to_uppercase(),
            database: None,
            schema: None,
            arg_types: None,
            params: BTreeMap::new(),
        }
    }

    /// Attaches a database qualifier.
    pub fn in_database(mut self, database: &str) -> Fqn {
        self.database = Some(database.to_uppercase());
        self
    }

    /// Attaches a schema qualifier.
    pub fn in_schema(mut self, schema: &str) -> Fqn {
        self.schema = Some(schema.to_uppercase());
        self
    }

    /// Attaches argument types for a callable resource.
    pub fn with_arg_types(mut self, arg_types: Vec<String>) -> Fqn {
        self.arg_types = Some(arg_types);
        self
    }

    /// Attaches a name-level parameter. Keys are lowercased.
    pub fn with_param(mut self, key: &str, value: &str) -> Fqn {
        self.params.insert(key.to_lowercase(), value.to_string());
        self
    }

    /// Parses a dotted identifier with between one and three components:
    /// `name`, `database.name`, or `database.schema.name`.
    pub fn parse(s: &str) -> Result<Fqn, ModelError> {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.iter().any(|part| part.is_empty()) {
            return Err(ModelError::MisqualifiedName(s.to_string()));
        }
        match parts.as_slice() {
            [name] => Ok(Fqn::new(name)),
            [database, name] => Ok(Fqn::new(name).in_database(database)),
            [database, schema, name] => {
                Ok(Fqn::new(name).in_database(database).in_schema(schema))
            }
            _ => Err(ModelError::MisqualifiedName(s.to_string())),
        }
    }
}

impl fmt::Display for Fqn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(database) = &self.database {
            write!(f, "{}.", database)?;
        }
        if let Some(schema) = &self.schema {
            write!(f, "{}.", schema)?;
        }
        f.write_str(&self.name)?;
        if let Some(arg_types) = &self.arg_types {
            write!(f, "({})", arg_types.join(", "))?;
        }
        if !self.params.is_empty() {
            let mut sep = '?';
            for (key, value) in &self.params {
                write!(f, "{}{}={}", sep, key, value)?;
                sep = '&';
            }
        }
        Ok(())
    }
}

/// A universal resource name.
///
/// A URN uniquely addresses one resource within an organization:
///
/// ```text
///                      Resource
///               Account  kind          Resource
///           Org     │     │             name
///         ───┴── ───┴── ──┴──        ────┴────
///     urn:ABC123:XYZ987:table/db.sch.sometable
///                             ───┬─────────────
///                           Fully-qualified name
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Urn {
    kind: ResourceKind,
    fqn: Fqn,
    account_locator: String,
    organization: String,
}

impl Urn {
    /// Constructs a URN. The organization defaults to the empty string.
    pub fn new(kind: ResourceKind, fqn: Fqn, account_locator: &str) -> Urn {
        Urn {
            kind,
            fqn,
            account_locator: account_locator.to_string(),
            organization: String::new(),
        }
    }

    /// Constructs the account-kind URN for an account.
    pub fn account(account_name: &str, account_locator: &str) -> Urn {
        Urn::new(
            ResourceKind::Account,
            Fqn::new(account_name),
            account_locator,
        )
    }

    /// Constructs the URN that addresses `resource`.
    ///
    /// Fails if the resource's scope requires enclosing identifier levels
    /// its FQN does not carry.
    pub fn from_resource(resource: &Resource, account_locator: &str) -> Result<Urn, ModelError> {
        resource.urn(account_locator)
    }

    /// Sets the organization component.
    pub fn in_organization(mut self, organization: &str) -> Urn {
        self.organization = organization.to_string();
        self
    }

    /// The resource kind this URN addresses.
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// The fully-qualified name this URN addresses.
    pub fn fqn(&self) -> &Fqn {
        &self.fqn
    }

    /// The account locator component.
    pub fn account_locator(&self) -> &str {
        &self.account_locator
    }

    /// Projects the URN of the enclosing database.
    ///
    /// This is a read-only projection: it constructs a *new* URN of kind
    /// DATABASE and never fabricates a value, failing if the FQN has no
    /// database component.
    pub fn database(&self) -> Result<Urn, ModelError> {
        match &self.fqn.database {
            Some(database) => Ok(Urn::new(
                ResourceKind::Database,
                Fqn::new(database),
                &self.account_locator,
            )),
            None => Err(ModelError::MissingScope {
                name: self.to_string(),
                level: "database",
            }),
        }
    }

    /// Projects the URN of the enclosing schema.
    ///
    /// Like [`Urn::database`], but for the schema level; the projected FQN
    /// keeps the database qualifier.
    pub fn schema(&self) -> Result<Urn, ModelError> {
        match &self.fqn.schema {
            Some(schema) => {
                let mut fqn = Fqn::new(schema);
                fqn.database = self.fqn.database.clone();
                Ok(Urn::new(ResourceKind::Schema, fqn, &self.account_locator))
            }
            None => Err(ModelError::MissingScope {
                name: self.to_string(),
                level: "schema",
            }),
        }
    }
}

impl fmt::Display for Urn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "urn:{}:{}:{}/{}",
            self.organization,
            self.account_locator,
            self.kind.label(),
            self.fqn
        )
    }
}

/// A resource locator: a small query language for addressing one resource,
/// all resources of a kind, or every resource in an account.
///
/// The grammar is `*` (every resource of every kind) or `kind:pattern`,
/// where the pattern may itself be `*` or end in `.*` to mean "all
/// children under this scope". A locator is a pure value — matching it
/// against a live resource set is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceLocator {
    /// The kind being addressed.
    pub kind: String,
    /// The name pattern.
    pub pattern: String,
}

impl ResourceLocator {
    /// Constructs a locator from its parts.
    pub fn new(kind: &str, pattern: &str) -> ResourceLocator {
        ResourceLocator {
            kind: kind.to_string(),
            pattern: pattern.to_string(),
        }
    }

    /// Reports whether the pattern is the bare wildcard.
    pub fn is_star(&self) -> bool {
        self.pattern == "*"
    }
}

impl FromStr for ResourceLocator {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<ResourceLocator, ModelError> {
        if s == "*" {
            return Ok(ResourceLocator::new("account", "*"));
        }
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [kind, pattern] if !kind.is_empty() => Ok(ResourceLocator::new(kind, pattern)),
            _ => Err(ModelError::InvalidLocatorSyntax(s.to_string())),
        }
    }
}

impl fmt::Display for ResourceLocator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fqn_canonicalization() {
        let fqn = Fqn::new("tbl").in_database("mydb");
        assert_eq!(fqn.name, "TBL");
        assert_eq!(fqn.to_string(), "MYDB.TBL");
    }

    #[test]
    fn test_fqn_args_and_params() {
        let fqn = Fqn::new("fn")
            .in_database("db")
            .in_schema("sch")
            .with_arg_types(vec!["VARCHAR".into(), "NUMBER".into()])
            .with_param("Secure", "true")
            .with_param("language", "sql");
        assert_eq!(
            fqn.to_string(),
            "DB.SCH.FN(VARCHAR, NUMBER)?language=sql&secure=true"
        );
    }

    #[test]
    fn test_fqn_parse() {
        assert_eq!(Fqn::parse("tbl").unwrap(), Fqn::new("tbl"));
        assert_eq!(
            Fqn::parse("mydb.tbl").unwrap(),
            Fqn::new("tbl").in_database("mydb")
        );
        assert_eq!(
            Fqn::parse("mydb.sch.tbl").unwrap(),
            Fqn::new("tbl").in_database("mydb").in_schema("sch")
        );
        assert_eq!(
            Fqn::parse("a.b.c.d").unwrap_err(),
            ModelError::MisqualifiedName("a.b.c.d".to_string())
        );
        assert!(Fqn::parse("db..tbl").is_err());
    }

    #[test]
    fn test_urn_string_form() {
        let urn = Urn::new(
            ResourceKind::Table,
            Fqn::new("t").in_database("d").in_schema("s"),
            "XYZ987",
        );
        assert_eq!(urn.to_string(), "urn::XYZ987:table/D.S.T");
        let org = urn.clone().in_organization("ABC123");
        assert_eq!(org.to_string(), "urn:ABC123:XYZ987:table/D.S.T");
    }

    #[test]
    fn test_urn_label_normalization() {
        let urn = Urn::new(
            ResourceKind::NotificationIntegration,
            Fqn::new("ni"),
            "XYZ987",
        );
        assert_eq!(urn.to_string(), "urn::XYZ987:notification_integration/NI");
    }

    #[test]
    fn test_urn_scope_projections() {
        let urn = Urn::new(
            ResourceKind::Table,
            Fqn::new("t").in_database("d").in_schema("s"),
            "XYZ987",
        );

        let database = urn.database().unwrap();
        assert_eq!(database.kind(), ResourceKind::Database);
        assert_eq!(database.fqn(), &Fqn::new("d"));

        let schema = urn.schema().unwrap();
        assert_eq!(schema.kind(), ResourceKind::Schema);
        assert_eq!(schema.fqn(), &Fqn::new("s").in_database("d"));
        assert_eq!(schema.to_string(), "urn::XYZ987:schema/D.S");
    }

    #[test]
    fn test_urn_missing_scope() {
        let urn = Urn::new(ResourceKind::Warehouse, Fqn::new("wh"), "XYZ987");
        assert_eq!(
            urn.schema(),
            Err(ModelError::MissingScope {
                name: "urn::XYZ987:warehouse/WH".into(),
                level: "schema",
            })
        );
        assert!(urn.database().is_err());
    }

    #[test]
    fn test_locator_parsing() {
        let all: ResourceLocator = "*".parse().unwrap();
        assert_eq!(all, ResourceLocator::new("account", "*"));
        assert!(all.is_star());

        let scoped: ResourceLocator = "database:mydb.*".parse().unwrap();
        assert_eq!(scoped.kind, "database");
        assert_eq!(scoped.pattern, "mydb.*");
        assert!(!scoped.is_star());

        assert_eq!(
            "mydb".parse::<ResourceLocator>().unwrap_err(),
            ModelError::InvalidLocatorSyntax("mydb".to_string())
        );
        assert!(":mydb".parse::<ResourceLocator>().is_err());
        assert!("a:b:c".parse::<ResourceLocator>().is_err());
    }

    #[test]
    fn test_identifier_serde_round_trip() {
        let urn = Urn::new(
            ResourceKind::Schema,
            Fqn::new("s").in_database("d"),
            "XYZ987",
        );
        let json = serde_json::to_string(&urn).unwrap();
        assert_eq!(serde_json::from_str::<Urn>(&json).unwrap(), urn);
    }
}
