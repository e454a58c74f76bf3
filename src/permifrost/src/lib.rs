// Copyright Floe Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Imports permifrost permission configs.
//!
//! Permifrost configs describe roles and users in YAML:
//!
//! ```yaml
//! roles:
//!   - analyst:
//!       warehouses:
//!         - analyst_wh
//!       member_of:
//!         - reporter
//!       privileges:
//!         databases:
//!           read:
//!             - analytics
//!         schemas:
//!           read:
//!             - analytics.reporting
//!             - raw.*
//! users:
//!   - alice:
//!       member_of:
//!         - analyst
//! ```
//!
//! [`parse_config`] translates such a document into resource pointers,
//! grants, role grants, and future grants, using only the public
//! `floe-model` constructors. Read/write shorthands expand to fixed
//! privilege bundles; a schema entry ending in `.*` becomes a future grant
//! over the named database's schemas.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};

use floe_model::acl::{Grant, Principal, RoleGrant};
use floe_model::identifiers::ResourceLocator;
use floe_model::kind::ResourceKind;
use floe_model::privilege::{DatabasePriv, SchemaPriv, WarehousePriv};
use floe_model::resource::ResourcePointer;

/// The privilege bundle behind a database `read` entry.
pub const DATABASE_READ_PRIVS: &[DatabasePriv] = &[DatabasePriv::Usage];

/// The privilege bundle behind a database `write` entry.
pub const DATABASE_WRITE_PRIVS: &[DatabasePriv] = &[
    DatabasePriv::Usage,
    DatabasePriv::Monitor,
    DatabasePriv::CreateSchema,
];

/// The privilege bundle behind a schema `read` entry.
pub const SCHEMA_READ_PRIVS: &[SchemaPriv] = &[SchemaPriv::Usage];

/// The privilege bundle behind a schema `write` entry.
pub const SCHEMA_WRITE_PRIVS: &[SchemaPriv] = &[
    SchemaPriv::Usage,
    SchemaPriv::Monitor,
    SchemaPriv::CreateAlert,
    SchemaPriv::CreateDynamicTable,
    SchemaPriv::CreateExternalTable,
    SchemaPriv::CreateFileFormat,
    SchemaPriv::CreateFunction,
    SchemaPriv::CreateMaskingPolicy,
    SchemaPriv::CreateMaterializedView,
    SchemaPriv::CreateNetworkRule,
    SchemaPriv::CreatePackagesPolicy,
    SchemaPriv::CreatePasswordPolicy,
    SchemaPriv::CreatePipe,
    SchemaPriv::CreateProcedure,
    SchemaPriv::CreateRowAccessPolicy,
    SchemaPriv::CreateSecret,
    SchemaPriv::CreateSequence,
    SchemaPriv::CreateSessionPolicy,
    SchemaPriv::CreateSnowflakeMlAnomalyDetection,
    SchemaPriv::CreateSnowflakeMlForecast,
    SchemaPriv::CreateStage,
    SchemaPriv::CreateStream,
    SchemaPriv::CreateTable,
    SchemaPriv::CreateTag,
    SchemaPriv::CreateTask,
    SchemaPriv::CreateView,
];

/// The privilege bundle behind a role's `warehouses` entry.
pub const WAREHOUSE_PRIVS: &[WarehousePriv] = &[
    WarehousePriv::Usage,
    WarehousePriv::Operate,
    WarehousePriv::Monitor,
];

#[derive(Debug, Deserialize)]
struct Config {
    #[serde(default)]
    #[allow(dead_code)]
    version: Option<serde_yaml::Value>,
    #[serde(default)]
    roles: Vec<BTreeMap<String, RoleConfig>>,
    #[serde(default)]
    users: Vec<BTreeMap<String, UserConfig>>,
    #[serde(default)]
    databases: Vec<serde_yaml::Value>,
    #[serde(default)]
    warehouses: Vec<serde_yaml::Value>,
    #[serde(default)]
    integrations: Vec<serde_yaml::Value>,
}

#[derive(Debug, Default, Deserialize)]
struct RoleConfig {
    #[serde(default)]
    warehouses: Vec<String>,
    #[serde(default)]
    member_of: Vec<String>,
    #[serde(default)]
    privileges: Privileges,
}

#[derive(Debug, Default, Deserialize)]
struct Privileges {
    #[serde(default)]
    databases: ReadWrite,
    #[serde(default)]
    schemas: ReadWrite,
}

#[derive(Debug, Default, Deserialize)]
struct ReadWrite {
    #[serde(default)]
    read: Vec<String>,
    #[serde(default)]
    write: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct UserConfig {
    #[serde(default)]
    member_of: Vec<String>,
}

/// One object produced by importing a config.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportedObject {
    /// A lightweight reference to a resource the config mentions.
    Pointer(ResourcePointer),
    /// A privilege grant (concrete or future).
    Grant(Grant),
    /// A role-membership edge.
    RoleGrant(RoleGrant),
}

/// Translates a permifrost YAML document into model objects.
pub fn parse_config(yaml: &str) -> Result<Vec<ImportedObject>> {
    let config: Config = serde_yaml::from_str(yaml).context("reading permifrost config")?;
    if !config.databases.is_empty() {
        warn!(
            entries = config.databases.len(),
            "ignoring top-level databases section; databases are imported via role privileges"
        );
    }
    if !config.warehouses.is_empty() {
        warn!(
            entries = config.warehouses.len(),
            "ignoring top-level warehouses section; warehouses are imported via role privileges"
        );
    }
    if !config.integrations.is_empty() {
        warn!(
            entries = config.integrations.len(),
            "ignoring integrations section"
        );
    }

    let mut objects = vec![];
    for entry in &config.roles {
        for (name, role) in entry {
            import_role(&mut objects, name, role)?;
        }
    }
    for entry in &config.users {
        for (name, user) in entry {
            import_user(&mut objects, name, user)?;
        }
    }
    debug!(objects = objects.len(), "imported permifrost config");
    Ok(objects)
}

fn import_role(objects: &mut Vec<ImportedObject>, name: &str, config: &RoleConfig) -> Result<()> {
    let role = ResourcePointer::new(ResourceKind::Role, name)?;
    objects.push(ImportedObject::Pointer(role.clone()));

    for warehouse in &config.warehouses {
        let pointer = ResourcePointer::new(ResourceKind::Warehouse, warehouse)?;
        objects.push(ImportedObject::Pointer(pointer.clone()));
        for privilege in WAREHOUSE_PRIVS {
            objects.push(ImportedObject::Grant(Grant::on_object(
                *privilege,
                Principal::Role(role.clone()),
                pointer.clone(),
            )));
        }
    }

    for parent in &config.member_of {
        objects.push(ImportedObject::RoleGrant(RoleGrant::to_role(name, parent)));
    }

    for (databases, privileges) in [
        (&config.privileges.databases.read, DATABASE_READ_PRIVS),
        (&config.privileges.databases.write, DATABASE_WRITE_PRIVS),
    ] {
        for database in databases {
            let pointer = ResourcePointer::new(ResourceKind::Database, database)?;
            objects.push(ImportedObject::Pointer(pointer.clone()));
            for privilege in privileges {
                objects.push(ImportedObject::Grant(Grant::on_object(
                    *privilege,
                    Principal::Role(role.clone()),
                    pointer.clone(),
                )));
            }
        }
    }

    for (schemas, privileges) in [
        (&config.privileges.schemas.read, SCHEMA_READ_PRIVS),
        (&config.privileges.schemas.write, SCHEMA_WRITE_PRIVS),
    ] {
        for schema in schemas {
            if schema.ends_with(".*") {
                // `db.*` addresses every schema the database will ever
                // contain, which is a future grant, not a grant on the
                // schemas that happen to exist.
                let scope = ResourceLocator::new("schema", schema);
                for privilege in privileges {
                    objects.push(ImportedObject::Grant(Grant::future(
                        *privilege,
                        Principal::Role(role.clone()),
                        scope.clone(),
                    )));
                }
            } else {
                let pointer = ResourcePointer::new(ResourceKind::Schema, schema)?;
                objects.push(ImportedObject::Pointer(pointer.clone()));
                for privilege in privileges {
                    objects.push(ImportedObject::Grant(Grant::on_object(
                        *privilege,
                        Principal::Role(role.clone()),
                        pointer.clone(),
                    )));
                }
            }
        }
    }

    Ok(())
}

fn import_user(objects: &mut Vec<ImportedObject>, name: &str, config: &UserConfig) -> Result<()> {
    objects.push(ImportedObject::Pointer(ResourcePointer::new(
        ResourceKind::User,
        name,
    )?));
    for role in &config.member_of {
        objects.push(ImportedObject::RoleGrant(RoleGrant::to_user(role, name)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use floe_model::acl::GrantOn;
    use floe_model::privilege::Privilege;

    const CONFIG: &str = r#"
version: "1.0"
roles:
  - analyst:
      warehouses:
        - analyst_wh
      member_of:
        - reporter
      privileges:
        databases:
          read:
            - analytics
        schemas:
          read:
            - analytics.reporting
            - raw.*
  - loader:
      privileges:
        databases:
          write:
            - raw
users:
  - alice:
      member_of:
        - analyst
"#;

    fn grants(objects: &[ImportedObject]) -> Vec<&Grant> {
        objects
            .iter()
            .filter_map(|o| match o {
                ImportedObject::Grant(g) => Some(g),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_import_counts() {
        let objects = parse_config(CONFIG).unwrap();
        assert_eq!(objects.len(), 18);
        assert_eq!(grants(&objects).len(), 9);
        assert_eq!(
            objects
                .iter()
                .filter(|o| matches!(o, ImportedObject::Pointer(_)))
                .count(),
            7
        );
        assert_eq!(
            objects
                .iter()
                .filter(|o| matches!(o, ImportedObject::RoleGrant(_)))
                .count(),
            2
        );
    }

    #[test]
    fn test_warehouse_bundle() {
        let objects = parse_config(CONFIG).unwrap();
        let analyst = ResourcePointer::new(ResourceKind::Role, "analyst").unwrap();
        let wh = ResourcePointer::new(ResourceKind::Warehouse, "analyst_wh").unwrap();
        let wh_grants: Vec<Privilege> = grants(&objects)
            .iter()
            .filter(|g| {
                g.principal == Principal::Role(analyst.clone())
                    && g.on == GrantOn::Object(wh.clone())
            })
            .map(|g| g.privilege)
            .collect();
        assert_eq!(
            wh_grants,
            vec![
                WarehousePriv::Usage.into(),
                WarehousePriv::Operate.into(),
                WarehousePriv::Monitor.into(),
            ]
        );
    }

    #[test]
    fn test_wildcard_schema_becomes_future_grant() {
        let objects = parse_config(CONFIG).unwrap();
        let future: Vec<&Grant> = grants(&objects)
            .into_iter()
            .filter(|g| matches!(g.on, GrantOn::Future(_)))
            .collect();
        assert_eq!(future.len(), 1);
        match &future[0].on {
            GrantOn::Future(locator) => {
                assert_eq!(locator.kind, "schema");
                assert_eq!(locator.pattern, "raw.*");
            }
            _ => unreachable!(),
        }
        assert_eq!(future[0].privilege, SchemaPriv::Usage.into());
    }

    #[test]
    fn test_membership_edges() {
        let objects = parse_config(CONFIG).unwrap();
        assert!(objects.contains(&ImportedObject::RoleGrant(RoleGrant::to_role(
            "analyst", "reporter"
        ))));
        assert!(objects.contains(&ImportedObject::RoleGrant(RoleGrant::to_user(
            "analyst", "alice"
        ))));
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        assert!(parse_config("roles: notalist").is_err());
    }

    #[test]
    fn test_empty_config() {
        assert_eq!(parse_config("{}").unwrap(), vec![]);
    }
}
