// Copyright Floe Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The closed set of resource kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// The kind of a platform resource.
///
/// This is a closed set: every kind the model knows about is a variant
/// here, so dispatching code (rendering, parsing, scope derivation) can be
/// checked for exhaustiveness. Strings enter through [`FromStr`], which
/// rejects anything outside the set.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ResourceKind {
    Account,
    Column,
    Database,
    FutureGrant,
    Grant,
    NotificationIntegration,
    PackagesPolicy,
    ResourceMonitor,
    Role,
    RoleGrant,
    Schema,
    Table,
    Tag,
    Task,
    User,
    Warehouse,
}

impl ResourceKind {
    /// The kind's DDL spelling: uppercase, multi-word kinds separated by
    /// spaces.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Account => "ACCOUNT",
            ResourceKind::Column => "COLUMN",
            ResourceKind::Database => "DATABASE",
            ResourceKind::FutureGrant => "FUTURE GRANT",
            ResourceKind::Grant => "GRANT",
            ResourceKind::NotificationIntegration => "NOTIFICATION INTEGRATION",
            ResourceKind::PackagesPolicy => "PACKAGES POLICY",
            ResourceKind::ResourceMonitor => "RESOURCE MONITOR",
            ResourceKind::Role => "ROLE",
            ResourceKind::RoleGrant => "ROLE GRANT",
            ResourceKind::Schema => "SCHEMA",
            ResourceKind::Table => "TABLE",
            ResourceKind::Tag => "TAG",
            ResourceKind::Task => "TASK",
            ResourceKind::User => "USER",
            ResourceKind::Warehouse => "WAREHOUSE",
        }
    }

    /// The kind's URN label: lowercase, spaces replaced by underscores.
    pub fn label(&self) -> String {
        self.as_str().to_lowercase().replace(' ', "_")
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = ModelError;

    /// Parses a kind name case-insensitively, accepting either spaces or
    /// underscores between words.
    fn from_str(s: &str) -> Result<ResourceKind, ModelError> {
        let normalized = s.to_uppercase().replace('_', " ");
        match normalized.as_str() {
            "ACCOUNT" => Ok(ResourceKind::Account),
            "COLUMN" => Ok(ResourceKind::Column),
            "DATABASE" => Ok(ResourceKind::Database),
            "FUTURE GRANT" => Ok(ResourceKind::FutureGrant),
            "GRANT" => Ok(ResourceKind::Grant),
            "NOTIFICATION INTEGRATION" => Ok(ResourceKind::NotificationIntegration),
            "PACKAGES POLICY" => Ok(ResourceKind::PackagesPolicy),
            "RESOURCE MONITOR" => Ok(ResourceKind::ResourceMonitor),
            "ROLE" => Ok(ResourceKind::Role),
            "ROLE GRANT" => Ok(ResourceKind::RoleGrant),
            "SCHEMA" => Ok(ResourceKind::Schema),
            "TABLE" => Ok(ResourceKind::Table),
            "TAG" => Ok(ResourceKind::Tag),
            "TASK" => Ok(ResourceKind::Task),
            "USER" => Ok(ResourceKind::User),
            "WAREHOUSE" => Ok(ResourceKind::Warehouse),
            _ => Err(ModelError::InvalidResourceKind(s.to_string())),
        }
    }
}
