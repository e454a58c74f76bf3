// Copyright Floe Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Privilege vocabularies.
//!
//! Each securable scope has its own closed privilege set; [`Privilege`]
//! is the sum of them, which is what grants and ACLs carry.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A privilege on a database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatabasePriv {
    CreateSchema,
    Monitor,
    Usage,
}

impl DatabasePriv {
    /// The privilege's DDL spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabasePriv::CreateSchema => "CREATE SCHEMA",
            DatabasePriv::Monitor => "MONITOR",
            DatabasePriv::Usage => "USAGE",
        }
    }
}

/// A privilege on a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchemaPriv {
    CreateAlert,
    CreateDynamicTable,
    CreateExternalTable,
    CreateFileFormat,
    CreateFunction,
    CreateMaskingPolicy,
    CreateMaterializedView,
    CreateNetworkRule,
    CreatePackagesPolicy,
    CreatePasswordPolicy,
    CreatePipe,
    CreateProcedure,
    CreateRowAccessPolicy,
    CreateSecret,
    CreateSequence,
    CreateSessionPolicy,
    CreateSnowflakeMlAnomalyDetection,
    CreateSnowflakeMlForecast,
    CreateStage,
    CreateStream,
    CreateTable,
    CreateTag,
    CreateTask,
    CreateView,
    Monitor,
    Usage,
}

impl SchemaPriv {
    /// The privilege's DDL spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaPriv::CreateAlert => "CREATE ALERT",
            SchemaPriv::CreateDynamicTable => "CREATE DYNAMIC TABLE",
            SchemaPriv::CreateExternalTable => "CREATE EXTERNAL TABLE",
            SchemaPriv::CreateFileFormat => "CREATE FILE FORMAT",
            SchemaPriv::CreateFunction => "CREATE FUNCTION",
            SchemaPriv::CreateMaskingPolicy => "CREATE MASKING POLICY",
            SchemaPriv::CreateMaterializedView => "CREATE MATERIALIZED VIEW",
            SchemaPriv::CreateNetworkRule => "CREATE NETWORK RULE",
            SchemaPriv::CreatePackagesPolicy => "CREATE PACKAGES POLICY",
            SchemaPriv::CreatePasswordPolicy => "CREATE PASSWORD POLICY",
            SchemaPriv::CreatePipe => "CREATE PIPE",
            SchemaPriv::CreateProcedure => "CREATE PROCEDURE",
            SchemaPriv::CreateRowAccessPolicy => "CREATE ROW ACCESS POLICY",
            SchemaPriv::CreateSecret => "CREATE SECRET",
            SchemaPriv::CreateSequence => "CREATE SEQUENCE",
            SchemaPriv::CreateSessionPolicy => "CREATE SESSION POLICY",
            SchemaPriv::CreateSnowflakeMlAnomalyDetection => {
                "CREATE SNOWFLAKE.ML.ANOMALY_DETECTION"
            }
            SchemaPriv::CreateSnowflakeMlForecast => "CREATE SNOWFLAKE.ML.FORECAST",
            SchemaPriv::CreateStage => "CREATE STAGE",
            SchemaPriv::CreateStream => "CREATE STREAM",
            SchemaPriv::CreateTable => "CREATE TABLE",
            SchemaPriv::CreateTag => "CREATE TAG",
            SchemaPriv::CreateTask => "CREATE TASK",
            SchemaPriv::CreateView => "CREATE VIEW",
            SchemaPriv::Monitor => "MONITOR",
            SchemaPriv::Usage => "USAGE",
        }
    }
}

/// A privilege on a warehouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarehousePriv {
    Monitor,
    Operate,
    Usage,
}

impl WarehousePriv {
    /// The privilege's DDL spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            WarehousePriv::Monitor => "MONITOR",
            WarehousePriv::Operate => "OPERATE",
            WarehousePriv::Usage => "USAGE",
        }
    }
}

/// Any privilege, tagged by the scope it applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Privilege {
    Database(DatabasePriv),
    Schema(SchemaPriv),
    Warehouse(WarehousePriv),
}

impl Privilege {
    /// The privilege's DDL spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Privilege::Database(p) => p.as_str(),
            Privilege::Schema(p) => p.as_str(),
            Privilege::Warehouse(p) => p.as_str(),
        }
    }
}

impl fmt::Display for Privilege {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<DatabasePriv> for Privilege {
    fn from(p: DatabasePriv) -> Privilege {
        Privilege::Database(p)
    }
}

impl From<SchemaPriv> for Privilege {
    fn from(p: SchemaPriv) -> Privilege {
        Privilege::Schema(p)
    }
}

impl From<WarehousePriv> for Privilege {
    fn from(p: WarehousePriv) -> Privilege {
        Privilege::Warehouse(p)
    }
}
