// Copyright Floe Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Warehouses.
//!
//! ```text
//! CREATE [ OR REPLACE ] WAREHOUSE [ IF NOT EXISTS ] <name>
//!     [ [ WITH ] objectProperties ]
//!     [ objectParams ]
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

/// The warehouse type members.
pub const WAREHOUSE_TYPES: &[&str] = &["STANDARD", "SNOWPARK-OPTIMIZED"];

/// The warehouse size members.
pub const WAREHOUSE_SIZES: &[&str] = &[
    "XSMALL", "SMALL", "MEDIUM", "LARGE", "XLARGE", "XXLARGE", "XXXLARGE", "X4LARGE", "X5LARGE",
    "X6LARGE",
];

/// The scaling policy members.
pub const SCALING_POLICIES: &[&str] = &["STANDARD", "ECONOMY"];

/// A warehouse's compute type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarehouseType {
    Standard,
    SnowparkOptimized,
}

impl WarehouseType {
    /// The member's DDL spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            WarehouseType::Standard => "STANDARD",
            WarehouseType::SnowparkOptimized => "SNOWPARK-OPTIMIZED",
        }
    }
}

impl fmt::Display for WarehouseType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A warehouse's size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WarehouseSize {
    XSmall,
    Small,
    Medium,
    Large,
    XLarge,
    XxLarge,
    XxxLarge,
    X4Large,
    X5Large,
    X6Large,
}

impl WarehouseSize {
    /// The member's DDL spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            WarehouseSize::XSmall => "XSMALL",
            WarehouseSize::Small => "SMALL",
            WarehouseSize::Medium => "MEDIUM",
            WarehouseSize::Large => "LARGE",
            WarehouseSize::XLarge => "XLARGE",
            WarehouseSize::XxLarge => "XXLARGE",
            WarehouseSize::XxxLarge => "XXXLARGE",
            WarehouseSize::X4Large => "X4LARGE",
            WarehouseSize::X5Large => "X5LARGE",
            WarehouseSize::X6Large => "X6LARGE",
        }
    }
}

impl fmt::Display for WarehouseSize {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A multi-cluster warehouse's scaling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarehouseScalingPolicy {
    Standard,
    Economy,
}

impl WarehouseScalingPolicy {
    /// The member's DDL spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            WarehouseScalingPolicy::Standard => "STANDARD",
            WarehouseScalingPolicy::Economy => "ECONOMY",
        }
    }
}

impl fmt::Display for WarehouseScalingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The warehouse class.
pub static WAREHOUSE: ResourceClass = ResourceClass {
    kind: ResourceKind::Warehouse,
    scope: Scope::Account,
    statement: StatementShape::Create {
        object: "WAREHOUSE",
    },
    props: Props {
        leading_keyword: Some("WITH"),
        fields: &[
            (
                "warehouse_type",
                Prop::enumeration("WAREHOUSE_TYPE", WAREHOUSE_TYPES),
            ),
            (
                "warehouse_size",
                Prop::enumeration("WAREHOUSE_SIZE", WAREHOUSE_SIZES),
            ),
            ("max_cluster_count", Prop::int("MAX_CLUSTER_COUNT")),
            ("min_cluster_count", Prop::int("MIN_CLUSTER_COUNT")),
            (
                "scaling_policy",
                Prop::enumeration("SCALING_POLICY", SCALING_POLICIES),
            ),
            ("auto_suspend", Prop::int("AUTO_SUSPEND").or_alt(&["NULL"])),
            ("auto_resume", Prop::boolean("AUTO_RESUME")),
            ("initially_suspended", Prop::boolean("INITIALLY_SUSPENDED")),
            ("resource_monitor", Prop::ident("RESOURCE_MONITOR")),
            ("comment", Prop::string("COMMENT")),
            (
                "enable_query_acceleration",
                Prop::boolean("ENABLE_QUERY_ACCELERATION"),
            ),
            (
                "query_acceleration_max_scale_factor",
                Prop::int("QUERY_ACCELERATION_MAX_SCALE_FACTOR"),
            ),
            ("max_concurrency_level", Prop::int("MAX_CONCURRENCY_LEVEL")),
            (
                "statement_queued_timeout_in_seconds",
                Prop::int("STATEMENT_QUEUED_TIMEOUT_IN_SECONDS"),
            ),
            (
                "statement_timeout_in_seconds",
                Prop::int("STATEMENT_TIMEOUT_IN_SECONDS"),
            ),
            ("tags", Prop::tags()),
        ],
    },
};

/// A typed warehouse builder. Unset fields are omitted from the record and
/// therefore from the rendered DDL.
#[derive(Debug, Clone, Default)]
pub struct Warehouse {
    pub name: String,
    pub warehouse_type: Option<WarehouseType>,
    pub warehouse_size: Option<WarehouseSize>,
    pub max_cluster_count: Option<i64>,
    pub min_cluster_count: Option<i64>,
    pub scaling_policy: Option<WarehouseScalingPolicy>,
    pub auto_suspend: Option<i64>,
    pub auto_resume: Option<bool>,
    pub initially_suspended: Option<bool>,
    pub resource_monitor: Option<String>,
    pub comment: Option<String>,
    pub enable_query_acceleration: Option<bool>,
    pub query_acceleration_max_scale_factor: Option<i64>,
    pub max_concurrency_level: Option<i64>,
    pub statement_queued_timeout_in_seconds: Option<i64>,
    pub statement_timeout_in_seconds: Option<i64>,
    pub tags: Option<Vec<(String, String)>>,
}

impl Warehouse {
    /// Creates a builder for a warehouse with the given name.
    pub fn new(name: &str) -> Warehouse {
        Warehouse {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Validates the builder into a [`Resource`].
    pub fn build(self) -> Result<Resource, ModelError> {
        let mut fields = BTreeMap::new();
        if let Some(v) = self.warehouse_type {
            fields.insert("warehouse_type".into(), Value::Ident(v.as_str().into()));
        }
        if let Some(v) = self.warehouse_size {
            fields.insert("warehouse_size".into(), Value::Ident(v.as_str().into()));
        }
        if let Some(v) = self.max_cluster_count {
            fields.insert("max_cluster_count".into(), Value::Number(v));
        }
        if let Some(v) = self.min_cluster_count {
            fields.insert("min_cluster_count".into(), Value::Number(v));
        }
        if let Some(v) = self.scaling_policy {
            fields.insert("scaling_policy".into(), Value::Ident(v.as_str().into()));
        }
        if let Some(v) = self.auto_suspend {
            fields.insert("auto_suspend".into(), Value::Number(v));
        }
        if let Some(v) = self.auto_resume {
            fields.insert("auto_resume".into(), Value::Boolean(v));
        }
        if let Some(v) = self.initially_suspended {
            fields.insert("initially_suspended".into(), Value::Boolean(v));
        }
        if let Some(v) = self.resource_monitor {
            fields.insert("resource_monitor".into(), Value::Ident(v));
        }
        if let Some(v) = self.comment {
            fields.insert("comment".into(), Value::String(v));
        }
        if let Some(v) = self.enable_query_acceleration {
            fields.insert("enable_query_acceleration".into(), Value::Boolean(v));
        }
        if let Some(v) = self.query_acceleration_max_scale_factor {
            fields.insert(
                "query_acceleration_max_scale_factor".into(),
                Value::Number(v),
            );
        }
        if let Some(v) = self.max_concurrency_level {
            fields.insert("max_concurrency_level".into(), Value::Number(v));
        }
        if let Some(v) = self.statement_queued_timeout_in_seconds {
            fields.insert(
                "statement_queued_timeout_in_seconds".into(),
                Value::Number(v),
            );
        }
        if let Some(v) = self.statement_timeout_in_seconds {
            fields.insert("statement_timeout_in_seconds".into(), Value::Number(v));
        }
        if let Some(v) = self.tags {
            fields.insert("tags".into(), Value::Map(v));
        }
        Resource::new(&WAREHOUSE, Fqn::new(&self.name), fields)
    }
}
