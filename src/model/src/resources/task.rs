// Copyright Floe Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Tasks.

use std::collections::BTreeMap;

use floe_ddl::props::{Prop, Props};
use floe_ddl::value::Value;

use crate::error::ModelError;
use crate::identifiers::Fqn;
use crate::kind::ResourceKind;
use crate::resource::{Resource, ResourceClass, StatementShape};
use crate::resources::warehouse::{WarehouseSize, WAREHOUSE_SIZES};
use crate::scope::Scope;

/// The task class.
pub static TASK: ResourceClass = ResourceClass {
    kind: ResourceKind::Task,
    scope: Scope::Account,
    statement: StatementShape::Create { object: "TASK" },
    props: Props {
        leading_keyword: None,
        fields: &[
            ("warehouse", Prop::ident("WAREHOUSE")),
            (
                "user_task_managed_initial_warehouse_size",
                Prop::enumeration(
                    "USER_TASK_MANAGED_INITIAL_WAREHOUSE_SIZE",
                    WAREHOUSE_SIZES,
                ),
            ),
            ("schedule", Prop::string("SCHEDULE")),
            ("config", Prop::string("CONFIG")),
            (
                "allow_overlapping_execution",
                Prop::boolean("ALLOW_OVERLAPPING_EXECUTION"),
            ),
            ("user_task_timeout_ms", Prop::int("USER_TASK_TIMEOUT_MS")),
            (
                "suspend_task_after_num_failures",
                Prop::int("SUSPEND_TASK_AFTER_NUM_FAILURES"),
            ),
            ("error_integration", Prop::string("ERROR_INTEGRATION")),
            ("copy_grants", Prop::flag("COPY GRANTS")),
            ("comment", Prop::string("COMMENT")),
            ("after", Prop::string_list("AFTER", false).no_eq()),
        ],
    },
};

/// A typed task builder.
#[derive(Debug, Clone, Default)]
pub struct Task {
    pub name: String,
    pub warehouse: Option<String>,
    pub user_task_managed_initial_warehouse_size: Option<WarehouseSize>,
    pub schedule: Option<String>,
    pub config: Option<String>,
    pub allow_overlapping_execution: Option<bool>,
    pub user_task_timeout_ms: Option<i64>,
    pub suspend_task_after_num_failures: Option<i64>,
    pub error_integration: Option<String>,
    pub copy_grants: bool,
    pub comment: Option<String>,
    pub after: Option<Vec<String>>,
}

impl Task {
    /// Creates a builder for a task with the given name.
    pub fn new(name: &str) -> Task {
        Task {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Validates the builder into a [`Resource`].
    pub fn build(self) -> Result<Resource, ModelError> {
        let mut fields = BTreeMap::new();
        if let Some(v) = self.warehouse {
            fields.insert("warehouse".into(), Value::Ident(v));
        }
        if let Some(v) = self.user_task_managed_initial_warehouse_size {
            fields.insert(
                "user_task_managed_initial_warehouse_size".into(),
                Value::Ident(v.as_str().into()),
            );
        }
        if let Some(v) = self.schedule {
            fields.insert("schedule".into(), Value::String(v));
        }
        if let Some(v) = self.config {
            fields.insert("config".into(), Value::String(v));
        }
        if let Some(v) = self.allow_overlapping_execution {
            fields.insert("allow_overlapping_execution".into(), Value::Boolean(v));
        }
        if let Some(v) = self.user_task_timeout_ms {
            fields.insert("user_task_timeout_ms".into(), Value::Number(v));
        }
        if let Some(v) = self.suspend_task_after_num_failures {
            fields.insert("suspend_task_after_num_failures".into(), Value::Number(v));
        }
        if let Some(v) = self.error_integration {
            fields.insert("error_integration".into(), Value::String(v));
        }
        if self.copy_grants {
            fields.insert("copy_grants".into(), Value::Boolean(true));
        }
        if let Some(v) = self.comment {
            fields.insert("comment".into(), Value::String(v));
        }
        if let Some(v) = self.after {
            fields.insert("after".into(), Value::List(v));
        }
        Resource::new(&TASK, Fqn::new(&self.name), fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let task = Task {
            warehouse: Some("loader_wh".into()),
            schedule: Some("10 MINUTE".into()),
            copy_grants: true,
            after: Some(vec!["extract".into(), "stage".into()]),
            ..Task::new("transform")
        }
        .build()
        .unwrap();
        assert_eq!(
            task.to_sql(),
            "CREATE TASK TRANSFORM WAREHOUSE = loader_wh SCHEDULE = '10 MINUTE' \
             COPY GRANTS AFTER 'extract', 'stage'"
        );
    }

    #[test]
    fn test_round_trip() {
        let built = Task {
            user_task_managed_initial_warehouse_size: Some(WarehouseSize::Small),
            allow_overlapping_execution: Some(false),
            user_task_timeout_ms: Some(30000),
            suspend_task_after_num_failures: Some(3),
            comment: Some("hourly refresh".into()),
            ..Task::new("refresh")
        }
        .build()
        .unwrap();
        let parsed = Resource::from_sql(&built.to_sql()).unwrap();
        assert_eq!(parsed, built);
        assert_eq!(parsed.to_sql(), built.to_sql());
    }

    #[test]
    fn test_multi_word_flag() {
        let task = Resource::from_sql("CREATE TASK T COPY GRANTS").unwrap();
        assert_eq!(task.field("copy_grants"), Some(&Value::Boolean(true)));
    }
}
