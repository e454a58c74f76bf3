// Copyright Floe Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Notification integrations.
//!
//! ```text
//! CREATE [ OR REPLACE ] NOTIFICATION INTEGRATION [ IF NOT EXISTS ] <name>
//!   TYPE = EMAIL
//!   ENABLED = { TRUE | FALSE }
//!   ALLOWED_RECIPIENTS = ( '<email_address_1>' [ , ... ] )
//!   [ COMMENT = '<string_literal>' ]
//! ```

use std::collections::BTreeMap;

use floe_ddl::props::{Prop, Props};
use floe_ddl::value::Value;

use crate::error::ModelError;
use crate::identifiers::Fqn;
use crate::kind::ResourceKind;
use crate::resource::{Resource, ResourceClass, StatementShape};
use crate::scope::Scope;

/// The email notification integration class. `TYPE` is an enum with a
/// single member: the keyword is required, and `EMAIL` is the only value
/// the statement accepts.
pub static EMAIL_NOTIFICATION_INTEGRATION: ResourceClass = ResourceClass {
    kind: ResourceKind::NotificationIntegration,
    scope: Scope::Account,
    statement: StatementShape::Create {
        object: "NOTIFICATION INTEGRATION",
    },
    props: Props {
        leading_keyword: None,
        fields: &[
            ("type", Prop::enumeration("TYPE", &["EMAIL"])),
            ("enabled", Prop::boolean("ENABLED")),
            (
                "allowed_recipients",
                Prop::string_list("ALLOWED_RECIPIENTS", true),
            ),
            ("comment", Prop::string("COMMENT")),
        ],
    },
};

/// A typed email notification integration builder.
#[derive(Debug, Clone, Default)]
pub struct EmailNotificationIntegration {
    pub name: String,
    pub enabled: bool,
    pub allowed_recipients: Vec<String>,
    pub comment: Option<String>,
}

impl EmailNotificationIntegration {
    /// Creates a builder for an integration with the given name.
    pub fn new(name: &str) -> EmailNotificationIntegration {
        EmailNotificationIntegration {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Validates the builder into a [`Resource`].
    ///
    /// The recipient list must be non-empty: an email integration that can
    /// notify nobody is a configuration mistake, not a degenerate value.
    pub fn build(self) -> Result<Resource, ModelError> {
        if self.allowed_recipients.is_empty() {
            return Err(ModelError::SchemaValidation {
                field: "allowed_recipients".into(),
                message: "must not be empty".into(),
            });
        }
        let mut fields = BTreeMap::new();
        fields.insert("type".into(), Value::Ident("EMAIL".into()));
        fields.insert("enabled".into(), Value::Boolean(self.enabled));
        fields.insert(
            "allowed_recipients".into(),
            Value::List(self.allowed_recipients),
        );
        if let Some(v) = self.comment {
            fields.insert("comment".into(), Value::String(v));
        }
        Resource::new(&EMAIL_NOTIFICATION_INTEGRATION, Fqn::new(&self.name), fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let integration = EmailNotificationIntegration {
            enabled: true,
            allowed_recipients: vec!["oncall@example.com".into()],
            ..EmailNotificationIntegration::new("pager")
        }
        .build()
        .unwrap();
        assert_eq!(
            integration.to_sql(),
            "CREATE NOTIFICATION INTEGRATION PAGER TYPE = EMAIL ENABLED = TRUE \
             ALLOWED_RECIPIENTS = ('oncall@example.com')"
        );
    }

    #[test]
    fn test_empty_recipients_rejected() {
        let err = EmailNotificationIntegration::new("pager").build().unwrap_err();
        assert_eq!(
            err,
            ModelError::SchemaValidation {
                field: "allowed_recipients".into(),
                message: "must not be empty".into(),
            }
        );
    }

    #[test]
    fn test_single_member_enum() {
        let parsed = Resource::from_sql(
            "CREATE NOTIFICATION INTEGRATION NI TYPE = email ENABLED = FALSE \
             ALLOWED_RECIPIENTS = ('a@example.com', 'b@example.com')",
        )
        .unwrap();
        assert_eq!(parsed.field("type"), Some(&Value::Ident("EMAIL".into())));

        let err = Resource::from_sql("CREATE NOTIFICATION INTEGRATION NI TYPE = QUEUE")
            .unwrap_err();
        assert!(err.to_string().contains("invalid TYPE value QUEUE"));
    }

    #[test]
    fn test_round_trip() {
        let built = EmailNotificationIntegration {
            enabled: false,
            allowed_recipients: vec!["a@example.com".into(), "b@example.com".into()],
            comment: Some("paging".into()),
            ..EmailNotificationIntegration::new("pager")
        }
        .build()
        .unwrap();
        let parsed = Resource::from_sql(&built.to_sql()).unwrap();
        assert_eq!(parsed, built);
        assert_eq!(parsed.to_sql(), built.to_sql());
    }
}
