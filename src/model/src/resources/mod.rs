// Copyright Floe Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The concrete resource catalog.
//!
//! Each module declares one resource kind: a static
//! [`ResourceClass`](crate::resource::ResourceClass) registering the kind's
//! scope, statement shape, and property schema, plus a typed builder for
//! ergonomic construction. The generic engine in [`crate::resource`] does
//! the rest; nothing in these modules implements parsing or rendering.

pub mod column;
pub mod notification_integration;
pub mod packages_policy;
pub mod task;
pub mod warehouse;

use crate::kind::ResourceKind;
use crate::resource::ResourceClass;

/// Every registered resource class. [`Resource::from_sql`] resolves CREATE
/// statements against this table.
///
/// [`Resource::from_sql`]: crate::resource::Resource::from_sql
pub static CLASSES: &[&ResourceClass] = &[
    &column::COLUMN,
    &notification_integration::EMAIL_NOTIFICATION_INTEGRATION,
    &packages_policy::PACKAGES_POLICY,
    &task::TASK,
    &warehouse::WAREHOUSE,
];

/// Looks up the registered class for a kind.
pub fn class_for_kind(kind: ResourceKind) -> Option<&'static ResourceClass> {
    CLASSES.iter().copied().find(|class| class.kind == kind)
}
