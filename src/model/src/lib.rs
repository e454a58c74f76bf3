// Copyright Floe Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The Floe resource model.
//!
//! This crate defines what a database-platform resource *is*: a kind tag, a
//! scope, and a structured field record validated against the kind's
//! property schema. Each kind registers a static [`resource::ResourceClass`]
//! and a single generic engine renders any resource to canonical DDL text
//! and reconstructs resources from DDL text, via the grammar machinery in
//! `floe-ddl`.
//!
//! On top of the resource model sit the addressing layer — fully-qualified
//! names ([`Fqn`]), universal resource names ([`Urn`]), and the
//! [`ResourceLocator`] pattern micro-language — and the access-control
//! layer, which expands [`acl::Acl`] statements into atomic
//! [`acl::Grant`] records.

pub mod acl;
pub mod error;
pub mod identifiers;
pub mod kind;
pub mod privilege;
pub mod resource;
pub mod resources;
pub mod scope;

pub use error::ModelError;
pub use identifiers::{Fqn, ResourceLocator, Urn};
pub use kind::ResourceKind;
pub use resource::{Resource, ResourcePointer};
