// Copyright Floe Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Access-control statements and their expansion into grants.

use itertools::iproduct;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::identifiers::ResourceLocator;
use crate::privilege::Privilege;
use crate::resource::ResourcePointer;

/// The grantee of a privilege.
///
/// A bare string stays an opaque role/user reference; a structured role
/// reference is stored as such, never coerced to a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Principal {
    /// An opaque role or user name.
    Name(String),
    /// A structured role reference.
    Role(ResourcePointer),
}

/// The object a grant applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrantOn {
    /// A concrete object.
    Object(ResourcePointer),
    /// A role.
    Role(String),
    /// Future objects matching a scope pattern not yet created.
    Future(ResourceLocator),
}

/// An atomic access-control fact: one privilege for one principal on one
/// target. Grants are produced by [`Acl::expand`] or constructed directly,
/// and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grant {
    /// The granted privilege.
    pub privilege: Privilege,
    /// Who receives it.
    pub principal: Principal,
    /// What it applies to.
    pub on: GrantOn,
}

impl Grant {
    /// A grant on a concrete object.
    pub fn on_object(
        privilege: impl Into<Privilege>,
        principal: Principal,
        object: ResourcePointer,
    ) -> Grant {
        Grant {
            privilege: privilege.into(),
            principal,
            on: GrantOn::Object(object),
        }
    }

    /// A grant on a role.
    pub fn on_role(privilege: impl Into<Privilege>, principal: Principal, role: &str) -> Grant {
        Grant {
            privilege: privilege.into(),
            principal,
            on: GrantOn::Role(role.to_string()),
        }
    }

    /// A future grant: the privilege applies to objects matching `scope`
    /// as they come into existence.
    pub fn future(
        privilege: impl Into<Privilege>,
        principal: Principal,
        scope: ResourceLocator,
    ) -> Grant {
        Grant {
            privilege: privilege.into(),
            principal,
            on: GrantOn::Future(scope),
        }
    }
}

/// The grantee of a role-membership edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleGrantee {
    /// Membership granted to another role.
    Role(String),
    /// Membership granted to a user.
    User(String),
}

/// A role-membership edge: `role` granted to a role or user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleGrant {
    /// The role being granted.
    pub role: String,
    /// Who receives it.
    pub to: RoleGrantee,
}

impl RoleGrant {
    /// Grants `role` to another role.
    pub fn to_role(role: &str, grantee: &str) -> RoleGrant {
        RoleGrant {
            role: role.to_string(),
            to: RoleGrantee::Role(grantee.to_string()),
        }
    }

    /// Grants `role` to a user.
    pub fn to_user(role: &str, user: &str) -> RoleGrant {
        RoleGrant {
            role: role.to_string(),
            to: RoleGrantee::User(user.to_string()),
        }
    }
}

/// A resource reference in an ACL: either a concrete pointer or a locator
/// pattern addressing objects not yet created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceRef {
    /// A concrete object reference.
    Pointer(ResourcePointer),
    /// A scope pattern.
    Pattern(ResourceLocator),
}

/// A high-level access statement: a set of privileges, for a list of
/// principals, over a list of resources.
///
/// An ACL exists only as expansion input; [`Acl::expand`] turns it into
/// atomic grants and the ACL is discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acl {
    privileges: Vec<Privilege>,
    principals: Vec<Principal>,
    resources: Vec<ResourceRef>,
}

impl Acl {
    /// Constructs an ACL. Each of the three lists must be non-empty.
    pub fn new(
        privileges: Vec<Privilege>,
        principals: Vec<Principal>,
        resources: Vec<ResourceRef>,
    ) -> Result<Acl, ModelError> {
        let empty = |field: &str| ModelError::SchemaValidation {
            field: field.to_string(),
            message: "must not be empty".to_string(),
        };
        if privileges.is_empty() {
            return Err(empty("privileges"));
        }
        if principals.is_empty() {
            return Err(empty("principals"));
        }
        if resources.is_empty() {
            return Err(empty("resources"));
        }
        Ok(Acl {
            privileges,
            principals,
            resources,
        })
    }

    /// Expands the ACL into the full cartesian product of its parts, in
    /// privilege-major, principal-second, resource-minor order.
    ///
    /// Expansion is pure, order-preserving, and count-preserving: the
    /// output length is always |privileges| × |principals| × |resources|,
    /// and duplicate inputs yield duplicate grants. No deduplication is
    /// performed.
    pub fn expand(&self) -> Vec<Grant> {
        iproduct!(&self.privileges, &self.principals, &self.resources)
            .map(|(privilege, principal, resource)| Grant {
                privilege: *privilege,
                principal: principal.clone(),
                on: match resource {
                    ResourceRef::Pointer(pointer) => GrantOn::Object(pointer.clone()),
                    ResourceRef::Pattern(locator) => GrantOn::Future(locator.clone()),
                },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::ResourceKind;
    use crate::privilege::{DatabasePriv, WarehousePriv};

    fn pointer(kind: ResourceKind, name: &str) -> ResourcePointer {
        ResourcePointer::new(kind, name).unwrap()
    }

    #[test]
    fn test_expansion_cardinality_and_order() {
        let acl = Acl::new(
            vec![
                DatabasePriv::Usage.into(),
                DatabasePriv::Monitor.into(),
            ],
            vec![
                Principal::Name("analyst".into()),
                Principal::Name("loader".into()),
                Principal::Name("admin".into()),
            ],
            vec![ResourceRef::Pointer(pointer(
                ResourceKind::Database,
                "analytics",
            ))],
        )
        .unwrap();

        let grants = acl.expand();
        assert_eq!(grants.len(), 6);

        // Privilege-major, principal-second.
        let order: Vec<(Privilege, Principal)> = grants
            .iter()
            .map(|g| (g.privilege, g.principal.clone()))
            .collect();
        assert_eq!(
            order,
            vec![
                (DatabasePriv::Usage.into(), Principal::Name("analyst".into())),
                (DatabasePriv::Usage.into(), Principal::Name("loader".into())),
                (DatabasePriv::Usage.into(), Principal::Name("admin".into())),
                (DatabasePriv::Monitor.into(), Principal::Name("analyst".into())),
                (DatabasePriv::Monitor.into(), Principal::Name("loader".into())),
                (DatabasePriv::Monitor.into(), Principal::Name("admin".into())),
            ]
        );
    }

    #[test]
    fn test_duplicate_principals_are_not_deduplicated() {
        let acl = Acl::new(
            vec![WarehousePriv::Usage.into()],
            vec![
                Principal::Name("analyst".into()),
                Principal::Name("analyst".into()),
            ],
            vec![ResourceRef::Pointer(pointer(
                ResourceKind::Warehouse,
                "wh",
            ))],
        )
        .unwrap();

        let grants = acl.expand();
        assert_eq!(grants.len(), 2);
        assert_eq!(grants[0], grants[1]);
    }

    #[test]
    fn test_patterns_expand_to_future_grants() {
        let acl = Acl::new(
            vec![DatabasePriv::Usage.into()],
            vec![Principal::Name("analyst".into())],
            vec![
                ResourceRef::Pointer(pointer(ResourceKind::Database, "analytics")),
                ResourceRef::Pattern("schema:analytics.*".parse().unwrap()),
            ],
        )
        .unwrap();

        let grants = acl.expand();
        assert_eq!(grants.len(), 2);
        assert!(matches!(grants[0].on, GrantOn::Object(_)));
        match &grants[1].on {
            GrantOn::Future(locator) => {
                assert_eq!(locator.kind, "schema");
                assert_eq!(locator.pattern, "analytics.*");
            }
            other => panic!("expected a future grant, got {:?}", other),
        }
    }

    #[test]
    fn test_structured_role_references_kept_as_such() {
        let role = pointer(ResourceKind::Role, "dataeng");
        let acl = Acl::new(
            vec![WarehousePriv::Operate.into()],
            vec![
                Principal::Name("ANALYTICS".into()),
                Principal::Role(role.clone()),
            ],
            vec![ResourceRef::Pointer(pointer(ResourceKind::Warehouse, "wh"))],
        )
        .unwrap();

        let grants = acl.expand();
        assert_eq!(grants[0].principal, Principal::Name("ANALYTICS".into()));
        assert_eq!(grants[1].principal, Principal::Role(role));
    }

    #[test]
    fn test_empty_lists_rejected() {
        assert!(Acl::new(
            vec![],
            vec![Principal::Name("r".into())],
            vec![ResourceRef::Pattern("*".parse().unwrap())],
        )
        .is_err());
    }
}
