// Copyright Floe Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The generic resource engine.
//!
//! Rather than a class hierarchy with one subclass per resource kind, each
//! kind registers a static [`ResourceClass`] — data, not behavior — and the
//! single [`Resource`] engine here validates, renders, and parses any
//! class. Concrete classes and their typed builders live in
//! [`crate::resources`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use floe_ddl::display::DdlFormatter;
use floe_ddl::lexer::Token;
use floe_ddl::parser::Cursor;
use floe_ddl::props::{PropKind, Props};
use floe_ddl::value::Value;
use floe_ore::str::StrExt;

use crate::error::ModelError;
use crate::identifiers::{Fqn, Urn};
use crate::kind::ResourceKind;
use crate::resources;
use crate::scope::Scope;

/// How a resource kind's statement places the subject name and any
/// positional fields before its keyword properties begin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementShape {
    /// `CREATE [OR REPLACE] <object> [IF NOT EXISTS] <name> ...`.
    Create {
        /// The statement's object phrase, e.g. `WAREHOUSE` or
        /// `PACKAGES POLICY`.
        object: &'static str,
    },
    /// A bare column definition: `<name> <data_type> ...`. The data type
    /// is a positional field named `data_type`.
    ColumnDef,
}

impl StatementShape {
    /// The positional field names this shape contributes to the record, in
    /// addition to the schema's keyword properties.
    fn positional_fields(&self) -> &'static [&'static str] {
        match self {
            StatementShape::Create { .. } => &[],
            StatementShape::ColumnDef => &["data_type"],
        }
    }
}

/// The static declaration of one resource kind: its kind tag, scope,
/// statement shape, and property schema.
#[derive(Debug, PartialEq, Eq)]
pub struct ResourceClass {
    /// The kind tag.
    pub kind: ResourceKind,
    /// The enclosing identifier levels resources of this kind require.
    pub scope: Scope,
    /// The statement shape.
    pub statement: StatementShape,
    /// The keyword-property schema.
    pub props: Props,
}

/// A concrete resource: a class plus a validated field record.
///
/// Resources are immutable value objects. They are created either by
/// direct construction ([`Resource::new`], which validates immediately and
/// fails fast) or by parsing DDL text ([`Resource::from_sql`], which feeds
/// the same validation path).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    class: &'static ResourceClass,
    fqn: Fqn,
    or_replace: bool,
    if_not_exists: bool,
    fields: BTreeMap<String, Value>,
}

impl Resource {
    /// Constructs a resource, validating every field against its
    /// descriptor.
    ///
    /// Enum-member fields are canonicalized to the member's declared
    /// spelling, so two resources constructed with differently-cased
    /// members compare equal.
    pub fn new(
        class: &'static ResourceClass,
        fqn: Fqn,
        fields: BTreeMap<String, Value>,
    ) -> Result<Resource, ModelError> {
        let fields = validate_fields(class, fields)?;
        Ok(Resource {
            class,
            fqn,
            or_replace: false,
            if_not_exists: false,
            fields,
        })
    }

    /// Marks the resource's statement with the `OR REPLACE` modifier.
    pub fn with_or_replace(mut self) -> Resource {
        self.or_replace = true;
        self
    }

    /// Marks the resource's statement with the `IF NOT EXISTS` modifier.
    pub fn with_if_not_exists(mut self) -> Resource {
        self.if_not_exists = true;
        self
    }

    /// Reconstructs a resource from DDL text.
    ///
    /// The statement skeleton determines the class: `CREATE ...` statements
    /// are resolved against the registered classes by their object phrase,
    /// and anything else is read as a bare column definition. Trailing
    /// text that matches no property is a hard parse failure, never
    /// silently dropped.
    pub fn from_sql(ddl: &str) -> Result<Resource, ModelError> {
        let mut cursor = Cursor::new(ddl)?;
        if cursor.consume_word("CREATE") {
            Resource::parse_create(&mut cursor)
        } else {
            Resource::parse_column(&mut cursor)
        }
    }

    fn parse_create(cursor: &mut Cursor) -> Result<Resource, ModelError> {
        let or_replace = cursor.consume_phrase("OR REPLACE");
        let class = resolve_create_class(cursor)?;
        let if_not_exists = cursor.consume_phrase("IF NOT EXISTS");
        let fqn = parse_qualified_name(cursor)?;
        let fields = class.props.parse(cursor)?;
        cursor.expect_end()?;
        let mut resource = Resource::new(class, fqn, fields)?;
        resource.or_replace = or_replace;
        resource.if_not_exists = if_not_exists;
        Ok(resource)
    }

    fn parse_column(cursor: &mut Cursor) -> Result<Resource, ModelError> {
        let class = &resources::column::COLUMN;
        let name = cursor.expect_ident("a column name")?;
        let data_type = parse_data_type(cursor)?;
        let mut fields = class.props.parse(cursor)?;
        cursor.expect_end()?;
        fields.insert("data_type".to_string(), Value::Ident(data_type));
        Resource::new(class, Fqn::new(&name), fields)
    }

    /// Renders the resource as canonical DDL text.
    pub fn to_sql(&self) -> String {
        let mut buf = String::new();
        let mut f = DdlFormatter::new(&mut buf);
        match self.class.statement {
            StatementShape::Create { object } => {
                f.write_str("CREATE ");
                if self.or_replace {
                    f.write_str("OR REPLACE ");
                }
                f.write_str(object);
                if self.if_not_exists {
                    f.write_str(" IF NOT EXISTS");
                }
                f.write_str(" ");
                f.write_str(&self.fqn);
            }
            StatementShape::ColumnDef => {
                f.write_str(&self.fqn.name);
                if let Some(Value::Ident(data_type)) = self.fields.get("data_type") {
                    f.write_str(" ");
                    f.write_str(data_type);
                }
            }
        }
        self.class.props.render(&mut f, &self.fields);
        buf
    }

    /// The resource's kind tag.
    pub fn kind(&self) -> ResourceKind {
        self.class.kind
    }

    /// The resource's scope.
    pub fn scope(&self) -> Scope {
        self.class.scope
    }

    /// The resource's fully-qualified name.
    pub fn fqn(&self) -> &Fqn {
        &self.fqn
    }

    /// Whether the statement carries the `OR REPLACE` modifier.
    pub fn or_replace(&self) -> bool {
        self.or_replace
    }

    /// Whether the statement carries the `IF NOT EXISTS` modifier.
    pub fn if_not_exists(&self) -> bool {
        self.if_not_exists
    }

    /// Looks up a field's value.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// The resource's full field record.
    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }

    /// Derives the URN that addresses this resource.
    ///
    /// Fails with a scope error if the class's scope requires enclosing
    /// identifier levels the FQN does not carry.
    pub fn urn(&self, account_locator: &str) -> Result<Urn, ModelError> {
        self.class.scope.check(&self.fqn)?;
        Ok(Urn::new(self.class.kind, self.fqn.clone(), account_locator))
    }
}

/// A lightweight, unresolved reference to a resource: a kind plus a name.
///
/// Pointers are what grants and adapters traffic in; they carry no field
/// record and are never validated against a schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourcePointer {
    /// The kind of the referenced resource.
    pub kind: ResourceKind,
    /// The referenced name, possibly qualified.
    pub fqn: Fqn,
}

impl ResourcePointer {
    /// Constructs a pointer from a kind and a dotted name.
    pub fn new(kind: ResourceKind, name: &str) -> Result<ResourcePointer, ModelError> {
        Ok(ResourcePointer {
            kind,
            fqn: Fqn::parse(name)?,
        })
    }
}

impl fmt::Display for ResourcePointer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.kind.label(), self.fqn)
    }
}

fn resolve_create_class(cursor: &mut Cursor) -> Result<&'static ResourceClass, ModelError> {
    // Longest object phrase first, so `PACKAGES POLICY` cannot lose to a
    // one-word prefix of itself.
    let mut candidates: Vec<(&'static str, &'static ResourceClass)> = resources::CLASSES
        .iter()
        .filter_map(|class| match class.statement {
            StatementShape::Create { object } => Some((object, *class)),
            StatementShape::ColumnDef => None,
        })
        .collect();
    candidates.sort_by_key(|(object, _)| std::cmp::Reverse(object.split(' ').count()));
    for (object, class) in candidates {
        if cursor.consume_phrase(object) {
            return Ok(class);
        }
    }
    Err(cursor
        .error(format!(
            "unrecognized CREATE statement: {}",
            cursor.remaining_text()
        ))
        .into())
}

fn parse_qualified_name(cursor: &mut Cursor) -> Result<Fqn, ModelError> {
    let mut parts = vec![cursor.expect_ident("a name")?];
    while cursor.consume_token(&Token::Dot) {
        parts.push(cursor.expect_ident("a name")?);
    }
    match parts.as_slice() {
        [name] => Ok(Fqn::new(name)),
        [database, name] => Ok(Fqn::new(name).in_database(database)),
        [database, schema, name] => Ok(Fqn::new(name).in_database(database).in_schema(schema)),
        _ => Err(ModelError::MisqualifiedName(parts.join("."))),
    }
}

fn parse_data_type(cursor: &mut Cursor) -> Result<String, ModelError> {
    let word = cursor.expect_ident("a data type")?;
    let mut data_type = word.to_uppercase();
    if cursor.consume_token(&Token::LParen) {
        let mut args = vec![];
        loop {
            let pos = cursor.pos();
            match cursor.next_token() {
                Some(Token::Number(n)) => args.push(n),
                _ => {
                    return Err(floe_ddl::parser::ParserError::new(
                        pos,
                        "expected a number in data type arguments",
                    )
                    .into())
                }
            }
            if cursor.consume_token(&Token::Comma) {
                continue;
            }
            cursor.expect_token(&Token::RParen)?;
            break;
        }
        data_type = format!("{}({})", data_type, args.join(","));
    }
    Ok(data_type)
}

fn validate_fields(
    class: &'static ResourceClass,
    fields: BTreeMap<String, Value>,
) -> Result<BTreeMap<String, Value>, ModelError> {
    let mut validated = BTreeMap::new();
    for (name, value) in fields {
        let value = if class.statement.positional_fields().contains(&name.as_str()) {
            match value {
                Value::Ident(_) => value,
                other => {
                    return Err(ModelError::SchemaValidation {
                        field: name,
                        message: format!("expected an identifier, not a {}", other.kind_name()),
                    })
                }
            }
        } else {
            let Some(prop) = class.props.prop(&name) else {
                return Err(ModelError::SchemaValidation {
                    field: name,
                    message: format!("not a field of {}", class.kind),
                });
            };
            validate_value(&name, prop.kind.clone(), prop.alt_tokens, value)?
        };
        validated.insert(name, value);
    }
    for positional in class.statement.positional_fields() {
        if !validated.contains_key(*positional) {
            return Err(ModelError::SchemaValidation {
                field: (*positional).to_string(),
                message: "required field is missing".to_string(),
            });
        }
    }
    Ok(validated)
}

fn validate_value(
    field: &str,
    kind: PropKind,
    alt_tokens: &[&str],
    value: Value,
) -> Result<Value, ModelError> {
    let mismatch = |expected: &str, value: &Value| ModelError::SchemaValidation {
        field: field.to_string(),
        message: format!("expected a {}, not a {}", expected, value.kind_name()),
    };
    if value == Value::Null {
        if alt_tokens.is_empty() {
            return Err(ModelError::SchemaValidation {
                field: field.to_string(),
                message: "does not accept an explicit NULL".to_string(),
            });
        }
        return Ok(value);
    }
    match (kind, value) {
        (PropKind::Flag, value @ Value::Boolean(_)) => Ok(value),
        (PropKind::Bool, value @ Value::Boolean(_)) => Ok(value),
        (PropKind::Int, value @ Value::Number(_)) => Ok(value),
        (PropKind::String, value @ Value::String(_)) => Ok(value),
        (PropKind::Ident, value @ Value::Ident(_)) => Ok(value),
        (PropKind::Enum { members }, Value::Ident(spelled)) => {
            match members.iter().find(|m| m.eq_ignore_ascii_case(&spelled)) {
                Some(member) => Ok(Value::Ident((*member).to_string())),
                None => Err(ModelError::SchemaValidation {
                    field: field.to_string(),
                    message: format!(
                        "{} is not one of {}",
                        spelled.quoted(),
                        members.join(", ")
                    ),
                }),
            }
        }
        (PropKind::StringList { .. }, value @ Value::List(_)) => Ok(value),
        (PropKind::Tags, Value::Map(entries)) => {
            for (i, (key, _)) in entries.iter().enumerate() {
                if entries[..i].iter().any(|(k, _)| k.eq_ignore_ascii_case(key)) {
                    return Err(ModelError::DuplicateTagKey { key: key.clone() });
                }
            }
            Ok(Value::Map(entries))
        }
        (kind, value) => {
            let expected = match kind {
                PropKind::Flag | PropKind::Bool => "boolean",
                PropKind::Int => "integer",
                PropKind::String => "string",
                PropKind::Ident => "identifier",
                PropKind::Enum { .. } => "member identifier",
                PropKind::StringList { .. } => "list",
                PropKind::Tags => "map",
            };
            Err(mismatch(expected, &value))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::warehouse::WAREHOUSE;

    #[test]
    fn test_unknown_field_rejected() {
        let mut fields = BTreeMap::new();
        fields.insert("flux_capacitance".to_string(), Value::Number(88));
        let err = Resource::new(&WAREHOUSE, Fqn::new("wh"), fields).unwrap_err();
        assert_eq!(
            err,
            ModelError::SchemaValidation {
                field: "flux_capacitance".into(),
                message: "not a field of WAREHOUSE".into(),
            }
        );
    }

    #[test]
    fn test_field_kind_mismatch_rejected() {
        let mut fields = BTreeMap::new();
        fields.insert("auto_resume".to_string(), Value::Number(1));
        let err = Resource::new(&WAREHOUSE, Fqn::new("wh"), fields).unwrap_err();
        assert_eq!(
            err,
            ModelError::SchemaValidation {
                field: "auto_resume".into(),
                message: "expected a boolean, not a integer".into(),
            }
        );
    }

    #[test]
    fn test_enum_members_canonicalized_at_construction() {
        let mut fields = BTreeMap::new();
        fields.insert(
            "warehouse_size".to_string(),
            Value::Ident("xsmall".to_string()),
        );
        let resource = Resource::new(&WAREHOUSE, Fqn::new("wh"), fields).unwrap();
        assert_eq!(
            resource.field("warehouse_size"),
            Some(&Value::Ident("XSMALL".to_string()))
        );
    }

    #[test]
    fn test_explicit_null_only_where_declared() {
        let mut fields = BTreeMap::new();
        fields.insert("auto_suspend".to_string(), Value::Null);
        assert!(Resource::new(&WAREHOUSE, Fqn::new("wh"), fields).is_ok());

        let mut fields = BTreeMap::new();
        fields.insert("comment".to_string(), Value::Null);
        let err = Resource::new(&WAREHOUSE, Fqn::new("wh"), fields).unwrap_err();
        assert!(matches!(err, ModelError::SchemaValidation { .. }));
    }

    #[test]
    fn test_duplicate_tag_keys_rejected_at_construction() {
        let mut fields = BTreeMap::new();
        fields.insert(
            "tags".to_string(),
            Value::Map(vec![
                ("dept".to_string(), "a".to_string()),
                ("DEPT".to_string(), "b".to_string()),
            ]),
        );
        let err = Resource::new(&WAREHOUSE, Fqn::new("wh"), fields).unwrap_err();
        assert_eq!(err, ModelError::DuplicateTagKey { key: "DEPT".into() });
    }

    #[test]
    fn test_urn_requires_scope() {
        use crate::resources::packages_policy::PackagesPolicy;

        let unqualified = PackagesPolicy {
            name: "pp".into(),
            ..Default::default()
        }
        .build()
        .unwrap();
        assert!(matches!(
            unqualified.urn("XYZ987"),
            Err(ModelError::MissingScope { .. })
        ));

        let qualified = PackagesPolicy {
            name: "pp".into(),
            database: Some("db".into()),
            schema: Some("sch".into()),
            ..Default::default()
        }
        .build()
        .unwrap();
        let urn = qualified.urn("XYZ987").unwrap();
        assert_eq!(urn.to_string(), "urn::XYZ987:packages_policy/DB.SCH.PP");
    }

    #[test]
    fn test_unrecognized_create_statement() {
        let err = Resource::from_sql("CREATE SPACESHIP enterprise").unwrap_err();
        assert!(matches!(err, ModelError::Parse(_)));
        assert!(err.to_string().contains("unrecognized CREATE statement"));
    }
}
