//! Data model for a Data Vault 2.0 project.
//!
//! This module provides:
//! - Entity definitions (Project, Hub, Link, Satellite) with stable ids
//! - The polymorphic parent reference a Satellite carries (Hub or Link)
//! - Attribute type tags and their SQL column type mapping
//!
//! Entities own no behavior beyond name/key derivation; mutation and
//! invariant enforcement live in the store, rendering in diagram/ddl.

mod legacy;

pub use legacy::{format_attribute_list, parse_attribute_list};

use crate::ident::sanitize;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Record source stamped on entities created without an explicit one
pub const DEFAULT_RECORD_SOURCE: &str = "DefaultSource";

/// Unique identifier for an entity within a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

/// Which entity kind a Satellite's parent reference points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParentKind {
    Hub,
    Link,
}

impl FromStr for ParentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hub" => Ok(ParentKind::Hub),
            "link" => Ok(ParentKind::Link),
            _ => Err(format!("Unknown parent kind: {}. Valid options: hub, link", s)),
        }
    }
}

impl fmt::Display for ParentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParentKind::Hub => write!(f, "hub"),
            ParentKind::Link => write!(f, "link"),
        }
    }
}

/// Polymorphic parent reference stored on a Satellite.
///
/// A tagged (kind, id) pair resolved against the project's Hub and Link
/// collections at render time; see `crate::resolve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentRef {
    pub kind: ParentKind,
    pub id: EntityId,
}

/// Logical attribute type tags accepted by the type mapper.
///
/// The tag set is closed; anything else falls back to `Str` so that DDL
/// generation never aborts on an unrecognized attribute type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    #[serde(rename = "string")]
    Str,
    Integer,
    Float,
    Boolean,
    DateTime,
    Date,
}

impl AttributeType {
    /// Map a raw type tag to an attribute type (case-insensitive).
    /// Unknown tags fall back to the string type.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "string" => AttributeType::Str,
            "integer" => AttributeType::Integer,
            "float" | "decimal" => AttributeType::Float,
            "boolean" => AttributeType::Boolean,
            "datetime" => AttributeType::DateTime,
            "date" => AttributeType::Date,
            _ => AttributeType::Str,
        }
    }

    /// Whether a raw tag is part of the closed set (used for validation warnings)
    pub fn is_known_tag(tag: &str) -> bool {
        matches!(
            tag.trim().to_lowercase().as_str(),
            "string" | "integer" | "float" | "decimal" | "boolean" | "datetime" | "date"
        )
    }

    /// Target SQL column type for DDL output
    pub fn sql_type(self) -> &'static str {
        match self {
            AttributeType::Str => "VARCHAR(255)",
            AttributeType::Integer => "INTEGER",
            AttributeType::Float => "DECIMAL(18,2)",
            AttributeType::Boolean => "BOOLEAN",
            AttributeType::DateTime => "TIMESTAMP",
            AttributeType::Date => "DATE",
        }
    }
}

/// A named, typed descriptive field on a Satellite.
///
/// The raw tag string is kept as entered; mapping happens on output so an
/// unknown tag degrades to the string type instead of failing the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub type_tag: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, type_tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_tag: type_tag.into(),
        }
    }

    /// Mapped attribute type (unknown tags fall back to string)
    pub fn attr_type(&self) -> AttributeType {
        AttributeType::from_tag(&self.type_tag)
    }

    /// Type token for diagram output: the entered tag, normalized to
    /// lowercase. `decimal` stays `decimal`; unknown tags fall back to
    /// `string`, matching the DDL fallback.
    pub fn diagram_tag(&self) -> String {
        let tag = self.type_tag.trim().to_lowercase();
        if AttributeType::is_known_tag(&tag) {
            tag
        } else {
            "string".to_string()
        }
    }
}

/// A core business entity keyed by a natural business key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hub {
    pub id: EntityId,
    pub name: String,
    /// Name of the natural-key column
    pub business_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub load_date: DateTime<Utc>,
    pub record_source: String,
}

impl Hub {
    pub fn sanitized_name(&self) -> String {
        sanitize(&self.name)
    }

    /// Surrogate hash-key column name, `HK_<sanitized name>`
    pub fn hash_key(&self) -> String {
        format!("HK_{}", self.sanitized_name())
    }

    /// DDL table name, `H_<sanitized name>`
    pub fn table_name(&self) -> String {
        format!("H_{}", self.sanitized_name())
    }
}

/// An association between two or more Hubs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub id: EntityId,
    pub name: String,
    /// Referenced Hub ids, in stored order (drives FK column order)
    pub hubs: Vec<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub load_date: DateTime<Utc>,
    pub record_source: String,
}

impl Link {
    pub fn sanitized_name(&self) -> String {
        sanitize(&self.name)
    }

    pub fn hash_key(&self) -> String {
        format!("HK_{}", self.sanitized_name())
    }

    /// DDL table name, `L_<sanitized name>`
    pub fn table_name(&self) -> String {
        format!("L_{}", self.sanitized_name())
    }
}

/// Descriptive data attached to a Hub or Link, versioned over time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Satellite {
    pub id: EntityId,
    pub name: String,
    pub parent: ParentRef,
    /// Ordered attribute list (order drives diagram and DDL column order)
    pub attributes: Vec<Attribute>,
    pub load_date: DateTime<Utc>,
    pub record_source: String,
}

impl Satellite {
    pub fn sanitized_name(&self) -> String {
        sanitize(&self.name)
    }

    /// DDL table name, `S_<sanitized name>`
    pub fn table_name(&self) -> String {
        format!("S_{}", self.sanitized_name())
    }
}

/// A complete Data Vault project: owns its Hubs, Links, and Satellites.
///
/// Collections keep store order; renderers iterate them as-is, so output
/// is stable and idempotent for an unmodified project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Next id to hand out when an entity is added
    #[serde(default)]
    pub next_id: u32,
    #[serde(default)]
    pub hubs: Vec<Hub>,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub satellites: Vec<Satellite>,
}

impl Project {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
            next_id: 1,
            hubs: Vec::new(),
            links: Vec::new(),
            satellites: Vec::new(),
        }
    }

    pub fn hub(&self, id: EntityId) -> Option<&Hub> {
        self.hubs.iter().find(|h| h.id == id)
    }

    pub fn link(&self, id: EntityId) -> Option<&Link> {
        self.links.iter().find(|l| l.id == id)
    }

    pub fn hub_by_name(&self, name: &str) -> Option<&Hub> {
        self.hubs.iter().find(|h| h.name == name)
    }

    pub fn link_by_name(&self, name: &str) -> Option<&Link> {
        self.links.iter().find(|l| l.name == name)
    }

    pub fn satellite_by_name(&self, name: &str) -> Option<&Satellite> {
        self.satellites.iter().find(|s| s.name == name)
    }

    pub fn entity_count(&self) -> usize {
        self.hubs.len() + self.links.len() + self.satellites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entity_count() == 0
    }

    /// Keep only entities whose name passes the predicate.
    ///
    /// Dropped Hubs/Links leave dangling references behind on purpose;
    /// the renderers degrade by omitting the affected fields and edges.
    pub fn retain_entities<F: Fn(&str) -> bool>(&mut self, keep: F) {
        self.hubs.retain(|h| keep(&h.name));
        self.links.retain(|l| keep(&l.name));
        self.satellites.retain(|s| keep(&s.name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_type_from_tag() {
        assert_eq!(AttributeType::from_tag("string"), AttributeType::Str);
        assert_eq!(AttributeType::from_tag("Integer"), AttributeType::Integer);
        assert_eq!(AttributeType::from_tag("FLOAT"), AttributeType::Float);
        assert_eq!(AttributeType::from_tag("decimal"), AttributeType::Float);
        assert_eq!(AttributeType::from_tag("boolean"), AttributeType::Boolean);
        assert_eq!(AttributeType::from_tag("DateTime"), AttributeType::DateTime);
        assert_eq!(AttributeType::from_tag("date"), AttributeType::Date);
    }

    #[test]
    fn test_attribute_type_unknown_falls_back_to_string() {
        assert_eq!(AttributeType::from_tag("json"), AttributeType::Str);
        assert_eq!(AttributeType::from_tag(""), AttributeType::Str);
        assert!(!AttributeType::is_known_tag("json"));
        assert!(AttributeType::is_known_tag("DECIMAL"));
    }

    #[test]
    fn test_sql_type_mapping() {
        assert_eq!(AttributeType::Str.sql_type(), "VARCHAR(255)");
        assert_eq!(AttributeType::Integer.sql_type(), "INTEGER");
        assert_eq!(AttributeType::Float.sql_type(), "DECIMAL(18,2)");
        assert_eq!(AttributeType::Boolean.sql_type(), "BOOLEAN");
        assert_eq!(AttributeType::DateTime.sql_type(), "TIMESTAMP");
        assert_eq!(AttributeType::Date.sql_type(), "DATE");
    }

    #[test]
    fn test_parent_kind_parsing() {
        assert_eq!("hub".parse::<ParentKind>(), Ok(ParentKind::Hub));
        assert_eq!("Link".parse::<ParentKind>(), Ok(ParentKind::Link));
        assert!("table".parse::<ParentKind>().is_err());
    }

    #[test]
    fn test_derived_names() {
        let hub = Hub {
            id: EntityId(1),
            name: "Customer Account".to_string(),
            business_key: "customer_id".to_string(),
            description: None,
            load_date: Utc::now(),
            record_source: DEFAULT_RECORD_SOURCE.to_string(),
        };
        assert_eq!(hub.hash_key(), "HK_Customer_Account");
        assert_eq!(hub.table_name(), "H_Customer_Account");
    }
}
