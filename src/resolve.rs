//! Polymorphic parent resolution for Satellites.
//!
//! A Satellite stores a (kind, id) pair instead of a direct reference;
//! resolving it against the project's Hub and Link collections is needed
//! by every consumer (both diagram renderers and the DDL generator), so
//! it is centralized here.

use crate::ident::sanitize;
use crate::model::{Hub, Link, ParentKind, ParentRef};

/// A Satellite parent resolved to a concrete Hub or Link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedParent<'a> {
    pub kind: ParentKind,
    /// Raw name of the parent entity
    pub name: &'a str,
}

impl ResolvedParent<'_> {
    pub fn sanitized_name(&self) -> String {
        sanitize(self.name)
    }

    /// Hash-key column the Satellite inherits, `HK_<sanitized parent name>`
    pub fn hash_key(&self) -> String {
        format!("HK_{}", self.sanitized_name())
    }

    /// DDL table the Satellite's FK references, `H_<name>` or `L_<name>`
    pub fn table_name(&self) -> String {
        match self.kind {
            ParentKind::Hub => format!("H_{}", self.sanitized_name()),
            ParentKind::Link => format!("L_{}", self.sanitized_name()),
        }
    }
}

/// Resolve a stored parent reference against the loaded entity sets.
///
/// Returns `None` for a dangling reference (e.g. after the parent was
/// deleted). Callers must render the Satellite without its parent
/// field/FK in that case rather than failing the whole pass.
pub fn resolve_parent<'a>(
    parent: &ParentRef,
    hubs: &'a [Hub],
    links: &'a [Link],
) -> Option<ResolvedParent<'a>> {
    match parent.kind {
        ParentKind::Hub => hubs.iter().find(|h| h.id == parent.id).map(|h| ResolvedParent {
            kind: ParentKind::Hub,
            name: &h.name,
        }),
        ParentKind::Link => links
            .iter()
            .find(|l| l.id == parent.id)
            .map(|l| ResolvedParent {
                kind: ParentKind::Link,
                name: &l.name,
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntityId, DEFAULT_RECORD_SOURCE};
    use chrono::Utc;

    fn hub(id: u32, name: &str) -> Hub {
        Hub {
            id: EntityId(id),
            name: name.to_string(),
            business_key: "id".to_string(),
            description: None,
            load_date: Utc::now(),
            record_source: DEFAULT_RECORD_SOURCE.to_string(),
        }
    }

    fn link(id: u32, name: &str) -> Link {
        Link {
            id: EntityId(id),
            name: name.to_string(),
            hubs: Vec::new(),
            description: None,
            load_date: Utc::now(),
            record_source: DEFAULT_RECORD_SOURCE.to_string(),
        }
    }

    #[test]
    fn test_resolve_hub_parent() {
        let hubs = vec![hub(1, "Customer")];
        let links = vec![link(2, "Purchase")];
        let parent = ParentRef {
            kind: ParentKind::Hub,
            id: EntityId(1),
        };

        let resolved = resolve_parent(&parent, &hubs, &links).unwrap();
        assert_eq!(resolved.kind, ParentKind::Hub);
        assert_eq!(resolved.hash_key(), "HK_Customer");
        assert_eq!(resolved.table_name(), "H_Customer");
    }

    #[test]
    fn test_resolve_link_parent() {
        let hubs = vec![hub(1, "Customer")];
        let links = vec![link(2, "Purchase Event")];
        let parent = ParentRef {
            kind: ParentKind::Link,
            id: EntityId(2),
        };

        let resolved = resolve_parent(&parent, &hubs, &links).unwrap();
        assert_eq!(resolved.kind, ParentKind::Link);
        assert_eq!(resolved.table_name(), "L_Purchase_Event");
    }

    #[test]
    fn test_resolve_checks_kind_not_just_id() {
        // A hub and a link never share an id, but a stale reference can
        // point at the wrong kind; only the matching collection is searched.
        let hubs = vec![hub(1, "Customer")];
        let links = vec![link(2, "Purchase")];
        let parent = ParentRef {
            kind: ParentKind::Link,
            id: EntityId(1),
        };

        assert!(resolve_parent(&parent, &hubs, &links).is_none());
    }

    #[test]
    fn test_dangling_reference_is_none() {
        let parent = ParentRef {
            kind: ParentKind::Hub,
            id: EntityId(99),
        };
        assert!(resolve_parent(&parent, &[], &[]).is_none());
    }
}
