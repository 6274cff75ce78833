//! Mermaid classDiagram output with style classes per entity kind.

use crate::ident::sanitize;
use crate::model::Project;
use crate::resolve::resolve_parent;
use ahash::AHashMap;
use anyhow::Result;
use std::fmt::Write;

/// Style class definitions, emitted after the entity blocks and before
/// the relationship edges
const CLASS_DEFS: [&str; 3] = [
    "classDef hub fill:#cfe2ff,stroke:#084298,stroke-width:2px;",
    "classDef link fill:#fff3cd,stroke:#b45309,stroke-width:2px;",
    "classDef sat fill:#fff9db,stroke:#b6a100,stroke-width:2px;",
];

/// Generate a Mermaid classDiagram for the project.
///
/// Unlike the ER variant, entity names are sanitized (class names cannot
/// be quoted). Dangling Satellite parents degrade the same way: no
/// parent member, no edge.
pub fn to_class_diagram(project: &Project) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "classDiagram")?;

    let hubs_by_id: AHashMap<_, _> = project.hubs.iter().map(|h| (h.id, h)).collect();

    for hub in &project.hubs {
        let safe_name = hub.sanitized_name();
        writeln!(out, "class {safe_name} {{")?;
        writeln!(out, "    +{}", hub.hash_key())?;
        writeln!(out, "    +{}", sanitize(&hub.business_key))?;
        writeln!(out, "    +load_date")?;
        writeln!(out, "    +record_source")?;
        writeln!(out, "}}")?;
        writeln!(out, "class {safe_name} hub;")?;
    }

    for link in &project.links {
        let safe_name = link.sanitized_name();
        writeln!(out, "class {safe_name} {{")?;
        writeln!(out, "    +{}", link.hash_key())?;
        for hub_id in &link.hubs {
            if let Some(hub) = hubs_by_id.get(hub_id) {
                writeln!(out, "    +{}", hub.hash_key())?;
            }
        }
        writeln!(out, "    +load_date")?;
        writeln!(out, "    +record_source")?;
        writeln!(out, "}}")?;
        writeln!(out, "class {safe_name} link;")?;
    }

    for satellite in &project.satellites {
        let safe_name = satellite.sanitized_name();
        let parent = resolve_parent(&satellite.parent, &project.hubs, &project.links);

        writeln!(out, "class {safe_name} {{")?;
        if let Some(ref parent) = parent {
            writeln!(out, "    +{}", parent.hash_key())?;
        }
        writeln!(out, "    +HK_DIFF")?;
        writeln!(out, "    +valid_from")?;
        writeln!(out, "    +valid_to")?;
        writeln!(out, "    +is_current")?;
        for attr in &satellite.attributes {
            writeln!(out, "    +{}", sanitize(&attr.name))?;
        }
        writeln!(out, "    +load_date")?;
        writeln!(out, "    +record_source")?;
        writeln!(out, "}}")?;
        writeln!(out, "class {safe_name} sat;")?;
    }

    for def in CLASS_DEFS {
        writeln!(out, "{def}")?;
    }

    for link in &project.links {
        let safe_link = link.sanitized_name();
        for hub_id in &link.hubs {
            if let Some(hub) = hubs_by_id.get(hub_id) {
                writeln!(out, "{} --> {}", hub.sanitized_name(), safe_link)?;
            }
        }
    }
    for satellite in &project.satellites {
        if let Some(parent) = resolve_parent(&satellite.parent, &project.hubs, &project.links) {
            writeln!(
                out,
                "{} --> {}",
                parent.sanitized_name(),
                satellite.sanitized_name()
            )?;
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Attribute, EntityId, Hub, Link, ParentKind, ParentRef, Satellite, DEFAULT_RECORD_SOURCE,
    };
    use chrono::Utc;

    fn sample_project() -> Project {
        let mut project = Project::new("Sales", None);
        project.hubs.push(Hub {
            id: EntityId(1),
            name: "Customer Account".to_string(),
            business_key: "account no".to_string(),
            description: None,
            load_date: Utc::now(),
            record_source: DEFAULT_RECORD_SOURCE.to_string(),
        });
        project.links.push(Link {
            id: EntityId(2),
            name: "Purchase".to_string(),
            hubs: vec![EntityId(1)],
            description: None,
            load_date: Utc::now(),
            record_source: DEFAULT_RECORD_SOURCE.to_string(),
        });
        project.satellites.push(Satellite {
            id: EntityId(3),
            name: "Account Details".to_string(),
            parent: ParentRef {
                kind: ParentKind::Hub,
                id: EntityId(1),
            },
            attributes: vec![Attribute::new("opened on", "date")],
            load_date: Utc::now(),
            record_source: DEFAULT_RECORD_SOURCE.to_string(),
        });
        project
    }

    #[test]
    fn test_class_diagram_sanitizes_entity_names() {
        let output = to_class_diagram(&sample_project()).unwrap();

        assert!(output.starts_with("classDiagram\n"));
        assert!(output.contains("class Customer_Account {"));
        assert!(output.contains("    +HK_Customer_Account"));
        assert!(output.contains("    +account_no"));
        assert!(output.contains("class Customer_Account hub;"));
    }

    #[test]
    fn test_class_diagram_link_and_satellite_blocks() {
        let output = to_class_diagram(&sample_project()).unwrap();

        assert!(output.contains("class Purchase {"));
        assert!(output.contains("    +HK_Purchase"));
        assert!(output.contains("class Purchase link;"));
        assert!(output.contains("class Account_Details {"));
        assert!(output.contains("    +HK_DIFF"));
        assert!(output.contains("    +opened_on"));
        assert!(output.contains("class Account_Details sat;"));
    }

    #[test]
    fn test_class_diagram_styles_and_edges() {
        let output = to_class_diagram(&sample_project()).unwrap();

        assert!(output.contains("classDef hub fill:#cfe2ff"));
        assert!(output.contains("Customer_Account --> Purchase"));
        assert!(output.contains("Customer_Account --> Account_Details"));

        // Style definitions come before the edges
        let defs_pos = output.find("classDef hub").unwrap();
        let edge_pos = output.find("Customer_Account --> Purchase").unwrap();
        assert!(defs_pos < edge_pos);
    }
}
