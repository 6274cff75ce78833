//! Mermaid erDiagram output.

use crate::ident::sanitize;
use crate::model::Project;
use crate::resolve::resolve_parent;
use ahash::AHashMap;
use anyhow::Result;
use std::fmt::Write;

/// Generate a Mermaid erDiagram for the project.
///
/// Entity names appear quoted as entered; field names are sanitized.
/// Satellites with a dangling parent reference are rendered without the
/// parent hash-key field and without a "describes" edge.
pub fn to_er_diagram(project: &Project) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "erDiagram")?;

    let hubs_by_id: AHashMap<_, _> = project.hubs.iter().map(|h| (h.id, h)).collect();

    for hub in &project.hubs {
        writeln!(out, "    \"{}\" {{", hub.name)?;
        writeln!(out, "        string {}", hub.hash_key())?;
        writeln!(
            out,
            "        string {} \"{}\"",
            sanitize(&hub.business_key),
            hub.business_key
        )?;
        writeln!(out, "        datetime load_date")?;
        writeln!(out, "        string record_source")?;
        writeln!(out, "    }}")?;
    }

    for link in &project.links {
        writeln!(out, "    \"{}\" {{", link.name)?;
        writeln!(out, "        string {}", link.hash_key())?;
        for hub_id in &link.hubs {
            if let Some(hub) = hubs_by_id.get(hub_id) {
                writeln!(out, "        string {}", hub.hash_key())?;
            }
        }
        writeln!(out, "        datetime load_date")?;
        writeln!(out, "        string record_source")?;
        writeln!(out, "    }}")?;
    }

    for satellite in &project.satellites {
        let parent = resolve_parent(&satellite.parent, &project.hubs, &project.links);

        writeln!(out, "    \"{}\" {{", satellite.name)?;
        if let Some(ref parent) = parent {
            writeln!(out, "        string {}", parent.hash_key())?;
        }
        writeln!(out, "        string HK_DIFF")?;
        writeln!(out, "        datetime valid_from")?;
        writeln!(out, "        datetime valid_to")?;
        writeln!(out, "        boolean is_current")?;
        for attr in &satellite.attributes {
            writeln!(
                out,
                "        {} {} \"{}\"",
                attr.diagram_tag(),
                sanitize(&attr.name),
                attr.name
            )?;
        }
        writeln!(out, "        datetime load_date")?;
        writeln!(out, "        string record_source")?;
        writeln!(out, "    }}")?;
    }

    let mut edges = Vec::new();
    for link in &project.links {
        for hub_id in &link.hubs {
            if let Some(hub) = hubs_by_id.get(hub_id) {
                edges.push(format!(
                    "    \"{}\" ||--|{{ \"{}\" : \"connects\"",
                    hub.name, link.name
                ));
            }
        }
    }
    for satellite in &project.satellites {
        if let Some(parent) = resolve_parent(&satellite.parent, &project.hubs, &project.links) {
            edges.push(format!(
                "    \"{}\" ||--o{{ \"{}\" : \"describes\"",
                parent.name, satellite.name
            ));
        }
    }

    if !edges.is_empty() {
        writeln!(out)?;
        for edge in edges {
            writeln!(out, "{edge}")?;
        }
    }

    Ok(out)
}
