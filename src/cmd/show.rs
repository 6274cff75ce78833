//! Show command: project summary or full JSON dump.

use crate::model::ParentKind;
use crate::store::ProjectStore;
use anyhow::Result;
use std::path::PathBuf;

pub fn run(file: PathBuf, json: bool) -> Result<()> {
    let store = ProjectStore::load(&file)?;
    let project = store.project();

    if json {
        println!("{}", serde_json::to_string_pretty(project)?);
        return Ok(());
    }

    println!("Project: {}", project.name);
    if let Some(ref description) = project.description {
        println!("  {description}");
    }

    println!("\nHubs ({}):", project.hubs.len());
    for hub in &project.hubs {
        println!("  {} (business key: {})", hub.name, hub.business_key);
    }

    println!("\nLinks ({}):", project.links.len());
    for link in &project.links {
        let hub_names: Vec<&str> = link
            .hubs
            .iter()
            .filter_map(|id| project.hub(*id).map(|h| h.name.as_str()))
            .collect();
        println!("  {} -> [{}]", link.name, hub_names.join(", "));
    }

    println!("\nSatellites ({}):", project.satellites.len());
    for satellite in &project.satellites {
        let parent = match satellite.parent.kind {
            ParentKind::Hub => project.hub(satellite.parent.id).map(|h| h.name.as_str()),
            ParentKind::Link => project.link(satellite.parent.id).map(|l| l.name.as_str()),
        };
        let parent_label = match parent {
            Some(name) => format!("{} '{}'", satellite.parent.kind, name),
            None => format!("{} {} (dangling)", satellite.parent.kind, satellite.parent.id),
        };
        println!(
            "  {} on {} ({} attribute(s))",
            satellite.name,
            parent_label,
            satellite.attributes.len()
        );
    }

    Ok(())
}
