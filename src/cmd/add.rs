//! Add commands: add-hub, add-link, add-satellite.
//!
//! Each loads the project file, applies one store mutation, and saves.
//! Invariant violations (duplicate names, unresolvable parents) surface
//! as errors from the store before anything is written back.

use crate::model::{parse_attribute_list, ParentKind};
use crate::store::ProjectStore;
use anyhow::{bail, Result};
use std::path::PathBuf;

pub fn add_hub(
    file: PathBuf,
    name: String,
    business_key: String,
    description: Option<String>,
) -> Result<()> {
    let mut store = ProjectStore::load(&file)?;
    store.add_hub(&name, &business_key, description)?;
    store.save(&file)?;

    eprintln!("Added hub '{}' (business key: {})", name, business_key);
    Ok(())
}

pub fn add_link(
    file: PathBuf,
    name: String,
    hubs: String,
    description: Option<String>,
) -> Result<()> {
    let hub_names: Vec<String> = hubs
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let mut store = ProjectStore::load(&file)?;
    store.add_link(&name, &hub_names, description)?;
    store.save(&file)?;

    if hub_names.len() < 2 {
        eprintln!("Note: link '{}' references fewer than two hubs", name);
    }
    eprintln!("Added link '{}' connecting {} hub(s)", name, hub_names.len());
    Ok(())
}

pub fn add_satellite(
    file: PathBuf,
    name: String,
    parent: String,
    attributes: Option<String>,
) -> Result<()> {
    let (kind, parent_name) = parse_parent_arg(&parent)?;
    let attributes = attributes
        .as_deref()
        .map(parse_attribute_list)
        .unwrap_or_default();

    let mut store = ProjectStore::load(&file)?;
    store.add_satellite(&name, kind, parent_name, attributes)?;
    store.save(&file)?;

    eprintln!("Added satellite '{}' on {} '{}'", name, kind, parent_name);
    Ok(())
}

/// Parse a `kind:name` parent argument, e.g. `hub:Customer`
pub(super) fn parse_parent_arg(parent: &str) -> Result<(ParentKind, &str)> {
    let Some((kind, name)) = parent.split_once(':') else {
        bail!(
            "invalid parent reference '{}': expected kind:name, e.g. hub:Customer or link:Purchase",
            parent
        );
    };
    let kind: ParentKind = kind
        .trim()
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    Ok((kind, name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_parent_arg() {
        assert_eq!(
            parse_parent_arg("hub:Customer").unwrap(),
            (ParentKind::Hub, "Customer")
        );
        assert_eq!(
            parse_parent_arg("link: Purchase Event").unwrap(),
            (ParentKind::Link, "Purchase Event")
        );
        assert!(parse_parent_arg("Customer").is_err());
        assert!(parse_parent_arg("table:Customer").is_err());
    }
}
