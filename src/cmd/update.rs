//! Update commands: update-hub, update-link, update-satellite.
//!
//! Same load-mutate-save shape as the add commands. Every field argument
//! beyond the entity name is optional; unset fields keep their stored
//! value. Renames and re-parents go through the same store invariants as
//! construction before anything is written back.

use super::add::parse_parent_arg;
use crate::model::parse_attribute_list;
use crate::store::ProjectStore;
use anyhow::Result;
use std::path::PathBuf;

pub fn update_hub(
    file: PathBuf,
    name: String,
    rename: Option<String>,
    business_key: Option<String>,
) -> Result<()> {
    let mut store = ProjectStore::load(&file)?;
    store.update_hub(&name, rename.as_deref(), business_key.as_deref())?;
    store.save(&file)?;

    eprintln!("Updated hub '{}'", rename.as_deref().unwrap_or(&name));
    Ok(())
}

pub fn update_link(
    file: PathBuf,
    name: String,
    rename: Option<String>,
    hubs: Option<String>,
) -> Result<()> {
    let hub_names: Option<Vec<String>> = hubs.map(|raw| {
        raw.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    });

    let mut store = ProjectStore::load(&file)?;
    store.update_link(&name, rename.as_deref(), hub_names.as_deref())?;
    store.save(&file)?;

    let name = rename.as_deref().unwrap_or(&name);
    match hub_names {
        Some(hub_names) => eprintln!(
            "Updated link '{}' (now connecting {} hub(s))",
            name,
            hub_names.len()
        ),
        None => eprintln!("Updated link '{}'", name),
    }
    Ok(())
}

pub fn update_satellite(
    file: PathBuf,
    name: String,
    rename: Option<String>,
    parent: Option<String>,
    attributes: Option<String>,
) -> Result<()> {
    let parent_ref = parent.as_deref().map(parse_parent_arg).transpose()?;
    let attributes = attributes.as_deref().map(parse_attribute_list);

    let mut store = ProjectStore::load(&file)?;
    store.update_satellite(&name, rename.as_deref(), parent_ref, attributes)?;
    store.save(&file)?;

    eprintln!("Updated satellite '{}'", rename.as_deref().unwrap_or(&name));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Attribute, ParentKind};

    fn seeded_file(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("sales.yaml");
        let mut store = ProjectStore::create("Sales", None);
        store.add_hub("Customer", "customer_id", None).unwrap();
        store.add_hub("Product", "product_id", None).unwrap();
        store
            .add_link(
                "Purchase",
                &["Customer".to_string(), "Product".to_string()],
                None,
            )
            .unwrap();
        store
            .add_satellite(
                "CustomerDetails",
                ParentKind::Hub,
                "Customer",
                vec![Attribute::new("name", "string")],
            )
            .unwrap();
        store.save(&path).unwrap();
        path
    }

    #[test]
    fn test_update_hub_rename_and_rekey() {
        let dir = tempfile::tempdir().unwrap();
        let path = seeded_file(&dir);

        update_hub(
            path.clone(),
            "Customer".to_string(),
            Some("Client".to_string()),
            Some("client_id".to_string()),
        )
        .unwrap();

        let store = ProjectStore::load(&path).unwrap();
        let project = store.project();
        let hub = project.hub_by_name("Client").unwrap();
        assert_eq!(hub.business_key, "client_id");
        // Id-based references follow the rename on reload
        let link = project.link_by_name("Purchase").unwrap();
        assert_eq!(project.hub(link.hubs[0]).unwrap().name, "Client");
    }

    #[test]
    fn test_update_link_hub_set() {
        let dir = tempfile::tempdir().unwrap();
        let path = seeded_file(&dir);

        update_link(
            path.clone(),
            "Purchase".to_string(),
            None,
            Some("Product".to_string()),
        )
        .unwrap();

        let store = ProjectStore::load(&path).unwrap();
        let project = store.project();
        let link = project.link_by_name("Purchase").unwrap();
        assert_eq!(link.hubs.len(), 1);
        assert_eq!(project.hub(link.hubs[0]).unwrap().name, "Product");
    }

    #[test]
    fn test_update_satellite_reparent_and_attributes() {
        let dir = tempfile::tempdir().unwrap();
        let path = seeded_file(&dir);

        update_satellite(
            path.clone(),
            "CustomerDetails".to_string(),
            None,
            Some("link:Purchase".to_string()),
            Some("total:decimal".to_string()),
        )
        .unwrap();

        let store = ProjectStore::load(&path).unwrap();
        let project = store.project();
        let sat = project.satellite_by_name("CustomerDetails").unwrap();
        assert_eq!(sat.parent.kind, ParentKind::Link);
        assert_eq!(sat.parent.id, project.link_by_name("Purchase").unwrap().id);
        assert_eq!(sat.attributes, vec![Attribute::new("total", "decimal")]);
    }

    #[test]
    fn test_update_rejects_bad_targets_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = seeded_file(&dir);

        assert!(update_hub(path.clone(), "Ghost".to_string(), None, None).is_err());
        assert!(update_satellite(
            path.clone(),
            "CustomerDetails".to_string(),
            None,
            Some("hub:Ghost".to_string()),
            None,
        )
        .is_err());

        // The file is untouched after the failed updates
        let store = ProjectStore::load(&path).unwrap();
        let sat = store.project().satellite_by_name("CustomerDetails").unwrap();
        assert_eq!(sat.parent.kind, ParentKind::Hub);
    }
}
