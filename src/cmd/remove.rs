//! Remove command: delete an entity, cascading to dependents by default.

use super::EntityKind;
use crate::store::ProjectStore;
use anyhow::Result;
use std::path::PathBuf;

pub fn run(file: PathBuf, kind: EntityKind, name: String, keep_dependents: bool) -> Result<()> {
    let mut store = ProjectStore::load(&file)?;
    let before = store.project().entity_count();

    match kind {
        EntityKind::Hub => store.remove_hub(&name, keep_dependents)?,
        EntityKind::Link => store.remove_link(&name, keep_dependents)?,
        EntityKind::Satellite => store.remove_satellite(&name)?,
    }

    let removed = before - store.project().entity_count();
    store.save(&file)?;

    if removed > 1 {
        eprintln!("Removed '{}' and {} dependent(s)", name, removed - 1);
    } else {
        eprintln!("Removed '{}'", name);
    }
    if keep_dependents && !matches!(kind, EntityKind::Satellite) {
        eprintln!("Dependent references left dangling; run 'validate' to list them");
    }
    Ok(())
}
