//! Init command: create a new empty project file.

use crate::store::ProjectStore;
use anyhow::{bail, Result};
use std::path::PathBuf;

pub fn run(
    file: PathBuf,
    name: Option<String>,
    description: Option<String>,
    force: bool,
) -> Result<()> {
    if file.exists() && !force {
        bail!(
            "project file already exists: {} (use --force to overwrite)",
            file.display()
        );
    }

    let name = match name {
        Some(name) => name,
        None => file
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| "untitled".to_string()),
    };

    let store = ProjectStore::create(name, description);
    store.save(&file)?;

    eprintln!(
        "Created project '{}' at {}",
        store.project().name,
        file.display()
    );
    Ok(())
}
