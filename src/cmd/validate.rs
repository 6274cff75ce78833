//! Validate command: report latent model issues.

use crate::store::ProjectStore;
use crate::validate::validate_project;
use anyhow::Result;
use std::path::PathBuf;

pub fn run(file: PathBuf, strict: bool, json: bool) -> Result<()> {
    let store = ProjectStore::load(&file)?;
    let summary = validate_project(store.project());

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        for issue in &summary.issues {
            eprintln!("{issue}");
        }
        if summary.is_clean() {
            eprintln!("Project '{}' is valid", summary.project);
        } else {
            eprintln!(
                "\nProject '{}': {} error(s), {} warning(s)",
                summary.project, summary.error_count, summary.warning_count
            );
        }
    }

    if summary.has_errors() {
        anyhow::bail!("validation failed with {} error(s)", summary.error_count);
    }
    if strict && !summary.is_clean() {
        anyhow::bail!(
            "validation failed in strict mode with {} warning(s)",
            summary.warning_count
        );
    }
    Ok(())
}
