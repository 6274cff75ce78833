//! Ddl command: generate CREATE TABLE statements for the project.

use crate::ddl::{ddl_file_name, generate_ddl};
use crate::store::ProjectStore;
use anyhow::Result;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

pub fn run(file: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let store = ProjectStore::load(&file)?;
    let project = store.project();

    let ddl = generate_ddl(project)?;

    match output {
        Some(out_path) => {
            // A directory target gets the conventional download name
            let out_path = if out_path.is_dir() {
                out_path.join(ddl_file_name(&project.name))
            } else {
                out_path
            };
            let mut out_file = File::create(&out_path)?;
            out_file.write_all(ddl.as_bytes())?;
            eprintln!("DDL written to: {}", out_path.display());
        }
        None => print!("{ddl}"),
    }

    eprintln!(
        "DDL: {} tables ({} hubs, {} links, {} satellites)",
        project.entity_count(),
        project.hubs.len(),
        project.links.len(),
        project.satellites.len()
    );
    Ok(())
}
