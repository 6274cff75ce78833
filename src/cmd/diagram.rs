//! Diagram command: render the project as Mermaid text.

use crate::diagram::{render, DiagramKind};
use crate::store::ProjectStore;
use anyhow::Result;
use glob::Pattern;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    format: String,
    entities: Option<String>,
    exclude: Option<String>,
) -> Result<()> {
    let kind: DiagramKind = format.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let store = ProjectStore::load(&file)?;
    let mut project = store.into_project();

    if let Some(patterns) = parse_patterns(entities.as_deref()) {
        project.retain_entities(|name| patterns.iter().any(|p| p.matches(name)));
    }
    if let Some(patterns) = parse_patterns(exclude.as_deref()) {
        project.retain_entities(|name| !patterns.iter().any(|p| p.matches(name)));
    }

    let result = render(&project, kind);
    if let Some(ref error) = result.error {
        eprintln!("{error}");
    }

    if let Some(ref out_path) = output {
        let mut out_file = File::create(out_path)?;
        out_file.write_all(result.text.as_bytes())?;
        eprintln!("Diagram written to: {}", out_path.display());
    } else {
        print!("{}", result.text);
    }

    eprintln!(
        "Diagram ({}): {} hubs, {} links, {} satellites",
        kind,
        project.hubs.len(),
        project.links.len(),
        project.satellites.len()
    );
    Ok(())
}

fn parse_patterns(raw: Option<&str>) -> Option<Vec<Pattern>> {
    let raw = raw?;
    let patterns: Vec<Pattern> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| Pattern::new(s).ok())
        .collect();
    if patterns.is_empty() {
        None
    } else {
        Some(patterns)
    }
}
