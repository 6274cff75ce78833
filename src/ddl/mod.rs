//! DDL generation for a Data Vault project.
//!
//! Emits one CREATE TABLE per entity: `H_` tables for Hubs, `L_` for
//! Links, `S_` for Satellites, with hash-key primary keys, per-Hub
//! foreign keys on Links, and the parent foreign key on Satellites.
//! Column and constraint lines are assembled as a list and joined, so
//! comma placement is correct for any entity shape and each statement
//! carries exactly one PRIMARY KEY clause.

use crate::ident::sanitize;
use crate::model::Project;
use crate::resolve::resolve_parent;
use ahash::AHashMap;
use anyhow::Result;
use std::fmt::Write;

/// MIME type for DDL artifact delivery
pub const DDL_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Download file name for a project's DDL artifact, `<project name>_ddl.sql`
pub fn ddl_file_name(project_name: &str) -> String {
    format!("{project_name}_ddl.sql")
}

/// Generate CREATE TABLE statements for every entity in the project.
///
/// Dangling references degrade by omission: a Link skips FK pairs for
/// missing Hubs, a Satellite with an unresolvable parent is emitted
/// without the parent column and FK. Unknown attribute type tags map to
/// VARCHAR(255). Generation never aborts on a malformed entity.
pub fn generate_ddl(project: &Project) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "-- Data Vault DDL for project: {}", project.name)?;
    if let Some(ref description) = project.description {
        if !description.is_empty() {
            writeln!(out, "-- {description}")?;
        }
    }

    let hubs_by_id: AHashMap<_, _> = project.hubs.iter().map(|h| (h.id, h)).collect();

    for hub in &project.hubs {
        let lines = vec![
            format!("{} VARCHAR(32) PRIMARY KEY", hub.hash_key()),
            format!("{} VARCHAR(255) NOT NULL", sanitize(&hub.business_key)),
            "load_date TIMESTAMP NOT NULL".to_string(),
            "record_source VARCHAR(255) NOT NULL".to_string(),
        ];
        write_create_table(&mut out, &hub.table_name(), &lines)?;
    }

    for link in &project.links {
        let mut lines = vec![format!("{} VARCHAR(32) PRIMARY KEY", link.hash_key())];
        for hub_id in &link.hubs {
            if let Some(hub) = hubs_by_id.get(hub_id) {
                let hk = hub.hash_key();
                lines.push(format!("{hk} VARCHAR(32) NOT NULL"));
                lines.push(format!(
                    "FOREIGN KEY ({hk}) REFERENCES {}({hk})",
                    hub.table_name()
                ));
            }
        }
        lines.push("load_date TIMESTAMP NOT NULL".to_string());
        lines.push("record_source VARCHAR(255) NOT NULL".to_string());
        write_create_table(&mut out, &link.table_name(), &lines)?;
    }

    for satellite in &project.satellites {
        let mut lines = Vec::new();
        if let Some(parent) = resolve_parent(&satellite.parent, &project.hubs, &project.links) {
            let hk = parent.hash_key();
            lines.push(format!("{hk} VARCHAR(32) NOT NULL"));
            lines.push(format!(
                "FOREIGN KEY ({hk}) REFERENCES {}({hk})",
                parent.table_name()
            ));
        }
        lines.push("HK_DIFF VARCHAR(32) NOT NULL".to_string());
        lines.push("valid_from TIMESTAMP NOT NULL".to_string());
        lines.push("valid_to TIMESTAMP".to_string());
        lines.push("is_current BOOLEAN NOT NULL".to_string());
        for attr in &satellite.attributes {
            lines.push(format!(
                "{} {}",
                sanitize(&attr.name),
                attr.attr_type().sql_type()
            ));
        }
        lines.push("load_date TIMESTAMP NOT NULL".to_string());
        lines.push("record_source VARCHAR(255) NOT NULL".to_string());
        lines.push("PRIMARY KEY (HK_DIFF)".to_string());
        write_create_table(&mut out, &satellite.table_name(), &lines)?;
    }

    Ok(out)
}

fn write_create_table(out: &mut String, table: &str, lines: &[String]) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "CREATE TABLE {table} (")?;
    writeln!(out, "    {}", lines.join(",\n    "))?;
    writeln!(out, ");")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ddl_file_name() {
        assert_eq!(ddl_file_name("Sales"), "Sales_ddl.sql");
    }

    #[test]
    fn test_empty_project_has_header_only() {
        let project = Project::new("Empty", Some("nothing here yet".to_string()));
        let output = generate_ddl(&project).unwrap();

        assert!(output.contains("-- Data Vault DDL for project: Empty"));
        assert!(output.contains("-- nothing here yet"));
        assert!(!output.contains("CREATE TABLE"));
    }
}
