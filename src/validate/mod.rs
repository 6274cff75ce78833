//! Model validation: surfaces the anomalies the render path tolerates.
//!
//! The renderers and the DDL generator degrade gracefully on dangling
//! references and unknown type tags; this module makes those latent
//! issues visible. It also checks the conditions the store cannot see
//! across entities, most notably sanitized identifier collisions, which
//! would silently produce colliding table and column names.

use crate::ident::{is_degenerate, sanitize};
use crate::model::{AttributeType, ParentKind, Project};
use crate::resolve::resolve_parent;
use ahash::AHashMap;
use serde::Serialize;
use std::fmt;

/// Issue severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
        }
    }
}

/// A validation issue found in the project model
#[derive(Debug, Clone, Serialize)]
pub struct ModelIssue {
    pub code: &'static str,
    pub severity: Severity,
    pub message: String,
}

impl ModelIssue {
    pub fn error(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn warning(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

impl fmt::Display for ModelIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.severity, self.code, self.message)
    }
}

/// Validation result for a whole project
#[derive(Debug, Clone, Serialize)]
pub struct ValidationSummary {
    pub project: String,
    pub issues: Vec<ModelIssue>,
    pub error_count: usize,
    pub warning_count: usize,
}

impl ValidationSummary {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }
}

/// Validate a project model.
///
/// Errors mark conditions that corrupt generated artifacts (identifier
/// collisions, degenerate identifiers); warnings mark conditions the
/// engine degrades on (dangling references, unknown tags, underlinked
/// Links).
pub fn validate_project(project: &Project) -> ValidationSummary {
    let mut issues = Vec::new();

    check_identifiers(project, &mut issues);
    check_links(project, &mut issues);
    check_satellites(project, &mut issues);

    let error_count = issues
        .iter()
        .filter(|i| i.severity == Severity::Error)
        .count();
    let warning_count = issues.len() - error_count;

    ValidationSummary {
        project: project.name.clone(),
        issues,
        error_count,
        warning_count,
    }
}

/// Degenerate identifiers and sanitized-name collisions across all
/// entity kinds. Hubs, Links, and Satellites share one namespace here:
/// two entities sanitizing to the same token collide on hash-key column
/// names even when their table prefixes differ.
fn check_identifiers(project: &Project, issues: &mut Vec<ModelIssue>) {
    let named = project
        .hubs
        .iter()
        .map(|h| ("hub", h.name.as_str()))
        .chain(project.links.iter().map(|l| ("link", l.name.as_str())))
        .chain(project.satellites.iter().map(|s| ("satellite", s.name.as_str())));

    let mut seen: AHashMap<String, (&str, &str)> = AHashMap::new();
    for (kind, name) in named {
        let ident = sanitize(name);
        if is_degenerate(&ident) {
            issues.push(ModelIssue::error(
                "degenerate-identifier",
                format!("{kind} '{name}' sanitizes to an unusable identifier '{ident}'"),
            ));
            continue;
        }
        if let Some((other_kind, other_name)) = seen.get(ident.as_str()) {
            issues.push(ModelIssue::error(
                "identifier-collision",
                format!(
                    "{kind} '{name}' and {other_kind} '{other_name}' both sanitize to '{ident}'"
                ),
            ));
        } else {
            seen.insert(ident, (kind, name));
        }
    }
}

fn check_links(project: &Project, issues: &mut Vec<ModelIssue>) {
    for link in &project.links {
        for hub_id in &link.hubs {
            if project.hub(*hub_id).is_none() {
                issues.push(ModelIssue::warning(
                    "dangling-hub-ref",
                    format!(
                        "link '{}' references missing hub {}; its FK pair is omitted from output",
                        link.name, hub_id
                    ),
                ));
            }
        }
        if link.hubs.len() < 2 {
            issues.push(ModelIssue::warning(
                "underlinked-link",
                format!(
                    "link '{}' references {} hub(s); a link normally connects at least two",
                    link.name,
                    link.hubs.len()
                ),
            ));
        }
    }
}

fn check_satellites(project: &Project, issues: &mut Vec<ModelIssue>) {
    for satellite in &project.satellites {
        if resolve_parent(&satellite.parent, &project.hubs, &project.links).is_none() {
            let kind = match satellite.parent.kind {
                ParentKind::Hub => "hub",
                ParentKind::Link => "link",
            };
            issues.push(ModelIssue::warning(
                "dangling-parent",
                format!(
                    "satellite '{}' references missing {} {}; its parent FK is omitted from output",
                    satellite.name, kind, satellite.parent.id
                ),
            ));
        }

        for (i, attr) in satellite.attributes.iter().enumerate() {
            if !AttributeType::is_known_tag(&attr.type_tag) {
                issues.push(ModelIssue::warning(
                    "unknown-attribute-type",
                    format!(
                        "satellite '{}' attribute '{}' has unknown type tag '{}'; falls back to VARCHAR(255)",
                        satellite.name, attr.name, attr.type_tag
                    ),
                ));
            }
            if is_degenerate(&sanitize(&attr.name)) {
                issues.push(ModelIssue::error(
                    "degenerate-identifier",
                    format!(
                        "satellite '{}' attribute '{}' sanitizes to an unusable identifier",
                        satellite.name, attr.name
                    ),
                ));
            }
            if satellite.attributes[..i].iter().any(|a| a.name == attr.name) {
                issues.push(ModelIssue::error(
                    "duplicate-attribute",
                    format!(
                        "satellite '{}' declares attribute '{}' more than once",
                        satellite.name, attr.name
                    ),
                ));
            }
        }
    }
}
