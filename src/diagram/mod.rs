//! Mermaid diagram rendering for a Data Vault project.
//!
//! Two variants share the same traversal: the entity-relationship style
//! (`erDiagram`) and the class style (`classDiagram`). Rendering is a
//! pure read pass over an already-loaded project; per-entity anomalies
//! (dangling parents, unknown type tags) degrade by omission or fallback
//! so one malformed entity never blocks the rest of the diagram.

mod class;
mod er;

pub use class::to_class_diagram;
pub use er::to_er_diagram;

use crate::model::Project;
use std::fmt;
use std::str::FromStr;

/// Diagram notation variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiagramKind {
    /// Mermaid erDiagram notation
    #[default]
    Er,
    /// Mermaid classDiagram notation with style classes
    Class,
}

impl FromStr for DiagramKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "er" | "erd" => Ok(DiagramKind::Er),
            "class" => Ok(DiagramKind::Class),
            _ => Err(format!("Unknown diagram format: {}. Valid options: er, class", s)),
        }
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagramKind::Er => write!(f, "er"),
            DiagramKind::Class => write!(f, "class"),
        }
    }
}

impl DiagramKind {
    /// File extension for Mermaid source
    pub fn extension(&self) -> &'static str {
        "mmd"
    }
}

/// Result of a diagram render: always a (possibly empty) text artifact
/// plus an optional error message, never an unhandled fault.
#[derive(Debug, Clone)]
pub struct DiagramOutput {
    pub text: String,
    pub error: Option<String>,
}

/// Render a project in the requested notation.
///
/// Any failure during traversal is converted into an empty artifact and
/// a human-readable message so the caller always gets a usable result.
pub fn render(project: &Project, kind: DiagramKind) -> DiagramOutput {
    let result = match kind {
        DiagramKind::Er => to_er_diagram(project),
        DiagramKind::Class => to_class_diagram(project),
    };

    match result {
        Ok(text) => DiagramOutput { text, error: None },
        Err(e) => DiagramOutput {
            text: String::new(),
            error: Some(format!("an error occurred while generating the diagram: {e}")),
        },
    }
}
