//! File-backed project store.
//!
//! This module provides:
//! - Load/save of a project file (YAML by default, JSON by extension)
//! - Entity lifecycle: add, update, remove with cascade handling
//! - Write-boundary invariants: unique names, resolvable Satellite
//!   parents, names that sanitize to a usable identifier
//!
//! The render path never writes; everything that can leave the model
//! structurally broken in storage is rejected here instead.

use crate::ident::{is_degenerate, sanitize};
use crate::model::{
    Attribute, EntityId, Hub, Link, ParentKind, ParentRef, Project, Satellite,
    DEFAULT_RECORD_SOURCE,
};
use anyhow::{bail, Context, Result};
use chrono::Utc;
use std::fs;
use std::path::Path;

/// On-disk serialization format for the project file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Yaml,
    Json,
}

impl FileFormat {
    /// Detect format from the file extension; YAML is the default
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => FileFormat::Json,
            _ => FileFormat::Yaml,
        }
    }
}

/// Owns a project and enforces its write-boundary invariants.
#[derive(Debug)]
pub struct ProjectStore {
    project: Project,
}

impl ProjectStore {
    /// Create a store around a fresh, empty project
    pub fn create(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            project: Project::new(name, description),
        }
    }

    /// Wrap an already-built project (used by tests and filtering)
    pub fn from_project(project: Project) -> Self {
        let mut store = Self { project };
        store.fix_next_id();
        store
    }

    /// Load a project file, detecting the format from its extension
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read project file: {}", path.display()))?;

        let project: Project = match FileFormat::from_path(path) {
            FileFormat::Json => serde_json::from_str(&raw)
                .with_context(|| format!("invalid JSON project file: {}", path.display()))?,
            FileFormat::Yaml => serde_yaml_ng::from_str(&raw)
                .with_context(|| format!("invalid YAML project file: {}", path.display()))?,
        };

        Ok(Self::from_project(project))
    }

    /// Save the project, format chosen by the target extension
    pub fn save(&self, path: &Path) -> Result<()> {
        let raw = match FileFormat::from_path(path) {
            FileFormat::Json => serde_json::to_string_pretty(&self.project)?,
            FileFormat::Yaml => serde_yaml_ng::to_string(&self.project)?,
        };
        fs::write(path, raw)
            .with_context(|| format!("failed to write project file: {}", path.display()))?;
        Ok(())
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn into_project(self) -> Project {
        self.project
    }

    /// Add a Hub. The name must be unique among Hubs and sanitize to a
    /// non-degenerate identifier.
    pub fn add_hub(
        &mut self,
        name: &str,
        business_key: &str,
        description: Option<String>,
    ) -> Result<EntityId> {
        self.check_entity_name("hub", name)?;
        if self.project.hub_by_name(name).is_some() {
            bail!("a hub named '{}' already exists", name);
        }

        let id = self.alloc_id();
        self.project.hubs.push(Hub {
            id,
            name: name.to_string(),
            business_key: business_key.to_string(),
            description,
            load_date: Utc::now(),
            record_source: DEFAULT_RECORD_SOURCE.to_string(),
        });
        Ok(id)
    }

    /// Add a Link referencing Hubs by name, in the given order.
    ///
    /// Every referenced Hub must exist. Fewer than two Hubs is accepted
    /// (the engine tolerates it); `validate` reports it as a warning.
    pub fn add_link(
        &mut self,
        name: &str,
        hub_names: &[String],
        description: Option<String>,
    ) -> Result<EntityId> {
        self.check_entity_name("link", name)?;
        if self.project.link_by_name(name).is_some() {
            bail!("a link named '{}' already exists", name);
        }

        let hub_ids = self.resolve_hub_names(hub_names)?;
        let id = self.alloc_id();
        self.project.links.push(Link {
            id,
            name: name.to_string(),
            hubs: hub_ids,
            description,
            load_date: Utc::now(),
            record_source: DEFAULT_RECORD_SOURCE.to_string(),
        });
        Ok(id)
    }

    /// Add a Satellite parented on an existing Hub or Link.
    ///
    /// A parent that does not resolve is a hard error: a parentless
    /// Satellite is structurally meaningless and must never be persisted.
    pub fn add_satellite(
        &mut self,
        name: &str,
        parent_kind: ParentKind,
        parent_name: &str,
        attributes: Vec<Attribute>,
    ) -> Result<EntityId> {
        self.check_entity_name("satellite", name)?;
        let parent = self.resolve_parent_name(parent_kind, parent_name)?;

        if self
            .project
            .satellites
            .iter()
            .any(|s| s.name == name && s.parent == parent)
        {
            bail!(
                "a satellite named '{}' already exists on {} '{}'",
                name,
                parent_kind,
                parent_name
            );
        }
        check_attributes(&attributes)?;

        let id = self.alloc_id();
        self.project.satellites.push(Satellite {
            id,
            name: name.to_string(),
            parent,
            attributes,
            load_date: Utc::now(),
            record_source: DEFAULT_RECORD_SOURCE.to_string(),
        });
        Ok(id)
    }

    /// Update a Hub's name and/or business key
    pub fn update_hub(
        &mut self,
        name: &str,
        new_name: Option<&str>,
        business_key: Option<&str>,
    ) -> Result<()> {
        if let Some(new_name) = new_name {
            self.check_entity_name("hub", new_name)?;
            if new_name != name && self.project.hub_by_name(new_name).is_some() {
                bail!("a hub named '{}' already exists", new_name);
            }
        }

        let hub = self
            .project
            .hubs
            .iter_mut()
            .find(|h| h.name == name)
            .with_context(|| format!("no hub named '{}'", name))?;

        if let Some(new_name) = new_name {
            hub.name = new_name.to_string();
        }
        if let Some(business_key) = business_key {
            hub.business_key = business_key.to_string();
        }
        Ok(())
    }

    /// Update a Link's name and/or referenced Hub set
    pub fn update_link(
        &mut self,
        name: &str,
        new_name: Option<&str>,
        hub_names: Option<&[String]>,
    ) -> Result<()> {
        if let Some(new_name) = new_name {
            self.check_entity_name("link", new_name)?;
            if new_name != name && self.project.link_by_name(new_name).is_some() {
                bail!("a link named '{}' already exists", new_name);
            }
        }
        let hub_ids = hub_names.map(|names| self.resolve_hub_names(names)).transpose()?;

        let link = self
            .project
            .links
            .iter_mut()
            .find(|l| l.name == name)
            .with_context(|| format!("no link named '{}'", name))?;

        if let Some(new_name) = new_name {
            link.name = new_name.to_string();
        }
        if let Some(hub_ids) = hub_ids {
            link.hubs = hub_ids;
        }
        Ok(())
    }

    /// Update a Satellite's name, parent, and/or attribute list.
    ///
    /// Re-parenting goes through the same resolvability check as
    /// construction; an unresolvable parent is rejected.
    pub fn update_satellite(
        &mut self,
        name: &str,
        new_name: Option<&str>,
        parent: Option<(ParentKind, &str)>,
        attributes: Option<Vec<Attribute>>,
    ) -> Result<()> {
        if let Some(new_name) = new_name {
            self.check_entity_name("satellite", new_name)?;
        }
        let parent_ref = parent
            .map(|(kind, parent_name)| self.resolve_parent_name(kind, parent_name))
            .transpose()?;
        if let Some(ref attributes) = attributes {
            check_attributes(attributes)?;
        }

        let satellite = self
            .project
            .satellites
            .iter_mut()
            .find(|s| s.name == name)
            .with_context(|| format!("no satellite named '{}'", name))?;

        if let Some(new_name) = new_name {
            satellite.name = new_name.to_string();
        }
        if let Some(parent_ref) = parent_ref {
            satellite.parent = parent_ref;
        }
        if let Some(attributes) = attributes {
            satellite.attributes = attributes;
        }
        Ok(())
    }

    /// Remove a Hub.
    ///
    /// By default dependents cascade: Satellites parented on the Hub are
    /// removed and Links drop it from their Hub set. With
    /// `keep_dependents` the references are left dangling; renderers
    /// omit the affected fields.
    pub fn remove_hub(&mut self, name: &str, keep_dependents: bool) -> Result<()> {
        let hub_id = self
            .project
            .hub_by_name(name)
            .map(|h| h.id)
            .with_context(|| format!("no hub named '{}'", name))?;

        self.project.hubs.retain(|h| h.id != hub_id);

        if !keep_dependents {
            for link in &mut self.project.links {
                link.hubs.retain(|&id| id != hub_id);
            }
            self.project.satellites.retain(|s| {
                !(s.parent.kind == ParentKind::Hub && s.parent.id == hub_id)
            });
        }
        Ok(())
    }

    /// Remove a Link, cascading to its Satellites unless `keep_dependents`
    pub fn remove_link(&mut self, name: &str, keep_dependents: bool) -> Result<()> {
        let link_id = self
            .project
            .link_by_name(name)
            .map(|l| l.id)
            .with_context(|| format!("no link named '{}'", name))?;

        self.project.links.retain(|l| l.id != link_id);

        if !keep_dependents {
            self.project.satellites.retain(|s| {
                !(s.parent.kind == ParentKind::Link && s.parent.id == link_id)
            });
        }
        Ok(())
    }

    /// Remove a Satellite by name
    pub fn remove_satellite(&mut self, name: &str) -> Result<()> {
        let before = self.project.satellites.len();
        self.project.satellites.retain(|s| s.name != name);
        if self.project.satellites.len() == before {
            bail!("no satellite named '{}'", name);
        }
        Ok(())
    }

    fn alloc_id(&mut self) -> EntityId {
        let id = EntityId(self.project.next_id);
        self.project.next_id += 1;
        id
    }

    /// Hand-edited files may carry a stale counter; ids must stay unique
    fn fix_next_id(&mut self) {
        let max_id = self
            .project
            .hubs
            .iter()
            .map(|h| h.id.0)
            .chain(self.project.links.iter().map(|l| l.id.0))
            .chain(self.project.satellites.iter().map(|s| s.id.0))
            .max()
            .unwrap_or(0);
        if self.project.next_id <= max_id {
            self.project.next_id = max_id + 1;
        }
    }

    fn check_entity_name(&self, kind: &str, name: &str) -> Result<()> {
        if is_degenerate(&sanitize(name)) {
            bail!(
                "{} name '{}' contains no usable identifier characters",
                kind,
                name
            );
        }
        Ok(())
    }

    fn resolve_hub_names(&self, names: &[String]) -> Result<Vec<EntityId>> {
        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            let hub = self
                .project
                .hub_by_name(name)
                .with_context(|| format!("no hub named '{}'", name))?;
            if ids.contains(&hub.id) {
                bail!("hub '{}' referenced more than once", name);
            }
            ids.push(hub.id);
        }
        Ok(ids)
    }

    fn resolve_parent_name(&self, kind: ParentKind, name: &str) -> Result<ParentRef> {
        let id = match kind {
            ParentKind::Hub => self.project.hub_by_name(name).map(|h| h.id),
            ParentKind::Link => self.project.link_by_name(name).map(|l| l.id),
        };
        let id = id.with_context(|| {
            format!("satellite parent does not resolve: no {} named '{}'", kind, name)
        })?;
        Ok(ParentRef { kind, id })
    }
}

fn check_attributes(attributes: &[Attribute]) -> Result<()> {
    for (i, attr) in attributes.iter().enumerate() {
        if attr.name.trim().is_empty() {
            bail!("attribute #{} has an empty name", i + 1);
        }
        if attributes[..i].iter().any(|a| a.name == attr.name) {
            bail!("duplicate attribute name '{}'", attr.name);
        }
    }
    Ok(())
}
