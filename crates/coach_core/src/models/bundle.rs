use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type BundleId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Basic,
    Principle,
    Tactic,
}

impl ItemKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            ItemKind::Basic => "Basics",
            ItemKind::Principle => "Principles",
            ItemKind::Tactic => "Tactics",
        }
    }
}

/// Read-only reference to a basics/principles/tactics library entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub kind: ItemKind,
}

impl CatalogItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: ItemKind) -> Self {
        Self { id: id.into(), name: name.into(), description: String::new(), kind }
    }
}

/// A reusable training plan: a named group of basics, principles and tactics
/// dropped onto a session timeline as one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanBundle {
    pub id: BundleId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub basics: Vec<CatalogItem>,
    #[serde(default)]
    pub principles: Vec<CatalogItem>,
    #[serde(default)]
    pub tactics: Vec<CatalogItem>,
}

impl PlanBundle {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            basics: Vec::new(),
            principles: Vec::new(),
            tactics: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Adds an item to the sub-collection matching its kind.
    pub fn with_item(mut self, item: CatalogItem) -> Self {
        match item.kind {
            ItemKind::Basic => self.basics.push(item),
            ItemKind::Principle => self.principles.push(item),
            ItemKind::Tactic => self.tactics.push(item),
        }
        self
    }

    pub fn item_count(&self) -> usize {
        self.basics.len() + self.principles.len() + self.tactics.len()
    }

    /// Case-insensitive match on name or description (plan search box).
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }
}

/// Resolves bundle ids against the external plan catalog.
pub trait BundleLookup {
    fn bundle(&self, id: &str) -> Option<PlanBundle>;
}

impl BundleLookup for [PlanBundle] {
    fn bundle(&self, id: &str) -> Option<PlanBundle> {
        self.iter().find(|b| b.id == id).cloned()
    }
}

impl BundleLookup for Vec<PlanBundle> {
    fn bundle(&self, id: &str) -> Option<PlanBundle> {
        self.as_slice().bundle(id)
    }
}

impl BundleLookup for HashMap<BundleId, PlanBundle> {
    fn bundle(&self, id: &str) -> Option<PlanBundle> {
        self.get(id).cloned()
    }
}
