//! Trackable catalog types: categories and the items they contain.
//!
//! The catalog is owned by the surrounding application; during a
//! conversational turn the engine only reads it. The mutation operations
//! here are the in-memory implementation of that collaborator, so a
//! session is usable without wiring up external storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// ID Types
// ============================================================================

/// Unique identifier for categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryId(pub Uuid);

impl CategoryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CategoryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for trackable items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Catalog Types
// ============================================================================

/// A single measurement a user can track, e.g. "Calories" in "Nutrition".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackItem {
    pub id: ItemId,
    pub name: String,
    /// Disabled items are hidden from pickers elsewhere; utterance
    /// matching considers them regardless.
    pub enabled: bool,
    /// Optional unit label shown next to values ("kcal", "kg", ...).
    pub unit: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TrackItem {
    /// Create a new enabled item with no unit.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ItemId::new(),
            name: name.into(),
            enabled: true,
            unit: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the unit label.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

/// A named group of trackable items.
///
/// Names are user-chosen free text. They are not guaranteed unique; the
/// matcher treats them as unique by taking the first match in scan order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub items: Vec<TrackItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Create a new empty category.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            name: name.into(),
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Add an item and return the category for chaining.
    pub fn with_item(mut self, item: TrackItem) -> Self {
        self.items.push(item);
        self
    }

    /// Find an item by id.
    pub fn item(&self, id: ItemId) -> Option<&TrackItem> {
        self.items.iter().find(|i| i.id == id)
    }

    fn item_mut(&mut self, id: ItemId) -> Option<&mut TrackItem> {
        self.items.iter_mut().find(|i| i.id == id)
    }
}

/// The full set of categories a user can track against.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog from pre-built categories.
    pub fn with_categories(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// The categories in scan order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Find a category by id.
    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Find an item within a category.
    pub fn item(&self, category_id: CategoryId, item_id: ItemId) -> Option<&TrackItem> {
        self.category(category_id).and_then(|c| c.item(item_id))
    }

    /// The display names of every category, in scan order.
    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    // ========================================================================
    // Collaborator write operations
    // ========================================================================

    /// Add a new empty category at the end of the scan order.
    pub fn add_category(&mut self, name: impl Into<String>) -> CategoryId {
        let category = Category::new(name);
        let id = category.id;
        self.categories.push(category);
        id
    }

    /// Rename a category. Returns false if the id is unknown.
    pub fn rename_category(&mut self, id: CategoryId, name: impl Into<String>) -> bool {
        match self.category_mut(id) {
            Some(category) => {
                category.name = name.into();
                category.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }

    /// Remove a category and all its items. Returns false if unknown.
    pub fn remove_category(&mut self, id: CategoryId) -> bool {
        let before = self.categories.len();
        self.categories.retain(|c| c.id != id);
        self.categories.len() != before
    }

    /// Add an item to a category. Returns the new item's id, or `None`
    /// if the category is unknown.
    pub fn add_item(
        &mut self,
        category_id: CategoryId,
        name: impl Into<String>,
        unit: Option<String>,
    ) -> Option<ItemId> {
        let category = self.category_mut(category_id)?;
        let mut item = TrackItem::new(name);
        item.unit = unit;
        let id = item.id;
        category.items.push(item);
        category.updated_at = Utc::now();
        Some(id)
    }

    /// Rename an item. Returns false if category or item is unknown.
    pub fn rename_item(
        &mut self,
        category_id: CategoryId,
        item_id: ItemId,
        name: impl Into<String>,
    ) -> bool {
        self.update_item(category_id, item_id, |item| item.name = name.into())
    }

    /// Replace an item's unit label. Returns false if unknown.
    pub fn set_item_unit(
        &mut self,
        category_id: CategoryId,
        item_id: ItemId,
        unit: Option<String>,
    ) -> bool {
        self.update_item(category_id, item_id, |item| item.unit = unit)
    }

    /// Flip an item's enabled flag. Returns false if unknown.
    pub fn toggle_item(&mut self, category_id: CategoryId, item_id: ItemId) -> bool {
        self.update_item(category_id, item_id, |item| item.enabled = !item.enabled)
    }

    /// Remove an item from its category. Returns false if unknown.
    pub fn remove_item(&mut self, category_id: CategoryId, item_id: ItemId) -> bool {
        let Some(category) = self.category_mut(category_id) else {
            return false;
        };
        let before = category.items.len();
        category.items.retain(|i| i.id != item_id);
        if category.items.len() != before {
            category.updated_at = Utc::now();
            true
        } else {
            false
        }
    }

    fn category_mut(&mut self, id: CategoryId) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| c.id == id)
    }

    fn update_item(
        &mut self,
        category_id: CategoryId,
        item_id: ItemId,
        apply: impl FnOnce(&mut TrackItem),
    ) -> bool {
        let Some(category) = self.category_mut(category_id) else {
            return false;
        };
        match category.item_mut(item_id) {
            Some(item) => {
                apply(item);
                item.updated_at = Utc::now();
                category.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }
}

/// Build the starter catalog a fresh session ships with.
pub fn sample_catalog() -> Catalog {
    Catalog::with_categories(vec![
        Category::new("Fitness")
            .with_item(TrackItem::new("Steps").with_unit("steps"))
            .with_item(TrackItem::new("Weight").with_unit("kg")),
        Category::new("Nutrition")
            .with_item(TrackItem::new("Calories").with_unit("kcal"))
            .with_item(TrackItem::new("Protein").with_unit("g"))
            .with_item(TrackItem::new("Carbs").with_unit("g")),
    ])
}
