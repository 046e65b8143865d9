//! Note type catalog and lenient lookup.
//!
//! # Responsibility
//! - Define the categorization tags applied to session notes.
//! - Provide the builtin catalog and the well-known synthetic types used by
//!   drawing, exercise and planning notes.
//!
//! # Invariants
//! - Lookups never fail; every resolve path yields a usable `NoteType`.
//! - Synthetic well-known types are never inserted back into a registry.
//! - Registry ids are unique and the catalog is never empty.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Type id of the synthetic pre-session planning type.
pub const PLANNING_TYPE_ID: &str = "pre-session";
/// Type id of the synthetic exercise type.
pub const EXERCISE_TYPE_ID: &str = "exercise";
/// Type id of the synthetic drawing type.
pub const DRAWING_TYPE_ID: &str = "drawing";

/// Category tag applied to a note, carried by value on each note.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteType {
    pub id: String,
    /// Display label. Also inspected by the timeline classifier.
    pub name: String,
    /// Hex display color, e.g. `#3b82f6`.
    pub color: String,
    /// Symbolic icon key resolved by the rendering layer.
    pub icon: String,
    pub visible: bool,
}

impl NoteType {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        color: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
            icon: icon.into(),
            visible: true,
        }
    }

    /// Returns a copy flagged as hidden from type pickers.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// Special note categories that own one canonical synthetic type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WellKnownType {
    Planning,
    Exercise,
    Drawing,
}

impl WellKnownType {
    pub fn type_id(self) -> &'static str {
        match self {
            Self::Planning => PLANNING_TYPE_ID,
            Self::Exercise => EXERCISE_TYPE_ID,
            Self::Drawing => DRAWING_TYPE_ID,
        }
    }

    /// Canonical synthetic type used when the catalog has no matching entry.
    pub fn synthetic(self) -> NoteType {
        match self {
            Self::Planning => NoteType::new(PLANNING_TYPE_ID, "Pre-session planning", "#64748b", "clipboard-list"),
            Self::Exercise => NoteType::new(EXERCISE_TYPE_ID, "Exercise", "#0ea5e9", "activity"),
            Self::Drawing => NoteType::new(DRAWING_TYPE_ID, "Drawing", "#d946ef", "pencil"),
        }
    }
}

static BUILTIN_REGISTRY: Lazy<NoteTypeRegistry> = Lazy::new(|| NoteTypeRegistry {
    types: vec![
        NoteType::new("observation", "Observation", "#3b82f6", "eye"),
        NoteType::new("intervention", "Intervention", "#10b981", "wrench"),
        NoteType::new("quote", "Client Quote", "#8b5cf6", "quote"),
        NoteType::new("homework", "Homework", "#f59e0b", "book-open"),
        NoteType::new("risk", "Risk", "#ef4444", "alert-triangle"),
        NoteType::new("internal", "Internal", "#94a3b8", "lock").hidden(),
    ],
});

/// Registry construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    EmptyCatalog,
    DuplicateTypeId(String),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCatalog => write!(f, "note type catalog must not be empty"),
            Self::DuplicateTypeId(id) => write!(f, "note type id already registered: {id}"),
        }
    }
}

impl Error for RegistryError {}

/// Immutable catalog of note types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteTypeRegistry {
    types: Vec<NoteType>,
}

impl NoteTypeRegistry {
    /// Builds a custom catalog.
    ///
    /// # Errors
    /// - `EmptyCatalog` when `types` is empty.
    /// - `DuplicateTypeId` when two entries share an id.
    pub fn new(types: Vec<NoteType>) -> Result<Self, RegistryError> {
        if types.is_empty() {
            return Err(RegistryError::EmptyCatalog);
        }
        let mut seen = BTreeSet::new();
        for note_type in &types {
            if !seen.insert(note_type.id.as_str()) {
                return Err(RegistryError::DuplicateTypeId(note_type.id.clone()));
            }
        }
        Ok(Self { types })
    }

    /// Process-wide builtin catalog.
    pub fn builtin() -> &'static NoteTypeRegistry {
        &BUILTIN_REGISTRY
    }

    pub fn all(&self) -> &[NoteType] {
        &self.types
    }

    /// Entries offered in type pickers.
    pub fn visible(&self) -> impl Iterator<Item = &NoteType> {
        self.types.iter().filter(|note_type| note_type.visible)
    }

    /// Looks up by exact name, then by exact id.
    pub fn resolve(&self, name_or_id: &str) -> Option<&NoteType> {
        self.types
            .iter()
            .find(|note_type| note_type.name == name_or_id)
            .or_else(|| self.types.iter().find(|note_type| note_type.id == name_or_id))
    }

    /// Resolves with a caller-supplied fallback.
    pub fn resolve_or(&self, name_or_id: &str, fallback: NoteType) -> NoteType {
        self.resolve(name_or_id).cloned().unwrap_or(fallback)
    }

    /// Resolves, falling back to the first catalog entry.
    pub fn resolve_or_first(&self, name_or_id: &str) -> NoteType {
        self.resolve(name_or_id)
            .unwrap_or(&self.types[0])
            .clone()
    }

    /// Resolves a special category through the central synthetic table.
    pub fn resolve_well_known(&self, kind: WellKnownType) -> NoteType {
        let synthetic = kind.synthetic();
        self.types
            .iter()
            .find(|note_type| note_type.id == synthetic.id || note_type.name == synthetic.name)
            .cloned()
            .unwrap_or(synthetic)
    }
}

impl Default for NoteTypeRegistry {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::{NoteType, NoteTypeRegistry, RegistryError, WellKnownType};

    #[test]
    fn resolve_prefers_name_then_id() {
        let registry = NoteTypeRegistry::builtin();
        assert_eq!(registry.resolve("Homework").map(|t| t.id.as_str()), Some("homework"));
        assert_eq!(registry.resolve("risk").map(|t| t.name.as_str()), Some("Risk"));
        assert!(registry.resolve("homework ").is_none());
    }

    #[test]
    fn resolve_or_first_never_fails() {
        let registry = NoteTypeRegistry::builtin();
        assert_eq!(registry.resolve_or_first("nope").id, "observation");
    }

    #[test]
    fn well_known_prefers_catalog_entry() {
        let custom = NoteTypeRegistry::new(vec![
            NoteType::new("observation", "Observation", "#000000", "eye"),
            NoteType::new("drawing", "Sketch", "#111111", "brush"),
        ])
        .expect("valid registry");

        assert_eq!(custom.resolve_well_known(WellKnownType::Drawing).name, "Sketch");
        assert_eq!(
            custom.resolve_well_known(WellKnownType::Exercise),
            WellKnownType::Exercise.synthetic()
        );
        assert_eq!(custom.all().len(), 2);
    }

    #[test]
    fn new_rejects_empty_and_duplicate_catalogs() {
        assert_eq!(NoteTypeRegistry::new(vec![]), Err(RegistryError::EmptyCatalog));
        let dup = NoteTypeRegistry::new(vec![
            NoteType::new("a", "A", "#000000", "x"),
            NoteType::new("a", "B", "#000000", "x"),
        ]);
        assert_eq!(dup, Err(RegistryError::DuplicateTypeId("a".to_string())));
    }

    #[test]
    fn visible_hides_internal_types() {
        let names: Vec<&str> = NoteTypeRegistry::builtin()
            .visible()
            .map(|t| t.name.as_str())
            .collect();
        assert!(!names.contains(&"Internal"));
        assert_eq!(names.len(), 5);
    }
}
