//! Drill Catalog
//!
//! Immutable drill library plus family grouping. A family is every drill that
//! shares title, skill and equipment; its members differ only by level.
//!
//! ## Sources
//!
//! 1. TOML file named by `[catalog] path` in the app config (`[[drill]]` tables)
//! 2. Built-in default library (`library::default_drills`)
//!
//! Every catalog is validated on construction:
//! - drill ids are unique
//! - levels start at 1
//! - each (family, level) pair appears once
//! - a family name maps to exactly one family key

mod library;

pub use library::default_drills;

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::types::{Drill, DrillId, Equipment, FamilyKey};

/// Errors raised while loading or validating a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog I/O error ({0}): {1}")]
    Io(PathBuf, #[source] std::io::Error),
    #[error("catalog parse error ({0}): {1}")]
    Parse(PathBuf, #[source] toml::de::Error),
    #[error("duplicate drill id {0}")]
    DuplicateId(DrillId),
    #[error("drill {id} has invalid level {level} (levels start at 1)")]
    InvalidLevel { id: DrillId, level: u8 },
    #[error("family '{family}' has more than one drill at level {level}")]
    DuplicateLevel { family: String, level: u8 },
    #[error("family name '{0}' is used by drills with different title/skill/equipment")]
    FamilyNameConflict(String),
}

/// On-disk catalog layout.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "drill")]
    drills: Vec<Drill>,
}

// ============================================================================
// Family View
// ============================================================================

/// Borrowed view of one family: members sorted by ascending level.
///
/// Never empty. Construction goes through [`Catalog::group`].
#[derive(Debug, Clone)]
pub struct Family<'a> {
    pub key: FamilyKey,
    pub family_id: &'a str,
    pub drills: Vec<&'a Drill>,
}

impl<'a> Family<'a> {
    /// Lowest-level member.
    pub fn first(&self) -> &'a Drill {
        self.drills[0]
    }

    pub fn base_level(&self) -> u8 {
        self.first().level
    }

    pub fn at_level(&self, level: u8) -> Option<&'a Drill> {
        self.drills.iter().copied().find(|d| d.level == level)
    }

    pub fn contains(&self, id: DrillId) -> bool {
        self.drills.iter().any(|d| d.id == id)
    }

    pub fn level_of(&self, id: DrillId) -> Option<u8> {
        self.drills.iter().find(|d| d.id == id).map(|d| d.level)
    }

    pub fn max_level(&self) -> u8 {
        self.drills.iter().map(|d| d.level).max().unwrap_or(1)
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Validated, immutable drill library.
#[derive(Debug, Clone)]
pub struct Catalog {
    drills: Vec<Drill>,
    by_id: HashMap<DrillId, usize>,
}

impl Catalog {
    /// The built-in default library.
    pub fn builtin() -> Self {
        // The default library is covered by `test_builtin_catalog_is_valid`.
        let drills = default_drills();
        let by_id = drills.iter().enumerate().map(|(i, d)| (d.id, i)).collect();
        Self { drills, by_id }
    }

    /// Build a catalog from drills, enforcing the family invariants.
    pub fn from_drills(drills: Vec<Drill>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(drills.len());
        let mut levels: HashSet<(FamilyKey, u8)> = HashSet::new();
        let mut family_names: HashMap<&str, FamilyKey> = HashMap::new();

        for (idx, drill) in drills.iter().enumerate() {
            if by_id.insert(drill.id, idx).is_some() {
                return Err(CatalogError::DuplicateId(drill.id));
            }
            if drill.level == 0 {
                return Err(CatalogError::InvalidLevel {
                    id: drill.id,
                    level: drill.level,
                });
            }
            let key = drill.family_key();
            if !levels.insert((key.clone(), drill.level)) {
                return Err(CatalogError::DuplicateLevel {
                    family: drill.family.clone(),
                    level: drill.level,
                });
            }
            match family_names.get(drill.family.as_str()) {
                Some(existing) if *existing != key => {
                    return Err(CatalogError::FamilyNameConflict(drill.family.clone()));
                }
                Some(_) => {}
                None => {
                    family_names.insert(drill.family.as_str(), key);
                }
            }
        }

        Ok(Self { drills, by_id })
    }

    /// Load a catalog from a TOML file of `[[drill]]` tables.
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Io(path.to_path_buf(), e))?;
        let file: CatalogFile = toml::from_str(&contents)
            .map_err(|e| CatalogError::Parse(path.to_path_buf(), e))?;
        let catalog = Self::from_drills(file.drills)?;
        info!(path = %path.display(), drills = catalog.len(), "Loaded drill catalog");
        Ok(catalog)
    }

    /// Load from the configured path, or fall back to the built-in library.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(p) => Self::load_from_file(p),
            None => {
                info!("No catalog path configured, using built-in drill library");
                Ok(Self::builtin())
            }
        }
    }

    pub fn drills(&self) -> &[Drill] {
        &self.drills
    }

    pub fn len(&self) -> usize {
        self.drills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drills.is_empty()
    }

    pub fn get(&self, id: DrillId) -> Option<&Drill> {
        self.by_id.get(&id).map(|&i| &self.drills[i])
    }

    /// Drills usable with the given equipment, in catalog order.
    pub fn by_equipment(&self, equipment: Equipment) -> impl Iterator<Item = &Drill> {
        self.drills.iter().filter(move |d| d.equipment == equipment)
    }

    /// Group drills into families, in order of first encounter.
    pub fn group<'a>(drills: impl IntoIterator<Item = &'a Drill>) -> Vec<Family<'a>> {
        let mut families: Vec<Family<'a>> = Vec::new();
        let mut index: HashMap<FamilyKey, usize> = HashMap::new();

        for drill in drills {
            let key = drill.family_key();
            match index.get(&key) {
                Some(&i) => families[i].drills.push(drill),
                None => {
                    index.insert(key.clone(), families.len());
                    families.push(Family {
                        key,
                        family_id: drill.family.as_str(),
                        drills: vec![drill],
                    });
                }
            }
        }

        for family in &mut families {
            family.drills.sort_by_key(|d| d.level);
        }
        families
    }

    /// All families for the given equipment.
    pub fn families(&self, equipment: Equipment) -> Vec<Family<'_>> {
        Self::group(self.by_equipment(equipment))
    }

    /// The complete family for a key.
    pub fn family(&self, key: &FamilyKey) -> Option<Family<'_>> {
        Self::group(self.drills.iter().filter(|d| d.is_in_family(key)))
            .into_iter()
            .next()
    }

    /// The complete family a drill belongs to.
    pub fn family_of(&self, id: DrillId) -> Option<Family<'_>> {
        self.family(&self.get(id)?.family_key())
    }

    /// Look up a family by its display name.
    pub fn family_by_id(&self, family_id: &str) -> Option<Family<'_>> {
        Self::group(self.drills.iter().filter(|d| d.family == family_id))
            .into_iter()
            .next()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
