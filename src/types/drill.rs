//! Drill catalog types: Drill, Equipment, FamilyKey, DrillRow

use serde::{Deserialize, Serialize};

/// Catalog identifier of a single drill at a single level.
pub type DrillId = u32;

// ============================================================================
// Equipment
// ============================================================================

/// What the child needs to have on hand for a drill.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    /// Just a ball
    #[default]
    BallOnly,
    /// Ball plus a set of cones
    #[serde(alias = "cones")]
    BallCones,
}

impl Equipment {
    pub const ALL: [Equipment; 2] = [Equipment::BallOnly, Equipment::BallCones];

    /// Wire name used in queries and payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            Equipment::BallOnly => "ball_only",
            Equipment::BallCones => "ball_cones",
        }
    }

    /// Parse from string (for CLI/config)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ball_only" | "ball" => Some(Equipment::BallOnly),
            "ball_cones" | "cones" => Some(Equipment::BallCones),
            _ => None,
        }
    }
}

impl std::fmt::Display for Equipment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Drill
// ============================================================================

/// Immutable catalog entry: one exercise at one difficulty level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drill {
    pub id: DrillId,
    pub title: String,
    /// Family display name, e.g. "Toe Taps"
    pub family: String,
    pub skill: String,
    /// Difficulty level within the family, starting at 1
    pub level: u8,
    #[serde(rename = "requirements", alias = "equipment")]
    pub equipment: Equipment,
    pub instructions: String,
    #[serde(default, alias = "youtube_url", skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why_it_matters: Option<String>,
}

impl Drill {
    /// Grouping key: drills sharing title, skill and equipment form one family.
    pub fn family_key(&self) -> FamilyKey {
        FamilyKey {
            title: self.title.clone(),
            skill: self.skill.clone(),
            equipment: self.equipment,
        }
    }

    pub fn is_in_family(&self, key: &FamilyKey) -> bool {
        self.title == key.title && self.skill == key.skill && self.equipment == key.equipment
    }
}

/// Identity of a drill family.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FamilyKey {
    pub title: String,
    pub skill: String,
    pub equipment: Equipment,
}

impl std::fmt::Display for FamilyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}-{}", self.title, self.skill, self.equipment)
    }
}

// ============================================================================
// Display Row
// ============================================================================

/// Drill as presented to the client, carrying full catalog metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrillRow {
    pub id: DrillId,
    pub family_id: String,
    pub title: String,
    pub level: u8,
    pub skill: String,
    pub requirements: Equipment,
    pub instructions: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why_it_matters: Option<String>,
}

impl From<&Drill> for DrillRow {
    fn from(drill: &Drill) -> Self {
        Self {
            id: drill.id,
            family_id: drill.family.clone(),
            title: drill.title.clone(),
            level: drill.level,
            skill: drill.skill.clone(),
            requirements: drill.equipment,
            instructions: drill.instructions.clone(),
            youtube_url: drill.video_url.clone(),
            why_it_matters: drill.why_it_matters.clone(),
        }
    }
}
