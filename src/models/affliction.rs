use serde::{Deserialize, Serialize};
use std::fmt;

/// The two catalogues of plant problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AfflictionKind {
    Disease,
    Pest,
}

impl AfflictionKind {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            AfflictionKind::Disease => "DISEASE",
            AfflictionKind::Pest => "PEST",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "DISEASE" => Some(AfflictionKind::Disease),
            "PEST" => Some(AfflictionKind::Pest),
            _ => None,
        }
    }
}

impl fmt::Display for AfflictionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AfflictionKind::Disease => write!(f, "Disease"),
            AfflictionKind::Pest => write!(f, "Pest"),
        }
    }
}

/// A disease or pest entry of the reference catalogue.
///
/// `id` comes from the import file; reference plants point at diseases by it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Affliction {
    pub kind: AfflictionKind,
    pub id: i64,
    pub name: String,
    pub symptoms: Vec<String>,
    pub causes: Vec<String>,
    pub treatment: Vec<String>,
    pub prevention: String,
    pub affected_plants: Vec<String>,
    pub is_favorite: bool,
}

/// Entry as shipped in `diseases.json` / `pests.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct AfflictionRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub causes: Vec<String>,
    #[serde(default)]
    pub treatment: Vec<String>,
    #[serde(default)]
    pub prevention: String,
    #[serde(default)]
    pub affected_plants: Vec<String>,
    #[serde(default, alias = "isFavorite")]
    pub is_favorite: bool,
}

impl AfflictionRecord {
    pub fn into_affliction(self, kind: AfflictionKind) -> Affliction {
        Affliction {
            kind,
            id: self.id,
            name: self.name,
            symptoms: self.symptoms,
            causes: self.causes,
            treatment: self.treatment,
            prevention: self.prevention,
            affected_plants: self.affected_plants,
            is_favorite: self.is_favorite,
        }
    }
}
