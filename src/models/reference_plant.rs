use serde::{Deserialize, Serialize};

/// Catalogue entry as stored and browsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferencePlant {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub image_res: Option<String>,
    pub watering: Option<String>,
    pub light: Option<String>,
    pub temperature: Option<String>,
    pub fertilizing: Option<String>,
    pub notes: Option<String>,
    pub toxicity_note: Option<String>,
    /// Ids of entries in the disease catalogue.
    pub disease_ids: Vec<i64>,
    pub is_favorite: bool,
}

/// Catalogue entry as shipped in the import JSON file.
#[derive(Debug, Clone, Deserialize)]
pub struct ReferencePlantRecord {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub light: String,
    #[serde(default)]
    pub watering: String,
    #[serde(default)]
    pub temperature: String,
    #[serde(default)]
    pub humidity: String,
    #[serde(default)]
    pub soil: String,
    #[serde(default)]
    pub fertilizer: String,
    #[serde(default)]
    pub propagation: Vec<String>,
    #[serde(default)]
    pub difficulties: String,
    #[serde(default)]
    pub diseases: Vec<i64>,
}

impl ReferencePlantRecord {
    /// Flatten the import record into a catalogue entry.
    pub fn into_reference_plant(self) -> ReferencePlant {
        let description = format!(
            "Soil: {}\nHumidity: {}\nTemperature: {}\nPropagation: {}\nDifficulties: {}",
            self.soil,
            self.humidity,
            self.temperature,
            self.propagation.join(", "),
            self.difficulties
        );

        ReferencePlant {
            id: 0,
            name: self.name,
            description,
            image_res: None,
            watering: non_empty(self.watering),
            light: non_empty(self.light),
            temperature: non_empty(self.temperature),
            fertilizing: non_empty(self.fertilizer),
            notes: None,
            toxicity_note: None,
            disease_ids: self.diseases,
            is_favorite: false,
        }
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() { None } else { Some(s) }
}
