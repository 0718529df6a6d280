use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plant {
    pub id: i64,            // ⇔ plants.id
    pub name: String,       // ⇔ plants.name (display name, never blank)
    pub plant_type: String, // ⇔ plants.type (free text category)
    pub notes: String,      // ⇔ plants.notes
}

impl Plant {
    /// A plant not yet stored: `id = 0` until the store assigns one.
    pub fn new(name: impl Into<String>, plant_type: impl Into<String>, notes: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            plant_type: plant_type.into(),
            notes: notes.into(),
        }
    }
}
