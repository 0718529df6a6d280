use super::locale::Locale;
use serde::{Deserialize, Serialize};

/// Kind of maintenance task a care event stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CareKind {
    Watering,
    Fertilizing,
    Spraying,
    Repotting,
}

impl CareKind {
    pub const ALL: [CareKind; 4] = [
        CareKind::Watering,
        CareKind::Fertilizing,
        CareKind::Spraying,
        CareKind::Repotting,
    ];

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            CareKind::Watering => "WATERING",
            CareKind::Fertilizing => "FERTILIZING",
            CareKind::Spraying => "SPRAYING",
            CareKind::Repotting => "REPOTTING",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "WATERING" => Some(CareKind::Watering),
            "FERTILIZING" => Some(CareKind::Fertilizing),
            "SPRAYING" => Some(CareKind::Spraying),
            "REPOTTING" => Some(CareKind::Repotting),
            _ => None,
        }
    }

    /// Helper: convert input code from CLI (`watering`, `W`, `water`, ...)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "w" | "water" | "watering" => Some(CareKind::Watering),
            "f" | "fertilize" | "fertilizing" => Some(CareKind::Fertilizing),
            "s" | "spray" | "spraying" => Some(CareKind::Spraying),
            "r" | "repot" | "repotting" => Some(CareKind::Repotting),
            _ => None,
        }
    }

    /// Localized display label, as carried in reminder payloads.
    pub fn label(&self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::En, CareKind::Watering) => "Watering",
            (Locale::En, CareKind::Fertilizing) => "Fertilizing",
            (Locale::En, CareKind::Spraying) => "Spraying",
            (Locale::En, CareKind::Repotting) => "Repotting",
            (Locale::Ru, CareKind::Watering) => "Полив",
            (Locale::Ru, CareKind::Fertilizing) => "Подкормка",
            (Locale::Ru, CareKind::Spraying) => "Опрыскивание",
            (Locale::Ru, CareKind::Repotting) => "Пересадка",
        }
    }

    /// Reverse lookup of [`CareKind::label`] across every supported locale.
    pub fn from_label(label: &str) -> Option<Self> {
        Locale::ALL.iter().find_map(|locale| {
            CareKind::ALL
                .into_iter()
                .find(|kind| kind.label(*locale) == label)
        })
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            CareKind::Watering => "🌊",
            CareKind::Fertilizing => "🌱",
            CareKind::Spraying => "💦",
            CareKind::Repotting => "🏺",
        }
    }
}
