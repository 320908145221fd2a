use serde::{Deserialize, Serialize};

/// Closed set of glyph identifiers the view layer can render. Resolved here
/// at configuration time; the core never looks glyphs up by free-form name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Icon {
    Heart,
    Wind,
    Bone,
    Brain,
    Utensils,
    Activity,
}

impl Icon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Heart => "Heart",
            Self::Wind => "Wind",
            Self::Bone => "Bone",
            Self::Brain => "Brain",
            Self::Utensils => "Utensils",
            Self::Activity => "Activity",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "intermediate" => Self::Intermediate,
            "advanced" => Self::Advanced,
            _ => Self::Beginner,
        }
    }
}

/// A body-system grouping of game modules. `order` is display sequencing
/// only; nothing in the engine consults it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: Icon,
    pub color: String,
    pub order: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameModule {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub estimated_minutes: u32,
    pub learning_objectives: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_premium: Option<bool>,
}
