use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskCategory {
    Planting,
    Irrigation,
    Fertilizing,
    PestControl,
    Harvest,
    Other,
}

impl std::fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskCategory::Planting => write!(f, "Planting"),
            TaskCategory::Irrigation => write!(f, "Irrigation"),
            TaskCategory::Fertilizing => write!(f, "Fertilizing"),
            TaskCategory::PestControl => write!(f, "Pest Control"),
            TaskCategory::Harvest => write!(f, "Harvest"),
            TaskCategory::Other => write!(f, "Other"),
        }
    }
}

/// A scheduled activity on the farm calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmTask {
    pub id: Uuid,
    pub title: String,
    pub date: NaiveDate,
    pub category: TaskCategory,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl FarmTask {
    pub fn new(title: impl Into<String>, date: NaiveDate, category: TaskCategory) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            date,
            category,
            notes: None,
            completed: false,
        }
    }

    /// Create a task with notes attached.
    pub fn with_notes(
        title: impl Into<String>,
        date: NaiveDate,
        category: TaskCategory,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            notes: Some(notes.into()),
            ..Self::new(title, date, category)
        }
    }
}
