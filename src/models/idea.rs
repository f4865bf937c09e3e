use serde::Serialize;

/// One row of the development ideas table, as read for processing.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Idea {
    pub id: i64,
    pub idea: String,
    pub created_at: String,
}

/// Aggregate counters over the whole ideas table.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct IdeaStats {
    pub total: i64,
    pub completed: i64,
    pub pending: i64,
}

/// What the checker decided to do with a pending idea.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskKind {
    /// `Optimize image <path> for city <name>`
    OptimizeImage { path: String },
    Other,
}

impl TaskKind {
    pub fn classify(idea: &str) -> Self {
        if !(idea.contains("Optimize image") && idea.contains("for city")) {
            return TaskKind::Other;
        }

        let rest = idea.replacen("Optimize image ", "", 1);
        let raw = rest.split(" for city ").next().unwrap_or("").trim();
        let path = raw.strip_prefix("../").unwrap_or(raw).to_string();

        TaskKind::OptimizeImage { path }
    }
}
