use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Lesson,
    Quiz,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lesson => "lesson",
            Self::Quiz => "quiz",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "lesson" => Some(Self::Lesson),
            "quiz" => Some(Self::Quiz),
            _ => None,
        }
    }
}

/// One catalog entry. The engine only ever reads these; the content
/// service owns them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: String,
    pub title: String,
    pub kind: ContentKind,
    pub difficulty: f64,
    pub topics: Vec<String>,
    /// For quizzes, the lesson they belong to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lesson_id: Option<String>,
}

impl ContentItem {
    pub fn lesson(id: &str, title: &str, difficulty: f64, topics: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            kind: ContentKind::Lesson,
            difficulty,
            topics: topics.iter().map(|t| t.to_string()).collect(),
            lesson_id: None,
        }
    }

    pub fn quiz(id: &str, title: &str, difficulty: f64, topics: &[&str], lesson_id: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            kind: ContentKind::Quiz,
            difficulty,
            topics: topics.iter().map(|t| t.to_string()).collect(),
            lesson_id: Some(lesson_id.to_string()),
        }
    }

    pub fn covers_any(&self, topics: &[String]) -> bool {
        self.topics.iter().any(|t| topics.contains(t))
    }
}

/// Catalog access for the engine. Backed by Postgres in production and
/// by a fixed in-memory list in tests and store-less runs.
#[derive(Clone)]
pub enum Catalog {
    Memory(std::sync::Arc<Vec<ContentItem>>),
    Postgres(std::sync::Arc<crate::db::Database>),
}

impl Catalog {
    pub fn in_memory(items: Vec<ContentItem>) -> Self {
        Self::Memory(std::sync::Arc::new(items))
    }

    /// All lessons in catalog order.
    pub async fn lessons(&self) -> Result<Vec<ContentItem>, crate::engine::EngineError> {
        match self {
            Self::Memory(items) => Ok(items
                .iter()
                .filter(|i| i.kind == ContentKind::Lesson)
                .cloned()
                .collect()),
            Self::Postgres(db) => crate::db::operations::get_all_lessons(db)
                .await
                .map_err(|e| crate::engine::EngineError::Store(e.to_string())),
        }
    }

    /// All quizzes in catalog order.
    pub async fn quizzes(&self) -> Result<Vec<ContentItem>, crate::engine::EngineError> {
        match self {
            Self::Memory(items) => Ok(items
                .iter()
                .filter(|i| i.kind == ContentKind::Quiz)
                .cloned()
                .collect()),
            Self::Postgres(db) => crate::db::operations::get_all_quizzes(db)
                .await
                .map_err(|e| crate::engine::EngineError::Store(e.to_string())),
        }
    }

    pub async fn find(
        &self,
        content_id: &str,
        kind: ContentKind,
    ) -> Result<Option<ContentItem>, crate::engine::EngineError> {
        match self {
            Self::Memory(items) => Ok(items
                .iter()
                .find(|i| i.id == content_id && i.kind == kind)
                .cloned()),
            Self::Postgres(db) => crate::db::operations::get_content_item(db, content_id, kind)
                .await
                .map_err(|e| crate::engine::EngineError::Store(e.to_string())),
        }
    }
}
