use serde::{Deserialize, Serialize};

/// The single persisted entity.
///
/// `id` is assigned by the store on insert and is absent before creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Todo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub task: String,
    #[serde(default)]
    pub completed: bool,
}

/// Accepted request body for create and update.
///
/// `task` is required; a body without it (or with the wrong types) is
/// rejected at deserialization, before any SQL runs.
#[derive(Debug, Clone, Deserialize)]
pub struct TodoDraft {
    pub task: String,
    #[serde(default)]
    pub completed: bool,
}

/// Envelope for list responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoList {
    pub todos: Vec<Todo>,
}
