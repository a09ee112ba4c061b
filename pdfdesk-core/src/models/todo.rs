//! Todo schema

use serde::{Deserialize, Serialize};

/// A stored todo row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i32,
    pub name: String,
    pub completed: bool,
}

/// Body of `POST /todos/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoCreate {
    pub name: String,
    #[serde(default)]
    pub completed: bool,
}

/// Body of `PUT /todos/{id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TodoUpdate {
    /// Apply the supplied fields to `todo`, leaving the rest untouched.
    pub fn apply_to(&self, todo: &mut Todo) {
        if let Some(name) = &self.name {
            todo.name = name.clone();
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
    }
}

impl Todo {
    pub fn from_create(id: i32, req: TodoCreate) -> Self {
        Self {
            id,
            name: req.name,
            completed: req.completed,
        }
    }
}
