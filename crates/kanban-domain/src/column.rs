use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::task::{Task, TaskId};

pub type ColumnId = Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    #[serde(default = "Uuid::new_v4")]
    pub id: ColumnId,
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            tasks: Vec::new(),
        }
    }

    pub fn with_tasks(name: impl Into<String>, tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            ..Self::new(name)
        }
    }

    pub fn task(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn task_position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }
}
