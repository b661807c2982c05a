use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::column::{Column, ColumnId};
use crate::index::clamp_index;
use crate::task::Task;

pub type BoardId = Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    #[serde(default = "Uuid::new_v4")]
    pub id: BoardId,
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Board {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            columns: Vec::new(),
        }
    }

    pub fn with_columns(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            columns,
            ..Self::new(name)
        }
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Column at `index` clamped into the column range; `None` when there are no columns.
    pub fn clamped_column_index(&self, index: usize) -> Option<usize> {
        clamp_index(index, self.columns.len())
    }

    pub fn column_position(&self, id: ColumnId) -> Option<usize> {
        self.columns.iter().position(|c| c.id == id)
    }

    /// First column whose name matches exactly. Duplicate names resolve to the leftmost.
    pub fn column_position_by_name(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.columns.iter().flat_map(|c| c.tasks.iter())
    }
}
