//! The complete persisted domain state.
//!
//! `AppData` is the unit the store swaps, persists and hands to readers as
//! a snapshot. Boards are addressed by position for routing, and by stable
//! id when a reference has to survive earlier siblings being deleted.

use serde::{Deserialize, Serialize};

use crate::normalize::normalize_boards;
use crate::{Board, BoardId, Task, TaskId};

const DEFAULT_BOARDS: &str = include_str!("../data/default_boards.json");

/// Current position of a task inside `AppData`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskLocation {
    pub board_index: usize,
    pub column_index: usize,
    pub task_index: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppData {
    #[serde(default)]
    pub boards: Vec<Board>,
}

impl AppData {
    pub fn new(boards: Vec<Board>) -> Self {
        Self { boards }
    }

    /// The dataset shipped with the application, used when nothing has been persisted.
    pub fn bundled() -> Self {
        let payload: serde_json::Value = match serde_json::from_str(DEFAULT_BOARDS) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Bundled board data is not valid JSON: {}", e);
                return Self::default();
            }
        };
        match normalize_boards(&payload) {
            Ok(boards) => Self { boards },
            Err(e) => {
                tracing::warn!("Bundled board data rejected: {}", e);
                Self::default()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    pub fn board(&self, index: usize) -> Option<&Board> {
        self.boards.get(index)
    }

    pub fn task(&self, board_index: usize, column_index: usize, task_index: usize) -> Option<&Task> {
        self.board(board_index)?
            .column(column_index)?
            .task(task_index)
    }

    pub fn board_position(&self, id: BoardId) -> Option<usize> {
        self.boards.iter().position(|b| b.id == id)
    }

    pub fn locate_task(&self, id: TaskId) -> Option<TaskLocation> {
        self.boards
            .iter()
            .enumerate()
            .find_map(|(board_index, board)| {
                board
                    .columns
                    .iter()
                    .enumerate()
                    .find_map(|(column_index, column)| {
                        column.task_position(id).map(|task_index| TaskLocation {
                            board_index,
                            column_index,
                            task_index,
                        })
                    })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Column;

    #[test]
    fn test_bundled_data() {
        let data = AppData::bundled();
        assert_eq!(data.boards.len(), 3);
        assert_eq!(data.boards[0].name, "Platform Launch");
        assert_eq!(data.boards[0].column_names(), vec!["Todo", "Doing", "Done"]);
        assert_eq!(data.boards[2].name, "Roadmap");

        for board in &data.boards {
            for column in &board.columns {
                for task in &column.tasks {
                    assert_eq!(task.status, column.name);
                }
            }
        }
    }

    #[test]
    fn test_locate_task_survives_deletion_of_earlier_siblings() {
        let first = Task::new("first", "Todo");
        let second = Task::new("second", "Todo");
        let second_id = second.id;
        let mut data = AppData::new(vec![
            Board::new("Other"),
            Board::with_columns("Main", vec![Column::with_tasks("Todo", vec![first, second])]),
        ]);

        assert_eq!(
            data.locate_task(second_id),
            Some(TaskLocation {
                board_index: 1,
                column_index: 0,
                task_index: 1
            })
        );

        data.boards.remove(0);
        data.boards[0].columns[0].tasks.remove(0);

        assert_eq!(
            data.locate_task(second_id),
            Some(TaskLocation {
                board_index: 0,
                column_index: 0,
                task_index: 0
            })
        );
    }

    #[test]
    fn test_task_lookup_out_of_range() {
        let data = AppData::bundled();
        assert!(data.task(0, 0, 0).is_some());
        assert!(data.task(9, 0, 0).is_none());
        assert!(data.task(0, 9, 0).is_none());
        assert!(data.task(0, 0, 99).is_none());
    }

    #[test]
    fn test_partial_deserialization() {
        let data: AppData = serde_json::from_str("{}").unwrap();
        assert!(data.is_empty());
    }
}
