//! Task relocation rules.
//!
//! Pure functions shared by the drag handler, the status dropdown and the
//! store. A move never duplicates or drops a task, and the moved task always
//! ends up with `status` equal to its destination column's name.

use serde::{Deserialize, Serialize};

use crate::app_data::TaskLocation;
use crate::index::clamp_insert;
use crate::Board;

/// Move one task, addressed by position, to another column/position of the same board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveTask {
    pub board_index: usize,
    pub from_column_index: usize,
    pub task_index: usize,
    pub to_column_index: usize,
    /// Insertion point in the destination after the task has been removed from
    /// the source. `None` appends.
    #[serde(default)]
    pub to_task_index: Option<usize>,
}

/// Apply `request` to `boards`.
///
/// Returns the task's new location, or `None` without touching anything when
/// the board, either column, or the task does not exist.
pub fn apply_move(boards: &mut [Board], request: &MoveTask) -> Option<TaskLocation> {
    let board = boards.get_mut(request.board_index)?;
    if request.to_column_index >= board.columns.len() {
        return None;
    }
    let source = board.columns.get_mut(request.from_column_index)?;
    if request.task_index >= source.tasks.len() {
        return None;
    }

    let mut task = source.tasks.remove(request.task_index);

    let destination = &mut board.columns[request.to_column_index];
    let insert_at = match request.to_task_index {
        Some(index) => clamp_insert(index, destination.tasks.len()),
        None => destination.tasks.len(),
    };
    task.status = destination.name.clone();
    destination.tasks.insert(insert_at, task);

    Some(TaskLocation {
        board_index: request.board_index,
        column_index: request.to_column_index,
        task_index: insert_at,
    })
}

/// Compute the move behind picking `status` in a task's status dropdown.
///
/// The task goes to the end of the first column named `status`. Returns
/// `None` when no column has that name, when it is the task's own column, or
/// when the task does not exist.
pub fn status_change(
    board: &Board,
    board_index: usize,
    column_index: usize,
    task_index: usize,
    status: &str,
) -> Option<MoveTask> {
    board.column(column_index)?.task(task_index)?;
    let to_column_index = board.column_position_by_name(status)?;
    if to_column_index == column_index {
        return None;
    }
    Some(MoveTask {
        board_index,
        from_column_index: column_index,
        task_index,
        to_column_index,
        to_task_index: Some(board.columns[to_column_index].tasks.len()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Column, Task};

    fn boards() -> Vec<Board> {
        vec![Board::with_columns(
            "Main",
            vec![
                Column::with_tasks(
                    "Todo",
                    vec![
                        Task::new("a", "Todo"),
                        Task::new("b", "Todo"),
                        Task::new("c", "Todo"),
                        Task::new("d", "Todo"),
                    ],
                ),
                Column::with_tasks("Done", vec![Task::new("x", "Done")]),
            ],
        )]
    }

    fn titles(boards: &[Board], column: usize) -> Vec<String> {
        boards[0].columns[column]
            .tasks
            .iter()
            .map(|t| t.title.clone())
            .collect()
    }

    #[test]
    fn test_move_across_columns_appends_and_sets_status() {
        let mut boards = boards();
        let location = apply_move(
            &mut boards,
            &MoveTask {
                board_index: 0,
                from_column_index: 0,
                task_index: 1,
                to_column_index: 1,
                to_task_index: None,
            },
        )
        .unwrap();

        assert_eq!(location.column_index, 1);
        assert_eq!(location.task_index, 1);
        assert_eq!(titles(&boards, 0), vec!["a", "c", "d"]);
        assert_eq!(titles(&boards, 1), vec!["x", "b"]);
        assert_eq!(boards[0].columns[1].tasks[1].status, "Done");
    }

    #[test]
    fn test_move_insert_index_is_clamped() {
        let mut boards = boards();
        let location = apply_move(
            &mut boards,
            &MoveTask {
                board_index: 0,
                from_column_index: 0,
                task_index: 0,
                to_column_index: 1,
                to_task_index: Some(50),
            },
        )
        .unwrap();

        assert_eq!(location.task_index, 1);
        assert_eq!(titles(&boards, 1), vec!["x", "a"]);
    }

    #[test]
    fn test_move_within_column_uses_index_after_removal() {
        let mut boards = boards();
        apply_move(
            &mut boards,
            &MoveTask {
                board_index: 0,
                from_column_index: 0,
                task_index: 0,
                to_column_index: 0,
                to_task_index: Some(2),
            },
        )
        .unwrap();

        assert_eq!(titles(&boards, 0), vec!["b", "c", "a", "d"]);
        assert_eq!(boards[0].task_count(), 5);
    }

    #[test]
    fn test_move_preserves_task_identity() {
        let mut boards = boards();
        let id = boards[0].columns[0].tasks[2].id;
        apply_move(
            &mut boards,
            &MoveTask {
                board_index: 0,
                from_column_index: 0,
                task_index: 2,
                to_column_index: 1,
                to_task_index: Some(0),
            },
        )
        .unwrap();

        assert_eq!(boards[0].columns[1].tasks[0].id, id);
    }

    #[test]
    fn test_invalid_moves_are_noops() {
        let invalid = [
            MoveTask {
                board_index: 3,
                from_column_index: 0,
                task_index: 0,
                to_column_index: 1,
                to_task_index: None,
            },
            MoveTask {
                board_index: 0,
                from_column_index: 5,
                task_index: 0,
                to_column_index: 1,
                to_task_index: None,
            },
            MoveTask {
                board_index: 0,
                from_column_index: 0,
                task_index: 0,
                to_column_index: 5,
                to_task_index: None,
            },
            MoveTask {
                board_index: 0,
                from_column_index: 0,
                task_index: 9,
                to_column_index: 1,
                to_task_index: None,
            },
        ];

        for request in invalid {
            let mut boards = boards();
            let before = boards.clone();
            assert!(apply_move(&mut boards, &request).is_none(), "{:?}", request);
            assert_eq!(boards, before);
        }
    }

    #[test]
    fn test_status_change() {
        let boards = boards();
        let request = status_change(&boards[0], 0, 0, 1, "Done").unwrap();
        assert_eq!(request.to_column_index, 1);
        assert_eq!(request.to_task_index, Some(1));

        assert!(status_change(&boards[0], 0, 0, 1, "Todo").is_none());
        assert!(status_change(&boards[0], 0, 0, 1, "Blocked").is_none());
        assert!(status_change(&boards[0], 0, 0, 10, "Done").is_none());
    }
}
