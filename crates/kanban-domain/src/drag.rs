//! Drag-and-drop identifiers and drop resolution.
//!
//! Sortable items are tagged `task-<column>-<index>` and droppable lanes
//! `column-<column>`. When a drag ends, the pointer library reports the id of
//! the dragged item and the id it was released over; this module turns that
//! pair into a [`MoveTask`].

use std::fmt;
use std::str::FromStr;

use crate::moves::MoveTask;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragId {
    Task { column_index: usize, task_index: usize },
    Column { column_index: usize },
}

impl DragId {
    pub fn column_index(&self) -> usize {
        match *self {
            DragId::Task { column_index, .. } | DragId::Column { column_index } => column_index,
        }
    }
}

impl fmt::Display for DragId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DragId::Task {
                column_index,
                task_index,
            } => write!(f, "task-{}-{}", column_index, task_index),
            DragId::Column { column_index } => write!(f, "column-{}", column_index),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDragIdError(String);

impl fmt::Display for ParseDragIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid drag id: {:?}", self.0)
    }
}

impl std::error::Error for ParseDragIdError {}

fn parse_digits(part: &str) -> Option<usize> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl FromStr for DragId {
    type Err = ParseDragIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseDragIdError(s.to_string());

        if let Some(rest) = s.strip_prefix("task-") {
            let (column, task) = rest.split_once('-').ok_or_else(err)?;
            return Ok(DragId::Task {
                column_index: parse_digits(column).ok_or_else(err)?,
                task_index: parse_digits(task).ok_or_else(err)?,
            });
        }
        if let Some(column) = s.strip_prefix("column-") {
            return Ok(DragId::Column {
                column_index: parse_digits(column).ok_or_else(err)?,
            });
        }
        Err(err())
    }
}

/// Which side of the target task the dragged task lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Before,
    After,
}

/// Resolve a finished drag gesture from its raw ids.
///
/// Dropping on a task takes that task's place: moving down within the same
/// column lands after it, so dropping task 0 on task 2 leaves it at index 2.
/// Every other case lands before the target. Dropping on a column appends.
/// Returns `None` when nothing should move.
pub fn resolve_drop(board_index: usize, active: &str, over: &str) -> Option<MoveTask> {
    if active == over {
        return None;
    }
    let active: DragId = active.parse().ok()?;
    let over: DragId = over.parse().ok()?;

    let placement = match (active, over) {
        (
            DragId::Task {
                column_index: from_column,
                task_index: from_task,
            },
            DragId::Task {
                column_index: to_column,
                task_index: to_task,
            },
        ) if from_column == to_column && from_task < to_task => Placement::After,
        _ => Placement::Before,
    };
    resolve_drop_with_placement(board_index, active, over, placement)
}

/// Resolve a drop where the caller already knows which side of `over` the task goes.
///
/// The insertion point is computed against the column as it looks before the
/// dragged task is removed, then shifted down by one when the task came from
/// earlier in the same column, because the store inserts after removal.
pub fn resolve_drop_with_placement(
    board_index: usize,
    active: DragId,
    over: DragId,
    placement: Placement,
) -> Option<MoveTask> {
    let DragId::Task {
        column_index: from_column_index,
        task_index,
    } = active
    else {
        return None;
    };
    if active == over {
        return None;
    }

    let to_column_index = over.column_index();
    let to_task_index = match over {
        DragId::Column { .. } => None,
        DragId::Task {
            task_index: over_index,
            ..
        } => {
            let mut insert_at = match placement {
                Placement::Before => over_index,
                Placement::After => over_index.checked_add(1)?,
            };
            if from_column_index == to_column_index && task_index < insert_at {
                insert_at -= 1;
            }
            Some(insert_at)
        }
    };

    Some(MoveTask {
        board_index,
        from_column_index,
        task_index,
        to_column_index,
        to_task_index,
    })
}
