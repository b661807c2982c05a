use super::{Applied, Command, CommandContext};
use crate::index::clamp_index;
use crate::moves::{apply_move, MoveTask};
use crate::{Board, Column, Task, TaskPatch};

/// Column at the clamped `column_index` of the board at exactly `board_index`.
fn clamped_column<'a>(
    boards: &'a mut [Board],
    board_index: usize,
    column_index: usize,
) -> Option<&'a mut Column> {
    let board = boards.get_mut(board_index)?;
    let column_index = board.clamped_column_index(column_index)?;
    board.columns.get_mut(column_index)
}

fn clamped_task<'a>(
    boards: &'a mut [Board],
    board_index: usize,
    column_index: usize,
    task_index: usize,
) -> Option<&'a mut Task> {
    let column = clamped_column(boards, board_index, column_index)?;
    let task_index = clamp_index(task_index, column.tasks.len())?;
    column.tasks.get_mut(task_index)
}

/// Append a task to a column
pub struct AddTask {
    pub board_index: usize,
    pub column_index: usize,
    pub task: Task,
}

impl Command for AddTask {
    fn execute(&self, context: &mut CommandContext) -> Applied {
        match clamped_column(context.boards, self.board_index, self.column_index) {
            Some(column) => {
                column.tasks.push(self.task.clone());
                Applied::Changed
            }
            None => Applied::Unchanged,
        }
    }

    fn action(&self) -> &'static str {
        "kanban/addTask"
    }

    fn description(&self) -> String {
        format!("Add task: '{}'", self.task.title)
    }
}

/// Shallow-merge a patch into an existing task
pub struct UpdateTask {
    pub board_index: usize,
    pub column_index: usize,
    pub task_index: usize,
    pub patch: TaskPatch,
}

impl Command for UpdateTask {
    fn execute(&self, context: &mut CommandContext) -> Applied {
        match clamped_task(
            context.boards,
            self.board_index,
            self.column_index,
            self.task_index,
        ) {
            Some(task) => {
                task.apply(self.patch.clone());
                Applied::Changed
            }
            None => Applied::Unchanged,
        }
    }

    fn action(&self) -> &'static str {
        "kanban/updateTask"
    }

    fn description(&self) -> String {
        format!(
            "Update task {}/{}/{}",
            self.board_index, self.column_index, self.task_index
        )
    }
}

/// Remove the task at exactly `task_index`
pub struct DeleteTask {
    pub board_index: usize,
    pub column_index: usize,
    pub task_index: usize,
}

impl Command for DeleteTask {
    fn execute(&self, context: &mut CommandContext) -> Applied {
        let Some(column) = clamped_column(context.boards, self.board_index, self.column_index)
        else {
            return Applied::Unchanged;
        };
        if self.task_index >= column.tasks.len() {
            return Applied::Unchanged;
        }
        column.tasks.remove(self.task_index);
        Applied::Changed
    }

    fn action(&self) -> &'static str {
        "kanban/deleteTask"
    }

    fn description(&self) -> String {
        format!(
            "Delete task {}/{}/{}",
            self.board_index, self.column_index, self.task_index
        )
    }
}

/// Flip the completion flag of one subtask
pub struct ToggleSubtask {
    pub board_index: usize,
    pub column_index: usize,
    pub task_index: usize,
    pub subtask_index: usize,
}

impl Command for ToggleSubtask {
    fn execute(&self, context: &mut CommandContext) -> Applied {
        clamped_task(
            context.boards,
            self.board_index,
            self.column_index,
            self.task_index,
        )
        .map(|task| task.toggle_subtask(self.subtask_index))
        .unwrap_or(false)
        .into()
    }

    fn action(&self) -> &'static str {
        "kanban/toggleSubtask"
    }

    fn description(&self) -> String {
        format!(
            "Toggle subtask {} of task {}/{}/{}",
            self.subtask_index, self.board_index, self.column_index, self.task_index
        )
    }
}

impl Command for MoveTask {
    fn execute(&self, context: &mut CommandContext) -> Applied {
        apply_move(context.boards, self).is_some().into()
    }

    fn action(&self) -> &'static str {
        "kanban/moveTask"
    }

    fn description(&self) -> String {
        format!(
            "Move task {} from column {} to column {} of board {}",
            self.task_index, self.from_column_index, self.to_column_index, self.board_index
        )
    }
}
