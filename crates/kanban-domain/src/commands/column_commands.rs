use super::{Applied, Command, CommandContext};
use crate::Column;

/// Append an empty column to a board
pub struct AddColumn {
    pub board_index: usize,
    pub name: String,
}

impl Command for AddColumn {
    fn execute(&self, context: &mut CommandContext) -> Applied {
        match context.boards.get_mut(self.board_index) {
            Some(board) => {
                board.columns.push(Column::new(self.name.clone()));
                Applied::Changed
            }
            None => Applied::Unchanged,
        }
    }

    fn action(&self) -> &'static str {
        "kanban/addColumn"
    }

    fn description(&self) -> String {
        format!("Add column '{}' to board {}", self.name, self.board_index)
    }
}

/// Delete a column together with its tasks
pub struct DeleteColumn {
    pub board_index: usize,
    pub column_index: usize,
}

impl Command for DeleteColumn {
    fn execute(&self, context: &mut CommandContext) -> Applied {
        let Some(board) = context.boards.get_mut(self.board_index) else {
            return Applied::Unchanged;
        };
        if self.column_index >= board.columns.len() {
            return Applied::Unchanged;
        }
        board.columns.remove(self.column_index);
        Applied::Changed
    }

    fn action(&self) -> &'static str {
        "kanban/deleteColumn"
    }

    fn description(&self) -> String {
        format!(
            "Delete column {} of board {}",
            self.column_index, self.board_index
        )
    }
}
