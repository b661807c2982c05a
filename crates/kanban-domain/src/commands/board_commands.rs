use super::{Applied, Command, CommandContext};
use crate::{Board, Column};

/// Append a new, empty board
pub struct AddBoard {
    pub name: String,
}

impl Command for AddBoard {
    fn execute(&self, context: &mut CommandContext) -> Applied {
        context.boards.push(Board::new(self.name.clone()));
        Applied::Changed
    }

    fn action(&self) -> &'static str {
        "kanban/addBoard"
    }

    fn description(&self) -> String {
        format!("Add board: '{}'", self.name)
    }
}

/// Remove the board at exactly `board_index`
pub struct DeleteBoard {
    pub board_index: usize,
}

impl Command for DeleteBoard {
    fn execute(&self, context: &mut CommandContext) -> Applied {
        if self.board_index >= context.boards.len() {
            return Applied::Unchanged;
        }
        context.boards.remove(self.board_index);
        Applied::Changed
    }

    fn action(&self) -> &'static str {
        "kanban/deleteBoard"
    }

    fn description(&self) -> String {
        format!("Delete board {}", self.board_index)
    }
}

/// Rename a board and rewrite its column list.
///
/// Existing columns are renamed positionally and keep their tasks, extra
/// names become new empty columns, and columns past the end of `column_names`
/// are dropped. Tasks of a renamed column follow the new name. Blank names
/// reject the whole edit.
pub struct EditBoard {
    pub board_index: usize,
    pub name: String,
    pub column_names: Vec<String>,
}

impl Command for EditBoard {
    fn execute(&self, context: &mut CommandContext) -> Applied {
        let name = self.name.trim();
        let column_names: Vec<&str> = self.column_names.iter().map(|n| n.trim()).collect();
        if name.is_empty() || column_names.iter().any(|n| n.is_empty()) {
            return Applied::Unchanged;
        }
        let Some(board) = context.boards.get_mut(self.board_index) else {
            return Applied::Unchanged;
        };

        let mut previous = std::mem::take(&mut board.columns).into_iter();
        board.columns = column_names
            .into_iter()
            .map(|column_name| match previous.next() {
                Some(mut column) => {
                    if column.name != column_name {
                        column.name = column_name.to_string();
                        for task in &mut column.tasks {
                            task.status = column.name.clone();
                        }
                    }
                    column
                }
                None => Column::new(column_name),
            })
            .collect();
        board.name = name.to_string();
        Applied::Changed
    }

    fn action(&self) -> &'static str {
        "kanban/editBoard"
    }

    fn description(&self) -> String {
        format!("Edit board {}: '{}'", self.board_index, self.name.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Task;

    fn execute(boards: &mut Vec<Board>, command: &dyn Command) -> Applied {
        let mut context = CommandContext { boards };
        command.execute(&mut context)
    }

    #[test]
    fn test_add_board() {
        let mut boards = vec![];
        let applied = execute(
            &mut boards,
            &AddBoard {
                name: "Sprint 1".to_string(),
            },
        );

        assert_eq!(applied, Applied::Changed);
        assert_eq!(boards.len(), 1);
        assert_eq!(boards[0].name, "Sprint 1");
        assert!(boards[0].columns.is_empty());
    }

    #[test]
    fn test_delete_board_out_of_range() {
        let mut boards = vec![Board::new("a")];
        let applied = execute(&mut boards, &DeleteBoard { board_index: 1 });
        assert_eq!(applied, Applied::Unchanged);
        assert_eq!(boards.len(), 1);

        let applied = execute(&mut boards, &DeleteBoard { board_index: 0 });
        assert_eq!(applied, Applied::Changed);
        assert!(boards.is_empty());
    }

    #[test]
    fn test_edit_board_renames_and_resizes_columns() {
        let todo = Column::with_tasks("Todo", vec![Task::new("t", "Todo")]);
        let todo_id = todo.id;
        let mut boards = vec![Board::with_columns(
            "Old",
            vec![todo, Column::new("Doing"), Column::new("Done")],
        )];

        let applied = execute(
            &mut boards,
            &EditBoard {
                board_index: 0,
                name: "  New  ".to_string(),
                column_names: vec!["Backlog ".to_string(), "Doing".to_string()],
            },
        );

        assert_eq!(applied, Applied::Changed);
        let board = &boards[0];
        assert_eq!(board.name, "New");
        assert_eq!(board.column_names(), vec!["Backlog", "Doing"]);
        assert_eq!(board.columns[0].id, todo_id);
        assert_eq!(board.columns[0].tasks[0].status, "Backlog");
    }

    #[test]
    fn test_edit_board_appends_new_columns() {
        let mut boards = vec![Board::with_columns("B", vec![Column::new("Todo")])];
        execute(
            &mut boards,
            &EditBoard {
                board_index: 0,
                name: "B".to_string(),
                column_names: vec!["Todo".to_string(), "Review".to_string()],
            },
        );
        assert_eq!(boards[0].column_names(), vec!["Todo", "Review"]);
        assert!(boards[0].columns[1].tasks.is_empty());
    }

    #[test]
    fn test_edit_board_rejects_blank_names() {
        let mut boards = vec![Board::with_columns("B", vec![Column::new("Todo")])];
        let before = boards.clone();

        for (name, columns) in [("   ", vec!["Todo"]), ("B", vec!["Todo", " "])] {
            let applied = execute(
                &mut boards,
                &EditBoard {
                    board_index: 0,
                    name: name.to_string(),
                    column_names: columns.into_iter().map(String::from).collect(),
                },
            );
            assert_eq!(applied, Applied::Unchanged);
            assert_eq!(boards, before);
        }
    }

    #[test]
    fn test_edit_missing_board() {
        let mut boards = vec![];
        let applied = execute(
            &mut boards,
            &EditBoard {
                board_index: 0,
                name: "B".to_string(),
                column_names: vec![],
            },
        );
        assert_eq!(applied, Applied::Unchanged);
    }
}
