use crate::cli::BoardAction;
use crate::context::CliContext;
use crate::output;
use kanban_domain::{Board, BoardId};
use serde::Serialize;

#[derive(Serialize)]
pub struct BoardSummary {
    pub index: usize,
    pub id: BoardId,
    pub name: String,
    pub columns: Vec<String>,
    pub task_count: usize,
}

impl BoardSummary {
    fn new(index: usize, board: &Board) -> Self {
        Self {
            index,
            id: board.id,
            name: board.name.clone(),
            columns: board.column_names(),
            task_count: board.task_count(),
        }
    }
}

pub async fn handle(ctx: &mut CliContext, action: BoardAction) -> anyhow::Result<()> {
    match action {
        BoardAction::Create { name } => {
            ctx.store.add_board(name);
            ctx.save()?;
            let index = ctx.store.boards_len().saturating_sub(1);
            output::output_success(serde_json::json!({
                "index": index,
                "board": ctx.store.board(index),
            }));
        }
        BoardAction::List => {
            let data = ctx.store.data();
            let boards = data
                .boards
                .iter()
                .enumerate()
                .map(|(index, board)| BoardSummary::new(index, board))
                .collect();
            output::output_list(boards);
        }
        BoardAction::Get { board } => match ctx.store.board(board) {
            Some(found) => output::output_success(&found),
            None => output::output_error(&format!("Board not found: {}", board)),
        },
        BoardAction::Edit {
            board,
            name,
            columns,
        } => {
            if ctx.store.board(board).is_none() {
                output::output_error(&format!("Board not found: {}", board));
            }
            if !ctx.store.edit_board(board, name, columns) {
                output::output_error("Board and column names must not be empty");
            }
            ctx.save()?;
            output::output_success(ctx.store.board(board));
        }
        BoardAction::Delete { board } => {
            if !ctx.store.delete_board(board) {
                output::output_error(&format!("Board not found: {}", board));
            }
            ctx.save()?;
            output::output_success(serde_json::json!({"deleted": board}));
        }
    }
    Ok(())
}
