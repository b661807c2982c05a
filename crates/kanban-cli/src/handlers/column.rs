use crate::cli::ColumnAction;
use crate::context::CliContext;
use crate::output;
use serde::Serialize;

#[derive(Serialize)]
pub struct ColumnSummary {
    pub index: usize,
    pub name: String,
    pub task_count: usize,
}

pub async fn handle(ctx: &mut CliContext, action: ColumnAction) -> anyhow::Result<()> {
    match action {
        ColumnAction::Create { board, name } => {
            if !ctx.store.add_column(board, name) {
                output::output_error(&format!("Board not found: {}", board));
            }
            ctx.save()?;
            let columns = ctx.store.column_names(board);
            output::output_success(serde_json::json!({
                "board": board,
                "index": columns.len().saturating_sub(1),
                "columns": columns,
            }));
        }
        ColumnAction::List { board } => {
            let Some(found) = ctx.store.board(board) else {
                output::output_error(&format!("Board not found: {}", board));
            };
            let columns = found
                .columns
                .iter()
                .enumerate()
                .map(|(index, column)| ColumnSummary {
                    index,
                    name: column.name.clone(),
                    task_count: column.tasks.len(),
                })
                .collect();
            output::output_list(columns);
        }
        ColumnAction::Delete { board, column } => {
            if !ctx.store.delete_column(board, column) {
                output::output_error(&format!("Column not found: {}/{}", board, column));
            }
            ctx.save()?;
            output::output_success(serde_json::json!({
                "deleted": column,
                "columns": ctx.store.column_names(board),
            }));
        }
    }
    Ok(())
}
