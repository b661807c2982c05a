use crate::cli::{DragArgs, TaskAction, TaskCreateArgs, TaskMoveArgs, TaskRef, TaskUpdateArgs};
use crate::context::CliContext;
use crate::output;
use kanban_domain::{MoveTask, Subtask, Task, TaskId, TaskLocation, TaskPatch};
use serde::Serialize;

#[derive(Serialize)]
pub struct LocatedTask {
    pub location: TaskLocation,
    pub task: Task,
}

fn located(ctx: &CliContext, id: TaskId) -> Option<LocatedTask> {
    let location = ctx.store.locate_task(id)?;
    let task = ctx.store.task(
        location.board_index,
        location.column_index,
        location.task_index,
    )?;
    Some(LocatedTask { location, task })
}

fn output_located(ctx: &CliContext, id: TaskId) {
    match located(ctx, id) {
        Some(found) => output::output_success(found),
        None => output::output_error(&format!("Task not found: {}", id)),
    }
}

fn resolve_or_exit(ctx: &CliContext, task: &TaskRef) -> TaskId {
    match ctx.resolve_task_id(task.board, task.column, task.task) {
        Some(id) => id,
        None => output::output_error(&format!(
            "Task not found: {}/{}/{}",
            task.board, task.column, task.task
        )),
    }
}

pub async fn handle(ctx: &mut CliContext, action: TaskAction) -> anyhow::Result<()> {
    match action {
        TaskAction::Create(args) => handle_create(ctx, args)?,
        TaskAction::List { board, column } => {
            let tasks = ctx
                .store
                .board(board)
                .and_then(|b| b.columns.get(column).map(|c| c.tasks.clone()));
            match tasks {
                Some(tasks) => output::output_list(tasks),
                None => output::output_error(&format!("Column not found: {}/{}", board, column)),
            }
        }
        TaskAction::Get(task) => match ctx.store.task(task.board, task.column, task.task) {
            Some(found) => output::output_success(&found),
            None => output::output_error(&format!(
                "Task not found: {}/{}/{}",
                task.board, task.column, task.task
            )),
        },
        TaskAction::Update(args) => handle_update(ctx, args)?,
        TaskAction::Delete(task) => {
            if !ctx.store.delete_task(task.board, task.column, task.task) {
                output::output_error(&format!(
                    "Task not found: {}/{}/{}",
                    task.board, task.column, task.task
                ));
            }
            ctx.save()?;
            output::output_success(serde_json::json!({
                "deleted": {
                    "board_index": task.board,
                    "column_index": task.column,
                    "task_index": task.task,
                }
            }));
        }
        TaskAction::Move(args) => handle_move(ctx, args)?,
        TaskAction::Status { task, status } => {
            let id = resolve_or_exit(ctx, &task);
            if ctx
                .store
                .change_task_status(task.board, task.column, task.task, &status)
                .is_none()
            {
                output::output_error(&format!(
                    "Task not moved: no other column named '{}'",
                    status
                ));
            }
            ctx.save()?;
            output_located(ctx, id);
        }
        TaskAction::ToggleSubtask { task, subtask } => {
            let id = resolve_or_exit(ctx, &task);
            if !ctx
                .store
                .toggle_subtask(task.board, task.column, task.task, subtask)
            {
                output::output_error(&format!("Subtask not found: {}", subtask));
            }
            ctx.save()?;
            output_located(ctx, id);
        }
    }
    Ok(())
}

fn handle_create(ctx: &mut CliContext, args: TaskCreateArgs) -> anyhow::Result<()> {
    let column_name = ctx.store.board(args.board).and_then(|board| {
        let index = board.clamped_column_index(args.column)?;
        Some(board.columns[index].name.clone())
    });
    let Some(column_name) = column_name else {
        output::output_error(&format!(
            "Board {} not found or has no columns",
            args.board
        ));
    };

    let task = Task::new(args.title, column_name)
        .with_description(args.description.unwrap_or_default())
        .with_subtasks(args.subtasks.into_iter().map(Subtask::new).collect());
    let id = task.id;

    if !ctx.store.add_task(args.board, args.column, task) {
        output::output_error(&format!("Board not found: {}", args.board));
    }
    ctx.save()?;
    output_located(ctx, id);
    Ok(())
}

fn handle_update(ctx: &mut CliContext, args: TaskUpdateArgs) -> anyhow::Result<()> {
    let patch = TaskPatch {
        title: args.title,
        description: args.description,
        status: None,
        subtasks: None,
    };
    if patch.is_empty() && args.status.is_none() {
        output::output_error("Nothing to update: pass --title, --description or --status");
    }

    let id = resolve_or_exit(ctx, &args.task);
    if let Some(status) = &args.status {
        if !ctx
            .store
            .column_names(args.task.board)
            .iter()
            .any(|name| name == status)
        {
            output::output_error(&format!("No column named '{}'", status));
        }
    }

    if !patch.is_empty() {
        ctx.store
            .update_task(args.task.board, args.task.column, args.task.task, patch);
    }
    // Status follows the column, so a new status moves the task.
    if let (Some(status), Some(location)) = (&args.status, ctx.store.locate_task(id)) {
        ctx.store.change_task_status(
            location.board_index,
            location.column_index,
            location.task_index,
            status,
        );
    }
    ctx.save()?;
    output_located(ctx, id);
    Ok(())
}

fn handle_move(ctx: &mut CliContext, args: TaskMoveArgs) -> anyhow::Result<()> {
    let request = MoveTask {
        board_index: args.board,
        from_column_index: args.from_column,
        task_index: args.task,
        to_column_index: args.to_column,
        to_task_index: args.to_index,
    };
    let Some(location) = ctx.store.move_task(request) else {
        output::output_error("Invalid move: board, column or task not found");
    };
    ctx.save()?;

    match ctx.store.task(
        location.board_index,
        location.column_index,
        location.task_index,
    ) {
        Some(task) => output::output_success(LocatedTask { location, task }),
        None => output::output_error("Moved task could not be read back"),
    }
    Ok(())
}

pub async fn handle_drag(ctx: &mut CliContext, args: DragArgs) -> anyhow::Result<()> {
    let Some(request) = ctx.store.drop_task(args.board, &args.active, &args.over) else {
        output::output_error(&format!(
            "Drop ignored: {} over {} on board {}",
            args.active, args.over, args.board
        ));
    };
    ctx.save()?;
    output::output_success(serde_json::json!({
        "move": request,
        "columns": ctx.store.board(args.board).map(|b| b.columns),
    }));
    Ok(())
}
