pub mod app_data;
pub mod board;
pub mod column;
pub mod commands;
pub mod drag;
pub mod index;
pub mod moves;
pub mod normalize;
pub mod preferences;
pub mod task;

pub use app_data::{AppData, TaskLocation};
pub use board::{Board, BoardId};
pub use column::{Column, ColumnId};
pub use commands::{Applied, Command, CommandContext};
pub use drag::{resolve_drop, resolve_drop_with_placement, DragId, ParseDragIdError, Placement};
pub use moves::{apply_move, status_change, MoveTask};
pub use normalize::normalize_boards;
pub use preferences::ThemeMode;
pub use task::{Subtask, Task, TaskId, TaskPatch};
