use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kanban")]
#[command(about = "Manage kanban boards, columns and tasks", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding persisted state (or set KANBAN_STORAGE_DIR env var)
    #[arg(long, value_name = "DIR", env = "KANBAN_STORAGE_DIR", global = true)]
    pub storage_dir: Option<PathBuf>,

    /// Config file to use instead of the platform default
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Board operations
    Board(BoardCommand),
    /// Column operations
    Column(ColumnCommand),
    /// Task operations
    Task(TaskCommand),
    /// Apply a finished drag gesture
    Drag(DragArgs),
    /// Fetch boards from the configured remote source
    Fetch {
        /// Skip the request when boards were already fetched
        #[arg(long)]
        if_needed: bool,
    },
    /// Theme operations
    Theme(ThemeCommand),
    /// Sidebar visibility
    Sidebar(SidebarCommand),
    /// Mark the session as logged in
    Login,
    /// Mark the session as logged out
    Logout,
    /// Show UI flags, version stamp and remote status
    Status,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// Board commands
#[derive(Args)]
pub struct BoardCommand {
    #[command(subcommand)]
    pub action: BoardAction,
}

#[derive(Subcommand)]
pub enum BoardAction {
    /// Create a new board
    Create {
        #[arg(long)]
        name: String,
    },
    /// List all boards
    List,
    /// Get a specific board
    Get {
        #[arg(long)]
        board: usize,
    },
    /// Rename a board and replace its column names
    Edit {
        #[arg(long)]
        board: usize,
        #[arg(long)]
        name: String,
        /// Comma-separated column names, in order
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,
    },
    /// Delete a board
    Delete {
        #[arg(long)]
        board: usize,
    },
}

// Column commands
#[derive(Args)]
pub struct ColumnCommand {
    #[command(subcommand)]
    pub action: ColumnAction,
}

#[derive(Subcommand)]
pub enum ColumnAction {
    /// Append a column to a board
    Create {
        #[arg(long)]
        board: usize,
        #[arg(long)]
        name: String,
    },
    /// List column names of a board
    List {
        #[arg(long)]
        board: usize,
    },
    /// Delete a column and its tasks
    Delete {
        #[arg(long)]
        board: usize,
        #[arg(long)]
        column: usize,
    },
}

// Task commands
#[derive(Args)]
pub struct TaskCommand {
    #[command(subcommand)]
    pub action: TaskAction,
}

#[derive(Args)]
pub struct TaskRef {
    #[arg(long)]
    pub board: usize,
    #[arg(long)]
    pub column: usize,
    #[arg(long)]
    pub task: usize,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Append a task to a column
    Create(TaskCreateArgs),
    /// List tasks of a column
    List {
        #[arg(long)]
        board: usize,
        #[arg(long)]
        column: usize,
    },
    /// Get a specific task
    Get(TaskRef),
    /// Update task fields
    Update(TaskUpdateArgs),
    /// Delete a task
    Delete(TaskRef),
    /// Move a task to another column or position
    Move(TaskMoveArgs),
    /// Move a task to the end of the column with the given name
    Status {
        #[command(flatten)]
        task: TaskRef,
        #[arg(long)]
        status: String,
    },
    /// Flip a subtask's completion flag
    ToggleSubtask {
        #[command(flatten)]
        task: TaskRef,
        #[arg(long)]
        subtask: usize,
    },
}

#[derive(Args)]
pub struct TaskCreateArgs {
    #[arg(long)]
    pub board: usize,
    #[arg(long)]
    pub column: usize,
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: Option<String>,
    /// Subtask title; repeat for several
    #[arg(long = "subtask")]
    pub subtasks: Vec<String>,
}

#[derive(Args)]
pub struct TaskUpdateArgs {
    #[command(flatten)]
    pub task: TaskRef,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Args)]
pub struct TaskMoveArgs {
    #[arg(long)]
    pub board: usize,
    #[arg(long)]
    pub from_column: usize,
    #[arg(long)]
    pub task: usize,
    #[arg(long)]
    pub to_column: usize,
    /// Insertion index in the destination; appends when omitted
    #[arg(long)]
    pub to_index: Option<usize>,
}

#[derive(Args)]
pub struct DragArgs {
    #[arg(long)]
    pub board: usize,
    /// Id of the dragged item, e.g. task-0-1
    #[arg(long)]
    pub active: String,
    /// Id of the item it was released over, e.g. task-1-0 or column-2
    #[arg(long)]
    pub over: String,
}

#[derive(Args)]
pub struct ThemeCommand {
    #[command(subcommand)]
    pub action: ThemeAction,
}

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Print the current theme
    Get,
    /// Switch between light and dark
    Toggle,
}

#[derive(Args)]
pub struct SidebarCommand {
    #[command(subcommand)]
    pub action: SidebarAction,
}

#[derive(Subcommand)]
pub enum SidebarAction {
    Show,
    Hide,
    /// Flip visibility
    Toggle,
}
