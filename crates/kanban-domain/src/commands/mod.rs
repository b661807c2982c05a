pub mod board_commands;
pub mod column_commands;
pub mod task_commands;

pub use board_commands::*;
pub use column_commands::*;
pub use task_commands::*;

/// Whether a command changed anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Changed,
    Unchanged,
}

impl Applied {
    pub fn changed(self) -> bool {
        self == Applied::Changed
    }
}

impl From<bool> for Applied {
    fn from(changed: bool) -> Self {
        if changed {
            Applied::Changed
        } else {
            Applied::Unchanged
        }
    }
}

/// Trait for domain commands that mutate board state.
///
/// Commands are total: an index that does not resolve makes the command a
/// no-op reported as [`Applied::Unchanged`], and a no-op must leave the
/// context untouched.
pub trait Command: Send + Sync {
    /// Execute this command against the board list.
    fn execute(&self, context: &mut CommandContext) -> Applied;

    /// Stable action name, e.g. `kanban/addBoard`.
    fn action(&self) -> &'static str;

    /// Human-readable description of what this command does
    fn description(&self) -> String;
}

/// Context passed to commands for mutation
pub struct CommandContext<'a> {
    pub boards: &'a mut Vec<crate::Board>,
}
