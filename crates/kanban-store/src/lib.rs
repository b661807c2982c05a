pub mod action_log;
pub mod builder;
pub mod remote;
pub mod store;

pub use action_log::{ActionLog, MAX_LOG_ENTRIES};
pub use builder::{KanbanStoreBuilder, ThemeHook};
pub use remote::RemoteStatus;
pub use store::KanbanStore;
