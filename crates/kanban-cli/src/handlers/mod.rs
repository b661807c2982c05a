pub mod board;
pub mod column;
pub mod remote;
pub mod task;
pub mod ui;
