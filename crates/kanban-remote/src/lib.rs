pub mod client;
pub mod http;
pub mod json_placeholder;
pub mod source;
pub mod trello;

pub use http::HttpBoardSource;
pub use json_placeholder::JsonPlaceholderSource;
pub use source::{source_from_config, BoardSource};
pub use trello::TrelloSource;
