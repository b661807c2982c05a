pub mod envelope;
pub mod store;
pub mod traits;

pub use envelope::*;
pub use store::*;
pub use traits::*;
