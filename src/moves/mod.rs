pub mod movegen;
pub mod types;

pub use types::{MoveKind, MoveRecord};
