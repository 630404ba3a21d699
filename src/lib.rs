pub mod board;
pub mod game;
#[cfg(feature = "cli")]
pub mod logger;
pub mod moves;
pub mod relay;
pub mod save;
pub mod square;
pub mod status;
