pub mod error;
pub mod game;
pub mod host;

pub use error::{EngineError, Result};
pub use game::{Game, GameConfig};
pub use host::GameHost;
