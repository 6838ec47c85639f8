//! Batch ingestion and session assembly for the touchmap engine.

pub mod builder;
pub mod session;
pub mod store;

pub use builder::SessionBuilder;
pub use session::{GameCatalog, Session};
pub use store::{SessionStore, StoreConfig};
