pub mod ideas;
pub mod initialize;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod psql;
pub mod sqlite_store;

pub use ideas::{IdeaStore, open_store};
