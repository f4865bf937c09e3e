pub mod idea;
pub mod price;

pub use idea::{Idea, IdeaStats, TaskKind};
pub use price::PriceRecord;
