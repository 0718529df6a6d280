pub mod afflictions;
pub mod events;
pub mod initialize;
pub mod log;
pub mod migrate;
pub mod notes;
pub mod plants;
pub mod pool;
pub mod reference;
pub mod stats;
pub mod store;
pub mod triggers;

pub use store::{CareStore, EventWatch};
