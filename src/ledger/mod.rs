pub mod model;
pub mod store;

pub use model::MistakeLedger;
pub use store::{JsonFileStore, MemoryStore, MistakeStore};
