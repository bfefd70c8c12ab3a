pub mod bank;
pub mod item;
pub mod reading;

pub use bank::ItemBank;
pub use item::Item;
pub use reading::normalize_reading;
