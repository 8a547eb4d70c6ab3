pub mod category;
pub mod grocery;
pub mod item;
