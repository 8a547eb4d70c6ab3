//! Repositories over the PostgreSQL pool. Each is a zero-sized struct with
//! associated functions taking `&PgPool`.

mod category_repo;
mod grocery_repo;
mod item_repo;

pub use category_repo::CategoryRepo;
pub use grocery_repo::GroceryRepo;
pub use item_repo::ItemRepo;
