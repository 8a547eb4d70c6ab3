pub mod health;

use axum::routing::{delete, get, patch, post};
use axum::Router;

use crate::handlers::{self, categories, grocery, items};
use crate::state::AppState;

/// Build the inventory route tree.
///
/// ```text
/// GET    /hello             -> hello
///
/// POST   /insert            -> insert_item
/// DELETE /delete/{id}       -> delete_item
/// PATCH  /updateitem/{id}   -> update_item
/// GET    /search            -> search_items
/// GET    /expiringsoon      -> expiring_soon
/// GET    /lowitems          -> low_items
///
/// GET    /categories        -> list_categories
/// POST   /addcategory       -> add_category
///
/// GET    /grocerylist       -> grocery_list
/// GET    /forcelist         -> force_refresh
/// ```
pub fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/hello", get(handlers::hello))
        // Items
        .route("/insert", post(items::insert_item))
        .route("/delete/{id}", delete(items::delete_item))
        .route("/updateitem/{id}", patch(items::update_item))
        .route("/search", get(items::search_items))
        .route("/expiringsoon", get(items::expiring_soon))
        .route("/lowitems", get(items::low_items))
        // Categories
        .route("/categories", get(categories::list_categories))
        .route("/addcategory", post(categories::add_category))
        // Grocery list
        .route("/grocerylist", get(grocery::grocery_list))
        .route("/forcelist", get(grocery::force_refresh))
}
