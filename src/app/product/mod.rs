//! 产品管理

pub mod handler;
pub mod model;
pub mod repository;
pub mod service;

use axum::{routing::get, Router};

use handler::AppState;

pub use model::{Product, ProductInput};
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;

/// 产品接口的基础路径
pub const PRODUCTS_PATH: &str = "/api/products";

/// 产品路由
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            PRODUCTS_PATH,
            get(handler::list_products).post(handler::create_product),
        )
        .route(
            "/api/products/:id",
            get(handler::get_product)
                .put(handler::update_product)
                .delete(handler::delete_product),
        )
        .route("/health", get(handler::health_check))
}
