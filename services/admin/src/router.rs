use axum::{
    Router,
    routing::{get, patch},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use backoffice_core::error::not_found;
use backoffice_core::health::healthz;
use backoffice_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    health::readyz,
    orders::{get_order, get_order_form_options, list_orders, update_order_status},
    products::{create_product, delete_product, get_product, list_products, update_product},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Products
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        // Orders
        .route("/orders", get(list_orders))
        .route("/orders/create", get(get_order_form_options))
        .route("/orders/{id}", get(get_order))
        .route("/orders/{id}/status", patch(update_order_status))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer()),
        )
        .with_state(state)
}
