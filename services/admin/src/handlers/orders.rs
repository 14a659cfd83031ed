use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use backoffice_core::context::RequestContext;
use backoffice_domain::id::{OrderId, OrderItemId, ProductId, UserId};
use backoffice_domain::listing::MATCH_ALL;
use backoffice_domain::order::OrderStatus;

use crate::domain::types::{Customer, Order, OrderDetail, OrderItem, Product};
use crate::domain::validation::OrderListParams;
use crate::error::AdminServiceError;
use crate::handlers::JsonBody;
use crate::handlers::products::{ProductResponse, money};
use crate::state::AppState;
use crate::usecase::order::{
    GetOrderFormOptionsUseCase, GetOrderUseCase, ListOrdersUseCase, UpdateOrderStatusUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CustomerResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            email: customer.email,
        }
    }
}

#[derive(Serialize)]
pub struct OrderItemResponse {
    pub id: OrderItemId,
    pub product_id: Option<ProductId>,
    pub quantity: i32,
    pub price: Decimal,
    pub product: Option<ProductResponse>,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            id: item.id,
            product_id: item.product_id,
            quantity: item.quantity,
            price: money(item.price),
            product: item.product.map(ProductResponse::from),
        }
    }
}

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: OrderId,
    pub user_id: UserId,
    pub order_number: String,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub shipping_address: String,
    pub billing_address: Option<String>,
    pub payment_method: Option<String>,
    pub payment_status: String,
    #[serde(serialize_with = "backoffice_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "backoffice_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
    /// Present only when the customer was loaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<CustomerResponse>,
    /// Present only when the items were loaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<OrderItemResponse>>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        OrderDetail::bare(order).into()
    }
}

impl From<OrderDetail> for OrderResponse {
    fn from(detail: OrderDetail) -> Self {
        let OrderDetail { order, user, items } = detail;
        Self {
            id: order.id,
            user_id: order.user_id,
            order_number: order.order_number,
            total_amount: money(order.total_amount),
            status: order.status,
            shipping_address: order.shipping_address,
            billing_address: order.billing_address,
            payment_method: order.payment_method,
            payment_status: order.payment_status,
            created_at: order.created_at,
            updated_at: order.updated_at,
            user: user.map(CustomerResponse::from),
            items: items.map(|items| items.into_iter().map(OrderItemResponse::from).collect()),
        }
    }
}

#[derive(Serialize)]
pub struct OrderListResponse {
    pub orders: Vec<OrderResponse>,
    pub filters: OrderListQuery,
    /// Status filter choices, `"all"` first.
    pub available_statuses: Vec<&'static str>,
}

#[derive(Serialize)]
pub struct OrderShowResponse {
    pub order: OrderResponse,
    pub available_statuses: Vec<&'static str>,
}

#[derive(Serialize)]
pub struct ProductOptionResponse {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
}

impl From<Product> for ProductOptionResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: money(product.price),
        }
    }
}

#[derive(Serialize)]
pub struct OrderFormOptionsResponse {
    pub users: Vec<CustomerResponse>,
    pub products: Vec<ProductOptionResponse>,
}

fn statuses() -> impl Iterator<Item = &'static str> {
    OrderStatus::ALL.into_iter().map(OrderStatus::as_str)
}

// ── Query params / request bodies ────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OrderListQuery {
    pub status: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<serde_json::Value>,
}

impl UpdateStatusRequest {
    /// The submitted status as text. Non-string values are kept in their JSON
    /// form so they fail validation as invalid rather than missing.
    fn raw_status(&self) -> Option<String> {
        match self.status.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(status) => Some(status.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Ids that do not parse cannot name an order.
fn order_id(raw: &str) -> Result<OrderId, AdminServiceError> {
    raw.parse().map_err(|_| AdminServiceError::OrderNotFound)
}

// ── GET /orders ──────────────────────────────────────────────────────────────

pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<OrderListResponse>, AdminServiceError> {
    let usecase = ListOrdersUseCase {
        repo: state.order_repo(),
    };
    let params = OrderListParams {
        status: query.status.clone(),
        search: query.search.clone(),
    };
    let orders = usecase.execute(&params).await?;
    Ok(Json(OrderListResponse {
        orders: orders.into_iter().map(OrderResponse::from).collect(),
        filters: query,
        available_statuses: std::iter::once(MATCH_ALL).chain(statuses()).collect(),
    }))
}

// ── GET /orders/create ───────────────────────────────────────────────────────

pub async fn get_order_form_options(
    State(state): State<AppState>,
) -> Result<Json<OrderFormOptionsResponse>, AdminServiceError> {
    let usecase = GetOrderFormOptionsUseCase {
        customers: state.customer_repo(),
        products: state.product_repo(),
    };
    let options = usecase.execute().await?;
    Ok(Json(OrderFormOptionsResponse {
        users: options
            .customers
            .into_iter()
            .map(CustomerResponse::from)
            .collect(),
        products: options
            .products
            .into_iter()
            .map(ProductOptionResponse::from)
            .collect(),
    }))
}

// ── GET /orders/{id} ─────────────────────────────────────────────────────────

pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OrderShowResponse>, AdminServiceError> {
    let usecase = GetOrderUseCase {
        repo: state.order_repo(),
    };
    let detail = usecase.execute(order_id(&id)?).await?;
    Ok(Json(OrderShowResponse {
        order: detail.into(),
        available_statuses: statuses().collect(),
    }))
}

// ── PATCH /orders/{id}/status ────────────────────────────────────────────────

pub async fn update_order_status(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<UpdateStatusRequest>,
) -> Result<Json<OrderResponse>, AdminServiceError> {
    let usecase = UpdateOrderStatusUseCase {
        repo: state.order_repo(),
    };
    let status = body.raw_status();
    let order = usecase
        .execute(&ctx, order_id(&id)?, status.as_deref())
        .await?;
    Ok(Json(order.into()))
}
