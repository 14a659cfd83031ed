use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use backoffice_core::context::RequestContext;
use backoffice_domain::id::ProductId;

use crate::domain::types::Product;
use crate::domain::validation::{FormValue, ProductForm, ProductListParams};
use crate::error::AdminServiceError;
use crate::handlers::JsonBody;
use crate::state::AppState;
use crate::usecase::product::{
    CreateProductUseCase, DeleteProductUseCase, GetProductUseCase, ListProductsUseCase,
    UpdateProductUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub image: Option<String>,
    pub stock: i32,
    #[serde(serialize_with = "backoffice_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "backoffice_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: money(product.price),
            image: product.image,
            stock: product.stock,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// Money always carries two decimal places on the wire.
pub(crate) fn money(mut amount: Decimal) -> Decimal {
    amount.rescale(2);
    amount
}

#[derive(Serialize)]
pub struct ProductListResponse {
    pub products: Vec<ProductResponse>,
    pub filters: ProductListQuery,
}

// ── Query params / request bodies ────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProductListQuery {
    pub name: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

impl From<&ProductListQuery> for ProductListParams {
    fn from(query: &ProductListQuery) -> Self {
        Self {
            name: query.name.clone(),
            min_price: query.min_price.clone(),
            max_price: query.max_price.clone(),
        }
    }
}

/// Product form body. Numeric fields accept JSON numbers or numeric strings.
#[derive(Debug, Default, Deserialize)]
pub struct ProductRequest {
    pub name: Option<serde_json::Value>,
    pub description: Option<serde_json::Value>,
    pub price: Option<serde_json::Value>,
    pub image: Option<serde_json::Value>,
    pub stock: Option<serde_json::Value>,
}

impl From<ProductRequest> for ProductForm {
    fn from(body: ProductRequest) -> Self {
        Self {
            name: body.name.and_then(form_value),
            description: body.description.and_then(form_value),
            price: body.price.and_then(form_value),
            image: body.image.and_then(form_value),
            stock: body.stock.and_then(form_value),
        }
    }
}

/// `null` counts as not submitted.
fn form_value(value: serde_json::Value) -> Option<FormValue> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(text) => Some(FormValue::Text(text)),
        serde_json::Value::Number(number) => Some(FormValue::Number(number.to_string())),
        _ => Some(FormValue::Unsupported),
    }
}

/// Ids that do not parse cannot name a product.
fn product_id(raw: &str) -> Result<ProductId, AdminServiceError> {
    raw.parse().map_err(|_| AdminServiceError::ProductNotFound)
}

// ── GET /products ────────────────────────────────────────────────────────────

pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<ProductListResponse>, AdminServiceError> {
    let usecase = ListProductsUseCase {
        repo: state.product_repo(),
    };
    let products = usecase.execute(&ProductListParams::from(&query)).await?;
    Ok(Json(ProductListResponse {
        products: products.into_iter().map(ProductResponse::from).collect(),
        filters: query,
    }))
}

// ── GET /products/{id} ───────────────────────────────────────────────────────

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>, AdminServiceError> {
    let usecase = GetProductUseCase {
        repo: state.product_repo(),
    };
    let product = usecase.execute(product_id(&id)?).await?;
    Ok(Json(product.into()))
}

// ── POST /products ───────────────────────────────────────────────────────────

pub async fn create_product(
    ctx: RequestContext,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), AdminServiceError> {
    let usecase = CreateProductUseCase {
        repo: state.product_repo(),
    };
    let product = usecase.execute(&ctx, &body.into()).await?;
    Ok((StatusCode::CREATED, Json(product.into())))
}

// ── PUT /products/{id} ───────────────────────────────────────────────────────

pub async fn update_product(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<ProductRequest>,
) -> Result<Json<ProductResponse>, AdminServiceError> {
    let usecase = UpdateProductUseCase {
        repo: state.product_repo(),
    };
    let product = usecase
        .execute(&ctx, product_id(&id)?, &body.into())
        .await?;
    Ok(Json(product.into()))
}

// ── DELETE /products/{id} ────────────────────────────────────────────────────

pub async fn delete_product(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AdminServiceError> {
    let usecase = DeleteProductUseCase {
        repo: state.product_repo(),
    };
    usecase.execute(&ctx, product_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}
