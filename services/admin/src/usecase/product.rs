use chrono::Utc;

use backoffice_core::context::RequestContext;
use backoffice_domain::id::ProductId;

use crate::domain::repository::ProductRepository;
use crate::domain::types::Product;
use crate::domain::validation::{
    ProductForm, ProductListParams, ProductRules, parse_product_filter, validate_product,
};
use crate::error::AdminServiceError;

// ── ListProducts ─────────────────────────────────────────────────────────────

pub struct ListProductsUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> ListProductsUseCase<R> {
    pub async fn execute(
        &self,
        params: &ProductListParams,
    ) -> Result<Vec<Product>, AdminServiceError> {
        let filter = parse_product_filter(params)?;
        self.repo.list(&filter).await
    }
}

// ── GetProduct ───────────────────────────────────────────────────────────────

pub struct GetProductUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> GetProductUseCase<R> {
    pub async fn execute(&self, id: ProductId) -> Result<Product, AdminServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AdminServiceError::ProductNotFound)
    }
}

// ── CreateProduct ────────────────────────────────────────────────────────────

pub struct CreateProductUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> CreateProductUseCase<R> {
    pub async fn execute(
        &self,
        ctx: &RequestContext,
        form: &ProductForm,
    ) -> Result<Product, AdminServiceError> {
        let draft = validate_product(form, ProductRules::Create)?;
        let now = Utc::now();
        let product = Product {
            id: ProductId::new(),
            name: draft.name,
            description: draft.description,
            price: draft.price,
            image: draft.image,
            stock: draft.stock,
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&product).await?;
        tracing::info!(
            request_id = %ctx.request_id,
            product_id = %product.id,
            "product created"
        );
        Ok(product)
    }
}

// ── UpdateProduct ────────────────────────────────────────────────────────────

pub struct UpdateProductUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> UpdateProductUseCase<R> {
    /// Replace every editable field of an existing product.
    pub async fn execute(
        &self,
        ctx: &RequestContext,
        id: ProductId,
        form: &ProductForm,
    ) -> Result<Product, AdminServiceError> {
        let current = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(AdminServiceError::ProductNotFound)?;
        let draft = validate_product(form, ProductRules::Update)?;
        let product = Product {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            image: draft.image,
            stock: draft.stock,
            created_at: current.created_at,
            updated_at: Utc::now(),
        };
        if !self.repo.update(&product).await? {
            return Err(AdminServiceError::ProductNotFound);
        }
        tracing::info!(request_id = %ctx.request_id, product_id = %id, "product updated");
        Ok(product)
    }
}

// ── DeleteProduct ────────────────────────────────────────────────────────────

pub struct DeleteProductUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> DeleteProductUseCase<R> {
    pub async fn execute(
        &self,
        ctx: &RequestContext,
        id: ProductId,
    ) -> Result<(), AdminServiceError> {
        if !self.repo.delete(id).await? {
            return Err(AdminServiceError::ProductNotFound);
        }
        tracing::info!(request_id = %ctx.request_id, product_id = %id, "product deleted");
        Ok(())
    }
}
