#![allow(async_fn_in_trait)]

use backoffice_domain::id::{OrderId, ProductId};
use backoffice_domain::order::OrderStatus;

use crate::domain::types::{
    Customer, OrderDetail, OrderFilter, OrderInclude, Product, ProductFilter,
};
use crate::error::AdminServiceError;

/// Repository for catalog products.
pub trait ProductRepository: Send + Sync {
    /// Products matching `filter`, newest first.
    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, AdminServiceError>;

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, AdminServiceError>;

    async fn create(&self, product: &Product) -> Result<(), AdminServiceError>;

    /// Replace every editable field. Returns `false` if no such product exists.
    async fn update(&self, product: &Product) -> Result<bool, AdminServiceError>;

    /// Delete a product. Returns `true` if a row was deleted.
    async fn delete(&self, id: ProductId) -> Result<bool, AdminServiceError>;
}

/// Repository for orders and their relations.
pub trait OrderRepository: Send + Sync {
    /// Orders matching `filter`, newest first, with the relations in `include`.
    async fn list(
        &self,
        filter: &OrderFilter,
        include: OrderInclude,
    ) -> Result<Vec<OrderDetail>, AdminServiceError>;

    async fn find_by_id(
        &self,
        id: OrderId,
        include: OrderInclude,
    ) -> Result<Option<OrderDetail>, AdminServiceError>;

    /// Set the status column only. Returns `false` if no such order exists.
    async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<bool, AdminServiceError>;
}

/// Read access to the customers that own orders.
pub trait CustomerRepository: Send + Sync {
    /// Every customer, by name.
    async fn list(&self) -> Result<Vec<Customer>, AdminServiceError>;
}
