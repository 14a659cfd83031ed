use backoffice_core::context::RequestContext;
use backoffice_domain::id::OrderId;

use crate::domain::repository::{CustomerRepository, OrderRepository, ProductRepository};
use crate::domain::types::{Order, OrderDetail, OrderFormOptions, OrderInclude, ProductFilter};
use crate::domain::validation::{OrderListParams, parse_order_filter, validate_status};
use crate::error::AdminServiceError;

// ── ListOrders ───────────────────────────────────────────────────────────────

pub struct ListOrdersUseCase<R: OrderRepository> {
    pub repo: R,
}

impl<R: OrderRepository> ListOrdersUseCase<R> {
    /// Orders matching the filters, each with its owning customer.
    pub async fn execute(
        &self,
        params: &OrderListParams,
    ) -> Result<Vec<OrderDetail>, AdminServiceError> {
        let filter = parse_order_filter(params)?;
        self.repo.list(&filter, OrderInclude::USER).await
    }
}

// ── GetOrder ─────────────────────────────────────────────────────────────────

pub struct GetOrderUseCase<R: OrderRepository> {
    pub repo: R,
}

impl<R: OrderRepository> GetOrderUseCase<R> {
    /// One order with its customer and its items, each item with its product.
    pub async fn execute(&self, id: OrderId) -> Result<OrderDetail, AdminServiceError> {
        self.repo
            .find_by_id(id, OrderInclude::ALL)
            .await?
            .ok_or(AdminServiceError::OrderNotFound)
    }
}

// ── UpdateOrderStatus ────────────────────────────────────────────────────────

pub struct UpdateOrderStatusUseCase<R: OrderRepository> {
    pub repo: R,
}

impl<R: OrderRepository> UpdateOrderStatusUseCase<R> {
    /// Any status may follow any other. Leaving `delivered` or `cancelled` is
    /// allowed but logged.
    pub async fn execute(
        &self,
        ctx: &RequestContext,
        id: OrderId,
        status: Option<&str>,
    ) -> Result<Order, AdminServiceError> {
        let current = self
            .repo
            .find_by_id(id, OrderInclude::NONE)
            .await?
            .ok_or(AdminServiceError::OrderNotFound)?
            .order;
        let next = validate_status(status)?;

        if current.status.is_regression_to(next) {
            tracing::warn!(
                request_id = %ctx.request_id,
                order_id = %id,
                from = %current.status,
                to = %next,
                "order leaves a final status"
            );
        }

        if !self.repo.update_status(id, next).await? {
            return Err(AdminServiceError::OrderNotFound);
        }
        tracing::info!(
            request_id = %ctx.request_id,
            order_id = %id,
            from = %current.status,
            to = %next,
            "order status updated"
        );

        self.repo
            .find_by_id(id, OrderInclude::NONE)
            .await?
            .map(|detail| detail.order)
            .ok_or(AdminServiceError::OrderNotFound)
    }
}

// ── GetOrderFormOptions ──────────────────────────────────────────────────────

pub struct GetOrderFormOptionsUseCase<C: CustomerRepository, P: ProductRepository> {
    pub customers: C,
    pub products: P,
}

impl<C: CustomerRepository, P: ProductRepository> GetOrderFormOptionsUseCase<C, P> {
    pub async fn execute(&self) -> Result<OrderFormOptions, AdminServiceError> {
        let customers = self.customers.list().await?;
        let products = self.products.list(&ProductFilter::default()).await?;
        Ok(OrderFormOptions {
            customers,
            products,
        })
    }
}
