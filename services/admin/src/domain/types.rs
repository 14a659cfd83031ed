use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use backoffice_domain::id::{OrderId, OrderItemId, ProductId, UserId};
use backoffice_domain::listing::FilterParam;
use backoffice_domain::order::OrderStatus;

/// Catalog product.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    /// URL or `data:` URL, stored as given.
    pub image: Option<String>,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Customer who owns orders.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub order_number: String,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub shipping_address: String,
    pub billing_address: Option<String>,
    pub payment_method: Option<String>,
    pub payment_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Order line with the product it refers to, if that product still exists.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: Option<ProductId>,
    pub quantity: i32,
    pub price: Decimal,
    pub product: Option<Product>,
}

/// An order plus whichever relations were requested through [`OrderInclude`].
/// A relation that was not requested is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetail {
    pub order: Order,
    pub user: Option<Customer>,
    pub items: Option<Vec<OrderItem>>,
}

impl OrderDetail {
    pub fn bare(order: Order) -> Self {
        Self {
            order,
            user: None,
            items: None,
        }
    }
}

/// Relations to load together with orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrderInclude {
    pub user: bool,
    pub items: bool,
}

impl OrderInclude {
    pub const NONE: Self = Self {
        user: false,
        items: false,
    };
    pub const USER: Self = Self {
        user: true,
        items: false,
    };
    pub const ALL: Self = Self {
        user: true,
        items: true,
    };
}

/// Active product listing filters. `None` leaves a field unfiltered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Case-insensitive substring of the name.
    pub name: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<Decimal>,
    /// Inclusive upper price bound.
    pub max_price: Option<Decimal>,
}

impl ProductFilter {
    /// In-memory equivalent of the listing query's `WHERE` clause.
    pub fn matches(&self, product: &Product) -> bool {
        self.name
            .as_deref()
            .is_none_or(|term| contains_insensitive(&product.name, term))
            && self.min_price.is_none_or(|min| product.price >= min)
            && self.max_price.is_none_or(|max| product.price <= max)
    }
}

/// Order listing filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderFilter {
    pub status: FilterParam<OrderStatus>,
    /// Matches the order number or the owning customer's name.
    pub search: Option<String>,
}

impl OrderFilter {
    /// In-memory equivalent of the listing query's `WHERE` clause.
    /// `customer_name` is the name of the order's owner, if known.
    pub fn matches(&self, order: &Order, customer_name: Option<&str>) -> bool {
        let status_ok = self
            .status
            .active()
            .is_none_or(|status| order.status == *status);
        let search_ok = self.search.as_deref().is_none_or(|term| {
            contains_insensitive(&order.order_number, term)
                || customer_name.is_some_and(|name| contains_insensitive(name, term))
        });
        status_ok && search_ok
    }
}

fn contains_insensitive(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Choices offered when entering an order by hand.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderFormOptions {
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
}
