use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;

use backoffice_admin::domain::repository::{
    CustomerRepository, OrderRepository, ProductRepository,
};
use backoffice_admin::domain::types::{
    Customer, Order, OrderDetail, OrderFilter, OrderInclude, Product, ProductFilter,
};
use backoffice_admin::error::AdminServiceError;
use backoffice_domain::id::{OrderId, ProductId, UserId};
use backoffice_domain::order::OrderStatus;

/// Fixed base instant; fixtures are created a minute apart after it.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 21, 9, 0, 0).unwrap()
}

// ── MockProductRepo ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockProductRepo {
    pub products: Arc<Mutex<Vec<Product>>>,
}

impl MockProductRepo {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(Mutex::new(products)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }
}

impl ProductRepository for MockProductRepo {
    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, AdminServiceError> {
        let mut products: Vec<Product> = self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(products)
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, AdminServiceError> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn create(&self, product: &Product) -> Result<(), AdminServiceError> {
        self.products.lock().unwrap().push(product.clone());
        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<bool, AdminServiceError> {
        let mut products = self.products.lock().unwrap();
        match products.iter_mut().find(|p| p.id == product.id) {
            Some(stored) => {
                *stored = product.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ProductId) -> Result<bool, AdminServiceError> {
        let mut products = self.products.lock().unwrap();
        let before = products.len();
        products.retain(|p| p.id != id);
        Ok(products.len() < before)
    }
}

// ── MockOrderRepo ────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockOrderRepo {
    pub orders: Arc<Mutex<Vec<Order>>>,
    pub customers: Vec<Customer>,
}

impl MockOrderRepo {
    pub fn new(orders: Vec<Order>, customers: Vec<Customer>) -> Self {
        Self {
            orders: Arc::new(Mutex::new(orders)),
            customers,
        }
    }

    fn customer(&self, id: UserId) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    fn detail(&self, order: Order, include: OrderInclude) -> OrderDetail {
        let user = include
            .user
            .then(|| self.customer(order.user_id).cloned())
            .flatten();
        OrderDetail {
            order,
            user,
            items: include.items.then(Vec::new),
        }
    }

    pub fn status_of(&self, id: OrderId) -> Option<OrderStatus> {
        self.orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.id == id)
            .map(|o| o.status)
    }
}

impl OrderRepository for MockOrderRepo {
    async fn list(
        &self,
        filter: &OrderFilter,
        include: OrderInclude,
    ) -> Result<Vec<OrderDetail>, AdminServiceError> {
        let mut orders: Vec<Order> = self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| {
                let name = self.customer(o.user_id).map(|c| c.name.as_str());
                filter.matches(o, name)
            })
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(orders
            .into_iter()
            .map(|o| self.detail(o, include))
            .collect())
    }

    async fn find_by_id(
        &self,
        id: OrderId,
        include: OrderInclude,
    ) -> Result<Option<OrderDetail>, AdminServiceError> {
        let order = self
            .orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.id == id)
            .cloned();
        Ok(order.map(|o| self.detail(o, include)))
    }

    async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<bool, AdminServiceError> {
        let mut orders = self.orders.lock().unwrap();
        match orders.iter_mut().find(|o| o.id == id) {
            Some(order) => {
                order.status = status;
                order.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── MockCustomerRepo ─────────────────────────────────────────────────────────

pub struct MockCustomerRepo {
    pub customers: Vec<Customer>,
}

impl CustomerRepository for MockCustomerRepo {
    async fn list(&self) -> Result<Vec<Customer>, AdminServiceError> {
        let mut customers = self.customers.clone();
        customers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(customers)
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

/// Product created `minutes` after [`base_time`].
pub fn test_product(name: &str, price: Decimal, minutes: i64) -> Product {
    let created_at = base_time() + Duration::minutes(minutes);
    Product {
        id: ProductId::new(),
        name: name.to_owned(),
        description: None,
        price,
        image: None,
        stock: 10,
        created_at,
        updated_at: created_at,
    }
}

pub fn test_customer(name: &str) -> Customer {
    Customer {
        id: UserId::new(),
        name: name.to_owned(),
        email: format!("{}@example.com", name.to_lowercase()),
    }
}

/// Order created `minutes` after [`base_time`].
pub fn test_order(
    customer: &Customer,
    number: &str,
    status: OrderStatus,
    minutes: i64,
) -> Order {
    let created_at = base_time() + Duration::minutes(minutes);
    Order {
        id: OrderId::new(),
        user_id: customer.id,
        order_number: number.to_owned(),
        total_amount: Decimal::new(12_500, 2),
        status,
        shipping_address: "1 Main St".to_owned(),
        billing_address: None,
        payment_method: Some("card".to_owned()),
        payment_status: "paid".to_owned(),
        created_at,
        updated_at: created_at,
    }
}
