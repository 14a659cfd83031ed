use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::infra::db::{DbCustomerRepository, DbOrderRepository, DbProductRepository};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db: Arc::new(db) }
    }

    pub fn product_repo(&self) -> DbProductRepository {
        DbProductRepository {
            db: Arc::clone(&self.db),
        }
    }

    pub fn order_repo(&self) -> DbOrderRepository {
        DbOrderRepository {
            db: Arc::clone(&self.db),
        }
    }

    pub fn customer_repo(&self) -> DbCustomerRepository {
        DbCustomerRepository {
            db: Arc::clone(&self.db),
        }
    }
}
