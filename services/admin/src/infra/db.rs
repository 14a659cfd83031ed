use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use anyhow::anyhow;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, LoaderTrait, QueryFilter, QueryOrder, Select, SqlErr,
    sea_query::{Expr, Query},
};

use backoffice_admin_schema::{order_items, orders, products, users};
use backoffice_core::sea_ext::{FilterableListQuery, contains_insensitive};
use backoffice_domain::id::{OrderId, ProductId};
use backoffice_domain::listing::Sort;
use backoffice_domain::order::OrderStatus;

use crate::domain::repository::{CustomerRepository, OrderRepository, ProductRepository};
use crate::domain::types::{
    Customer, Order, OrderDetail, OrderFilter, OrderInclude, OrderItem, Product, ProductFilter,
};
use crate::error::AdminServiceError;

// ── Error classification ─────────────────────────────────────────────────────

/// Attach context to a store error and sort it into the service error kinds.
trait StoreContext<T> {
    fn store_context(self, what: &'static str) -> Result<T, AdminServiceError>;
}

impl<T> StoreContext<T> for Result<T, DbErr> {
    fn store_context(self, what: &'static str) -> Result<T, AdminServiceError> {
        self.map_err(|err| classify_db_err(err, what))
    }
}

fn classify_db_err(err: DbErr, what: &'static str) -> AdminServiceError {
    if let Some(violation) = err.sql_err().and_then(|e| constraint_violation(e, what)) {
        return violation;
    }
    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => {
            AdminServiceError::StoreUnavailable(anyhow::Error::new(err).context(what))
        }
        other => AdminServiceError::Internal(anyhow::Error::new(other).context(what)),
    }
}

/// Unique and foreign-key violations become conflicts; other SQL errors are
/// left to the caller.
fn constraint_violation(err: SqlErr, what: &'static str) -> Option<AdminServiceError> {
    let message = match err {
        SqlErr::UniqueConstraintViolation(_) => {
            "a record with the same unique value already exists"
        }
        SqlErr::ForeignKeyConstraintViolation(_) => "a referenced record does not exist",
        _ => return None,
    };
    Some(AdminServiceError::ConstraintViolation(format!("{what}: {message}")))
}

// ── Listing queries ──────────────────────────────────────────────────────────

pub fn product_list_query(filter: &ProductFilter) -> Select<products::Entity> {
    FilterableListQuery::new(products::Entity::find())
        .filter_by(filter.name.as_deref(), |term| {
            contains_insensitive(products::Column::Name, term)
        })
        .filter_by(filter.min_price, |min| products::Column::Price.gte(min))
        .filter_by(filter.max_price, |max| products::Column::Price.lte(max))
        .order_by_created(products::Column::CreatedAt, Sort::Desc)
}

/// `search` matches the order number or, through a subquery, the name of the
/// customer who placed the order.
pub fn order_list_query(filter: &OrderFilter) -> Select<orders::Entity> {
    FilterableListQuery::new(orders::Entity::find())
        .filter_by(filter.status.active().copied(), |status| {
            orders::Column::Status.eq(status.as_str())
        })
        .filter_by(filter.search.as_deref(), |term| {
            let customers_named = Query::select()
                .column(users::Column::Id)
                .from(users::Entity)
                .and_where(contains_insensitive(users::Column::Name, term))
                .to_owned();
            Condition::any()
                .add(contains_insensitive(orders::Column::OrderNumber, term))
                .add(orders::Column::UserId.in_subquery(customers_named))
        })
        .order_by_created(orders::Column::CreatedAt, Sort::Desc)
}

// ── Product repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProductRepository {
    pub db: Arc<DatabaseConnection>,
}

impl ProductRepository for DbProductRepository {
    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, AdminServiceError> {
        let models = product_list_query(filter)
            .all(&*self.db)
            .await
            .store_context("list products")?;
        Ok(models.into_iter().map(product_from_model).collect())
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, AdminServiceError> {
        let model = products::Entity::find_by_id(id.0)
            .one(&*self.db)
            .await
            .store_context("find product by id")?;
        Ok(model.map(product_from_model))
    }

    async fn create(&self, product: &Product) -> Result<(), AdminServiceError> {
        product_active_model(product)
            .insert(&*self.db)
            .await
            .store_context("create product")?;
        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<bool, AdminServiceError> {
        match product_active_model(product).update(&*self.db).await {
            Ok(_) => Ok(true),
            Err(DbErr::RecordNotUpdated) => Ok(false),
            Err(err) => Err(classify_db_err(err, "update product")),
        }
    }

    async fn delete(&self, id: ProductId) -> Result<bool, AdminServiceError> {
        let result = products::Entity::delete_by_id(id.0)
            .exec(&*self.db)
            .await
            .store_context("delete product")?;
        Ok(result.rows_affected > 0)
    }
}

fn product_active_model(product: &Product) -> products::ActiveModel {
    products::ActiveModel {
        id: Set(product.id.0),
        name: Set(product.name.clone()),
        description: Set(product.description.clone()),
        price: Set(product.price),
        image: Set(product.image.clone()),
        stock: Set(product.stock),
        created_at: Set(product.created_at),
        updated_at: Set(product.updated_at),
    }
}

fn product_from_model(model: products::Model) -> Product {
    Product {
        id: model.id.into(),
        name: model.name,
        description: model.description,
        price: model.price,
        image: model.image,
        stock: model.stock,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Order repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOrderRepository {
    pub db: Arc<DatabaseConnection>,
}

impl DbOrderRepository {
    /// Attach the requested relations, one batched query per relation.
    async fn with_relations(
        &self,
        models: Vec<orders::Model>,
        include: OrderInclude,
    ) -> Result<Vec<OrderDetail>, AdminServiceError> {
        let mut customers: Vec<Option<Option<Customer>>> = if include.user {
            models
                .load_one(users::Entity, &*self.db)
                .await
                .store_context("load order customers")?
                .into_iter()
                .map(|user| Some(user.map(customer_from_model)))
                .collect()
        } else {
            vec![None; models.len()]
        };

        let mut items: Vec<Option<Vec<OrderItem>>> = if include.items {
            self.load_items(&models).await?.into_iter().map(Some).collect()
        } else {
            vec![None; models.len()]
        };

        let mut details = Vec::with_capacity(models.len());
        for (i, model) in models.into_iter().enumerate() {
            details.push(OrderDetail {
                order: order_from_model(model)?,
                user: customers[i].take().flatten(),
                items: items[i].take(),
            });
        }
        Ok(details)
    }

    async fn load_items(
        &self,
        models: &[orders::Model],
    ) -> Result<Vec<Vec<OrderItem>>, AdminServiceError> {
        let mut item_models = models
            .load_many(order_items::Entity, &*self.db)
            .await
            .store_context("load order items")?;
        for items in &mut item_models {
            items.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        }

        let product_ids: HashSet<_> = item_models
            .iter()
            .flatten()
            .filter_map(|item| item.product_id)
            .collect();
        let products: HashMap<_, _> = if product_ids.is_empty() {
            HashMap::new()
        } else {
            products::Entity::find()
                .filter(products::Column::Id.is_in(product_ids))
                .all(&*self.db)
                .await
                .store_context("load order item products")?
                .into_iter()
                .map(|model| (model.id, product_from_model(model)))
                .collect()
        };

        Ok(item_models
            .into_iter()
            .map(|items| {
                items
                    .into_iter()
                    .map(|item| OrderItem {
                        id: item.id.into(),
                        order_id: item.order_id.into(),
                        product_id: item.product_id.map(ProductId::from),
                        quantity: item.quantity,
                        price: item.price,
                        product: item.product_id.and_then(|id| products.get(&id).cloned()),
                    })
                    .collect()
            })
            .collect())
    }
}

impl OrderRepository for DbOrderRepository {
    async fn list(
        &self,
        filter: &OrderFilter,
        include: OrderInclude,
    ) -> Result<Vec<OrderDetail>, AdminServiceError> {
        let models = order_list_query(filter)
            .all(&*self.db)
            .await
            .store_context("list orders")?;
        self.with_relations(models, include).await
    }

    async fn find_by_id(
        &self,
        id: OrderId,
        include: OrderInclude,
    ) -> Result<Option<OrderDetail>, AdminServiceError> {
        let Some(model) = orders::Entity::find_by_id(id.0)
            .one(&*self.db)
            .await
            .store_context("find order by id")?
        else {
            return Ok(None);
        };
        Ok(self.with_relations(vec![model], include).await?.pop())
    }

    async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<bool, AdminServiceError> {
        let result = orders::Entity::update_many()
            .col_expr(orders::Column::Status, Expr::value(status.as_str()))
            .col_expr(orders::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(orders::Column::Id.eq(id.0))
            .exec(&*self.db)
            .await
            .store_context("update order status")?;
        Ok(result.rows_affected > 0)
    }
}

fn order_from_model(model: orders::Model) -> Result<Order, AdminServiceError> {
    let status = model.status.parse::<OrderStatus>().map_err(|e| {
        AdminServiceError::Internal(anyhow!(e).context(format!("order {}", model.id)))
    })?;
    Ok(Order {
        id: model.id.into(),
        user_id: model.user_id.into(),
        order_number: model.order_number,
        total_amount: model.total_amount,
        status,
        shipping_address: model.shipping_address,
        billing_address: model.billing_address,
        payment_method: model.payment_method,
        payment_status: model.payment_status,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Customer repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCustomerRepository {
    pub db: Arc<DatabaseConnection>,
}

impl CustomerRepository for DbCustomerRepository {
    async fn list(&self) -> Result<Vec<Customer>, AdminServiceError> {
        let models = users::Entity::find()
            .order_by_asc(users::Column::Name)
            .order_by_asc(users::Column::Id)
            .all(&*self.db)
            .await
            .store_context("list customers")?;
        Ok(models.into_iter().map(customer_from_model).collect())
    }
}

fn customer_from_model(model: users::Model) -> Customer {
    Customer {
        id: model.id.into(),
        name: model.name,
        email: model.email,
    }
}
