//! Query-building helpers on top of sea-orm.

use sea_orm::{
    ColumnTrait, Condition, EntityTrait, Iterable, Order, PrimaryKeyToColumn, QueryFilter,
    QueryOrder, Select,
    sea_query::{Expr, Func, IntoCondition, LikeExpr, SimpleExpr},
};

use backoffice_domain::listing::Sort;

const LIKE_ESCAPE: char = '\\';

/// Builds a listing from an unconditioned `SELECT` plus any number of
/// optional predicates.
///
/// Every `filter_by` call whose value is `Some` contributes exactly one
/// condition; conditions are joined with `AND`. A filter that needs an `OR`
/// passes a `Condition::any()` as its single condition. `None` values add
/// nothing, so a query with no active filters lists every row.
///
/// ```ignore
/// let select = FilterableListQuery::new(products::Entity::find())
///     .filter_by(filter.min_price, |min| products::Column::Price.gte(min))
///     .order_by_created(products::Column::CreatedAt, Sort::Desc);
/// ```
#[derive(Debug)]
pub struct FilterableListQuery<E: EntityTrait> {
    select: Select<E>,
    condition: Condition,
}

impl<E: EntityTrait> FilterableListQuery<E> {
    pub fn new(select: Select<E>) -> Self {
        Self {
            select,
            condition: Condition::all(),
        }
    }

    /// Add `predicate(value)` when `value` is present.
    pub fn filter_by<T, C, F>(mut self, value: Option<T>, predicate: F) -> Self
    where
        C: IntoCondition,
        F: FnOnce(T) -> C,
    {
        if let Some(value) = value {
            self.condition = self.condition.add(predicate(value).into_condition());
        }
        self
    }

    /// Number of predicates applied so far.
    pub fn predicate_count(&self) -> usize {
        self.condition.len()
    }

    /// Finish the listing ordered by creation time, then by primary key so
    /// rows created in the same instant keep a stable order.
    pub fn order_by_created<C>(self, created_at: C, sort: Sort) -> Select<E>
    where
        C: ColumnTrait,
    {
        let order = match sort {
            Sort::Desc => Order::Desc,
            Sort::Asc => Order::Asc,
        };
        let mut select = self.select;
        if !self.condition.is_empty() {
            select = select.filter(self.condition);
        }
        select = select.order_by(created_at, order.clone());
        for key in E::PrimaryKey::iter() {
            select = select.order_by(key.into_column(), order.clone());
        }
        select
    }
}

/// Case-insensitive substring match of `column` against `term`.
///
/// `%`, `_` and the escape character in `term` are matched literally.
pub fn contains_insensitive<C>(column: C, term: &str) -> SimpleExpr
where
    C: ColumnTrait,
{
    let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
    Expr::expr(Func::lower(Expr::col((column.entity_name(), column))))
        .like(LikeExpr::new(pattern).escape(LIKE_ESCAPE))
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}
