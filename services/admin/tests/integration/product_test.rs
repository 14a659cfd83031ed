use rust_decimal::Decimal;

use backoffice_admin::domain::validation::{FormValue, ProductForm, ProductListParams};
use backoffice_admin::error::AdminServiceError;
use backoffice_admin::usecase::product::{
    CreateProductUseCase, DeleteProductUseCase, GetProductUseCase, ListProductsUseCase,
    UpdateProductUseCase,
};
use backoffice_core::context::RequestContext;

use crate::helpers::{MockProductRepo, test_product};

fn form(name: &str, price: &str, stock: &str) -> ProductForm {
    ProductForm {
        name: Some(FormValue::text(name)),
        price: Some(FormValue::text(price)),
        stock: Some(FormValue::text(stock)),
        ..Default::default()
    }
}

fn min_price(bound: &str) -> ProductListParams {
    ProductListParams {
        min_price: Some(bound.to_owned()),
        ..Default::default()
    }
}

fn names(products: &[backoffice_admin::domain::types::Product]) -> Vec<&str> {
    products.iter().map(|p| p.name.as_str()).collect()
}

// ── Create then list ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_widget_and_filter_it_by_minimum_price() {
    let repo = MockProductRepo::empty();
    let ctx = RequestContext::detached();

    let widget = CreateProductUseCase { repo: repo.clone() }
        .execute(&ctx, &form("Widget", "150", "5"))
        .await
        .unwrap();
    assert_eq!(widget.image, None);
    assert_eq!(widget.stock, 5);

    let list = ListProductsUseCase { repo: repo.clone() };
    let above = list.execute(&min_price("200")).await.unwrap();
    assert!(above.is_empty());

    let from_100 = list.execute(&min_price("100")).await.unwrap();
    assert_eq!(from_100.len(), 1);
    assert_eq!(from_100[0].id, widget.id);
}

#[tokio::test]
async fn should_list_every_product_newest_first_without_filters() {
    let repo = MockProductRepo::new(vec![
        test_product("Oldest", Decimal::new(10, 0), 0),
        test_product("Newest", Decimal::new(30, 0), 20),
        test_product("Middle", Decimal::new(20, 0), 10),
    ]);
    let products = ListProductsUseCase { repo }
        .execute(&ProductListParams::default())
        .await
        .unwrap();
    assert_eq!(names(&products), vec!["Newest", "Middle", "Oldest"]);
}

#[tokio::test]
async fn should_treat_blank_filters_as_absent() {
    let repo = MockProductRepo::new(vec![
        test_product("Widget", Decimal::new(150, 0), 0),
        test_product("Gizmo", Decimal::new(90, 0), 1),
    ]);
    let params = ProductListParams {
        name: Some(String::new()),
        min_price: Some("  ".to_owned()),
        max_price: Some(String::new()),
    };
    let products = ListProductsUseCase { repo }.execute(&params).await.unwrap();
    assert_eq!(products.len(), 2);
}

#[tokio::test]
async fn should_only_return_products_inside_price_bounds() {
    let prices = [5, 50, 99, 100, 101, 150, 199, 200, 201, 1000];
    let seeded: Vec<_> = prices
        .iter()
        .enumerate()
        .map(|(i, price)| test_product(&format!("p{price}"), Decimal::new(*price, 0), i as i64))
        .collect();
    let repo = MockProductRepo::new(seeded.clone());
    let list = ListProductsUseCase { repo };

    for (lo, hi) in [(100, 200), (0, 5), (150, 150), (201, 100), (0, 10_000)] {
        let lo_d = Decimal::new(lo, 0);
        let hi_d = Decimal::new(hi, 0);
        let params = ProductListParams {
            name: None,
            min_price: Some(lo.to_string()),
            max_price: Some(hi.to_string()),
        };
        let returned = list.execute(&params).await.unwrap();

        for product in &returned {
            assert!(
                lo_d <= product.price && product.price <= hi_d,
                "{} outside [{lo}, {hi}]",
                product.price
            );
        }
        for product in &seeded {
            let inside = lo_d <= product.price && product.price <= hi_d;
            let listed = returned.iter().any(|p| p.id == product.id);
            assert_eq!(inside, listed, "{} with bounds [{lo}, {hi}]", product.price);
        }
    }
}

#[tokio::test]
async fn should_match_name_case_insensitively() {
    let repo = MockProductRepo::new(vec![
        test_product("Blue Widget", Decimal::new(150, 0), 0),
        test_product("Gizmo", Decimal::new(150, 0), 1),
    ]);
    let params = ProductListParams {
        name: Some("WIDGET".to_owned()),
        ..Default::default()
    };
    let products = ListProductsUseCase { repo }.execute(&params).await.unwrap();
    assert_eq!(names(&products), vec!["Blue Widget"]);
}

// ── Create validation ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_invalid_create_forms_without_persisting() {
    let repo = MockProductRepo::empty();
    let create = CreateProductUseCase { repo: repo.clone() };
    let ctx = RequestContext::detached();

    let cases = [
        (form("", "150", "5"), "name"),
        (form("Widget", "cheap", "5"), "price"),
        (form("Widget", "99.99", "5"), "price"),
        (form("Widget", "150", "0"), "stock"),
    ];
    for (input, field) in cases {
        let err = create.execute(&ctx, &input).await.unwrap_err();
        let AdminServiceError::Validation(errors) = err else {
            panic!("expected validation error for {field}, got {err:?}");
        };
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![field]);
    }
    assert!(repo.products.lock().unwrap().is_empty());
}

// ── Update ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_accept_zero_stock_but_reject_sub_cent_price_on_update() {
    let existing = test_product("Widget", Decimal::new(150, 0), 0);
    let repo = MockProductRepo::new(vec![existing.clone()]);
    let update = UpdateProductUseCase { repo: repo.clone() };
    let ctx = RequestContext::detached();

    let updated = update
        .execute(&ctx, existing.id, &form("Widget", "0.01", "0"))
        .await
        .unwrap();
    assert_eq!(updated.stock, 0);
    assert_eq!(updated.price, Decimal::new(1, 2));

    let err = update
        .execute(&ctx, existing.id, &form("Widget", "0.001", "0"))
        .await
        .unwrap_err();
    assert!(matches!(err, AdminServiceError::Validation(_)), "{err:?}");

    let stored = GetProductUseCase { repo }.execute(existing.id).await.unwrap();
    assert_eq!(stored.price, Decimal::new(1, 2));
}

// ── Delete ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_fail_second_delete_with_not_found() {
    let existing = test_product("Widget", Decimal::new(150, 0), 0);
    let repo = MockProductRepo::new(vec![existing.clone()]);
    let delete = DeleteProductUseCase { repo: repo.clone() };
    let ctx = RequestContext::detached();

    delete.execute(&ctx, existing.id).await.unwrap();
    let err = delete.execute(&ctx, existing.id).await.unwrap_err();
    assert!(matches!(err, AdminServiceError::ProductNotFound));

    let err = GetProductUseCase { repo }.execute(existing.id).await.unwrap_err();
    assert!(matches!(err, AdminServiceError::ProductNotFound));
}
