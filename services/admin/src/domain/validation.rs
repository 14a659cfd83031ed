//! Input validation for product forms, listing filters and order status.
//!
//! Failures are collected per field so a form can show every problem at once.

use std::collections::BTreeMap;
use std::str::FromStr;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use rust_decimal::{Decimal, RoundingStrategy};

use backoffice_domain::listing::FilterParam;
use backoffice_domain::order::OrderStatus;

use crate::domain::types::{OrderFilter, ProductFilter};

pub const NAME_MAX_CHARS: usize = 255;
/// Upper bound of a `decimal(10, 2)` column.
pub const PRICE_MAX: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);
pub const IMAGE_MAX_KILOBYTES: usize = 2048;
pub const IMAGE_TYPES: [&str; 5] = ["jpeg", "png", "jpg", "gif", "svg"];

/// Field-level validation messages, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<&'static str, Vec<String>>);

impl ValidationErrors {
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// `Ok(value)` when no message was recorded.
    pub fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() { Ok(value()) } else { Err(self) }
    }
}

/// A submitted form field, before any rule is applied.
///
/// HTML forms send everything as text while JSON clients send numbers, so
/// numeric rules accept both.
#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    Text(String),
    Number(String),
    /// Anything else: booleans, arrays, objects.
    Unsupported,
}

impl FormValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Trimmed text, with blank text treated as missing.
    fn present(field: Option<&FormValue>) -> Option<&FormValue> {
        match field {
            Some(Self::Text(text)) if text.trim().is_empty() => None,
            other => other,
        }
    }
}

/// Raw product form as submitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub name: Option<FormValue>,
    pub description: Option<FormValue>,
    pub price: Option<FormValue>,
    pub image: Option<FormValue>,
    pub stock: Option<FormValue>,
}

/// Which rule set a product form is checked against.
///
/// Creating is stricter than updating: a new product must cost at least 100
/// and have stock, while an existing one may drop to 0.01 and go out of stock.
/// Only new products have their image checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductRules {
    Create,
    Update,
}

impl ProductRules {
    pub fn min_price(self) -> Decimal {
        match self {
            Self::Create => Decimal::new(100, 0),
            Self::Update => Decimal::new(1, 2),
        }
    }

    pub fn min_stock(self) -> i32 {
        match self {
            Self::Create => 1,
            Self::Update => 0,
        }
    }
}

/// A product form that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub image: Option<String>,
    pub stock: i32,
}

pub fn validate_product(
    form: &ProductForm,
    rules: ProductRules,
) -> Result<ProductDraft, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let name = required_string(&mut errors, "name", form.name.as_ref());
    if let Some(ref name) = name {
        if name.chars().count() > NAME_MAX_CHARS {
            errors.add(
                "name",
                format!("The name field must not be greater than {NAME_MAX_CHARS} characters."),
            );
        }
    }

    let description = optional_string(&mut errors, "description", form.description.as_ref());

    let price = required_number(&mut errors, "price", form.price.as_ref());
    if let Some(price) = price {
        let min = rules.min_price();
        if price < min {
            errors.add("price", format!("The price field must be at least {min}."));
        } else if price > PRICE_MAX {
            errors.add(
                "price",
                format!("The price field must not be greater than {PRICE_MAX}."),
            );
        }
    }

    let image = optional_string(&mut errors, "image", form.image.as_ref());
    if let (Some(image), ProductRules::Create) = (image.as_deref(), rules) {
        if let Err(message) = check_image(image) {
            errors.add("image", message);
        }
    }

    let stock = required_integer(&mut errors, "stock", form.stock.as_ref());
    if let Some(stock) = stock {
        let min = rules.min_stock();
        if stock < min {
            errors.add("stock", format!("The stock field must be at least {min}."));
        }
    }

    match (name, price, stock) {
        (Some(name), Some(price), Some(stock)) if errors.is_empty() => Ok(ProductDraft {
            name,
            description,
            price: price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            image,
            stock,
        }),
        _ => Err(errors),
    }
}

/// Accepts `http(s)` URLs and `data:` URLs carrying a base64 image of an
/// allowed type and size.
fn check_image(image: &str) -> Result<(), String> {
    let not_an_image = || "The image field must be an image.".to_owned();

    if image.starts_with("http://") || image.starts_with("https://") {
        return Ok(());
    }
    let Some(rest) = image.strip_prefix("data:") else {
        return Err(not_an_image());
    };
    let Some((media_type, payload)) = rest.split_once(";base64,") else {
        return Err(not_an_image());
    };
    let Some(subtype) = media_type.to_ascii_lowercase().strip_prefix("image/").map(|s| {
        s.strip_suffix("+xml").unwrap_or(s).to_owned()
    }) else {
        return Err(not_an_image());
    };
    if !IMAGE_TYPES.contains(&subtype.as_str()) {
        return Err(format!(
            "The image field must be a file of type: {}.",
            IMAGE_TYPES.join(", ")
        ));
    }
    let bytes = STANDARD.decode(payload.trim()).map_err(|_| not_an_image())?;
    if bytes.len() > IMAGE_MAX_KILOBYTES * 1024 {
        return Err(format!(
            "The image field must not be greater than {IMAGE_MAX_KILOBYTES} kilobytes."
        ));
    }
    Ok(())
}

/// Raw product listing query values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductListParams {
    pub name: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

pub fn parse_product_filter(params: &ProductListParams) -> Result<ProductFilter, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let name = FilterParam::from_raw(params.name.as_deref()).into_active();
    let min_price = price_bound(&mut errors, "min_price", params.min_price.as_deref());
    let max_price = price_bound(&mut errors, "max_price", params.max_price.as_deref());
    errors.finish(|| ProductFilter {
        name,
        min_price,
        max_price,
    })
}

fn price_bound(
    errors: &mut ValidationErrors,
    field: &'static str,
    raw: Option<&str>,
) -> Option<Decimal> {
    let raw = FilterParam::from_raw(raw).into_active()?;
    let parsed = parse_decimal(&raw);
    if parsed.is_none() {
        errors.add(field, format!("The {field} field must be a number."));
    }
    parsed
}

/// Raw order listing query values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderListParams {
    pub status: Option<String>,
    pub search: Option<String>,
}

pub fn parse_order_filter(params: &OrderListParams) -> Result<OrderFilter, ValidationErrors> {
    let status = FilterParam::from_raw_with_sentinel(params.status.as_deref())
        .try_map(|raw| OrderStatus::from_str(&raw))
        .map_err(|_| ValidationErrors::single("status", "The selected status is invalid."))?;
    let search = FilterParam::from_raw(params.search.as_deref()).into_active();
    Ok(OrderFilter { status, search })
}

/// Validate the requested status of an order status update.
pub fn validate_status(raw: Option<&str>) -> Result<OrderStatus, ValidationErrors> {
    match raw.map(str::trim) {
        None | Some("") => Err(ValidationErrors::single(
            "status",
            "The status field is required.",
        )),
        Some(raw) => raw
            .parse()
            .map_err(|_| ValidationErrors::single("status", "The selected status is invalid.")),
    }
}

fn required_string(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<&FormValue>,
) -> Option<String> {
    match FormValue::present(value) {
        None => {
            errors.add(field, format!("The {field} field is required."));
            None
        }
        Some(_) => optional_string(errors, field, value),
    }
}

fn optional_string(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<&FormValue>,
) -> Option<String> {
    match FormValue::present(value)? {
        FormValue::Text(text) => Some(text.trim().to_owned()),
        FormValue::Number(_) | FormValue::Unsupported => {
            errors.add(field, format!("The {field} field must be a string."));
            None
        }
    }
}

fn required_number(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<&FormValue>,
) -> Option<Decimal> {
    let parsed = match FormValue::present(value) {
        None => {
            errors.add(field, format!("The {field} field is required."));
            return None;
        }
        Some(FormValue::Text(raw) | FormValue::Number(raw)) => parse_decimal(raw),
        Some(FormValue::Unsupported) => None,
    };
    if parsed.is_none() {
        errors.add(field, format!("The {field} field must be a number."));
    }
    parsed
}

fn required_integer(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<&FormValue>,
) -> Option<i32> {
    let parsed = match FormValue::present(value) {
        None => {
            errors.add(field, format!("The {field} field is required."));
            return None;
        }
        Some(FormValue::Text(raw) | FormValue::Number(raw)) => raw.trim().parse::<i32>().ok(),
        Some(FormValue::Unsupported) => None,
    };
    if parsed.is_none() {
        errors.add(field, format!("The {field} field must be an integer."));
    }
    parsed
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}
