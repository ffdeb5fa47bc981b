//! Route-boundary validation
//!
//! Every product route validates its input here before the handler runs.
//! Each route has a declarative rule set evaluated in declaration order;
//! failures accumulate into one ordered list and the request is rejected
//! with `400 { "errors": [...] }` exactly when that list is non-empty.
//! Handlers therefore only ever see fully validated, typed input.
//!
//! Bodies are first parsed leniently (every field is a raw JSON value) so
//! a type mismatch in one field cannot mask findings about the others: an
//! empty create body reports all four field failures at once.

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::products::{NewProduct, ProductUpdate};

// ============================================================================
// Messages
// ============================================================================

pub const INVALID_ID: &str = "ID no válido";
pub const NAME_REQUIRED: &str = "Tienes que asignar un nombre al Producto";
pub const PRICE_NOT_NUMERIC: &str = "El precio debe ser un número";
pub const PRICE_REQUIRED: &str = "Hay que asignar un precio al Producto";
pub const PRICE_NOT_POSITIVE: &str = "El Precio debe ser mayor que 0";
pub const AVAILABILITY_NOT_BOOLEAN: &str = "Valor no válido para la Disponibilidad";
pub const MALFORMED_BODY: &str = "Formato JSON no válido";

// ============================================================================
// Error shape
// ============================================================================

/// One failed constraint on one request field
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ValidationIssue {
    #[schema(example = "El Precio debe ser mayor que 0")]
    pub msg: String,

    #[schema(example = "price")]
    pub path: String,

    pub location: FieldLocation,
}

/// Where the offending field came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FieldLocation {
    Params,
    Body,
}

impl ValidationIssue {
    fn body(path: &str, msg: &str) -> Self {
        Self {
            msg: msg.to_string(),
            path: path.to_string(),
            location: FieldLocation::Body,
        }
    }

    fn params(path: &str, msg: &str) -> Self {
        Self {
            msg: msg.to_string(),
            path: path.to_string(),
            location: FieldLocation::Params,
        }
    }
}

/// Accumulated validation failures for one request, rendered as 400
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ValidationErrors {
    pub errors: Vec<ValidationIssue>,
}

impl ValidationErrors {
    fn new(errors: Vec<ValidationIssue>) -> Self {
        Self { errors }
    }
}

impl IntoResponse for ValidationErrors {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(self)).into_response()
    }
}

fn malformed_body() -> ValidationErrors {
    ValidationErrors::new(vec![ValidationIssue::body("", MALFORMED_BODY)])
}

// ============================================================================
// Lenient payload
// ============================================================================

/// Request body with every field kept as a raw JSON value
#[derive(Debug, Clone, Default, Deserialize)]
struct ProductPayload {
    #[serde(default)]
    name: Option<Value>,

    #[serde(default)]
    price: Option<Value>,

    #[serde(default)]
    availability: Option<Value>,
}

impl ProductPayload {
    fn field(&self, path: &str) -> Option<&Value> {
        match path {
            "name" => self.name.as_ref(),
            "price" => self.price.as_ref(),
            "availability" => self.availability.as_ref(),
            _ => None,
        }
    }

    /// Typed create input, available exactly when the create rules pass.
    fn to_new_product(&self) -> Option<NewProduct> {
        Some(NewProduct {
            name: non_empty_text(self.name.as_ref())?.to_string(),
            price: numeric_value(self.price.as_ref())?,
        })
    }

    /// Typed full-update input, available exactly when the update rules pass.
    fn to_product_update(&self) -> Option<ProductUpdate> {
        Some(ProductUpdate {
            name: non_empty_text(self.name.as_ref())?.to_string(),
            price: numeric_value(self.price.as_ref())?,
            availability: boolean_value(self.availability.as_ref())?,
        })
    }
}

// ============================================================================
// Field checks
// ============================================================================

fn non_empty_text(value: Option<&Value>) -> Option<&str> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    }
}

/// Numeric in the forgiving sense the API accepts: a JSON number, or a
/// string containing one ("120" passes, "hola" does not).
fn numeric_value(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

fn boolean_value(value: Option<&Value>) -> Option<bool> {
    match value {
        Some(Value::Bool(b)) => Some(*b),
        _ => None,
    }
}

/// Present in the sense of "not empty": absent, null, and the empty string
/// all count as undeclared.
fn is_declared(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

fn check_name(value: Option<&Value>) -> bool {
    non_empty_text(value).is_some()
}

fn check_price_numeric(value: Option<&Value>) -> bool {
    numeric_value(value).is_some()
}

fn check_price_declared(value: Option<&Value>) -> bool {
    is_declared(value)
}

fn check_price_positive(value: Option<&Value>) -> bool {
    numeric_value(value).is_some_and(|price| price > 0.0)
}

fn check_availability(value: Option<&Value>) -> bool {
    boolean_value(value).is_some()
}

fn check_availability_if_present(value: Option<&Value>) -> bool {
    value.is_none() || boolean_value(value).is_some()
}

// ============================================================================
// Rule sets
// ============================================================================

/// One declarative constraint on one body field
///
/// `check` returns true when the constraint holds. Rule sets are evaluated
/// top to bottom and never short-circuit, so error order always matches
/// declaration order.
struct FieldRule {
    path: &'static str,
    message: &'static str,
    check: fn(Option<&Value>) -> bool,
}

const CREATE_RULES: &[FieldRule] = &[
    FieldRule {
        path: "name",
        message: NAME_REQUIRED,
        check: check_name,
    },
    FieldRule {
        path: "price",
        message: PRICE_NOT_NUMERIC,
        check: check_price_numeric,
    },
    FieldRule {
        path: "price",
        message: PRICE_REQUIRED,
        check: check_price_declared,
    },
    FieldRule {
        path: "price",
        message: PRICE_NOT_POSITIVE,
        check: check_price_positive,
    },
];

const UPDATE_RULES: &[FieldRule] = &[
    FieldRule {
        path: "name",
        message: NAME_REQUIRED,
        check: check_name,
    },
    FieldRule {
        path: "price",
        message: PRICE_NOT_NUMERIC,
        check: check_price_numeric,
    },
    FieldRule {
        path: "price",
        message: PRICE_REQUIRED,
        check: check_price_declared,
    },
    FieldRule {
        path: "price",
        message: PRICE_NOT_POSITIVE,
        check: check_price_positive,
    },
    FieldRule {
        path: "availability",
        message: AVAILABILITY_NOT_BOOLEAN,
        check: check_availability,
    },
];

/// A toggle carries no required body; an availability field is only
/// type-checked when the client sends one.
const TOGGLE_RULES: &[FieldRule] = &[FieldRule {
    path: "availability",
    message: AVAILABILITY_NOT_BOOLEAN,
    check: check_availability_if_present,
}];

fn evaluate(rules: &[FieldRule], payload: &ProductPayload) -> Vec<ValidationIssue> {
    rules
        .iter()
        .filter(|rule| !(rule.check)(payload.field(rule.path)))
        .map(|rule| ValidationIssue::body(rule.path, rule.message))
        .collect()
}

fn parse_product_id(raw: &str) -> Option<i32> {
    raw.parse::<i32>().ok()
}

// ============================================================================
// Extractors
// ============================================================================

async fn extract_id<S: Send + Sync>(
    parts: &mut Parts,
    state: &S,
    errors: &mut Vec<ValidationIssue>,
) -> Option<i32> {
    let raw = match Path::<String>::from_request_parts(parts, state).await {
        Ok(Path(raw)) => raw,
        Err(_) => {
            errors.push(ValidationIssue::params("id", INVALID_ID));
            return None;
        }
    };

    let id = parse_product_id(&raw);
    if id.is_none() {
        errors.push(ValidationIssue::params("id", INVALID_ID));
    }
    id
}

async fn read_payload<S: Send + Sync>(
    req: Request,
    state: &S,
) -> Result<ProductPayload, ValidationErrors> {
    let bytes = Bytes::from_request(req, state)
        .await
        .map_err(|_| malformed_body())?;

    // An absent body is the empty payload, like a body parser that
    // defaults to `{}`.
    if bytes.is_empty() {
        return Ok(ProductPayload::default());
    }

    serde_json::from_slice(&bytes).map_err(|_| malformed_body())
}

/// Validated path id for lookup and delete routes
#[derive(Debug, Clone, Copy)]
pub struct ProductId(pub i32);

impl<S> FromRequestParts<S> for ProductId
where
    S: Send + Sync,
{
    type Rejection = ValidationErrors;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let mut errors = Vec::new();
        match extract_id(parts, state, &mut errors).await {
            Some(id) => Ok(Self(id)),
            None => Err(ValidationErrors::new(errors)),
        }
    }
}

/// Validated create request body
#[derive(Debug, Clone)]
pub struct NewProductInput(pub NewProduct);

impl<S> FromRequest<S> for NewProductInput
where
    S: Send + Sync,
{
    type Rejection = ValidationErrors;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let payload = read_payload(req, state).await?;
        let errors = evaluate(CREATE_RULES, &payload);

        match payload.to_new_product() {
            Some(input) if errors.is_empty() => Ok(Self(input)),
            _ => Err(ValidationErrors::new(errors)),
        }
    }
}

/// Validated full-update request: path id plus replacement fields
///
/// The id rule runs first, so its failure leads the error list, followed by
/// the body rules in declaration order.
#[derive(Debug, Clone)]
pub struct UpdateProductInput {
    pub id: i32,
    pub update: ProductUpdate,
}

impl<S> FromRequest<S> for UpdateProductInput
where
    S: Send + Sync,
{
    type Rejection = ValidationErrors;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();

        let mut errors = Vec::new();
        let id = extract_id(&mut parts, state, &mut errors).await;

        let payload = read_payload(Request::from_parts(parts, body), state).await?;
        errors.extend(evaluate(UPDATE_RULES, &payload));

        match (id, payload.to_product_update()) {
            (Some(id), Some(update)) if errors.is_empty() => Ok(Self { id, update }),
            _ => Err(ValidationErrors::new(errors)),
        }
    }
}

/// Validated availability-toggle request
///
/// Only the id is carried through; the new availability is computed from
/// the stored value, never taken from the client.
#[derive(Debug, Clone, Copy)]
pub struct ToggleProductInput {
    pub id: i32,
}

impl<S> FromRequest<S> for ToggleProductInput
where
    S: Send + Sync,
{
    type Rejection = ValidationErrors;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();

        let mut errors = Vec::new();
        let id = extract_id(&mut parts, state, &mut errors).await;

        let payload = read_payload(Request::from_parts(parts, body), state).await?;
        errors.extend(evaluate(TOGGLE_RULES, &payload));

        match id {
            Some(id) if errors.is_empty() => Ok(Self { id }),
            _ => Err(ValidationErrors::new(errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> ProductPayload {
        serde_json::from_value(value).unwrap()
    }

    fn messages(issues: &[ValidationIssue]) -> Vec<&str> {
        issues.iter().map(|issue| issue.msg.as_str()).collect()
    }

    #[test]
    fn test_numeric_value_accepts_numbers_and_numeric_strings() {
        assert_eq!(numeric_value(Some(&json!(120))), Some(120.0));
        assert_eq!(numeric_value(Some(&json!(0.5))), Some(0.5));
        assert_eq!(numeric_value(Some(&json!("120"))), Some(120.0));
        assert_eq!(numeric_value(Some(&json!("-3.5"))), Some(-3.5));
        assert_eq!(numeric_value(Some(&json!("hola"))), None);
        assert_eq!(numeric_value(Some(&json!(""))), None);
        assert_eq!(numeric_value(Some(&json!(true))), None);
        assert_eq!(numeric_value(None), None);
    }

    #[test]
    fn test_is_declared() {
        assert!(!is_declared(None));
        assert!(!is_declared(Some(&Value::Null)));
        assert!(!is_declared(Some(&json!(""))));
        assert!(is_declared(Some(&json!("hola"))));
        assert!(is_declared(Some(&json!(0))));
        assert!(is_declared(Some(&json!(false))));
    }

    #[test]
    fn test_boolean_value_rejects_coercions() {
        assert_eq!(boolean_value(Some(&json!(true))), Some(true));
        assert_eq!(boolean_value(Some(&json!(false))), Some(false));
        assert_eq!(boolean_value(Some(&json!("true"))), None);
        assert_eq!(boolean_value(Some(&json!(1))), None);
    }

    #[test]
    fn test_parse_product_id() {
        assert_eq!(parse_product_id("1"), Some(1));
        assert_eq!(parse_product_id("2000"), Some(2000));
        assert_eq!(parse_product_id("-3"), Some(-3));
        assert_eq!(parse_product_id("1.5"), None);
        assert_eq!(parse_product_id("not-valid-url"), None);
        assert_eq!(parse_product_id(""), None);
        // Larger than i32 cannot address any stored product
        assert_eq!(parse_product_id("99999999999999"), None);
    }

    #[test]
    fn test_empty_create_body_reports_all_four_errors_in_order() {
        let issues = evaluate(CREATE_RULES, &payload(json!({})));
        assert_eq!(
            messages(&issues),
            vec![
                "Tienes que asignar un nombre al Producto",
                "El precio debe ser un número",
                "Hay que asignar un precio al Producto",
                "El Precio debe ser mayor que 0",
            ]
        );
    }

    #[test]
    fn test_empty_update_body_reports_all_five_errors_in_order() {
        let issues = evaluate(UPDATE_RULES, &payload(json!({})));
        assert_eq!(
            messages(&issues),
            vec![
                "Tienes que asignar un nombre al Producto",
                "El precio debe ser un número",
                "Hay que asignar un precio al Producto",
                "El Precio debe ser mayor que 0",
                "Valor no válido para la Disponibilidad",
            ]
        );
    }

    #[test]
    fn test_zero_price_fails_only_the_positive_check() {
        let issues = evaluate(CREATE_RULES, &payload(json!({ "name": "Monitor", "price": 0 })));
        assert_eq!(messages(&issues), vec!["El Precio debe ser mayor que 0"]);
    }

    #[test]
    fn test_text_price_fails_numeric_and_positive_but_not_presence() {
        let issues = evaluate(
            CREATE_RULES,
            &payload(json!({ "name": "Monitor", "price": "hola" })),
        );
        assert_eq!(
            messages(&issues),
            vec![
                "El precio debe ser un número",
                "El Precio debe ser mayor que 0",
            ]
        );
    }

    #[test]
    fn test_numeric_string_price_passes() {
        let issues = evaluate(
            CREATE_RULES,
            &payload(json!({ "name": "Monitor", "price": "120" })),
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_empty_name_fails() {
        let issues = evaluate(CREATE_RULES, &payload(json!({ "name": "", "price": 50 })));
        assert_eq!(messages(&issues), vec!["Tienes que asignar un nombre al Producto"]);
    }

    #[test]
    fn test_update_requires_boolean_availability() {
        let issues = evaluate(
            UPDATE_RULES,
            &payload(json!({ "name": "Monitor", "price": 50, "availability": "si" })),
        );
        assert_eq!(messages(&issues), vec!["Valor no válido para la Disponibilidad"]);
    }

    #[test]
    fn test_toggle_body_is_optional() {
        assert!(evaluate(TOGGLE_RULES, &payload(json!({}))).is_empty());
        assert!(evaluate(TOGGLE_RULES, &payload(json!({ "availability": false }))).is_empty());
    }

    #[test]
    fn test_toggle_rejects_non_boolean_availability() {
        let issues = evaluate(TOGGLE_RULES, &payload(json!({ "availability": "si" })));
        assert_eq!(messages(&issues), vec!["Valor no válido para la Disponibilidad"]);
    }

    #[test]
    fn test_issue_locations_serialize_lowercase() {
        let issue = ValidationIssue::params("id", INVALID_ID);
        let value = serde_json::to_value(&issue).unwrap();
        assert_eq!(
            value,
            json!({ "msg": "ID no válido", "path": "id", "location": "params" })
        );

        let issue = ValidationIssue::body("price", PRICE_REQUIRED);
        assert_eq!(
            serde_json::to_value(&issue).unwrap()["location"],
            json!("body")
        );
    }

    #[test]
    fn test_typed_conversion_follows_the_rules() {
        let ok = payload(json!({ "name": "Monitor", "price": "120" }));
        let product = ok.to_new_product().unwrap();
        assert_eq!(product.name, "Monitor");
        assert_eq!(product.price, 120.0);

        assert!(payload(json!({ "price": 120 })).to_new_product().is_none());
        assert!(payload(json!({ "name": "Monitor" })).to_new_product().is_none());

        let full = payload(json!({ "name": "Monitor", "price": 120, "availability": false }));
        let update = full.to_product_update().unwrap();
        assert!(!update.availability);
        assert!(payload(json!({ "name": "Monitor", "price": 120 }))
            .to_product_update()
            .is_none());
    }
}
