//! Product resource model and payload schema.

use std::cmp::Ordering;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

use super::ProductId;
use super::validation::{FieldSchema, ObjectSchema};

pub const PRODUCT_NOT_FOUND: &str = "Product not found";
pub const PRODUCT_DOES_NOT_EXIST: &str = "The product does not exist.";
pub const PRODUCT_ALREADY_EXISTS: &str = "Product already exists.";

// Integral floats fit exactly below 2^53.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Stored product record. `name` is unique across all products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(serialize_with = "serialize_price")]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Prices without a fractional part are written as JSON integers so a
/// stored `5` reads back as `5` rather than `5.0`.
fn serialize_price<S: Serializer>(price: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if price.fract() == 0.0 && price.abs() < MAX_EXACT_INTEGER {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "integral and within the exact f64 integer range"
        )]
        let whole = *price as i64;
        serializer.serialize_i64(whole)
    } else {
        serializer.serialize_f64(*price)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductChanges {
    pub name: String,
    pub price: f64,
}

impl From<NewProduct> for ProductChanges {
    fn from(input: NewProduct) -> Self {
        Self {
            name: input.name,
            price: input.price,
        }
    }
}

static PRODUCT_SCHEMA: OnceLock<ObjectSchema> = OnceLock::new();

pub fn product_schema() -> &'static ObjectSchema {
    PRODUCT_SCHEMA.get_or_init(|| {
        ObjectSchema::new(vec![
            FieldSchema::string("name").min_length(2),
            FieldSchema::number("price"),
            FieldSchema::number("id").optional(),
            FieldSchema::date("createdAt").optional(),
        ])
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSortOrder {
    Name,
    Price,
}

impl ProductSortOrder {
    pub fn sort(self, products: &mut [Product]) {
        products.sort_by(|a, b| self.compare(a, b));
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Name => a.name.cmp(&b.name),
            Self::Price => a.price.total_cmp(&b.price),
        }
    }
}

impl FromStr for ProductSortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "price" => Ok(Self::Price),
            other => Err(format!(
                "unsupported sortOrder `{other}`; expected `name` or `price`"
            )),
        }
    }
}
