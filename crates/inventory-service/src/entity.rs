//! Product record.

use serde::{Deserialize, Serialize};
use std::fmt;
use storefront::Entity;
use uuid::Uuid;

/// A stocked product. The id is chosen by the caller, never by storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64, quantity: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            quantity,
        }
    }

    /// A product keyed by a fresh random UUID.
    pub fn with_random_id(name: impl Into<String>, price: f64, quantity: i32) -> Self {
        Self::new(Uuid::new_v4().to_string(), name, price, quantity)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Product(id={}, name={}, price={}, quantity={})",
            self.id,
            self.name,
            Price(self.price),
            self.quantity
        )
    }
}

/// Price rendering that always carries a fractional digit: plain decimal
/// inside `[1e-3, 1e7)`, otherwise `<mantissa>E<exponent>` (`1.0E21`).
struct Price(f64);

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;
        if value.is_nan() {
            return f.write_str("NaN");
        }
        if value.is_infinite() {
            return f.write_str(if value > 0.0 { "Infinity" } else { "-Infinity" });
        }

        let magnitude = value.abs();
        if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
            // `{:?}` keeps the fractional part on whole prices (1000.0, not 1000).
            return write!(f, "{value:?}");
        }

        let scientific = format!("{value:e}");
        let (mantissa, exponent) = scientific
            .split_once('e')
            .unwrap_or((scientific.as_str(), "0"));
        if mantissa.contains('.') {
            write!(f, "{mantissa}E{exponent}")
        } else {
            write!(f, "{mantissa}.0E{exponent}")
        }
    }
}

impl Entity for Product {
    type Id = String;

    fn id(&self) -> Option<&String> {
        Some(&self.id)
    }
}
