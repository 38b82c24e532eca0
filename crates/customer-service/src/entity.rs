//! Customer record.

use serde::{Deserialize, Serialize};
use std::fmt;
use storefront::Entity;

/// A customer. `id` is assigned by storage on first save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
}

impl Customer {
    /// A customer not yet saved.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
        }
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "Customer(id={id}")?,
            None => write!(f, "Customer(id=null")?,
        }
        write!(f, ", name={}, email={})", self.name, self.email)
    }
}

impl Entity for Customer {
    type Id = i64;

    fn id(&self) -> Option<&i64> {
        self.id.as_ref()
    }

    fn assign_surrogate_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn surrogate_id(&self) -> Option<i64> {
        self.id
    }
}
