use serde::{Deserialize, Serialize};

use crate::currency::lenient_amount;

use super::new_id;

/// A recurring income stream; all sources together make up the monthly income.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncomeSource {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: f64,
}

impl IncomeSource {
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            amount,
        }
    }
}
