//! Horizontal progress bars shown beside the donut.

use serde::Serialize;

use crate::currency::{coerce_amount, format_amount};

/// Share of the monthly income already deposited this month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IncomeProgress {
    /// Whole percent, `0..=100`.
    pub percent: u8,
    pub received: f64,
    pub target: f64,
}

impl IncomeProgress {
    /// `None` while no income is set; there is nothing to measure against.
    pub fn new(received: f64, target: f64) -> Option<Self> {
        let target = coerce_amount(target);
        if target <= 0.0 {
            return None;
        }
        let received = coerce_amount(received);
        Some(Self {
            percent: whole_percent(received, target),
            received,
            target,
        })
    }

    pub fn label(&self, symbol: &str) -> String {
        format!(
            "{}% of income received ({} / {})",
            self.percent,
            format_amount(self.received, symbol),
            format_amount(self.target, symbol)
        )
    }
}

/// Share of the monthly income spent against categories.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpendProgress {
    /// Whole percent, `0..=100`; zero when there is no income.
    pub percent: u8,
    pub spent: f64,
    pub income: f64,
    /// Spend has passed the income.
    pub danger: bool,
}

impl SpendProgress {
    pub fn new(spent: f64, income: f64) -> Self {
        let spent = coerce_amount(spent);
        let income = coerce_amount(income);
        let percent = if income > 0.0 {
            whole_percent(spent, income)
        } else {
            0
        };
        Self {
            percent,
            spent,
            income,
            danger: spent > income,
        }
    }

    pub fn label(&self, symbol: &str) -> String {
        format!(
            "{} / {} spent",
            format_amount(self.spent, symbol),
            format_amount(self.income, symbol)
        )
    }
}

fn whole_percent(part: f64, whole: f64) -> u8 {
    ((part / whole) * 100.0).round().clamp(0.0, 100.0) as u8
}
