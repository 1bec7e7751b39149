//! Cost calculator display mode.
//!
//! Prices and budgets are always stored in base currency. The calculator
//! only decides how an amount is shown: in training units (credits, the
//! default) or in currency. Every displayed value is recomputed from the
//! stored base amount, so toggling back and forth never accumulates error.

use serde::{Deserialize, Serialize};

use crate::constants::CREDIT_RATE;

/// Display state of the plan cost calculator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CostCalculator {
    /// Show amounts in training units instead of currency
    pub credits_mode: bool,
}

impl Default for CostCalculator {
    fn default() -> Self {
        Self { credits_mode: true }
    }
}

impl CostCalculator {
    /// Converts a base amount into the active display unit.
    pub fn display_amount(&self, base: f64) -> f64 {
        if self.credits_mode {
            base / CREDIT_RATE
        } else {
            base
        }
    }

    /// Short unit label for the active mode.
    pub fn unit_label(&self) -> &'static str {
        if self.credits_mode {
            "TU"
        } else {
            "USD"
        }
    }

    /// Formats a base amount in the active unit, rounded to whole units
    /// with thousands separators: `120 TU` or `$1,200`.
    pub fn format_amount(&self, base: f64) -> String {
        let shown = self.display_amount(base);
        let digits = group_thousands(shown.abs().round() as u64);
        let sign = if shown.round() < 0.0 { "-" } else { "" };
        if self.credits_mode {
            format!("{sign}{digits} TU")
        } else {
            format!("{sign}${digits}")
        }
    }
}

/// Remaining budget after `total`, negative when over budget. `None` when no
/// budget is set.
pub fn budget_difference(budget: Option<f64>, total: f64) -> Option<f64> {
    budget.map(|b| b - total)
}

fn group_thousands(value: u64) -> String {
    let raw = value.to_string();
    let mut out = String::with_capacity(raw.len() + raw.len() / 3);
    for (i, ch) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
