//! # Receipt Total Calculation
//!
//! Pure receipt arithmetic shared by the pay path and the standalone
//! "issue receipt for order" path.
//!
//! ```text
//! total = Σ item.price
//! final = total + tip          (tip >= 0, validated here)
//! ```
//!
//! Whether a total of zero is payable is the caller's decision: the pay
//! path rejects it, the standalone receipt path does not.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Item;

/// Frozen amounts for a receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptTotals {
    /// Sum of item prices at payment time.
    pub total: Money,
    /// Tip on top of the total.
    pub tip: Money,
    /// total + tip.
    pub final_amount: Money,
}

/// Computes receipt totals from an order's current items and a tip.
///
/// Rejects negative tips; a zero tip is fine.
pub fn receipt_totals(items: &[Item], tip: Money) -> Result<ReceiptTotals, ValidationError> {
    if tip.is_negative() {
        return Err(ValidationError::NegativeTip);
    }

    let total: Money = items.iter().map(Item::price).sum();

    Ok(ReceiptTotals {
        total,
        tip,
        final_amount: total + tip,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
