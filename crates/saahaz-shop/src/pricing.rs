//! Server-side order pricing.
//!
//! The subtotal always comes from catalog prices. Client-supplied
//! subtotals never reach this module.

use saahaz_core::error::{SaahazError, SaahazResult};

/// Knobs for how much of a client's pricing input is honoured.
#[derive(Debug, Clone, Copy)]
pub struct PricingPolicy {
    /// Accept a non-zero client `total` in place of
    /// `subtotal + delivery_charge`.
    pub allow_total_override: bool,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            allow_total_override: true,
        }
    }
}

/// One order line with its authoritative unit price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricedLine {
    pub unit_price: f64,
    pub quantity: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricedOrder {
    pub subtotal: f64,
    pub delivery_charge: f64,
    pub total: f64,
    /// The client total replaced the computed one.
    pub total_overridden: bool,
}

fn check_amount(value: f64, field: &str) -> SaahazResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(SaahazError::validation(format!(
            "{field} must be a non-negative number"
        )));
    }
    Ok(())
}

/// Price an order.
///
/// `delivery_charge` defaults to zero. A `total_override` of zero or
/// `None` means "compute it".
pub fn price_order(
    lines: &[PricedLine],
    delivery_charge: Option<f64>,
    total_override: Option<f64>,
    policy: PricingPolicy,
) -> SaahazResult<PricedOrder> {
    let delivery_charge = delivery_charge.unwrap_or(0.0);
    check_amount(delivery_charge, "delivery_charge")?;
    if let Some(total) = total_override {
        check_amount(total, "total")?;
    }

    let subtotal: f64 = lines
        .iter()
        .map(|line| line.unit_price * f64::from(line.quantity))
        .sum();
    let computed = subtotal + delivery_charge;

    let (total, total_overridden) = match total_override {
        Some(t) if t != 0.0 && policy.allow_total_override => (t, t != computed),
        _ => (computed, false),
    };

    Ok(PricedOrder {
        subtotal,
        delivery_charge,
        total,
        total_overridden,
    })
}
