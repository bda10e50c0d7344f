//! Order domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(OrderStatus::Pending),
            "confirmed" => Some(OrderStatus::Confirmed),
            "shipped" => Some(OrderStatus::Shipped),
            "delivered" => Some(OrderStatus::Delivered),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// `pending → confirmed → shipped → delivered`, plus `cancelled`
    /// from any non-terminal state.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        match (self, next) {
            (from, OrderStatus::Cancelled) => !from.is_terminal(),
            (OrderStatus::Pending, OrderStatus::Confirmed)
            | (OrderStatus::Confirmed, OrderStatus::Shipped)
            | (OrderStatus::Shipped, OrderStatus::Delivered) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryOption {
    #[default]
    Standard,
    Express,
    NextDay,
    Free,
}

impl DeliveryOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryOption::Standard => "standard",
            DeliveryOption::Express => "express",
            DeliveryOption::NextDay => "next_day",
            DeliveryOption::Free => "free",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "standard" => Some(DeliveryOption::Standard),
            "express" => Some(DeliveryOption::Express),
            "next_day" => Some(DeliveryOption::NextDay),
            "free" => Some(DeliveryOption::Free),
            _ => None,
        }
    }
}

/// How the buyer pays. Only cash on delivery is offered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    #[default]
    #[serde(rename = "cod")]
    CashOnDelivery,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "cod",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cod" => Some(PaymentMethod::CashOnDelivery),
            _ => None,
        }
    }
}

/// One line of an order: a product reference plus the buyer's selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub product_id: Uuid,
    pub quantity: u32,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub items: Vec<OrderItem>,
    pub subtotal: f64,
    pub delivery_charge: f64,
    #[serde(rename = "total_amount")]
    pub total: f64,
    pub status: OrderStatus,
    pub delivery_address: String,
    pub phone: String,
    pub delivery_option: DeliveryOption,
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client request to place an order.
///
/// `subtotal` is accepted for wire compatibility only and never used;
/// `total` is an override that the pricing policy may honour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrder {
    pub items: Vec<OrderItem>,
    pub delivery_address: String,
    pub phone: String,
    #[serde(default)]
    pub delivery_option: DeliveryOption,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub delivery_charge: Option<f64>,
    #[serde(default)]
    pub subtotal: Option<f64>,
    #[serde(default)]
    pub total: Option<f64>,
}

/// Fully priced order ready to persist.
#[derive(Debug, Clone)]
pub struct CreateOrder {
    pub user_id: Uuid,
    pub items: Vec<OrderItem>,
    pub subtotal: f64,
    pub delivery_charge: f64,
    pub total: f64,
    pub delivery_address: String,
    pub phone: String,
    pub delivery_option: DeliveryOption,
    pub payment_method: PaymentMethod,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_lifecycle_is_allowed() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Confirmed));
        assert!(OrderStatus::Confirmed.can_transition_to(OrderStatus::Shipped));
        assert!(OrderStatus::Shipped.can_transition_to(OrderStatus::Delivered));
    }

    #[test]
    fn skipping_or_reversing_is_rejected() {
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Shipped));
        assert!(!OrderStatus::Shipped.can_transition_to(OrderStatus::Confirmed));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Pending));
    }

    #[test]
    fn cancel_only_from_non_terminal() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::Shipped.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Cancelled));
    }

    #[test]
    fn terminal_states_go_nowhere() {
        let all = [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ];
        for next in all {
            assert!(!OrderStatus::Delivered.can_transition_to(next));
            assert!(!OrderStatus::Cancelled.can_transition_to(next));
        }
    }

    #[test]
    fn place_order_defaults() {
        let pid = Uuid::new_v4();
        let body = format!(
            r#"{{"items":[{{"product_id":"{pid}","quantity":2}}],
                "delivery_address":"1 Road","phone":"0300"}}"#
        );
        let req: PlaceOrder = serde_json::from_str(&body).unwrap();
        assert_eq!(req.delivery_option, DeliveryOption::Standard);
        assert_eq!(req.delivery_charge, None);
        assert_eq!(req.total, None);
        assert_eq!(req.payment_method, PaymentMethod::CashOnDelivery);
        assert_eq!(req.items[0].size, None);
    }

    #[test]
    fn order_uses_storefront_field_names() {
        let now = Utc::now();
        let order = Order {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            items: vec![],
            subtotal: 9500.0,
            delivery_charge: 200.0,
            total: 9700.0,
            status: OrderStatus::Pending,
            delivery_address: "1 Road".into(),
            phone: "0300".into(),
            delivery_option: DeliveryOption::Standard,
            payment_method: PaymentMethod::CashOnDelivery,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["total_amount"], 9700.0);
        assert!(json.get("total").is_none());
        assert_eq!(json["payment_method"], "cod");
    }

    #[test]
    fn delivery_option_wire_names() {
        let opt: DeliveryOption = serde_json::from_str("\"next_day\"").unwrap();
        assert_eq!(opt, DeliveryOption::NextDay);
        assert_eq!(DeliveryOption::parse(opt.as_str()), Some(opt));
    }
}
