//! SurrealDB implementation of [`OrderRepository`].
//!
//! Orders live in the `customer_order` table; `order` is reserved in
//! SurrealQL.

use chrono::{DateTime, Utc};
use saahaz_core::error::SaahazResult;
use saahaz_core::models::order::{
    CreateOrder, DeliveryOption, Order, OrderItem, OrderStatus, PaymentMethod,
};
use saahaz_core::repository::OrderRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::{DbError, parse_uuid};

/// Embedded line item as stored inside the order document.
#[derive(Debug, Clone, SurrealValue)]
struct OrderItemRow {
    product_id: String,
    quantity: u32,
    size: Option<String>,
    color: Option<String>,
}

impl From<OrderItem> for OrderItemRow {
    fn from(item: OrderItem) -> Self {
        Self {
            product_id: item.product_id.to_string(),
            quantity: item.quantity,
            size: item.size,
            color: item.color,
        }
    }
}

impl OrderItemRow {
    fn try_into_item(self) -> Result<OrderItem, DbError> {
        Ok(OrderItem {
            product_id: parse_uuid(&self.product_id, "product")?,
            quantity: self.quantity,
            size: self.size,
            color: self.color,
        })
    }
}

#[derive(Debug, SurrealValue)]
struct OrderRow {
    user_id: String,
    items: Vec<OrderItemRow>,
    subtotal: f64,
    delivery_charge: f64,
    total: f64,
    status: String,
    delivery_address: String,
    phone: String,
    delivery_option: String,
    payment_method: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct OrderRowWithId {
    record_id: String,
    user_id: String,
    items: Vec<OrderItemRow>,
    subtotal: f64,
    delivery_charge: f64,
    total: f64,
    status: String,
    delivery_address: String,
    phone: String,
    delivery_option: String,
    payment_method: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_status(s: &str) -> Result<OrderStatus, DbError> {
    OrderStatus::parse(s).ok_or_else(|| DbError::Decode(format!("unknown order status: {s}")))
}

fn parse_delivery_option(s: &str) -> Result<DeliveryOption, DbError> {
    DeliveryOption::parse(s)
        .ok_or_else(|| DbError::Decode(format!("unknown delivery option: {s}")))
}

fn parse_payment_method(s: &str) -> Result<PaymentMethod, DbError> {
    PaymentMethod::parse(s)
        .ok_or_else(|| DbError::Decode(format!("unknown payment method: {s}")))
}

fn decode_items(items: Vec<OrderItemRow>) -> Result<Vec<OrderItem>, DbError> {
    items.into_iter().map(OrderItemRow::try_into_item).collect()
}

impl OrderRow {
    fn into_order(self, id: Uuid) -> Result<Order, DbError> {
        Ok(Order {
            id,
            user_id: parse_uuid(&self.user_id, "user")?,
            items: decode_items(self.items)?,
            subtotal: self.subtotal,
            delivery_charge: self.delivery_charge,
            total: self.total,
            status: parse_status(&self.status)?,
            delivery_address: self.delivery_address,
            phone: self.phone,
            delivery_option: parse_delivery_option(&self.delivery_option)?,
            payment_method: parse_payment_method(&self.payment_method)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl OrderRowWithId {
    fn try_into_order(self) -> Result<Order, DbError> {
        Ok(Order {
            id: parse_uuid(&self.record_id, "order")?,
            user_id: parse_uuid(&self.user_id, "user")?,
            items: decode_items(self.items)?,
            subtotal: self.subtotal,
            delivery_charge: self.delivery_charge,
            total: self.total,
            status: parse_status(&self.status)?,
            delivery_address: self.delivery_address,
            phone: self.phone,
            delivery_option: parse_delivery_option(&self.delivery_option)?,
            payment_method: parse_payment_method(&self.payment_method)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// SurrealDB implementation of the Order repository.
#[derive(Clone)]
pub struct SurrealOrderRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealOrderRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn select_many(
        &self,
        query: &str,
        user_id: Option<String>,
    ) -> SaahazResult<Vec<Order>> {
        let mut builder = self.db.query(query);
        if let Some(user_id) = user_id {
            builder = builder.bind(("user_id", user_id));
        }

        let mut result = builder.await.map_err(DbError::from)?;
        let rows: Vec<OrderRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_order())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(items)
    }
}

impl<C: Connection> OrderRepository for SurrealOrderRepository<C> {
    async fn create(&self, input: CreateOrder) -> SaahazResult<Order> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let items: Vec<OrderItemRow> = input.items.into_iter().map(Into::into).collect();

        let result = self
            .db
            .query(
                "CREATE type::record('customer_order', $id) SET \
                 user_id = $user_id, items = $items, \
                 subtotal = $subtotal, delivery_charge = $delivery_charge, \
                 total = $total, status = $status, \
                 delivery_address = $delivery_address, phone = $phone, \
                 delivery_option = $delivery_option, \
                 payment_method = $payment_method",
            )
            .bind(("id", id_str.clone()))
            .bind(("user_id", input.user_id.to_string()))
            .bind(("items", items))
            .bind(("subtotal", input.subtotal))
            .bind(("delivery_charge", input.delivery_charge))
            .bind(("total", input.total))
            .bind(("status", OrderStatus::Pending.as_str().to_string()))
            .bind(("delivery_address", input.delivery_address))
            .bind(("phone", input.phone))
            .bind(("delivery_option", input.delivery_option.as_str().to_string()))
            .bind(("payment_method", input.payment_method.as_str().to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<OrderRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "order".into(),
            id: id_str,
        })?;

        Ok(row.into_order(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> SaahazResult<Order> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('customer_order', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<OrderRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "order".into(),
            id: id_str,
        })?;

        Ok(row.into_order(id)?)
    }

    async fn list_all(&self) -> SaahazResult<Vec<Order>> {
        self.select_many(
            "SELECT meta::id(id) AS record_id, * FROM customer_order \
             ORDER BY created_at ASC",
            None,
        )
        .await
    }

    async fn list_by_user(&self, user_id: Uuid) -> SaahazResult<Vec<Order>> {
        self.select_many(
            "SELECT meta::id(id) AS record_id, * FROM customer_order \
             WHERE user_id = $user_id ORDER BY created_at ASC",
            Some(user_id.to_string()),
        )
        .await
    }

    async fn update_status(&self, id: Uuid, status: OrderStatus) -> SaahazResult<Order> {
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "UPDATE type::record('customer_order', $id) SET \
                 status = $status, updated_at = time::now()",
            )
            .bind(("id", id_str.clone()))
            .bind(("status", status.as_str().to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<OrderRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "order".into(),
            id: id_str,
        })?;

        Ok(row.into_order(id)?)
    }
}
