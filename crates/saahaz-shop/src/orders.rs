//! Order placement and lifecycle.

use saahaz_auth::access::require_admin;
use saahaz_core::error::{SaahazError, SaahazResult};
use saahaz_core::models::identity::Identity;
use saahaz_core::models::order::{CreateOrder, Order, OrderStatus, PlaceOrder};
use saahaz_core::repository::{OrderRepository, ProductRepository};
use tracing::{info, warn};
use uuid::Uuid;

use crate::pricing::{PricedLine, PricingPolicy, price_order};

fn validate(request: &PlaceOrder) -> SaahazResult<()> {
    if request.items.is_empty() {
        return Err(SaahazError::validation("order must contain at least one item"));
    }
    if let Some(item) = request.items.iter().find(|i| i.quantity == 0) {
        return Err(SaahazError::validation(format!(
            "quantity for product {} must be at least 1",
            item.product_id
        )));
    }
    if request.delivery_address.trim().is_empty() {
        return Err(SaahazError::validation("delivery_address must not be empty"));
    }
    if request.phone.trim().is_empty() {
        return Err(SaahazError::validation("phone must not be empty"));
    }
    Ok(())
}

pub struct OrderService<O: OrderRepository, P: ProductRepository> {
    order_repo: O,
    product_repo: P,
    policy: PricingPolicy,
}

impl<O: OrderRepository, P: ProductRepository> OrderService<O, P> {
    pub fn new(order_repo: O, product_repo: P, policy: PricingPolicy) -> Self {
        Self {
            order_repo,
            product_repo,
            policy,
        }
    }

    /// Price and persist an order for the caller.
    ///
    /// Every product is looked up before anything is written; a single
    /// unknown product aborts the whole order.
    pub async fn place_order(&self, identity: &Identity, request: PlaceOrder) -> SaahazResult<Order> {
        validate(&request)?;

        let mut lines = Vec::with_capacity(request.items.len());
        for item in &request.items {
            let product = match self.product_repo.get_by_id(item.product_id).await {
                Ok(product) => product,
                Err(SaahazError::NotFound { .. }) => {
                    return Err(SaahazError::ProductNotFound {
                        id: item.product_id.to_string(),
                    });
                }
                Err(e) => return Err(e),
            };
            lines.push(PricedLine {
                unit_price: product.price,
                quantity: item.quantity,
            });
        }

        let priced = price_order(&lines, request.delivery_charge, request.total, self.policy)?;
        if priced.total_overridden {
            warn!(
                user_id = %identity.user_id(),
                computed = priced.subtotal + priced.delivery_charge,
                accepted = priced.total,
                "Client total override accepted"
            );
        }

        let order = self
            .order_repo
            .create(CreateOrder {
                user_id: identity.user_id(),
                items: request.items,
                subtotal: priced.subtotal,
                delivery_charge: priced.delivery_charge,
                total: priced.total,
                delivery_address: request.delivery_address,
                phone: request.phone,
                delivery_option: request.delivery_option,
                payment_method: request.payment_method,
            })
            .await?;

        info!(order_id = %order.id, user_id = %order.user_id, total = order.total, "Order placed");
        Ok(order)
    }

    /// Admins see every order, everyone else only their own.
    pub async fn list_orders(&self, identity: &Identity) -> SaahazResult<Vec<Order>> {
        if identity.is_admin() {
            self.order_repo.list_all().await
        } else {
            self.order_repo.list_by_user(identity.user_id()).await
        }
    }

    /// Someone else's order is reported as missing.
    pub async fn get_order(&self, identity: &Identity, id: Uuid) -> SaahazResult<Order> {
        let order = self.order_repo.get_by_id(id).await?;
        if order.user_id != identity.user_id() && !identity.is_admin() {
            return Err(SaahazError::not_found("order", id));
        }
        Ok(order)
    }

    pub async fn update_order_status(
        &self,
        identity: &Identity,
        id: Uuid,
        status: OrderStatus,
    ) -> SaahazResult<Order> {
        require_admin(identity)?;

        let current = self.order_repo.get_by_id(id).await?;
        if !current.status.can_transition_to(status) {
            return Err(SaahazError::validation(format!(
                "cannot move order from {} to {}",
                current.status.as_str(),
                status.as_str()
            )));
        }

        let order = self.order_repo.update_status(id, status).await?;
        info!(
            order_id = %id,
            from = current.status.as_str(),
            to = status.as_str(),
            "Order status changed"
        );
        Ok(order)
    }
}
