//! Orders created from a cart at checkout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::{CartLine, CartStore, LineConfiguration};
use crate::catalog::{Catalog, Coating, Color};
use crate::discount::Discount;
use crate::pricing::Dimensions;
use crate::types::{Email, FacadeId, OrderId, OrderStatus, Price, UserId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("cannot place an order with an empty cart")]
    EmptyCart,
    #[error("name is required")]
    MissingName,
    #[error("phone is required")]
    MissingPhone,
    #[error("cannot move an order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
}

/// Who placed the order and where it goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerContact {
    pub name: String,
    pub phone: String,
    pub email: Email,
    pub address: Option<String>,
    pub comment: Option<String>,
}

impl CustomerContact {
    /// Build a contact from trimmed form input. Blank optional fields become `None`.
    ///
    /// # Errors
    ///
    /// Name and phone are required.
    pub fn new(
        name: &str,
        phone: &str,
        email: Email,
        address: &str,
        comment: &str,
    ) -> Result<Self, OrderError> {
        let name = name.trim();
        let phone = phone.trim();
        if name.is_empty() {
            return Err(OrderError::MissingName);
        }
        if phone.is_empty() {
            return Err(OrderError::MissingPhone);
        }
        let optional = |value: &str| {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_owned())
        };
        Ok(Self {
            name: name.to_owned(),
            phone: phone.to_owned(),
            email,
            address: optional(address),
            comment: optional(comment),
        })
    }
}

/// Snapshot of a cart line at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub facade_id: FacadeId,
    pub facade_name: String,
    pub dimensions: Dimensions,
    pub coating: Coating,
    pub color: Color,
    pub quantity: u32,
    pub price_per_sqm: Price,
    pub price: Price,
}

impl From<&CartLine> for OrderLine {
    fn from(line: &CartLine) -> Self {
        Self {
            facade_id: line.facade_id,
            facade_name: line.facade_name.clone(),
            dimensions: line.dimensions,
            coating: line.coating,
            color: line.color,
            quantity: line.quantity,
            price_per_sqm: line.price_per_sqm,
            price: line.price(),
        }
    }
}

/// Discount as it was applied to an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedDiscount {
    pub code: String,
    pub percent: u8,
    pub amount: Price,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Human-facing number, e.g. `FS-000042`.
    pub number: String,
    pub user_id: Option<UserId>,
    pub contact: CustomerContact,
    pub lines: Vec<OrderLine>,
    pub subtotal: Price,
    pub discount: Option<AppliedDiscount>,
    pub total: Price,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Snapshot `cart` into a new order.
    ///
    /// The caller is responsible for checking that `discount` is usable.
    ///
    /// # Errors
    ///
    /// Returns `EmptyCart` if there is nothing to order.
    pub fn from_cart(
        id: OrderId,
        cart: &CartStore,
        contact: CustomerContact,
        discount: Option<&Discount>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, OrderError> {
        if cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        let subtotal = cart.subtotal();
        let (total, discount) = match discount {
            Some(discount) => (
                discount.apply(subtotal).round_whole(),
                Some(AppliedDiscount {
                    code: discount.code.clone(),
                    percent: discount.percent,
                    amount: discount.amount_off(subtotal),
                }),
            ),
            None => (subtotal.round_whole(), None),
        };

        Ok(Self {
            id,
            number: format!("FS-{:06}", id.as_i32()),
            user_id: None,
            contact,
            lines: cart.lines().iter().map(OrderLine::from).collect(),
            subtotal,
            discount,
            total,
            status: OrderStatus::New,
            created_at,
        })
    }

    /// Attach the order to a registered user.
    #[must_use]
    pub const fn placed_by(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Move to `next`, enforcing the lifecycle.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` for anything [`OrderStatus::can_transition_to`]
    /// forbids.
    pub fn transition(&mut self, next: OrderStatus) -> Result<(), OrderError> {
        if !self.status.can_transition_to(next) {
            return Err(OrderError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }

    /// Number of facades across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }
}

/// Demo orders for the back-office, built from the seed catalog.
#[must_use]
pub fn seed_orders(catalog: &Catalog) -> Vec<Order> {
    // (facade, width, height, quantity, status, customer, unix time)
    let rows: [(i32, u32, u32, u32, OrderStatus, &str, i64); 5] = [
        (1, 400, 700, 6, OrderStatus::Delivered, "Анна Смирнова", 1_788_000_000),
        (4, 600, 700, 4, OrderStatus::Shipped, "Игорь Петров", 1_788_600_000),
        (2, 400, 900, 3, OrderStatus::Processing, "Мария Козлова", 1_789_200_000),
        (7, 600, 350, 2, OrderStatus::New, "Олег Иванов", 1_789_800_000),
        (3, 300, 700, 5, OrderStatus::Cancelled, "Елена Соколова", 1_790_400_000),
    ];

    rows.iter()
        .zip(1..)
        .filter_map(|(&(facade_id, width, height, quantity, status, name, at), id)| {
            let facade = catalog.facade(FacadeId::new(facade_id))?;
            let dimensions = Dimensions::new(width, height).ok()?;
            let mut config = LineConfiguration::default_for(facade, dimensions)?;
            config.quantity = quantity;

            let mut cart = CartStore::new();
            cart.add(facade, config).ok()?;

            let email = Email::parse(&format!("customer{id}@example.ru")).ok()?;
            let contact = CustomerContact::new(name, "+7 900 000-00-00", email, "", "").ok()?;
            let created_at = DateTime::from_timestamp(at, 0)?;
            let mut order = Order::from_cart(OrderId::new(id), &cart, contact, None, created_at).ok()?;
            order.status = status;
            Some(order)
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::types::DiscountId;

    fn contact() -> CustomerContact {
        CustomerContact::new(
            "Анна",
            "+7 900 123-45-67",
            Email::parse("anna@example.ru").unwrap(),
            " ",
            "",
        )
        .unwrap()
    }

    fn cart_with_2400() -> CartStore {
        let catalog = Catalog::seed();
        let facade = catalog.facade(FacadeId::new(1)).unwrap();
        let mut config =
            LineConfiguration::default_for(facade, Dimensions::new(400, 600).unwrap()).unwrap();
        config.quantity = 2;
        let mut cart = CartStore::new();
        cart.add(facade, config).unwrap();
        cart
    }

    #[test]
    fn test_contact_requires_name_and_phone() {
        let email = Email::parse("a@b.ru").unwrap();
        assert_eq!(
            CustomerContact::new(" ", "1", email.clone(), "", ""),
            Err(OrderError::MissingName)
        );
        assert_eq!(
            CustomerContact::new("A", "", email, "", ""),
            Err(OrderError::MissingPhone)
        );
        assert_eq!(contact().address, None);
    }

    #[test]
    fn test_from_cart_snapshots_lines() {
        let order =
            Order::from_cart(OrderId::new(42), &cart_with_2400(), contact(), None, Utc::now())
                .unwrap();
        assert_eq!(order.number, "FS-000042");
        assert_eq!(order.lines.len(), 1);
        assert_eq!(order.item_count(), 2);
        assert_eq!(order.total.amount, Decimal::new(2400, 0));
        assert_eq!(order.status, OrderStatus::New);
    }

    #[test]
    fn test_from_cart_applies_discount() {
        let discount = Discount::new(DiscountId::new(1), "TEN", 10, None).unwrap();
        let order = Order::from_cart(
            OrderId::new(1),
            &cart_with_2400(),
            contact(),
            Some(&discount),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(order.subtotal.amount, Decimal::new(2400, 0));
        assert_eq!(order.total.amount, Decimal::new(2160, 0));
        assert_eq!(
            order.discount.unwrap().amount.amount,
            Decimal::new(240, 0)
        );
    }

    #[test]
    fn test_empty_cart_is_rejected() {
        assert_eq!(
            Order::from_cart(OrderId::new(1), &CartStore::new(), contact(), None, Utc::now()),
            Err(OrderError::EmptyCart)
        );
    }

    #[test]
    fn test_transitions() {
        let mut order =
            Order::from_cart(OrderId::new(1), &cart_with_2400(), contact(), None, Utc::now())
                .unwrap();
        assert!(order.transition(OrderStatus::Shipped).is_err());
        order.transition(OrderStatus::Processing).unwrap();
        order.transition(OrderStatus::Cancelled).unwrap();
        assert_eq!(
            order.transition(OrderStatus::Processing),
            Err(OrderError::InvalidTransition {
                from: OrderStatus::Cancelled,
                to: OrderStatus::Processing,
            })
        );
    }

    #[test]
    fn test_seed_orders() {
        let orders = seed_orders(&Catalog::seed());
        assert_eq!(orders.len(), 5);
        assert!(orders.iter().all(|order| !order.lines.is_empty()));
    }
}
