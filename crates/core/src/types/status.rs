//! Status enums for various entities.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// Orders move pending -> paid -> shipped -> delivered, or get canceled from
/// any non-terminal state. Only the admin surface mutates order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Shipped,
    Delivered,
    Canceled,
}

impl OrderStatus {
    /// Whether the status can move to `next` in one step.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Paid)
                | (Self::Paid, Self::Shipped)
                | (Self::Shipped, Self::Delivered)
                | (Self::Pending | Self::Paid | Self::Shipped, Self::Canceled)
        )
    }

    /// Delivered and canceled orders never change again.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Canceled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Canceled => "canceled",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "canceled" => Ok(Self::Canceled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// Payment method chosen at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    Paypal,
    CashOnDelivery,
}

/// User role with different permission levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Regular shopper. Registration always produces this role.
    #[default]
    Customer,
    /// Full access to the admin surface. Minted via the CLI only.
    Admin,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Customer => write!(f, "customer"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid user role: {s}")),
        }
    }
}

/// Discount rule shape for coupons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouponKind {
    /// Value is a percentage of the subtotal.
    Percent,
    /// Value is a fixed amount in cents.
    Fixed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_status_walks_the_happy_path() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Paid));
        assert!(OrderStatus::Paid.can_transition_to(OrderStatus::Shipped));
        assert!(OrderStatus::Shipped.can_transition_to(OrderStatus::Delivered));
    }

    #[test]
    fn order_status_rejects_jumps_and_reversals() {
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Shipped));
        assert!(!OrderStatus::Paid.can_transition_to(OrderStatus::Pending));
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Canceled));
        assert!(!OrderStatus::Canceled.can_transition_to(OrderStatus::Paid));
    }

    #[test]
    fn cancel_allowed_from_any_non_terminal_state() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Canceled));
        assert!(OrderStatus::Paid.can_transition_to(OrderStatus::Canceled));
        assert!(OrderStatus::Shipped.can_transition_to(OrderStatus::Canceled));
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Paid,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Canceled,
        ] {
            let parsed: OrderStatus = status.to_string().parse().expect("round trip");
            assert_eq!(parsed, status);
        }
    }
}
