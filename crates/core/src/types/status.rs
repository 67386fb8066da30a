//! Status enums for orders, checkout and accounts.

use serde::{Deserialize, Serialize};

/// Error returned when a status string or transition is invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatusError {
    #[error("invalid order status: {0}")]
    UnknownStatus(String),
    #[error("invalid payment method: {0}")]
    UnknownPaymentMethod(String),
    #[error("invalid user role: {0}")]
    UnknownRole(String),
    #[error("cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
}

/// Order lifecycle status.
///
/// Stored lowercase in the orders collection. Parsing is case-insensitive
/// because older documents were written as `Shipped` / `Delivered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Shipped,
    Delivered,
    /// Terminal. Cancelled orders are excluded from sales reporting.
    Cancelled,
}

impl OrderStatus {
    /// Statuses an admin can pick from on the order management screen.
    pub const ADMIN_SELECTABLE: [Self; 3] = [Self::Pending, Self::Shipped, Self::Delivered];

    /// Whether no further transitions are allowed.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Whether the shopper may still cancel the order.
    #[must_use]
    pub const fn is_cancellable(self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Validate an admin status change.
    ///
    /// Admins move freely between pending, shipped and delivered, but cannot
    /// revive or produce a cancelled order.
    ///
    /// # Errors
    ///
    /// Returns `StatusError::InvalidTransition` if `self` is terminal or
    /// `next` is not admin-selectable.
    pub fn admin_transition(self, next: Self) -> Result<Self, StatusError> {
        if self.is_terminal() || !Self::ADMIN_SELECTABLE.contains(&next) {
            return Err(StatusError::InvalidTransition {
                from: self,
                to: next,
            });
        }
        Ok(next)
    }

    /// Validate a shopper cancellation.
    ///
    /// # Errors
    ///
    /// Returns `StatusError::InvalidTransition` unless the order is pending.
    pub fn cancel(self) -> Result<Self, StatusError> {
        if self.is_cancellable() {
            Ok(Self::Cancelled)
        } else {
            Err(StatusError::InvalidTransition {
                from: self,
                to: Self::Cancelled,
            })
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Shipped => write!(f, "shipped"),
            Self::Delivered => write!(f, "delivered"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(StatusError::UnknownStatus(s.to_owned())),
        }
    }
}

/// Payment method chosen at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "Online Banking")]
    OnlineBanking,
    #[default]
    #[serde(rename = "Cash on Delivery")]
    CashOnDelivery,
}

impl PaymentMethod {
    pub const ALL: [Self; 3] = [Self::CreditCard, Self::OnlineBanking, Self::CashOnDelivery];

    /// Human-readable label, also the stored value.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CreditCard => "Credit Card",
            Self::OnlineBanking => "Online Banking",
            Self::CashOnDelivery => "Cash on Delivery",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| {
                m.label().eq_ignore_ascii_case(wanted)
                    || m.label().replace(' ', "_").eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| StatusError::UnknownPaymentMethod(s.to_owned()))
    }
}

/// Role stored on a user's profile document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    Customer,
    /// Sent to the admin screens after signing in.
    Admin,
}

impl UserRole {
    /// Role from a profile's `role` attribute.
    ///
    /// Only an explicit `admin` grants admin access; a missing or
    /// unrecognised value is treated as a customer.
    #[must_use]
    pub fn from_profile(role: Option<&str>) -> Self {
        role.and_then(|r| r.parse().ok()).unwrap_or_default()
    }

    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
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
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "customer" | "user" => Ok(Self::Customer),
            "admin" => Ok(Self::Admin),
            _ => Err(StatusError::UnknownRole(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_parse_is_case_insensitive() {
        assert_eq!("Shipped".parse::<OrderStatus>(), Ok(OrderStatus::Shipped));
        assert_eq!("DELIVERED".parse::<OrderStatus>(), Ok(OrderStatus::Delivered));
        assert_eq!("canceled".parse::<OrderStatus>(), Ok(OrderStatus::Cancelled));
        assert!("lost".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_order_status_display_roundtrips() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(status.to_string().parse::<OrderStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_order_status_serde_is_lowercase() {
        let json = serde_json::to_string(&OrderStatus::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");
    }

    #[test]
    fn test_admin_transitions() {
        assert_eq!(
            OrderStatus::Pending.admin_transition(OrderStatus::Shipped),
            Ok(OrderStatus::Shipped)
        );
        assert_eq!(
            OrderStatus::Delivered.admin_transition(OrderStatus::Pending),
            Ok(OrderStatus::Pending)
        );
        assert!(
            OrderStatus::Cancelled
                .admin_transition(OrderStatus::Pending)
                .is_err()
        );
        assert!(
            OrderStatus::Pending
                .admin_transition(OrderStatus::Cancelled)
                .is_err()
        );
    }

    #[test]
    fn test_only_pending_orders_can_be_cancelled() {
        assert_eq!(OrderStatus::Pending.cancel(), Ok(OrderStatus::Cancelled));
        assert_eq!(
            OrderStatus::Shipped.cancel(),
            Err(StatusError::InvalidTransition {
                from: OrderStatus::Shipped,
                to: OrderStatus::Cancelled,
            })
        );
        assert!(OrderStatus::Cancelled.cancel().is_err());
    }

    #[test]
    fn test_payment_method_parse_and_serde() {
        assert_eq!(
            "cash on delivery".parse::<PaymentMethod>(),
            Ok(PaymentMethod::CashOnDelivery)
        );
        assert_eq!(
            "online_banking".parse::<PaymentMethod>(),
            Ok(PaymentMethod::OnlineBanking)
        );
        assert!("bitcoin".parse::<PaymentMethod>().is_err());

        let json = serde_json::to_string(&PaymentMethod::CreditCard).unwrap();
        assert_eq!(json, "\"Credit Card\"");
        assert_eq!(PaymentMethod::default(), PaymentMethod::CashOnDelivery);
    }

    #[test]
    fn test_user_role_from_profile() {
        assert_eq!(UserRole::from_profile(Some("admin")), UserRole::Admin);
        assert_eq!(UserRole::from_profile(Some(" Admin ")), UserRole::Admin);
        assert_eq!(UserRole::from_profile(Some("user")), UserRole::Customer);
        assert_eq!(UserRole::from_profile(Some("owner")), UserRole::Customer);
        assert_eq!(UserRole::from_profile(None), UserRole::Customer);
        assert!(UserRole::Admin.is_admin());
        assert!(!UserRole::default().is_admin());
    }

    #[test]
    fn test_user_role_parse_rejects_unknown() {
        assert_eq!(
            "owner".parse::<UserRole>(),
            Err(StatusError::UnknownRole("owner".to_string()))
        );
        assert_eq!(UserRole::Admin.to_string().parse::<UserRole>(), Ok(UserRole::Admin));
    }
}
