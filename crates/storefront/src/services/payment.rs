//! Simulated payment authorization.
//!
//! There is no real processor behind checkout; card payments decline with a
//! fixed probability to exercise the error path, everything else approves.
//! The gateway sits behind a trait so tests can pin the outcome.

use rand::Rng;

use ridegear_core::{Money, PaymentMethod};

/// Chance that a card authorization is declined, in percent.
const CARD_DECLINE_PERCENT: u32 = 10;

/// Payment authorization hook used by checkout.
pub trait PaymentGateway: Send + Sync {
    /// Whether the payment is authorized.
    fn authorize(&self, method: PaymentMethod, amount: Money) -> bool;
}

/// The default gateway: declines 10% of card payments at random.
#[derive(Debug, Default)]
pub struct SimulatedGateway;

impl PaymentGateway for SimulatedGateway {
    fn authorize(&self, method: PaymentMethod, _amount: Money) -> bool {
        match method {
            PaymentMethod::Card => rand::rng().random_range(0..100) >= CARD_DECLINE_PERCENT,
            PaymentMethod::Paypal | PaymentMethod::CashOnDelivery => true,
        }
    }
}

/// Gateway with a pinned outcome, for tests.
#[derive(Debug)]
pub struct FixedGateway(pub bool);

impl PaymentGateway for FixedGateway {
    fn authorize(&self, _method: PaymentMethod, _amount: Money) -> bool {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_card_methods_always_authorize() {
        let gateway = SimulatedGateway;
        for _ in 0..50 {
            assert!(gateway.authorize(PaymentMethod::Paypal, Money::from_cents(100)));
            assert!(gateway.authorize(PaymentMethod::CashOnDelivery, Money::from_cents(100)));
        }
    }

    #[test]
    fn fixed_gateway_pins_the_outcome() {
        assert!(FixedGateway(true).authorize(PaymentMethod::Card, Money::ZERO));
        assert!(!FixedGateway(false).authorize(PaymentMethod::Card, Money::ZERO));
    }
}
