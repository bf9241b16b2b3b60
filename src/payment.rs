// Payment boundary for committing a booking
// There is no real gateway behind the portal; `StubPaymentGateway` approves everything

use crate::reservation::PaymentStatus;

// Card fields as typed into the confirmation step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentDetails {
    pub card_number: String,
    pub expiry: String,
    pub cvv: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChargeRequest<'a> {
    pub room_id: &'a str,
    pub customer_email: &'a str,
    pub amount: f64,
    pub currency: &'a str,
    pub details: Option<&'a PaymentDetails>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChargeOutcome {
    Approved,
    Declined(String),
}

impl ChargeOutcome {
    pub fn payment_status(&self) -> PaymentStatus {
        match self {
            ChargeOutcome::Approved => PaymentStatus::Paid,
            ChargeOutcome::Declined(_) => PaymentStatus::Failed,
        }
    }
}

pub trait PaymentGateway: Send + Sync + 'static {
    fn charge(&self, request: &ChargeRequest<'_>) -> ChargeOutcome;
}

// Approves every charge without looking at the card fields
#[derive(Debug, Clone, Copy, Default)]
pub struct StubPaymentGateway;

impl PaymentGateway for StubPaymentGateway {
    fn charge(&self, _request: &ChargeRequest<'_>) -> ChargeOutcome {
        ChargeOutcome::Approved
    }
}
