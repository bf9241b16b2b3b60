// Booking workflow: the three-step draft that turns a room selection into a reservation
//
// A session starts with `start_booking`, walks DatesAndGuests -> GuestInformation ->
// PaymentAndConfirmation through `advance_step`/`retreat_step`, and ends either by
// retreating past the first step or by `complete_booking`, which appends the record
// to the reservation store.

use crate::catalog::RoomOffering;
use crate::payment::{ChargeOutcome, ChargeRequest, PaymentDetails, PaymentGateway, StubPaymentGateway};
use crate::reservation::{Reservation, ReservationStatus};
use crate::store::ReservationStore;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactField::Name => write!(f, "customer name"),
            ContactField::Email => write!(f, "customer email"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BookingError {
    #[error("No booking session is active")]
    NoActiveSession,

    #[error("Check-in and check-out dates are required")]
    MissingDates,

    #[error("Check-out {check_out} must be after check-in {check_in}")]
    InvalidDateRange {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    #[error("Guest count {requested} outside the allowed range 1..={capacity}")]
    GuestCountOutOfBounds { requested: u32, capacity: u32 },

    #[error("Missing required contact field: {field}")]
    IncompleteContactInfo { field: ContactField },

    #[error("Already at the confirmation step; complete the booking instead")]
    CommitRequired,

    #[error("Booking can only be completed from the confirmation step, currently at {step:?}")]
    NotAtConfirmation { step: BookingStep },

    #[error("Payment declined: {0}")]
    PaymentDeclined(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid workflow configuration: {0}")]
    Invalid(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BookingStep {
    DatesAndGuests = 1,
    GuestInformation = 2,
    PaymentAndConfirmation = 3,
}

impl BookingStep {
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn previous(self) -> Option<Self> {
        match self {
            BookingStep::DatesAndGuests => None,
            BookingStep::GuestInformation => Some(BookingStep::DatesAndGuests),
            BookingStep::PaymentAndConfirmation => Some(BookingStep::GuestInformation),
        }
    }
}

// Strict rejects reversed date ranges, unreachable guest counts and blank
// contact fields. Lenient only checks that the fields the portal's "Next"
// button waits for are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    Strict,
    Lenient,
}

impl Default for ValidationMode {
    fn default() -> Self {
        ValidationMode::Strict
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub validation: ValidationMode,
    pub currency: String,
    pub id_prefix: String,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            validation: ValidationMode::Strict,
            currency: "USD".to_string(),
            id_prefix: "BK-".to_string(),
        }
    }
}

impl WorkflowConfig {
    pub fn lenient() -> Self {
        Self {
            validation: ValidationMode::Lenient,
            ..Self::default()
        }
    }

    // Missing keys fall back to the defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

// Working state of one in-progress booking; the draft owns its room
#[derive(Debug, Clone, PartialEq)]
pub struct DraftReservation {
    pub room: RoomOffering,
    pub step: BookingStep,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub guest_count: u32,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub special_requests: Option<String>,
    pub payment_details: Option<PaymentDetails>,
}

impl DraftReservation {
    fn new(room: RoomOffering) -> Self {
        Self {
            room,
            step: BookingStep::DatesAndGuests,
            check_in: None,
            check_out: None,
            guest_count: 1,
            customer_name: String::new(),
            customer_email: String::new(),
            customer_phone: String::new(),
            special_requests: None,
            payment_details: None,
        }
    }

    pub fn nights(&self) -> u64 {
        nights_between(self.check_in, self.check_out)
    }

    pub fn total_price(&self) -> f64 {
        self.room.nightly_rate * self.nights() as f64
    }
}

// Whole nights between two dates, 0 while either is unset.
// Absolute difference: a check-out before check-in still counts positive.
pub fn nights_between(check_in: Option<NaiveDate>, check_out: Option<NaiveDate>) -> u64 {
    match (check_in, check_out) {
        (Some(check_in), Some(check_out)) => check_out
            .signed_duration_since(check_in)
            .num_days()
            .unsigned_abs(),
        _ => 0,
    }
}

fn validate_dates_and_guests(
    draft: &DraftReservation,
    mode: ValidationMode,
) -> Result<(), BookingError> {
    let (check_in, check_out) = match (draft.check_in, draft.check_out) {
        (Some(check_in), Some(check_out)) => (check_in, check_out),
        _ => return Err(BookingError::MissingDates),
    };

    if mode == ValidationMode::Lenient {
        return Ok(());
    }

    if check_out <= check_in {
        return Err(BookingError::InvalidDateRange {
            check_in,
            check_out,
        });
    }

    if draft.guest_count == 0 || draft.guest_count > draft.room.capacity {
        return Err(BookingError::GuestCountOutOfBounds {
            requested: draft.guest_count,
            capacity: draft.room.capacity,
        });
    }

    Ok(())
}

fn validate_contact(draft: &DraftReservation, mode: ValidationMode) -> Result<(), BookingError> {
    let is_blank = |value: &str| match mode {
        ValidationMode::Strict => value.trim().is_empty(),
        ValidationMode::Lenient => value.is_empty(),
    };

    if is_blank(&draft.customer_name) {
        return Err(BookingError::IncompleteContactInfo {
            field: ContactField::Name,
        });
    }

    if is_blank(&draft.customer_email) {
        return Err(BookingError::IncompleteContactInfo {
            field: ContactField::Email,
        });
    }

    Ok(())
}

pub struct BookingWorkflow {
    config: WorkflowConfig,
    store: Arc<dyn ReservationStore>,
    payments: Arc<dyn PaymentGateway>,
    draft: Option<DraftReservation>,
}

impl BookingWorkflow {
    pub fn new(config: WorkflowConfig, store: Arc<dyn ReservationStore>) -> Self {
        Self {
            config,
            store,
            payments: Arc::new(StubPaymentGateway),
            draft: None,
        }
    }

    pub fn with_payment_gateway(mut self, gateway: Arc<dyn PaymentGateway>) -> Self {
        self.payments = gateway;
        self
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.draft.is_some()
    }

    // None while no session is active
    pub fn step(&self) -> Option<BookingStep> {
        self.draft.as_ref().map(|d| d.step)
    }

    pub fn draft(&self) -> Option<&DraftReservation> {
        self.draft.as_ref()
    }

    // Availability is the caller's concern; any offering opens a session
    pub fn start_booking(&mut self, room: RoomOffering) {
        if let Some(previous) = &self.draft {
            warn!(
                previous_room = %previous.room.id,
                previous_step = ?previous.step,
                "Discarding active booking draft"
            );
        }

        info!(room_id = %room.id, room_name = %room.name, "Booking session started");
        self.draft = Some(DraftReservation::new(room));
    }

    fn draft_mut(&mut self) -> Result<&mut DraftReservation, BookingError> {
        self.draft.as_mut().ok_or(BookingError::NoActiveSession)
    }

    pub fn set_check_in(&mut self, date: Option<NaiveDate>) -> Result<(), BookingError> {
        self.draft_mut()?.check_in = date;
        Ok(())
    }

    pub fn set_check_out(&mut self, date: Option<NaiveDate>) -> Result<(), BookingError> {
        self.draft_mut()?.check_out = date;
        Ok(())
    }

    pub fn set_guest_count(&mut self, guests: u32) -> Result<(), BookingError> {
        self.draft_mut()?.guest_count = guests;
        Ok(())
    }

    pub fn set_customer_name(&mut self, name: &str) -> Result<(), BookingError> {
        self.draft_mut()?.customer_name = name.to_string();
        Ok(())
    }

    pub fn set_customer_email(&mut self, email: &str) -> Result<(), BookingError> {
        self.draft_mut()?.customer_email = email.to_string();
        Ok(())
    }

    pub fn set_customer_phone(&mut self, phone: &str) -> Result<(), BookingError> {
        self.draft_mut()?.customer_phone = phone.to_string();
        Ok(())
    }

    pub fn set_special_requests(&mut self, requests: &str) -> Result<(), BookingError> {
        let requests = requests.trim();
        self.draft_mut()?.special_requests = if requests.is_empty() {
            None
        } else {
            Some(requests.to_string())
        };
        Ok(())
    }

    pub fn set_payment_details(&mut self, details: PaymentDetails) -> Result<(), BookingError> {
        self.draft_mut()?.payment_details = Some(details);
        Ok(())
    }

    // Moves one step forward; the step is left unchanged when a precondition fails
    pub fn advance_step(&mut self) -> Result<BookingStep, BookingError> {
        let mode = self.config.validation;
        let draft = self.draft_mut()?;

        let next = match draft.step {
            BookingStep::DatesAndGuests => {
                validate_dates_and_guests(draft, mode).map(|_| BookingStep::GuestInformation)
            }
            BookingStep::GuestInformation => {
                validate_contact(draft, mode).map(|_| BookingStep::PaymentAndConfirmation)
            }
            BookingStep::PaymentAndConfirmation => Err(BookingError::CommitRequired),
        };

        match next {
            Ok(next) => {
                debug!(from = ?draft.step, to = ?next, "Booking step advanced");
                draft.step = next;
                Ok(next)
            }
            Err(err) => {
                warn!(step = ?draft.step, error = %err, "Booking step precondition not met");
                Err(err)
            }
        }
    }

    // Steps back, or ends the session when already at the first step.
    // Returns the new step, None once the session is gone.
    pub fn retreat_step(&mut self) -> Option<BookingStep> {
        let draft = self.draft.as_mut()?;

        match draft.step.previous() {
            Some(previous) => {
                debug!(from = ?draft.step, to = ?previous, "Booking step retreated");
                draft.step = previous;
                Some(previous)
            }
            None => {
                info!(room_id = %draft.room.id, "Booking session cancelled");
                self.draft = None;
                None
            }
        }
    }

    pub fn nights(&self) -> u64 {
        self.draft.as_ref().map_or(0, DraftReservation::nights)
    }

    pub fn total_price(&self) -> f64 {
        self.draft.as_ref().map_or(0.0, DraftReservation::total_price)
    }

    // Commits the draft as a confirmed, paid reservation and clears the session.
    // A declined charge keeps the draft so the caller can retry.
    pub fn complete_booking(&mut self) -> Result<Reservation, BookingError> {
        let mode = self.config.validation;
        let draft = self.draft.as_ref().ok_or(BookingError::NoActiveSession)?;

        if mode == ValidationMode::Strict {
            if draft.step != BookingStep::PaymentAndConfirmation {
                return Err(BookingError::NotAtConfirmation { step: draft.step });
            }
            validate_dates_and_guests(draft, mode)?;
            validate_contact(draft, mode)?;
        }

        let total_price = draft.total_price();
        let outcome = self.payments.charge(&ChargeRequest {
            room_id: &draft.room.id,
            customer_email: &draft.customer_email,
            amount: total_price,
            currency: &self.config.currency,
            details: draft.payment_details.as_ref(),
        });

        if let ChargeOutcome::Declined(reason) = &outcome {
            warn!(room_id = %draft.room.id, %reason, "Payment declined");
            return Err(BookingError::PaymentDeclined(reason.clone()));
        }

        let now = Utc::now();
        let reservation = Reservation {
            id: self.store.next_id(&self.config.id_prefix, now),
            room_id: draft.room.id.clone(),
            room_name: draft.room.name.clone(),
            customer_name: draft.customer_name.clone(),
            customer_email: draft.customer_email.clone(),
            customer_phone: draft.customer_phone.clone(),
            check_in: draft.check_in,
            check_out: draft.check_out,
            guest_count: draft.guest_count,
            total_price,
            status: ReservationStatus::Confirmed,
            payment_status: outcome.payment_status(),
            special_requests: draft.special_requests.clone(),
            created_at: now,
        };

        self.store.append(reservation.clone());
        self.draft = None;

        info!(
            reservation_id = %reservation.id,
            room_id = %reservation.room_id,
            total_price = reservation.total_price,
            "Booking completed"
        );

        Ok(reservation)
    }
}
