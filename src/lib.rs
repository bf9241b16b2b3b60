// Booking reservation core for the LuxeStay hotel portal

pub mod access;
pub mod catalog;
pub mod payment;
pub mod reservation;
pub mod store;
pub mod workflow;

// Re-export key types for convenience
pub use access::{can_access, visible_resources, ReservationScope, Resource, Role, RoleContext};
pub use catalog::{CatalogFilter, CatalogProvider, RoomOffering, StaticCatalog};
pub use payment::{ChargeOutcome, ChargeRequest, PaymentDetails, PaymentGateway, StubPaymentGateway};
pub use reservation::{PaymentStatus, Reservation, ReservationIdGenerator, ReservationStatus};
pub use store::{InMemoryReservationStore, ReservationStore, StoreError, StoreStats};
pub use workflow::{
    nights_between, BookingError, BookingStep, BookingWorkflow, ConfigError, ContactField,
    DraftReservation, ValidationMode, WorkflowConfig,
};
