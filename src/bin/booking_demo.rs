// Scripted walk through one booking session against the demo catalog
//
// Set BOOKING_CONFIG to a JSON workflow config to override the defaults,
// and RUST_LOG to adjust log output.

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use luxestay_booking::{
    BookingWorkflow, CatalogProvider, InMemoryReservationStore, PaymentDetails, ReservationStore,
    RoleContext, StaticCatalog, WorkflowConfig,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let config = match std::env::var("BOOKING_CONFIG") {
        Ok(json) => WorkflowConfig::from_json(&json).context("parsing BOOKING_CONFIG")?,
        Err(_) => WorkflowConfig::default(),
    };

    let catalog = StaticCatalog::luxestay();
    let store = Arc::new(InMemoryReservationStore::with_seed_data());
    let mut workflow = BookingWorkflow::new(config, store.clone());

    println!("=== LuxeStay Rooms ===");
    for room in catalog.list_offerings() {
        println!(
            "  [{}] {:<20} ${:>6.2}/night  up to {} guests",
            room.id, room.name, room.nightly_rate, room.capacity
        );
    }

    let room = catalog
        .find("1")
        .ok_or_else(|| anyhow!("room 1 missing from catalog"))?;
    workflow.start_booking(room);

    workflow.set_check_in(NaiveDate::from_ymd_opt(2024, 1, 15))?;
    workflow.set_check_out(NaiveDate::from_ymd_opt(2024, 1, 18))?;
    workflow.set_guest_count(2)?;
    workflow.advance_step()?;

    workflow.set_customer_name("Jane Smith")?;
    workflow.set_customer_email("jane@example.com")?;
    workflow.set_customer_phone("+1 (555) 987-6543")?;
    workflow.advance_step()?;

    println!(
        "\n{} nights, total ${:.2}",
        workflow.nights(),
        workflow.total_price()
    );

    workflow.set_payment_details(PaymentDetails {
        card_number: "1234 5678 9012 3456".to_string(),
        expiry: "12/27".to_string(),
        cvv: "123".to_string(),
    })?;
    let reservation = workflow.complete_booking()?;
    println!(
        "Booking confirmed: {} ({:?}, {:?})",
        reservation.id, reservation.status, reservation.payment_status
    );

    println!("\n=== My Bookings (jane@example.com) ===");
    for booking in store.list(&RoleContext::customer("jane@example.com")) {
        println!(
            "  {} {} {:?} -> {:?} ${:.2}",
            booking.id, booking.room_name, booking.check_in, booking.check_out, booking.total_price
        );
    }

    let stats = store.stats();
    println!(
        "\n{} reservations on file, ${:.2} confirmed revenue",
        stats.items_count, stats.confirmed_revenue
    );

    Ok(())
}
