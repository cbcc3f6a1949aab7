//! Async client for the barbershop booking backend.
//!
//! The backend exposes a small JSON-over-HTTP surface: a barber directory,
//! day-off records, bookings (with a reserved-slot query), and a minimal
//! auth endpoint for customer accounts plus an admin credential check.
//! This crate owns transport mechanics and the wire types -- domain logic
//! (availability, the booking wizard, revenue stats) lives in `trimly-core`.
//!
//! Endpoint groups are implemented as inherent methods on [`ShopClient`] in
//! separate modules (`barbers`, `bookings`, `dayoffs`, `auth`) to keep the
//! client module focused on URL construction and response handling.

pub mod auth;
pub mod barbers;
pub mod bookings;
pub mod client;
pub mod dayoffs;
pub mod error;
pub mod transport;
pub mod types;

pub use client::ShopClient;
pub use error::Error;
pub use transport::TransportConfig;
pub use types::{
    AdminCredentials, BarberRecord, BookingRecord, CustomerAccount, DayOffRange, DayOffRecord,
    NewBarber, NewBooking, RegisterRequest,
};
