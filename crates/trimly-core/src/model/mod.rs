//! Canonical domain types.
//!
//! Wire records from `trimly-api` convert into these via `From` impls;
//! the static service price table and the slot grid live here too since
//! they are enumerations the backend never serves.

pub mod barber;
pub mod booking;
pub mod dayoff;
pub mod service;
pub mod slot;

pub use barber::{Barber, Role};
pub use booking::Booking;
pub use dayoff::DayOff;
pub use service::Service;
pub use slot::{slot_grid, is_on_grid};
