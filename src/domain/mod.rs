//! Domain entities and the persistence port for the booking flow.

pub mod booking;
pub mod ports;
pub mod wallet;
