//! Application layer containing the core business logic orchestration.
//!
//! This module defines the `BookingEngine`, the single entry point for
//! committing and cancelling bookings. Every mutation runs under one
//! in-process commit lock so the two collections it touches stay consistent.

pub mod engine;
