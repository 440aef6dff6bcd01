#![allow(dead_code)]

pub const HEADER: &str =
    "op, booking, flight, user, name, from, to, departure, arrival, price, passengers";

/// One `book` row on the default BOM -> DEL flight.
pub fn book_row(price: &str, passengers: &str) -> String {
    format!(
        "book, , FL-204, u-1, Priya Nair, Mumbai/BOM, Delhi/DEL, \
         2026-09-14 08:30, 2026-09-14 10:45, {price}, {passengers}"
    )
}

pub fn cancel_row(booking_id: &str) -> String {
    format!("cancel, {booking_id}, , , , , , , , , ")
}

/// Pulls the first booking id out of a report line such as
/// `BK-00000042,FL-204,BOM->DEL,confirmed,2,2000`.
pub fn first_booking_id(report: &str) -> Option<String> {
    report
        .lines()
        .find(|line| line.starts_with("BK-"))
        .and_then(|line| line.split(',').next())
        .map(str::to_string)
}
