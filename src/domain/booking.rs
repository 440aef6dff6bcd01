use crate::domain::ports::Keyed;
use crate::error::{BookingError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Most passengers a single booking may carry.
pub const MAX_PASSENGERS: usize = 6;

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    /// Only ever produced by seed data; no engine operation transitions into it.
    Pending,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Pending => "pending",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Route {
    pub from: String,
    pub from_code: String,
    pub to: String,
    pub to_code: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Schedule {
    pub departure_date: String,
    pub departure_time: String,
    pub arrival_date: String,
    pub arrival_time: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Passenger {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub age: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passport: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_request: Option<String>,
}

/// A persisted reservation linking a user, a flight and its passengers.
///
/// `price` is the total across all passengers, never the per-seat fare.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Booking {
    pub id: String,
    pub flight_id: String,
    pub user_id: String,
    pub user_name: String,
    pub route: Route,
    pub schedule: Schedule,
    pub price: Decimal,
    pub status: BookingStatus,
    pub booking_date: DateTime<Utc>,
    pub passengers: Vec<Passenger>,
}

impl Keyed for Booking {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Everything the commit flow needs from the caller: flight identity, fare
/// and the passenger manifest.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct BookingRequest {
    pub flight_id: String,
    pub user_id: String,
    pub user_name: String,
    pub route: Route,
    pub schedule: Schedule,
    pub price_per_seat: Decimal,
    pub passengers: Vec<Passenger>,
}

impl BookingRequest {
    /// Total price: fare per seat times the size of the manifest.
    pub fn total_price(&self) -> Decimal {
        self.price_per_seat * Decimal::from(self.passengers.len() as u64)
    }

    /// Checks every passenger and reports every failing field, not just the
    /// first one encountered.
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();

        if self.passengers.is_empty() {
            problems.push("at least one passenger is required".to_string());
        }
        if self.passengers.len() > MAX_PASSENGERS {
            problems.push(format!(
                "at most {MAX_PASSENGERS} passengers per booking, got {}",
                self.passengers.len()
            ));
        }
        for (index, passenger) in self.passengers.iter().enumerate() {
            let seat = index + 1;
            if passenger.first_name.trim().is_empty() {
                problems.push(format!("passenger {seat}: first name is required"));
            }
            if passenger.last_name.trim().is_empty() {
                problems.push(format!("passenger {seat}: last name is required"));
            }
            if passenger.gender.trim().is_empty() {
                problems.push(format!("passenger {seat}: gender is required"));
            }
            if passenger.age == 0 {
                problems.push(format!("passenger {seat}: age must be greater than zero"));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(BookingError::Validation(problems))
        }
    }

    /// Freezes a validated request into a booking record.
    pub fn into_booking(self, id: String, booking_date: DateTime<Utc>) -> Booking {
        let price = self.total_price();
        Booking {
            id,
            flight_id: self.flight_id,
            user_id: self.user_id,
            user_name: self.user_name,
            route: self.route,
            schedule: self.schedule,
            price,
            status: BookingStatus::Confirmed,
            booking_date,
            passengers: self.passengers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn passenger(first: &str, last: &str, gender: &str, age: u8) -> Passenger {
        Passenger {
            first_name: first.to_string(),
            last_name: last.to_string(),
            gender: gender.to_string(),
            age,
            passport: None,
            special_request: None,
        }
    }

    fn request(passengers: Vec<Passenger>) -> BookingRequest {
        BookingRequest {
            flight_id: "FL-204".to_string(),
            user_id: "u-1".to_string(),
            user_name: "Priya Nair".to_string(),
            route: Route {
                from: "Mumbai".to_string(),
                from_code: "BOM".to_string(),
                to: "Delhi".to_string(),
                to_code: "DEL".to_string(),
            },
            schedule: Schedule {
                departure_date: "2026-09-14".to_string(),
                departure_time: "08:30".to_string(),
                arrival_date: "2026-09-14".to_string(),
                arrival_time: "10:45".to_string(),
            },
            price_per_seat: dec!(1000),
            passengers,
        }
    }

    #[test]
    fn test_total_price_is_per_seat_times_count() {
        for n in 1..=MAX_PASSENGERS {
            let passengers = (0..n)
                .map(|i| passenger(&format!("P{i}"), "Nair", "female", 30))
                .collect();
            let req = request(passengers);
            assert_eq!(req.total_price(), dec!(1000) * Decimal::from(n as u64));
        }
    }

    #[test]
    fn test_validate_reports_every_failing_field() {
        let req = request(vec![
            passenger("", "Nair", "female", 30),
            passenger("Arun", "", "", 0),
        ]);

        let err = req.validate().unwrap_err();
        let BookingError::Validation(problems) = err else {
            panic!("expected validation error");
        };
        assert_eq!(problems.len(), 4);
        assert!(problems[0].contains("passenger 1: first name"));
        assert!(problems[1].contains("passenger 2: last name"));
        assert!(problems[2].contains("passenger 2: gender"));
        assert!(problems[3].contains("passenger 2: age"));
    }

    #[test]
    fn test_validate_rejects_empty_manifest() {
        let err = request(Vec::new()).validate().unwrap_err();
        let BookingError::Validation(problems) = err else {
            panic!("expected validation error");
        };
        assert_eq!(problems, vec!["at least one passenger is required".to_string()]);
    }

    #[test]
    fn test_validate_rejects_oversized_manifest() {
        let passengers = (0..7)
            .map(|i| passenger(&format!("P{i}"), "Nair", "male", 25))
            .collect();
        let err = request(passengers).validate().unwrap_err();
        let BookingError::Validation(problems) = err else {
            panic!("expected validation error");
        };
        assert!(problems[0].contains("at most 6 passengers"));
    }

    #[test]
    fn test_into_booking_freezes_total_price() {
        let req = request(vec![
            passenger("Priya", "Nair", "female", 30),
            passenger("Arun", "Nair", "male", 33),
        ]);
        let booking = req.into_booking("BK-00000001".to_string(), Utc::now());

        assert_eq!(booking.price, dec!(2000));
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.key(), "BK-00000001");
        assert_eq!(booking.passengers.len(), 2);
    }
}
