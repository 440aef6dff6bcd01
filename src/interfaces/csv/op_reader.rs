use crate::domain::booking::{BookingRequest, Passenger, Route, Schedule};
use crate::error::{BookingError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum OpKind {
    Book,
    Cancel,
}

/// One row of the operations CSV.
///
/// A `book` row carries the flight, route, schedule, fare and passenger
/// manifest; a `cancel` row only needs the booking id. Compound columns use
/// `City/CODE` for places, `DATE TIME` for schedule entries and
/// `First Last:gender:age` entries joined by `;` for the manifest.
#[derive(Debug, Deserialize, Clone)]
pub struct OpRecord {
    pub op: OpKind,
    #[serde(default)]
    pub booking: String,
    #[serde(default)]
    pub flight: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub departure: String,
    #[serde(default)]
    pub arrival: String,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub passengers: String,
}

impl OpRecord {
    /// Converts a `book` row into an engine request.
    pub fn into_request(self) -> Result<BookingRequest> {
        let (from, from_code) = parse_place(&self.from)?;
        let (to, to_code) = parse_place(&self.to)?;
        let (departure_date, departure_time) = parse_when(&self.departure)?;
        let (arrival_date, arrival_time) = parse_when(&self.arrival)?;
        let price_per_seat = self.price.ok_or_else(|| {
            BookingError::Validation(vec!["price per seat is required".to_string()])
        })?;

        Ok(BookingRequest {
            flight_id: self.flight,
            user_id: self.user,
            user_name: self.name,
            route: Route {
                from,
                from_code,
                to,
                to_code,
            },
            schedule: Schedule {
                departure_date,
                departure_time,
                arrival_date,
                arrival_time,
            },
            price_per_seat,
            passengers: parse_passengers(&self.passengers)?,
        })
    }
}

fn parse_place(raw: &str) -> Result<(String, String)> {
    match raw.split_once('/') {
        Some((city, code)) if !city.is_empty() && !code.is_empty() => {
            Ok((city.to_string(), code.to_string()))
        }
        _ => Err(BookingError::Validation(vec![format!(
            "expected City/CODE, got {raw:?}"
        )])),
    }
}

fn parse_when(raw: &str) -> Result<(String, String)> {
    match raw.split_once(' ') {
        Some((date, time)) if !date.is_empty() && !time.is_empty() => {
            Ok((date.to_string(), time.to_string()))
        }
        _ => Err(BookingError::Validation(vec![format!(
            "expected DATE TIME, got {raw:?}"
        )])),
    }
}

fn parse_passengers(raw: &str) -> Result<Vec<Passenger>> {
    let mut passengers = Vec::new();
    for entry in raw.split(';').filter(|entry| !entry.trim().is_empty()) {
        let mut fields = entry.split(':');
        let full_name = fields.next().unwrap_or_default().trim();
        let gender = fields.next().unwrap_or_default().trim();
        let age = fields
            .next()
            .unwrap_or_default()
            .trim()
            .parse::<u8>()
            .map_err(|_| {
                BookingError::Validation(vec![format!("invalid passenger age in {entry:?}")])
            })?;

        let (first_name, last_name) = match full_name.split_once(' ') {
            Some((first, last)) => (first.to_string(), last.to_string()),
            None => (full_name.to_string(), String::new()),
        };
        passengers.push(Passenger {
            first_name,
            last_name,
            gender: gender.to_string(),
            age,
            passport: None,
            special_request: None,
        });
    }
    Ok(passengers)
}

/// Reads booking operations from a CSV source.
///
/// This reader wraps `csv::Reader` and provides an iterator over
/// `Result<OpRecord>`. Whitespace is trimmed and short records tolerated.
pub struct OpReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> OpReader<R> {
    /// Creates a new `OpReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes operations.
    pub fn operations(self) -> impl Iterator<Item = Result<OpRecord>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(BookingError::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const HEADER: &str = "op, booking, flight, user, name, from, to, departure, arrival, price, passengers";

    #[test]
    fn test_reader_book_row() {
        let data = format!(
            "{HEADER}\nbook, , FL-204, u-1, Priya Nair, Mumbai/BOM, Delhi/DEL, \
             2026-09-14 08:30, 2026-09-14 10:45, 1000, Priya Nair:female:30;Arun Nair:male:33"
        );
        let reader = OpReader::new(data.as_bytes());
        let records: Vec<Result<OpRecord>> = reader.operations().collect();
        assert_eq!(records.len(), 1);

        let request = records
            .into_iter()
            .next()
            .unwrap()
            .unwrap()
            .into_request()
            .unwrap();
        assert_eq!(request.flight_id, "FL-204");
        assert_eq!(request.route.from_code, "BOM");
        assert_eq!(request.schedule.departure_time, "08:30");
        assert_eq!(request.price_per_seat, dec!(1000));
        assert_eq!(request.passengers.len(), 2);
        assert_eq!(request.passengers[1].first_name, "Arun");
        assert_eq!(request.passengers[1].age, 33);
    }

    #[test]
    fn test_reader_cancel_row() {
        let data = format!("{HEADER}\ncancel, BK-00000042, , , , , , , , , ");
        let reader = OpReader::new(data.as_bytes());
        let record = reader.operations().next().unwrap().unwrap();
        assert_eq!(record.op, OpKind::Cancel);
        assert_eq!(record.booking, "BK-00000042");
    }

    #[test]
    fn test_reader_malformed_op() {
        let data = format!("{HEADER}\nrefund, BK-00000042");
        let reader = OpReader::new(data.as_bytes());
        assert!(reader.operations().next().unwrap().is_err());
    }

    #[test]
    fn test_invalid_place_is_reported() {
        let data = format!(
            "{HEADER}\nbook, , FL-204, u-1, Priya Nair, Mumbai, Delhi/DEL, \
             2026-09-14 08:30, 2026-09-14 10:45, 1000, Priya Nair:female:30"
        );
        let reader = OpReader::new(data.as_bytes());
        let record = reader.operations().next().unwrap().unwrap();
        let err = record.into_request().unwrap_err();
        assert!(matches!(err, BookingError::Validation(_)));
    }

    #[test]
    fn test_invalid_passenger_age_is_reported() {
        let record = parse_passengers("Priya Nair:female:thirty");
        assert!(record.is_err());
    }
}
