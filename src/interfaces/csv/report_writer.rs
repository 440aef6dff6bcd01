use crate::domain::booking::Booking;
use crate::domain::wallet::Wallet;
use crate::error::Result;
use std::io::Write;

/// Writes the final bookings and wallet state as CSV sections.
///
/// Bookings come first in insertion order, then the wallet balance and its
/// reverse-chronological transaction log.
pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(sink: W) -> Self {
        let writer = csv::WriterBuilder::new().flexible(true).from_writer(sink);
        Self { writer }
    }

    pub fn write_report(&mut self, bookings: &[Booking], wallet: &Wallet) -> Result<()> {
        self.writer
            .write_record(["booking", "flight", "route", "status", "passengers", "price"])?;
        for booking in bookings {
            self.writer.write_record([
                booking.id.as_str(),
                booking.flight_id.as_str(),
                &format!("{}->{}", booking.route.from_code, booking.route.to_code),
                booking.status.as_str(),
                &booking.passengers.len().to_string(),
                &booking.price.to_string(),
            ])?;
        }

        self.writer
            .write_record(["balance", &wallet.balance.0.to_string()])?;
        self.writer
            .write_record(["transaction", "type", "amount", "description"])?;
        for tx in &wallet.transactions {
            self.writer.write_record([
                tx.id.as_str(),
                tx.kind.as_str(),
                &tx.amount.value().to_string(),
                tx.description.as_str(),
            ])?;
        }

        self.writer.flush()?;
        Ok(())
    }
}
