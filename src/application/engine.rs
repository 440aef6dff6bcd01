use crate::domain::booking::{Booking, BookingRequest, BookingStatus};
use crate::domain::ports::CollectionStore;
use crate::domain::wallet::{Amount, Transaction, Wallet};
use crate::error::{BookingError, Result};
use chrono::Utc;
use rand::Rng;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Collection holding every booking record.
pub const BOOKINGS: &str = "bookings";
/// Collection holding the single wallet object.
pub const WALLET: &str = "wallet";

/// The main entry point for the booking commit flow.
///
/// `BookingEngine` validates requests, checks wallet sufficiency and persists
/// the booking together with its wallet movement. The two collections are
/// independent at the storage layer, so every mutation runs under a single
/// commit lock and a failed second write compensates the first; overlapping
/// calls can never read the same wallet snapshot.
pub struct BookingEngine<S: CollectionStore> {
    store: S,
    commit_lock: Mutex<()>,
}

impl<S: CollectionStore> BookingEngine<S> {
    /// Creates a new engine over the given collection store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            commit_lock: Mutex::new(()),
        }
    }

    /// Validates the request, debits the wallet and persists the booking.
    ///
    /// On any validation or funds failure nothing is written. On success the
    /// booking carries the total price (per-seat fare times passenger count)
    /// and the wallet log gains a withdrawal naming the booking id.
    pub async fn commit(&self, request: BookingRequest) -> Result<Booking> {
        request.validate()?;
        let total = request.total_price();

        let _guard = self.commit_lock.lock().await;

        let mut wallet = self.read_wallet().await?;
        if wallet.balance.0 < total {
            return Err(BookingError::InsufficientFunds {
                required: total,
                available: wallet.balance.0,
            });
        }

        // No writes may happen until the debit is known to be representable.
        let amount = Amount::new(total)?;

        let mut bookings: Vec<Booking> = self.store.get_all(BOOKINGS).await?;
        let id = generate_booking_id(&bookings);
        let booking = request.into_booking(id.clone(), Utc::now());
        bookings.push(booking.clone());
        self.store.save(BOOKINGS, &bookings).await?;

        let description = format!(
            "Flight booking {id} ({} -> {})",
            booking.route.from_code, booking.route.to_code
        );
        wallet.debit(Transaction::withdrawal(amount, description))?;
        if let Err(err) = self.store.save(WALLET, std::slice::from_ref(&wallet)).await {
            warn!(booking = %id, error = %err, "wallet write failed, rolling back booking insert");
            if let Err(rollback) = self.store.delete::<Booking>(BOOKINGS, &id).await {
                warn!(booking = %id, error = %rollback, "rollback failed, booking has no matching debit");
            }
            return Err(err);
        }

        debug!(booking = %id, price = %total, "booking committed");
        Ok(booking)
    }

    /// Flips the booking to cancelled and refunds its full price.
    ///
    /// Cancelling twice is rejected: the second call returns
    /// `AlreadyCancelled` and the wallet is untouched.
    pub async fn cancel(&self, booking_id: &str) -> Result<Booking> {
        let _guard = self.commit_lock.lock().await;

        let mut bookings: Vec<Booking> = self.store.get_all(BOOKINGS).await?;
        let booking = bookings
            .iter_mut()
            .find(|b| b.id == booking_id)
            .ok_or_else(|| BookingError::NotFound(booking_id.to_string()))?;
        if booking.status == BookingStatus::Cancelled {
            return Err(BookingError::AlreadyCancelled(booking_id.to_string()));
        }
        let amount = Amount::new(booking.price)?;
        let prior_status = booking.status;
        booking.status = BookingStatus::Cancelled;
        let cancelled = booking.clone();
        self.store.save(BOOKINGS, &bookings).await?;

        let mut wallet = self.read_wallet().await?;
        wallet.credit(Transaction::deposit(
            amount,
            format!("Refund for booking {booking_id}"),
        ));
        if let Err(err) = self.store.save(WALLET, std::slice::from_ref(&wallet)).await {
            warn!(booking = %booking_id, error = %err, "refund write failed, restoring booking status");
            let mut restored = cancelled.clone();
            restored.status = prior_status;
            if let Err(rollback) = self.store.update(BOOKINGS, restored).await {
                warn!(booking = %booking_id, error = %rollback, "rollback failed, booking cancelled without refund");
            }
            return Err(err);
        }

        debug!(booking = %booking_id, refund = %cancelled.price, "booking cancelled");
        Ok(cancelled)
    }

    /// All bookings, in insertion order.
    pub async fn bookings(&self) -> Result<Vec<Booking>> {
        self.store.get_all(BOOKINGS).await
    }

    /// Bookings belonging to one user, in insertion order.
    pub async fn bookings_for_user(&self, user_id: &str) -> Result<Vec<Booking>> {
        let mut bookings: Vec<Booking> = self.store.get_all(BOOKINGS).await?;
        bookings.retain(|b| b.user_id == user_id);
        Ok(bookings)
    }

    /// Current wallet, lazily opened with the default balance if absent.
    pub async fn wallet(&self) -> Result<Wallet> {
        let _guard = self.commit_lock.lock().await;
        self.read_wallet().await
    }

    async fn read_wallet(&self) -> Result<Wallet> {
        let wallets: Vec<Wallet> = self.store.get_all(WALLET).await?;
        Ok(wallets.into_iter().next().unwrap_or_default())
    }
}

/// Booking ids keep the observed `BK-` prefix but draw from a widened random
/// space, retrying against the current collection until unoccupied.
fn generate_booking_id(existing: &[Booking]) -> String {
    let mut rng = rand::thread_rng();
    loop {
        let id = format!("BK-{:08}", rng.gen_range(0..100_000_000u32));
        if !existing.iter().any(|b| b.id == id) {
            return id;
        }
    }
}
