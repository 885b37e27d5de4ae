use std::sync::Arc;

use chrono::{Duration, NaiveDateTime};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::domain::{Booking, BookingUpdate, NewBooking};
use super::repository::BookingRepository;
use crate::clock::{Clock, SystemClock};
use crate::errors::BookingError;

/// Minimum gap between now and a newly chosen time slot.
pub fn min_lead_time() -> Duration {
    Duration::hours(1)
}

/// Booking business service independent of web framework
pub struct BookingService<R: BookingRepository + ?Sized> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R: BookingRepository + ?Sized> BookingService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self::with_clock(repo, Arc::new(SystemClock)) }

    pub fn with_clock(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self { Self { repo, clock } }

    fn too_soon(&self, time_slot: NaiveDateTime) -> bool {
        time_slot < self.clock.now() + min_lead_time()
    }

    /// Reserve a free slot and return the token identifying the booking.
    ///
    /// # Examples
    /// ```
    /// use service::booking::{BookingService, NewBooking, repository::memory::InMemoryBookingRepository};
    /// use std::sync::Arc;
    /// let svc = BookingService::new(Arc::new(InMemoryBookingRepository::default()));
    /// let tomorrow = chrono::Local::now().naive_local() + chrono::Duration::days(1);
    /// let candidate = NewBooking { municipality: "Estremoz".into(), address: "Rua A".into(), time_slot: tomorrow, item_description: "mattress".into() };
    /// let token = tokio_test::block_on(svc.request_booking(candidate.clone())).unwrap();
    /// assert!(!token.is_empty());
    /// let again = tokio_test::block_on(svc.request_booking(candidate));
    /// assert!(again.is_err());
    /// ```
    #[instrument(skip(self, candidate), fields(municipality = %candidate.municipality, time_slot = %candidate.time_slot))]
    pub async fn request_booking(&self, candidate: NewBooking) -> Result<String, BookingError> {
        if let Some(existing) = self
            .repo
            .find_by_municipality_and_slot(&candidate.municipality, candidate.time_slot)
            .await?
        {
            debug!(existing = %existing.token, "slot already booked");
            return Err(BookingError::Conflict);
        }
        if self.too_soon(candidate.time_slot) {
            return Err(BookingError::lead_time());
        }

        let token = Uuid::new_v4().to_string();
        let booking = candidate.into_booking(token.clone(), self.clock.now());
        self.repo.save(booking).await?;
        info!(token = %token, "booking_created");
        Ok(token)
    }

    pub async fn get_booking(&self, token: &str) -> Result<Option<Booking>, BookingError> {
        Ok(self.repo.find_by_token(token).await?)
    }

    pub async fn list_bookings(&self) -> Result<Vec<Booking>, BookingError> {
        Ok(self.repo.list_all().await?)
    }

    /// Exact, case-sensitive municipality match.
    pub async fn list_bookings_by_municipality(&self, municipality: &str) -> Result<Vec<Booking>, BookingError> {
        Ok(self.repo.list_by_municipality(municipality).await?)
    }

    /// Apply an update. Keeping the current slot skips both the conflict and
    /// the lead-time check.
    #[instrument(skip(self, updated), fields(token = %token))]
    pub async fn update_booking(&self, token: &str, updated: BookingUpdate) -> Result<String, BookingError> {
        let mut existing = self
            .repo
            .find_by_token(token)
            .await?
            .ok_or_else(|| BookingError::not_found(token))?;

        if let Some(other) = self
            .repo
            .find_by_municipality_and_slot(&updated.municipality, updated.time_slot)
            .await?
        {
            if other.token != token {
                debug!(other = %other.token, "slot held by another booking");
                return Err(BookingError::Conflict);
            }
        }
        if updated.time_slot != existing.time_slot && self.too_soon(updated.time_slot) {
            return Err(BookingError::lead_time());
        }

        let status = updated.status;
        existing.apply(updated);
        self.repo.save(existing).await?;
        info!(%status, "booking_updated");
        Ok(token.to_string())
    }

    #[instrument(skip(self))]
    pub async fn delete_booking(&self, token: &str) -> Result<(), BookingError> {
        if self.repo.find_by_token(token).await?.is_none() {
            warn!("delete of unknown booking");
            return Err(BookingError::not_found(token));
        }
        if !self.repo.delete_by_token(token).await? {
            warn!("booking removed by a concurrent delete");
            return Err(BookingError::not_found(token));
        }
        info!("booking_deleted");
        Ok(())
    }
}
