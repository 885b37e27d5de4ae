use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::domain::Booking;
use crate::errors::RepositoryError;

/// Keyed storage of bookings.
///
/// `save` must refuse a record whose (municipality, time slot) is held by a
/// different token with [`RepositoryError::SlotTaken`].
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn save(&self, booking: Booking) -> Result<(), RepositoryError>;
    async fn find_by_token(&self, token: &str) -> Result<Option<Booking>, RepositoryError>;
    async fn find_by_municipality_and_slot(&self, municipality: &str, time_slot: NaiveDateTime) -> Result<Option<Booking>, RepositoryError>;
    async fn list_all(&self) -> Result<Vec<Booking>, RepositoryError>;
    async fn list_by_municipality(&self, municipality: &str) -> Result<Vec<Booking>, RepositoryError>;
    async fn delete_by_token(&self, token: &str) -> Result<bool, RepositoryError>;
}

/// In-memory repository for tests and offline runs
pub mod memory {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    pub struct InMemoryBookingRepository {
        bookings: Mutex<HashMap<String, Booking>>, // key: token
    }

    impl InMemoryBookingRepository {
        fn guard(&self) -> Result<MutexGuard<'_, HashMap<String, Booking>>, RepositoryError> {
            self.bookings.lock().map_err(|_| RepositoryError::Db("booking map lock poisoned".into()))
        }
    }

    #[async_trait]
    impl BookingRepository for InMemoryBookingRepository {
        async fn save(&self, booking: Booking) -> Result<(), RepositoryError> {
            let mut bookings = self.guard()?;
            let taken = bookings.values().any(|b| {
                b.token != booking.token && b.municipality == booking.municipality && b.time_slot == booking.time_slot
            });
            if taken {
                return Err(RepositoryError::SlotTaken);
            }
            bookings.insert(booking.token.clone(), booking);
            Ok(())
        }

        async fn find_by_token(&self, token: &str) -> Result<Option<Booking>, RepositoryError> {
            Ok(self.guard()?.get(token).cloned())
        }

        async fn find_by_municipality_and_slot(&self, municipality: &str, time_slot: NaiveDateTime) -> Result<Option<Booking>, RepositoryError> {
            let bookings = self.guard()?;
            Ok(bookings
                .values()
                .find(|b| b.municipality == municipality && b.time_slot == time_slot)
                .cloned())
        }

        async fn list_all(&self) -> Result<Vec<Booking>, RepositoryError> {
            Ok(self.guard()?.values().cloned().collect())
        }

        async fn list_by_municipality(&self, municipality: &str) -> Result<Vec<Booking>, RepositoryError> {
            let bookings = self.guard()?;
            Ok(bookings.values().filter(|b| b.municipality == municipality).cloned().collect())
        }

        async fn delete_by_token(&self, token: &str) -> Result<bool, RepositoryError> {
            Ok(self.guard()?.remove(token).is_some())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::InMemoryBookingRepository;
    use super::*;
    use crate::booking::domain::BookingStatus;

    fn booking(token: &str, municipality: &str, slot: &str) -> Booking {
        Booking {
            token: token.into(),
            municipality: municipality.into(),
            address: "Rua A".into(),
            time_slot: slot.parse().expect("slot"),
            item_description: "fridge".into(),
            status: BookingStatus::Received,
            created_at: "2030-01-01T00:00:00".parse().expect("created"),
        }
    }

    #[tokio::test]
    async fn memory_save_overwrites_by_token_and_keeps_own_slot() -> anyhow::Result<()> {
        let repo = InMemoryBookingRepository::default();
        repo.save(booking("t-1", "Estremoz", "2030-05-14T10:00:00")).await?;

        let mut same = booking("t-1", "Estremoz", "2030-05-14T10:00:00");
        same.status = BookingStatus::Assigned;
        repo.save(same).await?;

        let stored = repo.find_by_token("t-1").await?.expect("stored");
        assert_eq!(stored.status, BookingStatus::Assigned);
        assert_eq!(repo.list_all().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn memory_rejects_foreign_slot() -> anyhow::Result<()> {
        let repo = InMemoryBookingRepository::default();
        repo.save(booking("t-1", "Estremoz", "2030-05-14T10:00:00")).await?;
        let err = repo.save(booking("t-2", "Estremoz", "2030-05-14T10:00:00")).await;
        assert!(matches!(err, Err(RepositoryError::SlotTaken)));
        assert!(repo.find_by_token("t-2").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn memory_queries_by_slot_and_municipality() -> anyhow::Result<()> {
        let repo = InMemoryBookingRepository::default();
        repo.save(booking("a", "Estremoz", "2030-05-14T10:00:00")).await?;
        repo.save(booking("b", "Évora", "2030-05-14T10:00:00")).await?;

        let hit = repo
            .find_by_municipality_and_slot("Évora", "2030-05-14T10:00:00".parse::<NaiveDateTime>()?)
            .await?
            .expect("slot hit");
        assert_eq!(hit.token, "b");
        assert!(repo.list_by_municipality("ÉVORA").await?.is_empty());
        assert!(repo.delete_by_token("a").await?);
        assert!(!repo.delete_by_token("a").await?);
        Ok(())
    }
}
