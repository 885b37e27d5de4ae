use async_trait::async_trait;
use chrono::NaiveDateTime;
use sea_orm::DatabaseConnection;

use crate::booking::domain::Booking;
use crate::booking::repository::BookingRepository;
use crate::errors::RepositoryError;

/// SeaORM-backed booking store. Slot uniqueness is enforced by the
/// `idx_booking_slot_unique` index.
pub struct SeaOrmBookingRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn to_domain(row: models::booking::Model) -> Result<Booking, RepositoryError> {
    Booking::try_from(row).map_err(RepositoryError::Db)
}

fn to_domain_all(rows: Vec<models::booking::Model>) -> Result<Vec<Booking>, RepositoryError> {
    rows.into_iter().map(to_domain).collect()
}

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn save(&self, booking: Booking) -> Result<(), RepositoryError> {
        models::booking::upsert(&self.db, booking.into()).await?;
        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Booking>, RepositoryError> {
        models::booking::find_by_token(&self.db, token).await?.map(to_domain).transpose()
    }

    async fn find_by_municipality_and_slot(&self, municipality: &str, time_slot: NaiveDateTime) -> Result<Option<Booking>, RepositoryError> {
        models::booking::find_by_slot(&self.db, municipality, time_slot)
            .await?
            .map(to_domain)
            .transpose()
    }

    async fn list_all(&self) -> Result<Vec<Booking>, RepositoryError> {
        to_domain_all(models::booking::list_all(&self.db).await?)
    }

    async fn list_by_municipality(&self, municipality: &str) -> Result<Vec<Booking>, RepositoryError> {
        to_domain_all(models::booking::list_by_municipality(&self.db, municipality).await?)
    }

    async fn delete_by_token(&self, token: &str) -> Result<bool, RepositoryError> {
        Ok(models::booking::delete(&self.db, token).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::domain::{BookingStatus, NewBooking};
    use crate::test_support::get_db;

    fn candidate(municipality: &str, slot: &str) -> NewBooking {
        NewBooking {
            municipality: municipality.into(),
            address: "Rua Principal, n12".into(),
            time_slot: slot.parse().expect("slot"),
            item_description: "Old mattress".into(),
        }
    }

    #[tokio::test]
    async fn seaorm_round_trip_preserves_domain_fields() -> anyhow::Result<()> {
        let repo = SeaOrmBookingRepository::new(get_db().await?);
        let created: NaiveDateTime = "2030-05-10T08:30:00".parse()?;
        let mut booking = candidate("Estremoz", "2030-05-14T10:00:00").into_booking("t-1".into(), created);
        booking.status = BookingStatus::InProgress;
        repo.save(booking.clone()).await?;

        let stored = repo.find_by_token("t-1").await?.expect("stored");
        assert_eq!(stored, booking);
        Ok(())
    }

    #[tokio::test]
    async fn seaorm_maps_unique_violation_to_slot_taken() -> anyhow::Result<()> {
        let repo = SeaOrmBookingRepository::new(get_db().await?);
        let created: NaiveDateTime = "2030-05-10T08:30:00".parse()?;
        repo.save(candidate("Estremoz", "2030-05-14T10:00:00").into_booking("t-1".into(), created)).await?;

        let err = repo
            .save(candidate("Estremoz", "2030-05-14T10:00:00").into_booking("t-2".into(), created))
            .await
            .expect_err("slot taken");
        assert!(matches!(err, RepositoryError::SlotTaken), "unexpected: {err:?}");

        // moving t-1 onto its own slot is an overwrite, not a clash
        let mut same = repo.find_by_token("t-1").await?.expect("t-1");
        same.status = BookingStatus::Assigned;
        repo.save(same).await?;
        Ok(())
    }

    #[tokio::test]
    async fn seaorm_lists_by_municipality() -> anyhow::Result<()> {
        let repo = SeaOrmBookingRepository::new(get_db().await?);
        let created: NaiveDateTime = "2030-05-10T08:30:00".parse()?;
        for (i, m) in ["Estremoz", "Estremoz", "Évora"].iter().enumerate() {
            let slot = format!("2030-05-14T1{i}:00:00");
            repo.save(candidate(m, &slot).into_booking(format!("t-{i}"), created)).await?;
        }
        assert_eq!(repo.list_all().await?.len(), 3);
        let estremoz = repo.list_by_municipality("Estremoz").await?;
        assert_eq!(estremoz.len(), 2);
        assert!(repo.delete_by_token("t-0").await?);
        assert!(repo.find_by_token("t-0").await?.is_none());
        Ok(())
    }
}
