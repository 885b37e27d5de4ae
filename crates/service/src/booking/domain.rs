use std::{fmt, str::FromStr};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Lifecycle label of a booking. Any status may be replaced by any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    #[default]
    Received,
    Assigned,
    InProgress,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 5] = [
        BookingStatus::Received,
        BookingStatus::Assigned,
        BookingStatus::InProgress,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Received => "RECEIVED",
            BookingStatus::Assigned => "ASSIGNED",
            BookingStatus::InProgress => "IN_PROGRESS",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookingStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown booking status: {s}"))
    }
}

/// A stored pickup reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub token: String,
    pub municipality: String,
    pub address: String,
    pub time_slot: NaiveDateTime,
    pub item_description: String,
    #[serde(alias = "state")]
    pub status: BookingStatus,
    pub created_at: NaiveDateTime,
}

impl Booking {
    /// Overwrite the fields a booking update may change. Token, creation time and
    /// item description are kept.
    pub fn apply(&mut self, update: BookingUpdate) {
        self.municipality = update.municipality;
        self.address = update.address;
        self.time_slot = update.time_slot;
        self.status = update.status;
    }
}

/// Client timestamps: minute or (fractional) second precision, with an optional
/// trailing `Z` that is dropped. The value stays naive local time.
pub mod client_time {
    use chrono::NaiveDateTime;
    use serde::{de::Error, Deserialize, Deserializer};

    const FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

    pub fn parse(raw: &str) -> Option<NaiveDateTime> {
        let raw = raw.trim();
        let naive = raw.strip_suffix('Z').unwrap_or(raw);
        FORMATS.iter().find_map(|f| NaiveDateTime::parse_from_str(naive, f).ok())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid timestamp `{raw}`, expected YYYY-MM-DDTHH:MM[:SS[.fff]][Z]")))
    }
}

/// Client-supplied part of a new booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub municipality: String,
    pub address: String,
    #[serde(deserialize_with = "client_time::deserialize")]
    pub time_slot: NaiveDateTime,
    pub item_description: String,
}

impl NewBooking {
    pub fn into_booking(self, token: String, created_at: NaiveDateTime) -> Booking {
        Booking {
            token,
            municipality: self.municipality,
            address: self.address,
            time_slot: self.time_slot,
            item_description: self.item_description,
            status: BookingStatus::Received,
            created_at,
        }
    }
}

/// Fields applied by an update. Clients send the full record; the rest is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingUpdate {
    pub municipality: String,
    pub address: String,
    #[serde(deserialize_with = "client_time::deserialize")]
    pub time_slot: NaiveDateTime,
    #[serde(default, alias = "state")]
    pub status: BookingStatus,
}

impl From<Booking> for models::booking::Model {
    fn from(b: Booking) -> Self {
        models::booking::Model {
            token: b.token,
            municipality: b.municipality,
            address: b.address,
            time_slot: b.time_slot,
            item_description: b.item_description,
            status: b.status.as_str().to_string(),
            created_at: b.created_at,
        }
    }
}

impl TryFrom<models::booking::Model> for Booking {
    type Error = String;

    fn try_from(m: models::booking::Model) -> Result<Self, Self::Error> {
        Ok(Booking {
            status: m.status.parse()?,
            token: m.token,
            municipality: m.municipality,
            address: m.address,
            time_slot: m.time_slot,
            item_description: m.item_description,
            created_at: m.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_wire_names_round_trip_through_from_str() {
        for status in BookingStatus::ALL {
            let wire = serde_json::to_value(status).expect("serialize status");
            assert_eq!(wire, json!(status.as_str()));
            assert_eq!(status.as_str().parse::<BookingStatus>(), Ok(status));
        }
        assert!("DONE".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn new_booking_reads_camel_case_body_and_ignores_server_fields() {
        let body = json!({
            "municipality": "Estremoz",
            "address": "Rua A",
            "timeSlot": "2030-05-14T10:00:00",
            "itemDescription": "mattress",
            "token": "client-chosen",
            "status": "COMPLETED"
        });
        let candidate: NewBooking = serde_json::from_value(body).expect("decode");
        assert_eq!(candidate.municipality, "Estremoz");
        assert_eq!(candidate.time_slot.to_string(), "2030-05-14 10:00:00");
    }

    #[test]
    fn update_accepts_state_alias_and_defaults_to_received() {
        let with_state: BookingUpdate = serde_json::from_value(json!({
            "municipality": "Estremoz",
            "address": "Rua A",
            "timeSlot": "2030-05-14T10:00:00",
            "state": "IN_PROGRESS"
        }))
        .expect("decode");
        assert_eq!(with_state.status, BookingStatus::InProgress);

        let without: BookingUpdate = serde_json::from_value(json!({
            "municipality": "Estremoz",
            "address": "Rua A",
            "timeSlot": "2030-05-14T10:00:00"
        }))
        .expect("decode");
        assert_eq!(without.status, BookingStatus::Received);
    }

    #[test]
    fn client_timestamps_accept_minute_precision_fraction_and_zulu() {
        let expected: NaiveDateTime = "2030-05-14T10:00:00".parse().expect("ts");
        for raw in [
            "2030-05-14T10:00",
            "2030-05-14T10:00:00",
            "2030-05-14T10:00:00.000",
            "2030-05-14T10:00:00.000Z",
            "2030-05-14T10:00Z",
        ] {
            assert_eq!(client_time::parse(raw), Some(expected), "{raw}");
        }
        assert_eq!(
            client_time::parse("2030-05-14T10:00:30.250").map(|t| t.to_string()),
            Some("2030-05-14 10:00:30.250".to_string())
        );
        for raw in ["2030-05-14", "14/05/2030 10:00", "2030-05-14T10:00+01:00", ""] {
            assert_eq!(client_time::parse(raw), None, "{raw}");
        }
    }

    #[test]
    fn create_and_update_bodies_take_client_timestamps() {
        let candidate: NewBooking = serde_json::from_value(json!({
            "municipality": "Estremoz",
            "address": "Rua A",
            "timeSlot": "2030-05-14T10:00",
            "itemDescription": "mattress"
        }))
        .expect("decode");
        assert_eq!(candidate.time_slot.to_string(), "2030-05-14 10:00:00");

        let update: BookingUpdate = serde_json::from_value(json!({
            "municipality": "Estremoz",
            "address": "Rua A",
            "timeSlot": "2030-05-14T09:00:00.000Z",
            "status": "ASSIGNED"
        }))
        .expect("decode");
        assert_eq!(update.time_slot.to_string(), "2030-05-14 09:00:00");

        let bad = serde_json::from_value::<NewBooking>(json!({
            "municipality": "Estremoz",
            "address": "Rua A",
            "timeSlot": "tomorrow",
            "itemDescription": "mattress"
        }));
        assert!(bad.is_err());
    }

    #[test]
    fn apply_keeps_identity_and_description() {
        let created = "2030-05-10T09:00:00".parse().expect("ts");
        let mut booking = NewBooking {
            municipality: "Estremoz".into(),
            address: "Rua A".into(),
            time_slot: "2030-05-14T10:00:00".parse().expect("ts"),
            item_description: "mattress".into(),
        }
        .into_booking("t-1".into(), created);

        booking.apply(BookingUpdate {
            municipality: "Évora".into(),
            address: "Rua B".into(),
            time_slot: "2030-05-15T11:00:00".parse().expect("ts"),
            status: BookingStatus::Cancelled,
        });

        assert_eq!(booking.token, "t-1");
        assert_eq!(booking.created_at, created);
        assert_eq!(booking.item_description, "mattress");
        assert_eq!(booking.municipality, "Évora");
        assert_eq!(booking.status, BookingStatus::Cancelled);
    }
}
