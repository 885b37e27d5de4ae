//! Service layer for the bulky-waste pickup booking service.
//! - Enforces the booking rules (one booking per municipality/time slot, one hour lead time).
//! - Hides persistence behind the `BookingRepository` trait.
//! - Wraps the external municipality directory.

pub mod errors;
pub mod clock;
pub mod booking;
pub mod municipality;
#[cfg(test)]
pub mod test_support;
