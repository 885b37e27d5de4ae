//! Booking module: domain, repository and service layers.
//!
//! The service owns the two booking rules; stores only persist and look up records.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use domain::{Booking, BookingStatus, BookingUpdate, NewBooking};
pub use repository::BookingRepository;
pub use service::BookingService;
