pub mod seaorm;

pub use seaorm::SeaOrmBookingRepository;
