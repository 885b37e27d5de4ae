pub mod errors;
pub mod db;
pub mod booking;

#[cfg(test)]
mod tests;
