pub mod known_ids;
pub mod payload;
pub mod ride;
pub mod scooter;
