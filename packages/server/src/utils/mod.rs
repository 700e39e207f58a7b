pub mod hash;
pub mod jwt;
pub mod season;
pub mod standings;
