pub mod auth;
pub mod challenge;
pub mod league;
pub mod shared;
pub mod standings;
