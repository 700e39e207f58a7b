pub mod challenge_time_option;
pub mod free_agent;
pub mod league_match;
pub mod season;
pub mod season_team;
pub mod team;
pub mod team_challenge;
pub mod user;
