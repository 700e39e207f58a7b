pub mod challenge_status;
pub mod match_status;
pub mod schedule;

pub use challenge_status::ChallengeStatus;
pub use match_status::MatchStatus;
pub use schedule::{PROPOSED_TIME_FORMAT, ScheduleParseError, parse_proposed_time};
