//! Challenge lifecycle: `requested -> times_proposed -> scheduled`.

pub mod service;

pub use service::{
    ChallengeError, ChallengeService, ScheduledChallenge, challenge_service,
    parse_proposed_times,
};
