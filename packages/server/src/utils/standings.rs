use chrono::{DateTime, Utc};

use crate::entity::league_match;

/// The upcoming match annotation shown next to a team in the standings.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, utoipa::ToSchema)]
pub struct NextMatch {
    pub match_id: i32,
    pub opponent_team_id: i32,
    /// True when the team plays at home (i.e. it was the defender).
    pub home: bool,
    pub scheduled_at: DateTime<Utc>,
}

/// First open match strictly after `now` in which `team_id` plays.
///
/// `matches` may be in any order.
pub fn next_match_for(
    team_id: i32,
    matches: &[league_match::Model],
    now: DateTime<Utc>,
) -> Option<NextMatch> {
    matches
        .iter()
        .filter(|m| m.status.is_open() && m.scheduled_at > now && m.involves(team_id))
        .min_by_key(|m| (m.scheduled_at, m.id))
        .map(|m| {
            let home = m.home_team == team_id;
            NextMatch {
                match_id: m.id,
                opponent_team_id: if home { m.away_team } else { m.home_team },
                home,
                scheduled_at: m.scheduled_at,
            }
        })
}
