use chrono::{DateTime, Utc};
use common::{ChallengeStatus, MatchStatus, parse_proposed_time};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionSession, TransactionTrait, sea_query::Expr,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::entity::{challenge_time_option, league_match, season_team, team_challenge};

/// Number of start times a defender proposes per batch.
pub const TIME_OPTIONS_PER_PROPOSAL: usize = 3;

#[derive(Debug, Error)]
pub enum ChallengeError {
    #[error("A team cannot challenge itself")]
    SelfChallenge,
    #[error("Defender team is not placed in this season yet")]
    DefenderNotPlaced,
    #[error("'{0}' is not a valid date-time")]
    InvalidTimestamp(String),
    #[error("Challenge not found")]
    ChallengeNotFound,
    #[error("Time option not found for this challenge")]
    TimeOptionNotFound,
    #[error("Challenge is already scheduled")]
    AlreadyScheduled,
    #[error(transparent)]
    Store(#[from] DbErr),
}

/// Outcome of picking a time: the updated challenge and the match it produced.
#[derive(Debug, Clone)]
pub struct ScheduledChallenge {
    pub challenge: team_challenge::Model,
    pub scheduled_match: league_match::Model,
}

/// Moves `team_challenges` rows through their lifecycle.
///
/// Every multi-row write runs inside its own transaction on the injected
/// connection, so a failed step leaves no partial state behind.
pub struct ChallengeService<'a, C> {
    conn: &'a C,
}

impl<'a, C> ChallengeService<'a, C>
where
    C: ConnectionTrait + TransactionTrait,
{
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Open a challenge from `challenger_team_id` against `defender_team_id`.
    ///
    /// The division is taken from the defender's `season_teams` row.
    pub async fn create(
        &self,
        season_id: i32,
        defender_team_id: i32,
        challenger_team_id: i32,
    ) -> Result<team_challenge::Model, ChallengeError> {
        if defender_team_id == challenger_team_id {
            return Err(ChallengeError::SelfChallenge);
        }

        let placement = season_team::Entity::find_by_id((season_id, defender_team_id))
            .one(self.conn)
            .await?
            .ok_or(ChallengeError::DefenderNotPlaced)?;

        let model = team_challenge::ActiveModel {
            season_id: Set(season_id),
            division_id: Set(placement.division_id),
            challenger_team_id: Set(challenger_team_id),
            defender_team_id: Set(defender_team_id),
            status: Set(ChallengeStatus::Requested),
            selected_time_option_id: Set(None),
            match_id: Set(None),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;

        info!(
            challenge_id = model.id,
            season_id,
            division_id = model.division_id,
            challenger_team_id,
            defender_team_id,
            "Challenge requested"
        );
        Ok(model)
    }

    /// Record three candidate start times and move the challenge to `times_proposed`.
    ///
    /// All three values are parsed before anything is written. Proposing again
    /// before a time is picked adds another batch rather than replacing the first.
    pub async fn propose_times(
        &self,
        challenge_id: i32,
        times: [&str; TIME_OPTIONS_PER_PROPOSAL],
    ) -> Result<Vec<challenge_time_option::Model>, ChallengeError> {
        let parsed = parse_proposed_times(times)?;

        let txn = self.conn.begin().await?;

        let challenge = team_challenge::Entity::find_by_id(challenge_id)
            .one(&txn)
            .await?
            .ok_or(ChallengeError::ChallengeNotFound)?;
        if !challenge.status.accepts_proposals() {
            warn!(challenge_id, "Times proposed for an already scheduled challenge");
            return Err(ChallengeError::AlreadyScheduled);
        }

        let mut options = Vec::with_capacity(parsed.len());
        for proposed_at in parsed {
            let option = challenge_time_option::ActiveModel {
                challenge_id: Set(challenge_id),
                proposed_at: Set(proposed_at),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            options.push(option);
        }

        let mut active: team_challenge::ActiveModel = challenge.into();
        active.status = Set(ChallengeStatus::TimesProposed);
        active.update(&txn).await?;

        txn.commit().await?;

        info!(challenge_id, options = options.len(), "Times proposed");
        Ok(options)
    }

    /// Pick one of the proposed times, creating the match and closing the challenge.
    ///
    /// The match insert and the challenge update commit together. The update is
    /// conditional on the challenge not being scheduled yet, so a concurrent pick
    /// that loses the race rolls back its match instead of leaving an orphan.
    pub async fn pick_time(
        &self,
        challenge_id: i32,
        time_option_id: i32,
    ) -> Result<ScheduledChallenge, ChallengeError> {
        let txn = self.conn.begin().await?;

        let challenge = team_challenge::Entity::find_by_id(challenge_id)
            .one(&txn)
            .await?
            .ok_or(ChallengeError::ChallengeNotFound)?;

        let option = challenge_time_option::Entity::find_by_id(time_option_id)
            .one(&txn)
            .await?
            .ok_or(ChallengeError::TimeOptionNotFound)?;
        if option.challenge_id != challenge.id {
            warn!(
                challenge_id,
                time_option_id,
                owner = option.challenge_id,
                "Time option belongs to another challenge"
            );
            return Err(ChallengeError::TimeOptionNotFound);
        }

        if challenge.status.is_terminal() {
            return Err(ChallengeError::AlreadyScheduled);
        }

        let scheduled_match = league_match::ActiveModel {
            season_id: Set(challenge.season_id),
            division_id: Set(challenge.division_id),
            home_team: Set(challenge.defender_team_id),
            away_team: Set(challenge.challenger_team_id),
            scheduled_at: Set(option.proposed_at),
            status: Set(MatchStatus::Scheduled),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let updated = team_challenge::Entity::update_many()
            .col_expr(
                team_challenge::Column::Status,
                Expr::value(ChallengeStatus::Scheduled),
            )
            .col_expr(
                team_challenge::Column::SelectedTimeOptionId,
                Expr::value(option.id),
            )
            .col_expr(team_challenge::Column::MatchId, Expr::value(scheduled_match.id))
            .filter(team_challenge::Column::Id.eq(challenge_id))
            .filter(team_challenge::Column::Status.ne(ChallengeStatus::Scheduled))
            .exec(&txn)
            .await?;

        if updated.rows_affected == 0 {
            // Dropping `txn` rolls back the match insert.
            warn!(challenge_id, "Concurrent pick already scheduled this challenge");
            return Err(ChallengeError::AlreadyScheduled);
        }

        txn.commit().await?;

        info!(
            challenge_id,
            time_option_id,
            match_id = scheduled_match.id,
            scheduled_at = %scheduled_match.scheduled_at,
            "Challenge scheduled"
        );

        let challenge = team_challenge::Model {
            status: ChallengeStatus::Scheduled,
            selected_time_option_id: Some(option.id),
            match_id: Some(scheduled_match.id),
            ..challenge
        };

        Ok(ScheduledChallenge {
            challenge,
            scheduled_match,
        })
    }

    /// Look up a challenge, returning `ChallengeNotFound` if absent.
    pub async fn find(&self, challenge_id: i32) -> Result<team_challenge::Model, ChallengeError> {
        team_challenge::Entity::find_by_id(challenge_id)
            .one(self.conn)
            .await?
            .ok_or(ChallengeError::ChallengeNotFound)
    }

    /// All time options of a challenge, earliest first.
    pub async fn time_options(
        &self,
        challenge_id: i32,
    ) -> Result<Vec<challenge_time_option::Model>, DbErr> {
        challenge_time_option::Entity::find()
            .filter(challenge_time_option::Column::ChallengeId.eq(challenge_id))
            .order_by_asc(challenge_time_option::Column::ProposedAt)
            .order_by_asc(challenge_time_option::Column::Id)
            .all(self.conn)
            .await
    }
}

/// Parse a batch of proposed times, failing on the first invalid value.
pub fn parse_proposed_times(
    times: [&str; TIME_OPTIONS_PER_PROPOSAL],
) -> Result<Vec<DateTime<Utc>>, ChallengeError> {
    times
        .iter()
        .map(|raw| {
            parse_proposed_time(raw).map_err(|_| ChallengeError::InvalidTimestamp(raw.to_string()))
        })
        .collect()
}

/// Create a ChallengeService with a DatabaseConnection.
pub fn challenge_service(db: &DatabaseConnection) -> ChallengeService<'_, DatabaseConnection> {
    ChallengeService::new(db)
}
