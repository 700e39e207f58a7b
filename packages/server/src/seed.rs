use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::{
    Index, IndexCreateStatement, OnConflict, PostgresQueryBuilder, SqliteQueryBuilder,
};
use sea_orm::*;
use tracing::{info, warn};

use crate::config::AuthConfig;
use crate::entity::{
    challenge_time_option, league_match, season, season_team, team, team_challenge, user,
};
use crate::utils::hash;

/// Teams created by the demo seed: (name, tag, division).
const DEMO_TEAMS: &[(&str, &str, i32)] = &[
    ("Null Pointers", "NULL", 1),
    ("Stack Smashers", "SMSH", 1),
    ("Heap Sprayers", "HEAP", 2),
    ("Race Winners", "RACE", 2),
];

/// Create the configured admin account if it does not exist yet.
///
/// Does nothing unless both `auth.admin_username` and `auth.admin_password` are set.
/// An existing account with that username is left untouched.
pub async fn seed_admin(db: &DatabaseConnection, auth: &AuthConfig) -> Result<(), DbErr> {
    let (Some(username), Some(password)) = (&auth.admin_username, &auth.admin_password) else {
        return Ok(());
    };

    let password =
        hash::hash_password(password).map_err(|e| DbErr::Custom(format!("hash: {e}")))?;

    let model = user::ActiveModel {
        username: Set(username.trim().to_string()),
        password: Set(password),
        role: Set(user::ADMIN_ROLE.to_string()),
        team_id: Set(None),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let result = user::Entity::insert(model)
        .on_conflict(
            OnConflict::column(user::Column::Username)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await;

    match result {
        Ok(_) => info!("Ensured admin account '{}' exists", username),
        Err(DbErr::RecordNotInserted) => {}
        Err(e) => return Err(e),
    }

    Ok(())
}

/// Populate an empty store with one active season and a handful of placed teams.
///
/// Skipped when any season already exists.
pub async fn seed_demo_league(db: &DatabaseConnection) -> Result<(), DbErr> {
    if season::Entity::find().count(db).await? > 0 {
        return Ok(());
    }

    let txn = db.begin().await?;

    let season = season::ActiveModel {
        name: Set("Demo Season".to_string()),
        active: Set(true),
        start_date: Set(NaiveDate::from_ymd_opt(2026, 1, 1)),
        end_date: Set(None),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    for &(name, tag, division_id) in DEMO_TEAMS {
        let team = team::ActiveModel {
            name: Set(name.to_string()),
            tag: Set(tag.to_string()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        season_team::ActiveModel {
            season_id: Set(season.id),
            team_id: Set(team.id),
            division_id: Set(division_id),
            wins: Set(0),
            losses: Set(0),
            points: Set(0),
            flag_diff: Set(0),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;
    info!(
        season_id = season.id,
        teams = DEMO_TEAMS.len(),
        "Seeded demo league"
    );
    Ok(())
}

fn index_sql(backend: DbBackend, stmt: &IndexCreateStatement) -> String {
    match backend {
        DbBackend::Sqlite => stmt.to_string(SqliteQueryBuilder),
        _ => stmt.to_string(PostgresQueryBuilder),
    }
}

/// Ensure the composite indexes used by the listing queries exist.
///
/// Schema sync only creates single-column indexes, so these are created on
/// startup. A failure is logged and does not stop the server.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    let indexes = [
        // inbox and recent challenges: WHERE season_id = ? ORDER BY created_at DESC
        (
            "idx_team_challenges_season_created",
            Index::create()
                .table(team_challenge::Entity)
                .col(team_challenge::Column::SeasonId)
                .col(team_challenge::Column::CreatedAt)
                .to_owned(),
        ),
        // options of a challenge in proposal order
        (
            "idx_time_options_challenge_proposed",
            Index::create()
                .table(challenge_time_option::Entity)
                .col(challenge_time_option::Column::ChallengeId)
                .col(challenge_time_option::Column::ProposedAt)
                .to_owned(),
        ),
        // upcoming matches of a season
        (
            "idx_matches_season_status_scheduled",
            Index::create()
                .table(league_match::Entity)
                .col(league_match::Column::SeasonId)
                .col(league_match::Column::Status)
                .col(league_match::Column::ScheduledAt)
                .to_owned(),
        ),
    ];

    let backend = db.get_database_backend();
    for (name, mut stmt) in indexes {
        stmt.if_not_exists().name(name);
        match db.execute_unprepared(&index_sql(backend, &stmt)).await {
            Ok(_) => info!("Ensured index {} exists", name),
            Err(e) => warn!("Failed to create index {}: {}", name, e),
        }
    }

    Ok(())
}
