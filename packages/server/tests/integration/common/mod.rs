use std::net::SocketAddr;

use chrono::{NaiveDate, Utc};
use reqwest::{Client, redirect};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use serde_json::Value;

use league_server::config::{
    AppConfig, AuthConfig, CorsConfig, DatabaseConfig, SeedConfig, ServerConfig,
};
use league_server::entity::{
    challenge_time_option, league_match, season, season_team, team, team_challenge, user,
};
use league_server::state::AppState;

pub const PASSWORD: &str = "securepass";

pub mod routes {
    pub const REGISTER: &str = "/api/v1/auth/register";
    pub const LOGIN: &str = "/api/v1/auth/login";
    pub const LOGOUT: &str = "/api/v1/auth/logout";
    pub const ME: &str = "/api/v1/auth/me";

    pub const CREATE_CHALLENGE: &str = "/api/v1/challenges/create";
    pub const PROPOSE_TIMES: &str = "/api/v1/challenges/propose-times";
    pub const PICK_TIME: &str = "/api/v1/challenges/pick-time";
    pub const CHALLENGES: &str = "/api/v1/challenges";

    pub const STANDINGS: &str = "/api/v1/standings";
    pub const LEAGUE_STATUS: &str = "/api/v1/league-status";

    pub fn challenge(id: i32) -> String {
        format!("/api/v1/challenges/{id}")
    }

    pub fn user_team(id: i32) -> String {
        format!("/api/v1/users/{id}/team")
    }
}

/// A running test server backed by a private in-memory database.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub db: DatabaseConnection,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// `Location` header, set on redirects.
    pub location: Option<String>,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

/// Ids of a season with a defender and a challenger already placed.
pub struct League {
    pub season_id: i32,
    pub defender_id: i32,
    pub challenger_id: i32,
    pub defender_division: i32,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let app_config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors: CorsConfig {
                    allow_origins: vec![],
                    max_age: 3600,
                },
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
                min_connections: 1,
                connect_timeout_secs: 10,
            },
            auth: AuthConfig {
                jwt_secret: "test-secret-for-integration-tests".to_string(),
                token_ttl_hours: 1,
                admin_username: None,
                admin_password: None,
            },
            seed: SeedConfig::default(),
        };

        let db = league_server::database::init_db(&app_config.database)
            .await
            .expect("Failed to initialize in-memory database");
        league_server::seed::ensure_indexes(&db)
            .await
            .expect("Failed to create indexes");

        let state = AppState {
            db: db.clone(),
            config: app_config,
        };

        let app = league_server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .build()
            .expect("Failed to build HTTP client");

        Self { addr, client, db }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn post_form_with_token(
        &self,
        path: &str,
        form: &[(&str, &str)],
        token: &str,
    ) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .form(form)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn post_form_without_token(&self, path: &str, form: &[(&str, &str)]) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn post_json_without_token(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn put_with_token(&self, path: &str, body: &Value, token: &str) -> TestResponse {
        let res = self
            .client
            .put(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await
            .expect("Failed to send PUT request");

        TestResponse::from_response(res).await
    }

    pub async fn get_with_token(&self, path: &str, token: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn get_without_token(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    /// Register an account, set its role and team directly in the store, then log in.
    pub async fn create_user(&self, username: &str, role: &str, team_id: Option<i32>) -> String {
        let body = serde_json::json!({
            "username": username,
            "password": PASSWORD,
        });

        let reg = self.post_json_without_token(routes::REGISTER, &body).await;
        assert_eq!(reg.status, 201, "Registration failed: {}", reg.text);

        let db_user = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .expect("DB query failed")
            .expect("User not found after registration");

        let mut active: user::ActiveModel = db_user.into();
        active.role = Set(role.to_string());
        active.team_id = Set(team_id);
        user::Entity::update(active)
            .exec(&self.db)
            .await
            .expect("Failed to update user");

        let res = self.post_json_without_token(routes::LOGIN, &body).await;
        assert_eq!(res.status, 200, "Login failed: {}", res.text);

        res.body["token"]
            .as_str()
            .expect("Login response should contain a token")
            .to_string()
    }

    pub async fn create_admin(&self) -> String {
        self.create_user("commissioner", user::ADMIN_ROLE, None).await
    }

    pub async fn create_season(&self, name: &str, active: bool, start: Option<NaiveDate>) -> i32 {
        season::ActiveModel {
            name: Set(name.to_string()),
            active: Set(active),
            start_date: Set(start),
            end_date: Set(None),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .expect("Failed to insert season")
        .id
    }

    pub async fn create_team(&self, name: &str, tag: &str) -> i32 {
        team::ActiveModel {
            name: Set(name.to_string()),
            tag: Set(tag.to_string()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .expect("Failed to insert team")
        .id
    }

    /// Place a team in a season with the given standing.
    pub async fn place_team(
        &self,
        season_id: i32,
        team_id: i32,
        division_id: i32,
        points: i32,
        flag_diff: i32,
    ) {
        season_team::ActiveModel {
            season_id: Set(season_id),
            team_id: Set(team_id),
            division_id: Set(division_id),
            wins: Set(0),
            losses: Set(0),
            points: Set(points),
            flag_diff: Set(flag_diff),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .expect("Failed to place team");
    }

    /// An active season with two placed teams in different divisions.
    pub async fn seed_league(&self) -> League {
        let season_id = self
            .create_season("Spring", true, NaiveDate::from_ymd_opt(2026, 1, 1))
            .await;
        let defender_id = self.create_team("Defenders", "DEF").await;
        let challenger_id = self.create_team("Challengers", "CHL").await;
        self.place_team(season_id, defender_id, 7, 0, 0).await;
        self.place_team(season_id, challenger_id, 8, 0, 0).await;

        League {
            season_id,
            defender_id,
            challenger_id,
            defender_division: 7,
        }
    }

    /// Insert a scheduled match directly.
    pub async fn create_match(
        &self,
        season_id: i32,
        home: i32,
        away: i32,
        in_hours: i64,
    ) -> i32 {
        league_match::ActiveModel {
            season_id: Set(season_id),
            division_id: Set(1),
            home_team: Set(home),
            away_team: Set(away),
            scheduled_at: Set(Utc::now() + chrono::Duration::hours(in_hours)),
            status: Set(::common::MatchStatus::Scheduled),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .expect("Failed to insert match")
        .id
    }

    /// Create a challenge through the API and return its id from the redirect.
    pub async fn create_challenge(&self, league: &League, token: &str) -> i32 {
        let season_id = league.season_id.to_string();
        let defender_id = league.defender_id.to_string();
        let res = self
            .post_form_with_token(
                routes::CREATE_CHALLENGE,
                &[("seasonId", &season_id), ("defenderTeamId", &defender_id)],
                token,
            )
            .await;
        assert_eq!(res.status, 302, "create_challenge failed: {}", res.text);
        res.redirect_id()
    }

    /// Propose three times through the API.
    pub async fn propose_times(&self, challenge_id: i32, times: [&str; 3], token: &str) -> TestResponse {
        let id = challenge_id.to_string();
        self.post_form_with_token(
            routes::PROPOSE_TIMES,
            &[
                ("challengeId", &id),
                ("t1", times[0]),
                ("t2", times[1]),
                ("t3", times[2]),
            ],
            token,
        )
        .await
    }

    pub async fn pick_time(&self, challenge_id: i32, option_id: i32, token: &str) -> TestResponse {
        let cid = challenge_id.to_string();
        let oid = option_id.to_string();
        self.post_form_with_token(
            routes::PICK_TIME,
            &[("challengeId", &cid), ("timeOptionId", &oid)],
            token,
        )
        .await
    }

    pub async fn challenge(&self, id: i32) -> team_challenge::Model {
        team_challenge::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .expect("DB query failed")
            .expect("Challenge not found")
    }

    /// Time option ids of a challenge in insertion order.
    pub async fn option_ids(&self, challenge_id: i32) -> Vec<i32> {
        let mut ids: Vec<i32> = challenge_time_option::Entity::find()
            .filter(challenge_time_option::Column::ChallengeId.eq(challenge_id))
            .all(&self.db)
            .await
            .expect("DB query failed")
            .into_iter()
            .map(|o| o.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    pub async fn challenge_count(&self) -> u64 {
        team_challenge::Entity::find()
            .count(&self.db)
            .await
            .expect("DB query failed")
    }

    pub async fn option_count(&self) -> u64 {
        challenge_time_option::Entity::find()
            .count(&self.db)
            .await
            .expect("DB query failed")
    }

    pub async fn match_count(&self) -> u64 {
        league_match::Entity::find()
            .count(&self.db)
            .await
            .expect("DB query failed")
    }
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let location = res
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let text = res.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self {
            status,
            location,
            text,
            body,
        }
    }

    /// The challenge id at the end of a `/api/v1/challenges/{id}` redirect.
    pub fn redirect_id(&self) -> i32 {
        self.location
            .as_deref()
            .and_then(|loc| loc.strip_prefix("/api/v1/challenges/"))
            .and_then(|id| id.parse().ok())
            .expect("response should redirect to a challenge")
    }
}
