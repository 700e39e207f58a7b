use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .merge(auth_routes())
        .merge(challenge_routes())
        .merge(league_routes())
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::register))
        .routes(routes!(handlers::auth::login))
        .routes(routes!(handlers::auth::logout))
        .routes(routes!(handlers::auth::me))
        .routes(routes!(handlers::auth::assign_team))
}

fn challenge_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::challenge::create_challenge))
        .routes(routes!(handlers::challenge::propose_times))
        .routes(routes!(handlers::challenge::pick_time))
        .routes(routes!(handlers::challenge::list_challenges))
        .routes(routes!(handlers::challenge::get_challenge))
}

fn league_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::standings::get_standings))
        .routes(routes!(handlers::league::league_status))
}
