//! Single binary web server: REST/JSON API over one persisted tournament.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080), DATA_DIR (e.g. data).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use round_robin_tournament::{
    BracketStage, FileBlobStore, KnockoutResults, StandingsRow, Tournament, TournamentError,
    TournamentStore,
};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// In-memory state: the single tournament, saved to DATA_DIR after every change.
type AppState = Data<RwLock<TournamentStore<FileBlobStore>>>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Everything the client renders: stored state plus derived reads.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TournamentView<'a> {
    #[serde(flatten)]
    tournament: &'a Tournament,
    standings: Vec<StandingsRow>,
    bracket_stage: BracketStage,
    knockout_results: Option<KnockoutResults>,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetScoreBody {
    score_a: i64,
    score_b: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SampleScoresBody {
    #[serde(default = "default_sample_max_round")]
    max_round: u32,
}

/// Rounds 1-7 (0-based 0..=6).
fn default_sample_max_round() -> u32 {
    6
}

/// Path segment: player id (e.g. /api/players/{id})
#[derive(Deserialize)]
struct PlayerPath {
    id: String,
}

/// Path segment: match id (e.g. /api/matches/{id}/score)
#[derive(Deserialize)]
struct MatchPath {
    id: String,
}

fn view(store: &TournamentStore<FileBlobStore>) -> HttpResponse {
    HttpResponse::Ok().json(TournamentView {
        tournament: store.tournament(),
        standings: store.standings(),
        bracket_stage: store.bracket_stage(),
        knockout_results: store.knockout_results(),
    })
}

/// Run `op` against the store under the write lock and answer with the new view.
fn mutate<F>(state: &AppState, op: F) -> HttpResponse
where
    F: FnOnce(&mut TournamentStore<FileBlobStore>) -> Result<(), TournamentError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match op(&mut *g) {
        Ok(()) => view(&g),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "round-robin-tournament",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Current tournament with standings, bracket stage and podium.
#[get("/api/tournament")]
async fn api_get_tournament(state: AppState) -> HttpResponse {
    match state.read() {
        Ok(g) => view(&g),
        Err(_) => HttpResponse::InternalServerError().body("lock error"),
    }
}

/// Add a player (discards an existing schedule).
#[post("/api/players")]
async fn api_add_player(state: AppState, body: Json<AddPlayerBody>) -> HttpResponse {
    mutate(&state, |s| s.add_player(&body.name))
}

/// Remove a player by id (clears matches and knockout).
#[delete("/api/players/{id}")]
async fn api_remove_player(state: AppState, path: Path<PlayerPath>) -> HttpResponse {
    mutate(&state, |s| s.remove_player(&path.id))
}

/// Shuffle roster order before generating the schedule.
#[post("/api/players/shuffle")]
async fn api_shuffle_players(state: AppState) -> HttpResponse {
    mutate(&state, |s| {
        s.shuffle_players();
        Ok(())
    })
}

/// Replace the roster with the sample players.
#[post("/api/players/sample")]
async fn api_load_sample_players(state: AppState) -> HttpResponse {
    mutate(&state, |s| {
        s.load_sample_players();
        Ok(())
    })
}

/// Generate the group stage schedule.
#[post("/api/tournament/start")]
async fn api_start_tournament(state: AppState) -> HttpResponse {
    mutate(&state, |s| s.start_tournament())
}

/// Drop all matches and the knockout draw, keep the roster.
#[post("/api/tournament/reset")]
async fn api_reset_tournament(state: AppState) -> HttpResponse {
    mutate(&state, |s| {
        s.reset_tournament();
        Ok(())
    })
}

/// Set or edit a match score (group, golden goal or knockout).
#[put("/api/matches/{id}/score")]
async fn api_set_match_score(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<SetScoreBody>,
) -> HttpResponse {
    mutate(&state, |s| s.set_match_score(&path.id, body.score_a, body.score_b))
}

/// Fill group rounds with sample scores (testing aid).
#[post("/api/matches/sample-scores")]
async fn api_fill_sample_scores(state: AppState, body: Option<Json<SampleScoresBody>>) -> HttpResponse {
    let max_round = body
        .as_ref()
        .map(|b| b.max_round)
        .unwrap_or_else(default_sample_max_round);
    mutate(&state, |s| {
        s.fill_sample_scores(max_round);
        Ok(())
    })
}

/// Create golden goal deciders for tied players.
#[post("/api/golden-goals")]
async fn api_add_golden_goals(state: AppState) -> HttpResponse {
    mutate(&state, |s| s.add_golden_goal_matches_for_ties())
}

/// Draw the top five and create the play-in.
#[post("/api/knockout/start")]
async fn api_start_knockout(state: AppState) -> HttpResponse {
    mutate(&state, |s| s.start_knockout_stage())
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_data_dir() -> String {
    "data".to_string()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| default_data_dir());
    let bind = (host.as_str(), port);
    log::info!("Storing tournament in {}", data_dir);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(TournamentStore::load(FileBlobStore::new(data_dir))));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(favicon)
            .service(api_get_tournament)
            .service(api_shuffle_players)
            .service(api_load_sample_players)
            .service(api_add_player)
            .service(api_remove_player)
            .service(api_start_tournament)
            .service(api_reset_tournament)
            .service(api_fill_sample_scores)
            .service(api_set_match_score)
            .service(api_add_golden_goals)
            .service(api_start_knockout)
    })
    .bind(bind)?
    .run()
    .await
}
