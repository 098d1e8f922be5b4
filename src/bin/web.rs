//! Single binary web server: JSON API over the field day scoreboard.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT, DATA_DIR, ROSTER_CSV.

use actix_web::{
    get, post, put,
    web::{Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use field_day::config::ServerConfig;
use field_day::persistence;
use field_day::{Game, MatchReport, PlayerId, Roster, Scoreboard, ScoreboardError, Submission};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Shared state: the scoreboard behind one lock (one scorekeeper at a time) and where to save it.
struct AppContext {
    board: RwLock<Scoreboard>,
    data_dir: PathBuf,
}

type AppState = Data<AppContext>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct RegisterPlayerBody {
    name: String,
    number: u32,
}

#[derive(Deserialize)]
struct ExistingScoreBody {
    game: Game,
    player_id: PlayerId,
}

#[derive(Deserialize)]
struct AnswerKeyQuery {
    game: Game,
}

#[derive(Deserialize)]
struct AnswerKeyBody {
    game: Game,
    answers: Vec<String>,
}

#[derive(Deserialize)]
struct MatchResultBody {
    game: Game,
    #[serde(flatten)]
    report: MatchReport,
}

/// Path segment: bracket game id (e.g. /api/tournaments/{game})
#[derive(Deserialize)]
struct GamePath {
    game: String,
}

impl GamePath {
    fn bracket_game(&self) -> Result<Game, HttpResponse> {
        match self.game.parse::<Game>() {
            Ok(game) if game.is_bracket() => Ok(game),
            _ => Err(HttpResponse::BadRequest().json(serde_json::json!({
                "error": format!("Invalid game: {}", self.game),
                "kind": "validation_error",
            }))),
        }
    }
}

fn error_response(e: &ScoreboardError) -> HttpResponse {
    let body = serde_json::json!({
        "error": e.to_string(),
        "kind": e.kind(),
        "doping_error": e.is_doping_error(),
    });
    match e {
        ScoreboardError::Validation(_) | ScoreboardError::IncompleteOrdering => {
            HttpResponse::BadRequest().json(body)
        }
        ScoreboardError::TournamentNotFound(_) | ScoreboardError::MatchNotFound(_) => {
            HttpResponse::NotFound().json(body)
        }
        ScoreboardError::DuplicateExists
        | ScoreboardError::AlreadyExists(_)
        | ScoreboardError::AlreadyCompleted(_)
        | ScoreboardError::RegenerationLocked(_) => HttpResponse::Conflict().json(body),
        ScoreboardError::DopingAlreadyUsed { .. }
        | ScoreboardError::DopingNotAllowed
        | ScoreboardError::InvalidWinner(_) => HttpResponse::UnprocessableEntity().json(body),
    }
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

fn read(state: &AppState) -> Result<RwLockReadGuard<'_, Scoreboard>, HttpResponse> {
    state.board.read().map_err(|_| lock_error())
}

fn write(state: &AppState) -> Result<RwLockWriteGuard<'_, Scoreboard>, HttpResponse> {
    state.board.write().map_err(|_| lock_error())
}

/// Save after a successful mutation. On failure the change stays in memory only, so the
/// client gets a 500 instead of a success it cannot rely on after a restart.
fn persist(state: &AppState, board: &Scoreboard) -> Result<(), HttpResponse> {
    persistence::save(&state.data_dir, board).map_err(|e| {
        log::error!("Failed to save scoreboard: {e}");
        HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Change applied but not saved: {e}"),
            "kind": "persistence_error",
        }))
    })
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "field-day",
    })
}

#[get("/api/players")]
async fn api_players(state: AppState) -> HttpResponse {
    let g = match read(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    HttpResponse::Ok().json(g.roster().players())
}

#[post("/api/players")]
async fn api_register_player(state: AppState, body: Json<RegisterPlayerBody>) -> HttpResponse {
    let mut g = match write(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    match g.register_player(body.name.trim(), body.number) {
        Ok(player) => {
            if let Err(resp) = persist(&state, &g) {
                return resp;
            }
            HttpResponse::Ok().json(player)
        }
        Err(e) => error_response(&e),
    }
}

/// Submit a non-bracket result. A duplicate answers 409 until resubmitted with `overwrite`.
#[post("/api/results")]
async fn api_submit_result(state: AppState, body: Json<Submission>) -> HttpResponse {
    let mut g = match write(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    match g.submit(body.into_inner()) {
        Ok(accepted) => {
            if let Err(resp) = persist(&state, &g) {
                return resp;
            }
            HttpResponse::Ok().json(accepted)
        }
        Err(e) => {
            log::warn!("Rejected result: {e}");
            error_response(&e)
        }
    }
}

#[post("/api/results/exists")]
async fn api_existing_score(state: AppState, body: Json<ExistingScoreBody>) -> HttpResponse {
    let g = match read(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    HttpResponse::Ok().json(serde_json::json!({
        "game": body.game,
        "player_id": body.player_id,
        "exists": g.has_result(body.game, body.player_id),
    }))
}

#[get("/api/answer-keys")]
async fn api_get_answer_key(state: AppState, query: Query<AnswerKeyQuery>) -> HttpResponse {
    let g = match read(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    HttpResponse::Ok().json(serde_json::json!({ "answers": g.answer_key(query.game) }))
}

#[put("/api/answer-keys")]
async fn api_set_answer_key(state: AppState, body: Json<AnswerKeyBody>) -> HttpResponse {
    let mut g = match write(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let AnswerKeyBody { game, answers } = body.into_inner();
    match g.set_answer_key(game, answers) {
        Ok(()) => {
            if let Err(resp) = persist(&state, &g) {
                return resp;
            }
            HttpResponse::Ok().json(serde_json::json!({ "answers": g.answer_key(game) }))
        }
        Err(e) => error_response(&e),
    }
}

#[get("/api/rankings")]
async fn api_rankings(state: AppState) -> HttpResponse {
    let g = match read(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    HttpResponse::Ok().json(g.rankings())
}

#[get("/api/winners")]
async fn api_winners(state: AppState) -> HttpResponse {
    let g = match read(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    HttpResponse::Ok().json(g.jersey_winners())
}

#[get("/api/doping")]
async fn api_doping_usage(state: AppState) -> HttpResponse {
    let g = match read(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    HttpResponse::Ok().json(g.doping_usage())
}

/// Generate the bracket for a game (409 if one exists).
#[post("/api/tournaments/{game}")]
async fn api_generate_tournament(state: AppState, path: Path<GamePath>) -> HttpResponse {
    let game = match path.bracket_game() {
        Ok(game) => game,
        Err(resp) => return resp,
    };
    let mut g = match write(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let result = g.generate_bracket(game).cloned();
    match result {
        Ok(t) => {
            if let Err(resp) = persist(&state, &g) {
                return resp;
            }
            HttpResponse::Ok().json(t)
        }
        Err(e) => error_response(&e),
    }
}

/// Replace the bracket while no match has been played.
#[post("/api/tournaments/{game}/regenerate")]
async fn api_regenerate_tournament(state: AppState, path: Path<GamePath>) -> HttpResponse {
    let game = match path.bracket_game() {
        Ok(game) => game,
        Err(resp) => return resp,
    };
    let mut g = match write(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let result = g.regenerate_bracket(game).cloned();
    match result {
        Ok(t) => {
            if let Err(resp) = persist(&state, &g) {
                return resp;
            }
            HttpResponse::Ok().json(t)
        }
        Err(e) => error_response(&e),
    }
}

#[get("/api/tournaments/{game}")]
async fn api_get_tournament(state: AppState, path: Path<GamePath>) -> HttpResponse {
    let game = match path.bracket_game() {
        Ok(game) => game,
        Err(resp) => return resp,
    };
    let g = match read(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    match g.bracket(game) {
        Some(t) => HttpResponse::Ok().json(t),
        None => error_response(&ScoreboardError::TournamentNotFound(game)),
    }
}

#[get("/api/tournaments/{game}/current")]
async fn api_current_matches(state: AppState, path: Path<GamePath>) -> HttpResponse {
    let game = match path.bracket_game() {
        Ok(game) => game,
        Err(resp) => return resp,
    };
    let g = match read(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    match g.current_matches(game) {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(e) => error_response(&e),
    }
}

#[get("/api/tournaments/{game}/can-regenerate")]
async fn api_can_regenerate(state: AppState, path: Path<GamePath>) -> HttpResponse {
    let game = match path.bracket_game() {
        Ok(game) => game,
        Err(resp) => return resp,
    };
    let g = match read(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let allowed = g.can_regenerate(game);
    let reason = if allowed {
        "No match has been played yet"
    } else {
        "Match results were already recorded"
    };
    HttpResponse::Ok().json(serde_json::json!({ "allowed": allowed, "reason": reason }))
}

#[post("/api/tournaments/matches")]
async fn api_submit_match(state: AppState, body: Json<MatchResultBody>) -> HttpResponse {
    let mut g = match write(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    match g.record_match_result(body.game, &body.report) {
        Ok(outcome) => {
            if let Err(resp) = persist(&state, &g) {
                return resp;
            }
            HttpResponse::Ok().json(outcome)
        }
        Err(e) => {
            log::warn!("Rejected match result: {e}");
            error_response(&e)
        }
    }
}

/// Clear all results, doping usage and brackets. Players are kept.
#[post("/api/admin/clear")]
async fn api_clear_all(state: AppState) -> HttpResponse {
    let mut g = match write(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    g.clear_all();
    if let Err(resp) = persist(&state, &g) {
        return resp;
    }
    HttpResponse::Ok().json(serde_json::json!({ "ok": true }))
}

/// Snapshot from disk, else a fresh scoreboard (optionally with a CSV roster).
fn initial_scoreboard(config: &ServerConfig) -> std::io::Result<Scoreboard> {
    let invalid = |e: String| std::io::Error::new(std::io::ErrorKind::InvalidData, e);
    if let Some(board) = persistence::load(&config.data_dir).map_err(|e| invalid(e.to_string()))? {
        return Ok(board);
    }
    let roster = match &config.roster_csv {
        Some(path) => {
            let file = std::fs::File::open(path)?;
            let roster = Roster::from_csv_reader(file).map_err(|e| invalid(e.to_string()))?;
            log::info!("Imported {} players from {}", roster.len(), path.display());
            roster
        }
        None => Roster::new(),
    };
    Ok(Scoreboard::new(roster))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
    let board = initial_scoreboard(&config)?;
    log::info!(
        "Starting server at http://{}:{} ({} players)",
        config.host,
        config.port,
        board.roster().len()
    );

    let state = Data::new(AppContext {
        board: RwLock::new(board),
        data_dir: config.data_dir.clone(),
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_players)
            .service(api_register_player)
            .service(api_submit_result)
            .service(api_existing_score)
            .service(api_get_answer_key)
            .service(api_set_answer_key)
            .service(api_rankings)
            .service(api_winners)
            .service(api_doping_usage)
            .service(api_submit_match)
            .service(api_generate_tournament)
            .service(api_regenerate_tournament)
            .service(api_get_tournament)
            .service(api_current_matches)
            .service(api_can_regenerate)
            .service(api_clear_all)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
