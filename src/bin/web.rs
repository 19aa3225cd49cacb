//! Single binary web server: JSON API over the tournament store.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, SHUFFLE_SCHEDULE (true/1), SESSION_KEY (64+ bytes).

use actix_session::{storage::CookieSessionStore, Session, SessionMiddleware};
use actix_web::{
    cookie::Key,
    get, post, put,
    web::{Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use court_tournament::{
    read_roster, ErrorKind, Format, FormatId, FormatType, GroupId, Match, MatchError, MatchId,
    MatchStatus, PlayoffFormat, ScheduleOptions, Serve, Side, StageRules, TeamEntry,
    TournamentStore, UserId,
};
use serde::{Deserialize, Serialize};

type AppState = Data<TournamentStore>;

/// Session key holding the caller identity.
const SESSION_USER: &str = "user_id";

/// Settings read from the environment at startup.
#[derive(Clone)]
struct ServerConfig {
    host: String,
    port: u16,
    schedule: ScheduleOptions,
    session_key: Key,
}

impl ServerConfig {
    fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or_else(default_port);
        let shuffle = std::env::var("SHUFFLE_SCHEDULE")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        let session_key = match std::env::var("SESSION_KEY") {
            Ok(k) if k.len() >= 64 => Key::from(k.as_bytes()),
            Ok(_) => {
                log::warn!("SESSION_KEY shorter than 64 bytes, using a random key");
                Key::generate()
            }
            Err(_) => Key::generate(),
        };
        Self {
            host,
            port,
            schedule: ScheduleOptions { shuffle },
            session_key,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct SessionBody {
    user_id: UserId,
}

#[derive(Deserialize)]
struct CreateFormatBody {
    #[serde(default)]
    format_type: FormatType,
    #[serde(default = "default_num_of_groups")]
    num_of_groups: u32,
    group: StageRules,
    /// Defaults to the group rules.
    playoff: Option<StageRules>,
    #[serde(default)]
    playoff_format: PlayoffFormat,
}

fn default_num_of_groups() -> u32 {
    1
}

#[derive(Deserialize)]
struct CreateGroupBody {
    name: String,
    teams: Vec<TeamEntry>,
}

#[derive(Deserialize)]
struct GroupNameQuery {
    name: String,
}

#[derive(Deserialize)]
struct PointBody {
    team: Side,
}

#[derive(Deserialize)]
struct FinalScoreBody {
    team1_score: u32,
    team2_score: u32,
    result: MatchStatus,
}

#[derive(Deserialize)]
struct OutcomeBody {
    result: MatchStatus,
}

#[derive(Serialize)]
struct GroupResponse {
    group: court_tournament::Group,
    matches: Vec<Match>,
}

#[derive(Serialize)]
struct MatchDetails {
    #[serde(rename = "match")]
    game_match: Match,
    team1: court_tournament::Team,
    team2: court_tournament::Team,
    format: Format,
}

#[derive(Serialize)]
struct PointResponse {
    #[serde(rename = "match")]
    game_match: Match,
    outcome: court_tournament::PointOutcome,
}

/// Path segment: format id (e.g. /api/formats/{id})
#[derive(Deserialize)]
struct FormatPath {
    id: FormatId,
}

/// Path segment: group id (e.g. /api/groups/{id}/matches)
#[derive(Deserialize)]
struct GroupPath {
    id: GroupId,
}

/// Path segment: match id (e.g. /api/matches/{id})
#[derive(Deserialize)]
struct MatchPath {
    id: MatchId,
}

/// Map a library error to its HTTP status with a JSON body.
fn error_response(e: MatchError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e.kind() {
        ErrorKind::Validation => HttpResponse::BadRequest().json(body),
        ErrorKind::Precondition => HttpResponse::Conflict().json(body),
        ErrorKind::Authorization => HttpResponse::Forbidden().json(body),
        ErrorKind::NotFound => HttpResponse::NotFound().json(body),
    }
}

/// Identity pinned in the session, or a 401 response.
fn caller(session: &Session) -> Result<UserId, HttpResponse> {
    match session.get::<UserId>(SESSION_USER) {
        Ok(Some(id)) => Ok(id),
        Ok(None) => Err(HttpResponse::Unauthorized().json(serde_json::json!({ "error": "Not signed in" }))),
        Err(e) => {
            log::warn!("Unreadable session: {}", e);
            Err(HttpResponse::Unauthorized().json(serde_json::json!({ "error": "Invalid session" })))
        }
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "court-tournament-web",
    })
}

/// Pin the caller identity for this browser session (identity comes from the auth layer).
#[post("/api/session")]
async fn api_start_session(session: Session, body: Json<SessionBody>) -> HttpResponse {
    match session.insert(SESSION_USER, body.user_id) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "user_id": body.user_id })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() })),
    }
}

#[get("/api/session")]
async fn api_get_session(session: Session) -> HttpResponse {
    match caller(&session) {
        Ok(id) => HttpResponse::Ok().json(serde_json::json!({ "user_id": id })),
        Err(resp) => resp,
    }
}

/// Create a format (scoring rules for a tournament stage).
#[post("/api/formats")]
async fn api_create_format(state: AppState, body: Json<CreateFormatBody>) -> HttpResponse {
    let body = body.into_inner();
    let playoff = body.playoff.unwrap_or(body.group);
    match Format::new(
        body.format_type,
        body.num_of_groups,
        body.group,
        playoff,
        body.playoff_format,
    ) {
        Ok(format) => {
            state.add_format(format.clone());
            HttpResponse::Ok().json(format)
        }
        Err(e) => error_response(e),
    }
}

#[get("/api/formats/{id}")]
async fn api_get_format(state: AppState, path: Path<FormatPath>) -> HttpResponse {
    match state.format(path.id) {
        Ok(format) => HttpResponse::Ok().json(format),
        Err(e) => error_response(e),
    }
}

fn save_group(
    state: &TournamentStore,
    config: &ServerConfig,
    format_id: FormatId,
    name: String,
    teams: Vec<TeamEntry>,
) -> HttpResponse {
    match state.save_group(format_id, name, teams, config.schedule) {
        Ok((group, matches)) => HttpResponse::Ok().json(GroupResponse { group, matches }),
        Err(e) => error_response(e),
    }
}

/// Save a group with its teams; generates the group's round-robin matches.
#[post("/api/formats/{id}/groups")]
async fn api_create_group(
    state: AppState,
    config: Data<ServerConfig>,
    path: Path<FormatPath>,
    body: Json<CreateGroupBody>,
) -> HttpResponse {
    let body = body.into_inner();
    save_group(&state, &config, path.id, body.name, body.teams)
}

/// Same as above, with the teams given as a CSV roster body.
#[post("/api/formats/{id}/groups/csv")]
async fn api_create_group_csv(
    state: AppState,
    config: Data<ServerConfig>,
    path: Path<FormatPath>,
    query: Query<GroupNameQuery>,
    body: String,
) -> HttpResponse {
    match read_roster(body.as_bytes()) {
        Ok(teams) => save_group(&state, &config, path.id, query.into_inner().name, teams),
        Err(e) => error_response(e),
    }
}

/// Group with its matches in schedule order.
#[get("/api/groups/{id}/matches")]
async fn api_group_matches(state: AppState, path: Path<GroupPath>) -> HttpResponse {
    let response = state.group(path.id).and_then(|group| {
        Ok(GroupResponse {
            matches: state.group_matches(group.id)?,
            group,
        })
    });
    match response {
        Ok(r) => HttpResponse::Ok().json(r),
        Err(e) => error_response(e),
    }
}

/// Match with both teams and its format.
#[get("/api/matches/{id}")]
async fn api_get_match(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    let details = state.get_match(path.id).and_then(|game_match| {
        Ok(MatchDetails {
            team1: state.team(game_match.team1_id)?,
            team2: state.team(game_match.team2_id)?,
            format: state.format(game_match.format_id)?,
            game_match,
        })
    });
    match details {
        Ok(d) => HttpResponse::Ok().json(d),
        Err(e) => error_response(e),
    }
}

/// Claim the match as umpire. Returns `false` if someone already did.
#[post("/api/matches/{id}/umpire")]
async fn api_assign_umpire(state: AppState, session: Session, path: Path<MatchPath>) -> HttpResponse {
    let user = match caller(&session) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match state.assign_umpire(path.id, user) {
        Ok(claimed) => HttpResponse::Ok().json(claimed),
        Err(e) => error_response(e),
    }
}

/// Select server and receiver for the next rally.
#[put("/api/matches/{id}/serve")]
async fn api_set_serve(
    state: AppState,
    session: Session,
    path: Path<MatchPath>,
    body: Json<Serve>,
) -> HttpResponse {
    let user = match caller(&session) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match state.set_serve(path.id, user, body.into_inner()) {
        Ok(m) => HttpResponse::Ok().json(m),
        Err(e) => error_response(e),
    }
}

/// Score one point.
#[post("/api/matches/{id}/points")]
async fn api_record_point(
    state: AppState,
    session: Session,
    path: Path<MatchPath>,
    body: Json<PointBody>,
) -> HttpResponse {
    let user = match caller(&session) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match state.record_point(path.id, user, body.team) {
        Ok((game_match, outcome)) => HttpResponse::Ok().json(PointResponse { game_match, outcome }),
        Err(e) => error_response(e),
    }
}

/// Undo the last point of the current game.
#[post("/api/matches/{id}/undo")]
async fn api_undo_point(state: AppState, session: Session, path: Path<MatchPath>) -> HttpResponse {
    let user = match caller(&session) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match state.undo_last_point(path.id, user) {
        Ok(m) => HttpResponse::Ok().json(m),
        Err(e) => error_response(e),
    }
}

/// Enter the final score directly.
#[put("/api/matches/{id}/score")]
async fn api_update_score(
    state: AppState,
    session: Session,
    path: Path<MatchPath>,
    body: Json<FinalScoreBody>,
) -> HttpResponse {
    let user = match caller(&session) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match state.update_final_score(path.id, user, body.team1_score, body.team2_score, body.result) {
        Ok(m) => HttpResponse::Ok().json(m),
        Err(e) => error_response(e),
    }
}

/// Cancel the match or record a retirement/absence.
#[post("/api/matches/{id}/outcome")]
async fn api_declare_outcome(
    state: AppState,
    session: Session,
    path: Path<MatchPath>,
    body: Json<OutcomeBody>,
) -> HttpResponse {
    let user = match caller(&session) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match state.declare_outcome(path.id, user, body.result) {
        Ok(m) => HttpResponse::Ok().json(m),
        Err(e) => error_response(e),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let bind = (config.host.clone(), config.port);
    log::info!(
        "Starting server at http://{}:{} (shuffled schedules: {})",
        bind.0,
        bind.1,
        config.schedule.shuffle
    );

    let state = Data::new(TournamentStore::new());
    let session_key = config.session_key.clone();
    let config = Data::new(config);

    HttpServer::new(move || {
        App::new()
            .wrap(SessionMiddleware::new(
                CookieSessionStore::default(),
                session_key.clone(),
            ))
            .app_data(state.clone())
            .app_data(config.clone())
            .service(api_health)
            .service(api_start_session)
            .service(api_get_session)
            .service(api_create_format)
            .service(api_get_format)
            .service(api_create_group)
            .service(api_create_group_csv)
            .service(api_group_matches)
            .service(api_get_match)
            .service(api_assign_umpire)
            .service(api_set_serve)
            .service(api_record_point)
            .service(api_undo_point)
            .service(api_update_score)
            .service(api_declare_outcome)
    })
    .bind(bind)?
    .run()
    .await
}
