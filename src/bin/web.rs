//! Single binary web server: operator UI from templates/, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable on the venue LAN.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    get, post, put,
    web::{self, Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use capoeira_jogos::{
    advancement_preview, break_tie, close_round, current_totals, export, record_score, roster,
    Apelido, Category, CategoryConfig, CategoryId, PairingId, ScoreField,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::RwLock;

/// In-memory session: all categories of the event, keyed by name.
type AppState = Data<RwLock<BTreeMap<CategoryId, Category>>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct RosterBody {
    /// Directory holding one roster CSV per category.
    dir: String,
}

#[derive(Deserialize)]
struct ScoreBody {
    pairing_id: PairingId,
    /// Referee table position (0-2).
    referee: usize,
    field: ScoreField,
    value: String,
}

#[derive(Deserialize)]
struct CloseRoundBody {
    advance_count: usize,
}

#[derive(Deserialize)]
struct TieBreakBody {
    apelido: String,
}

#[derive(Deserialize)]
struct AdvanceQuery {
    advance_count: usize,
}

#[derive(Deserialize)]
struct ExportBody {
    path: String,
    /// Retry target when `path` is locked; defaults to a sibling file.
    fallback: Option<String>,
}

/// Path segment: category name (e.g. /api/categories/{name})
#[derive(Deserialize)]
struct CategoryPath {
    name: String,
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "capoeira-jogos",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Load a roster directory (one CSV per category). The session is replaced
/// only when every file parses; a bad file leaves it untouched.
#[post("/api/roster")]
async fn api_load_roster(state: AppState, body: Json<RosterBody>) -> HttpResponse {
    let config = CategoryConfig::default();
    let categories = match roster::load_dir(std::path::Path::new(&body.dir), &config) {
        Ok(categories) => categories,
        Err(e) => {
            return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
        }
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.clear();
    for category in categories {
        g.insert(category.id.clone(), category);
    }
    log::info!("Loaded {} categories from {}", g.len(), body.dir);
    HttpResponse::Ok().json(g.values().collect::<Vec<_>>())
}

/// All categories of the session.
#[get("/api/categories")]
async fn api_list_categories(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(g.values().collect::<Vec<_>>())
}

/// One category by name (404 if not found).
#[get("/api/categories/{name}")]
async fn api_get_category(state: AppState, path: Path<CategoryPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get(&CategoryId::new(path.name.as_str())) {
        Some(category) => HttpResponse::Ok().json(category),
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No category" })),
    }
}

/// Edit one referee field of one pairing (round open or closing).
#[put("/api/categories/{name}/scores")]
async fn api_record_score(
    state: AppState,
    path: Path<CategoryPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let category = match g.get_mut(&CategoryId::new(path.name.as_str())) {
        Some(category) => category,
        None => {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "No category" }))
        }
    };
    let body = body.into_inner();
    match record_score(category, body.pairing_id, body.referee, body.field, body.value) {
        Ok(()) => HttpResponse::Ok().json(category),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Derived totals of the current round.
#[get("/api/categories/{name}/totals")]
async fn api_round_totals(state: AppState, path: Path<CategoryPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let category = match g.get(&CategoryId::new(path.name.as_str())) {
        Some(category) => category,
        None => {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "No category" }))
        }
    };
    match current_totals(category) {
        Ok(totals) => HttpResponse::Ok().json(totals),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Running standings over all closed rounds.
#[get("/api/categories/{name}/standings")]
async fn api_standings(state: AppState, path: Path<CategoryPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get(&CategoryId::new(path.name.as_str())) {
        Some(category) => HttpResponse::Ok().json(category.standings()),
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No category" })),
    }
}

/// Preview the advancement decision at ?advance_count=n without closing.
#[get("/api/categories/{name}/advancement")]
async fn api_advancement(
    state: AppState,
    path: Path<CategoryPath>,
    query: Query<AdvanceQuery>,
) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let category = match g.get(&CategoryId::new(path.name.as_str())) {
        Some(category) => category,
        None => {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "No category" }))
        }
    };
    match advancement_preview(category, query.advance_count) {
        Ok(decision) => HttpResponse::Ok().json(decision),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Close the current round; a boundary tie comes back as a 400 with the
/// tie-break instruction and parks the category in RoundClosing.
#[post("/api/categories/{name}/close-round")]
async fn api_close_round(
    state: AppState,
    path: Path<CategoryPath>,
    body: Json<CloseRoundBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let category = match g.get_mut(&CategoryId::new(path.name.as_str())) {
        Some(category) => category,
        None => {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "No category" }))
        }
    };
    match close_round(category, body.advance_count) {
        Ok(()) => {
            log::info!(
                "Category '{}': round closed, {} advancing",
                path.name,
                body.advance_count
            );
            HttpResponse::Ok().json(category)
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Resolve a one-slot tie by naming the advancing player.
#[post("/api/categories/{name}/tie-break")]
async fn api_break_tie(
    state: AppState,
    path: Path<CategoryPath>,
    body: Json<TieBreakBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let category = match g.get_mut(&CategoryId::new(path.name.as_str())) {
        Some(category) => category,
        None => {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "No category" }))
        }
    };
    let apelido = Apelido::new(body.apelido.as_str());
    match break_tie(category, &apelido) {
        Ok(()) => {
            log::info!("Category '{}': tie broken for {}", path.name, apelido);
            HttpResponse::Ok().json(category)
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Export the results workbook, falling back next to the target when the
/// file is locked (open in Excel).
#[post("/api/export")]
async fn api_export_results(state: AppState, body: Json<ExportBody>) -> HttpResponse {
    let categories: Vec<Category> = {
        let g = match state.read() {
            Ok(guard) => guard,
            Err(_) => return HttpResponse::InternalServerError().body("lock error"),
        };
        g.values().cloned().collect()
    };

    let primary = std::path::PathBuf::from(&body.path);
    let fallback = body
        .fallback
        .as_ref()
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| export::default_fallback(&primary));

    match export::export_with_fallback(&primary, &fallback, &categories) {
        Ok(saved) => {
            if saved == primary {
                log::info!("Results saved to {}", saved.display());
            } else {
                log::warn!(
                    "{} was locked, results saved to {}",
                    primary.display(),
                    saved.display()
                );
            }
            HttpResponse::Ok().json(serde_json::json!({ "saved": saved.display().to_string() }))
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Export pairing sheets of the current round for printing.
#[post("/api/export/pairings")]
async fn api_export_pairings(state: AppState, body: Json<ExportBody>) -> HttpResponse {
    let categories: Vec<Category> = {
        let g = match state.read() {
            Ok(guard) => guard,
            Err(_) => return HttpResponse::InternalServerError().body("lock error"),
        };
        g.values().cloned().collect()
    };

    let path = std::path::PathBuf::from(&body.path);
    match export::write_pairing_sheets(&path, &categories) {
        Ok(()) => {
            log::info!("Pairing sheets saved to {}", path.display());
            HttpResponse::Ok().json(serde_json::json!({ "saved": path.display().to_string() }))
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(BTreeMap::<CategoryId, Category>::new()));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_load_roster)
            .service(api_list_categories)
            .service(api_get_category)
            .service(api_record_score)
            .service(api_round_totals)
            .service(api_standings)
            .service(api_advancement)
            .service(api_close_round)
            .service(api_break_tie)
            .service(api_export_results)
            .service(api_export_pairings)
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
