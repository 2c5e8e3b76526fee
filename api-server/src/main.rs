use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use maze_app::{apply_move, generate_maze, generation_events, replay_moves, MazeConfig, MazeSnapshot};
use maze_core::{BlockReason, Direction, MoveOutcome, Position, ReplaySummary, StepEvent};
use serde::{Deserialize, Serialize};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

// Request/Response types

#[derive(Debug, Deserialize)]
struct GenerateMazeRequest {
    seed: u32,
    rows: Option<usize>,
    cols: Option<usize>,
    /// Canvas side in pixels for the returned layout (default 1000)
    canvas_size: Option<f64>,
    /// Also return every generation step, for animating the carving
    #[serde(default)]
    include_events: bool,
}

#[derive(Debug, Serialize)]
struct GenerateMazeResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    maze: Option<MazeSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    events: Option<Vec<StepEvent>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MoveRequest {
    seed: u32,
    rows: Option<usize>,
    cols: Option<usize>,
    position: Position,
    direction: Direction,
}

#[derive(Debug, Serialize, Default)]
struct MoveResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    moved: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    blocked_by: Option<BlockReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VerifyPathRequest {
    seed: u32,
    rows: Option<usize>,
    cols: Option<usize>,
    moves: Vec<u8>,
}

#[derive(Debug, Serialize)]
struct VerifyPathResponse {
    success: bool,
    #[serde(flatten)]
    replay: Option<ReplaySummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Maze size from optional request fields, defaulting to 20x20
fn maze_config(rows: Option<usize>, cols: Option<usize>) -> MazeConfig {
    let defaults = MazeConfig::default();
    MazeConfig::new(rows.unwrap_or(defaults.rows), cols.unwrap_or(defaults.cols))
}

// API Handlers

/// POST /api/generate-maze
/// Generate a maze from a seed, optionally with its generation steps
async fn generate(req: web::Json<GenerateMazeRequest>) -> impl Responder {
    tracing::info!("Received generate-maze request for seed: {}", req.seed);
    let mut config = maze_config(req.rows, req.cols);
    if let Some(canvas_size) = req.canvas_size {
        config.canvas_size = canvas_size;
    }

    let result = generate_maze(req.seed, &config).and_then(|maze| {
        let events = if req.include_events {
            Some(generation_events(req.seed, &config)?)
        } else {
            None
        };
        Ok((maze, events))
    });

    match result {
        Ok((maze, events)) => HttpResponse::Ok().json(GenerateMazeResponse {
            success: true,
            maze: Some(maze),
            events,
            error: None,
        }),
        Err(e) => {
            tracing::warn!("Rejected generate-maze request: {}", e);
            HttpResponse::BadRequest().json(GenerateMazeResponse {
                success: false,
                maze: None,
                events: None,
                error: Some(e.to_string()),
            })
        }
    }
}

/// POST /api/move
/// Apply one move; a blocked move succeeds with the position unchanged
async fn move_player(req: web::Json<MoveRequest>) -> impl Responder {
    tracing::debug!(
        "Received move request for seed {}: {} from {}",
        req.seed,
        req.direction,
        req.position
    );
    let config = maze_config(req.rows, req.cols);

    match apply_move(req.seed, &config, req.position, req.direction) {
        Ok(outcome) => {
            let blocked_by = match outcome {
                MoveOutcome::Moved(_) => None,
                MoveOutcome::Blocked { reason, .. } => Some(reason),
            };
            HttpResponse::Ok().json(MoveResponse {
                success: true,
                position: Some(outcome.position()),
                moved: Some(outcome.is_moved()),
                blocked_by,
                error: None,
            })
        }
        Err(e) => {
            tracing::warn!("Rejected move request: {}", e);
            HttpResponse::BadRequest().json(MoveResponse {
                error: Some(e.to_string()),
                ..MoveResponse::default()
            })
        }
    }
}

/// POST /api/verify-path
/// Replay a list of moves from (0, 0) and report whether it reaches the goal
async fn verify_path(req: web::Json<VerifyPathRequest>) -> impl Responder {
    tracing::info!(
        "Received verify-path request for maze seed: {}, moves: {}",
        req.seed,
        req.moves.len()
    );
    let config = maze_config(req.rows, req.cols);

    match replay_moves(req.seed, &config, &req.moves) {
        Ok(summary) => HttpResponse::Ok().json(VerifyPathResponse {
            success: true,
            replay: Some(summary),
            error: None,
        }),
        Err(e) => {
            tracing::warn!("Rejected verify-path request: {}", e);
            HttpResponse::BadRequest().json(VerifyPathResponse {
                success: false,
                replay: None,
                error: Some(e.to_string()),
            })
        }
    }
}

/// GET /health
/// Health check endpoint
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "maze-api"
    }))
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/api/generate-maze", web::post().to(generate))
        .route("/api/move", web::post().to(move_player))
        .route("/api/verify-path", web::post().to(verify_path));
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting Maze API Server");

    let bind_address = std::env::var("MAZE_API_BIND").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string());
    tracing::info!("Binding to {}", bind_address);

    HttpServer::new(|| {
        App::new()
            .wrap(Cors::permissive())
            .app_data(web::JsonConfig::default().limit(1_048_576)) // 1MB limit
            .configure(routes)
    })
    .bind(bind_address)?
    .run()
    .await
}
