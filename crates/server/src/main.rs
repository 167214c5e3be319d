// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;

#[cfg(test)]
mod tests;

use axum::{
    Router,
    routing::{get, post},
};
use clap::{Parser, ValueEnum};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use reelbase_api::{MovieDeletePolicy, ServiceConfig};
use reelbase_domain::PaginationPolicy;
use reelbase_persistence::Persistence;

/// Reelbase Server - REST API for a catalogue of movies, actors and genres
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// `MySQL`/`MariaDB` connection URL. Takes precedence over `--database`.
    #[cfg(feature = "mysql")]
    #[arg(long)]
    mysql_url: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: IpAddr,

    /// Page size used when a list request gives `page` but no `size`
    #[arg(long, default_value_t = 20)]
    default_page_size: i64,

    /// Largest page size a client may request
    #[arg(long, default_value_t = 100)]
    max_page_size: i64,

    /// What deleting a movie with genres or actors does
    #[arg(long, value_enum, default_value_t = DeletePolicyArg::ClearRelationships)]
    movie_delete_policy: DeletePolicyArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DeletePolicyArg {
    /// Clear the movie's relationships and delete it; `force` is ignored
    ClearRelationships,
    /// Refuse unless `force=true` is given
    RequireForce,
}

impl From<DeletePolicyArg> for MovieDeletePolicy {
    fn from(arg: DeletePolicyArg) -> Self {
        match arg {
            DeletePolicyArg::ClearRelationships => Self::ClearRelationships,
            DeletePolicyArg::RequireForce => Self::RequireForce,
        }
    }
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
    config: ServiceConfig,
}

impl AppState {
    fn new(persistence: Persistence, config: ServiceConfig) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            config,
        }
    }
}

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/actors", post(handlers::create_actor).get(handlers::list_actors))
        .route("/actors/search", get(handlers::search_actors))
        .route(
            "/actors/{id}",
            get(handlers::get_actor)
                .patch(handlers::update_actor)
                .delete(handlers::delete_actor),
        )
        .route("/genres", post(handlers::create_genre).get(handlers::list_genres))
        .route(
            "/genres/{id}",
            get(handlers::get_genre)
                .patch(handlers::update_genre)
                .delete(handlers::delete_genre),
        )
        .route("/movies", post(handlers::create_movie).get(handlers::list_movies))
        .route("/movies/search", get(handlers::search_movies))
        .route(
            "/movies/{id}",
            get(handlers::get_movie)
                .patch(handlers::update_movie)
                .delete(handlers::delete_movie),
        )
        .route("/movies/{id}/actors", get(handlers::list_movie_actors))
        .with_state(app_state)
}

fn open_persistence(args: &Args) -> Result<Persistence, Box<dyn std::error::Error>> {
    #[cfg(feature = "mysql")]
    if let Some(url) = &args.mysql_url {
        info!("Using MySQL/MariaDB database");
        return Ok(Persistence::new_with_mysql(url)?);
    }

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };
    Ok(persistence)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Reelbase Server");

    let pagination: PaginationPolicy =
        PaginationPolicy::new(args.default_page_size, args.max_page_size)?;
    let config: ServiceConfig =
        ServiceConfig::new(pagination, MovieDeletePolicy::from(args.movie_delete_policy));
    info!(?config, "Service configuration");

    let persistence: Persistence = open_persistence(&args)?;
    info!(backend = persistence.backend_name(), "Database ready");

    let app: Router = build_router(AppState::new(persistence, config));

    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
