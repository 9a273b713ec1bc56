use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

mod error;
mod jwt;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod validation;

use std::sync::Arc;

use common::database::{DatabaseConfig, init_pool};
use tokio::net::TcpListener;

use crate::jwt::{JwtConfig, JwtService};
use crate::repositories::{
    PgContractsRepository, PgEventsRepository, PgParticipationsRepository, PgRolesRepository,
    PgUsersRepository,
};
use crate::services::{ContractService, EventService, ParticipationService, UserService};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting event manager service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if common::database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database migrations applied");

    // Initialize repositories and domain services
    let users = Arc::new(PgUsersRepository::new(pool.clone()));
    let roles = Arc::new(PgRolesRepository::new(pool.clone()));
    let contracts = Arc::new(PgContractsRepository::new(pool.clone()));
    let events = Arc::new(PgEventsRepository::new(pool.clone()));
    let participations = Arc::new(PgParticipationsRepository::new(pool));

    let user_service = UserService::new(users.clone(), roles);
    let contract_service = ContractService::new(contracts.clone(), users.clone());
    let event_service = EventService::new(events.clone(), users.clone(), contracts);
    let participation_service = ParticipationService::new(participations, events, users);

    // Create the administrator account when credentials are configured
    if let (Ok(email), Ok(password)) = (
        std::env::var("ADMIN_EMAIL"),
        std::env::var("ADMIN_PASSWORD"),
    ) {
        user_service.ensure_admin(&email, &password).await?;
        info!("Administrator account ready");
    }

    let jwt_config = JwtConfig::from_env()?;
    let jwt_service = JwtService::new(jwt_config);

    let app_state = AppState {
        jwt_service,
        user_service,
        contract_service,
        event_service,
        participation_service,
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&addr).await?;
    info!("Event manager service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
