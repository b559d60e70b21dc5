use dotenvy::dotenv;
use tour_desk::{
    config::{database, settings},
    context::AppContext,
    core::{aggregate::get_tours_detailed, hotel::list_hotels, seed::seed_catalog},
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, non-fatal
    dotenv().ok();

    // 3. Settings: seed catalog and auth directories
    let settings = settings::load_default_settings()
        .inspect_err(|e| error!("Failed to load settings: {}", e))?;

    // 4. Database
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Seed the shared catalog
    seed_catalog(&db, &settings)
        .await
        .inspect_err(|e| error!("Failed to seed catalog: {}", e))?;

    // 6. Shared context for request handlers
    let ctx = AppContext::new(db, &settings.auth);
    info!(
        "Auth ready: {} users, {} tokens, sessions last {} minutes",
        ctx.credentials.len(),
        ctx.tokens.len(),
        ctx.sessions.ttl().num_minutes()
    );

    let hotels = list_hotels(ctx.database.as_ref()).await?;
    let tours = get_tours_detailed(ctx.database.as_ref()).await?;
    info!("Catalog: {} hotels, {} tours", hotels.len(), tours.len());
    for tour in &tours {
        info!("  Tour {} '{}' costs {}", tour.id, tour.name, tour.total_cost);
    }

    Ok(())
}
