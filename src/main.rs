use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nebulohub::infrastructure::AppState;
use nebulohub::services::AnalyzeStartupRequest;
use nebulohub::{config, db, seed};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nebulohub=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize database (migrations + schema check)
    let db = db::init_db(&config.database_url)
        .await
        .expect("Failed to initialize database");

    if config.seed_demo {
        tracing::info!("Seeding demo data...");
        if let Err(e) = seed::seed_demo_data(&db).await {
            tracing::error!("Failed to seed data: {}", e);
        }
    }

    let state = AppState::new(db, &config.analysis_procedure).expect("Invalid configuration");

    // `--analyze <CNPJ>` runs the store-side analysis and prints its text
    let args: Vec<String> = std::env::args().collect();
    if let Some(pos) = args.iter().position(|arg| arg == "--analyze") {
        let Some(cnpj) = args.get(pos + 1) else {
            tracing::error!("--analyze needs a CNPJ");
            std::process::exit(2);
        };

        let request = AnalyzeStartupRequest { cnpj: cnpj.clone() };
        match state.analysis().analyze(request).await {
            Ok(response) => println!("{}", response.result),
            Err(e) => {
                tracing::error!("Analysis failed: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    match state.usuarios().get_all_paged(1, u64::MAX).await {
        Ok(usuarios) => tracing::info!(
            "Store ready at {} ({} usuarios)",
            config.database_url,
            usuarios.len()
        ),
        Err(e) => tracing::error!("Store check failed: {}", e),
    }
}
