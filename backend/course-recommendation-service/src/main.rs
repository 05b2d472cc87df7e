use actix_cors::Cors;
use actix_middleware::{metrics_handler, CorrelationIdMiddleware, Logging, MetricsMiddleware};
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use course_recommendation_service::config::StoreBackend;
use course_recommendation_service::db::{
    CatalogStore, FirestoreStore, InteractionStore, SnapshotStore,
};
use course_recommendation_service::{
    configure_routes, CatalogService, Config, RecommendationService, SimilarityEngine,
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration loading failed: {:#}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},actix_web=info", config.app.log_level).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_line_number(true)
                .with_file(true)
                .with_target(true),
        )
        .init();

    info!(
        env = %config.app.env,
        backend = ?config.store.backend,
        "Starting course-recommendation-service"
    );

    let (interactions, catalog): (Arc<dyn InteractionStore>, Arc<dyn CatalogStore>) =
        match config.store.backend {
            StoreBackend::Firestore => {
                let store = Arc::new(
                    FirestoreStore::new(&config.firestore, config.collections.clone())
                        .context("Failed to build Firestore client")?,
                );
                info!(
                    project_id = %config.firestore.project_id,
                    emulator = config.firestore.emulator_host.is_some(),
                    "Using Firestore store"
                );
                (store.clone() as Arc<dyn InteractionStore>, store as Arc<dyn CatalogStore>)
            }
            StoreBackend::Snapshot => {
                let path = config
                    .store
                    .snapshot_path
                    .clone()
                    .context("SNAPSHOT_PATH must be set")?;
                let store = Arc::new(
                    SnapshotStore::load(&path)
                        .await
                        .context("Failed to load store snapshot")?,
                );
                (store.clone() as Arc<dyn InteractionStore>, store as Arc<dyn CatalogStore>)
            }
        };

    let recommendations = Arc::new(RecommendationService::new(
        interactions,
        SimilarityEngine::new(&config.recommendation),
    ));
    let catalog = Arc::new(CatalogService::new(catalog));
    let default_num = config.recommendation.default_num_recommendations;

    let bind_addr = format!("{}:{}", config.app.host, config.app.port);
    info!("Starting HTTP server on {}", bind_addr);

    HttpServer::new(move || {
        let recommendations = recommendations.clone();
        let catalog = catalog.clone();
        App::new()
            .wrap(Cors::permissive())
            .wrap(MetricsMiddleware)
            .wrap(Logging)
            .wrap(CorrelationIdMiddleware)
            .route("/metrics", web::get().to(metrics_handler))
            .configure(move |cfg| configure_routes(cfg, recommendations, catalog, default_num))
    })
    .bind(&bind_addr)
    .with_context(|| format!("Failed to bind {}", bind_addr))?
    .run()
    .await?;

    info!("course-recommendation-service stopped");
    Ok(())
}
