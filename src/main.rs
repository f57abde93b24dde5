use axum::routing::get;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use transaction_reports::config::AppConfig;
use transaction_reports::repo::transactions_repo::TransactionsRepo;
use transaction_reports::service::ingest_processor::IngestProcessor;
use transaction_reports::service::report_builder::ReportBuilder;
use transaction_reports::storage::s3::S3ReportStorage;
use transaction_reports::stream::consumer::CdcConsumer;
use transaction_reports::stream::publisher_redis::RedisStatusPublisher;
use transaction_reports::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&cfg.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let redis_client = redis::Client::open(cfg.redis_url.clone())?;

    let store = Arc::new(TransactionsRepo { pool: pool.clone() });
    let publisher = Arc::new(RedisStatusPublisher {
        client: redis_client.clone(),
        stream_key: cfg.status_stream_key.clone(),
    });
    let storage = Arc::new(S3ReportStorage::new(
        &cfg.s3_endpoint,
        &cfg.s3_region,
        &cfg.s3_bucket,
        &cfg.s3_access_key,
        &cfg.s3_secret_key,
    ));

    let consumer = CdcConsumer {
        redis_client: redis_client.clone(),
        stream_key: cfg.cdc_stream_key.clone(),
        group: cfg.cdc_stream_group.clone(),
        consumer_name: cfg.cdc_consumer_name.clone(),
        processor: IngestProcessor {
            store: store.clone(),
            publisher,
        },
    };
    tokio::spawn(async move {
        if let Err(err) = consumer.run().await {
            tracing::error!("cdc consumer stopped: {err:#}");
        }
    });

    let state = AppState {
        report_builder: ReportBuilder { store, storage },
        pg_pool: pool,
        redis_client,
    };

    let app = Router::new()
        .route("/health", get(transaction_reports::http::handlers::reports::health))
        .route(
            "/reports/user",
            get(transaction_reports::http::handlers::reports::get_user_report),
        )
        .route("/ops/readiness", get(transaction_reports::http::handlers::ops::readiness))
        .route("/ops/liveness", get(transaction_reports::http::handlers::ops::liveness))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {}", cfg.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
