pub mod config;
pub mod domain {
    pub mod report;
    pub mod transaction;
}
pub mod error;
pub mod http {
    pub mod handlers {
        pub mod ops;
        pub mod reports;
    }
}
pub mod repo {
    pub mod transactions_repo;
}
pub mod service {
    pub mod ingest_processor;
    pub mod report_builder;
}
pub mod storage;
pub mod stream;

#[derive(Clone)]
pub struct AppState {
    pub report_builder: service::report_builder::ReportBuilder,
    pub pg_pool: sqlx::PgPool,
    pub redis_client: redis::Client,
}
