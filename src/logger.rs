use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Inicializa el subscriber global. Nivel: argumento, luego `RUST_LOG`, luego `info`.
pub fn init(level: Option<&str>) {
    let level = level
        .map(|lvl| lvl.to_string())
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_string());

    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(level))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
