// --- Registro de Proyectos Modulares - Archivo principal ---

use registro_modular::{logger, run_server, AppConfig};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("configuración inválida: {}", e);
            std::process::exit(2);
        }
    };
    logger::init(config.log_level.as_deref());

    tracing::info!("=== Registro de Proyectos Modulares (API) ===");
    run_server(config).await
}
