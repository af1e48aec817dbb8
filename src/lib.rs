// Biblioteca raíz del crate `registro_modular`.
// Reexporta los módulos principales: lectura de la hoja de registro,
// importación, persistencia, notificaciones y el servidor HTTP administrativo.
pub mod config;
pub mod error;
pub mod logger;
pub mod excel;
pub mod models;
pub mod db;
pub mod importacion;
pub mod notificaciones;
pub mod server;
pub mod server_handlers;

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;

pub use config::{AppConfig, ImportConfig};
pub use importacion::{Importador, ResumenImportacion};
