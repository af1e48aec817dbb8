//! Configuración explícita de la aplicación.
//!
//! Se construye una sola vez al arrancar (leyendo el entorno, con `.env` si
//! existe) y se pasa a quien la necesite. El flujo de importación nunca lee
//! variables de entorno por su cuenta.

use crate::error::ConfigError;
use std::path::{Path, PathBuf};

/// Token sustituido por el calendario en la plantilla del nombre de archivo
pub const TOKEN_CALENDARIO: &str = "{calendario}";

const DEFAULT_DB_PATH: &str = "data/registro.db";
const DEFAULT_BIND: &str = "127.0.0.1:8080";
const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_FROM_ADDRESS: &str = "noreply@proyectos-modulares.local";

/// Rutas del archivo de registro. Ambas son obligatorias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    pub base_path: PathBuf,
    pub plantilla_archivo: String,
}

impl ImportConfig {
    pub fn new(base_path: impl Into<PathBuf>, plantilla_archivo: impl Into<String>) -> Self {
        Self { base_path: base_path.into(), plantilla_archivo: plantilla_archivo.into() }
    }

    /// Nombre de archivo con el calendario insertado
    pub fn nombre_archivo(&self, calendario: &str) -> String {
        self.plantilla_archivo.replace(TOKEN_CALENDARIO, calendario)
    }

    /// Directorio `{base}/{calendario}/1-Procesados`
    pub fn directorio_procesados(&self, calendario: &str) -> PathBuf {
        self.base_path.join(calendario).join("1-Procesados")
    }

    /// Ruta completa esperada del archivo de registro para un calendario
    pub fn ruta_archivo(&self, calendario: &str) -> PathBuf {
        self.directorio_procesados(calendario).join(self.nombre_archivo(calendario))
    }
}

/// Parámetros SMTP. `None` en `AppConfig` significa que no hay envío de correo.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub from_address: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub importacion: ImportConfig,
    pub db_path: PathBuf,
    pub bind: String,
    pub log_level: Option<String>,
    pub email: Option<EmailConfig>,
}

impl AppConfig {
    /// Lee la configuración del entorno del proceso (cargando `.env` si existe)
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenv::dotenv();
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Construye la configuración a partir de una función de búsqueda. Permite
    /// inyectar valores en pruebas sin tocar el entorno global.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| lookup(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let base_path = get("REGISTRO_BASE_PATH").ok_or(ConfigError::Falta("REGISTRO_BASE_PATH"))?;
        let plantilla = get("REGISTRO_PLANTILLA_ARCHIVO").ok_or(ConfigError::Falta("REGISTRO_PLANTILLA_ARCHIVO"))?;

        let email = match get("SMTP_HOST") {
            Some(smtp_host) => {
                let smtp_port = match get("SMTP_PORT") {
                    Some(p) => p.parse().map_err(|_| ConfigError::Invalida { var: "SMTP_PORT", valor: p })?,
                    None => DEFAULT_SMTP_PORT,
                };
                Some(EmailConfig {
                    smtp_host,
                    smtp_port,
                    from_address: get("SMTP_FROM").unwrap_or_else(|| DEFAULT_FROM_ADDRESS.to_string()),
                    smtp_user: get("SMTP_USER"),
                    smtp_password: get("SMTP_PASSWORD"),
                })
            }
            None => None,
        };

        Ok(Self {
            importacion: ImportConfig::new(base_path, plantilla),
            db_path: get("REGISTRO_DB_PATH").map(PathBuf::from).unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH)),
            bind: get("REGISTRO_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string()),
            log_level: get("REGISTRO_LOG_LEVEL"),
            email,
        })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}
