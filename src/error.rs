//! Tipos de error del crate.
//!
//! Cada capa devuelve su propio enum; `ApiError` los traduce a respuestas HTTP.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("falta la variable de configuración requerida {0}")]
    Falta(&'static str),

    #[error("valor inválido para {var}: {valor}")]
    Invalida { var: &'static str, valor: String },
}

/// Errores fatales de una corrida de importación. Cualquiera de ellos
/// descarta la transacción completa.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("archivo de registro no encontrado: {}", .0.display())]
    ArchivoNoEncontrado(PathBuf),

    #[error("no se pudo leer la hoja de cálculo: {0}")]
    Excel(#[from] calamine::Error),

    #[error("la hoja de cálculo no contiene hojas ni encabezados")]
    HojaVacia,

    #[error("error de base de datos: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("error de E/S: {0}")]
    Io(#[from] std::io::Error),
}

/// Falla de una sola fila. Nunca aborta el lote.
#[derive(Debug, thiserror::Error)]
pub enum FilaError {
    #[error("sin código de representante")]
    SinRepresentante,

    #[error("sin código de asesor")]
    SinAsesor,

    #[error("error al persistir: {0}")]
    Db(#[from] rusqlite::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum NotificacionError {
    #[error("proyecto {0} no encontrado")]
    ProyectoNoEncontrado(String),

    #[error("el proyecto {0} no tiene correos de destinatarios")]
    SinDestinatarios(String),

    #[error("el envío de correo no está configurado (SMTP_HOST)")]
    NoConfigurado,

    #[error("dirección de correo inválida: {0}")]
    Direccion(#[from] lettre::address::AddressError),

    #[error("no se pudo construir el mensaje: {0}")]
    Construccion(String),

    #[error("el servidor de correo rechazó el envío: {0}")]
    Transporte(String),

    #[error("error de base de datos: {0}")]
    Db(#[from] rusqlite::Error),
}

impl From<lettre::transport::smtp::Error> for NotificacionError {
    fn from(e: lettre::transport::smtp::Error) -> Self {
        NotificacionError::Transporte(e.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0} no encontrado")]
    NoEncontrado(String),

    #[error("{0}")]
    Validacion(String),

    #[error(transparent)]
    Importacion(#[from] ImportError),

    #[error(transparent)]
    Notificacion(#[from] NotificacionError),

    #[error("error de base de datos: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("error interno: {0}")]
    Interno(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NoEncontrado(_) => StatusCode::NOT_FOUND,
            ApiError::Validacion(_) => StatusCode::BAD_REQUEST,
            ApiError::Importacion(e) => match e {
                ImportError::ArchivoNoEncontrado(_) => StatusCode::NOT_FOUND,
                ImportError::Excel(_) | ImportError::HojaVacia => StatusCode::UNPROCESSABLE_ENTITY,
                ImportError::Db(_) | ImportError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Notificacion(e) => match e {
                NotificacionError::ProyectoNoEncontrado(_) => StatusCode::NOT_FOUND,
                NotificacionError::SinDestinatarios(_) | NotificacionError::Direccion(_) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                NotificacionError::NoConfigurado => StatusCode::SERVICE_UNAVAILABLE,
                NotificacionError::Transporte(_) => StatusCode::BAD_GATEWAY,
                NotificacionError::Construccion(_) | NotificacionError::Db(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::Db(_) | ApiError::Interno(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({"status": "error", "error": self.to_string()}))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_por_tipo() {
        let e = ApiError::from(ImportError::ArchivoNoEncontrado(PathBuf::from("/x.xlsx")));
        assert_eq!(e.status_code(), StatusCode::NOT_FOUND);
        assert!(e.to_string().contains("/x.xlsx"));

        let e = ApiError::from(NotificacionError::SinDestinatarios("1-2025A".into()));
        assert_eq!(e.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(ApiError::Validacion("x".into()).status_code(), StatusCode::BAD_REQUEST);
    }
}
