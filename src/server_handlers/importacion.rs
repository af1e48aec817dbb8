use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures_util::stream::StreamExt;
use serde::Deserialize;
use serde_json::json;
use tokio::io::AsyncWriteExt;
use tracing::{error, info};

use crate::error::{ApiError, ApiResult};
use crate::importacion::{calendario_actual, es_calendario_valido};
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct ParamsImportacion {
    /// Por omisión se usa el calendario en curso
    pub calendario: Option<String>,
}

fn resolver_calendario(params: &ParamsImportacion) -> ApiResult<String> {
    match params.calendario.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        Some(c) if es_calendario_valido(c) => Ok(c.to_string()),
        Some(c) => Err(ApiError::Validacion(format!("calendario inválido: {}", c))),
        None => Ok(calendario_actual()),
    }
}

/// GET /importacion
/// Indica qué archivo se importaría y si ya está en su lugar.
pub async fn estado_importacion_handler(state: web::Data<AppState>, query: web::Query<ParamsImportacion>) -> ApiResult<HttpResponse> {
    let calendario = resolver_calendario(&query)?;
    let ruta = state.importador.ruta_archivo(&calendario);
    Ok(HttpResponse::Ok().json(json!({
        "calendario": calendario,
        "ruta": ruta.to_string_lossy(),
        "existe": ruta.is_file(),
    })))
}

/// POST /importacion
/// Ejecuta la importación y responde con el resumen de conteos.
pub async fn importar_handler(state: web::Data<AppState>, query: web::Query<ParamsImportacion>) -> ApiResult<HttpResponse> {
    let calendario = resolver_calendario(&query)?;
    let mut conn = state.conexion()?;
    match state.importador.importar_calendario(&mut conn, &calendario) {
        Ok(resumen) => Ok(HttpResponse::Ok().json(json!({
            "status": "ok",
            "mensaje": resumen.mensaje(),
            "exitosos": resumen.exitosos,
            "fallidos": resumen.fallidos,
            "fallas": resumen.fallas,
        }))),
        Err(e) => {
            error!(calendario = %calendario, error = %e, "importación abortada");
            Err(e.into())
        }
    }
}

/// POST /importacion/archivo
/// Guarda la hoja subida en la ruta que espera la importación del calendario.
pub async fn subir_archivo_handler(
    state: web::Data<AppState>,
    query: web::Query<ParamsImportacion>,
    mut payload: Multipart,
) -> ApiResult<HttpResponse> {
    let calendario = resolver_calendario(&query)?;
    let destino = state.importador.ruta_archivo(&calendario);
    if let Some(dir) = destino.parent() {
        tokio::fs::create_dir_all(dir).await.map_err(|e| ApiError::Interno(format!("no se pudo crear {}: {}", dir.display(), e)))?;
    }

    let mut bytes_escritos = 0usize;
    let mut recibido = false;
    while let Some(field_res) = payload.next().await {
        let mut field = field_res.map_err(|e| ApiError::Validacion(format!("multipart inválido: {}", e)))?;
        if field.content_disposition().get_filename().is_none() {
            continue;
        }

        let mut f = tokio::fs::File::create(&destino)
            .await
            .map_err(|e| ApiError::Interno(format!("no se pudo crear el archivo: {}", e)))?;
        while let Some(chunk) = field.next().await {
            let bytes = chunk.map_err(|e| ApiError::Validacion(format!("error en la carga: {}", e)))?;
            f.write_all(&bytes).await.map_err(|e| ApiError::Interno(format!("error al escribir: {}", e)))?;
            bytes_escritos += bytes.len();
        }
        f.flush().await.map_err(|e| ApiError::Interno(format!("error al escribir: {}", e)))?;
        recibido = true;
        // sólo se admite un archivo por calendario
        break;
    }

    if !recibido {
        return Err(ApiError::Validacion("no se recibió ningún archivo".to_string()));
    }
    info!(ruta = %destino.display(), bytes = bytes_escritos, "archivo de registro recibido");
    Ok(HttpResponse::Ok().json(json!({
        "status": "ok",
        "calendario": calendario,
        "ruta": destino.to_string_lossy(),
        "bytes": bytes_escritos,
    })))
}
