use actix_web::{web, HttpResponse};

use crate::db::{self, FiltroEvaluaciones, NuevaEvaluacion};
use crate::error::{ApiError, ApiResult};
use crate::server::AppState;

/// POST /proyectos/{folio}/evaluaciones
/// Agrega una revisión al historial. La fecha la pone el servidor.
pub async fn registrar_evaluacion_handler(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<NuevaEvaluacion>,
) -> ApiResult<HttpResponse> {
    let folio = path.into_inner();
    let conn = state.conexion()?;
    if db::obtener_proyecto(&conn, &folio)?.is_none() {
        return Err(ApiError::NoEncontrado(format!("proyecto {}", folio)));
    }
    if let Some(e) = body.evaluador.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
        if db::obtener_evaluador(&conn, e)?.is_none() {
            return Err(ApiError::Validacion(format!("evaluador {} no existe", e)));
        }
    }
    let evaluacion = db::registrar_evaluacion(&conn, &folio, &body)?;
    Ok(HttpResponse::Created().json(evaluacion))
}

/// GET /evaluaciones?proyecto=&evaluador=&tipo=&resolutivo=
/// Historial completo, de la más reciente a la más antigua.
pub async fn listar_evaluaciones_handler(state: web::Data<AppState>, query: web::Query<FiltroEvaluaciones>) -> ApiResult<HttpResponse> {
    let conn = state.conexion()?;
    Ok(HttpResponse::Ok().json(db::listar_evaluaciones(&conn, &query)?))
}
