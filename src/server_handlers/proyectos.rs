use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::db::{self, CambiosProyecto, FiltroProyectos, NuevaProrroga};
use crate::error::{ApiError, ApiResult, NotificacionError};
use crate::models::Participacion;
use crate::notificaciones::{preparar_notificacion, Mailer};
use crate::server::AppState;

fn proyecto_no_encontrado(folio: &str) -> ApiError {
    ApiError::NoEncontrado(format!("proyecto {}", folio))
}

/// GET /proyectos?calendario=&modalidad=&dictamen=&asesor=&evaluador=&q=
pub async fn listar_proyectos_handler(state: web::Data<AppState>, query: web::Query<FiltroProyectos>) -> ApiResult<HttpResponse> {
    let conn = state.conexion()?;
    let proyectos = db::listar_proyectos(&conn, &query)?;
    Ok(HttpResponse::Ok().json(proyectos))
}

/// GET /proyectos/{folio}
pub async fn detalle_proyecto_handler(state: web::Data<AppState>, path: web::Path<String>) -> ApiResult<HttpResponse> {
    let folio = path.into_inner();
    let conn = state.conexion()?;
    let detalle = db::detalle_proyecto(&conn, &folio)?.ok_or_else(|| proyecto_no_encontrado(&folio))?;
    Ok(HttpResponse::Ok().json(detalle))
}

/// PUT /proyectos/{folio}
/// El folio no se puede cambiar; asesor y evaluador deben existir.
pub async fn actualizar_proyecto_handler(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<CambiosProyecto>,
) -> ApiResult<HttpResponse> {
    let folio = path.into_inner();
    let cambios = body.into_inner();
    let conn = state.conexion()?;

    if let Some(a) = cambios.asesor.as_deref().map(str::trim).filter(|a| !a.is_empty()) {
        if db::obtener_asesor(&conn, a)?.is_none() {
            return Err(ApiError::Validacion(format!("asesor {} no existe", a)));
        }
    }
    if let Some(e) = cambios.evaluador.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
        if db::obtener_evaluador(&conn, e)?.is_none() {
            return Err(ApiError::Validacion(format!("evaluador {} no existe", e)));
        }
    }

    let proyecto = db::actualizar_proyecto(&conn, &folio, &cambios)?.ok_or_else(|| proyecto_no_encontrado(&folio))?;
    Ok(HttpResponse::Ok().json(proyecto))
}

/// DELETE /proyectos/{folio}
pub async fn eliminar_proyecto_handler(state: web::Data<AppState>, path: web::Path<String>) -> ApiResult<HttpResponse> {
    let folio = path.into_inner();
    let conn = state.conexion()?;
    if !db::eliminar_proyecto(&conn, &folio)? {
        return Err(proyecto_no_encontrado(&folio));
    }
    info!(folio = %folio, "proyecto eliminado");
    Ok(HttpResponse::Ok().json(json!({"status": "deleted", "folio": folio})))
}

#[derive(Debug, Deserialize)]
pub struct NuevoParticipante {
    pub codigo_estudiante: String,
    #[serde(default)]
    pub es_representante: bool,
}

/// POST /proyectos/{folio}/participantes
pub async fn agregar_participante_handler(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<NuevoParticipante>,
) -> ApiResult<HttpResponse> {
    let folio = path.into_inner();
    let conn = state.conexion()?;
    if db::obtener_proyecto(&conn, &folio)?.is_none() {
        return Err(proyecto_no_encontrado(&folio));
    }
    let codigo = body.codigo_estudiante.trim();
    if db::obtener_alumno(&conn, codigo)?.is_none() {
        return Err(ApiError::Validacion(format!("alumno {} no existe", codigo)));
    }
    db::upsert_participacion(
        &conn,
        &Participacion { proyecto: folio.clone(), alumno: codigo.to_string(), es_representante: body.es_representante },
    )?;
    Ok(HttpResponse::Ok().json(db::participantes(&conn, &folio)?))
}

/// DELETE /proyectos/{folio}/participantes/{codigo}
pub async fn eliminar_participante_handler(state: web::Data<AppState>, path: web::Path<(String, String)>) -> ApiResult<HttpResponse> {
    let (folio, codigo) = path.into_inner();
    let conn = state.conexion()?;
    if !db::eliminar_participacion(&conn, &folio, &codigo)? {
        return Err(ApiError::NoEncontrado(format!("participación {} en {}", codigo, folio)));
    }
    Ok(HttpResponse::Ok().json(json!({"status": "deleted", "folio": folio, "alumno": codigo})))
}

/// POST /proyectos/{folio}/prorrogas
pub async fn crear_prorroga_handler(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<NuevaProrroga>,
) -> ApiResult<HttpResponse> {
    let folio = path.into_inner();
    if body.justificacion.trim().is_empty() || body.calendario_presentacion.trim().is_empty() {
        return Err(ApiError::Validacion("justificación y calendario de presentación son requeridos".to_string()));
    }
    let conn = state.conexion()?;
    if db::obtener_proyecto(&conn, &folio)?.is_none() {
        return Err(proyecto_no_encontrado(&folio));
    }
    let prorroga = db::crear_prorroga(&conn, &folio, &body)?;
    Ok(HttpResponse::Created().json(prorroga))
}

#[derive(Debug, Default, Deserialize)]
pub struct PeticionNotificacion {
    pub mensaje: Option<String>,
}

/// POST /proyectos/{folio}/notificar
/// Envía el correo a asesor, evaluador y participantes. Sin destinatarios o
/// con fallo del servidor de correo responde con error.
pub async fn notificar_handler(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: Option<web::Json<PeticionNotificacion>>,
) -> ApiResult<HttpResponse> {
    let folio = path.into_inner();
    let peticion = body.map(|b| b.into_inner()).unwrap_or_default();

    let notificacion = {
        let conn = state.conexion()?;
        preparar_notificacion(&conn, &folio, peticion.mensaje.as_deref())?
    };

    let mailer = state.mailer.as_ref().ok_or(NotificacionError::NoConfigurado)?;
    mailer.enviar(&notificacion).await?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "ok",
        "mensaje": format!("Correo enviado a {} destinatarios", notificacion.destinatarios.len()),
        "destinatarios": notificacion.destinatarios,
    })))
}
