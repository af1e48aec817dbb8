use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::models::{Alumno, Asesor, Evaluador};
use crate::server::AppState;

fn requerido(campo: &str, valor: &str) -> ApiResult<()> {
    if valor.trim().is_empty() {
        Err(ApiError::Validacion(format!("{} es requerido", campo)))
    } else {
        Ok(())
    }
}

pub async fn listar_alumnos_handler(state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let conn = state.conexion()?;
    Ok(HttpResponse::Ok().json(db::listar_alumnos(&conn)?))
}

pub async fn obtener_alumno_handler(state: web::Data<AppState>, path: web::Path<String>) -> ApiResult<HttpResponse> {
    let codigo = path.into_inner();
    let conn = state.conexion()?;
    let alumno = db::obtener_alumno(&conn, &codigo)?.ok_or_else(|| ApiError::NoEncontrado(format!("alumno {}", codigo)))?;
    Ok(HttpResponse::Ok().json(alumno))
}

/// POST /alumnos (alta o actualización por código)
pub async fn guardar_alumno_handler(state: web::Data<AppState>, body: web::Json<Alumno>) -> ApiResult<HttpResponse> {
    requerido("codigo_estudiante", &body.codigo_estudiante)?;
    requerido("nombre_completo", &body.nombre_completo)?;
    let conn = state.conexion()?;
    db::upsert_alumno(&conn, &body)?;
    Ok(HttpResponse::Ok().json(json!({"status": "ok", "codigo_estudiante": body.codigo_estudiante})))
}

pub async fn listar_asesores_handler(state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let conn = state.conexion()?;
    Ok(HttpResponse::Ok().json(db::listar_asesores(&conn)?))
}

pub async fn guardar_asesor_handler(state: web::Data<AppState>, body: web::Json<Asesor>) -> ApiResult<HttpResponse> {
    requerido("codigo_asesor", &body.codigo_asesor)?;
    requerido("nombre_completo", &body.nombre_completo)?;
    let conn = state.conexion()?;
    db::upsert_asesor(&conn, &body)?;
    Ok(HttpResponse::Ok().json(json!({"status": "ok", "codigo_asesor": body.codigo_asesor})))
}

/// DELETE /asesores/{codigo}
/// Los proyectos que lo tenían asignado quedan sin asesor.
pub async fn eliminar_asesor_handler(state: web::Data<AppState>, path: web::Path<String>) -> ApiResult<HttpResponse> {
    let codigo = path.into_inner();
    let conn = state.conexion()?;
    if !db::eliminar_asesor(&conn, &codigo)? {
        return Err(ApiError::NoEncontrado(format!("asesor {}", codigo)));
    }
    Ok(HttpResponse::Ok().json(json!({"status": "deleted", "codigo_asesor": codigo})))
}

pub async fn listar_evaluadores_handler(state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let conn = state.conexion()?;
    Ok(HttpResponse::Ok().json(db::listar_evaluadores(&conn)?))
}

pub async fn guardar_evaluador_handler(state: web::Data<AppState>, body: web::Json<Evaluador>) -> ApiResult<HttpResponse> {
    requerido("codigo_evaluador", &body.codigo_evaluador)?;
    requerido("nombre_completo", &body.nombre_completo)?;
    let conn = state.conexion()?;
    db::upsert_evaluador(&conn, &body)?;
    Ok(HttpResponse::Ok().json(json!({"status": "ok", "codigo_evaluador": body.codigo_evaluador})))
}

/// DELETE /evaluadores/{codigo}
/// Proyectos y evaluaciones conservan su historial con el evaluador en nulo.
pub async fn eliminar_evaluador_handler(state: web::Data<AppState>, path: web::Path<String>) -> ApiResult<HttpResponse> {
    let codigo = path.into_inner();
    let conn = state.conexion()?;
    if !db::eliminar_evaluador(&conn, &codigo)? {
        return Err(ApiError::NoEncontrado(format!("evaluador {}", codigo)));
    }
    Ok(HttpResponse::Ok().json(json!({"status": "deleted", "codigo_evaluador": codigo})))
}

pub async fn formato1_handler(state: web::Data<AppState>, path: web::Path<String>) -> ApiResult<HttpResponse> {
    let folio = path.into_inner();
    let conn = state.conexion()?;
    let f = db::obtener_formato1(&conn, &folio)?.ok_or_else(|| ApiError::NoEncontrado(format!("formato 1 {}", folio)))?;
    Ok(HttpResponse::Ok().json(f))
}
