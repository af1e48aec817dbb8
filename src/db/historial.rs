use chrono::{SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, params_from_iter, Connection, Row};
use serde::Deserialize;

use crate::models::{Evaluacion, Prorroga, Resolutivo, TipoRevision};

/// Datos de una nueva revisión. La fecha la asigna el servidor.
#[derive(Debug, Clone, Deserialize)]
pub struct NuevaEvaluacion {
    pub evaluador: Option<String>,
    #[serde(default)]
    pub tipo_revision: TipoRevision,
    pub resolutivo: Resolutivo,
    #[serde(default)]
    pub observaciones: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NuevaProrroga {
    pub justificacion: String,
    pub calendario_presentacion: String,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct FiltroEvaluaciones {
    pub proyecto: Option<String>,
    pub evaluador: Option<String>,
    pub tipo: Option<TipoRevision>,
    pub resolutivo: Option<Resolutivo>,
}

pub fn crear_prorroga(conn: &Connection, folio: &str, nueva: &NuevaProrroga) -> rusqlite::Result<Prorroga> {
    conn.execute(
        "INSERT INTO prorroga (proyecto, justificacion, calendario_presentacion) VALUES (?1, ?2, ?3)",
        params![folio, nueva.justificacion, nueva.calendario_presentacion],
    )?;
    Ok(Prorroga {
        id_prorroga: conn.last_insert_rowid(),
        proyecto: folio.to_string(),
        justificacion: nueva.justificacion.clone(),
        calendario_presentacion: nueva.calendario_presentacion.clone(),
    })
}

pub fn prorrogas_de_proyecto(conn: &Connection, folio: &str) -> rusqlite::Result<Vec<Prorroga>> {
    let mut stmt = conn.prepare(
        "SELECT id_prorroga, proyecto, justificacion, calendario_presentacion
         FROM prorroga WHERE proyecto = ?1 ORDER BY id_prorroga",
    )?;
    let rows = stmt.query_map(params![folio], |r| {
        Ok(Prorroga {
            id_prorroga: r.get(0)?,
            proyecto: r.get(1)?,
            justificacion: r.get(2)?,
            calendario_presentacion: r.get(3)?,
        })
    })?;
    rows.collect()
}

fn texto_a_enum<T: std::str::FromStr<Err = String>>(r: &Row, idx: usize) -> rusqlite::Result<T> {
    let s: String = r.get(idx)?;
    s.parse::<T>().map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into()))
}

fn evaluacion_desde_fila(r: &Row) -> rusqlite::Result<Evaluacion> {
    Ok(Evaluacion {
        id_evaluacion: r.get(0)?,
        proyecto: r.get(1)?,
        evaluador: r.get(2)?,
        fecha_evaluacion: r.get(3)?,
        tipo_revision: texto_a_enum(r, 4)?,
        resolutivo: texto_a_enum(r, 5)?,
        observaciones: r.get(6)?,
    })
}

const EVALUACION_COLS: &str =
    "id_evaluacion, proyecto, evaluador, fecha_evaluacion, tipo_revision, resolutivo, observaciones";

/// Agrega una revisión al historial con la fecha actual del servidor
pub fn registrar_evaluacion(conn: &Connection, folio: &str, nueva: &NuevaEvaluacion) -> rusqlite::Result<Evaluacion> {
    // microsegundos + formato fijo: el orden lexicográfico coincide con el cronológico
    let fecha = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
    let evaluador = nueva.evaluador.as_deref().map(str::trim).filter(|e| !e.is_empty());
    conn.execute(
        "INSERT INTO evaluacion (proyecto, evaluador, fecha_evaluacion, tipo_revision, resolutivo, observaciones)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![folio, evaluador, fecha, nueva.tipo_revision.as_str(), nueva.resolutivo.as_str(), nueva.observaciones],
    )?;
    Ok(Evaluacion {
        id_evaluacion: conn.last_insert_rowid(),
        proyecto: folio.to_string(),
        evaluador: evaluador.map(str::to_string),
        fecha_evaluacion: fecha,
        tipo_revision: nueva.tipo_revision,
        resolutivo: nueva.resolutivo,
        observaciones: nueva.observaciones.clone(),
    })
}

/// Historial del proyecto, de la más reciente a la más antigua
pub fn evaluaciones_de_proyecto(conn: &Connection, folio: &str) -> rusqlite::Result<Vec<Evaluacion>> {
    listar_evaluaciones(conn, &FiltroEvaluaciones { proyecto: Some(folio.to_string()), ..Default::default() })
}

pub fn listar_evaluaciones(conn: &Connection, filtro: &FiltroEvaluaciones) -> rusqlite::Result<Vec<Evaluacion>> {
    let mut condiciones: Vec<String> = Vec::new();
    let mut valores: Vec<String> = Vec::new();

    let mut agregar = |col: &str, v: Option<String>| {
        if let Some(v) = v {
            valores.push(v);
            condiciones.push(format!("{} = ?{}", col, valores.len()));
        }
    };
    agregar("proyecto", filtro.proyecto.clone());
    agregar("evaluador", filtro.evaluador.clone());
    agregar("tipo_revision", filtro.tipo.map(|t| t.as_str().to_string()));
    agregar("resolutivo", filtro.resolutivo.map(|r| r.as_str().to_string()));

    let mut sql = format!("SELECT {} FROM evaluacion", EVALUACION_COLS);
    if !condiciones.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&condiciones.join(" AND "));
    }
    sql.push_str(" ORDER BY fecha_evaluacion DESC, id_evaluacion DESC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(valores.iter()), evaluacion_desde_fila)?;
    rows.collect()
}
