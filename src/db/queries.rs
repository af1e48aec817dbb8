use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use serde::Deserialize;

use crate::models::{Alumno, Asesor, Evaluador, Formato1, Participante, Proyecto, ProyectoDetalle};

const PROYECTO_COLS: &str = "p.folio, p.titulo, p.asesor, p.evaluador, p.formato1, p.modalidad, \
    p.nivel_competencia, p.variante, p.dictamen, p.calendario_registro, p.evidencia_url, \
    p.protocolo_dictamen_url, p.evidencia_adicional_url";

fn proyecto_desde_fila(row: &Row) -> rusqlite::Result<Proyecto> {
    Ok(Proyecto {
        folio: row.get(0)?,
        titulo: row.get(1)?,
        asesor: row.get(2)?,
        evaluador: row.get(3)?,
        formato1: row.get(4)?,
        modalidad: row.get(5)?,
        nivel_competencia: row.get(6)?,
        variante: row.get(7)?,
        dictamen: row.get(8)?,
        calendario_registro: row.get(9)?,
        evidencia_url: row.get(10)?,
        protocolo_dictamen_url: row.get(11)?,
        evidencia_adicional_url: row.get(12)?,
    })
}

/// Filtros del listado de proyectos (equivalentes a los del panel)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct FiltroProyectos {
    pub calendario: Option<String>,
    pub modalidad: Option<String>,
    pub dictamen: Option<String>,
    pub asesor: Option<String>,
    pub evaluador: Option<String>,
    /// Búsqueda libre en folio, título, asesor, evaluador y participantes
    pub q: Option<String>,
}

/// Cambios editables de un proyecto. El folio nunca cambia.
/// En `asesor`/`evaluador` una cadena vacía quita la asignación.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CambiosProyecto {
    pub titulo: Option<String>,
    pub modalidad: Option<String>,
    pub nivel_competencia: Option<String>,
    pub variante: Option<String>,
    pub dictamen: Option<String>,
    pub asesor: Option<String>,
    pub evaluador: Option<String>,
    pub evidencia_url: Option<String>,
    pub protocolo_dictamen_url: Option<String>,
    pub evidencia_adicional_url: Option<String>,
}

pub fn obtener_proyecto(conn: &Connection, folio: &str) -> rusqlite::Result<Option<Proyecto>> {
    let sql = format!("SELECT {} FROM proyecto p WHERE p.folio = ?1", PROYECTO_COLS);
    conn.query_row(&sql, params![folio], proyecto_desde_fila).optional()
}

pub fn listar_proyectos(conn: &Connection, filtro: &FiltroProyectos) -> rusqlite::Result<Vec<Proyecto>> {
    let mut condiciones: Vec<String> = Vec::new();
    let mut valores: Vec<String> = Vec::new();

    let exactos = [
        ("p.calendario_registro", &filtro.calendario),
        ("p.modalidad", &filtro.modalidad),
        ("p.dictamen", &filtro.dictamen),
        ("p.asesor", &filtro.asesor),
        ("p.evaluador", &filtro.evaluador),
    ];
    for (col, v) in exactos {
        if let Some(v) = v.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            valores.push(v.to_string());
            condiciones.push(format!("{} = ?{}", col, valores.len()));
        }
    }

    if let Some(q) = filtro.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        valores.push(format!("%{}%", q));
        let n = valores.len();
        condiciones.push(format!(
            "(p.folio LIKE ?{n} OR p.titulo LIKE ?{n} OR a.nombre_completo LIKE ?{n} \
             OR ev.nombre_completo LIKE ?{n} OR EXISTS (\
                SELECT 1 FROM participacion pa JOIN alumno al ON al.codigo_estudiante = pa.alumno \
                WHERE pa.proyecto = p.folio AND al.nombre_completo LIKE ?{n}))"
        ));
    }

    let mut sql = format!(
        "SELECT {} FROM proyecto p \
         LEFT JOIN asesor a ON a.codigo_asesor = p.asesor \
         LEFT JOIN evaluador ev ON ev.codigo_evaluador = p.evaluador",
        PROYECTO_COLS
    );
    if !condiciones.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&condiciones.join(" AND "));
    }
    sql.push_str(" ORDER BY p.calendario_registro DESC, p.folio");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(valores.iter()), proyecto_desde_fila)?;
    rows.collect()
}

/// Aplica los cambios y devuelve el proyecto actualizado (`None` si no existe)
pub fn actualizar_proyecto(conn: &Connection, folio: &str, cambios: &CambiosProyecto) -> rusqlite::Result<Option<Proyecto>> {
    let Some(mut p) = obtener_proyecto(conn, folio)? else {
        return Ok(None);
    };

    let asignacion = |v: &str| if v.trim().is_empty() { None } else { Some(v.trim().to_string()) };

    if let Some(v) = &cambios.titulo { p.titulo = v.clone(); }
    if let Some(v) = &cambios.modalidad { p.modalidad = v.clone(); }
    if let Some(v) = &cambios.nivel_competencia { p.nivel_competencia = v.clone(); }
    if let Some(v) = &cambios.variante { p.variante = asignacion(v); }
    if let Some(v) = &cambios.dictamen { p.dictamen = v.clone(); }
    if let Some(v) = &cambios.asesor { p.asesor = asignacion(v); }
    if let Some(v) = &cambios.evaluador { p.evaluador = asignacion(v); }
    if let Some(v) = &cambios.evidencia_url { p.evidencia_url = v.clone(); }
    if let Some(v) = &cambios.protocolo_dictamen_url { p.protocolo_dictamen_url = v.clone(); }
    if let Some(v) = &cambios.evidencia_adicional_url { p.evidencia_adicional_url = asignacion(v); }

    conn.execute(
        "UPDATE proyecto SET titulo = ?2, modalidad = ?3, nivel_competencia = ?4, variante = ?5,
            dictamen = ?6, asesor = ?7, evaluador = ?8, evidencia_url = ?9,
            protocolo_dictamen_url = ?10, evidencia_adicional_url = ?11
         WHERE folio = ?1",
        params![
            p.folio,
            p.titulo,
            p.modalidad,
            p.nivel_competencia,
            p.variante,
            p.dictamen,
            p.asesor,
            p.evaluador,
            p.evidencia_url,
            p.protocolo_dictamen_url,
            p.evidencia_adicional_url,
        ],
    )?;
    Ok(Some(p))
}

/// Borra el proyecto; participaciones, prórrogas y evaluaciones caen en cascada
pub fn eliminar_proyecto(conn: &Connection, folio: &str) -> rusqlite::Result<bool> {
    Ok(conn.execute("DELETE FROM proyecto WHERE folio = ?1", params![folio])? > 0)
}

pub fn obtener_formato1(conn: &Connection, folio: &str) -> rusqlite::Result<Option<Formato1>> {
    conn.query_row(
        "SELECT folio, introduccion, justificacion, objetivo, resumen FROM formato1 WHERE folio = ?1",
        params![folio],
        |r| {
            Ok(Formato1 {
                folio: r.get(0)?,
                introduccion: r.get(1)?,
                justificacion: r.get(2)?,
                objetivo: r.get(3)?,
                resumen: r.get(4)?,
            })
        },
    )
    .optional()
}

fn asesor_desde_fila(r: &Row) -> rusqlite::Result<Asesor> {
    Ok(Asesor { codigo_asesor: r.get(0)?, nombre_completo: r.get(1)?, correo_electronico: r.get(2)? })
}

fn evaluador_desde_fila(r: &Row) -> rusqlite::Result<Evaluador> {
    Ok(Evaluador {
        codigo_evaluador: r.get(0)?,
        nombre_completo: r.get(1)?,
        correo_evaluador: r.get(2)?,
        especializacion: r.get(3)?,
    })
}

fn alumno_desde_fila(r: &Row) -> rusqlite::Result<Alumno> {
    Ok(Alumno { codigo_estudiante: r.get(0)?, nombre_completo: r.get(1)?, correo_electronico: r.get(2)? })
}

pub fn obtener_asesor(conn: &Connection, codigo: &str) -> rusqlite::Result<Option<Asesor>> {
    conn.query_row(
        "SELECT codigo_asesor, nombre_completo, correo_electronico FROM asesor WHERE codigo_asesor = ?1",
        params![codigo],
        asesor_desde_fila,
    )
    .optional()
}

pub fn listar_asesores(conn: &Connection) -> rusqlite::Result<Vec<Asesor>> {
    let mut stmt = conn.prepare("SELECT codigo_asesor, nombre_completo, correo_electronico FROM asesor ORDER BY nombre_completo")?;
    let rows = stmt.query_map([], asesor_desde_fila)?;
    rows.collect()
}

/// Los proyectos que lo referencian quedan sin asesor (ON DELETE SET NULL)
pub fn eliminar_asesor(conn: &Connection, codigo: &str) -> rusqlite::Result<bool> {
    Ok(conn.execute("DELETE FROM asesor WHERE codigo_asesor = ?1", params![codigo])? > 0)
}

pub fn obtener_evaluador(conn: &Connection, codigo: &str) -> rusqlite::Result<Option<Evaluador>> {
    conn.query_row(
        "SELECT codigo_evaluador, nombre_completo, correo_evaluador, especializacion FROM evaluador WHERE codigo_evaluador = ?1",
        params![codigo],
        evaluador_desde_fila,
    )
    .optional()
}

pub fn listar_evaluadores(conn: &Connection) -> rusqlite::Result<Vec<Evaluador>> {
    let mut stmt = conn.prepare(
        "SELECT codigo_evaluador, nombre_completo, correo_evaluador, especializacion FROM evaluador ORDER BY nombre_completo",
    )?;
    let rows = stmt.query_map([], evaluador_desde_fila)?;
    rows.collect()
}

/// Proyectos y evaluaciones que lo referencian quedan con evaluador nulo
pub fn eliminar_evaluador(conn: &Connection, codigo: &str) -> rusqlite::Result<bool> {
    Ok(conn.execute("DELETE FROM evaluador WHERE codigo_evaluador = ?1", params![codigo])? > 0)
}

pub fn obtener_alumno(conn: &Connection, codigo: &str) -> rusqlite::Result<Option<Alumno>> {
    conn.query_row(
        "SELECT codigo_estudiante, nombre_completo, correo_electronico FROM alumno WHERE codigo_estudiante = ?1",
        params![codigo],
        alumno_desde_fila,
    )
    .optional()
}

pub fn listar_alumnos(conn: &Connection) -> rusqlite::Result<Vec<Alumno>> {
    let mut stmt = conn.prepare("SELECT codigo_estudiante, nombre_completo, correo_electronico FROM alumno ORDER BY nombre_completo")?;
    let rows = stmt.query_map([], alumno_desde_fila)?;
    rows.collect()
}

/// Participantes del proyecto, representante primero
pub fn participantes(conn: &Connection, folio: &str) -> rusqlite::Result<Vec<Participante>> {
    let mut stmt = conn.prepare(
        "SELECT al.codigo_estudiante, al.nombre_completo, al.correo_electronico, pa.es_representante
         FROM participacion pa JOIN alumno al ON al.codigo_estudiante = pa.alumno
         WHERE pa.proyecto = ?1
         ORDER BY pa.es_representante DESC, pa.id",
    )?;
    let rows = stmt.query_map(params![folio], |r| {
        Ok(Participante {
            codigo_estudiante: r.get(0)?,
            nombre_completo: r.get(1)?,
            correo_electronico: r.get(2)?,
            es_representante: r.get(3)?,
        })
    })?;
    rows.collect()
}

pub fn eliminar_participacion(conn: &Connection, folio: &str, alumno: &str) -> rusqlite::Result<bool> {
    Ok(conn.execute(
        "DELETE FROM participacion WHERE proyecto = ?1 AND alumno = ?2",
        params![folio, alumno],
    )? > 0)
}

/// Proyecto con todas sus relaciones resueltas
pub fn detalle_proyecto(conn: &Connection, folio: &str) -> rusqlite::Result<Option<ProyectoDetalle>> {
    let Some(proyecto) = obtener_proyecto(conn, folio)? else {
        return Ok(None);
    };
    let formato1 = match &proyecto.formato1 {
        Some(f) => obtener_formato1(conn, f)?,
        None => None,
    };
    let asesor = match &proyecto.asesor {
        Some(a) => obtener_asesor(conn, a)?,
        None => None,
    };
    let evaluador = match &proyecto.evaluador {
        Some(e) => obtener_evaluador(conn, e)?,
        None => None,
    };
    Ok(Some(ProyectoDetalle {
        participantes: participantes(conn, folio)?,
        prorrogas: crate::db::historial::prorrogas_de_proyecto(conn, folio)?,
        evaluaciones: crate::db::historial::evaluaciones_de_proyecto(conn, folio)?,
        proyecto,
        formato1,
        asesor,
        evaluador,
    }))
}
