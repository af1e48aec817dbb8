use rusqlite::{params, Connection};

use crate::models::{Alumno, Asesor, Evaluador, Formato1, Participacion, Proyecto};

/// Inserta o actualiza un asesor por su código
pub fn upsert_asesor(conn: &Connection, a: &Asesor) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO asesor (codigo_asesor, nombre_completo, correo_electronico)
         VALUES (?1, ?2, ?3)
         ON CONFLICT (codigo_asesor) DO UPDATE SET
            nombre_completo = excluded.nombre_completo,
            correo_electronico = excluded.correo_electronico",
        params![a.codigo_asesor, a.nombre_completo, a.correo_electronico],
    )?;
    Ok(())
}

pub fn upsert_evaluador(conn: &Connection, e: &Evaluador) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO evaluador (codigo_evaluador, nombre_completo, correo_evaluador, especializacion)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT (codigo_evaluador) DO UPDATE SET
            nombre_completo = excluded.nombre_completo,
            correo_evaluador = excluded.correo_evaluador,
            especializacion = excluded.especializacion",
        params![e.codigo_evaluador, e.nombre_completo, e.correo_evaluador, e.especializacion],
    )?;
    Ok(())
}

pub fn upsert_formato1(conn: &Connection, f: &Formato1) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO formato1 (folio, introduccion, justificacion, objetivo, resumen)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT (folio) DO UPDATE SET
            introduccion = excluded.introduccion,
            justificacion = excluded.justificacion,
            objetivo = excluded.objetivo,
            resumen = excluded.resumen",
        params![f.folio, f.introduccion, f.justificacion, f.objetivo, f.resumen],
    )?;
    Ok(())
}

/// Alta/actualización de un proyecto desde la importación.
///
/// El dictamen y el evaluador asignado se gestionan desde el panel, así que
/// una re-importación no los sobrescribe. Un proyecto nuevo nace `PENDIENTE`.
pub fn upsert_proyecto(conn: &Connection, p: &Proyecto) -> rusqlite::Result<()> {
    let dictamen = if p.dictamen.trim().is_empty() { "PENDIENTE" } else { p.dictamen.as_str() };
    conn.execute(
        "INSERT INTO proyecto (
            folio, titulo, asesor, evaluador, formato1, modalidad, nivel_competencia,
            variante, dictamen, calendario_registro, evidencia_url,
            protocolo_dictamen_url, evidencia_adicional_url
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
         ON CONFLICT (folio) DO UPDATE SET
            titulo = excluded.titulo,
            asesor = excluded.asesor,
            formato1 = excluded.formato1,
            modalidad = excluded.modalidad,
            nivel_competencia = excluded.nivel_competencia,
            variante = excluded.variante,
            calendario_registro = excluded.calendario_registro,
            evidencia_url = excluded.evidencia_url,
            protocolo_dictamen_url = excluded.protocolo_dictamen_url,
            evidencia_adicional_url = excluded.evidencia_adicional_url",
        params![
            p.folio,
            p.titulo,
            p.asesor,
            p.evaluador,
            p.formato1,
            p.modalidad,
            p.nivel_competencia,
            p.variante,
            dictamen,
            p.calendario_registro,
            p.evidencia_url,
            p.protocolo_dictamen_url,
            p.evidencia_adicional_url,
        ],
    )?;
    Ok(())
}

/// Inserta o actualiza un alumno. Un correo ausente no borra el que ya
/// estuviera registrado (los integrantes 2 y 3 no traen correo).
pub fn upsert_alumno(conn: &Connection, a: &Alumno) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO alumno (codigo_estudiante, nombre_completo, correo_electronico)
         VALUES (?1, ?2, ?3)
         ON CONFLICT (codigo_estudiante) DO UPDATE SET
            nombre_completo = excluded.nombre_completo,
            correo_electronico = COALESCE(excluded.correo_electronico, alumno.correo_electronico)",
        params![a.codigo_estudiante, a.nombre_completo, a.correo_electronico],
    )?;
    Ok(())
}

/// Una sola participación por par (proyecto, alumno)
pub fn upsert_participacion(conn: &Connection, p: &Participacion) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO participacion (proyecto, alumno, es_representante)
         VALUES (?1, ?2, ?3)
         ON CONFLICT (proyecto, alumno) DO UPDATE SET
            es_representante = excluded.es_representante",
        params![p.proyecto, p.alumno, p.es_representante],
    )?;
    Ok(())
}
