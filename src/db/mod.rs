//! Persistencia en SQLite.
//!
//! - `upserts`: altas/actualizaciones idempotentes por llave natural (importación)
//! - `queries`: consultas y operaciones del panel administrativo
//! - `historial`: prórrogas y evaluaciones (historial de solo inserción)

pub mod upserts;
pub mod queries;
pub mod historial;

pub use historial::*;
pub use queries::*;
pub use upserts::*;

use rusqlite::Connection;
use std::error::Error;
use std::fs;
use std::path::Path;

const ESQUEMA: &str = "
CREATE TABLE IF NOT EXISTS alumno (
    codigo_estudiante TEXT PRIMARY KEY,
    nombre_completo TEXT NOT NULL,
    correo_electronico TEXT
);

CREATE TABLE IF NOT EXISTS asesor (
    codigo_asesor TEXT PRIMARY KEY,
    nombre_completo TEXT NOT NULL,
    correo_electronico TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS evaluador (
    codigo_evaluador TEXT PRIMARY KEY,
    nombre_completo TEXT NOT NULL,
    correo_evaluador TEXT NOT NULL DEFAULT '',
    especializacion TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS formato1 (
    folio TEXT PRIMARY KEY,
    introduccion TEXT NOT NULL DEFAULT '',
    justificacion TEXT NOT NULL DEFAULT '',
    objetivo TEXT NOT NULL DEFAULT '',
    resumen TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS proyecto (
    folio TEXT PRIMARY KEY,
    titulo TEXT NOT NULL,
    asesor TEXT REFERENCES asesor(codigo_asesor) ON DELETE SET NULL,
    evaluador TEXT REFERENCES evaluador(codigo_evaluador) ON DELETE SET NULL,
    formato1 TEXT UNIQUE REFERENCES formato1(folio) ON DELETE SET NULL,
    modalidad TEXT NOT NULL DEFAULT '',
    nivel_competencia TEXT NOT NULL DEFAULT '',
    variante TEXT,
    dictamen TEXT NOT NULL DEFAULT 'PENDIENTE',
    calendario_registro TEXT NOT NULL,
    evidencia_url TEXT NOT NULL DEFAULT '',
    protocolo_dictamen_url TEXT NOT NULL DEFAULT '',
    evidencia_adicional_url TEXT
);

CREATE TABLE IF NOT EXISTS participacion (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    proyecto TEXT NOT NULL REFERENCES proyecto(folio) ON DELETE CASCADE,
    alumno TEXT NOT NULL REFERENCES alumno(codigo_estudiante) ON DELETE CASCADE,
    es_representante INTEGER NOT NULL DEFAULT 0,
    UNIQUE (proyecto, alumno)
);

CREATE TABLE IF NOT EXISTS prorroga (
    id_prorroga INTEGER PRIMARY KEY AUTOINCREMENT,
    proyecto TEXT NOT NULL REFERENCES proyecto(folio) ON DELETE CASCADE,
    justificacion TEXT NOT NULL,
    calendario_presentacion TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS evaluacion (
    id_evaluacion INTEGER PRIMARY KEY AUTOINCREMENT,
    proyecto TEXT NOT NULL REFERENCES proyecto(folio) ON DELETE CASCADE,
    evaluador TEXT REFERENCES evaluador(codigo_evaluador) ON DELETE SET NULL,
    fecha_evaluacion TEXT NOT NULL,
    tipo_revision TEXT NOT NULL DEFAULT 'FORMA' CHECK (tipo_revision IN ('FORMA', 'FONDO', 'FINAL')),
    resolutivo TEXT NOT NULL CHECK (resolutivo IN ('APROBADO', 'RECHAZADO', 'PENDIENTE', 'NO_APLICA')),
    observaciones TEXT NOT NULL DEFAULT ''
);

CREATE INDEX IF NOT EXISTS idx_evaluacion_proyecto_fecha ON evaluacion (proyecto, fecha_evaluacion);

-- el historial no se edita; sólo se permite que ON DELETE SET NULL toque al evaluador
CREATE TRIGGER IF NOT EXISTS evaluacion_solo_insercion
BEFORE UPDATE OF proyecto, fecha_evaluacion, tipo_revision, resolutivo, observaciones ON evaluacion
BEGIN
    SELECT RAISE(ABORT, 'el historial de evaluaciones es de solo insercion');
END;
";

/// Activa las llaves foráneas (SQLite las trae apagadas por conexión)
pub fn configurar(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")
}

pub fn crear_esquema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(ESQUEMA)
}

/// Abre una conexión de corta duración al archivo de base de datos
pub fn abrir_conexion(path: &Path) -> rusqlite::Result<Connection> {
    let conn = Connection::open(path)?;
    configurar(&conn)?;
    Ok(conn)
}

/// Base de datos en memoria con el esquema creado (pruebas y herramientas)
pub fn abrir_en_memoria() -> rusqlite::Result<Connection> {
    let conn = Connection::open_in_memory()?;
    configurar(&conn)?;
    crear_esquema(&conn)?;
    Ok(conn)
}

/// Crea el directorio, el archivo sqlite y las tablas si no existen
pub fn init_db(path: &Path) -> Result<(), Box<dyn Error>> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)?;
        }
    }
    let conn = abrir_conexion(path)?;
    crear_esquema(&conn)?;
    Ok(())
}
