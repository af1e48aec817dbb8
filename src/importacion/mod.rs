//! Importación del registro inicial de proyectos desde la hoja de cálculo.
//!
//! Toda la corrida ocurre en una sola transacción. Cada fila se procesa dentro
//! de su propio SAVEPOINT: si falla, sólo se deshacen sus escrituras y el lote
//! continúa. Un error fatal (lectura del archivo, commit) deshace todo y se
//! reporta como error, así que el resumen devuelto describe exactamente lo
//! que quedó confirmado.

pub mod calendario;
pub mod columnas;
pub mod reconciliador;

pub use calendario::{calendario_actual, calendario_de, es_calendario_valido, folio};
pub use reconciliador::{folio_de_fila, reconciliar_fila};

use rusqlite::Connection;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::ImportConfig;
use crate::error::{FilaError, ImportError};
use crate::excel::{leer_filas, FilaExcel};

/// Fila que no se pudo importar
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FallaFila {
    pub fila: usize,
    pub folio: Option<String>,
    pub motivo: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ResumenImportacion {
    pub calendario: String,
    pub exitosos: usize,
    pub fallidos: usize,
    pub fallas: Vec<FallaFila>,
}

impl ResumenImportacion {
    pub fn new(calendario: &str) -> Self {
        Self { calendario: calendario.to_string(), exitosos: 0, fallidos: 0, fallas: Vec::new() }
    }

    fn registrar_falla(&mut self, fila: usize, folio: Option<String>, error: FilaError) {
        warn!(fila, folio = ?folio, error = %error, "fila omitida en la importación");
        self.fallidos += 1;
        self.fallas.push(FallaFila { fila, folio, motivo: error.to_string() });
    }

    /// Línea única de resumen para el administrador
    pub fn mensaje(&self) -> String {
        format!(
            "Importación {} completada: {} proyectos registrados, {} filas con error",
            self.calendario, self.exitosos, self.fallidos
        )
    }
}

/// Orquestador de la importación. Recibe sus rutas al construirse.
#[derive(Debug, Clone)]
pub struct Importador {
    config: ImportConfig,
}

impl Importador {
    pub fn new(config: ImportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Ruta esperada del archivo para el calendario (exista o no)
    pub fn ruta_archivo(&self, calendario: &str) -> PathBuf {
        self.config.ruta_archivo(calendario)
    }

    /// Ruta del archivo si existe; si no, `ArchivoNoEncontrado`
    pub fn ubicar_archivo(&self, calendario: &str) -> Result<PathBuf, ImportError> {
        let ruta = self.ruta_archivo(calendario);
        if ruta.is_file() { Ok(ruta) } else { Err(ImportError::ArchivoNoEncontrado(ruta)) }
    }

    /// Importa el archivo del calendario en curso
    pub fn importar(&self, conn: &mut Connection) -> Result<ResumenImportacion, ImportError> {
        self.importar_calendario(conn, &calendario_actual())
    }

    pub fn importar_calendario(&self, conn: &mut Connection, calendario: &str) -> Result<ResumenImportacion, ImportError> {
        let ruta = self.ubicar_archivo(calendario)?;
        info!(ruta = %ruta.display(), calendario, "iniciando importación");
        let filas = leer_filas(&ruta)?;
        importar_filas(conn, &filas, calendario)
    }
}

/// Reconcilia todas las filas dentro de una transacción, con un savepoint por fila
pub fn importar_filas(conn: &mut Connection, filas: &[FilaExcel], calendario: &str) -> Result<ResumenImportacion, ImportError> {
    let mut tx = conn.transaction()?;
    let mut resumen = ResumenImportacion::new(calendario);

    for fila in filas {
        let folio = match folio_de_fila(fila, calendario) {
            Ok(f) => f,
            Err(e) => {
                resumen.registrar_falla(fila.numero, None, e);
                continue;
            }
        };

        let sp = tx.savepoint()?;
        match reconciliar_fila(&sp, fila, &folio, calendario) {
            Ok(()) => {
                sp.commit()?;
                resumen.exitosos += 1;
            }
            Err(e) => {
                // al soltar el savepoint se deshacen las escrituras de esta fila
                drop(sp);
                resumen.registrar_falla(fila.numero, Some(folio), e);
            }
        }
    }

    tx.commit()?;
    info!(calendario, exitosos = resumen.exitosos, fallidos = resumen.fallidos, "importación confirmada");
    Ok(resumen)
}
