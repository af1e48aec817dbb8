//! Lectura de la hoja de registro exportada desde el formulario.
//!
//! Submódulos:
//! - `io`: normalización de encabezados, limpieza de celdas y lectura con calamine
//! - `fila`: fila multivalor indexada por encabezado normalizado

mod io;
mod fila;

pub use io::{cell_to_string, leer_filas, limpiar_celda, limpiar_valor, normalizar_encabezado};
pub use fila::FilaExcel;
