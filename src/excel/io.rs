use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

use crate::error::ImportError;
use crate::excel::fila::FilaExcel;

/// Convierte un `Data` de calamine a String (versión genérica para celdas)
pub fn cell_to_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            if (f.floor() - f).abs() < f64::EPSILON {
                format!("{}", *f as i64)
            } else {
                format!("{}", f)
            }
        }
        Data::Int(i) => format!("{}", i),
        Data::Bool(b) => format!("{}", b),
        Data::Empty => String::new(),
        Data::Error(_) => String::new(),
        Data::DateTime(s) => s.to_string(),
        Data::DateTimeIso(s) => s.trim().to_string(),
        Data::DurationIso(s) => s.trim().to_string(),
    }
}

/// Normaliza un encabezado de columna: recorta, pasa a minúsculas, elimina
/// paréntesis, quita acentos (á é í ó ú ñ) y reemplaza espacios por `_`.
/// Los espacios se sustituyen al final para que el plegado de acentos no
/// pueda reintroducirlos.
pub fn normalizar_encabezado(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .filter(|c| *c != '(' && *c != ')')
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' => 'u',
            'ñ' => 'n',
            otro => otro,
        })
        .map(|c| if c == ' ' { '_' } else { c })
        .collect()
}

/// Celda sin contenido útil: vacía, error, o texto sólo con espacios
fn es_vacia(c: &Data) -> bool {
    match c {
        Data::Empty | Data::Error(_) => true,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().is_empty(),
        Data::Float(f) => f.is_nan(),
        _ => false,
    }
}

/// Limpia una sola celda.
///
/// - vacía / NaN / error -> `None`
/// - cero numérico -> `None` (en el registro el 0 significa "sin valor")
/// - otro número -> se trunca a entero (`218466066.0` -> `"218466066"`)
/// - texto -> recortado; si queda vacío, `None`
pub fn limpiar_celda(c: &Data) -> Option<String> {
    let limpio = match c {
        Data::Empty | Data::Error(_) => return None,
        Data::Float(f) if f.is_nan() || *f == 0.0 => return None,
        Data::Int(0) => return None,
        Data::Float(f) => (f.trunc() as i64).to_string(),
        Data::Int(i) => i.to_string(),
        otro => cell_to_string(otro),
    };
    if limpio.is_empty() { None } else { Some(limpio) }
}

/// Extrae un único valor de los candidatos de una columna lógica. Cuando el
/// encabezado viene duplicado hay varios candidatos: se toma el primero no
/// vacío en el orden original de las columnas.
pub fn limpiar_valor(candidatos: &[Data]) -> Option<String> {
    let elegido = match candidatos {
        [] => return None,
        [unico] => unico,
        varios => varios.iter().find(|c| !es_vacia(c))?,
    };
    limpiar_celda(elegido)
}

/// Lee la primera hoja del archivo: la fila 1 son los encabezados (se
/// normalizan una sola vez) y cada fila siguiente se convierte en `FilaExcel`.
/// Las filas completamente vacías se omiten.
pub fn leer_filas<P: AsRef<Path>>(path: P) -> Result<Vec<FilaExcel>, ImportError> {
    let mut workbook = open_workbook_auto(path.as_ref())?;

    let hoja = workbook.sheet_names().first().cloned().ok_or(ImportError::HojaVacia)?;
    let range = workbook.worksheet_range(&hoja)?;

    // calamine recorta las filas vacías iniciales; la fila de encabezados
    // puede no ser la 1 de la hoja
    let fila_encabezado = range.start().map(|(r, _)| r as usize).unwrap_or(0);

    let mut rows = range.rows();
    let encabezados: Vec<String> = match rows.next() {
        Some(h) => h.iter().map(|c| normalizar_encabezado(&cell_to_string(c))).collect(),
        None => return Err(ImportError::HojaVacia),
    };

    let mut filas = Vec::new();
    for (idx, r) in rows.enumerate() {
        if r.iter().all(es_vacia) {
            continue;
        }
        // +2: una por el encabezado y otra porque las filas de Excel empiezan en 1
        filas.push(FilaExcel::desde_celdas(fila_encabezado + idx + 2, &encabezados, r));
    }
    Ok(filas)
}
