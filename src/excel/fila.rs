use calamine::Data;
use std::collections::HashMap;

use crate::excel::io::limpiar_valor;

/// Fila de la hoja de registro indexada por encabezado normalizado.
///
/// Un mismo encabezado puede aparecer varias veces en la exportación, así que
/// cada columna lógica guarda la secuencia de celdas candidatas en el orden
/// original de las columnas.
#[derive(Debug, Clone, Default)]
pub struct FilaExcel {
    /// Número de línea en la hoja (la fila de encabezados es la 1)
    pub numero: usize,
    valores: HashMap<String, Vec<Data>>,
}

impl FilaExcel {
    pub fn new(numero: usize) -> Self {
        Self { numero, valores: HashMap::new() }
    }

    /// Construye la fila emparejando encabezados ya normalizados con celdas.
    /// Celdas sin encabezado se descartan; encabezados sin celda quedan vacíos.
    pub fn desde_celdas(numero: usize, encabezados: &[String], celdas: &[Data]) -> Self {
        let mut fila = Self::new(numero);
        for (i, col) in encabezados.iter().enumerate() {
            if col.is_empty() {
                continue;
            }
            let celda = celdas.get(i).cloned().unwrap_or(Data::Empty);
            fila.push(col.clone(), celda);
        }
        fila
    }

    /// Agrega un candidato a la columna `col` (se asume ya normalizada)
    pub fn push(&mut self, col: impl Into<String>, celda: Data) {
        self.valores.entry(col.into()).or_default().push(celda);
    }

    /// Builder para pruebas y para armar filas a mano
    pub fn con(mut self, col: &str, celda: Data) -> Self {
        self.push(col, celda);
        self
    }

    pub fn candidatos(&self, col: &str) -> &[Data] {
        self.valores.get(col).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Valor limpio de la columna, o `None` si está ausente
    pub fn valor(&self, col: &str) -> Option<String> {
        limpiar_valor(self.candidatos(col))
    }

    /// Primer valor presente entre varias columnas candidatas, en orden
    pub fn primer_valor(&self, cols: &[&str]) -> Option<String> {
        cols.iter().find_map(|c| self.valor(c))
    }

    /// Igual que `valor` pero devuelve cadena vacía si no hay dato
    pub fn texto(&self, col: &str) -> String {
        self.valor(col).unwrap_or_default()
    }

    pub fn columnas(&self) -> impl Iterator<Item = &str> {
        self.valores.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encabezados_duplicados_se_agrupan() {
        let enc = vec!["evidencia".to_string(), "titulo".to_string(), "evidencia".to_string(), String::new()];
        let celdas = vec![Data::Empty, Data::String("T".into()), Data::String("https://drive/x".into())];
        let fila = FilaExcel::desde_celdas(5, &enc, &celdas);
        assert_eq!(fila.numero, 5);
        assert_eq!(fila.candidatos("evidencia").len(), 2);
        assert_eq!(fila.valor("evidencia"), Some("https://drive/x".to_string()));
        assert_eq!(fila.columnas().count(), 2);
    }

    #[test]
    fn test_primer_valor() {
        let fila = FilaExcel::new(2).con("b", Data::String("x".into()));
        assert_eq!(fila.primer_valor(&["a", "b"]), Some("x".to_string()));
        assert_eq!(fila.primer_valor(&["a"]), None);
        assert_eq!(fila.texto("a"), "");
    }
}
