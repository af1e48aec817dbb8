#![allow(dead_code)]

use calamine::Data;
use registro_modular::excel::FilaExcel;
use rusqlite::Connection;

pub fn texto(s: &str) -> Data {
    Data::String(s.to_string())
}

/// Fila completa del registro, como la exporta el formulario (códigos
/// numéricos llegan como flotantes)
pub fn fila_registro(numero: usize, codigo_rep: f64, codigo_asesor: &str) -> FilaExcel {
    FilaExcel::new(numero)
        .con("codigo_del_representante", Data::Float(codigo_rep))
        .con("nombre_del_representante", texto("Ana López"))
        .con("correo_del_representante", texto("ana@alumnos.udg.mx"))
        .con("codigo_del_asesor", texto(codigo_asesor))
        .con("nombre_del_asesor", texto("Dra. Marta Ruiz"))
        .con("correo_del_asesor", texto("marta@academicos.udg.mx"))
        .con("titulo_del_proyecto", texto("Sistema de riego automatizado"))
        .con("modalidad", texto("PROTOTIPO"))
        .con("nivel_de_competencia", texto("AVANZADO"))
        .con("variante", texto("Prototipo funcional"))
        .con("introduccion", texto("Intro"))
        .con("justificacion", texto("Porque sí"))
        .con("objetivo", texto("Regar"))
        .con("resumen", texto("Resumen"))
        .con("evidencia", Data::Empty)
        .con("evidencia", texto("https://drive.google.com/evidencia"))
        .con("protocolo_dictaminado", texto("https://drive.google.com/protocolo"))
        .con("codigo_del_integrante_2", Data::Float(219000111.0))
        .con("nombre_del_integrante_2", texto("Beto Díaz"))
        .con("codigo_del_integrante_3", Data::Float(0.0))
        .con("nombre_del_integrante_3", Data::Empty)
}

pub fn contar(conn: &Connection, tabla: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {}", tabla), [], |r| r.get(0)).unwrap()
}
