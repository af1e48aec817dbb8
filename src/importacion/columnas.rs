// Encabezados (ya normalizados) que se leen de la hoja de registro

pub const CODIGO_REPRESENTANTE: &str = "codigo_del_representante";
pub const NOMBRE_REPRESENTANTE: &str = "nombre_del_representante";
pub const CORREO_REPRESENTANTE: &str = "correo_del_representante";

pub const CODIGO_ASESOR: &str = "codigo_del_asesor";
pub const NOMBRE_ASESOR: &str = "nombre_del_asesor";
pub const CORREO_ASESOR: &str = "correo_del_asesor";

pub const TITULO: &str = "titulo_del_proyecto";
pub const MODALIDAD: &str = "modalidad";
pub const NIVEL_COMPETENCIA: &str = "nivel_de_competencia";

pub const INTRODUCCION: &str = "introduccion";
pub const JUSTIFICACION: &str = "justificacion";
pub const OBJETIVO: &str = "objetivo";
pub const RESUMEN: &str = "resumen";

pub const PROTOCOLO_DICTAMINADO: &str = "protocolo_dictaminado";
pub const EVIDENCIA_ADICIONAL: &str = "evidencia_adicional";

/// La columna de la variante cambia de nombre entre versiones del formulario
pub const VARIANTE: &[&str] = &["variante", "variante_de_la_modalidad", "variante_de_modalidad"];

/// Variantes conocidas de la columna de evidencia principal, en orden de preferencia
pub const EVIDENCIA: &[&str] = &[
    "evidencia",
    "evidencia_del_proyecto",
    "sube_tu_evidencia",
    "url_de_evidencia",
    "evidencia_1",
];

/// Integrantes por proyecto (el 1 es el representante)
pub const MAX_INTEGRANTES: usize = 3;

pub fn codigo_integrante(n: usize) -> String {
    format!("codigo_del_integrante_{}", n)
}

pub fn nombre_integrante(n: usize) -> String {
    format!("nombre_del_integrante_{}", n)
}
