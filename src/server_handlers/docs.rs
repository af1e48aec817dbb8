use actix_web::{HttpResponse, Responder};
use serde_json::json;

use crate::config::TOKEN_CALENDARIO;
use crate::importacion::calendario_actual;

pub async fn help_handler() -> impl Responder {
    let help = json!({
        "description": "API administrativa del registro de proyectos modulares. POST /importacion lee la hoja de registro del calendario en curso y da de alta asesores, formatos, proyectos, alumnos y participaciones.",
        "calendario_actual": calendario_actual(),
        "ruta_archivo": format!("{{REGISTRO_BASE_PATH}}/{{calendario}}/1-Procesados/{{REGISTRO_PLANTILLA_ARCHIVO con {} sustituido}}", TOKEN_CALENDARIO),
        "rutas": [
            "GET /importacion?calendario=2025B",
            "POST /importacion?calendario=2025B",
            "POST /importacion/archivo (multipart)",
            "GET /proyectos?calendario=&modalidad=&dictamen=&asesor=&evaluador=&q=",
            "GET|PUT|DELETE /proyectos/{folio}",
            "POST /proyectos/{folio}/participantes",
            "DELETE /proyectos/{folio}/participantes/{codigo}",
            "POST /proyectos/{folio}/prorrogas",
            "POST /proyectos/{folio}/evaluaciones",
            "POST /proyectos/{folio}/notificar",
            "GET /evaluaciones?proyecto=&evaluador=&tipo=&resolutivo=",
            "GET /formatos/{folio}",
            "GET|POST /alumnos, GET /alumnos/{codigo}",
            "GET|POST /asesores, DELETE /asesores/{codigo}",
            "GET|POST /evaluadores, DELETE /evaluadores/{codigo}"
        ],
        "evaluacion_example": {
            "evaluador": "E001",
            "tipo_revision": "FONDO",
            "resolutivo": "PENDIENTE",
            "observaciones": "Corregir la justificación"
        }
    });

    HttpResponse::Ok().json(help)
}
