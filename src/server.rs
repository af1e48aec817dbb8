use actix_web::{web, App, HttpServer};
use rusqlite::Connection;
use std::path::PathBuf;
use tracing::info;

use crate::config::AppConfig;
use crate::db;
use crate::importacion::Importador;
use crate::notificaciones::SmtpMailer;
use crate::server_handlers::*;

/// Estado compartido por los handlers. Cada petición abre su propia conexión.
pub struct AppState {
    pub db_path: PathBuf,
    pub importador: Importador,
    pub mailer: Option<SmtpMailer>,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            db_path: config.db_path.clone(),
            importador: Importador::new(config.importacion.clone()),
            mailer: config.email.clone().map(SmtpMailer::new),
        }
    }

    pub fn conexion(&self) -> rusqlite::Result<Connection> {
        db::abrir_conexion(&self.db_path)
    }
}

/// Registra todas las rutas del panel administrativo
pub fn configurar_rutas(cfg: &mut web::ServiceConfig) {
    cfg.route("/importacion", web::get().to(estado_importacion_handler))
        .route("/importacion", web::post().to(importar_handler))
        .route("/importacion/archivo", web::post().to(subir_archivo_handler))
        .route("/proyectos", web::get().to(listar_proyectos_handler))
        .route("/proyectos/{folio}", web::get().to(detalle_proyecto_handler))
        .route("/proyectos/{folio}", web::put().to(actualizar_proyecto_handler))
        .route("/proyectos/{folio}", web::delete().to(eliminar_proyecto_handler))
        .route("/proyectos/{folio}/participantes", web::post().to(agregar_participante_handler))
        .route("/proyectos/{folio}/participantes/{codigo}", web::delete().to(eliminar_participante_handler))
        .route("/proyectos/{folio}/prorrogas", web::post().to(crear_prorroga_handler))
        .route("/proyectos/{folio}/evaluaciones", web::post().to(registrar_evaluacion_handler))
        .route("/proyectos/{folio}/notificar", web::post().to(notificar_handler))
        .route("/evaluaciones", web::get().to(listar_evaluaciones_handler))
        .route("/formatos/{folio}", web::get().to(formato1_handler))
        .route("/alumnos", web::get().to(listar_alumnos_handler))
        .route("/alumnos", web::post().to(guardar_alumno_handler))
        .route("/alumnos/{codigo}", web::get().to(obtener_alumno_handler))
        .route("/asesores", web::get().to(listar_asesores_handler))
        .route("/asesores", web::post().to(guardar_asesor_handler))
        .route("/asesores/{codigo}", web::delete().to(eliminar_asesor_handler))
        .route("/evaluadores", web::get().to(listar_evaluadores_handler))
        .route("/evaluadores", web::post().to(guardar_evaluador_handler))
        .route("/evaluadores/{codigo}", web::delete().to(eliminar_evaluador_handler))
        .route("/help", web::get().to(help_handler));
}

pub async fn run_server(config: AppConfig) -> std::io::Result<()> {
    if let Err(e) = db::init_db(&config.db_path) {
        return Err(std::io::Error::other(format!("no se pudo inicializar la base de datos: {}", e)));
    }

    let state = web::Data::new(AppState::from_config(&config));
    info!(bind = %config.bind, db = %config.db_path.display(), "iniciando servidor");

    HttpServer::new(move || App::new().app_data(state.clone()).configure(configurar_rutas))
        .bind(config.bind.as_str())?
        .run()
        .await
}
