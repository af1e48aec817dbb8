//! Notificaciones por correo a los involucrados de un proyecto.
//!
//! Los destinatarios salen del asesor, del evaluador y de todos los alumnos
//! participantes. El envío real pasa por el trait [`Mailer`]; [`SmtpMailer`]
//! lo implementa sobre el transporte SMTP asíncrono de `lettre`.

use rusqlite::Connection;
use serde::Serialize;
use std::collections::HashSet;

use crate::config::EmailConfig;
use crate::db;
use crate::error::NotificacionError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notificacion {
    pub folio: String,
    pub destinatarios: Vec<String>,
    pub asunto: String,
    pub cuerpo: String,
}

/// Quita vacíos y duplicados (sin distinguir mayúsculas), conservando el
/// orden de la primera aparición
pub fn deduplicar_correos<I, S>(correos: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut vistos = HashSet::new();
    let mut out = Vec::new();
    for c in correos {
        let c = c.as_ref().trim();
        if c.is_empty() {
            continue;
        }
        if vistos.insert(c.to_lowercase()) {
            out.push(c.to_string());
        }
    }
    out
}

/// Correos de asesor, evaluador y participantes del proyecto, sin duplicados
pub fn destinatarios(conn: &Connection, folio: &str) -> Result<Vec<String>, NotificacionError> {
    let proyecto = db::obtener_proyecto(conn, folio)?.ok_or_else(|| NotificacionError::ProyectoNoEncontrado(folio.to_string()))?;

    let mut correos: Vec<String> = Vec::new();
    if let Some(codigo) = &proyecto.asesor {
        if let Some(a) = db::obtener_asesor(conn, codigo)? {
            correos.push(a.correo_electronico);
        }
    }
    if let Some(codigo) = &proyecto.evaluador {
        if let Some(e) = db::obtener_evaluador(conn, codigo)? {
            correos.push(e.correo_evaluador);
        }
    }
    for p in db::participantes(conn, folio)? {
        if let Some(c) = p.correo_electronico {
            correos.push(c);
        }
    }
    Ok(deduplicar_correos(correos))
}

/// Arma el mensaje del proyecto. Falla si no hay a quién enviarlo.
pub fn preparar_notificacion(conn: &Connection, folio: &str, mensaje: Option<&str>) -> Result<Notificacion, NotificacionError> {
    let destinatarios = destinatarios(conn, folio)?;
    if destinatarios.is_empty() {
        return Err(NotificacionError::SinDestinatarios(folio.to_string()));
    }
    let proyecto = db::obtener_proyecto(conn, folio)?.ok_or_else(|| NotificacionError::ProyectoNoEncontrado(folio.to_string()))?;

    let mut cuerpo = format!(
        "Folio: {}\nTítulo: {}\nCalendario: {}\nModalidad: {}\nDictamen: {}\n",
        proyecto.folio, proyecto.titulo, proyecto.calendario_registro, proyecto.modalidad, proyecto.dictamen
    );
    if let Some(m) = mensaje.map(str::trim).filter(|m| !m.is_empty()) {
        cuerpo.push('\n');
        cuerpo.push_str(m);
        cuerpo.push('\n');
    }

    Ok(Notificacion {
        folio: proyecto.folio.clone(),
        destinatarios,
        asunto: format!("[Proyecto Modular] {} - {}", proyecto.folio, proyecto.titulo),
        cuerpo,
    })
}

/// Transporte de correo. Un error de transporte siempre se propaga.
#[allow(async_fn_in_trait)]
pub trait Mailer {
    async fn enviar(&self, notificacion: &Notificacion) -> Result<(), NotificacionError>;
}

/// Envío vía SMTP (STARTTLS) con `lettre`
#[derive(Debug, Clone)]
pub struct SmtpMailer {
    config: EmailConfig,
}

impl SmtpMailer {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }
}

impl Mailer for SmtpMailer {
    async fn enviar(&self, n: &Notificacion) -> Result<(), NotificacionError> {
        use lettre::{
            message::{header::ContentType, Mailbox},
            transport::smtp::authentication::Credentials,
            AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
        };

        let mut builder = Message::builder()
            .from(self.config.from_address.parse::<Mailbox>()?)
            .subject(n.asunto.clone())
            .header(ContentType::TEXT_PLAIN);
        for d in &n.destinatarios {
            builder = builder.to(d.parse::<Mailbox>()?);
        }
        let email = builder.body(n.cuerpo.clone()).map_err(|e| NotificacionError::Construccion(e.to_string()))?;

        let mut transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?.port(self.config.smtp_port);
        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            transport = transport.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        transport.build().send(email).await?;
        tracing::info!(folio = %n.folio, destinatarios = n.destinatarios.len(), "notificación enviada");
        Ok(())
    }
}

/// Prepara y envía la notificación del proyecto
pub async fn notificar_proyecto<M: Mailer>(
    conn: &Connection,
    folio: &str,
    mensaje: Option<&str>,
    mailer: &M,
) -> Result<Notificacion, NotificacionError> {
    let n = preparar_notificacion(conn, folio, mensaje)?;
    mailer.enviar(&n).await?;
    Ok(n)
}
