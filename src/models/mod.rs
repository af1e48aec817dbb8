// Estructuras de datos principales del registro de proyectos modulares

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alumno {
    pub codigo_estudiante: String,
    pub nombre_completo: String,
    /// Sólo se captura para el representante
    pub correo_electronico: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asesor {
    pub codigo_asesor: String,
    pub nombre_completo: String,
    pub correo_electronico: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluador {
    pub codigo_evaluador: String,
    pub nombre_completo: String,
    pub correo_evaluador: String,
    pub especializacion: String,
}

/// Documentación inicial del proyecto. Comparte el folio con `Proyecto`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formato1 {
    pub folio: String,
    pub introduccion: String,
    pub justificacion: String,
    pub objetivo: String,
    pub resumen: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proyecto {
    /// Folio compuesto (ej. 218466066-2025B). Inmutable.
    pub folio: String,
    pub titulo: String,
    pub asesor: Option<String>,
    pub evaluador: Option<String>,
    pub formato1: Option<String>,
    pub modalidad: String,
    pub nivel_competencia: String,
    pub variante: Option<String>,
    pub dictamen: String,
    pub calendario_registro: String,
    pub evidencia_url: String,
    pub protocolo_dictamen_url: String,
    pub evidencia_adicional_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participacion {
    pub proyecto: String,
    pub alumno: String,
    pub es_representante: bool,
}

/// Participante ya resuelto con los datos del alumno (vista de detalle)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Participante {
    pub codigo_estudiante: String,
    pub nombre_completo: String,
    pub correo_electronico: Option<String>,
    pub es_representante: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prorroga {
    pub id_prorroga: i64,
    pub proyecto: String,
    pub justificacion: String,
    pub calendario_presentacion: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoRevision {
    #[default]
    Forma,
    Fondo,
    Final,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Resolutivo {
    Aprobado,
    Rechazado,
    Pendiente,
    NoAplica,
}

impl TipoRevision {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoRevision::Forma => "FORMA",
            TipoRevision::Fondo => "FONDO",
            TipoRevision::Final => "FINAL",
        }
    }
}

impl Resolutivo {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolutivo::Aprobado => "APROBADO",
            Resolutivo::Rechazado => "RECHAZADO",
            Resolutivo::Pendiente => "PENDIENTE",
            Resolutivo::NoAplica => "NO_APLICA",
        }
    }
}

impl fmt::Display for TipoRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Resolutivo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TipoRevision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "FORMA" => Ok(TipoRevision::Forma),
            "FONDO" => Ok(TipoRevision::Fondo),
            "FINAL" => Ok(TipoRevision::Final),
            otro => Err(format!("tipo de revisión desconocido: {}", otro)),
        }
    }
}

impl FromStr for Resolutivo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "APROBADO" => Ok(Resolutivo::Aprobado),
            "RECHAZADO" => Ok(Resolutivo::Rechazado),
            "PENDIENTE" => Ok(Resolutivo::Pendiente),
            "NO_APLICA" => Ok(Resolutivo::NoAplica),
            otro => Err(format!("resolutivo desconocido: {}", otro)),
        }
    }
}

/// Registro histórico de una revisión. Sólo se inserta, nunca se edita.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluacion {
    pub id_evaluacion: i64,
    pub proyecto: String,
    pub evaluador: Option<String>,
    /// Asignada por el servidor (RFC 3339, UTC)
    pub fecha_evaluacion: String,
    pub tipo_revision: TipoRevision,
    pub resolutivo: Resolutivo,
    pub observaciones: String,
}

/// Vista completa de un proyecto para el detalle del panel administrativo
#[derive(Debug, Clone, Serialize)]
pub struct ProyectoDetalle {
    pub proyecto: Proyecto,
    pub formato1: Option<Formato1>,
    pub asesor: Option<Asesor>,
    pub evaluador: Option<Evaluador>,
    pub participantes: Vec<Participante>,
    pub prorrogas: Vec<Prorroga>,
    pub evaluaciones: Vec<Evaluacion>,
}
