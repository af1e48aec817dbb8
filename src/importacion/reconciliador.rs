use rusqlite::Connection;

use crate::db::{upsert_alumno, upsert_asesor, upsert_formato1, upsert_participacion, upsert_proyecto};
use crate::error::FilaError;
use crate::excel::FilaExcel;
use crate::importacion::calendario::folio;
use crate::importacion::columnas as col;
use crate::models::{Alumno, Asesor, Formato1, Participacion, Proyecto};

/// Deriva el folio de la fila. Sin código de representante la fila no puede
/// ligarse a ningún proyecto.
pub fn folio_de_fila(fila: &FilaExcel, calendario: &str) -> Result<String, FilaError> {
    let codigo = fila.valor(col::CODIGO_REPRESENTANTE).ok_or(FilaError::SinRepresentante)?;
    Ok(folio(&codigo, calendario))
}

/// Integrantes con código y nombre presentes, junto con su bandera de
/// representante. El integrante 1 (representante) se lee de sus columnas
/// propias e incluye correo; el 2 y el 3 usan columnas genéricas sin correo.
/// Un código repetido en la misma fila se ignora: gana el primer lugar, así
/// el representante nunca pierde su bandera.
pub fn integrantes(fila: &FilaExcel) -> Vec<(Alumno, bool)> {
    let mut out: Vec<(Alumno, bool)> = Vec::with_capacity(col::MAX_INTEGRANTES);
    for n in 1..=col::MAX_INTEGRANTES {
        let (codigo, nombre, correo) = if n == 1 {
            (
                fila.valor(col::CODIGO_REPRESENTANTE),
                fila.valor(col::NOMBRE_REPRESENTANTE),
                fila.valor(col::CORREO_REPRESENTANTE),
            )
        } else {
            (fila.valor(&col::codigo_integrante(n)), fila.valor(&col::nombre_integrante(n)), None)
        };
        if let (Some(codigo_estudiante), Some(nombre_completo)) = (codigo, nombre) {
            if out.iter().any(|(a, _)| a.codigo_estudiante == codigo_estudiante) {
                continue;
            }
            out.push((Alumno { codigo_estudiante, nombre_completo, correo_electronico: correo }, n == 1));
        }
    }
    out
}

/// Asesor de la fila; el código es la llave natural y no se puede inventar
pub fn asesor_de_fila(fila: &FilaExcel) -> Result<Asesor, FilaError> {
    let codigo_asesor = fila.valor(col::CODIGO_ASESOR).ok_or(FilaError::SinAsesor)?;
    Ok(Asesor {
        codigo_asesor,
        nombre_completo: fila.texto(col::NOMBRE_ASESOR),
        correo_electronico: fila.texto(col::CORREO_ASESOR),
    })
}

pub fn formato1_de_fila(fila: &FilaExcel, folio: &str) -> Formato1 {
    Formato1 {
        folio: folio.to_string(),
        introduccion: fila.texto(col::INTRODUCCION),
        justificacion: fila.texto(col::JUSTIFICACION),
        objetivo: fila.texto(col::OBJETIVO),
        resumen: fila.texto(col::RESUMEN),
    }
}

pub fn proyecto_de_fila(fila: &FilaExcel, folio: &str, calendario: &str, asesor: &Asesor) -> Proyecto {
    Proyecto {
        folio: folio.to_string(),
        titulo: fila.texto(col::TITULO),
        asesor: Some(asesor.codigo_asesor.clone()),
        evaluador: None,
        formato1: Some(folio.to_string()),
        modalidad: fila.texto(col::MODALIDAD),
        nivel_competencia: fila.texto(col::NIVEL_COMPETENCIA),
        variante: fila.primer_valor(col::VARIANTE),
        dictamen: String::new(),
        calendario_registro: calendario.to_string(),
        evidencia_url: fila.primer_valor(col::EVIDENCIA).unwrap_or_default(),
        protocolo_dictamen_url: fila.texto(col::PROTOCOLO_DICTAMINADO),
        evidencia_adicional_url: fila.valor(col::EVIDENCIA_ADICIONAL),
    }
}

/// Reconcilia una fila ya con folio: asesor, formato 1, proyecto, alumnos y
/// participaciones. Quien llama decide el alcance transaccional.
pub fn reconciliar_fila(conn: &Connection, fila: &FilaExcel, folio: &str, calendario: &str) -> Result<(), FilaError> {
    let asesor = asesor_de_fila(fila)?;
    upsert_asesor(conn, &asesor)?;

    upsert_formato1(conn, &formato1_de_fila(fila, folio))?;
    upsert_proyecto(conn, &proyecto_de_fila(fila, folio, calendario, &asesor))?;

    for (alumno, es_representante) in integrantes(fila) {
        upsert_alumno(conn, &alumno)?;
        upsert_participacion(
            conn,
            &Participacion {
                proyecto: folio.to_string(),
                alumno: alumno.codigo_estudiante.clone(),
                es_representante,
            },
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::Data;

    #[test]
    fn test_integrantes_requieren_codigo_y_nombre() {
        let fila = FilaExcel::new(2)
            .con(col::CODIGO_REPRESENTANTE, Data::Float(218466066.0))
            .con(col::NOMBRE_REPRESENTANTE, Data::String("Ana".into()))
            .con(col::CORREO_REPRESENTANTE, Data::String("ana@alumnos.mx".into()))
            .con("codigo_del_integrante_2", Data::String("219000111".into()))
            .con("codigo_del_integrante_3", Data::String("219000222".into()))
            .con("nombre_del_integrante_3", Data::String("Beto".into()));

        let ints = integrantes(&fila);
        assert_eq!(ints.len(), 2);
        assert_eq!(ints[0].0.codigo_estudiante, "218466066");
        assert!(ints[0].1);
        assert_eq!(ints[0].0.correo_electronico.as_deref(), Some("ana@alumnos.mx"));
        assert_eq!(ints[1].0.codigo_estudiante, "219000222");
        assert!(!ints[1].1);
        assert!(ints[1].0.correo_electronico.is_none());
    }

    #[test]
    fn test_codigo_repetido_conserva_al_representante() {
        let fila = FilaExcel::new(2)
            .con(col::CODIGO_REPRESENTANTE, Data::Float(218466066.0))
            .con(col::NOMBRE_REPRESENTANTE, Data::String("Ana".into()))
            .con("codigo_del_integrante_2", Data::String("218466066".into()))
            .con("nombre_del_integrante_2", Data::String("Ana L.".into()))
            .con("codigo_del_integrante_3", Data::Float(218466066.0))
            .con("nombre_del_integrante_3", Data::String("Ana".into()));

        let ints = integrantes(&fila);
        assert_eq!(ints.len(), 1);
        assert_eq!(ints[0].0.nombre_completo, "Ana");
        assert!(ints[0].1);
    }

    #[test]
    fn test_evidencia_toma_primera_variante_presente() {
        let fila = FilaExcel::new(2)
            .con("sube_tu_evidencia", Data::String("https://drive/b".into()))
            .con("evidencia_1", Data::String("https://drive/c".into()));
        let asesor = Asesor { codigo_asesor: "A1".into(), nombre_completo: String::new(), correo_electronico: String::new() };
        let p = proyecto_de_fila(&fila, "1-2025A", "2025A", &asesor);
        assert_eq!(p.evidencia_url, "https://drive/b");
        assert_eq!(p.formato1.as_deref(), Some("1-2025A"));
    }
}
