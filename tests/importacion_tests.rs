mod common;

use calamine::Data;
use common::{contar, fila_registro, texto};
use registro_modular::db;
use registro_modular::error::ImportError;
use registro_modular::excel::FilaExcel;
use registro_modular::importacion::{folio, importar_filas, Importador};
use registro_modular::ImportConfig;
use rust_xlsxwriter::Workbook;
use std::path::Path;

enum Celda {
    T(&'static str),
    N(f64),
    Vacia,
}

use Celda::{Vacia, N, T};

/// Escribe una hoja con las filas dadas a partir de `primera_fila` (base 0)
fn escribir_libro(ruta: &Path, primera_fila: u32, filas: &[Vec<Celda>]) {
    std::fs::create_dir_all(ruta.parent().unwrap()).unwrap();
    let mut libro = Workbook::new();
    let hoja = libro.add_worksheet();
    for (i, fila) in filas.iter().enumerate() {
        let r = primera_fila + i as u32;
        for (j, celda) in fila.iter().enumerate() {
            match celda {
                T(s) => {
                    hoja.write_string(r, j as u16, *s).unwrap();
                }
                N(n) => {
                    hoja.write_number(r, j as u16, *n).unwrap();
                }
                Vacia => {}
            }
        }
    }
    libro.save(ruta).unwrap();
}

fn encabezados_formulario() -> Vec<Celda> {
    vec![
        T("Código del Representante"),
        T("Nombre del Representante"),
        T("Correo del Representante"),
        T(" Código del Asesor "),
        T("Nombre del Asesor"),
        T("Título del Proyecto"),
        T("Evidencia"),
        T("Evidencia"),
        T("Introducción"),
    ]
}

#[test]
fn test_folio_y_alta_completa() {
    let mut conn = db::abrir_en_memoria().unwrap();
    let filas = vec![fila_registro(2, 218466066.0, "A001")];

    let resumen = importar_filas(&mut conn, &filas, "2025B").unwrap();
    assert_eq!(resumen.exitosos, 1);
    assert_eq!(resumen.fallidos, 0);

    let p = db::obtener_proyecto(&conn, "218466066-2025B").unwrap().expect("proyecto creado");
    assert_eq!(p.titulo, "Sistema de riego automatizado");
    assert_eq!(p.asesor.as_deref(), Some("A001"));
    assert_eq!(p.formato1.as_deref(), Some("218466066-2025B"));
    assert_eq!(p.calendario_registro, "2025B");
    assert_eq!(p.evidencia_url, "https://drive.google.com/evidencia");
    assert_eq!(p.dictamen, "PENDIENTE");
    assert_eq!(p.variante.as_deref(), Some("Prototipo funcional"));

    let f = db::obtener_formato1(&conn, "218466066-2025B").unwrap().unwrap();
    assert_eq!(f.objetivo, "Regar");

    // integrante 3 trae código 0 (centinela) y nombre vacío: no se registra
    let parts = db::participantes(&conn, "218466066-2025B").unwrap();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0].codigo_estudiante, "218466066");
    assert!(parts[0].es_representante);
    assert_eq!(parts[0].correo_electronico.as_deref(), Some("ana@alumnos.udg.mx"));
    assert_eq!(parts[1].codigo_estudiante, "219000111");
    assert!(!parts[1].es_representante);
}

#[test]
fn test_reimportar_actualiza_sin_duplicar() {
    let mut conn = db::abrir_en_memoria().unwrap();
    let filas = vec![fila_registro(2, 218466066.0, "A001")];
    importar_filas(&mut conn, &filas, "2025B").unwrap();

    // la misma fila dos veces en el archivo y el archivo importado dos veces
    let filas2 = vec![fila_registro(2, 218466066.0, "A001"), fila_registro(3, 218466066.0, "A001")];
    let resumen = importar_filas(&mut conn, &filas2, "2025B").unwrap();
    assert_eq!(resumen.exitosos, 2);

    for tabla in ["proyecto", "formato1", "asesor"] {
        assert_eq!(contar(&conn, tabla), 1, "tabla {}", tabla);
    }
    assert_eq!(contar(&conn, "alumno"), 2);
    assert_eq!(contar(&conn, "participacion"), 2);
}

#[test]
fn test_reimportar_actualiza_campos() {
    let mut conn = db::abrir_en_memoria().unwrap();
    importar_filas(&mut conn, &[fila_registro(2, 218466066.0, "A001")], "2025B").unwrap();

    let fila = FilaExcel::new(2)
        .con("codigo_del_representante", Data::Float(218466066.0))
        .con("nombre_del_representante", texto("Ana López Pérez"))
        .con("codigo_del_asesor", texto("A001"))
        .con("nombre_del_asesor", texto("Dra. Marta Ruiz"))
        .con("titulo_del_proyecto", texto("Riego v2"));
    importar_filas(&mut conn, &[fila], "2025B").unwrap();

    assert_eq!(contar(&conn, "proyecto"), 1);
    let p = db::obtener_proyecto(&conn, "218466066-2025B").unwrap().unwrap();
    assert_eq!(p.titulo, "Riego v2");
    let a = db::obtener_alumno(&conn, "218466066").unwrap().unwrap();
    assert_eq!(a.nombre_completo, "Ana López Pérez");
    // sin correo en la segunda corrida: se conserva el anterior
    assert_eq!(a.correo_electronico.as_deref(), Some("ana@alumnos.udg.mx"));
}

#[test]
fn test_fila_sin_asesor_no_crea_nada() {
    let mut conn = db::abrir_en_memoria().unwrap();
    let sin_asesor = fila_registro(2, 218466066.0, "   ");
    let buena = fila_registro(3, 219555000.0, "A002");

    let resumen = importar_filas(&mut conn, &[sin_asesor, buena], "2025B").unwrap();
    assert_eq!(resumen.exitosos, 1);
    assert_eq!(resumen.fallidos, 1);
    assert_eq!(resumen.fallas[0].fila, 2);
    assert_eq!(resumen.fallas[0].folio.as_deref(), Some("218466066-2025B"));

    assert!(db::obtener_proyecto(&conn, "218466066-2025B").unwrap().is_none());
    assert!(db::obtener_formato1(&conn, "218466066-2025B").unwrap().is_none());
    assert_eq!(contar(&conn, "asesor"), 1);
    assert_eq!(contar(&conn, "proyecto"), 1);
}

#[test]
fn test_fila_sin_representante_se_cuenta_como_fallida() {
    let mut conn = db::abrir_en_memoria().unwrap();
    let sin_rep = fila_registro(2, 0.0, "A001");
    let resumen = importar_filas(&mut conn, &[sin_rep], "2025A").unwrap();
    assert_eq!(resumen.exitosos, 0);
    assert_eq!(resumen.fallidos, 1);
    assert_eq!(resumen.fallas[0].folio, None);
    assert_eq!(contar(&conn, "proyecto"), 0);
    assert_eq!(contar(&conn, "participacion"), 0);
    assert_eq!(contar(&conn, "asesor"), 0);
}

#[test]
fn test_error_de_persistencia_no_deja_escrituras_parciales() {
    let mut conn = db::abrir_en_memoria().unwrap();
    conn.execute_batch(
        "CREATE TRIGGER forzar_falla BEFORE INSERT ON proyecto WHEN NEW.titulo = 'FALLA'
         BEGIN SELECT RAISE(ABORT, 'falla forzada'); END;",
    )
    .unwrap();

    let mala = FilaExcel::new(2)
        .con("codigo_del_representante", texto("111"))
        .con("nombre_del_representante", texto("Carla"))
        .con("codigo_del_asesor", texto("A-FALLA"))
        .con("titulo_del_proyecto", texto("FALLA"));
    let buena = fila_registro(3, 222.0, "A-OK");

    let resumen = importar_filas(&mut conn, &[mala, buena], "2025B").unwrap();
    assert_eq!(resumen.exitosos, 1);
    assert_eq!(resumen.fallidos, 1);
    assert!(resumen.fallas[0].motivo.contains("falla forzada"));

    // el asesor y el formato de la fila fallida se deshicieron con su savepoint
    assert!(db::obtener_asesor(&conn, "A-FALLA").unwrap().is_none());
    assert!(db::obtener_formato1(&conn, &folio("111", "2025B")).unwrap().is_none());
    assert!(db::obtener_alumno(&conn, "111").unwrap().is_none());
    assert!(db::obtener_proyecto(&conn, "222-2025B").unwrap().is_some());
}

#[test]
fn test_archivo_inexistente() {
    let dir = tempfile::tempdir().unwrap();
    let importador = Importador::new(ImportConfig::new(dir.path(), "Registro_{calendario}.xlsx"));
    let mut conn = db::abrir_en_memoria().unwrap();

    match importador.importar_calendario(&mut conn, "2025B") {
        Err(ImportError::ArchivoNoEncontrado(ruta)) => {
            assert_eq!(ruta, dir.path().join("2025B").join("1-Procesados").join("Registro_2025B.xlsx"));
        }
        otro => panic!("se esperaba ArchivoNoEncontrado, llegó {:?}", otro),
    }
}

#[test]
fn test_archivo_corrupto_es_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let importador = Importador::new(ImportConfig::new(dir.path(), "Registro_{calendario}.xlsx"));
    let ruta = importador.ruta_archivo("2025A");
    std::fs::create_dir_all(ruta.parent().unwrap()).unwrap();
    std::fs::write(&ruta, b"esto no es un libro de excel").unwrap();

    let mut conn = db::abrir_en_memoria().unwrap();
    let err = importador.importar_calendario(&mut conn, "2025A").unwrap_err();
    assert!(matches!(err, ImportError::Excel(_)), "llegó {:?}", err);
    assert_eq!(contar(&conn, "proyecto"), 0);
}

#[test]
fn test_importar_libro_real() {
    let dir = tempfile::tempdir().unwrap();
    let importador = Importador::new(ImportConfig::new(dir.path(), "Registro_{calendario}.xlsx"));
    escribir_libro(
        &importador.ruta_archivo("2025B"),
        0,
        &[
            encabezados_formulario(),
            vec![N(218466066.0), T("Ana López"), T("ana@x.mx"), T("A001"), T("Marta"), T("Riego"), Vacia, T("https://d/x"), T("Intro")],
            // sin asesor
            vec![N(219000111.0), T("Beto"), Vacia, Vacia, T("Marta"), T("Otro"), T("https://d/y")],
            vec![],
            vec![N(219555000.0), T("Carla"), Vacia, T("A002"), T("Luis"), T("Tercero")],
        ],
    );

    let mut conn = db::abrir_en_memoria().unwrap();
    let resumen = importador.importar_calendario(&mut conn, "2025B").unwrap();
    // la fila vacía no cuenta
    assert_eq!(resumen.exitosos, 2);
    assert_eq!(resumen.fallidos, 1);
    assert_eq!(resumen.fallas[0].fila, 3);
    assert_eq!(resumen.fallas[0].folio.as_deref(), Some("219000111-2025B"));

    let p = db::obtener_proyecto(&conn, "218466066-2025B").unwrap().unwrap();
    assert_eq!(p.titulo, "Riego");
    assert_eq!(p.asesor.as_deref(), Some("A001"));
    assert_eq!(p.evidencia_url, "https://d/x");
    assert_eq!(db::obtener_formato1(&conn, "218466066-2025B").unwrap().unwrap().introduccion, "Intro");

    assert!(db::obtener_proyecto(&conn, "219000111-2025B").unwrap().is_none());
    assert_eq!(db::obtener_proyecto(&conn, "219555000-2025B").unwrap().unwrap().evidencia_url, "");
    assert_eq!(contar(&conn, "proyecto"), 2);
}

#[test]
fn test_numero_de_fila_con_encabezado_desplazado() {
    let dir = tempfile::tempdir().unwrap();
    let importador = Importador::new(ImportConfig::new(dir.path(), "Registro_{calendario}.xlsx"));
    // encabezado en la línea 3 de la hoja; las dos primeras quedan vacías
    escribir_libro(
        &importador.ruta_archivo("2025A"),
        2,
        &[
            encabezados_formulario(),
            vec![N(218466066.0), T("Ana"), Vacia, T("A001"), T("Marta"), T("Riego")],
            vec![N(219000111.0), T("Beto"), Vacia, Vacia, T("Marta"), T("Otro")],
        ],
    );

    let mut conn = db::abrir_en_memoria().unwrap();
    let resumen = importador.importar_calendario(&mut conn, "2025A").unwrap();
    assert_eq!(resumen.exitosos, 1);
    assert_eq!(resumen.fallidos, 1);
    assert_eq!(resumen.fallas[0].fila, 5);
}

#[test]
fn test_codigo_repetido_no_quita_la_representacion() {
    let mut conn = db::abrir_en_memoria().unwrap();
    // el representante se repite como integrante 2
    let fila = FilaExcel::new(2)
        .con("codigo_del_representante", Data::Float(218466066.0))
        .con("nombre_del_representante", texto("Ana López"))
        .con("codigo_del_asesor", texto("A001"))
        .con("codigo_del_integrante_2", Data::Float(218466066.0))
        .con("nombre_del_integrante_2", texto("Ana López"))
        .con("codigo_del_integrante_3", texto("219000111"))
        .con("nombre_del_integrante_3", texto("Beto Díaz"));

    let resumen = importar_filas(&mut conn, &[fila], "2025B").unwrap();
    assert_eq!(resumen.exitosos, 1);

    let parts = db::participantes(&conn, "218466066-2025B").unwrap();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0].codigo_estudiante, "218466066");
    assert!(parts[0].es_representante);
    assert!(!parts[1].es_representante);
}
