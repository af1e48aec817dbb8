use calamine::Data;
use registro_modular::excel::{limpiar_celda, limpiar_valor, normalizar_encabezado, FilaExcel};

#[test]
fn test_normalizacion_es_idempotente() {
    let encabezados = [
        "Código del Representante",
        "  NOMBRE DEL ASESOR (COMPLETO) ",
        "Introducción",
        "Año de ingreso",
        "Sube tu evidencia (PDF)",
        "ya_normalizado",
        "",
    ];
    for e in encabezados {
        let una = normalizar_encabezado(e);
        assert_eq!(normalizar_encabezado(&una), una, "no idempotente para {:?}", e);
        assert!(!una.contains(' '));
        assert!(!una.contains('('));
    }
}

#[test]
fn test_normalizacion_casos_del_formulario() {
    assert_eq!(normalizar_encabezado("Código del Representante"), "codigo_del_representante");
    assert_eq!(normalizar_encabezado("Sube tu evidencia (PDF)"), "sube_tu_evidencia_pdf");
    assert_eq!(normalizar_encabezado("Justificación"), "justificacion");
    assert_eq!(normalizar_encabezado("DISEÑO"), "diseno");
}

#[test]
fn test_ceros_son_ausentes() {
    for c in [Data::Float(0.0), Data::Float(-0.0), Data::Int(0)] {
        assert_eq!(limpiar_celda(&c), None);
        assert_eq!(limpiar_valor(&[c.clone()]), None);
    }
}

#[test]
fn test_enteros_con_formato_flotante() {
    for n in [123i64, 218466066, 7, 999999999] {
        let limpio = limpiar_celda(&Data::Float(n as f64)).unwrap();
        assert_eq!(limpio, n.to_string());
        assert!(!limpio.contains('.'));
    }
    assert_eq!(limpiar_celda(&Data::Int(219000111)), Some("219000111".to_string()));
}

#[test]
fn test_textos_y_vacios() {
    assert_eq!(limpiar_celda(&texto("  A001  ")), Some("A001".to_string()));
    assert_eq!(limpiar_celda(&texto("   ")), None);
    assert_eq!(limpiar_celda(&Data::Empty), None);
    assert_eq!(limpiar_celda(&Data::Float(f64::NAN)), None);
}

#[test]
fn test_columna_duplicada_toma_primer_no_vacio() {
    let fila = FilaExcel::new(2)
        .con("evidencia", Data::Empty)
        .con("evidencia", texto("  "))
        .con("evidencia", texto("https://drive/a"))
        .con("evidencia", texto("https://drive/b"));
    assert_eq!(fila.valor("evidencia"), Some("https://drive/a".to_string()));

    // el primer candidato no vacío es un cero: sigue siendo ausente
    let fila = FilaExcel::new(3).con("codigo", Data::Empty).con("codigo", Data::Float(0.0)).con("codigo", texto("X"));
    assert_eq!(fila.valor("codigo"), None);

    assert_eq!(limpiar_valor(&[Data::Empty, texto("")]), None);
}

fn texto(s: &str) -> Data {
    Data::String(s.to_string())
}
