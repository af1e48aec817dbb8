use chrono::{Datelike, Local, NaiveDate};

/// Calendario escolar de una fecha: año + "A" (enero-junio) o "B" (julio-diciembre)
pub fn calendario_de(fecha: NaiveDate) -> String {
    let ciclo = if fecha.month() < 7 { "A" } else { "B" };
    format!("{}{}", fecha.year(), ciclo)
}

/// Calendario según la fecha local actual
pub fn calendario_actual() -> String {
    calendario_de(Local::now().date_naive())
}

/// `AAAA` + `A|B`, p. ej. `2025B`
pub fn es_calendario_valido(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 5 && b[..4].iter().all(u8::is_ascii_digit) && matches!(b[4], b'A' | b'B')
}

/// Folio del proyecto: `{codigo_representante}-{calendario}`
pub fn folio(codigo_representante: &str, calendario: &str) -> String {
    format!("{}-{}", codigo_representante, calendario)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calendario_por_mes() {
        let d = |m| NaiveDate::from_ymd_opt(2025, m, 15).unwrap();
        assert_eq!(calendario_de(d(1)), "2025A");
        assert_eq!(calendario_de(d(6)), "2025A");
        assert_eq!(calendario_de(d(7)), "2025B");
        assert_eq!(calendario_de(d(12)), "2025B");
    }

    #[test]
    fn test_folio() {
        assert_eq!(folio("218466066", "2025B"), "218466066-2025B");
    }

    #[test]
    fn test_calendario_valido() {
        assert!(es_calendario_valido("2025B"));
        assert!(!es_calendario_valido("2025C"));
        assert!(!es_calendario_valido("25B"));
        assert!(!es_calendario_valido("../..A"));
    }
}
