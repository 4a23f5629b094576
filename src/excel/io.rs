use calamine::Data;

/// Convierte una celda de calamine a String (los flotantes enteros pierden
/// el ".0" para no ensuciar códigos y semanas).
pub fn celda_a_texto(c: &Data) -> String {
    match c {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            if (f.floor() - f).abs() < f64::EPSILON {
                format!("{}", *f as i64)
            } else {
                format!("{}", f)
            }
        }
        Data::Int(i) => format!("{}", i),
        Data::Bool(b) => format!("{}", b),
        Data::Empty => String::new(),
        Data::Error(_) => String::new(),
        Data::DateTime(s) => s.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Parsea un número desde texto tolerando formato local: coma decimal,
/// sufijo '%' y prefijo '$'. "" y texto libre devuelven `None`.
pub fn parsear_numero(s: &str) -> Option<f64> {
    let limpio = s
        .trim()
        .trim_start_matches('$')
        .trim_end_matches('%')
        .replace(',', ".")
        .replace(' ', "");
    if limpio.is_empty() {
        return None;
    }
    limpio.parse::<f64>().ok()
}

/// Normaliza un encabezado: minúsculas, sin espacios, guiones bajos ni
/// acentos, para que "Promesas Cumplidas" y "promesas_cumplidas" mapeen a la
/// misma columna.
pub fn normalizar_encabezado(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' | 'ü' => 'u',
            'ñ' => 'n',
            otro => otro,
        })
        .collect()
}

/// Limpia la columna `motos`: celdas tipo "Italika 2" -> 2. Sin segunda
/// palabra numérica no hay valor.
pub fn limpiar_motos(s: &str) -> Option<i64> {
    let partes: Vec<&str> = s.split_whitespace().collect();
    if partes.len() > 1 {
        partes[1].parse::<i64>().ok()
    } else {
        None
    }
}
