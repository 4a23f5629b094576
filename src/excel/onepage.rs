use crate::excel::io::{celda_a_texto, limpiar_motos, normalizar_encabezado, parsear_numero};
use crate::metricas::CatalogoMetricas;
use crate::models::Observacion;
use calamine::{open_workbook_auto, Reader};
use std::collections::HashMap;

/// Hoja preferida dentro del workbook semanal.
pub const HOJA_ONEPAGE: &str = "one_page";

/// Índices de columna resueltos desde la fila de encabezados. El orden de
/// columnas del archivo no importa: se mapea por nombre normalizado.
pub struct MapaColumnas {
    pub nombre: Option<usize>,
    pub zona: Option<usize>,
    pub semana: Option<usize>,
    pub experiencia: Option<usize>,
    pub motos: Option<usize>,
    /// (nombre de métrica del catálogo, índice de columna)
    pub metricas: Vec<(String, usize)>,
}

/// Resuelve el mapa de columnas a partir de los encabezados.
///
/// Alias aceptados: "cobrador" por "nombre" y la columna histórica "meta",
/// que se renombra a `logros_meta`.
pub fn mapear_columnas(encabezados: &[String], catalogo: &CatalogoMetricas) -> MapaColumnas {
    let mut mapa = MapaColumnas {
        nombre: None,
        zona: None,
        semana: None,
        experiencia: None,
        motos: None,
        metricas: Vec::new(),
    };

    // Índice métrica-normalizada -> nombre del catálogo
    let mut indice_metricas: HashMap<String, String> = HashMap::new();
    for m in catalogo.todas() {
        indice_metricas.insert(normalizar_encabezado(&m.nombre), m.nombre.clone());
    }

    for (i, h) in encabezados.iter().enumerate() {
        let norm = normalizar_encabezado(h);
        match norm.as_str() {
            "nombre" | "cobrador" => mapa.nombre = Some(i),
            "zona" => mapa.zona = Some(i),
            "semana" => mapa.semana = Some(i),
            "experiencia" => mapa.experiencia = Some(i),
            "motos" => mapa.motos = Some(i),
            // columna legacy: "meta" es logros_meta
            "meta" => mapa.metricas.push(("logros_meta".to_string(), i)),
            _ => {
                if let Some(nombre) = indice_metricas.get(&norm) {
                    mapa.metricas.push((nombre.clone(), i));
                }
            }
        }
    }
    mapa
}

/// Convierte una fila de celdas-texto en una `Observacion`. Filas sin nombre
/// de cobrador se descartan (`None`).
pub fn fila_a_observacion(mapa: &MapaColumnas, celdas: &[String]) -> Option<Observacion> {
    let tomar = |idx: Option<usize>| -> String {
        idx.and_then(|i| celdas.get(i)).map(|s| s.trim().to_string()).unwrap_or_default()
    };

    let cobrador = tomar(mapa.nombre);
    if cobrador.is_empty() {
        return None;
    }

    let mut metricas: HashMap<String, Option<f64>> = HashMap::new();
    for (nombre, idx) in &mapa.metricas {
        let valor = celdas.get(*idx).and_then(|s| parsear_numero(s));
        metricas.insert(nombre.clone(), valor);
    }

    Some(Observacion {
        cobrador,
        zona: tomar(mapa.zona),
        semana: tomar(mapa.semana),
        experiencia: tomar(mapa.experiencia),
        motos: mapa.motos.and_then(|i| celdas.get(i)).and_then(|s| limpiar_motos(s)),
        metricas,
    })
}

/// Lee la hoja `one_page` de un workbook y devuelve las observaciones.
/// Si la hoja no existe se usa la primera del workbook.
pub fn leer_onepage_excel(path: &str) -> Result<Vec<Observacion>, Box<dyn std::error::Error>> {
    let catalogo = CatalogoMetricas::base();
    let mut workbook = open_workbook_auto(path)?;

    let nombres = workbook.sheet_names().to_owned();
    let hoja = nombres
        .iter()
        .find(|s| s.eq_ignore_ascii_case(HOJA_ONEPAGE))
        .cloned()
        .or_else(|| nombres.first().cloned())
        .ok_or_else(|| format!("el workbook '{}' no tiene hojas", path))?;

    let range = workbook
        .worksheet_range(&hoja)
        .map_err(|e| format!("no se pudo leer la hoja '{}' de '{}': {}", hoja, path, e))?;

    let mut filas = range.rows();
    let encabezados: Vec<String> = match filas.next() {
        Some(fila) => fila.iter().map(celda_a_texto).collect(),
        None => return Ok(Vec::new()),
    };
    let mapa = mapear_columnas(&encabezados, &catalogo);
    if mapa.nombre.is_none() {
        return Err(format!(
            "la hoja '{}' de '{}' no tiene columna 'nombre' ni 'cobrador'",
            hoja, path
        )
        .into());
    }

    let mut observaciones = Vec::new();
    for fila in filas {
        let celdas: Vec<String> = fila.iter().map(celda_a_texto).collect();
        if celdas.iter().all(|c| c.is_empty()) {
            continue;
        }
        if let Some(obs) = fila_a_observacion(&mapa, &celdas) {
            observaciones.push(obs);
        }
    }

    eprintln!("DEBUG: leer_onepage_excel cargó {} filas desde '{}' (hoja '{}')", observaciones.len(), path, hoja);
    Ok(observaciones)
}
