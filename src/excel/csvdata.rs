use crate::excel::onepage::{fila_a_observacion, mapear_columnas};
use crate::metricas::CatalogoMetricas;
use crate::models::Observacion;

/// Lee un export CSV del One Page. Mismas columnas lógicas que la hoja
/// `one_page`; el mapeo de encabezados es compartido con la ruta Excel.
pub fn leer_onepage_csv(path: &str) -> Result<Vec<Observacion>, Box<dyn std::error::Error>> {
    let catalogo = CatalogoMetricas::base();
    let mut lector = csv::ReaderBuilder::new().flexible(true).from_path(path)?;

    let encabezados: Vec<String> =
        lector.headers()?.iter().map(|h| h.trim().to_string()).collect();
    let mapa = mapear_columnas(&encabezados, &catalogo);
    if mapa.nombre.is_none() {
        return Err(format!("el CSV '{}' no tiene columna 'nombre' ni 'cobrador'", path).into());
    }

    let mut observaciones = Vec::new();
    for registro in lector.records() {
        let registro = registro?;
        let celdas: Vec<String> = registro.iter().map(|c| c.trim().to_string()).collect();
        if celdas.iter().all(|c| c.is_empty()) {
            continue;
        }
        if let Some(obs) = fila_a_observacion(&mapa, &celdas) {
            observaciones.push(obs);
        }
    }

    eprintln!("DEBUG: leer_onepage_csv cargó {} filas desde '{}'", observaciones.len(), path);
    Ok(observaciones)
}
