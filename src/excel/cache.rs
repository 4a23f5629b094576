//! Caché simple en memoria para lecturas de datos costosas.
//!
//! Proporciona `get_observaciones_cached(nombre)` que devuelve las filas ya
//! parseadas del archivo indicado, leyendo de disco sólo la primera vez.

use crate::models::Observacion;
use std::collections::HashMap;
use std::error::Error;
use std::sync::{Arc, Mutex, OnceLock};

// Caché global: ruta resuelta -> Arc<Vec<Observacion>>
static OBS_CACHE: OnceLock<Mutex<HashMap<String, Arc<Vec<Observacion>>>>> = OnceLock::new();

/// Devuelve las observaciones del archivo solicitado usando el caché en
/// memoria si está disponible; en caso contrario lee y almacena el resultado.
///
/// Notas:
/// - la clave del caché es la ruta resuelta a string, así distintas formas de
///   nombrar el mismo archivo no duplican la entrada.
/// - el Mutex se sostiene sólo para consultar/insertar; el resultado se
///   comparte como Arc sin clonar las filas.
pub fn get_observaciones_cached(nombre: Option<&str>) -> Result<Arc<Vec<Observacion>>, Box<dyn Error>> {
    let cache = OBS_CACHE.get_or_init(|| Mutex::new(HashMap::new()));

    let ruta = crate::excel::resolve_datafile_path(nombre)?;
    let key = ruta.to_str().unwrap_or_default().to_string();

    {
        let guard = cache.lock().map_err(|_| "obs cache mutex poisoned")?;
        if let Some(existente) = guard.get(&key) {
            return Ok(Arc::clone(existente));
        }
    }

    let observaciones = crate::excel::leer_onepage(&key)?;
    let arc = Arc::new(observaciones);
    let mut guard = cache.lock().map_err(|_| "obs cache mutex poisoned")?;
    guard.insert(key, Arc::clone(&arc));
    Ok(arc)
}
