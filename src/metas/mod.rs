//! Resolución de metas por cobrador.
//!
//! La meta de una métrica puede venir de la tabla fija de negocio (en cuyo
//! caso este módulo no participa) o calcularse dinámicamente como el
//! percentil 75 del propio historial del cobrador: una meta alcanzable
//! porque el cobrador ya la alcanzó un cuarto de las semanas.
//!
//! El mapa de metas se construye una vez por render sobre la ventana
//! filtrada y se pasa explícitamente al clasificador; acá no hay estado.

use crate::metricas::{CatalogoMetricas, TipoMetrica};
use crate::models::Observacion;
use std::collections::HashMap;

/// Percentil usado como meta dinámica.
pub const PERCENTIL_META: f64 = 75.0;

/// Meta por defecto cuando no hay historial (métricas de razón, 0-1).
pub const META_DEFECTO: f64 = 0.8;

/// Meta por defecto para métricas de conteo.
pub const META_DEFECTO_CONTEO: f64 = 80.0;

/// Metas de un render: cobrador -> (metrica -> meta).
pub type MapaMetas = HashMap<String, HashMap<String, f64>>;

/// Percentil `p` (0-100) con interpolación lineal entre estadísticos de
/// orden. `None` si la secuencia está vacía; un único valor es su propio
/// percentil para todo `p`.
pub fn percentil(valores: &[f64], p: f64) -> Option<f64> {
    if valores.is_empty() {
        return None;
    }
    let mut ordenados = valores.to_vec();
    ordenados.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = ordenados.len();
    if n == 1 {
        return Some(ordenados[0]);
    }

    let rango = (p / 100.0).clamp(0.0, 1.0) * (n - 1) as f64;
    let bajo = rango.floor() as usize;
    let alto = rango.ceil() as usize;
    if bajo == alto {
        return Some(ordenados[bajo]);
    }
    let fraccion = rango - bajo as f64;
    Some(ordenados[bajo] + (ordenados[alto] - ordenados[bajo]) * fraccion)
}

/// Meta por defecto según el tipo de métrica.
pub fn meta_por_defecto(tipo: TipoMetrica) -> f64 {
    match tipo {
        TipoMetrica::Porcentaje => META_DEFECTO,
        TipoMetrica::Conteo | TipoMetrica::Moneda => META_DEFECTO_CONTEO,
    }
}

/// Resuelve la meta dinámica de una métrica: descarta nulos del historial y
/// toma el percentil 75; historial vacío cae a la meta por defecto del tipo.
pub fn resolver_meta(historial: &[Option<f64>], tipo: TipoMetrica) -> f64 {
    let valores: Vec<f64> = historial
        .iter()
        .filter_map(|v| *v)
        .filter(|v| !v.is_nan())
        .collect();
    match percentil(&valores, PERCENTIL_META) {
        Some(meta) => meta,
        None => meta_por_defecto(tipo),
    }
}

/// Construye el mapa de metas de un render: para cada cobrador presente en
/// las observaciones, la meta de cada métrica del catálogo que tenga regla o
/// meta dinámica. Las métricas sin meta dinámica quedan con su valor por
/// defecto, de modo que el clasificador siempre encuentra una entrada.
pub fn metas_por_cobrador(observaciones: &[Observacion], catalogo: &CatalogoMetricas) -> MapaMetas {
    // Agrupar valores por cobrador preservando el orden de aparición
    let mut historiales: HashMap<String, Vec<&Observacion>> = HashMap::new();
    for obs in observaciones {
        historiales.entry(obs.cobrador.clone()).or_default().push(obs);
    }

    let mut metas: MapaMetas = HashMap::new();
    for (cobrador, filas) in historiales {
        let mut por_metrica: HashMap<String, f64> = HashMap::new();
        for metrica in catalogo.todas() {
            if metrica.regla.is_none() && !metrica.meta_dinamica {
                continue;
            }
            let meta = if metrica.meta_dinamica {
                let historial: Vec<Option<f64>> =
                    filas.iter().map(|o| o.valor(&metrica.nombre)).collect();
                resolver_meta(&historial, metrica.tipo)
            } else {
                meta_por_defecto(metrica.tipo)
            };
            por_metrica.insert(metrica.nombre.clone(), meta);
        }
        metas.insert(cobrador, por_metrica);
    }
    metas
}
