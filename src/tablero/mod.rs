//! Orquestador del One Page: de los filtros del cliente a las tarjetas.
//!
//! Un render es una sola pasada: cargar (con caché) -> filtrar -> metas ->
//! resumir/rankear -> clasificar fila por fila. Todo lo de abajo es puro;
//! el único estado compartido es el caché de observaciones.

use crate::medallas::{ModoMedallas, MARGEN_DEFECTO};
use crate::metas;
use crate::metricas::{CatalogoMetricas, TablaReglas};
use crate::models::TarjetaCobrador;
use crate::resumen;
use serde::{Deserialize, Serialize};
use std::error::Error;

/// Parámetros de entrada de un render del One Page.
///
/// # Estructura del JSON esperado:
/// ```json
/// {
///   "zona": "Norte",
///   "semanas": ["2025Sem40", "2025Sem41"],
///   "modo": "relativo",
///   "archivo": "op_sl_sem43.xlsx",
///   "margen": 0.05
/// }
/// ```
///
/// # Campos:
/// - `zona`: filtra cobradores por zona; ausente o "Todas" = sin filtro
/// - `semanas`: ventana de semanas (máximo 4); vacía = las últimas 4
/// - `modo`: "fijo" (tabla de reglas) o "relativo" (metas por percentil)
/// - `archivo`: archivo de datos a usar; ausente = el corte más nuevo
/// - `margen`: tolerancia de la política relativa (default 0.05)
#[derive(Debug, Serialize, Deserialize)]
pub struct FiltrosOnePage {
    pub zona: Option<String>,
    #[serde(default)]
    pub semanas: Vec<String>,
    pub modo: Option<String>,
    pub archivo: Option<String>,
    pub margen: Option<f64>,
}

/// Resultado de un render, listo para serializar o para pasar al HTML.
#[derive(Debug, Serialize)]
pub struct SalidaOnePage {
    pub archivo: String,
    pub zona: Option<String>,
    pub modo: String,
    pub ventana: Vec<String>,
    pub semanas_disponibles: Vec<String>,
    pub tarjetas: Vec<TarjetaCobrador>,
}

/// Ejecuta el pipeline completo del One Page con los filtros dados.
pub fn ejecutar_onepage_with_params(params: &FiltrosOnePage) -> Result<SalidaOnePage, Box<dyn Error>> {
    let catalogo = CatalogoMetricas::base();
    let tabla = TablaReglas::cargar();
    let modo = ModoMedallas::desde_texto(params.modo.as_deref());
    let margen = params.margen.unwrap_or(MARGEN_DEFECTO);

    let ruta = crate::excel::resolve_datafile_path(params.archivo.as_deref())?;
    let ruta_str = ruta.to_str().ok_or("ruta de datos con UTF-8 inválido")?;
    let todas = crate::excel::get_observaciones_cached(Some(ruta_str))?;

    let disponibles = resumen::semanas_disponibles(&todas);
    let ventana = resumen::acotar_ventana(params.semanas.clone(), &disponibles);

    let filtradas = resumen::filtrar(&todas, params.zona.as_deref(), &ventana);
    // Metas por cobrador: se calculan una vez sobre la ventana filtrada y se
    // pasan explícitamente al armado de filas.
    let mapa_metas = metas::metas_por_cobrador(&filtradas, &catalogo);
    let resumenes = resumen::resumir(&todas, &filtradas, &catalogo);

    let sin_metas = std::collections::HashMap::new();
    let mut tarjetas: Vec<TarjetaCobrador> = Vec::new();
    for res in resumenes {
        let mut filas_cobrador: Vec<&crate::models::Observacion> =
            filtradas.iter().filter(|o| o.cobrador == res.cobrador).collect();
        filas_cobrador.sort_by(|a, b| a.semana.cmp(&b.semana));

        let metas_cobrador = mapa_metas.get(&res.cobrador).unwrap_or(&sin_metas);
        let filas = filas_cobrador
            .iter()
            .map(|obs| crate::tarjetas::construir_fila(obs, modo, &tabla, metas_cobrador, margen, &catalogo))
            .collect();

        tarjetas.push(TarjetaCobrador { resumen: res, filas });
    }

    Ok(SalidaOnePage {
        archivo: ruta
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string(),
        zona: params.zona.clone(),
        modo: match modo {
            ModoMedallas::Fijo => "fijo".to_string(),
            ModoMedallas::Relativo => "relativo".to_string(),
        },
        ventana,
        semanas_disponibles: disponibles,
        tarjetas,
    })
}

/// Lista de cobradores presentes en el archivo de datos, con su zona.
pub fn listar_cobradores(archivo: Option<&str>) -> Result<Vec<serde_json::Value>, Box<dyn Error>> {
    let ruta = crate::excel::resolve_datafile_path(archivo)?;
    let ruta_str = ruta.to_str().ok_or("ruta de datos con UTF-8 inválido")?;
    let todas = crate::excel::get_observaciones_cached(Some(ruta_str))?;

    let mut vistos: Vec<(String, String)> = Vec::new();
    for obs in todas.iter() {
        if !vistos.iter().any(|(c, _)| c == &obs.cobrador) {
            vistos.push((obs.cobrador.clone(), obs.zona.clone()));
        }
    }

    Ok(vistos
        .into_iter()
        .map(|(cobrador, zona)| serde_json::json!({"cobrador": cobrador, "zona": zona}))
        .collect())
}
