//! Agregación multi-semana y ranking de cobradores.
//!
//! Filtra las observaciones a la ventana pedida, promedia las métricas de
//! flujo, toma el último valor registrado de las métricas instantáneas sobre
//! la serie completa y ordena los cobradores por promedio de logro de meta.

use crate::metricas::{CatalogoMetricas, ClaseMetrica};
use crate::models::{Observacion, ResumenCobrador};
use std::collections::HashMap;

/// Máximo de semanas mostrables a la vez en la grilla.
pub const MAX_SEMANAS: usize = 4;

/// Semanas presentes en los datos, únicas y ordenadas ascendente.
pub fn semanas_disponibles(observaciones: &[Observacion]) -> Vec<String> {
    let mut semanas: Vec<String> = Vec::new();
    for obs in observaciones {
        if !semanas.contains(&obs.semana) {
            semanas.push(obs.semana.clone());
        }
    }
    semanas.sort();
    semanas
}

/// Ventana por defecto: las últimas `MAX_SEMANAS` disponibles (o todas si
/// hay menos).
pub fn ventana_por_defecto(disponibles: &[String]) -> Vec<String> {
    if disponibles.len() >= MAX_SEMANAS {
        disponibles[disponibles.len() - MAX_SEMANAS..].to_vec()
    } else {
        disponibles.to_vec()
    }
}

/// Recorta una selección de semanas al máximo permitido, avisando si el
/// cliente pidió de más; selección vacía cae a la ventana por defecto.
pub fn acotar_ventana(seleccion: Vec<String>, disponibles: &[String]) -> Vec<String> {
    let mut ventana: Vec<String> =
        seleccion.into_iter().filter(|s| disponibles.contains(s)).collect();
    if ventana.len() > MAX_SEMANAS {
        eprintln!(
            "WARN: se pidieron {} semanas; sólo se muestran las primeras {}",
            ventana.len(),
            MAX_SEMANAS
        );
        ventana.truncate(MAX_SEMANAS);
    }
    if ventana.is_empty() {
        return ventana_por_defecto(disponibles);
    }
    ventana
}

/// Filtra observaciones por zona (None o "Todas" = sin filtro) y ventana.
pub fn filtrar(
    observaciones: &[Observacion],
    zona: Option<&str>,
    ventana: &[String],
) -> Vec<Observacion> {
    observaciones
        .iter()
        .filter(|o| match zona {
            Some(z) if !z.is_empty() && !z.eq_ignore_ascii_case("todas") => o.zona == z,
            _ => true,
        })
        .filter(|o| ventana.contains(&o.semana))
        .cloned()
        .collect()
}

/// Promedio de los valores no nulos; secuencia sin valores -> 0.
fn promedio(valores: impl Iterator<Item = Option<f64>>) -> f64 {
    let mut suma = 0.0;
    let mut n = 0usize;
    for v in valores.flatten() {
        if !v.is_nan() {
            suma += v;
            n += 1;
        }
    }
    if n == 0 { 0.0 } else { suma / n as f64 }
}

/// Gauge de dictamen de la tarjeta, derivado del monto promedio (escala
/// 20-100, misma fórmula que usa el front histórico).
fn dictamen_pct(monto_promedio: f64) -> i64 {
    let pct = ((monto_promedio / monto_promedio.max(1.0)) * 80.0) as i64 + 20;
    pct.min(100)
}

/// Resume y rankea los cobradores de la ventana.
///
/// - `todas`: la serie completa cargada (para las métricas instantáneas).
/// - `filtradas`: las observaciones ya filtradas por zona y ventana.
///
/// Un cobrador sin filas en la ventana no aparece en el resultado. El orden
/// es descendente por promedio de `logros_meta`; los empates conservan el
/// orden de aparición en los datos.
pub fn resumir(
    todas: &[Observacion],
    filtradas: &[Observacion],
    catalogo: &CatalogoMetricas,
) -> Vec<ResumenCobrador> {
    // Cobradores en orden de aparición dentro de la ventana
    let mut orden: Vec<String> = Vec::new();
    for obs in filtradas {
        if !orden.contains(&obs.cobrador) {
            orden.push(obs.cobrador.clone());
        }
    }

    let mut resumenes: Vec<ResumenCobrador> = Vec::new();
    for cobrador in orden {
        let mut filas: Vec<&Observacion> =
            filtradas.iter().filter(|o| o.cobrador == cobrador).collect();
        if filas.is_empty() {
            continue;
        }
        filas.sort_by(|a, b| a.semana.cmp(&b.semana));

        let mut promedios: HashMap<String, f64> = HashMap::new();
        for metrica in catalogo.de_flujo() {
            let media = promedio(filas.iter().map(|o| o.valor(&metrica.nombre)));
            promedios.insert(metrica.nombre.clone(), media);
        }

        // Métricas instantáneas: último valor registrado de la serie
        // completa del cobrador, la ventana no las recorta.
        let mut serie_completa: Vec<&Observacion> =
            todas.iter().filter(|o| o.cobrador == cobrador).collect();
        serie_completa.sort_by(|a, b| a.semana.cmp(&b.semana));
        let plantilla_general = catalogo
            .todas()
            .iter()
            .find(|m| m.clase == ClaseMetrica::Instantanea)
            .and_then(|m| ultimo_registrado(&serie_completa, &m.nombre));

        let promedio_logro = promedios.get("logros_meta").copied().unwrap_or(0.0);
        let monto_promedio = promedios.get("monto").copied().unwrap_or(0.0);
        let primera = filas[0];

        resumenes.push(ResumenCobrador {
            cobrador: cobrador.clone(),
            zona: primera.zona.clone(),
            experiencia: primera.experiencia.clone(),
            motos: primera.motos,
            promedio_logro,
            promedios,
            plantilla_general,
            dictamen_pct: dictamen_pct(monto_promedio),
            semanas: filas.iter().map(|o| o.semana.clone()).collect(),
        });
    }

    // Orden descendente por promedio de logro; sort estable preserva empates
    resumenes.sort_by(|a, b| {
        b.promedio_logro
            .partial_cmp(&a.promedio_logro)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    resumenes
}

/// Último valor no nulo de la métrica recorriendo la serie ordenada desde el
/// final.
fn ultimo_registrado(serie_ordenada: &[&Observacion], metrica: &str) -> Option<f64> {
    serie_ordenada.iter().rev().find_map(|o| o.valor(metrica))
}
