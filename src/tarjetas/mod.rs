//! Render HTML del One Page: tarjetas por cobrador y página completa.
//!
//! La tarjeta se arma desde una plantilla embebida con marcadores
//! `__CAMPO__` reemplazados por string; las filas semanales llegan ya
//! clasificadas como `FilaSemana`.

use crate::medallas::{clasificar, miles, ModoMedallas, Politica};
use crate::metas::meta_por_defecto;
use crate::metricas::{CatalogoMetricas, TablaReglas};
use crate::models::{CeldaMedalla, FilaSemana, Observacion, ResumenCobrador, TarjetaCobrador};
use chrono::{Datelike, Local, NaiveDate};
use std::collections::HashMap;

/// Etiqueta de semana ISO: "2025Sem43". Sin fecha usa la semana actual.
pub fn semana_label(fecha: Option<NaiveDate>) -> String {
    let fecha = fecha.unwrap_or_else(|| Local::now().date_naive());
    let iso = fecha.iso_week();
    format!("{}Sem{:02}", iso.year(), iso.week())
}

/// Plantilla de la tarjeta de cobrador.
const TARJETA_TEMPLATE: &str = r#"<div class="cobrador-card">
  <div class="card-left">
    __FOTO__
    <div class="card-text">
      <div style="font-weight:700; font-size:18px;">__NOMBRE__</div>
      <div class="small-muted">Zona: __ZONA__</div>
      <div class="small-muted">__EXPERIENCIA__</div>
      <div class="small-muted">Motos: __MOTOS__</div>
      <div class="small-muted">Promedio Logro META: <b>__PROMEDIO__</b></div>
      <div class="dictamen" data-pct="__DICTAMEN__">Dictamen: __DICTAMEN__%</div>
    </div>
  </div>
  <div class="card-center">
    <div class="semana-container">
      <div class="semana-header">
        <div>Semana</div>
        <div>Plantilla</div>
        <div>Horas de Visita</div>
        <div>Visitas Totales</div>
        <div>Visitas</div>
        <div>Contacto</div>
        <div>Promesas / Contacto</div>
        <div>Promesas Cumplidas</div>
        <div>Monto Cobrado</div>
        <div>Logro META</div>
      </div>
      __FILAS_SEMANAS__
    </div>
    <div class="visualizaciones-container">
      __VISUALIZACIONES__
    </div>
  </div>
</div>"#;

/// Construye la celda de una métrica con medalla.
fn celda(
    obs: &Observacion,
    metrica: &str,
    modo: ModoMedallas,
    tabla: &TablaReglas,
    metas: &HashMap<String, f64>,
    margen: f64,
    catalogo: &CatalogoMetricas,
) -> CeldaMedalla {
    let def = match catalogo.buscar(metrica) {
        Some(d) => d,
        None => return CeldaMedalla::vacia(),
    };
    let politica = match modo {
        ModoMedallas::Fijo => Politica::Fija(tabla),
        ModoMedallas::Relativo => {
            let meta = metas.get(metrica).copied().unwrap_or_else(|| meta_por_defecto(def.tipo));
            Politica::Relativa { meta, margen }
        }
    };
    match clasificar(obs.valor(metrica), &politica, def) {
        Some(medalla) => medalla.celda(),
        None => CeldaMedalla::vacia(),
    }
}

/// Una fila semanal clasificada bajo el modo pedido.
pub fn construir_fila(
    obs: &Observacion,
    modo: ModoMedallas,
    tabla: &TablaReglas,
    metas: &HashMap<String, f64>,
    margen: f64,
    catalogo: &CatalogoMetricas,
) -> FilaSemana {
    let monto = match obs.valor("monto") {
        Some(m) => format!("${}", miles(m.trunc() as i64)),
        None => "-".to_string(),
    };

    FilaSemana {
        semana: obs.semana.clone(),
        plantilla: celda(obs, "plantilla", modo, tabla, metas, margen, catalogo),
        horas_visita: format!("{:.1}", obs.valor("horas_visita").unwrap_or(0.0)),
        visitas_totales: format!("{:.0}", obs.valor("visitas_totales").unwrap_or(0.0)),
        visitas: celda(obs, "visitas", modo, tabla, metas, margen, catalogo),
        contacto: celda(obs, "contacto", modo, tabla, metas, margen, catalogo),
        promesas_contacto: celda(obs, "promesas_contacto", modo, tabla, metas, margen, catalogo),
        promesas_cumplidas: celda(obs, "promesas_cumplidas", modo, tabla, metas, margen, catalogo),
        monto,
        logros_meta: celda(obs, "logros_meta", modo, tabla, metas, margen, catalogo),
    }
}

/// Fila de resumen ("Promedios") de la tarjeta.
fn fila_resumen_html(resumen: &ResumenCobrador) -> String {
    let prom = |m: &str| resumen.promedios.get(m).copied().unwrap_or(0.0);
    let plantilla_valor = match resumen.plantilla_general {
        Some(v) => format!("{}", v),
        None => "-".to_string(),
    };
    format!(
        "<div class=\"semana-summary\">\
<div>Promedios</div>\
<div>{}</div>\
<div>{:.1}</div>\
<div>{:.1}</div>\
<div>{:.1}</div>\
<div>{:.1}%</div>\
<div>{:.1}%</div>\
<div>{:.1}%</div>\
<div>${}</div>\
<div>{:.1}%</div>\
</div>",
        plantilla_valor,
        prom("horas_visita"),
        prom("visitas_totales"),
        prom("visitas"),
        prom("contacto") * 100.0,
        prom("promesas_contacto") * 100.0,
        prom("promesas_cumplidas") * 100.0,
        miles(prom("monto").trunc() as i64),
        prom("logros_meta") * 100.0,
    )
}

fn fila_semana_html(fila: &FilaSemana) -> String {
    format!(
        "<div class=\"semana-row\">\
<div>{}</div><div>{}</div><div>{}</div><div>{}</div><div>{}</div>\
<div>{}</div><div>{}</div><div>{}</div><div>{}</div><div>{}</div>\
</div>",
        fila.semana,
        fila.plantilla.html(),
        fila.horas_visita,
        fila.visitas_totales,
        fila.visitas.html(),
        fila.contacto.html(),
        fila.promesas_contacto.html(),
        fila.promesas_cumplidas.html(),
        fila.monto,
        fila.logros_meta.html(),
    )
}

/// Foto del cobrador: imagen embebida, o la inicial en un círculo si no hay.
pub fn foto_html(nombre: &str) -> String {
    if let Some(b64) = crate::recursos::foto_b64(nombre) {
        return format!("<img src=\"{}\" alt=\"foto\">", b64);
    }
    let inicial = nombre.trim().chars().next().map(|c| c.to_uppercase().to_string()).unwrap_or_else(|| "?".to_string());
    format!(
        "<div style=\"width:72px; height:72px; border-radius:50%; background:#1f77b4; \
display:flex; align-items:center; justify-content:center; font-weight:700; color:white;\">{}</div>",
        inicial
    )
}

/// Render completo de una tarjeta: plantilla + resumen + filas + gráficos.
pub fn render_tarjeta(tarjeta: &TarjetaCobrador) -> String {
    let resumen = &tarjeta.resumen;

    let mut filas = fila_resumen_html(resumen);
    for fila in &tarjeta.filas {
        filas.push_str(&fila_semana_html(fila));
    }

    let visualizaciones =
        crate::recursos::cargar_visualizaciones(&resumen.cobrador, &semana_label(None));

    TARJETA_TEMPLATE
        .replace("__FOTO__", &foto_html(&resumen.cobrador))
        .replace("__NOMBRE__", &resumen.cobrador)
        .replace("__ZONA__", &resumen.zona)
        .replace("__EXPERIENCIA__", &resumen.experiencia)
        .replace("__MOTOS__", &resumen.motos.map(|m| m.to_string()).unwrap_or_default())
        .replace("__PROMEDIO__", &format!("{:.1}", resumen.promedio_logro))
        .replace("__DICTAMEN__", &resumen.dictamen_pct.to_string())
        .replace("__FILAS_SEMANAS__", &filas)
        .replace("__VISUALIZACIONES__", &visualizaciones)
}

/// Hoja de estilos del front si está en Resources/CSS; vacía si no.
fn cargar_css() -> String {
    let ruta = crate::recursos::get_resources_dir().join("CSS/estilos.css");
    std::fs::read_to_string(ruta).unwrap_or_default()
}

/// Encabezado institucional de la página.
fn header_html() -> String {
    let logo = crate::recursos::imagen_a_base64(
        crate::recursos::get_resources_dir().join("Logos/Logo_Fincomun.png"),
    )
    .unwrap_or_default();
    format!(
        "<div class=\"header-institucional\" style=\"display:flex; justify-content:space-between; \
align-items:center; background-color:#ffffff; color:#000000; padding:10px 20px; \
border:2px solid #0033cc; border-radius:4px;\">\
<div style=\"display:flex; flex-direction:column; line-height:1.1;\">\
<span style=\"font-weight:700; font-size:20px;\">One Page</span>\
<span style=\"color:#2a6ee8; font-size:14px;\">COBRANZA</span>\
</div>\
<div style=\"text-align:center;\"><img src=\"{}\" alt=\"logo\" style=\"height:56px;\"></div>\
<div style=\"text-align:right; font-size:14px; line-height:1.4;\">\
<div><strong>Gerencia:</strong> Zona Metro</div>\
<div><strong>Canal:</strong> Presencial</div>\
</div></div>",
        logo
    )
}

/// Página completa: encabezado + conteo + tarjetas en orden de ranking.
pub fn render_pagina(tarjetas: &[TarjetaCobrador]) -> String {
    let mut cuerpo = String::new();
    cuerpo.push_str(&header_html());
    cuerpo.push_str(&format!(
        "<div class=\"conteo\">Coordinadores mostrados: {}</div>",
        tarjetas.len()
    ));
    for tarjeta in tarjetas {
        cuerpo.push_str(&render_tarjeta(tarjeta));
    }

    format!(
        "<!DOCTYPE html><html lang=\"es\"><head><meta charset=\"utf-8\">\
<title>One Page - Cobranza</title><style>{}</style></head>\
<body>{}</body></html>",
        cargar_css(),
        cuerpo
    )
}
