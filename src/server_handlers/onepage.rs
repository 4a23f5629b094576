use crate::tablero::{ejecutar_onepage_with_params, FiltrosOnePage};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde_json::json;
use std::sync::{Arc, OnceLock};
use tokio::sync::Semaphore;

/// Helper para convertir 'a,b,c' -> Vec<String>
fn split_list(s_opt: Option<&String>) -> Vec<String> {
    match s_opt {
        Some(s) if !s.trim().is_empty() => s
            .split(',')
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

/// Construye los filtros del render desde la query string.
/// Parámetros: zona, semanas (lista separada por comas, máx 4), modo
/// (fijo|relativo), archivo, margen.
fn filtros_desde_query(qm: &std::collections::HashMap<String, String>) -> FiltrosOnePage {
    FiltrosOnePage {
        zona: qm.get("zona").and_then(|s| {
            if s.trim().is_empty() {
                None
            } else {
                Some(s.trim().to_string())
            }
        }),
        semanas: split_list(qm.get("semanas")),
        modo: qm.get("modo").cloned(),
        archivo: qm.get("archivo").cloned(),
        margen: qm.get("margen").and_then(|s| s.parse::<f64>().ok()),
    }
}

fn render_semaphore() -> Arc<Semaphore> {
    static GLOBAL_SEM: OnceLock<Arc<Semaphore>> = OnceLock::new();
    GLOBAL_SEM
        .get_or_init(|| {
            let procs = num_cpus::get();
            Arc::new(Semaphore::new(std::cmp::max(1, procs)))
        })
        .clone()
}

/// Ejecuta el pipeline en un hilo bloqueante acotado por el semáforo y
/// registra el render en analytics (best-effort).
async fn ejecutar_y_loggear(
    req: &HttpRequest,
    params: FiltrosOnePage,
) -> Result<crate::tablero::SalidaOnePage, HttpResponse> {
    let client_ip = req
        .connection_info()
        .realip_remote_addr()
        .unwrap_or("unknown")
        .to_string();
    let start = std::time::Instant::now();

    let sem = render_semaphore();
    let permit = match sem.acquire_owned().await {
        Ok(p) => p,
        Err(_) => {
            return Err(HttpResponse::InternalServerError()
                .json(json!({"error": "failed to acquire semaphore"})))
        }
    };

    let request_json = serde_json::to_string(&params).unwrap_or_else(|_| "{}".to_string());

    let handle = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        ejecutar_onepage_with_params(&params).map_err(|e| format!("{}", e))
    });

    let salida = match handle.await {
        Ok(Ok(s)) => s,
        Ok(Err(e)) => {
            return Err(HttpResponse::InternalServerError().json(json!({"error": e})))
        }
        Err(e) => {
            return Err(HttpResponse::InternalServerError()
                .json(json!({"error": format!("task join error: {}", e)})))
        }
    };

    let duration_ms = start.elapsed().as_millis() as i64;
    let zona = salida.zona.clone();
    let semanas = salida.ventana.clone();
    let modo = salida.modo.clone();
    let archivo = salida.archivo.clone();
    let cobradores = salida.tarjetas.len() as i64;
    tokio::task::spawn_blocking(move || {
        let _ = crate::analithics::log_render(
            &request_json,
            zona.as_deref(),
            &semanas,
            &modo,
            &archivo,
            cobradores,
            duration_ms,
            &client_ip,
        );
    });

    Ok(salida)
}

/// GET /onepage
/// Página HTML completa con las tarjetas en orden de ranking.
pub async fn onepage_html_handler(
    req: HttpRequest,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> impl Responder {
    let params = filtros_desde_query(&query.into_inner());
    match ejecutar_y_loggear(&req, params).await {
        Ok(salida) => {
            let html = crate::tarjetas::render_pagina(&salida.tarjetas);
            HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(html)
        }
        Err(resp) => resp,
    }
}

/// GET /onepage/data
/// Misma información que la página pero en JSON: resúmenes y filas
/// semanales ya clasificadas (color hex + texto por celda).
pub async fn onepage_data_handler(
    req: HttpRequest,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> impl Responder {
    let params = filtros_desde_query(&query.into_inner());
    match ejecutar_y_loggear(&req, params).await {
        Ok(salida) => HttpResponse::Ok().json(json!({"status": "ok", "onepage": salida})),
        Err(resp) => resp,
    }
}

/// GET /cobradores?archivo=op_sl_sem43.xlsx
pub async fn cobradores_handler(
    query: web::Query<std::collections::HashMap<String, String>>,
) -> impl Responder {
    let qm = query.into_inner();
    match crate::tablero::listar_cobradores(qm.get("archivo").map(|s| s.as_str())) {
        Ok(lista) => HttpResponse::Ok().json(json!({"cobradores": lista})),
        Err(e) => HttpResponse::InternalServerError()
            .json(json!({"error": format!("failed to list cobradores: {}", e)})),
    }
}
