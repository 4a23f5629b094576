use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

/// GET /analithics/renders/recent?limit=10
pub async fn renders_recent_handler(
    query: web::Query<std::collections::HashMap<String, String>>,
) -> impl Responder {
    let lim = query.get("limit").and_then(|s| s.parse::<usize>().ok());
    match crate::analithics::renders_recientes(lim) {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => {
            eprintln!("error fetching recent renders: {}", e);
            HttpResponse::InternalServerError().body("error fetching recent renders")
        }
    }
}

/// GET /analithics/stats
pub async fn renders_stats_handler() -> impl Responder {
    match crate::analithics::resumen_renders() {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => {
            eprintln!("error computing render stats: {}", e);
            HttpResponse::InternalServerError().body("error computing render stats")
        }
    }
}

/// GET /analithics/zonas?limit=10
pub async fn zonas_handler(
    query: web::Query<std::collections::HashMap<String, String>>,
) -> impl Responder {
    let lim = query.get("limit").and_then(|s| s.parse::<usize>().ok());
    match crate::analithics::zonas_mas_consultadas(lim) {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => {
            eprintln!("error fetching zonas: {}", e);
            HttpResponse::InternalServerError().json(json!({"error": format!("{}", e)}))
        }
    }
}
