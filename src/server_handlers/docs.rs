use actix_web::{HttpResponse, Responder};
use serde_json::json;

pub async fn help_handler() -> impl Responder {
    let help = json!({
        "description": "API del One Page de Cobranza. GET /onepage devuelve la página HTML con las tarjetas por cobrador; GET /onepage/data devuelve lo mismo en JSON (resúmenes + filas semanales con medallas). Los filtros van en la query string.",
        "get_example_query": "/onepage?zona=Norte&semanas=2025Sem40,2025Sem41&modo=relativo&archivo=op_sl_sem43.xlsx",
        "parametros": {
            "zona": "filtra por zona; ausente o 'Todas' muestra todo",
            "semanas": "lista separada por comas, máximo 4; vacía = últimas 4 disponibles",
            "modo": "'fijo' (tabla de reglas de negocio) o 'relativo' (meta = percentil 75 del propio cobrador)",
            "archivo": "archivo de datos en datafiles; ausente = el corte más nuevo",
            "margen": "tolerancia del modo relativo (default 0.05)"
        },
        "otros_endpoints": ["/cobradores", "/datafiles", "/analithics/renders/recent", "/analithics/stats", "/analithics/zonas"]
    });

    HttpResponse::Ok().json(help)
}
