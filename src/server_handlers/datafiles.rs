use actix_web::{HttpResponse, Responder};
use serde_json::json;

/// GET /datafiles
/// Lista los archivos de datos disponibles en el directorio de datafiles.
pub async fn datafiles_list_handler() -> impl Responder {
    match crate::excel::list_available_datafiles() {
        Ok(archivos) => HttpResponse::Ok().json(json!({"archivos": archivos})),
        Err(e) => HttpResponse::InternalServerError()
            .json(json!({"error": format!("failed to list datafiles: {}", e)})),
    }
}
