use crate::server_handlers::{
    cobradores_handler, datafiles_list_handler, help_handler, onepage_data_handler,
    onepage_html_handler, renders_recent_handler, renders_stats_handler, zonas_handler,
};
use actix_web::{web, App, HttpServer};

pub async fn run_server(bind_addr: &str) -> std::io::Result<()> {
    HttpServer::new(|| {
        App::new()
            .route("/onepage", web::get().to(onepage_html_handler))
            .route("/onepage/data", web::get().to(onepage_data_handler))
            .route("/cobradores", web::get().to(cobradores_handler))
            .route("/datafiles", web::get().to(datafiles_list_handler))
            .route("/analithics/renders/recent", web::get().to(renders_recent_handler))
            .route("/analithics/stats", web::get().to(renders_stats_handler))
            .route("/analithics/zonas", web::get().to(zonas_handler))
            .route("/help", web::get().to(help_handler))
    })
    .bind(bind_addr)?
    .run()
    .await
}
