// Biblioteca raíz del crate `onepage`.
// Reexporta los módulos principales; el flujo completo de un render vive en
// `tablero::ejecutar_onepage_with_params`.
pub mod analithics;
pub mod excel;
pub mod medallas;
pub mod metas;
pub mod metricas;
pub mod models;
pub mod recursos;
pub mod resumen;
pub mod server;
pub mod server_handlers;
pub mod tablero;
pub mod tarjetas;

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
