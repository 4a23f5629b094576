pub mod db;
pub mod insertions;
pub mod queries;

pub use db::init_db;
pub use insertions::{log_render, save_report};
pub use queries::{renders_recientes, resumen_renders, zonas_mas_consultadas};
