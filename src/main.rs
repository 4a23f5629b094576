// --- One Page Cobranza - Archivo principal ---

use onepage::run_server;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    println!("=== One Page Cobranza (API) ===");

    if let Err(e) = onepage::analithics::init_db() {
        eprintln!("WARN: no se pudo inicializar analytics: {}", e);
    }

    let bind = std::env::var("ONEPAGE_BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    println!("Iniciando servidor en http://{}", bind);
    run_server(&bind).await
}
