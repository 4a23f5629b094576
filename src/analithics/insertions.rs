use crate::analithics::db::{analytics_db_path, open_analytics_connection, AnalyticsConn};
use chrono::Utc;
use postgres::{Client, NoTls};
use rusqlite::{params, Connection};
use std::error::Error;

/// Registra un render del One Page en la tabla `renders`. Abre una conexión
/// de corta vida e inserta la fila; el caller lo invoca best-effort.
pub fn log_render(
    request_json: &str,
    zona: Option<&str>,
    semanas: &[String],
    modo: &str,
    archivo: &str,
    cobradores: i64,
    duration_ms: i64,
    client_ip: &str,
) -> Result<(), Box<dyn Error>> {
    let ts = Utc::now().to_rfc3339();
    let semanas_json = serde_json::to_string(semanas)?;

    match open_analytics_connection()? {
        AnalyticsConn::Sqlite(conn) => {
            conn.execute(
                "INSERT INTO renders (
                    ts, duration_ms, zona, semanas, modo, archivo,
                    cobradores, request_json, client_ip
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![ts, duration_ms, zona, semanas_json, modo, archivo, cobradores, request_json, client_ip],
            )?;
            Ok(())
        }
        AnalyticsConn::PostgresConfig(url) => {
            let zona_s = zona.map(|z| z.to_string());
            let modo_s = modo.to_string();
            let archivo_s = archivo.to_string();
            let request_s = request_json.to_string();
            let ip_s = client_ip.to_string();
            let handle = std::thread::spawn(move || -> Result<(), Box<dyn Error + Send + 'static>> {
                let mut client = Client::connect(&url, NoTls)
                    .map_err(|e| Box::new(e) as Box<dyn Error + Send + 'static>)?;
                client
                    .execute(
                        "INSERT INTO renders (
                            ts, duration_ms, zona, semanas, modo, archivo,
                            cobradores, request_json, client_ip
                        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
                        &[&ts, &duration_ms, &zona_s, &semanas_json, &modo_s, &archivo_s, &cobradores, &request_s, &ip_s],
                    )
                    .map_err(|e| Box::new(e) as Box<dyn Error + Send + 'static>)?;
                Ok(())
            });
            match handle.join() {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(e as Box<dyn Error>),
                Err(e) => Err(format!("thread join error: {:?}", e).into()),
            }
        }
    }
}

/// Guarda el resultado de una consulta de resumen bajo `reports`.
pub fn save_report(query_type: &str, params_json: &str, result_json: &str) -> Result<(), Box<dyn Error>> {
    let conn = Connection::open(analytics_db_path())?;
    let ts = Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO reports (ts, query_type, params_json, result_json) VALUES (?1, ?2, ?3, ?4)",
        params![ts, query_type, params_json, result_json],
    )?;
    Ok(())
}
