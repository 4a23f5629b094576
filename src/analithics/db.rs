use rusqlite::Connection;
use std::env;
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::PathBuf;

// Cliente Postgres para soporte de DB remota
use postgres::{Client, NoTls};

/// Abstracción sencilla para conexiones de analytics que puede ser SQLite o
/// Postgres. Para Postgres guardamos la URL y operamos en un hilo aparte
/// para no arrancar runtimes tokio dentro del runtime existente.
pub enum AnalyticsConn {
    Sqlite(Connection),
    /// Contiene la URL completa (postgres://...)
    PostgresConfig(String),
}

impl fmt::Debug for AnalyticsConn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyticsConn::Sqlite(_) => write!(f, "AnalyticsConn::Sqlite(..)"),
            AnalyticsConn::PostgresConfig(_) => write!(f, "AnalyticsConn::PostgresConfig(..)"),
        }
    }
}

// cargar .env si está presente
fn load_dotenv() {
    let _ = dotenv::dotenv();
}

/// Ruta del archivo SQLite de analytics. Honra ONEPAGE_DB_PATH /
/// ONEPAGE_DB_URL (esquemas sqlite:// y file://).
pub fn analytics_db_path() -> PathBuf {
    load_dotenv();
    if let Ok(p) = env::var("ONEPAGE_DB_PATH") {
        PathBuf::from(p)
    } else if let Ok(p) = env::var("ONEPAGE_DB_URL") {
        if p.starts_with("sqlite://") {
            PathBuf::from(p.trim_start_matches("sqlite://"))
        } else if p.starts_with("file://") {
            PathBuf::from(p.trim_start_matches("file://"))
        } else {
            // URL remota: no hay path local, se devuelve el default
            PathBuf::from("analithics/analytics.db")
        }
    } else {
        PathBuf::from("analithics/analytics.db")
    }
}

/// Abre una conexión de analytics. Acepta sqlite://, file:// y postgres://.
pub fn open_analytics_connection() -> Result<AnalyticsConn, Box<dyn Error>> {
    load_dotenv();
    if let Ok(url) = env::var("ONEPAGE_DB_URL") {
        if url.starts_with("sqlite://") || url.starts_with("file://") {
            let conn = Connection::open(analytics_db_path())?;
            return Ok(AnalyticsConn::Sqlite(conn));
        } else if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            // Para Postgres sólo guardamos la URL; la conexión real se abre
            // en el punto de uso, en un hilo dedicado.
            return Ok(AnalyticsConn::PostgresConfig(url));
        } else {
            return Err(format!("ONEPAGE_DB_URL usa un esquema no soportado: {}", url).into());
        }
    }

    let conn = Connection::open(analytics_db_path())?;
    Ok(AnalyticsConn::Sqlite(conn))
}

const CREATE_RENDERS_SQLITE: &str = "CREATE TABLE IF NOT EXISTS renders (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    ts TEXT NOT NULL,
    duration_ms INTEGER,
    zona TEXT,
    semanas TEXT,
    modo TEXT,
    archivo TEXT,
    cobradores INTEGER,
    request_json TEXT,
    client_ip TEXT
)";

const CREATE_REPORTS_SQLITE: &str = "CREATE TABLE IF NOT EXISTS reports (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    ts TEXT NOT NULL,
    query_type TEXT NOT NULL,
    params_json TEXT,
    result_json TEXT
)";

/// Inicializa la DB de analytics (directorio + tablas).
pub fn init_db() -> Result<(), Box<dyn Error>> {
    load_dotenv();
    // Con sqlite local el directorio debe existir antes de abrir el archivo
    let usa_postgres = env::var("ONEPAGE_DB_URL")
        .map(|u| u.starts_with("postgres://") || u.starts_with("postgresql://"))
        .unwrap_or(false);
    if !usa_postgres {
        let db_path = analytics_db_path();
        if let Some(dir) = db_path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
    }

    match open_analytics_connection() {
        Ok(AnalyticsConn::Sqlite(conn)) => {
            conn.execute(CREATE_RENDERS_SQLITE, [])?;
            conn.execute(CREATE_REPORTS_SQLITE, [])?;
            Ok(())
        }
        Ok(AnalyticsConn::PostgresConfig(url)) => {
            // Crear tablas en un hilo dedicado para evitar conflictos de runtime
            let handle = std::thread::spawn(move || -> Result<(), Box<dyn Error + Send + 'static>> {
                let mut client = Client::connect(&url, NoTls)
                    .map_err(|e| Box::new(e) as Box<dyn Error + Send + 'static>)?;
                client
                    .batch_execute(
                        "CREATE TABLE IF NOT EXISTS renders (
                            id BIGSERIAL PRIMARY KEY,
                            ts TEXT NOT NULL,
                            duration_ms BIGINT,
                            zona TEXT,
                            semanas TEXT,
                            modo TEXT,
                            archivo TEXT,
                            cobradores BIGINT,
                            request_json TEXT,
                            client_ip TEXT
                        );

                        CREATE TABLE IF NOT EXISTS reports (
                            id BIGSERIAL PRIMARY KEY,
                            ts TEXT NOT NULL,
                            query_type TEXT NOT NULL,
                            params_json TEXT,
                            result_json TEXT
                        );",
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
        Err(e) => Err(e),
    }
}
