//! Módulo `excel`: lectura de los archivos de datos del One Page.
//!
//! Submódulos:
//! - `io`: helpers de parseo de celdas y encabezados
//! - `onepage`: lectura de la hoja `one_page` (workbook semanal)
//! - `csvdata`: misma lectura desde exports CSV
//! - `cache`: caché en memoria por ruta de archivo

/// Helpers de IO y utilidades de parsing
pub mod io;

/// Lectura del workbook semanal: `leer_onepage_excel`
pub mod onepage;

/// Lectura de exports CSV: `leer_onepage_csv`
pub mod csvdata;

/// Caché en memoria de observaciones ya parseadas
pub mod cache;

pub use cache::get_observaciones_cached;
pub use csvdata::leer_onepage_csv;
pub use io::{normalizar_encabezado, parsear_numero};
pub use onepage::leer_onepage_excel;

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

/// Directorio por defecto con los archivos de datos (relativo al repo).
pub const DATAFILES_DIR: &str = "src/datafiles";

/// Resuelve el directorio de datafiles.
/// Orden: variable de entorno, candidatos desde el CWD, default.
pub fn get_datafiles_dir() -> PathBuf {
    if let Ok(path) = std::env::var("ONEPAGE_DATAFILES_DIR") {
        let p = PathBuf::from(path);
        if p.exists() {
            return p;
        }
        eprintln!("WARN: ONEPAGE_DATAFILES_DIR apunta a {:?} pero no existe", p);
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let candidatos = vec![
        cwd.join("src/datafiles"),
        cwd.join("datafiles"),
        cwd.join("Resources/Data"),
    ];
    for candidato in candidatos {
        if candidato.exists() {
            return candidato;
        }
    }

    PathBuf::from(DATAFILES_DIR)
}

/// Semana embebida en el nombre del archivo, ej: "op_sl_sem43.xlsx" -> 43.
/// Se usa para preferir el corte más nuevo cuando hay varios.
fn semana_en_nombre(nombre: &str) -> Option<u32> {
    let bajo = nombre.to_lowercase();
    let inicio = bajo.find("sem")? + 3;
    let resto = &bajo[inicio..];
    let fin = resto.find(|c: char| !c.is_ascii_digit()).unwrap_or(resto.len());
    resto[..fin].parse::<u32>().ok()
}

/// Archivo más reciente del directorio cuyo nombre contenga alguna keyword.
/// Preferencia: mayor número de semana en el nombre; a igualdad (o sin
/// número), fecha de modificación más reciente. Ignora ocultos y temporales.
fn latest_file_matching(dir: &Path, keywords: &[&str]) -> Option<PathBuf> {
    let read = fs::read_dir(dir).ok()?;

    let mut candidatos: Vec<(Option<u32>, std::time::SystemTime, PathBuf)> = Vec::new();
    for entry in read.flatten() {
        let p = entry.path();
        if !p.is_file() {
            continue;
        }
        let nombre = match p.file_name().and_then(|s| s.to_str()) {
            Some(s) => s.to_string(),
            None => continue,
        };
        if nombre.starts_with('.') || nombre.starts_with('~') || nombre.ends_with('~') {
            continue;
        }
        let bajo = nombre.to_lowercase();
        if !keywords.iter().any(|kw| bajo.contains(&kw.to_lowercase())) {
            continue;
        }
        let modificado = match entry.metadata().ok().and_then(|m| m.modified().ok()) {
            Some(m) => m,
            None => continue,
        };
        candidatos.push((semana_en_nombre(&nombre), modificado, p));
    }

    candidatos.sort_by(|a, b| match (a.0, b.0) {
        // mayor semana primero; sin semana en el nombre va al final
        (Some(sa), Some(sb)) if sa != sb => sb.cmp(&sa),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        // a igualdad, el modificado más reciente
        _ => b.1.cmp(&a.1),
    });
    candidatos.into_iter().next().map(|(_, _, p)| p)
}

/// Resuelve la ruta del archivo de datos a usar.
/// - `Some(nombre)`: path directo si existe, si no se busca en datafiles.
/// - `None`: el corte más nuevo que parezca un One Page.
pub fn resolve_datafile_path(nombre: Option<&str>) -> Result<PathBuf, Box<dyn Error>> {
    let data_dir = get_datafiles_dir();

    if let Some(n) = nombre {
        let directo = Path::new(n);
        if directo.exists() && directo.is_file() {
            return Ok(directo.to_path_buf());
        }
        let candidato = data_dir.join(n);
        if candidato.exists() && candidato.is_file() {
            return Ok(candidato);
        }
        return Err(format!("archivo '{}' no encontrado en cwd ni en {:?}", n, data_dir).into());
    }

    let keywords = ["one_page", "onepage", "op_sl"];
    latest_file_matching(&data_dir, &keywords)
        .ok_or_else(|| format!("no se encontró archivo One Page en {:?}", data_dir).into())
}

/// Lee un archivo de datos eligiendo el parser por extensión.
pub fn leer_onepage(path: &str) -> Result<Vec<crate::models::Observacion>, Box<dyn Error>> {
    let es_csv = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    if es_csv {
        leer_onepage_csv(path)
    } else {
        leer_onepage_excel(path)
    }
}

/// Lista los archivos de datos disponibles (xlsx/xls/csv) en datafiles.
pub fn list_available_datafiles() -> Result<Vec<String>, Box<dyn Error>> {
    let data_dir = get_datafiles_dir();
    let mut archivos: Vec<String> = Vec::new();

    let read = fs::read_dir(&data_dir)?;
    for entry in read.flatten() {
        let p = entry.path();
        if !p.is_file() {
            continue;
        }
        if let Some(nombre) = p.file_name().and_then(|s| s.to_str()) {
            if nombre.starts_with('.') || nombre.starts_with('~') || nombre.ends_with('~') {
                continue;
            }
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("").to_lowercase();
            if matches!(ext.as_str(), "xlsx" | "xls" | "xlsb" | "csv") {
                archivos.push(nombre.to_string());
            }
        }
    }

    archivos.sort();
    Ok(archivos)
}
