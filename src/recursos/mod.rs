//! Búsqueda de recursos en disco: fotos de cobradores y gráficos
//! pre-generados por el script de visualizaciones.
//!
//! Todo se embebe como data-URI base64 en el HTML; un recurso ausente nunca
//! es error: las fotos caen a un placeholder y los gráficos se omiten.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::path::{Path, PathBuf};

/// Tipos de gráfico que genera el script de visualizaciones, en el orden en
/// que aparecen en la tarjeta.
pub const TIPOS_GRAFICO: [&str; 2] = ["dictamen", "pagoscumpli"];

/// Directorio raíz de recursos (fotos, visualizaciones).
pub fn get_resources_dir() -> PathBuf {
    if let Ok(path) = std::env::var("ONEPAGE_RESOURCES_DIR") {
        let p = PathBuf::from(path);
        if p.exists() {
            return p;
        }
        eprintln!("WARN: ONEPAGE_RESOURCES_DIR apunta a {:?} pero no existe", p);
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let candidatos = vec![cwd.join("Resources"), cwd.join("resources")];
    for candidato in candidatos {
        if candidato.exists() {
            return candidato;
        }
    }
    PathBuf::from("Resources")
}

/// Nombre del cobrador sin espacios, usado en los nombres de archivo.
pub fn nombre_junto(nombre: &str) -> String {
    nombre.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Ruta esperada de la foto de un cobrador.
pub fn foto_path(nombre: &str) -> PathBuf {
    get_resources_dir().join("Photos").join(format!("{}Pic.png", nombre_junto(nombre)))
}

/// Lee una imagen y la devuelve como data-URI base64. `None` si el archivo
/// no se puede leer.
pub fn imagen_a_base64<P: AsRef<Path>>(path: P) -> Option<String> {
    match std::fs::read(path.as_ref()) {
        Ok(bytes) => Some(format!("data:image/png;base64,{}", STANDARD.encode(bytes))),
        Err(_) => None,
    }
}

/// Foto del cobrador como data-URI, si existe en disco.
pub fn foto_b64(nombre: &str) -> Option<String> {
    imagen_a_base64(foto_path(nombre))
}

/// Carga los gráficos pre-generados del cobrador para la semana indicada y
/// devuelve el bloque HTML con los que existan. Los faltantes se omiten con
/// un aviso, igual que hace el script de visualizaciones al revés.
pub fn cargar_visualizaciones(nombre: &str, semana: &str) -> String {
    let dir = get_resources_dir().join("Visualizations");
    let junto = nombre_junto(nombre);

    let mut html = String::new();
    for tipo in TIPOS_GRAFICO {
        let ruta = dir.join(format!("{}_{}_{}.png", semana, junto, tipo));
        match imagen_a_base64(&ruta) {
            Some(b64) => {
                html.push_str(&format!(
                    "<div class=\"grafico\" style=\"margin-top:8px\">\
<img src=\"{}\" style=\"width:100%; height:300px; object-fit:contain;\">\
</div>",
                    b64
                ));
            }
            None => eprintln!("WARN: no se encontró gráfico {:?}", ruta),
        }
    }
    html
}
