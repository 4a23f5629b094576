//! Catálogo de métricas del One Page y tabla de reglas fijas.
//!
//! El catálogo declara, por métrica: el tipo de valor (porcentaje / conteo /
//! moneda), si agrega como flujo (promedio semanal) o como foto instantánea
//! (último valor registrado), qué regla fija le aplica y si su meta se
//! calcula dinámicamente por cobrador.
//!
//! Los umbrales de las reglas fijas son constantes de negocio ajustadas a
//! mano: viven acá como tabla editable, no como literales dispersos, y se
//! pueden sobreescribir con un JSON apuntado por `ONEPAGE_REGLAS_PATH`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::error::Error;

/// Tipo de valor de una métrica. Las razones se almacenan como decimales en
/// [0,1] y se muestran como porcentaje.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TipoMetrica {
    Porcentaje,
    Conteo,
    Moneda,
}

/// Cómo agrega la métrica dentro de una ventana de semanas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaseMetrica {
    /// Flujo por semana: el resumen muestra el promedio de la ventana.
    Flujo,
    /// Foto del estado actual: el resumen muestra el último valor registrado
    /// de la serie completa, nunca un promedio.
    Instantanea,
}

/// Definición de una métrica del catálogo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metrica {
    pub nombre: String,
    pub tipo: TipoMetrica,
    pub clase: ClaseMetrica,
    /// Nombre de la regla fija aplicable. `None` => la política fija no
    /// conoce esta métrica (medalla gris).
    pub regla: Option<String>,
    /// Si la meta se calcula por percentil del propio cobrador. Las métricas
    /// con `false` usan la meta por defecto de su tipo bajo política relativa.
    pub meta_dinamica: bool,
}

impl Metrica {
    fn nueva(
        nombre: &str,
        tipo: TipoMetrica,
        clase: ClaseMetrica,
        regla: Option<&str>,
        meta_dinamica: bool,
    ) -> Self {
        Metrica {
            nombre: nombre.to_string(),
            tipo,
            clase,
            regla: regla.map(|s| s.to_string()),
            meta_dinamica,
        }
    }
}

/// Catálogo completo de métricas del One Page.
#[derive(Debug, Clone)]
pub struct CatalogoMetricas {
    metricas: Vec<Metrica>,
}

impl CatalogoMetricas {
    /// Columnas de la hoja `one_page` tal como las consume el tablero.
    pub fn base() -> Self {
        use ClaseMetrica::*;
        use TipoMetrica::*;
        CatalogoMetricas {
            metricas: vec![
                Metrica::nueva("plantilla", Porcentaje, Flujo, Some("plantilla"), true),
                Metrica::nueva("horas_visita", Conteo, Flujo, None, false),
                Metrica::nueva("visitas_totales", Conteo, Flujo, None, false),
                // La meta de visitas es un piso fijo de negocio, no un percentil
                Metrica::nueva("visitas", Conteo, Flujo, Some("visitas"), false),
                Metrica::nueva("contacto", Porcentaje, Flujo, Some("contacto"), true),
                // Promesas/contacto se evalúa con la misma regla que contacto
                Metrica::nueva("promesas_contacto", Porcentaje, Flujo, Some("contacto"), true),
                Metrica::nueva(
                    "promesas_cumplidas",
                    Porcentaje,
                    Flujo,
                    Some("promesas_cumplidas"),
                    true,
                ),
                Metrica::nueva("monto", Moneda, Flujo, None, false),
                Metrica::nueva("logros_meta", Porcentaje, Flujo, Some("logro_meta"), true),
                Metrica::nueva("plantilla_general", Porcentaje, Instantanea, None, false),
            ],
        }
    }

    pub fn todas(&self) -> &[Metrica] {
        &self.metricas
    }

    pub fn buscar(&self, nombre: &str) -> Option<&Metrica> {
        self.metricas.iter().find(|m| m.nombre == nombre)
    }

    /// Métricas de flujo (las que promedia el resumen).
    pub fn de_flujo(&self) -> impl Iterator<Item = &Metrica> {
        self.metricas.iter().filter(|m| m.clase == ClaseMetrica::Flujo)
    }
}

/// Umbrales de una regla fija sobre la escala normalizada 0-100.
/// verde: v >= verde_desde; amarillo: amarillo_desde <= v < verde_desde;
/// rojo: v < amarillo_desde. Intervalos semiabiertos, cota superior excluida.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReglaFija {
    pub verde_desde: f64,
    pub amarillo_desde: f64,
}

/// Tabla de reglas fijas, por nombre de regla.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TablaReglas {
    reglas: HashMap<String, ReglaFija>,
}

impl Default for TablaReglas {
    fn default() -> Self {
        let mut reglas = HashMap::new();
        reglas.insert("contacto".to_string(), ReglaFija { verde_desde: 65.0, amarillo_desde: 40.0 });
        reglas.insert(
            "promesas_cumplidas".to_string(),
            ReglaFija { verde_desde: 60.0, amarillo_desde: 40.0 },
        );
        reglas.insert("logro_meta".to_string(), ReglaFija { verde_desde: 70.0, amarillo_desde: 50.0 });
        reglas.insert("visitas".to_string(), ReglaFija { verde_desde: 15.0, amarillo_desde: 10.0 });
        reglas.insert("plantilla".to_string(), ReglaFija { verde_desde: 90.0, amarillo_desde: 80.0 });
        TablaReglas { reglas }
    }
}

impl TablaReglas {
    pub fn regla(&self, nombre: &str) -> Option<&ReglaFija> {
        self.reglas.get(nombre)
    }

    /// Lee una tabla desde JSON: `{"contacto": {"verde_desde": 65, "amarillo_desde": 40}, ...}`
    pub fn desde_json(json_str: &str) -> Result<Self, Box<dyn Error>> {
        let reglas: HashMap<String, ReglaFija> = serde_json::from_str(json_str)?;
        Ok(TablaReglas { reglas })
    }

    /// Carga la tabla de reglas: si `ONEPAGE_REGLAS_PATH` apunta a un JSON
    /// legible se usa ese; cualquier problema degrada a los valores por
    /// defecto con un aviso.
    pub fn cargar() -> Self {
        if let Ok(ruta) = std::env::var("ONEPAGE_REGLAS_PATH") {
            match std::fs::read_to_string(&ruta) {
                Ok(contenido) => match TablaReglas::desde_json(&contenido) {
                    Ok(tabla) => return tabla,
                    Err(e) => eprintln!("WARN: reglas inválidas en '{}': {}. Usando defaults.", ruta, e),
                },
                Err(e) => eprintln!("WARN: no se pudo leer '{}': {}. Usando defaults.", ruta, e),
            }
        }
        TablaReglas::default()
    }
}
