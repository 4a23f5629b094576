// Estructuras de datos principales del One Page

use std::collections::HashMap;

/// Una fila de la hoja `one_page`: los valores de un cobrador en una semana.
/// Inmutable una vez leída; el resto del pipeline sólo la consulta.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Observacion {
    pub cobrador: String,
    pub zona: String,
    /// Etiqueta ordenable de semana, ej: "2025Sem43"
    pub semana: String,
    pub experiencia: String,
    /// Cantidad de motos asignadas (limpiada desde celdas tipo "Italika 2")
    pub motos: Option<i64>,
    /// metrica -> valor. `None` cuando la celda está vacía o no es numérica.
    pub metricas: HashMap<String, Option<f64>>,
}

impl Observacion {
    /// Valor de una métrica; columna ausente y celda vacía se tratan igual.
    pub fn valor(&self, metrica: &str) -> Option<f64> {
        self.metricas.get(metrica).copied().flatten()
    }
}

/// Resumen agregado de un cobrador sobre la ventana de semanas seleccionada.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ResumenCobrador {
    pub cobrador: String,
    pub zona: String,
    pub experiencia: String,
    pub motos: Option<i64>,
    /// Promedio de logros_meta en la ventana; criterio de orden del ranking.
    pub promedio_logro: f64,
    /// Promedio por métrica de flujo dentro de la ventana (columna ausente -> 0).
    pub promedios: HashMap<String, f64>,
    /// Último valor registrado de plantilla_general sobre la serie COMPLETA
    /// del cobrador (sin filtrar por ventana): es una foto del estado actual,
    /// no un flujo semanal.
    pub plantilla_general: Option<f64>,
    /// Porcentaje (20-100) para el gauge de dictamen de la tarjeta.
    pub dictamen_pct: i64,
    /// Semanas de la ventana en las que el cobrador tiene registros.
    pub semanas: Vec<String>,
}

/// Una celda de la grilla semanal: texto formateado y, si corresponde,
/// el color hex de la medalla. Sin color => celda plana (sin círculo).
#[derive(Debug, Clone, serde::Serialize)]
pub struct CeldaMedalla {
    pub color: Option<String>,
    pub texto: String,
}

impl CeldaMedalla {
    pub fn vacia() -> Self {
        CeldaMedalla { color: None, texto: String::new() }
    }

    /// HTML en línea: círculo de color + texto, o sólo el texto.
    pub fn html(&self) -> String {
        match &self.color {
            Some(hex) => format!(
                "<span style=\"display:inline-flex; align-items:center; gap:4px;\">\
<span style=\"width:10px; height:10px; border-radius:50%; background-color:{}; display:inline-block;\"></span>\
<span>{}</span></span>",
                hex, self.texto
            ),
            None => self.texto.clone(),
        }
    }
}

/// Una fila semanal ya clasificada, lista para la tarjeta (columnas fijas
/// en el mismo orden que el encabezado de la grilla).
#[derive(Debug, Clone, serde::Serialize)]
pub struct FilaSemana {
    pub semana: String,
    pub plantilla: CeldaMedalla,
    pub horas_visita: String,
    pub visitas_totales: String,
    pub visitas: CeldaMedalla,
    pub contacto: CeldaMedalla,
    pub promesas_contacto: CeldaMedalla,
    pub promesas_cumplidas: CeldaMedalla,
    pub monto: String,
    pub logros_meta: CeldaMedalla,
}

/// Resumen + filas semanales de un cobrador: la unidad que consumen tanto
/// el render HTML como la salida JSON.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TarjetaCobrador {
    pub resumen: ResumenCobrador,
    pub filas: Vec<FilaSemana>,
}
