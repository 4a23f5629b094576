//! Clasificación de medallas: el núcleo del One Page.
//!
//! Una medalla es un círculo de color + el valor formateado. El color sale de
//! comparar el valor contra una regla fija de negocio (`Politica::Fija`) o
//! contra la meta propia del cobrador con un margen de tolerancia
//! (`Politica::Relativa`). Ambas políticas comparten el mismo contrato
//! visual; `clasificar` es el único punto de decisión.

use crate::metricas::{Metrica, TablaReglas, TipoMetrica};
use crate::models::CeldaMedalla;

/// Margen de tolerancia por defecto bajo política relativa.
pub const MARGEN_DEFECTO: f64 = 0.05;

/// Color de la medalla. Derivado en cada render, nunca se persiste.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMedalla {
    Verde,
    Amarillo,
    Rojo,
    /// Métrica sin regla conocida bajo política fija.
    Gris,
}

impl ColorMedalla {
    pub fn hex(&self) -> &'static str {
        match self {
            ColorMedalla::Verde => "#32CD32",
            ColorMedalla::Amarillo => "#FFD700",
            ColorMedalla::Rojo => "#FF4C4C",
            ColorMedalla::Gris => "#808080",
        }
    }
}

/// Medalla ya resuelta: color + texto a mostrar.
#[derive(Debug, Clone)]
pub struct Medalla {
    pub color: ColorMedalla,
    pub texto: String,
}

impl Medalla {
    pub fn celda(&self) -> CeldaMedalla {
        CeldaMedalla { color: Some(self.color.hex().to_string()), texto: self.texto.clone() }
    }
}

/// Política de clasificación. Las dos variantes conviven: la fija usa la
/// tabla de reglas de negocio, la relativa compara contra la meta calculada
/// para el cobrador.
#[derive(Debug, Clone, Copy)]
pub enum Politica<'a> {
    Fija(&'a TablaReglas),
    Relativa { meta: f64, margen: f64 },
}

/// Modo de medallas pedido por el cliente; selecciona qué política se arma.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModoMedallas {
    Fijo,
    Relativo,
}

impl ModoMedallas {
    /// "fijo" | "relativo"; cualquier otra cosa cae al modo fijo.
    pub fn desde_texto(s: Option<&str>) -> Self {
        match s {
            Some(t) if t.eq_ignore_ascii_case("relativo") => ModoMedallas::Relativo,
            _ => ModoMedallas::Fijo,
        }
    }
}

/// Clasifica un valor bajo la política dada. Valor ausente o NaN => sin
/// medalla (`None`), independiente de la meta.
pub fn clasificar(valor: Option<f64>, politica: &Politica, metrica: &Metrica) -> Option<Medalla> {
    let v = match valor {
        Some(x) if !x.is_nan() => x,
        _ => return None,
    };

    match politica {
        Politica::Fija(tabla) => Some(clasificar_fija(v, tabla, metrica)),
        Politica::Relativa { meta, margen } => Some(clasificar_relativa(v, *meta, *margen, metrica)),
    }
}

/// Política fija: normaliza primero (decimales [0,1] pasan a escala 0-100 y
/// se muestran como porcentaje), luego compara contra la regla de la métrica.
fn clasificar_fija(valor: f64, tabla: &TablaReglas, metrica: &Metrica) -> Medalla {
    let (val, como_porcentaje) = if (0.0..=1.0).contains(&valor) {
        (valor * 100.0, true)
    } else {
        (valor, false)
    };

    let color = match metrica.regla.as_deref().and_then(|r| tabla.regla(r)) {
        Some(regla) => {
            if val >= regla.verde_desde {
                ColorMedalla::Verde
            } else if val >= regla.amarillo_desde {
                ColorMedalla::Amarillo
            } else {
                ColorMedalla::Rojo
            }
        }
        None => ColorMedalla::Gris,
    };

    let texto = if como_porcentaje {
        format!("{:.1}%", val)
    } else {
        miles(val.trunc() as i64)
    };

    Medalla { color, texto }
}

/// Política relativa: verde al alcanzar la meta, amarillo dentro del margen
/// de tolerancia (cota inferior inclusive), rojo por debajo.
fn clasificar_relativa(valor: f64, meta: f64, margen: f64, metrica: &Metrica) -> Medalla {
    let color = if valor >= meta {
        ColorMedalla::Verde
    } else if valor >= meta * (1.0 - margen) {
        ColorMedalla::Amarillo
    } else {
        ColorMedalla::Rojo
    };

    let texto = match metrica.tipo {
        TipoMetrica::Porcentaje => format!("{:.1}%", valor * 100.0),
        _ => format!("{:.0}", valor),
    };

    Medalla { color, texto }
}

/// Entero con separador de miles: 1234567 -> "1,234,567".
pub fn miles(n: i64) -> String {
    let negativo = n < 0;
    let digitos = n.unsigned_abs().to_string();
    let mut salida = String::new();
    for (i, c) in digitos.chars().enumerate() {
        if i > 0 && (digitos.len() - i) % 3 == 0 {
            salida.push(',');
        }
        salida.push(c);
    }
    if negativo {
        format!("-{}", salida)
    } else {
        salida
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metricas::CatalogoMetricas;

    #[test]
    fn miles_separa_grupos_de_tres() {
        assert_eq!(miles(0), "0");
        assert_eq!(miles(999), "999");
        assert_eq!(miles(1000), "1,000");
        assert_eq!(miles(1234567), "1,234,567");
        assert_eq!(miles(-4500), "-4,500");
    }

    #[test]
    fn valor_ausente_no_genera_medalla() {
        let catalogo = CatalogoMetricas::base();
        let tabla = TablaReglas::default();
        let metrica = catalogo.buscar("contacto").unwrap();
        assert!(clasificar(None, &Politica::Fija(&tabla), metrica).is_none());
        assert!(clasificar(Some(f64::NAN), &Politica::Fija(&tabla), metrica).is_none());
        let relativa = Politica::Relativa { meta: 0.8, margen: MARGEN_DEFECTO };
        assert!(clasificar(None, &relativa, metrica).is_none());
        assert!(clasificar(Some(f64::NAN), &relativa, metrica).is_none());
    }
}
