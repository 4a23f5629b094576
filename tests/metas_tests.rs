use onepage::metas::{
    metas_por_cobrador, percentil, resolver_meta, META_DEFECTO, META_DEFECTO_CONTEO,
};
use onepage::metricas::{CatalogoMetricas, TipoMetrica};
use onepage::models::Observacion;
use std::collections::HashMap;

fn obs(cobrador: &str, semana: &str, metricas: &[(&str, Option<f64>)]) -> Observacion {
    let mut mapa: HashMap<String, Option<f64>> = HashMap::new();
    for (nombre, valor) in metricas {
        mapa.insert(nombre.to_string(), *valor);
    }
    Observacion {
        cobrador: cobrador.to_string(),
        zona: "Norte".to_string(),
        semana: semana.to_string(),
        experiencia: String::new(),
        motos: None,
        metricas: mapa,
    }
}

#[test]
fn percentil_75_de_un_valor_es_ese_valor() {
    assert_eq!(percentil(&[0.62], 75.0), Some(0.62));
}

#[test]
fn percentil_interpola_entre_estadisticos_de_orden() {
    assert_eq!(percentil(&[1.0, 2.0, 3.0, 4.0], 75.0), Some(3.25));
    assert_eq!(percentil(&[10.0, 20.0], 75.0), Some(17.5));
}

#[test]
fn historial_vacio_usa_meta_por_defecto() {
    assert_eq!(resolver_meta(&[], TipoMetrica::Porcentaje), META_DEFECTO);
    assert_eq!(resolver_meta(&[], TipoMetrica::Conteo), META_DEFECTO_CONTEO);
    // los nulos no cuentan como historial
    assert_eq!(resolver_meta(&[None, None], TipoMetrica::Porcentaje), META_DEFECTO);
}

#[test]
fn metas_se_calculan_por_cobrador() {
    let catalogo = CatalogoMetricas::base();
    let observaciones = vec![
        obs("Ana", "2025Sem40", &[("contacto", Some(0.5))]),
        obs("Ana", "2025Sem41", &[("contacto", Some(0.7))]),
        obs("Luis", "2025Sem40", &[("contacto", Some(0.9))]),
    ];

    let metas = metas_por_cobrador(&observaciones, &catalogo);

    // Ana: percentil 75 de [0.5, 0.7] = 0.65
    let ana = metas.get("Ana").unwrap();
    assert!((ana.get("contacto").unwrap() - 0.65).abs() < 1e-12);

    // Luis: un solo valor, la meta es ese valor
    let luis = metas.get("Luis").unwrap();
    assert_eq!(*luis.get("contacto").unwrap(), 0.9);
}

#[test]
fn cobrador_sin_historial_de_la_metrica_cae_al_defecto() {
    let catalogo = CatalogoMetricas::base();
    let observaciones = vec![obs("Ana", "2025Sem40", &[("contacto", None)])];

    let metas = metas_por_cobrador(&observaciones, &catalogo);
    let ana = metas.get("Ana").unwrap();
    assert_eq!(*ana.get("contacto").unwrap(), META_DEFECTO);
    assert_eq!(*ana.get("plantilla").unwrap(), META_DEFECTO);
}

#[test]
fn visitas_mantiene_su_meta_fija() {
    // visitas no es meta dinamica: aunque haya historial alto, la meta sigue
    // siendo el piso de conteo
    let catalogo = CatalogoMetricas::base();
    let observaciones = vec![
        obs("Ana", "2025Sem40", &[("visitas", Some(200.0))]),
        obs("Ana", "2025Sem41", &[("visitas", Some(300.0))]),
    ];

    let metas = metas_por_cobrador(&observaciones, &catalogo);
    let ana = metas.get("Ana").unwrap();
    assert_eq!(*ana.get("visitas").unwrap(), META_DEFECTO_CONTEO);
}
