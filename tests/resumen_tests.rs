use onepage::metricas::CatalogoMetricas;
use onepage::models::Observacion;
use onepage::resumen::{
    acotar_ventana, filtrar, resumir, semanas_disponibles, ventana_por_defecto, MAX_SEMANAS,
};
use std::collections::HashMap;

fn obs(cobrador: &str, zona: &str, semana: &str, metricas: &[(&str, Option<f64>)]) -> Observacion {
    let mut mapa: HashMap<String, Option<f64>> = HashMap::new();
    for (nombre, valor) in metricas {
        mapa.insert(nombre.to_string(), *valor);
    }
    Observacion {
        cobrador: cobrador.to_string(),
        zona: zona.to_string(),
        semana: semana.to_string(),
        experiencia: "2 años".to_string(),
        motos: Some(1),
        metricas: mapa,
    }
}

#[test]
fn promedio_de_logros_meta_en_la_ventana() {
    let catalogo = CatalogoMetricas::base();
    let todas = vec![
        obs("Ana", "Norte", "2025Sem40", &[("logros_meta", Some(0.5))]),
        obs("Ana", "Norte", "2025Sem41", &[("logros_meta", Some(0.7))]),
    ];
    let ventana = vec!["2025Sem40".to_string(), "2025Sem41".to_string()];
    let filtradas = filtrar(&todas, None, &ventana);

    let resumenes = resumir(&todas, &filtradas, &catalogo);
    assert_eq!(resumenes.len(), 1);
    assert!((resumenes[0].promedio_logro - 0.6).abs() < 1e-12);
}

#[test]
fn plantilla_general_es_el_ultimo_registro_global() {
    // la ventana solo incluye la semana 40, pero la plantilla reporta el
    // ultimo valor registrado de toda la serie (semana 41)
    let catalogo = CatalogoMetricas::base();
    let todas = vec![
        obs("Ana", "Norte", "2025Sem40", &[("plantilla_general", Some(80.0)), ("logros_meta", Some(0.5))]),
        obs("Ana", "Norte", "2025Sem41", &[("plantilla_general", Some(90.0)), ("logros_meta", Some(0.6))]),
    ];
    let ventana = vec!["2025Sem40".to_string()];
    let filtradas = filtrar(&todas, None, &ventana);

    let resumenes = resumir(&todas, &filtradas, &catalogo);
    assert_eq!(resumenes[0].plantilla_general, Some(90.0));
}

#[test]
fn plantilla_general_salta_registros_nulos() {
    let catalogo = CatalogoMetricas::base();
    let todas = vec![
        obs("Ana", "Norte", "2025Sem40", &[("plantilla_general", Some(85.0)), ("logros_meta", Some(0.5))]),
        obs("Ana", "Norte", "2025Sem41", &[("plantilla_general", None), ("logros_meta", Some(0.6))]),
    ];
    let ventana = vec!["2025Sem40".to_string(), "2025Sem41".to_string()];
    let filtradas = filtrar(&todas, None, &ventana);

    let resumenes = resumir(&todas, &filtradas, &catalogo);
    assert_eq!(resumenes[0].plantilla_general, Some(85.0));
}

#[test]
fn cobrador_sin_filas_en_la_ventana_queda_fuera() {
    let catalogo = CatalogoMetricas::base();
    let todas = vec![
        obs("Ana", "Norte", "2025Sem40", &[("logros_meta", Some(0.5))]),
        obs("Luis", "Sur", "2025Sem39", &[("logros_meta", Some(0.9))]),
    ];
    let ventana = vec!["2025Sem40".to_string()];
    let filtradas = filtrar(&todas, None, &ventana);

    let resumenes = resumir(&todas, &filtradas, &catalogo);
    assert_eq!(resumenes.len(), 1);
    assert_eq!(resumenes[0].cobrador, "Ana");
}

#[test]
fn ranking_descendente_con_empates_estables() {
    let catalogo = CatalogoMetricas::base();
    let todas = vec![
        obs("Ana", "Norte", "2025Sem40", &[("logros_meta", Some(0.6))]),
        obs("Luis", "Sur", "2025Sem40", &[("logros_meta", Some(0.9))]),
        obs("Carlos", "Centro", "2025Sem40", &[("logros_meta", Some(0.6))]),
    ];
    let ventana = vec!["2025Sem40".to_string()];
    let filtradas = filtrar(&todas, None, &ventana);

    let resumenes = resumir(&todas, &filtradas, &catalogo);
    let orden: Vec<&str> = resumenes.iter().map(|r| r.cobrador.as_str()).collect();
    // Luis primero; Ana y Carlos empatan y conservan su orden de aparicion
    assert_eq!(orden, vec!["Luis", "Ana", "Carlos"]);
}

#[test]
fn columna_ausente_promedia_cero() {
    let catalogo = CatalogoMetricas::base();
    let todas = vec![obs("Ana", "Norte", "2025Sem40", &[("logros_meta", Some(0.5))])];
    let filtradas = filtrar(&todas, None, &["2025Sem40".to_string()]);

    let resumenes = resumir(&todas, &filtradas, &catalogo);
    assert_eq!(*resumenes[0].promedios.get("contacto").unwrap(), 0.0);
    assert_eq!(*resumenes[0].promedios.get("monto").unwrap(), 0.0);
}

#[test]
fn filtro_por_zona() {
    let todas = vec![
        obs("Ana", "Norte", "2025Sem40", &[]),
        obs("Luis", "Sur", "2025Sem40", &[]),
    ];
    let ventana = vec!["2025Sem40".to_string()];

    let norte = filtrar(&todas, Some("Norte"), &ventana);
    assert_eq!(norte.len(), 1);
    assert_eq!(norte[0].cobrador, "Ana");

    // "Todas" y None no filtran
    assert_eq!(filtrar(&todas, Some("Todas"), &ventana).len(), 2);
    assert_eq!(filtrar(&todas, None, &ventana).len(), 2);
}

#[test]
fn ventana_por_defecto_son_las_ultimas_cuatro() {
    let semanas: Vec<String> =
        (39..=44).map(|n| format!("2025Sem{}", n)).collect();
    let ventana = ventana_por_defecto(&semanas);
    assert_eq!(ventana.len(), MAX_SEMANAS);
    assert_eq!(ventana[0], "2025Sem41");
    assert_eq!(ventana[3], "2025Sem44");
}

#[test]
fn acotar_ventana_recorta_y_cae_al_defecto() {
    let disponibles: Vec<String> =
        (40..=45).map(|n| format!("2025Sem{}", n)).collect();

    // mas de 4: se conservan las primeras 4 pedidas
    let pedidas: Vec<String> = (40..=44).map(|n| format!("2025Sem{}", n)).collect();
    let acotada = acotar_ventana(pedidas, &disponibles);
    assert_eq!(acotada.len(), MAX_SEMANAS);

    // seleccion vacia: ventana por defecto
    let defecto = acotar_ventana(Vec::new(), &disponibles);
    assert_eq!(defecto, ventana_por_defecto(&disponibles));

    // semanas inexistentes se descartan antes de acotar
    let rara = acotar_ventana(vec!["2030Sem01".to_string()], &disponibles);
    assert_eq!(rara, ventana_por_defecto(&disponibles));
}

#[test]
fn semanas_disponibles_unicas_y_ordenadas() {
    let todas = vec![
        obs("Ana", "Norte", "2025Sem41", &[]),
        obs("Luis", "Sur", "2025Sem40", &[]),
        obs("Ana", "Norte", "2025Sem40", &[]),
    ];
    assert_eq!(semanas_disponibles(&todas), vec!["2025Sem40".to_string(), "2025Sem41".to_string()]);
}

#[test]
fn dictamen_se_deriva_del_monto() {
    let catalogo = CatalogoMetricas::base();
    let con_monto = vec![obs("Ana", "Norte", "2025Sem40", &[("monto", Some(5000.0)), ("logros_meta", Some(0.5))])];
    let filtradas = filtrar(&con_monto, None, &["2025Sem40".to_string()]);
    let resumenes = resumir(&con_monto, &filtradas, &catalogo);
    assert_eq!(resumenes[0].dictamen_pct, 100);

    let sin_monto = vec![obs("Luis", "Sur", "2025Sem40", &[("logros_meta", Some(0.5))])];
    let filtradas = filtrar(&sin_monto, None, &["2025Sem40".to_string()]);
    let resumenes = resumir(&sin_monto, &filtradas, &catalogo);
    assert_eq!(resumenes[0].dictamen_pct, 20);
}
