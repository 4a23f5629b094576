use onepage::excel::leer_onepage_csv;
use std::io::Write;

#[test]
fn lee_un_export_csv_completo() {
    let ruta = std::env::temp_dir().join("onepage_lectura.csv");
    let mut f = std::fs::File::create(&ruta).unwrap();
    writeln!(f, "nombre,zona,semana,motos,contacto,meta,plantilla_general").unwrap();
    writeln!(f, "Ana Morales,Norte,2025Sem40,Italika 2,0.55,0.45,0.9").unwrap();
    writeln!(f, "Luis Soto,Sur,2025Sem40,,75%,\"0,8\",").unwrap();
    // filas vacias o sin nombre se descartan
    writeln!(f, ",,,,,,").unwrap();
    f.flush().unwrap();

    let observaciones = leer_onepage_csv(ruta.to_str().unwrap()).unwrap();
    assert_eq!(observaciones.len(), 2);

    let ana = &observaciones[0];
    assert_eq!(ana.cobrador, "Ana Morales");
    assert_eq!(ana.motos, Some(2));
    assert_eq!(ana.valor("contacto"), Some(0.55));
    // la columna legacy "meta" llega como logros_meta
    assert_eq!(ana.valor("logros_meta"), Some(0.45));
    assert_eq!(ana.valor("plantilla_general"), Some(0.9));

    let luis = &observaciones[1];
    assert_eq!(luis.motos, None);
    // formatos locales: "75%" y coma decimal
    assert_eq!(luis.valor("contacto"), Some(75.0));
    assert_eq!(luis.valor("logros_meta"), Some(0.8));
    assert_eq!(luis.valor("plantilla_general"), None);

    let _ = std::fs::remove_file(ruta);
}

#[test]
fn el_cache_comparte_la_misma_lectura() {
    let ruta = std::env::temp_dir().join("onepage_cache.csv");
    let mut f = std::fs::File::create(&ruta).unwrap();
    writeln!(f, "nombre,zona,semana,contacto").unwrap();
    writeln!(f, "Ana,Norte,2025Sem40,0.5").unwrap();
    f.flush().unwrap();

    let ruta_str = ruta.to_str().unwrap();
    let primera = onepage::excel::get_observaciones_cached(Some(ruta_str)).unwrap();
    let segunda = onepage::excel::get_observaciones_cached(Some(ruta_str)).unwrap();
    // misma ruta resuelta -> mismo Arc, sin re-parsear
    assert!(std::sync::Arc::ptr_eq(&primera, &segunda));

    let _ = std::fs::remove_file(ruta);
}

#[test]
fn csv_sin_columna_de_nombre_es_error() {
    let ruta = std::env::temp_dir().join("onepage_sin_nombre.csv");
    let mut f = std::fs::File::create(&ruta).unwrap();
    writeln!(f, "zona,semana,contacto").unwrap();
    writeln!(f, "Norte,2025Sem40,0.5").unwrap();
    f.flush().unwrap();

    assert!(leer_onepage_csv(ruta.to_str().unwrap()).is_err());

    let _ = std::fs::remove_file(ruta);
}
