use onepage::excel::onepage::{fila_a_observacion, mapear_columnas};
use onepage::excel::{normalizar_encabezado, parsear_numero};
use onepage::metricas::CatalogoMetricas;

fn celdas(valores: &[&str]) -> Vec<String> {
    valores.iter().map(|s| s.to_string()).collect()
}

#[test]
fn mapea_encabezados_sin_importar_orden_ni_formato() {
    let catalogo = CatalogoMetricas::base();
    let encabezados = celdas(&[
        "Semana",
        "Nombre",
        "Zona",
        "Motos",
        "Contacto",
        "Promesas Cumplidas",
        "Meta",
        "plantilla_general",
    ]);

    let mapa = mapear_columnas(&encabezados, &catalogo);
    assert_eq!(mapa.nombre, Some(1));
    assert_eq!(mapa.zona, Some(2));
    assert_eq!(mapa.semana, Some(0));
    assert_eq!(mapa.motos, Some(3));

    // "Meta" es la columna legacy de logros_meta
    assert!(mapa.metricas.iter().any(|(n, i)| n == "logros_meta" && *i == 6));
    assert!(mapa.metricas.iter().any(|(n, i)| n == "contacto" && *i == 4));
    assert!(mapa.metricas.iter().any(|(n, i)| n == "promesas_cumplidas" && *i == 5));
    assert!(mapa.metricas.iter().any(|(n, i)| n == "plantilla_general" && *i == 7));
}

#[test]
fn fila_sin_nombre_se_descarta() {
    let catalogo = CatalogoMetricas::base();
    let encabezados = celdas(&["nombre", "zona", "semana", "contacto"]);
    let mapa = mapear_columnas(&encabezados, &catalogo);

    assert!(fila_a_observacion(&mapa, &celdas(&["", "Norte", "2025Sem40", "0.5"])).is_none());
    assert!(fila_a_observacion(&mapa, &celdas(&["Ana", "Norte", "2025Sem40", "0.5"])).is_some());
}

#[test]
fn fila_parsea_metricas_y_motos() {
    let catalogo = CatalogoMetricas::base();
    let encabezados = celdas(&["nombre", "zona", "semana", "motos", "contacto", "meta", "monto"]);
    let mapa = mapear_columnas(&encabezados, &catalogo);

    let obs = fila_a_observacion(
        &mapa,
        &celdas(&["Ana Morales", "Norte", "2025Sem40", "Italika 2", "0,65", "45%", "$125000"]),
    )
    .unwrap();

    assert_eq!(obs.cobrador, "Ana Morales");
    assert_eq!(obs.zona, "Norte");
    assert_eq!(obs.semana, "2025Sem40");
    assert_eq!(obs.motos, Some(2));
    assert_eq!(obs.valor("contacto"), Some(0.65));
    assert_eq!(obs.valor("logros_meta"), Some(45.0));
    assert_eq!(obs.valor("monto"), Some(125000.0));
}

#[test]
fn celda_no_numerica_queda_nula() {
    let catalogo = CatalogoMetricas::base();
    let encabezados = celdas(&["nombre", "contacto"]);
    let mapa = mapear_columnas(&encabezados, &catalogo);

    let obs = fila_a_observacion(&mapa, &celdas(&["Ana", "s/d"])).unwrap();
    assert_eq!(obs.valor("contacto"), None);

    let obs = fila_a_observacion(&mapa, &celdas(&["Ana", ""])).unwrap();
    assert_eq!(obs.valor("contacto"), None);
}

#[test]
fn normalizacion_de_encabezados() {
    assert_eq!(normalizar_encabezado("Promesas Cumplidas"), "promesascumplidas");
    assert_eq!(normalizar_encabezado("promesas_cumplidas"), "promesascumplidas");
    assert_eq!(normalizar_encabezado("Logró META"), "logrometa");
}

#[test]
fn numeros_con_formato_local() {
    assert_eq!(parsear_numero("0,75"), Some(0.75));
    assert_eq!(parsear_numero("45%"), Some(45.0));
    assert_eq!(parsear_numero("$1200"), Some(1200.0));
    assert_eq!(parsear_numero("  0.5  "), Some(0.5));
    assert_eq!(parsear_numero(""), None);
    assert_eq!(parsear_numero("pendiente"), None);
}
