use crate::analithics::db::analytics_db_path;
use rusqlite::Connection;
use std::error::Error;

/// Renders más recientes, como filas JSON (id, ts, zona, modo, duración...).
pub fn renders_recientes(limit: Option<usize>) -> Result<serde_json::Value, Box<dyn Error>> {
    let conn = Connection::open(analytics_db_path())?;
    let lim = limit.unwrap_or(10) as i64;
    let mut stmt = conn.prepare(
        "SELECT id, ts, duration_ms, zona, semanas, modo, archivo, cobradores
         FROM renders ORDER BY id DESC LIMIT ?1",
    )?;
    let rows = stmt.query_map([lim], |row| {
        Ok(serde_json::json!({
            "id": row.get::<_, i64>(0)?,
            "ts": row.get::<_, String>(1)?,
            "duration_ms": row.get::<_, Option<i64>>(2)?,
            "zona": row.get::<_, Option<String>>(3)?,
            "semanas": row.get::<_, Option<String>>(4)?,
            "modo": row.get::<_, Option<String>>(5)?,
            "archivo": row.get::<_, Option<String>>(6)?,
            "cobradores": row.get::<_, Option<i64>>(7)?,
        }))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(serde_json::Value::Array(out))
}

/// Resumen global de renders: total, duración promedio y conteos por zona y
/// por modo. Persiste el resultado como report.
pub fn resumen_renders() -> Result<serde_json::Value, Box<dyn Error>> {
    use std::collections::HashMap;
    let conn = Connection::open(analytics_db_path())?;

    let mut stmt = conn.prepare("SELECT zona, modo, duration_ms FROM renders")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, Option<String>>(0)?,
            row.get::<_, Option<String>>(1)?,
            row.get::<_, Option<i64>>(2)?,
        ))
    })?;

    let mut total = 0usize;
    let mut suma_ms = 0i64;
    let mut con_duracion = 0usize;
    let mut por_zona: HashMap<String, usize> = HashMap::new();
    let mut por_modo: HashMap<String, usize> = HashMap::new();

    for r in rows {
        let (zona, modo, duracion) = r?;
        total += 1;
        if let Some(ms) = duracion {
            suma_ms += ms;
            con_duracion += 1;
        }
        *por_zona.entry(zona.unwrap_or_else(|| "Todas".to_string())).or_default() += 1;
        *por_modo.entry(modo.unwrap_or_else(|| "fijo".to_string())).or_default() += 1;
    }

    let promedio_ms = if con_duracion == 0 { 0.0 } else { suma_ms as f64 / con_duracion as f64 };
    let result = serde_json::json!({
        "total_renders": total,
        "duracion_promedio_ms": promedio_ms,
        "por_zona": por_zona,
        "por_modo": por_modo,
    });

    let _ = crate::analithics::save_report("resumen_renders", "{}", &result.to_string());
    Ok(result)
}

/// Zonas más consultadas entre los renders registrados.
pub fn zonas_mas_consultadas(limit: Option<usize>) -> Result<serde_json::Value, Box<dyn Error>> {
    use std::collections::HashMap;
    let conn = Connection::open(analytics_db_path())?;
    let mut stmt = conn.prepare("SELECT zona FROM renders WHERE zona IS NOT NULL")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut counts: HashMap<String, usize> = HashMap::new();
    for r in rows.flatten() {
        *counts.entry(r).or_default() += 1;
    }

    let mut v: Vec<(String, usize)> = counts.into_iter().collect();
    v.sort_by(|a, b| b.1.cmp(&a.1));
    let lim = limit.unwrap_or(20);
    let arr: Vec<serde_json::Value> = v
        .into_iter()
        .take(lim)
        .map(|(zona, c)| serde_json::json!({"zona": zona, "count": c}))
        .collect();

    let result = serde_json::Value::Array(arr);
    let params = serde_json::json!({"limit": limit});
    let _ = crate::analithics::save_report("zonas_mas_consultadas", &params.to_string(), &result.to_string());
    Ok(result)
}
