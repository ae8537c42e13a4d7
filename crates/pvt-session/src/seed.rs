//! Built-in verb table for first-time users
//!
//! Meanings are Spanish translations laid out in the current 20-column
//! schema. Rows are normalized on the way in, so a stray trailing column is
//! trimmed rather than rejected.

use pvt_matrix::{normalize, PrepositionSchema, VerbRow};

const INITIAL_VERBS: &[(&str, &[&str])] = &[
    (
        "Ask",
        &["Preguntar por", "", "", "", "", "", "", "", "", "Pedir salir", "", "", "", "", "", "", "", "", "", ""],
    ),
    (
        "Back",
        &["", "", "", "", "", "", "", "", "Echarse atrás", "", "", "", "", "Alejarse", "", "Retirarse", "", "Apoyar/Respaldar", "", ""],
    ),
    (
        "Be",
        &["Tratar de/Estar a punto de", "", "", "", "", "Estar fuera", "", "", "Estar deprimido", "Ir tras algo", "", "Estar en casa", "", "Irse", "Estar encendido", "", "Haber terminado", "Estar despierto", "", "Estar enfermo de"],
    ),
    (
        "Blow",
        &["", "", "", "", "", "", "", "", "", "", "", "", "", "Soplar/Apagar", "", "Explotar", "", "Explotar", "", ""],
    ),
    (
        "Break",
        &["", "", "", "", "", "", "", "", "Averiarse", "", "", "Interrumpir", "Irrumpir", "", "", "Estallar/Repartir", "", "Terminar (relación)", "", ""],
    ),
    (
        "Bring",
        &["Causar/Provocar", "", "", "", "", "Devolver", "Traer de vuelta", "", "Bajar/Reducir", "", "", "", "", "", "", "", "", "Mencionar/Criar", "", ""],
    ),
    (
        "Bump",
        &["", "Encontrarse con", "", "", "", "", "", "Visitar", "", "", "", "", "", "Chocarse con", "", "", "", "", "", ""],
    ),
    (
        "Call",
        &["", "", "", "", "", "", "Devolver llamada", "", "", "Pedir/Requerir", "", "Visitar/Pasarse", "", "Cancelar/Suspender", "Visitar", "Gritar", "", "", "", ""],
    ),
    (
        "Carry",
        &["", "", "", "Continuar", "", "", "", "", "", "", "", "", "", "", "Continuar", "Llevar a cabo", "", "", "", ""],
    ),
    (
        "Check",
        &["", "", "", "", "", "", "", "", "", "", "", "Registrarse", "", "Verificar/Dejar hotel", "", "Investigar", "", "", "", ""],
    ),
    (
        "Come",
        &["Acercarse", "", "Encontrarse con", "", "Aparecer/Avanzar", "", "", "Regresar", "", "Bajar", "", "", "Entrar", "Toparse con", "Desprenderse", "¡Vamos!", "Salir", "Visitar/Venir", "Subir/Surgir", "Toparse con", ""],
    ),
    (
        "Cut",
        &["", "", "", "", "", "", "", "", "Reducir", "", "", "Interrumpir", "", "Cortar/Aislar", "", "Recortar/Dejar de", "", "", "", ""],
    ),
    (
        "Do",
        &["", "", "", "", "", "", "", "", "Abrochar (cremallera)", "", "", "", "", "", "", "", "", "Maquillar/Preparar", "", ""],
    ),
    (
        "Drop",
        &["", "", "", "", "", "Dejar algo", "", "Visitar", "Dejar (a alguien)", "", "", "", "", "Dejar a alguien", "", "", "", "Abandonar (estudios)", "", ""],
    ),
    (
        "Fill",
        &["", "", "", "", "", "", "", "", "", "", "", "Rellenar (formulario)", "", "", "", "Rellenar (espacio)", "", "Rellenar/Llenar", "", ""],
    ),
    (
        "Find",
        &["", "", "", "", "", "", "", "", "", "", "", "", "", "", "Averiguar/Descubrir", "", "", "", "", ""],
    ),
    (
        "Get",
        &["Andar por ahí/Moverse", "", "", "Llevarse bien", "Moverse/Viajar", "Deshacerse de", "Regresar", "", "Bajar/Deprimir", "", "", "Entrar", "", "Bajar (transporte)", "Subir (transporte)", "Salir", "Recuperarse/Superar", "Levantarse", "", "Llevarse bien"],
    ),
    (
        "Give",
        &["", "", "", "", "", "Regalar", "Devolver", "", "Derrumbarse", "", "", "Ceder", "", "", "", "Repartir", "Repasar", "Rendirse/Abandonar", "", ""],
    ),
    (
        "Go",
        &["Hacer/Emprender", "", "", "", "Circular/Repartir", "Irse", "Volver/Regresar", "", "Bajar", "Ir a buscar", "", "Entrar", "Revisar", "Explotar/Deteriorarse", "Continuar/Suceder", "Salir", "Repasar/Revisar", "Subir/Aumentar", "", ""],
    ),
    (
        "Grow",
        &["", "", "", "", "", "", "", "", "Disminuir", "", "", "", "", "", "", "", "", "Crecer/Madurar", "", ""],
    ),
    (
        "Hang",
        &["Rondar/Merodear", "", "", "", "", "", "Esperar/Devolver", "", "", "", "", "Entregar", "", "Colgar/Cortar (telf.)", "Continuar", "Pasar el rato", "", "", "", ""],
    ),
    (
        "Hold",
        &["", "", "", "", "", "", "Devolver", "", "Retrasar", "", "", "Contener/Caber", "", "", "Esperar", "", "", "Sostener", "", ""],
    ),
    (
        "Keep",
        &["", "", "", "Llevarse bien", "", "Mantener alejado", "Retener/Devolver", "", "Apuntar (datos)", "Buscar", "", "", "", "Alejar", "Continuar", "Ocultar", "Superar", "", "Mantener el ritmo", ""],
    ),
    (
        "Look",
        &["", "", "Cuidar (niños, mascotas)", "", "Buscar", "", "Recordar", "", "Despreciar", "Buscar", "", "Examinar/Investigar", "Examinar/Investigar", "", "Observar/Cuidar", "Tener cuidado", "Pasar por alto", "Buscar (info.)", "Esperar", "Esperar con ansias"],
    ),
    (
        "Make",
        &["", "", "", "", "", "Irse", "", "", "", "", "", "", "", "", "", "Entender", "", "Inventar/Hacer las paces", "", ""],
    ),
    (
        "Pass",
        &["", "", "", "", "", "Repartir", "", "", "", "", "", "", "", "Desmayarse", "", "Desmayarse/Repartir", "", "", "", ""],
    ),
    (
        "Pick",
        &["", "", "", "", "", "", "", "", "", "", "", "", "", "", "", "", "", "Recoger/Mejorar", "", ""],
    ),
    (
        "Point",
        &["", "", "", "", "", "", "", "", "", "", "", "", "", "", "Señalar/Destacar", "", "", "", "", ""],
    ),
    (
        "Put",
        &["", "", "", "", "", "Guardar/Ordenar", "Devolver", "", "Bajar/Apuntar", "", "", "Meter/Insertar", "", "Posponer/Desalentar", "Ponerse (ropa)", "Apagar (fuego)/Publicar", "Superar/Tolerar", "Subir/Alojar", "", ""],
    ),
    (
        "Run",
        &["", "Encontrarse con", "Perseguir", "", "", "Huir", "", "", "Atropellar", "", "", "Entrar", "Estrellarse", "Irse", "", "Agotarse/Acabarse", "Revisar", "", "", ""],
    ),
    (
        "Set",
        &["Emprender", "", "", "", "", "", "", "", "", "", "", "Instalarse", "", "", "Empezar (viaje)", "Exponer/Partir", "Superar/Recuperarse", "Establecer/Montar", "", ""],
    ),
    (
        "Show",
        &["", "", "", "", "", "", "", "", "", "", "", "", "", "Presumir", "", "Aparecer/Llegar", "", "Aparecer/Llegar", "", ""],
    ),
    (
        "Sit",
        &["", "", "", "", "", "", "Apoyar", "", "Sentarse", "", "", "", "", "", "", "", "", "", "", ""],
    ),
    (
        "Stand",
        &["", "", "", "", "", "", "Apoyar/Respaldar", "", "", "", "", "Sustituir", "", "", "", "Destacar/Sobresalir", "", "Levantarse", "Aguantar", "Soportar"],
    ),
    (
        "Take",
        &["", "", "", "", "", "Quitarse/Despegar", "Retirar/Devolver", "", "Apuntar/Anotar", "", "", "Engañar/Absorber", "", "Despegar/Quitarse", "", "Salir", "Tomar el control", "Empezar (hobby)", "", ""],
    ),
    (
        "Turn",
        &["", "", "", "", "", "Rechazar", "Volverse", "", "Bajar (volumen)/Rechazar", "", "", "Entregar", "Convertirse en", "Apagar", "Encender", "Resultar/Irse", "", "Subir (volumen)/Aparecer", "", ""],
    ),];

/// Seed rows normalized to `schema`
#[must_use]
pub fn seed_rows(schema: &PrepositionSchema) -> Vec<VerbRow> {
    INITIAL_VERBS
        .iter()
        .map(|(verb, meanings)| {
            let raw: Vec<String> = meanings.iter().map(|m| (*m).to_string()).collect();
            VerbRow {
                verb: (*verb).to_string(),
                meanings: normalize(&raw, schema),
            }
        })
        .collect()
}

/// Number of built-in verbs
#[must_use]
pub fn seed_len() -> usize {
    INITIAL_VERBS.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_fits_current_schema() {
        let schema = PrepositionSchema::current();
        let rows = seed_rows(&schema);
        assert_eq!(rows.len(), 36);
        assert!(rows.iter().all(|r| r.meanings.len() == schema.len()));
    }

    #[test]
    fn seed_columns_line_up() {
        let schema = PrepositionSchema::current();
        let rows = seed_rows(&schema);
        let look = rows.iter().find(|r| r.verb == "Look").unwrap();
        let after = schema.position("After").unwrap();
        let forward = schema.position("Forward").unwrap();
        assert_eq!(look.meanings[after], "Cuidar (niños, mascotas)");
        assert_eq!(look.meanings[forward], "");
        assert_eq!(look.meanings[schema.position("With").unwrap()], "Esperar con ansias");
    }

    #[test]
    fn seed_verbs_are_unique() {
        let rows = seed_rows(&PrepositionSchema::current());
        let mut keys: Vec<_> = rows.iter().map(VerbRow::key).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), seed_len());
    }
}
