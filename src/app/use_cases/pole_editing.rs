//! Use-Cases für das Registrieren und Entfernen von Masten.

use glam::Vec3;

use crate::app::wire_registry::{MeshHandle, WireRegistry};
use crate::core::{pole_key, AttachmentDirection, OrderingChain, PoleStore};
use crate::error::WireResult;

/// Speichert die ausgewählten Vertices einer Mast-Instanz als Anschlusspunkte.
///
/// Die Punkte sind lokale Koordinaten des Mast-Objekts. Gespeichert wird
/// unter dem Verzeichnis-Schlüssel der Instanz, alle gleichnamigen Kopien
/// ("pole_a.001", ...) teilen sich damit den Eintrag.
pub fn create_pole_from_selection(
    store: &mut PoleStore,
    instance: &str,
    direction: AttachmentDirection,
    selected_vertices: &[Vec3],
) -> WireResult<()> {
    store.create_pole(instance, direction, selected_vertices.to_vec())
}

/// Entfernt einen Mast aus dem Verzeichnis.
///
/// Alle registrierten Leitungen an Instanzen dieses Masts werden mit
/// entfernt; deren Handles gehen an den Host zurück. Ein unbekannter Name
/// ist kein Fehler.
pub fn delete_pole(
    store: &mut PoleStore,
    registry: &mut WireRegistry,
    name: &str,
) -> WireResult<Vec<MeshHandle>> {
    let key = pole_key(name).to_string();
    if !store.delete_pole(&key)? {
        log::info!("Mast '{}' war nicht registriert", key);
        return Ok(Vec::new());
    }

    let instances: Vec<String> = registry
        .iter()
        .flat_map(|r| [r.key.start_pole.as_str(), r.key.end_pole.as_str()])
        .filter(|instance| pole_key(instance) == key)
        .map(str::to_string)
        .collect();

    let mut handles = Vec::new();
    for instance in &instances {
        handles.extend(registry.remove_for_pole(instance));
    }
    Ok(handles)
}

/// Räumt auf, nachdem der Host eine Mast-Instanz gelöscht hat.
///
/// Die Instanz verschwindet aus der Kette, ihre Leitungen aus der Registry.
pub fn delete_wires_for_pole(
    chain: &mut OrderingChain,
    registry: &mut WireRegistry,
    instance: &str,
) -> Vec<MeshHandle> {
    chain.unlink_pole(instance);
    let handles = registry.remove_for_pole(instance);
    log::info!(
        "Mast-Instanz '{}' entfernt, {} Objekte freigegeben",
        instance,
        handles.len()
    );
    handles
}
