//! Auflösung der Spans zwischen einem Mast und seinem Upstream-Partner.

use glam::Vec3;

use super::placement::AttachmentResolver;
use super::pole::{pole_key, AttachmentDirection};
use super::pole_store::PoleStore;
use crate::error::{WireError, WireResult};

/// Eine gerichtete Leitung zwischen zwei Anschlusspunkten (Weltkoordinaten).
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    /// Instanzname des speisenden Masts (Output-Seite)
    pub start_pole: String,
    /// Instanzname des gespeisten Masts (Input-Seite)
    pub end_pole: String,
    /// Index des Leiters in beiden Anschlusslisten
    pub attachment_index: usize,
    /// Weltposition am Start-Mast
    pub start: Vec3,
    /// Weltposition am End-Mast
    pub end: Vec3,
}

impl Span {
    /// Deterministischer Namensvorschlag für die erzeugten Objekte.
    pub fn name(&self) -> String {
        span_name(&self.start_pole, &self.end_pole)
    }
}

/// Namensvorschlag `"{start}-{end}"`.
pub fn span_name(start_pole: &str, end_pole: &str) -> String {
    format!("{start_pole}-{end_pole}")
}

/// Löst alle Spans von `start_instance` (Output) nach `end_instance` (Input) auf.
///
/// Beide Anschlusslisten müssen nicht leer und gleich lang sein, sonst wird
/// ein Konfigurationsfehler gemeldet, bevor irgendein Punkt transformiert wird.
pub fn resolve_spans(
    store: &PoleStore,
    resolver: &impl AttachmentResolver,
    start_instance: &str,
    end_instance: &str,
) -> WireResult<Vec<Span>> {
    let outputs = store.get_mushroom(start_instance, AttachmentDirection::Output)?;
    let inputs = store.get_mushroom(end_instance, AttachmentDirection::Input)?;

    if outputs.is_empty() {
        return Err(WireError::configuration(format!(
            "Mast '{}' hat keine Output-Anschlüsse",
            pole_key(start_instance)
        )));
    }
    if inputs.is_empty() {
        return Err(WireError::configuration(format!(
            "Mast '{}' hat keine Input-Anschlüsse",
            pole_key(end_instance)
        )));
    }
    if outputs.len() != inputs.len() {
        return Err(WireError::configuration(format!(
            "unequal mushroom count: '{}' hat {} Outputs, '{}' hat {} Inputs",
            start_instance,
            outputs.len(),
            end_instance,
            inputs.len()
        )));
    }

    let to_world = |instance: &str, local: Vec3| {
        resolver
            .to_world(instance, local)
            .ok_or_else(|| WireError::NotFound(instance.to_string()))
    };

    outputs
        .iter()
        .zip(inputs)
        .enumerate()
        .map(|(attachment_index, (&out_local, &in_local))| {
            Ok(Span {
                start_pole: start_instance.to_string(),
                end_pole: end_instance.to_string(),
                attachment_index,
                start: to_world(start_instance, out_local)?,
                end: to_world(end_instance, in_local)?,
            })
        })
        .collect()
}
