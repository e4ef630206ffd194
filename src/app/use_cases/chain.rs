//! Use-Cases rund um die Mast-Kette: Verketten, Bewegen, Neuzeichnen.

use indexmap::IndexSet;

use super::draw_wires::{draw_wires, DrawReport};
use crate::app::wire_registry::{WireKey, WireRegistry};
use crate::core::{AttachmentResolver, OrderingChain, PoleStore};
use crate::error::WireResult;
use crate::shared::CurveConfig;

/// Verkettet die geordnete Auswahl und markiert betroffene Leitungen als veraltet.
pub fn link_selected_poles<S: AsRef<str>>(
    chain: &mut OrderingChain,
    registry: &mut WireRegistry,
    selection: &[S],
) -> WireResult<usize> {
    let links = chain.link_selection(selection)?;
    let stale: usize = selection
        .iter()
        .map(|pole| registry.mark_stale_for_pole(pole.as_ref()))
        .sum();
    log::info!("{} Masten verkettet, {} Leitungen veraltet", selection.len(), stale);
    Ok(links)
}

/// Reagiert auf bewegte Mast-Instanzen.
///
/// Nur bei aktivem `auto_update` werden die Leitungen als veraltet markiert.
/// Gibt die Schlüssel aller aktuell veralteten Leitungen zurück.
pub fn on_transform_changed<S: AsRef<str>>(
    registry: &mut WireRegistry,
    auto_update: bool,
    moved: &[S],
) -> Vec<WireKey> {
    if !auto_update {
        return Vec::new();
    }
    for pole in moved {
        registry.mark_stale_for_pole(pole.as_ref());
    }
    registry.stale_keys()
}

/// Zeichnet alle veralteten Leitungen neu.
///
/// Neu gezeichnet wird pro gespeistem Mast, also immer das ganze Mastpaar.
/// Ohne veraltete Leitungen entsteht ein leerer Bericht. Der Bericht gehört
/// an [`commit_draw_report`](super::draw_wires::commit_draw_report), damit
/// nicht neu gebaute Leiter der erledigten Masten verschwinden.
pub fn redraw_stale_wires(
    store: &PoleStore,
    chain: &OrderingChain,
    resolver: &impl AttachmentResolver,
    config: &CurveConfig,
    registry: &WireRegistry,
) -> WireResult<DrawReport> {
    let poles: IndexSet<String> = registry
        .stale_keys()
        .into_iter()
        .map(|key| key.end_pole)
        .collect();
    if poles.is_empty() {
        return Ok(DrawReport::default());
    }
    let selection: Vec<String> = poles.into_iter().collect();
    draw_wires(store, chain, resolver, config, &selection)
}
