//! Use-Case-Funktionen der Application-Layer-Orchestrierung.
//!
//! Aufgeteilt nach Operation:
//! - `draw_wires`: Leitungen zwischen verketteten Masten bauen und registrieren
//! - `pole_editing`: Masten anlegen und entfernen
//! - `chain`: Verketten, bewegte Masten, Neuzeichnen

pub mod chain;
pub mod draw_wires;
pub mod pole_editing;

pub use chain::{link_selected_poles, on_transform_changed, redraw_stale_wires};
pub use draw_wires::{
    build_span_geometry, commit_built_wires, commit_draw_report, draw_span_pair, draw_wires,
    BuiltWire, DrawReport, PairDrawing, SkippedPair,
};
pub use pole_editing::{create_pole_from_selection, delete_pole, delete_wires_for_pole};
