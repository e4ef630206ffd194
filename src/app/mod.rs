//! Application-Layer: Leitungs-Registry und Use-Cases.

pub mod scene;
pub mod use_cases;
pub mod wire_registry;

pub use scene::Scene;
pub use use_cases::{
    commit_built_wires, commit_draw_report, create_pole_from_selection, delete_pole, delete_wires_for_pole,
    draw_span_pair, draw_wires, link_selected_poles, on_transform_changed, redraw_stale_wires,
    BuiltWire, DrawReport, PairDrawing, SkippedPair,
};
pub use wire_registry::{MeshHandle, WireKey, WireRecord, WireRegistry, WireState};
