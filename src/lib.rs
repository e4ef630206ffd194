//! Wire-Pole-Generator Library.
//! Leitungs-Geometrie zwischen Masten als Library exportiert für Hosts, Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod error;
pub mod export;
pub mod geometry;
pub mod shared;

pub use app::{
    draw_wires, link_selected_poles, on_transform_changed, BuiltWire, DrawReport, Scene,
    WireKey, WireRegistry, WireState,
};
pub use core::{
    AttachmentDirection, AttachmentResolver, OrderingChain, Pole, PolePlacement, PolePlacements,
    PoleStore, Span,
};
pub use error::{WireError, WireResult};
pub use geometry::{CurveKind, Mesh, RingFrame};
pub use shared::{CurveConfig, WireOptions};
