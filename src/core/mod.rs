//! Core-Domänentypen: Masten, Pole-Verzeichnis, Verkettung und Spans.

pub mod ordering_chain;
pub mod placement;
/// Registrierte Masten mit ihren Anschlusspunkten
pub mod pole;
pub mod pole_store;
pub mod span;

pub use ordering_chain::OrderingChain;
pub use placement::{AttachmentResolver, PolePlacement, PolePlacements};
pub use pole::{pole_key, AttachmentDirection, Pole};
pub use pole_store::{
    parse_pole_directory, write_pole_directory, PoleDirectory, PoleStore, POLE_FILE_NAME,
};
pub use span::{resolve_spans, span_name, Span};
