//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält die Konfiguration, die zwischen `app` und `geometry` geteilt wird,
//! um direkte Abhängigkeiten zu vermeiden.

pub mod options;

pub use options::{BallOptions, CurveConfig, ThicknessOptions, WireOptions};
pub use options::{MAX_SEGMENTS, MAX_SIDES, MIN_SIDES};
