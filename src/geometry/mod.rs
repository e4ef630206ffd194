//! Leitungs-Geometrie: Höhenfunktionen, Polylines, Rohr-, Kugel- und Marker-Meshes.
//!
//! Alles hier ist reine Berechnung ohne Host- oder Dateisystem-Zugriff.

pub mod curve_math;
pub mod markers;
pub mod mesh;
pub mod polyline;
pub mod sphere;
pub mod tube;

pub use curve_math::{parabola_offset, solve_catenary_parameter, CurveKind, SagCurve};
pub use markers::{build_marker_meshes, place_markers, MarkerOptions};
pub use mesh::Mesh;
pub use polyline::{build_polyline, eight_part_points, is_degenerate_span};
pub use sphere::build_sphere_mesh;
pub use tube::{build_tube_mesh, RingFrame, TubeOptions};
