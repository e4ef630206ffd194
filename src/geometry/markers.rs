//! Gleichmäßig verteilte Kugel-Marker entlang eines Spans.
//!
//! Marker folgen immer der Parabel-Näherung, unabhängig von der Kurvenform
//! der Leitung selbst.

use glam::Vec3;

use super::curve_math::parabola_offset;
use super::mesh::Mesh;
use super::polyline::is_degenerate_span;
use super::sphere::build_sphere_mesh;
use crate::error::{WireError, WireResult};

/// Parameter der Kugel-Dekoration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerOptions {
    /// Anzahl der Kugeln pro Span
    pub amount: u32,
    /// Kugel-Radius
    pub radius: f32,
    /// Seitenzahl der Kugel-Meshes
    pub sides: u32,
}

/// Berechnet `amount` Marker-Positionen bei den Anteilen `i/(amount+1)`.
pub fn place_markers(start: Vec3, end: Vec3, droop: f32, amount: u32) -> WireResult<Vec<Vec3>> {
    if amount == 0 {
        return Ok(Vec::new());
    }
    if is_degenerate_span(start, end) {
        return Err(WireError::DegenerateSpan);
    }

    let pole_dist = start.distance(end);
    let half = pole_dist / 2.0;
    let slots = (amount + 1) as f32;

    Ok((1..=amount)
        .map(|i| {
            let t = i as f32 / slots;
            let mut p = start.lerp(end, t);
            p.z += parabola_offset(-half + t * pole_dist, droop, pole_dist);
            p
        })
        .collect())
}

/// Baut je Marker-Position ein Kugel-Mesh.
pub fn build_marker_meshes(
    start: Vec3,
    end: Vec3,
    droop: f32,
    options: &MarkerOptions,
) -> WireResult<Vec<Mesh>> {
    place_markers(start, end, droop, options.amount)?
        .into_iter()
        .map(|center| build_sphere_mesh(center, options.radius, options.sides))
        .collect()
}
