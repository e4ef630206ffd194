//! UV-Kugel als gewöhnliches Mesh (Leitungs-Marker, Kugel-Dekoration).
//!
//! Aufbau von unten nach oben: Pol-Vertex, `sides` Breitenringe mit je `sides`
//! Vertices, Pol-Vertex. Unten und oben schließen Dreiecksfächer ab,
//! dazwischen liegen `sides - 1` Quad-Bänder.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec3;

use super::mesh::Mesh;
use crate::error::{WireError, WireResult};
use crate::shared::options::{MAX_SIDES, MIN_SIDES};

/// Baut eine geschlossene Kugel um `center`. Alle Flächen sind glatt.
pub fn build_sphere_mesh(center: Vec3, radius: f32, sides: u32) -> WireResult<Mesh> {
    if !(MIN_SIDES..=MAX_SIDES).contains(&sides) {
        return Err(WireError::configuration(format!(
            "Kugel-Seitenzahl {sides} außerhalb von {MIN_SIDES}..={MAX_SIDES}"
        )));
    }
    if !radius.is_finite() || radius <= 0.0 {
        return Err(WireError::configuration(format!(
            "Kugel-Radius muss positiv sein (ist {radius})"
        )));
    }

    let n = sides as usize;
    let mut vertices = Vec::with_capacity(n * n + 2);
    vertices.push(center - Vec3::Z * radius);
    for ring in 0..n {
        let latitude = -FRAC_PI_2 + (ring + 1) as f32 * PI / (n + 1) as f32;
        let (sin_lat, cos_lat) = latitude.sin_cos();
        for k in 0..n {
            let (sin_lon, cos_lon) = (k as f32 * TAU / n as f32).sin_cos();
            vertices.push(center + Vec3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat) * radius);
        }
    }
    vertices.push(center + Vec3::Z * radius);

    let bottom = 0u32;
    let top = (n * n + 1) as u32;
    let ring_vertex = |ring: usize, k: usize| (1 + ring * n + k % n) as u32;

    let mut faces = Vec::with_capacity(n * (n + 1));
    for k in 0..n {
        faces.push(vec![bottom, ring_vertex(0, k + 1), ring_vertex(0, k)]);
    }
    for ring in 0..n - 1 {
        for k in 0..n {
            faces.push(vec![
                ring_vertex(ring, k),
                ring_vertex(ring, k + 1),
                ring_vertex(ring + 1, k + 1),
                ring_vertex(ring + 1, k),
            ]);
        }
    }
    for k in 0..n {
        faces.push(vec![top, ring_vertex(n - 1, k), ring_vertex(n - 1, k + 1)]);
    }

    Ok(Mesh {
        vertices,
        edges: Vec::new(),
        faces,
        smooth: true,
    })
}
