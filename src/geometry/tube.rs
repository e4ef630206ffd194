//! Rohr-Mesh (verallgemeinerter Zylinder) entlang einer Polyline.
//!
//! Pro Polyline-Punkt entsteht ein Ring aus `sides` Vertices. Benachbarte
//! Ringe werden durch Quads verbunden, Anfang und Ende durch je ein n-Gon
//! geschlossen. Vertex-Anzahl = `sides × rings`,
//! Flächen-Anzahl = `sides × (rings - 1) + 2`.

use std::f32::consts::TAU;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::mesh::Mesh;
use crate::error::{WireError, WireResult};
use crate::shared::options::{MAX_SIDES, MIN_SIDES};

/// Orientierung der Ringe entlang der Polyline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RingFrame {
    /// Jeder Ring richtet sich nur nach dem eingehenden Segment aus
    /// (kompatibel, kann bei starken Knicken verdrehen)
    #[default]
    SegmentAligned,
    /// Rotationsminimierender Rahmen (Double Reflection), ohne Verdrillung
    RotationMinimizing,
}

/// Parameter des Rohr-Meshes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TubeOptions {
    /// Rohr-Radius
    pub radius: f32,
    /// Anzahl der Vertices pro Ring
    pub sides: u32,
    /// Glatte Schattierung
    pub smooth: bool,
    /// Ring-Orientierung
    pub ring_frame: RingFrame,
}

impl TubeOptions {
    /// Prüft Radius und Seitenzahl.
    pub fn validate(&self) -> WireResult<()> {
        if !(MIN_SIDES..=MAX_SIDES).contains(&self.sides) {
            return Err(WireError::configuration(format!(
                "Rohr-Seitenzahl {} außerhalb von {MIN_SIDES}..={MAX_SIDES}",
                self.sides
            )));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(WireError::configuration(format!(
                "Rohr-Radius muss positiv sein (ist {})",
                self.radius
            )));
        }
        Ok(())
    }
}

/// Baut das geschlossene Rohr-Mesh.
pub fn build_tube_mesh(polyline: &[Vec3], options: &TubeOptions) -> WireResult<Mesh> {
    options.validate()?;
    if polyline.len() < 2 {
        return Err(WireError::configuration(
            "Rohr benötigt mindestens zwei Polyline-Punkte",
        ));
    }

    let directions = ring_directions(polyline)?;
    let bases: Vec<Vec3> = match options.ring_frame {
        RingFrame::SegmentAligned => directions
            .iter()
            .map(|&d| horizontal_perpendicular(d))
            .collect(),
        RingFrame::RotationMinimizing => rotation_minimizing_bases(polyline, &directions),
    };

    let sides = options.sides as usize;
    let rings = polyline.len();
    let step = TAU / sides as f32;

    let mut vertices = Vec::with_capacity(sides * rings);
    for ((&point, &direction), &base) in polyline.iter().zip(&directions).zip(&bases) {
        let radial = base * options.radius;
        for k in 0..sides {
            let rotation = Quat::from_axis_angle(direction, k as f32 * step);
            vertices.push(point + rotation * radial);
        }
    }

    let index = |ring: usize, k: usize| (ring * sides + k % sides) as u32;
    let mut faces = Vec::with_capacity(sides * (rings - 1) + 2);
    for ring in 0..rings - 1 {
        for k in 0..sides {
            faces.push(vec![
                index(ring, k),
                index(ring, k + 1),
                index(ring + 1, k + 1),
                index(ring + 1, k),
            ]);
        }
    }

    // Start-Deckel umgekehrt gewickelt, damit beide Deckel nach außen zeigen
    faces.push((0..sides).rev().map(|k| index(0, k)).collect());
    faces.push((0..sides).map(|k| index(rings - 1, k)).collect());

    Ok(Mesh {
        vertices,
        edges: Vec::new(),
        faces,
        smooth: options.smooth,
    })
}

/// Richtung je Ring: Ring 0 folgt Segment 0, Ring i folgt Segment i-1.
///
/// Segmente der Länge 0 übernehmen die Richtung des Vorgängers (bzw. des
/// ersten gültigen Nachfolgers am Anfang).
fn ring_directions(polyline: &[Vec3]) -> WireResult<Vec<Vec3>> {
    let segment_dirs: Vec<Option<Vec3>> = polyline
        .windows(2)
        .map(|w| (w[1] - w[0]).try_normalize())
        .collect();

    let first = segment_dirs
        .iter()
        .flatten()
        .next()
        .copied()
        .ok_or(WireError::DegenerateSpan)?;

    let mut directions = Vec::with_capacity(polyline.len());
    directions.push(segment_dirs[0].unwrap_or(first));
    let mut previous = directions[0];
    for dir in &segment_dirs {
        let current = dir.unwrap_or(previous);
        directions.push(current);
        previous = current;
    }
    Ok(directions)
}

/// Senkrechte zur Richtung, durch 90°-Drehung in der horizontalen Ebene.
/// Senkrechte Segmente fallen auf die X-Achse zurück.
fn horizontal_perpendicular(direction: Vec3) -> Vec3 {
    Vec3::new(-direction.y, direction.x, 0.0)
        .try_normalize()
        .unwrap_or(Vec3::X)
}

/// Double-Reflection-Verfahren (Wang et al. 2008) über alle Ringe.
fn rotation_minimizing_bases(polyline: &[Vec3], directions: &[Vec3]) -> Vec<Vec3> {
    let mut bases = Vec::with_capacity(directions.len());
    let mut base = horizontal_perpendicular(directions[0]);
    bases.push(base);

    for i in 1..directions.len() {
        let v1 = polyline[i] - polyline[i - 1];
        let c1 = v1.length_squared();
        let (reflected_base, reflected_tangent) = if c1 > f32::EPSILON {
            (
                base - (2.0 / c1) * v1.dot(base) * v1,
                directions[i - 1] - (2.0 / c1) * v1.dot(directions[i - 1]) * v1,
            )
        } else {
            (base, directions[i - 1])
        };

        let v2 = directions[i] - reflected_tangent;
        let c2 = v2.length_squared();
        let next = if c2 > f32::EPSILON {
            reflected_base - (2.0 / c2) * v2.dot(reflected_base) * v2
        } else {
            reflected_base
        };

        // Rundungsfehler: wieder senkrecht zur Ring-Richtung machen
        let t = directions[i];
        base = (next - t * t.dot(next))
            .try_normalize()
            .unwrap_or_else(|| horizontal_perpendicular(t));
        bases.push(base);
    }
    bases
}
