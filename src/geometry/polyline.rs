//! Abtastung einer Leitungskurve zu einer Punktliste zwischen zwei Mastpunkten.

use glam::Vec3;

use super::curve_math::{CurveKind, SagCurve};
use crate::error::{WireError, WireResult};

/// Abstand, unterhalb dessen Start und Ende als identisch gelten.
pub const DEGENERATE_SPAN_EPSILON: f32 = 1e-6;

/// Prüft, ob zwei Weltpunkte einen brauchbaren Span bilden.
pub fn is_degenerate_span(start: Vec3, end: Vec3) -> bool {
    start.distance_squared(end) <= DEGENERATE_SPAN_EPSILON * DEGENERATE_SPAN_EPSILON
}

/// Berechnet die Polyline eines Spans.
///
/// Erster und letzter Punkt sind immer exakt `start` bzw. `end`.
/// Bei `droop = 0` oder `segments <= 1` entstehen genau 2 Punkte, bei
/// `EightPart` genau 9, sonst `segments + 1` (auch für `Straight`, dann
/// gleichmäßig auf der Sehne).
pub fn build_polyline(
    start: Vec3,
    end: Vec3,
    kind: CurveKind,
    droop: f32,
    segments: u32,
) -> WireResult<Vec<Vec3>> {
    if is_degenerate_span(start, end) {
        return Err(WireError::DegenerateSpan);
    }

    if kind.collapses_to_chord(droop, segments) {
        return Ok(vec![start, end]);
    }

    match kind {
        CurveKind::EightPart => Ok(eight_part_points(start, end, droop).to_vec()),
        continuous => {
            let pole_dist = start.distance(end);
            let curve = SagCurve::new(continuous, droop, pole_dist)?;
            Ok(sample_sag_curve(start, end, &curve, segments))
        }
    }
}

/// Tastet eine Höhenfunktion an `segments - 1` inneren Stellen ab.
///
/// x/y und die Sehnenhöhe werden linear interpoliert, der Versatz der Kurve
/// wird auf z addiert.
pub fn sample_sag_curve(start: Vec3, end: Vec3, curve: &SagCurve, segments: u32) -> Vec<Vec3> {
    let segments = segments.max(1);
    let pole_dist = start.distance(end);
    let step = pole_dist / segments as f32;
    let half = pole_dist / 2.0;

    let mut points = Vec::with_capacity(segments as usize + 1);
    points.push(start);
    for i in 1..segments {
        let t = i as f32 / segments as f32;
        let x = -half + i as f32 * step;
        let mut p = start.lerp(end, t);
        p.z += curve.offset(x);
        points.push(p);
    }
    // Endpunkt immer exakt übernehmen
    points.push(end);
    points
}

/// Legacy-Näherung: 9 Punkte durch fortgesetzte Halbierung.
///
/// Von den Achtelpunkten außen bis zur Mitte werden 1/2, 3/4, 7/8 und der
/// volle Durchhang von z abgezogen.
pub fn eight_part_points(start: Vec3, end: Vec3, droop: f32) -> [Vec3; 9] {
    let mid = (start + end) * 0.5;
    let quarter_1 = (start + mid) * 0.5;
    let quarter_2 = (end + mid) * 0.5;
    let eighth_1 = (start + quarter_1) * 0.5;
    let eighth_2 = (mid + quarter_1) * 0.5;
    let eighth_3 = (mid + quarter_2) * 0.5;
    let eighth_4 = (end + quarter_2) * 0.5;

    let sag = |p: Vec3, fraction: f32| p - Vec3::Z * (droop * fraction);

    [
        start,
        sag(eighth_1, 0.5),
        sag(quarter_1, 0.75),
        sag(eighth_2, 0.875),
        sag(mid, 1.0),
        sag(eighth_3, 0.875),
        sag(quarter_2, 0.75),
        sag(eighth_4, 0.5),
        end,
    ]
}

/// Länge einer Polyline.
pub fn polyline_length(points: &[Vec3]) -> f32 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}
