//! Reine Höhenfunktionen für durchhängende Leitungen.
//!
//! `x` ist der vorzeichenbehaftete Abstand zur Spannfeld-Mitte entlang der
//! Laufrichtung, also `x ∈ [-pole_dist/2, +pole_dist/2]`. Jede Kurve liefert
//! einen vertikalen Versatz mit `offset(±pole_dist/2) = 0` und
//! `offset(0) = -droop`.

use serde::{Deserialize, Serialize};

use crate::error::{WireError, WireResult};

/// Maximale Abweichung der gelösten Kettenlinie von der Soll-Höhe am Mastpunkt.
pub const CATENARY_HEIGHT_TOLERANCE: f64 = 1e-6;

/// Iterations-Obergrenze für Klammerung und Bisektion des Kettenlinien-Parameters.
pub const CATENARY_MAX_ITERATIONS: usize = 200;

/// Kurvenform einer Leitung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveKind {
    /// Gerade Linie ohne Durchhang
    Straight,
    /// Quadratische Näherung (geschlossene Form)
    #[default]
    Parabola,
    /// Echte Kettenlinie `a·cosh(x/a) - a`
    Catenary,
    /// Legacy: feste 9-Punkt-Näherung durch Halbierung
    EightPart,
}

impl CurveKind {
    /// Prüft, ob die Polyline nur aus Start- und Endpunkt besteht.
    ///
    /// Ohne Durchhang ist das immer der Fall. `EightPart` ignoriert die
    /// Segmentzahl, alle anderen Formen fallen bei `segments <= 1` auf die
    /// Sehne zurück.
    pub fn collapses_to_chord(self, droop: f32, segments: u32) -> bool {
        droop <= 0.0 || (self != CurveKind::EightPart && segments <= 1)
    }
}

/// Parabel-Koeffizient `a` mit `a·(pole_dist/2)² = droop`.
pub fn parabola_coefficient(droop: f32, pole_dist: f32) -> f32 {
    droop / (pole_dist * pole_dist / 4.0)
}

/// Parabel-Versatz an Position `x`.
pub fn parabola_offset(x: f32, droop: f32, pole_dist: f32) -> f32 {
    if droop <= 0.0 {
        return 0.0;
    }
    parabola_coefficient(droop, pole_dist) * x * x - droop
}

/// `a·cosh(u/a) - a`, numerisch stabil als `2a·sinh²(u/2a)`.
fn catenary_rise(a: f64, u: f64) -> f64 {
    let s = (u / (2.0 * a)).sinh();
    2.0 * a * s * s
}

/// Löst den Kettenlinien-Parameter `a`, sodass die Kurve vom Tiefpunkt in der
/// Mitte bis zum Mast genau um `droop` ansteigt.
///
/// Der Parabel-Startwert `pole_dist²/(8·droop)` liegt immer unterhalb der
/// Lösung. Von dort wird eine obere Schranke durch Verdoppeln gesucht und
/// anschließend bisektiert. Beide Phasen sind durch
/// [`CATENARY_MAX_ITERATIONS`] begrenzt.
pub fn solve_catenary_parameter(droop: f64, pole_dist: f64) -> WireResult<f64> {
    solve_catenary_parameter_capped(droop, pole_dist, CATENARY_MAX_ITERATIONS)
}

fn solve_catenary_parameter_capped(
    droop: f64,
    pole_dist: f64,
    max_iterations: usize,
) -> WireResult<f64> {
    if !droop.is_finite() || !pole_dist.is_finite() || droop <= 0.0 || pole_dist <= 0.0 {
        return Err(WireError::Numerical(format!(
            "Kettenlinie nicht lösbar für droop={droop}, pole_dist={pole_dist}"
        )));
    }

    let half = pole_dist / 2.0;
    let residual = |a: f64| catenary_rise(a, half) - droop;

    let mut lo = pole_dist * pole_dist / (8.0 * droop);
    let mut hi = lo;
    let mut bracketed = false;
    for _ in 0..max_iterations {
        hi *= 2.0;
        if residual(hi) < 0.0 {
            bracketed = true;
            break;
        }
        lo = hi;
    }
    if !bracketed {
        return Err(WireError::Numerical(format!(
            "Kettenlinien-Parameter nicht eingrenzbar (droop={droop}, pole_dist={pole_dist})"
        )));
    }

    for _ in 0..max_iterations {
        let mid = 0.5 * (lo + hi);
        let r = residual(mid);
        if r.abs() <= CATENARY_HEIGHT_TOLERANCE || (hi - lo) <= f64::EPSILON * hi {
            return Ok(mid);
        }
        if r > 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    Err(WireError::Numerical(format!(
        "Kettenlinien-Parameter konvergiert nicht nach {max_iterations} Iterationen"
    )))
}

/// Vorbereitete Höhenfunktion eines Spannfelds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SagCurve {
    /// Kein Versatz
    Straight,
    /// `a·x² - droop`
    Parabola {
        /// Koeffizient
        a: f32,
        /// Durchhang in der Mitte
        droop: f32,
    },
    /// `a·cosh(x/a) - a - droop`
    Catenary {
        /// Kettenlinien-Parameter
        a: f64,
        /// Durchhang in der Mitte
        droop: f64,
    },
}

impl SagCurve {
    /// Erstellt die Höhenfunktion für eine kontinuierliche Kurvenform.
    ///
    /// `EightPart` ist keine stetige Funktion und wird vom Polyline-Builder
    /// separat behandelt; hier ergibt sie einen Konfigurationsfehler.
    pub fn new(kind: CurveKind, droop: f32, pole_dist: f32) -> WireResult<Self> {
        if droop <= 0.0 {
            return Ok(SagCurve::Straight);
        }
        match kind {
            CurveKind::Straight => Ok(SagCurve::Straight),
            CurveKind::Parabola => Ok(SagCurve::Parabola {
                a: parabola_coefficient(droop, pole_dist),
                droop,
            }),
            CurveKind::Catenary => {
                let a = solve_catenary_parameter(droop as f64, pole_dist as f64)?;
                Ok(SagCurve::Catenary {
                    a,
                    droop: droop as f64,
                })
            }
            CurveKind::EightPart => Err(WireError::configuration(
                "EightPart besitzt keine stetige Höhenfunktion",
            )),
        }
    }

    /// Vertikaler Versatz an Position `x` (relativ zur Spannfeld-Mitte).
    pub fn offset(&self, x: f32) -> f32 {
        match *self {
            SagCurve::Straight => 0.0,
            SagCurve::Parabola { a, droop } => a * x * x - droop,
            SagCurve::Catenary { a, droop } => (catenary_rise(a, x as f64) - droop) as f32,
        }
    }
}
