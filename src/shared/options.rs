//! Zentrale Konfiguration der Leitungs-Generierung.
//!
//! `WireOptions` enthält alle zur Laufzeit änderbaren Werte und wird als TOML
//! gespeichert. Vor jedem Zeichnen wird daraus eine validierte, unveränderliche
//! `CurveConfig` abgeleitet.

use serde::{Deserialize, Serialize};

use crate::error::{WireError, WireResult};
use crate::geometry::{CurveKind, MarkerOptions, RingFrame, TubeOptions};

// ── Grenzen ─────────────────────────────────────────────────────────

/// Maximale Segmentzahl einer Leitung.
pub const MAX_SEGMENTS: u32 = 8192;
/// Minimale Seitenzahl für Rohr- und Kugel-Meshes.
pub const MIN_SIDES: u32 = 3;
/// Maximale Seitenzahl für Rohr- und Kugel-Meshes.
pub const MAX_SIDES: u32 = 8192;

// ── Standardwerte ───────────────────────────────────────────────────

/// Durchhang in der Spannfeld-Mitte (1 m passt gut zu 30 m Mastabstand).
pub const DEFAULT_DROOP: f32 = 1.0;
/// Anzahl der Segmente einer Leitung.
pub const DEFAULT_SEGMENTS: u32 = 16;
/// Rohr-Radius.
pub const DEFAULT_THICKNESS_RADIUS: f32 = 0.02;
/// Seitenzahl von Rohr und Kugeln.
pub const DEFAULT_SIDES: u32 = 8;
/// Anzahl der Kugeln pro Span.
pub const DEFAULT_BALL_AMOUNT: u32 = 3;
/// Kugel-Radius.
pub const DEFAULT_BALL_RADIUS: f32 = 0.2;

/// Name der Optionen-Datei neben der Binary.
pub const OPTIONS_FILE_NAME: &str = "wire_pole.toml";

/// Einstellungen für die Leitungsdicke (Rohr statt Linie).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThicknessOptions {
    /// Rohr statt Linien-Mesh erzeugen
    pub enabled: bool,
    /// Rohr-Radius
    pub radius: f32,
    /// Vertices pro Ring
    pub sides: u32,
    /// Glatte Schattierung
    pub smooth: bool,
    /// Ring-Orientierung entlang der Kurve
    #[serde(default)]
    pub ring_frame: RingFrame,
}

impl Default for ThicknessOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            radius: DEFAULT_THICKNESS_RADIUS,
            sides: DEFAULT_SIDES,
            smooth: true,
            ring_frame: RingFrame::default(),
        }
    }
}

/// Einstellungen für die Kugel-Dekoration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BallOptions {
    /// Kugeln erzeugen
    pub enabled: bool,
    /// Kugeln pro Span
    pub amount: u32,
    /// Kugel-Radius
    pub radius: f32,
    /// Seitenzahl der Kugeln
    pub sides: u32,
}

impl Default for BallOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            amount: DEFAULT_BALL_AMOUNT,
            radius: DEFAULT_BALL_RADIUS,
            sides: DEFAULT_SIDES,
        }
    }
}

/// Alle zur Laufzeit änderbaren Optionen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WireOptions {
    /// Kurvenform
    #[serde(default)]
    pub curve_kind: CurveKind,
    /// Durchhang in der Mitte (0 = gerade Leitung)
    pub droop: f32,
    /// Segmente pro Leitung (0/1 = gerade Leitung, ignoriert bei EightPart)
    pub segments: u32,
    /// Leitungsdicke
    #[serde(default)]
    pub thickness: ThicknessOptions,
    /// Kugel-Dekoration
    #[serde(default)]
    pub balls: BallOptions,
    /// Leitungen bei Transform-Änderungen automatisch als veraltet markieren
    #[serde(default = "default_auto_update")]
    pub auto_update: bool,
}

impl Default for WireOptions {
    fn default() -> Self {
        Self {
            curve_kind: CurveKind::default(),
            droop: DEFAULT_DROOP,
            segments: DEFAULT_SEGMENTS,
            thickness: ThicknessOptions::default(),
            balls: BallOptions::default(),
            auto_update: default_auto_update(),
        }
    }
}

/// Serde-Default für `auto_update` (Abwärtskompatibilität).
fn default_auto_update() -> bool {
    true
}

impl WireOptions {
    /// Lädt die Leitungs-Optionen aus einer TOML-Datei.
    ///
    /// Fehlt die Datei oder ist sie unlesbar bzw. fehlerhaft, gelten die
    /// Standardwerte. Der Grund landet im Log.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!(
                    "Keine Leitungs-Optionen unter {}, Standardwerte aktiv",
                    path.display()
                );
                return Self::default();
            }
            Err(e) => {
                log::warn!(
                    "Leitungs-Optionen {} nicht lesbar ({}), Standardwerte aktiv",
                    path.display(),
                    e
                );
                return Self::default();
            }
        };
        toml::from_str(&content)
            .inspect(|_| log::info!("Leitungs-Optionen gelesen: {}", path.display()))
            .unwrap_or_else(|e| {
                log::warn!(
                    "Leitungs-Optionen {} ungültig, Standardwerte aktiv: {}",
                    path.display(),
                    e
                );
                Self::default()
            })
    }

    /// Schreibt die Leitungs-Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        use anyhow::Context;

        let content =
            toml::to_string_pretty(self).context("Leitungs-Optionen nicht serialisierbar")?;
        std::fs::write(path, content)
            .with_context(|| format!("{} nicht beschreibbar", path.display()))?;
        log::info!("Leitungs-Optionen geschrieben: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("wire_pole"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join(OPTIONS_FILE_NAME)
    }

    /// Validiert die Optionen und leitet die unveränderliche `CurveConfig` ab.
    pub fn curve_config(&self) -> WireResult<CurveConfig> {
        let config = CurveConfig {
            kind: self.curve_kind,
            droop: self.droop,
            segments: self.segments,
            thickness: self.thickness.enabled.then_some(TubeOptions {
                radius: self.thickness.radius,
                sides: self.thickness.sides,
                smooth: self.thickness.smooth,
                ring_frame: self.thickness.ring_frame,
            }),
            balls: self.balls.enabled.then_some(MarkerOptions {
                amount: self.balls.amount,
                radius: self.balls.radius,
                sides: self.balls.sides,
            }),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Unveränderliche Kurven-Konfiguration für einen Zeichenvorgang.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveConfig {
    /// Gewünschte Kurvenform (`Straight` wird bei droop=0 / segments<=1 erzwungen)
    pub kind: CurveKind,
    /// Durchhang
    pub droop: f32,
    /// Segmentzahl
    pub segments: u32,
    /// Rohr-Parameter, `None` = Linien-Mesh
    pub thickness: Option<TubeOptions>,
    /// Kugel-Parameter, `None` = keine Kugeln
    pub balls: Option<MarkerOptions>,
}

impl CurveConfig {
    /// Einfache Linien-Konfiguration ohne Dicke und Kugeln.
    pub fn line(kind: CurveKind, droop: f32, segments: u32) -> Self {
        Self {
            kind,
            droop,
            segments,
            thickness: None,
            balls: None,
        }
    }

    /// Prüft alle Werte gegen die erlaubten Bereiche.
    pub fn validate(&self) -> WireResult<()> {
        if !self.droop.is_finite() || self.droop < 0.0 {
            return Err(WireError::configuration(format!(
                "Durchhang muss endlich und >= 0 sein (ist {})",
                self.droop
            )));
        }
        if self.segments > MAX_SEGMENTS {
            return Err(WireError::configuration(format!(
                "Segmentzahl {} größer als {MAX_SEGMENTS}",
                self.segments
            )));
        }
        if let Some(tube) = &self.thickness {
            tube.validate()?;
        }
        if let Some(balls) = &self.balls {
            if !(MIN_SIDES..=MAX_SIDES).contains(&balls.sides) {
                return Err(WireError::configuration(format!(
                    "Kugel-Seitenzahl {} außerhalb von {MIN_SIDES}..={MAX_SIDES}",
                    balls.sides
                )));
            }
            if !balls.radius.is_finite() || balls.radius <= 0.0 {
                return Err(WireError::configuration(format!(
                    "Kugel-Radius muss positiv sein (ist {})",
                    balls.radius
                )));
            }
        }
        Ok(())
    }
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self::line(CurveKind::default(), DEFAULT_DROOP, DEFAULT_SEGMENTS)
    }
}
