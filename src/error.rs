//! Fehler-Taxonomie der Leitungs-Generierung.
//!
//! Validierungsfehler werden erkannt, bevor irgendein Mesh erzeugt wird.
//! Der Aufrufer überspringt dann den betroffenen Span (bzw. die ganze Operation
//! bei `NoSelection`) und protokolliert eine Diagnose.

use std::path::PathBuf;

/// Alle fachlichen Fehler der Crate.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Mast-Name ist im Pole-Verzeichnis nicht registriert (oder Instanz nicht platziert)
    #[error("Mast '{0}' nicht gefunden")]
    NotFound(String),

    /// Ungültige Konfiguration (ungleiche Mushroom-Anzahl, Seiten-/Segmentzahl, Radius ...)
    #[error("Konfigurationsfehler: {0}")]
    Configuration(String),

    /// Start- und Endpunkt eines Spans fallen zusammen
    #[error("Degenerierter Span: Start- und Endpunkt fallen zusammen")]
    DegenerateSpan,

    /// Operation benötigt eine Auswahl, es ist aber nichts ausgewählt
    #[error("Keine Auswahl: {0}")]
    NoSelection(&'static str),

    /// Verkettung würde einen Zyklus in der Upstream-Kette erzeugen
    #[error("Zyklische Mast-Kette über '{0}'")]
    CyclicChain(String),

    /// Numerisches Verfahren (Kettenlinien-Parameter) hat nicht konvergiert
    #[error("Numerischer Fehler: {0}")]
    Numerical(String),

    /// Lese-/Schreibfehler am Pole-Verzeichnis
    #[error("I/O-Fehler bei {path}: {source}")]
    Io {
        /// Betroffene Datei
        path: PathBuf,
        /// Ursprünglicher Fehler
        #[source]
        source: std::io::Error,
    },

    /// Pole-Verzeichnis ist kein gültiges JSON
    #[error("Ungültiges Pole-Verzeichnis {path}: {source}")]
    Json {
        /// Betroffene Datei
        path: PathBuf,
        /// Ursprünglicher Fehler
        #[source]
        source: serde_json::Error,
    },
}

impl WireError {
    /// Kurzform für Konfigurationsfehler.
    pub fn configuration(msg: impl Into<String>) -> Self {
        WireError::Configuration(msg.into())
    }

    /// Degenerierte Spans werden still übersprungen und nicht als Fehler gemeldet.
    pub fn is_degenerate_span(&self) -> bool {
        matches!(self, WireError::DegenerateSpan)
    }
}

/// Ergebnis-Typ der Crate.
pub type WireResult<T> = Result<T, WireError>;
