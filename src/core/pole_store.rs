//! JSON-basiertes Pole-Verzeichnis.
//!
//! Das Verzeichnis wird einmal beim Öffnen geladen. Jede Änderung schreibt das
//! komplette Dokument neu (über eine temporäre Datei + Rename), erst danach wird
//! der In-Memory-Zustand übernommen. Schlägt das Schreiben fehl, bleiben Datei
//! und Speicher unverändert.

use std::path::{Path, PathBuf};

use glam::Vec3;
use indexmap::IndexMap;
use serde::Serialize;

use super::pole::{pole_key, AttachmentDirection, Pole};
use crate::error::{WireError, WireResult};

/// Standard-Dateiname des Verzeichnisses.
pub const POLE_FILE_NAME: &str = "poles.json";

/// Geordnete Abbildung Mast-Name → Mast (Reihenfolge = Dokument-Reihenfolge).
pub type PoleDirectory = IndexMap<String, Pole>;

/// Parst ein Pole-Verzeichnis. Leerer Text ergibt ein leeres Verzeichnis.
pub fn parse_pole_directory(text: &str) -> Result<PoleDirectory, serde_json::Error> {
    if text.trim().is_empty() {
        return Ok(PoleDirectory::new());
    }
    serde_json::from_str(text)
}

/// Serialisiert ein Verzeichnis mit 4 Leerzeichen Einrückung.
pub fn write_pole_directory(poles: &PoleDirectory) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    poles.serialize(&mut serializer)?;
    // serde_json erzeugt ausschließlich UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Prozessweites Verzeichnis aller registrierten Masten.
#[derive(Debug, Clone)]
pub struct PoleStore {
    path: PathBuf,
    poles: PoleDirectory,
}

impl PoleStore {
    /// Öffnet das Verzeichnis. Eine fehlende Datei ergibt ein leeres Verzeichnis.
    pub fn open(path: impl Into<PathBuf>) -> WireResult<Self> {
        let path = path.into();
        let poles = match std::fs::read_to_string(&path) {
            Ok(text) => parse_pole_directory(&text).map_err(|source| WireError::Json {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Kein Pole-Verzeichnis unter {}, starte leer", path.display());
                PoleDirectory::new()
            }
            Err(source) => return Err(WireError::Io { path, source }),
        };
        log::info!("Pole-Verzeichnis geladen: {} Masten aus {}", poles.len(), path.display());
        Ok(Self { path, poles })
    }

    /// Pfad der Backing-Datei
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Legt die Anschlusspunkte einer Richtung an oder ersetzt sie.
    ///
    /// Die Gegenrichtung bleibt erhalten. Der Eintrag wandert ans Ende des
    /// Dokuments. Leere Punktlisten werden als fehlende Auswahl abgelehnt.
    pub fn create_pole(
        &mut self,
        name: &str,
        direction: AttachmentDirection,
        points: Vec<Vec3>,
    ) -> WireResult<()> {
        let key = checked_key(name)?;
        if points.is_empty() {
            return Err(WireError::NoSelection("keine Vertices für den Mast ausgewählt"));
        }

        let mut next = self.poles.clone();
        let mut pole = next.shift_remove(key).unwrap_or_default();
        let count = points.len();
        pole.set_attachments(direction, points);
        next.insert(key.to_string(), pole);

        self.commit(next)?;
        log::info!(
            "Mast '{}': {} {}-Punkte gespeichert",
            key,
            count,
            direction.as_str()
        );
        Ok(())
    }

    /// Entfernt einen Mast. Gibt `false` zurück, wenn er nicht existierte.
    pub fn delete_pole(&mut self, name: &str) -> WireResult<bool> {
        let key = pole_key(name);
        if !self.poles.contains_key(key) {
            return Ok(false);
        }

        let mut next = self.poles.clone();
        next.shift_remove(key);
        self.commit(next)?;
        log::info!("Mast '{}' gelöscht", key);
        Ok(true)
    }

    /// Anschlusspunkte eines Masts in einer Richtung.
    ///
    /// Unbekannter Name → `NotFound`; fehlende Richtung → leere Liste.
    pub fn get_mushroom(&self, name: &str, direction: AttachmentDirection) -> WireResult<&[Vec3]> {
        let key = pole_key(name);
        let pole = self
            .poles
            .get(key)
            .ok_or_else(|| WireError::NotFound(key.to_string()))?;
        Ok(pole.attachments(direction).unwrap_or(&[]))
    }

    /// Mast nach Name (Suffix wird ignoriert)
    pub fn get(&self, name: &str) -> Option<&Pole> {
        self.poles.get(pole_key(name))
    }

    /// Prüft ob ein Mast registriert ist
    pub fn contains(&self, name: &str) -> bool {
        self.poles.contains_key(pole_key(name))
    }

    /// Alle Mast-Namen in Dokument-Reihenfolge
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.poles.keys().map(String::as_str)
    }

    /// Anzahl der Masten
    pub fn len(&self) -> usize {
        self.poles.len()
    }

    /// Gibt zurück ob das Verzeichnis leer ist
    pub fn is_empty(&self) -> bool {
        self.poles.is_empty()
    }

    /// Aktuelles Dokument als JSON-Text
    pub fn to_json_string(&self) -> WireResult<String> {
        write_pole_directory(&self.poles).map_err(|source| WireError::Json {
            path: self.path.clone(),
            source,
        })
    }

    /// Schreibt `next` vollständig und übernimmt es erst danach in den Speicher.
    fn commit(&mut self, next: PoleDirectory) -> WireResult<()> {
        let json = write_pole_directory(&next).map_err(|source| WireError::Json {
            path: self.path.clone(),
            source,
        })?;

        let tmp_path = temp_path(&self.path);
        let io_err = |source| WireError::Io {
            path: self.path.clone(),
            source,
        };
        std::fs::write(&tmp_path, json).map_err(io_err)?;
        if let Err(e) = std::fs::rename(&tmp_path, &self.path) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(io_err(e));
        }

        self.poles = next;
        Ok(())
    }
}

/// Namens-Normalisierung mit Prüfung auf leeren Schlüssel.
fn checked_key(name: &str) -> WireResult<&str> {
    let key = pole_key(name);
    if key.is_empty() {
        return Err(WireError::configuration(format!(
            "ungültiger Mast-Name '{name}'"
        )));
    }
    Ok(key)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| POLE_FILE_NAME.into());
    name.push(".tmp");
    path.with_file_name(name)
}
