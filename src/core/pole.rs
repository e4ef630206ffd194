//! Ein registrierter Mast mit seinen lokalen Anschlusspunkten ("Mushrooms").

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Richtung der Anschlusspunkte eines Masts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentDirection {
    /// Eingehende Leitungen enden hier
    Input,
    /// Ausgehende Leitungen beginnen hier
    Output,
}

impl AttachmentDirection {
    /// Gegenrichtung
    pub fn opposite(self) -> Self {
        match self {
            AttachmentDirection::Input => AttachmentDirection::Output,
            AttachmentDirection::Output => AttachmentDirection::Input,
        }
    }

    /// Schlüssel im JSON-Dokument
    pub fn as_str(self) -> &'static str {
        match self {
            AttachmentDirection::Input => "input",
            AttachmentDirection::Output => "output",
        }
    }
}

/// Anschlusspunkte eines Masts in lokalen Koordinaten.
///
/// Index i der `input`-Liste gehört zum selben Leiter wie Index i der
/// `output`-Liste des Upstream-Masts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pole {
    /// Punkte, an denen eingehende Leitungen enden
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Vec<Vec3>>,
    /// Punkte, an denen ausgehende Leitungen beginnen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Vec<Vec3>>,
}

impl Pole {
    /// Erstellt einen Mast mit nur einer belegten Richtung.
    pub fn with_attachments(direction: AttachmentDirection, points: Vec<Vec3>) -> Self {
        let mut pole = Self::default();
        pole.set_attachments(direction, points);
        pole
    }

    /// Anschlusspunkte einer Richtung (falls vorhanden).
    pub fn attachments(&self, direction: AttachmentDirection) -> Option<&[Vec3]> {
        match direction {
            AttachmentDirection::Input => self.input.as_deref(),
            AttachmentDirection::Output => self.output.as_deref(),
        }
    }

    /// Setzt die Anschlusspunkte einer Richtung, die Gegenrichtung bleibt erhalten.
    pub fn set_attachments(&mut self, direction: AttachmentDirection, points: Vec<Vec3>) {
        match direction {
            AttachmentDirection::Input => self.input = Some(points),
            AttachmentDirection::Output => self.output = Some(points),
        }
    }
}

/// Schlüssel im Pole-Verzeichnis für einen Host-Objektnamen.
///
/// Der Host hängt an Duplikate ein Suffix wie ".001" an; alles ab dem ersten
/// Punkt wird abgeschnitten.
pub fn pole_key(instance_name: &str) -> &str {
    instance_name.split('.').next().unwrap_or(instance_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pole_key_strips_qualifier() {
        assert_eq!(pole_key("pole_a.001"), "pole_a");
        assert_eq!(pole_key("pole_a"), "pole_a");
        assert_eq!(pole_key("Pole_A.002.x"), "Pole_A");
        assert_eq!(pole_key(".hidden"), "");
    }

    #[test]
    fn test_set_attachments_keeps_other_direction() {
        let mut pole = Pole::with_attachments(AttachmentDirection::Output, vec![Vec3::Z]);
        pole.set_attachments(AttachmentDirection::Input, vec![Vec3::ZERO]);
        assert_eq!(pole.attachments(AttachmentDirection::Output), Some(&[Vec3::Z][..]));
        assert_eq!(pole.attachments(AttachmentDirection::Input), Some(&[Vec3::ZERO][..]));
        assert_eq!(AttachmentDirection::Input.opposite(), AttachmentDirection::Output);
    }

    #[test]
    fn test_json_shape_skips_missing_direction() {
        let pole = Pole::with_attachments(AttachmentDirection::Output, vec![Vec3::new(0.0, 0.0, 1.0)]);
        let json = serde_json::to_string(&pole).expect("Serialisierung");
        assert_eq!(json, r#"{"output":[[0.0,0.0,1.0]]}"#);
    }
}
