//! Umrechnung lokaler Anschlusspunkte in Weltkoordinaten.
//!
//! Die Transformation gehört dem Host. Die Crate sieht nur das Trait
//! `AttachmentResolver`; `PolePlacements` ist eine einfache Implementierung
//! (Translation + Euler-Rotation, Skalierung wird ignoriert) für Tests und
//! die Kommandozeile.

use glam::{EulerRot, Quat, Vec3};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Liefert die Weltposition eines lokalen Punkts einer Mast-Instanz.
pub trait AttachmentResolver {
    /// `None`, wenn die Instanz dem Host unbekannt ist.
    fn to_world(&self, instance: &str, local: Vec3) -> Option<Vec3>;
}

impl<F> AttachmentResolver for F
where
    F: Fn(&str, Vec3) -> Option<Vec3>,
{
    fn to_world(&self, instance: &str, local: Vec3) -> Option<Vec3> {
        self(instance, local)
    }
}

/// Lage einer Mast-Instanz in der Welt.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PolePlacement {
    /// Weltposition des Objekt-Ursprungs
    pub translation: Vec3,
    /// Euler-Winkel XYZ in Grad
    #[serde(default)]
    pub rotation_deg: Vec3,
}

impl PolePlacement {
    /// Platzierung nur mit Translation.
    pub fn at(translation: Vec3) -> Self {
        Self {
            translation,
            rotation_deg: Vec3::ZERO,
        }
    }

    /// Rotation als Quaternion (X zuerst, dann Y, dann Z).
    pub fn rotation(&self) -> Quat {
        let r = self.rotation_deg;
        Quat::from_euler(
            EulerRot::ZYX,
            r.z.to_radians(),
            r.y.to_radians(),
            r.x.to_radians(),
        )
    }

    /// Lokalen Punkt rotieren und verschieben.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.rotation() * local + self.translation
    }
}

/// Platzierungen aller Instanzen, nach Instanzname.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolePlacements {
    placements: IndexMap<String, PolePlacement>,
}

impl PolePlacements {
    /// Erstellt eine leere Sammlung.
    pub fn new() -> Self {
        Self::default()
    }

    /// Setzt (oder ersetzt) die Platzierung einer Instanz.
    pub fn insert(&mut self, instance: impl Into<String>, placement: PolePlacement) {
        self.placements.insert(instance.into(), placement);
    }

    /// Platzierung einer Instanz
    pub fn get(&self, instance: &str) -> Option<&PolePlacement> {
        self.placements.get(instance)
    }

    /// Anzahl der Platzierungen
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Gibt zurück ob keine Platzierungen vorhanden sind
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

impl AttachmentResolver for PolePlacements {
    fn to_world(&self, instance: &str, local: Vec3) -> Option<Vec3> {
        self.placements
            .get(instance)
            .map(|placement| placement.transform_point(local))
    }
}
