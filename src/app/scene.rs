//! Szenen-Beschreibung für die Kommandozeile.
//!
//! Eine Szene ersetzt den Host: sie nennt das Pole-Verzeichnis, die
//! Platzierung jeder Mast-Instanz und die geordnete Auswahl.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use super::use_cases::{draw_wires, DrawReport};
use crate::core::{OrderingChain, PolePlacements, PoleStore, POLE_FILE_NAME};
use crate::shared::CurveConfig;

/// Inhalt einer Szenen-Datei (JSON).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    /// Pole-Verzeichnis, relativ zur Szenen-Datei
    #[serde(default = "default_poles_file")]
    pub poles_file: PathBuf,
    /// Platzierung je Instanzname
    #[serde(default)]
    pub placements: PolePlacements,
    /// Geordnete Auswahl, wird in dieser Reihenfolge verkettet
    #[serde(default)]
    pub selection: Vec<String>,
}

fn default_poles_file() -> PathBuf {
    PathBuf::from(POLE_FILE_NAME)
}

impl Scene {
    /// Lädt eine Szene und löst `poles_file` relativ zur Szenen-Datei auf.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Szene {} nicht lesbar", path.display()))?;
        let mut scene: Scene = serde_json::from_str(&text)
            .with_context(|| format!("Szene {} ist kein gültiges JSON", path.display()))?;
        if scene.poles_file.is_relative() {
            if let Some(dir) = path.parent() {
                scene.poles_file = dir.join(&scene.poles_file);
            }
        }
        log::info!(
            "Szene geladen: {} Platzierungen, {} ausgewählte Masten",
            scene.placements.len(),
            scene.selection.len()
        );
        Ok(scene)
    }

    /// Verkettet die Auswahl und zeichnet alle Leitungen.
    pub fn generate(&self, config: &CurveConfig) -> anyhow::Result<DrawReport> {
        let store = PoleStore::open(&self.poles_file)?;
        let mut chain = OrderingChain::new();
        chain.link_selection(&self.selection)?;
        let report = draw_wires(&store, &chain, &self.placements, config, &self.selection)?;
        Ok(report)
    }
}
