//! In-Session-Registry aller gezeichneten Leitungen.
//!
//! Die Registry ist transient: sie wird nicht im Pole-Verzeichnis gespeichert
//! und ist nach dem Start leer. Sie merkt sich pro Leiter die Mesh-Handles,
//! die der Host für die Leitung (und ihre Kugeln) angelegt hat, damit ein
//! Neuzeichnen die alten Objekte ersetzen statt duplizieren kann.
//!
//! Lebenszyklus pro Leiter: kein Eintrag (Absent) → `Built` → `Stale` →
//! `Built` ... → entfernt.

use indexmap::IndexMap;

/// Host-seitiges Handle eines erzeugten Mesh-Objekts.
pub type MeshHandle = u64;

/// Eindeutiger Schlüssel eines Leiters zwischen zwei Mast-Instanzen.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WireKey {
    /// Instanzname des speisenden Masts
    pub start_pole: String,
    /// Instanzname des gespeisten Masts
    pub end_pole: String,
    /// Index des Leiters in den Anschlusslisten
    pub attachment_index: usize,
}

impl WireKey {
    /// Erstellt einen neuen Schlüssel.
    pub fn new(
        start_pole: impl Into<String>,
        end_pole: impl Into<String>,
        attachment_index: usize,
    ) -> Self {
        Self {
            start_pole: start_pole.into(),
            end_pole: end_pole.into(),
            attachment_index,
        }
    }

    /// Prüft ob der Leiter an der Mast-Instanz hängt
    pub fn touches(&self, pole: &str) -> bool {
        self.start_pole == pole || self.end_pole == pole
    }
}

/// Zustand eines registrierten Leiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireState {
    /// Geometrie entspricht den aktuellen Mast-Positionen
    Built,
    /// Ein Mast wurde bewegt oder neu verkettet, Neuzeichnen ausstehend
    Stale,
}

/// Ein registrierter Leiter.
#[derive(Debug, Clone, PartialEq)]
pub struct WireRecord {
    /// Schlüssel des Leiters
    pub key: WireKey,
    /// Objektname im Host
    pub name: String,
    /// Aktueller Zustand
    pub state: WireState,
    /// Handles der Leitung und ihrer Kugeln
    pub handles: Vec<MeshHandle>,
}

/// Registry aller Leitungen der aktuellen Session.
#[derive(Debug, Clone, Default)]
pub struct WireRegistry {
    records: IndexMap<WireKey, WireRecord>,
}

impl WireRegistry {
    /// Erstellt eine leere Registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registriert einen frisch gebauten Leiter.
    ///
    /// Ein bestehender Eintrag (egal ob `Built` oder `Stale`) wird ersetzt;
    /// dessen Handles werden zurückgegeben, damit der Host die alten Objekte
    /// entfernen kann.
    pub fn register_built(
        &mut self,
        key: WireKey,
        name: impl Into<String>,
        handles: Vec<MeshHandle>,
    ) -> Vec<MeshHandle> {
        let record = WireRecord {
            key: key.clone(),
            name: name.into(),
            state: WireState::Built,
            handles,
        };
        self.records
            .insert(key, record)
            .map(|old| old.handles)
            .unwrap_or_default()
    }

    /// Markiert alle Leiter an einer Mast-Instanz als veraltet.
    ///
    /// Gibt die Anzahl der betroffenen Leiter zurück.
    pub fn mark_stale_for_pole(&mut self, pole: &str) -> usize {
        let mut count = 0;
        for record in self.records.values_mut() {
            if record.key.touches(pole) {
                record.state = WireState::Stale;
                count += 1;
            }
        }
        count
    }

    /// Markiert alle Leiter als veraltet.
    pub fn mark_all_stale(&mut self) {
        for record in self.records.values_mut() {
            record.state = WireState::Stale;
        }
    }

    /// Schlüssel aller veralteten Leiter in Registrierungs-Reihenfolge.
    pub fn stale_keys(&self) -> Vec<WireKey> {
        self.records
            .values()
            .filter(|r| r.state == WireState::Stale)
            .map(|r| r.key.clone())
            .collect()
    }

    /// Entfernt alle Leiter an einer Mast-Instanz und gibt deren Handles zurück.
    pub fn remove_for_pole(&mut self, pole: &str) -> Vec<MeshHandle> {
        let mut handles = Vec::new();
        self.records.retain(|key, record| {
            if key.touches(pole) {
                handles.append(&mut record.handles);
                false
            } else {
                true
            }
        });
        handles
    }

    /// Entfernt alle noch veralteten Leiter, die in `pole` enden.
    ///
    /// Wird nach dem Neuzeichnen eines Masts aufgerufen: was dann noch
    /// `Stale` ist, wurde nicht neu gebaut (anderer Upstream-Partner,
    /// degenerierter Span, keine Verkettung mehr) und muss aus der Szene.
    pub fn remove_stale_for_end_pole(&mut self, pole: &str) -> Vec<MeshHandle> {
        let mut handles = Vec::new();
        self.records.retain(|key, record| {
            if key.end_pole == pole && record.state == WireState::Stale {
                handles.append(&mut record.handles);
                false
            } else {
                true
            }
        });
        handles
    }

    /// Entfernt einen einzelnen Leiter.
    pub fn remove(&mut self, key: &WireKey) -> Option<WireRecord> {
        self.records.shift_remove(key)
    }

    /// Gibt den Eintrag zum Schlüssel zurück (falls vorhanden).
    pub fn get(&self, key: &WireKey) -> Option<&WireRecord> {
        self.records.get(key)
    }

    /// Alle Einträge in Registrierungs-Reihenfolge.
    pub fn iter(&self) -> impl Iterator<Item = &WireRecord> {
        self.records.values()
    }

    /// Gibt die Anzahl der registrierten Leiter zurück.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Gibt zurück ob die Registry leer ist.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
