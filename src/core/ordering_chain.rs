//! Upstream/Downstream-Verkettung der Mast-Instanzen.
//!
//! Die Kette ist nach Host-Instanznamen ("pole_a.001") geschlüsselt, nicht nach
//! Verzeichnis-Schlüssel, weil sich mehrere Instanzen einen Verzeichniseintrag
//! teilen. Ein Mast hat höchstens einen Upstream- und höchstens einen
//! Downstream-Partner; die Upstream-Kanten bilden einfache Pfade.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;

use crate::error::{WireError, WireResult};

/// Gerichtete Kette über Mast-Instanzen.
#[derive(Debug, Clone, Default)]
pub struct OrderingChain {
    upstream: IndexMap<String, String>,
    downstream: IndexMap<String, String>,
}

impl OrderingChain {
    /// Erstellt eine leere Kette.
    pub fn new() -> Self {
        Self::default()
    }

    /// Verkettet eine vom Benutzer geordnete Auswahl.
    ///
    /// Für jedes Paar gilt `upstream[i] = poles[i+1]` und
    /// `downstream[i+1] = poles[i]`. Masten außerhalb der Auswahl bleiben
    /// unberührt. Bekommt ein Mast einen neuen Upstream-Partner, verliert der
    /// alte Partner seinen Downstream-Verweis.
    ///
    /// Abgelehnt wird vor jeder Änderung: ein Zyklus (`CyclicChain`) und ein
    /// Mast, der danach zwei Masten speisen würde (`Configuration`).
    ///
    /// Gibt die Anzahl der gesetzten Verbindungen zurück.
    pub fn link_selection<S: AsRef<str>>(&mut self, selection: &[S]) -> WireResult<usize> {
        if selection.is_empty() {
            return Err(WireError::NoSelection("keine Masten ausgewählt"));
        }

        let mut upstream = self.upstream.clone();
        for pair in selection.windows(2) {
            upstream.insert(pair[0].as_ref().to_string(), pair[1].as_ref().to_string());
        }
        if let Some(pole) = find_cycle(&upstream) {
            return Err(WireError::CyclicChain(pole));
        }
        if let Some((partner, first, second)) = find_shared_upstream(&upstream) {
            return Err(WireError::configuration(format!(
                "Mast '{partner}' würde '{first}' und '{second}' speisen"
            )));
        }

        self.downstream = upstream
            .iter()
            .map(|(pole, partner)| (partner.clone(), pole.clone()))
            .collect();
        self.upstream = upstream;

        let links = selection.len() - 1;
        log::debug!("{} Mast-Verbindungen gesetzt", links);
        Ok(links)
    }

    /// Upstream-Partner eines Masts
    pub fn upstream(&self, pole: &str) -> Option<&str> {
        self.upstream.get(pole).map(String::as_str)
    }

    /// Downstream-Partner eines Masts
    pub fn downstream(&self, pole: &str) -> Option<&str> {
        self.downstream.get(pole).map(String::as_str)
    }

    /// Prüft ob der Mast in der Kette vorkommt
    pub fn contains(&self, pole: &str) -> bool {
        self.upstream.contains_key(pole)
            || self.downstream.contains_key(pole)
            || self.upstream.values().any(|p| p == pole)
    }

    /// Alle Upstream-Kanten als (Mast, Upstream-Partner) in Einfüge-Reihenfolge.
    pub fn links(&self) -> impl Iterator<Item = (&str, &str)> {
        self.upstream.iter().map(|(p, u)| (p.as_str(), u.as_str()))
    }

    /// Anzahl der Upstream-Kanten
    pub fn len(&self) -> usize {
        self.upstream.len()
    }

    /// Gibt zurück ob die Kette leer ist
    pub fn is_empty(&self) -> bool {
        self.upstream.is_empty()
    }

    /// Entfernt einen Mast samt aller Rückverweise auf ihn.
    pub fn unlink_pole(&mut self, pole: &str) {
        self.upstream.shift_remove(pole);
        self.downstream.shift_remove(pole);
        self.upstream.retain(|_, u| u != pole);
        self.downstream.retain(|_, d| d != pole);
    }
}

/// Sucht einen Zyklus entlang der Upstream-Kanten und liefert einen beteiligten Mast.
fn find_cycle(upstream: &IndexMap<String, String>) -> Option<String> {
    let mut cleared: HashSet<&str> = HashSet::new();
    for start in upstream.keys() {
        let mut path: HashSet<&str> = HashSet::new();
        let mut current = start.as_str();
        loop {
            if cleared.contains(current) {
                break;
            }
            if !path.insert(current) {
                return Some(current.to_string());
            }
            match upstream.get(current) {
                Some(next) => current = next.as_str(),
                None => break,
            }
        }
        cleared.extend(path);
    }
    None
}

/// Sucht einen Upstream-Partner, der von zwei Masten verwendet wird.
fn find_shared_upstream(upstream: &IndexMap<String, String>) -> Option<(String, String, String)> {
    let mut fed_by: HashMap<&str, &str> = HashMap::new();
    for (pole, partner) in upstream {
        if let Some(other) = fed_by.insert(partner.as_str(), pole.as_str()) {
            return Some((partner.clone(), other.to_string(), pole.clone()));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_selection_sets_both_directions() {
        let mut chain = OrderingChain::new();
        let links = chain
            .link_selection(&["p1", "p2", "p3"])
            .expect("Verkettung");
        assert_eq!(links, 2);
        assert_eq!(chain.upstream("p1"), Some("p2"));
        assert_eq!(chain.upstream("p2"), Some("p3"));
        assert_eq!(chain.upstream("p3"), None);
        assert_eq!(chain.downstream("p3"), Some("p2"));
        assert_eq!(chain.downstream("p1"), None);
        assert_eq!(
            chain.links().collect::<Vec<_>>(),
            vec![("p1", "p2"), ("p2", "p3")]
        );
    }

    #[test]
    fn test_single_pole_links_nothing() {
        let mut chain = OrderingChain::new();
        assert_eq!(chain.link_selection(&["p1"]).expect("ok"), 0);
        assert!(chain.is_empty());
    }

    #[test]
    fn test_empty_selection_rejected() {
        let mut chain = OrderingChain::new();
        let empty: [&str; 0] = [];
        assert!(matches!(
            chain.link_selection(&empty),
            Err(WireError::NoSelection(_))
        ));
    }

    #[test]
    fn test_reselection_only_touches_selected_poles() {
        let mut chain = OrderingChain::new();
        chain.link_selection(&["p1", "p2", "p3"]).expect("ok");
        chain.link_selection(&["p3", "p4"]).expect("ok");
        assert_eq!(chain.upstream("p1"), Some("p2"));
        assert_eq!(chain.upstream("p3"), Some("p4"));
        assert_eq!(chain.downstream("p4"), Some("p3"));
    }

    #[test]
    fn test_cycle_rejected_without_mutation() {
        let mut chain = OrderingChain::new();
        chain.link_selection(&["p1", "p2", "p3"]).expect("ok");
        let result = chain.link_selection(&["p3", "p1"]);
        assert!(matches!(result, Err(WireError::CyclicChain(_))));
        assert_eq!(chain.upstream("p3"), None);
        assert_eq!(chain.downstream("p1"), None);
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn test_merge_into_shared_upstream_rejected() {
        let mut chain = OrderingChain::new();
        chain.link_selection(&["p1", "p2"]).expect("ok");
        let result = chain.link_selection(&["p3", "p2"]);
        assert!(matches!(result, Err(WireError::Configuration(_))));
        assert_eq!(chain.upstream("p3"), None);
        assert_eq!(chain.downstream("p2"), Some("p1"));
    }

    #[test]
    fn test_relink_moves_downstream_reference() {
        let mut chain = OrderingChain::new();
        chain.link_selection(&["p1", "p2"]).expect("ok");
        chain.link_selection(&["p1", "p4"]).expect("ok");
        assert_eq!(chain.upstream("p1"), Some("p4"));
        assert_eq!(chain.downstream("p4"), Some("p1"));
        assert_eq!(chain.downstream("p2"), None);
    }

    #[test]
    fn test_duplicate_in_selection_is_cycle() {
        let mut chain = OrderingChain::new();
        assert!(matches!(
            chain.link_selection(&["p1", "p1"]),
            Err(WireError::CyclicChain(_))
        ));
    }

    #[test]
    fn test_unlink_pole_clears_back_references() {
        let mut chain = OrderingChain::new();
        chain.link_selection(&["p1", "p2", "p3"]).expect("ok");
        chain.unlink_pole("p2");
        assert_eq!(chain.upstream("p1"), None);
        assert_eq!(chain.downstream("p3"), None);
        assert!(!chain.contains("p2"));
        assert!(chain.is_empty());
    }
}
