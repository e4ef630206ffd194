//! Integrationstests für den kompletten Zeichen-Ablauf:
//! - Pole-Verzeichnis → Kette → Spans → Meshes → Registry
//! - Fehlerfälle (ungleiche Anschlusszahl, fehlende Masten)
//! - Neuzeichnen nach Transform-Änderungen

use approx::assert_abs_diff_eq;
use glam::Vec3;
use wire_pole::app::{commit_built_wires, commit_draw_report, redraw_stale_wires};
use wire_pole::geometry::{MarkerOptions, TubeOptions};
use wire_pole::{
    draw_wires, link_selected_poles, on_transform_changed, AttachmentDirection, CurveConfig,
    CurveKind, OrderingChain, PolePlacement, PolePlacements, PoleStore, RingFrame, WireError,
    WireKey, WireRegistry, WireState,
};

/// Öffnet ein leeres Verzeichnis unter einem eindeutigen Temp-Pfad.
fn fresh_store(name: &str) -> (std::path::PathBuf, PoleStore) {
    let path = std::env::temp_dir().join(format!("wire_pole_flow_{name}.json"));
    let _ = std::fs::remove_file(&path);
    let store = PoleStore::open(&path).expect("Pole-Verzeichnis öffnen");
    (path, store)
}

/// Platzierungen ohne Rotation, alle Instanzen im Ursprung.
fn identity_placements(names: &[&str]) -> PolePlacements {
    let mut placements = PolePlacements::new();
    for name in names {
        placements.insert(*name, PolePlacement::at(Vec3::ZERO));
    }
    placements
}

// ─── Szenarien ───────────────────────────────────────────────────────────────

#[test]
fn test_parabola_span_between_two_poles() {
    let (path, mut store) = fresh_store("parabola");
    store
        .create_pole("P", AttachmentDirection::Output, vec![Vec3::ZERO])
        .expect("P");
    store
        .create_pole("Q", AttachmentDirection::Input, vec![Vec3::new(10.0, 0.0, 0.0)])
        .expect("Q");

    let mut chain = OrderingChain::new();
    chain.link_selection(&["Q", "P"]).expect("Verkettung");

    let config = CurveConfig::line(CurveKind::Parabola, 2.0, 4);
    let report = draw_wires(&store, &chain, &identity_placements(&["P", "Q"]), &config, &["Q"])
        .expect("Zeichnen");

    assert_eq!(report.built.len(), 1);
    let wire = &report.built[0];
    assert_eq!(wire.name, "P-Q");
    assert_eq!(wire.key, WireKey::new("P", "Q", 0));

    let points = &wire.wire.vertices;
    assert_eq!(points.len(), 5);
    assert_eq!(points[0], Vec3::ZERO);
    assert_eq!(points[4], Vec3::new(10.0, 0.0, 0.0));
    assert_abs_diff_eq!(points[2].z, -2.0, epsilon = 1e-5);
    assert!(points.windows(2).all(|w| w[1].x > w[0].x));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_unequal_attachment_counts_create_no_geometry() {
    let (path, mut store) = fresh_store("unequal");
    store
        .create_pole("P", AttachmentDirection::Output, vec![Vec3::ZERO, Vec3::Y])
        .expect("P");
    store
        .create_pole("Q", AttachmentDirection::Input, vec![Vec3::new(10.0, 0.0, 0.0)])
        .expect("Q");

    let mut chain = OrderingChain::new();
    chain.link_selection(&["Q", "P"]).expect("Verkettung");

    let report = draw_wires(
        &store,
        &chain,
        &identity_placements(&["P", "Q"]),
        &CurveConfig::default(),
        &["Q"],
    )
    .expect("Zeichnen");

    assert!(report.built.is_empty());
    assert_eq!(report.skipped.len(), 1);
    assert!(matches!(
        &report.skipped[0].error,
        WireError::Configuration(msg) if msg.contains("unequal mushroom count")
    ));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_unregistered_pole_is_skipped_as_not_found() {
    let (path, mut store) = fresh_store("not_found");
    store
        .create_pole("P", AttachmentDirection::Output, vec![Vec3::ZERO])
        .expect("P");
    let mut chain = OrderingChain::new();
    chain.link_selection(&["X", "P"]).expect("Verkettung");

    let report = draw_wires(
        &store,
        &chain,
        &identity_placements(&["P", "X"]),
        &CurveConfig::default(),
        &["X"],
    )
    .expect("Zeichnen");
    assert!(matches!(&report.skipped[0].error, WireError::NotFound(name) if name == "X"));
    let _ = std::fs::remove_file(&path);
}

// ─── Dicke und Kugeln ────────────────────────────────────────────────────────

#[test]
fn test_thick_wire_with_balls() {
    let (path, mut store) = fresh_store("thick");
    let attachments = vec![Vec3::new(0.0, 0.5, 9.0), Vec3::new(0.0, -0.5, 9.0)];
    store
        .create_pole("pole_a", AttachmentDirection::Output, attachments.clone())
        .expect("Output");
    store
        .create_pole("pole_a", AttachmentDirection::Input, attachments)
        .expect("Input");

    let mut placements = PolePlacements::new();
    placements.insert("pole_a", PolePlacement::at(Vec3::ZERO));
    placements.insert("pole_a.001", PolePlacement::at(Vec3::new(0.0, 40.0, 0.0)));

    let mut chain = OrderingChain::new();
    chain
        .link_selection(&["pole_a.001", "pole_a"])
        .expect("Verkettung");

    let mut config = CurveConfig::line(CurveKind::Catenary, 1.5, 12);
    config.thickness = Some(TubeOptions {
        radius: 0.03,
        sides: 6,
        smooth: true,
        ring_frame: RingFrame::RotationMinimizing,
    });
    config.balls = Some(MarkerOptions {
        amount: 3,
        radius: 0.2,
        sides: 8,
    });

    let report = draw_wires(&store, &chain, &placements, &config, &["pole_a.001"])
        .expect("Zeichnen");
    assert_eq!(report.built.len(), 2);
    for built in &report.built {
        assert_eq!(built.wire.vertex_count(), 6 * 13);
        assert_eq!(built.wire.face_count(), 6 * 12 + 2);
        assert!(built.wire.smooth);
        assert_eq!(built.balls.len(), 3);
        assert_eq!(built.balls[0].vertex_count(), 8 * 8 + 2);
    }

    let mut registry = WireRegistry::new();
    let mut handle = 0;
    let replaced = commit_built_wires(&mut registry, report.built, |_, _| {
        handle += 1;
        handle
    });
    assert!(replaced.is_empty());
    assert_eq!(registry.len(), 2);
    let record = registry
        .get(&WireKey::new("pole_a", "pole_a.001", 1))
        .expect("Leiter 1");
    assert_eq!(record.handles.len(), 4);
    let _ = std::fs::remove_file(&path);
}

// ─── Lebenszyklus ────────────────────────────────────────────────────────────

#[test]
fn test_moved_pole_is_redrawn_and_replaces_objects() {
    let (path, mut store) = fresh_store("lifecycle");
    store
        .create_pole("pole_a", AttachmentDirection::Output, vec![Vec3::new(0.0, 0.0, 7.0)])
        .expect("Output");
    store
        .create_pole("pole_a", AttachmentDirection::Input, vec![Vec3::new(0.0, 0.0, 7.0)])
        .expect("Input");

    let mut placements = PolePlacements::new();
    placements.insert("pole_a", PolePlacement::at(Vec3::ZERO));
    placements.insert("pole_a.001", PolePlacement::at(Vec3::new(30.0, 0.0, 0.0)));
    placements.insert("pole_a.002", PolePlacement::at(Vec3::new(60.0, 0.0, 0.0)));

    let selection = ["pole_a.002", "pole_a.001", "pole_a"];
    let mut chain = OrderingChain::new();
    let mut registry = WireRegistry::new();
    link_selected_poles(&mut chain, &mut registry, &selection).expect("Verkettung");

    let config = CurveConfig::line(CurveKind::Parabola, 1.0, 8);
    let report = draw_wires(&store, &chain, &placements, &config, &selection).expect("Zeichnen");
    let mut next = 0;
    commit_built_wires(&mut registry, report.built, |_, _| {
        next += 1;
        next
    });
    assert_eq!(registry.len(), 2);

    // Ohne auto_update passiert nichts
    assert!(on_transform_changed(&mut registry, false, &["pole_a.002"]).is_empty());

    placements.insert("pole_a.002", PolePlacement::at(Vec3::new(60.0, 10.0, 0.0)));
    let stale = on_transform_changed(&mut registry, true, &["pole_a.002"]);
    assert_eq!(stale, vec![WireKey::new("pole_a.001", "pole_a.002", 0)]);

    let redraw = redraw_stale_wires(&store, &chain, &placements, &config, &registry)
        .expect("Neuzeichnen");
    assert_eq!(redraw.built.len(), 1);
    assert_eq!(redraw.built[0].wire.vertices[8], Vec3::new(60.0, 10.0, 7.0));

    let replaced = commit_built_wires(&mut registry, redraw.built, |_, _| 100);
    assert_eq!(replaced.len(), 1);
    assert!(registry.iter().all(|r| r.state == WireState::Built));
    let _ = std::fs::remove_file(&path);
}

/// Mast mit je einem Anschluss in 7 m Höhe, Instanzen nach `positions`.
fn single_wire_setup(
    name: &str,
    positions: &[(&str, Vec3)],
) -> (std::path::PathBuf, PoleStore, PolePlacements) {
    let (path, mut store) = fresh_store(name);
    store
        .create_pole("pole_a", AttachmentDirection::Output, vec![Vec3::new(0.0, 0.0, 7.0)])
        .expect("Output");
    store
        .create_pole("pole_a", AttachmentDirection::Input, vec![Vec3::new(0.0, 0.0, 7.0)])
        .expect("Input");
    let mut placements = PolePlacements::new();
    for (instance, at) in positions {
        placements.insert(*instance, PolePlacement::at(*at));
    }
    (path, store, placements)
}

#[test]
fn test_relink_removes_wire_of_previous_partner() {
    let (path, store, placements) = single_wire_setup(
        "relink",
        &[
            ("pole_a", Vec3::ZERO),
            ("pole_a.001", Vec3::new(30.0, 0.0, 0.0)),
            ("pole_a.002", Vec3::new(0.0, 30.0, 0.0)),
        ],
    );
    let config = CurveConfig::line(CurveKind::Parabola, 1.0, 4);
    let mut chain = OrderingChain::new();
    let mut registry = WireRegistry::new();

    link_selected_poles(&mut chain, &mut registry, &["pole_a", "pole_a.001"]).expect("Verkettung");
    let report = draw_wires(&store, &chain, &placements, &config, &["pole_a"]).expect("Zeichnen");
    assert!(commit_draw_report(&mut registry, report, |_, _| 11).is_empty());
    assert!(registry.get(&WireKey::new("pole_a.001", "pole_a", 0)).is_some());

    // Neuer Upstream-Partner für pole_a
    link_selected_poles(&mut chain, &mut registry, &["pole_a", "pole_a.002"]).expect("Verkettung");
    let redraw = redraw_stale_wires(&store, &chain, &placements, &config, &registry)
        .expect("Neuzeichnen");
    assert_eq!(redraw.built.len(), 1);
    assert_eq!(redraw.settled, vec!["pole_a".to_string()]);

    let replaced = commit_draw_report(&mut registry, redraw, |_, _| 12);
    assert_eq!(replaced, vec![11]);
    assert_eq!(registry.len(), 1);
    assert!(registry.get(&WireKey::new("pole_a.001", "pole_a", 0)).is_none());
    assert!(registry.get(&WireKey::new("pole_a.002", "pole_a", 0)).is_some());
    assert!(registry.stale_keys().is_empty());
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_span_collapsed_by_move_drops_old_objects() {
    let (path, store, mut placements) = single_wire_setup(
        "collapsed",
        &[("pole_a", Vec3::ZERO), ("pole_a.001", Vec3::new(30.0, 0.0, 0.0))],
    );
    let config = CurveConfig::line(CurveKind::Parabola, 1.0, 4);
    let mut chain = OrderingChain::new();
    let mut registry = WireRegistry::new();

    link_selected_poles(&mut chain, &mut registry, &["pole_a", "pole_a.001"]).expect("Verkettung");
    let report = draw_wires(&store, &chain, &placements, &config, &["pole_a"]).expect("Zeichnen");
    commit_draw_report(&mut registry, report, |_, _| 7);
    assert_eq!(registry.len(), 1);

    // Upstream-Mast genau auf den gespeisten Mast schieben
    placements.insert("pole_a.001", PolePlacement::at(Vec3::ZERO));
    let stale = on_transform_changed(&mut registry, true, &["pole_a.001"]);
    assert_eq!(stale.len(), 1);

    let redraw = redraw_stale_wires(&store, &chain, &placements, &config, &registry)
        .expect("Neuzeichnen");
    assert!(redraw.built.is_empty());
    assert_eq!(redraw.degenerate, 1);

    let replaced = commit_draw_report(&mut registry, redraw, |_, _| 8);
    assert_eq!(replaced, vec![7]);
    assert!(registry.is_empty());
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_skipped_pair_keeps_stale_wire_for_retry() {
    let (path, mut store, placements) = single_wire_setup(
        "retry",
        &[("pole_a", Vec3::ZERO), ("pole_a.001", Vec3::new(30.0, 0.0, 0.0))],
    );
    let config = CurveConfig::line(CurveKind::Parabola, 1.0, 4);
    let mut chain = OrderingChain::new();
    let mut registry = WireRegistry::new();

    link_selected_poles(&mut chain, &mut registry, &["pole_a", "pole_a.001"]).expect("Verkettung");
    let report = draw_wires(&store, &chain, &placements, &config, &["pole_a"]).expect("Zeichnen");
    commit_draw_report(&mut registry, report, |_, _| 5);

    // Zweiter Input-Anschluss: Anzahl passt nicht mehr zum Output
    store
        .create_pole(
            "pole_a",
            AttachmentDirection::Input,
            vec![Vec3::new(0.0, 0.0, 7.0), Vec3::new(1.0, 0.0, 7.0)],
        )
        .expect("Input");
    registry.mark_all_stale();
    let redraw = redraw_stale_wires(&store, &chain, &placements, &config, &registry)
        .expect("Neuzeichnen");
    assert_eq!(redraw.skipped.len(), 1);
    assert!(redraw.settled.is_empty());

    assert!(commit_draw_report(&mut registry, redraw, |_, _| 6).is_empty());
    assert_eq!(registry.stale_keys(), vec![WireKey::new("pole_a.001", "pole_a", 0)]);
    let _ = std::fs::remove_file(&path);
}
