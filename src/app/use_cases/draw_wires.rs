//! Use-Case: Leitungen zwischen verketteten Masten zeichnen.
//!
//! Pro Mastpaar wird entweder jede Leitung gebaut oder gar keine. Fehler
//! eines Paares brechen den Gesamtvorgang nicht ab, das Paar wird
//! protokolliert und im Bericht aufgeführt.

use crate::app::wire_registry::{MeshHandle, WireKey, WireRegistry};
use crate::core::{resolve_spans, span_name, AttachmentResolver, OrderingChain, PoleStore, Span};
use crate::error::{WireError, WireResult};
use crate::geometry::{build_marker_meshes, build_polyline, build_tube_mesh, Mesh};
use crate::shared::CurveConfig;

/// Fertig gebaute Geometrie eines Leiters.
#[derive(Debug, Clone)]
pub struct BuiltWire {
    /// Schlüssel des Leiters
    pub key: WireKey,
    /// Objektname im Host
    pub name: String,
    /// Linien- oder Rohr-Mesh
    pub wire: Mesh,
    /// Ein Kugel-Mesh pro Marker
    pub balls: Vec<Mesh>,
}

/// Ergebnis eines Mastpaares.
#[derive(Debug, Clone, Default)]
pub struct PairDrawing {
    /// Gebaute Leiter in Anschluss-Reihenfolge
    pub wires: Vec<BuiltWire>,
    /// Übersprungene Spans mit zusammenfallenden Endpunkten
    pub degenerate: usize,
}

/// Ein übersprungenes Mastpaar samt Ursache.
#[derive(Debug)]
pub struct SkippedPair {
    /// Speisender Mast
    pub start_pole: String,
    /// Gespeister Mast
    pub end_pole: String,
    /// Ursache
    pub error: WireError,
}

/// Zusammenfassung eines Zeichenvorgangs.
#[derive(Debug, Default)]
pub struct DrawReport {
    /// Alle gebauten Leiter
    pub built: Vec<BuiltWire>,
    /// Mastpaare, die wegen eines Fehlers übersprungen wurden
    pub skipped: Vec<SkippedPair>,
    /// Anzahl still übersprungener degenerierter Spans
    pub degenerate: usize,
    /// Ausgewählte Masten, deren eingehende Leitungen vollständig in `built`
    /// stehen (auch ohne Upstream-Partner oder nur mit degenerierten Spans)
    pub settled: Vec<String>,
}

/// Baut Leitung und Kugeln eines einzelnen Spans.
pub fn build_span_geometry(span: &Span, config: &CurveConfig) -> WireResult<(Mesh, Vec<Mesh>)> {
    let polyline = build_polyline(span.start, span.end, config.kind, config.droop, config.segments)?;

    let wire = match &config.thickness {
        Some(tube) => build_tube_mesh(&polyline, tube)?,
        None => Mesh::from_polyline(&polyline),
    };
    let balls = match &config.balls {
        Some(markers) => build_marker_meshes(span.start, span.end, config.droop, markers)?,
        None => Vec::new(),
    };
    Ok((wire, balls))
}

/// Baut alle Leiter von `start_instance` (Output) nach `end_instance` (Input).
///
/// Degenerierte Spans werden übersprungen und gezählt. Jeder andere Fehler
/// verwirft das gesamte Paar.
pub fn draw_span_pair(
    store: &PoleStore,
    resolver: &impl AttachmentResolver,
    config: &CurveConfig,
    start_instance: &str,
    end_instance: &str,
) -> WireResult<PairDrawing> {
    let spans = resolve_spans(store, resolver, start_instance, end_instance)?;
    let mut drawing = PairDrawing::default();

    for span in &spans {
        match build_span_geometry(span, config) {
            Ok((wire, balls)) => {
                log::debug!(
                    "Leiter {} #{}: {} Vertices, {} Kugeln",
                    span.name(),
                    span.attachment_index,
                    wire.vertex_count(),
                    balls.len()
                );
                drawing.wires.push(BuiltWire {
                    key: WireKey::new(&span.start_pole, &span.end_pole, span.attachment_index),
                    name: span.name(),
                    wire,
                    balls,
                });
            }
            Err(e) if e.is_degenerate_span() => {
                log::debug!(
                    "Degenerierter Span {} #{} übersprungen",
                    span.name(),
                    span.attachment_index
                );
                drawing.degenerate += 1;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(drawing)
}

/// Zeichnet für jeden ausgewählten Mast die Leitungen von seinem Upstream-Partner.
///
/// Masten ohne Upstream-Partner werden ignoriert. Eine leere Auswahl ist ein
/// Fehler; fehlerhafte Paare landen in `DrawReport::skipped`.
pub fn draw_wires<S: AsRef<str>>(
    store: &PoleStore,
    chain: &OrderingChain,
    resolver: &impl AttachmentResolver,
    config: &CurveConfig,
    selection: &[S],
) -> WireResult<DrawReport> {
    if selection.is_empty() {
        return Err(WireError::NoSelection("keine Masten zum Zeichnen ausgewählt"));
    }
    config.validate()?;

    let mut report = DrawReport::default();
    for pole in selection.iter().map(|s| s.as_ref()) {
        let Some(upstream) = chain.upstream(pole) else {
            log::debug!("Mast '{}' hat keinen Upstream-Partner", pole);
            report.settled.push(pole.to_string());
            continue;
        };

        match draw_span_pair(store, resolver, config, upstream, pole) {
            Ok(drawing) => {
                report.degenerate += drawing.degenerate;
                report.built.extend(drawing.wires);
                report.settled.push(pole.to_string());
            }
            Err(error) => {
                log::warn!(
                    "Leitungen {} übersprungen: {}",
                    span_name(upstream, pole),
                    error
                );
                report.skipped.push(SkippedPair {
                    start_pole: upstream.to_string(),
                    end_pole: pole.to_string(),
                    error,
                });
            }
        }
    }

    log::info!(
        "{} Leitungen gezeichnet, {} Mastpaare übersprungen, {} degenerierte Spans",
        report.built.len(),
        report.skipped.len(),
        report.degenerate
    );
    Ok(report)
}

/// Übergibt gebaute Leiter an den Host und registriert sie.
///
/// `add_mesh` legt ein Objekt im Host an und liefert dessen Handle. Die
/// Kugeln heißen `"{name}.ball{i}"`. Zurückgegeben werden die Handles der
/// ersetzten Objekte, die der Host entfernen soll.
pub fn commit_built_wires<F>(
    registry: &mut WireRegistry,
    wires: Vec<BuiltWire>,
    mut add_mesh: F,
) -> Vec<MeshHandle>
where
    F: FnMut(&str, &Mesh) -> MeshHandle,
{
    let mut replaced = Vec::new();
    for built in wires {
        let mut handles = Vec::with_capacity(1 + built.balls.len());
        handles.push(add_mesh(&built.name, &built.wire));
        for (i, ball) in built.balls.iter().enumerate() {
            handles.push(add_mesh(&format!("{}.ball{}", built.name, i), ball));
        }
        replaced.extend(registry.register_built(built.key, built.name, handles));
    }
    replaced
}

/// Übergibt einen kompletten Zeichenvorgang an Host und Registry.
///
/// Wie [`commit_built_wires`], zusätzlich verschwinden alle veralteten
/// Leiter der erledigten Masten, die nicht neu gebaut wurden. Masten aus
/// `DrawReport::skipped` behalten ihre veralteten Leiter für den nächsten
/// Versuch. Zurückgegeben werden alle Handles, die der Host entfernen soll.
pub fn commit_draw_report<F>(
    registry: &mut WireRegistry,
    report: DrawReport,
    add_mesh: F,
) -> Vec<MeshHandle>
where
    F: FnMut(&str, &Mesh) -> MeshHandle,
{
    let mut replaced = commit_built_wires(registry, report.built, add_mesh);
    for pole in &report.settled {
        let dropped = registry.remove_stale_for_end_pole(pole);
        if !dropped.is_empty() {
            log::debug!(
                "Mast '{}': {} veraltete Objekte entfernt",
                pole,
                dropped.len()
            );
        }
        replaced.extend(dropped);
    }
    replaced
}
