//! Wire-Pole-Generator.
//!
//! Kommandozeile: liest eine Szene (Pole-Verzeichnis, Platzierungen, Auswahl),
//! verkettet die Auswahl, zeichnet alle Leitungen und schreibt sie als OBJ.
//!
//! Aufruf: `Wire-Pole-Generator <scene.json> [output.obj]`

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use wire_pole::app::commit_draw_report;
use wire_pole::export::write_obj;
use wire_pole::{Mesh, Scene, WireOptions, WireRegistry};

fn main() -> anyhow::Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Wire-Pole-Generator v{} startet...", env!("CARGO_PKG_VERSION"));

    let mut args = std::env::args_os().skip(1);
    let Some(scene_path) = args.next().map(PathBuf::from) else {
        anyhow::bail!("Aufruf: Wire-Pole-Generator <scene.json> [output.obj]");
    };
    let output_path = args.next().map(PathBuf::from);

    let options = WireOptions::load_from_file(&WireOptions::config_path());
    let config = options.curve_config()?;

    let scene = Scene::load_from_file(&scene_path)?;
    let report = scene.generate(&config)?;
    for skipped in &report.skipped {
        log::warn!(
            "Übersprungen: {} → {} ({})",
            skipped.start_pole,
            skipped.end_pole,
            skipped.error
        );
    }

    let mut registry = WireRegistry::new();
    let mut objects: Vec<(String, Mesh)> = Vec::new();
    commit_draw_report(&mut registry, report, |name, mesh| {
        objects.push((name.to_string(), mesh.clone()));
        objects.len() as u64
    });
    let named: Vec<(&str, &Mesh)> = objects.iter().map(|(n, m)| (n.as_str(), m)).collect();

    match output_path {
        Some(path) => {
            let file = std::fs::File::create(&path)
                .with_context(|| format!("{} nicht beschreibbar", path.display()))?;
            let mut writer = std::io::BufWriter::new(file);
            write_obj(&mut writer, &named)?;
            writer.flush()?;
            log::info!("{} Objekte nach {} geschrieben", named.len(), path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            write_obj(&mut writer, &named)?;
            writer.flush()?;
        }
    }
    Ok(())
}
