//! Wavefront-OBJ-Export mehrerer benannter Meshes in eine Datei.
//!
//! Pro Mesh entsteht ein `o`-Block. Indizes sind 1-basiert und über alle
//! Objekte fortlaufend. Linien-Meshes werden als `l`-Records geschrieben.

use std::io::{self, Write};

use crate::geometry::Mesh;

/// Schreibt alle Meshes als OBJ-Text.
pub fn write_obj<W: Write>(writer: &mut W, meshes: &[(&str, &Mesh)]) -> io::Result<()> {
    let vertex_total: usize = meshes.iter().map(|(_, m)| m.vertex_count()).sum();
    writeln!(writer, "# Wire-Pole-Generator v{}", env!("CARGO_PKG_VERSION"))?;
    writeln!(writer, "# Objekte: {}, Vertices: {}", meshes.len(), vertex_total)?;

    let mut offset: u32 = 1;
    for (name, mesh) in meshes {
        writeln!(writer, "o {}", name)?;
        for v in &mesh.vertices {
            writeln!(writer, "v {:.6} {:.6} {:.6}", v.x, v.y, v.z)?;
        }
        if !mesh.faces.is_empty() {
            writeln!(writer, "s {}", if mesh.smooth { "1" } else { "off" })?;
        }
        for face in &mesh.faces {
            write!(writer, "f")?;
            for &i in face {
                write!(writer, " {}", i + offset)?;
            }
            writeln!(writer)?;
        }
        for [a, b] in &mesh.edges {
            writeln!(writer, "l {} {}", a + offset, b + offset)?;
        }
        offset += mesh.vertex_count() as u32;
    }
    Ok(())
}
