//! Abstrakte Mesh-Beschreibung, die der Host in seine Szene übernimmt.

use glam::Vec3;

/// Vertex-Positionen plus Kanten- und Flächen-Topologie.
///
/// Flächen sind geordnete Index-Listen (Dreiecke, Quads oder n-Gone).
/// `smooth` markiert alle Flächen für glatte Schattierung.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex-Positionen in Weltkoordinaten
    pub vertices: Vec<Vec3>,
    /// Explizite Kanten (nur bei Linien-Meshes belegt)
    pub edges: Vec<[u32; 2]>,
    /// Flächen als Index-Listen
    pub faces: Vec<Vec<u32>>,
    /// Glatte Schattierung für alle Flächen
    pub smooth: bool,
}

impl Mesh {
    /// Linien-Mesh aus einer Polyline: ein Vertex pro Punkt, Kanten i → i+1.
    pub fn from_polyline(points: &[Vec3]) -> Self {
        let edges = (1..points.len() as u32).map(|i| [i - 1, i]).collect();
        Self {
            vertices: points.to_vec(),
            edges,
            faces: Vec::new(),
            smooth: false,
        }
    }

    /// Anzahl der Vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Anzahl der Flächen
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Anzahl der expliziten Kanten
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Flächennormale (Newell-Verfahren, nicht normiert bei entarteten Flächen).
    pub fn face_normal(&self, face_index: usize) -> Vec3 {
        let Some(face) = self.faces.get(face_index) else {
            return Vec3::ZERO;
        };
        let mut normal = Vec3::ZERO;
        for (i, &a) in face.iter().enumerate() {
            let b = face[(i + 1) % face.len()];
            let p = self.vertices[a as usize];
            let q = self.vertices[b as usize];
            normal.x += (p.y - q.y) * (p.z + q.z);
            normal.y += (p.z - q.z) * (p.x + q.x);
            normal.z += (p.x - q.x) * (p.y + q.y);
        }
        normal.normalize_or_zero()
    }

    /// Mittelpunkt einer Fläche.
    pub fn face_center(&self, face_index: usize) -> Vec3 {
        let Some(face) = self.faces.get(face_index) else {
            return Vec3::ZERO;
        };
        if face.is_empty() {
            return Vec3::ZERO;
        }
        let sum: Vec3 = face.iter().map(|&i| self.vertices[i as usize]).sum();
        sum / face.len() as f32
    }
}
