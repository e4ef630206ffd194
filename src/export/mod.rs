//! Export der erzeugten Meshes in Austauschformate.

pub mod obj;

pub use obj::write_obj;
