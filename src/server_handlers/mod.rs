pub mod importacion;
pub mod proyectos;
pub mod evaluaciones;
pub mod personas;
pub mod docs;

pub use importacion::*;
pub use proyectos::*;
pub use evaluaciones::*;
pub use personas::*;
pub use docs::*;
