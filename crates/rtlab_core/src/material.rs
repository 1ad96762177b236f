//! Surface materials.

use crate::color::ColorModel;

/// The look of a primitive: a single flat color in one color model.
///
/// Reflectivity is a property of the tracer rather than the material, so
/// every surface mirrors the scene by the same amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material<C: ColorModel> {
    pub color: C,
}

impl<C: ColorModel> Material<C> {
    /// Create a new material with the given color.
    pub fn new(color: C) -> Self {
        Self { color }
    }
}

impl<C: ColorModel> Default for Material<C> {
    fn default() -> Self {
        Self::new(C::WHITE)
    }
}
