//! Trait shared by every dashboard element

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// An element that renders itself into a fixed screen rectangle and tracks
/// whether its content changed since the last draw.
///
/// Containers report dirty when any child is dirty and clear their
/// children in `mark_clean`.
pub trait Drawable {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error>;

    /// Screen area the element covers
    fn bounds(&self) -> Rectangle;

    fn is_dirty(&self) -> bool;

    /// Called after a successful draw
    fn mark_clean(&mut self);

    /// Force a redraw on the next frame
    fn mark_dirty(&mut self);
}
