//! Pan/zoom view transform and the viewport it projects onto.
//!
//! # Coordinate conventions
//!
//! - **World coordinates**: catalog positions with Y already flipped, so +Y
//!   points down the screen.
//! - **Screen coordinates**: pixels, origin at the top-left corner.
//!
//! # Mapping
//!
//! ```text
//! screen = (world - offset) * scale + center
//! ```
//!
//! where `offset = (x, y)` is the pan state and `center` comes from the
//! [`Viewport`] and its [`Centering`] mode. The world point at `offset`
//! therefore always sits at the center of the viewport.

use crate::Vector3;

/// How the screen-space centering term is derived from the viewport extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Centering {
    /// `(width / 2, height / 2)`.
    #[default]
    Independent,
    /// `(width / 2, width / 2)`. Legacy viewer behaviour, which used
    /// the width for both axes. Only correct on square viewports.
    LegacyWidth,
}

/// Fixed-size 2D surface onto which world coordinates are projected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub centering: Centering,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            centering: Centering::Independent,
        }
    }

    pub fn square(size: u32) -> Self {
        Self::new(size, size)
    }

    pub fn with_centering(mut self, centering: Centering) -> Self {
        self.centering = centering;
        self
    }

    /// Screen-space position of the view center.
    pub fn center(&self) -> (f64, f64) {
        let half_w = self.width as f64 / 2.0;
        match self.centering {
            Centering::Independent => (half_w, self.height as f64 / 2.0),
            Centering::LegacyWidth => (half_w, half_w),
        }
    }

    /// `true` when the point lies in `[0, width] × [0, height]`.
    pub fn contains(&self, sx: f64, sy: f64) -> bool {
        (0.0..=self.width as f64).contains(&sx) && (0.0..=self.height as f64).contains(&sy)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::square(800)
    }
}

/// What [`ViewTransform::reset`] does with the pan step size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResetPolicy {
    /// Restore `translation_factor` along with scale and offset, so one pan
    /// step covers the same screen distance as at startup.
    #[default]
    RestoreTranslationFactor,
    /// Leave `translation_factor` at its zoomed value, as the legacy viewer
    /// did. Pan speed after a reset then depends on past zooms.
    KeepTranslationFactor,
}

/// Mutable pan/zoom state of one viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    /// World-space pan offset (the world point drawn at the viewport center).
    pub x: f64,
    pub y: f64,
    /// Screen pixels per world unit.
    pub scale: f64,
    /// World units covered by one discrete pan step.
    ///
    /// Divided by the zoom factor on every zoom, which keeps the on-screen pan
    /// distance constant across zoom levels.
    pub translation_factor: f64,
}

impl ViewTransform {
    pub const DEFAULT_SCALE: f64 = 0.5;
    pub const DEFAULT_TRANSLATION_FACTOR: f64 = 100.0;
    /// Smallest scale a zoom may reach.
    pub const MIN_SCALE: f64 = 1e-4;
    /// Largest scale a zoom may reach.
    pub const MAX_SCALE: f64 = 1e6;

    pub fn new(x: f64, y: f64, scale: f64, translation_factor: f64) -> Self {
        Self {
            x,
            y,
            scale,
            translation_factor,
        }
    }

    /// Pan by `(dx, dy)` steps.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx * self.translation_factor;
        self.y += dy * self.translation_factor;
    }

    /// Zoom by `factor`, anchored at the viewport center.
    ///
    /// The center offset is computed once from the pre-zoom state and the
    /// same amount is used for the translate out and the translate back.
    ///
    /// Returns `false` and leaves the view untouched if `factor` is not a
    /// positive finite number or the new scale would leave
    /// [`MIN_SCALE`](Self::MIN_SCALE)..=[`MAX_SCALE`](Self::MAX_SCALE).
    pub fn zoom_at_center(&mut self, factor: f64, viewport: &Viewport) -> bool {
        let new_scale = self.scale * factor;
        let valid = factor > 0.0
            && factor.is_finite()
            && (Self::MIN_SCALE..=Self::MAX_SCALE).contains(&new_scale);
        if !valid {
            return false;
        }
        let (half_w, half_h) = viewport.center();
        let center_x = half_w / self.scale + self.x;
        let center_y = half_h / self.scale + self.y;

        self.translate(-center_x, -center_y);
        self.scale *= factor;
        self.translate(center_x, center_y);

        self.translation_factor /= factor;
        true
    }

    /// Return scale and offset to their baseline values.
    pub fn reset(&mut self, policy: ResetPolicy) {
        let baseline = Self::default();
        self.x = baseline.x;
        self.y = baseline.y;
        self.scale = baseline.scale;
        if policy == ResetPolicy::RestoreTranslationFactor {
            self.translation_factor = baseline.translation_factor;
        }
    }

    /// Project a world position to screen pixels.
    pub fn world_to_screen(&self, position: &Vector3, viewport: &Viewport) -> (f64, f64) {
        let (cx, cy) = viewport.center();
        (
            (position.x as f64 - self.x) * self.scale + cx,
            (position.y as f64 - self.y) * self.scale + cy,
        )
    }

    /// Inverse of [`world_to_screen`](Self::world_to_screen), ignoring Z.
    pub fn screen_to_world(&self, sx: f64, sy: f64, viewport: &Viewport) -> (f64, f64) {
        let (cx, cy) = viewport.center();
        ((sx - cx) / self.scale + self.x, (sy - cy) / self.scale + self.y)
    }

    /// `true` near the startup view, where a full-screen backdrop lines up
    /// with the star field.
    pub fn shows_background(&self) -> bool {
        self.scale > 0.45 && self.scale < 0.55 && self.x.abs() < 1.0 && self.y.abs() < 1.0
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new(0.0, 0.0, Self::DEFAULT_SCALE, Self::DEFAULT_TRANSLATION_FACTOR)
    }
}
