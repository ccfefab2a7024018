//! Software rasterizer for planned frames.
//!
//! Requires the `image` feature.
//!
//! Draws discs and pixels into an [`RgbImage`] the size of the viewport and
//! optionally writes each presented frame to a PNG file. Text (labels and
//! the HUD) is not rasterized; there is no font support here.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{imageops, Rgb as Pixel, RgbImage};
use tracing::debug;

use crate::{Frame, Renderer, Rgb, Viewport};

fn pixel(color: Rgb) -> Pixel<u8> {
    Pixel(color.to_array())
}

/// Renderer that draws into an in-memory RGB image.
pub struct RasterRenderer {
    canvas: RgbImage,
    backdrop: Option<RgbImage>,
    snapshot: Option<PathBuf>,
}

impl RasterRenderer {
    pub fn new(viewport: &Viewport) -> Self {
        Self {
            canvas: RgbImage::new(viewport.width, viewport.height),
            backdrop: None,
            snapshot: None,
        }
    }

    /// Image blitted behind the stars when the frame allows it. Scaled to
    /// the canvas size once, here.
    pub fn with_backdrop<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path)
            .with_context(|| format!("Failed to load backdrop image {:?}", path))?
            .to_rgb8();
        self.backdrop = Some(imageops::resize(
            &img,
            self.canvas.width(),
            self.canvas.height(),
            imageops::FilterType::Triangle,
        ));
        Ok(self)
    }

    /// Write every presented frame to this PNG path, overwriting it.
    pub fn with_snapshot<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.snapshot = Some(path.into());
        self
    }

    pub fn canvas(&self) -> &RgbImage {
        &self.canvas
    }

    /// Filled disc, scanning only the part of its bounding box on the canvas.
    fn disc(&mut self, cx: f64, cy: f64, radius: u32, color: Rgb) {
        let (cx, cy) = (cx.round() as i64, cy.round() as i64);
        let r = radius as i64;
        let (w, h) = self.canvas.dimensions();
        let x_range = (cx - r).max(0)..=(cx + r).min(w as i64 - 1);
        let y_range = (cy - r).max(0)..=(cy + r).min(h as i64 - 1);
        let px = pixel(color);
        for y in y_range {
            let dy = y - cy;
            for x in x_range.clone() {
                let dx = x - cx;
                if dx * dx + dy * dy <= r * r {
                    self.canvas.put_pixel(x as u32, y as u32, px);
                }
            }
        }
    }

    fn clear(&mut self, show_background: bool) {
        match (&self.backdrop, show_background) {
            (Some(bg), true) => self.canvas.clone_from(bg),
            _ => self.canvas.pixels_mut().for_each(|p| *p = pixel(Rgb::BLACK)),
        }
    }
}

impl Renderer for RasterRenderer {
    fn present(&mut self, frame: &Frame<'_>) -> Result<()> {
        self.clear(frame.show_background);

        for item in &frame.items {
            // Radius 0 draws the single-pixel tier.
            self.disc(item.x, item.y, item.radius, item.colors.primary);
            if let Some((sx, sy)) = item.secondary {
                self.disc(sx, sy, item.radius, item.colors.secondary);
            }
            if let Some(marker) = &item.marker {
                self.disc(item.x, item.y, marker.radius, marker.color);
            }
        }
        debug!("Rasterized {} items", frame.items.len());

        if let Some(path) = &self.snapshot {
            self.canvas
                .save(path)
                .with_context(|| format!("Failed to write snapshot {:?}", path))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PlannerConfig, RenderPlanner, StarKey, StarRecord, Vector3, ViewTransform};

    fn star(name: &str, x: f32, star_type: u32) -> StarRecord {
        StarRecord {
            key: StarKey::default(),
            name: name.into(),
            aux: [0; 4],
            flags: 0,
            position: Vector3::new(x, 0.0, 0.0),
            star_type,
            planet_count: 0,
        }
    }

    #[test]
    fn draws_pixel_and_binary_discs() {
        let planner = RenderPlanner::new(PlannerConfig {
            viewport: Viewport::new(64, 32),
            ..Default::default()
        });
        let stars = [star("Pair", 0.0, 8)];
        let mut renderer = RasterRenderer::new(planner.viewport());

        renderer
            .present(&planner.plan(&stars, &ViewTransform::new(0.0, 0.0, 1.0, 1.0)))
            .unwrap();
        assert_eq!(renderer.canvas().get_pixel(32, 16), &Pixel([143, 255, 255]));
        assert_eq!(renderer.canvas().get_pixel(33, 16), &Pixel([0, 0, 0]));

        renderer
            .present(&planner.plan(&stars, &ViewTransform::new(0.0, 0.0, 16.0, 1.0)))
            .unwrap();
        // Primary disc of radius 2, secondary 6 px to the left.
        assert_eq!(renderer.canvas().get_pixel(34, 16), &Pixel([143, 255, 255]));
        assert_eq!(renderer.canvas().get_pixel(26, 16), &Pixel([242, 80, 48]));
    }

    #[test]
    fn huge_disc_is_clipped_to_canvas() {
        let mut renderer = RasterRenderer::new(&Viewport::new(64, 32));
        renderer.disc(10.0, 5.0, 50_000_000, Rgb::WHITE);
        assert!(renderer.canvas().pixels().all(|p| *p == Pixel([255, 255, 255])));

        // Centered off the left edge: only the part inside the radius lands.
        let mut renderer = RasterRenderer::new(&Viewport::new(64, 32));
        renderer.disc(-3.0, 16.0, 5, Rgb::WHITE);
        assert_eq!(renderer.canvas().get_pixel(2, 16), &Pixel([255, 255, 255]));
        assert_eq!(renderer.canvas().get_pixel(3, 16), &Pixel([0, 0, 0]));
        assert_eq!(renderer.canvas().get_pixel(0, 20), &Pixel([255, 255, 255]));
        assert_eq!(renderer.canvas().get_pixel(0, 21), &Pixel([0, 0, 0]));
    }

    #[test]
    fn writes_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let planner = RenderPlanner::default();
        let mut renderer = RasterRenderer::new(planner.viewport()).with_snapshot(&path);
        renderer
            .present(&planner.plan(&[star("Sol", 0.0, 4)], &ViewTransform::default()))
            .unwrap();
        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (800, 800));
        // Landmark marker for Sol is white.
        assert_eq!(img.get_pixel(400, 400), &Pixel([255, 255, 255]));
    }
}
