//! Per-frame render planning.
//!
//! Given the catalog and the current [`ViewTransform`], the planner decides
//! which stars are on screen, where, in which colors, at which level of
//! detail, and in what order. It draws nothing itself; the resulting
//! [`Frame`] is handed to a [`Renderer`](crate::Renderer).
//!
//! # Draw order
//!
//! 1. Ordinary stars, in catalog order.
//! 2. Landmark stars, in catalog order among themselves.
//!
//! Landmarks are never part of the first pass, so they end up on top no
//! matter where they sit in the catalog.
//!
//! # Level of detail
//!
//! | scale     | primary                      | secondary (binaries) | label |
//! |-----------|------------------------------|----------------------|-------|
//! | < 8       | single pixel                 | no                   | no    |
//! | [8, 16)   | disc, radius `⌊scale / 8⌋`   | no                   | no    |
//! | [16, 32)  | disc                         | disc, 6 px left      | no    |
//! | ≥ 32      | disc                         | yes                  | yes   |
//!
//! Below the label threshold, landmarks get a forced marker and label so they
//! stay visible at every zoom level.

use tracing::debug;

use crate::palette::{colors_for, ColorPair, Rgb};
use crate::{LandmarkSet, StarRecord, ViewTransform, Viewport};

/// Rendering fidelity selected from the current scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LodTier {
    /// One pixel in the primary color.
    Pixel,
    /// Filled primary disc.
    Disc,
    /// Primary disc plus an offset secondary disc for binary systems.
    Binary,
    /// As `Binary`, plus the star name.
    Labeled,
}

/// Scale thresholds between LOD tiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LodThresholds {
    pub disc: f64,
    pub secondary: f64,
    pub label: f64,
}

impl LodThresholds {
    pub fn tier(&self, scale: f64) -> LodTier {
        if scale >= self.label {
            LodTier::Labeled
        } else if scale >= self.secondary {
            LodTier::Binary
        } else if scale >= self.disc {
            LodTier::Disc
        } else {
            LodTier::Pixel
        }
    }

    /// Disc radius in pixels; grows by one for every `disc` units of scale.
    pub fn disc_radius(&self, scale: f64) -> u32 {
        (scale / self.disc).floor().max(0.0) as u32
    }
}

impl Default for LodThresholds {
    fn default() -> Self {
        Self {
            disc: 8.0,
            secondary: 16.0,
            label: 32.0,
        }
    }
}

/// Parameters controlling frame planning.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub viewport: Viewport,
    pub landmarks: LandmarkSet,
    pub lod: LodThresholds,
    /// Horizontal offset of the secondary disc, in pixels (drawn to the left).
    /// Default 6.
    pub secondary_offset_px: f64,
    /// Font size of forced landmark labels. Default 14.
    pub marker_font_px: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            landmarks: LandmarkSet::reference(),
            lod: LodThresholds::default(),
            secondary_offset_px: 6.0,
            marker_font_px: 14,
        }
    }
}

/// Text to draw with its top-left corner at `(x, y)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Label<'a> {
    pub text: &'a str,
    pub x: f64,
    pub y: f64,
    pub font_px: u32,
    pub color: Rgb,
}

/// Forced landmark marker: a disc plus a label to its lower right.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker<'a> {
    pub radius: u32,
    pub color: Rgb,
    pub label: Label<'a>,
}

/// Everything a renderer needs to draw one star.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem<'a> {
    /// Index into the catalog slice the frame was planned from.
    pub index: usize,
    pub star: &'a StarRecord,
    /// Screen position in pixels.
    pub x: f64,
    pub y: f64,
    pub colors: ColorPair,
    pub tier: LodTier,
    /// Primary disc radius; 0 for [`LodTier::Pixel`].
    pub radius: u32,
    /// Center of the secondary disc, when one is drawn.
    pub secondary: Option<(f64, f64)>,
    pub label: Option<Label<'a>>,
    pub marker: Option<Marker<'a>>,
    pub landmark: bool,
}

/// Ordered draw list plus the on-screen status text.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<'a> {
    pub items: Vec<DrawItem<'a>>,
    /// Number of leading items that belong to the ordinary pass.
    pub ordinary_len: usize,
    pub hud: Vec<String>,
    /// Whether the backdrop image lines up with the current view.
    pub show_background: bool,
}

impl<'a> Frame<'a> {
    pub fn ordinary(&self) -> &[DrawItem<'a>] {
        &self.items[..self.ordinary_len]
    }

    pub fn landmarks(&self) -> &[DrawItem<'a>] {
        &self.items[self.ordinary_len..]
    }
}

/// Status lines drawn in the top-left corner.
pub fn hud_lines(view: &ViewTransform) -> Vec<String> {
    vec![
        format!(
            "Position: ({:.2}, {:.2})  Zoom: {:.2}x",
            view.x, view.y, view.scale
        ),
        "Prototype".to_string(),
    ]
}

/// Builds [`Frame`]s from a catalog and a view.
#[derive(Debug, Clone, Default)]
pub struct RenderPlanner {
    config: PlannerConfig,
}

impl RenderPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.config.viewport
    }

    /// Plan one frame.
    pub fn plan<'a>(&self, stars: &'a [StarRecord], view: &ViewTransform) -> Frame<'a> {
        debug_assert!(
            view.scale.is_finite() && view.scale > 0.0,
            "view scale must be positive, got {}",
            view.scale
        );

        let mut items = Vec::new();
        let mut deferred = Vec::new();
        for (index, star) in stars.iter().enumerate() {
            if self.config.landmarks.contains(&star.name) {
                deferred.push(index);
            } else if let Some(item) = self.plan_star(index, star, view) {
                items.push(item);
            }
        }
        let ordinary_len = items.len();

        items.extend(
            deferred
                .into_iter()
                .filter_map(|index| self.plan_star(index, &stars[index], view)),
        );

        debug!(
            "Planned {} of {} stars ({} landmarks) at scale {:.3}",
            items.len(),
            stars.len(),
            items.len() - ordinary_len,
            view.scale
        );

        Frame {
            items,
            ordinary_len,
            hud: hud_lines(view),
            show_background: view.shows_background(),
        }
    }

    /// Plan a single star, or `None` when it falls outside the viewport.
    pub fn plan_star<'a>(
        &self,
        index: usize,
        star: &'a StarRecord,
        view: &ViewTransform,
    ) -> Option<DrawItem<'a>> {
        let viewport = &self.config.viewport;
        let (x, y) = view.world_to_screen(&star.position, viewport);
        if !viewport.contains(x, y) {
            return None;
        }

        let lod = &self.config.lod;
        let colors = colors_for(star.star_type);
        let tier = lod.tier(view.scale);
        let radius = match tier {
            LodTier::Pixel => 0,
            _ => lod.disc_radius(view.scale),
        };

        let secondary = (tier >= LodTier::Binary && star.is_binary())
            .then(|| (x - self.config.secondary_offset_px, y));

        let label = (tier == LodTier::Labeled).then(|| Label {
            text: star.name.as_str(),
            x,
            y,
            font_px: (4.0 * view.scale / 10.0) as u32,
            color: Rgb::WHITE,
        });

        let landmark = self.config.landmarks.get(&star.name);
        let marker = landmark
            .filter(|_| tier != LodTier::Labeled)
            .map(|lm| {
                let color = lm.marker_color.unwrap_or(colors.primary);
                let offset = lm.marker_radius as f64;
                Marker {
                    radius: lm.marker_radius,
                    color,
                    label: Label {
                        text: star.name.as_str(),
                        x: x + offset,
                        y: y + offset,
                        font_px: self.config.marker_font_px,
                        color,
                    },
                }
            });

        Some(DrawItem {
            index,
            star,
            x,
            y,
            colors,
            tier,
            radius,
            secondary,
            label,
            marker,
            landmark: landmark.is_some(),
        })
    }
}
