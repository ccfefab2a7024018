//! # starmap
//!
//! Decoder and render planner for a fixed-layout binary catalog of stellar
//! records, drawn as an interactively pannable, zoomable 2D map.
//!
//! The crate has two pieces of real logic:
//!
//! - **Catalog decoding**: walks the fixed-offset record layout (including a
//!   variable-length UTF-16 name) and produces an ordered list of
//!   [`StarRecord`]s. Loading is all-or-nothing.
//! - **Render planning**: maps world coordinates to screen coordinates under a
//!   mutable pan/zoom [`ViewTransform`], culls stars outside the [`Viewport`],
//!   picks a level-of-detail tier per star and emits a [`Frame`] in which
//!   landmark stars are always drawn last.
//!
//! Drawing primitives and the platform event loop stay outside the crate,
//! behind the [`Renderer`] and [`InputSource`] traits. A [`Session`] wires the
//! two together.
//!
//! ## Example
//!
//! ```no_run
//! use starmap::{load_catalog_from_file, RenderPlanner, PlannerConfig, ViewTransform, Viewport};
//!
//! let stars = load_catalog_from_file("stars.bin", starmap::DEFAULT_RECORD_COUNT).unwrap();
//! let planner = RenderPlanner::new(PlannerConfig::default());
//!
//! let mut view = ViewTransform::default();
//! view.zoom_at_center(1.1, &planner.config().viewport);
//! view.translate(1.0, 0.0);
//!
//! let frame = planner.plan(&stars, &view);
//! println!("{} stars on screen", frame.items.len());
//! ```
//!
//! ## Features
//!
//! - **`image`**: enables [`raster::RasterRenderer`], which rasterizes frames into
//!   an RGB buffer and can write PNG snapshots.

/// Catalog readers and writers; the binary record format & CSV export
pub mod catalogs;
mod error;
pub mod input;
pub mod landmarks;
pub mod palette;
pub mod planner;
#[cfg(feature = "image")]
pub mod raster;
pub mod session;
pub mod star;
pub mod view;

pub use catalogs::binary::{
    decode_catalog, encode_catalog, encode_record, load_catalog_from_file, DEFAULT_RECORD_COUNT,
};
pub use catalogs::csv_export::{write_stars_csv, write_stars_csv_to_file};
pub use error::*;
pub use input::{Command, Controls, InputEvent, InputSource, Key, LineInput, ScriptedInput};
pub use landmarks::{Landmark, LandmarkSet};
pub use palette::{ColorPair, Rgb, StarClass};
pub use planner::{DrawItem, Frame, Label, LodThresholds, LodTier, Marker, PlannerConfig, RenderPlanner};
pub use session::{Renderer, Session};
pub use star::*;
pub use view::{Centering, ResetPolicy, ViewTransform, Viewport};

// Star positions are stored in single precision, as in the catalog file.
// View math runs in f64.
pub type Vector3 = nalgebra::Vector3<f32>;
