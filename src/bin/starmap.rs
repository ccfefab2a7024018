use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use starmap::{
    load_catalog_from_file, write_stars_csv_to_file, Centering, Frame, LandmarkSet, LineInput,
    PlannerConfig, RenderPlanner, Renderer, ResetPolicy, Session, StarClass, Viewport,
    DEFAULT_RECORD_COUNT,
};

#[derive(Parser)]
#[command(name = "starmap")]
#[command(about = "Decode binary star catalogs and explore them as a pannable, zoomable map")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CatalogArgs {
    /// Path to the binary catalog
    #[arg(default_value = "stars.bin")]
    catalog: PathBuf,
    /// Number of records in the catalog
    #[arg(long, default_value_t = DEFAULT_RECORD_COUNT)]
    count: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Explore the map; commands are read from stdin, one per line
    View {
        #[command(flatten)]
        catalog: CatalogArgs,
        /// Viewport width in pixels
        #[arg(long, default_value_t = 800)]
        width: u32,
        /// Viewport height in pixels
        #[arg(long, default_value_t = 800)]
        height: u32,
        /// Center both axes on half the width, like the legacy viewer
        #[arg(long)]
        legacy_centering: bool,
        /// Keep the zoomed pan speed when the view is reset
        #[arg(long)]
        keep_pan_speed_on_reset: bool,
        /// Landmark star names (repeatable); defaults to the reference set
        #[arg(long = "landmark")]
        landmarks: Vec<String>,
        /// Write each frame to this PNG file
        #[cfg(feature = "image")]
        #[arg(long)]
        snapshot: Option<PathBuf>,
        /// Backdrop image shown at the startup view
        #[cfg(feature = "image")]
        #[arg(long)]
        background: Option<PathBuf>,
    },
    /// Export the catalog as CSV
    ExportCsv {
        #[command(flatten)]
        catalog: CatalogArgs,
        /// Output CSV file
        #[arg(long, default_value = "stars.csv")]
        output: PathBuf,
    },
    /// Print catalog statistics
    Info {
        #[command(flatten)]
        catalog: CatalogArgs,
    },
}

/// Prints the HUD of every frame and optionally rasterizes it.
struct ConsoleRenderer {
    #[cfg(feature = "image")]
    raster: Option<starmap::raster::RasterRenderer>,
}

impl Renderer for ConsoleRenderer {
    fn present(&mut self, frame: &Frame<'_>) -> anyhow::Result<()> {
        #[cfg(feature = "image")]
        if let Some(raster) = self.raster.as_mut() {
            raster.present(frame)?;
        }

        let mut out = std::io::stdout().lock();
        for line in &frame.hud {
            writeln!(out, "{}", line)?;
        }
        writeln!(
            out,
            "{} stars drawn, {} landmarks",
            frame.items.len(),
            frame.landmarks().len()
        )?;
        for item in frame.landmarks() {
            writeln!(out, "  {} at ({:.0}, {:.0})", item.star.name, item.x, item.y)?;
        }
        out.flush()?;
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::View {
            catalog,
            width,
            height,
            legacy_centering,
            keep_pan_speed_on_reset,
            landmarks,
            #[cfg(feature = "image")]
            snapshot,
            #[cfg(feature = "image")]
            background,
        } => {
            let stars = load_catalog_from_file(&catalog.catalog, catalog.count)?;

            let centering = if legacy_centering {
                Centering::LegacyWidth
            } else {
                Centering::Independent
            };
            let viewport = Viewport::new(width, height).with_centering(centering);
            let landmarks = if landmarks.is_empty() {
                LandmarkSet::reference()
            } else {
                LandmarkSet::from_names(landmarks)
            };
            let planner = RenderPlanner::new(PlannerConfig {
                viewport,
                landmarks,
                ..Default::default()
            });
            let reset_policy = if keep_pan_speed_on_reset {
                ResetPolicy::KeepTranslationFactor
            } else {
                ResetPolicy::RestoreTranslationFactor
            };

            #[cfg(feature = "image")]
            let raster = match (snapshot, background) {
                (None, None) => None,
                (snapshot, background) => {
                    let mut r = starmap::raster::RasterRenderer::new(&viewport);
                    if let Some(bg) = background {
                        r = r.with_backdrop(bg)?;
                    }
                    if let Some(path) = snapshot {
                        r = r.with_snapshot(path);
                    }
                    Some(r)
                }
            };
            let mut renderer = ConsoleRenderer {
                #[cfg(feature = "image")]
                raster,
            };

            let mut input = LineInput::new(std::io::stdin().lock());
            Session::new(stars, planner)
                .with_reset_policy(reset_policy)
                .run(&mut input, &mut renderer)?;
        }
        Commands::ExportCsv { catalog, output } => {
            let stars = load_catalog_from_file(&catalog.catalog, catalog.count)?;
            write_stars_csv_to_file(&stars, &output)
                .with_context(|| format!("Exporting {:?}", catalog.catalog))?;
        }
        Commands::Info { catalog } => {
            let stars = load_catalog_from_file(&catalog.catalog, catalog.count)?;
            print_info(&stars);
        }
    }

    info!("Done");
    Ok(())
}

fn print_info(stars: &[starmap::StarRecord]) {
    println!("Stars: {}", stars.len());
    if stars.is_empty() {
        return;
    }

    let mut min = stars[0].position;
    let mut max = stars[0].position;
    let mut by_type: BTreeMap<u32, usize> = BTreeMap::new();
    let mut planets = 0u64;
    for s in stars {
        min = min.inf(&s.position);
        max = max.sup(&s.position);
        *by_type.entry(s.star_type).or_default() += 1;
        planets += s.planet_count as u64;
    }

    println!(
        "Bounds: x [{:.1}, {:.1}]  y [{:.1}, {:.1}]  z [{:.1}, {:.1}]",
        min.x, max.x, min.y, max.y, min.z, max.z
    );
    println!("Planets: {}", planets);
    println!("Types:");
    for (code, n) in by_type {
        match StarClass::from_code(code) {
            Some(class) => println!("  {:>3} {:<20} {}", code, format!("{:?}", class), n),
            None => println!("  {:>3} {:<20} {}", code, "unknown", n),
        }
    }
}
