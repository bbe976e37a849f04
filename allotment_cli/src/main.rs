use allotment::{
    bed_bounding_box, bed_corners, bed_to_world,
    config::PlannerConfig,
    io::{read_plot_json, write_plot_json},
    is_point_in_bed, length_split_sections, normalize_angle, optimal_cut_position,
    snap::{format_dimension, meters_to_pixels, snap_angle},
    validation::validate_plot_document,
    world_to_bed, BedTransform, PlannerError, Point,
};
use anyhow::{anyhow, Context};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "allotment_cli", version, about = "Garden plot placement and bed section planning")]
struct Cli {
    /// Configuration file (defaults to ./allotment.toml when present)
    #[arg(long, global = true)]
    config: Option<String>,
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

/// Bed placement shared by the geometry subcommands.
#[derive(Args, Clone, Copy)]
struct Placement {
    /// World X of the bed's local origin
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    x: f64,
    /// World Y of the bed's local origin
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    y: f64,
    /// Clockwise rotation in degrees
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    rotation: f64,
}

impl Placement {
    fn transform(self) -> BedTransform {
        BedTransform::new(self.x, self.y, self.rotation)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a bed-local point to world coordinates
    ToWorld {
        #[arg(allow_negative_numbers = true)]
        px: f64,
        #[arg(allow_negative_numbers = true)]
        py: f64,
        #[command(flatten)]
        placement: Placement,
    },
    /// Convert a world point to bed-local coordinates
    ToLocal {
        #[arg(allow_negative_numbers = true)]
        px: f64,
        #[arg(allow_negative_numbers = true)]
        py: f64,
        #[command(flatten)]
        placement: Placement,
    },
    /// Print the four world corners of a bed
    Corners {
        width: f64,
        height: f64,
        #[command(flatten)]
        placement: Placement,
        /// Print canvas pixel coordinates instead of metres
        #[arg(long)]
        pixels: bool,
    },
    /// Print the world bounding box of a bed
    Bbox {
        width: f64,
        height: f64,
        #[command(flatten)]
        placement: Placement,
    },
    /// Test whether a world point lies inside a bed
    Contains {
        #[arg(allow_negative_numbers = true)]
        px: f64,
        #[arg(allow_negative_numbers = true)]
        py: f64,
        width: f64,
        height: f64,
        #[command(flatten)]
        placement: Placement,
    },
    /// Reduce an angle to [0, 360)
    NormalizeAngle {
        #[arg(allow_negative_numbers = true)]
        degrees: f64,
    },
    /// Snap a rotation to the configured angle increment
    SnapAngle {
        #[arg(allow_negative_numbers = true)]
        degrees: f64,
    },
    /// List the sections of a bed split at the given cuts
    Sections {
        width: f64,
        height: f64,
        /// Cut positions along the bed length
        #[arg(allow_negative_numbers = true, value_delimiter = ',')]
        cuts: Vec<f64>,
        #[arg(long, default_value = "plan")]
        plan_id: String,
        #[arg(long, default_value = "bed")]
        bed_id: String,
        /// Print sections as JSON
        #[arg(long)]
        json: bool,
    },
    /// Suggest the position of the next cut
    NextCut {
        height: f64,
        #[arg(allow_negative_numbers = true, value_delimiter = ',')]
        cuts: Vec<f64>,
    },
    /// Print the sections of every planned bed in a season of a plot document
    Plan {
        path: String,
        season: String,
        #[arg(long)]
        json: bool,
    },
    /// Validate a plot document and report beds outside the plot boundary
    Check { path: String },
    /// Add the optimal next cut to a bed's plan and rewrite the document
    AddCut {
        path: String,
        season: String,
        bed: String,
        /// Write to this file instead of overwriting the input
        #[arg(long)]
        output: Option<String>,
    },
}

fn load_config(path: Option<&str>) -> anyhow::Result<PlannerConfig> {
    let mut config = match path {
        Some(p) => PlannerConfig::load_from_file(p)
            .with_context(|| format!("reading config {}", p))?,
        None => PlannerConfig::load_or_default()?,
    };
    config.merge_with_env();
    Ok(config)
}

fn print_point(p: Point, precision: usize) {
    println!("{:.*},{:.*}", precision, p.x, precision, p.y);
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let precision = config.display.precision;
    log::debug!("using {:?}", config);

    match cli.command {
        Commands::ToWorld { px, py, placement } => {
            print_point(bed_to_world(Point::new(px, py), &placement.transform()), precision);
        }
        Commands::ToLocal { px, py, placement } => {
            print_point(world_to_bed(Point::new(px, py), &placement.transform()), precision);
        }
        Commands::Corners {
            width,
            height,
            placement,
            pixels,
        } => {
            let scale = config.display.pixels_per_meter;
            for c in bed_corners(width, height, &placement.transform()) {
                if pixels {
                    let px = Point::new(meters_to_pixels(c.x, scale), meters_to_pixels(c.y, scale));
                    print_point(px, 0);
                } else {
                    print_point(c, precision);
                }
            }
        }
        Commands::Bbox {
            width,
            height,
            placement,
        } => {
            let b = bed_bounding_box(width, height, &placement.transform());
            println!(
                "min {:.p$},{:.p$} max {:.p$},{:.p$}",
                b.min_x,
                b.min_y,
                b.max_x,
                b.max_y,
                p = precision
            );
        }
        Commands::Contains {
            px,
            py,
            width,
            height,
            placement,
        } => {
            let inside = is_point_in_bed(Point::new(px, py), width, height, &placement.transform());
            println!("{}", if inside { "inside" } else { "outside" });
        }
        Commands::NormalizeAngle { degrees } => {
            println!("{:.*}", precision, normalize_angle(degrees));
        }
        Commands::SnapAngle { degrees } => {
            let snapped = snap_angle(degrees, config.snap.step_deg, config.snap.threshold_deg);
            println!("{:.*}", precision, snapped);
        }
        Commands::Sections {
            width,
            height,
            cuts,
            plan_id,
            bed_id,
            json,
        } => {
            let sections = length_split_sections(width, height, &cuts, &plan_id, &bed_id);
            if json {
                println!("{}", serde_json::to_string_pretty(&sections)?);
            } else {
                for s in &sections {
                    println!(
                        "{} {:.p$}..{:.p$} ({} m, {} m2)",
                        s.label(),
                        s.bounds_local.x0,
                        s.bounds_local.x1,
                        format_dimension(s.bounds_local.length()),
                        format_dimension(s.bounds_local.area()),
                        p = precision
                    );
                }
            }
        }
        Commands::NextCut { height, cuts } => {
            println!("Next cut: {:.2}", optimal_cut_position(height, &cuts));
        }
        Commands::Plan { path, season, json } => {
            let plot = read_plot_json(&path).with_context(|| format!("reading {}", path))?;
            let per_bed = plot
                .season_sections(&season)
                .ok_or_else(|| PlannerError::UnknownSeason(season.clone()))?;
            if json {
                let sections: Vec<_> = per_bed.iter().flat_map(|(_, s)| s.iter()).collect();
                println!("{}", serde_json::to_string_pretty(&sections)?);
            } else {
                for (bed, sections) in &per_bed {
                    println!("{} ({}) {} m2", bed.name, bed.id, format_dimension(bed.area()));
                    for s in sections {
                        println!(
                            "  {} {:.p$}..{:.p$}",
                            s.label(),
                            s.bounds_local.x0,
                            s.bounds_local.x1,
                            p = precision
                        );
                    }
                }
            }
        }
        Commands::Check { path } => {
            let plot = read_plot_json(&path).with_context(|| format!("reading {}", path))?;
            validate_plot_document(&plot)?;
            let outside = plot.beds_outside_boundary();
            for bed in &outside {
                log::warn!("bed {} extends past the plot boundary", bed.id);
                println!("Outside boundary: {} ({})", bed.name, bed.id);
            }
            if outside.is_empty() {
                println!("OK: {} bed(s) within boundary", plot.beds.len());
            }
        }
        Commands::AddCut {
            path,
            season,
            bed,
            output,
        } => {
            let mut plot = read_plot_json(&path).with_context(|| format!("reading {}", path))?;
            let height = plot
                .bed(&bed)
                .ok_or_else(|| PlannerError::UnknownBed(bed.clone()))?
                .height;
            let plan = plot
                .season_mut(&season)
                .ok_or_else(|| PlannerError::UnknownSeason(season.clone()))?
                .plan_for_bed_mut(&bed)
                .ok_or_else(|| anyhow!("season {} has no section plan for bed {}", season, bed))?;
            plan.definition = plan.definition.with_added_cut(height);
            let cuts = plan.definition.cuts.clone();
            let dest = output.unwrap_or(path);
            write_plot_json(&dest, &plot).with_context(|| format!("writing {}", dest))?;
            println!("Cuts for {}: {:?}", bed, cuts);
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
