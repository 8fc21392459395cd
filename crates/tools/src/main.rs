use std::fs;
use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use formats::Sequence;
use serde::Serialize;
use tools::{PanoScene, PickResult, build_scene, pick};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use viewer::{OverlayOptions, YawPitch};

/// Projects a pano sequence into overlay geometry as seen from one of its panos.
#[derive(Parser, Debug)]
#[command(name = "trailview", version)]
struct Cli {
    /// Sequence JSON: `{"seqid", "panos"}` or a bare array of panos.
    #[arg(long)]
    sequence: PathBuf,

    /// Pano to stand at; defaults to the first in the sequence.
    #[arg(long)]
    pano: Option<u64>,

    /// Overlay options JSON; flags below override it.
    #[arg(long)]
    options: Option<PathBuf>,

    /// Path ribbon width in metres.
    #[arg(long)]
    width: Option<f64>,

    /// Ground tilt in degrees.
    #[arg(long)]
    ground_tilt: Option<f64>,

    /// Emit the path as per-segment quads instead of one ring.
    #[arg(long)]
    split: bool,

    /// Resolve a click at YAW PITCH (radians) against the scene.
    #[arg(long, num_args = 2, value_names = ["YAW", "PITCH"], allow_negative_numbers = true)]
    pick: Option<Vec<f64>>,
}

#[derive(Serialize)]
struct Output<'a> {
    scene: &'a PanoScene,
    #[serde(skip_serializing_if = "Option::is_none")]
    pick: Option<PickResult>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    let cli = Cli::parse();

    let payload = fs::read_to_string(&cli.sequence)
        .map_err(|e| format!("read {}: {e}", cli.sequence.display()))?;
    let seq = Sequence::from_json_str(&payload).map_err(|e| e.to_string())?;

    let opts = load_options(&cli)?;
    debug!(?opts, "overlay options");

    let panoid = cli.pano.unwrap_or(seq.panos[0].panoid);
    let scene = build_scene(&seq, panoid, &opts).map_err(|e| e.to_string())?;

    let picked = match cli.pick.as_deref() {
        Some([yaw, pitch]) => Some(pick(&scene, &seq, YawPitch::new(*yaw, *pitch))),
        Some(other) => return Err(format!("--pick takes 2 values, got {}", other.len())),
        None => None,
    };

    let out = Output {
        scene: &scene,
        pick: picked,
    };
    let json = serde_json::to_string_pretty(&out).map_err(|e| e.to_string())?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}").map_err(|e| e.to_string())?;
    Ok(())
}

fn load_options(cli: &Cli) -> Result<OverlayOptions, String> {
    let mut opts = match &cli.options {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|e| format!("read {}: {e}", path.display()))?;
            serde_json::from_str(&raw).map_err(|e| format!("parse {}: {e}", path.display()))?
        }
        None => OverlayOptions::default(),
    };
    if let Some(width) = cli.width {
        opts.width = width;
    }
    if let Some(tilt) = cli.ground_tilt {
        opts.ground_tilt_deg = tilt;
    }
    if cli.split {
        opts.split_segments = true;
    }
    Ok(opts)
}
