mod logging;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use milton::replay::{read_jsonl_frames, replay_frames};
use milton::{MiltonConfig, MiltonState};

#[derive(Parser)]
#[command(author, version, about = "Replay milton input frames and save the raster as PNG")]
struct Arguments {
    /// JSON-lines file with one input frame per line.
    #[arg(long, short = 's', value_parser)]
    script: PathBuf,
    /// PNG file to write.
    #[arg(long, short = 'o', value_parser, default_value = "milton.png")]
    output: PathBuf,
    /// Optional JSON config; omitted fields use defaults.
    #[arg(long, value_parser)]
    config: Option<PathBuf>,
    /// Visible screen width.
    #[arg(long, default_value_t = 1280)]
    width: u32,
    /// Visible screen height.
    #[arg(long, default_value_t = 720)]
    height: u32,
    /// Debug logging, `RUST_LOG` is honored.
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let arguments = Arguments::parse();
    logging::init(arguments.verbose);

    let config = match &arguments.config {
        Some(path) => MiltonConfig::load(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => MiltonConfig::default(),
    };
    let mut state = MiltonState::new(config).context("initialize milton state")?;
    state
        .set_screen_size(arguments.width, arguments.height)
        .with_context(|| format!("set screen size {}x{}", arguments.width, arguments.height))?;

    let script = File::open(&arguments.script)
        .with_context(|| format!("open script {}", arguments.script.display()))?;
    let frames = read_jsonl_frames(&mut BufReader::new(script))
        .with_context(|| format!("read script {}", arguments.script.display()))?;
    let summary = replay_frames(&mut state, &frames).context("replay input frames")?;
    tracing::info!(
        "[milton] replayed frames={} rejected={} strokes={} live_points={} view_scale={}",
        summary.frames,
        summary.rejected_frames,
        summary.stored_strokes,
        summary.live_points,
        state.view().view_scale()
    );

    let rgba = state.raster().visible_rgba8(state.view().screen_size());
    image::save_buffer(
        &arguments.output,
        &rgba,
        arguments.width,
        arguments.height,
        image::ColorType::Rgba8,
    )
    .with_context(|| format!("write image {}", arguments.output.display()))?;
    println!(
        "wrote {} ({}x{}, {} strokes)",
        arguments.output.display(),
        arguments.width,
        arguments.height,
        summary.stored_strokes
    );
    Ok(())
}
