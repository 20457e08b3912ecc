//! wavecraft CLI: renders a backing track and song blueprint from a JSON
//! music request (SPEC_FULL.md §6.1).

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use wavecraft_engine::plan;
use wavecraft_engine::render;
use wavecraft_engine::{blueprint, MusicRequest};

#[derive(Parser)]
#[command(name = "wavecraft", about = "Deterministic procedural backing-track engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Renders a backing track and blueprint from a JSON request file.
    Render {
        /// Path to a JSON-encoded MusicRequest.
        #[arg(long)]
        request: PathBuf,
        /// Output directory for the rendered WAV (default: $WAVECRAFT_AUDIO_DIR or ./static/audio/music).
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Pretty-print the blueprint JSON printed to stdout.
        #[arg(long)]
        pretty: bool,
    },
}

fn audio_dir(cli_out_dir: Option<PathBuf>) -> PathBuf {
    cli_out_dir
        .or_else(|| std::env::var("WAVECRAFT_AUDIO_DIR").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("static/audio/music"))
}

fn run_render(request_path: &Path, out_dir: Option<PathBuf>, pretty: bool) -> anyhow::Result<()> {
    log::info!("reading request from {}", request_path.display());
    let raw = fs::read_to_string(request_path)?;
    let request: MusicRequest = serde_json::from_str(&raw)?;
    request.validate()?;

    let built_plan = plan::build_plan(&request);
    let refiner = plan::select_refiner();
    let refined_plan = {
        use plan::PlanRefiner;
        refiner.refine(&request, built_plan)
    };
    log::debug!("plan summary: {}", refined_plan.summary);

    let audio = render::render(&refined_plan, &request.canonical_bytes());
    let mut song_blueprint = blueprint::assemble(&refined_plan, &request);

    let dir = audio_dir(out_dir);
    fs::create_dir_all(&dir)?;
    let final_path = dir.join(format!("track-{}.wav", song_blueprint.track_id));
    let tmp_path = dir.join(format!(".track-{}.wav.tmp", song_blueprint.track_id));

    {
        let mut tmp_file = fs::File::create(&tmp_path)?;
        tmp_file.write_all(&audio.wav_bytes)?;
        tmp_file.sync_all()?;
    }
    fs::rename(&tmp_path, &final_path)?;
    song_blueprint.audio_url = Some(final_path.display().to_string());
    log::info!("wrote {} ({:.1}s)", final_path.display(), audio.duration_seconds);

    let output = serde_json::json!({
        "track_id": song_blueprint.track_id,
        "title": song_blueprint.title,
        "hook": song_blueprint.hook,
        "chorus": song_blueprint.chorus,
        "tempo_bpm": song_blueprint.tempo_bpm,
        "mood": song_blueprint.mood,
        "sections": song_blueprint.sections.iter().map(|s| serde_json::json!({
            "name": s.name,
            "bars": s.bars,
            "description": s.description,
            "lyrics": s.lyrics,
        })).collect::<Vec<_>>(),
        "vocal_style": {
            "gender": song_blueprint.vocal_style.gender,
            "tone": song_blueprint.vocal_style.tone,
            "energy": song_blueprint.vocal_style.energy,
        },
        "audio_url": song_blueprint.audio_url,
        "duration_seconds": audio.duration_seconds,
        "sample_rate": audio.sample_rate,
        "pcm_hash": audio.pcm_hash,
    });

    let rendered = if pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{rendered}");

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render { request, out_dir, pretty } => run_render(&request, out_dir, pretty),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
