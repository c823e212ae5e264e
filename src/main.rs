//! Headless keyframe player.
//!
//! Plays a scene export's camera animation against a manual clock and
//! writes one JSON pose record per frame to stdout.
//!
//! ```text
//! showreel <scene.json> [--fps N] [--options preset.toml]
//! ```

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use showreel::camera::{Camera, ControlsHandle, OrbitControls};
use showreel::options::Options;
use showreel::scene::{PlayOutcome, PoseRecord, SceneExport, SceneRenderer, ViewerScene};
use showreel::util::clock::{frame_interval, ManualClock, TimeSource};
use showreel::ShowreelError;

const USAGE: &str = "usage: showreel <scene.json> [--fps N] [--options preset.toml]";

struct Args {
    scene: PathBuf,
    fps: Option<u32>,
    options: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut scene = None;
    let mut fps = None;
    let mut options = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--fps" => {
                let value = args.next().ok_or("--fps needs a value")?;
                fps = Some(
                    value
                        .parse::<u32>()
                        .map_err(|e| format!("bad --fps '{value}': {e}"))?,
                );
            }
            "--options" => {
                options = Some(PathBuf::from(
                    args.next().ok_or("--options needs a path")?,
                ));
            }
            "-h" | "--help" => return Err(USAGE.to_owned()),
            other if other.starts_with("--") => {
                return Err(format!("unknown flag '{other}'\n{USAGE}"));
            }
            _ if scene.is_none() => scene = Some(PathBuf::from(&arg)),
            _ => return Err(format!("unexpected argument '{arg}'\n{USAGE}")),
        }
    }
    Ok(Args {
        scene: scene.ok_or_else(|| USAGE.to_owned())?,
        fps,
        options,
    })
}

/// Writes each rendered frame as a JSON line.
struct PoseWriter<'a, W: Write> {
    out: W,
    clock: &'a ManualClock,
    frame: u64,
    segment: Option<usize>,
    error: Option<io::Error>,
}

impl<W: Write> SceneRenderer for PoseWriter<'_, W> {
    fn render(&mut self, camera: &Camera, controls: &OrbitControls) {
        if self.error.is_some() {
            return;
        }
        let record = PoseRecord::capture(
            self.frame,
            self.clock.elapsed(),
            self.segment,
            camera,
            controls.target(),
        );
        let written = serde_json::to_writer(&mut self.out, &record)
            .map_err(io::Error::from)
            .and_then(|()| writeln!(self.out));
        if let Err(e) = written {
            self.error = Some(e);
        }
        self.frame += 1;
    }
}

fn run(args: &Args) -> Result<u64, ShowreelError> {
    let options = match &args.options {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    let export = SceneExport::load(&args.scene)?;
    export.validate()?;

    let clock = ManualClock::new();
    let step = frame_interval(args.fps.unwrap_or(options.animation.frame_rate));
    let mut viewer = ViewerScene::new(export, &options, clock.now());
    match viewer.play_camera(clock.now()) {
        PlayOutcome::NoAnimation => {
            log::warn!("scene has no camera animation; nothing to play");
            return Ok(0);
        }
        outcome => log::debug!("play_camera: {outcome:?}"),
    }

    let stdout = io::stdout();
    let mut writer = PoseWriter {
        out: BufWriter::new(stdout.lock()),
        clock: &clock,
        frame: 0,
        segment: None,
        error: None,
    };
    loop {
        writer.segment = viewer.animator().current_segment();
        let running = viewer.frame(clock.now(), &mut writer);
        if let Some(e) = writer.error.take() {
            return Err(e.into());
        }
        if !running {
            break;
        }
        clock.advance(step);
    }
    writer.out.flush()?;
    Ok(writer.frame)
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            log::error!("{msg}");
            return ExitCode::from(2);
        }
    };

    match run(&args) {
        Ok(frames) => {
            log::info!("wrote {frames} frames for {}", args.scene.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
