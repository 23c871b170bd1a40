//! Fishbowl entry point
//!
//! Headless frame driver: plays scripted clicks into the scene and prints one
//! JSON geometry snapshot per sampled frame for an external renderer.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::io::{self, BufWriter, Write};
    use std::path::PathBuf;

    use clap::Parser;
    use env_logger::{Builder, Env};
    use log::LevelFilter;

    use fishbowl::sim::{FrameInput, Scene, SceneEvent, tick};
    use fishbowl::{Preset, Settings, Vector2};

    /// A pointer click scheduled for a given frame
    #[derive(Debug, Clone, Copy)]
    pub struct ScriptedClick {
        pub frame: u64,
        pub point: Vector2,
    }

    /// Parse `x,y@frame`
    fn parse_click(s: &str) -> Result<ScriptedClick, String> {
        let (point, frame) = s
            .split_once('@')
            .ok_or_else(|| format!("expected x,y@frame, got '{s}'"))?;
        let (x, y) = point
            .split_once(',')
            .ok_or_else(|| format!("expected x,y before '@', got '{point}'"))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<f64>()
                .map_err(|e| format!("bad coordinate '{v}': {e}"))
        };
        let frame = frame
            .trim()
            .parse::<u64>()
            .map_err(|e| format!("bad frame '{frame}': {e}"))?;
        Ok(ScriptedClick {
            frame,
            point: Vector2::new(parse(x)?, parse(y)?),
        })
    }

    fn parse_preset(s: &str) -> Result<Preset, String> {
        Preset::from_str(s).ok_or_else(|| format!("unknown preset '{s}' (expected fish or eel)"))
    }

    /// Steer a fish around a headless scene
    #[derive(Parser, Debug)]
    #[command(author, version, about, long_about = None)]
    struct Args {
        /// Revision preset to start from
        #[arg(long, default_value = "fish", value_parser = parse_preset)]
        preset: Preset,

        /// JSON settings file (overrides the preset)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the effective settings to this file and exit
        #[arg(long)]
        write_config: Option<PathBuf>,

        /// Wander RNG seed
        #[arg(long)]
        seed: Option<u64>,

        /// Frames to simulate
        #[arg(long, default_value_t = 600)]
        frames: u64,

        /// Emit geometry every N frames
        #[arg(long, default_value_t = 1)]
        every: u64,

        /// Click at x,y on the given frame (repeatable)
        #[arg(long = "click", value_parser = parse_click)]
        clicks: Vec<ScriptedClick>,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    }

    fn init_logging(verbose: bool) {
        let level = if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };
        let env = Env::default().default_filter_or(level.to_string());
        let _ = Builder::from_env(env).try_init();
    }

    fn load_settings(args: &Args) -> Result<Settings, fishbowl::SettingsError> {
        let mut settings = match &args.config {
            Some(path) => Settings::load(path)?,
            None => Settings::from_preset(args.preset),
        };
        if let Some(seed) = args.seed {
            settings.seed = seed;
        }
        Ok(settings)
    }

    fn run(args: &Args, settings: Settings) -> io::Result<()> {
        let mut scene = Scene::new(settings);
        let every = args.every.max(1);
        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());

        let mut fed = 0u32;
        for frame in 0..args.frames {
            let input = FrameInput {
                select: args
                    .clicks
                    .iter()
                    .rev()
                    .find(|c| c.frame == frame)
                    .map(|c| c.point),
                clear: false,
            };

            for event in tick(&mut scene, &input) {
                if let SceneEvent::Fed { .. } = event {
                    fed += 1;
                }
            }

            if frame % every == 0 {
                serde_json::to_writer(&mut out, &scene.geometry())?;
                out.write_all(b"\n")?;
            }
        }
        out.flush()?;

        log::info!(
            "Simulated {} frames, fed {} time(s), final position ({:.1}, {:.1})",
            args.frames,
            fed,
            scene.agent.position.x,
            scene.agent.position.y
        );
        Ok(())
    }

    pub fn main() {
        let args = Args::parse();
        init_logging(args.verbose);
        log::info!("Fishbowl starting ({} preset)", args.preset.as_str());

        let settings = match load_settings(&args) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(2);
            }
        };

        if let Some(path) = &args.write_config {
            if let Err(e) = settings.save(path) {
                log::error!("{e}");
                std::process::exit(2);
            }
            return;
        }

        if let Err(e) = run(&args, settings) {
            log::error!("Failed to write geometry: {e}");
            std::process::exit(1);
        }
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::main();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives the library directly
}
