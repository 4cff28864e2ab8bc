use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use log::{error, info};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs::{self, OpenOptions},
    io::{self, stdin},
    path::{Path, PathBuf},
};

use spotter::{
    app_dirs::AppDirs,
    clock::SystemClock,
    config::{ConfigStore, FileConfigStore, GameConfig},
    devices::Stage,
    runtime::{CrosstermEventSource, FixedTicker, Runner},
    session::{GameSession, StepOutcome},
    ui::{audio::TimedAudio, route_keys, stage::TerminalStage},
};

const DEFAULT_FPS: u32 = 20;
const NUDGE_PX: i32 = 5;

/// hit-the-spot tracking minigame in your terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Calibrate your object size, then steer the tracked object into each randomly placed target as fast as you can."
)]
pub struct Cli {
    /// object class the tracker follows
    #[clap(long = "class")]
    class_to_detect: Option<String>,

    /// per-corner tolerance in pixels for a hit
    #[clap(short = 't', long)]
    threshold: Option<u32>,

    /// hits needed to complete a level
    #[clap(short = 'r', long)]
    reps: Option<u32>,

    /// seconds the object must stay tracked while calibrating
    #[clap(long)]
    calibration_secs: Option<f64>,

    /// countdown length before play
    #[clap(long)]
    countdown_secs: Option<u64>,

    /// size in pixels of the simulated object
    #[clap(long)]
    object_size: Option<u32>,

    /// seed for target placement
    #[clap(long)]
    seed: Option<u64>,

    /// frames per second
    #[clap(long, default_value_t = DEFAULT_FPS)]
    fps: u32,

    /// do not ring the terminal bell on hits
    #[clap(long)]
    no_bell: bool,

    /// config file to read instead of the default location
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// write the effective settings back to the config file
    #[clap(long)]
    save_config: bool,

    /// log file (level from RUST_LOG, default info)
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Flags given on the command line win over the config file
    fn apply(&self, cfg: &mut GameConfig) {
        if let Some(class) = &self.class_to_detect {
            cfg.class_to_detect = class.clone();
        }
        if let Some(threshold) = self.threshold {
            cfg.tracking_threshold_px = threshold;
        }
        if let Some(reps) = self.reps {
            cfg.max_rep = reps;
        }
        if let Some(secs) = self.calibration_secs {
            cfg.calibration_window_secs = secs;
        }
        if let Some(secs) = self.countdown_secs {
            cfg.countdown_secs = secs;
        }
        if let Some(size) = self.object_size {
            cfg.object_size_px = size;
        }
        if self.seed.is_some() {
            cfg.seed = self.seed;
        }
        if self.no_bell {
            cfg.bell = false;
        }
    }

    fn config_store(&self) -> FileConfigStore {
        self.config
            .as_ref()
            .map(FileConfigStore::with_path)
            .unwrap_or_default()
    }
}

fn init_logging(path: Option<&Path>) -> io::Result<()> {
    // stderr belongs to the TUI, so logs go to a file or nowhere
    let Some(path) = path.map(Path::to_path_buf).or_else(AppDirs::log_path) else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = cli.config_store();
    let mut config = store.load();
    cli.apply(&mut config);
    if let Err(e) = config.validate() {
        Cli::command().error(ErrorKind::InvalidValue, e).exit();
    }

    init_logging(cli.log_file.as_deref())?;
    if cli.save_config {
        store.save(&config)?;
        info!("saved config to {}", store.path().display());
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_game(&mut terminal, &config, cli.fps);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!("session aborted: {e}");
    }
    result
}

fn run_game<B: Backend>(
    terminal: &mut Terminal<B>,
    config: &GameConfig,
    fps: u32,
) -> Result<(), Box<dyn Error>> {
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = GameSession::from_config(config, SystemClock, rng);
    let mut stage = TerminalStage::new(
        config.bounds(),
        config.class_to_detect.clone(),
        config.object_size_px,
    );
    let mut audio = TimedAudio::from_config(config, SystemClock);
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::from_fps(fps));
    info!(
        "session started: tracking {:?}, {} reps",
        session.class_to_detect(),
        config.max_rep
    );

    let result: Result<(), Box<dyn Error>> = loop {
        let mut events = vec![runner.step()];
        events.extend(runner.drain());
        let input = route_keys(&events, &mut stage, NUDGE_PX);

        match session.step(input, &mut stage, &mut audio) {
            Ok(StepOutcome::Continue) => {}
            Ok(StepOutcome::Exit) => break Ok(()),
            Err(e) => break Err(e.into()),
        }
        if let Err(e) = terminal.draw(|f| f.render_widget(&stage, f.area())) {
            break Err(e.into());
        }
    };

    stage.shutdown();
    result
}
