//! Last War headless runner
//!
//! Drives the simulation with a fixed-timestep accumulator, the way a
//! frame-driven host would, and prints the run summary as JSON.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::{SystemTime, UNIX_EPOCH};

    use anyhow::{Context, Result};
    use clap::Parser;
    use serde::Serialize;

    use last_war::consts::*;
    use last_war::sim::{GameEvent, GameOverSummary, GameState, GameStatus, TickInput, tick};
    use last_war::tuning::Tuning;
    use last_war::ui::HudSnapshot;

    #[derive(Parser, Debug)]
    #[command(name = "last-war")]
    #[command(about = "Run a headless Last War session and print its summary")]
    pub struct Cli {
        /// Run seed (defaults to the current time)
        #[arg(long)]
        seed: Option<u64>,
        /// Wall-clock seconds of play to simulate
        #[arg(long, default_value_t = 180.0)]
        seconds: f32,
        /// Balance overrides as JSON
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// Leave the player unattended instead of using the autopilot
        #[arg(long)]
        manual: bool,
        /// Simulated frame length in milliseconds
        #[arg(long, default_value_t = 16.0)]
        frame_ms: f32,
        /// Seconds between HUD log lines
        #[arg(long, default_value_t = 10.0)]
        hud_every: f32,
    }

    #[derive(Serialize)]
    struct RunReport {
        seed: u64,
        status: GameStatus,
        summary: GameOverSummary,
        hud: HudSnapshot,
        bosses_defeated: u32,
        power_ups_collected: u32,
    }

    struct Runner {
        state: GameState,
        accumulator: f32,
        input: TickInput,
        bosses_defeated: u32,
        power_ups_collected: u32,
    }

    impl Runner {
        fn new(seed: u64, tuning: Arc<Tuning>, idle_mode: bool) -> Result<Self> {
            Ok(Self {
                state: GameState::new(seed, tuning).context("building the run")?,
                accumulator: 0.0,
                input: TickInput {
                    idle_mode,
                    ..Default::default()
                },
                bosses_defeated: 0,
                power_ups_collected: 0,
            })
        }

        /// Run simulation ticks for one frame
        fn update(&mut self, frame_ms: f32) {
            self.accumulator += frame_ms.min(100.0);

            let mut substeps = 0;
            while self.accumulator >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
                tick(&mut self.state, &self.input, SIM_DT_MS);
                self.accumulator -= SIM_DT_MS;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.pause = false;
            }

            for event in self.state.drain_events() {
                match event {
                    GameEvent::BossDefeated { .. } => self.bosses_defeated += 1,
                    GameEvent::PowerUpActivated { .. } => self.power_ups_collected += 1,
                    GameEvent::Combo => log::info!("Combo: triple shot + big bullets"),
                    _ => {}
                }
            }
        }

        fn log_hud(&self) {
            let hud = HudSnapshot::capture(&self.state);
            let power_ups: Vec<String> = hud
                .active_power_ups
                .iter()
                .map(|p| format!("{} {}s", p.icon, p.seconds_remaining))
                .collect();
            log::info!(
                "[{}] wave {} army {}/{} score {} {}",
                hud.elapsed,
                hud.wave,
                hud.army,
                hud.army_cap,
                hud.score,
                power_ups.join(" ")
            );
        }

        fn report(&self) -> RunReport {
            RunReport {
                seed: self.state.seed,
                status: self.state.status,
                summary: self.state.summary(),
                hud: HudSnapshot::capture(&self.state),
                bosses_defeated: self.bosses_defeated,
                power_ups_collected: self.power_ups_collected,
            }
        }
    }

    fn default_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }

    pub fn run() -> Result<()> {
        let cli = Cli::parse();

        let tuning = match &cli.tuning {
            Some(path) => Tuning::load(path)
                .with_context(|| format!("loading tuning from {}", path.display()))?,
            None => Tuning::default(),
        };
        let seed = cli.seed.unwrap_or_else(default_seed);
        log::info!("Last War (headless) starting, seed {}", seed);

        let mut runner = Runner::new(seed, Arc::new(tuning), !cli.manual)?;
        let frame_ms = cli.frame_ms.max(1.0);
        let frames = (cli.seconds.max(0.0) * 1000.0 / frame_ms).ceil() as u64;
        let hud_every_frames = ((cli.hud_every.max(0.1) * 1000.0) / frame_ms).ceil() as u64;

        for frame in 1..=frames {
            runner.update(frame_ms);
            if frame % hud_every_frames == 0 {
                runner.log_hud();
            }
            if runner.state.is_over() {
                break;
            }
        }

        let report = runner.report();
        println!("{}", serde_json::to_string_pretty(&report)?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is embedded by a web host; there is no wasm entry point here
}
