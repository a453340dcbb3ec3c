//! Water Swimmer entry point
//!
//! Loads textures, then runs the frame loop: input, fixed-step simulation,
//! draw pass. There is no window here; the whale is driven by the autopilot
//! and each frame is batched into sprite geometry.

mod game {
    use std::process::ExitCode;
    use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

    use water_swimmer::input::{KeyState, apply_input, autopilot};
    use water_swimmer::renderer::{SpriteBatch, render_scene};
    use water_swimmer::sim::{FixedClock, GameEvent, GameState, tick};
    use water_swimmer::{Settings, Textures};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        clock: FixedClock,
        batch: SpriteBatch,
        frames: u64,
        /// Frames presented since the run ended
        linger: u64,
    }

    impl Game {
        fn new(seed: u64, textures: &Textures, settings: &Settings) -> Self {
            Self {
                state: GameState::new(seed, textures),
                clock: FixedClock::new(water_swimmer::consts::SIM_DT, settings.max_substeps),
                batch: SpriteBatch::new(),
                frames: 0,
                linger: 0,
            }
        }

        /// Run one frame at wall time `now`. Returns false on quit.
        fn frame(&mut self, now: f32, keys: &KeyState) -> bool {
            if !apply_input(&mut self.state, keys) {
                log::info!("Quit requested");
                return false;
            }

            let steps = self.clock.advance(now);
            for _ in 0..steps.steps {
                tick(&mut self.state, self.clock.step());
            }
            self.report_events();

            self.batch.clear();
            render_scene(&self.state, &mut self.batch);

            self.frames += 1;
            if self.state.outcome().is_terminal() {
                self.linger += 1;
            }
            if self.frames % 600 == 0 {
                log::debug!(
                    "Frame {}: {} draws, {} bytes of vertices",
                    self.frames,
                    self.batch.draws().len(),
                    self.batch.as_bytes().len()
                );
            }
            true
        }

        fn report_events(&mut self) {
            for event in self.state.drain_events() {
                match event {
                    GameEvent::FoodConsumed { .. } => log::info!(
                        "Krill eaten ({}/{})",
                        self.state.progress.food_eaten(),
                        self.state.progress.food_total()
                    ),
                    GameEvent::BellyFilled => log::info!("Belly full - find the way out!"),
                    GameEvent::Won => log::info!("You escaped!"),
                    GameEvent::Lost { cause } => log::info!("Game over: {:?}", cause),
                    GameEvent::HazardContact { .. } | GameEvent::EscapeReached => {}
                }
            }
        }

        fn done(&self, settings: &Settings) -> bool {
            let out_of_frames = settings.max_frames.is_some_and(|max| self.frames >= max);
            out_of_frames || self.linger >= settings.linger_frames
        }
    }

    fn seed_from_clock() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }

    pub fn run() -> ExitCode {
        log::info!("Water Swimmer starting...");
        let settings = Settings::load();

        let textures = match Textures::load(&settings.asset_dir) {
            Ok(textures) => textures,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        };

        let seed = settings.seed.unwrap_or_else(seed_from_clock);
        let mut game = Game::new(seed, &textures, &settings);
        let frame_time = Duration::from_secs_f32(settings.frame_seconds());

        let start = Instant::now();
        game.clock.reset(0.0);
        loop {
            let keys = autopilot(&game.state);
            if !game.frame(start.elapsed().as_secs_f32(), &keys) || game.done(&settings) {
                break;
            }
            std::thread::sleep(frame_time);
        }

        log::info!(
            "Shutting down after {} frames ({:?})",
            game.frames,
            game.state.outcome()
        );
        ExitCode::SUCCESS
    }

}

fn main() -> std::process::ExitCode {
    env_logger::init();
    game::run()
}
