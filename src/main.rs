//! Ship Mods entry point
//!
//! Loads a ship config and plays a scripted flight through the fixed-step
//! simulation, logging every mod and health event.

use std::collections::VecDeque;
use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use clap::Parser;
use log::{debug, info, warn};

use ship_mods::consts::{MAX_SUBSTEPS, SIM_DT};
use ship_mods::hazards::{ContactDamage, HealthPickup, LaserDamage};
use ship_mods::sim::{
    ActivateOutcome, ActivationInput, ModDirection, ModEvent, ModHandles, ModScheduler,
    SelectOutcome, TickInput, step,
};
use ship_mods::{ShipConfig, ShipHealth};

#[derive(Parser, Debug)]
#[command(author, version, about = "Ship mod scheduler demo", long_about = None)]
struct Args {
    /// Ship config (JSON). Uses the stock loadout when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seconds of flight to simulate
    #[arg(short, long, default_value_t = 8.0)]
    seconds: f32,

    /// Frame time fed to the fixed-step accumulator
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Print the effective config as JSON and exit
    #[arg(long, default_value_t = false)]
    print_config: bool,
}

/// Scripted pilot and world actions
#[derive(Debug, Clone, Copy)]
enum Cue {
    Press,
    Release,
    Select(ModDirection),
    EnterCurrent,
    LeaveCurrent,
    BeamOn,
    BeamOff,
    Impact { speed: f32 },
    Spikes,
    Pickup,
    Pause(bool),
}

fn flight_script() -> VecDeque<(f32, Cue)> {
    use Cue::*;
    VecDeque::from([
        (0.2, Press),
        (0.3, Release),
        (0.4, Press),
        (0.6, Select(ModDirection::Right)),
        (1.0, Press),
        (1.5, EnterCurrent),
        (2.5, Select(ModDirection::Left)),
        (3.0, LeaveCurrent),
        (3.4, Release),
        (3.6, BeamOn),
        (4.2, BeamOff),
        (4.5, Impact { speed: 45.0 }),
        (4.8, Spikes),
        (5.2, Pickup),
        (5.5, Pause(true)),
        (5.6, Press),
        (5.7, Pause(false)),
        (6.0, Select(ModDirection::Down)),
        (6.1, Press),
    ])
}

/// Demo flight holding all simulation state
struct Flight {
    scheduler: ModScheduler,
    mods: ModHandles,
    health: ShipHealth,
    spikes: ContactDamage,
    laser: LaserDamage,
    pickup: HealthPickup,
    script: VecDeque<(f32, Cue)>,
    input: TickInput,
    beam_on: bool,
    time: f32,
    accumulator: f32,
}

impl Flight {
    fn new(config: &ShipConfig) -> Result<Self> {
        let (scheduler, mods) = config
            .build(Vec::<ModEvent>::new())
            .context("building mod scheduler")?;
        Ok(Self {
            scheduler,
            mods,
            health: ShipHealth::new(config.health.clone()),
            spikes: ContactDamage { base_damage: 20 },
            laser: LaserDamage::new(10, 0.25),
            pickup: HealthPickup::new(25, true, 2.0),
            script: flight_script(),
            input: TickInput::default(),
            beam_on: false,
            time: 0.0,
            accumulator: 0.0,
        })
    }

    /// Run simulation ticks for one frame
    fn update(&mut self, frame_dt: f32) {
        let dt = frame_dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.run_cues();
            let outcome = step(&mut self.scheduler, &self.input, SIM_DT);
            log_outcome(self.time, outcome.select, outcome.activate);

            self.laser.update(self.beam_on, SIM_DT, &mut self.health);
            self.health.tick(SIM_DT);
            self.pickup.tick(SIM_DT);
            self.log_events();

            self.accumulator -= SIM_DT;
            self.time += SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.select = None;
            self.input.activate = None;
        }
    }

    fn run_cues(&mut self) {
        while let Some(&(at, cue)) = self.script.front() {
            if at > self.time {
                break;
            }
            self.script.pop_front();
            debug!("[{:5.2}s] cue {:?}", self.time, cue);
            match cue {
                Cue::Press => self.input.activate = Some(ActivationInput::press()),
                Cue::Release => self.input.activate = Some(ActivationInput::release()),
                Cue::Select(dir) => self.input.select = Some(dir),
                Cue::EnterCurrent => self.input.environment.in_solar_current = true,
                Cue::LeaveCurrent => self.input.environment.in_solar_current = false,
                Cue::BeamOn => self.beam_on = true,
                Cue::BeamOff => self.beam_on = false,
                Cue::Impact { speed } => {
                    if let Some(damage) = self.health.velocity_damage(speed) {
                        info!("[{:5.2}s] impact at {speed} deals {damage}", self.time);
                    }
                }
                Cue::Spikes => {
                    let damage = self.spikes.calculate_damage();
                    let taken = match self.mods.shield_regen() {
                        Some(shield) => shield.borrow_mut().absorb(damage),
                        None => damage,
                    };
                    info!("[{:5.2}s] spikes hit for {damage}, {taken} through shield", self.time);
                    self.health.take_damage(taken);
                }
                Cue::Pickup => {
                    if !self.pickup.apply(&mut self.health) {
                        warn!("[{:5.2}s] health pickup not ready", self.time);
                    }
                }
                Cue::Pause(paused) => self.input.blocked = paused,
            }
        }
    }

    fn log_events(&mut self) {
        for event in self.scheduler.drain_events() {
            match event {
                ModEvent::ModCooldownProgress(dir, progress) => {
                    debug!("[{:5.2}s] {dir} cooldown {:.0}%", self.time, progress * 100.0);
                }
                ModEvent::ModActivated(_) | ModEvent::ModReleased(..) => {
                    info!("[{:5.2}s] {:?}", self.time, event);
                    if let Some(sail) = self.mods.solar_sail() {
                        let sail = sail.borrow();
                        debug!(
                            "[{:5.2}s] sail thrust x{:.2}, turn x{:.2}",
                            self.time,
                            sail.thrust_scale(),
                            sail.turn_scale()
                        );
                    }
                }
                other => info!("[{:5.2}s] {:?}", self.time, other),
            }
        }
        for event in self.health.drain_events() {
            info!(
                "[{:5.2}s] {:?} (health {}/{})",
                self.time,
                event,
                self.health.goal(),
                self.health.max_health()
            );
        }
    }
}

fn log_outcome(time: f32, select: Option<SelectOutcome>, activate: Option<ActivateOutcome>) {
    if let Some(outcome) = select.filter(|s| *s != SelectOutcome::Switched) {
        info!("[{time:5.2}s] selection request: {outcome:?}");
    }
    if let Some(ActivateOutcome::Ignored(reason)) = activate {
        info!("[{time:5.2}s] activation ignored: {reason:?}");
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    ensure!(args.dt > 0.0, "--dt must be positive, got {}", args.dt);
    ensure!(args.seconds >= 0.0, "--seconds must be non-negative");

    let config = match &args.config {
        Some(path) => ShipConfig::load(path)
            .with_context(|| format!("loading ship config {}", path.display()))?,
        None => ShipConfig::default(),
    };

    if args.print_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    info!("Ship Mods starting ({:.1}s of flight)", args.seconds);
    let mut flight = Flight::new(&config)?;
    let frames = (args.seconds / args.dt).ceil() as u64;
    for _ in 0..frames {
        flight.update(args.dt);
    }

    info!(
        "Flight over after {:.2}s: health {}/{}, selected {}",
        flight.time,
        flight.health.health(),
        flight.health.max_health(),
        flight
            .scheduler
            .selected()
            .map_or("none", |dir| dir.as_str())
    );
    if let Some(shield) = flight.mods.shield_regen() {
        info!("Shield at {:.1}", shield.borrow().shield());
    }
    if let Some(laser) = flight.mods.pulse_laser() {
        info!("Pulse laser fired {} shot(s)", laser.borrow().shots_fired());
    }
    Ok(())
}
