//! `sector-sim` runs the sector movers headless. A scenario describes the
//! map and the line triggers to fire, the movers are run for a number of
//! tics, and the final state of every sector is logged.

mod cli;
mod config;
mod scenario;

use cli::*;
use mimalloc::MiMalloc;
use simplelog::TermLogger;
use std::error::Error;
use std::path::PathBuf;

use gameplay::{
    cross_special_line, init_animated_liquids, log, use_special_line, Level, ThinkerClass,
    TicContext,
};
use sound_nosnd::Snd;
use sound_traits::{SfxName, SoundServer};

use crate::config::UserConfig;
use crate::log::{info, warn};
use crate::scenario::{Activation, Scenario};

const BASE_DIR: &str = "sector-sim/";
pub(crate) const DEMO_SCENARIO: &str = include_str!("../scenarios/demo.toml");

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> Result<(), Box<dyn Error>> {
    let mut options: CLIOptions = argh::from_env();

    TermLogger::init(
        options.verbose.unwrap_or(log::LevelFilter::Info),
        simplelog::ConfigBuilder::default()
            .set_time_level(log::LevelFilter::Trace)
            .build(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let mut user_config = UserConfig::load();
    user_config.sync_cli(&mut options);
    user_config.write();

    let scenario = match &options.scenario {
        Some(path) => Scenario::load(&PathBuf::from(path))?,
        None => {
            info!("No scenario given, running the built-in demo");
            Scenario::from_toml(DEMO_SCENARIO)?
        }
    };
    let tics = options
        .tics
        .or(scenario.tics)
        .unwrap_or(user_config.tics);

    let mut snd = Snd::new()?;
    let snd_tx = snd.init()?;
    snd.set_sfx_volume(user_config.sfx_vol);

    let mut level = scenario.build(user_config.level, snd_tx)?;
    init_animated_liquids(&mut level);

    info!("Running {} for {tics} tics", scenario.name);
    let mut tic = TicContext::default();
    for _ in 0..tics {
        for trigger in scenario.triggers_at(tic.level_time) {
            let started = match trigger.action {
                Activation::Cross => cross_special_line(trigger.line, &mut level),
                Activation::Use => use_special_line(trigger.line, &mut level),
            };
            info!(
                "Tic {}: {:?} line {}: {}",
                tic.level_time,
                trigger.action,
                trigger.line,
                if started { "started" } else { "nothing to do" }
            );
        }
        level.run_thinkers(&tic);
        snd.drain();
        tic = tic.next();
    }

    report(&level, &snd);
    if options.profile {
        #[cfg(feature = "hprof")]
        coarse_prof::write(&mut std::io::stdout())?;
        #[cfg(not(feature = "hprof"))]
        warn!("Built without the hprof feature, no profile to show");
    }
    snd.shutdown_sound();
    Ok(())
}

fn report(level: &Level, snd: &Snd) {
    let flats = level.pic_data().flats();
    for sector in level.map_data.sectors() {
        let floorpic = flats
            .get(sector.floorpic)
            .map_or("-", |f| f.name.as_str());
        info!(
            "Sector {:>3}: floor {:>7.2} ceiling {:>7.2} flat {floorpic:<8} special {}{}",
            sector.num,
            sector.floorheight,
            sector.ceilingheight,
            sector.special,
            sector
                .animate
                .map_or(String::new(), |a| format!(" bob {a:.2}"))
        );
    }
    let moving = level.thinkers.iter_class(ThinkerClass::Mover).count();
    if moving > 0 {
        warn!("{moving} movers still running");
    }
    info!(
        "Sounds: {} {}, {} {}",
        SfxName::Stnmov,
        snd.started(SfxName::Stnmov),
        SfxName::Pstop,
        snd.started(SfxName::Pstop)
    );
}
