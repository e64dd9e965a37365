//! Liquid floors bob up and down. Only the rendered offset in
//! `Sector::animate` changes, the real floor height is never touched.
//!
//! Doom source name `p_floor`

use log::debug;
use math::fixed_table_to_float;

use crate::{
    level::{Level, TicContext},
    thinker::{Think, ThinkerClass, ThinkerData},
};

/// One full bob cycle, one entry per tic
const LIQUID_DIFFS: [f32; 64] = fixed_table_to_float([
    6422, 6422, 6360, 6238, 6054, 5814, 5516, 5164, 4764, 4318, 3830, 3306, 2748, 2166, 1562, 942,
    314, -314, -942, -1562, -2166, -2748, -3306, -3830, -4318, -4764, -5164, -5516, -5814, -6054,
    -6238, -6360, -6422, -6422, -6360, -6238, -6054, -5814, -5516, -5164, -4764, -4318, -3830,
    -3306, -2748, -2166, -1562, -942, -314, 314, 942, 1562, 2166, 2748, 3306, 3830, 4318, 4764,
    5164, 5516, 5814, 6054, 6238, 6360,
]);

/// Offset a freshly started animation begins at
const LIQUID_START: f32 = 2.0;

#[derive(Debug, Clone)]
pub struct AnimatedLiquid {
    pub sector: usize,
}

impl Think for AnimatedLiquid {
    fn think(&mut self, level: &mut Level, tic: &TicContext) -> bool {
        let liquid = level.options.liquid_bob && level.is_liquid(self.sector);
        let sector = &mut level.map_data.sectors[self.sector];

        if liquid && sector.floorheight < sector.ceilingheight {
            let diff = LIQUID_DIFFS[(tic.level_time & 63) as usize];
            sector.animate = Some(match sector.animate {
                Some(animate) => animate + diff,
                None => LIQUID_START + diff,
            });
        } else {
            sector.animate = None;
        }
        // Lives as long as the level
        false
    }
}

/// Start bobbing the floor of `sector` unless it already is.
///
/// Doom function name `P_StartAnimatedLiquid`
pub fn start_animated_liquid(level: &mut Level, sector: usize) {
    let running = level
        .thinkers
        .find_thinker(ThinkerClass::Misc, |t| {
            t.animated_liquid().is_some_and(|l| l.sector == sector)
        })
        .is_some();
    if running {
        return;
    }
    debug!("Liquid animation in sector {sector}");
    level
        .thinkers
        .push(ThinkerData::AnimatedLiquid(AnimatedLiquid { sector }));
}

/// Reset every sector's bob and start the animation in all liquid sectors.
/// Called once when the level starts.
///
/// Doom function name `P_InitAnimatedLiquids`
pub fn init_animated_liquids(level: &mut Level) {
    for sector in 0..level.map_data.sectors().len() {
        level.map_data.sectors[sector].animate = None;
        if level.is_liquid(sector) {
            start_animated_liquid(level, sector);
        }
    }
}
