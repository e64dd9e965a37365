//! The data that makes up an entire level, along with functions to record state,
//! or get ref/mutable-ref to parts of it.
//!
//! Tic counters are owned by whoever runs the level and are handed in with
//! each call through `TicContext`.

pub mod flags;
pub mod map_data;
pub mod map_defs;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use sound_traits::SndServerTx;

use crate::{
    level::{map_data::MapData, map_defs::Sector},
    pic::PicData,
    thinker::ThinkerAlloc,
};

/// Thinker slots per sector: a floor mover, a ceiling mover, and a liquid
/// animator.
const THINKERS_PER_SECTOR: usize = 3;
const THINKER_HEADROOM: usize = 32;

/// The two tic counters the movers care about.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TicContext {
    /// Tics since the level started. Drives sound throttling and the liquid
    /// bob table.
    pub level_time: u32,
    /// Global game tic, recorded with the interpolation snapshot.
    pub game_tic: u32,
}

impl TicContext {
    pub const fn new(level_time: u32, game_tic: u32) -> Self {
        Self {
            level_time,
            game_tic,
        }
    }

    /// The context for the following tic
    pub const fn next(self) -> Self {
        Self {
            level_time: self.level_time.wrapping_add(1),
            game_tic: self.game_tic.wrapping_add(1),
        }
    }
}

/// Per-level gameplay options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelOptions {
    /// Animate liquid floors
    pub liquid_bob: bool,
}

impl Default for LevelOptions {
    fn default() -> Self {
        Self { liquid_bob: true }
    }
}

/// Whatever stands in a sector and could be squashed by a moving plane.
///
/// Doom function name `P_ChangeSector`
pub trait ChangeSector {
    /// Called after a sector's floor or ceiling height changed. Returns true
    /// if something in the sector no longer fits. `crunch` is set when the
    /// mover is allowed to crush what is in the way.
    fn change_sector(&mut self, sector: &Sector, crunch: bool) -> bool;
}

/// A level with nothing in it. Planes are never obstructed.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoThings;

impl ChangeSector for NoThings {
    fn change_sector(&mut self, _sector: &Sector, _crunch: bool) -> bool {
        false
    }
}

/// Tracks the height of the tallest thing standing in each sector. A sector
/// is obstructed when the gap between floor and ceiling is less than that.
#[derive(Debug, Default, Clone)]
pub struct ThingClearance {
    heights: Vec<f32>,
}

impl ThingClearance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tallest thing height for a sector. A height of zero or less
    /// means the sector is empty.
    pub fn set_height(&mut self, sector: usize, height: f32) {
        if self.heights.len() <= sector {
            self.heights.resize(sector + 1, 0.0);
        }
        self.heights[sector] = height;
    }

    pub fn height(&self, sector: usize) -> f32 {
        self.heights.get(sector).copied().unwrap_or_default()
    }
}

impl ChangeSector for ThingClearance {
    fn change_sector(&mut self, sector: &Sector, _crunch: bool) -> bool {
        let height = self.height(sector.num as usize);
        height > 0.0 && sector.ceilingheight - sector.floorheight < height
    }
}

/// The sectors of one generalized staircase build, and how many of their step
/// movers are still running.
#[derive(Debug, Default, Clone)]
pub struct StairGroup {
    pub pending: usize,
    pub sectors: Vec<usize>,
}

/// The level is considered a `World` or sorts. One that exists only
/// while the level is being played. Another benefit of this structure is
/// it makes it easier for all involved thinkers and functions to
/// work with the data, as much of it is interlinked.
pub struct Level {
    pub map_data: MapData,
    pub thinkers: ThinkerAlloc,
    pub options: LevelOptions,
    /// Generalized staircases still building. Indexed by
    /// `Sector::stair_group`; finished groups are left empty and reused.
    pub stair_groups: Vec<StairGroup>,
    /// Need access to texture data for a few things
    pub(crate) pic_data: PicData,
    /// Asked every time a plane moves
    pub(crate) things: Box<dyn ChangeSector>,
    /// Provides ability for things to start a sound
    pub(crate) snd_command: SndServerTx,
}

impl Level {
    /// Set up a level from its map data. Thinker capacity is sized for the
    /// worst case of every sector running a floor, a ceiling, and a liquid
    /// thinker at once.
    ///
    /// Doom method name is `P_SetupLevel`
    pub fn new(
        mut map_data: MapData,
        pic_data: PicData,
        options: LevelOptions,
        snd_command: SndServerTx,
    ) -> Self {
        map_data.set_sector_sound_origins();
        let capacity = map_data.sectors().len() * THINKERS_PER_SECTOR + THINKER_HEADROOM;
        info!(
            "Level {}: {} sectors, {} lines, {capacity} thinker slots",
            map_data.name(),
            map_data.sectors().len(),
            map_data.linedefs().len()
        );

        Level {
            map_data,
            thinkers: ThinkerAlloc::new(capacity),
            options,
            stair_groups: Vec::new(),
            pic_data,
            things: Box::new(NoThings),
            snd_command,
        }
    }

    /// Replace the geometry check used when planes move
    pub fn set_things(&mut self, things: Box<dyn ChangeSector>) {
        self.things = things;
    }

    pub fn pic_data(&self) -> &PicData {
        &self.pic_data
    }

    /// True if the floor texture of `sector` is a liquid
    pub fn is_liquid(&self, sector: usize) -> bool {
        self.pic_data
            .is_liquid(self.map_data.sectors[sector].floorpic)
    }

    /// Drop every thinker and reset all per-sector mover state.
    ///
    /// Doom function name `P_InitThinkers`
    pub fn clear_thinkers(&mut self) {
        debug!("Clearing all thinkers");
        self.thinkers.clear();
        self.stair_groups.clear();
        for sector in self.map_data.sectors_mut() {
            sector.floordata = None;
            sector.ceilingdata = None;
            sector.stair_lock = Default::default();
            sector.stair_group = None;
        }
    }
}
