//! Scenario tests for the sector movers. Maps are built in memory, lines are
//! laid out along the x axis since only their sectors matter here.

mod stairs_tests;

use std::sync::mpsc::{channel, Receiver};

use glam::Vec2;
use sound_traits::{SfxName, SoundAction};

use crate::{
    env::floor::FloorMove,
    level::{
        flags::LineDefFlags, map_data::MapData, map_defs::Sector, ChangeSector, Level,
        LevelOptions, TicContext,
    },
    pic::PicData,
};

pub(super) const FLOOR: &str = "FLOOR4_8";
pub(super) const NUKAGE: &str = "NUKAGE1";

pub(super) struct Builder {
    pub map: MapData,
    pub pics: PicData,
    pub options: LevelOptions,
    next_x: f32,
}

impl Builder {
    pub fn new(name: &str) -> Self {
        let mut pics = PicData::new();
        pics.add_flat(FLOOR);
        pics.add_flat(NUKAGE);
        Self {
            map: MapData::new(name),
            pics,
            options: LevelOptions::default(),
            next_x: 0.0,
        }
    }

    pub fn flat(&mut self, name: &str) -> usize {
        self.pics.add_flat(name)
    }

    /// A sector with the default floor texture and no special
    pub fn sector(&mut self, floor: f32, ceiling: f32, tag: i16) -> usize {
        let pic = self.flat(FLOOR);
        self.map.add_sector(floor, ceiling, pic, pic, 0, tag)
    }

    pub fn sector_with(
        &mut self,
        floor: f32,
        ceiling: f32,
        floorpic: &str,
        special: i16,
        tag: i16,
    ) -> usize {
        let pic = self.flat(floorpic);
        let ceil = self.flat(FLOOR);
        self.map.add_sector(floor, ceiling, pic, ceil, special, tag)
    }

    fn next_span(&mut self) -> (Vec2, Vec2) {
        let v1 = Vec2::new(self.next_x, 0.0);
        self.next_x += 64.0;
        (v1, Vec2::new(self.next_x, 0.0))
    }

    /// A two-sided line with `front` on the front side
    pub fn two_sided(&mut self, front: usize, back: usize) -> usize {
        self.two_sided_lower(front, back, None, None)
    }

    /// A two-sided line with lower textures on either side
    pub fn two_sided_lower(
        &mut self,
        front: usize,
        back: usize,
        front_lower: Option<usize>,
        back_lower: Option<usize>,
    ) -> usize {
        let (v1, v2) = self.next_span();
        let fs = self.map.add_sidedef(front, None, front_lower, None);
        let bs = self.map.add_sidedef(back, None, back_lower, None);
        self.map
            .add_line(v1, v2, LineDefFlags::TwoSided.bit(), 0, 0, fs, Some(bs))
    }

    /// A one-sided line in `sector` carrying a special
    pub fn trigger(&mut self, sector: usize, special: i16, tag: i16) -> usize {
        let (v1, v2) = self.next_span();
        let side = self.map.add_sidedef(sector, None, None, None);
        self.map.add_line(v1, v2, 0, special, tag, side, None)
    }

    pub fn build(self) -> (Level, Receiver<SoundAction<SfxName>>) {
        let (tx, rx) = channel();
        (Level::new(self.map, self.pics, self.options, tx), rx)
    }
}

/// Run the thinkers `count` times, advancing the tic each time
pub(super) fn run_tics(level: &mut Level, tic: &mut TicContext, count: usize) {
    for _ in 0..count {
        level.run_thinkers(tic);
        *tic = tic.next();
    }
}

/// Every sound effect queued since the last call
pub(super) fn sounds(rx: &Receiver<SoundAction<SfxName>>) -> Vec<SfxName> {
    rx.try_iter()
        .filter_map(|s| match s {
            SoundAction::StartSfx { sfx, .. } => Some(sfx),
            _ => None,
        })
        .collect()
}

/// The floor mover attached to a sector
pub(super) fn floor_mover(level: &Level, s: usize) -> FloorMove {
    level.map_data.sectors[s]
        .floordata
        .and_then(|id| level.thinkers.get(id))
        .and_then(|t| t.floor_move())
        .cloned()
        .expect("sector has no floor mover")
}

/// Blocks every plane move
pub(super) struct AlwaysBlocked;

impl ChangeSector for AlwaysBlocked {
    fn change_sector(&mut self, _sector: &Sector, _crunch: bool) -> bool {
        true
    }
}
