//! Elevators move the floor and ceiling of a sector together, keeping the gap
//! between them.
//!
//! Doom source name `p_floor`

use log::debug;
use sound_traits::SfxName;

use crate::{
    env::specials::{
        find_next_highest_floor, find_next_lowest_floor, find_sector_from_line_tag, move_plane,
        start_sector_sound, Direction, Plane, PlaneResult,
    },
    level::{Level, TicContext},
    thinker::{Think, ThinkerData},
};

pub const ELEVATORSPEED: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElevatorKind {
    /// Up to the next highest floor
    Up,
    /// Down to the next lowest floor
    Down,
    /// To the floor height of the activating line's front sector
    Current,
}

#[derive(Debug, Clone)]
pub struct Elevator {
    pub kind: ElevatorKind,
    pub sector: usize,
    pub direction: Direction,
    pub floordestheight: f32,
    pub ceilingdestheight: f32,
    pub speed: f32,
}

/// Start an elevator in every tagged sector that has neither plane moving.
///
/// Doom function name `EV_DoElevator`
pub fn ev_do_elevator(line: usize, kind: ElevatorKind, level: &mut Level) -> bool {
    let mut ret = false;
    let mut secnum = None;

    while let Some(sec) = find_sector_from_line_tag(&level.map_data, line, secnum) {
        secnum = Some(sec);
        let map = &level.map_data;
        let sector = &map.sectors[sec];
        // If either floor or ceiling is already activated, skip it
        if !sector.is_idle() {
            continue;
        }
        ret = true;

        let floordestheight = match kind {
            ElevatorKind::Down => find_next_lowest_floor(map, sec, sector.floorheight),
            ElevatorKind::Up => find_next_highest_floor(map, sec, sector.floorheight),
            ElevatorKind::Current => map.sectors[map.linedefs[line].frontsector].floorheight,
        };
        let direction = match kind {
            ElevatorKind::Down => Direction::Down,
            ElevatorKind::Up => Direction::Up,
            ElevatorKind::Current if floordestheight > sector.floorheight => Direction::Up,
            ElevatorKind::Current => Direction::Down,
        };
        let elevator = Elevator {
            kind,
            sector: sec,
            direction,
            floordestheight,
            ceilingdestheight: floordestheight + sector.ceilingheight - sector.floorheight,
            speed: ELEVATORSPEED,
        };
        debug!(
            "Elevator {kind:?} in sector {sec}: floor {} to {}",
            sector.floorheight, floordestheight
        );

        let id = level.thinkers.push(ThinkerData::Elevator(elevator));
        let sector = &mut level.map_data.sectors[sec];
        sector.floordata = Some(id);
        sector.ceilingdata = Some(id);
    }
    ret
}

impl Think for Elevator {
    fn think(&mut self, level: &mut Level, tic: &TicContext) -> bool {
        // The leading plane goes first so the gap never closes. If it is
        // blocked the other plane stays put.
        let (first, first_dest, second, second_dest) = match self.direction {
            Direction::Down => (
                Plane::Ceiling,
                self.ceilingdestheight,
                Plane::Floor,
                self.floordestheight,
            ),
            Direction::Up => (
                Plane::Floor,
                self.floordestheight,
                Plane::Ceiling,
                self.ceilingdestheight,
            ),
        };

        let res = move_plane(
            level,
            self.sector,
            self.speed,
            first_dest,
            false,
            first,
            self.direction,
            tic.game_tic,
        );
        if matches!(res, PlaneResult::Ok | PlaneResult::PastDest) {
            move_plane(
                level,
                self.sector,
                self.speed,
                second_dest,
                false,
                second,
                self.direction,
                tic.game_tic,
            );
        }

        // make floor move sound
        if tic.level_time & 7 == 0 {
            start_sector_sound(level, self.sector, SfxName::Stnmov);
        }

        if res != PlaneResult::PastDest {
            return false;
        }

        let sector = &mut level.map_data.sectors[self.sector];
        sector.floordata = None;
        sector.ceilingdata = None;
        // make floor stop sound
        start_sector_sound(level, self.sector, SfxName::Pstop);
        debug!("Elevator in sector {} finished", self.sector);
        true
    }
}
