//! Implements special effects:
//! Height changes according to adjacent sectors, respective utility
//! functions. Line Tag handling. Line triggers.
//!
//! Doom source name `p_spec`

use log::{debug, trace, warn};
use sound_traits::{SfxName, SoundAction};

use crate::{
    env::{
        elevator::{ev_do_elevator, ElevatorKind},
        floor::{
            ev_build_stairs, ev_do_change, ev_do_donut, ev_do_floor, ev_do_gen_floor,
            ChangeKind, FloorChange, FloorKind, FloorTarget, GenFloor, StairKind, FLOORSPEED,
        },
    },
    level::{
        map_data::MapData,
        map_defs::{LineDef, Sector},
        Level,
    },
};

/// Boom heights never go past these
pub const MAX_HEIGHT: f32 = 32000.0;
pub const MIN_HEIGHT: f32 = -32000.0;

/// Returns the sector on the other side of `line` from `sector`, or `None` if
/// the line is not two-sided.
///
/// Doom function name `getNextSector`
pub fn get_next_sector(line: &LineDef, sector: usize) -> Option<usize> {
    line.other_sector(sector)
}

/// Every sector adjacent to `sec` across a two-sided line, in line order. A
/// sector may be returned more than once.
fn surrounding(map: &MapData, sec: usize) -> impl Iterator<Item = &Sector> + '_ {
    map.sectors[sec]
        .lines
        .iter()
        .filter_map(move |l| get_next_sector(&map.linedefs[*l], sec))
        .map(|s| &map.sectors[s])
}

/// Doom function name `P_FindLowestFloorSurrounding`
pub fn find_lowest_floor_surrounding(map: &MapData, sec: usize) -> f32 {
    let mut floor = map.sectors[sec].floorheight;
    for other in surrounding(map, sec) {
        if other.floorheight < floor {
            floor = other.floorheight;
        }
    }
    floor
}

/// Doom function name `P_FindHighestFloorSurrounding`
pub fn find_highest_floor_surrounding(map: &MapData, sec: usize) -> f32 {
    let mut floor = MIN_HEIGHT;
    for other in surrounding(map, sec) {
        if other.floorheight > floor {
            floor = other.floorheight;
        }
    }
    floor
}

/// Doom function name `P_FindLowestCeilingSurrounding`
pub fn find_lowest_ceiling_surrounding(map: &MapData, sec: usize) -> f32 {
    let mut height = MAX_HEIGHT;
    for other in surrounding(map, sec) {
        if other.ceilingheight < height {
            height = other.ceilingheight;
        }
    }
    height
}

/// The lowest neighbouring floor that is above `current`. Returns `current` if
/// there is none.
///
/// Doom function name `P_FindNextHighestFloor`
pub fn find_next_highest_floor(map: &MapData, sec: usize, current: f32) -> f32 {
    surrounding(map, sec)
        .map(|s| s.floorheight)
        .filter(|h| *h > current)
        .reduce(f32::min)
        .unwrap_or(current)
}

/// The highest neighbouring floor that is below `current`. Returns `current`
/// if there is none.
///
/// Doom function name `P_FindNextLowestFloor`
pub fn find_next_lowest_floor(map: &MapData, sec: usize, current: f32) -> f32 {
    surrounding(map, sec)
        .map(|s| s.floorheight)
        .filter(|h| *h < current)
        .reduce(f32::max)
        .unwrap_or(current)
}

/// Find the first neighbour of `sec`, in line order, whose floor is at
/// `floordestheight`. Used to pick up a new texture and special.
///
/// Doom function name `P_FindModelFloorSector`
pub fn find_model_floor_sector(
    map: &MapData,
    floordestheight: f32,
    sec: usize,
) -> Option<usize> {
    map.sectors[sec]
        .lines
        .iter()
        .filter_map(|l| get_next_sector(&map.linedefs[*l], sec))
        .find(|s| map.sectors[*s].floorheight == floordestheight)
}

/// As `find_model_floor_sector` but matching the neighbour's ceiling
///
/// Doom function name `P_FindModelCeilingSector`
pub fn find_model_ceiling_sector(
    map: &MapData,
    ceildestheight: f32,
    sec: usize,
) -> Option<usize> {
    map.sectors[sec]
        .lines
        .iter()
        .filter_map(|l| get_next_sector(&map.linedefs[*l], sec))
        .find(|s| map.sectors[*s].ceilingheight == ceildestheight)
}

/// Find the next sector after `start` with the same tag as the line. Pass
/// `None` to begin from the first sector.
///
/// Doom function name `P_FindSectorFromLineTag`
pub fn find_sector_from_line_tag(
    map: &MapData,
    line: usize,
    start: Option<usize>,
) -> Option<usize> {
    let tag = map.linedefs[line].tag;
    let from = start.map_or(0, |s| s + 1);
    map.sectors
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, sector)| sector.tag == tag)
        .map(|(i, _)| i)
}

/// As `find_sector_from_line_tag` but keeps searching while the result is not
/// above `min`. Staircases restart their search from the last sector of the
/// previous staircase, this stops them from finding the same seed twice.
///
/// Doom function name `P_FindSectorFromLineTagWithLowerBound`
pub fn find_sector_from_line_tag_with_lower_bound(
    map: &MapData,
    line: usize,
    mut start: Option<usize>,
    min: Option<usize>,
) -> Option<usize> {
    loop {
        start = find_sector_from_line_tag(map, line, start);
        match (start, min) {
            (Some(found), Some(min)) if found <= min => continue,
            _ => return start,
        }
    }
}

/// Ask whatever is standing in the sector if it still fits
///
/// Doom function name `P_ChangeSector`
pub fn change_sector(level: &mut Level, sector: usize, crunch: bool) -> bool {
    level
        .things
        .change_sector(&level.map_data.sectors[sector], crunch)
}

/// The result of moving a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneResult {
    /// Still on the way
    Ok,
    /// Something is in the way
    Crushed,
    /// The plane is at its destination
    PastDest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plane {
    Floor,
    Ceiling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub const fn sign(self) -> f32 {
        match self {
            Direction::Up => 1.0,
            Direction::Down => -1.0,
        }
    }
}

/// Move a floor or ceiling of `sector` up to `speed` units towards `dest`,
/// never past it. Every move is checked against whatever is in the sector.
///
/// Floors moving up stop at the ceiling, ceilings moving down stop at the
/// floor. Only those two can be blocked part way. A crushing ceiling keeps the
/// new height, a blocked floor is always put back where it was.
///
/// Doom function name `T_MovePlane`
#[allow(clippy::too_many_arguments)]
pub fn move_plane(
    level: &mut Level,
    sector: usize,
    speed: f32,
    dest: f32,
    crush: bool,
    plane: Plane,
    direction: Direction,
    game_tic: u32,
) -> PlaneResult {
    level.map_data.sectors[sector].snapshot(game_tic);

    let (height, limit) = {
        let sec = &level.map_data.sectors[sector];
        match plane {
            Plane::Floor => (sec.floorheight, sec.ceilingheight),
            Plane::Ceiling => (sec.ceilingheight, sec.floorheight),
        }
    };
    trace!("move_plane: {plane:?}: {direction:?}: {height} to {dest} at speed {speed}");

    let set = |level: &mut Level, h: f32| {
        let sec = &mut level.map_data.sectors[sector];
        match plane {
            Plane::Floor => sec.floorheight = h,
            Plane::Ceiling => sec.ceilingheight = h,
        }
    };

    // The direction the plane closes the gap between floor and ceiling
    let closing = matches!(
        (plane, direction),
        (Plane::Floor, Direction::Up) | (Plane::Ceiling, Direction::Down)
    );
    let dest = match (plane, direction) {
        (Plane::Floor, Direction::Up) => dest.min(limit),
        (Plane::Ceiling, Direction::Down) => dest.max(limit),
        _ => dest,
    };

    let within_step = match direction {
        Direction::Up => height + speed >= dest,
        Direction::Down => height - speed <= dest,
    };
    if within_step {
        set(level, dest);
        if change_sector(level, sector, crush) {
            set(level, height);
            change_sector(level, sector, crush);
        }
        return PlaneResult::PastDest;
    }

    set(level, height + speed * direction.sign());
    if change_sector(level, sector, crush) && closing {
        // COULD GET CRUSHED
        if crush && plane == Plane::Ceiling {
            return PlaneResult::Crushed;
        }
        set(level, height);
        change_sector(level, sector, crush);
        return PlaneResult::Crushed;
    }
    PlaneResult::Ok
}

/// Play a sound from the middle of a sector
pub fn start_sector_sound(level: &Level, sector: usize, sfx: SfxName) {
    let origin = level.map_data.sectors[sector].sound_origin;
    if let Err(e) = level.snd_command.send(SoundAction::StartSfx {
        uid: sector,
        sfx,
        x: origin.x,
        y: origin.y,
    }) {
        debug!("Sound {sfx} from sector {sector} not sent: {e}");
    }
}

/// What a line special does when activated
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineAction {
    Floor(FloorKind),
    GenFloor(GenFloor),
    Stairs(StairKind),
    Donut,
    Elevator(ElevatorKind),
    Change(ChangeKind),
}

/// How often a line special can be activated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The special is removed from the line after use
    Once,
    /// The special stays on the line
    Repeat,
}

/// Boom generalized floor linedef types run from here to the top of the range
const GEN_FLOOR_BASE: i16 = 0x6000;
const GEN_FLOOR_CRUSH: i16 = 0x1000;
const GEN_FLOOR_CHANGE_MASK: i16 = 0x0C00;
const GEN_FLOOR_CHANGE_SHIFT: i16 = 10;
const GEN_FLOOR_TARGET_MASK: i16 = 0x0380;
const GEN_FLOOR_TARGET_SHIFT: i16 = 7;
const GEN_FLOOR_DIRECTION: i16 = 0x0040;
const GEN_FLOOR_MODEL: i16 = 0x0020;
const GEN_FLOOR_SPEED_MASK: i16 = 0x0018;
const GEN_FLOOR_SPEED_SHIFT: i16 = 3;

/// Boom generalized stair linedef types live in this range
const GEN_STAIRS_BASE: i16 = 0x0C00;
const GEN_STAIRS_END: i16 = 0x1000;
const GEN_TRIGGER_MASK: i16 = 0x0007;
const GEN_STAIR_SPEED_MASK: i16 = 0x0018;
const GEN_STAIR_SPEED_SHIFT: i16 = 3;
const GEN_STAIR_STEP_MASK: i16 = 0x00C0;
const GEN_STAIR_STEP_SHIFT: i16 = 6;
/// Flipped after each successful use of a repeatable staircase
pub const GEN_STAIR_DIRECTION: i16 = 0x0100;
const GEN_STAIR_IGNORE: i16 = 0x0200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Activation {
    Cross,
    Use,
}

/// How a generalized special is triggered. Gun triggers are not handled.
fn generalized_trigger(special: i16) -> Option<(Activation, Trigger)> {
    match special & GEN_TRIGGER_MASK {
        0 => Some((Activation::Cross, Trigger::Once)),
        1 => Some((Activation::Cross, Trigger::Repeat)),
        2 | 6 => Some((Activation::Use, Trigger::Once)),
        3 | 7 => Some((Activation::Use, Trigger::Repeat)),
        _ => None,
    }
}

/// Decode a Boom generalized floor special
fn generalized_floor(special: i16) -> Option<(Activation, Trigger, GenFloor)> {
    if special < GEN_FLOOR_BASE {
        return None;
    }
    let (activation, trigger) = generalized_trigger(special)?;
    let speed = match (special & GEN_FLOOR_SPEED_MASK) >> GEN_FLOOR_SPEED_SHIFT {
        0 => FLOORSPEED,
        1 => FLOORSPEED * 2.0,
        2 => FLOORSPEED * 4.0,
        _ => FLOORSPEED * 8.0,
    };
    let target = match (special & GEN_FLOOR_TARGET_MASK) >> GEN_FLOOR_TARGET_SHIFT {
        0 => FloorTarget::HighestNeighbourFloor,
        1 => FloorTarget::LowestNeighbourFloor,
        2 => FloorTarget::NextNeighbourFloor,
        3 => FloorTarget::LowestNeighbourCeiling,
        4 => FloorTarget::Ceiling,
        5 => FloorTarget::ShortestLowerTexture,
        6 => FloorTarget::By24,
        _ => FloorTarget::By32,
    };
    let change = match (special & GEN_FLOOR_CHANGE_MASK) >> GEN_FLOOR_CHANGE_SHIFT {
        0 => FloorChange::Nothing,
        1 => FloorChange::ZeroSpecial,
        2 => FloorChange::Texture,
        _ => FloorChange::TextureAndSpecial,
    };
    let direction = if special & GEN_FLOOR_DIRECTION != 0 {
        Direction::Up
    } else {
        Direction::Down
    };
    Some((
        activation,
        trigger,
        GenFloor {
            target,
            direction,
            speed,
            crush: special & GEN_FLOOR_CRUSH != 0,
            change,
            numeric_model: special & GEN_FLOOR_MODEL != 0,
        },
    ))
}

/// Decode a Boom generalized staircase special
fn generalized_stairs(special: i16) -> Option<(Activation, Trigger, StairKind)> {
    if !(GEN_STAIRS_BASE..GEN_STAIRS_END).contains(&special) {
        return None;
    }
    let (activation, trigger) = generalized_trigger(special)?;
    let speed = match (special & GEN_STAIR_SPEED_MASK) >> GEN_STAIR_SPEED_SHIFT {
        0 => 0.25,
        1 => 0.5,
        2 => 2.0,
        _ => 4.0,
    };
    let step = match (special & GEN_STAIR_STEP_MASK) >> GEN_STAIR_STEP_SHIFT {
        0 => 4.0,
        1 => 8.0,
        2 => 16.0,
        _ => 24.0,
    };
    let direction = if special & GEN_STAIR_DIRECTION != 0 {
        Direction::Up
    } else {
        Direction::Down
    };
    Some((
        activation,
        trigger,
        StairKind::Generalized {
            step,
            speed,
            direction,
            ignore_texture: special & GEN_STAIR_IGNORE != 0,
        },
    ))
}

/// Any generalized special this module handles
fn generalized(special: i16) -> Option<(Activation, Trigger, LineAction)> {
    if let Some((activation, trigger, def)) = generalized_floor(special) {
        return Some((activation, trigger, LineAction::GenFloor(def)));
    }
    generalized_stairs(special)
        .map(|(activation, trigger, kind)| (activation, trigger, LineAction::Stairs(kind)))
}

/// The action for a walk-over special
pub fn cross_action(special: i16) -> Option<(LineAction, Trigger)> {
    use FloorKind::*;
    use LineAction::*;
    use Trigger::*;

    let action = match special {
        5 => (Floor(RaiseFloor), Once),
        19 => (Floor(LowerFloor), Once),
        30 => (Floor(RaiseToTexture), Once),
        36 => (Floor(TurboLower), Once),
        37 => (Floor(LowerAndChange), Once),
        38 => (Floor(LowerFloorToLowest), Once),
        56 => (Floor(RaiseFloorCrush), Once),
        58 => (Floor(RaiseFloor24), Once),
        59 => (Floor(RaiseFloor24AndChange), Once),
        119 => (Floor(RaiseFloorToNearest), Once),
        130 => (Floor(RaiseFloorTurbo), Once),
        142 => (Floor(RaiseFloor512), Once),
        219 => (Floor(LowerFloorToNearest), Once),

        82 => (Floor(LowerFloorToLowest), Repeat),
        83 => (Floor(LowerFloor), Repeat),
        84 => (Floor(LowerAndChange), Repeat),
        91 => (Floor(RaiseFloor), Repeat),
        92 => (Floor(RaiseFloor24), Repeat),
        93 => (Floor(RaiseFloor24AndChange), Repeat),
        94 => (Floor(RaiseFloorCrush), Repeat),
        96 => (Floor(RaiseToTexture), Repeat),
        98 => (Floor(TurboLower), Repeat),
        128 => (Floor(RaiseFloorToNearest), Repeat),
        129 => (Floor(RaiseFloorTurbo), Repeat),
        147 => (Floor(RaiseFloor512), Repeat),
        220 => (Floor(LowerFloorToNearest), Repeat),

        8 => (Stairs(StairKind::Build8), Once),
        100 => (Stairs(StairKind::Turbo16), Once),
        256 => (Stairs(StairKind::Build8), Repeat),
        257 => (Stairs(StairKind::Turbo16), Repeat),

        146 => (Donut, Once),
        155 => (Donut, Repeat),

        227 => (Elevator(ElevatorKind::Up), Once),
        228 => (Elevator(ElevatorKind::Up), Repeat),
        231 => (Elevator(ElevatorKind::Down), Once),
        232 => (Elevator(ElevatorKind::Down), Repeat),
        235 => (Elevator(ElevatorKind::Current), Once),
        236 => (Elevator(ElevatorKind::Current), Repeat),

        153 => (Change(ChangeKind::TriggerModel), Once),
        154 => (Change(ChangeKind::TriggerModel), Repeat),
        239 => (Change(ChangeKind::NumericModel), Once),
        240 => (Change(ChangeKind::NumericModel), Repeat),

        _ => match generalized(special) {
            Some((Activation::Cross, trigger, action)) => (action, trigger),
            _ => return None,
        },
    };
    Some(action)
}

/// The action for a switch special
pub fn use_action(special: i16) -> Option<(LineAction, Trigger)> {
    use FloorKind::*;
    use LineAction::*;
    use Trigger::*;

    let action = match special {
        18 => (Floor(RaiseFloorToNearest), Once),
        23 => (Floor(LowerFloorToLowest), Once),
        71 => (Floor(TurboLower), Once),
        101 => (Floor(RaiseFloor), Once),
        102 => (Floor(LowerFloor), Once),
        131 => (Floor(RaiseFloorTurbo), Once),
        140 => (Floor(RaiseFloor512), Once),
        158 => (Floor(RaiseToTexture), Once),
        159 => (Floor(LowerAndChange), Once),
        160 => (Floor(RaiseFloor24AndChange), Once),
        161 => (Floor(RaiseFloor24), Once),
        221 => (Floor(LowerFloorToNearest), Once),

        45 => (Floor(LowerFloor), Repeat),
        60 => (Floor(LowerFloorToLowest), Repeat),
        64 => (Floor(RaiseFloor), Repeat),
        65 => (Floor(RaiseFloorCrush), Repeat),
        69 => (Floor(RaiseFloorToNearest), Repeat),
        70 => (Floor(TurboLower), Repeat),
        132 => (Floor(RaiseFloorTurbo), Repeat),
        176 => (Floor(RaiseToTexture), Repeat),
        177 => (Floor(LowerAndChange), Repeat),
        178 => (Floor(RaiseFloor512), Repeat),
        179 => (Floor(RaiseFloor24AndChange), Repeat),
        180 => (Floor(RaiseFloor24), Repeat),
        222 => (Floor(LowerFloorToNearest), Repeat),

        7 => (Stairs(StairKind::Build8), Once),
        127 => (Stairs(StairKind::Turbo16), Once),
        258 => (Stairs(StairKind::Build8), Repeat),
        259 => (Stairs(StairKind::Turbo16), Repeat),

        9 => (Donut, Once),
        191 => (Donut, Repeat),

        229 => (Elevator(ElevatorKind::Up), Once),
        230 => (Elevator(ElevatorKind::Up), Repeat),
        233 => (Elevator(ElevatorKind::Down), Once),
        234 => (Elevator(ElevatorKind::Down), Repeat),
        237 => (Elevator(ElevatorKind::Current), Once),
        238 => (Elevator(ElevatorKind::Current), Repeat),

        189 => (Change(ChangeKind::TriggerModel), Once),
        190 => (Change(ChangeKind::TriggerModel), Repeat),
        241 => (Change(ChangeKind::NumericModel), Once),
        78 => (Change(ChangeKind::NumericModel), Repeat),

        _ => match generalized(special) {
            Some((Activation::Use, trigger, action)) => (action, trigger),
            _ => return None,
        },
    };
    Some(action)
}

/// Run the handler for `action`. Returns true if anything was started or
/// changed.
pub fn activate_line_action(line: usize, action: LineAction, level: &mut Level) -> bool {
    match action {
        LineAction::Floor(kind) => ev_do_floor(line, kind, level),
        LineAction::GenFloor(def) => ev_do_gen_floor(line, def, level),
        LineAction::Stairs(kind) => ev_build_stairs(line, kind, level),
        LineAction::Donut => ev_do_donut(line, level),
        LineAction::Elevator(kind) => ev_do_elevator(line, kind, level),
        LineAction::Change(kind) => ev_do_change(line, kind, level),
    }
}

/// A repeatable generalized staircase builds the other way next time
fn flip_stair_direction(line: usize, action: LineAction, trigger: Trigger, level: &mut Level) {
    if trigger == Trigger::Repeat
        && matches!(action, LineAction::Stairs(StairKind::Generalized { .. }))
    {
        level.map_data.linedefs[line].special ^= GEN_STAIR_DIRECTION;
    }
}

/// Trigger various actions when a line is crossed which has a non-zero special
/// attached. One-shot specials are removed from the line whether or not they
/// did anything. Returns true if anything was started.
///
/// Doom function name is `P_CrossSpecialLine`
pub fn cross_special_line(line: usize, level: &mut Level) -> bool {
    let special = level.map_data.linedefs[line].special;
    let Some((action, trigger)) = cross_action(special) else {
        if special != 0 {
            warn!("line-special #{special}: not a walk-over special");
        }
        return false;
    };
    debug!("line-special #{special}: {action:?}, {trigger:?}");

    let started = activate_line_action(line, action, level);
    if trigger == Trigger::Once {
        level.map_data.linedefs[line].special = 0;
    } else if started {
        flip_stair_direction(line, action, trigger, level);
    }
    started
}

/// Trigger the switch special on a line. One-shot specials are removed only if
/// they started something. Returns true if anything was started.
///
/// Doom function name is `P_UseSpecialLine`
pub fn use_special_line(line: usize, level: &mut Level) -> bool {
    let special = level.map_data.linedefs[line].special;
    let Some((action, trigger)) = use_action(special) else {
        if special != 0 {
            warn!("line-special #{special}: not a switch special");
        }
        return false;
    };
    debug!("switch line-special #{special}: {action:?}, {trigger:?}");

    let started = activate_line_action(line, action, level);
    if started {
        match trigger {
            Trigger::Once => level.map_data.linedefs[line].special = 0,
            Trigger::Repeat => flip_stair_direction(line, action, trigger, level),
        }
    }
    started
}
