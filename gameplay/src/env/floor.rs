//! Floor movement thinker: raise, lower, crusher, stairs, donuts, and the
//! instant floor texture changes.
//!
//! Doom source name `p_floor`

use log::{debug, warn};
use sound_traits::SfxName;

use crate::{
    env::{
        liquid::start_animated_liquid,
        specials::{
            change_sector, find_highest_floor_surrounding, find_lowest_ceiling_surrounding,
            find_lowest_floor_surrounding, find_model_floor_sector, find_next_highest_floor,
            find_model_ceiling_sector, find_next_lowest_floor, find_sector_from_line_tag,
            find_sector_from_line_tag_with_lower_bound, move_plane, start_sector_sound,
            Direction, Plane, PlaneResult, MAX_HEIGHT, MIN_HEIGHT,
        },
    },
    level::{flags::LineDefFlags, map_defs::StairLock, Level, StairGroup, TicContext},
    thinker::{Think, ThinkerData, ThinkerId},
};

pub const FLOORSPEED: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloorKind {
    /// lower floor to highest surrounding floor
    LowerFloor,
    /// lower floor 24 units from start
    LowerFloor24,
    /// lower floor 32 units from start, turbo-speed
    LowerFloor32Turbo,
    /// lower floor to lowest surrounding floor
    LowerFloorToLowest,
    /// lower floor to next lowest surrounding floor
    LowerFloorToNearest,
    /// lower floor to highest surrounding floor VERY FAST
    TurboLower,
    /// raise floor to lowest surrounding CEILING
    RaiseFloor,
    /// raise floor to next highest surrounding floor
    RaiseFloorToNearest,
    /// raise floor to shortest height of the lower textures around it
    RaiseToTexture,
    /// lower floor to lowest surrounding floor and change floorpic
    LowerAndChange,
    /// Raise floor 24 units from start
    RaiseFloor24,
    /// Raise floor 24 units from start and change texture
    RaiseFloor24AndChange,
    /// Raise floor 8 short of the lowest ceiling and crush all entities on it
    RaiseFloorCrush,
    /// raise to next highest floor, turbo-speed
    RaiseFloorTurbo,
    /// Raise floor 32 units from start, turbo-speed
    RaiseFloor32Turbo,
    /// Raise the outer ring of a donut, taking the texture of its surround
    DonutRaise,
    /// Raise floor 512 units from start
    RaiseFloor512,
    /// One step of a staircase
    BuildStair,
    /// Boom generalized floor, no change on arrival
    GenFloor,
    /// Generalized floor that takes a new texture on arrival
    GenFloorChg,
    /// Generalized floor that takes a new texture and clears the special
    GenFloorChg0,
    /// Generalized floor that takes a new texture and special
    GenFloorChgT,
}

/// Where a generalized floor goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloorTarget {
    HighestNeighbourFloor,
    LowestNeighbourFloor,
    /// Next neighbour floor in the direction of travel
    NextNeighbourFloor,
    LowestNeighbourCeiling,
    Ceiling,
    /// By the shortest lower texture around the sector
    ShortestLowerTexture,
    By24,
    By32,
}

/// What a generalized floor changes when it arrives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloorChange {
    Nothing,
    /// Texture, and the special is cleared
    ZeroSpecial,
    Texture,
    TextureAndSpecial,
}

/// Boom's configurable floor specials, decoded from the line special
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenFloor {
    pub target: FloorTarget,
    pub direction: Direction,
    pub speed: f32,
    pub crush: bool,
    pub change: FloorChange,
    /// Take the change from a neighbour at the destination height instead of
    /// the front sector of the line
    pub numeric_model: bool,
}

/// Very special kind of thinker used specifically for building a set of stairs
/// that raises one-by-one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StairKind {
    /// slowly build by 8
    Build8,
    /// quickly build by 16
    Turbo16,
    /// Boom's configurable stairs. These lock every step until the whole
    /// staircase is finished so they can't be retriggered half way.
    Generalized {
        step: f32,
        speed: f32,
        direction: Direction,
        ignore_texture: bool,
    },
}

/// Floor texture and special changes that happen without moving the floor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Copy from the front sector of the activating line
    TriggerModel,
    /// Copy from a neighbour whose floor is at the same height
    NumericModel,
}

#[derive(Debug, Clone)]
pub struct FloorMove {
    pub kind: FloorKind,
    pub crush: bool,
    pub sector: usize,
    pub direction: Direction,
    /// Applied to the sector on arrival by the kinds that change it
    pub newspecial: i16,
    /// Applied to the sector on arrival by the kinds that change it
    pub texture: usize,
    pub destheight: f32,
    pub speed: f32,
    /// Play `pstop` on arrival. Not set if the floor started at its
    /// destination.
    pub stopsound: bool,
}

impl FloorMove {
    pub fn new(
        kind: FloorKind,
        sector: usize,
        direction: Direction,
        speed: f32,
        destheight: f32,
    ) -> Self {
        Self {
            kind,
            crush: false,
            sector,
            direction,
            newspecial: 0,
            texture: 0,
            destheight,
            speed,
            stopsound: false,
        }
    }
}

/// Attach a floor mover to its sector and start it thinking
fn spawn_floor_move(mut floor: FloorMove, level: &mut Level) -> ThinkerId {
    let sector = floor.sector;
    floor.stopsound = level.map_data.sectors[sector].floorheight != floor.destheight;
    let id = level.thinkers.push(ThinkerData::FloorMove(floor));
    level.map_data.sectors[sector].floordata = Some(id);
    id
}

/// Set a new floor texture and special, re-check what is standing in the
/// sector, and start the liquid animation if needed.
fn change_floor(level: &mut Level, sector: usize, floorpic: usize, special: i16) {
    {
        let sec = &mut level.map_data.sectors[sector];
        sec.floorpic = floorpic;
        sec.special = special;
    }
    change_sector(level, sector, false);
    if level.is_liquid(sector) {
        start_animated_liquid(level, sector);
    }
}

/// The smallest lower texture height on any two-sided line around `sector`
fn shortest_lower_texture(level: &Level, sector: usize) -> f32 {
    let map = &level.map_data;
    let mut minsize = MAX_HEIGHT;
    for line in map.sectors[sector].lines.iter().map(|l| &map.linedefs[*l]) {
        if !line.is_two_sided() {
            continue;
        }
        let sides = [Some(line.front_sidedef), line.back_sidedef];
        for side in sides.into_iter().flatten() {
            if let Some(height) = map.sidedefs[side]
                .bottomtexture
                .and_then(|t| level.pic_data.wall_height(t))
            {
                minsize = minsize.min(height);
            }
        }
    }
    minsize
}

/// Floor texture that `RaiseFloor24AndChange` copies. Two maps have the wrong
/// texture on the activating line, those get a fixed one.
fn raise_and_change_pic(level: &Level, line: usize) -> usize {
    let front = level.map_data.linedefs[line].frontsector;
    let fallback = level.map_data.sectors[front].floorpic;
    let fix = match level.map_data.name() {
        "E2M2" => "FLOOR5_4",
        "MAP12" => "FLOOR7_1",
        _ => return fallback,
    };
    level.pic_data.flat_num_for_name(fix).unwrap_or_else(|| {
        warn!("Flat {fix} is missing, using the trigger sector floor");
        fallback
    })
}

/// Set up the movement for one sector. Returns `None` for kinds that are not
/// started by a line on their own.
fn new_floor_move(
    line: usize,
    kind: FloorKind,
    sec: usize,
    level: &mut Level,
) -> Option<FloorMove> {
    use Direction::*;

    let map = &level.map_data;
    let sector = &map.sectors[sec];
    let floorheight = sector.floorheight;
    let (direction, speed, destheight) = match kind {
        FloorKind::LowerFloor => (Down, FLOORSPEED, find_highest_floor_surrounding(map, sec)),
        FloorKind::LowerFloor24 => (Down, FLOORSPEED, floorheight - 24.0),
        FloorKind::LowerFloor32Turbo => (Down, FLOORSPEED * 4.0, floorheight - 32.0),
        FloorKind::LowerFloorToLowest => {
            (Down, FLOORSPEED, find_lowest_floor_surrounding(map, sec))
        }
        FloorKind::LowerFloorToNearest => (
            Down,
            FLOORSPEED,
            find_next_lowest_floor(map, sec, floorheight),
        ),
        FloorKind::TurboLower => {
            let mut dest = find_highest_floor_surrounding(map, sec);
            if dest != floorheight {
                dest += 8.0;
            }
            (Down, FLOORSPEED * 4.0, dest)
        }
        FloorKind::RaiseFloor | FloorKind::RaiseFloorCrush => {
            let mut dest = find_lowest_ceiling_surrounding(map, sec).min(sector.ceilingheight);
            if kind == FloorKind::RaiseFloorCrush {
                dest -= 8.0;
            }
            (Up, FLOORSPEED, dest)
        }
        FloorKind::RaiseFloorTurbo => (
            Up,
            FLOORSPEED * 4.0,
            find_next_highest_floor(map, sec, floorheight),
        ),
        FloorKind::RaiseFloorToNearest => (
            Up,
            FLOORSPEED,
            find_next_highest_floor(map, sec, floorheight),
        ),
        FloorKind::RaiseFloor24 | FloorKind::RaiseFloor24AndChange => {
            (Up, FLOORSPEED, floorheight + 24.0)
        }
        FloorKind::RaiseFloor32Turbo => (Up, FLOORSPEED * 4.0, floorheight + 32.0),
        FloorKind::RaiseFloor512 => (Up, FLOORSPEED, floorheight + 512.0),
        FloorKind::RaiseToTexture => {
            let minsize = shortest_lower_texture(level, sec);
            (Up, FLOORSPEED, (floorheight + minsize).min(MAX_HEIGHT))
        }
        FloorKind::LowerAndChange => {
            (Down, FLOORSPEED, find_lowest_floor_surrounding(map, sec))
        }
        FloorKind::DonutRaise
        | FloorKind::BuildStair
        | FloorKind::GenFloor
        | FloorKind::GenFloorChg
        | FloorKind::GenFloorChg0
        | FloorKind::GenFloorChgT => {
            warn!("{kind:?} can't be started by ev_do_floor");
            return None;
        }
    };

    let mut floor = FloorMove::new(kind, sec, direction, speed, destheight);
    floor.crush = kind == FloorKind::RaiseFloorCrush;

    match kind {
        FloorKind::RaiseFloor24AndChange => {
            let floorpic = raise_and_change_pic(level, line);
            let front = level.map_data.linedefs[line].frontsector;
            let special = level.map_data.sectors[front].special;
            let sector = &mut level.map_data.sectors[sec];
            sector.floorpic = floorpic;
            sector.special = special;
        }
        FloorKind::LowerAndChange => {
            let map = &level.map_data;
            let model = find_model_floor_sector(map, destheight, sec).unwrap_or(sec);
            floor.texture = map.sectors[model].floorpic;
            floor.newspecial = map.sectors[model].special;
        }
        _ => {}
    }
    Some(floor)
}

/// Start a floor mover in every idle sector tagged by the line. Returns true
/// if any were started.
///
/// Doom function name `EV_DoFloor`
pub fn ev_do_floor(line: usize, kind: FloorKind, level: &mut Level) -> bool {
    let mut ret = false;
    let mut secnum = None;

    while let Some(sec) = find_sector_from_line_tag(&level.map_data, line, secnum) {
        secnum = Some(sec);
        // ALREADY MOVING?  IF SO, KEEP GOING...
        if level.map_data.sectors[sec].floordata.is_some() {
            continue;
        }
        let Some(floor) = new_floor_move(line, kind, sec, level) else {
            return ret;
        };
        debug!(
            "Floor {kind:?} in sector {sec}: {} to {}",
            level.map_data.sectors[sec].floorheight, floor.destheight
        );
        ret = true;
        spawn_floor_move(floor, level);

        let map = &mut level.map_data;
        for l in map.sectors[sec].lines.iter() {
            map.linedefs[*l].flags &= !LineDefFlags::Secret.bit();
        }
    }
    ret
}

/// Set up a generalized floor for one sector
fn new_gen_floor(line: usize, def: &GenFloor, sec: usize, level: &Level) -> FloorMove {
    let map = &level.map_data;
    let sector = &map.sectors[sec];
    let floorheight = sector.floorheight;
    let sign = def.direction.sign();
    let destheight = match def.target {
        FloorTarget::HighestNeighbourFloor => find_highest_floor_surrounding(map, sec),
        FloorTarget::LowestNeighbourFloor => find_lowest_floor_surrounding(map, sec),
        FloorTarget::NextNeighbourFloor => match def.direction {
            Direction::Up => find_next_highest_floor(map, sec, floorheight),
            Direction::Down => find_next_lowest_floor(map, sec, floorheight),
        },
        FloorTarget::LowestNeighbourCeiling => find_lowest_ceiling_surrounding(map, sec),
        FloorTarget::Ceiling => sector.ceilingheight,
        FloorTarget::ShortestLowerTexture => {
            let minsize = shortest_lower_texture(level, sec);
            (floorheight + sign * minsize).clamp(MIN_HEIGHT, MAX_HEIGHT)
        }
        FloorTarget::By24 => floorheight + sign * 24.0,
        FloorTarget::By32 => floorheight + sign * 32.0,
    };

    let mut floor = FloorMove::new(
        FloorKind::GenFloor,
        sec,
        def.direction,
        def.speed,
        destheight,
    );
    floor.crush = def.crush;
    floor.texture = sector.floorpic;
    floor.newspecial = sector.special;
    if def.change == FloorChange::Nothing {
        return floor;
    }

    let model = if def.numeric_model {
        match def.target {
            FloorTarget::LowestNeighbourCeiling | FloorTarget::Ceiling => {
                find_model_ceiling_sector(map, destheight, sec)
            }
            _ => find_model_floor_sector(map, destheight, sec),
        }
    } else {
        Some(map.linedefs[line].frontsector)
    };
    // if no model, no change
    let Some(model) = model else {
        return floor;
    };
    let model = &map.sectors[model];
    floor.texture = model.floorpic;
    match def.change {
        FloorChange::ZeroSpecial => {
            floor.newspecial = 0;
            floor.kind = FloorKind::GenFloorChg0;
        }
        FloorChange::TextureAndSpecial => {
            floor.newspecial = model.special;
            floor.kind = FloorKind::GenFloorChgT;
        }
        FloorChange::Texture => floor.kind = FloorKind::GenFloorChg,
        FloorChange::Nothing => {}
    }
    floor
}

/// Start a generalized floor in every idle tagged sector. Returns true if any
/// were started.
///
/// Doom function name `EV_DoGenFloor`
pub fn ev_do_gen_floor(line: usize, def: GenFloor, level: &mut Level) -> bool {
    let mut ret = false;
    let mut secnum = None;

    while let Some(sec) = find_sector_from_line_tag(&level.map_data, line, secnum) {
        secnum = Some(sec);
        if level.map_data.sectors[sec].floordata.is_some() {
            continue;
        }
        let floor = new_gen_floor(line, &def, sec, level);
        debug!(
            "Generalized floor {:?} in sector {sec}: {} to {}",
            floor.kind, level.map_data.sectors[sec].floorheight, floor.destheight
        );
        ret = true;
        spawn_floor_move(floor, level);
    }
    ret
}

/// Change floor texture and special of every tagged sector without moving the
/// floor. Returns true if any sector is tagged.
///
/// Doom function name `EV_DoChange`
pub fn ev_do_change(line: usize, kind: ChangeKind, level: &mut Level) -> bool {
    let mut ret = false;
    let mut secnum = None;

    while let Some(sec) = find_sector_from_line_tag(&level.map_data, line, secnum) {
        secnum = Some(sec);
        ret = true;

        let model = match kind {
            ChangeKind::TriggerModel => Some(level.map_data.linedefs[line].frontsector),
            ChangeKind::NumericModel => {
                let floorheight = level.map_data.sectors[sec].floorheight;
                find_model_floor_sector(&level.map_data, floorheight, sec)
            }
        };
        // if no model, no change
        if let Some(model) = model {
            let model = &level.map_data.sectors[model];
            let (floorpic, special) = (model.floorpic, model.special);
            debug!("Change {kind:?} in sector {sec}: floorpic {floorpic}, special {special}");
            change_floor(level, sec, floorpic, special);
        }
    }
    ret
}

struct StairParams {
    step: f32,
    speed: f32,
    direction: Direction,
    crush: bool,
    ignore_texture: bool,
    /// Generalized stairs lock each step and skip locked sectors
    locking: bool,
}

impl StairParams {
    fn new(kind: StairKind) -> Self {
        match kind {
            StairKind::Build8 => Self {
                step: 8.0,
                speed: FLOORSPEED / 4.0,
                direction: Direction::Up,
                crush: false,
                ignore_texture: false,
                locking: false,
            },
            StairKind::Turbo16 => Self {
                step: 16.0,
                speed: FLOORSPEED * 4.0,
                direction: Direction::Up,
                crush: true,
                ignore_texture: false,
                locking: false,
            },
            StairKind::Generalized {
                step,
                speed,
                direction,
                ignore_texture,
            } => Self {
                step: step * direction.sign(),
                speed,
                direction,
                crush: false,
                ignore_texture,
                locking: true,
            },
        }
    }

    fn spawn(&self, sec: usize, destheight: f32, group: Option<usize>, level: &mut Level) {
        let mut floor = FloorMove::new(
            FloorKind::BuildStair,
            sec,
            self.direction,
            self.speed,
            destheight,
        );
        floor.crush = self.crush;
        floor.texture = level.map_data.sectors[sec].floorpic;
        spawn_floor_move(floor, level);

        if let Some(group) = group {
            let sector = &mut level.map_data.sectors[sec];
            sector.stair_lock = StairLock::Building;
            sector.stair_group = Some(group);
            let group = &mut level.stair_groups[group];
            group.pending += 1;
            group.sectors.push(sec);
        }
    }

    /// A sector that can't take another step mover
    fn busy(&self, sec: usize, level: &Level) -> bool {
        let sector = &level.map_data.sectors[sec];
        sector.floordata.is_some() || (self.locking && sector.stair_lock != StairLock::Idle)
    }
}

/// Take an empty stair group, or make a new one
fn new_stair_group(level: &mut Level) -> usize {
    if let Some(idx) = level
        .stair_groups
        .iter()
        .position(|g| g.pending == 0 && g.sectors.is_empty())
    {
        return idx;
    }
    level.stair_groups.push(StairGroup::default());
    level.stair_groups.len() - 1
}

/// Build one staircase starting at `seed`. Returns the last sector that got a
/// step.
fn build_staircase(seed: usize, params: &StairParams, level: &mut Level) -> usize {
    let group = params.locking.then(|| new_stair_group(level));
    let mut sec = seed;
    let mut height = level.map_data.sectors[seed].floorheight + params.step;
    let texture = level.map_data.sectors[seed].floorpic;
    debug!("Stairs from sector {seed}, first step to {height}");
    params.spawn(seed, height, group, level);

    // Find next sector to raise
    // 1. Find 2-sided line with same sector side[0]
    // 2. Other side is the next sector to raise
    loop {
        let mut next = None;
        for l in level.map_data.sectors[sec].lines.iter() {
            let line = &level.map_data.linedefs[*l];
            let two_sided = if params.locking {
                line.backsector.is_some()
            } else {
                line.is_two_sided()
            };
            if !two_sided || line.frontsector != sec {
                continue;
            }
            let Some(tsec) = line.backsector else {
                continue;
            };
            if !params.ignore_texture && level.map_data.sectors[tsec].floorpic != texture {
                continue;
            }

            // Classic stairs count a step even for a sector that is skipped
            if !params.locking {
                height += params.step;
            }
            if params.busy(tsec, level) {
                continue;
            }
            if params.locking {
                height += params.step;
            }
            next = Some(tsec);
            break;
        }

        let Some(tsec) = next else {
            return sec;
        };
        params.spawn(tsec, height, group, level);
        sec = tsec;
    }
}

/// Build a staircase from each tagged sector.
///
/// Classic stairs restart the tag search from the last step of the previous
/// staircase, skipping every sector up to the previous seed. Generalized
/// stairs search the tags in order and skip any sector still locked by a build
/// that hasn't finished.
///
/// Doom function name `EV_BuildStairs`
pub fn ev_build_stairs(line: usize, kind: StairKind, level: &mut Level) -> bool {
    let params = StairParams::new(kind);
    let mut ret = false;
    let mut ssec = None;
    let mut minssec = None;

    while let Some(seed) =
        find_sector_from_line_tag_with_lower_bound(&level.map_data, line, ssec, minssec)
    {
        ssec = Some(seed);
        // ALREADY MOVING?  IF SO, KEEP GOING...
        if params.busy(seed, level) {
            continue;
        }
        ret = true;

        let last = build_staircase(seed, &params, level);
        if !params.locking {
            minssec = Some(seed);
            ssec = Some(last);
        }
    }
    ret
}

/// Called by a step mover when it arrives. Once every step of a generalized
/// staircase has arrived its sectors are unlocked.
fn stair_step_done(level: &mut Level, sec: usize) {
    let sector = &mut level.map_data.sectors[sec];
    if sector.stair_lock != StairLock::Building {
        return;
    }
    sector.stair_lock = StairLock::Done;
    let Some(idx) = sector.stair_group else {
        warn!("Stair step in sector {sec} has no group");
        sector.stair_lock = StairLock::Idle;
        return;
    };

    let group = &mut level.stair_groups[idx];
    group.pending = group.pending.saturating_sub(1);
    if group.pending > 0 {
        return;
    }
    debug!("Staircase of {} steps finished, unlocking", group.sectors.len());
    for s in std::mem::take(&mut group.sectors) {
        let sector = &mut level.map_data.sectors[s];
        sector.stair_lock = StairLock::Idle;
        sector.stair_group = None;
    }
}

/// Raise the ring of a donut to the height of the sector around it while the
/// hole in the middle lowers to meet it.
///
/// Doom function name `EV_DoDonut`
pub fn ev_do_donut(line: usize, level: &mut Level) -> bool {
    let mut ret = false;
    let mut secnum = None;

    while let Some(s1) = find_sector_from_line_tag(&level.map_data, line, secnum) {
        secnum = Some(s1);
        let map = &level.map_data;
        // ALREADY MOVING?  IF SO, KEEP GOING...
        if map.sectors[s1].floordata.is_some() {
            continue;
        }
        // The ring is across the first line of the hole
        let Some(s2) = map.sectors[s1]
            .lines
            .first()
            .and_then(|l| map.linedefs[*l].other_sector(s1))
        else {
            continue;
        };
        if map.sectors[s2].floordata.is_some() {
            continue;
        }

        let s3 = map.sectors[s2].lines.iter().find_map(|l| {
            let line = &map.linedefs[*l];
            let back = line.backsector?;
            let other = if line.frontsector == s2 {
                back
            } else {
                line.frontsector
            };
            (other != s1).then_some(other)
        });
        let Some(s3) = s3 else {
            continue;
        };

        ret = true;
        let (texture, destheight) = (map.sectors[s3].floorpic, map.sectors[s3].floorheight);
        debug!("Donut: hole {s1}, ring {s2}, model {s3}, to {destheight}");

        //  Spawn rising slime
        let mut ring = FloorMove::new(
            FloorKind::DonutRaise,
            s2,
            Direction::Up,
            FLOORSPEED / 2.0,
            destheight,
        );
        ring.texture = texture;
        spawn_floor_move(ring, level);

        //  Spawn lowering donut-hole
        let hole = FloorMove::new(
            FloorKind::LowerFloor,
            s1,
            Direction::Down,
            FLOORSPEED / 2.0,
            destheight,
        );
        spawn_floor_move(hole, level);
    }
    ret
}

impl Think for FloorMove {
    fn think(&mut self, level: &mut Level, tic: &TicContext) -> bool {
        let res = move_plane(
            level,
            self.sector,
            self.speed,
            self.destheight,
            self.crush,
            Plane::Floor,
            self.direction,
            tic.game_tic,
        );

        if tic.level_time & 7 == 0
            && level.map_data.sectors[self.sector].floorheight != self.destheight
        {
            start_sector_sound(level, self.sector, SfxName::Stnmov);
        }

        if res != PlaneResult::PastDest {
            return false;
        }

        match (self.direction, self.kind) {
            (Direction::Up, FloorKind::DonutRaise)
            | (Direction::Down, FloorKind::LowerAndChange)
            | (_, FloorKind::GenFloorChg0 | FloorKind::GenFloorChgT) => {
                change_floor(level, self.sector, self.texture, self.newspecial);
            }
            (_, FloorKind::GenFloorChg) => {
                let special = level.map_data.sectors[self.sector].special;
                change_floor(level, self.sector, self.texture, special);
            }
            _ => {}
        }

        level.map_data.sectors[self.sector].floordata = None;
        stair_step_done(level, self.sector);
        if self.stopsound {
            start_sector_sound(level, self.sector, SfxName::Pstop);
        }
        debug!(
            "Floor {:?} in sector {} finished at {}",
            self.kind, self.sector, level.map_data.sectors[self.sector].floorheight
        );
        true
    }
}
