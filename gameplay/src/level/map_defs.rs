use glam::Vec2;

use crate::{level::flags::LineDefFlags, thinker::ThinkerId};

/// Retrigger interlock state of a sector taking part in a generalized
/// staircase.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StairLock {
    #[default]
    Idle,
    /// A step mover is running on this sector
    Building,
    /// This step finished, others in the same build may still be running
    Done,
}

/// The SECTORS record, at runtime.
#[derive(Default)]
pub struct Sector {
    /// An incremented "ID" of sorts. Same as the index in `MapData::sectors`.
    pub num: u32,
    pub floorheight: f32,
    pub ceilingheight: f32,
    /// Is a tag or index to patch
    pub floorpic: usize,
    /// Is a tag or index to patch
    pub ceilingpic: usize,
    pub special: i16,
    pub tag: i16,

    /// Floor and ceiling heights before the last plane move, along with the
    /// game tic they were captured on. Used to interpolate between tics.
    pub prev_floorheight: f32,
    pub prev_ceilingheight: f32,
    pub interp_tic: u32,

    /// origin for any sounds played by the sector
    pub sound_origin: Vec2,

    /// The mover currently driving the floor, if any
    pub floordata: Option<ThinkerId>,
    /// The mover currently driving the ceiling, if any
    pub ceilingdata: Option<ThinkerId>,

    /// Cosmetic bob offset for liquid floors. `None` while not animating.
    pub animate: Option<f32>,

    pub stair_lock: StairLock,
    /// Index in to `Level::stair_groups` while `stair_lock` is not `Idle`
    pub stair_group: Option<usize>,

    /// Indexes of the linedefs bounding this sector
    pub lines: Vec<usize>,
}

impl std::fmt::Debug for Sector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sector")
            .field("num", &self.num)
            .field("floorheight", &self.floorheight)
            .field("ceilingheight", &self.ceilingheight)
            .field("floorpic", &self.floorpic)
            .field("ceilingpic", &self.ceilingpic)
            .field("special", &self.special)
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

impl Sector {
    pub fn new(
        num: u32,
        floorheight: f32,
        ceilingheight: f32,
        floorpic: usize,
        ceilingpic: usize,
        special: i16,
        tag: i16,
    ) -> Self {
        Self {
            num,
            floorheight,
            ceilingheight,
            floorpic,
            ceilingpic,
            special,
            tag,
            prev_floorheight: floorheight,
            prev_ceilingheight: ceilingheight,
            ..Self::default()
        }
    }

    /// Neither plane has a mover attached
    pub const fn is_idle(&self) -> bool {
        self.floordata.is_none() && self.ceilingdata.is_none()
    }

    /// Record the current heights as the interpolation start point. Only the
    /// first plane move in a tic records, so an elevator moving both planes
    /// keeps the heights from before either of them moved.
    pub fn snapshot(&mut self, game_tic: u32) {
        if self.interp_tic != game_tic {
            self.prev_floorheight = self.floorheight;
            self.prev_ceilingheight = self.ceilingheight;
            self.interp_tic = game_tic;
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct SideDef {
    pub toptexture: Option<usize>,
    pub bottomtexture: Option<usize>,
    pub midtexture: Option<usize>,
    /// Sector the SideDef is facing.
    pub sector: usize,
}

#[derive(Debug, Clone)]
pub struct LineDef {
    // Vertices, from v1 to v2.
    pub v1: Vec2,
    pub v2: Vec2,
    pub flags: u32,
    pub special: i16,
    pub tag: i16,

    pub front_sidedef: usize,
    /// `None` if one sided
    pub back_sidedef: Option<usize>,

    // Front and back sector.
    pub frontsector: usize,
    pub backsector: Option<usize>,
}

impl LineDef {
    pub const fn is_two_sided(&self) -> bool {
        LineDefFlags::TwoSided.is_set(self.flags)
    }

    /// The sector on the other side of this line from `sector`, if there is
    /// one.
    ///
    /// Doom function name `getNextSector`
    pub fn other_sector(&self, sector: usize) -> Option<usize> {
        if !self.is_two_sided() {
            return None;
        }
        if self.frontsector == sector {
            return self.backsector;
        }
        Some(self.frontsector)
    }
}
