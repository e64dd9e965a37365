//! The static layout of a level: sectors, sidedefs and linedefs, all linked by
//! index. Built up one piece at a time by whoever loads the level.

use glam::Vec2;
use log::warn;

use crate::level::map_defs::{LineDef, Sector, SideDef};

#[derive(Debug, Default)]
pub struct MapData {
    name: String,
    pub sectors: Vec<Sector>,
    pub sidedefs: Vec<SideDef>,
    pub linedefs: Vec<LineDef>,
}

impl MapData {
    pub fn new(name: &str) -> MapData {
        MapData {
            name: name.to_owned(),
            ..MapData::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    pub fn sectors_mut(&mut self) -> &mut [Sector] {
        &mut self.sectors
    }

    pub fn linedefs(&self) -> &[LineDef] {
        &self.linedefs
    }

    pub fn sidedefs(&self) -> &[SideDef] {
        &self.sidedefs
    }

    /// Add a sector and return its index
    pub fn add_sector(
        &mut self,
        floorheight: f32,
        ceilingheight: f32,
        floorpic: usize,
        ceilingpic: usize,
        special: i16,
        tag: i16,
    ) -> usize {
        let num = self.sectors.len();
        self.sectors.push(Sector::new(
            num as u32,
            floorheight,
            ceilingheight,
            floorpic,
            ceilingpic,
            special,
            tag,
        ));
        num
    }

    /// Add a sidedef facing `sector` and return its index
    pub fn add_sidedef(
        &mut self,
        sector: usize,
        toptexture: Option<usize>,
        bottomtexture: Option<usize>,
        midtexture: Option<usize>,
    ) -> usize {
        self.sidedefs.push(SideDef {
            toptexture,
            bottomtexture,
            midtexture,
            sector,
        });
        self.sidedefs.len() - 1
    }

    /// Add a linedef between the given sidedefs and return its index. The line
    /// is registered with the sectors on both sides.
    #[allow(clippy::too_many_arguments)]
    pub fn add_line(
        &mut self,
        v1: Vec2,
        v2: Vec2,
        flags: u32,
        special: i16,
        tag: i16,
        front_sidedef: usize,
        back_sidedef: Option<usize>,
    ) -> usize {
        let frontsector = self.sidedefs[front_sidedef].sector;
        let backsector = back_sidedef.map(|side| self.sidedefs[side].sector);
        let num = self.linedefs.len();

        self.linedefs.push(LineDef {
            v1,
            v2,
            flags,
            special,
            tag,
            front_sidedef,
            back_sidedef,
            frontsector,
            backsector,
        });

        self.sectors[frontsector].lines.push(num);
        if let Some(back) = backsector {
            if back != frontsector {
                self.sectors[back].lines.push(num);
            }
        }
        num
    }

    /// Place each sector's sound origin in the middle of the bounding box of
    /// its lines.
    pub fn set_sector_sound_origins(&mut self) {
        for sector in self.sectors.iter_mut() {
            if sector.lines.is_empty() {
                warn!("Sector {} has no lines", sector.num);
                continue;
            }
            let first = &self.linedefs[sector.lines[0]];
            let mut min = first.v1.min(first.v2);
            let mut max = first.v1.max(first.v2);
            for line in sector.lines.iter().map(|l| &self.linedefs[*l]) {
                min = min.min(line.v1).min(line.v2);
                max = max.max(line.v1).max(line.v2);
            }
            sector.sound_origin = min + (max - min) / 2.0;
        }
    }
}
