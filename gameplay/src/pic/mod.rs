//! Texture data the sector movers need to know about:
//! - Flats, and which of them are liquid
//! - Wall textures, for their heights only
//!
//! Nothing here holds pixel data.

use log::warn;

/// Flats whose name starts with one of these are liquid and get the bobbing
/// animation.
const LIQUID_FLATS: [&str; 6] = ["NUKAGE", "FWATER", "SWATER", "LAVA", "BLOOD", "SLIME0"];

/// `RROCK05` to `RROCK08` are the animated lava rock. The rest of the `RROCK`
/// set is solid.
const LIQUID_RROCK: [&str; 4] = ["RROCK05", "RROCK06", "RROCK07", "RROCK08"];

#[derive(Debug, Clone)]
pub struct FlatPic {
    pub name: String,
    pub liquid: bool,
}

impl FlatPic {
    pub fn new(name: &str) -> Self {
        let name = name.to_ascii_uppercase();
        let liquid = if name.starts_with("RROCK") {
            LIQUID_RROCK.contains(&name.as_str())
        } else {
            LIQUID_FLATS.iter().any(|prefix| name.starts_with(prefix))
        };
        Self { name, liquid }
    }
}

#[derive(Debug, Clone)]
pub struct WallPic {
    pub name: String,
    /// Height in map units
    pub height: f32,
}

#[derive(Debug, Default)]
pub struct PicData {
    flats: Vec<FlatPic>,
    walls: Vec<WallPic>,
}

impl PicData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a flat and return its number. Registering a name twice returns
    /// the existing number.
    pub fn add_flat(&mut self, name: &str) -> usize {
        if let Some(num) = self.flat_num_for_name(name) {
            return num;
        }
        self.flats.push(FlatPic::new(name));
        self.flats.len() - 1
    }

    /// Register a wall texture and return its number. Registering a name twice
    /// updates the height and returns the existing number.
    pub fn add_wall(&mut self, name: &str, height: f32) -> usize {
        if let Some(num) = self.wall_num_for_name(name) {
            self.walls[num].height = height;
            return num;
        }
        self.walls.push(WallPic {
            name: name.to_ascii_uppercase(),
            height,
        });
        self.walls.len() - 1
    }

    pub fn flats(&self) -> &[FlatPic] {
        &self.flats
    }

    pub fn walls(&self) -> &[WallPic] {
        &self.walls
    }

    /// Doom function name `R_FlatNumForName`
    pub fn flat_num_for_name(&self, name: &str) -> Option<usize> {
        self.flats
            .iter()
            .position(|f| f.name.eq_ignore_ascii_case(name))
    }

    /// Doom function name `R_TextureNumForName`
    pub fn wall_num_for_name(&self, name: &str) -> Option<usize> {
        self.walls
            .iter()
            .position(|w| w.name.eq_ignore_ascii_case(name))
    }

    pub fn is_liquid(&self, flat: usize) -> bool {
        match self.flats.get(flat) {
            Some(flat) => flat.liquid,
            None => {
                warn!("is_liquid() on unknown flat {flat}");
                false
            }
        }
    }

    /// Doom uses `textureheight[]` for this
    pub fn wall_height(&self, wall: usize) -> Option<f32> {
        self.walls.get(wall).map(|w| w.height)
    }
}
