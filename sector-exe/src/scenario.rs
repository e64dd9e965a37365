//! A level described in TOML: sectors, sides and lines by index, the wall
//! textures the movers need heights for, and the line triggers to fire at set
//! tics.

use std::{error::Error, fmt, fs, io, path::Path};

use gameplay::{
    glam::Vec2,
    log::{debug, info},
    Level, LevelOptions, MapData, PicData, ThingClearance,
};
use serde::Deserialize;
use sound_traits::SndServerTx;

#[derive(Debug)]
pub enum ScenarioError {
    Io(io::Error),
    Toml(toml::de::Error),
    UnknownTexture(String),
    BadIndex {
        what: &'static str,
        index: usize,
        len: usize,
    },
}

impl Error for ScenarioError {}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioError::Io(e) => write!(f, "Couldn't read scenario: {e}"),
            ScenarioError::Toml(e) => write!(f, "Invalid scenario: {e}"),
            ScenarioError::UnknownTexture(name) => {
                write!(f, "Wall texture {name} is not in the scenario walls")
            }
            ScenarioError::BadIndex { what, index, len } => {
                write!(f, "No {what} {index}, the scenario has {len}")
            }
        }
    }
}

impl From<io::Error> for ScenarioError {
    fn from(e: io::Error) -> Self {
        ScenarioError::Io(e)
    }
}

impl From<toml::de::Error> for ScenarioError {
    fn from(e: toml::de::Error) -> Self {
        ScenarioError::Toml(e)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    /// Walk over the line
    Cross,
    /// Press the line as a switch
    Use,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WallDef {
    pub name: String,
    pub height: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SectorDef {
    pub floor: f32,
    pub ceiling: f32,
    pub floorpic: String,
    pub ceilingpic: String,
    #[serde(default)]
    pub special: i16,
    #[serde(default)]
    pub tag: i16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SideDef {
    pub sector: usize,
    pub upper: Option<String>,
    pub lower: Option<String>,
    pub middle: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LineDef {
    pub v1: [f32; 2],
    pub v2: [f32; 2],
    #[serde(default)]
    pub flags: u32,
    #[serde(default)]
    pub special: i16,
    #[serde(default)]
    pub tag: i16,
    pub front: usize,
    pub back: Option<usize>,
}

/// The tallest thing standing in a sector
#[derive(Debug, Clone, Deserialize)]
pub struct ThingDef {
    pub sector: usize,
    pub height: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TriggerDef {
    pub tic: u32,
    pub line: usize,
    pub action: Activation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub tics: Option<u32>,
    #[serde(default)]
    pub walls: Vec<WallDef>,
    pub sectors: Vec<SectorDef>,
    pub sides: Vec<SideDef>,
    pub lines: Vec<LineDef>,
    #[serde(default)]
    pub things: Vec<ThingDef>,
    #[serde(default)]
    pub triggers: Vec<TriggerDef>,
}

fn check(what: &'static str, index: usize, len: usize) -> Result<usize, ScenarioError> {
    if index < len {
        Ok(index)
    } else {
        Err(ScenarioError::BadIndex { what, index, len })
    }
}

impl Scenario {
    pub fn from_toml(text: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = toml::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        info!("Loading scenario {path:?}");
        Self::from_toml(&fs::read_to_string(path)?)
    }

    /// Every index must point at something that exists
    fn validate(&self) -> Result<(), ScenarioError> {
        for side in &self.sides {
            check("sector", side.sector, self.sectors.len())?;
        }
        for line in &self.lines {
            check("side", line.front, self.sides.len())?;
            if let Some(back) = line.back {
                check("side", back, self.sides.len())?;
            }
        }
        for thing in &self.things {
            check("sector", thing.sector, self.sectors.len())?;
        }
        for trigger in &self.triggers {
            check("line", trigger.line, self.lines.len())?;
        }
        Ok(())
    }

    fn wall(pics: &PicData, name: &Option<String>) -> Result<Option<usize>, ScenarioError> {
        name.as_ref()
            .map(|n| {
                pics.wall_num_for_name(n)
                    .ok_or_else(|| ScenarioError::UnknownTexture(n.clone()))
            })
            .transpose()
    }

    /// Build the level. Flats are taken from whatever the sectors name,
    /// wall textures must be listed in `walls`.
    pub fn build(&self, options: LevelOptions, snd: SndServerTx) -> Result<Level, ScenarioError> {
        let mut pics = PicData::new();
        for wall in &self.walls {
            pics.add_wall(&wall.name, wall.height);
        }

        let mut map = MapData::new(&self.name);
        for s in &self.sectors {
            let floorpic = pics.add_flat(&s.floorpic);
            let ceilingpic = pics.add_flat(&s.ceilingpic);
            map.add_sector(s.floor, s.ceiling, floorpic, ceilingpic, s.special, s.tag);
        }
        for side in &self.sides {
            let upper = Self::wall(&pics, &side.upper)?;
            let lower = Self::wall(&pics, &side.lower)?;
            let middle = Self::wall(&pics, &side.middle)?;
            map.add_sidedef(side.sector, upper, lower, middle);
        }
        for l in &self.lines {
            map.add_line(
                Vec2::from(l.v1),
                Vec2::from(l.v2),
                l.flags,
                l.special,
                l.tag,
                l.front,
                l.back,
            );
        }
        debug!(
            "Scenario {}: {} flats, {} walls",
            self.name,
            pics.flats().len(),
            pics.walls().len()
        );

        let mut level = Level::new(map, pics, options, snd);
        if !self.things.is_empty() {
            let mut things = ThingClearance::new();
            for thing in &self.things {
                things.set_height(thing.sector, thing.height);
            }
            level.set_things(Box::new(things));
        }
        Ok(level)
    }

    /// Triggers scheduled for `tic`, in file order
    pub fn triggers_at(&self, tic: u32) -> impl Iterator<Item = &TriggerDef> + '_ {
        self.triggers.iter().filter(move |t| t.tic == tic)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::channel;

    use gameplay::{LevelOptions, LineDefFlags};

    use super::{Activation, Scenario, ScenarioError};
    use crate::DEMO_SCENARIO;

    const SMALL: &str = r#"
name = "E2M2"

[[walls]]
name = "STEP2"
height = 16.0

[[sectors]]
floor = 0.0
ceiling = 128.0
floorpic = "FLOOR4_8"
ceilingpic = "CEIL3_5"
tag = 1

[[sectors]]
floor = 64.0
ceiling = 128.0
floorpic = "nukage1"
ceilingpic = "CEIL3_5"

[[sides]]
sector = 0
lower = "STEP2"

[[sides]]
sector = 1

[[lines]]
v1 = [0.0, 0.0]
v2 = [64.0, 0.0]
flags = 4
front = 0
back = 1

[[lines]]
v1 = [64.0, 0.0]
v2 = [64.0, 64.0]
special = 30
tag = 1
front = 1

[[triggers]]
tic = 3
line = 1
action = "cross"
"#;

    #[test]
    fn builds_the_level() {
        let scenario = Scenario::from_toml(SMALL).unwrap();
        let (tx, _rx) = channel();
        let level = scenario.build(LevelOptions::default(), tx).unwrap();

        let map = &level.map_data;
        assert_eq!(map.name(), "E2M2");
        assert_eq!(map.sectors().len(), 2);
        assert_eq!(map.sectors()[0].lines, vec![0]);
        assert_eq!(map.sectors()[1].lines, vec![0, 1]);
        assert!(LineDefFlags::TwoSided.is_set(map.linedefs()[0].flags));
        assert_eq!(map.linedefs()[0].backsector, Some(1));
        assert!(level.is_liquid(1));
        assert_eq!(level.pic_data().wall_height(0), Some(16.0));

        assert_eq!(scenario.triggers_at(3).count(), 1);
        assert_eq!(scenario.triggers_at(3).next().unwrap().action, Activation::Cross);
        assert_eq!(scenario.triggers_at(4).count(), 0);
    }

    #[test]
    fn unknown_wall_texture() {
        let text = SMALL.replace("lower = \"STEP2\"", "lower = \"STEP9\"");
        let scenario = Scenario::from_toml(&text).unwrap();
        let (tx, _rx) = channel();
        match scenario.build(LevelOptions::default(), tx) {
            Err(ScenarioError::UnknownTexture(name)) => assert_eq!(name, "STEP9"),
            Err(e) => panic!("wrong error {e}"),
            Ok(_) => panic!("built with a missing texture"),
        }
    }

    #[test]
    fn bad_indices_are_rejected() {
        let text = SMALL.replace("back = 1", "back = 7");
        assert!(matches!(
            Scenario::from_toml(&text),
            Err(ScenarioError::BadIndex {
                what: "side",
                index: 7,
                len: 2
            })
        ));

        let text = SMALL.replace("line = 1", "line = 2");
        assert!(matches!(
            Scenario::from_toml(&text),
            Err(ScenarioError::BadIndex { what: "line", .. })
        ));

        assert!(matches!(
            Scenario::from_toml("name = 3"),
            Err(ScenarioError::Toml(_))
        ));
    }

    #[test]
    fn demo_scenario_is_valid() {
        let scenario = Scenario::from_toml(DEMO_SCENARIO).unwrap();
        let (tx, _rx) = channel();
        assert!(scenario.build(LevelOptions::default(), tx).is_ok());
        assert!(!scenario.triggers.is_empty());
    }
}
