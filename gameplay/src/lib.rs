//! Moving sector planes and the thinkers that drive them.
//!
//! A `Level` owns the map data and every thinker. Line specials start movers
//! through the `ev_*` functions, and `Level::run_thinkers` advances all of
//! them by one tic.

mod env;
mod level;
mod pic;
mod thinker;

pub use env::{
    elevator::{ev_do_elevator, Elevator, ElevatorKind, ELEVATORSPEED},
    floor::{
        ev_build_stairs, ev_do_change, ev_do_donut, ev_do_floor, ev_do_gen_floor, ChangeKind,
        FloorChange, FloorKind, FloorMove, FloorTarget, GenFloor, StairKind, FLOORSPEED,
    },
    liquid::{init_animated_liquids, start_animated_liquid, AnimatedLiquid},
    specials::{
        activate_line_action, cross_action, cross_special_line, find_highest_floor_surrounding,
        find_lowest_ceiling_surrounding, find_lowest_floor_surrounding,
        find_model_ceiling_sector, find_model_floor_sector, find_next_highest_floor,
        find_next_lowest_floor, find_sector_from_line_tag,
        find_sector_from_line_tag_with_lower_bound, get_next_sector, move_plane,
        start_sector_sound, use_action, use_special_line, Direction, LineAction, Plane,
        PlaneResult, Trigger,
    },
};
pub use glam;
pub use level::{
    flags::LineDefFlags,
    map_data::MapData,
    map_defs::{LineDef, Sector, SideDef, StairLock},
    ChangeSector, Level, LevelOptions, NoThings, StairGroup, ThingClearance, TicContext,
};
pub use log;
pub use pic::{FlatPic, PicData, WallPic};
pub use thinker::{Think, ThinkerAlloc, ThinkerClass, ThinkerData, ThinkerId};
