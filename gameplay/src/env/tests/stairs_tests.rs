use super::{floor_mover as mover, run_tics, Builder, NUKAGE};
use crate::{
    env::{
        floor::{ev_build_stairs, FloorKind, FloorMove, StairKind},
        specials::Direction,
    },
    level::{map_defs::StairLock, Level, TicContext},
    thinker::ThinkerData,
};

const TAG: i16 = 5;

/// `count` sectors at `floor`, each the front of a line into the next. The
/// first is tagged and holds the trigger line.
fn chain(b: &mut Builder, floor: f32, count: usize) -> (Vec<usize>, usize) {
    let sectors: Vec<usize> = (0..count)
        .map(|i| b.sector(floor, 256.0, if i == 0 { TAG } else { 0 }))
        .collect();
    for pair in sectors.windows(2) {
        b.two_sided(pair[0], pair[1]);
    }
    let line = b.trigger(sectors[0], 0, TAG);
    (sectors, line)
}

fn generalized(step: f32, direction: Direction, ignore_texture: bool) -> StairKind {
    StairKind::Generalized {
        step,
        speed: 1.0,
        direction,
        ignore_texture,
    }
}

fn make_busy(level: &mut Level, sec: usize) {
    let id = level.thinkers.push(ThinkerData::FloorMove(FloorMove::new(
        FloorKind::LowerFloor,
        sec,
        Direction::Down,
        1.0,
        -64.0,
    )));
    level.map_data.sectors[sec].floordata = Some(id);
}

#[test]
fn build8_steps_up_slowly() {
    let mut b = Builder::new("MAP01");
    let (sectors, line) = chain(&mut b, 0.0, 3);
    let (mut level, _rx) = b.build();

    assert!(ev_build_stairs(line, StairKind::Build8, &mut level));
    let steps: Vec<FloorMove> = sectors.iter().map(|s| mover(&level, *s)).collect();
    assert_eq!(
        steps.iter().map(|f| f.destheight).collect::<Vec<_>>(),
        vec![8.0, 16.0, 24.0]
    );
    for step in &steps {
        assert_eq!(step.kind, FloorKind::BuildStair);
        assert_eq!(step.speed, 0.25);
        assert_eq!(step.direction, Direction::Up);
        assert!(!step.crush);
    }

    let mut tic = TicContext::default();
    run_tics(&mut level, &mut tic, 96);
    assert!(level.thinkers.is_empty());
    let heights: Vec<f32> = sectors
        .iter()
        .map(|s| level.map_data.sectors[*s].floorheight)
        .collect();
    assert_eq!(heights, vec![8.0, 16.0, 24.0]);
}

#[test]
fn turbo16_steps_crush() {
    let mut b = Builder::new("MAP01");
    let (sectors, line) = chain(&mut b, 32.0, 2);
    let (mut level, _rx) = b.build();

    assert!(ev_build_stairs(line, StairKind::Turbo16, &mut level));
    let first = mover(&level, sectors[0]);
    let second = mover(&level, sectors[1]);
    assert_eq!((first.destheight, second.destheight), (48.0, 64.0));
    assert_eq!(first.speed, 4.0);
    assert!(first.crush && second.crush);
}

#[test]
fn different_floor_texture_ends_the_staircase() {
    let mut b = Builder::new("MAP01");
    let seed = b.sector(0.0, 256.0, TAG);
    let slime = b.sector_with(0.0, 256.0, NUKAGE, 0, 0);
    let beyond = b.sector(0.0, 256.0, 0);
    b.two_sided(seed, slime);
    b.two_sided(slime, beyond);
    let line = b.trigger(seed, 0, TAG);
    let (mut level, _rx) = b.build();

    assert!(ev_build_stairs(line, StairKind::Build8, &mut level));
    assert_eq!(mover(&level, seed).destheight, 8.0);
    assert!(level.map_data.sectors[slime].floordata.is_none());
    assert!(level.map_data.sectors[beyond].floordata.is_none());
}

#[test]
fn only_lines_facing_out_of_the_step_are_followed() {
    let mut b = Builder::new("MAP01");
    let seed = b.sector(0.0, 256.0, TAG);
    let other = b.sector(0.0, 256.0, 0);
    // front side is the other sector
    b.two_sided(other, seed);
    let line = b.trigger(seed, 0, TAG);
    let (mut level, _rx) = b.build();

    assert!(ev_build_stairs(line, StairKind::Build8, &mut level));
    assert!(level.map_data.sectors[other].floordata.is_none());
    assert_eq!(level.thinkers.len(), 1);
}

#[test]
fn busy_neighbour_still_counts_a_step() {
    let mut b = Builder::new("MAP01");
    let seed = b.sector(0.0, 256.0, TAG);
    let busy = b.sector(0.0, 256.0, 0);
    let next = b.sector(0.0, 256.0, 0);
    b.two_sided(seed, busy);
    b.two_sided(seed, next);
    let line = b.trigger(seed, 0, TAG);
    let (mut level, _rx) = b.build();
    make_busy(&mut level, busy);

    assert!(ev_build_stairs(line, StairKind::Build8, &mut level));
    assert_eq!(mover(&level, seed).destheight, 8.0);
    assert_eq!(mover(&level, busy).kind, FloorKind::LowerFloor);
    assert_eq!(mover(&level, next).destheight, 24.0);
}

#[test]
fn busy_seed_is_skipped() {
    let mut b = Builder::new("MAP01");
    let (sectors, line) = chain(&mut b, 0.0, 2);
    let (mut level, _rx) = b.build();
    make_busy(&mut level, sectors[0]);

    assert!(!ev_build_stairs(line, StairKind::Build8, &mut level));
    assert!(level.map_data.sectors[sectors[1]].floordata.is_none());
}

#[test]
fn search_resumes_after_last_step() {
    let mut b = Builder::new("MAP01");
    let seed = b.sector(0.0, 256.0, TAG);
    let missed = b.sector(0.0, 256.0, TAG);
    let step = b.sector(0.0, 256.0, 0);
    b.two_sided(seed, step);
    let line = b.trigger(seed, 0, TAG);
    let (mut level, _rx) = b.build();

    assert!(ev_build_stairs(line, StairKind::Build8, &mut level));
    assert_eq!(mover(&level, step).destheight, 16.0);
    // the last step is above the second tagged sector, so it is never found
    assert!(level.map_data.sectors[missed].floordata.is_none());
    assert_eq!(level.thinkers.len(), 2);
}

#[test]
fn earlier_step_does_not_restart_the_seed() {
    let mut b = Builder::new("MAP01");
    let step = b.sector(0.0, 256.0, 0);
    let seed = b.sector(0.0, 256.0, TAG);
    let second = b.sector(64.0, 256.0, TAG);
    b.two_sided(seed, step);
    let line = b.trigger(seed, 0, TAG);
    let (mut level, _rx) = b.build();

    assert!(ev_build_stairs(line, StairKind::Build8, &mut level));
    assert_eq!(mover(&level, seed).destheight, 8.0);
    assert_eq!(mover(&level, step).destheight, 16.0);
    assert_eq!(mover(&level, second).destheight, 72.0);
    assert_eq!(level.thinkers.len(), 3);
}

#[test]
fn generalized_stairs_lock_until_every_step_is_done() {
    let mut b = Builder::new("MAP01");
    let (sectors, line) = chain(&mut b, 0.0, 3);
    let (mut level, _rx) = b.build();
    let kind = generalized(8.0, Direction::Up, false);

    assert!(ev_build_stairs(line, kind, &mut level));
    for (i, s) in sectors.iter().enumerate() {
        let sector = &level.map_data.sectors[*s];
        assert_eq!(sector.stair_lock, StairLock::Building);
        assert_eq!(sector.stair_group, Some(0));
        assert_eq!(mover(&level, *s).destheight, 8.0 * (i + 1) as f32);
    }
    assert_eq!(level.stair_groups[0].pending, 3);
    assert!(!ev_build_stairs(line, kind, &mut level));

    let mut tic = TicContext::default();
    run_tics(&mut level, &mut tic, 8);
    let seed = &level.map_data.sectors[sectors[0]];
    assert!(seed.floordata.is_none());
    assert_eq!(seed.stair_lock, StairLock::Done);
    assert_eq!(seed.stair_group, Some(0));
    assert_eq!(level.stair_groups[0].pending, 2);
    // the seed has stopped but the staircase is still going
    assert!(!ev_build_stairs(line, kind, &mut level));

    run_tics(&mut level, &mut tic, 16);
    assert!(level.thinkers.is_empty());
    for s in &sectors {
        let sector = &level.map_data.sectors[*s];
        assert_eq!(sector.stair_lock, StairLock::Idle);
        assert_eq!(sector.stair_group, None);
    }
    assert_eq!(level.stair_groups[0].pending, 0);
    assert!(level.stair_groups[0].sectors.is_empty());

    assert!(ev_build_stairs(line, kind, &mut level));
    assert_eq!(mover(&level, sectors[0]).destheight, 16.0);
    assert_eq!(mover(&level, sectors[2]).destheight, 32.0);
    assert_eq!(level.stair_groups.len(), 1);
}

#[test]
fn generalized_stairs_go_down() {
    let mut b = Builder::new("MAP01");
    let (sectors, line) = chain(&mut b, 64.0, 3);
    let (mut level, _rx) = b.build();

    assert!(ev_build_stairs(
        line,
        generalized(4.0, Direction::Down, false),
        &mut level
    ));
    let dests: Vec<f32> = sectors
        .iter()
        .map(|s| mover(&level, *s).destheight)
        .collect();
    assert_eq!(dests, vec![60.0, 56.0, 52.0]);
    assert_eq!(mover(&level, sectors[1]).direction, Direction::Down);
}

#[test]
fn generalized_stairs_can_ignore_texture() {
    let mut b = Builder::new("MAP01");
    let seed = b.sector(0.0, 256.0, TAG);
    let slime = b.sector_with(0.0, 256.0, NUKAGE, 0, 0);
    b.two_sided(seed, slime);
    let line = b.trigger(seed, 0, TAG);
    let (mut level, _rx) = b.build();

    assert!(ev_build_stairs(
        line,
        generalized(8.0, Direction::Up, true),
        &mut level
    ));
    assert_eq!(mover(&level, slime).destheight, 16.0);
}

#[test]
fn generalized_busy_neighbour_takes_no_step() {
    let mut b = Builder::new("MAP01");
    let seed = b.sector(0.0, 256.0, TAG);
    let busy = b.sector(0.0, 256.0, 0);
    let next = b.sector(0.0, 256.0, 0);
    b.two_sided(seed, busy);
    b.two_sided(seed, next);
    let line = b.trigger(seed, 0, TAG);
    let (mut level, _rx) = b.build();
    make_busy(&mut level, busy);

    assert!(ev_build_stairs(
        line,
        generalized(8.0, Direction::Up, false),
        &mut level
    ));
    assert_eq!(mover(&level, next).destheight, 16.0);
    assert_eq!(level.map_data.sectors[busy].stair_lock, StairLock::Idle);
}
