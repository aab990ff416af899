//! Support checks and velocity resolution
//!
//! Everything here reads the current frame and answers a question about the
//! man; nothing mutates. Order matters in [`resolve_velocity`]: falling beats
//! any pending action, and pending actions beat steady-state motion.

use super::geometry::{Point, Velocity};
use super::state::{AnimationPhase, Game, Man, Pending};
use crate::settings::Settings;

/// Climbing sprite advances every this many pixels of x
const CLIMB_FRAME_STRIDE: i32 = 8;
/// Walking sprite advances every this many pixels of x
const WALK_FRAME_STRIDE: i32 = 4;

/// Solid floor directly under the man's cell
pub fn floor_below(game: &Game, settings: &Settings) -> bool {
    game.floor.contains(&game.man.cell(settings).below())
}

/// The cell containing `pos` is a stair
pub fn stair_at(game: &Game, pos: Point, settings: &Settings) -> bool {
    game.stairs.contains(&pos.to_cell(settings))
}

/// On a stair with floor somewhere on the row beneath: the man stands
/// there as if on floor.
///
/// The floor cell is not required to be under the man's own column.
pub fn on_stair_floor(game: &Game, settings: &Settings) -> bool {
    let cell = game.man.cell(settings);
    stair_at(game, game.man.pos, settings) && game.floor.iter().any(|f| f.row == cell.row + 1)
}

/// Neither on floor, nor climbing, nor standing on a stair
pub fn is_falling(game: &Game, settings: &Settings) -> bool {
    !floor_below(game, settings) && !game.man.climbing && !on_stair_floor(game, settings)
}

/// Initial jump velocity. No sideways arc when pressed against a wall.
pub fn jump_velocity(man: &Man, settings: &Settings) -> Velocity {
    let dx = settings.move_speed * man.facing.d_col();
    let dy = settings.jump_speed;
    if man.pos.x() == 0 || man.pos.x() == settings.max_x() {
        Velocity::new(0, dy)
    } else {
        Velocity::new(dx, dy)
    }
}

/// Velocity for a falling frame: gravity, capped, snapped onto floor
pub fn fall_velocity(game: &Game, settings: &Settings) -> Velocity {
    let man = &game.man;
    let dy = (man.velocity.dy() + settings.gravity).min(settings.max_fall_speed());
    let accelerated = man.velocity.with_dy(dy);

    let future = (man.pos + accelerated).to_cell(settings);
    if man.velocity.dy() > 0 && game.floor.contains(&future.below()) {
        // Land exactly on top of the floor instead of sinking into it
        man.velocity.with_dy(future.to_point(settings).y() - man.pos.y())
    } else {
        accelerated
    }
}

/// Velocity the man actually moves with this frame
pub fn resolve_velocity(game: &Game, settings: &Settings) -> Velocity {
    let man = &game.man;
    if is_falling(game, settings) {
        return fall_velocity(game, settings);
    }
    match man.pending {
        Pending::Jumping => man.velocity,
        Pending::Moving => man.velocity.with_dy(0),
        Pending::Climbing => man.velocity.with_dx(0),
        Pending::Idle if man.climbing => man.velocity.stop_if_in_cell(man.pos, settings),
        Pending::Idle => man.velocity.with_dy(0).stop_if_in_cell(man.pos, settings),
    }
}

/// Next sprite frame. Phases never repeat back to back while animating,
/// so the walk and climb cycles alternate with `Phase1`.
pub fn next_animation(game: &Game, velocity: Velocity, settings: &Settings) -> AnimationPhase {
    let man = &game.man;
    let previous = man.animation;

    if man.climbing && man.pos.x() % CLIMB_FRAME_STRIDE == 0 && previous != AnimationPhase::Phase2 {
        AnimationPhase::Phase2
    } else if velocity.dx() != 0
        && man.pos.x() % WALK_FRAME_STRIDE == 0
        && previous == AnimationPhase::Phase1
        && !is_falling(game, settings)
    {
        AnimationPhase::Phase3
    } else {
        AnimationPhase::Phase1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::parse_level;
    use crate::sim::geometry::{Cell, Direction};

    fn game_from(text: &str) -> (Game, Settings) {
        let s = Settings::default();
        let cells = parse_level(text, &s).unwrap();
        (Game::from_level(&cells, &s).unwrap(), s)
    }

    #[test]
    fn test_standing_on_floor() {
        let (game, s) = game_from("..o\n.M.\n###");
        assert!(floor_below(&game, &s));
        assert!(!is_falling(&game, &s));
    }

    #[test]
    fn test_in_the_air() {
        let (game, s) = game_from("..o\n.M.\n...\n###");
        assert!(!floor_below(&game, &s));
        assert!(is_falling(&game, &s));
    }

    #[test]
    fn test_climbing_never_falls() {
        let (mut game, s) = game_from("..o\n.M.\n...");
        game.man.climbing = true;
        assert!(!is_falling(&game, &s));
    }

    #[test]
    fn test_stair_with_floor_anywhere_on_next_row() {
        // Stair under the man's feet, floor on the next row but not below him
        let (mut game, s) = game_from("..o\n.M.\n#..");
        game.stairs.insert(Cell::new(1, 1));
        assert!(!floor_below(&game, &s));
        assert!(on_stair_floor(&game, &s));
        assert!(!is_falling(&game, &s));

        game.floor.clear();
        assert!(!on_stair_floor(&game, &s));
        assert!(is_falling(&game, &s));
    }

    #[test]
    fn test_jump_arc() {
        let s = Settings::default();
        let mut man = Man::new(Cell::new(5, 5), &s);
        assert_eq!(jump_velocity(&man, &s), Velocity::new(-8, -16));

        man.facing = Direction::Right;
        assert_eq!(jump_velocity(&man, &s), Velocity::new(8, -16));

        man.facing = Direction::Up;
        assert_eq!(jump_velocity(&man, &s), Velocity::new(0, -16));
    }

    #[test]
    fn test_jump_at_walls_is_vertical() {
        let s = Settings::default();
        let mut man = Man::new(Cell::new(0, 5), &s);
        assert_eq!(jump_velocity(&man, &s), Velocity::new(0, -16));

        man = Man::new(Cell::new(s.grid_width - 1, 5), &s);
        man.facing = Direction::Right;
        assert_eq!(man.pos.x(), s.max_x());
        assert_eq!(jump_velocity(&man, &s), Velocity::new(0, -16));
    }

    #[test]
    fn test_gravity_and_terminal_speed() {
        let (mut game, s) = game_from("..o\n.M.\n...\n...\n...\n...\n###");
        game.man.velocity = Velocity::new(0, -16);
        assert_eq!(resolve_velocity(&game, &s), Velocity::new(0, -14));

        game.man.velocity = Velocity::new(8, 15);
        assert_eq!(resolve_velocity(&game, &s), Velocity::new(8, 16));
    }

    #[test]
    fn test_landing_snaps_to_floor() {
        // Man falling through row 1 with floor on row 3
        let (mut game, s) = game_from("..o\n...\n...\n###\n.M.");
        game.man.pos = Point::new(48, 32 + 20);
        game.man.velocity = Velocity::new(0, 12);
        let v = resolve_velocity(&game, &s);
        // Lands at the top of row 2, exactly on the floor
        assert_eq!(v, Velocity::new(0, 12));
        assert_eq!(game.man.pos.y() + v.dy(), 2 * 32);
    }

    #[test]
    fn test_rising_does_not_snap() {
        let (mut game, s) = game_from("..o\n...\n...\n###\n.M.");
        game.man.pos = Point::new(48, 32 + 20);
        game.man.velocity = Velocity::new(0, -2);
        assert_eq!(resolve_velocity(&game, &s), Velocity::new(0, 0));
    }

    #[test]
    fn test_pending_priorities() {
        let (mut game, s) = game_from("..o\n.M.\n###");
        game.man.velocity = Velocity::new(8, -16);

        game.man.pending = Pending::Jumping;
        assert_eq!(resolve_velocity(&game, &s), Velocity::new(8, -16));

        game.man.pending = Pending::Moving;
        assert_eq!(resolve_velocity(&game, &s), Velocity::new(8, 0));

        game.man.pending = Pending::Climbing;
        assert_eq!(resolve_velocity(&game, &s), Velocity::new(0, -16));
    }

    #[test]
    fn test_idle_stops_at_cell_boundary() {
        let (mut game, s) = game_from("..o\n.M.\n###");
        game.man.velocity = Velocity::new(8, 0);
        // Aligned: stop
        assert_eq!(resolve_velocity(&game, &s), Velocity::ZERO);
        // Mid-cell: keep walking
        game.man.pos = Point::new(56, 32);
        assert_eq!(resolve_velocity(&game, &s), Velocity::new(8, 0));
    }

    #[test]
    fn test_climbing_stops_at_row_boundary() {
        let (mut game, s) = game_from("..o\n.M.\n.H.");
        game.man.climbing = true;
        game.man.velocity = Velocity::new(0, -8);
        game.man.pos = Point::new(48, 40);
        assert_eq!(resolve_velocity(&game, &s), Velocity::new(0, -8));
        game.man.pos = Point::new(48, 32);
        assert_eq!(resolve_velocity(&game, &s), Velocity::ZERO);
    }

    #[test]
    fn test_animation_cycles() {
        let (mut game, s) = game_from("..o\n.M.\n###");
        assert_eq!(next_animation(&game, Velocity::ZERO, &s), AnimationPhase::Phase1);

        let walking = Velocity::new(8, 0);
        assert_eq!(next_animation(&game, walking, &s), AnimationPhase::Phase3);
        game.man.animation = AnimationPhase::Phase3;
        assert_eq!(next_animation(&game, walking, &s), AnimationPhase::Phase1);

        game.man.climbing = true;
        game.man.animation = AnimationPhase::Phase1;
        assert_eq!(next_animation(&game, Velocity::ZERO, &s), AnimationPhase::Phase2);
        game.man.animation = AnimationPhase::Phase2;
        assert_eq!(next_animation(&game, Velocity::ZERO, &s), AnimationPhase::Phase1);
    }
}
