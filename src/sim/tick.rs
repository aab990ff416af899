//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Every function
//! here takes the current frame by reference and returns a new one.

use super::physics::{
    floor_below, is_falling, jump_velocity, next_animation, on_stair_floor, resolve_velocity,
    stair_at,
};
use super::state::{Action, AnimationPhase, Game, Hen, Man, Pending};
use super::{Direction, Velocity};
use crate::consts::{EGG_POINTS, FOOD_POINTS};
use crate::settings::Settings;

/// Apply a player command to the man.
///
/// Only the man's velocity, facing and mode change; his position moves in
/// [`step_frame`]. `None` (no input this frame) leaves the game untouched.
pub fn apply_action(game: &Game, action: Option<Action>, settings: &Settings) -> Game {
    let Some(action) = action else {
        return game.clone();
    };
    if game.state.is_terminal() || game.is_frozen(settings) {
        log::trace!("{action:?} ignored: game over");
        return game.clone();
    }

    let man = match action {
        Action::WalkLeft => walk(game, Direction::Left, settings),
        Action::WalkRight => walk(game, Direction::Right, settings),
        Action::ClimbUp => climb(game, Direction::Up, settings),
        Action::ClimbDown => climb(game, Direction::Down, settings),
        Action::Jump => jump(game, settings),
        Action::Stop => Some(Man {
            velocity: Velocity::ZERO,
            ..game.man.clone()
        }),
    };

    match man {
        Some(man) => Game { man, ..game.clone() },
        None => {
            log::debug!("{action:?} rejected at {:?}", game.man.cell(settings));
            game.clone()
        }
    }
}

/// Start walking one column left or right.
///
/// Floor cells are solid from the side, and the man needs something under
/// him (floor, or any stair) to set off.
fn walk(game: &Game, direction: Direction, settings: &Settings) -> Option<Man> {
    let target = game.man.cell(settings).offset(direction.d_col(), 0);
    if game.floor.contains(&target) {
        return None;
    }
    if !floor_below(game, settings) && !stair_at(game, game.man.pos, settings) {
        return None;
    }
    Some(Man {
        climbing: false,
        facing: direction,
        velocity: game.man.velocity.with_dx(settings.move_speed * direction.d_col()),
        pending: Pending::Moving,
        ..game.man.clone()
    })
}

/// Start climbing a stair up or down.
///
/// Going up needs a stair two rows above the man's base (he is two cells
/// tall); going down needs one directly below. Only from an exact column.
fn climb(game: &Game, direction: Direction, settings: &Settings) -> Option<Man> {
    let man = &game.man;
    let reach = match direction {
        Direction::Up => -2 * settings.cell_height,
        _ => settings.cell_height,
    };
    let target = man.pos + Velocity::new(0, reach);

    if !man.pos.column_aligned(settings)
        || !stair_at(game, target, settings)
        || is_falling(game, settings)
    {
        return None;
    }
    Some(Man {
        climbing: true,
        facing: direction,
        velocity: man.velocity.with_dy(settings.climb_speed * direction.d_row()),
        pending: Pending::Climbing,
        ..man.clone()
    })
}

fn jump(game: &Game, settings: &Settings) -> Option<Man> {
    let man = &game.man;
    let supported = floor_below(game, settings) || on_stair_floor(game, settings);
    if !supported || man.climbing {
        return None;
    }
    Some(Man {
        climbing: false,
        velocity: jump_velocity(man, settings),
        pending: Pending::Jumping,
        ..man.clone()
    })
}

/// Advance the game by one frame.
///
/// Resolves the man's velocity, moves him, collects whatever is in his new
/// cell, runs the clock and re-evaluates the game state. Once the game is
/// over the man is held where he ended and nothing else changes.
pub fn step_frame(game: &Game, settings: &Settings) -> Game {
    if game.state.is_terminal() {
        return Game {
            man: Man {
                velocity: Velocity::ZERO,
                pending: Pending::Idle,
                animation: AnimationPhase::Phase1,
                ..game.man.clone()
            },
            ..game.clone()
        };
    }

    let velocity = resolve_velocity(game, settings);
    let pos = (game.man.pos + velocity).limit_to_area(settings.max_x(), settings.max_y());

    let man = Man {
        pos,
        velocity,
        pending: Pending::Idle,
        animation: next_animation(game, velocity, settings),
        ..game.man.clone()
    };

    let cell = man.cell(settings);
    let mut food = game.food.clone();
    let mut eggs = game.eggs.clone();
    let ate = food.remove(&cell);
    let got_egg = eggs.remove(&cell);

    let score = if got_egg {
        game.score + EGG_POINTS
    } else if ate {
        game.score + FOOD_POINTS
    } else {
        game.score
    };

    let time = if game.is_frozen(settings) {
        game.time
    } else {
        game.time - 1
    };

    let mut next = Game {
        man,
        floor: game.floor.clone(),
        stairs: game.stairs.clone(),
        food,
        eggs,
        hens: game.hens.iter().map(Hen::advance).collect(),
        score,
        time,
        state: game.state,
    };
    next.state = next.evaluate_state(settings);

    if got_egg || ate {
        log::debug!("Collected at {cell:?}, score {}", next.score);
    }
    if next.state != game.state {
        log::info!(
            "Game state {:?} -> {:?} (score {}, time {})",
            game.state,
            next.state,
            next.score,
            next.time
        );
    }

    next
}

/// Apply this frame's input, then advance one frame
pub fn tick(game: &Game, action: Option<Action>, settings: &Settings) -> Game {
    step_frame(&apply_action(game, action, settings), settings)
}
