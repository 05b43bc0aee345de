use cw_core::{layout, BoardDimension, Coord, Direction, GamePhase, RasterSize};
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionMode {
    /// Tap the left or right half of the screen to turn.
    Relative,
    /// Touch the side of the screen you want to go toward.
    Absolute,
    /// Touch the spot you want the player to head for.
    Following,
}

/// Raw pointer position in raster pixels.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
}

impl PointerSample {
    pub fn new(x: f32, y: f32) -> Self {
        PointerSample { x, y }
    }
}

/// What a tap asks the game to do outside of steering.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseAction {
    Restart,
    Resume,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TouchState {
    #[default]
    Idle,
    /// `tapped` latches once relative mode has used this touch.
    Touching { tapped: bool },
}

/// Everything one resolution looks at besides the resolver's own state.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct TouchInput {
    /// `None` while the player has not picked a touch mode.
    pub mode: Option<InteractionMode>,
    pub pointer: Option<PointerSample>,
    pub current: Direction,
    pub player_position: Coord,
    pub dim: BoardDimension,
    pub raster: RasterSize,
}

#[derive(Clone, Debug, Default)]
pub struct TouchResolver {
    state: TouchState,
}

impl TouchResolver {
    pub fn new() -> Self {
        TouchResolver::default()
    }

    pub fn state(&self) -> TouchState {
        self.state
    }

    pub fn is_touching(&self) -> bool {
        matches!(self.state, TouchState::Touching { .. })
    }

    /// A finger went down. Also reports whether the tap should restart or
    /// resume the game.
    pub fn touch_start(&mut self, phase: GamePhase) -> Option<PhaseAction> {
        self.state = TouchState::Touching { tapped: false };
        match phase {
            GamePhase::EndGame => Some(PhaseAction::Restart),
            GamePhase::Paused | GamePhase::Initializing => Some(PhaseAction::Resume),
            GamePhase::Running => None,
        }
    }

    pub fn touch_end(&mut self) {
        self.state = TouchState::Idle;
    }

    /// Direction the player should be heading given this sample. Falls back
    /// to `input.current` whenever the sample carries no intent.
    pub fn resolve(&mut self, input: &TouchInput) -> Result<Direction> {
        let TouchState::Touching { tapped } = self.state else {
            return Ok(input.current);
        };
        let (Some(mode), Some(pointer)) = (input.mode, input.pointer) else {
            return Ok(input.current);
        };
        let direction = match mode {
            InteractionMode::Relative => {
                if tapped {
                    input.current
                } else {
                    self.state = TouchState::Touching { tapped: true };
                    if pointer.x < input.raster.width as f32 / 2.0 {
                        input.current.rotate_left()
                    } else {
                        input.current.rotate_right()
                    }
                }
            }
            InteractionMode::Absolute => {
                let (center_x, center_y) = input.raster.center();
                quadrant(center_x - pointer.x, center_y - pointer.y)
            }
            InteractionMode::Following => {
                let player = layout::rect(input.dim, input.raster, input.player_position)?;
                quadrant(player.x() as f32 - pointer.x, player.y() as f32 - pointer.y)
            }
        };
        Ok(direction)
    }

    /// Like [resolve](Self::resolve), but only yields a direction when it
    /// differs from the current one and so has to be dispatched.
    pub fn directive(&mut self, input: &TouchInput) -> Result<Option<Direction>> {
        let direction = self.resolve(input)?;
        if direction != input.current {
            log::debug!("Touch turns player {:?} -> {:?}", input.current, direction);
            Ok(Some(direction))
        } else {
            Ok(None)
        }
    }
}

/// Splits the plane into four sectors along the diagonals through the
/// reference point, where `(dx, dy)` is reference minus touch.
fn quadrant(dx: f32, dy: f32) -> Direction {
    if dx < dy {
        if dy > -dx {
            Direction::Up
        } else {
            Direction::Right
        }
    } else if dy > -dx {
        Direction::Left
    } else {
        Direction::Down
    }
}

#[cfg(test)]
mod test {
    use test_log::test;

    use super::*;

    fn input(mode: InteractionMode, x: f32, y: f32, current: Direction) -> TouchInput {
        TouchInput {
            mode: Some(mode),
            pointer: Some(PointerSample::new(x, y)),
            current,
            player_position: Coord::new(5, 5),
            dim: BoardDimension::new(10, 10),
            raster: RasterSize::new(400, 400),
        }
    }

    fn touching() -> TouchResolver {
        let mut resolver = TouchResolver::new();
        resolver.touch_start(GamePhase::Running);
        resolver
    }

    #[test]
    fn idle_resolver_keeps_current_direction() {
        let mut resolver = TouchResolver::new();
        let sample = input(InteractionMode::Absolute, 350.0, 10.0, Direction::Left);
        assert_eq!(Direction::Left, resolver.resolve(&sample).unwrap());
        assert_eq!(None, resolver.directive(&sample).unwrap());
        assert_eq!(None, resolver.directive(&sample).unwrap());
        assert_eq!(TouchState::Idle, resolver.state());
    }

    #[test]
    fn missing_pointer_or_mode_keeps_current_direction() {
        let mut resolver = touching();
        let mut sample = input(InteractionMode::Relative, 10.0, 10.0, Direction::Down);
        sample.pointer = None;
        assert_eq!(Direction::Down, resolver.resolve(&sample).unwrap());
        // The latch is still open, the missing sample did not use it up.
        assert_eq!(TouchState::Touching { tapped: false }, resolver.state());

        let mut sample = input(InteractionMode::Absolute, 10.0, 200.0, Direction::Down);
        sample.mode = None;
        assert_eq!(None, resolver.directive(&sample).unwrap());
    }

    #[test]
    fn absolute_mode_quadrants() {
        let mut resolver = touching();
        let cases = [
            ((350.0, 10.0), Direction::Up),
            ((390.0, 200.0), Direction::Right),
            ((200.0, 390.0), Direction::Down),
            ((10.0, 200.0), Direction::Left),
        ];
        for ((x, y), expected) in cases {
            let sample = input(InteractionMode::Absolute, x, y, Direction::None);
            assert_eq!(expected, resolver.resolve(&sample).unwrap(), "at ({x}, {y})");
        }
    }

    #[test]
    fn absolute_mode_is_not_latched() {
        let mut resolver = touching();
        let up = input(InteractionMode::Absolute, 200.0, 0.0, Direction::Left);
        assert_eq!(Some(Direction::Up), resolver.directive(&up).unwrap());
        let down = input(InteractionMode::Absolute, 200.0, 400.0, Direction::Up);
        assert_eq!(Some(Direction::Down), resolver.directive(&down).unwrap());
        let still_down = input(InteractionMode::Absolute, 210.0, 390.0, Direction::Down);
        assert_eq!(None, resolver.directive(&still_down).unwrap());
    }

    #[test]
    fn relative_mode_turns_once_per_touch() {
        let mut resolver = touching();
        let left_half = input(InteractionMode::Relative, 50.0, 200.0, Direction::Up);
        assert_eq!(Some(Direction::Left), resolver.directive(&left_half).unwrap());

        let right_half = input(InteractionMode::Relative, 350.0, 200.0, Direction::Left);
        assert_eq!(None, resolver.directive(&right_half).unwrap());

        resolver.touch_end();
        resolver.touch_start(GamePhase::Running);
        assert_eq!(Some(Direction::Up), resolver.directive(&right_half).unwrap());
    }

    #[test]
    fn relative_mode_from_standstill_turns_from_up() {
        let mut resolver = touching();
        let right_half = input(InteractionMode::Relative, 300.0, 0.0, Direction::None);
        assert_eq!(Direction::Right, resolver.resolve(&right_half).unwrap());
    }

    #[test]
    fn following_mode_heads_for_the_touch() {
        // Player at (5, 5) on a 10x10 board is drawn from (200, 200).
        let mut resolver = touching();
        let cases = [
            ((200.0, 20.0), Direction::Up),
            ((380.0, 210.0), Direction::Right),
            ((190.0, 390.0), Direction::Down),
            ((20.0, 200.0), Direction::Left),
        ];
        for ((x, y), expected) in cases {
            let sample = input(InteractionMode::Following, x, y, Direction::None);
            assert_eq!(expected, resolver.resolve(&sample).unwrap(), "at ({x}, {y})");
        }

        let mut sample = input(InteractionMode::Following, 0.0, 0.0, Direction::None);
        sample.player_position = Coord::new(0, 0);
        // Touching exactly the player's corner falls through every strict test.
        assert_eq!(Direction::Down, resolver.resolve(&sample).unwrap());
    }

    #[test]
    fn following_mode_rejects_players_off_the_board() {
        let mut resolver = touching();
        let mut sample = input(InteractionMode::Following, 10.0, 10.0, Direction::Up);
        sample.player_position = Coord::new(10, 0);
        assert!(resolver
            .resolve(&sample)
            .unwrap_err()
            .is_contract_violation());
    }

    #[test]
    fn tapping_resumes_or_restarts() {
        let mut resolver = TouchResolver::new();
        assert_eq!(Some(PhaseAction::Restart), resolver.touch_start(GamePhase::EndGame));
        assert_eq!(Some(PhaseAction::Resume), resolver.touch_start(GamePhase::Paused));
        assert_eq!(
            Some(PhaseAction::Resume),
            resolver.touch_start(GamePhase::Initializing)
        );
        assert_eq!(None, resolver.touch_start(GamePhase::Running));
        assert!(resolver.is_touching());
        resolver.touch_end();
        assert!(!resolver.is_touching());
    }
}
