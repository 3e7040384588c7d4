//! Fixed timestep simulation tick
//!
//! Advances a run by exactly one frame. Pure: no rendering, no platform
//! access, no randomness.

use super::collision::{first_collision, reached_finish};
use super::state::{Direction, Outcome, Run, RunStatus};
use crate::tuning::Tuning;

/// Advance the run by one tick
///
/// Returns the outcome on the tick the run ends, `None` otherwise. A run
/// that is not `Running` is left untouched.
pub fn tick(run: &mut Run, input: Direction, tuning: &Tuning) -> Option<Outcome> {
    if !run.is_running() {
        return None;
    }

    run.time_ticks += 1;

    // Move: descent first, then steering, then clamp to the surface
    let avatar = &mut run.avatar;
    avatar.pos.y += tuning.descent_speed;
    avatar.pos.x += input.velocity(tuning.move_speed);
    let min_x = avatar.radius;
    let max_x = (run.area.width - avatar.radius).max(min_x);
    avatar.pos.x = avatar.pos.x.clamp(min_x, max_x);

    // Obstacles take precedence over the finish line
    let outcome = if let Some(row) = first_collision(&run.avatar, &run.obstacles) {
        log::debug!(
            "Run {} hit row at y={} (gap [{}, {})) with avatar x={}",
            run.number,
            row.y,
            row.w1,
            row.x2,
            run.avatar.pos.x
        );
        Outcome::Collision
    } else if reached_finish(&run.avatar, run.finish_y) {
        Outcome::Win
    } else {
        log::trace!("tick {}: avatar at {:?}", run.time_ticks, run.avatar.pos);
        return None;
    };

    run.status = RunStatus::Ended(outcome);
    Some(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::generate::row_with_gap;
    use crate::sim::state::{Obstacle, PlayArea};
    use proptest::prelude::*;

    fn gap_row() -> Obstacle {
        // Gap [100, 250) at y=300 on a 400 wide surface
        row_with_gap(300.0, 400.0, 100.0, &Tuning::default())
    }

    fn run_with(rows: Vec<Obstacle>) -> Run {
        Run::new(1, PlayArea::new(400.0, 2000.0), rows, &Tuning::default())
    }

    /// Tick until the run ends or `max` ticks pass
    fn run_to_end(run: &mut Run, input: Direction, max: u32) -> Option<Outcome> {
        let tuning = Tuning::default();
        (0..max).find_map(|_| tick(run, input, &tuning))
    }

    #[test]
    fn test_tick_moves_avatar() {
        let tuning = Tuning::default();
        let mut run = run_with(Vec::new());
        let start = run.avatar.pos;

        assert_eq!(tick(&mut run, Direction::Right, &tuning), None);
        assert_eq!(run.avatar.pos.y, start.y + tuning.descent_speed);
        assert_eq!(run.avatar.pos.x, start.x + tuning.move_speed);

        tick(&mut run, Direction::Left, &tuning);
        assert_eq!(run.avatar.pos.x, start.x);

        tick(&mut run, Direction::None, &tuning);
        assert_eq!(run.avatar.pos.x, start.x);
        assert_eq!(run.time_ticks, 3);
    }

    #[test]
    fn test_tick_clamps_to_surface() {
        let tuning = Tuning::default();
        let mut run = run_with(Vec::new());

        for _ in 0..100 {
            tick(&mut run, Direction::Left, &tuning);
        }
        assert_eq!(run.avatar.pos.x, tuning.avatar_radius);

        for _ in 0..200 {
            tick(&mut run, Direction::Right, &tuning);
        }
        assert_eq!(run.avatar.pos.x, 400.0 - tuning.avatar_radius);
    }

    #[test]
    fn test_collision_in_right_bar() {
        let mut run = run_with(vec![gap_row()]);
        run.avatar.pos.x = 300.0;

        assert_eq!(run_to_end(&mut run, Direction::None, 1000), Some(Outcome::Collision));
        assert_eq!(run.status, RunStatus::Ended(Outcome::Collision));
        // Ended on the first tick the avatar's bottom crossed the row top
        assert!(run.avatar.bottom() > 300.0);
        assert!(run.avatar.bottom() - 300.0 <= Tuning::default().descent_speed + 1e-3);
    }

    #[test]
    fn test_pass_through_gap_then_win() {
        let mut run = run_with(vec![gap_row()]);
        run.avatar.pos.x = 175.0;

        assert_eq!(run_to_end(&mut run, Direction::None, 10_000), Some(Outcome::Win));
        assert!(run.avatar.pos.y >= run.finish_y);
    }

    #[test]
    fn test_collision_beats_finish_on_same_tick() {
        let tuning = Tuning::default();
        let mut run = run_with(Vec::new());
        // A row straddling the finish line
        run.obstacles.push(row_with_gap(run.finish_y - 10.0, 400.0, 300.0, &tuning));
        run.avatar.pos = glam::Vec2::new(100.0, run.finish_y - 1.0);

        assert_eq!(tick(&mut run, Direction::None, &tuning), Some(Outcome::Collision));
    }

    #[test]
    fn test_ended_run_does_not_advance() {
        let tuning = Tuning::default();
        let mut run = run_with(vec![gap_row()]);
        run.avatar.pos.x = 300.0;
        run_to_end(&mut run, Direction::None, 1000);

        let frozen = run.avatar.pos;
        let ticks = run.time_ticks;
        assert_eq!(tick(&mut run, Direction::Right, &tuning), None);
        assert_eq!(run.avatar.pos, frozen);
        assert_eq!(run.time_ticks, ticks);
    }

    #[test]
    fn test_steer_into_gap() {
        // Spawn at center (200) is inside the gap [100, 250), so steering
        // right the whole way must crash while holding still passes.
        let mut still = run_with(vec![gap_row()]);
        assert_eq!(run_to_end(&mut still, Direction::None, 10_000), Some(Outcome::Win));

        let mut steered = run_with(vec![gap_row()]);
        assert_eq!(run_to_end(&mut steered, Direction::Right, 10_000), Some(Outcome::Collision));
    }

    fn direction() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Left),
            Just(Direction::Right),
            Just(Direction::None),
        ]
    }

    proptest! {
        #[test]
        fn prop_x_stays_in_bounds(
            width in 30.0f32..1200.0,
            inputs in prop::collection::vec(direction(), 1..400),
        ) {
            let tuning = Tuning::default();
            let mut run = Run::new(1, PlayArea::new(width, 100_000.0), Vec::new(), &tuning);
            for input in inputs {
                tick(&mut run, input, &tuning);
                prop_assert!(run.avatar.pos.x >= tuning.avatar_radius);
                prop_assert!(run.avatar.pos.x <= width - tuning.avatar_radius);
            }
        }

        #[test]
        fn prop_y_never_decreases(
            inputs in prop::collection::vec(direction(), 1..400),
        ) {
            let tuning = Tuning::default();
            let mut run = Run::new(1, PlayArea::new(400.0, 100_000.0), Vec::new(), &tuning);
            let mut last_y = run.avatar.pos.y;
            for input in inputs {
                if !run.is_running() {
                    break;
                }
                tick(&mut run, input, &tuning);
                prop_assert!(run.avatar.pos.y > last_y);
                last_y = run.avatar.pos.y;
            }
        }

        #[test]
        fn prop_inside_gap_never_collides(gap_start in 0.0f32..250.0, offset in 0.0f32..129.0) {
            // Avatar extent [x - 10, x + 10] kept fully inside [gap_start, gap_start + 150)
            let tuning = Tuning::default();
            let row = row_with_gap(300.0, 400.0, gap_start, &tuning);
            let mut run = Run::new(1, PlayArea::new(400.0, 2000.0), vec![row], &tuning);
            run.avatar.pos.x = gap_start + tuning.avatar_radius + offset;
            while run.avatar.top() < row.bottom() {
                prop_assert_ne!(tick(&mut run, Direction::None, &tuning), Some(Outcome::Collision));
            }
        }
    }
}
