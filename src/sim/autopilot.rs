//! Demo-mode steering
//!
//! Steers toward the center of the next gap below the avatar. Used by the
//! native headless demo and the browser's idle mode.

use super::state::{Direction, Obstacle, Run};
use crate::tuning::Tuning;

/// Next row the avatar hasn't fully passed yet
pub fn next_row(run: &Run) -> Option<&Obstacle> {
    let top = run.avatar.top();
    run.obstacles.iter().find(|row| row.bottom() > top)
}

/// Direction that moves the avatar toward the next gap's center
pub fn steer(run: &Run, tuning: &Tuning) -> Direction {
    let Some(row) = next_row(run) else {
        return Direction::None;
    };

    let (left, right) = row.gap();
    let target = (left + right) / 2.0;
    let delta = target - run.avatar.pos.x;

    // Within half a step of the target: moving would only overshoot
    if delta.abs() <= tuning.move_speed / 2.0 {
        Direction::None
    } else if delta < 0.0 {
        Direction::Left
    } else {
        Direction::Right
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Outcome, PlayArea, Runner};

    #[test]
    fn test_steer_toward_gap() {
        let tuning = Tuning::default();
        let row = crate::sim::generate::row_with_gap(300.0, 400.0, 0.0, &tuning);
        let mut run = Run::new(1, PlayArea::new(400.0, 2000.0), vec![row], &tuning);

        // Gap [0, 150), center 75
        assert_eq!(steer(&run, &tuning), Direction::Left);
        run.avatar.pos.x = 76.0;
        assert_eq!(steer(&run, &tuning), Direction::None);
        run.avatar.pos.x = 20.0;
        assert_eq!(steer(&run, &tuning), Direction::Right);

        // Past the only row
        run.avatar.pos.y = 400.0;
        assert!(next_row(&run).is_none());
        assert_eq!(steer(&run, &tuning), Direction::None);
    }

    #[test]
    fn test_autopilot_clears_narrow_courses() {
        // On a 400 wide surface consecutive gap centers are never further
        // apart than the avatar can travel between rows
        for seed in 0..20 {
            let mut runner = Runner::new(seed, Tuning::default());
            runner.start(PlayArea::new(400.0, 3000.0));
            let outcome = loop {
                let dir = steer(runner.run().unwrap(), runner.tuning());
                runner.set_horizontal_input(dir);
                if let Some(outcome) = runner.tick() {
                    break outcome;
                }
            };
            assert_eq!(outcome, Outcome::Win, "seed {}", seed);
        }
    }
}
