//! Unit tests for pursuit-agent.

use std::f64::consts::FRAC_PI_2;

use pursuit_control::Gains;
use pursuit_core::{AgentId, Point, Pose, VelocityCommand};
use pursuit_world::{KinematicWorld, PenStyle, PoseBoard, PoseReport, SpawnRequest, World};

use crate::{Agent, MoveToGoal, Role, RotateBy, Step, WanderLimits};

const DT: f64 = 0.1;

fn world_with(name: &str, pose: Pose) -> (KinematicWorld, PoseBoard) {
    let board = PoseBoard::new();
    let mut world = KinematicWorld::new(board.sink());
    world
        .spawn(SpawnRequest::new(name, pose.x, pose.y, pose.heading))
        .unwrap();
    (world, board)
}

/// Advance one tick and copy any report for `agent` into its mirror.
fn tick(world: &mut KinematicWorld, board: &PoseBoard, agent: &mut Agent) {
    world.advance(DT).unwrap();
    for (name, report) in board.drain() {
        if name == agent.name {
            agent.apply_report(&report);
        }
    }
}

// ── Agent ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod agent {
    use super::*;

    #[test]
    fn speed_unknown_until_first_report() {
        let mut a = Agent::new(AgentId(1), "turtle1", Role::Offender, Pose::new(1.0, 1.0, 0.0), 7);
        assert_eq!(a.speed(), None);
        a.apply_report(&PoseReport::new(Pose::new(2.0, 1.0, 0.0), 1.5, 0.0));
        assert_eq!(a.speed(), Some(1.5));
        assert_eq!(a.pose().position(), Point::new(2.0, 1.0));

        a.force_pose(Pose::SENTINEL);
        assert!(a.pose().is_sentinel());
        assert_eq!(a.speed(), None);
    }

    #[test]
    fn teleoperated_implies_respawn_unless_overridden() {
        let a = Agent::new(AgentId(1), "turtle1", Role::Offender, Pose::default(), 0).teleoperated(true);
        assert!(!a.is_autonomous());
        assert!(a.respawn_on_capture);

        let b = Agent::new(AgentId(2), "turtle2", Role::Offender, Pose::default(), 0)
            .teleoperated(true)
            .with_respawn_on_capture(false);
        assert!(!b.respawn_on_capture);
    }

    #[test]
    fn wander_stays_within_limits_and_reaches_world() {
        let (mut world, _board) = world_with("turtle2", Pose::new(5.0, 5.0, 0.0));
        let limits = WanderLimits { linear_max: 2.0, angular_max: 1.0 };
        let mut a = Agent::new(AgentId(2), "turtle2", Role::Offender, Pose::new(5.0, 5.0, 0.0), 42)
            .with_wander(limits);

        for _ in 0..200 {
            let cmd = a.wander(&mut world).unwrap();
            assert!((0.0..=2.0).contains(&cmd.linear), "{cmd:?}");
            assert!((-1.0..=1.0).contains(&cmd.angular), "{cmd:?}");
            assert_eq!(world.command("turtle2"), Some(cmd));
        }
    }

    #[test]
    fn wander_is_reproducible_per_seed_and_id() {
        let (mut world, _board) = world_with("turtle2", Pose::new(5.0, 5.0, 0.0));
        let mut a = Agent::new(AgentId(2), "turtle2", Role::Offender, Pose::default(), 99);
        let mut b = Agent::new(AgentId(2), "turtle2", Role::Offender, Pose::default(), 99);
        let mut c = Agent::new(AgentId(3), "turtle2", Role::Offender, Pose::default(), 99);

        let xs: Vec<_> = (0..5).map(|_| a.wander(&mut world).unwrap()).collect();
        let ys: Vec<_> = (0..5).map(|_| b.wander(&mut world).unwrap()).collect();
        let zs: Vec<_> = (0..5).map(|_| c.wander(&mut world).unwrap()).collect();
        assert_eq!(xs, ys);
        assert_ne!(xs, zs);
    }

    #[test]
    fn set_pen_keeps_color() {
        let (mut world, _board) = world_with("turtle_writer", Pose::new(1.0, 1.0, 0.0));
        let mut w = Agent::new(AgentId::WRITER, "turtle_writer", Role::Writer, Pose::default(), 0);
        w.set_pen(&mut world, true).unwrap();
        assert!(world.pen("turtle_writer").unwrap().off);
        assert!(w.pen().off);
        w.set_pen(&mut world, false).unwrap();
        let pen = world.pen("turtle_writer").unwrap();
        assert!(!pen.off);
        assert_eq!((pen.r, pen.g, pen.b), (200, 200, 200));
    }

    #[test]
    fn custom_pen_survives_lifting() {
        let (mut world, _board) = world_with("turtle_writer", Pose::new(1.0, 1.0, 0.0));
        let red = PenStyle { r: 255, g: 0, b: 0, width: 3, off: false };
        let mut w = Agent::new(AgentId::WRITER, "turtle_writer", Role::Writer, Pose::default(), 0)
            .with_pen(red);
        w.set_pen(&mut world, true).unwrap();
        w.set_pen(&mut world, false).unwrap();
        assert_eq!(world.pen("turtle_writer").unwrap(), red);
    }

    #[test]
    fn commands_to_unknown_agent_fail() {
        let board = PoseBoard::new();
        let mut world = KinematicWorld::new(board.sink());
        let a = Agent::new(AgentId(5), "ghost", Role::Offender, Pose::default(), 0);
        assert!(a.stop(&mut world).is_err());
    }
}

// ── MoveToGoal ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod move_to_goal {
    use super::*;

    #[test]
    fn drives_to_goal_and_stops() {
        let start = Pose::new(0.0, 0.0, 0.0);
        let (mut world, board) = world_with("turtle_writer", start);
        let mut w = Agent::new(AgentId::WRITER, "turtle_writer", Role::Writer, start, 0);
        let go = MoveToGoal::new(Point::new(3.0, 0.0), 1.0, Gains::default());

        let mut last = f64::INFINITY;
        let mut done = false;
        let mut driven = 0;
        for _ in 0..100 {
            let d = w.pose().position().x - 3.0;
            assert!(d.abs() <= last, "distance must not grow");
            last = d.abs();
            if go.step(&w, &mut world).unwrap() == Step::Done {
                done = true;
                break;
            }
            driven += 1;
            tick(&mut world, &board, &mut w);
        }

        assert!(done);
        assert!(w.pose().x > 2.0);
        assert!(driven > 0);
        assert!(world.command("turtle_writer").unwrap().is_stop());
    }

    #[test]
    fn already_there_is_done_immediately() {
        let start = Pose::new(3.0, 0.5, 0.0);
        let (mut world, _board) = world_with("turtle_writer", start);
        let w = Agent::new(AgentId::WRITER, "turtle_writer", Role::Writer, start, 0);
        let go = MoveToGoal::new(Point::new(3.0, 0.0), 1.0, Gains::default());
        assert_eq!(go.step(&w, &mut world).unwrap(), Step::Done);
        assert!(world.command("turtle_writer").unwrap().is_stop());
    }

    #[test]
    fn non_finite_pose_halts() {
        let (mut world, _board) = world_with("turtle_writer", Pose::new(1.0, 1.0, 0.0));
        let mut w = Agent::new(AgentId::WRITER, "turtle_writer", Role::Writer, Pose::default(), 0);
        w.force_pose(Pose { x: f64::NAN, y: 1.0, heading: 0.0 });
        world.publish_velocity("turtle_writer", VelocityCommand::new(1.0, 0.0)).unwrap();

        let go = MoveToGoal::new(Point::new(3.0, 0.0), 1.0, Gains::default());
        assert_eq!(go.step(&w, &mut world).unwrap(), Step::Done);
        assert!(world.command("turtle_writer").unwrap().is_stop());
    }
}

// ── RotateBy ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod rotate_by {
    use super::*;

    fn run(rotate: &mut RotateBy, world: &mut KinematicWorld, board: &PoseBoard, agent: &mut Agent) -> usize {
        for i in 0..100 {
            let now = i as f64 * DT;
            if rotate.step(agent, world, now).unwrap() == Step::Done {
                return i;
            }
            tick(world, board, agent);
        }
        panic!("rotation never finished");
    }

    #[test]
    fn quarter_turn_counter_clockwise() {
        let start = Pose::new(5.0, 5.0, 0.0);
        let (mut world, board) = world_with("turtle_writer", start);
        let mut w = Agent::new(AgentId::WRITER, "turtle_writer", Role::Writer, start, 0);
        let mut rotate = RotateBy::new(90.0, false, 45.0);
        assert!((rotate.duration_secs() - 2.0).abs() < 1e-9);

        let steps = run(&mut rotate, &mut world, &board, &mut w);
        assert!((20..=21).contains(&steps), "{steps}");
        let heading = world.pose("turtle_writer").unwrap().heading;
        assert!((heading - FRAC_PI_2).abs() < 0.1, "{heading}");
        assert_eq!(world.pose("turtle_writer").unwrap().position(), Point::new(5.0, 5.0));
        assert!(world.command("turtle_writer").unwrap().is_stop());
    }

    #[test]
    fn clockwise_turns_negative() {
        let start = Pose::new(5.0, 5.0, 0.0);
        let (mut world, board) = world_with("turtle_writer", start);
        let mut w = Agent::new(AgentId::WRITER, "turtle_writer", Role::Writer, start, 0);
        let mut rotate = RotateBy::new(90.0, true, 45.0);
        run(&mut rotate, &mut world, &board, &mut w);
        let heading = world.pose("turtle_writer").unwrap().heading;
        assert!((heading + FRAC_PI_2).abs() < 0.1, "{heading}");
    }

    #[test]
    fn zero_speed_finishes_immediately() {
        let (mut world, _board) = world_with("turtle_writer", Pose::new(5.0, 5.0, 0.0));
        let w = Agent::new(AgentId::WRITER, "turtle_writer", Role::Writer, Pose::default(), 0);
        let mut rotate = RotateBy::new(90.0, false, 0.0);
        assert_eq!(rotate.step(&w, &mut world, 0.0).unwrap(), Step::Done);
    }

    #[test]
    fn start_time_is_first_step() {
        let (mut world, _board) = world_with("turtle_writer", Pose::new(5.0, 5.0, 0.0));
        let w = Agent::new(AgentId::WRITER, "turtle_writer", Role::Writer, Pose::default(), 0);
        let mut rotate = RotateBy::new(90.0, false, 90.0);
        assert_eq!(rotate.turned(10.0), 0.0);
        assert_eq!(rotate.step(&w, &mut world, 10.0).unwrap(), Step::Continue);
        assert_eq!(rotate.step(&w, &mut world, 10.5).unwrap(), Step::Continue);
        assert_eq!(rotate.step(&w, &mut world, 11.0).unwrap(), Step::Done);
    }
}
