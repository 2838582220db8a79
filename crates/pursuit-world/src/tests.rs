//! Unit tests for pursuit-world.

use pursuit_core::{Pose, VelocityCommand};

use crate::{ARENA_SIZE, KinematicWorld, PoseBoard, PoseReport, SpawnRequest, World, WorldError};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn world_with(board: &PoseBoard, names: &[(&str, f64, f64, f64)]) -> KinematicWorld {
    let mut world = KinematicWorld::new(board.sink());
    for &(name, x, y, heading) in names {
        world.spawn(SpawnRequest::new(name, x, y, heading)).unwrap();
    }
    world
}

// ── PoseBoard ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod feed {
    use super::*;

    #[test]
    fn last_writer_wins() {
        let board = PoseBoard::new();
        let sink = board.sink();
        sink.publish("a", PoseReport::at_rest(Pose::new(1.0, 1.0, 0.0)));
        sink.publish("a", PoseReport::at_rest(Pose::new(2.0, 2.0, 0.0)));
        let updates = board.drain();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].1.pose.x, 2.0);
    }

    #[test]
    fn drain_empties_the_board() {
        let board = PoseBoard::new();
        board.sink().publish("a", PoseReport::default());
        assert_eq!(board.pending(), 1);
        assert_eq!(board.drain().len(), 1);
        assert!(board.drain().is_empty());
    }

    #[test]
    fn forget_discards_unread_report() {
        let board = PoseBoard::new();
        let sink = board.sink();
        sink.publish("a", PoseReport::default());
        sink.publish("b", PoseReport::default());
        board.forget("a");
        let updates = board.drain();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].0, "b");
    }

    #[test]
    fn sink_works_from_another_thread() {
        let board = PoseBoard::new();
        let sink = board.sink();
        std::thread::spawn(move || {
            sink.publish("remote", PoseReport::new(Pose::new(3.0, 4.0, 0.5), 1.0, 0.0));
        })
        .join()
        .unwrap();
        let updates = board.drain();
        assert_eq!(updates[0].0, "remote");
        assert_eq!(updates[0].1.linear_velocity, 1.0);
    }
}

// ── KinematicWorld services ───────────────────────────────────────────────────

#[cfg(test)]
mod services {
    use super::*;

    #[test]
    fn reset_leaves_default_entity_at_centre() {
        let board = PoseBoard::new();
        let mut world = world_with(&board, &[("a", 1.0, 1.0, 0.0)]);
        world.reset().unwrap();
        assert_eq!(world.len(), 1);
        let p = world.pose("turtle1").unwrap();
        assert!((p.x - ARENA_SIZE / 2.0).abs() < 1e-9);
        assert!(!world.contains("a"));
    }

    #[test]
    fn duplicate_spawn_rejected() {
        let board = PoseBoard::new();
        let mut world = world_with(&board, &[("a", 1.0, 1.0, 0.0)]);
        let err = world.spawn(SpawnRequest::new("a", 2.0, 2.0, 0.0)).unwrap_err();
        assert!(matches!(err, WorldError::NameTaken(n) if n == "a"));
    }

    #[test]
    fn non_finite_spawn_rejected() {
        let board = PoseBoard::new();
        let mut world = KinematicWorld::new(board.sink());
        let err = world.spawn(SpawnRequest::new("a", f64::NAN, 2.0, 0.0)).unwrap_err();
        assert!(matches!(err, WorldError::InvalidPose { .. }));
    }

    #[test]
    fn kill_unknown_errors() {
        let board = PoseBoard::new();
        let mut world = KinematicWorld::new(board.sink());
        assert!(matches!(world.kill("ghost"), Err(WorldError::UnknownAgent(_))));
    }

    #[test]
    fn transport_fault_fails_publish_only() {
        let board = PoseBoard::new();
        let mut world = world_with(&board, &[("a", 1.0, 1.0, 0.0)]);
        world.set_transport_fault(true);
        let err = world.publish_velocity("a", VelocityCommand::new(1.0, 0.0)).unwrap_err();
        assert!(matches!(err, WorldError::Transport(_)));
        world.kill("a").unwrap();
    }
}

// ── KinematicWorld dynamics ───────────────────────────────────────────────────

#[cfg(test)]
mod dynamics {
    use std::f64::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn straight_line_motion() {
        let board = PoseBoard::new();
        let mut world = world_with(&board, &[("a", 1.0, 1.0, 0.0)]);
        world.publish_velocity("a", VelocityCommand::new(2.0, 0.0)).unwrap();
        for _ in 0..5 {
            world.advance(0.1).unwrap();
        }
        let p = world.pose("a").unwrap();
        assert!((p.x - 2.0).abs() < 1e-9, "x = {}", p.x);
        assert!((p.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn turning_in_place() {
        let board = PoseBoard::new();
        let mut world = world_with(&board, &[("a", 5.0, 5.0, 0.0)]);
        world.publish_velocity("a", VelocityCommand::new(0.0, FRAC_PI_2)).unwrap();
        for _ in 0..10 {
            world.advance(0.1).unwrap();
        }
        let p = world.pose("a").unwrap();
        assert!((p.heading - FRAC_PI_2).abs() < 1e-9);
        assert_eq!(p.position(), Pose::new(5.0, 5.0, 0.0).position());
    }

    #[test]
    fn command_expires_after_timeout() {
        let board = PoseBoard::new();
        let mut world = world_with(&board, &[("a", 1.0, 5.0, 0.0)]);
        world.publish_velocity("a", VelocityCommand::new(1.0, 0.0)).unwrap();
        for _ in 0..30 {
            world.advance(0.1).unwrap();
        }
        let p = world.pose("a").unwrap();
        // 11 integration steps of 0.1 s before the command is dropped.
        assert!((p.x - 2.1).abs() < 1e-9, "x = {}", p.x);
        assert!(world.command("a").unwrap().is_stop());
    }

    #[test]
    fn positions_clamp_to_walls() {
        let board = PoseBoard::new();
        let mut world = world_with(&board, &[("a", 10.5, 5.0, 0.0)]);
        world.publish_velocity("a", VelocityCommand::new(10.0, 0.0)).unwrap();
        world.advance(0.5).unwrap();
        assert_eq!(world.pose("a").unwrap().x, ARENA_SIZE);
    }

    #[test]
    fn reports_published_after_advance() {
        let board = PoseBoard::new();
        let mut world = world_with(&board, &[("a", 1.0, 1.0, 0.0), ("b", 2.0, 2.0, 0.0)]);
        world.publish_velocity("a", VelocityCommand::new(1.5, 0.0)).unwrap();
        world.advance(0.1).unwrap();
        let mut updates = board.drain();
        updates.sort_by(|l, r| l.0.cmp(&r.0));
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].1.linear_velocity, 1.5);
        assert_eq!(updates[1].1.linear_velocity, 0.0);
    }

    #[test]
    fn report_delay_holds_back_reports() {
        let board = PoseBoard::new();
        let mut world = world_with(&board, &[("a", 1.0, 1.0, 0.0)]).with_report_delay(2);
        world.advance(0.1).unwrap();
        world.advance(0.1).unwrap();
        assert!(board.drain().is_empty());
        world.advance(0.1).unwrap();
        assert_eq!(board.drain().len(), 1);
    }

    #[test]
    fn kill_drops_in_flight_reports() {
        let board = PoseBoard::new();
        let mut world = world_with(&board, &[("a", 1.0, 1.0, 0.0)]).with_report_delay(3);
        world.advance(0.1).unwrap();
        world.kill("a").unwrap();
        for _ in 0..5 {
            world.advance(0.1).unwrap();
        }
        assert!(board.drain().is_empty());
    }

    #[test]
    fn trail_counts_only_pen_down_motion_and_clear_resets() {
        let board = PoseBoard::new();
        let mut world = world_with(&board, &[("a", 1.0, 1.0, 0.0), ("b", 1.0, 3.0, 0.0)]);
        world.set_pen("b", crate::PenStyle::DEFAULT.with_off(true)).unwrap();
        world.publish_velocity("a", VelocityCommand::new(1.0, 0.0)).unwrap();
        world.publish_velocity("b", VelocityCommand::new(1.0, 0.0)).unwrap();
        for _ in 0..3 {
            world.advance(0.1).unwrap();
        }
        assert_eq!(world.trail_segments(), 3);
        world.clear().unwrap();
        assert_eq!(world.trail_segments(), 0);
        assert_eq!(world.clears(), 1);
    }
}
