//! `KinematicWorld` — an in-process stand-in for the turtle simulator.
//!
//! Each entity is a unicycle: heading integrates the angular command, then
//! position integrates the linear command along the new heading.  The rules
//! mirror turtlesim closely enough for the control core not to notice:
//!
//! - the arena is `[0, ARENA_SIZE]²` and positions clamp to the walls;
//! - a command is held for [`COMMAND_TIMEOUT_SECS`] and then dropped, so an
//!   agent that stops receiving commands coasts to a halt;
//! - `reset` leaves exactly one entity, `turtle1`, at the arena centre.
//!
//! After every [`advance`](World::advance) a `PoseReport` for every entity is
//! pushed to the [`PoseSink`], optionally held back for a number of ticks to
//! reproduce feed latency.

use std::collections::VecDeque;

#[cfg(not(feature = "fx-hash"))]
use std::collections::HashMap as EntityMap;

#[cfg(feature = "fx-hash")]
use rustc_hash::FxHashMap as EntityMap;

use pursuit_core::{Pose, VelocityCommand, normalize_angle};

use crate::{PenStyle, PoseReport, PoseSink, SpawnRequest, World, WorldError, WorldResult};

/// Side length of the square arena.
pub const ARENA_SIZE: f64 = 11.088_889;

/// Seconds a velocity command stays in effect without being re-published.
pub const COMMAND_TIMEOUT_SECS: f64 = 1.0;

/// Name of the entity `reset` recreates.
pub const DEFAULT_ENTITY: &str = "turtle1";

#[derive(Clone, Debug)]
struct Entity {
    pose:        Pose,
    command:     VelocityCommand,
    command_age: f64,
    pen:         PenStyle,
}

impl Entity {
    fn new(pose: Pose) -> Self {
        Self {
            pose,
            command:     VelocityCommand::STOP,
            command_age: 0.0,
            pen:         PenStyle::DEFAULT,
        }
    }

    /// Integrate one step.  Returns `true` if the entity moved.
    fn integrate(&mut self, dt: f64) -> bool {
        if self.command_age > COMMAND_TIMEOUT_SECS {
            self.command = VelocityCommand::STOP;
        }
        self.command_age += dt;

        let before = self.pose;
        let heading = normalize_angle(self.pose.heading + self.command.angular * dt);
        let x = self.pose.x + heading.cos() * self.command.linear * dt;
        let y = self.pose.y + heading.sin() * self.command.linear * dt;
        self.pose = Pose { x: x.clamp(0.0, ARENA_SIZE), y: y.clamp(0.0, ARENA_SIZE), heading };
        before.position() != self.pose.position()
    }

    fn report(&self) -> PoseReport {
        PoseReport::new(self.pose, self.command.linear, self.command.angular)
    }
}

/// In-process unicycle world.  Single-threaded; owned by whoever drives the
/// tick loop.
#[derive(Debug)]
pub struct KinematicWorld {
    entities:        EntityMap<String, Entity>,
    sink:            PoseSink,
    report_delay:    usize,
    in_flight:       VecDeque<Vec<(String, PoseReport)>>,
    trail_segments:  usize,
    clears:          usize,
    ready:           bool,
    transport_fault: bool,
}

impl KinematicWorld {
    /// An empty world publishing to `sink`.  Call [`World::reset`] to get the
    /// default entity.
    pub fn new(sink: PoseSink) -> Self {
        Self {
            entities:        EntityMap::default(),
            sink,
            report_delay:    0,
            in_flight:       VecDeque::new(),
            trail_segments:  0,
            clears:          0,
            ready:           true,
            transport_fault: false,
        }
    }

    /// Hold every pose report back by `ticks` calls to `advance`.
    pub fn with_report_delay(mut self, ticks: usize) -> Self {
        self.report_delay = ticks;
        self
    }

    /// Make [`World::is_ready`] return `ready`.
    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    /// While set, `publish_velocity` fails with [`WorldError::Transport`].
    pub fn set_transport_fault(&mut self, fault: bool) {
        self.transport_fault = fault;
    }

    /// Place `name` at `pose` directly, keeping its command and pen.
    pub fn teleport(&mut self, name: &str, pose: Pose) -> WorldResult<()> {
        let entity = self.entity_mut(name)?;
        entity.pose = pose;
        Ok(())
    }

    pub fn pose(&self, name: &str) -> Option<Pose> {
        self.entities.get(name).map(|e| e.pose)
    }

    pub fn pen(&self, name: &str) -> Option<PenStyle> {
        self.entities.get(name).map(|e| e.pen)
    }

    /// Command currently in effect for `name`.
    pub fn command(&self, name: &str) -> Option<VelocityCommand> {
        self.entities.get(name).map(|e| e.command)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entities.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Integration steps, since the last clear, in which an entity with its
    /// pen down moved.
    pub fn trail_segments(&self) -> usize {
        self.trail_segments
    }

    /// Number of successful `clear` calls.
    pub fn clears(&self) -> usize {
        self.clears
    }

    fn entity_mut(&mut self, name: &str) -> WorldResult<&mut Entity> {
        self.entities
            .get_mut(name)
            .ok_or_else(|| WorldError::UnknownAgent(name.to_string()))
    }

    fn flush_reports(&mut self) {
        while self.in_flight.len() > self.report_delay {
            let Some(batch) = self.in_flight.pop_front() else { break };
            for (name, report) in batch {
                self.sink.publish(&name, report);
            }
        }
    }
}

impl World for KinematicWorld {
    fn spawn(&mut self, request: SpawnRequest) -> WorldResult<()> {
        if self.entities.contains_key(&request.name) {
            return Err(WorldError::NameTaken(request.name));
        }
        let pose = request.pose();
        if request.name.is_empty() || !pose.is_finite() {
            return Err(WorldError::InvalidPose {
                name:    request.name,
                x:       request.x,
                y:       request.y,
                heading: request.heading,
            });
        }
        tracing::debug!(name = %request.name, %pose, "spawn");
        self.entities.insert(request.name, Entity::new(pose));
        Ok(())
    }

    fn kill(&mut self, name: &str) -> WorldResult<()> {
        if self.entities.remove(name).is_none() {
            return Err(WorldError::UnknownAgent(name.to_string()));
        }
        for batch in &mut self.in_flight {
            batch.retain(|(n, _)| n != name);
        }
        tracing::debug!(name, "kill");
        Ok(())
    }

    fn reset(&mut self) -> WorldResult<()> {
        self.entities.clear();
        self.in_flight.clear();
        let centre = ARENA_SIZE / 2.0;
        self.entities
            .insert(DEFAULT_ENTITY.to_string(), Entity::new(Pose::new(centre, centre, 0.0)));
        self.clear()
    }

    fn clear(&mut self) -> WorldResult<()> {
        self.trail_segments = 0;
        self.clears += 1;
        Ok(())
    }

    fn set_pen(&mut self, name: &str, pen: PenStyle) -> WorldResult<()> {
        self.entity_mut(name)?.pen = pen;
        Ok(())
    }

    fn publish_velocity(&mut self, name: &str, command: VelocityCommand) -> WorldResult<()> {
        if self.transport_fault {
            return Err(WorldError::Transport(format!("velocity topic for {name:?} unavailable")));
        }
        let entity = self.entity_mut(name)?;
        entity.command = command;
        entity.command_age = 0.0;
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn advance(&mut self, dt_secs: f64) -> WorldResult<()> {
        let mut batch = Vec::with_capacity(self.entities.len());
        for (name, entity) in &mut self.entities {
            if entity.integrate(dt_secs) && !entity.pen.off {
                self.trail_segments += 1;
            }
            batch.push((name.clone(), entity.report()));
        }
        self.in_flight.push_back(batch);
        self.flush_reports();
        Ok(())
    }
}
