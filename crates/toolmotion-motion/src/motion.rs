//! The motion state machine.
//!
//! [`Motion`] tracks the tool position, snaps every command to the driver
//! grid, drops commands that would not move the tool and walks paths
//! contour by contour, retracting between contours and reaching depth either
//! by plunging or by ramping along the contour.

use crate::driver::Driver;
use crate::error::MotionResult;
use crate::filter::{passthrough, FilterState, MotionFilter};
use crate::params::Params;
use toolmotion_core::{
    arc_to_points, same_pos, same_xy, ArcPoints, Capability, Coolant, Point, FLOAT_EPSILON,
};
use toolmotion_geometry::flatten::{polyline_length, sample_ellipse};
use toolmotion_geometry::{Action, ActionKind, Contours, EllipseArc, SubPath};
use toolmotion_settings::{
    ArcCenterMode, ArcDirection, Config, DepthStrategy, MachineContext, MotionPolicy,
};
use tracing::{debug, trace};

/// Subdivisions used when a curve is interpolated into linear moves.
pub const CURVE_DIVISIONS: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArcCommand {
    Clockwise,
    CounterClockwise,
}

impl ArcCommand {
    fn capability(self) -> Capability {
        match self {
            ArcCommand::Clockwise => Capability::ArcCw,
            ArcCommand::CounterClockwise => Capability::ArcCcw,
        }
    }
}

/// Ancillary values last pushed to the driver.
#[derive(Debug, Clone, Default, PartialEq)]
struct Applied {
    tool: Option<u32>,
    speed: Option<f64>,
    feed: Option<f64>,
    coolant: Option<Coolant>,
}

/// Length bookkeeping for one contour.
#[derive(Debug, Clone, Copy)]
struct Walk {
    total: f64,
    traversed: f64,
    z_start: f64,
    end_depth: f64,
}

impl Walk {
    /// Depth proportional to the length travelled so far.
    fn helix_z(&self) -> f64 {
        if self.total <= FLOAT_EPSILON {
            return self.end_depth;
        }
        let ratio = (self.traversed / self.total).min(1.0);
        self.z_start + (self.end_depth - self.z_start) * ratio
    }

    fn state(&self, position: Point) -> FilterState {
        FilterState {
            position,
            traversed: self.traversed,
            total: self.total,
        }
    }
}

/// Drives a [`Driver`] from paths and individual commands.
pub struct Motion<'d, D: Driver + ?Sized> {
    driver: &'d mut D,
    context: MachineContext,
    policy: MotionPolicy,
    position: Point,
    /// Unfiltered path position, used for lengths and curve starts
    cursor: Point,
    target_depth: f64,
    applied: Applied,
}

impl<'d, D: Driver + ?Sized> Motion<'d, D> {
    /// Motion at the origin with the default policy.
    pub fn new(driver: &'d mut D, context: MachineContext) -> Self {
        Self::with_policy(driver, context, MotionPolicy::default())
    }

    pub fn with_policy(driver: &'d mut D, context: MachineContext, policy: MotionPolicy) -> Self {
        let target_depth = context.depth;
        Self {
            driver,
            context,
            policy,
            position: Point::default(),
            cursor: Point::default(),
            target_depth,
            applied: Applied::default(),
        }
    }

    pub fn from_config(driver: &'d mut D, config: &Config) -> Self {
        Self::with_policy(driver, config.machine.clone(), config.motion.clone())
    }

    /// Last position the driver confirmed.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn target_depth(&self) -> f64 {
        self.target_depth
    }

    /// Depth used by subsequent plunges and helix ramps.
    pub fn set_target_depth(&mut self, depth: f64) {
        self.target_depth = depth;
    }

    pub fn context(&self) -> &MachineContext {
        &self.context
    }

    /// Ancillary changes take effect on the next emitted command.
    pub fn context_mut(&mut self) -> &mut MachineContext {
        &mut self.context
    }

    pub fn policy(&self) -> &MotionPolicy {
        &self.policy
    }

    pub fn driver(&self) -> &D {
        &*self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut *self.driver
    }

    /// Snaps `params` and returns the position they lead to, or `None` if
    /// the tool would not move.
    pub fn merge_position(&self, params: &mut Params) -> Option<Point> {
        let target = self.snap_target(params);
        (!same_pos(&target, &self.position)).then_some(target)
    }

    fn snap_target(&self, params: &mut Params) -> Point {
        params.snap();
        params.resolve(&self.position)
    }

    /// Rapid traverse. Skipped if it would not move the tool.
    pub fn rapid(&mut self, mut params: Params) -> MotionResult<()> {
        let Some(target) = self.merge_position(&mut params) else {
            trace!("Skipping rapid {}: already in position", params);
            return Ok(());
        };
        self.sync_machine_state()?;
        self.driver.rapid(&params)?;
        trace!("rapid {}", params);
        self.position = target;
        self.advance_cursor(&params);
        Ok(())
    }

    /// Feed move. Skipped if it would not move the tool.
    pub fn linear(&mut self, mut params: Params) -> MotionResult<()> {
        let Some(target) = self.merge_position(&mut params) else {
            trace!("Skipping linear {}: already in position", params);
            return Ok(());
        };
        self.sync_machine_state()?;
        self.driver.linear(&params)?;
        trace!("linear {}", params);
        self.position = target;
        self.advance_cursor(&params);
        Ok(())
    }

    /// Clockwise arc. Always emitted, a full circle ends where it starts.
    pub fn arc_cw(&mut self, mut params: Params) -> MotionResult<()> {
        let target = self.snap_target(&mut params);
        self.sync_machine_state()?;
        self.driver.arc_cw(&params)?;
        trace!("arc cw {}", params);
        self.position = target;
        self.advance_cursor(&params);
        Ok(())
    }

    /// Counterclockwise arc. Always emitted.
    pub fn arc_ccw(&mut self, mut params: Params) -> MotionResult<()> {
        let target = self.snap_target(&mut params);
        self.sync_machine_state()?;
        self.driver.arc_ccw(&params)?;
        trace!("arc ccw {}", params);
        self.position = target;
        self.advance_cursor(&params);
        Ok(())
    }

    /// Moves the path cursor along the planar axes a command names.
    fn advance_cursor(&mut self, params: &Params) {
        if let Some(x) = params.x {
            self.cursor.x = x;
        }
        if let Some(y) = params.y {
            self.cursor.y = y;
        }
    }

    /// Rapid up to the retract height.
    pub fn retract(&mut self) -> MotionResult<()> {
        self.rapid(Params::depth(self.context.retract_height()))
    }

    /// Feed down to the target depth.
    pub fn plunge(&mut self) -> MotionResult<()> {
        self.linear(Params::depth(self.target_depth))
    }

    /// Follows every contour of `path` in order.
    pub fn follow_path<P: Contours + ?Sized>(&mut self, path: &P) -> MotionResult<()> {
        self.follow_path_with(path, &mut passthrough)
    }

    /// Like [`follow_path`](Self::follow_path), passing each command derived
    /// from a path action through `filter` first.
    pub fn follow_path_with<P: Contours + ?Sized>(
        &mut self,
        path: &P,
        filter: &mut dyn MotionFilter,
    ) -> MotionResult<()> {
        for (index, subpath) in path.contours().iter().enumerate() {
            debug!(
                "Following contour {} ({} actions) at depth {}",
                index,
                subpath.len(),
                self.target_depth
            );
            self.follow_subpath(subpath, filter)?;
        }
        Ok(())
    }

    fn follow_subpath(&mut self, subpath: &SubPath, filter: &mut dyn MotionFilter) -> MotionResult<()> {
        let mut walk = Walk {
            total: subpath.get_length()?,
            traversed: 0.0,
            z_start: self.position.z,
            end_depth: self.target_depth,
        };

        for (index, action) in subpath.actions().iter().enumerate() {
            let kind = action.kind();
            match action {
                Action::MoveTo { x, y } => {
                    let target = Point::xy(*x, *y);
                    // A jump inside the contour is part of its flattened length
                    if index > 0 {
                        walk.traversed += self.cursor.distance_xy(&target);
                    }
                    self.travel(kind, target, &mut walk, filter)?;
                }
                Action::LineTo { x, y } => {
                    self.plunge_for_cut()?;
                    self.cut_to(kind, Point::xy(*x, *y), &mut walk, filter)?;
                }
                Action::QuadraticCurveTo { .. } | Action::BezierCurveTo { .. } => {
                    self.plunge_for_cut()?;
                    self.interpolate(action, &mut walk, filter)?;
                }
                Action::Ellipse(arc) => {
                    self.follow_ellipse(arc, index == 0, &mut walk, filter)?;
                }
            }
        }

        if subpath.is_closed() {
            if let Some(&first) = subpath.get_points(CURVE_DIVISIONS).first() {
                self.plunge_for_cut()?;
                self.cut_to(ActionKind::LineTo, first, &mut walk, filter)?;
            }
        }
        Ok(())
    }

    /// Retract and rapid to `target` unless the tool is already above it.
    fn travel(
        &mut self,
        kind: ActionKind,
        target: Point,
        walk: &mut Walk,
        filter: &mut dyn MotionFilter,
    ) -> MotionResult<()> {
        if same_xy(&target, &self.cursor) {
            return Ok(());
        }
        self.retract()?;
        let params = filter.transform(
            kind,
            Params::xy(target.x, target.y),
            &walk.state(self.position),
        );
        self.rapid(params)?;
        self.cursor = target;
        walk.z_start = self.position.z;
        Ok(())
    }

    /// Feed move to `target`, carrying the ramp depth in helix mode.
    fn cut_to(
        &mut self,
        kind: ActionKind,
        target: Point,
        walk: &mut Walk,
        filter: &mut dyn MotionFilter,
    ) -> MotionResult<()> {
        walk.traversed += self.cursor.distance_xy(&target);
        let mut params = Params::xy(target.x, target.y);
        if self.policy.depth_strategy == DepthStrategy::Helix {
            params.z = Some(walk.helix_z());
        }
        let params = filter.transform(kind, params, &walk.state(self.position));
        self.linear(params)?;
        self.cursor = target;
        Ok(())
    }

    fn plunge_for_cut(&mut self) -> MotionResult<()> {
        match self.policy.depth_strategy {
            DepthStrategy::Plunge => self.plunge(),
            DepthStrategy::Helix => Ok(()),
        }
    }

    /// Flattens `action` from the path cursor and feeds through every sample
    /// after the first.
    fn interpolate(
        &mut self,
        action: &Action,
        walk: &mut Walk,
        filter: &mut dyn MotionFilter,
    ) -> MotionResult<()> {
        let mut scratch = SubPath::new();
        scratch.move_to(self.cursor.x, self.cursor.y);
        scratch.push(*action);
        let points = scratch.get_points(CURVE_DIVISIONS);
        trace!("Interpolating {} into {} points", action.kind(), points.len() - 1);

        for point in points.iter().skip(1) {
            self.cut_to(action.kind(), *point, walk, filter)?;
        }
        Ok(())
    }

    fn follow_ellipse(
        &mut self,
        arc: &EllipseArc,
        first: bool,
        walk: &mut Walk,
        filter: &mut dyn MotionFilter,
    ) -> MotionResult<()> {
        let start = arc.start_point();
        if !same_xy(&start, &self.cursor) {
            if first {
                self.travel(ActionKind::Ellipse, start, walk, filter)?;
            } else {
                self.plunge_for_cut()?;
                self.cut_to(ActionKind::Ellipse, start, walk, filter)?;
            }
        }
        self.plunge_for_cut()?;

        match self.native_arc(arc) {
            Some(command) => self.emit_arc(arc, command, walk, filter),
            None => self.interpolate(&Action::Ellipse(*arc), walk, filter),
        }
    }

    /// The native arc command for `arc`, if policy and driver allow one.
    fn native_arc(&self, arc: &EllipseArc) -> Option<ArcCommand> {
        if !self.policy.native_arcs || !arc.is_circular() {
            return None;
        }
        let command = match (self.policy.arc_direction, arc.clockwise) {
            (ArcDirection::Mirrored, false) | (ArcDirection::Direct, true) => ArcCommand::Clockwise,
            (ArcDirection::Mirrored, true) | (ArcDirection::Direct, false) => {
                ArcCommand::CounterClockwise
            }
        };
        if self.driver.has_capability(command.capability()) {
            Some(command)
        } else {
            debug!(
                "Driver lacks {}, interpolating arc",
                command.capability()
            );
            None
        }
    }

    fn emit_arc(
        &mut self,
        arc: &EllipseArc,
        command: ArcCommand,
        walk: &mut Walk,
        filter: &mut dyn MotionFilter,
    ) -> MotionResult<()> {
        let center = arc.center();
        let ArcPoints { start, end } =
            arc_to_points(&center, arc.start_angle, arc.end_angle, arc.radius_x);

        let mut samples = Vec::with_capacity(CURVE_DIVISIONS + 1);
        sample_ellipse(arc, CURVE_DIVISIONS, &mut samples);
        walk.traversed += polyline_length(&samples);

        let (i, j) = match self.policy.arc_center {
            ArcCenterMode::Absolute => (center.x, center.y),
            ArcCenterMode::RelativeToStart => (center.x - start.x, center.y - start.y),
        };
        let mut params = Params::arc(end.x, end.y, i, j);
        if self.policy.depth_strategy == DepthStrategy::Helix {
            params.z = Some(walk.helix_z());
        }
        let params = filter.transform(ActionKind::Ellipse, params, &walk.state(self.position));

        match command {
            ArcCommand::Clockwise => self.arc_cw(params)?,
            ArcCommand::CounterClockwise => self.arc_ccw(params)?,
        }
        self.cursor = end;
        Ok(())
    }

    /// Pushes changed ancillary values to the driver, in tool, speed, feed,
    /// coolant order.
    fn sync_machine_state(&mut self) -> MotionResult<()> {
        if let Some(tool) = self.context.tool {
            if self.applied.tool != Some(tool) {
                if self.driver.has_capability(Capability::ToolChange) {
                    debug!("Changing to tool {}", tool);
                    self.driver.tool_change(tool)?;
                } else {
                    trace!("Driver lacks {}, ignoring tool {}", Capability::ToolChange, tool);
                }
                self.applied.tool = Some(tool);
            }
        }

        if let Some(speed) = self.context.speed {
            if self.applied.speed != Some(speed) {
                if self.driver.has_capability(Capability::Speed) {
                    debug!("Setting spindle speed {}", speed);
                    self.driver.speed(speed)?;
                } else {
                    trace!("Driver lacks {}, ignoring speed {}", Capability::Speed, speed);
                }
                self.applied.speed = Some(speed);
            }
        }

        if let Some(feed) = self.context.feed {
            if self.applied.feed != Some(feed) {
                if self.driver.has_capability(Capability::Feed) {
                    debug!("Setting feed rate {}", feed);
                    self.driver.feed(feed)?;
                } else {
                    trace!("Driver lacks {}, ignoring feed {}", Capability::Feed, feed);
                }
                self.applied.feed = Some(feed);
            }
        }

        if let Some(coolant) = self.context.coolant {
            if self.applied.coolant != Some(coolant) {
                if self.driver.has_capability(Capability::Coolant) {
                    debug!("Setting coolant {}", coolant);
                    self.driver.coolant(coolant)?;
                } else {
                    trace!("Driver lacks {}, ignoring coolant {}", Capability::Coolant, coolant);
                }
                self.applied.coolant = Some(coolant);
            }
        }

        Ok(())
    }
}
