//! A single continuous contour.

use crate::action::{Action, EllipseArc};
use crate::error::{GeometryError, GeometryResult};
use crate::flatten;
use crate::path::Path;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use toolmotion_core::Point;
use tracing::trace;

/// Subdivision count used when none is given.
pub const DEFAULT_DIVISIONS: usize = 40;

/// Integer polygon vertex, as consumed by polygon clipping libraries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntPoint {
    pub x: i64,
    pub y: i64,
}

/// Closest action endpoint found by [`SubPath::nearest_point`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestPoint {
    /// Index of the action whose endpoint is closest.
    pub index: usize,
    pub point: Point,
    pub distance: f64,
}

/// Ordered actions forming one contour.
///
/// Flattened polylines are cached per subdivision count; every mutation
/// clears the cache.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubPath {
    actions: Vec<Action>,
    #[serde(default)]
    closed: bool,
    #[serde(skip)]
    points_cache: RefCell<HashMap<usize, Rc<[Point]>>>,
}

impl PartialEq for SubPath {
    fn eq(&self, other: &Self) -> bool {
        self.closed == other.closed && self.actions == other.actions
    }
}

impl SubPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// A MoveTo to the first point followed by a LineTo per remaining point.
    pub fn from_points(points: &[Point]) -> Self {
        let mut sub = Self::new();
        if let Some((first, rest)) = points.split_first() {
            sub.move_to(first.x, first.y);
            for p in rest {
                sub.line_to(p.x, p.y);
            }
        }
        sub
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Marks the contour closed; flattening then returns to the first point.
    pub fn close(&mut self) {
        self.closed = true;
        self.invalidate();
    }

    /// Appends an action.
    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
        self.invalidate();
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.push(Action::MoveTo { x, y });
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.push(Action::LineTo { x, y });
    }

    pub fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
        self.push(Action::QuadraticCurveTo { cpx, cpy, x, y });
    }

    pub fn bezier_curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) {
        self.push(Action::BezierCurveTo {
            cp1x,
            cp1y,
            cp2x,
            cp2y,
            x,
            y,
        });
    }

    /// Circular arc: an ellipse with equal radii.
    pub fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64, clockwise: bool) {
        self.ellipse(x, y, radius, radius, start_angle, end_angle, clockwise);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn ellipse(
        &mut self,
        x: f64,
        y: f64,
        radius_x: f64,
        radius_y: f64,
        start_angle: f64,
        end_angle: f64,
        clockwise: bool,
    ) {
        self.ellipse_with_offset(x, y, radius_x, radius_y, start_angle, end_angle, clockwise, 0.0, 0.0);
    }

    /// Ellipse whose center is displaced by `(offset_x, offset_y)`.
    #[allow(clippy::too_many_arguments)]
    pub fn ellipse_with_offset(
        &mut self,
        x: f64,
        y: f64,
        radius_x: f64,
        radius_y: f64,
        start_angle: f64,
        end_angle: f64,
        clockwise: bool,
        offset_x: f64,
        offset_y: f64,
    ) {
        self.push(Action::Ellipse(EllipseArc {
            x,
            y,
            radius_x,
            radius_y,
            start_angle,
            end_angle,
            clockwise,
            offset_x,
            offset_y,
        }));
    }

    fn invalidate(&mut self) {
        self.points_cache.get_mut().clear();
    }

    /// Flattens the contour into a polyline.
    ///
    /// Curves start from the last flattened point (the origin when a curve
    /// opens the contour). A `divisions` of zero is treated as one.
    pub fn get_points(&self, divisions: usize) -> Rc<[Point]> {
        let divisions = divisions.max(1);
        if let Some(points) = self.points_cache.borrow().get(&divisions) {
            return Rc::clone(points);
        }

        trace!(divisions, actions = self.actions.len(), "flattening subpath");
        let mut points: Vec<Point> = Vec::new();
        for action in &self.actions {
            let from = points.last().copied().unwrap_or_default();
            action.flatten_into(from, divisions, &mut points);
        }
        if self.closed {
            if let Some(&first) = points.first() {
                points.push(first);
            }
        }

        let points: Rc<[Point]> = points.into();
        self.points_cache
            .borrow_mut()
            .insert(divisions, Rc::clone(&points));
        points
    }

    /// [`get_points`](Self::get_points) at [`DEFAULT_DIVISIONS`].
    pub fn get_points_default(&self) -> Rc<[Point]> {
        self.get_points(DEFAULT_DIVISIONS)
    }

    /// Length of the flattened contour.
    pub fn get_length(&self) -> GeometryResult<f64> {
        if self.is_empty() {
            return Err(GeometryError::empty("length"));
        }
        Ok(flatten::polyline_length(&self.get_points_default()))
    }

    pub fn first_point(&self) -> GeometryResult<Point> {
        self.actions
            .first()
            .map(Action::endpoint)
            .ok_or_else(|| GeometryError::empty("first point"))
    }

    pub fn last_point(&self) -> GeometryResult<Point> {
        self.actions
            .last()
            .map(Action::endpoint)
            .ok_or_else(|| GeometryError::empty("last point"))
    }

    /// Endpoint of action `index`.
    pub fn point_at(&self, index: usize) -> GeometryResult<Point> {
        self.actions
            .get(index)
            .map(Action::endpoint)
            .ok_or(GeometryError::IndexOutOfRange {
                index,
                len: self.actions.len(),
            })
    }

    /// Closest action endpoint to `p`; ties go to the earliest action.
    pub fn nearest_point(&self, p: &Point) -> GeometryResult<NearestPoint> {
        let mut best: Option<NearestPoint> = None;
        for (index, action) in self.actions.iter().enumerate() {
            let point = action.endpoint();
            let distance = p.distance_to(&point);
            if best.map_or(true, |b| distance < b.distance) {
                best = Some(NearestPoint {
                    index,
                    point,
                    distance,
                });
            }
        }
        best.ok_or_else(|| GeometryError::empty("nearest point"))
    }

    /// Rotates the contour to start at action `start`.
    ///
    /// Every action becomes a LineTo to its endpoint (curve shape is not
    /// kept) and a final LineTo returns to the new first point. `shift(0)`
    /// returns the contour unchanged.
    pub fn shift(&self, start: usize) -> GeometryResult<SubPath> {
        if start == 0 {
            return Ok(self.clone());
        }
        if start >= self.actions.len() {
            return Err(GeometryError::IndexOutOfRange {
                index: start,
                len: self.actions.len(),
            });
        }

        let mut shifted = SubPath::new();
        for action in self.actions[start..].iter().chain(&self.actions[..start]) {
            let p = action.endpoint();
            shifted.line_to(p.x, p.y);
        }
        let first = self.actions[start].endpoint();
        shifted.line_to(first.x, first.y);
        Ok(shifted)
    }

    /// Wraps a copy of this contour in a [`Path`].
    pub fn to_path(&self) -> Path {
        Path::from(self.clone())
    }

    /// Flattened points scaled by `scale` and rounded onto the integer grid.
    pub fn to_poly(&self, scale: f64) -> Vec<IntPoint> {
        self.get_points_default()
            .iter()
            .map(|p| IntPoint {
                x: (p.x * scale).round() as i64,
                y: (p.y * scale).round() as i64,
            })
            .collect()
    }

    /// Builds a closed contour from an integer polygon produced with [`to_poly`](Self::to_poly).
    pub fn from_poly(poly: &[IntPoint], scale: f64) -> GeometryResult<SubPath> {
        let (first, rest) = poly
            .split_first()
            .ok_or_else(|| GeometryError::empty("polygon conversion"))?;
        let unscale = |p: &IntPoint| (p.x as f64 / scale, p.y as f64 / scale);

        let mut sub = SubPath::new();
        let (x0, y0) = unscale(first);
        sub.move_to(x0, y0);
        for p in rest {
            let (x, y) = unscale(p);
            sub.line_to(x, y);
        }
        sub.line_to(x0, y0);
        Ok(sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> SubPath {
        SubPath::from_points(&[
            Point::xy(0.0, 0.0),
            Point::xy(10.0, 0.0),
            Point::xy(10.0, 10.0),
            Point::xy(0.0, 10.0),
        ])
    }

    #[test]
    fn test_cache_is_shared_until_mutation() {
        let mut sub = square();
        let a = sub.get_points(40);
        let b = sub.get_points(40);
        assert!(Rc::ptr_eq(&a, &b));

        sub.line_to(0.0, 0.0);
        let c = sub.get_points(40);
        assert!(!Rc::ptr_eq(&a, &c));
        assert_eq!(c.len(), 5);
    }

    #[test]
    fn test_close_invalidates_and_appends_first_point() {
        let mut sub = square();
        assert_eq!(sub.get_points(40).len(), 4);
        sub.close();
        let pts = sub.get_points(40);
        assert_eq!(pts.len(), 5);
        assert_eq!(pts[4], Point::xy(0.0, 0.0));
    }

    #[test]
    fn test_empty_queries_fail() {
        let sub = SubPath::new();
        assert!(matches!(
            sub.first_point(),
            Err(GeometryError::EmptyGeometry { .. })
        ));
        assert!(sub.last_point().is_err());
        assert!(sub.get_length().is_err());
        assert!(sub.nearest_point(&Point::default()).is_err());
        assert!(sub.get_points(40).is_empty());
    }

    #[test]
    fn test_equality_ignores_cache() {
        let a = square();
        let b = square();
        let _ = a.get_points(10);
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_divisions_treated_as_one() {
        let mut sub = SubPath::new();
        sub.move_to(0.0, 0.0);
        sub.quadratic_curve_to(5.0, 5.0, 10.0, 0.0);
        let pts = sub.get_points(0);
        assert_eq!(pts.len(), 2);
        assert_eq!(pts[1], Point::xy(10.0, 0.0));
    }

    #[test]
    fn test_serde_skips_cache() {
        let sub = square();
        let _ = sub.get_points(40);
        let json = serde_json::to_string(&sub).unwrap();
        assert!(!json.contains("points_cache"));
        let back: SubPath = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sub);
    }
}
