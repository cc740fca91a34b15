//! A whole drawing: an ordered list of possibly disjoint contours.

use crate::subpath::SubPath;
use serde::{Deserialize, Serialize};

/// Anything that can be walked as a sequence of contours.
///
/// A lone [`SubPath`] is a one-contour sequence, so it traverses exactly
/// like a [`Path`] holding only that contour.
pub trait Contours {
    fn contours(&self) -> &[SubPath];
}

impl Contours for SubPath {
    fn contours(&self) -> &[SubPath] {
        std::slice::from_ref(self)
    }
}

impl Contours for Path {
    fn contours(&self) -> &[SubPath] {
        &self.subpaths
    }
}

/// Ordered collection of [`SubPath`]s.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    subpaths: Vec<SubPath>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, subpath: SubPath) {
        self.subpaths.push(subpath);
    }

    pub fn subpaths(&self) -> &[SubPath] {
        &self.subpaths
    }

    pub fn len(&self) -> usize {
        self.subpaths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subpaths.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SubPath> {
        self.subpaths.iter()
    }
}

impl From<SubPath> for Path {
    fn from(subpath: SubPath) -> Self {
        Self {
            subpaths: vec![subpath],
        }
    }
}

impl FromIterator<SubPath> for Path {
    fn from_iter<I: IntoIterator<Item = SubPath>>(iter: I) -> Self {
        Self {
            subpaths: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a SubPath;
    type IntoIter = std::slice::Iter<'a, SubPath>;

    fn into_iter(self) -> Self::IntoIter {
        self.subpaths.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolmotion_core::Point;

    #[test]
    fn test_single_subpath_contours_match_path() {
        let sub = SubPath::from_points(&[Point::xy(0.0, 0.0), Point::xy(1.0, 1.0)]);
        let path = sub.to_path();
        assert_eq!(sub.contours(), path.contours());
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn test_collect_and_iterate() {
        let path: Path = (0..3)
            .map(|i| SubPath::from_points(&[Point::xy(i as f64, 0.0)]))
            .collect();
        assert_eq!(path.len(), 3);
        let xs: Vec<f64> = path
            .iter()
            .map(|s| s.first_point().unwrap().x)
            .collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0]);
    }
}
