/*! Geometry types for screen coordinates. */

use serde::{Deserialize, Serialize};

/// Rectangle in screen coordinates, edges in pixels.
///
/// `right` and `bottom` are exclusive of nothing in particular - the values
/// come straight from the host accessibility layer, which reports edges, not
/// origin plus size.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Rect {
  pub left: i32,
  pub top: i32,
  pub right: i32,
  pub bottom: i32,
}

impl Rect {
  /// The zero rectangle, returned wherever a bounds read fails.
  pub const EMPTY: Rect = Rect {
    left: 0,
    top: 0,
    right: 0,
    bottom: 0,
  };

  pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
    Self {
      left,
      top,
      right,
      bottom,
    }
  }

  pub const fn width(&self) -> i32 {
    self.right - self.left
  }

  pub const fn height(&self) -> i32 {
    self.bottom - self.top
  }

  /// Center of the rectangle as a gesture target.
  pub fn center(&self) -> Point {
    Point::new(
      (self.left + self.right) as f32 / 2.0,
      (self.top + self.bottom) as f32 / 2.0,
    )
  }

  /// Check if this rectangle fully contains another.
  pub const fn contains(&self, other: &Rect) -> bool {
    self.left <= other.left
      && self.top <= other.top
      && self.right >= other.right
      && self.bottom >= other.bottom
  }

  /// Check if this rectangle lies fully inside another.
  pub const fn is_inside(&self, other: &Rect) -> bool {
    other.contains(self)
  }

  /// Check if a point is contained within this rectangle.
  pub fn contains_point(&self, point: Point) -> bool {
    point.x >= self.left as f32
      && point.x <= self.right as f32
      && point.y >= self.top as f32
      && point.y <= self.bottom as f32
  }
}

/// A 2D point in screen coordinates.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Point {
  pub x: f32,
  pub y: f32,
}

impl Point {
  pub const fn new(x: f32, y: f32) -> Self {
    Self { x, y }
  }

  /// Linear interpolation toward another point. `t` in `[0, 1]`; endpoints
  /// are exact.
  pub fn lerp(self, other: Point, t: f32) -> Point {
    Point::new(
      self.x * (1.0 - t) + other.x * t,
      self.y * (1.0 - t) + other.y * t,
    )
  }

  /// Euclidean distance to another point.
  pub fn distance_to(self, other: Point) -> f32 {
    let dx = other.x - self.x;
    let dy = other.y - self.y;
    (dx * dx + dy * dy).sqrt()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  mod rect_contains {
    use super::*;

    #[test]
    fn rect_contains_itself() {
      let r = Rect::new(10, 20, 110, 70);
      assert!(r.contains(&r), "a rect should contain itself");
    }

    #[test]
    fn strictly_smaller_rect_is_contained() {
      let outer = Rect::new(0, 0, 100, 100);
      let inner = Rect::new(10, 10, 90, 90);
      assert!(outer.contains(&inner));
      assert!(!inner.contains(&outer), "containment is not symmetric");
    }

    #[test]
    fn overlapping_rect_is_not_contained() {
      let a = Rect::new(0, 0, 100, 100);
      let b = Rect::new(50, 50, 150, 150);
      assert!(!a.contains(&b), "partial overlap is not containment");
    }

    #[test]
    fn shared_edges_count_as_contained() {
      let outer = Rect::new(0, 0, 100, 100);
      let flush = Rect::new(0, 10, 100, 90);
      assert!(outer.contains(&flush), "flush edges should be contained");
    }
  }

  mod rect_is_inside {
    use super::*;

    #[test]
    fn is_inside_mirrors_contains() {
      let outer = Rect::new(0, 0, 100, 100);
      let inner = Rect::new(25, 25, 75, 75);
      assert!(inner.is_inside(&outer));
      assert!(!outer.is_inside(&inner));
    }
  }

  mod rect_contains_point {
    use super::*;

    #[test]
    fn center_point_is_contained() {
      let r = Rect::new(0, 0, 100, 100);
      assert!(r.contains_point(Point::new(50.0, 50.0)));
    }

    #[test]
    fn corners_are_contained() {
      let r = Rect::new(10, 20, 110, 70);
      assert!(r.contains_point(Point::new(10.0, 20.0)), "top-left");
      assert!(r.contains_point(Point::new(110.0, 70.0)), "bottom-right");
    }

    #[test]
    fn point_outside_is_not_contained() {
      let r = Rect::new(0, 0, 100, 100);
      assert!(!r.contains_point(Point::new(-1.0, 50.0)), "left of rect");
      assert!(!r.contains_point(Point::new(50.0, 101.0)), "below rect");
    }
  }

  mod rect_dimensions {
    use super::*;

    #[test]
    fn width_and_height() {
      let r = Rect::new(10, 20, 110, 70);
      assert_eq!(r.width(), 100);
      assert_eq!(r.height(), 50);
    }

    #[test]
    fn empty_rect_is_zero_sized() {
      assert_eq!(Rect::EMPTY.width(), 0);
      assert_eq!(Rect::EMPTY.height(), 0);
    }

    #[test]
    fn center_of_rect() {
      let r = Rect::new(0, 0, 100, 50);
      assert_eq!(r.center(), Point::new(50.0, 25.0));
    }
  }

  mod point_lerp {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
      let a = Point::new(0.0, 0.0);
      let b = Point::new(100.0, 200.0);
      assert_eq!(a.lerp(b, 0.0), a);
      assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn midpoint() {
      let a = Point::new(0.0, 0.0);
      let b = Point::new(100.0, 200.0);
      assert_eq!(a.lerp(b, 0.5), Point::new(50.0, 100.0));
    }
  }

  mod point_distance {
    use super::*;

    #[test]
    fn pythagorean_triple() {
      let a = Point::new(0.0, 0.0);
      let b = Point::new(3.0, 4.0);
      assert_eq!(a.distance_to(b), 5.0);
    }

    #[test]
    fn distance_to_self_is_zero() {
      let p = Point::new(12.0, -7.0);
      assert_eq!(p.distance_to(p), 0.0);
    }
  }
}
