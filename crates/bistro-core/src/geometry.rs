//! # Floor-Plan Geometry
//!
//! Shape types and the pairwise overlap test used to validate table
//! placement.
//!
//! ## Overlap Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Shape Pair Dispatch                            │
//! │                                                                     │
//! │  Rectangle × Rectangle   axis-aligned bounding-box test             │
//! │  Circle    × Circle      center distance < sum of radii             │
//! │  Circle    × Rectangle   clamp center to rect, compare to radius    │
//! │                                                                     │
//! │  All comparisons are STRICT: edge-touching rectangles and           │
//! │  externally tangent circles do NOT overlap. Back-to-back            │
//! │  furniture is legal.                                                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Coordinates are integers in floor-plan units. Distance comparisons use
//! squared integer arithmetic, so exact-boundary cases need no epsilon.

use serde::{Deserialize, Serialize};

// =============================================================================
// Shape Kind
// =============================================================================

/// Discriminant of a [`Shape`], stored as its own database column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Rectangle,
    Circle,
}

// =============================================================================
// Shape
// =============================================================================

/// A table's footprint on the floor plan.
///
/// The anchor `(x, y)` is the top-left corner for rectangles and the
/// center for circles, matching how the floor-plan editor places tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Rectangle {
        x: i64,
        y: i64,
        width: i64,
        height: i64,
    },
    Circle {
        x: i64,
        y: i64,
        radius: i64,
    },
}

impl Shape {
    /// Returns the discriminant for this shape.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rectangle { .. } => ShapeKind::Rectangle,
            Shape::Circle { .. } => ShapeKind::Circle,
        }
    }

    /// Tests whether two shapes overlap.
    ///
    /// Order-independent: `a.overlaps(&b) == b.overlaps(&a)` for every
    /// shape pair. Edge-touching shapes do not overlap.
    pub fn overlaps(&self, other: &Shape) -> bool {
        match (self, other) {
            (
                Shape::Rectangle {
                    x: x1,
                    y: y1,
                    width: w1,
                    height: h1,
                },
                Shape::Rectangle {
                    x: x2,
                    y: y2,
                    width: w2,
                    height: h2,
                },
            ) => rectangles_overlap(*x1, *y1, *w1, *h1, *x2, *y2, *w2, *h2),
            (
                Shape::Circle {
                    x: x1,
                    y: y1,
                    radius: r1,
                },
                Shape::Circle {
                    x: x2,
                    y: y2,
                    radius: r2,
                },
            ) => circles_overlap(*x1, *y1, *r1, *x2, *y2, *r2),
            (
                Shape::Circle { x: cx, y: cy, radius },
                Shape::Rectangle { x, y, width, height },
            )
            | (
                Shape::Rectangle { x, y, width, height },
                Shape::Circle { x: cx, y: cy, radius },
            ) => circle_rectangle_overlap(*cx, *cy, *radius, *x, *y, *width, *height),
        }
    }
}

// =============================================================================
// Pairwise Tests
// =============================================================================

/// Axis-aligned bounding-box test.
///
/// Rectangle `(x, y, w, h)` spans `[x, x+w] × [y, y+h]`. Strict
/// inequalities: rectangles sharing only an edge do not overlap.
fn rectangles_overlap(
    x1: i64,
    y1: i64,
    w1: i64,
    h1: i64,
    x2: i64,
    y2: i64,
    w2: i64,
    h2: i64,
) -> bool {
    let (r1_left, r1_right) = (x1, x1 + w1);
    let (r1_top, r1_bottom) = (y1, y1 + h1);
    let (r2_left, r2_right) = (x2, x2 + w2);
    let (r2_top, r2_bottom) = (y2, y2 + h2);

    r1_left < r2_right && r1_right > r2_left && r1_top < r2_bottom && r1_bottom > r2_top
}

/// Circle pair test: overlap iff center distance < sum of radii.
///
/// Compared in squared form to stay in integer arithmetic; externally
/// tangent circles (distance == r1 + r2) do not overlap.
fn circles_overlap(x1: i64, y1: i64, r1: i64, x2: i64, y2: i64, r2: i64) -> bool {
    let dx = x1 - x2;
    let dy = y1 - y2;
    let radii = r1 + r2;
    dx * dx + dy * dy < radii * radii
}

/// Circle/rectangle test: clamp the circle's center to the rectangle's
/// bounds to find the closest point, then compare squared distance with
/// the squared radius.
fn circle_rectangle_overlap(cx: i64, cy: i64, radius: i64, x: i64, y: i64, w: i64, h: i64) -> bool {
    let closest_x = cx.clamp(x, x + w);
    let closest_y = cy.clamp(y, y + h);

    let dx = cx - closest_x;
    let dy = cy - closest_y;

    dx * dx + dy * dy < radius * radius
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: i64, y: i64, width: i64, height: i64) -> Shape {
        Shape::Rectangle { x, y, width, height }
    }

    fn circle(x: i64, y: i64, radius: i64) -> Shape {
        Shape::Circle { x, y, radius }
    }

    #[test]
    fn test_rectangles_overlapping() {
        assert!(rect(0, 0, 100, 100).overlaps(&rect(50, 50, 100, 100)));
    }

    #[test]
    fn test_rectangles_corner_touching_do_not_overlap() {
        assert!(!rect(0, 0, 100, 100).overlaps(&rect(100, 100, 100, 100)));
    }

    #[test]
    fn test_rectangles_edge_touching_do_not_overlap() {
        assert!(!rect(0, 0, 100, 100).overlaps(&rect(100, 0, 100, 100)));
    }

    #[test]
    fn test_rectangles_disjoint() {
        assert!(!rect(0, 0, 50, 50).overlaps(&rect(200, 200, 50, 50)));
    }

    #[test]
    fn test_rectangle_containing_rectangle() {
        assert!(rect(0, 0, 200, 200).overlaps(&rect(50, 50, 20, 20)));
    }

    #[test]
    fn test_circles_overlapping() {
        // distance = 50, sum of radii = 100
        assert!(circle(0, 0, 50).overlaps(&circle(40, 30, 50)));
    }

    #[test]
    fn test_circles_disjoint() {
        // distance = 100, sum of radii = 60
        assert!(!circle(0, 0, 30).overlaps(&circle(100, 0, 30)));
    }

    #[test]
    fn test_circles_externally_tangent_do_not_overlap() {
        // distance = 60 == sum of radii
        assert!(!circle(0, 0, 30).overlaps(&circle(60, 0, 30)));
    }

    #[test]
    fn test_circle_rectangle_overlapping() {
        // Center inside the rectangle
        assert!(circle(50, 50, 10).overlaps(&rect(0, 0, 100, 100)));
        // Center outside, closest edge point within radius
        assert!(circle(110, 50, 20).overlaps(&rect(0, 0, 100, 100)));
    }

    #[test]
    fn test_circle_rectangle_tangent_does_not_overlap() {
        // Closest point is (100, 50), distance exactly the radius
        assert!(!circle(120, 50, 20).overlaps(&rect(0, 0, 100, 100)));
    }

    #[test]
    fn test_circle_rectangle_disjoint() {
        assert!(!circle(300, 300, 25).overlaps(&rect(0, 0, 100, 100)));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let pairs = [
            (rect(0, 0, 100, 100), rect(50, 50, 100, 100)),
            (rect(0, 0, 100, 100), circle(110, 50, 20)),
            (circle(0, 0, 50), circle(40, 30, 50)),
            (rect(0, 0, 100, 100), rect(100, 0, 100, 100)),
        ];
        for (a, b) in pairs {
            assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }
    }

    #[test]
    fn test_shape_kind() {
        assert_eq!(rect(0, 0, 1, 1).kind(), ShapeKind::Rectangle);
        assert_eq!(circle(0, 0, 1).kind(), ShapeKind::Circle);
    }

    #[test]
    fn test_shape_serializes_with_kind_tag() {
        let json = serde_json::to_value(circle(10, 20, 30)).unwrap();
        assert_eq!(json["kind"], "circle");
        assert_eq!(json["radius"], 30);

        let back: Shape =
            serde_json::from_str(r#"{"kind":"rectangle","x":0,"y":0,"width":5,"height":5}"#)
                .unwrap();
        assert_eq!(back, rect(0, 0, 5, 5));
    }
}
