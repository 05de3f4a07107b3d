//! Static shape geometry table
//!
//! Each shape is a unit-sized outline in model space, scaled per instance
//! by the particle's size and rotated by its spawn angle.

use daub_core::ShapeKind;

/// How a shape's vertex list is assembled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// One point per instance
    Points,
    /// Independent segments, two vertices each
    Lines,
    /// Closed outline through every vertex
    LineLoop,
    /// Convex fan anchored at the first vertex
    TriangleFan,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeGeometry {
    /// Interleaved `x, y` pairs
    pub vertices: &'static [f32],
    pub primitive: Primitive,
    /// Radial alpha falloff from the shape's center
    pub shaded: bool,
}

impl ShapeGeometry {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 2
    }

    pub fn vertex(&self, i: usize) -> [f32; 2] {
        [self.vertices[2 * i], self.vertices[2 * i + 1]]
    }

    pub fn is_filled(&self) -> bool {
        self.primitive == Primitive::TriangleFan
    }
}

const POINT: [f32; 2] = [0.0, 0.0];
const LINE: [f32; 4] = [-1.0, 0.0, 1.0, 0.0];
const TRI: [f32; 6] = [0.0, 0.5, 0.6, -0.5, -0.6, -0.5];
const QUAD: [f32; 8] = [1.0, 1.0, 1.0, -1.0, -1.0, -1.0, -1.0, 1.0];
const HEX: [f32; 12] = [
    1.0, 0.0, 0.5, -0.8, -0.5, -0.8, -1.0, 0.0, -0.5, 0.8, 0.5, 0.8,
];

static POINTS: ShapeGeometry = ShapeGeometry {
    vertices: &POINT,
    primitive: Primitive::Points,
    shaded: false,
};
static LINES: ShapeGeometry = ShapeGeometry {
    vertices: &LINE,
    primitive: Primitive::Lines,
    shaded: false,
};
static TRI_STROKED: ShapeGeometry = ShapeGeometry {
    vertices: &TRI,
    primitive: Primitive::LineLoop,
    shaded: false,
};
static TRI_FILLED: ShapeGeometry = ShapeGeometry {
    vertices: &TRI,
    primitive: Primitive::TriangleFan,
    shaded: false,
};
static SQUARE_STROKED: ShapeGeometry = ShapeGeometry {
    vertices: &QUAD,
    primitive: Primitive::LineLoop,
    shaded: false,
};
static SQUARE_FILLED: ShapeGeometry = ShapeGeometry {
    vertices: &QUAD,
    primitive: Primitive::TriangleFan,
    shaded: false,
};
static HEX_STROKED: ShapeGeometry = ShapeGeometry {
    vertices: &HEX,
    primitive: Primitive::LineLoop,
    shaded: false,
};
static HEX_FILLED: ShapeGeometry = ShapeGeometry {
    vertices: &HEX,
    primitive: Primitive::TriangleFan,
    shaded: false,
};
static CIRCLE_SHADED: ShapeGeometry = ShapeGeometry {
    vertices: &QUAD,
    primitive: Primitive::TriangleFan,
    shaded: true,
};

/// Geometry descriptor for `kind`
pub fn geometry(kind: ShapeKind) -> &'static ShapeGeometry {
    match kind {
        ShapeKind::Points => &POINTS,
        ShapeKind::Lines => &LINES,
        ShapeKind::TriStroked => &TRI_STROKED,
        ShapeKind::TriFilled => &TRI_FILLED,
        ShapeKind::SquareStroked => &SQUARE_STROKED,
        ShapeKind::SquareFilled => &SQUARE_FILLED,
        ShapeKind::HexStroked => &HEX_STROKED,
        ShapeKind::HexFilled => &HEX_FILLED,
        ShapeKind::CircleShaded => &CIRCLE_SHADED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_shape_has_whole_vertices() {
        for kind in ShapeKind::ALL {
            let g = geometry(kind);
            assert_eq!(g.vertices.len() % 2, 0, "{kind}");
            assert!(g.vertex_count() >= 1, "{kind}");
        }
    }

    #[test]
    fn stroked_and_filled_share_outlines() {
        assert_eq!(
            geometry(ShapeKind::HexStroked).vertices,
            geometry(ShapeKind::HexFilled).vertices
        );
        assert!(!geometry(ShapeKind::HexStroked).is_filled());
        assert!(geometry(ShapeKind::HexFilled).is_filled());
        assert_eq!(geometry(ShapeKind::TriFilled).vertex_count(), 3);
    }

    #[test]
    fn circle_is_a_shaded_quad() {
        let g = geometry(ShapeKind::CircleShaded);
        assert!(g.shaded);
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.vertex(0), [1.0, 1.0]);
    }

    #[test]
    fn lines_are_a_single_segment() {
        let g = geometry(ShapeKind::Lines);
        assert_eq!(g.primitive, Primitive::Lines);
        assert_eq!(g.vertex(0), [-1.0, 0.0]);
        assert_eq!(g.vertex(1), [1.0, 0.0]);
    }
}
