use foundation::GeometryError;
use foundation::math::{Enu, Vec2};

use crate::centerline::{SEGMENT_EPSILON_M, drop_coincident};

/// A width-extruded path polygon.
///
/// Holds exactly `2N` vertices for an `N`-point centerline: the left offsets
/// in centerline order at `0..N`, then the right offsets in reverse order at
/// `N..2N`, so vertex `i` and vertex `2N - 1 - i` flank centerline point `i`.
///
/// The vertex type is generic so the same ring can be carried from ENU
/// metres into renderer coordinates with [`Ribbon::map`].
#[derive(Debug, Clone, PartialEq)]
pub struct Ribbon<V = Enu> {
    vertices: Vec<V>,
    centerline: Vec<usize>,
}

impl<V> Ribbon<V> {
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    pub fn into_vertices(self) -> Vec<V> {
        self.vertices
    }

    /// Number of centerline points `N`.
    pub fn centerline_len(&self) -> usize {
        self.centerline.len()
    }

    /// Caller-side index of each centerline point.
    pub fn centerline_indices(&self) -> &[usize] {
        &self.centerline
    }

    pub fn left(&self, i: usize) -> Option<&V> {
        if i < self.centerline.len() {
            self.vertices.get(i)
        } else {
            None
        }
    }

    pub fn right(&self, i: usize) -> Option<&V> {
        let n = self.centerline.len();
        if i < n {
            self.vertices.get(2 * n - 1 - i)
        } else {
            None
        }
    }

    /// Transforms every vertex, keeping the ring layout and index mapping.
    pub fn map<W>(&self, f: impl FnMut(&V) -> W) -> Ribbon<W> {
        Ribbon {
            vertices: self.vertices.iter().map(f).collect(),
            centerline: self.centerline.clone(),
        }
    }
}

/// Builds ribbons of a fixed width in metres.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RibbonBuilder {
    width: f64,
}

impl RibbonBuilder {
    pub fn new(width: f64) -> Self {
        Self { width }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Offsets `centerline` by half the width on each side.
    ///
    /// Interior vertices average the offsets of their two adjacent segments
    /// (a simple miter); the two endpoints use their single segment, leaving
    /// the ends open. Only east/north are offset; `up` is carried through.
    pub fn build(&self, centerline: &[Enu]) -> Result<Ribbon, GeometryError> {
        let indices = (0..centerline.len()).collect();
        self.build_indexed(centerline, indices)
    }

    /// Like [`RibbonBuilder::build`], but zero-length segments are skipped
    /// instead of failing the whole path.
    pub fn build_skipping_degenerate(&self, centerline: &[Enu]) -> Result<Ribbon, GeometryError> {
        let clean = drop_coincident(centerline);
        self.build_indexed(&clean.points, clean.source_indices)
    }

    fn build_indexed(
        &self,
        centerline: &[Enu],
        source_indices: Vec<usize>,
    ) -> Result<Ribbon, GeometryError> {
        let n = centerline.len();
        if n < 2 || !self.width.is_finite() || self.width <= 0.0 {
            return Err(GeometryError::DegenerateRibbon {
                points: n,
                width: self.width,
            });
        }

        let half = self.width / 2.0;
        let segment_offsets = centerline
            .windows(2)
            .enumerate()
            .map(|(i, pair)| {
                let d = pair[1].horizontal() - pair[0].horizontal();
                let len = d.length();
                if len < SEGMENT_EPSILON_M {
                    return Err(GeometryError::DegenerateSegment { index: i });
                }
                Ok(d.perp_left().scale(half / len))
            })
            .collect::<Result<Vec<Vec2>, _>>()?;

        let vertex_offsets: Vec<Vec2> = (0..n)
            .map(|i| match i {
                0 => segment_offsets[0],
                i if i == n - 1 => segment_offsets[n - 2],
                i => segment_offsets[i - 1].midpoint(segment_offsets[i]),
            })
            .collect();

        let left = centerline
            .iter()
            .zip(&vertex_offsets)
            .map(|(p, off)| p.with_horizontal(p.horizontal() + *off));
        let right = centerline
            .iter()
            .zip(&vertex_offsets)
            .rev()
            .map(|(p, off)| p.with_horizontal(p.horizontal() - *off));

        Ok(Ribbon {
            vertices: left.chain(right).collect(),
            centerline: source_indices,
        })
    }
}
