use crate::ribbon::Ribbon;

/// One quad of a split ribbon, covering a single centerline segment.
#[derive(Debug, Clone, PartialEq)]
pub struct RibbonSegment<V> {
    /// Segment position within the ribbon, `0..N-1`.
    pub index: usize,
    /// Caller-side indices of the centerline points the quad spans.
    pub span: (usize, usize),
    /// Left start, left end, right end, right start.
    pub quad: [V; 4],
}

/// Decomposes a ribbon into `N - 1` quads for per-segment hit testing.
///
/// Quad `i` is ribbon vertices `[i, i+1, 2N-2-i, 2N-1-i]`.
pub fn split<V: Copy>(ribbon: &Ribbon<V>) -> Vec<RibbonSegment<V>> {
    let idx = ribbon.centerline_indices();

    idx.windows(2)
        .enumerate()
        .filter_map(|(i, pair)| {
            Some(RibbonSegment {
                index: i,
                span: (pair[0], pair[1]),
                quad: [
                    *ribbon.left(i)?,
                    *ribbon.left(i + 1)?,
                    *ribbon.right(i + 1)?,
                    *ribbon.right(i)?,
                ],
            })
        })
        .collect()
}
