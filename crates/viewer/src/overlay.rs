use foundation::GeometryError;
use foundation::math::{Enu, GeoPoint};
use paths::split;
use serde::{Deserialize, Serialize};

use crate::frame::ViewerFrame;
use crate::options::OverlayOptions;
use crate::spherical::{SphericalMarker, YawPitch};

/// Marker scale used when the marker sits (almost) on the viewer.
pub const NEAR_MARKER_SCALE: f64 = 10.0;

const NEAR_MARKER_DISTANCE_M: f64 = 0.001;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerOverlay {
    pub id: String,
    pub marker: SphericalMarker,
    /// Renderer scale factor; shrinks with distance.
    pub scale: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentOverlay {
    /// `<path id>-<segment index>`.
    pub id: String,
    /// Indices, in the caller's point list, of the points this quad joins.
    pub span: (usize, usize),
    pub quad: [YawPitch; 4],
    /// The quad on the ground, in the frame's ENU metres; used for hit testing.
    #[serde(skip)]
    pub ground: [Enu; 4],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PathShape {
    Ring { ring: Vec<YawPitch> },
    Segments { segments: Vec<SegmentOverlay> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathOverlay {
    pub id: String,
    pub centerline: Vec<SphericalMarker>,
    pub shape: PathShape,
}

/// Hands out overlay ids and assembles renderer-ready markers and paths.
#[derive(Debug, Default)]
pub struct Overlay {
    markers: u64,
    paths: u64,
}

pub fn marker_scale(distance: f64, multiplier: f64) -> f64 {
    if distance < NEAR_MARKER_DISTANCE_M {
        NEAR_MARKER_SCALE
    } else {
        multiplier * NEAR_MARKER_SCALE / distance
    }
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_marker(
        &mut self,
        frame: &ViewerFrame,
        point: GeoPoint,
        id: Option<String>,
        opts: &OverlayOptions,
    ) -> Result<MarkerOverlay, GeometryError> {
        let marker = frame.project_point(point, opts)?;
        let id = id.unwrap_or_else(|| {
            self.markers += 1;
            format!("marker-{}", self.markers)
        });
        Ok(MarkerOverlay {
            id,
            marker,
            scale: marker_scale(marker.distance, opts.marker_scale),
        })
    }

    pub fn add_path(
        &mut self,
        frame: &ViewerFrame,
        points: &[GeoPoint],
        id: Option<String>,
        opts: &OverlayOptions,
    ) -> Result<PathOverlay, GeometryError> {
        let projected = frame.project_path(points, opts)?;
        let id = id.unwrap_or_else(|| {
            self.paths += 1;
            format!("path-{}", self.paths)
        });

        let shape = if opts.split_segments {
            PathShape::Segments {
                segments: split(&projected.ribbon)
                    .into_iter()
                    .zip(split(&projected.ground))
                    .map(|(s, g)| SegmentOverlay {
                        id: format!("{id}-{}", s.index),
                        span: s.span,
                        quad: s.quad,
                        ground: g.quad,
                    })
                    .collect(),
            }
        } else {
            PathShape::Ring {
                ring: projected.ribbon.into_vertices(),
            }
        };

        Ok(PathOverlay {
            id,
            centerline: projected.centerline,
            shape,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{NEAR_MARKER_SCALE, Overlay, PathShape, marker_scale};
    use crate::frame::ViewerFrame;
    use crate::options::OverlayOptions;
    use foundation::math::{GeoPoint, ReferencePosition};
    use pretty_assertions::assert_eq;

    fn frame() -> ViewerFrame {
        ViewerFrame::new(ReferencePosition::new(0.0, 0.0, 0.0).unwrap())
    }

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn scale_shrinks_with_distance() {
        assert_eq!(marker_scale(0.0, 3.0), NEAR_MARKER_SCALE);
        assert_eq!(marker_scale(10.0, 1.0), 1.0);
        assert_eq!(marker_scale(20.0, 2.0), 1.0);
    }

    #[test]
    fn marker_ids_count_up_unless_given() {
        let frame = frame();
        let opts = OverlayOptions::default();
        let mut overlay = Overlay::new();
        let p = GeoPoint::with_elevation(0.0001, 0.0, 0.0);

        let a = overlay.add_marker(&frame, p, None, &opts).unwrap();
        let b = overlay.add_marker(&frame, p, Some("pano-7".into()), &opts).unwrap();
        let c = overlay.add_marker(&frame, p, None, &opts).unwrap();
        assert_eq!(
            vec![a.id, b.id, c.id],
            vec!["marker-1", "pano-7", "marker-2"]
        );
        assert_close(a.scale, 10.0 / 11.132, 1e-9);
    }

    #[test]
    fn unsplit_path_is_one_ring() {
        let frame = frame();
        let mut overlay = Overlay::new();
        let points = [
            GeoPoint::new(0.0001, 0.0001),
            GeoPoint::new(0.0002, 0.0001),
            GeoPoint::new(0.0002, 0.0002),
        ];
        let path = overlay
            .add_path(&frame, &points, None, &OverlayOptions::default())
            .unwrap();
        assert_eq!(path.id, "path-1");
        assert_eq!(path.centerline.len(), 3);
        match path.shape {
            PathShape::Ring { ring } => assert_eq!(ring.len(), 6),
            other => panic!("expected ring, got {other:?}"),
        }
    }

    #[test]
    fn split_path_names_segments() {
        let frame = frame();
        let mut overlay = Overlay::new();
        let points = [
            GeoPoint::new(0.0001, 0.0001),
            GeoPoint::new(0.0001, 0.0001),
            GeoPoint::new(0.0002, 0.0001),
            GeoPoint::new(0.0002, 0.0002),
        ];
        let opts = OverlayOptions {
            split_segments: true,
            ..OverlayOptions::default()
        };
        let path = overlay
            .add_path(&frame, &points, Some("4".into()), &opts)
            .unwrap();
        let PathShape::Segments { segments } = path.shape else {
            panic!("expected segments");
        };
        let ids: Vec<&str> = segments.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["4-0", "4-1"]);
        assert_eq!(segments[0].span, (0, 2));
        assert_eq!(segments[1].span, (2, 3));
    }

    #[test]
    fn serializes_for_the_renderer() {
        let frame = frame();
        let mut overlay = Overlay::new();
        let marker = overlay
            .add_marker(
                &frame,
                GeoPoint::with_elevation(0.0, 0.0001, 0.0),
                None,
                &OverlayOptions::default(),
            )
            .unwrap();
        let json = serde_json::to_value(&marker).unwrap();
        assert_eq!(json["id"], "marker-1");
        assert!(json["marker"]["yaw"].is_number());
    }
}
