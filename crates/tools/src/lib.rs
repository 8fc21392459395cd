//! Navigation glue between pano sequences and the overlay engine.

use std::fmt;

use formats::{PanoRecord, Sequence};
use foundation::GeometryError;
use serde::Serialize;
use tracing::{info, warn};
use viewer::{
    MarkerOverlay, Overlay, OverlayOptions, PathOverlay, PathShape, PickOptions, SphereCorrection,
    SphereProjection, ViewerFrame, YawPitch, nearest_marker, pick_segment,
};

#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    UnknownPano { panoid: u64 },
    Geometry(GeometryError),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::UnknownPano { panoid } => write!(f, "pano {panoid} not in sequence"),
            SceneError::Geometry(err) => write!(f, "geometry error: {err}"),
        }
    }
}

impl std::error::Error for SceneError {}

impl From<GeometryError> for SceneError {
    fn from(err: GeometryError) -> Self {
        SceneError::Geometry(err)
    }
}

/// Everything the renderer needs to draw one pano's overlays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanoScene {
    pub seqid: u64,
    pub panoid: u64,
    /// Index of the current pano within the sequence.
    pub current_index: usize,
    pub sphere_correction: SphereCorrection,
    /// Heading and ground tilt the overlays were projected with.
    pub projection: SphereProjection,
    pub markers: Vec<MarkerOverlay>,
    pub path: Option<PathOverlay>,
}

/// Moves the viewer onto `pano`: eye position, capture heading, corrections.
pub fn enter_pano(frame: &mut ViewerFrame, pano: &PanoRecord) -> Result<(), GeometryError> {
    frame.set_position(pano.camera_position()?);
    frame.set_pose_heading(pano.pose_heading_deg.unwrap_or(0.0));
    frame.set_corrections(pano.pan, pano.tilt, pano.roll);
    Ok(())
}

/// Builds markers for every pano in `seq` and the path joining them, as seen
/// from `panoid`.
pub fn build_scene(
    seq: &Sequence,
    panoid: u64,
    opts: &OverlayOptions,
) -> Result<PanoScene, SceneError> {
    let current_index = seq
        .index_of(panoid)
        .ok_or(SceneError::UnknownPano { panoid })?;
    if !opts.width.is_finite() || opts.width <= 0.0 {
        return Err(GeometryError::DegenerateRibbon {
            points: seq.panos.len(),
            width: opts.width,
        }
        .into());
    }
    let pano = &seq.panos[current_index];

    let mut frame = ViewerFrame::new(pano.camera_position()?);
    enter_pano(&mut frame, pano)?;

    let mut overlay = Overlay::new();
    let markers = seq
        .panos
        .iter()
        .map(|p| {
            overlay.add_marker(
                &frame,
                p.geo_point(),
                Some(format!("marker-{panoid}-{}", p.panoid)),
                opts,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    let path = match overlay.add_path(&frame, &seq.points(), Some(seq.seqid.to_string()), opts) {
        Ok(path) => Some(path),
        Err(GeometryError::DegenerateRibbon { points, .. }) if points < 2 => {
            warn!(seqid = seq.seqid, points, "sequence too short for a path");
            None
        }
        Err(err) => return Err(err.into()),
    };

    info!(
        seqid = seq.seqid,
        panoid,
        markers = markers.len(),
        "scene built"
    );

    Ok(PanoScene {
        seqid: seq.seqid,
        panoid,
        current_index,
        sphere_correction: frame.orientation().sphere_correction(),
        projection: frame.projection(opts),
        markers,
        path,
    })
}

/// Which end of a clicked segment to travel to.
///
/// Segments behind the current pano lead back to their start; segments at
/// or ahead of it lead on to their end.
pub fn resolve_segment_click(span: (usize, usize), current_index: usize) -> usize {
    if span.0 < current_index {
        span.0
    } else {
        span.1
    }
}

/// Outcome of a click on the panorama.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PickResult {
    pub marker: Option<String>,
    pub segment: Option<String>,
    /// Pano the click navigates to, if any.
    pub target_pano: Option<u64>,
}

/// Resolves a click at `at` against the scene: a path segment under the
/// cursor wins, otherwise the nearest marker of another pano.
pub fn pick(scene: &PanoScene, seq: &Sequence, at: YawPitch) -> PickResult {
    let segment = match scene.path.as_ref().map(|p| &p.shape) {
        Some(PathShape::Segments { segments }) => pick_segment(segments, at, &scene.projection),
        _ => None,
    };
    if let Some(s) = segment {
        let target = resolve_segment_click(s.span, scene.current_index);
        return PickResult {
            marker: None,
            segment: Some(s.id.clone()),
            target_pano: seq.panos.get(target).map(|p| p.panoid),
        };
    }

    let others: Vec<usize> = (0..scene.markers.len())
        .filter(|&i| i != scene.current_index)
        .collect();
    let placements: Vec<_> = others.iter().map(|&i| scene.markers[i].marker).collect();
    match nearest_marker(&placements, at, PickOptions::default()).map(|k| others[k]) {
        Some(i) => PickResult {
            marker: Some(scene.markers[i].id.clone()),
            segment: None,
            target_pano: seq.panos.get(i).map(|p| p.panoid),
        },
        None => PickResult {
            marker: None,
            segment: None,
            target_pano: None,
        },
    }
}
