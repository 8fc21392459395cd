use foundation::GeometryError;
use foundation::math::{Enu, GeoPoint, ReferencePosition};
use paths::{Ribbon, RibbonBuilder};
use tracing::debug;

use crate::options::OverlayOptions;
use crate::orientation::{Component, OrientationCorrection};
use crate::reference::ReferenceFrame;
use crate::spherical::{SphereProjection, SphericalMarker, YawPitch};

/// Everything a projection needs to know about the active viewer.
///
/// Owned by whoever drives the panorama; passed by reference into every
/// projection. Not synchronized.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerFrame {
    reference: ReferenceFrame,
    orientation: OrientationCorrection,
    pose_heading_rad: f64,
}

/// A path projected for the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedPath {
    /// One placement per input point, in input order.
    pub centerline: Vec<SphericalMarker>,
    pub ribbon: Ribbon<YawPitch>,
    /// The same ribbon before projection, in metres.
    pub ground: Ribbon<Enu>,
}

impl ViewerFrame {
    pub fn new(position: ReferencePosition) -> Self {
        Self::with_orientation(position, OrientationCorrection::default())
    }

    pub fn with_orientation(
        position: ReferencePosition,
        orientation: OrientationCorrection,
    ) -> Self {
        Self {
            reference: ReferenceFrame::new(position),
            orientation,
            pose_heading_rad: 0.0,
        }
    }

    pub fn reference(&self) -> &ReferenceFrame {
        &self.reference
    }

    pub fn orientation(&self) -> &OrientationCorrection {
        &self.orientation
    }

    pub fn orientation_mut(&mut self) -> &mut OrientationCorrection {
        &mut self.orientation
    }

    pub fn set_position(&mut self, position: ReferencePosition) {
        self.reference.set_position(position);
    }

    /// Capture heading recorded with the panorama, in degrees.
    pub fn set_pose_heading(&mut self, heading_deg: f64) {
        debug!(heading_deg, "pose heading changed");
        self.pose_heading_rad = heading_deg.to_radians();
    }

    pub fn pose_heading(&self) -> f64 {
        self.pose_heading_rad
    }

    /// Applies a pano's recorded pan/tilt/roll, all in degrees.
    pub fn set_corrections(&mut self, pan_deg: f64, tilt_deg: f64, roll_deg: f64) {
        self.orientation.set_correction(pan_deg, Component::Pan);
        self.orientation.set_correction(tilt_deg, Component::Tilt);
        self.orientation.set_correction(roll_deg, Component::Roll);
    }

    pub fn heading_correction(&self, opts: &OverlayOptions) -> f64 {
        self.pose_heading_rad + self.orientation.composed_heading() + opts.heading_correction_rad
    }

    pub fn projection(&self, opts: &OverlayOptions) -> SphereProjection {
        SphereProjection {
            heading_correction_rad: self.heading_correction(opts),
            ground_tilt_deg: opts.ground_tilt(),
        }
    }

    pub fn project_enu(&self, v: Enu, opts: &OverlayOptions) -> SphericalMarker {
        self.projection(opts).project(v)
    }

    pub fn project_point(
        &self,
        point: GeoPoint,
        opts: &OverlayOptions,
    ) -> Result<SphericalMarker, GeometryError> {
        let enu = self.reference.project(point)?;
        Ok(self.project_enu(enu, opts))
    }

    /// Projects a path's points and its `opts.width` ribbon.
    ///
    /// Zero-length segments are dropped from the ribbon; its index mapping
    /// still refers to positions in `points`.
    pub fn project_path(
        &self,
        points: &[GeoPoint],
        opts: &OverlayOptions,
    ) -> Result<ProjectedPath, GeometryError> {
        let enu = points
            .iter()
            .map(|p| self.reference.project(*p))
            .collect::<Result<Vec<_>, _>>()?;

        let ground = RibbonBuilder::new(opts.width).build_skipping_degenerate(&enu)?;
        let projection = self.projection(opts);

        Ok(ProjectedPath {
            centerline: enu.iter().map(|v| projection.project(*v)).collect(),
            ribbon: ground.map(|v| projection.project(*v).yaw_pitch()),
            ground,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::ViewerFrame;
    use crate::options::OverlayOptions;
    use crate::orientation::Component;
    use core::f64::consts::{FRAC_PI_2, PI};
    use foundation::GeometryError;
    use foundation::math::{GeoPoint, ReferencePosition};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    fn origin() -> ReferencePosition {
        ReferencePosition::new(0.0, 0.0, 0.0).unwrap()
    }

    #[test]
    fn point_east_of_viewer() {
        let frame = ViewerFrame::new(origin());
        let m = frame
            .project_point(
                GeoPoint::with_elevation(0.001, 0.0, 0.0),
                &OverlayOptions::default(),
            )
            .unwrap();
        assert_close(m.yaw, FRAC_PI_2, 1e-9);
        assert_close(m.pitch, 0.0, 1e-12);
        assert_close(m.distance, 111.32, 111.32 * 0.005);
    }

    #[test]
    fn own_position_has_zero_distance() {
        let frame = ViewerFrame::new(ReferencePosition::new(7.5, 46.9, 540.0).unwrap());
        let m = frame
            .project_point(
                GeoPoint::with_elevation(7.5, 46.9, 540.0),
                &OverlayOptions::default(),
            )
            .unwrap();
        assert_eq!(m.distance, 0.0);
    }

    #[test]
    fn heading_sources_add_up() {
        let mut frame = ViewerFrame::new(origin());
        frame.set_pose_heading(90.0);
        frame.orientation_mut().set_correction(45.0, Component::Pan);
        let opts = OverlayOptions {
            heading_correction_rad: PI / 4.0,
            ..OverlayOptions::default()
        };
        assert_close(frame.heading_correction(&opts), PI, 1e-12);

        let m = frame
            .project_point(GeoPoint::with_elevation(0.0, 0.001, 0.0), &opts)
            .unwrap();
        assert_close(m.yaw, PI, 1e-9);
    }

    #[test]
    fn corrections_from_pano_metadata() {
        let mut frame = ViewerFrame::new(origin());
        frame.set_corrections(-30.0, 5.0, 1.0);
        assert_close(frame.orientation().get(Component::Pan), 330f64.to_radians(), 1e-12);
        assert_close(frame.orientation().get(Component::Tilt), 5f64.to_radians(), 1e-12);
        assert_close(frame.orientation().get(Component::Roll), 1f64.to_radians(), 1e-12);
    }

    #[test]
    fn path_projection_is_repeatable() {
        let mut frame = ViewerFrame::new(ReferencePosition::new(-1.4, 50.9, 10.0).unwrap());
        frame.set_corrections(12.0, 0.0, 0.0);
        let points = [
            GeoPoint::new(-1.4001, 50.9001),
            GeoPoint::new(-1.4002, 50.9003),
            GeoPoint::new(-1.4000, 50.9005),
        ];
        let opts = OverlayOptions {
            width: 3.0,
            ground_tilt_deg: 1.0,
            ..OverlayOptions::default()
        };
        let a = frame.project_path(&points, &opts).unwrap();
        let b = frame.project_path(&points, &opts).unwrap();
        assert_eq!(a.ribbon.vertices().len(), 6);
        assert_eq!(a.centerline.len(), 3);
        for (x, y) in a.ribbon.vertices().iter().zip(b.ribbon.vertices()) {
            assert_eq!(x.yaw.to_bits(), y.yaw.to_bits());
            assert_eq!(x.pitch.to_bits(), y.pitch.to_bits());
        }
    }

    #[test]
    fn degenerate_paths_surface_as_errors() {
        let frame = ViewerFrame::new(origin());
        let opts = OverlayOptions::default();
        assert!(matches!(
            frame.project_path(&[GeoPoint::new(0.0, 0.0)], &opts),
            Err(GeometryError::DegenerateRibbon { points: 1, .. })
        ));
        assert!(matches!(
            frame.project_path(&[GeoPoint::new(0.0, 0.0), GeoPoint::new(200.0, 0.0)], &opts),
            Err(GeometryError::InvalidCoordinate { .. })
        ));
    }
}
