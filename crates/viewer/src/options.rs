use serde::{Deserialize, Serialize};

/// Recognized overlay options. Everything has a default, so a partial JSON
/// object is a valid configuration.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverlayOptions {
    /// Path width in metres.
    pub width: f64,
    /// Degrees by which distant geometry is pulled toward the ground.
    pub ground_tilt_deg: f64,
    /// Emit one quad per path segment instead of a single ring.
    pub split_segments: bool,
    /// Extra yaw offset added on top of the frame's own heading correction.
    pub heading_correction_rad: f64,
    /// Multiplier for the distance-based marker scale.
    pub marker_scale: f64,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            width: 1.0,
            ground_tilt_deg: 0.0,
            split_segments: false,
            heading_correction_rad: 0.0,
            marker_scale: 1.0,
        }
    }
}

impl OverlayOptions {
    /// Ground tilt for projection; zero means no adjustment.
    pub fn ground_tilt(&self) -> Option<f64> {
        if self.ground_tilt_deg == 0.0 {
            None
        } else {
            Some(self.ground_tilt_deg)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::OverlayOptions;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_config_keeps_defaults() {
        let opts: OverlayOptions =
            serde_json::from_str(r#"{"width": 3.5, "split_segments": true}"#).unwrap();
        assert_eq!(
            opts,
            OverlayOptions {
                width: 3.5,
                split_segments: true,
                ..OverlayOptions::default()
            }
        );
        assert_eq!(opts.ground_tilt(), None);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let res: Result<OverlayOptions, _> = serde_json::from_str(r#"{"colour": "red"}"#);
        assert!(res.is_err());
    }
}
