//! Snapping and canvas helpers used while beds are dragged and rotated.

use crate::transforms::normalize_angle;

/// Default angle increment rotation snaps to, in degrees.
pub const DEFAULT_SNAP_STEP_DEG: f64 = 15.0;
/// Default distance in degrees within which rotation snaps.
pub const DEFAULT_SNAP_THRESHOLD_DEG: f64 = 5.0;
/// Default canvas scale.
pub const DEFAULT_PIXELS_PER_METER: f64 = 50.0;

/// Snaps `angle` to the nearest multiple of `step` within `threshold` degrees.
///
/// The angle is normalised to `[0, 360)` first and a snap to 360 is reported
/// as 0. Angles too far from any multiple come back normalised but unsnapped.
pub fn snap_angle(angle: f64, step: f64, threshold: f64) -> f64 {
    let normalized = normalize_angle(angle);
    if step <= 0.0 {
        return normalized;
    }
    let nearest = (normalized / step).round() * step;
    if (normalized - nearest).abs() <= threshold {
        normalize_angle(nearest)
    } else {
        normalized
    }
}

/// Restricts `value` to `[min, max]`.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    min.max(max.min(value))
}

/// Clamps a rectangle's origin so the rectangle stays inside `bounds`.
///
/// Rectangles larger than the bounds are pinned to the origin.
pub fn constrain_to_bounds(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    bounds_width: f64,
    bounds_height: f64,
) -> (f64, f64) {
    (
        clamp(x, 0.0, (bounds_width - width).max(0.0)),
        clamp(y, 0.0, (bounds_height - height).max(0.0)),
    )
}

/// Converts a length in metres to canvas pixels.
pub fn meters_to_pixels(meters: f64, pixels_per_meter: f64) -> f64 {
    meters * pixels_per_meter
}

/// Converts canvas pixels back to metres.
pub fn pixels_to_meters(pixels: f64, pixels_per_meter: f64) -> f64 {
    pixels / pixels_per_meter
}

/// Formats a length for labels, e.g. `1.20`.
pub fn format_dimension(value: f64) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(angle: f64) -> f64 {
        snap_angle(angle, DEFAULT_SNAP_STEP_DEG, DEFAULT_SNAP_THRESHOLD_DEG)
    }

    #[test]
    fn snaps_near_multiples() {
        assert_eq!(snap(43.0), 45.0);
        assert_eq!(snap(47.5), 45.0);
        assert_eq!(snap(52.0), 52.0);
        assert_eq!(snap(358.0), 0.0);
        assert_eq!(snap(-3.0), 0.0);
        assert_eq!(snap(-88.0), 270.0);
    }

    #[test]
    fn zero_step_only_normalizes() {
        assert_eq!(snap_angle(-30.0, 0.0, 5.0), 330.0);
    }

    #[test]
    fn constrains_inside_bounds() {
        assert_eq!(constrain_to_bounds(-1.0, 3.0, 2.0, 2.0, 10.0, 4.0), (0.0, 2.0));
        assert_eq!(constrain_to_bounds(12.0, 1.0, 20.0, 1.0, 10.0, 4.0), (0.0, 1.0));
    }

    #[test]
    fn scale_conversion() {
        assert_eq!(meters_to_pixels(1.5, DEFAULT_PIXELS_PER_METER), 75.0);
        assert_eq!(pixels_to_meters(75.0, DEFAULT_PIXELS_PER_METER), 1.5);
        assert_eq!(format_dimension(1.2), "1.20");
        assert_eq!(clamp(5.0, 0.0, 1.0), 1.0);
    }
}
