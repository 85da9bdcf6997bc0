/// Centralized spatial axis naming utilities
///
/// Maps a slice axis onto the two spatial axes that remain visible in the
/// resulting 2D cross-section.
use crate::error::{PlotError, Result};

/// Spatial axis names in array order.
pub const AXIS_NAMES: [&str; 3] = ["x", "y", "z"];
pub const AXIS_COUNT: usize = AXIS_NAMES.len();

/// Label used for the line-of-sight axis of a lightcone.
pub const REDSHIFT_AXIS_LABEL: &str = "Redshift Axis [Mpc]";

/// Resolve a possibly negative slice axis (-1 meaning "last") into an array axis.
pub fn resolve_slice_axis(slice_axis: i32) -> Result<usize> {
    match slice_axis {
        -1 => Ok(AXIS_COUNT - 1),
        0..=2 => Ok(slice_axis as usize),
        _ => Err(PlotError::InvalidSliceAxis(slice_axis)),
    }
}

/// The (horizontal, vertical) axis names shown when slicing along `slice_axis`.
pub fn visible_axis_names(slice_axis: i32) -> Result<(&'static str, &'static str)> {
    match resolve_slice_axis(slice_axis)? {
        2 => Ok(("x", "y")),
        1 => Ok(("x", "z")),
        _ => Ok(("y", "z")),
    }
}

/// "x-axis [Mpc]" style label for a spatial axis name.
pub fn spatial_axis_label(name: &str) -> String {
    format!("{name}-axis [Mpc]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_slice_axis() {
        assert_eq!(resolve_slice_axis(-1).unwrap(), 2);
        assert_eq!(resolve_slice_axis(0).unwrap(), 0);
        assert_eq!(resolve_slice_axis(2).unwrap(), 2);
    }

    #[test]
    fn test_resolve_slice_axis_rejects_out_of_range() {
        for bad in [-2, 3, 7, i32::MIN] {
            assert!(matches!(
                resolve_slice_axis(bad),
                Err(PlotError::InvalidSliceAxis(a)) if a == bad
            ));
        }
    }

    #[test]
    fn test_visible_axis_names() {
        assert_eq!(visible_axis_names(-1).unwrap(), ("x", "y"));
        assert_eq!(visible_axis_names(2).unwrap(), ("x", "y"));
        assert_eq!(visible_axis_names(1).unwrap(), ("x", "z"));
        assert_eq!(visible_axis_names(0).unwrap(), ("y", "z"));
    }

    #[test]
    fn test_spatial_axis_label() {
        assert_eq!(spatial_axis_label("z"), "z-axis [Mpc]");
    }
}
