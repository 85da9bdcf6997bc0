// src/plot_functions/coeval_sliceplot.rs

use log::debug;

use crate::axis_names::{spatial_axis_label, visible_axis_names};
use crate::colormap::Colormap;
use crate::data_input::{Field, SliceSource};
use crate::error::{PlotError, Result};
use crate::plot_framework::{AxesId, Extent, Figure};
use crate::plot_functions::imshow_slice::{imshow_slice_on, SliceOptions};

/// Slice plot of one field of a coeval box or output struct on a new figure.
pub fn coeval_sliceplot<S: SliceSource + ?Sized>(
    source: &S,
    kind: Option<Field>,
    cbar_label: Option<&str>,
    opts: &SliceOptions,
) -> Result<(Figure, AxesId)> {
    let (mut fig, ax) = Figure::new(opts.fig_kw.clone());
    coeval_sliceplot_on(&mut fig, ax, source, kind, cbar_label, opts)?;
    Ok((fig, ax))
}

/// Slice plot of one field of `source` onto an existing panel.
///
/// `kind` defaults to the source's default field. A `cbar_label` of
/// `Some("")` suppresses the colourbar label.
pub fn coeval_sliceplot_on<S: SliceSource + ?Sized>(
    fig: &mut Figure,
    ax: AxesId,
    source: &S,
    kind: Option<Field>,
    cbar_label: Option<&str>,
    opts: &SliceOptions,
) -> Result<()> {
    let kind = match kind.or_else(|| source.default_field()) {
        Some(kind) => kind,
        None => {
            return Err(PlotError::MissingField {
                kind: "any field".to_string(),
                source_name: source.source_name().to_string(),
            })
        }
    };
    let cube = source.require_field(kind)?;
    let slice_axis = opts.slice_axis.unwrap_or(-1);
    let (x_name, y_name) = visible_axis_names(slice_axis)?;

    let mut panel_opts = opts.clone();
    panel_opts.slice_axis = Some(slice_axis);
    if kind != Field::BrightnessTemp && panel_opts.cmap.is_none() {
        panel_opts.cmap = Some(Colormap::Viridis);
    }
    if panel_opts.extent.is_none() {
        panel_opts.extent = Some(Extent::square(0.0, source.box_len()));
    }
    imshow_slice_on(fig, ax, cube, &panel_opts)?;

    let axes = fig.axes_mut(ax)?;
    axes.set_xlabel(spatial_axis_label(x_name));
    axes.set_ylabel(spatial_axis_label(y_name));
    if let Some(colorbar) = axes.colorbar.as_mut() {
        let label = cbar_label.or_else(|| kind.coeval_cbar_label());
        colorbar.label = label.filter(|l| !l.is_empty()).map(str::to_string);
    }

    debug!(
        "Composed {} slice of {} (axis {slice_axis}, index {})",
        kind,
        source.source_name(),
        opts.slice_index
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{BRIGHTNESS_TEMP_CBAR_LABEL, IONIZED_FRACTION_CBAR_LABEL};
    use crate::data_input::{Coeval, OutputStruct, UserParams};
    use ndarray::Array3;

    fn params() -> UserParams {
        UserParams {
            BOX_LEN: 100.0,
            HII_DIM: 8,
        }
    }

    fn coeval() -> Coeval {
        Coeval::new(7.0, params())
            .with_field(Field::BrightnessTemp, Array3::from_elem((8, 8, 8), -20.0))
            .with_field(Field::XhBox, Array3::from_elem((8, 8, 8), 0.4))
            .with_field(Field::Density, Array3::from_shape_fn((8, 8, 8), |(i, _, _)| i as f32))
    }

    #[test]
    fn test_brightness_temp_defaults() {
        let (fig, ax) = coeval_sliceplot(&coeval(), None, None, &SliceOptions::default()).unwrap();
        let axes = fig.axes(ax).unwrap();
        let image = axes.image.as_ref().unwrap();
        assert_eq!(image.cmap, Colormap::Eor);
        assert_eq!(image.extent, Extent::square(0.0, 100.0));
        assert_eq!(axes.x_label.as_deref(), Some("x-axis [Mpc]"));
        assert_eq!(axes.y_label.as_deref(), Some("y-axis [Mpc]"));
        assert_eq!(axes.colorbar_label(), Some(BRIGHTNESS_TEMP_CBAR_LABEL));
    }

    #[test]
    fn test_other_fields_default_to_viridis() {
        let opts = SliceOptions::default().with_axis(0, 3);
        let (fig, ax) = coeval_sliceplot(&coeval(), Some(Field::Density), None, &opts).unwrap();
        let axes = fig.axes(ax).unwrap();
        assert_eq!(axes.image.as_ref().unwrap().cmap, Colormap::Viridis);
        assert_eq!(axes.x_label.as_deref(), Some("y-axis [Mpc]"));
        assert_eq!(axes.y_label.as_deref(), Some("z-axis [Mpc]"));
        assert_eq!(axes.colorbar_label(), None);
    }

    #[test]
    fn test_ionized_fraction_label_and_explicit_cmap() {
        let opts = SliceOptions::default().with_cmap(Colormap::Magma).with_axis(1, 0);
        let (fig, ax) = coeval_sliceplot(&coeval(), Some(Field::XhBox), None, &opts).unwrap();
        let axes = fig.axes(ax).unwrap();
        assert_eq!(axes.image.as_ref().unwrap().cmap, Colormap::Magma);
        assert_eq!(axes.y_label.as_deref(), Some("z-axis [Mpc]"));
        assert_eq!(axes.colorbar_label(), Some(IONIZED_FRACTION_CBAR_LABEL));
    }

    #[test]
    fn test_explicit_cbar_label() {
        let src = coeval();
        let opts = SliceOptions::default();
        let (fig, ax) = coeval_sliceplot(&src, None, Some("T_b"), &opts).unwrap();
        assert_eq!(fig.axes(ax).unwrap().colorbar_label(), Some("T_b"));
        let (fig, ax) = coeval_sliceplot(&src, None, Some(""), &opts).unwrap();
        assert_eq!(fig.axes(ax).unwrap().colorbar_label(), None);
    }

    #[test]
    fn test_missing_field() {
        let err = coeval_sliceplot(&coeval(), Some(Field::TsBox), None, &SliceOptions::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "The given Coeval does not have the quantity Ts_box");
    }

    #[test]
    fn test_invalid_axis() {
        let opts = SliceOptions::default().with_axis(3, 0);
        assert!(matches!(
            coeval_sliceplot(&coeval(), None, None, &opts),
            Err(PlotError::InvalidSliceAxis(3))
        ));
    }

    #[test]
    fn test_missing_field_reported_before_bad_axis() {
        let opts = SliceOptions::default().with_axis(5, 0);
        assert!(matches!(
            coeval_sliceplot(&coeval(), Some(Field::TsBox), None, &opts),
            Err(PlotError::MissingField { .. })
        ));
    }

    #[test]
    fn test_output_struct_uses_first_field() {
        let ionized = OutputStruct::new("IonizedBox", 8.0, params())
            .with_field(Field::XhBox, Array3::from_elem((8, 8, 8), 0.9))
            .with_field(Field::Gamma12Box, Array3::zeros((8, 8, 8)));
        let (fig, ax) = coeval_sliceplot(&ionized, None, None, &SliceOptions::default()).unwrap();
        let axes = fig.axes(ax).unwrap();
        assert_eq!(axes.image.as_ref().unwrap().cmap, Colormap::Viridis);
        assert_eq!(axes.colorbar_label(), Some(IONIZED_FRACTION_CBAR_LABEL));

        let err = coeval_sliceplot(&ionized, Some(Field::Density), None, &SliceOptions::default())
            .unwrap_err();
        assert!(err.to_string().contains("IonizedBox"));
    }
}
