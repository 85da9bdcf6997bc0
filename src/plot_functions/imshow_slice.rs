// src/plot_functions/imshow_slice.rs

use log::warn;
use ndarray::ArrayView3;
use serde::{Deserialize, Serialize};

use crate::colormap::Colormap;
use crate::data_analysis::slicing::{finite_range, take_slice};
use crate::error::Result;
use crate::plot_framework::{
    AxesId, Colorbar, Extent, Figure, FigureOptions, ImageLayer, Orientation,
};

/// Options shared by every slice plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliceOptions {
    /// Axis to slice across (0, 1, 2, or -1 for the last). `None` picks the
    /// plot's own default: the last axis for cubes, the first for lightcones.
    pub slice_axis: Option<i32>,
    pub slice_index: usize,
    /// Draw a colourbar.
    pub cbar: bool,
    pub cbar_horizontal: bool,
    /// Keep the array orientation instead of transposing the slice.
    pub rotate: bool,
    /// `None` lets the plot choose (EoR for raw slices).
    pub cmap: Option<Colormap>,
    pub vmin: Option<f64>,
    pub vmax: Option<f64>,
    pub extent: Option<Extent>,
    /// Used only when a new figure is created.
    pub fig_kw: FigureOptions,
}

impl Default for SliceOptions {
    fn default() -> Self {
        Self {
            slice_axis: None,
            slice_index: 0,
            cbar: true,
            cbar_horizontal: false,
            rotate: false,
            cmap: None,
            vmin: None,
            vmax: None,
            extent: None,
            fig_kw: FigureOptions::default(),
        }
    }
}

impl SliceOptions {
    pub fn with_axis(mut self, slice_axis: i32, slice_index: usize) -> Self {
        self.slice_axis = Some(slice_axis);
        self.slice_index = slice_index;
        self
    }

    pub fn with_cmap(mut self, cmap: Colormap) -> Self {
        self.cmap = Some(cmap);
        self
    }

    pub fn with_range(mut self, vmin: f64, vmax: f64) -> Self {
        self.vmin = Some(vmin);
        self.vmax = Some(vmax);
        self
    }
}

/// Plot one slice of `cube` on a new single-panel figure.
pub fn imshow_slice(cube: ArrayView3<'_, f32>, opts: &SliceOptions) -> Result<(Figure, AxesId)> {
    let (mut fig, ax) = Figure::new(opts.fig_kw.clone());
    imshow_slice_on(&mut fig, ax, cube, opts)?;
    Ok((fig, ax))
}

/// Plot one slice of `cube` onto an existing panel.
///
/// The colour range is, in order of precedence: explicit `vmin`/`vmax`, the
/// colour map's fixed range (EoR: -150..30 mK), the finite data range.
pub fn imshow_slice_on(
    fig: &mut Figure,
    ax: AxesId,
    cube: ArrayView3<'_, f32>,
    opts: &SliceOptions,
) -> Result<()> {
    let slice_axis = opts.slice_axis.unwrap_or(-1);
    let slc = take_slice(cube, slice_axis, opts.slice_index, opts.rotate)?;
    let cmap = opts.cmap.unwrap_or(Colormap::Eor);

    let fixed = cmap.fixed_range();
    let needs_data_range = fixed.is_none() && (opts.vmin.is_none() || opts.vmax.is_none());
    let data_range = if needs_data_range {
        let range = finite_range(slc.view());
        if range.is_none() {
            warn!("Slice {} along axis {slice_axis} has no finite values", opts.slice_index);
        }
        range
    } else {
        None
    };
    let vmin = opts
        .vmin
        .or(fixed.map(|r| r.0))
        .or(data_range.map(|r| r.0))
        .unwrap_or(0.0);
    let vmax = opts
        .vmax
        .or(fixed.map(|r| r.1))
        .or(data_range.map(|r| r.1))
        .unwrap_or(1.0);

    let (rows, cols) = slc.dim();
    let extent = opts.extent.unwrap_or_else(|| Extent::pixels(rows, cols));

    let axes = fig.axes_mut(ax)?;
    axes.image = Some(ImageLayer {
        data: slc,
        extent,
        cmap,
        vmin,
        vmax,
    });
    if opts.cbar {
        let orientation = if opts.cbar_horizontal {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        axes.colorbar = Some(Colorbar::new(orientation));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlotError;
    use ndarray::Array3;

    fn cube() -> Array3<f32> {
        Array3::from_shape_fn((10, 10, 5), |(i, j, k)| (i + 2 * j + 3 * k) as f32)
    }

    #[test]
    fn test_eor_range_is_fixed_by_default() {
        let (fig, ax) = imshow_slice(cube().view(), &SliceOptions::default()).unwrap();
        let image = fig.axes(ax).unwrap().image.as_ref().unwrap();
        assert_eq!(image.cmap, Colormap::Eor);
        assert_eq!((image.vmin, image.vmax), (-150.0, 30.0));
    }

    #[test]
    fn test_explicit_range_overrides_eor() {
        let opts = SliceOptions::default().with_range(-10.0, 10.0);
        let (fig, ax) = imshow_slice(cube().view(), &opts).unwrap();
        let image = fig.axes(ax).unwrap().image.as_ref().unwrap();
        assert_eq!((image.vmin, image.vmax), (-10.0, 10.0));

        let opts = SliceOptions {
            vmax: Some(0.0),
            ..Default::default()
        };
        let (fig, ax) = imshow_slice(cube().view(), &opts).unwrap();
        let image = fig.axes(ax).unwrap().image.as_ref().unwrap();
        assert_eq!((image.vmin, image.vmax), (-150.0, 0.0));
    }

    #[test]
    fn test_all_nan_slice_keeps_eor_range() {
        let cube = Array3::<f32>::from_elem((4, 4, 2), f32::NAN);
        let (fig, ax) = imshow_slice(cube.view(), &SliceOptions::default()).unwrap();
        let image = fig.axes(ax).unwrap().image.as_ref().unwrap();
        assert_eq!((image.vmin, image.vmax), (-150.0, 30.0));
    }

    #[test]
    fn test_other_maps_use_data_range() {
        let opts = SliceOptions::default().with_axis(2, 1).with_cmap(Colormap::Viridis);
        let (fig, ax) = imshow_slice(cube().view(), &opts).unwrap();
        let image = fig.axes(ax).unwrap().image.as_ref().unwrap();
        // k = 1: values i + 2j + 3 span 3..=30
        assert_eq!((image.vmin, image.vmax), (3.0, 30.0));
    }

    #[test]
    fn test_default_slice_is_transposed_last_axis() {
        let c = cube();
        let (fig, ax) = imshow_slice(c.view(), &SliceOptions::default()).unwrap();
        let image = fig.axes(ax).unwrap().image.as_ref().unwrap();
        assert_eq!(image.data.dim(), (10, 10));
        assert_eq!(image.data[[1, 4]], c[[4, 1, 0]]);
        assert_eq!(image.extent, Extent::pixels(10, 10));
    }

    #[test]
    fn test_colorbar_orientation() {
        let (fig, ax) = imshow_slice(cube().view(), &SliceOptions::default()).unwrap();
        let cb = fig.axes(ax).unwrap().colorbar.as_ref().unwrap();
        assert_eq!(cb.orientation, Orientation::Vertical);
        assert_eq!(cb.aspect, 40);

        let opts = SliceOptions {
            cbar_horizontal: true,
            ..Default::default()
        };
        let (fig, ax) = imshow_slice(cube().view(), &opts).unwrap();
        let cb = fig.axes(ax).unwrap().colorbar.as_ref().unwrap();
        assert_eq!(cb.orientation, Orientation::Horizontal);

        let opts = SliceOptions {
            cbar: false,
            ..Default::default()
        };
        let (fig, ax) = imshow_slice(cube().view(), &opts).unwrap();
        assert!(fig.axes(ax).unwrap().colorbar.is_none());
    }

    #[test]
    fn test_index_past_axis_end() {
        let opts = SliceOptions::default().with_axis(-1, 5);
        assert!(matches!(
            imshow_slice(cube().view(), &opts),
            Err(PlotError::SliceIndexOutOfRange { index: 5, len: 5, axis: 2 })
        ));
    }

    #[test]
    fn test_existing_panel_in_grid() {
        use crate::plot_framework::GridLayout;
        let layout = GridLayout {
            rows: 1,
            cols: 2,
            ..GridLayout::single()
        };
        let (mut fig, ids) = Figure::subplots(layout, FigureOptions::default());
        imshow_slice_on(&mut fig, ids[1], cube().view(), &SliceOptions::default()).unwrap();
        assert!(fig.axes(ids[0]).unwrap().image.is_none());
        assert!(fig.axes(ids[1]).unwrap().image.is_some());
        assert!(matches!(
            imshow_slice_on(&mut fig, AxesId(9), cube().view(), &SliceOptions::default()),
            Err(PlotError::InvalidAxesHandle(9))
        ));
    }
}
