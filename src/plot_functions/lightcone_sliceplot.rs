// src/plot_functions/lightcone_sliceplot.rs

use log::debug;
use serde::{Deserialize, Serialize};

use crate::axis_names::{resolve_slice_axis, spatial_axis_label, REDSHIFT_AXIS_LABEL};
use crate::colormap::Colormap;
use crate::data_analysis::redshift_ticks::redshift_tick_positions;
use crate::data_analysis::slicing::{difference, symmetric_range};
use crate::data_input::{Field, LightCone};
use crate::error::Result;
use crate::plot_framework::{AxesId, Extent, Figure};
use crate::plot_functions::imshow_slice::{imshow_slice_on, SliceOptions};

/// Options for a lightcone slice plot.
///
/// `xlabel`/`ylabel`/`cbar_label` replace the defaults; `Some("")` hides the label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightconeSliceOptions {
    pub kind: Field,
    /// Put the line of sight on the vertical axis.
    pub vertical: bool,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    pub cbar_label: Option<String>,
    /// Slicing and colour options; the slice axis defaults to 0 here.
    pub slice: SliceOptions,
}

impl Default for LightconeSliceOptions {
    fn default() -> Self {
        Self {
            kind: Field::BrightnessTemp,
            vertical: false,
            xlabel: None,
            ylabel: None,
            cbar_label: None,
            slice: SliceOptions::default(),
        }
    }
}

impl LightconeSliceOptions {
    pub fn for_kind(kind: Field) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }
}

/// Default (xlabel, ylabel, extent) for a slice along `axis` of `lightcone`.
fn layout_for_axis(lightcone: &LightCone, axis: usize, vertical: bool) -> (String, String, Extent) {
    let box_len = lightcone.user_params.BOX_LEN;
    let los_len = lightcone.lightcone_coords().last().copied().unwrap_or(0.0);
    match axis {
        0 => {
            let (xlabel, ylabel) = (REDSHIFT_AXIS_LABEL.to_string(), spatial_axis_label("y"));
            if vertical {
                (ylabel, xlabel, Extent::new(0.0, box_len, 0.0, los_len))
            } else {
                (xlabel, ylabel, Extent::new(0.0, los_len, 0.0, box_len))
            }
        }
        1 => (
            spatial_axis_label("x"),
            REDSHIFT_AXIS_LABEL.to_string(),
            Extent::square(0.0, box_len),
        ),
        _ => (
            spatial_axis_label("x"),
            spatial_axis_label("y"),
            Extent::square(0.0, box_len),
        ),
    }
}

/// Explicit label if given (empty hides it), otherwise the default.
fn pick_label(explicit: Option<&str>, default: String) -> Option<String> {
    match explicit {
        Some("") => None,
        Some(label) => Some(label.to_string()),
        None => Some(default),
    }
}

/// Slice plot of a lightcone quantity on a new figure.
///
/// With `lightcone2` the plot shows `lightcone - lightcone2` for the same quantity.
pub fn lightcone_sliceplot(
    lightcone: &LightCone,
    lightcone2: Option<&LightCone>,
    opts: &LightconeSliceOptions,
) -> Result<(Figure, AxesId)> {
    let (mut fig, ax) = Figure::new(opts.slice.fig_kw.clone());
    lightcone_sliceplot_on(&mut fig, ax, lightcone, lightcone2, opts)?;
    Ok((fig, ax))
}

/// Slice plot of a lightcone quantity onto an existing panel.
pub fn lightcone_sliceplot_on(
    fig: &mut Figure,
    ax: AxesId,
    lightcone: &LightCone,
    lightcone2: Option<&LightCone>,
    opts: &LightconeSliceOptions,
) -> Result<()> {
    let slice_axis = opts.slice.slice_axis.unwrap_or(0);
    let axis = resolve_slice_axis(slice_axis)?;
    let (xlabel, ylabel, extent) = layout_for_axis(lightcone, axis, opts.vertical);

    let mut panel_opts = opts.slice.clone();
    panel_opts.slice_axis = Some(slice_axis);
    panel_opts.rotate = !opts.vertical;
    panel_opts.cbar_horizontal = !opts.vertical;
    panel_opts.extent = Some(extent);

    let cube = lightcone.require_quantity(opts.kind)?;
    match lightcone2 {
        None => {
            if panel_opts.cmap.is_none() {
                panel_opts.cmap = Some(if opts.kind == Field::BrightnessTemp {
                    Colormap::Eor
                } else {
                    Colormap::Viridis
                });
            }
            imshow_slice_on(fig, ax, cube, &panel_opts)?;
        }
        Some(other) => {
            let diff = difference(cube, other.require_quantity(opts.kind)?)?;
            let (lo, hi) = symmetric_range(diff.view());
            let cmap = panel_opts.cmap.unwrap_or(Colormap::Bwr);
            panel_opts.cmap = Some(cmap);
            if cmap.fixed_range().is_none() {
                panel_opts.vmin = panel_opts.vmin.or(Some(lo));
                panel_opts.vmax = panel_opts.vmax.or(Some(hi));
            }
            imshow_slice_on(fig, ax, diff.view(), &panel_opts)?;
        }
    }

    let ticks = redshift_tick_positions(lightcone);
    let axes = fig.axes_mut(ax)?;
    axes.x_label = pick_label(opts.xlabel.as_deref(), xlabel);
    axes.y_label = pick_label(opts.ylabel.as_deref(), ylabel);
    if opts.vertical {
        axes.set_yticks(ticks);
    } else {
        axes.set_xticks(ticks);
    }
    if let Some(colorbar) = axes.colorbar.as_mut() {
        let label = opts.cbar_label.as_deref().or_else(|| opts.kind.lightcone_cbar_label());
        colorbar.label = label.filter(|l| !l.is_empty()).map(str::to_string);
    }

    debug!(
        "Composed lightcone {} slice (axis {slice_axis}, index {}, vertical: {}, difference: {})",
        opts.kind,
        opts.slice.slice_index,
        opts.vertical,
        lightcone2.is_some()
    );
    Ok(())
}
