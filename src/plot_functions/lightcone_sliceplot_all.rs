// src/plot_functions/lightcone_sliceplot_all.rs

use log::debug;

use crate::constants::{
    ANNOTATION_BACKGROUND_COLOR, ANNOTATION_TEXT_COLOR, FONT_SIZE_ANNOTATION,
    LIGHTCONE_ALL_INCHES_PER_CELL, LIGHTCONE_ALL_PANEL_SPACING, MIN_PANEL_EDGE_PX,
};
use crate::data_input::LightCone;
use crate::error::{PlotError, Result};
use crate::plot_framework::{Annotation, Figure, FigureOptions, GridLayout};
use crate::plot_functions::imshow_slice::SliceOptions;
use crate::plot_functions::lightcone_sliceplot::{lightcone_sliceplot_on, LightconeSliceOptions};

/// One panel per lightcone quantity, stacked side by side (`vertical`) or
/// top to bottom, sharing both axes.
///
/// Slicing options in `opts` apply to every panel; colour maps are chosen per
/// field and colourbars are not drawn. The composed figure is returned for the
/// caller to save.
pub fn lightcone_sliceplot_all(
    lightcone: &LightCone,
    vertical: bool,
    opts: &SliceOptions,
) -> Result<Figure> {
    let quantities = lightcone.quantities();
    let shape = lightcone.shape().ok_or(PlotError::EmptyLightcone)?;
    let n = quantities.len();

    let transverse_in = shape[1] as f64 * LIGHTCONE_ALL_INCHES_PER_CELL;
    let los_in = shape[2] as f64 * LIGHTCONE_ALL_INCHES_PER_CELL;
    let min_stack_px = MIN_PANEL_EDGE_PX * n as u32;
    let (layout, mut fig_opts) = if vertical {
        let layout = GridLayout {
            rows: 1,
            cols: n,
            wspace: LIGHTCONE_ALL_PANEL_SPACING,
            ..GridLayout::single()
        };
        let mut fig_opts = FigureOptions::from_inches(transverse_in * n as f64, los_in);
        fig_opts.width = fig_opts.width.max(min_stack_px);
        (layout, fig_opts)
    } else {
        let layout = GridLayout {
            rows: n,
            cols: 1,
            hspace: LIGHTCONE_ALL_PANEL_SPACING,
            ..GridLayout::single()
        };
        let mut fig_opts = FigureOptions::from_inches(los_in, transverse_in * n as f64);
        fig_opts.height = fig_opts.height.max(min_stack_px);
        (layout, fig_opts)
    };
    fig_opts.title = opts.fig_kw.title.clone();
    let layout = GridLayout {
        share_x: true,
        share_y: true,
        ..layout
    };

    let (mut fig, ids) = Figure::subplots(layout, fig_opts);
    for (i, (kind, ax)) in quantities.iter().zip(ids).enumerate() {
        let show_xlabel = vertical && i == n - 1;
        let show_ylabel = vertical && i == 0;
        let panel = LightconeSliceOptions {
            kind: *kind,
            vertical,
            xlabel: if show_xlabel { None } else { Some(String::new()) },
            ylabel: if show_ylabel { None } else { Some(String::new()) },
            cbar_label: None,
            slice: SliceOptions {
                cmap: Some(kind.panel_colormap()),
                cbar: false,
                ..opts.clone()
            },
        };
        lightcone_sliceplot_on(&mut fig, ax, lightcone, None, &panel)?;

        fig.axes_mut(ax)?.text(Annotation {
            text: kind.name().to_string(),
            x_frac: 1.0,
            y_frac: 0.05,
            color: ANNOTATION_TEXT_COLOR,
            background: Some(ANNOTATION_BACKGROUND_COLOR),
            font_size: FONT_SIZE_ANNOTATION,
        });
    }

    debug!(
        "Composed {n} lightcone panels ({}), figure {}x{} px",
        if vertical { "vertical" } else { "horizontal" },
        fig.options.width,
        fig.options.height
    );
    Ok(fig)
}
