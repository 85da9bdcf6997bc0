// src/plot_framework.rs

//! Backend-agnostic figure model and its plotters renderer.
//!
//! Plot functions fill a [`Figure`] with [`Axes`] (images, line series, labels,
//! ticks, colourbars, annotations). Nothing is drawn until [`Figure::save`] or
//! [`Figure::render_on`] is called, so composed figures can be inspected and
//! further decorated by the caller.

use std::fs;
use std::ops::Range;
use std::path::Path;

use log::{debug, info, warn};
use ndarray::Array2;
use plotters::backend::{BitMapBackend, DrawingBackend, SVGBackend};
use plotters::chart::{ChartBuilder, ChartContext};
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{PathElement, Rectangle, Text};
use plotters::series::LineSeries;
use plotters::style::colors::{BLACK, RED, WHITE};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{Color, IntoFont, RGBColor};
use serde::{Deserialize, Serialize};

use crate::colormap::Colormap;
use crate::constants::{
    COLORBAR_ASPECT, COLORBAR_GRADIENT_STEPS, FONT_FAMILY, FONT_SIZE_AXIS_LABEL,
    FONT_SIZE_MAIN_TITLE, FONT_SIZE_TICK_LABEL, MIN_PANEL_EDGE_PX, PANEL_MARGIN_PX,
    PIXELS_PER_INCH, PLOT_HEIGHT, PLOT_WIDTH, TICK_LENGTH_PX, X_LABEL_AREA_SIZE,
    Y_LABEL_AREA_SIZE,
};
use crate::error::{PlotError, Result};

type Chart2d<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Calculate plot range with padding.
/// Adds 5% padding, or a fixed padding for very small ranges.
pub fn calculate_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = (max - min).abs();
    let padding = if range < 1e-6 { 0.5 } else { range * 0.05 };
    (min - padding, max + padding)
}

/// Tick label text for a numeric axis position.
pub fn format_tick_label(v: f64) -> String {
    if v.abs() >= 1_000_000.0 {
        format!("{:.1}M", v / 1_000_000.0)
    } else if v.fract() == 0.0 {
        format!("{:.0}", v)
    } else if v.abs() < 1.0 {
        format!("{:.2}", v)
    } else if v.abs() < 10.0 {
        format!("{:.1}", v)
    } else {
        format!("{:.0}", v)
    }
}

fn tick_formatter(v: &f64) -> String {
    format_tick_label(*v)
}

/// Handle to one panel of a [`Figure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxesId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    #[serde(rename = "horizontal")]
    Horizontal,
    #[serde(rename = "vertical")]
    Vertical,
}

/// Data-space rectangle an image covers: `(x0, x1, y0, y1)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

impl Extent {
    pub fn new(x0: f64, x1: f64, y0: f64, y1: f64) -> Self {
        Self { x0, x1, y0, y1 }
    }

    /// The same `(lo, hi)` interval on both axes.
    pub fn square(lo: f64, hi: f64) -> Self {
        Self::new(lo, hi, lo, hi)
    }

    /// Pixel-index extent of a `(rows, cols)` image.
    pub fn pixels(rows: usize, cols: usize) -> Self {
        Self::new(-0.5, cols as f64 - 0.5, -0.5, rows as f64 - 0.5)
    }
}

/// Figure-level options (the equivalent of subplot figure keywords).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureOptions {
    pub width: u32,
    pub height: u32,
    pub title: Option<String>,
}

impl Default for FigureOptions {
    fn default() -> Self {
        Self {
            width: PLOT_WIDTH,
            height: PLOT_HEIGHT,
            title: None,
        }
    }
}

impl FigureOptions {
    /// Size given in inches, converted at `PIXELS_PER_INCH`.
    pub fn from_inches(width_in: f64, height_in: f64) -> Self {
        let to_px = |inches: f64| ((inches * PIXELS_PER_INCH).round() as u32).max(MIN_PANEL_EDGE_PX);
        Self {
            width: to_px(width_in),
            height: to_px(height_in),
            title: None,
        }
    }
}

/// A 2D array drawn with the origin in the lower-left corner.
#[derive(Debug, Clone)]
pub struct ImageLayer {
    pub data: Array2<f32>,
    pub extent: Extent,
    pub cmap: Colormap,
    pub vmin: f64,
    pub vmax: f64,
}

impl ImageLayer {
    /// Data-space corners of the cell at (`row`, `col`); row 0 is at the bottom.
    pub fn cell_rect(&self, row: usize, col: usize) -> [(f64, f64); 2] {
        let (rows, cols) = self.data.dim();
        let dx = (self.extent.x1 - self.extent.x0) / cols.max(1) as f64;
        let dy = (self.extent.y1 - self.extent.y0) / rows.max(1) as f64;
        [
            (self.extent.x0 + col as f64 * dx, self.extent.y0 + row as f64 * dy),
            (
                self.extent.x0 + (col + 1) as f64 * dx,
                self.extent.y0 + (row + 1) as f64 * dy,
            ),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Colorbar {
    pub orientation: Orientation,
    pub label: Option<String>,
    pub aspect: u32,
}

impl Colorbar {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            label: None,
            aspect: COLORBAR_ASPECT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlotSeries {
    pub data: Vec<(f64, f64)>,
    pub label: String,
    pub color: RGBColor,
    pub stroke_width: u32,
}

/// Text placed in axes-fraction coordinates, anchored at its bottom-right corner.
#[derive(Debug, Clone)]
pub struct Annotation {
    pub text: String,
    pub x_frac: f64,
    pub y_frac: f64,
    pub color: RGBColor,
    pub background: Option<RGBColor>,
    pub font_size: i32,
}

/// Explicit tick positions with their labels.
pub type Ticks = Vec<(f64, String)>;

/// One panel of a figure.
#[derive(Debug, Clone, Default)]
pub struct Axes {
    pub image: Option<ImageLayer>,
    pub series: Vec<PlotSeries>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub x_ticks: Option<Ticks>,
    pub y_ticks: Option<Ticks>,
    pub colorbar: Option<Colorbar>,
    pub annotations: Vec<Annotation>,
}

impl Axes {
    pub fn set_xlabel(&mut self, label: impl Into<String>) {
        self.x_label = Some(label.into());
    }

    pub fn set_ylabel(&mut self, label: impl Into<String>) {
        self.y_label = Some(label.into());
    }

    pub fn set_xticks(&mut self, ticks: Ticks) {
        self.x_ticks = Some(ticks);
    }

    pub fn set_yticks(&mut self, ticks: Ticks) {
        self.y_ticks = Some(ticks);
    }

    pub fn text(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    pub fn plot(&mut self, series: PlotSeries) {
        self.series.push(series);
    }

    /// Label shown along the colourbar, if any.
    pub fn colorbar_label(&self) -> Option<&str> {
        self.colorbar.as_ref().and_then(|cb| cb.label.as_deref())
    }

    /// Data limits: the image extent, otherwise the padded bounds of all series.
    pub fn limits(&self) -> Option<(Range<f64>, Range<f64>)> {
        if let Some(image) = &self.image {
            let e = image.extent;
            return Some((e.x0..e.x1, e.y0..e.y1));
        }

        let mut bounds: Option<(f64, f64, f64, f64)> = None;
        for &(x, y) in self.series.iter().flat_map(|s| s.data.iter()) {
            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            bounds = Some(match bounds {
                Some((x0, x1, y0, y1)) => (x0.min(x), x1.max(x), y0.min(y), y1.max(y)),
                None => (x, x, y, y),
            });
        }
        bounds.map(|(x0, x1, y0, y1)| {
            let (xa, xb) = calculate_range(x0, x1);
            let (ya, yb) = calculate_range(y0, y1);
            (xa..xb, ya..yb)
        })
    }
}

/// Subplot grid geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub rows: usize,
    pub cols: usize,
    /// Horizontal gap between panels as a fraction of panel width.
    pub wspace: f64,
    /// Vertical gap between panels as a fraction of panel height.
    pub hspace: f64,
    pub share_x: bool,
    pub share_y: bool,
}

impl GridLayout {
    pub fn single() -> Self {
        Self {
            rows: 1,
            cols: 1,
            wspace: 0.0,
            hspace: 0.0,
            share_x: false,
            share_y: false,
        }
    }
}

/// A composed, not yet rendered, figure.
#[derive(Debug, Clone)]
pub struct Figure {
    pub options: FigureOptions,
    pub layout: GridLayout,
    axes: Vec<Axes>,
}

impl Figure {
    /// A figure with a single empty panel.
    pub fn new(options: FigureOptions) -> (Self, AxesId) {
        let (fig, ids) = Self::subplots(GridLayout::single(), options);
        (fig, ids[0])
    }

    /// A figure with a `rows x cols` grid of empty panels, row-major.
    pub fn subplots(layout: GridLayout, options: FigureOptions) -> (Self, Vec<AxesId>) {
        let rows = layout.rows.max(1);
        let cols = layout.cols.max(1);
        let layout = GridLayout { rows, cols, ..layout };
        let count = rows * cols;
        let fig = Self {
            options,
            layout,
            axes: vec![Axes::default(); count],
        };
        (fig, (0..count).map(AxesId).collect())
    }

    pub fn axes_ids(&self) -> Vec<AxesId> {
        (0..self.axes.len()).map(AxesId).collect()
    }

    pub fn axes(&self, id: AxesId) -> Result<&Axes> {
        self.axes.get(id.0).ok_or(PlotError::InvalidAxesHandle(id.0))
    }

    pub fn axes_mut(&mut self, id: AxesId) -> Result<&mut Axes> {
        self.axes.get_mut(id.0).ok_or(PlotError::InvalidAxesHandle(id.0))
    }

    pub fn size(&self) -> (u32, u32) {
        (self.options.width, self.options.height)
    }

    /// Render to `path`; `.svg` selects the SVG backend, anything else PNG.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("png")
            .to_ascii_lowercase();
        match ext.as_str() {
            "svg" => self.render_on(SVGBackend::new(path, self.size()))?,
            _ => self.render_on(BitMapBackend::new(path, self.size()))?,
        }
        info!("  Figure saved as '{}'.", path.display());
        Ok(())
    }

    /// Draw every panel onto `backend`.
    pub fn render_on<DB: DrawingBackend>(&self, backend: DB) -> Result<()> {
        let root = backend.into_drawing_area();
        root.fill(&WHITE)?;

        let body = match &self.options.title {
            Some(title) if !title.is_empty() => {
                root.titled(title, (FONT_FAMILY, FONT_SIZE_MAIN_TITLE).into_font())?
            }
            _ => root.clone(),
        };

        let cells = body.split_evenly((self.layout.rows, self.layout.cols));
        for (index, (cell, axes)) in cells.iter().zip(self.axes.iter()).enumerate() {
            let row = index / self.layout.cols;
            let col = index % self.layout.cols;
            let (w, h) = cell.dim_in_pixel();
            let gap_x = (self.layout.wspace * w as f64 / 2.0).round() as i32;
            let gap_y = (self.layout.hspace * h as f64 / 2.0).round() as i32;
            let panel = cell.margin(gap_y, gap_y, gap_x, gap_x);

            let hide_x_ticks = self.layout.share_x && row + 1 < self.layout.rows;
            let hide_y_ticks = self.layout.share_y && col > 0;
            debug!("Drawing panel {index} (row {row}, col {col})");
            draw_axes(&panel, axes, hide_x_ticks, hide_y_ticks)?;
        }

        root.present()?;
        Ok(())
    }
}

/// Draw a "no data" message in the middle of a panel.
pub fn draw_unavailable_message<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    reason: &str,
) -> Result<()> {
    let (width, height) = area.dim_in_pixel();
    let style = (FONT_FAMILY, FONT_SIZE_AXIS_LABEL)
        .into_font()
        .color(&RED)
        .pos(Pos::new(HPos::Center, VPos::Center));
    area.draw(&Text::new(
        format!("Data Unavailable: {reason}"),
        (width as i32 / 2, height as i32 / 2),
        style,
    ))?;
    Ok(())
}

fn draw_axes<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    axes: &Axes,
    hide_x_ticks: bool,
    hide_y_ticks: bool,
) -> Result<()> {
    let Some((x_range, y_range)) = axes.limits() else {
        if !axes.annotations.is_empty() || axes.colorbar.is_some() {
            warn!("Panel has decorations but nothing to plot");
        }
        return draw_unavailable_message(area, "No data points");
    };
    if x_range.start == x_range.end || y_range.start == y_range.end {
        return draw_unavailable_message(area, "Invalid ranges");
    }

    let (plot_area, colorbar_area) = split_for_colorbar(area, axes);

    let x_label = axes.x_label.clone().unwrap_or_default();
    let y_label = axes.y_label.clone().unwrap_or_default();

    let mut chart = ChartBuilder::on(&plot_area)
        .margin(PANEL_MARGIN_PX)
        .x_label_area_size(X_LABEL_AREA_SIZE)
        .y_label_area_size(Y_LABEL_AREA_SIZE)
        .build_cartesian_2d(x_range.clone(), y_range.clone())?;

    let default_x_labels = if hide_x_ticks || axes.x_ticks.is_some() { 0 } else { 8 };
    let default_y_labels = if hide_y_ticks || axes.y_ticks.is_some() { 0 } else { 8 };

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(x_label)
        .y_desc(y_label)
        .x_labels(default_x_labels)
        .y_labels(default_y_labels)
        .x_label_formatter(&tick_formatter)
        .y_label_formatter(&tick_formatter)
        .label_style((FONT_FAMILY, FONT_SIZE_TICK_LABEL))
        .axis_desc_style((FONT_FAMILY, FONT_SIZE_AXIS_LABEL));
    if axes.image.is_some() {
        mesh.disable_mesh();
    } else {
        mesh.light_line_style(WHITE.mix(0.7));
    }
    mesh.draw()?;

    if let Some(image) = &axes.image {
        draw_image(&mut chart, image)?;
    }

    for s in &axes.series {
        if s.data.is_empty() {
            continue;
        }
        chart.draw_series(LineSeries::new(
            s.data.iter().copied(),
            s.color.stroke_width(s.stroke_width),
        ))?;
    }

    if let Some(ticks) = &axes.x_ticks {
        draw_custom_ticks(&plot_area, &chart, ticks, &x_range, &y_range, true, hide_x_ticks)?;
    }
    if let Some(ticks) = &axes.y_ticks {
        draw_custom_ticks(&plot_area, &chart, ticks, &x_range, &y_range, false, hide_y_ticks)?;
    }

    for annotation in &axes.annotations {
        draw_annotation(&plot_area, &chart, annotation)?;
    }

    if let (Some(colorbar), Some(cb_area), Some(image)) = (&axes.colorbar, colorbar_area, &axes.image) {
        draw_colorbar(&cb_area, colorbar, image)?;
    }
    Ok(())
}

/// Carve the colourbar strip off the right edge (vertical) or bottom edge (horizontal).
fn split_for_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    axes: &Axes,
) -> (DrawingArea<DB, Shift>, Option<DrawingArea<DB, Shift>>) {
    let (Some(colorbar), Some(_)) = (&axes.colorbar, &axes.image) else {
        return (area.clone(), None);
    };
    let (width, height) = area.dim_in_pixel();
    let aspect = colorbar.aspect.max(1) as i32;
    match colorbar.orientation {
        Orientation::Vertical => {
            let bar = (height as i32 / aspect).max(10) + Y_LABEL_AREA_SIZE + 2 * PANEL_MARGIN_PX;
            let split_at = (width as i32 - bar).max(0);
            let (plot, cb) = area.split_horizontally(split_at);
            (plot, Some(cb))
        }
        Orientation::Horizontal => {
            let bar = (width as i32 / aspect).max(10) + X_LABEL_AREA_SIZE + 2 * PANEL_MARGIN_PX;
            let split_at = (height as i32 - bar).max(0);
            let (plot, cb) = area.split_vertically(split_at);
            (plot, Some(cb))
        }
    }
}

fn draw_image<DB: DrawingBackend>(chart: &mut Chart2d<'_, DB>, image: &ImageLayer) -> Result<()> {
    let (rows, cols) = image.data.dim();
    let cells = (0..rows).flat_map(|r| (0..cols).map(move |c| (r, c)));
    chart.draw_series(cells.filter_map(|(r, c)| {
        let color = image
            .cmap
            .map_value(image.data[[r, c]] as f64, image.vmin, image.vmax)?;
        Some(Rectangle::new(image.cell_rect(r, c), color.filled()))
    }))?;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn draw_custom_ticks<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    chart: &Chart2d<'_, DB>,
    ticks: &Ticks,
    x_range: &Range<f64>,
    y_range: &Range<f64>,
    along_x: bool,
    hide_labels: bool,
) -> Result<()> {
    let base = area.get_base_pixel();
    let (x_lo, x_hi) = (x_range.start.min(x_range.end), x_range.start.max(x_range.end));
    let (y_lo, y_hi) = (y_range.start.min(y_range.end), y_range.start.max(y_range.end));
    let font = (FONT_FAMILY, FONT_SIZE_TICK_LABEL).into_font().color(&BLACK);

    for (pos, label) in ticks {
        let (lo, hi) = if along_x { (x_lo, x_hi) } else { (y_lo, y_hi) };
        if !pos.is_finite() || *pos < lo || *pos > hi {
            continue;
        }
        if along_x {
            let (px, py) = chart.backend_coord(&(*pos, y_range.start));
            let (x, y) = (px - base.0, py - base.1);
            area.draw(&PathElement::new(
                vec![(x, y), (x, y + TICK_LENGTH_PX)],
                BLACK.stroke_width(1),
            ))?;
            if !hide_labels {
                area.draw(&Text::new(
                    label.clone(),
                    (x, y + TICK_LENGTH_PX + 2),
                    font.pos(Pos::new(HPos::Center, VPos::Top)),
                ))?;
            }
        } else {
            let (px, py) = chart.backend_coord(&(x_range.start, *pos));
            let (x, y) = (px - base.0, py - base.1);
            area.draw(&PathElement::new(
                vec![(x - TICK_LENGTH_PX, y), (x, y)],
                BLACK.stroke_width(1),
            ))?;
            if !hide_labels {
                area.draw(&Text::new(
                    label.clone(),
                    (x - TICK_LENGTH_PX - 2, y),
                    font.pos(Pos::new(HPos::Right, VPos::Center)),
                ))?;
            }
        }
    }
    Ok(())
}

fn draw_annotation<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    chart: &Chart2d<'_, DB>,
    annotation: &Annotation,
) -> Result<()> {
    let base = area.get_base_pixel();
    let (x_px, y_px) = chart.plotting_area().get_pixel_range();
    let width = (x_px.end - x_px.start) as f64;
    let height = (y_px.end - y_px.start) as f64;
    let x = x_px.start + (annotation.x_frac * width).round() as i32 - base.0;
    let y = y_px.end - (annotation.y_frac * height).round() as i32 - base.1;

    let style = (FONT_FAMILY, annotation.font_size)
        .into_font()
        .color(&annotation.color)
        .pos(Pos::new(HPos::Right, VPos::Bottom));
    if let Some(background) = annotation.background {
        let (tw, th) = area.estimate_text_size(&annotation.text, &style)?;
        let pad = 2;
        area.draw(&Rectangle::new(
            [(x - tw as i32 - pad, y - th as i32 - pad), (x + pad, y + pad)],
            background.filled(),
        ))?;
    }
    area.draw(&Text::new(annotation.text.clone(), (x, y), style))?;
    Ok(())
}

fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    colorbar: &Colorbar,
    image: &ImageLayer,
) -> Result<()> {
    let vmin = image.vmin;
    let vmax = if image.vmax > vmin { image.vmax } else { vmin + 1.0 };
    let label = colorbar.label.clone().unwrap_or_default();
    let steps = COLORBAR_GRADIENT_STEPS;
    let value_at = |i: usize| vmin + (vmax - vmin) * i as f64 / steps as f64;

    match colorbar.orientation {
        Orientation::Vertical => {
            let mut bar = ChartBuilder::on(area)
                .margin(PANEL_MARGIN_PX)
                .margin_bottom(PANEL_MARGIN_PX + X_LABEL_AREA_SIZE)
                .right_y_label_area_size(Y_LABEL_AREA_SIZE)
                .build_cartesian_2d(0.0..1.0, vmin..vmax)?;
            bar.configure_mesh()
                .disable_mesh()
                .x_labels(0)
                .y_desc(label)
                .y_label_formatter(&tick_formatter)
                .label_style((FONT_FAMILY, FONT_SIZE_TICK_LABEL))
                .axis_desc_style((FONT_FAMILY, FONT_SIZE_AXIS_LABEL))
                .draw()?;
            bar.draw_series((0..steps).map(|i| {
                let t = (i as f64 + 0.5) / steps as f64;
                Rectangle::new([(0.0, value_at(i)), (1.0, value_at(i + 1))], image.cmap.eval(t).filled())
            }))?;
        }
        Orientation::Horizontal => {
            let mut bar = ChartBuilder::on(area)
                .margin(PANEL_MARGIN_PX)
                .margin_left(PANEL_MARGIN_PX + Y_LABEL_AREA_SIZE)
                .x_label_area_size(X_LABEL_AREA_SIZE)
                .build_cartesian_2d(vmin..vmax, 0.0..1.0)?;
            bar.configure_mesh()
                .disable_mesh()
                .y_labels(0)
                .x_desc(label)
                .x_label_formatter(&tick_formatter)
                .label_style((FONT_FAMILY, FONT_SIZE_TICK_LABEL))
                .axis_desc_style((FONT_FAMILY, FONT_SIZE_AXIS_LABEL))
                .draw()?;
            bar.draw_series((0..steps).map(|i| {
                let t = (i as f64 + 0.5) / steps as f64;
                Rectangle::new([(value_at(i), 0.0), (value_at(i + 1), 1.0)], image.cmap.eval(t).filled())
            }))?;
        }
    }
    Ok(())
}


// src/plot_framework.rs
