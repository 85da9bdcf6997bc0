// src/constants.rs

use plotters::style::colors::{RED, WHITE};
use plotters::style::RGBColor;

// Default single-panel figure dimensions (matplotlib's 6.4 x 4.8 in at 100 dpi).
pub const PLOT_WIDTH: u32 = 640;
pub const PLOT_HEIGHT: u32 = 480;

// Pixels per inch used when a figure size is given in inches.
pub const PIXELS_PER_INCH: f64 = 100.0;

// Smallest panel edge in pixels; tiny lightcones would otherwise collapse to nothing.
pub const MIN_PANEL_EDGE_PX: u32 = 120;

// Global history plots are tall and narrow.
pub const GLOBAL_HISTORY_FIGSIZE_IN: (f64, f64) = (4.0, 7.0);

// Inches per lightcone cell in the multi-panel plot.
pub const LIGHTCONE_ALL_INCHES_PER_CELL: f64 = 0.015;
pub const LIGHTCONE_ALL_PANEL_SPACING: f64 = 0.01;

// Fixed brightness-temperature range (mK) of the EoR colour map.
pub const EOR_VMIN: f64 = -150.0;
pub const EOR_VMAX: f64 = 30.0;

// At most this many labelled redshift ticks along the line of sight.
pub const MAX_REDSHIFT_TICKS: usize = 8;

// Colourbar long-to-short side ratio.
pub const COLORBAR_ASPECT: u32 = 40;
pub const COLORBAR_GRADIENT_STEPS: usize = 256;

// Speed of light in km/s.
pub const SPEED_OF_LIGHT_KM_S: f64 = 299_792.458;

// Simpson intervals per unit redshift for comoving distance integration.
pub const COMOVING_DISTANCE_STEPS_PER_UNIT_Z: usize = 256;

// Font sizes.
pub const FONT_SIZE_MAIN_TITLE: i32 = 20;
pub const FONT_SIZE_AXIS_LABEL: i32 = 14;
pub const FONT_SIZE_TICK_LABEL: i32 = 12;
pub const FONT_SIZE_ANNOTATION: i32 = 15;

pub const FONT_FAMILY: &str = "sans-serif";

// Label area sizes around each panel, in pixels.
pub const X_LABEL_AREA_SIZE: i32 = 40;
pub const Y_LABEL_AREA_SIZE: i32 = 50;
pub const PANEL_MARGIN_PX: i32 = 5;
pub const TICK_LENGTH_PX: i32 = 5;

// Field-name annotation on multi-panel lightcone plots.
pub const ANNOTATION_TEXT_COLOR: RGBColor = RED;
pub const ANNOTATION_BACKGROUND_COLOR: RGBColor = WHITE;

// Default colourbar and axis labels.
pub const BRIGHTNESS_TEMP_CBAR_LABEL: &str = "Brightness Temperature, δT_B [mK]";
pub const IONIZED_FRACTION_CBAR_LABEL: &str = "Ionized fraction";
pub const NEUTRAL_FRACTION_CBAR_LABEL: &str = "Neutral fraction";
pub const REDSHIFT_LABEL: &str = "Redshift";

// Line plot styling.
pub const LINE_WIDTH_PLOT: u32 = 2;
pub const COLOR_LINE_MAIN: RGBColor = RGBColor(31, 119, 180);

// src/constants.rs
