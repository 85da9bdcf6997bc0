// src/error.rs

//! Error taxonomy for slice and history plots.

use thiserror::Error;

/// Errors raised while composing or rendering a figure.
#[derive(Error, Debug)]
pub enum PlotError {
    /// The slice index is past the end of the chosen axis.
    #[error("slice_index is too large for that axis (slice_index={index} >= {len}, axis={axis})")]
    SliceIndexOutOfRange { index: usize, len: usize, axis: usize },

    /// The requested field does not exist on the snapshot or lightcone.
    #[error("The given {source_name} does not have the quantity {kind}")]
    MissingField { kind: String, source_name: String },

    /// Slice axis outside {-1, 0, 1, 2}.
    #[error("slice_axis should be between -1 and 2 (got {0})")]
    InvalidSliceAxis(i32),

    /// No global quantity or `global_*` attribute matches the requested name.
    #[error("global quantity '{0}' not found in global_quantities or as a global_ attribute")]
    UnresolvedGlobalQuantity(String),

    /// Two arrays that must be combined element-wise have different shapes.
    #[error("shape mismatch: {left:?} vs {right:?}")]
    ShapeMismatch { left: Vec<usize>, right: Vec<usize> },

    /// A multi-panel plot was requested for a lightcone with no quantities.
    #[error("lightcone has no quantities to plot")]
    EmptyLightcone,

    /// An axes handle that does not belong to the figure.
    #[error("axes handle {0} does not exist in this figure")]
    InvalidAxesHandle(usize),

    /// Drawing backend failure.
    #[error("render error: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl<E> From<plotters::drawing::DrawingAreaErrorKind<E>> for PlotError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        PlotError::Render(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PlotError>;

// src/error.rs
