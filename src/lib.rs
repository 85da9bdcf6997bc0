// src/lib.rs - Slice and history plots of volumetric cosmological simulation outputs

#![allow(non_snake_case)]

pub mod axis_names;
pub mod colormap;
pub mod constants;
pub mod data_analysis;
pub mod data_input;
pub mod error;
pub mod plot_framework;
pub mod plot_functions;

pub use colormap::Colormap;
pub use data_input::{
    Coeval, CosmoParams, Field, GlobalAttributes, LightCone, OutputStruct, SliceSource, UserParams,
};
pub use error::{PlotError, Result};
pub use plot_framework::{AxesId, Extent, Figure, FigureOptions};
pub use plot_functions::{
    coeval_sliceplot, coeval_sliceplot_on, imshow_slice, imshow_slice_on, lightcone_sliceplot,
    lightcone_sliceplot_all, lightcone_sliceplot_on, plot_global_history, plot_global_history_on,
    LightconeSliceOptions, SliceOptions,
};

// src/lib.rs
