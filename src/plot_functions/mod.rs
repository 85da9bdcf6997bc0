// src/plot_functions/mod.rs

pub mod coeval_sliceplot;
pub mod imshow_slice;
pub mod lightcone_sliceplot;
pub mod lightcone_sliceplot_all;
pub mod plot_global_history;

pub use coeval_sliceplot::{coeval_sliceplot, coeval_sliceplot_on};
pub use imshow_slice::{imshow_slice, imshow_slice_on, SliceOptions};
pub use lightcone_sliceplot::{lightcone_sliceplot, lightcone_sliceplot_on, LightconeSliceOptions};
pub use lightcone_sliceplot_all::lightcone_sliceplot_all;
pub use plot_global_history::{plot_global_history, plot_global_history_on, resolve_global_quantity};

// src/plot_functions/mod.rs
