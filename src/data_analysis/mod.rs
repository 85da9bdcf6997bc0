// src/data_analysis/mod.rs

pub mod cosmology;
pub mod redshift_ticks;
pub mod slicing;

// src/data_analysis/mod.rs
