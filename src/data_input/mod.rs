// src/data_input/mod.rs

pub mod coeval;
pub mod fields;
pub mod lightcone;
pub mod params;

pub use coeval::{Coeval, OutputStruct, SliceSource};
pub use fields::Field;
pub use lightcone::{GlobalAttributes, LightCone, GLOBAL_PREFIX};
pub use params::{CosmoParams, UserParams};

// src/data_input/mod.rs
