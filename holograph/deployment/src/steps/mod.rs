pub mod genesis;
pub mod layer_zero_module;
pub mod samples;
