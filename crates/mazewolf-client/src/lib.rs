pub mod assets;
pub mod cl_input;
pub mod cl_main;
pub mod ref_def;
