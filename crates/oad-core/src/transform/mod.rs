pub mod builder;
pub mod naming;
pub mod normalizer;

pub use builder::{Build, BuildOptions, build, build_with_options};
