//! Core building blocks: the serialisable run parameters with their defaults
//! and validation, and installation path lookup.
pub mod params;
pub mod paths;
