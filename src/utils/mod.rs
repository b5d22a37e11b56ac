//! Small helpers shared by the library and the demo binary.

pub mod json;
