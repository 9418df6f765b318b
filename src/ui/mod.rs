//! Terminal painting for the demo host.

mod render;

pub use render::{input_line, render};
