//! File input and output for plot documents.

pub mod project;

pub use project::{read_plot_json, write_plot_json};
