//! harvest-report: turn merged pull requests into a client-facing work report.
//!
//! The binary `harvest-report` drives [`pipeline::run`]; `harvest-pdf` prints
//! the resulting HTML to A4 through [`pdf::convert`].

pub mod aggregate;
pub mod charts;
pub mod classify;
pub mod cli;
pub mod dates;
pub mod estimate;
pub mod logging;
pub mod model;
pub mod params;
pub mod pdf;
pub mod pipeline;
pub mod render;
pub mod source;
pub mod util;
pub mod writer;
