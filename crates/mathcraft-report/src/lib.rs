//! mathcraft-report: Teacher dashboard and worksheet picture rendering.
//!
//! Turns a [`ClassReport`](mathcraft_core::report::ClassReport) into a
//! self-contained HTML page, and a
//! [`PizzaLayout`](mathcraft_core::geometry::PizzaLayout) into static SVG.

pub mod html;
pub mod svg;

pub use html::{generate_html, write_html_report};
pub use svg::{pizza_svg, write_pizza_svg};
