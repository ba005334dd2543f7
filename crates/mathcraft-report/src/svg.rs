//! Static SVG rendering of a sliced pizza.

use std::path::Path;

use anyhow::Result;

use mathcraft_core::geometry::PizzaLayout;

/// Render a pizza layout as a standalone 400x400 SVG document.
pub fn pizza_svg(layout: &PizzaLayout) -> String {
    let c = layout.center;
    let r = layout.radius;
    let mut svg = String::new();

    svg.push_str(&format!(
        "<svg width=\"{w}\" height=\"{w}\" viewBox=\"0 0 {w} {w}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        w = c.x * 2.0
    ));
    // crust, cheese
    svg.push_str(&format!(
        "  <circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"#D2691E\" stroke=\"#8B4513\" stroke-width=\"4\"/>\n",
        c.x,
        c.y,
        r + 10.0
    ));
    svg.push_str(&format!(
        "  <circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"#FFD700\" opacity=\"0.8\"/>\n",
        c.x,
        c.y,
        r + 5.0
    ));

    for p in &layout.pepperoni {
        svg.push_str(&format!(
            "  <circle class=\"pepperoni\" cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"#DC143C\" stroke=\"#8B0000\" stroke-width=\"1\"/>\n",
            p.center.x, p.center.y, p.radius
        ));
    }

    for cut in &layout.cuts {
        svg.push_str(&format!(
            "  <line class=\"slice-line\" x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"#000\" stroke-width=\"4\" stroke-linecap=\"round\"/>\n",
            cut.from.x, cut.from.y, cut.to.x, cut.to.y
        ));
    }

    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" font-size=\"16\" text-anchor=\"middle\">1/{} = {} = {}%</text>\n",
        c.x,
        c.y * 2.0 - 4.0,
        layout.fraction.slices,
        layout.fraction.decimal,
        layout.fraction.percent
    ));

    svg.push_str("</svg>\n");
    svg
}

/// Write a pizza SVG to a file.
pub fn write_pizza_svg(layout: &PizzaLayout, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, pizza_svg(layout))?;
    Ok(())
}
