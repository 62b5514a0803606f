//! Visual tree → standalone SVG document.
//!
//! Native export path: the browser rasterizes the live DOM, everything
//! else flattens the same visual tree to SVG. Selection chrome is never
//! exported.

use crate::view::{NodeContent, VisualTree};

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Flatten a visual tree into an SVG string of the tree's screen size.
pub fn render_svg(tree: &VisualTree) -> String {
    let (width, height) = (tree.width, tree.height);
    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" \
         width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">\n"
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\" />\n",
        tree.background.background_color
    ));

    for node in &tree.nodes {
        let (cx, cy) = (node.left, node.top);
        let (x, y) = (cx - node.width / 2.0, cy - node.height / 2.0);
        svg.push_str(&format!("<g transform=\"rotate({} {cx} {cy})\">\n", node.rotation));
        match &node.content {
            NodeContent::Image { src, alt } => {
                svg.push_str(&format!(
                    "  <image href=\"{}\" x=\"{x}\" y=\"{y}\" width=\"{}\" height=\"{}\" \
                     preserveAspectRatio=\"xMidYMid slice\"><title>{}</title></image>\n",
                    escape_xml(src),
                    node.width,
                    node.height,
                    escape_xml(alt),
                ));
            }
            NodeContent::Text {
                text,
                placeholder,
                font_size,
                font_color,
                font_family,
                font_weight,
                ..
            } => {
                // Placeholders are editor chrome, not content.
                if !placeholder {
                    svg.push_str(&format!(
                        "  <text x=\"{cx}\" y=\"{cy}\" text-anchor=\"middle\" dominant-baseline=\"middle\" \
                         font-size=\"{font_size}\" font-weight=\"{font_weight}\" font-family=\"{}\" fill=\"{font_color}\">{}</text>\n",
                        escape_xml(font_family),
                        escape_xml(text),
                    ));
                }
            }
        }
        svg.push_str("</g>\n");
    }

    svg.push_str("</svg>");
    svg
}
