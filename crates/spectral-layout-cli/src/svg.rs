use spectral_layout::{Graph, LayoutResult, Point, Result};

const PADDING: f64 = 40.0;
const NODE_RADIUS: f64 = 8.0;

/// Minimal SVG preview of a layout: edges as lines (negative edges dashed), nodes as labelled
/// circles.
pub fn render_layout_svg(
    graph: &Graph,
    result: &LayoutResult,
    negative: &[bool],
) -> Result<String> {
    let endpoints = graph.edge_endpoints()?;
    let points: Vec<Point> = graph
        .nodes
        .iter()
        .map(|n| {
            result
                .positions
                .get(n.id.as_str())
                .copied()
                .unwrap_or(Point { x: 0.0, y: 0.0 })
        })
        .collect();

    let (min_x, min_y, max_x, max_y) = bounds(&points);
    let width = (max_x - min_x) + 2.0 * PADDING;
    let height = (max_y - min_y) + 2.0 * PADDING;
    let vb_x = min_x - PADDING;
    let vb_y = min_y - PADDING;

    let mut out = String::new();
    out.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" width="{}" height="{}">"#,
        fmt(vb_x),
        fmt(vb_y),
        fmt(width),
        fmt(height),
        fmt(width),
        fmt(height)
    ));
    out.push_str(r##"<g class="edges" stroke="#999" stroke-width="1.5">"##);
    for (i, &(u, v)) in endpoints.iter().enumerate() {
        let dash = if negative.get(i).copied().unwrap_or(false) {
            r#" stroke-dasharray="4 3""#
        } else {
            ""
        };
        out.push_str(&format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{dash}/>"#,
            fmt(points[u].x),
            fmt(points[u].y),
            fmt(points[v].x),
            fmt(points[v].y)
        ));
    }
    out.push_str("</g>");

    out.push_str(r##"<g class="nodes" fill="#4c78a8" font-family="Arial" font-size="12">"##);
    for (n, p) in graph.nodes.iter().zip(&points) {
        out.push_str(&format!(
            r#"<circle cx="{}" cy="{}" r="{}"/>"#,
            fmt(p.x),
            fmt(p.y),
            NODE_RADIUS
        ));
        out.push_str(&format!(
            r##"<text x="{}" y="{}" fill="#333">{}</text>"##,
            fmt(p.x + NODE_RADIUS + 2.0),
            fmt(p.y - NODE_RADIUS),
            escape_xml_text(&n.id)
        ));
    }
    out.push_str("</g></svg>\n");
    Ok(out)
}

fn bounds(points: &[Point]) -> (f64, f64, f64, f64) {
    if points.is_empty() {
        return (0.0, 0.0, 0.0, 0.0);
    }
    points.iter().fold(
        (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        |(x0, y0, x1, y1), p| (x0.min(p.x), y0.min(p.y), x1.max(p.x), y1.max(p.y)),
    )
}

fn fmt(v: f64) -> String {
    let r = (v * 1000.0).round() / 1000.0;
    if r == 0.0 { "0".to_string() } else { r.to_string() }
}

fn escape_xml_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}
