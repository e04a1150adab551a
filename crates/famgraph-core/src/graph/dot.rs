//! Graphviz DOT serialization.
//!
//! Pure text emission: attribute values are written as given, nothing is measured or laid out.

use super::{Edge, GraphDescription, LabelLine, Legend, Node, Shape, TextTone};
use crate::palette;
use std::fmt::Write as _;

pub fn to_dot(graph: &GraphDescription) -> String {
    let mut out = String::new();
    let name = match graph.kind {
        super::DiagramKind::Genogram => "genogram",
        super::DiagramKind::Ecomap => "ecomap",
    };
    let _ = writeln!(out, "digraph {} {{", quote(name));

    let mut graph_attrs: Vec<(String, String)> = vec![("layout".into(), graph.engine.as_str().into())];
    graph_attrs.extend(graph.attributes.iter().map(|(k, v)| (k.clone(), v.clone())));
    if let Some(title) = &graph.title {
        graph_attrs.push(("label".into(), title.clone()));
        graph_attrs.push(("labelloc".into(), "t".into()));
    }
    let _ = writeln!(out, "  graph [{}];", attr_list(&graph_attrs));
    let _ = writeln!(out, "  node [fontname=\"Arial\"];");

    for node in &graph.nodes {
        let _ = writeln!(out, "  {} [{}];", quote(&node.id), node_attrs(node));
    }

    for group in &graph.rank_groups {
        let ids = group
            .nodes
            .iter()
            .map(|id| quote(id))
            .collect::<Vec<_>>()
            .join("; ");
        let _ = writeln!(out, "  {{ rank=same; {ids}; }}");
    }

    for edge in &graph.edges {
        let _ = writeln!(
            out,
            "  {} -> {} [{}];",
            quote(&edge.from),
            quote(&edge.to),
            edge_attrs(edge)
        );
    }

    if let Some(legend) = &graph.legend {
        write_legend(&mut out, legend);
    }

    out.push_str("}\n");
    out
}

fn node_attrs(node: &Node) -> String {
    let mut attrs: Vec<(String, String)> = vec![("shape".into(), node.shape.as_str().into())];
    let style = if node.bold { "filled,bold" } else { "filled" };
    attrs.push(("style".into(), style.into()));
    attrs.push(("fillcolor".into(), node.fill_color.clone()));
    attrs.push(("color".into(), node.border_color.clone()));
    attrs.push(("penwidth".into(), num(node.border_width)));
    attrs.push(("peripheries".into(), node.peripheries.to_string()));
    if let Some(size) = node.size {
        attrs.push(("width".into(), num(size)));
        if node.shape == Shape::Point {
            attrs.push(("height".into(), num(size)));
        }
    }
    if let Some(fs) = node.font_size {
        attrs.push(("fontsize".into(), num(fs)));
    }
    if let Some(tooltip) = &node.tooltip {
        attrs.push(("tooltip".into(), tooltip.clone()));
    }
    let mut rendered = attr_list(&attrs);
    rendered.push_str(", label=");
    rendered.push_str(&label(&node.label));
    rendered
}

fn edge_attrs(edge: &Edge) -> String {
    let mut attrs: Vec<(String, String)> = vec![
        ("style".into(), edge.style.as_str().into()),
        ("arrowhead".into(), edge.arrowhead.as_str().into()),
        ("dir".into(), edge.direction.as_str().into()),
    ];
    if !edge.is_invisible() {
        attrs.push(("color".into(), edge.color.clone()));
        attrs.push(("penwidth".into(), num(edge.width)));
    }
    if let Some(size) = edge.arrow_size {
        attrs.push(("arrowsize".into(), num(size)));
    }
    if let Some(label) = &edge.label {
        attrs.push(("label".into(), label.clone()));
    }
    if let Some(color) = &edge.label_color {
        attrs.push(("fontcolor".into(), color.clone()));
    }
    if let Some(size) = edge.label_size {
        attrs.push(("fontsize".into(), num(size)));
    }
    if !edge.constraint {
        attrs.push(("constraint".into(), "false".into()));
    }
    attr_list(&attrs)
}

fn write_legend(out: &mut String, legend: &Legend) {
    let _ = writeln!(out, "  subgraph \"cluster_legend\" {{");
    let _ = writeln!(
        out,
        "    graph [{}];",
        attr_list(&[
            ("label".into(), legend.title.clone()),
            ("style".into(), "dashed".into()),
            ("color".into(), palette::LEGEND_BORDER.into()),
            ("fontsize".into(), "10".into()),
            ("fontcolor".into(), palette::LEGEND_TEXT.into()),
            ("bgcolor".into(), palette::LEGEND_BG.into()),
        ])
    );
    let mut table = String::from("<<TABLE BORDER=\"0\" CELLBORDER=\"0\" CELLSPACING=\"2\">");
    for row in legend.rows() {
        table.push_str("<TR>");
        for entry in row {
            let _ = write!(
                table,
                "<TD>{}</TD><TD> {}</TD>",
                html_escape(&entry.symbol),
                html_escape(&entry.meaning)
            );
        }
        table.push_str("</TR>");
    }
    table.push_str("</TABLE>>");
    let _ = writeln!(
        out,
        "    \"__legend\" [shape=plaintext, style=\"\", fontsize=\"9\", fontcolor={}, label={table}];",
        quote(palette::LEGEND_TEXT)
    );
    let _ = writeln!(out, "  }}");
}

/// Plain lines become a quoted `\n`-joined label; any styled line switches to an HTML table.
fn label(lines: &[LabelLine]) -> String {
    if lines.iter().all(|l| l.tone == TextTone::Normal) {
        let text = lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        return quote(&text);
    }
    let mut rows = String::new();
    for line in lines {
        let text = html_escape(&line.text);
        let cell = match line.tone {
            TextTone::Normal => text,
            TextTone::Bold => format!("<B>{text}</B>"),
            TextTone::Small => format!("<FONT POINT-SIZE=\"8\">{text}</FONT>"),
            TextTone::Alert => {
                format!("<FONT POINT-SIZE=\"9\" COLOR=\"{}\">{text}</FONT>", palette::ALERT)
            }
        };
        let _ = write!(rows, "<TR><TD>{cell}</TD></TR>");
    }
    format!("<<TABLE BORDER=\"0\" CELLBORDER=\"0\" CELLSPACING=\"1\">{rows}</TABLE>>")
}

fn attr_list(attrs: &[(String, String)]) -> String {
    attrs
        .iter()
        .map(|(k, v)| format!("{k}={}", quote(v)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn num(v: f64) -> String {
    format!("{v}")
}
