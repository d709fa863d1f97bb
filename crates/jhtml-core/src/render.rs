use crate::ast::*;
use crate::config::CompileOptions;

/// Serialize a classified node into HTML. Sequences concatenate with no
/// separator; output is always a single unformatted line.
pub fn render(node: &Node, options: &CompileOptions) -> String {
    let mut out = String::new();
    write_node(node, options, &mut out);
    out
}

/// Render a single tag node: a doctype declaration, a self-closing element
/// (`<br />`), or an element wrapping its rendered body.
pub fn render_tag(tag: &Tag, options: &CompileOptions) -> String {
    let mut out = String::new();
    write_tag(tag, options, &mut out);
    out
}

/// Format attributes as ` key="value"` pairs. Returns the empty string, not
/// a lone space, when there are none.
pub fn format_attributes(attributes: &[Attribute], options: &CompileOptions) -> String {
    let mut out = String::new();
    write_attributes(attributes, options, &mut out);
    out
}

fn write_node(node: &Node, options: &CompileOptions, out: &mut String) {
    match node {
        Node::Empty => {}
        Node::Text(text) => write_text(text, options, out),
        Node::Sequence(nodes) => {
            for node in nodes {
                write_node(node, options, out);
            }
        }
        Node::Tag(tag) => write_tag(tag, options, out),
    }
}

fn write_tag(tag: &Tag, options: &CompileOptions, out: &mut String) {
    match tag {
        Tag::Doctype { declaration } => {
            out.push_str("<!DOCTYPE ");
            out.push_str(declaration);
            out.push('>');
        }
        Tag::Element(el) => {
            tracing::trace!(tag = %el.name, attributes = el.attributes.len(), "rendering element");
            out.push('<');
            out.push_str(&el.name);
            write_attributes(&el.attributes, options, out);
            match &el.body {
                Some(body) => {
                    out.push('>');
                    write_node(body, options, out);
                    out.push_str("</");
                    out.push_str(&el.name);
                    out.push('>');
                }
                None => out.push_str(" />"),
            }
        }
    }
}

fn write_attributes(attributes: &[Attribute], options: &CompileOptions, out: &mut String) {
    for attr in attributes {
        out.push(' ');
        out.push_str(&attr.name);
        out.push_str("=\"");
        write_text(&attr.value, options, out);
        out.push('"');
    }
}

fn write_text(text: &str, options: &CompileOptions, out: &mut String) {
    if !options.escape {
        out.push_str(text);
        return;
    }
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}
