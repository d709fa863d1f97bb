//! Compile jHTML, a JSON5 tree of tag objects, into an HTML string.
//!
//! ```
//! let html = jhtml_core::compile(r#"{ $: "h1", body: "Hello World", class: "title" }"#).unwrap();
//! assert_eq!(html, r#"<h1 class="title">Hello World</h1>"#);
//! ```
//!
//! Text and attribute values are written unescaped unless
//! [`CompileOptions::escape`] is set. Never compile untrusted documents
//! without it.

pub mod ast;
pub mod coerce;
pub mod config;
pub mod parser;
pub mod render;
pub mod value;

pub use ast::{Attribute, Element, Node, Tag};
pub use config::CompileOptions;
pub use value::Value;

use config::DOCTYPE_PREFIX;

/// Parse and render `source` with default options.
pub fn compile(source: &str) -> Result<String, CompileError> {
    compile_with_options(source, &CompileOptions::default())
}

/// Full pipeline: parse JSON5, classify the value, render HTML.
pub fn compile_with_options(source: &str, options: &CompileOptions) -> Result<String, CompileError> {
    let value = parser::parse_source(source)?;
    to_html_with_options(&value, options)
}

/// Render an already parsed value with default options.
pub fn to_html(value: &Value) -> Result<String, CompileError> {
    to_html_with_options(value, &CompileOptions::default())
}

pub fn to_html_with_options(value: &Value, options: &CompileOptions) -> Result<String, CompileError> {
    let node = Node::classify(value)?;
    let body = render::render(&node, options);
    tracing::debug!(bytes = body.len(), doctype = options.doctype, "rendered html");
    if options.doctype {
        Ok(format!("{DOCTYPE_PREFIX}{body}"))
    } else {
        Ok(body)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// Malformed source, reported exactly as the JSON5 parser words it.
    #[error(transparent)]
    Syntax(#[from] json5::Error),
    #[error("tag node must have a `$` or `elem` field naming the tag: {node}")]
    MissingTagName { node: String },
}
