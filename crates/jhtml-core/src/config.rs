use serde::Deserialize;

/// Sentinel tag name rendered as a `<!DOCTYPE ...>` declaration.
pub const DOCTYPE_SENTINEL: &str = "doctype";

/// Declaration used when a doctype node has no body.
pub const DEFAULT_DOCTYPE: &str = "html";

/// Prefix written before the output when [`CompileOptions::doctype`] is set.
pub const DOCTYPE_PREFIX: &str = "<!DOCTYPE html>";

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct CompileOptions {
    /// Unconditionally prepend `<!DOCTYPE html>`. Combining this with a
    /// `doctype` node in the tree yields two declarations.
    #[serde(default)]
    pub doctype: bool,
    /// Escape `& < > " '` in text nodes and attribute values. Off by default:
    /// unescaped output must not be fed untrusted input.
    #[serde(default)]
    pub escape: bool,
}

impl CompileOptions {
    pub fn from_toml(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }
}

/// Which fields of a tag node carry its structure. Everything else on the
/// node is an attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldNames {
    /// Tag-name candidates, tried in order; the first truthy one wins.
    pub tag: &'static [&'static str],
    pub body: &'static str,
}

impl FieldNames {
    /// `$` (or `elem`) names the tag, `body` holds the content, remaining
    /// sibling fields are attributes.
    pub const SIBLINGS: FieldNames = FieldNames {
        tag: &["$", "elem"],
        body: "body",
    };

    pub fn is_reserved(&self, key: &str) -> bool {
        key == self.body || self.tag.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_unescaped_without_prefix() {
        let options = CompileOptions::default();
        assert!(!options.doctype);
        assert!(!options.escape);
    }

    #[test]
    fn test_parse_fixture_options() {
        let toml_str = std::fs::read_to_string("tests/fixtures/escaped.toml").unwrap();
        let options = CompileOptions::from_toml(&toml_str).unwrap();
        assert!(options.escape);
        assert!(!options.doctype);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let options = CompileOptions::from_toml("").unwrap();
        assert_eq!(options, CompileOptions::default());
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        assert!(CompileOptions::from_toml("doctype = \"yes\"").is_err());
    }

    #[test]
    fn test_reserved_fields() {
        let fields = FieldNames::SIBLINGS;
        assert!(fields.is_reserved("$"));
        assert!(fields.is_reserved("elem"));
        assert!(fields.is_reserved("body"));
        assert!(!fields.is_reserved("class"));
        assert!(!fields.is_reserved("Body"));
    }
}
