//! Minimal CSS selector support for element lookups
//!
//! Supports the forms the toggle needs:
//! - `#id`
//! - `tag`
//! - `tag[attr="value"]`, `[attr='value']`, `[attr=value]`
//! - `tag[attr]` (presence only)

use anyhow::{Result, bail};
use std::fmt;
use std::str::FromStr;

use crate::core::dom::Element;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeMatch {
    pub name: String,
    /// `None` matches on presence alone
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub attribute: Option<AttributeMatch>,
}

impl Selector {
    pub fn id(id: &str) -> Self {
        Self {
            tag: None,
            id: Some(id.to_string()),
            attribute: None,
        }
    }

    pub fn matches(&self, element: &Element) -> bool {
        if let Some(ref tag) = self.tag
            && !element.tag.eq_ignore_ascii_case(tag)
        {
            return false;
        }

        if let Some(ref id) = self.id
            && element.attribute("id") != Some(id.as_str())
        {
            return false;
        }

        match self.attribute {
            Some(AttributeMatch { ref name, value: Some(ref value) }) => {
                element.attribute(name) == Some(value.as_str())
            }
            Some(AttributeMatch { ref name, value: None }) => element.attribute(name).is_some(),
            None => true,
        }
    }
}

fn is_ident(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn unquote(raw: &str) -> Option<&str> {
    let raw = raw.trim();
    for quote in ['"', '\''] {
        if raw.starts_with(quote) {
            return (raw.len() >= 2 && raw.ends_with(quote)).then(|| &raw[1..raw.len() - 1]);
        }
    }
    // Bare values must be a single identifier
    is_ident(raw).then_some(raw)
}

impl FromStr for Selector {
    type Err = anyhow::Error;

    fn from_str(input: &str) -> Result<Self> {
        let s = input.trim();
        if s.is_empty() {
            bail!("Empty selector");
        }

        if let Some(id) = s.strip_prefix('#') {
            if !is_ident(id) {
                bail!("Invalid id selector '{}'", input);
            }
            return Ok(Selector::id(id));
        }

        let (tag_part, attribute) = match s.split_once('[') {
            Some((tag_part, rest)) => {
                let Some(inner) = rest.strip_suffix(']') else {
                    bail!("Unterminated attribute selector '{}'", input);
                };
                if inner.contains('[') || inner.contains(']') {
                    bail!("Only one attribute selector is supported: '{}'", input);
                }
                let attribute = match inner.split_once('=') {
                    Some((name, raw_value)) => {
                        let name = name.trim();
                        let Some(value) = unquote(raw_value) else {
                            bail!("Invalid attribute value in selector '{}'", input);
                        };
                        AttributeMatch {
                            name: name.to_string(),
                            value: Some(value.to_string()),
                        }
                    }
                    None => AttributeMatch {
                        name: inner.trim().to_string(),
                        value: None,
                    },
                };
                if !is_ident(&attribute.name) {
                    bail!("Invalid attribute name in selector '{}'", input);
                }
                (tag_part, Some(attribute))
            }
            None => (s, None),
        };

        let tag = if tag_part.is_empty() {
            None
        } else if is_ident(tag_part) {
            Some(tag_part.to_ascii_lowercase())
        } else {
            bail!("Invalid tag in selector '{}'", input);
        };

        Ok(Selector {
            tag,
            id: None,
            attribute,
        })
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref tag) = self.tag {
            write!(f, "{}", tag)?;
        }
        if let Some(ref id) = self.id {
            write!(f, "#{}", id)?;
        }
        match self.attribute {
            Some(AttributeMatch { ref name, value: Some(ref value) }) => {
                write!(f, "[{}=\"{}\"]", name, value)
            }
            Some(AttributeMatch { ref name, value: None }) => write!(f, "[{}]", name),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================
    // Parsing tests
    // ========================

    #[test]
    fn test_parse_id() {
        let selector: Selector = "#togglePassword".parse().unwrap();
        assert_eq!(selector, Selector::id("togglePassword"));
    }

    #[test]
    fn test_parse_tag_with_attribute() {
        let selector: Selector = r#"input[name="password"]"#.parse().unwrap();

        assert_eq!(selector.tag.as_deref(), Some("input"));
        assert_eq!(
            selector.attribute,
            Some(AttributeMatch {
                name: "name".into(),
                value: Some("password".into())
            })
        );
    }

    #[test]
    fn test_parse_quote_styles() {
        let double: Selector = r#"[name="password"]"#.parse().unwrap();
        let single: Selector = "[name='password']".parse().unwrap();
        let bare: Selector = "[name=password]".parse().unwrap();

        assert_eq!(double, single);
        assert_eq!(double, bare);
        assert!(double.tag.is_none());
    }

    #[test]
    fn test_parse_presence_and_tag_only() {
        let presence: Selector = "input[required]".parse().unwrap();
        assert_eq!(presence.attribute.unwrap().value, None);

        let tag: Selector = "INPUT".parse().unwrap();
        assert_eq!(tag.tag.as_deref(), Some("input"));
    }

    #[test]
    fn test_parse_errors() {
        for bad in ["", "   ", "#", "# x", "input[name=\"password\"", "input[]", "[name=\"x]", "in put", "a[b][c]"] {
            assert!(bad.parse::<Selector>().is_err(), "'{}' should not parse", bad);
        }
    }

    #[test]
    fn test_display_is_canonical() {
        let selector: Selector = "input[name='password']".parse().unwrap();
        assert_eq!(selector.to_string(), r#"input[name="password"]"#);
        assert_eq!(Selector::id("togglePassword").to_string(), "#togglePassword");
    }

    // ========================
    // Matching tests
    // ========================

    #[test]
    fn test_matches() {
        let field = Element::new("input")
            .with_attribute("name", "password")
            .with_attribute("type", "password");
        let control = Element::new("i").with_attribute("id", "togglePassword");

        let by_name: Selector = r#"input[name="password"]"#.parse().unwrap();
        let by_id: Selector = "#togglePassword".parse().unwrap();

        assert!(by_name.matches(&field));
        assert!(!by_name.matches(&control));
        assert!(by_id.matches(&control));
        assert!(!by_id.matches(&field));
    }

    #[test]
    fn test_tag_mismatch_rejects() {
        let textarea = Element::new("textarea").with_attribute("name", "password");
        let selector: Selector = r#"input[name="password"]"#.parse().unwrap();

        assert!(!selector.matches(&textarea));
    }
}
