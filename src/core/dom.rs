//! In-memory document model
//!
//! Holds the elements the toggle reads and mutates. Elements are owned by
//! the [`Document`] and addressed through stable [`ElementId`] handles;
//! nothing is ever removed, so a handle stays valid for the document's
//! lifetime.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::core::selector::Selector;
use crate::core::visibility::{ICON_EYE_SLASH, INPUT_TYPE_PASSWORD, INPUT_TYPE_TEXT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

impl ElementId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub tag: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Class list, in insertion order, without duplicates
    #[serde(default)]
    pub classes: Vec<String>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Adds the class if absent, removes it if present.
    /// Returns whether the class is present afterwards.
    pub fn toggle_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            self.remove_class(class);
            false
        } else {
            self.classes.push(class.to_string());
            true
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// The sign-in page the toggle ships with: a username input, a masked
    /// password input and the eye-slash toggle control.
    pub fn login_form() -> Self {
        let mut doc = Self::new();
        doc.append(
            Element::new("input")
                .with_attribute("type", INPUT_TYPE_TEXT)
                .with_attribute("name", "username")
                .with_attribute("placeholder", "username")
                .with_class("form-control"),
        );
        doc.append(
            Element::new("input")
                .with_attribute("type", INPUT_TYPE_PASSWORD)
                .with_attribute("name", "password")
                .with_attribute("placeholder", "passw")
                .with_class("form-control"),
        );
        doc.append(
            Element::new("i")
                .with_attribute("id", "togglePassword")
                .with_class("bi")
                .with_class(ICON_EYE_SLASH),
        );
        doc
    }

    pub fn append(&mut self, element: Element) -> ElementId {
        self.elements.push(element);
        ElementId(self.elements.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.0)
    }

    /// First element matching the selector, in document order
    pub fn query_selector(&self, selector: &Selector) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|el| selector.matches(el))
            .map(ElementId)
    }

    pub fn query_selector_all(&self, selector: &Selector) -> Vec<ElementId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, el)| selector.matches(el))
            .map(|(i, _)| ElementId(i))
            .collect()
    }

    /// Convenience lookup taking the selector as text
    pub fn select(&self, selector: &str) -> Result<Option<ElementId>> {
        let selector: Selector = selector.parse()?;
        Ok(self.query_selector(&selector))
    }

    /// Loads a document from a JSON page fixture
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read page {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("Invalid page {}", path.display()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
