//! Click dispatch for a document
//!
//! A [`Page`] pairs a [`Document`] with the click listeners attached to its
//! elements. Dispatch is synchronous: every listener runs to completion
//! before `click` returns.

use anyhow::Result;

use crate::core::dom::{Document, ElementId};

pub trait ClickListener {
    fn on_click(&mut self, document: &mut Document) -> Result<()>;
}

pub struct Page {
    document: Document,
    listeners: Vec<(ElementId, Box<dyn ClickListener>)>,
}

impl Page {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            listeners: Vec::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn add_click_listener(&mut self, target: ElementId, listener: Box<dyn ClickListener>) {
        self.listeners.push((target, listener));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Dispatches a click on `target`.
    /// Listeners fire in registration order; returns how many fired.
    pub fn click(&mut self, target: ElementId) -> Result<usize> {
        let mut fired = 0;
        for (element, listener) in self.listeners.iter_mut() {
            if *element == target {
                listener.on_click(&mut self.document)?;
                fired += 1;
            }
        }
        tracing::trace!(element = target.index(), fired, "click dispatched");
        Ok(fired)
    }
}
