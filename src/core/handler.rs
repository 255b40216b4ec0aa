//! Password visibility toggle
//!
//! Binds a toggle control to a password input. Each activation flips the
//! input between `type="password"` and `type="text"` and assigns the
//! matching icon class on the control, removing the other one in the same
//! step so the two classes cannot drift apart.

use anyhow::{Result, anyhow};

use crate::core::config::ToggleSettings;
use crate::core::dom::{Document, ElementId};
use crate::core::page::{ClickListener, Page};
use crate::core::selector::Selector;
use crate::core::visibility::{IconClasses, Visibility};

#[derive(Debug, Clone)]
pub struct VisibilityToggle {
    control: ElementId,
    field: ElementId,
    icons: IconClasses,
}

impl VisibilityToggle {
    pub fn new(control: ElementId, field: ElementId, icons: IconClasses) -> Self {
        Self {
            control,
            field,
            icons,
        }
    }

    /// Resolves the control and the field in `document`.
    ///
    /// Fails if either selector matches nothing. Wiring never mutates the
    /// document.
    pub fn wire(document: &Document, settings: &ToggleSettings) -> Result<Self> {
        let icons = settings.icon_classes()?;
        let control = resolve(document, &settings.control_selector)?;
        let field = resolve(document, &settings.field_selector)?;
        Ok(Self::new(control, field, icons))
    }

    pub fn control(&self) -> ElementId {
        self.control
    }

    pub fn field(&self) -> ElementId {
        self.field
    }

    /// Current state, read from the field's `type` attribute
    pub fn visibility(&self, document: &Document) -> Result<Visibility> {
        let field = document
            .get(self.field)
            .ok_or_else(|| anyhow!("Password field is no longer in the document"))?;
        Ok(Visibility::from_input_type(field.attribute("type")))
    }

    /// Flips the field between masked and revealed and returns the new state.
    pub fn activate(&mut self, document: &mut Document) -> Result<Visibility> {
        let current = self.visibility(document)?;
        let next = current.toggled();
        self.apply(document, next)?;
        tracing::debug!(from = %current, to = %next, "password visibility toggled");
        Ok(next)
    }

    /// Writes the full attribute and class set for `state`.
    pub fn apply(&self, document: &mut Document, state: Visibility) -> Result<()> {
        // Check both handles before touching either element
        if document.get(self.control).is_none() {
            return Err(anyhow!("Toggle control is no longer in the document"));
        }
        let field = document
            .get_mut(self.field)
            .ok_or_else(|| anyhow!("Password field is no longer in the document"))?;
        field.set_attribute("type", state.input_type());

        if let Some(control) = document.get_mut(self.control) {
            control.remove_class(state.inactive_icon_class(&self.icons));
            control.add_class(state.icon_class(&self.icons));
        }
        Ok(())
    }
}

impl ClickListener for VisibilityToggle {
    fn on_click(&mut self, document: &mut Document) -> Result<()> {
        self.activate(document).map(|_| ())
    }
}

fn resolve(document: &Document, selector: &str) -> Result<ElementId> {
    let parsed: Selector = selector.parse()?;
    let matches = document.query_selector_all(&parsed);
    match matches.as_slice() {
        [] => {
            tracing::warn!(selector, "toggle wiring failed: no matching element");
            Err(anyhow!("No element matches '{}'", selector))
        }
        [only] => Ok(*only),
        [first, ..] => {
            tracing::warn!(
                selector,
                count = matches.len(),
                "several elements match, binding the first"
            );
            Ok(*first)
        }
    }
}

/// Wires the toggle and attaches it as a click listener on the control.
///
/// Nothing is attached when wiring fails. Returns the control, which is the
/// click target.
pub fn install(page: &mut Page, settings: &ToggleSettings) -> Result<ElementId> {
    let toggle = VisibilityToggle::wire(page.document(), settings)?;
    let control = toggle.control();
    page.add_click_listener(control, Box::new(toggle));
    tracing::info!(
        control = %settings.control_selector,
        field = %settings.field_selector,
        "password toggle installed"
    );
    Ok(control)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dom::Element;

    fn field_type(page: &Page) -> Option<String> {
        page.document()
            .select(r#"input[name="password"]"#)
            .unwrap()
            .and_then(|id| page.document().get(id))
            .and_then(|el| el.attribute("type"))
            .map(str::to_string)
    }

    fn icon_classes(page: &Page, control: ElementId) -> Vec<String> {
        page.document()
            .get(control)
            .unwrap()
            .classes
            .iter()
            .filter(|c| c.starts_with("bi-"))
            .cloned()
            .collect()
    }

    fn login_page() -> (Page, ElementId) {
        let mut page = Page::new(Document::login_form());
        let control = install(&mut page, &ToggleSettings::default()).unwrap();
        (page, control)
    }

    // ========================
    // Scenario tests
    // ========================

    #[test]
    fn test_first_click_reveals() {
        let (mut page, control) = login_page();
        assert_eq!(field_type(&page).as_deref(), Some("password"));
        assert_eq!(icon_classes(&page, control), vec!["bi-eye-slash"]);

        page.click(control).unwrap();

        assert_eq!(field_type(&page).as_deref(), Some("text"));
        assert_eq!(icon_classes(&page, control), vec!["bi-eye"]);
    }

    #[test]
    fn test_second_click_masks_again() {
        let (mut page, control) = login_page();

        page.click(control).unwrap();
        page.click(control).unwrap();

        assert_eq!(field_type(&page).as_deref(), Some("password"));
        assert_eq!(icon_classes(&page, control), vec!["bi-eye-slash"]);
    }

    #[test]
    fn test_missing_field_attaches_nothing() {
        let mut doc = Document::new();
        doc.append(
            Element::new("i")
                .with_attribute("id", "togglePassword")
                .with_class("bi-eye-slash"),
        );
        let mut page = Page::new(doc);

        let err = install(&mut page, &ToggleSettings::default()).unwrap_err();

        assert!(err.to_string().contains(r#"input[name="password"]"#));
        assert_eq!(page.listener_count(), 0);
    }

    #[test]
    fn test_missing_control_attaches_nothing() {
        let mut doc = Document::new();
        doc.append(
            Element::new("input")
                .with_attribute("name", "password")
                .with_attribute("type", "password"),
        );
        let before = doc.clone();
        let mut page = Page::new(doc);

        let err = install(&mut page, &ToggleSettings::default()).unwrap_err();

        assert!(err.to_string().contains("#togglePassword"));
        assert_eq!(page.listener_count(), 0);
        assert_eq!(page.document(), &before);
    }

    // ========================
    // Property tests
    // ========================

    #[test]
    fn test_parity_of_clicks() {
        for n in 0..12 {
            let (mut page, control) = login_page();
            for _ in 0..n {
                page.click(control).unwrap();
            }

            let expected = if n % 2 == 0 { "password" } else { "text" };
            assert_eq!(field_type(&page).as_deref(), Some(expected), "after {} clicks", n);
        }
    }

    #[test]
    fn test_exactly_one_icon_class_at_all_times() {
        let (mut page, control) = login_page();

        for _ in 0..7 {
            let classes = icon_classes(&page, control);
            assert_eq!(classes.len(), 1, "classes: {:?}", classes);
            page.click(control).unwrap();
        }
    }

    #[test]
    fn test_two_activations_restore_state() {
        let (mut page, control) = login_page();
        page.click(control).unwrap();
        let snapshot = page.document().clone();

        page.click(control).unwrap();
        page.click(control).unwrap();

        assert_eq!(page.document(), &snapshot);
    }

    #[test]
    fn test_other_classes_untouched() {
        let (mut page, control) = login_page();

        page.click(control).unwrap();

        assert!(page.document().get(control).unwrap().has_class("bi"));
    }

    // ========================
    // Direct handler tests
    // ========================

    #[test]
    fn test_activate_returns_new_state() {
        let mut doc = Document::login_form();
        let mut toggle = VisibilityToggle::wire(&doc, &ToggleSettings::default()).unwrap();

        assert_eq!(toggle.visibility(&doc).unwrap(), Visibility::Masked);
        assert_eq!(toggle.activate(&mut doc).unwrap(), Visibility::Revealed);
        assert_eq!(toggle.activate(&mut doc).unwrap(), Visibility::Masked);
    }

    #[test]
    fn test_desynced_classes_are_repaired() {
        let mut doc = Document::new();
        let control = doc.append(
            Element::new("i")
                .with_class("bi-eye")
                .with_class("bi-eye-slash"),
        );
        let field = doc.append(Element::new("input").with_attribute("type", "password"));
        let mut toggle = VisibilityToggle::new(control, field, IconClasses::default());

        toggle.activate(&mut doc).unwrap();

        assert_eq!(doc.get(control).unwrap().classes, vec!["bi-eye"]);
    }

    #[test]
    fn test_missing_type_attribute_masks_on_first_click() {
        let mut doc = Document::new();
        let control = doc.append(Element::new("i").with_class("bi-eye"));
        let field = doc.append(Element::new("input"));
        let mut toggle = VisibilityToggle::new(control, field, IconClasses::default());

        assert_eq!(toggle.activate(&mut doc).unwrap(), Visibility::Masked);
        assert_eq!(doc.get(field).unwrap().attribute("type"), Some("password"));
        assert_eq!(doc.get(control).unwrap().classes, vec!["bi-eye-slash"]);
    }

    #[test]
    fn test_multiple_matches_bind_first() {
        let mut doc = Document::login_form();
        let decoy = doc.append(
            Element::new("input")
                .with_attribute("name", "password")
                .with_attribute("type", "password"),
        );
        let mut toggle = VisibilityToggle::wire(&doc, &ToggleSettings::default()).unwrap();

        toggle.activate(&mut doc).unwrap();

        assert_ne!(toggle.field(), decoy);
        assert_eq!(doc.get(decoy).unwrap().attribute("type"), Some("password"));
    }

    #[test]
    fn test_stale_handles_error() {
        let doc = Document::login_form();
        let toggle = VisibilityToggle::wire(&doc, &ToggleSettings::default()).unwrap();
        let mut empty = Document::new();

        let mut stale = toggle.clone();
        assert!(stale.activate(&mut empty).is_err());
        assert!(empty.is_empty());
    }

    #[test]
    fn test_custom_icon_classes() {
        let settings = ToggleSettings {
            revealed_class: "fa-eye".into(),
            masked_class: "fa-eye-slash".into(),
            ..Default::default()
        };
        let mut doc = Document::login_form();
        let mut toggle = VisibilityToggle::wire(&doc, &settings).unwrap();

        toggle.activate(&mut doc).unwrap();

        let control = doc.get(toggle.control()).unwrap();
        assert!(control.has_class("fa-eye"));
        assert!(!control.has_class("fa-eye-slash"));
    }

    #[test]
    fn test_identical_icon_classes_attach_nothing() {
        let settings = ToggleSettings {
            revealed_class: "bi-eye".into(),
            masked_class: "bi-eye".into(),
            ..Default::default()
        };
        let mut page = Page::new(Document::login_form());

        assert!(install(&mut page, &settings).is_err());
        assert_eq!(page.listener_count(), 0);
    }

    #[test]
    fn test_empty_icon_class_rejected() {
        let settings = ToggleSettings {
            revealed_class: String::new(),
            ..Default::default()
        };

        let err = VisibilityToggle::wire(&Document::login_form(), &settings).unwrap_err();
        assert!(err.to_string().contains("revealed_class"));
    }

    #[test]
    fn test_invalid_selector_errors() {
        let settings = ToggleSettings {
            control_selector: "#".into(),
            ..Default::default()
        };

        assert!(VisibilityToggle::wire(&Document::login_form(), &settings).is_err());
    }
}
