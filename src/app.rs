use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use zeroize::Zeroize;

use crate::core::config::Config;
use crate::core::dom::{Document, ElementId};
use crate::core::handler;
use crate::core::page::Page;
use crate::core::visibility::{IconClasses, Visibility};

/// Modal overlaid on the sign-in form
#[derive(Debug, PartialEq, Clone)]
pub enum Modal {
    None,
    /// Help with hotkey list
    Help,
}

/// Focusable parts of the form, in tab order
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Focus {
    Username,
    Password,
    Toggle,
}

pub struct App {
    pub should_quit: bool,
    pub modal: Modal,
    pub focus: Focus,
    pub username: String,
    pub password: String,
    pub mask_char: char,
    pub error_message: Option<String>,
    pub status_message: Option<String>,
    // The sign-in page with the toggle installed on its control
    page: Page,
    control: ElementId,
    field: ElementId,
    icons: IconClasses,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_document(Document::login_form(), config)
    }

    pub fn with_document(document: Document, config: &Config) -> Result<Self> {
        let mut page = Page::new(document);
        let control = handler::install(&mut page, &config.toggle)?;
        let field = page
            .document()
            .select(&config.toggle.field_selector)?
            .context("Password field not found")?;

        let mut app = Self {
            should_quit: false,
            modal: Modal::None,
            focus: Focus::Username,
            username: String::new(),
            password: String::new(),
            mask_char: config.ui.mask_char,
            error_message: None,
            status_message: None,
            page,
            control,
            field,
            icons: config.toggle.icon_classes()?,
        };

        if config.ui.start_revealed && app.visibility() == Visibility::Masked {
            app.page.click(app.control)?;
        }

        Ok(app)
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    #[cfg(test)]
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Current state, read back from the field's `type` attribute
    pub fn visibility(&self) -> Visibility {
        Visibility::from_input_type(self.field_type())
    }

    /// The field's `type` attribute as it stands in the document
    pub fn field_type(&self) -> Option<&str> {
        self.page
            .document()
            .get(self.field)
            .and_then(|el| el.attribute("type"))
    }

    /// Clicks the toggle control, exactly as a mouse click would
    pub fn toggle_visibility(&mut self) {
        match self.page.click(self.control) {
            Ok(_) => {
                let msg = match self.visibility() {
                    Visibility::Revealed => "👁 Password visible",
                    Visibility::Masked => "🔒 Password hidden",
                };
                self.set_status(msg.to_string());
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    /// Password text as the field would render it
    pub fn password_display(&self) -> String {
        match self.visibility() {
            Visibility::Masked => self
                .mask_char
                .to_string()
                .repeat(self.password.chars().count()),
            Visibility::Revealed => self.password.clone(),
        }
    }

    /// Glyph for the icon class currently on the control
    pub fn control_icon(&self) -> &'static str {
        let Some(control) = self.page.document().get(self.control) else {
            return "?";
        };
        if control.has_class(&self.icons.revealed) {
            "👁"
        } else if control.has_class(&self.icons.masked) {
            "🙈"
        } else {
            "?"
        }
    }

    pub fn control_classes(&self) -> String {
        self.page
            .document()
            .get(self.control)
            .map(|el| el.classes.join(" "))
            .unwrap_or_default()
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            Focus::Username => Focus::Password,
            Focus::Password => Focus::Toggle,
            Focus::Toggle => Focus::Username,
        };
    }

    pub fn focus_prev(&mut self) {
        self.focus = match self.focus {
            Focus::Username => Focus::Toggle,
            Focus::Password => Focus::Username,
            Focus::Toggle => Focus::Password,
        };
    }

    pub fn open_help_modal(&mut self) {
        self.modal = Modal::Help;
    }

    pub fn close_modal(&mut self) {
        self.modal = Modal::None;
    }

    /// Mouse click on a part of the form
    pub fn handle_click(&mut self, target: Focus) {
        if self.modal != Modal::None {
            return;
        }
        self.focus = target;
        if target == Focus::Toggle {
            self.toggle_visibility();
        }
    }

    pub fn handle_key(&mut self, key_code: KeyCode) {
        if self.modal == Modal::Help {
            match key_code {
                KeyCode::Esc | KeyCode::F(1) | KeyCode::Enter => self.close_modal(),
                _ => {}
            }
            return;
        }

        match key_code {
            KeyCode::Esc => self.quit(),
            KeyCode::F(1) => self.open_help_modal(),
            KeyCode::F(2) => self.toggle_visibility(),
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
            KeyCode::Char(c) => match self.focus {
                Focus::Username => self.username.push(c),
                Focus::Password => self.password.push(c),
                Focus::Toggle if c == ' ' => self.toggle_visibility(),
                Focus::Toggle => {}
            },
            KeyCode::Backspace => match self.focus {
                Focus::Username => {
                    self.username.pop();
                }
                Focus::Password => {
                    self.password.pop();
                }
                Focus::Toggle => {}
            },
            KeyCode::Enter => match self.focus {
                Focus::Username | Focus::Password => self.focus_next(),
                Focus::Toggle => self.toggle_visibility(),
            },
            _ => {}
        }
    }

    pub fn set_error(&mut self, msg: String) {
        self.error_message = Some(msg);
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Displays a temporary status message
    pub fn set_status(&mut self, msg: String) {
        self.status_message = Some(msg);
    }

    /// Clears the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}
