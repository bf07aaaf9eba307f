//! A button that opens a popup menu.

use serde::Deserialize;
use styled_elements_core::Document;

use super::button::{ButtonOptions, StyledButton};
use super::popup_menu::{PopupMenu, PopupMenuOptions};
use crate::widget::base::ElementBase;
use crate::widget::{NativeEvent, NativeEventKind, StyledElement};

/// Options for [`PopupButton`]: the button options plus the menu options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PopupButtonOptions {
    #[serde(flatten)]
    pub button: ButtonOptions,
    pub menu: PopupMenuOptions,
}

impl PopupButtonOptions {
    pub fn new(button: ButtonOptions) -> Self {
        Self {
            button,
            menu: PopupMenuOptions::default(),
        }
    }

    pub fn with_menu(mut self, menu: PopupMenuOptions) -> Self {
        self.menu = menu;
        self
    }
}

/// A button owning a [`PopupMenu`]. Clicking the enabled button toggles the
/// menu below it.
pub struct PopupButton<C: 'static> {
    button: StyledButton,
    menu: PopupMenu<C>,
}

impl<C: Send + Sync + 'static> PopupButton<C> {
    pub fn new(document: &Document, options: PopupButtonOptions) -> Self {
        Self {
            button: StyledButton::new(document, options.button),
            menu: PopupMenu::new(document, options.menu),
        }
    }

    pub fn button(&self) -> &StyledButton {
        &self.button
    }

    pub fn popup_menu(&self) -> &PopupMenu<C> {
        &self.menu
    }

    pub fn popup_menu_mut(&mut self) -> &mut PopupMenu<C> {
        &mut self.menu
    }

    /// Open the menu below the button, or close it when open.
    pub fn toggle_menu(&mut self) {
        if self.menu.is_visible() {
            self.menu.hide();
        } else {
            let reference = self.button.bounding_client_rect();
            self.menu.show(reference);
        }
    }
}

impl<C: Send + Sync + 'static> StyledElement for PopupButton<C> {
    fn base(&self) -> &ElementBase {
        self.button.base()
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        self.button.base_mut()
    }

    fn set_disabled(&mut self, disabled: bool) {
        if disabled {
            self.menu.hide();
        }
        self.button.set_disabled(disabled);
    }

    fn handle_event(&mut self, event: &NativeEvent) -> bool {
        if self.menu.handle_event(event) {
            return true;
        }
        if event.kind == NativeEventKind::Click && event.is_within(self.document(), self.wrapper()) {
            if self.is_enabled() {
                self.button.click();
                self.toggle_menu();
            }
            return true;
        }
        false
    }

    fn destroy(&mut self) {
        self.menu.destroy();
        self.button.destroy();
    }
}
