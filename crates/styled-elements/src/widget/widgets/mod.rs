//! Standard widgets for StyledElements.
//!
//! This module provides the concrete widgets:
//!
//! - Containers: [`Container`], [`StyledAlternatives`], [`Panel`], [`StyledHPaned`], [`StyledNotebook`]
//! - Buttons: [`StyledButton`], [`ButtonsGroup`], [`PopupButton`]
//! - Inputs: [`StyledTextArea`], [`StyledHiddenField`], [`StyledNumericField`], [`StyledDateField`],
//!   [`StyledCheckBox`], [`StyledRadioButton`], [`StyledList`]
//! - Menus: [`MenuItem`], [`PopupMenu`], [`SubMenuItem`]
//! - Overlays: [`StyledAlert`], [`Tooltip`]
//! - [`PaginationInterface`]: controls driving a [`Pagination`]

mod alert;
mod alternatives;
mod button;
mod button_group;
mod checkbox;
mod container;
mod date_field;
mod hidden_field;
mod hpaned;
mod menu;
mod notebook;
mod numeric_field;
mod pagination;
mod panel;
mod popup_button;
mod popup_menu;
mod radio_button;
mod separator;
mod styled_list;
mod text_area;
mod tooltip;

pub use alert::{ALERT_EVENTS, AlertContent, AlertGeometry, AlertKind, AlertOptions, StyledAlert};
pub use alternatives::{ALTERNATIVE_EVENTS, Alternative, StyledAlternatives};
pub use button::{BUTTON_EVENTS, ButtonOptions, StyledButton};
pub use button_group::{BUTTONS_GROUP_EVENTS, ButtonKind, ButtonsGroup, GroupButton};
pub use checkbox::{CheckBoxOptions, StyledCheckBox, TOGGLE_EVENTS};
pub use container::{Container, ContainerOptions, DISABLE_LAYER_CLASS};
pub use date_field::{DATE_FIELD_EVENTS, DateFieldOptions, StyledDateField};
pub use hidden_field::{HiddenFieldOptions, StyledHiddenField};
pub use hpaned::{HPanedOptions, PanedGeometry, StyledHPaned};
pub use menu::{DynamicMenuItems, HOVERED_CLASS, MENU_ITEM_EVENTS, MenuEntry, MenuEvent, MenuHandler, MenuItem};
pub use notebook::{NOTEBOOK_EVENTS, NotebookChange, NotebookOptions, StyledNotebook, TAB_EVENTS, Tab, TabOptions};
pub use numeric_field::{NUMERIC_FIELD_EVENTS, NumericFieldOptions, StyledNumericField};
pub use pagination::{
    DEFAULT_LAYOUT, LayoutToken, Pagination, PaginationElement, PaginationInterface, PaginationOptions,
    parse_layout,
};
pub use panel::{ACTIVE_CLASS, Panel, PanelOptions};
pub use popup_button::{PopupButton, PopupButtonOptions};
pub use popup_menu::{
    MenuPosition, POPUP_MENU_EVENTS, PopupMenu, PopupMenuBase, PopupMenuOptions, RefPosition, SubMenuItem,
};
pub use radio_button::{RadioButtonOptions, StyledRadioButton};
pub use separator::Separator;
pub use styled_list::{LIST_EVENTS, ListChange, ListEntry, ListOptions, ListValue, SELECTED_CLASS, StyledList};
pub use text_area::{StyledTextArea, TEXT_AREA_EVENTS, TextAreaOptions};
pub use tooltip::{Tooltip, TooltipOptions, TooltipPlacement};
