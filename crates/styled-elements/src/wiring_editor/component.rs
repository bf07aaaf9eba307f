//! The wiring editor panel representing one operator or widget.

use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};
use serde::Deserialize;
use styled_elements_core::{Document, EventTable, ListenerId, NodeGuard, NodeId, ObjectWithEvents};

use crate::logging::targets;
use crate::widget::base::ElementBase;
use crate::widget::widgets::{
    ButtonOptions, MenuEntry, MenuItem, Panel, PanelOptions, PopupButton, PopupButtonOptions, Tooltip,
    TooltipOptions, TooltipPlacement,
};
use crate::widget::{NativeEvent, StyledElement};

/// Events a [`WiringComponent`] must declare.
pub const WIRING_COMPONENT_EVENTS: &[&str] = &["title_changed", "upgraded"];

/// Notification sent by a [`WiringComponent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentNotice {
    /// The component was renamed (`title_changed`).
    TitleChanged(String),
    /// The component was replaced by another version (`upgraded`).
    Upgraded,
}

/// Descriptive data of a wiring component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComponentMeta {
    /// `"widget"` or `"operator"`.
    #[serde(rename = "type")]
    pub kind: String,
    pub version: String,
    pub preference_list: Vec<String>,
}

/// The operator or widget a [`Component`] stands for.
///
/// Implementations dispatch [`ComponentNotice::TitleChanged`] on
/// `title_changed` and [`ComponentNotice::Upgraded`] on `upgraded`.
pub trait WiringComponent: ObjectWithEvents<Args = ComponentNotice> + Send + Sync {
    fn id(&self) -> String;
    fn title(&self) -> String;
    fn meta(&self) -> ComponentMeta;
    fn is_volatile(&self) -> bool;
    fn is_missing(&self) -> bool;
    fn has_endpoints(&self) -> bool;
    fn show_logs(&self);
    fn show_settings(&self);
}

/// Status shown next to the component title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentStatus {
    Volatile,
    Missing,
    InUse,
    NoEndpoints,
}

impl ComponentStatus {
    pub fn text(self) -> &'static str {
        match self {
            ComponentStatus::Volatile => "volatile",
            ComponentStatus::Missing => "missing",
            ComponentStatus::InUse => "in use",
            ComponentStatus::NoEndpoints => "no endpoints",
        }
    }

    pub fn label_class(self) -> &'static str {
        match self {
            ComponentStatus::Volatile => "label-info",
            ComponentStatus::Missing => "label-danger",
            ComponentStatus::InUse => "label-success",
            ComponentStatus::NoEndpoints => "label-warning",
        }
    }

    /// The status to display, in priority order.
    pub fn of<W: WiringComponent>(component: &W, used: bool) -> Option<Self> {
        if component.is_volatile() {
            Some(ComponentStatus::Volatile)
        } else if component.is_missing() {
            Some(ComponentStatus::Missing)
        } else if used {
            Some(ComponentStatus::InUse)
        } else if !component.has_endpoints() {
            Some(ComponentStatus::NoEndpoints)
        } else {
            None
        }
    }
}

/// A selectable panel showing a wiring component in the editor sidebar.
///
/// The panel can be dragged into the wiring only while enabled: a component
/// that is already used, volatile, missing or without endpoints is disabled.
///
/// Notifications from the wiring component are queued and applied by
/// [`process_notifications`](Self::process_notifications), which
/// [`handle_event`](StyledElement::handle_event) also calls.
pub struct Component<W: WiringComponent + 'static> {
    panel: Panel,
    prefs: PopupButton<()>,
    tooltip: Tooltip,
    label: NodeGuard,
    component: Arc<W>,
    id: String,
    kind: String,
    used: bool,
    notices: Receiver<ComponentNotice>,
    subscriptions: Vec<(&'static str, ListenerId)>,
}

impl<W: WiringComponent + 'static> Component<W> {
    pub fn new(document: &Document, component: Arc<W>) -> Self {
        let meta = component.meta();
        let title = component.title();
        let id = component.id();

        let tooltip = Tooltip::new(
            document,
            TooltipOptions::default().with_content(title.as_str()).with_placement(vec![
                TooltipPlacement::Top,
                TooltipPlacement::Bottom,
                TooltipPlacement::Right,
                TooltipPlacement::Left,
            ]),
        );

        let mut prefs = PopupButton::new(
            document,
            PopupButtonOptions::new(
                ButtonOptions::default()
                    .with_class("we-prefs-btn")
                    .with_title("Preferences")
                    .with_icon_class("icon-reorder"),
            ),
        );
        let source = Arc::clone(&component);
        prefs
            .popup_menu_mut()
            .append_dynamic(move |doc: &Document, _: Option<&()>| -> Vec<MenuEntry<()>> { preference_items(doc, &source) });

        let mut panel = Panel::new(
            document,
            PanelOptions::titled(title.as_str())
                .with_class(format!("we-component component-{}", meta.kind))
                .with_subtitle(format!("v{}", meta.version))
                .with_selectable(true)
                .with_no_body(true),
        );
        let _ = prefs.insert_into(panel.options_node(), None);
        document.add_class(panel.title_node(), "component-title text-truncate");
        document.add_class(panel.subtitle_node(), "component-version");
        document.set_attribute(panel.wrapper(), "data-id", &id);

        let (sender, notices) = crossbeam_channel::unbounded();
        let subscriptions = subscribe(component.as_ref(), &meta.kind, &sender);

        let mut view = Self {
            panel,
            prefs,
            tooltip,
            label: NodeGuard::element(document, "span", "label"),
            component,
            id,
            kind: meta.kind,
            used: false,
            notices,
            subscriptions,
        };
        view.tooltip.bind(view.panel.title_node());
        view.refresh();
        view
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// `"widget"` or `"operator"`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn wiring_component(&self) -> &Arc<W> {
        &self.component
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn prefs_button(&self) -> &PopupButton<()> {
        &self.prefs
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    pub fn is_used(&self) -> bool {
        self.used
    }

    /// Mark the component as placed in the wiring.
    pub fn set_used(&mut self, used: bool) {
        self.used = used;
        self.refresh();
    }

    pub fn has_settings(&self) -> bool {
        !self.component.meta().preference_list.is_empty()
    }

    pub fn show_logs(&self) -> &Self {
        self.component.show_logs();
        self
    }

    pub fn show_settings(&self) -> &Self {
        self.component.show_settings();
        self
    }

    pub fn title(&self) -> String {
        self.panel.title()
    }

    pub fn set_title(&mut self, title: &str) {
        self.panel.set_title(title);
        self.tooltip.set_content(title);
    }

    pub fn subtitle(&self) -> String {
        self.panel.subtitle()
    }

    pub fn status(&self) -> Option<ComponentStatus> {
        ComponentStatus::of(self.component.as_ref(), self.used)
    }

    /// The label node, attached to the heading while a status is shown.
    pub fn label(&self) -> NodeId {
        self.label.id()
    }

    /// Apply queued notifications. Returns how many were applied.
    pub fn process_notifications(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(notice) = self.notices.try_recv() {
            tracing::debug!(target: targets::WIDGET, component = %self.id, ?notice, "wiring component notice");
            match notice {
                ComponentNotice::TitleChanged(title) => self.set_title(&title),
                ComponentNotice::Upgraded => {
                    let title = self.component.title();
                    self.set_title(&title);
                    let version = self.component.meta().version;
                    self.panel.set_subtitle(&format!("v{version}"));
                    self.refresh();
                }
            }
            applied += 1;
        }
        applied
    }

    fn refresh(&mut self) {
        let status = self.status();
        let doc = self.panel.document().clone();
        let label = self.label.id();
        match status {
            Some(status) => {
                doc.set_text_content(label, status.text());
                doc.set_class_name(label, &format!("label {}", status.label_class()));
                let _ = doc.append_child(self.panel.heading(), label);
            }
            None => {
                let _ = doc.detach(label);
            }
        }
        self.panel.set_disabled(status.is_some());
    }
}

fn subscribe<W: WiringComponent>(
    component: &W,
    kind: &str,
    sender: &Sender<ComponentNotice>,
) -> Vec<(&'static str, ListenerId)> {
    let mut names = vec!["upgraded"];
    if kind == "widget" {
        names.push("title_changed");
    }
    names
        .into_iter()
        .filter_map(|name| {
            let sender = sender.clone();
            component
                .add_event_listener(name, move |notice: &ComponentNotice| {
                    let _ = sender.send(notice.clone());
                })
                .map(|id| (name, id))
                .map_err(|error| {
                    tracing::warn!(target: targets::WIDGET, event = name, %error, "wiring component does not declare event");
                })
                .ok()
        })
        .collect()
}

fn preference_items<W: WiringComponent + 'static>(document: &Document, component: &Arc<W>) -> Vec<MenuEntry<()>> {
    let logs_target = Arc::clone(component);
    let logs = MenuItem::with_handler(document, "Logs", move |_: Option<&()>| logs_target.show_logs());

    let settings_target = Arc::clone(component);
    let mut settings = MenuItem::with_handler(document, "Settings", move |_: Option<&()>| {
        settings_target.show_settings()
    });
    settings.set_disabled(component.meta().preference_list.is_empty());

    vec![logs.into(), settings.into()]
}

impl<W: WiringComponent + 'static> StyledElement for Component<W> {
    fn base(&self) -> &ElementBase {
        self.panel.base()
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        self.panel.base_mut()
    }

    fn handle_event(&mut self, event: &NativeEvent) -> bool {
        self.process_notifications();
        self.tooltip.handle_event(event);
        if self.prefs.handle_event(event) {
            return true;
        }
        self.panel.handle_event(event)
    }

    fn destroy(&mut self) {
        for (name, id) in self.subscriptions.drain(..) {
            let _ = self.component.remove_event_listener(name, id);
        }
        self.tooltip.hide();
        self.prefs.destroy();
        self.panel.destroy();
    }
}

/// Event table for [`WiringComponent`] implementations.
pub fn wiring_component_events() -> EventTable<ComponentNotice> {
    EventTable::new(WIRING_COMPONENT_EVENTS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    struct FakeComponent {
        title: Mutex<String>,
        meta: Mutex<ComponentMeta>,
        volatile: AtomicBool,
        endpoints: AtomicBool,
        logs: AtomicUsize,
        events: EventTable<ComponentNotice>,
    }

    impl FakeComponent {
        fn new(kind: &str) -> Arc<Self> {
            Arc::new(Self {
                title: Mutex::new("Map viewer".into()),
                meta: Mutex::new(ComponentMeta {
                    kind: kind.into(),
                    version: "1.0".into(),
                    preference_list: vec![],
                }),
                volatile: AtomicBool::new(false),
                endpoints: AtomicBool::new(true),
                logs: AtomicUsize::new(0),
                events: wiring_component_events(),
            })
        }
    }

    impl ObjectWithEvents for FakeComponent {
        type Args = ComponentNotice;

        fn events(&self) -> &EventTable<ComponentNotice> {
            &self.events
        }
    }

    impl WiringComponent for FakeComponent {
        fn id(&self) -> String {
            "42".into()
        }
        fn title(&self) -> String {
            self.title.lock().clone()
        }
        fn meta(&self) -> ComponentMeta {
            self.meta.lock().clone()
        }
        fn is_volatile(&self) -> bool {
            self.volatile.load(Ordering::SeqCst)
        }
        fn is_missing(&self) -> bool {
            false
        }
        fn has_endpoints(&self) -> bool {
            self.endpoints.load(Ordering::SeqCst)
        }
        fn show_logs(&self) {
            self.logs.fetch_add(1, Ordering::SeqCst);
        }
        fn show_settings(&self) {}
    }

    #[test]
    fn test_component_structure() {
        let doc = Document::headless();
        let view = Component::new(&doc, FakeComponent::new("widget"));
        let wrapper = view.wrapper();

        assert!(doc.has_class(wrapper, "we-component"));
        assert!(doc.has_class(wrapper, "component-widget"));
        assert!(doc.has_class(wrapper, "panel-selectable"));
        assert_eq!(doc.attribute(wrapper, "data-id").as_deref(), Some("42"));
        assert_eq!(view.title(), "Map viewer");
        assert_eq!(view.subtitle(), "v1.0");
        assert!(view.panel().body().is_none());
        assert!(doc.has_class(view.prefs_button().wrapper(), "we-prefs-btn"));
        assert!(view.tooltip().is_bound(view.panel().title_node()));
    }

    #[test]
    fn test_status_label_and_enablement() {
        let doc = Document::headless();
        let component = FakeComponent::new("operator");
        let mut view = Component::new(&doc, component.clone());
        assert_eq!(view.status(), None);
        assert!(view.is_enabled());
        assert!(!doc.is_attached(view.label()));

        view.set_used(true);
        assert_eq!(view.status(), Some(ComponentStatus::InUse));
        assert_eq!(doc.text_content(view.label()), "in use");
        assert!(doc.has_class(view.label(), "label-success"));
        assert!(!view.is_enabled());

        component.volatile.store(true, Ordering::SeqCst);
        view.set_used(false);
        assert_eq!(doc.text_content(view.label()), "volatile");
        assert!(doc.has_class(view.label(), "label-info"));

        component.volatile.store(false, Ordering::SeqCst);
        component.endpoints.store(false, Ordering::SeqCst);
        view.set_used(false);
        assert_eq!(view.status(), Some(ComponentStatus::NoEndpoints));
        assert!(!view.is_enabled());
    }

    #[test]
    fn test_title_changed_only_for_widgets() {
        let doc = Document::headless();
        let widget = FakeComponent::new("widget");
        let operator = FakeComponent::new("operator");
        let mut widget_view = Component::new(&doc, widget.clone());
        let _operator_view = Component::new(&doc, operator.clone());

        assert_eq!(operator.events.listener_count("title_changed").unwrap(), 0);

        widget
            .events
            .dispatch("title_changed", &ComponentNotice::TitleChanged("Renamed".into()))
            .unwrap();
        assert_eq!(widget_view.process_notifications(), 1);
        assert_eq!(widget_view.title(), "Renamed");
        assert_eq!(widget_view.tooltip().content(), "Renamed");
    }

    #[test]
    fn test_upgrade_refreshes_title_and_version() {
        let doc = Document::headless();
        let component = FakeComponent::new("operator");
        let mut view = Component::new(&doc, component.clone());

        *component.title.lock() = "Map viewer 2".into();
        component.meta.lock().version = "2.0".into();
        component.events.dispatch("upgraded", &ComponentNotice::Upgraded).unwrap();

        view.process_notifications();
        assert_eq!(view.title(), "Map viewer 2");
        assert_eq!(view.subtitle(), "v2.0");
    }

    #[test]
    fn test_prefs_menu_shows_logs() {
        let doc = Document::headless();
        let component = FakeComponent::new("widget");
        let mut view = Component::new(&doc, component.clone());
        view.insert_into(doc.body(), None).unwrap();

        let button = view.prefs_button().wrapper();
        assert!(view.handle_event(&NativeEvent::click(button)));
        let items = view.prefs_button().popup_menu().item_nodes();
        assert_eq!(items.len(), 2);
        assert!(doc.has_class(items[1], "disabled"));

        assert!(view.handle_event(&NativeEvent::click(items[0])));
        assert_eq!(component.logs.load(Ordering::SeqCst), 1);
        assert!(!view.prefs_button().popup_menu().is_visible());
    }

    #[test]
    fn test_destroy_unsubscribes() {
        let doc = Document::headless();
        let component = FakeComponent::new("widget");
        let mut view = Component::new(&doc, component.clone());
        assert_eq!(component.events.listener_count("upgraded").unwrap(), 1);

        view.destroy();
        assert_eq!(component.events.listener_count("upgraded").unwrap(), 0);
        assert_eq!(component.events.listener_count("title_changed").unwrap(), 0);
    }
}
