use std::fmt;
use std::sync::Arc;
use serde::Serialize;
use crate::icons::{Icon, IconResource, LazyIcon, ResourceLoader};

/// Names one application and the entry point inside it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ComponentName {
    pub package: String,
    pub activity: String,
}

impl ComponentName {
    pub fn new(package: impl Into<String>, activity: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            activity: activity.into(),
        }
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.package, self.activity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    View,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Intent {
    pub action: Action,
    pub uri: String,
    /// Pins the receiving application. `None` lets the system opener pick.
    pub component: Option<ComponentName>,
}

impl Intent {
    pub fn view(uri: impl Into<String>) -> Self {
        Self {
            action: Action::View,
            uri: uri.into(),
            component: None,
        }
    }

    pub fn with_component(mut self, component: ComponentName) -> Self {
        self.component = Some(component);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Target {
    Command { command: String, terminal: bool },
    Intent(Intent),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    App,
    WebSearch,
    MapsNavigation,
    MapsNearby,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntryKind::App => "app",
            EntryKind::WebSearch => "web",
            EntryKind::MapsNavigation => "navigation",
            EntryKind::MapsNearby => "nearby",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone)]
pub enum IconSource {
    None,
    /// Loaded through the resource loader on every request.
    Resource(IconResource),
    /// Loaded on first request, then cached for the entry's lifetime.
    Lazy(Arc<LazyIcon>),
}

#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    id: String,
    label: String,
    kind: EntryKind,
    target: Target,
    #[serde(skip)]
    icon: IconSource,
    #[serde(skip)]
    pub(crate) score: i64,
}

impl Entry {
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: EntryKind, target: Target) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            target,
            icon: IconSource::None,
            score: 0,
        }
    }

    pub fn with_icon(mut self, icon: IconSource) -> Self {
        self.icon = icon;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn icon_source(&self) -> &IconSource {
        &self.icon
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn icon(&self, loader: &dyn ResourceLoader, size: u32) -> Option<Icon> {
        match &self.icon {
            IconSource::None => None,
            IconSource::Resource(resource) => loader.load(resource, size),
            IconSource::Lazy(cell) => cell.get_or_load(loader, size),
        }
    }
}
