//! Shortcut entries built from the query itself: a web search and, when a
//! maps application is installed, navigation and nearby-search deep links.

use std::sync::Arc;
use log::{debug, error};
use crate::icons::{BundledIcon, IconResource, LazyIcon};
use crate::model::{ComponentName, Entry, EntryKind, IconSource, Intent, Target};
use crate::packages::PackageManager;
use crate::uri::{self, UriBuilder};

const MAPS_PACKAGE: &str = "com.google.android.apps.maps";
const MAPS_ACTIVITY: &str = "com.google.android.maps.MapsActivity";

pub fn maps_component() -> ComponentName {
    ComponentName::new(MAPS_PACKAGE, MAPS_ACTIVITY)
}

pub struct CustomLaunchables {
    /// Icon of the installed maps app. `None` disables the maps entries.
    maps_icon: Option<IconResource>,
}

impl CustomLaunchables {
    /// Probes the package manager for the maps app. Done once; the answer
    /// holds for the lifetime of the factory.
    pub fn new(packages: &dyn PackageManager) -> Self {
        let component = maps_component();
        let maps_icon = match packages.activity_info(&component) {
            Ok(info) => {
                match &info.icon {
                    Some(icon) => debug!("CustomLaunchables: maps is {} ({}), icon {:?}", info.label, info.desktop_id, icon),
                    None => debug!("CustomLaunchables: {} declares no icon, maps entries disabled", info.label),
                }
                info.icon
            }
            Err(e) => {
                error!("CustomLaunchables: couldn't get maps component: {}", e);
                None
            }
        };
        Self { maps_icon }
    }

    pub fn maps_available(&self) -> bool {
        self.maps_icon.is_some()
    }

    /// Web search first, then navigation and nearby when maps is installed.
    pub fn entries_for(&self, query: &str) -> Vec<Entry> {
        let mut entries = Vec::with_capacity(3);

        entries.push(web_search(query));
        if let Some(icon) = &self.maps_icon {
            entries.push(maps_navigation(query, icon));
            entries.push(maps_nearby(query, icon));
        }

        entries
    }
}

fn web_search(query: &str) -> Entry {
    let url = UriBuilder::new()
        .scheme("https")
        .authority("www.duckduckgo.com")
        .path("/")
        .append_query_parameter("q", query)
        .build();

    let icon = LazyIcon::new(IconResource::Bundled(BundledIcon::DuckDuckGo));
    Entry::new("custom:duckduckgo", "Duck Duck Go", EntryKind::WebSearch, Target::Intent(Intent::view(url)))
        .with_icon(IconSource::Lazy(Arc::new(icon)))
}

fn maps_entry(id: &str, label: &str, kind: EntryKind, uri: String, icon: &IconResource) -> Entry {
    let intent = Intent::view(uri).with_component(maps_component());
    Entry::new(id, label, kind, Target::Intent(intent))
        .with_icon(IconSource::Resource(icon.clone()))
}

fn maps_navigation(query: &str, icon: &IconResource) -> Entry {
    let uri = format!("google.navigation:q={}&avoid=tf", uri::encode(query));
    maps_entry("custom:maps-navigation", "Navigation", EntryKind::MapsNavigation, uri, icon)
}

fn maps_nearby(query: &str, icon: &IconResource) -> Entry {
    let uri = format!("geo:0,0?q={}", uri::encode(query));
    maps_entry("custom:maps-nearby", "Nearby", EntryKind::MapsNearby, uri, icon)
}
