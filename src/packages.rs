use crate::error::LookupError;
use crate::icons::IconResource;
use crate::model::ComponentName;

/// What the system knows about an installed entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityInfo {
    /// Desktop file id the component resolved through.
    pub desktop_id: String,
    pub label: String,
    /// `None` when the application declares no icon of its own.
    pub icon: Option<IconResource>,
    /// Raw command line, field codes (`%u`, `%F`, ...) included.
    pub exec: Option<String>,
}

pub trait PackageManager {
    fn activity_info(&self, component: &ComponentName) -> Result<ActivityInfo, LookupError>;
}
