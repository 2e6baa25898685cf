use crate::error::LookupError;
use crate::icons::IconResource;
use crate::model::{ComponentName, Entry, EntryKind, IconSource, Target};
use crate::packages::{ActivityInfo, PackageManager};
use crate::sources::Source;
use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use directories::BaseDirs;
use log::{info, debug};

/// Prefix Waydroid gives the desktop files it exports for Android packages.
pub const WAYDROID_PREFIX: &str = "waydroid.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopApp {
    /// Desktop file id, file name without `.desktop`.
    pub id: String,
    pub path: PathBuf,
    pub name: String,
    pub exec: String,
    pub terminal: bool,
    pub no_display: bool,
    pub icon: Option<String>,
    pub container: Option<String>,
}

impl DesktopApp {
    pub fn display_name(&self) -> String {
        match &self.container {
            Some(c) => format!("{} ({})", self.name, c),
            None => self.name.clone(),
        }
    }

    /// Exec line with field codes removed.
    pub fn command(&self) -> String {
        self.exec
            .split_whitespace()
            .filter(|s| !s.starts_with('%'))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn into_entry(self) -> Entry {
        let command = self.command();
        let label = self.display_name();
        let entry = Entry::new(
            self.id,
            label,
            EntryKind::App,
            Target::Command { command, terminal: self.terminal },
        );
        match self.icon {
            Some(icon) => entry.with_icon(IconSource::Resource(IconResource::Theme(icon))),
            None => entry,
        }
    }
}

/// Installed applications, read from XDG `applications` directories.
pub struct DesktopSource {
    dirs: Vec<PathBuf>,
}

impl Default for DesktopSource {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl DesktopSource {
    pub fn new(extra_dirs: &[PathBuf]) -> Self {
        let mut dirs = Vec::new();
        if let Some(base_dirs) = BaseDirs::new() {
            dirs.push(base_dirs.data_dir().join("applications"));
        }
        dirs.push(PathBuf::from("/usr/share/applications"));
        dirs.push(PathBuf::from("/usr/local/share/applications"));
        dirs.extend(extra_dirs.iter().cloned());
        Self::with_dirs(dirs)
    }

    pub fn with_dirs(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    /// Every displayable application. Earlier directories shadow later ones.
    pub fn apps(&self) -> Vec<DesktopApp> {
        let mut apps: Vec<DesktopApp> = Vec::new();

        for dir in self.dirs.iter().filter(|d| d.exists()) {
            debug!("Scanning desktop files in {:?}", dir);
            let Ok(read_dir) = fs::read_dir(dir) else { continue };
            for entry in read_dir.flatten() {
                let path = entry.path();
                if path.extension().and_then(|s| s.to_str()) != Some("desktop") {
                    continue;
                }
                let Some(app) = read_desktop_file(&path) else { continue };
                if app.no_display || apps.iter().any(|a| a.id == app.id) {
                    continue;
                }
                apps.push(app);
            }
        }
        apps
    }

    /// Looks a desktop id up regardless of `NoDisplay`; Waydroid exports
    /// can be hidden and still be launchable.
    fn find(&self, desktop_id: &str) -> Option<DesktopApp> {
        self.dirs
            .iter()
            .map(|dir| dir.join(format!("{}.desktop", desktop_id)))
            .filter(|path| path.is_file())
            .find_map(|path| read_desktop_file(&path))
    }
}

impl Source for DesktopSource {
    fn scan(&self) -> Result<Vec<Entry>> {
        let entries: Vec<Entry> = self.apps().into_iter().map(DesktopApp::into_entry).collect();
        info!("DesktopSource: found {} entries", entries.len());
        Ok(entries)
    }
}

impl PackageManager for DesktopSource {
    fn activity_info(&self, component: &ComponentName) -> Result<ActivityInfo, LookupError> {
        let candidates = [
            component.package.clone(),
            format!("{}{}", WAYDROID_PREFIX, component.package),
        ];

        candidates
            .iter()
            .find_map(|id| self.find(id))
            .map(|app| {
                debug!("DesktopSource: {} resolved to {:?}", component, app.path);
                ActivityInfo {
                    desktop_id: app.id,
                    label: app.name,
                    icon: app.icon.map(IconResource::Theme),
                    exec: Some(app.exec),
                }
            })
            .ok_or_else(|| LookupError::NameNotFound(component.clone()))
    }
}

fn read_desktop_file(path: &Path) -> Option<DesktopApp> {
    let content = fs::read_to_string(path).ok()?;
    let id = path.file_stem()?.to_str()?.to_string();
    parse_desktop_file(&id, path, &content)
}

fn parse_desktop_file(id: &str, path: &Path, content: &str) -> Option<DesktopApp> {
    let mut name = None;
    let mut exec = None;
    let mut terminal = false;
    let mut no_display = false;
    let mut icon = None;
    let mut in_desktop_entry = false;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') { continue; }

        if line.starts_with('[') {
            in_desktop_entry = line == "[Desktop Entry]";
            continue;
        }
        if !in_desktop_entry { continue; }

        let Some((key, value)) = line.split_once('=') else { continue };
        match key.trim() {
            "Name" => name = Some(value.trim().to_string()),
            "Exec" => exec = Some(value.trim().to_string()),
            "Terminal" => terminal = value.trim() == "true",
            "NoDisplay" | "Hidden" => no_display |= value.trim() == "true",
            "Icon" if !value.trim().is_empty() => icon = Some(value.trim().to_string()),
            _ => {}
        }
    }

    let exec = exec?;
    let container = container_name(&exec);

    Some(DesktopApp {
        id: id.to_string(),
        path: path.to_path_buf(),
        name: name?,
        exec,
        terminal,
        no_display,
        icon,
        container,
    })
}

/// Picks the container out of distrobox/toolbox wrapper commands.
fn container_name(exec: &str) -> Option<String> {
    let flags: &[&str] = if exec.contains("distrobox-enter") {
        &["-n", "--name"]
    } else if exec.contains("toolbox run") {
        &["-c", "--container"]
    } else {
        return None;
    };

    let parts: Vec<&str> = exec.split_whitespace().collect();
    let pos = parts.iter().position(|p| flags.contains(p))?;
    parts.get(pos + 1).map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_desktop(dir: &Path, id: &str, body: &str) {
        fs::write(dir.join(format!("{}.desktop", id)), body).unwrap();
    }

    #[test]
    fn test_parse_desktop_file() {
        let content = "\
# comment
[Desktop Entry]
Name=Firefox
Name[de]=Feuerfuchs
Exec=firefox %u
Icon=firefox
Terminal=false

[Desktop Action new-window]
Name=New Window
Exec=firefox --new-window
";
        let app = parse_desktop_file("firefox", Path::new("/x/firefox.desktop"), content).unwrap();
        assert_eq!(app.name, "Firefox");
        assert_eq!(app.exec, "firefox %u");
        assert_eq!(app.command(), "firefox");
        assert_eq!(app.icon.as_deref(), Some("firefox"));
        assert!(!app.terminal);
        assert!(!app.no_display);
    }

    #[test]
    fn test_parse_requires_name_and_exec() {
        assert!(parse_desktop_file("a", Path::new("a"), "[Desktop Entry]\nName=A\n").is_none());
        assert!(parse_desktop_file("a", Path::new("a"), "[Desktop Entry]\nExec=a\n").is_none());
        assert!(parse_desktop_file("a", Path::new("a"), "Name=A\nExec=a\n").is_none());
    }

    #[test]
    fn test_container_name() {
        assert_eq!(
            container_name("distrobox-enter -n arch -- htop").as_deref(),
            Some("arch")
        );
        assert_eq!(
            container_name("toolbox run --container fedora gedit").as_deref(),
            Some("fedora")
        );
        assert_eq!(container_name("distrobox-enter"), None);
        assert_eq!(container_name("htop"), None);
    }

    #[test]
    fn test_scan_skips_hidden_and_shadowed() {
        let user = tempfile::tempdir().unwrap();
        let system = tempfile::tempdir().unwrap();
        write_desktop(user.path(), "editor", "[Desktop Entry]\nName=My Editor\nExec=ed\n");
        write_desktop(system.path(), "editor", "[Desktop Entry]\nName=Editor\nExec=ed\n");
        write_desktop(system.path(), "daemon", "[Desktop Entry]\nName=D\nExec=d\nNoDisplay=true\n");
        write_desktop(
            system.path(),
            "htop",
            "[Desktop Entry]\nName=htop\nExec=htop\nTerminal=true\nIcon=htop\n",
        );
        fs::write(system.path().join("notes.txt"), "[Desktop Entry]\nName=N\nExec=n\n").unwrap();

        let source = DesktopSource::with_dirs(vec![
            user.path().to_path_buf(),
            system.path().to_path_buf(),
        ]);
        let mut entries = source.scan().unwrap();
        entries.sort_by(|a, b| a.id().cmp(b.id()));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].label(), "My Editor");
        assert_eq!(entries[1].id(), "htop");
        assert_eq!(
            entries[1].target(),
            &Target::Command { command: "htop".to_string(), terminal: true }
        );
        assert!(matches!(
            entries[1].icon_source(),
            IconSource::Resource(IconResource::Theme(name)) if name == "htop"
        ));
    }

    #[test]
    fn test_activity_info_resolves_waydroid_export() {
        let dir = tempfile::tempdir().unwrap();
        write_desktop(
            dir.path(),
            "waydroid.com.example.maps",
            "[Desktop Entry]\nName=Maps\nExec=waydroid app launch com.example.maps\nIcon=/icons/maps.png\nNoDisplay=true\n",
        );
        let source = DesktopSource::with_dirs(vec![dir.path().to_path_buf()]);

        let info = source
            .activity_info(&ComponentName::new("com.example.maps", "com.example.maps.Main"))
            .unwrap();
        assert_eq!(info.desktop_id, "waydroid.com.example.maps");
        assert_eq!(info.label, "Maps");
        assert_eq!(info.icon, Some(IconResource::Theme("/icons/maps.png".to_string())));
        assert_eq!(info.exec.as_deref(), Some("waydroid app launch com.example.maps"));
    }

    #[test]
    fn test_activity_info_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = DesktopSource::with_dirs(vec![dir.path().to_path_buf()]);
        let component = ComponentName::new("com.example.none", "Main");

        match source.activity_info(&component) {
            Err(LookupError::NameNotFound(c)) => assert_eq!(c, component),
            other => panic!("unexpected {:?}", other),
        }
    }
}
