use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use image::ImageReader;
use log::debug;
use tiny_skia::{Pixmap, Transform};

/// A decoded, premultiplied icon. Shared so cached icons can be handed out
/// without copying pixels.
pub type Icon = Arc<Pixmap>;

/// Icons compiled into the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundledIcon {
    DuckDuckGo,
}

impl BundledIcon {
    fn svg(self) -> &'static [u8] {
        match self {
            BundledIcon::DuckDuckGo => include_bytes!("../assets/duckduckgo.svg"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconResource {
    Bundled(BundledIcon),
    /// Icon theme name or absolute path, as found in a desktop entry.
    Theme(String),
}

pub trait ResourceLoader: Send + Sync {
    fn load(&self, resource: &IconResource, size: u32) -> Option<Icon>;
}

/// Compute-once icon slot. The first successful load wins and every later
/// caller gets the same `Arc`. Failed loads are not remembered.
pub struct LazyIcon {
    resource: IconResource,
    cached: Mutex<Option<Icon>>,
}

impl LazyIcon {
    pub fn new(resource: IconResource) -> Self {
        Self {
            resource,
            cached: Mutex::new(None),
        }
    }

    pub fn get_or_load(&self, loader: &dyn ResourceLoader, size: u32) -> Option<Icon> {
        // Held across the load so racing callers cannot both resolve.
        let mut cached = self.cached.lock().unwrap_or_else(PoisonError::into_inner);
        if cached.is_none() {
            *cached = loader.load(&self.resource, size);
            if cached.is_some() {
                debug!("LazyIcon: resolved {:?}", self.resource);
            }
        }
        cached.clone()
    }
}

impl fmt::Debug for LazyIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let loaded = self
            .cached
            .lock()
            .map(|c| c.is_some())
            .unwrap_or(false);
        f.debug_struct("LazyIcon")
            .field("resource", &self.resource)
            .field("loaded", &loaded)
            .finish()
    }
}

/// Looks icons up in the freedesktop icon theme directories.
pub struct ThemeIconLoader {
    icon_theme_paths: Vec<PathBuf>,
}

impl Default for ThemeIconLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeIconLoader {
    pub fn new() -> Self {
        let mut paths = Vec::new();
        if let Some(home) = directories::BaseDirs::new() {
            paths.push(home.data_dir().join("icons"));
        }
        paths.push(PathBuf::from("/usr/share/icons"));
        paths.push(PathBuf::from("/usr/share/pixmaps"));
        Self::with_paths(paths)
    }

    pub fn with_paths(icon_theme_paths: Vec<PathBuf>) -> Self {
        Self { icon_theme_paths }
    }

    fn find_and_load(&self, icon_name: &str, size: u32) -> Option<Pixmap> {
        let path = Path::new(icon_name);
        if path.is_absolute() {
            return if path.exists() { load_from_path(path, size) } else { None };
        }

        const SUBDIRS: [&str; 7] = [
            "hicolor/48x48/apps",
            "hicolor/scalable/apps",
            "hicolor/32x32/apps",
            "hicolor/64x64/apps",
            "Adwaita/48x48/apps",
            "Adwaita/scalable/apps",
            "",
        ];

        for root in self.icon_theme_paths.iter().filter(|r| r.exists()) {
            for sub in SUBDIRS {
                let dir = root.join(sub);
                if !dir.exists() { continue; }

                for ext in ["png", "svg", "xpm"] {
                    let file_path = dir.join(format!("{}.{}", icon_name, ext));
                    if file_path.exists() {
                        debug!("ThemeIconLoader: {} -> {:?}", icon_name, file_path);
                        return load_from_path(&file_path, size);
                    }
                }
            }
        }
        debug!("ThemeIconLoader: no icon named {}", icon_name);
        None
    }
}

impl ResourceLoader for ThemeIconLoader {
    fn load(&self, resource: &IconResource, size: u32) -> Option<Icon> {
        let pixmap = match resource {
            IconResource::Bundled(icon) => render_svg(icon.svg(), size),
            IconResource::Theme(name) => self.find_and_load(name, size),
        };
        pixmap.map(Arc::new)
    }
}

fn load_from_path(path: &Path, size: u32) -> Option<Pixmap> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("svg") => render_svg(&fs::read(path).ok()?, size),
        _ => load_raster(path, size),
    }
}

fn load_raster(path: &Path, size: u32) -> Option<Pixmap> {
    let img = ImageReader::open(path).ok()?.decode().ok()?;
    let img = img.resize_exact(size, size, image::imageops::FilterType::Lanczos3);
    let mut rgba = img.into_rgba8();

    // tiny-skia wants premultiplied alpha
    for pixel in rgba.chunks_exact_mut(4) {
        let a = pixel[3] as f32 / 255.0;
        pixel[0] = (pixel[0] as f32 * a) as u8;
        pixel[1] = (pixel[1] as f32 * a) as u8;
        pixel[2] = (pixel[2] as f32 * a) as u8;
    }

    let (width, height) = rgba.dimensions();
    Pixmap::from_vec(rgba.into_vec(), tiny_skia::IntSize::from_wh(width, height)?)
}

fn render_svg(data: &[u8], size: u32) -> Option<Pixmap> {
    let opt = resvg::usvg::Options::default();
    let tree = resvg::usvg::Tree::from_data(data, &opt).ok()?;

    let mut pixmap = Pixmap::new(size, size)?;
    let transform = Transform::from_scale(
        size as f32 / tree.size().width(),
        size as f32 / tree.size().height(),
    );

    resvg::render(&tree, transform, &mut pixmap.as_mut());
    Some(pixmap)
}
