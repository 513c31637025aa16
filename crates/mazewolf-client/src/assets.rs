// assets.rs — asset path resolution for the renderer collaborator

use std::path::{Path, PathBuf};

/// Extensions tried for every texture lookup, in order.
const TEXTURE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// The asset-loading collaborator. The core never decodes images or models;
/// it only resolves names to on-disk paths and hands them to the renderer.
pub trait AssetLoader {
    /// Diffuse texture for a wall material id (`textures/wall_<id>.<ext>`).
    fn wall_texture(&self, material: u8) -> Option<PathBuf>;
    /// Matching normal map (`_N` suffix), if present.
    fn wall_normal_map(&self, material: u8) -> Option<PathBuf>;
    /// Matching roughness map (`_R` suffix), if present.
    fn wall_roughness_map(&self, material: u8) -> Option<PathBuf>;
    /// Model file by bare name (`models/<name>`).
    fn model(&self, name: &str) -> Option<PathBuf>;
    /// Shader source by file name (`shaders/<name>`).
    fn shader(&self, name: &str) -> Option<PathBuf>;
}

/// Directory-rooted loader probing the conventional layout.
pub struct FsAssets {
    root: PathBuf,
}

impl FsAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Probe `<root>/textures/<base>.<ext>` for each known extension.
    fn find_texture(&self, base: &str) -> Option<PathBuf> {
        for ext in TEXTURE_EXTENSIONS {
            let path = self.root.join("textures").join(format!("{}.{}", base, ext));
            if path.exists() {
                return Some(path);
            }
        }
        None
    }

    fn existing(&self, rel: impl AsRef<Path>) -> Option<PathBuf> {
        let path = self.root.join(rel.as_ref());
        path.exists().then_some(path)
    }
}

impl AssetLoader for FsAssets {
    fn wall_texture(&self, material: u8) -> Option<PathBuf> {
        self.find_texture(&format!("wall_{}", material))
    }

    fn wall_normal_map(&self, material: u8) -> Option<PathBuf> {
        self.find_texture(&format!("wall_{}_N", material))
    }

    fn wall_roughness_map(&self, material: u8) -> Option<PathBuf> {
        self.find_texture(&format!("wall_{}_R", material))
    }

    fn model(&self, name: &str) -> Option<PathBuf> {
        self.existing(Path::new("models").join(name))
    }

    fn shader(&self, name: &str) -> Option<PathBuf> {
        self.existing(Path::new("shaders").join(name))
    }
}

// ============================================================
// Tests
// ============================================================
