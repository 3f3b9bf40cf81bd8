//! Local model discovery — one directory per model under a weights root.
//!
//! ```text
//! weights/
//!   amber/
//!     checkpoint.pth    exactly one .pth per model
//!     config.yaml       optional; falls back to a shared default
//!   koharu/
//!     ...
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ModelConfig;
use crate::error::{Error, Result};

/// Root directory scanned for models by convention.
pub const DEFAULT_MODEL_ROOT: &str = "weights";
/// Config used when a model directory ships no `config.yaml` of its own.
pub const DEFAULT_CONFIG_PATH: &str = "conf/config.yaml";

/// Sorted names of the model directories under `root`. An empty root is not
/// an error here; callers decide whether zero models is fatal.
pub fn list_models(root: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// A located model directory: its weights file and, when present, its own
/// training config.
#[derive(Debug, Clone)]
pub struct ModelDir {
    pub name: String,
    pub weights: PathBuf,
    pub config: Option<PathBuf>,
}

impl ModelDir {
    /// Find model `name` under `root`. The directory must contain exactly
    /// one `.pth` weights file; `config.yaml` beside it is optional.
    pub fn locate(root: &Path, name: &str) -> Result<Self> {
        let dir = root.join(name);
        if !dir.is_dir() {
            return Err(Error::Store(format!(
                "no model directory at {}",
                dir.display()
            )));
        }

        let mut weights = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "pth") {
                weights.push(path);
            }
        }
        if weights.is_empty() {
            return Err(Error::Store(format!(
                "no .pth weights file in {}",
                dir.display()
            )));
        }
        if weights.len() > 1 {
            return Err(Error::Store(format!(
                "{} .pth files in {}, expected exactly one",
                weights.len(),
                dir.display()
            )));
        }
        let weights = weights.remove(0);

        let config = dir.join("config.yaml");
        let config = config.is_file().then_some(config);

        Ok(Self {
            name: name.to_string(),
            weights,
            config,
        })
    }

    /// Load this model's config, or `fallback` when the directory has none.
    pub fn load_config(&self, fallback: &Path) -> Result<ModelConfig> {
        let path = self.config.as_deref().unwrap_or(fallback);
        println!("Loading config from {}…", path.display());
        ModelConfig::from_path(path)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    struct TempRoot(PathBuf);

    impl TempRoot {
        fn new(tag: &str) -> Self {
            let dir = std::env::temp_dir()
                .join(format!("japros-store-{tag}-{}", std::process::id()));
            let _ = fs::remove_dir_all(&dir);
            fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }

        fn path(&self) -> &Path {
            &self.0
        }
    }

    impl Drop for TempRoot {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn test_list_models_sorted_directories_only() {
        let root = TempRoot::new("list");
        fs::create_dir(root.path().join("koharu")).unwrap();
        fs::create_dir(root.path().join("amber")).unwrap();
        fs::write(root.path().join("notes.txt"), "x").unwrap();

        assert_eq!(list_models(root.path()).unwrap(), ["amber", "koharu"]);
    }

    #[test]
    fn test_locate_with_config() {
        let root = TempRoot::new("locate");
        let dir = root.path().join("amber");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("checkpoint.pth"), "w").unwrap();
        fs::write(dir.join("config.yaml"), "tts: vits\n").unwrap();

        let model = ModelDir::locate(root.path(), "amber").unwrap();
        assert_eq!(model.name, "amber");
        assert!(model.weights.ends_with("checkpoint.pth"));
        assert!(model.config.is_some());
    }

    #[test]
    fn test_locate_without_config() {
        let root = TempRoot::new("noconfig");
        let dir = root.path().join("amber");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("checkpoint.pth"), "w").unwrap();

        let model = ModelDir::locate(root.path(), "amber").unwrap();
        assert!(model.config.is_none());
    }

    #[test]
    fn test_locate_requires_exactly_one_weights_file() {
        let root = TempRoot::new("weights");
        let dir = root.path().join("amber");
        fs::create_dir(&dir).unwrap();
        assert!(matches!(
            ModelDir::locate(root.path(), "amber"),
            Err(Error::Store(_))
        ));

        fs::write(dir.join("a.pth"), "w").unwrap();
        fs::write(dir.join("b.pth"), "w").unwrap();
        assert!(matches!(
            ModelDir::locate(root.path(), "amber"),
            Err(Error::Store(_))
        ));
    }

    #[test]
    fn test_locate_missing_directory() {
        let root = TempRoot::new("missing");
        assert!(matches!(
            ModelDir::locate(root.path(), "nope"),
            Err(Error::Store(_))
        ));
    }
}
