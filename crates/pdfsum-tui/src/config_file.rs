use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use pdfsum_core::{DEFAULT_API_URL, DEFAULT_MODEL};

const DEFAULT_FPS: u32 = 10;

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub backend: Option<BackendConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    pub api_url: Option<String>,
    pub model: Option<String>,
    pub max_length: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub theme: Option<String>,
    pub fps: Option<u32>,
}

/// Platform config directory path: `<config_dir>/pdfsum/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pdfsum").join("config.toml"))
}

/// Load config by cascading CWD `.pdfsum.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    load_cascade(config_path().as_deref(), Path::new(".pdfsum.toml"))
}

fn load_cascade(platform: Option<&Path>, cwd: &Path) -> ConfigFile {
    let platform = platform.and_then(load_from_path);
    let cwd = load_from_path(cwd);

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparseable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let (bb, ob) = (base.backend.unwrap_or_default(), overlay.backend.unwrap_or_default());
    let (bd, od) = (base.display.unwrap_or_default(), overlay.display.unwrap_or_default());
    ConfigFile {
        backend: Some(BackendConfig {
            api_url: ob.api_url.or(bb.api_url),
            model: ob.model.or(bb.model),
            max_length: ob.max_length.or(bb.max_length),
        }),
        display: Some(DisplayConfig {
            theme: od.theme.or(bd.theme),
            fps: od.fps.or(bd.fps),
        }),
    }
}

/// Values that can come from the command line or the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub model: Option<String>,
    pub max_length: Option<u32>,
    pub theme: Option<String>,
}

impl Overrides {
    /// `PDFSUM_API_URL` and `PDFSUM_MODEL`.
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("PDFSUM_API_URL").ok(),
            model: std::env::var("PDFSUM_MODEL").ok(),
            max_length: None,
            theme: None,
        }
    }
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_url: String,
    pub model: String,
    pub max_length: Option<u32>,
    pub theme: String,
    pub fps: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_length: None,
            theme: "hacker".to_string(),
            fps: DEFAULT_FPS,
        }
    }
}

impl Settings {
    /// Resolve with precedence CLI > env > config file > defaults.
    pub fn resolve(file: &ConfigFile, env: &Overrides, cli: &Overrides) -> Self {
        let mut settings = Self::default();
        settings.apply_file(file);
        settings.apply_overrides(env);
        settings.apply_overrides(cli);
        settings
    }

    /// Only sets values that are present and non-empty in the file.
    fn apply_file(&mut self, file: &ConfigFile) {
        if let Some(backend) = &file.backend {
            self.apply_overrides(&Overrides {
                api_url: backend.api_url.clone(),
                model: backend.model.clone(),
                max_length: backend.max_length,
                theme: None,
            });
        }
        if let Some(display) = &file.display {
            if let Some(theme) = &display.theme
                && !theme.is_empty()
            {
                self.theme = theme.clone();
            }
            if let Some(fps) = display.fps {
                self.fps = fps.clamp(1, 60);
            }
        }
    }

    fn apply_overrides(&mut self, o: &Overrides) {
        if let Some(url) = &o.api_url
            && !url.is_empty()
        {
            self.api_url = url.trim_end_matches('/').to_string();
        }
        if let Some(model) = &o.model
            && !model.is_empty()
        {
            self.model = model.clone();
        }
        if let Some(len) = o.max_length
            && len > 0
        {
            self.max_length = Some(len);
        }
        if let Some(theme) = &o.theme
            && !theme.is_empty()
        {
            self.theme = theme.clone();
        }
    }

    /// UI tick interval in milliseconds.
    pub fn tick_millis(&self) -> u64 {
        1000 / u64::from(self.fps.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_toml(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn partial_file_parses() {
        let cfg: ConfigFile = toml::from_str("[display]\ntheme = \"modern\"\n").unwrap();
        assert_eq!(cfg.display.unwrap().theme.as_deref(), Some("modern"));
        assert!(cfg.backend.is_none());
    }

    #[test]
    fn cwd_overrides_platform_per_field() {
        let dir = tempfile::tempdir().unwrap();
        let platform = write_toml(
            &dir,
            "config.toml",
            "[backend]\napi_url = \"http://platform:1\"\nmodel = \"phi3:mini\"\n[display]\nfps = 30\n",
        );
        let cwd = write_toml(&dir, ".pdfsum.toml", "[backend]\nmodel = \"mistral\"\n");

        let cfg = load_cascade(Some(&platform), &cwd);
        let backend = cfg.backend.unwrap();
        assert_eq!(backend.api_url.as_deref(), Some("http://platform:1"));
        assert_eq!(backend.model.as_deref(), Some("mistral"));
        assert_eq!(cfg.display.unwrap().fps, Some(30));
    }

    #[test]
    fn missing_and_broken_files_fall_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let broken = write_toml(&dir, "broken.toml", "[backend\nnope");
        let cfg = load_cascade(Some(&broken), &dir.path().join("absent.toml"));
        assert_eq!(cfg, ConfigFile::default());
    }

    #[test]
    fn defaults_without_any_source() {
        let s = Settings::resolve(&ConfigFile::default(), &Overrides::default(), &Overrides::default());
        assert_eq!(s.api_url, DEFAULT_API_URL);
        assert_eq!(s.model, DEFAULT_MODEL);
        assert_eq!(s.max_length, None);
        assert_eq!(s.theme, "hacker");
        assert_eq!(s.tick_millis(), 100);
    }

    #[test]
    fn cli_beats_env_beats_file() {
        let file = ConfigFile {
            backend: Some(BackendConfig {
                api_url: Some("http://file:1".into()),
                model: Some("file-model".into()),
                max_length: Some(500),
            }),
            display: None,
        };
        let env = Overrides {
            api_url: Some("http://env:2/".into()),
            model: Some("env-model".into()),
            ..Default::default()
        };
        let cli = Overrides {
            model: Some("cli-model".into()),
            ..Default::default()
        };

        let s = Settings::resolve(&file, &env, &cli);
        assert_eq!(s.api_url, "http://env:2");
        assert_eq!(s.model, "cli-model");
        assert_eq!(s.max_length, Some(500));
    }

    #[test]
    fn empty_values_do_not_override() {
        let env = Overrides {
            model: Some(String::new()),
            max_length: Some(0),
            ..Default::default()
        };
        let s = Settings::resolve(&ConfigFile::default(), &env, &Overrides::default());
        assert_eq!(s.model, DEFAULT_MODEL);
        assert_eq!(s.max_length, None);
    }

    #[test]
    fn fps_is_clamped() {
        let file = ConfigFile {
            backend: None,
            display: Some(DisplayConfig {
                theme: None,
                fps: Some(500),
            }),
        };
        let s = Settings::resolve(&file, &Overrides::default(), &Overrides::default());
        assert_eq!(s.fps, 60);
        assert_eq!(s.tick_millis(), 16);
    }
}
