use crate::window::WindowConfig;
use anyhow::{bail, Context as _};
use std::{fmt, path::PathBuf, str::FromStr};
use structopt::StructOpt;

/// An OpenGL context version, written `major.minor` on the command line.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct GlVersion {
    pub major: u32,
    pub minor: u32,
}

impl GlVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        GlVersion { major, minor }
    }

    /// Core profiles only exist from 3.2 onwards.
    pub fn has_core_profile(&self) -> bool {
        *self >= GlVersion::new(3, 2)
    }
}

impl Default for GlVersion {
    fn default() -> Self {
        GlVersion::new(3, 3)
    }
}

impl fmt::Display for GlVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for GlVersion {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (major, minor) = match s.trim().split_once('.') {
            Some(parts) => parts,
            None => bail!("expected a version like '3.3', got '{}'", s),
        };

        let major = major
            .parse()
            .with_context(|| format!("bad major version in '{}'", s))?;
        let minor = minor
            .parse()
            .with_context(|| format!("bad minor version in '{}'", s))?;

        let latest_minor = match major {
            2 => 1,
            3 => 3,
            4 => 6,
            _ => bail!("unknown OpenGL version '{}'", s),
        };
        if minor > latest_minor {
            bail!("unknown OpenGL version '{}'", s);
        }

        Ok(GlVersion { major, minor })
    }
}

#[derive(Clone, Debug, StructOpt)]
pub struct RunOptions {
    /// Window width, in screen coordinates
    #[structopt(long)]
    pub width: Option<u32>,

    /// Window height, in screen coordinates
    #[structopt(long)]
    pub height: Option<u32>,

    /// OpenGL context version to ask for
    #[structopt(long, default_value = "3.3")]
    pub gl_version: GlVersion,

    /// Don't wait for vertical sync when swapping buffers
    #[structopt(long)]
    pub no_vsync: bool,

    /// Directory holding the `shaders` and `textures` folders
    #[structopt(long, parse(from_os_str), default_value = "resources")]
    pub resources: PathBuf,

    /// Start straight in the named test instead of the menu
    #[structopt(long)]
    pub test: Option<String>,
}

impl RunOptions {
    /// Fills in whatever the command line left out from `defaults`.
    pub fn window_config(&self, defaults: WindowConfig) -> WindowConfig {
        WindowConfig {
            width: self.width.unwrap_or(defaults.width),
            height: self.height.unwrap_or(defaults.height),
            gl_version: self.gl_version,
            vsync: defaults.vsync && !self.no_vsync,
            ..defaults
        }
    }

    pub fn shader_path(&self, name: &str) -> PathBuf {
        self.resources.join("shaders").join(name)
    }

    pub fn texture_path(&self, name: &str) -> PathBuf {
        self.resources.join("textures").join(name)
    }
}

/// Sets up `env_logger`, showing `info` and above unless `RUST_LOG` says
/// otherwise.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_versions() {
        assert_eq!("3.3".parse::<GlVersion>().unwrap(), GlVersion::new(3, 3));
        assert_eq!(" 4.6 ".parse::<GlVersion>().unwrap(), GlVersion::new(4, 6));
        assert_eq!("2.1".parse::<GlVersion>().unwrap(), GlVersion::new(2, 1));
    }

    #[test]
    fn rejects_garbage_versions() {
        assert!("3".parse::<GlVersion>().is_err());
        assert!("three.three".parse::<GlVersion>().is_err());
        assert!("3.x".parse::<GlVersion>().is_err());
        assert!("5.0".parse::<GlVersion>().is_err());
        assert!("1.5".parse::<GlVersion>().is_err());
        assert!("2.2".parse::<GlVersion>().is_err());
    }

    #[test]
    fn rejects_versions_that_were_never_released() {
        assert!("2.5".parse::<GlVersion>().is_err());
        assert!("3.4".parse::<GlVersion>().is_err());
        assert!("3.7".parse::<GlVersion>().is_err());
        assert!("4.7".parse::<GlVersion>().is_err());
        assert!("4.9".parse::<GlVersion>().is_err());

        assert_eq!("2.0".parse::<GlVersion>().unwrap(), GlVersion::new(2, 0));
        assert_eq!("3.0".parse::<GlVersion>().unwrap(), GlVersion::new(3, 0));
        assert_eq!("4.0".parse::<GlVersion>().unwrap(), GlVersion::new(4, 0));
    }

    #[test]
    fn core_profile_starts_at_3_2() {
        assert!(!GlVersion::new(3, 1).has_core_profile());
        assert!(GlVersion::new(3, 2).has_core_profile());
        assert!(GlVersion::new(4, 1).has_core_profile());
        assert_eq!(GlVersion::default().to_string(), "3.3");
    }

    #[test]
    fn defaults_fill_in_missing_options() {
        let options = RunOptions::from_iter(&["learn-opengl"]);
        let config = options.window_config(WindowConfig::new("Test", 960, 540));

        assert_eq!((config.width, config.height), (960, 540));
        assert_eq!(config.title, "Test");
        assert_eq!(config.gl_version, GlVersion::new(3, 3));
        assert!(config.vsync);
        assert_eq!(options.test, None);
    }

    #[test]
    fn command_line_overrides_defaults() {
        let options = RunOptions::from_iter(&[
            "learn-opengl",
            "--width",
            "640",
            "--gl-version",
            "4.1",
            "--no-vsync",
            "--test",
            "Texture 2D",
        ]);
        let config = options.window_config(WindowConfig::new("Test", 960, 540));

        assert_eq!((config.width, config.height), (640, 540));
        assert_eq!(config.gl_version, GlVersion::new(4, 1));
        assert!(!config.vsync);
        assert_eq!(options.test.as_deref(), Some("Texture 2D"));
    }

    #[test]
    fn resource_paths_live_under_the_resource_dir() {
        let options = RunOptions::from_iter(&["learn-opengl", "--resources", "/tmp/res"]);
        assert_eq!(
            options.shader_path("basic.shader"),
            PathBuf::from("/tmp/res/shaders/basic.shader")
        );
        assert_eq!(
            options.texture_path("logo.png"),
            PathBuf::from("/tmp/res/textures/logo.png")
        );
    }
}
