use crate::config::{DestinationPolicy, MirrorConfig, UnmatchedPolicy};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "shader-mirror")]
#[command(about = "Mirror shader sources into build output directories as they change", long_about = None)]
#[command(version)]
#[command(after_help = "EXAMPLES:
    # Watch the parent directory (run from the tools folder)
    shader-mirror

    # Watch an explicit workspace
    shader-mirror --root ~/dev/engine

    # Show where changes would be copied without copying
    shader-mirror --dry-run -v

    # Only copy into the project the shader belongs to
    shader-mirror --only-classified

    # Machine-readable output (NDJSON)
    shader-mirror --json

Destination directories are compiled in and resolved below the workspace root.
Stop with Ctrl-C.")]
pub struct Cli {
    /// Workspace root to watch; build outputs are resolved below it
    #[arg(long, default_value = "..", env = "SHADER_MIRROR_ROOT")]
    pub root: PathBuf,

    /// Report destinations without copying anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Emit one JSON object per event instead of text
    #[arg(long)]
    pub json: bool,

    /// Copy only into the classified project's build directories
    #[arg(long)]
    pub only_classified: bool,

    /// Ignore shaders that match no known project instead of copying them everywhere
    #[arg(long)]
    pub skip_unmatched: bool,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only show errors)
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.root.exists() {
            anyhow::bail!("Workspace root does not exist: {}", self.root.display());
        }
        if !self.root.is_dir() {
            anyhow::bail!("Workspace root is not a directory: {}", self.root.display());
        }
        if self.quiet && self.verbose > 0 {
            anyhow::bail!("--quiet and --verbose cannot be used together");
        }

        Ok(())
    }

    pub fn log_level(&self) -> tracing::Level {
        if self.quiet || self.json {
            return tracing::Level::ERROR;
        }

        match self.verbose {
            0 => tracing::Level::INFO,
            1 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }

    pub fn destination_policy(&self) -> DestinationPolicy {
        if self.only_classified {
            DestinationPolicy::ClassifiedProject
        } else {
            DestinationPolicy::All
        }
    }

    pub fn unmatched_policy(&self) -> UnmatchedPolicy {
        if self.skip_unmatched {
            UnmatchedPolicy::Skip
        } else {
            UnmatchedPolicy::SyncAll
        }
    }

    /// The built-in table rooted at `root`, with the policy flags applied
    pub fn mirror_config(&self, root: PathBuf) -> MirrorConfig {
        MirrorConfig::builtin(root)
            .with_destination_policy(self.destination_policy())
            .with_unmatched_policy(self.unmatched_policy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cli(root: PathBuf) -> Cli {
        Cli {
            root,
            dry_run: false,
            json: false,
            only_classified: false,
            skip_unmatched: false,
            verbose: 0,
            quiet: false,
        }
    }

    #[test]
    fn test_validate_root_exists() {
        let temp = TempDir::new().unwrap();
        assert!(cli(temp.path().to_path_buf()).validate().is_ok());
    }

    #[test]
    fn test_validate_root_not_exists() {
        let temp = TempDir::new().unwrap();
        let result = cli(temp.path().join("missing")).validate();
        assert!(result.unwrap_err().to_string().contains("does not exist"));
    }

    #[test]
    fn test_validate_root_is_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();
        let result = cli(file).validate();
        assert!(result.unwrap_err().to_string().contains("not a directory"));
    }

    #[test]
    fn test_validate_quiet_and_verbose_conflict() {
        let temp = TempDir::new().unwrap();
        let mut cli = cli(temp.path().to_path_buf());
        cli.quiet = true;
        cli.verbose = 1;
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_log_level_default() {
        assert_eq!(cli(PathBuf::from("..")).log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_log_level_verbose() {
        let mut cli = cli(PathBuf::from(".."));
        cli.verbose = 1;
        assert_eq!(cli.log_level(), tracing::Level::DEBUG);
        cli.verbose = 2;
        assert_eq!(cli.log_level(), tracing::Level::TRACE);
    }

    #[test]
    fn test_log_level_quiet_and_json() {
        let mut quiet = cli(PathBuf::from(".."));
        quiet.quiet = true;
        assert_eq!(quiet.log_level(), tracing::Level::ERROR);

        let mut json = cli(PathBuf::from(".."));
        json.json = true;
        assert_eq!(json.log_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_policy_flags() {
        let mut cli = cli(PathBuf::from(".."));
        assert_eq!(cli.destination_policy(), DestinationPolicy::All);
        assert_eq!(cli.unmatched_policy(), UnmatchedPolicy::SyncAll);

        cli.only_classified = true;
        cli.skip_unmatched = true;
        let config = cli.mirror_config(PathBuf::from("/work"));
        assert_eq!(config.destination_policy, DestinationPolicy::ClassifiedProject);
        assert_eq!(config.unmatched_policy, UnmatchedPolicy::Skip);
        assert_eq!(config.workspace_root, PathBuf::from("/work"));
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::parse_from(["shader-mirror"]);
        assert_eq!(cli.root, PathBuf::from(".."));
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from(["shader-mirror", "--root", "/work", "-n", "-vv", "--only-classified"]);
        assert_eq!(cli.root, PathBuf::from("/work"));
        assert!(cli.dry_run);
        assert_eq!(cli.verbose, 2);
        assert!(cli.only_classified);
    }
}
