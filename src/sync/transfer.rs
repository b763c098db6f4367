use crate::sync::destination::Destination;
use std::path::Path;

/// Outcome of mirroring one source file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyReport {
    pub copied: usize,
    pub failed: usize,
    /// Copies skipped because of dry-run
    pub planned: usize,
    pub bytes_written: u64,
}

/// Best-effort copier
///
/// Each destination is attempted independently. A missing directory (a build
/// configuration that has not been built) or a locked file only counts as a
/// failure; it never stops the remaining copies and is never returned as an
/// error.
pub struct Transferrer {
    dry_run: bool,
}

impl Transferrer {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    pub async fn copy_to_all(&self, source: &Path, destinations: &[Destination]) -> CopyReport {
        let mut report = CopyReport::default();

        for dest in destinations {
            if self.dry_run {
                tracing::info!("Would copy: {} → {}", source.display(), dest.path.display());
                report.planned += 1;
                continue;
            }

            // No parent creation: absent build directories are expected
            match tokio::fs::copy(source, &dest.path).await {
                Ok(bytes) => {
                    tracing::trace!(
                        "Copied {} bytes to {} ({} {:?})",
                        bytes,
                        dest.path.display(),
                        dest.project,
                        dest.build
                    );
                    report.copied += 1;
                    report.bytes_written += bytes;
                }
                Err(e) => {
                    tracing::debug!("Skipped {}: {}", dest.path.display(), e);
                    report.failed += 1;
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BuildConfig, Project};
    use std::fs;
    use tempfile::TempDir;

    fn dest(path: impl AsRef<Path>) -> Destination {
        Destination {
            project: Project::Game,
            build: BuildConfig::Debug,
            path: path.as_ref().to_path_buf(),
        }
    }

    #[tokio::test]
    async fn test_copies_to_existing_directories() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("lit.frag");
        fs::write(&source, "void main() {}").unwrap();

        let a = temp.path().join("a");
        let b = temp.path().join("b");
        fs::create_dir_all(&a).unwrap();
        fs::create_dir_all(&b).unwrap();

        let report = Transferrer::new(false)
            .copy_to_all(&source, &[dest(a.join("lit.frag")), dest(b.join("lit.frag"))])
            .await;

        assert_eq!(report.copied, 2);
        assert_eq!(report.failed, 0);
        assert_eq!(report.bytes_written, 28);
        assert_eq!(fs::read_to_string(b.join("lit.frag")).unwrap(), "void main() {}");
    }

    #[tokio::test]
    async fn test_missing_directory_does_not_block_others() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("lit.frag");
        fs::write(&source, "new").unwrap();

        let present = temp.path().join("present");
        fs::create_dir_all(&present).unwrap();
        let missing = temp.path().join("missing");

        let report = Transferrer::new(false)
            .copy_to_all(
                &source,
                &[dest(missing.join("lit.frag")), dest(present.join("lit.frag"))],
            )
            .await;

        assert_eq!(report.copied, 1);
        assert_eq!(report.failed, 1);
        assert!(!missing.exists(), "directories are never created");
        assert_eq!(fs::read_to_string(present.join("lit.frag")).unwrap(), "new");
    }

    #[tokio::test]
    async fn test_overwrites_existing_file() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("src.glsl");
        let target = temp.path().join("dst.glsl");
        fs::write(&source, "fresh").unwrap();
        fs::write(&target, "stale contents").unwrap();

        let report = Transferrer::new(false).copy_to_all(&source, &[dest(&target)]).await;

        assert_eq!(report.copied, 1);
        assert_eq!(fs::read_to_string(&target).unwrap(), "fresh");
    }

    #[tokio::test]
    async fn test_missing_source_counts_failures() {
        let temp = TempDir::new().unwrap();
        let report = Transferrer::new(false)
            .copy_to_all(&temp.path().join("gone.glsl"), &[dest(temp.path().join("x.glsl"))])
            .await;

        assert_eq!(report.copied, 0);
        assert_eq!(report.failed, 1);
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("src.glsl");
        let target = temp.path().join("dst.glsl");
        fs::write(&source, "fresh").unwrap();

        let report = Transferrer::new(true).copy_to_all(&source, &[dest(&target)]).await;

        assert_eq!(report.planned, 1);
        assert_eq!(report.copied, 0);
        assert!(!target.exists());
    }
}
