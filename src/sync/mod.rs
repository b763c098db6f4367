pub mod destination;
pub mod output;
pub mod transfer;
pub mod watch;

use crate::classify::{Classification, ProjectClassifier};
use crate::config::{MirrorConfig, UnmatchedPolicy};
use crate::error::Result;
use crate::filter::ShaderFilter;
use destination::{Destination, DestinationBuilder};
use notify::event::{ModifyKind, RenameMode};
use notify::{Event, EventKind};
use std::path::{Path, PathBuf};
use transfer::{CopyReport, Transferrer};

/// Everything that happened for one eligible change event
#[derive(Debug, Clone)]
pub struct EventReport {
    pub source: PathBuf,
    pub classification: Classification,
    pub destinations: Vec<Destination>,
    pub copy: CopyReport,
    /// Unmatched path dropped by [`UnmatchedPolicy::Skip`]
    pub skipped: bool,
}

/// Filter → classify → map → copy, one event at a time
///
/// Holds no state between events.
pub struct SyncEngine {
    workspace_root: PathBuf,
    filter: ShaderFilter,
    classifier: ProjectClassifier,
    destinations: DestinationBuilder,
    transferrer: Transferrer,
    unmatched_policy: UnmatchedPolicy,
}

impl SyncEngine {
    pub fn new(config: &MirrorConfig, dry_run: bool) -> Result<Self> {
        Ok(Self {
            workspace_root: config.workspace_root.clone(),
            filter: ShaderFilter::new(config),
            classifier: ProjectClassifier::new(config)?,
            destinations: DestinationBuilder::new(config),
            transferrer: Transferrer::new(dry_run),
            unmatched_policy: config.unmatched_policy,
        })
    }

    pub fn destination_count(&self) -> usize {
        self.destinations.template_count()
    }

    /// Mirror one changed path
    ///
    /// Returns `None` when the filter rejects the path.
    pub async fn handle_path(&self, path: &Path) -> Option<EventReport> {
        // Markers are matched below the workspace root only
        let relative = path.strip_prefix(&self.workspace_root).unwrap_or(path);

        if !self.filter.is_eligible(relative) {
            tracing::trace!("Ignoring {} ({:?})", path.display(), self.filter.check(relative));
            return None;
        }

        let classification = self.classifier.classify(relative);
        tracing::debug!(
            "Classified {} as {:?} (core: {})",
            relative.display(),
            classification.project,
            classification.is_core
        );

        if classification.project.is_none() && self.unmatched_policy == UnmatchedPolicy::Skip {
            tracing::debug!("No project marker matched {}, skipping", path.display());
            return Some(EventReport {
                source: path.to_path_buf(),
                classification,
                destinations: Vec::new(),
                copy: CopyReport::default(),
                skipped: true,
            });
        }

        // Eligible paths always end in a file name with a shader extension.
        // Taken from the OS path, not the lossy segment view.
        let file_name = path.file_name()?;
        let destinations = self.destinations.plan(file_name, &classification);
        let copy = self.transferrer.copy_to_all(path, &destinations).await;

        tracing::debug!(
            "Mirrored {}: {} copied ({} bytes), {} failed",
            Path::new(file_name).display(),
            copy.copied,
            copy.bytes_written,
            copy.failed
        );

        Some(EventReport {
            source: path.to_path_buf(),
            classification,
            destinations,
            copy,
            skipped: false,
        })
    }

    /// Mirror every path of an event that left new content behind
    pub async fn handle_event(&self, event: &Event) -> Vec<EventReport> {
        let mut reports = Vec::new();
        for path in written_paths(event) {
            if let Some(report) = self.handle_path(path).await {
                reports.push(report);
            }
        }
        reports
    }
}

/// Paths holding fresh content after a save
///
/// Saves show up as creates, data modifications, or renames into place. The
/// source side of a rename and metadata-only changes are dropped. Backends
/// that cannot tell rename sides apart report `RenameMode::Any`; those paths
/// are kept only if they still exist.
fn written_paths(event: &Event) -> Vec<&PathBuf> {
    match event.kind {
        EventKind::Create(_)
        | EventKind::Modify(ModifyKind::Data(_) | ModifyKind::Any | ModifyKind::Name(RenameMode::To)) => {
            event.paths.iter().collect()
        }
        // Paths are [from, to]
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => event.paths.iter().skip(1).collect(),
        EventKind::Modify(ModifyKind::Name(RenameMode::Any)) => {
            event.paths.iter().filter(|path| path.exists()).collect()
        }
        _ => Vec::new(),
    }
}
