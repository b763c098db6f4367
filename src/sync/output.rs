use crate::config::Project;
use crate::sync::EventReport;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

/// JSON output mode for machine-readable mirror events
/// Uses NDJSON format (newline-delimited JSON)
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MirrorEvent {
    Start {
        root: PathBuf,
        destinations: usize,
        dry_run: bool,
    },
    Modified {
        path: PathBuf,
        project: Option<Project>,
        is_core: bool,
        destinations: usize,
        copied: usize,
        failed: usize,
    },
    Skipped {
        path: PathBuf,
        reason: String,
    },
    Stop,
}

impl MirrorEvent {
    /// Emit this event as JSON to stdout
    pub fn emit(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            println!("{}", json);
        }
    }

    pub fn from_report(report: &EventReport) -> Self {
        if report.skipped {
            return Self::Skipped {
                path: report.source.clone(),
                reason: "no project marker matched".to_string(),
            };
        }

        Self::Modified {
            path: report.source.clone(),
            project: report.classification.project,
            is_core: report.classification.is_core,
            destinations: report.destinations.len(),
            copied: report.copy.copied,
            failed: report.copy.failed,
        }
    }
}

/// Prints the per-event diagnostic line
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    quiet: bool,
    json: bool,
}

impl Reporter {
    pub fn new(quiet: bool, json: bool) -> Self {
        Self { quiet, json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Emitted for every event that passed the filter, whatever the copies did
    pub fn report(&self, report: &EventReport) {
        if self.json {
            MirrorEvent::from_report(report).emit();
        } else if !self.quiet {
            println!("{}", Self::line(report));
        }
    }

    pub fn line(report: &EventReport) -> String {
        let header = format!("File {} has been modified.", report.source.display());
        if report.skipped {
            return format!("{} {}", header, "(no project matched, skipped)".bright_black());
        }

        let project = report
            .classification
            .project
            .map(|p| p.to_string())
            .unwrap_or_else(|| "unmatched".to_string());
        let core = if report.classification.is_core { ", core resource" } else { "" };

        let (count, verb) = if report.copy.planned > 0 {
            (report.copy.planned, "planned")
        } else {
            (report.copy.copied, "copied")
        };

        format!(
            "{} {}",
            header,
            format!("[{}{}] {}/{} {}", project, core, count, report.destinations.len(), verb).bright_black()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Classification;
    use crate::sync::transfer::CopyReport;

    fn report(skipped: bool) -> EventReport {
        EventReport {
            source: PathBuf::from("ORNG-Core/res/shaders/lit.frag"),
            classification: Classification {
                project: Some(Project::Core),
                is_core: true,
            },
            destinations: Vec::new(),
            copy: CopyReport {
                copied: 3,
                failed: 9,
                planned: 0,
                bytes_written: 30,
            },
            skipped,
        }
    }

    #[test]
    fn test_serialize_start_event() {
        let event = MirrorEvent::Start {
            root: PathBuf::from("/work"),
            destinations: 12,
            dry_run: false,
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"start"#));
        assert!(json.contains(r#""destinations":12"#));
    }

    #[test]
    fn test_serialize_modified_event() {
        let json = serde_json::to_string(&MirrorEvent::from_report(&report(false))).unwrap();
        assert!(json.contains(r#""type":"modified"#));
        assert!(json.contains(r#""project":"core"#));
        assert!(json.contains(r#""is_core":true"#));
        assert!(json.contains(r#""copied":3"#));
        assert!(json.contains(r#""failed":9"#));
    }

    #[test]
    fn test_serialize_skipped_event() {
        let json = serde_json::to_string(&MirrorEvent::from_report(&report(true))).unwrap();
        assert!(json.contains(r#""type":"skipped"#));
        assert!(json.contains("no project marker matched"));
    }

    #[test]
    fn test_serialize_stop_event() {
        let json = serde_json::to_string(&MirrorEvent::Stop).unwrap();
        assert_eq!(json, r#"{"type":"stop"}"#);
    }

    #[test]
    fn test_line_identifies_source() {
        colored::control::set_override(false);
        let line = Reporter::line(&report(false));
        assert!(line.starts_with("File ORNG-Core/res/shaders/lit.frag has been modified."));
        assert!(line.contains("[core, core resource] 3/0 copied"));
    }
}
