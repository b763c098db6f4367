use crate::config::{MirrorConfig, Project, ProjectMarker};
use crate::error::{MirrorError, Result};
use crate::path::SourcePath;
use glob::{MatchOptions, Pattern};
use std::path::Path;

/// Project a shader belongs to and whether it is a shared core resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// `None` when no marker matched
    pub project: Option<Project>,
    pub is_core: bool,
}

/// A compiled project marker
#[derive(Debug, Clone)]
struct ProjectRule {
    project: Project,
    pattern: Pattern,
    exclude: Vec<Pattern>,
}

impl ProjectRule {
    fn new(marker: &ProjectMarker) -> Result<Self> {
        Ok(Self {
            project: marker.project,
            pattern: substring_pattern(&marker.marker)?,
            exclude: marker
                .exclude
                .iter()
                .map(|ex| substring_pattern(ex))
                .collect::<Result<Vec<_>>>()?,
        })
    }

    /// True when some directory carries the marker and none carries an exclusion
    fn matches(&self, dirs: &[String]) -> bool {
        let hit = |pattern: &Pattern| dirs.iter().any(|dir| pattern.matches_with(dir, MATCH_OPTIONS));
        hit(&self.pattern) && !self.exclude.iter().any(hit)
    }
}

/// Markers are substrings of one directory name; anchor them loosely on both sides
fn substring_pattern(marker: &str) -> Result<Pattern> {
    Pattern::new(&format!("*{}*", marker)).map_err(|source| MirrorError::InvalidMarker {
        marker: marker.to_string(),
        source,
    })
}

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Classifies eligible shader paths by project
///
/// Rules are evaluated in order and the first match wins, so more specific
/// markers (`Net*Game`) must be listed before broader ones (`Game`). Only the
/// project directories in front of `res/shaders` are matched, one directory
/// name at a time: a shader called `GameHud.frag`, or one kept in a
/// `shaders/Network/Game` subfolder of the editor, still belongs to the editor.
#[derive(Debug, Clone)]
pub struct ProjectClassifier {
    rules: Vec<ProjectRule>,
    core_rules: Vec<ProjectRule>,
    shader_dir: [String; 2],
}

impl ProjectClassifier {
    pub fn new(config: &MirrorConfig) -> Result<Self> {
        let rules = config
            .project_markers
            .iter()
            .map(ProjectRule::new)
            .collect::<Result<Vec<_>>>()?;

        let core_rules: Vec<ProjectRule> = rules
            .iter()
            .filter(|rule| rule.project == config.core_project)
            .cloned()
            .collect();

        if core_rules.is_empty() {
            return Err(MirrorError::MissingCoreMarker {
                project: config.core_project.to_string(),
            });
        }

        Ok(Self {
            rules,
            core_rules,
            shader_dir: [config.resource_segment.clone(), config.shader_segment.clone()],
        })
    }

    /// Never fails; unmatched paths come back with `project: None`
    pub fn classify(&self, path: &Path) -> Classification {
        let source = SourcePath::new(path);
        let dirs = source.dirs_before_run(&[self.shader_dir[0].as_str(), self.shader_dir[1].as_str()]);

        let project = self
            .rules
            .iter()
            .find(|rule| rule.matches(dirs))
            .map(|rule| rule.project);

        // Independent of precedence: a core path stays core even if a more
        // specific marker claimed the project
        let is_core = self.core_rules.iter().any(|rule| rule.matches(dirs));

        Classification { project, is_core }
    }
}
