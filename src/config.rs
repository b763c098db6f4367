//! Compiled-in mirroring table.
//!
//! Nothing here is read from disk or the command line except the workspace
//! root. A [`MirrorConfig`] is built once at startup and handed to the engine
//! by reference; tests build one around a temporary directory instead.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Directory that holds a project's runtime resources
pub const RESOURCE_SEGMENT: &str = "res";

/// Directory under [`RESOURCE_SEGMENT`] that holds shader sources
pub const SHADER_SEGMENT: &str = "shaders";

/// Sibling of [`SHADER_SEGMENT`]'s parent used for shared core resources
pub const CORE_RESOURCE_SEGMENT: &str = "core-res";

pub const SHADER_EXTENSIONS: &[&str] = &["glsl", "vert", "frag", "compute", "tess", "comp"];

/// Segments that mark build output; events under them are our own copies
pub const BUILD_OUTPUT_SEGMENTS: &[&str] = &["out", "build"];

pub const BUILD_OUTPUT_PREFIXES: &[&str] = &["cmake-build-"];

/// Project markers, most specific first, with the substrings that veto them
const PROJECT_MARKERS: &[(&str, &[&str], Project)] = &[
    ("Net*Game", &[], Project::NetGame),
    ("ORNG-Core", &[], Project::Core),
    ("ORNG-Editor", &[], Project::Editor),
    ("ORNG-Runtime", &[], Project::Runtime),
    ("HW-Monitor", &[], Project::Monitor),
    ("Game", &["Net"], Project::Game),
];

/// (project, build directory name, debug preset, release preset)
const BUILD_LAYOUT: &[(Project, &str, &str, &str)] = &[
    (Project::Core, "ORNG-Core", "x64-Debug", "x64-Release-2"),
    (Project::Editor, "ORNG-Editor", "x64-Debug", "x64-Release-2"),
    (Project::Runtime, "ORNG-Runtime", "x64-Debug", "x64-Release-2"),
    (Project::Game, "Game", "x64-Debug", "x64-Release-2"),
    (Project::NetGame, "NetGame", "x64-Debug", "x64-Release-2"),
    (Project::Monitor, "HW-Monitor", "x64-Debug-2", "x64-Release-2"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Project {
    Core,
    Editor,
    Runtime,
    Game,
    NetGame,
    Monitor,
}

impl Project {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Editor => "editor",
            Self::Runtime => "runtime",
            Self::Game => "game",
            Self::NetGame => "net-game",
            Self::Monitor => "monitor",
        }
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildConfig {
    Debug,
    Release,
}

/// Which destination templates an eligible event is copied to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DestinationPolicy {
    /// Every template, whatever project the source belongs to
    #[default]
    All,

    /// Only the templates of the classified project
    ///
    /// Core resources still go to every template because every project
    /// bundles a copy of them.
    ClassifiedProject,
}

/// What to do with an eligible path that matches no project marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnmatchedPolicy {
    /// Copy it to every destination as a plain (non-core) resource
    #[default]
    SyncAll,

    /// Report it and copy nothing
    Skip,
}

/// Substring marker (with `*` wildcards) identifying a project directory
///
/// Markers match within a single directory name. `exclude` lists substrings
/// that, found in any project directory, stop this marker from claiming the
/// path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectMarker {
    pub marker: String,
    pub exclude: Vec<String>,
    pub project: Project,
}

/// One {project, build configuration} resource directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationTemplate {
    pub project: Project,
    pub build: BuildConfig,
    /// The `res` directory of the build output; shaders land below it
    pub resource_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct MirrorConfig {
    pub workspace_root: PathBuf,
    pub resource_segment: String,
    pub shader_segment: String,
    pub core_segment: String,
    pub extensions: Vec<String>,
    pub excluded_segments: Vec<String>,
    pub excluded_prefixes: Vec<String>,
    /// Evaluated top-down; first match wins
    pub project_markers: Vec<ProjectMarker>,
    pub core_project: Project,
    pub destinations: Vec<DestinationTemplate>,
    pub destination_policy: DestinationPolicy,
    pub unmatched_policy: UnmatchedPolicy,
}

impl MirrorConfig {
    /// The built-in table, with destinations resolved under `workspace_root`
    pub fn builtin(workspace_root: impl Into<PathBuf>) -> Self {
        let workspace_root = workspace_root.into();
        let destinations = builtin_destinations(&workspace_root);

        Self {
            workspace_root,
            resource_segment: RESOURCE_SEGMENT.to_string(),
            shader_segment: SHADER_SEGMENT.to_string(),
            core_segment: CORE_RESOURCE_SEGMENT.to_string(),
            extensions: to_strings(SHADER_EXTENSIONS),
            excluded_segments: to_strings(BUILD_OUTPUT_SEGMENTS),
            excluded_prefixes: to_strings(BUILD_OUTPUT_PREFIXES),
            project_markers: PROJECT_MARKERS
                .iter()
                .map(|&(marker, exclude, project)| ProjectMarker {
                    marker: marker.to_string(),
                    exclude: to_strings(exclude),
                    project,
                })
                .collect(),
            core_project: Project::Core,
            destinations,
            destination_policy: DestinationPolicy::default(),
            unmatched_policy: UnmatchedPolicy::default(),
        }
    }

    pub fn with_destination_policy(mut self, policy: DestinationPolicy) -> Self {
        self.destination_policy = policy;
        self
    }

    pub fn with_unmatched_policy(mut self, policy: UnmatchedPolicy) -> Self {
        self.unmatched_policy = policy;
        self
    }
}

fn builtin_destinations(root: &Path) -> Vec<DestinationTemplate> {
    let build_root = root.join("out").join("build");

    BUILD_LAYOUT
        .iter()
        .flat_map(|&(project, dir, debug, release)| {
            [(BuildConfig::Debug, debug), (BuildConfig::Release, release)]
                .into_iter()
                .map(move |(build, preset)| (project, dir, build, preset))
        })
        .map(|(project, dir, build, preset)| DestinationTemplate {
            project,
            build,
            resource_dir: build_root.join(preset).join(dir).join(RESOURCE_SEGMENT),
        })
        .collect()
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
