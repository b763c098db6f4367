use crate::config::MirrorConfig;
use crate::path::SourcePath;
use std::path::Path;

/// Outcome of running a path through the [`ShaderFilter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterVerdict {
    /// A shader source that should be mirrored
    Eligible,
    /// Not below `res/shaders`
    OutsideShaderDir,
    /// Extension is not a recognized shader extension
    UnknownExtension,
    /// Below a build output directory (includes our own copies)
    BuildOutput,
    /// Already inside a core resource directory
    CoreResource,
}

impl FilterVerdict {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Self::Eligible)
    }
}

/// Decides whether a changed path is a shader source eligible for mirroring
///
/// Pure: the verdict depends only on the path string, never on the file system.
#[derive(Debug, Clone)]
pub struct ShaderFilter {
    resource_segment: String,
    shader_segment: String,
    core_segment: String,
    extensions: Vec<String>,
    excluded_segments: Vec<String>,
    excluded_prefixes: Vec<String>,
}

impl ShaderFilter {
    pub fn new(config: &MirrorConfig) -> Self {
        Self {
            resource_segment: config.resource_segment.clone(),
            shader_segment: config.shader_segment.clone(),
            core_segment: config.core_segment.clone(),
            extensions: config
                .extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            excluded_segments: config.excluded_segments.clone(),
            excluded_prefixes: config.excluded_prefixes.clone(),
        }
    }

    pub fn check(&self, path: &Path) -> FilterVerdict {
        let source = SourcePath::new(path);

        // Build output first so our own writes never get further than this
        if self.is_build_output(&source) {
            return FilterVerdict::BuildOutput;
        }

        if source.has_segment(&self.core_segment) {
            return FilterVerdict::CoreResource;
        }

        if !source.contains_run(&[self.resource_segment.as_str(), self.shader_segment.as_str()]) {
            return FilterVerdict::OutsideShaderDir;
        }

        match source.extension() {
            Some(ext) if self.extensions.contains(&ext) => FilterVerdict::Eligible,
            _ => FilterVerdict::UnknownExtension,
        }
    }

    pub fn is_eligible(&self, path: &Path) -> bool {
        self.check(path).is_eligible()
    }

    fn is_build_output(&self, source: &SourcePath) -> bool {
        self.excluded_segments.iter().any(|s| source.has_segment(s))
            || self
                .excluded_prefixes
                .iter()
                .any(|p| source.has_segment_prefix(p))
    }
}
