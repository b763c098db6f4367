use crate::classify::Classification;
use crate::config::{BuildConfig, DestinationPolicy, DestinationTemplate, MirrorConfig, Project};
use std::ffi::OsStr;
use std::path::PathBuf;

/// A single file a shader is mirrored to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub project: Project,
    pub build: BuildConfig,
    pub path: PathBuf,
}

/// Maps a shader file name onto every configured destination template
#[derive(Debug, Clone)]
pub struct DestinationBuilder {
    templates: Vec<DestinationTemplate>,
    shader_segment: String,
    core_segment: String,
    policy: DestinationPolicy,
}

impl DestinationBuilder {
    pub fn new(config: &MirrorConfig) -> Self {
        Self {
            templates: config.destinations.clone(),
            shader_segment: config.shader_segment.clone(),
            core_segment: config.core_segment.clone(),
            policy: config.destination_policy,
        }
    }

    /// One destination per template, in template order
    ///
    /// Core resources go to `res/core-res/shaders` instead of `res/shaders`.
    /// The file name is used as-is, so non-UTF-8 names survive the copy.
    pub fn build(&self, file_name: &OsStr, is_core: bool) -> Vec<Destination> {
        self.templates
            .iter()
            .map(|template| self.destination(template, file_name, is_core))
            .collect()
    }

    /// Destinations for a classified source, honouring the destination policy
    pub fn plan(&self, file_name: &OsStr, classification: &Classification) -> Vec<Destination> {
        let destinations = self.build(file_name, classification.is_core);

        match (self.policy, classification.project) {
            (DestinationPolicy::All, _) => destinations,
            // Every project ships the core resources
            (DestinationPolicy::ClassifiedProject, _) if classification.is_core => destinations,
            (DestinationPolicy::ClassifiedProject, Some(project)) => destinations
                .into_iter()
                .filter(|d| d.project == project)
                .collect(),
            (DestinationPolicy::ClassifiedProject, None) => destinations,
        }
    }

    pub fn template_count(&self) -> usize {
        self.templates.len()
    }

    fn destination(&self, template: &DestinationTemplate, file_name: &OsStr, is_core: bool) -> Destination {
        let mut path = template.resource_dir.clone();
        if is_core {
            path.push(&self.core_segment);
        }
        path.push(&self.shader_segment);
        path.push(file_name);

        Destination {
            project: template.project,
            build: template.build,
            path,
        }
    }
}
