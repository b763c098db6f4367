use std::path::Path;

/// A watched path broken into segments
///
/// Both `/` and `\` are treated as separators so paths reported by a Windows
/// watcher and paths written in tests classify the same way on every host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePath {
    segments: Vec<String>,
}

impl SourcePath {
    pub fn new(path: &Path) -> Self {
        let raw = path.to_string_lossy();
        let segments = raw
            .split(['/', '\\'])
            .filter(|s| !s.is_empty() && *s != ".")
            .map(str::to_string)
            .collect();

        Self { segments }
    }

    #[cfg(test)]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Last segment of the path
    pub fn file_name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Lowercased extension of the last segment, without the dot
    ///
    /// Dotfiles such as `.glsl` have no extension, matching `Path::extension`.
    pub fn extension(&self) -> Option<String> {
        let name = self.file_name()?;
        let (stem, ext) = name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    /// Directory segments, without the file name
    pub fn dirs(&self) -> &[String] {
        match self.segments.split_last() {
            Some((_, parents)) => parents,
            None => &[],
        }
    }

    /// Directory segments in front of the first occurrence of `run`
    ///
    /// All directory segments when `run` does not occur.
    pub fn dirs_before_run(&self, run: &[&str]) -> &[String] {
        let dirs = self.dirs();
        match self.position_of_run(run) {
            Some(pos) if pos <= dirs.len() => &dirs[..pos],
            _ => dirs,
        }
    }

    pub fn has_segment(&self, name: &str) -> bool {
        self.segments.iter().any(|s| s == name)
    }

    pub fn has_segment_prefix(&self, prefix: &str) -> bool {
        self.segments.iter().any(|s| s.starts_with(prefix))
    }

    /// Check whether `run` appears as consecutive segments anywhere in the path
    pub fn contains_run(&self, run: &[&str]) -> bool {
        run.is_empty() || self.position_of_run(run).is_some()
    }

    fn position_of_run(&self, run: &[&str]) -> Option<usize> {
        if run.is_empty() {
            return None;
        }
        self.segments
            .windows(run.len())
            .position(|window| window.iter().zip(run).all(|(a, b)| a == b))
    }
}
