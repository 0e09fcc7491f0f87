//! Annotated shader files.
//!
//! A single file holds the source of every stage of a program. A line
//! containing `#shader` followed by `vertex` or `fragment` starts the
//! source of that stage; every following line belongs to it until the next
//! marker. Lines before the first marker are dropped.
//!
//! ```text
//! #shader vertex
//! #version 330 core
//! ...
//! #shader fragment
//! #version 330 core
//! ...
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// The substring that marks a stage switch.
pub const MARKER: &str = "#shader";

/// A stage of a shader program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub const ALL: [ShaderStage; 2] = [ShaderStage::Vertex, ShaderStage::Fragment];

    /// The keyword used for this stage in marker lines and diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }

    /// The stage a marker line switches to, or `None` if it names no known
    /// stage. A marker naming both stages selects the vertex stage.
    fn from_marker(line: &str) -> Option<ShaderStage> {
        Self::ALL
            .into_iter()
            .find(|stage| line.contains(stage.name()))
    }
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The per-stage sources recovered from an annotated shader file.
///
/// Both stages are always present. A stage whose marker never appeared is
/// the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderProgramSource {
    vertex: String,
    fragment: String,
}

impl ShaderProgramSource {
    #[cfg(test)]
    fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    /// Splits an in-memory annotated shader.
    pub fn parse(text: &str) -> Self {
        let mut splitter = Splitter::default();
        for line in text.lines() {
            splitter.feed(line);
        }
        splitter.finish()
    }

    /// Splits an annotated shader read line by line from `reader`.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, String> {
        let mut splitter = Splitter::default();
        for line in reader.lines() {
            let line = line.map_err(|e| e.to_string())?;
            splitter.feed(&line);
        }
        Ok(splitter.finish())
    }

    /// Opens and splits the annotated shader file at `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| format!("Failed to open shader file {}: {}", path.display(), e))?;
        Self::from_reader(BufReader::new(file))
            .map_err(|e| format!("Failed to read shader file {}: {}", path.display(), e))
    }

    pub fn vertex(&self) -> &str {
        &self.vertex
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Returns the source of the given stage.
    pub fn source(&self, stage: ShaderStage) -> &str {
        match stage {
            ShaderStage::Vertex => &self.vertex,
            ShaderStage::Fragment => &self.fragment,
        }
    }

    /// Whether every stage has some source.
    pub fn is_complete(&self) -> bool {
        ShaderStage::ALL
            .into_iter()
            .all(|stage| !self.source(stage).is_empty())
    }

    /// Writes the stages back out in the annotated format. Splitting the
    /// result gives back the same stages, each ending in a newline if it
    /// is not empty.
    pub fn to_annotated(&self) -> String {
        let mut out = String::with_capacity(self.vertex.len() + self.fragment.len() + 32);
        for stage in ShaderStage::ALL {
            out.push_str(MARKER);
            out.push(' ');
            out.push_str(stage.name());
            out.push('\n');
            let text = self.source(stage);
            out.push_str(text);
            if !text.is_empty() && !text.ends_with('\n') {
                out.push('\n');
            }
        }
        out
    }
}

impl std::str::FromStr for ShaderProgramSource {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Line classifier state. `stage` is `None` until the first marker and is
/// never reset afterwards.
#[derive(Default)]
struct Splitter {
    stage: Option<ShaderStage>,
    out: ShaderProgramSource,
}

impl Splitter {
    fn feed(&mut self, line: &str) {
        if line.contains(MARKER) {
            match ShaderStage::from_marker(line) {
                Some(stage) => self.stage = Some(stage),
                None => log::warn!("Ignoring shader marker without a known stage: {:?}", line),
            }
            return;
        }

        let target = match self.stage {
            Some(ShaderStage::Vertex) => &mut self.out.vertex,
            Some(ShaderStage::Fragment) => &mut self.out.fragment,
            None => return,
        };
        target.push_str(line);
        target.push('\n');
    }

    fn finish(self) -> ShaderProgramSource {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use super::*;

    #[test]
    fn test_no_markers_yields_empty_stages() {
        let source = ShaderProgramSource::parse("void main() {}\nint x;\n");
        assert_eq!(source.vertex(), "");
        assert_eq!(source.fragment(), "");
        assert!(!source.is_complete());
    }

    #[test]
    fn test_single_vertex_stage() {
        let source = ShaderProgramSource::parse("#shader vertex\na\nb\nc");
        assert_eq!(source.vertex(), "a\nb\nc\n");
        assert_eq!(source.fragment(), "");
    }

    #[test]
    fn test_vertex_marker_without_content() {
        let source = ShaderProgramSource::parse("#shader vertex\n");
        assert_eq!(source, ShaderProgramSource::default());
    }

    #[test]
    fn test_switching_stages() {
        let input = "dropped\n#shader vertex\nA\n#shader fragment\nB\nC\n";
        let source = ShaderProgramSource::parse(input);
        assert_eq!(source.vertex(), "A\n");
        assert_eq!(source.fragment(), "B\nC\n");
    }

    #[test]
    fn test_returning_to_a_stage_appends() {
        let input = "#shader vertex\nA\n#shader fragment\nB\n#shader vertex\nC\n";
        let source = ShaderProgramSource::parse(input);
        assert_eq!(source.vertex(), "A\nC\n");
        assert_eq!(source.fragment(), "B\n");
    }

    #[test]
    fn test_unknown_marker_keeps_stage() {
        let input = "#shader vertex\nA\n#shader geometry\nB\n";
        let source = ShaderProgramSource::parse(input);
        assert_eq!(source.vertex(), "A\nB\n");
        assert_eq!(source.fragment(), "");
    }

    #[test]
    fn test_unknown_marker_before_any_stage_drops_lines() {
        let source = ShaderProgramSource::parse("#shader compute\nA\n");
        assert_eq!(source, ShaderProgramSource::default());
    }

    #[test]
    fn test_marker_naming_both_stages_selects_vertex() {
        let source = ShaderProgramSource::parse("#shader vertex fragment\nA\n");
        assert_eq!(source.vertex(), "A\n");
        assert_eq!(source.fragment(), "");
    }

    #[test]
    fn test_marker_is_matched_anywhere_in_line() {
        let source = ShaderProgramSource::parse("  // #shader fragment\nA\n");
        assert_eq!(source.fragment(), "A\n");
    }

    #[test]
    fn test_content_lines_kept_verbatim_and_in_order() {
        let input = "#shader fragment\n  z = 1;\n\n\ta = 2;   \n";
        let source = ShaderProgramSource::parse(input);
        assert_eq!(source.fragment(), "  z = 1;\n\n\ta = 2;   \n");
        assert_eq!(source.source(ShaderStage::Fragment), source.fragment());
    }

    #[test]
    fn test_parse_is_idempotent() {
        let input = "#shader vertex\nA\n#shader fragment\nB\n";
        assert_eq!(
            ShaderProgramSource::parse(input),
            ShaderProgramSource::parse(input)
        );
    }

    #[test]
    fn test_annotated_round_trip() {
        let input = "junk\n#shader fragment\nB\nC\n#shader vertex\nA\n";
        let source = ShaderProgramSource::parse(input);
        let reparsed = ShaderProgramSource::parse(&source.to_annotated());
        assert_eq!(reparsed, source);
        assert_eq!(
            source.to_annotated(),
            "#shader vertex\nA\n#shader fragment\nB\nC\n"
        );
    }

    #[test]
    fn test_annotated_terminates_unfinished_lines() {
        let source = ShaderProgramSource::new("A", "B");
        assert_eq!(source.to_annotated(), "#shader vertex\nA\n#shader fragment\nB\n");
        let reparsed = ShaderProgramSource::parse(&source.to_annotated());
        assert_eq!(reparsed, ShaderProgramSource::new("A\n", "B\n"));
    }

    #[test]
    fn test_annotated_empty_stages() {
        let reparsed = ShaderProgramSource::parse(&ShaderProgramSource::default().to_annotated());
        assert_eq!(reparsed, ShaderProgramSource::default());
    }

    #[test]
    fn test_parse_drops_carriage_returns() {
        let source = ShaderProgramSource::parse("#shader vertex\r\nA\r\n\r\n#shader fragment\r\nB\r\n");
        assert_eq!(source.vertex(), "A\n\n");
        assert_eq!(source.fragment(), "B\n");
    }

    #[test]
    fn test_from_reader_matches_parse() {
        let input = "#shader vertex\r\nA\r\n#shader fragment\nB\n";
        let source = ShaderProgramSource::from_reader(Cursor::new(input)).unwrap();
        assert_eq!(source, ShaderProgramSource::parse(input));
        assert_eq!(source.vertex(), "A\n");
    }

    #[test]
    fn test_from_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "#shader vertex\nA\n#shader fragment\nB\n").unwrap();
        let source = ShaderProgramSource::from_path(file.path()).unwrap();
        assert_eq!(source, ShaderProgramSource::new("A\n", "B\n"));
    }

    #[test]
    fn test_from_path_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ShaderProgramSource::from_path(dir.path().join("missing.shader")).unwrap_err();
        assert!(err.contains("missing.shader"));
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(ShaderStage::Vertex.to_string(), "vertex");
        assert_eq!(ShaderStage::Fragment.to_string(), "fragment");
    }
}
