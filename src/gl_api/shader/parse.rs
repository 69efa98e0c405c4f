use crate::gl_api::shader::{ShaderError, StageType};

/// The vertex and fragment sources pulled out of a combined shader file.
///
/// A combined file looks like this:
///
/// ```text
/// #version 330 core
///
/// #shader vertex
/// layout(location = 0) in vec4 position;
/// void main() { gl_Position = position; }
///
/// #shader fragment
/// layout(location = 0) out vec4 color;
/// void main() { color = vec4(1.0); }
/// ```
///
/// Any line containing `#shader` switches the section that the following lines
/// get appended to, and is itself dropped. Text above the first `#shader` line
/// (usually just the `#version` directive) is copied to the top of both stages.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct ShaderProgramSource {
    pub vertex: String,
    pub fragment: String,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Section {
    Shared,
    Stage(StageType),
}

fn stage_for_directive(line: &str) -> Option<StageType> {
    if line.contains("vertex") {
        Some(StageType::Vertex)
    } else if line.contains("fragment") {
        Some(StageType::Fragment)
    } else {
        None
    }
}

impl ShaderProgramSource {
    pub fn parse(source: &str) -> Result<Self, ShaderError> {
        let mut shared = String::new();
        let mut vertex = None::<String>;
        let mut fragment = None::<String>;
        let mut section = Section::Shared;

        for (idx, line) in source.lines().enumerate() {
            if line.contains("#shader") {
                let stage = stage_for_directive(line).ok_or_else(|| ShaderError::UnknownStage {
                    line: idx + 1,
                    text: line.trim().into(),
                })?;
                // a directive with nothing under it still declares its stage
                match stage {
                    StageType::Vertex => vertex.get_or_insert_with(String::new),
                    StageType::Fragment => fragment.get_or_insert_with(String::new),
                };
                section = Section::Stage(stage);
                continue;
            }

            let buf = match section {
                Section::Shared => &mut shared,
                Section::Stage(StageType::Vertex) => vertex.get_or_insert_with(String::new),
                Section::Stage(StageType::Fragment) => fragment.get_or_insert_with(String::new),
            };
            buf.push_str(line);
            buf.push('\n');
        }

        let vertex = vertex.ok_or(ShaderError::MissingStage(StageType::Vertex))?;
        let fragment = fragment.ok_or(ShaderError::MissingStage(StageType::Fragment))?;

        Ok(ShaderProgramSource {
            vertex: format!("{}{}", shared, vertex),
            fragment: format!("{}{}", shared, fragment),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASIC: &str = "\
#shader vertex
#version 330 core
layout(location = 0) in vec4 position;
void main() { gl_Position = position; }

#shader fragment
#version 330 core
layout(location = 0) out vec4 color;
uniform vec4 u_Color;
void main() { color = u_Color; }
";

    #[test]
    fn splits_sections_and_drops_directives() {
        let src = ShaderProgramSource::parse(BASIC).unwrap();

        assert_eq!(
            src.vertex,
            "#version 330 core\nlayout(location = 0) in vec4 position;\nvoid main() { gl_Position = position; }\n\n"
        );
        assert!(src.fragment.starts_with("#version 330 core\n"));
        assert!(src.fragment.contains("uniform vec4 u_Color;\n"));
        assert!(!src.vertex.contains("#shader"));
        assert!(!src.fragment.contains("#shader"));
    }

    #[test]
    fn shared_prefix_goes_to_both_stages() {
        let src = ShaderProgramSource::parse(
            "#version 330 core\n#shader vertex\nvoid main() {}\n#shader fragment\nvoid main() {}\n",
        )
        .unwrap();

        assert_eq!(src.vertex, "#version 330 core\nvoid main() {}\n");
        assert_eq!(src.fragment, "#version 330 core\nvoid main() {}\n");
    }

    #[test]
    fn repeated_sections_append() {
        let src = ShaderProgramSource::parse(
            "#shader vertex\na\n#shader fragment\nb\n#shader vertex\nc\n",
        )
        .unwrap();

        assert_eq!(src.vertex, "a\nc\n");
        assert_eq!(src.fragment, "b\n");
    }

    #[test]
    fn directive_matching_is_by_substring() {
        let src = ShaderProgramSource::parse("  #shader   vertex // positions\nv\n#shader fragment\nf\n")
            .unwrap();
        assert_eq!(src.vertex, "v\n");
        assert_eq!(src.fragment, "f\n");
    }

    #[test]
    fn unknown_stage_reports_line() {
        let err = ShaderProgramSource::parse("#shader vertex\nv\n\n#shader geometry\ng\n").unwrap_err();
        match err {
            ShaderError::UnknownStage { line, text } => {
                assert_eq!(line, 4);
                assert_eq!(text, "#shader geometry");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn missing_stages_are_errors() {
        let err = ShaderProgramSource::parse("#shader vertex\nv\n").unwrap_err();
        assert!(matches!(err, ShaderError::MissingStage(StageType::Fragment)));

        let err = ShaderProgramSource::parse("#shader fragment\nf\n").unwrap_err();
        assert!(matches!(err, ShaderError::MissingStage(StageType::Vertex)));

        let err = ShaderProgramSource::parse("").unwrap_err();
        assert!(matches!(err, ShaderError::MissingStage(StageType::Vertex)));
    }

    #[test]
    fn empty_stage_body_is_allowed() {
        let src = ShaderProgramSource::parse("#shader fragment\nf\n#shader vertex").unwrap();
        assert_eq!(src.vertex, "");
        assert_eq!(src.fragment, "f\n");
    }

    #[test]
    fn crlf_lines_are_normalized() {
        let src = ShaderProgramSource::parse("#shader vertex\r\nv\r\n#shader fragment\r\nf\r\n").unwrap();
        assert_eq!(src.vertex, "v\n");
        assert_eq!(src.fragment, "f\n");
    }
}
