//! `@param` parsing.

use super::markers;
use crate::error::{Error, Result};
use crate::model::Parameter;
use crate::unindent::unindent_hanging;

/// Build a [`Parameter`] from the text captured by [`markers::param`].
///
/// `block` is only used to report where a malformed parameter came from.
pub fn parse_param(captured: &str, block: &str) -> Result<Parameter> {
    // Continuation lines keep their indent until the prose is unindented.
    let spec = captured.trim_start();
    let (types, rest) = markers::types(spec);
    let (name, rest) = markers::param_name(&rest).ok_or_else(|| Error::InvalidParam {
        param: spec.trim().to_string(),
        block: block.to_string(),
    })?;

    Ok(Parameter {
        name: name.name,
        optional: name.optional,
        default: name.default.filter(|_| name.optional),
        types,
        guide_markdown: unindent_hanging(&rest).trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_param_with_types_and_prose() {
        let param = parse_param(" {String|Object} url\n  the URL to request", "").unwrap();
        assert_eq!(param.name, "url");
        assert!(!param.optional);
        assert_eq!(param.default, None);
        assert_eq!(param.types, vec!["String", "Object"]);
        assert_eq!(param.guide_markdown, "the URL to request");
    }

    #[test]
    fn optional_param_with_default_and_inline_prose() {
        let param = parse_param(
            " {Number} [options.duration=300]\n    Duration of the animation\n    in milliseconds.",
            "",
        )
        .unwrap();
        assert_eq!(param.name, "options.duration");
        assert!(param.optional);
        assert_eq!(param.default.as_deref(), Some("300"));
        assert_eq!(param.types, vec!["Number"]);
        assert_eq!(
            param.guide_markdown,
            "Duration of the animation\nin milliseconds."
        );
    }

    #[test]
    fn prose_on_marker_line_keeps_continuation_indent() {
        let param = parse_param(" target The selector\n  to replace\n    nested", "").unwrap();
        assert_eq!(param.name, "target");
        assert_eq!(param.guide_markdown, "The selector\nto replace\n  nested");
    }

    #[test]
    fn wide_marker_gap_keeps_relative_indent() {
        let param = parse_param("   url\n  desc\n    code()", "").unwrap();
        assert_eq!(param.name, "url");
        assert_eq!(param.guide_markdown, "desc\n  code()");
    }

    #[test]
    fn paragraphs_keep_blank_separator() {
        let param = parse_param(" x\n  first para\n    \n  second para", "").unwrap();
        assert_eq!(param.guide_markdown, "first para\n\nsecond para");
    }

    #[test]
    fn untyped_param() {
        let param = parse_param(" [options]", "").unwrap();
        assert!(param.types.is_empty());
        assert!(param.optional);
        assert_eq!(param.guide_markdown, "");
    }

    #[test]
    fn missing_name_is_an_error() {
        let err = parse_param(" {String}", "@method up.foo\n@param {String}").unwrap_err();
        match err {
            Error::InvalidParam { param, block } => {
                assert_eq!(param, "{String}");
                assert!(block.contains("@method up.foo"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
