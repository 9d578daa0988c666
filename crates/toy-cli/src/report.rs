//! Diagnostic rendering with source excerpts

use std::io;
use std::ops::Range;

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use toy_ast::{Diagnostic, Severity, Span};

type FileSpan = (String, Range<usize>);

/// Ariadne counts characters, spans count bytes
fn char_range(source: &str, span: Span) -> Range<usize> {
    let to_chars = |offset: usize| {
        source
            .get(..offset)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(offset)
    };
    to_chars(span.start)..to_chars(span.end)
}

fn build_report(diagnostic: &Diagnostic, file: &str, source: &str, color: bool) -> Report<'static, FileSpan> {
    let (kind, label_color) = match diagnostic.severity {
        Severity::Error => (ReportKind::Error, Color::Red),
        Severity::Warning => (ReportKind::Warning, Color::Yellow),
    };
    let range = char_range(source, diagnostic.span);

    let mut builder = Report::build(kind, file.to_string(), range.start)
        .with_config(Config::default().with_color(color))
        .with_code(&diagnostic.code)
        .with_message(&diagnostic.message)
        .with_label(
            Label::new((file.to_string(), range))
                .with_message(&diagnostic.message)
                .with_color(label_color),
        );

    for related in &diagnostic.related {
        builder = builder.with_label(
            Label::new((file.to_string(), char_range(source, related.span)))
                .with_message(&related.label)
                .with_color(Color::Blue),
        );
    }

    builder.finish()
}

/// Print a diagnostic to stderr
pub fn report(diagnostic: &Diagnostic, file: &str, source: &str) -> io::Result<()> {
    build_report(diagnostic, file, source, true).eprint((file.to_string(), Source::from(source)))
}

pub fn report_all(diagnostics: &[Diagnostic], file: &str, source: &str) -> io::Result<()> {
    for diagnostic in diagnostics {
        report(diagnostic, file, source)?;
    }
    Ok(())
}

/// Render a diagnostic without color
pub fn render(diagnostic: &Diagnostic, file: &str, source: &str) -> io::Result<String> {
    let mut buf = Vec::new();
    build_report(diagnostic, file, source, false)
        .write((file.to_string(), Source::from(source)), &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use toy_ast::DiagnosticKind;

    #[test]
    fn test_char_range_counts_characters() {
        let source = "dec s = \"é\";\ndec log = 1;";
        let start = source.find("log").unwrap();
        let span = Span::new(start, start + 3, 2, 5);
        let range = char_range(source, span);
        assert_eq!(range.start, start - 1);
        assert_eq!(range.len(), 3);
    }

    #[test]
    fn test_render_includes_code_and_related_label() {
        let source = "dec x = 1;\ndec x = 2;";
        let diagnostic = Diagnostic::error(
            DiagnosticKind::DuplicateDeclaration,
            "E-SCOPE-001",
            "duplicate declaration of 'x'",
            Span::new(15, 16, 2, 5),
        )
        .with_related(Span::new(4, 5, 1, 5), "first declared here");

        let text = render(&diagnostic, "main.toy", source).unwrap();
        assert!(text.contains("E-SCOPE-001"), "{text}");
        assert!(text.contains("duplicate declaration of 'x'"), "{text}");
        assert!(text.contains("first declared here"), "{text}");
        assert!(text.contains("main.toy"), "{text}");
    }
}
