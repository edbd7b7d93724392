/// Strips characters that could corrupt the display surface.
///
/// The browser edition routes user-authored text through an HTML
/// sanitizer before insertion; in a terminal the dangerous channel is
/// control and escape bytes, so those are removed instead. Newlines
/// and tabs survive, tabs normalized to spaces.
pub fn sanitize(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .map(|c| if c == '\t' { ' ' } else { c })
        .collect()
}

/// Single-line variant for titles and list entries.
pub fn sanitize_line(input: &str) -> String {
    sanitize(input).replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_bytes_are_stripped() {
        assert_eq!(sanitize("a\x1b[31mb\x07c"), "a[31mbc");
    }

    #[test]
    fn newlines_survive_multiline() {
        assert_eq!(sanitize("linha um\nlinha dois"), "linha um\nlinha dois");
    }

    #[test]
    fn line_variant_flattens() {
        assert_eq!(sanitize_line("um\ndois"), "um dois");
    }
}
