use crate::models::RawBlock;

pub const DELIMITER: &str = "---";

/// Cuts the buffer into (metadata, body) pairs. Segment 0 is preamble and is
/// discarded; the remaining segments alternate metadata and body. A `---`
/// line inside a body is still treated as a boundary.
pub fn split_blocks(text: &str) -> Vec<RawBlock<'_>> {
    let segments = split_segments(text);
    let mut blocks = Vec::new();

    let mut index = 1;
    while index < segments.len() {
        let metadata = segments[index];
        let body = segments.get(index + 1).copied().unwrap_or("");
        index += 2;

        if metadata.trim().is_empty() && body.trim().is_empty() {
            continue;
        }
        blocks.push(RawBlock { metadata, body });
    }

    blocks
}

fn split_segments(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let line_end = offset + line.len();
        if is_delimiter_line(line) {
            segments.push(&text[start..offset]);
            start = line_end;
        }
        offset = line_end;
    }
    segments.push(&text[start..]);

    segments
}

fn is_delimiter_line(line: &str) -> bool {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);
    line == DELIMITER
}

#[cfg(test)]
mod tests {
    use super::split_blocks;

    #[test]
    fn splits_single_block() {
        let blocks = split_blocks("---\ntitle: T\ndate: 2024-09-12\n---\nBody");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].metadata, "title: T\ndate: 2024-09-12\n");
        assert_eq!(blocks[0].body, "Body");
    }

    #[test]
    fn lone_delimiter_produces_nothing() {
        assert!(split_blocks("---").is_empty());
        assert!(split_blocks("---\n").is_empty());
        assert!(split_blocks("").is_empty());
    }

    #[test]
    fn preamble_is_discarded() {
        let blocks = split_blocks("scratch text\n---\ntitle: A\n---\nbody a\n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].metadata, "title: A\n");
        assert_eq!(blocks[0].body, "body a\n");
    }

    #[test]
    fn trailing_metadata_without_body_gets_empty_body() {
        let blocks = split_blocks("---\ntitle: A\n---\nbody\n---\ntitle: B\n");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].metadata, "title: B\n");
        assert_eq!(blocks[1].body, "");
    }

    #[test]
    fn empty_pairs_are_dropped() {
        let blocks = split_blocks("---\n\n---\n   \n---\ntitle: A\n---\nbody\n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].metadata, "title: A\n");
    }

    #[test]
    fn delimiter_must_be_whole_line() {
        let blocks = split_blocks("---\ntitle: A\n---\nsome --- dashes\n----\nend\n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].body, "some --- dashes\n----\nend\n");
    }

    #[test]
    fn tolerates_crlf_line_endings() {
        let blocks = split_blocks("---\r\ntitle: A\r\n---\r\nbody\r\n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].metadata, "title: A\r\n");
        assert_eq!(blocks[0].body, "body\r\n");
    }

    #[test]
    fn delimiter_inside_body_starts_new_segment() {
        let blocks = split_blocks("---\ntitle: A\n---\nline one\n---\nline two\n");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].body, "line one\n");
        // The text after the inner delimiter is read as the metadata of a
        // second pair with no body.
        assert_eq!(blocks[1].metadata, "line two\n");
        assert_eq!(blocks[1].body, "");
    }
}
