//! Section segmentation by confirmation-number anchors.

use super::patterns::ReportPatterns;

/// Split report text into per-reservation sections.
///
/// Each section starts at an anchor occurrence and runs up to the next
/// anchor, or the end of the text. Text before the first anchor is
/// discarded; no anchors yields no sections. Reservation blocks carry no
/// other reliable delimiter (no blank lines, no page breaks between
/// records), so the recurring header is the only structural signal; a
/// stray anchor-like substring inside a block over-splits it, an accepted
/// limitation.
pub fn segment_sections<'a>(text: &'a str, patterns: &ReportPatterns) -> Vec<&'a str> {
    let starts: Vec<usize> = patterns
        .anchor
        .find_iter(text)
        .map(|m| m.start())
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            &text[start..end]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::super::patterns::DEFAULT_PATTERNS;
    use super::*;

    #[test]
    fn test_one_section_per_anchor() {
        let text = "Arrivals Detailed\n\
                    Confirmation Number: A1\nGuest one\n\
                    Confirmation Number: B2\nGuest two\n\
                    Confirmation Number: C3\nGuest three";

        let sections = segment_sections(text, &DEFAULT_PATTERNS);
        assert_eq!(sections.len(), 3);
        assert!(sections[0].starts_with("Confirmation Number: A1"));
        assert!(sections[1].contains("Guest two"));
        assert!(sections[2].ends_with("Guest three"));
    }

    #[test]
    fn test_preamble_is_discarded() {
        let text = "Header junk before any record\nConfirmation Number: A1\nGuest";
        let sections = segment_sections(text, &DEFAULT_PATTERNS);
        assert_eq!(sections.len(), 1);
        assert!(!sections[0].contains("Header junk"));
    }

    #[test]
    fn test_no_anchors_no_sections() {
        assert!(segment_sections("nothing to see here", &DEFAULT_PATTERNS).is_empty());
        assert!(segment_sections("", &DEFAULT_PATTERNS).is_empty());
    }

    #[test]
    fn test_sections_reconstruct_the_input() {
        let text = "Confirmation Number: A1 first\nConfirmation Number: B2 second";
        let sections = segment_sections(text, &DEFAULT_PATTERNS);
        assert_eq!(sections.concat(), text);
    }
}
