//! Section extraction from raw map text.
//!
//! Map text is line-oriented: a header line like `[terrain]` opens a section
//! that runs to the next header or the end of input. Extraction is a
//! non-destructive index scan: a [`LineBuffer`] marks consumed runs instead
//! of mutating the line sequence, so repeated extraction of a label walks
//! forward through every occurrence.

/// The section labels the grammar knows about.
pub const SECTION_LABELS: [&str; 6] = ["map", "grid", "background", "terrain", "aura", "token"];

/// Parse a line as a section header, returning the canonical label.
///
/// A header is `[label]` with optional surrounding whitespace, label
/// case-insensitive.
pub fn header_label(line: &str) -> Option<&'static str> {
    let inner = line.trim().strip_prefix('[')?.strip_suffix(']')?;
    SECTION_LABELS
        .iter()
        .find(|label| inner.eq_ignore_ascii_case(label))
        .copied()
}

/// A labeled run of content lines, header excluded, blanks stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub label: &'static str,
    pub lines: Vec<String>,
}

impl Section {
    pub fn new(label: &'static str, lines: Vec<String>) -> Self {
        Self { label, lines }
    }
}

/// The split input plus consumption state for one parse.
#[derive(Debug)]
pub struct LineBuffer<'a> {
    lines: Vec<&'a str>,
    taken: Vec<bool>,
}

impl<'a> LineBuffer<'a> {
    pub fn new(source: &'a str) -> Self {
        let lines: Vec<&str> = source.lines().collect();
        let taken = vec![false; lines.len()];
        Self { lines, taken }
    }

    /// Extract the first remaining section with the given label.
    ///
    /// The section's lines (header included) are marked consumed so the next
    /// call finds the next occurrence. Returns `None` when no unconsumed
    /// header for `label` remains.
    pub fn take_section(&mut self, label: &str) -> Option<Section> {
        let label = canonical(label)?;
        let start = (0..self.lines.len())
            .find(|&i| !self.taken[i] && header_label(self.lines[i]) == Some(label))?;
        let end = (start + 1..self.lines.len())
            .find(|&i| !self.taken[i] && header_label(self.lines[i]).is_some())
            .unwrap_or(self.lines.len());

        let mut body = Vec::new();
        for i in start..end {
            // lines consumed by an earlier extraction are removed text,
            // not content of this section
            if self.taken[i] {
                continue;
            }
            self.taken[i] = true;
            if i == start {
                continue;
            }
            let line = self.lines[i].trim();
            if !line.is_empty() {
                body.push(line.to_string());
            }
        }

        Some(Section::new(label, body))
    }

    /// Extract every remaining section with the given label, in order.
    pub fn take_sections(&mut self, label: &str) -> Vec<Section> {
        let mut sections = Vec::new();
        while let Some(section) = self.take_section(label) {
            sections.push(section);
        }
        sections
    }
}

fn canonical(label: &str) -> Option<&'static str> {
    SECTION_LABELS
        .iter()
        .find(|candidate| label.eq_ignore_ascii_case(candidate))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_label() {
        assert_eq!(header_label("[map]"), Some("map"));
        assert_eq!(header_label("  [TERRAIN]  "), Some("terrain"));
        assert_eq!(header_label("[legend]"), None);
        assert_eq!(header_label("name=[map]"), None);
        assert_eq!(header_label("[map] extra"), None);
    }

    #[test]
    fn test_take_section_runs_to_next_header() {
        let source = "[map]\nname=Crypt\n\ngrid=4x4\n[terrain]\nname=Rubble";
        let mut buffer = LineBuffer::new(source);

        let map = buffer.take_section("map").unwrap();
        assert_eq!(map.label, "map");
        assert_eq!(map.lines, vec!["name=Crypt", "grid=4x4"]);
    }

    #[test]
    fn test_take_section_runs_to_end() {
        let mut buffer = LineBuffer::new("[token]\nname=Hero\nurl=https://x/y.png");
        let token = buffer.take_section("token").unwrap();
        assert_eq!(token.lines.len(), 2);
    }

    #[test]
    fn test_take_section_absent() {
        let mut buffer = LineBuffer::new("[map]\nname=Crypt");
        assert!(buffer.take_section("aura").is_none());
    }

    #[test]
    fn test_take_sections_collects_all_occurrences() {
        let source = "[terrain]\nname=A\n[token]\nname=T\n[terrain]\nname=B";
        let mut buffer = LineBuffer::new(source);

        let terrain = buffer.take_sections("terrain");
        assert_eq!(terrain.len(), 2);
        assert_eq!(terrain[0].lines, vec!["name=A"]);
        assert_eq!(terrain[1].lines, vec!["name=B"]);

        // the token section is untouched
        let token = buffer.take_section("token").unwrap();
        assert_eq!(token.lines, vec!["name=T"]);
    }

    #[test]
    fn test_take_section_is_repeatable_without_mutation_aliasing() {
        let mut buffer = LineBuffer::new("[aura]\nname=Glow\n[aura]\nname=Haze");
        assert_eq!(
            buffer.take_section("aura").unwrap().lines,
            vec!["name=Glow"]
        );
        assert_eq!(
            buffer.take_section("aura").unwrap().lines,
            vec!["name=Haze"]
        );
        assert!(buffer.take_section("aura").is_none());
    }

    #[test]
    fn test_consumed_run_excluded_from_later_extraction() {
        let source = "[terrain]\nname=Rubble\n[map]\nname=Crypt\ngrid=9x9\n[terrain]\nname=Pit";
        let mut buffer = LineBuffer::new(source);

        let map = buffer.take_section("map").unwrap();
        assert_eq!(map.lines, vec!["name=Crypt", "grid=9x9"]);

        // the first terrain run ends where [map] stood; the map's lines
        // must not bleed into it
        let terrain = buffer.take_sections("terrain");
        assert_eq!(terrain.len(), 2);
        assert_eq!(terrain[0].lines, vec!["name=Rubble"]);
        assert_eq!(terrain[1].lines, vec!["name=Pit"]);
    }

    #[test]
    fn test_blank_lines_stripped() {
        let mut buffer = LineBuffer::new("[map]\n\n  \nname=Crypt\n\n");
        assert_eq!(buffer.take_section("map").unwrap().lines, vec!["name=Crypt"]);
    }

    #[test]
    fn test_case_insensitive_label_request() {
        let mut buffer = LineBuffer::new("[MAP]\nname=Crypt");
        assert!(buffer.take_section("Map").is_some());
    }
}
