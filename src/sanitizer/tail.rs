use regex::{Regex, RegexBuilder};

// Sections at the end of an article that only hold link lists and citations
pub const TAIL_SECTIONS: &[&str] = &["See Also", "References", "External Links", "Further Reading"];

// Cuts an article before its trailing link/citation sections
#[derive(Clone, Debug)]
pub struct TailTruncator {
    // None when there are no sections to look for
    headings: Option<Regex>,
}

impl TailTruncator {
    pub fn new<S: AsRef<str>>(sections: &[S]) -> Self {
        // Every section is accepted both as "==Name==" and "== Name =="
        let alternatives: Vec<_> = sections
            .iter()
            .map(|section| section.as_ref().trim())
            .filter(|section| !section.is_empty())
            .flat_map(|section| [format!("=={}==", section), format!("== {} ==", section)])
            .map(|heading| regex::escape(&heading))
            .collect();

        if alternatives.is_empty() {
            return Self { headings: None };
        }

        // The pattern only contains escaped literals, so it always compiles
        let headings = RegexBuilder::new(&alternatives.join("|"))
            .case_insensitive(true)
            .build()
            .unwrap();

        Self {
            headings: Some(headings),
        }
    }

    // The leftmost match is the earliest heading of the whole set
    pub fn truncate<'a>(&self, text: &'a str) -> &'a str {
        match self.headings.as_ref().and_then(|re| re.find(text)) {
            Some(m) => &text[..m.start()],
            None => text,
        }
    }
}

impl Default for TailTruncator {
    fn default() -> Self {
        Self::new(TAIL_SECTIONS)
    }
}
