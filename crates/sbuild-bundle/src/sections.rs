//! Section gating.
//!
//! A build is configured with an ordered list of section names. Two entries
//! are sentinels: `"none"` and `"all"`. The list is scanned left to right and
//! the first entry that is a sentinel or names the section decides:
//!
//! | first decisive entry | result |
//! |----------------------|--------|
//! | `"none"`             | skip   |
//! | `"all"`              | run    |
//! | the section's name   | run    |
//! | (nothing)            | skip   |
//!
//! This is deliberately not set membership: `["none", "all"]` skips
//! everything while `["all", "none"]` runs everything.

/// Sentinel that stops the scan with "skip".
pub const NONE: &str = "none";
/// Sentinel that stops the scan with "run".
pub const ALL: &str = "all";

/// Sections a recipe can define, in the order a build executes them.
pub const BUILD_PHASES: &[&str] = &[
    "pre",
    "setup",
    "files",
    "post",
    "environment",
    "runscript",
    "startscript",
    "labels",
    "help",
    "test",
];

/// Whether `section` runs under the configured `sections` list.
pub fn should_run<S: AsRef<str>>(section: &str, sections: &[S]) -> bool {
    for entry in sections.iter().map(AsRef::as_ref) {
        if entry == NONE {
            return false;
        }
        if entry == ALL || entry == section {
            return true;
        }
    }
    false
}

/// Section list borrowed from a bundle, with the gate applied to it.
#[derive(Debug, Clone, Copy)]
pub struct SectionGate<'a> {
    sections: &'a [String],
}

impl<'a> SectionGate<'a> {
    pub fn new(sections: &'a [String]) -> Self {
        Self { sections }
    }

    pub fn should_run(&self, section: &str) -> bool {
        should_run(section, self.sections)
    }

    /// The candidates that would run, in the candidates' order.
    pub fn plan<'c>(&self, candidates: &[&'c str]) -> Vec<&'c str> {
        candidates
            .iter()
            .copied()
            .filter(|name| self.should_run(name))
            .collect()
    }
}
