//! Meeting folder name parsing.
//!
//! Meeting folders on the archive follow a `<prefix><digits><suffix>` shape
//! (e.g. `TSGR1_112`, `TSGR1_110b-e`). The digits identify the meeting; the
//! suffix distinguishes same-numbered variants: the base meeting, its "bis"
//! session, and the electronic forms of either. Parsing a name yields a
//! [`FolderOrdinal`] whose ordering is the canonical meeting order.

use regex::Regex;

/// Ordinal key of a numbered meeting folder: meeting number plus a sub-rank
/// that breaks ties between same-numbered variants.
///
/// Ordering is lexicographic over `(number, sub_rank)`, which places
/// base < bis < bis-electronic < electronic for equal meeting numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FolderOrdinal {
    /// Meeting number, or `-1` when the name did not parse.
    pub number: i64,
    /// Variant rank: 0 base, 1 bis, 2 bis-electronic, 3 electronic.
    pub sub_rank: u8,
}

impl FolderOrdinal {
    /// Sentinel returned for names that are not numbered meeting folders.
    pub const INVALID: Self = Self {
        number: -1,
        sub_rank: 0,
    };

    /// Creates an ordinal from its parts.
    #[must_use]
    pub fn new(number: i64, sub_rank: u8) -> Self {
        Self { number, sub_rank }
    }

    /// Returns true if this ordinal came from a parseable folder name.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.number >= 0
    }
}

/// Parser for numbered meeting folder names under one working group.
///
/// The prefix is fixed per working group (`TSGR1_` for RAN1); everything
/// after the digit run is treated as the variant suffix.
#[derive(Debug)]
pub struct MeetingFolderParser {
    pattern: Regex,
}

impl MeetingFolderParser {
    /// Creates a parser for folder names starting with `prefix`.
    ///
    /// # Panics
    ///
    /// Panics if the generated pattern fails to compile, which cannot happen
    /// for an escaped literal prefix.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new(prefix: &str) -> Self {
        let pattern = Regex::new(&format!(r"^{}(\d+)(.*)$", regex::escape(prefix)))
            .expect("meeting folder pattern must compile");
        Self { pattern }
    }

    /// Parses a folder name into its ordinal key.
    ///
    /// Names that do not start with the prefix followed by digits map to
    /// [`FolderOrdinal::INVALID`]. Suffix matching is case-insensitive;
    /// unrecognized suffixes rank with the base meeting.
    #[must_use]
    pub fn parse(&self, name: &str) -> FolderOrdinal {
        let Some(caps) = self.pattern.captures(name) else {
            return FolderOrdinal::INVALID;
        };
        let Ok(number) = caps[1].parse::<i64>() else {
            return FolderOrdinal::INVALID;
        };

        let suffix = caps[2].to_lowercase();
        let sub_rank = match suffix.as_str() {
            "b" | "bis" => 1,
            "b-e" | "bis-e" | "b_e" => 2,
            "-e" | "_e" => 3,
            _ => 0,
        };

        FolderOrdinal::new(number, sub_rank)
    }
}
