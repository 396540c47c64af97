//! BasicAppraiserScore - the opinion of a single appraiser about one item

use std::fmt;

/// Priority category of an appraiser score.
///
/// Categories are ordered from worst to best:
/// `WantToRemove < Ignore < NiceToHave < MustHave`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ScoreCategory {
    /// The item actively hurts the requirement.
    WantToRemove,
    /// The appraiser has no opinion.
    #[default]
    Ignore,
    /// The item helps the requirement but is replaceable.
    NiceToHave,
    /// The item is needed to satisfy the requirement.
    MustHave,
}

impl ScoreCategory {
    /// One-letter code used by the short score format.
    pub const fn short_code(self) -> char {
        match self {
            ScoreCategory::WantToRemove => 'W',
            ScoreCategory::Ignore => 'I',
            ScoreCategory::NiceToHave => 'N',
            ScoreCategory::MustHave => 'M',
        }
    }

    /// Full upper-case name.
    pub const fn name(self) -> &'static str {
        match self {
            ScoreCategory::WantToRemove => "WANT_TO_REMOVE",
            ScoreCategory::Ignore => "IGNORE",
            ScoreCategory::NiceToHave => "NICE_TO_HAVE",
            ScoreCategory::MustHave => "MUST_HAVE",
        }
    }
}

impl fmt::Display for ScoreCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Score given by one appraiser to one item.
///
/// Ordered by category first, then by minor rank. Equal scores are used to
/// suppress no-op rescoring notifications.
///
/// # Examples
///
/// ```
/// use ibf_core::BasicAppraiserScore;
///
/// let unique = BasicAppraiserScore::must_have(2);
/// let cheap = BasicAppraiserScore::nice_to_have(1_000);
///
/// // Category dominates the minor rank
/// assert!(unique > cheap);
/// assert!(BasicAppraiserScore::must_have(3) > unique);
/// assert_eq!(BasicAppraiserScore::default(), BasicAppraiserScore::ignore());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BasicAppraiserScore {
    category: ScoreCategory,
    minor_rank: i64,
}

impl BasicAppraiserScore {
    /// The neutral score: `IGNORE` with minor rank 0.
    pub const IGNORE: BasicAppraiserScore = BasicAppraiserScore::new(ScoreCategory::Ignore, 0);

    #[inline]
    pub const fn new(category: ScoreCategory, minor_rank: i64) -> Self {
        BasicAppraiserScore {
            category,
            minor_rank,
        }
    }

    #[inline]
    pub const fn must_have(minor_rank: i64) -> Self {
        Self::new(ScoreCategory::MustHave, minor_rank)
    }

    #[inline]
    pub const fn nice_to_have(minor_rank: i64) -> Self {
        Self::new(ScoreCategory::NiceToHave, minor_rank)
    }

    #[inline]
    pub const fn ignore() -> Self {
        Self::IGNORE
    }

    #[inline]
    pub const fn want_to_remove(minor_rank: i64) -> Self {
        Self::new(ScoreCategory::WantToRemove, minor_rank)
    }

    /// Returns the priority category.
    #[inline]
    pub const fn category(&self) -> ScoreCategory {
        self.category
    }

    /// Returns the minor rank used to order scores within a category.
    #[inline]
    pub const fn minor_rank(&self) -> i64 {
        self.minor_rank
    }

    /// Short form such as `M2` or `N-15`.
    pub fn short_format(&self) -> String {
        format!("{}{}", self.category.short_code(), self.minor_rank)
    }
}

impl fmt::Debug for BasicAppraiserScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BasicAppraiserScore({}, {})", self.category, self.minor_rank)
    }
}

impl fmt::Display for BasicAppraiserScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.category, self.minor_rank)
    }
}
