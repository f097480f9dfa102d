//! Reading time estimation

use super::post::ContentSection;

/// Average reading speed used for estimates
pub const WORDS_PER_MINUTE: usize = 200;

/// Count the words of a paragraph by splitting on single spaces.
///
/// Runs of spaces are not collapsed: `"a  b"` yields three tokens and an
/// empty paragraph yields one. Existing reading times depend on this count.
pub fn count_words(text: &str) -> usize {
    text.split(' ').count()
}

/// Total word count of all paragraph bodies; headings are not counted
pub fn total_words(sections: &[ContentSection]) -> usize {
    sections
        .iter()
        .flat_map(|section| section.body.iter())
        .map(|paragraph| count_words(&paragraph.text))
        .sum()
}

/// Estimated reading time in whole minutes, rounded up.
///
/// Content without paragraphs reads in 0 minutes.
pub fn estimate(sections: &[ContentSection]) -> u32 {
    minutes_for(total_words(sections))
}

/// Minutes needed for `words`, saturating at `u32::MAX`
pub fn minutes_for(words: usize) -> u32 {
    u32::try_from(words.div_ceil(WORDS_PER_MINUTE)).unwrap_or(u32::MAX)
}
