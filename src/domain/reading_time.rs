//! Reading-time estimate derived from article content.

pub const WORDS_PER_MINUTE: usize = 200;

/// Whitespace-delimited word count of the raw content. Markup tokens count as words.
pub fn word_count(content: &str) -> usize {
    content.split_whitespace().count()
}

/// Minutes needed to read `content`, rounded up. Empty or blank content reads in zero.
pub fn reading_time(content: &str) -> u32 {
    let minutes = word_count(content).div_ceil(WORDS_PER_MINUTE);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}
