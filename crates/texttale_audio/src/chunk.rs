//! Splitting long text into backend-sized pieces.

const SENTENCE_ENDS: [char; 6] = ['.', '!', '?', ';', ':', '\n'];

/// Split `text` into chunks of at most `max_chars` characters.
///
/// Sentences are kept whole when they fit; longer sentences are packed word by
/// word, and single words longer than the limit are cut.
///
/// # Examples
///
/// ```
/// use texttale_audio::split_text;
///
/// let chunks = split_text("One. Two three four.", 10);
/// assert_eq!(chunks, vec!["One.", "Two three", "four."]);
/// ```
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();

    for sentence in sentences(text) {
        let mut current = String::new();
        for word in sentence.split_whitespace() {
            for piece in cut_word(word, max_chars) {
                let needed = if current.is_empty() {
                    piece.chars().count()
                } else {
                    current.chars().count() + 1 + piece.chars().count()
                };
                if needed > max_chars && !current.is_empty() {
                    chunks.push(std::mem::take(&mut current));
                }
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(&piece);
            }
        }
        if !current.is_empty() {
            chunks.push(current);
        }
    }

    chunks
}

fn sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    for (i, c) in text.char_indices() {
        if SENTENCE_ENDS.contains(&c) {
            let end = i + c.len_utf8();
            out.push(&text[start..end]);
            start = end;
        }
    }
    if start < text.len() {
        out.push(&text[start..]);
    }
    out
}

fn cut_word(word: &str, max_chars: usize) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    chars
        .chunks(max_chars)
        .map(|piece| piece.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_one_chunk() {
        assert_eq!(split_text("Hello there.", 100), vec!["Hello there."]);
    }

    #[test]
    fn chunks_never_exceed_limit() {
        let text = "The ancient library held secrets older than the kingdom itself, \
                    and every shelf whispered of forgotten heroes and lost maps. \
                    Nobody had entered it in a hundred years.";
        for chunk in split_text(text, 40) {
            assert!(chunk.chars().count() <= 40, "chunk too long: {chunk}");
        }
    }

    #[test]
    fn overlong_word_is_cut() {
        assert_eq!(split_text("abcdefgh", 3), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn blank_text_has_no_chunks() {
        assert!(split_text("   \n ", 100).is_empty());
    }

    #[test]
    fn multibyte_text_is_split_on_char_boundaries() {
        let chunks = split_text("ééééé", 2);
        assert_eq!(chunks, vec!["éé", "éé", "é"]);
    }
}
