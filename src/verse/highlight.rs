use std::ops::Range;

use icu_normalizer::DecomposingNormalizerBorrowed;

fn is_stripped_mark(c: char) -> bool {
    matches!(c,
        '\u{064B}'..='\u{065F}'   // tashkeel, incl. hamza/madda split off by NFD
        | '\u{0640}'              // tatweel
        | '\u{0670}'..='\u{0674}' // superscript alef
        | '\u{06D6}'..='\u{06ED}' // Quranic pause and annotation marks
    )
}

/// Applied to the composed text, so hamza seats fold before NFD splits them.
fn fold_letter(c: char) -> char {
    match c {
        'ى' | 'ئ' | 'ء' | 'ؤ' | 'إ' | 'أ' | 'ٱ' | 'آ' => 'ا',
        'ة' => 'ه',
        other => other,
    }
}

fn is_hamza_mark(c: char) -> bool {
    matches!(c, '\u{0653}'..='\u{0655}')
}

/// Reduces Arabic text to a skeleton that survives differences in vowelling
/// and orthography between a short example and the full verse.
pub fn normalize_arabic(text: &str) -> String {
    let composed: String = text.chars().map(fold_letter).collect();
    let nfd = DecomposingNormalizerBorrowed::new_nfd();
    let decomposed = nfd.normalize(&composed);

    let mut folded = String::with_capacity(decomposed.len());
    let mut pending_space = false;
    for c in decomposed.chars() {
        // Decomposed input: a seat followed by a combining hamza or madda.
        if is_hamza_mark(c) && (folded.ends_with('ي') || folded.ends_with('و')) {
            folded.pop();
            folded.push('ا');
            continue;
        }
        if is_stripped_mark(c) {
            continue;
        }
        if c.is_whitespace() {
            pending_space = !folded.is_empty();
            continue;
        }
        if pending_space {
            folded.push(' ');
            pending_space = false;
        }
        folded.push(c);
    }

    let folded = folded.replace("لله", "الله");
    let mut out = String::with_capacity(folded.len());
    for c in folded.chars() {
        if c == 'ا' && out.ends_with('ا') {
            continue;
        }
        out.push(c);
    }
    out
}

fn words_with_offsets(text: &str) -> Vec<(usize, &str)> {
    let mut words = Vec::new();
    let mut start: Option<usize> = None;
    for (i, c) in text.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                words.push((s, &text[s..i]));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        words.push((s, &text[s..]));
    }
    words
}

/// Byte range of `phrase` inside `verse`, matching word by word on normalized
/// text. Words that normalize to nothing (standalone pause marks) are skipped.
pub fn find_highlight(verse: &str, phrase: &str) -> Option<Range<usize>> {
    let targets: Vec<String> = phrase
        .split_whitespace()
        .map(normalize_arabic)
        .filter(|w| !w.is_empty())
        .collect();
    if targets.is_empty() {
        return None;
    }

    let words: Vec<(usize, &str, String)> = words_with_offsets(verse)
        .into_iter()
        .map(|(offset, word)| (offset, word, normalize_arabic(word)))
        .filter(|(_, _, norm)| !norm.is_empty())
        .collect();
    if words.len() < targets.len() {
        return None;
    }

    (0..=words.len() - targets.len())
        .find(|&i| {
            targets
                .iter()
                .enumerate()
                .all(|(j, target)| words[i + j].2 == *target)
        })
        .map(|i| {
            let (start, _, _) = words[i];
            let (last_offset, last_word, _) = words[i + targets.len() - 1];
            start..last_offset + last_word.len()
        })
}

/// Splits `verse` into (before, highlighted, after). Without a match the
/// whole verse lands in `before`.
pub fn split_highlight<'a>(verse: &'a str, phrase: &str) -> (&'a str, &'a str, &'a str) {
    match find_highlight(verse, phrase) {
        Some(range) => (
            &verse[..range.start],
            &verse[range.clone()],
            &verse[range.end..],
        ),
        None => (verse, "", ""),
    }
}
