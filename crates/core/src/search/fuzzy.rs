//! Nearest-name lookup by edit distance.

/// Levenshtein distance between two strings, compared by `char`.
///
/// Rolling two-row variant of the full (n+1)×(m+1) matrix.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Closest corpus entry to `query`.
///
/// The first entry with the minimal distance wins, so corpus order matters.
/// Returns `None` only for an empty corpus.
pub fn nearest<'a, S: AsRef<str>>(query: &str, corpus: &'a [S]) -> Option<&'a str> {
    let mut best: Option<(&'a str, usize)> = None;

    for name in corpus {
        let name = name.as_ref();
        let distance = edit_distance(query, name);
        match best {
            Some((_, min)) if distance >= min => {}
            _ => {
                best = Some((name, distance));
                if distance == 0 {
                    break;
                }
            }
        }
    }

    best.map(|(name, _)| name)
}
