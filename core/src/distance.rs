//! Levenshtein edit distance.

/// Minimum number of single-character insertions, deletions or substitutions
/// needed to turn `a` into `b`.
///
/// Works on `char`s, so multi-byte letters count once. Comparison is exact;
/// callers lower-case both sides when they want case-insensitive matching.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // table[i][j]: distance between the first i chars of b and the first j chars of a
    let mut table = vec![vec![0usize; a.len() + 1]; b.len() + 1];
    for (i, row) in table.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in table[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=b.len() {
        for j in 1..=a.len() {
            table[i][j] = if b[i - 1] == a[j - 1] {
                table[i - 1][j - 1]
            } else {
                1 + table[i - 1][j - 1]
                    .min(table[i][j - 1])
                    .min(table[i - 1][j])
            };
        }
    }

    table[b.len()][a.len()]
}

/// Returns `Some(distance)` when `a` and `b` are at most `max` edits apart.
pub fn within_distance(a: &str, b: &str, max: usize) -> Option<usize> {
    // Length difference is a lower bound on the distance.
    let (la, lb) = (a.chars().count(), b.chars().count());
    if la.abs_diff(lb) > max {
        return None;
    }
    let d = edit_distance(a, b);
    (d <= max).then_some(d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kitten_sitting() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
    }

    #[test]
    fn empty_inputs() {
        assert_eq!(edit_distance("", ""), 0);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("abcd", ""), 4);
    }

    #[test]
    fn identical_strings() {
        assert_eq!(edit_distance("serendipity", "serendipity"), 0);
    }

    #[test]
    fn counts_chars_not_bytes() {
        assert_eq!(edit_distance("café", "cafe"), 1);
        assert_eq!(edit_distance("naïve", "naive"), 1);
    }

    #[test]
    fn single_edits() {
        assert_eq!(edit_distance("cat", "cats"), 1);
        assert_eq!(edit_distance("cats", "cat"), 1);
        assert_eq!(edit_distance("cat", "cut"), 1);
    }

    #[test]
    fn within_distance_threshold() {
        assert_eq!(within_distance("kitten", "sitting", 3), Some(3));
        assert_eq!(within_distance("kitten", "sitting", 2), None);
        assert_eq!(within_distance("a", "abcdef", 3), None);
    }
}
