//! Answer evaluation for both quiz modes.
//!
//! Both checks are pure: the result depends only on the arguments.

/// Single-choice check: the selected option must equal the expected answer exactly.
#[must_use]
pub fn is_correct_choice(selected: &str, expected: &str) -> bool {
    selected == expected
}

/// Ordered multi-token check.
///
/// The selection is correct only when it has the same length as `expected` and
/// every position holds the same token. A permutation of the right words is wrong.
#[must_use]
pub fn is_correct_order<A, B>(selected: &[A], expected: &[B]) -> bool
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    selected.len() == expected.len()
        && selected
            .iter()
            .zip(expected)
            .all(|(s, e)| s.as_ref() == e.as_ref())
}
