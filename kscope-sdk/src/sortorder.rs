use std::cmp::Ordering;

/// Compares two strings in natural (human) order: runs of ASCII digits are
/// compared by numeric value, everything else byte by byte.
///
/// Digits sort before other characters. When two numbers are equal in value
/// the one written with fewer leading zeros comes first, and a string that is
/// a prefix of the other comes first.
pub fn natural_cmp(left: &str, right: &str) -> Ordering {
    let a = left.as_bytes();
    let b = right.as_bytes();
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        let (ca, cb) = (a[i], b[j]);

        match (ca.is_ascii_digit(), cb.is_ascii_digit()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {
                if ca != cb {
                    return ca.cmp(&cb);
                }
                i += 1;
                j += 1;
            }
            (true, true) => {
                while i < a.len() && a[i] == b'0' {
                    i += 1;
                }
                while j < b.len() && b[j] == b'0' {
                    j += 1;
                }

                let (start_a, start_b) = (i, j);
                while i < a.len() && a[i].is_ascii_digit() {
                    i += 1;
                }
                while j < b.len() && b[j].is_ascii_digit() {
                    j += 1;
                }

                // Without leading zeros a longer run is a bigger number.
                let ordering = (i - start_a)
                    .cmp(&(j - start_b))
                    .then_with(|| a[start_a..i].cmp(&b[start_b..j]))
                    .then_with(|| start_a.cmp(&start_b));

                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }

    (a.len() - i).cmp(&(b.len() - j))
}

/// Returns true when `left` sorts strictly before `right` in natural order.
pub fn natural_less(left: &str, right: &str) -> bool {
    natural_cmp(left, right) == Ordering::Less
}
