// Bjorklund's algorithm - maximally even distribution of pulses over steps
// The construction repeatedly pairs the larger symbol group with the
// smaller one, like the Euclidean gcd recursion, then flattens the tree.

/// Generate a Euclidean rhythm of `pulses` onsets spread over `steps` slots.
///
/// Returns an empty sequence when `pulses > steps`, `pulses == 0` or
/// `steps == 0`. These are defined empty results, not errors: a pattern
/// with no playable steps.
///
/// The result is deterministic; the same `(steps, pulses)` pair always
/// yields the same sequence.
pub fn bjorklund(steps: usize, pulses: usize) -> Vec<bool> {
    if pulses > steps || pulses == 0 || steps == 0 {
        return Vec::new();
    }

    let mut counts = Vec::new();
    let mut remainders = vec![pulses];
    let mut divisor = steps - pulses;
    let mut level = 0;

    loop {
        counts.push(divisor / remainders[level]);
        remainders.push(divisor % remainders[level]);
        divisor = remainders[level];
        level += 1;
        if remainders[level] <= 1 {
            break;
        }
    }
    counts.push(divisor);

    let mut pattern = Vec::with_capacity(steps);
    build(&mut pattern, &counts, &remainders, level as isize);
    pattern.reverse();
    pattern
}

/// Flatten one level of the quotient/remainder tree into the pattern.
/// Level -1 emits a rest, level -2 emits a pulse.
fn build(pattern: &mut Vec<bool>, counts: &[usize], remainders: &[usize], level: isize) {
    match level {
        -1 => pattern.push(false),
        -2 => pattern.push(true),
        _ => {
            for _ in 0..counts[level as usize] {
                build(pattern, counts, remainders, level - 1);
            }
            if remainders[level as usize] != 0 {
                build(pattern, counts, remainders, level - 2);
            }
        }
    }
}

/// Rotate a pattern so the last `rotation` steps move to the front.
///
/// Rotating by the pattern length is the identity. Callers clamp
/// `rotation` to the pattern length; larger values wrap.
pub fn rotate(pattern: &mut [bool], rotation: usize) {
    if pattern.is_empty() {
        return;
    }
    pattern.rotate_right(rotation % pattern.len());
}
