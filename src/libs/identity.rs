use crate::libs::xmfa::Lcb;
use itertools::Itertools;

/// Percent identity of `b` against the host sequence `a`.
///
/// Positions are characters. Those where `a` has a gap are skipped, gaps in `b` count as
/// mismatches. Extra characters of the longer sequence are ignored.
///
/// ```
/// # use xmfa::percent_identity;
/// assert_eq!(percent_identity("AC-GT", "ACTGT"), 100.0);
/// assert_eq!(percent_identity("AC", "AG"), 50.0);
/// assert_eq!(percent_identity("----", "ACGT"), 0.0);
/// assert_eq!(percent_identity("", ""), 0.0);
/// ```
pub fn percent_identity(a: &str, b: &str) -> f64 {
    let mut matched = 0usize;
    let mut mismatched = 0usize;

    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca == '-' {
            continue;
        }
        if ca == cb {
            matched += 1;
        } else {
            mismatched += 1;
        }
    }

    if matched + mismatched == 0 {
        return 0.0;
    }
    100.0 * matched as f64 / (matched + mismatched) as f64
}

/// Scores every other record against the first one
pub fn identity_to_reference(block: &Lcb) -> Vec<f64> {
    match block.records.split_first() {
        Some((reference, others)) => others
            .iter()
            .map(|r| percent_identity(&reference.sequence, &r.sequence))
            .collect(),
        None => vec![],
    }
}

/// `(i, j, identity)` for every `i < j`, record `i` acting as the host
pub fn pairwise_identity(block: &Lcb) -> Vec<(usize, usize, f64)> {
    (0..block.len())
        .tuple_combinations()
        .map(|(i, j)| {
            let identity =
                percent_identity(&block.records[i].sequence, &block.records[j].sequence);
            (i, j, identity)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::xmfa::XmfaReader;
    use approx::assert_relative_eq;

    #[test]
    fn test_asymmetric_gaps() {
        // gap in the host is skipped, gap in the query is a mismatch
        assert_eq!(percent_identity("AC-GT", "ACTGT"), 100.0);
        assert_eq!(percent_identity("ACTGT", "AC-GT"), 80.0);
    }

    #[test]
    fn test_unequal_lengths() {
        assert_eq!(percent_identity("ACGTAAAA", "ACGT"), 100.0);
        assert_eq!(percent_identity("AC", "ACGTTTT"), 100.0);
        assert_eq!(percent_identity("", "ACGT"), 0.0);
    }

    #[test]
    fn test_multibyte_chars() {
        assert_eq!(percent_identity("é", "è"), 0.0);
        assert_eq!(percent_identity("Aé-", "AéG"), 100.0);
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(percent_identity("ACGT", "acgt"), 0.0);
    }

    #[test]
    fn test_block_identity() {
        let input = "\
> 1:1-12 + a.fa
ACGTACGTACGT
> 2:5-16 - b.fa
ACGTACGAACGT
> 3:1-10 + c.fa
ACGT--GTACGT
=
";
        let block = XmfaReader::new(input.as_bytes())
            .with_sequence(true)
            .next()
            .unwrap()
            .unwrap();

        let scores = identity_to_reference(&block);
        assert_eq!(scores.len(), 2);
        assert_relative_eq!(scores[0], 100.0 * 11.0 / 12.0);
        assert_relative_eq!(scores[1], 100.0 * 10.0 / 12.0);

        let pairs = pairwise_identity(&block);
        assert_eq!(pairs.len(), 3);
        assert_eq!((pairs[0].0, pairs[0].1), (0, 1));
        assert_eq!((pairs[2].0, pairs[2].1), (1, 2));
        assert_relative_eq!(pairs[2].2, 75.0);
    }

    #[test]
    fn test_empty_block() {
        assert!(identity_to_reference(&Lcb::new()).is_empty());
        assert!(pairwise_identity(&Lcb::new()).is_empty());
    }
}
