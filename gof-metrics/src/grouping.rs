use gof_core::{CoreError, GroupedCategories, Result};

/// Merges adjacent bins so Chi-square categories carry enough expected mass.
///
/// Bins are scanned left to right. Low-expected bins accumulate into a pending
/// group that closes once it reaches the threshold or the last bin is hit. A
/// bin that meets the threshold on its own absorbs any pending group, so only
/// the final category can end up below the threshold.
#[derive(Debug, Clone, Copy)]
pub struct CategoryGrouper {
    pub threshold: f64,
}

impl CategoryGrouper {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn group(&self, observed: &[u64], expected: &[f64]) -> Result<GroupedCategories> {
        if observed.len() != expected.len() {
            return Err(CoreError::Validation(format!(
                "cannot group {} observed bins against {} expected bins",
                observed.len(),
                expected.len()
            )));
        }

        let mut grouped = GroupedCategories::default();
        let last = observed.len().saturating_sub(1);
        let mut pending: Option<(u64, f64)> = None;

        for (i, (&o, &e)) in observed.iter().zip(expected).enumerate() {
            let (acc_observed, acc_expected) = match pending.take() {
                Some((po, pe)) => (po + o, pe + e),
                None => (o, e),
            };

            if e >= self.threshold || acc_expected >= self.threshold || i == last {
                grouped.push(acc_observed, acc_expected);
            } else {
                pending = Some((acc_observed, acc_expected));
            }
        }

        if grouped.len() < observed.len() {
            tracing::debug!(
                bins = observed.len(),
                categories = grouped.len(),
                "Merged low-expected bins"
            );
        }

        Ok(grouped)
    }
}

impl Default for CategoryGrouper {
    fn default() -> Self {
        Self::new(5.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_merge_when_all_large() {
        let grouped = CategoryGrouper::default()
            .group(&[10, 12, 9], &[11.0, 10.0, 10.0])
            .unwrap();
        assert_eq!(grouped.observed, vec![10, 12, 9]);
        assert_eq!(grouped.expected, vec![11.0, 10.0, 10.0]);
    }

    #[test]
    fn test_trailing_bins_forced_into_final_group() {
        let grouped = CategoryGrouper::default()
            .group(&[20, 10, 2, 1, 0], &[18.0, 9.0, 2.0, 1.5, 0.5])
            .unwrap();
        assert_eq!(grouped.observed, vec![20, 10, 3]);
        assert_eq!(grouped.expected, vec![18.0, 9.0, 4.0]);
    }

    #[test]
    fn test_leading_small_bins_merge_into_large_bin() {
        let grouped = CategoryGrouper::default()
            .group(&[1, 2, 30, 25], &[1.0, 2.5, 28.0, 24.5])
            .unwrap();
        assert_eq!(grouped.observed, vec![33, 25]);
        assert_eq!(grouped.expected, vec![31.5, 24.5]);
    }

    #[test]
    fn test_group_closes_once_threshold_reached() {
        let grouped = CategoryGrouper::default()
            .group(&[3, 3, 3, 3], &[3.0, 3.0, 3.0, 3.0])
            .unwrap();
        assert_eq!(grouped.observed, vec![6, 6]);
        assert_eq!(grouped.expected, vec![6.0, 6.0]);
    }

    #[test]
    fn test_empty_input() {
        let grouped = CategoryGrouper::default().group(&[], &[]).unwrap();
        assert!(grouped.is_empty());
    }

    #[test]
    fn test_length_mismatch() {
        assert!(CategoryGrouper::default().group(&[1, 2], &[1.0]).is_err());
    }
}
