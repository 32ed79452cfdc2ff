use verso_style::Dimension;

/// Properties of a parallel branch needed to size it.
pub trait BranchMeasureInfo {
    /// Measure declared on the branch markup, if any.
    fn declared_measure(&self) -> Option<Dimension>;
    /// Measure the branch content would take on a single line.
    fn preferred_measure(&self) -> f32;
}

/// Splits an available inline measure between parallel branches.
pub struct PartitionSolver {
    available: f32,
}

impl PartitionSolver {
    pub fn new(available: f32) -> Self {
        Self {
            available: available.max(0.0),
        }
    }

    /// Resolves one size per branch.
    ///
    /// It handles:
    /// 1. Fixed measures (points)
    /// 2. Percentage measures, relative to the available measure
    /// 3. Auto measures, sharing what is left in proportion to preferred content measure
    pub fn resolve<I, C>(&self, branches: I) -> Vec<f32>
    where
        I: IntoIterator<Item = C>,
        C: BranchMeasureInfo,
    {
        let mut sizes = Vec::new();
        let mut preferred = Vec::new();
        let mut auto_indices = Vec::new();
        let mut remaining = self.available;

        for (i, branch) in branches.into_iter().enumerate() {
            let fixed = match branch.declared_measure() {
                Some(Dimension::Pt(w)) => Some(w),
                Some(Dimension::Percent(p)) => Some(p / 100.0 * self.available),
                Some(Dimension::Auto) | None => None,
            };
            match fixed {
                Some(w) => {
                    sizes.push(w);
                    remaining -= w;
                }
                None => {
                    sizes.push(0.0);
                    auto_indices.push(i);
                }
            }
            preferred.push(branch.preferred_measure());
        }
        remaining = remaining.max(0.0);

        if auto_indices.is_empty() {
            return sizes;
        }

        let total_preferred: f32 = auto_indices.iter().map(|&i| preferred[i]).sum();
        if total_preferred > 0.0 {
            if remaining >= total_preferred {
                // Expand: distribute extra space proportionally
                let extra = remaining - total_preferred;
                for &i in &auto_indices {
                    sizes[i] = preferred[i] + extra * (preferred[i] / total_preferred);
                }
            } else {
                // Shrink: scale down proportionally to fit
                let factor = remaining / total_preferred;
                for &i in &auto_indices {
                    sizes[i] = preferred[i] * factor;
                }
            }
        } else {
            let share = remaining / auto_indices.len() as f32;
            for i in auto_indices {
                sizes[i] = share;
            }
        }
        sizes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Cell(Option<Dimension>, f32);

    impl BranchMeasureInfo for Cell {
        fn declared_measure(&self) -> Option<Dimension> {
            self.0
        }
        fn preferred_measure(&self) -> f32 {
            self.1
        }
    }

    #[test]
    fn fixed_and_percent_are_taken_first() {
        let sizes = PartitionSolver::new(200.0).resolve(vec![
            Cell(Some(Dimension::Pt(50.0)), 10.0),
            Cell(Some(Dimension::Percent(25.0)), 10.0),
            Cell(None, 30.0),
        ]);
        assert_eq!(sizes, vec![50.0, 50.0, 100.0]);
    }

    #[test]
    fn auto_branches_share_in_proportion_to_content() {
        let sizes = PartitionSolver::new(120.0).resolve(vec![Cell(None, 10.0), Cell(None, 30.0)]);
        assert_eq!(sizes, vec![30.0, 90.0]);
    }

    #[test]
    fn empty_auto_branches_split_evenly() {
        let sizes = PartitionSolver::new(90.0).resolve(vec![Cell(None, 0.0), Cell(None, 0.0), Cell(None, 0.0)]);
        assert_eq!(sizes, vec![30.0, 30.0, 30.0]);
    }
}
