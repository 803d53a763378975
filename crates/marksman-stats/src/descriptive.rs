/// Descriptive statistics summarizing a dataset.
///
/// Measures of central tendency and dispersion for a dataset of finite `f64`
/// values. Variance and standard deviation are population statistics (divided
/// by `n`, not `n - 1`).
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveStats {
    /// Number of finite values the statistics were computed from.
    pub count: usize,
    /// The minimum value in the dataset.
    pub min: f64,
    /// The maximum value in the dataset.
    pub max: f64,
    /// The arithmetic mean (average) of the dataset.
    pub mean: f64,
    /// The median value of the dataset (upper median for even counts).
    pub median: f64,
    /// The population variance of the dataset.
    pub variance: f64,
    /// The population standard deviation of the dataset.
    pub std_dev: f64,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from unsorted values.
    ///
    /// Non-finite values (`NaN`, `±inf`) are discarded, then the remaining values
    /// are sorted internally.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if at least one finite value is present
    /// * `None` - if the dataset is empty or contains only non-finite values
    ///
    /// # Examples
    ///
    /// ```
    /// # use marksman_stats::descriptive::DescriptiveStats;
    /// let values = [5.0, 2.0, 4.0, 1.0, 3.0];
    /// let stats = DescriptiveStats::new(values).unwrap();
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.mean, 3.0);
    /// assert_eq!(stats.median, 3.0);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values
            .into_iter()
            .filter(|v| v.is_finite())
            .collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes descriptive statistics from pre-sorted finite values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let count = sorted_values.len();
        let n = count as f64;
        let mean = sorted_values.iter().sum::<f64>() / n;
        let median = sorted_values[count / 2];
        let variance = sorted_values
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>()
            / n;
        let std_dev = variance.sqrt();

        Some(Self {
            count,
            min,
            max,
            mean,
            median,
            variance,
            std_dev,
        })
    }

    /// Standard deviation as a percentage of the mean's magnitude.
    ///
    /// When the mean is exactly zero the ratio is undefined, so the standard
    /// deviation itself is scaled by 100 instead.
    ///
    /// # Examples
    ///
    /// ```
    /// # use marksman_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::new([90.0, 110.0]).unwrap();
    /// assert_eq!(stats.coefficient_of_variation_pct(), 10.0);
    /// ```
    #[must_use]
    pub fn coefficient_of_variation_pct(&self) -> f64 {
        if self.mean == 0.0 {
            self.std_dev * 100.0
        } else {
            self.std_dev / self.mean.abs() * 100.0
        }
    }
}
