use crate::CorpusError;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// How to partition a corpus into train/validation/test.
///
/// Built through [`SplitConfig::new`] or [`SplitConfig::from_percentages`],
/// both of which reject ratios that do not sum to exactly 1.0. Immutable
/// once constructed; the default is `(0.8, 0.1, 0.1)` without shuffling.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SplitConfig {
    train_ratio: f64,
    val_ratio: f64,
    test_ratio: f64,
    shuffle: bool,
    random_state: u64,
}

impl Default for SplitConfig {
    fn default() -> SplitConfig {
        SplitConfig {
            train_ratio: 0.8,
            val_ratio: 0.1,
            test_ratio: 0.1,
            shuffle: false,
            random_state: 0,
        }
    }
}

impl SplitConfig {
    pub fn new(
        train_ratio: f64,
        val_ratio: f64,
        test_ratio: f64,
    ) -> Result<SplitConfig, CorpusError> {
        let sum = train_ratio + val_ratio + test_ratio;
        if sum != 1.0 {
            return Err(CorpusError::InvalidRatioConfig {
                train: train_ratio,
                val: val_ratio,
                test: test_ratio,
                sum,
            });
        }
        Ok(SplitConfig {
            train_ratio,
            val_ratio,
            test_ratio,
            ..SplitConfig::default()
        })
    }

    /// Same as [`SplitConfig::new`], but with whole percentages that must
    /// add up to 100.
    pub fn from_percentages(train: u32, val: u32, test: u32) -> Result<SplitConfig, CorpusError> {
        SplitConfig::new(
            f64::from(train) / 100.0,
            f64::from(val) / 100.0,
            f64::from(test) / 100.0,
        )
    }

    /// Permute the corpus with a generator seeded with `random_state`
    /// before slicing.
    pub fn with_shuffle(mut self, random_state: u64) -> SplitConfig {
        self.shuffle = true;
        self.random_state = random_state;
        self
    }

    pub fn train_ratio(&self) -> f64 {
        self.train_ratio
    }

    pub fn val_ratio(&self) -> f64 {
        self.val_ratio
    }

    pub fn test_ratio(&self) -> f64 {
        self.test_ratio
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn random_state(&self) -> u64 {
        self.random_state
    }
}

/// The three disjoint partitions produced by [`split`].
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusSplits<T> {
    pub train: Vec<T>,
    pub validation: Vec<T>,
    pub test: Vec<T>,
}

impl<T> CorpusSplits<T> {
    /// The splits with their conventional names, in order.
    pub fn by_name(&self) -> [(&'static str, &[T]); 3] {
        [
            ("train", self.train.as_slice()),
            ("validation", self.validation.as_slice()),
            ("test", self.test.as_slice()),
        ]
    }

    pub fn total_len(&self) -> usize {
        self.train.len() + self.validation.len() + self.test.len()
    }
}

/// Partitions `items` into train/validation/test.
///
/// Each split gets the ceiling of its fractional share, carved out of the
/// sequence contiguously in train, validation, test order. The three
/// ceilings can overshoot the corpus length, in which case the test slice
/// is truncated to it: earlier splits absorb the rounding surplus. Without
/// shuffling, concatenating the three splits gives back the input sequence.
///
/// With shuffling, the items are permuted by a Fisher-Yates shuffle driven
/// by an [`StdRng`] seeded with the config's `random_state`. The generator
/// is created here on every call, so equal seeds give equal splits within
/// the same build of the crate graph.
pub fn split<T>(mut items: Vec<T>, config: &SplitConfig) -> Result<CorpusSplits<T>, CorpusError> {
    if config.shuffle {
        let mut rng = StdRng::seed_from_u64(config.random_state);
        items.shuffle(&mut rng);
    }

    let total = items.len();
    let n_train = share(total, config.train_ratio);
    let n_val = share(total, config.val_ratio);
    let n_test = share(total, config.test_ratio);

    // Slice bounds saturate at the corpus length instead of overflowing.
    let train_end = n_train.min(total);
    let val_end = (n_train + n_val).min(total);
    let test_end = (n_train + n_val + n_test).min(total);

    let mut validation = items.split_off(train_end);
    let mut test = validation.split_off(val_end - train_end);
    test.truncate(test_end - val_end);
    let train = items;

    if train.len() + validation.len() + test.len() != total {
        return Err(CorpusError::SplitSizeMismatch {
            train: train.len(),
            val: validation.len(),
            test: test.len(),
            total,
        });
    }

    log::debug!(
        "Split {} items into {}/{}/{}",
        total,
        train.len(),
        validation.len(),
        test.len()
    );

    Ok(CorpusSplits {
        train,
        validation,
        test,
    })
}

/// Number of items a split with the given ratio receives out of `total`.
fn share(total: usize, ratio: f64) -> usize {
    (total as f64 * ratio).ceil() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn rejects_ratios_not_summing_to_one() {
        assert!(SplitConfig::new(0.8, 0.1, 0.1).is_ok());
        assert!(SplitConfig::new(0.5, 0.25, 0.25).is_ok());
        let err = SplitConfig::new(0.8, 0.1, 0.05).unwrap_err();
        assert!(matches!(err, CorpusError::InvalidRatioConfig { .. }));
    }

    #[test]
    fn default_config_is_80_10_10_without_shuffle() {
        let config = SplitConfig::default();
        assert_eq!(config.train_ratio(), 0.8);
        assert_eq!(config.val_ratio(), 0.1);
        assert_eq!(config.test_ratio(), 0.1);
        assert!(!config.shuffle());
        assert_eq!(config.random_state(), 0);
    }

    #[test]
    fn preserves_order_without_shuffle() {
        let splits = split(ids(10), &SplitConfig::default()).unwrap();
        assert_eq!(splits.train, ids(8));
        assert_eq!(splits.validation, vec![8]);
        assert_eq!(splits.test, vec![9]);

        let rejoined: Vec<_> = splits
            .train
            .iter()
            .chain(&splits.validation)
            .chain(&splits.test)
            .copied()
            .collect();
        assert_eq!(rejoined, ids(10));
    }

    #[test]
    fn covers_every_item() {
        let configs = [
            SplitConfig::default(),
            SplitConfig::new(0.5, 0.25, 0.25).unwrap(),
            SplitConfig::new(1.0, 0.0, 0.0).unwrap(),
            SplitConfig::default().with_shuffle(7),
        ];
        for config in &configs {
            for &n in &[0, 1, 2, 3, 9, 10, 101] {
                let splits = split(ids(n), config).unwrap();
                assert_eq!(splits.total_len(), n, "n = {}, config = {:?}", n, config);
            }
        }
    }

    #[test]
    fn earlier_splits_absorb_the_rounding_surplus() {
        // 7 * 0.5 and 7 * 0.25 are fractional, so train and validation
        // round up and the test slice is truncated.
        let config = SplitConfig::new(0.5, 0.25, 0.25).unwrap();
        let splits = split(ids(7), &config).unwrap();
        assert_eq!(
            (splits.train.len(), splits.validation.len(), splits.test.len()),
            (4, 2, 1)
        );
    }

    #[test]
    fn splits_the_published_corpus_size() {
        // 7367 articles is the size of the 2014-02-09 distribution.
        let splits = split(ids(7367), &SplitConfig::default()).unwrap();
        assert_eq!(splits.train.len(), 5894);
        assert_eq!(splits.validation.len(), 737);
        assert_eq!(splits.test.len(), 736);
    }

    #[test]
    fn percentages_match_the_equivalent_ratios() {
        let by_percent = SplitConfig::from_percentages(80, 10, 10).unwrap();
        assert_eq!(by_percent, SplitConfig::new(0.8, 0.1, 0.1).unwrap());

        let splits = split(ids(7367), &by_percent).unwrap();
        assert_eq!(splits.total_len(), 7367);
        assert_eq!(splits, split(ids(7367), &SplitConfig::default()).unwrap());

        assert!(SplitConfig::from_percentages(80, 10, 5).is_err());
    }

    #[test]
    fn shuffled_splits_are_deterministic_per_seed() {
        let config = SplitConfig::default().with_shuffle(42);
        let first = split(ids(100), &config).unwrap();
        let second = split(ids(100), &config).unwrap();
        assert_eq!(first, second);

        // The shuffle is a permutation: nothing is lost or duplicated.
        let mut seen: Vec<_> = first
            .train
            .iter()
            .chain(&first.validation)
            .chain(&first.test)
            .copied()
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, ids(100));
    }

    #[test]
    fn different_seeds_produce_different_permutations() {
        let first = split(ids(100), &SplitConfig::default().with_shuffle(0)).unwrap();
        let second = split(ids(100), &SplitConfig::default().with_shuffle(1)).unwrap();
        assert_ne!(first.train, second.train);
    }
}
