use crate::domain::model::{RatingSummary, Review};

/// Average and count over a review sequence.
///
/// Ratings are summed as integers and divided once, so any ordering of the
/// same reviews gives a bit-identical average. The mean is not rounded.
pub fn summarize(reviews: &[Review]) -> RatingSummary {
    reviews.iter().map(|r| r.rating).collect::<RatingTally>().summary()
}

/// Incremental form of [`summarize`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingTally {
    total: u64,
    count: usize,
}

impl RatingTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rating: u8) {
        self.total += u64::from(rating);
        self.count += 1;
    }

    pub fn summary(&self) -> RatingSummary {
        if self.count == 0 {
            return RatingSummary::EMPTY;
        }
        RatingSummary {
            average: self.total as f64 / self.count as f64,
            count: self.count,
        }
    }
}

impl Extend<u8> for RatingTally {
    fn extend<I: IntoIterator<Item = u8>>(&mut self, iter: I) {
        for rating in iter {
            self.push(rating);
        }
    }
}

impl FromIterator<u8> for RatingTally {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut tally = RatingTally::new();
        tally.extend(iter);
        tally
    }
}
