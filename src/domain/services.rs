//! Rating arithmetic and the outbound-notification seam.
//!
//! Everything here is pure except the `OrderNotifier` trait, which is the
//! single network-facing boundary of the application. The production
//! implementation lives in the infrastructure layer; tests substitute a fake.

use super::errors::{DomainError, DomainResult, RelayError};
use super::models::{OrderDraft, Product};

/// Checks whether a review score is within the accepted 1..=5 range.
pub fn is_valid_score(score: u8) -> bool {
    (1..=5).contains(&score)
}

/// Average of a review sequence rounded to one decimal place.
///
/// Returns 0.0 for an empty sequence, matching how a product with no reviews
/// is displayed.
///
/// # Examples
///
/// ```
/// use zumi::domain::services::average;
///
/// assert_eq!(average(&[5, 5, 4]), 4.7);
/// assert_eq!(average(&[5, 5, 4, 5]), 4.8);
/// assert_eq!(average(&[]), 0.0);
/// ```
pub fn average(reviews: &[u8]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let sum: u32 = reviews.iter().map(|&s| s as u32).sum();
    let avg = sum as f64 / reviews.len() as f64;
    (avg * 10.0).round() / 10.0
}

/// Appends a score to a review sequence and recomputes the average.
///
/// Fails with `InvalidScore` when the score is outside 1..=5; the input is
/// never modified. This is the aggregation step run on the success transition
/// of an order submission.
pub fn append_score(reviews: &[u8], score: u8) -> DomainResult<(Vec<u8>, f64)> {
    if !is_valid_score(score) {
        return Err(DomainError::InvalidScore(score));
    }
    let mut updated = reviews.to_vec();
    updated.push(score);
    let avg = average(&updated);
    Ok((updated, avg))
}

/// Renders a rating as a five-character star row, e.g. `★★★★☆` for 4.
///
/// Ratings above 5 are clamped so the row is always five characters.
pub fn star_bar(rating: u8) -> String {
    let filled = rating.min(5) as usize;
    "★".repeat(filled) + &"☆".repeat(5 - filled)
}

/// Outbound order notification seam.
///
/// One attempt per call, no retry policy; a failed send is reported back so
/// the user can re-trigger submission with the draft intact.
pub trait OrderNotifier {
    fn send(&self, draft: &OrderDraft, product: &Product) -> Result<(), RelayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_rounding() {
        assert_eq!(average(&[5, 5, 4]), 4.7);
        assert_eq!(average(&[4, 4, 5, 5]), 4.5);
        assert_eq!(average(&[5, 5, 5]), 5.0);
        assert_eq!(average(&[5, 5, 5, 4]), 4.8);
        assert_eq!(average(&[1]), 1.0);
    }

    #[test]
    fn test_average_empty_is_zero() {
        assert_eq!(average(&[]), 0.0);
    }

    #[test]
    fn test_append_score() {
        let (updated, avg) = append_score(&[5, 5, 4], 5).unwrap();
        assert_eq!(updated, vec![5, 5, 4, 5]);
        assert_eq!(avg, 4.8);
    }

    #[test]
    fn test_append_score_rejects_out_of_range() {
        assert_eq!(append_score(&[5], 0), Err(DomainError::InvalidScore(0)));
        assert_eq!(append_score(&[5], 6), Err(DomainError::InvalidScore(6)));
    }

    #[test]
    fn test_append_score_to_empty() {
        let (updated, avg) = append_score(&[], 3).unwrap();
        assert_eq!(updated, vec![3]);
        assert_eq!(avg, 3.0);
    }

    #[test]
    fn test_star_bar() {
        assert_eq!(star_bar(5), "★★★★★");
        assert_eq!(star_bar(4), "★★★★☆");
        assert_eq!(star_bar(1), "★☆☆☆☆");
        assert_eq!(star_bar(0), "☆☆☆☆☆");
    }

    #[test]
    fn test_star_bar_clamps_above_five() {
        assert_eq!(star_bar(9), "★★★★★");
    }
}
