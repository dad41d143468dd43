use super::domain::CustomerTier;

/// Applies the tier policy to the model's predicted discount ceiling.
///
/// The prediction passes through unclamped: if the model produces a
/// negative or implausibly large ceiling, the quote reflects it and the
/// caller decides what to do with it.
pub fn compute_discount(predicted_max: f64, tier: CustomerTier) -> f64 {
    predicted_max * tier.multiplier()
}
