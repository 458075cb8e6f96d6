use rust_decimal::Decimal;

/// Rolling simple moving average over `prices`.
///
/// Returns one value per complete window, oldest first, so the last element is
/// the average of the trailing `window` prices. Returns `None` when `window` is
/// zero or there are fewer than `window` prices.
#[must_use]
pub fn sma_series(prices: &[Decimal], window: usize) -> Option<Vec<Decimal>> {
    if window == 0 || prices.len() < window {
        return None;
    }

    let divisor = Decimal::from(window);
    let mut sum: Decimal = prices[..window].iter().sum();
    let mut series = Vec::with_capacity(prices.len() - window + 1);
    series.push(sum / divisor);

    for i in window..prices.len() {
        sum += prices[i] - prices[i - window];
        series.push(sum / divisor);
    }

    Some(series)
}
