/// `part / whole * 100`, or 0 when there is nothing to divide by.
pub fn percentage(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    f64::from(part) / f64::from(whole) * 100.0
}

/// Arithmetic mean, `None` for an empty input.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_of_zero_is_zero() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(3, 0), 0.0);
        assert_eq!(percentage(1, 4), 25.0);
    }

    #[test]
    fn mean_of_nothing_is_none() {
        assert_eq!(mean(Vec::new()), None);
        assert_eq!(mean(vec![2.0, 4.0]), Some(3.0));
    }

    #[test]
    fn rounds_half_up() {
        assert_eq!(round_to_tenth(5.25), 5.3);
        assert_eq!(round_to_tenth(7.04), 7.0);
    }
}
