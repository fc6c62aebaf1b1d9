//! Number formatting shared by the table and the popup.

/// Two decimals, rounding half away from zero.
pub fn format_score(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded:.2}")
}

/// Whole percent, rounding half away from zero.
pub fn format_percent(value: f64) -> String {
    format!("{:.0}%", value.round())
}

pub const fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_use_two_decimals() {
        assert_eq!(format_score(4.5), "4.50");
        assert_eq!(format_score(3.8), "3.80");
        assert_eq!(format_score(4.125), "4.13");
        assert_eq!(format_score(0.0), "0.00");
    }

    #[test]
    fn percent_rounds_to_whole_number() {
        assert_eq!(format_percent(85.0), "85%");
        assert_eq!(format_percent(79.5), "80%");
        assert_eq!(format_percent(33.3), "33%");
    }
}
