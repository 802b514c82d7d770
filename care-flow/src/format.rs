//! Display formatting for cost ranges (en-IN rupee convention).

const CURRENCY_SYMBOL: &str = "₹";
const RANGE_SEPARATOR: &str = " – ";
const APPROXIMATION_MARKER: &str = " (approx.)";

/// Format a whole-rupee amount with Indian digit grouping: `165750` -> `₹1,65,750`.
pub fn format_inr(amount: u64) -> String {
    let digits = amount.to_string();
    let (head, tail) = digits.split_at(digits.len().saturating_sub(3));
    if head.is_empty() {
        return format!("{CURRENCY_SYMBOL}{tail}");
    }

    // Above the thousands, digits group in pairs.
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{CURRENCY_SYMBOL}{},{tail}", groups.join(","))
}

/// `(165750, 224250)` -> `₹1,65,750 – ₹2,24,250 (approx.)`
pub fn format_cost_range(low: u64, high: u64) -> String {
    format!(
        "{}{RANGE_SEPARATOR}{}{APPROXIMATION_MARKER}",
        format_inr(low),
        format_inr(high)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_like_en_in() {
        assert_eq!(format_inr(0), "₹0");
        assert_eq!(format_inr(999), "₹999");
        assert_eq!(format_inr(1_000), "₹1,000");
        assert_eq!(format_inr(99_999), "₹99,999");
        assert_eq!(format_inr(165_750), "₹1,65,750");
        assert_eq!(format_inr(10_000_000), "₹1,00,00,000");
    }

    #[test]
    fn range_contains_both_values_and_one_dash() {
        for (low, high) in [(0, 0), (357, 483), (165_750, 224_250), (9_999_999, 12_345_678)] {
            let text = format_cost_range(low, high);
            let digits_only = text.replace(',', "");
            assert!(digits_only.contains(&low.to_string()), "{text}");
            assert!(digits_only.contains(&high.to_string()), "{text}");
            let dashes = text
                .chars()
                .filter(|c| matches!(c, '-' | '–' | '—'))
                .count();
            assert_eq!(dashes, 1, "{text}");
            assert!(text.ends_with("(approx.)"));
        }
    }
}
