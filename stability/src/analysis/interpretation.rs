use serde::{Deserialize, Serialize};

/// Serrano threshold: median ΔΔG above this is significantly destabilising.
pub const SIGNIFICANT_THRESHOLD: f64 = 2.5;
/// Hall, Shorthouse, Alcraft et al. 2023 deleterious threshold.
pub const DELETERIOUS_THRESHOLD: f64 = 0.5;

const SERRANO_LINK: &str = "[Serrano](https://www.crg.eu/luis_serrano)";
const HALL_LINK: &str =
    "[Hall, Shorthouse, Alcraft et al. 2023](https://www.nature.com/articles/s42003-023-05136-y)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stability {
    Unset,
    SignificantlyDestabilising,
    Destabilising,
    Neutral,
}

/// Both thresholds are strict: a median of exactly 2.5 is Destabilising,
/// exactly 0.5 is Neutral.
pub fn classify(median: Option<f64>) -> Stability {
    match median {
        None => Stability::Unset,
        Some(m) if m > SIGNIFICANT_THRESHOLD => Stability::SignificantlyDestabilising,
        Some(m) if m > DELETERIOUS_THRESHOLD => Stability::Destabilising,
        Some(_) => Stability::Neutral,
    }
}

/// Markdown sentence for the dashboard: cites both literature thresholds,
/// the median to two decimal places and the percentile rounded to an
/// integer. None when there is nothing to interpret yet.
pub fn explain(median: Option<f64>, percentile: Option<f64>, category: Stability) -> Option<String> {
    let median = median?;
    if category == Stability::Unset {
        return None;
    }

    let percentile_text = percentile
        .map(|p| format!(" and in the {p:.0}th percentile"))
        .unwrap_or_default();
    let verdict = match category {
        Stability::SignificantlyDestabilising => {
            "It is greater than the Serrano value of +2.5 kcal/mol and significantly destabilising."
        }
        Stability::Destabilising => {
            "It is greater than the deleterious value of +0.5 kcal/mol and destabilising."
        }
        Stability::Neutral => "It is not destabilising.",
        Stability::Unset => unreachable!(),
    };

    Some(format!(
        "A ΔΔG value greater than the {SERRANO_LINK} value of +2.5 kcal/mol is commonly used \
         as a cut-off for significantly destabilising mutations. Other studies, such as \
         {HALL_LINK}, suggest a deleterious value of +0.5 kcal/mol is a threshold for \
         destabilising mutations. The median ΔΔG for the selected variant is \
         {median:.2} kcal/mol{percentile_text}. {verdict}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_strict() {
        assert_eq!(classify(Some(2.51)), Stability::SignificantlyDestabilising);
        assert_eq!(classify(Some(2.5)), Stability::Destabilising);
        assert_eq!(classify(Some(0.51)), Stability::Destabilising);
        assert_eq!(classify(Some(0.5)), Stability::Neutral);
        assert_eq!(classify(Some(-1.2)), Stability::Neutral);
        assert_eq!(classify(None), Stability::Unset);
    }

    #[test]
    fn explanation_cites_median_and_percentile() {
        let text = explain(Some(3.14159), Some(87.4), Stability::SignificantlyDestabilising)
            .unwrap();
        assert!(text.contains("3.14 kcal/mol"));
        assert!(text.contains("87th percentile"));
        assert!(text.contains("+2.5 kcal/mol"));
        assert!(text.contains("+0.5 kcal/mol"));
        assert!(text.contains("significantly destabilising"));
    }

    #[test]
    fn neutral_verdict_reads_as_not_destabilising() {
        let text = explain(Some(0.1), Some(5.0), Stability::Neutral).unwrap();
        assert!(text.ends_with("It is not destabilising."));
    }

    #[test]
    fn no_median_means_no_text() {
        assert_eq!(explain(None, None, Stability::Unset), None);
        assert_eq!(explain(None, Some(50.0), Stability::Neutral), None);
    }

    #[test]
    fn missing_percentile_is_simply_omitted() {
        let text = explain(Some(1.0), None, Stability::Destabilising).unwrap();
        assert!(text.contains("1.00 kcal/mol."));
        assert!(!text.contains("percentile"));
    }
}
