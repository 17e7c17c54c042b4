//! Restriction of the raw label space to the supported disease set.

use serde::{Deserialize, Serialize};

/// The four diseases this system claims to diagnose.
pub const ALLOWED_DISEASES: [&str; 4] = ["Dengue", "Pneumonia", "Typhoid", "Impetigo"];

pub fn is_allowed(disease: &str) -> bool {
    ALLOWED_DISEASES.contains(&disease)
}

/// One ranked entry of the restricted distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseScore {
    pub disease: String,
    pub probability: f64,
}

/// Keep only allowed diseases, ranked by probability.
///
/// Returns the (possibly overridden) prediction and the ranked list. When
/// the raw argmax is outside the allowed set, the prediction is replaced
/// by the top allowed disease — the best answer within the domain the
/// system supports. If no label is allowed at all, the raw prediction
/// passes through unchanged with an empty ranking and the caller's gate
/// decides what to do with it.
pub fn filter_allowed(
    mean_probs: &[f64],
    labels: &[String],
    predicted: &str,
) -> (String, Vec<DiseaseScore>) {
    let mut top: Vec<DiseaseScore> = labels
        .iter()
        .zip(mean_probs)
        .filter(|(label, _)| is_allowed(label))
        .map(|(label, &probability)| DiseaseScore {
            disease: label.clone(),
            probability,
        })
        .collect();

    // Stable sort: ties keep original label order.
    top.sort_by(|a, b| {
        b.probability
            .partial_cmp(&a.probability)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let pred = if !is_allowed(predicted) {
        match top.first() {
            Some(best) => best.disease.clone(),
            None => predicted.to_string(),
        }
    } else {
        predicted.to_string()
    };

    (pred, top)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn ranking_is_sorted_descending() {
        let labels = labels(&["Typhoid", "Dengue", "Impetigo", "Pneumonia"]);
        let probs = [0.1, 0.4, 0.2, 0.3];
        let (_, top) = filter_allowed(&probs, &labels, "Dengue");
        let ps: Vec<f64> = top.iter().map(|d| d.probability).collect();
        assert_eq!(ps, vec![0.4, 0.3, 0.2, 0.1]);
        assert!(ps.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn ties_keep_label_order() {
        let labels = labels(&["Typhoid", "Dengue", "Pneumonia"]);
        let probs = [0.3, 0.3, 0.4];
        let (_, top) = filter_allowed(&probs, &labels, "Pneumonia");
        assert_eq!(top[0].disease, "Pneumonia");
        assert_eq!(top[1].disease, "Typhoid");
        assert_eq!(top[2].disease, "Dengue");
    }

    #[test]
    fn out_of_domain_prediction_is_overridden() {
        let labels = labels(&["Dengue", "Influenza", "Pneumonia"]);
        let probs = [0.3, 0.5, 0.2];
        let (pred, top) = filter_allowed(&probs, &labels, "Influenza");
        assert_eq!(pred, "Dengue");
        assert_eq!(top.len(), 2);
    }

    #[test]
    fn pred_stays_in_allowed_set_when_mass_exists() {
        let labels = labels(&["Tuberculosis", "Dengue"]);
        let probs = [0.9, 0.1];
        let (pred, _) = filter_allowed(&probs, &labels, "Tuberculosis");
        assert!(is_allowed(&pred));
    }

    #[test]
    fn no_allowed_labels_passes_prediction_through() {
        let labels = labels(&["Influenza", "Tuberculosis"]);
        let probs = [0.6, 0.4];
        let (pred, top) = filter_allowed(&probs, &labels, "Influenza");
        assert_eq!(pred, "Influenza");
        assert!(top.is_empty());
    }

    #[test]
    fn restricted_mass_never_exceeds_one() {
        let labels = labels(&["Dengue", "Pneumonia", "Typhoid", "Impetigo", "Other"]);
        let probs = [0.2, 0.2, 0.2, 0.2, 0.2];
        let (_, top) = filter_allowed(&probs, &labels, "Dengue");
        let mass: f64 = top.iter().map(|d| d.probability).sum();
        assert!(mass <= 1.0 + 1e-9);
        assert_eq!(top.len(), 4);
    }
}
