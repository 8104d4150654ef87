/// Multinomial naive Bayes over non-negative feature rows (here TF-IDF).
#[derive(Debug, Clone)]
pub struct MultinomialNb {
    class_log_prior: Vec<f64>,
    /// `[class][feature]` log P(feature | class) after additive smoothing
    feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    /// Fits with additive smoothing `alpha` and empirical class priors.
    /// `labels[i]` is the class index of `rows[i]`, in `0..n_classes`.
    pub fn fit(rows: &[Vec<f64>], labels: &[usize], n_classes: usize, alpha: f64) -> Self {
        let n_features = rows.first().map_or(0, Vec::len);
        let mut class_counts = vec![0usize; n_classes];
        let mut feature_counts = vec![vec![0.0; n_features]; n_classes];

        for (row, &label) in rows.iter().zip(labels) {
            class_counts[label] += 1;
            for (acc, value) in feature_counts[label].iter_mut().zip(row) {
                *acc += value;
            }
        }

        let n_samples = rows.len() as f64;
        let class_log_prior = class_counts
            .iter()
            .map(|&c| (c as f64 / n_samples).ln())
            .collect();

        let feature_log_prob = feature_counts
            .into_iter()
            .map(|counts| {
                let total: f64 = counts.iter().sum::<f64>() + alpha * n_features as f64;
                counts
                    .into_iter()
                    .map(|c| ((c + alpha) / total).ln())
                    .collect()
            })
            .collect();

        Self {
            class_log_prior,
            feature_log_prob,
        }
    }

    /// Posterior probability of each class for `row`. Sums to 1.
    pub fn predict_proba(&self, row: &[f64]) -> Vec<f64> {
        let joint: Vec<f64> = self
            .class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, log_probs)| {
                prior
                    + log_probs
                        .iter()
                        .zip(row)
                        .map(|(lp, x)| lp * x)
                        .sum::<f64>()
            })
            .collect();

        // log-sum-exp; classes with no training samples sit at -inf and get 0
        let max = joint.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = joint.iter().map(|j| (j - max).exp()).collect();
        let sum: f64 = exps.iter().sum();
        exps.into_iter().map(|e| e / sum).collect()
    }

    /// Index of the most probable class. Ties resolve to the lowest index.
    pub fn predict(&self, row: &[f64]) -> usize {
        argmax(&self.predict_proba(row))
    }
}

pub fn argmax(values: &[f64]) -> usize {
    values
        .iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(best_i, best_v), (i, &v)| {
            if v > best_v {
                (i, v)
            } else {
                (best_i, best_v)
            }
        })
        .0
}
