use serde::Serialize;

/// Below this a pivot is treated as zero and its coefficient pinned to 0.
const PIVOT_EPSILON: f64 = 1e-9;

/// Ordinary least squares with an intercept.
#[derive(Debug, Clone)]
pub struct LinearRegression {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LinearRegression {
    /// Fits by solving the normal equations `(XᵀX) β = Xᵀy` on the design
    /// matrix augmented with a leading column of ones. Rank-deficient
    /// directions (constant or collinear features) get a zero coefficient.
    pub fn fit(rows: &[Vec<f64>], targets: &[f64]) -> Self {
        let width = rows.first().map_or(0, Vec::len) + 1;
        let mut xtx = vec![vec![0.0; width]; width];
        let mut xty = vec![0.0; width];

        for (row, &y) in rows.iter().zip(targets) {
            let augmented: Vec<f64> = std::iter::once(1.0).chain(row.iter().copied()).collect();
            for i in 0..width {
                xty[i] += augmented[i] * y;
                for j in 0..width {
                    xtx[i][j] += augmented[i] * augmented[j];
                }
            }
        }

        let beta = solve(xtx, xty);
        Self {
            intercept: beta[0],
            coefficients: beta[1..].to_vec(),
        }
    }

    pub fn predict(&self, row: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(row)
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }
}

/// Gauss-Jordan elimination with partial pivoting. Free variables are 0.
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Vec<f64> {
    let n = b.len();
    let mut pivot_row_of = vec![None; n];
    let mut row = 0;

    for col in 0..n {
        if row == n {
            break;
        }

        let mut best = row;
        for r in row + 1..n {
            if a[r][col].abs() > a[best][col].abs() {
                best = r;
            }
        }
        if a[best][col].abs() < PIVOT_EPSILON {
            continue;
        }

        a.swap(row, best);
        b.swap(row, best);

        let pivot = a[row][col];
        for c in col..n {
            a[row][c] /= pivot;
        }
        b[row] /= pivot;

        for r in 0..n {
            if r == row {
                continue;
            }
            let factor = a[r][col];
            if factor == 0.0 {
                continue;
            }
            for c in col..n {
                a[r][c] -= factor * a[row][c];
            }
            b[r] -= factor * b[row];
        }

        pivot_row_of[col] = Some(row);
        row += 1;
    }

    pivot_row_of
        .into_iter()
        .map(|r| r.map_or(0.0, |r| b[r]))
        .collect()
}

/// Goodness of fit on one data split.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RegressionMetrics {
    pub mae: f64,
    pub rmse: f64,
    pub r2: f64,
}

impl RegressionMetrics {
    pub fn compute(actual: &[f64], predicted: &[f64]) -> Self {
        let n = actual.len().max(1) as f64;
        let mean = actual.iter().sum::<f64>() / n;

        let mut abs_err = 0.0;
        let mut ss_res = 0.0;
        let mut ss_tot = 0.0;
        for (y, y_hat) in actual.iter().zip(predicted) {
            abs_err += (y - y_hat).abs();
            ss_res += (y - y_hat).powi(2);
            ss_tot += (y - mean).powi(2);
        }

        let r2 = if ss_tot > 0.0 {
            1.0 - ss_res / ss_tot
        } else if ss_res == 0.0 {
            1.0
        } else {
            0.0
        };

        Self {
            mae: abs_err / n,
            rmse: (ss_res / n).sqrt(),
            r2,
        }
    }
}
