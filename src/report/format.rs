//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use nalgebra::{DMatrix, DVector};

use crate::domain::{DatasetStats, FitConfig, FitResult, ObservationResidual};
use crate::io::ingest::RowError;

/// Format a dense matrix with aligned columns, one bracketed row per line.
pub fn format_matrix(m: &DMatrix<f64>) -> String {
    let (rows, cols) = m.shape();
    if rows == 0 || cols == 0 {
        return "[]".to_string();
    }

    // Column-wise alignment: width of the widest entry in each column.
    let rendered: Vec<Vec<String>> = (0..rows)
        .map(|i| (0..cols).map(|j| fmt_entry(m[(i, j)])).collect())
        .collect();
    let widths: Vec<usize> = (0..cols)
        .map(|j| rendered.iter().map(|row| row[j].len()).max().unwrap_or(0))
        .collect();

    let mut out = String::new();
    for row in &rendered {
        out.push('[');
        for (j, cell) in row.iter().enumerate() {
            if j > 0 {
                out.push_str("  ");
            }
            out.push_str(&format!("{cell:>width$}", width = widths[j]));
        }
        out.push_str("]\n");
    }
    out
}

/// Format the assembled regression system for display.
pub fn format_design_matrices(x: &DMatrix<f64>, y: &DVector<f64>) -> String {
    let y_matrix = DMatrix::from_column_slice(y.nrows(), 1, y.as_slice());
    format!("X:\n{}y:\n{}", format_matrix(x), format_matrix(&y_matrix))
}

/// Format the full run summary (dataset stats + coefficients + fit quality).
pub fn format_run_summary(stats: &DatasetStats, fit: &FitResult, config: &FitConfig) -> String {
    let mut out = String::new();

    out.push_str("=== ols - QR least-squares fit ===\n");
    out.push_str(&format!(
        "Observations: n={} | predictors={} | response=[{:.4}, {:.4}]\n",
        stats.n_obs, stats.num_vars, stats.response_min, stats.response_max
    ));
    out.push_str(&format!("Singular tolerance: {:e}\n", config.singular_tol));

    out.push_str("\nCoefficients:\n");
    out.push_str(&format!(
        "  {:<12} {:>14.6}\n",
        "intercept",
        fit.model.intercept()
    ));
    for (name, value) in fit.model.predictor_names.iter().zip(fit.model.slopes()) {
        out.push_str(&format!("  {name:<12} {value:>14.6}\n"));
    }

    let q = &fit.quality;
    out.push_str(&format!(
        "\nFit quality: SSE={:.6} RMSE={:.6} R^2={:.6} (n={})\n",
        q.sse, q.rmse, q.r_squared, q.n
    ));

    out
}

/// Format row-level ingest problems, if any.
pub fn format_row_errors(row_errors: &[RowError]) -> String {
    let mut out = String::new();
    if row_errors.is_empty() {
        return out;
    }
    out.push_str(&format!("Skipped {} row(s):\n", row_errors.len()));
    for e in row_errors {
        match &e.id {
            Some(id) => out.push_str(&format!("  line {} ({}): {}\n", e.line, id, e.message)),
            None => out.push_str(&format!("  line {}: {}\n", e.line, e.message)),
        }
    }
    out
}

/// Format the worst-fit observations table.
pub fn format_outlier_table(outliers: &[ObservationResidual]) -> String {
    let mut out = String::new();

    out.push_str("Largest residuals:\n");
    out.push_str(
        format!(
            "{:<16} {:>12} {:>12} {:>12}\n",
            "id", "y_obs", "y_fit", "residual"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<16} {:-<12} {:-<12} {:-<12}\n", "", "", "", "").trim_end());
    out.push('\n');

    for r in outliers {
        let o = &r.observation;
        out.push_str(
            format!(
                "{:<16} {:>12.4} {:>12.4} {:>12.4}\n",
                truncate(&o.id, 16),
                o.response,
                r.y_fit,
                r.residual,
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

fn fmt_entry(v: f64) -> String {
    format!("{v:.4}")
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
