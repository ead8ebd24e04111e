use std::path::Path;

use crate::error::{Error, Result};
use crate::math::matrix::Matrix;

impl Matrix {
    /// One row per line, entries separated by a single space, each printed
    /// with `decimals` fixed decimal places.
    pub fn to_text(&self, decimals: usize) -> String {
        let mut out = String::new();
        for row in &self.data {
            let line: Vec<String> = row.iter().map(|x| format!("{x:.decimals$}")).collect();
            out.push_str(&line.join(" "));
            out.push('\n');
        }
        out
    }

    /// Parses the format written by `to_text`. Blank lines are skipped.
    pub fn from_text(text: &str) -> Result<Matrix> {
        let mut rows = Vec::new();
        for (n, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let row = line
                .split_whitespace()
                .map(|tok| {
                    tok.parse::<f64>()
                        .map_err(|e| Error::Parse(format!("line {}: {tok:?}: {e}", n + 1)))
                })
                .collect::<Result<Vec<f64>>>()?;
            rows.push(row);
        }
        Matrix::from_data(rows)
    }

    pub fn save_txt<P: AsRef<Path>>(&self, path: P, decimals: usize) -> Result<()> {
        std::fs::write(path, self.to_text(decimals))?;
        Ok(())
    }

    pub fn load_txt<P: AsRef<Path>>(path: P) -> Result<Matrix> {
        let text = std::fs::read_to_string(path)?;
        Matrix::from_text(&text)
    }
}
