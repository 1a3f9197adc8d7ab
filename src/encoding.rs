//! String tokens to dense integer codes.
use std::collections::{BTreeSet, HashMap};

use crate::error::{BayesError, Result};

/// Maps each distinct token to its position in the sorted vocabulary.
#[derive(Debug, Clone, Default)]
pub struct LabelEncoder {
    vocab: Vec<String>,
    codes: HashMap<String, u32>,
}

impl LabelEncoder {
    pub fn fit<S: AsRef<str>>(tokens: &[S]) -> Self {
        let vocab: Vec<String> = tokens
            .iter()
            .map(|t| t.as_ref().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let codes = vocab
            .iter()
            .enumerate()
            .map(|(code, token)| (token.clone(), code as u32))
            .collect();

        LabelEncoder { vocab, codes }
    }

    pub fn classes(&self) -> &[String] {
        &self.vocab
    }

    pub fn encode(&self, token: &str) -> Result<u32> {
        self.codes
            .get(token)
            .copied()
            .ok_or_else(|| BayesError::UnknownToken(token.to_string()))
    }

    pub fn decode(&self, code: u32) -> Result<&str> {
        self.vocab
            .get(code as usize)
            .map(String::as_str)
            .ok_or(BayesError::UnknownCode(code))
    }

    pub fn transform<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Vec<u32>> {
        tokens.iter().map(|t| self.encode(t.as_ref())).collect()
    }

    pub fn inverse_transform(&self, codes: &[u32]) -> Result<Vec<String>> {
        codes
            .iter()
            .map(|&code| self.decode(code).map(str::to_string))
            .collect()
    }
}

/// Fits one encoder per column of `rows`.
pub fn fit_columns(rows: &[Vec<String>]) -> Vec<LabelEncoder> {
    let num_cols = rows.first().map_or(0, |row| row.len());
    (0..num_cols)
        .map(|col| {
            let column: Vec<&str> = rows.iter().map(|row| row[col].as_str()).collect();
            LabelEncoder::fit(&column)
        })
        .collect()
}

/// Encodes every row with the per-column encoders from `fit_columns`.
pub fn encode_rows(encoders: &[LabelEncoder], rows: &[Vec<String>]) -> Result<Vec<Vec<u32>>> {
    rows.iter()
        .map(|row| {
            if row.len() != encoders.len() {
                return Err(BayesError::ShapeMismatch {
                    expected: encoders.len(),
                    got: row.len(),
                });
            }
            encoders
                .iter()
                .zip(row)
                .map(|(encoder, token)| encoder.encode(token))
                .collect::<Result<Vec<u32>>>()
        })
        .collect()
}
