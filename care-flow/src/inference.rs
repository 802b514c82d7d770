//! Symptom keywords to canonical condition names.

use tracing::debug;

use crate::tables::{DEFAULT_CONDITION, condition_for_keyword};

/// Input to the estimator: a known condition name, or raw symptom tokens in the order the user
/// typed them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionQuery {
    Condition(String),
    Symptoms(Vec<String>),
}

impl ConditionQuery {
    pub fn condition(name: impl Into<String>) -> Self {
        Self::Condition(name.into())
    }

    pub fn symptoms<I, S>(symptoms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Symptoms(symptoms.into_iter().map(Into::into).collect())
    }

    /// Condition names pass through untouched; symptom lists go through first-match inference.
    pub fn resolve(&self) -> &str {
        match self {
            ConditionQuery::Condition(name) => name,
            ConditionQuery::Symptoms(symptoms) => condition_from_symptoms(symptoms),
        }
    }
}

/// Lower-case and drop every whitespace character, so "Sore Throat" and "sorethroat" agree.
pub fn normalize_symptom(token: &str) -> String {
    token
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Returns the condition of the first token, in input order, that matches a keyword.
///
/// Order is significant: `["vomiting", "fever"]` resolves to "Food Poisoning", not "Fever".
pub fn condition_from_symptoms<S: AsRef<str>>(symptoms: &[S]) -> &'static str {
    symptoms
        .iter()
        .find_map(|symptom| condition_for_keyword(&normalize_symptom(symptom.as_ref())))
        .unwrap_or_else(|| {
            debug!(count = symptoms.len(), "no symptom keyword matched");
            DEFAULT_CONDITION
        })
}

/// Splits free text into candidate tokens, preserving order.
///
/// Each comma, semicolon or newline separated phrase is offered whole first (so "body pain"
/// can hit `bodypain`), followed by its individual words.
pub fn tokenize_symptoms(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for phrase in text.split([',', ';', '\n']) {
        let phrase = phrase.trim();
        if phrase.is_empty() {
            continue;
        }
        tokens.push(phrase.to_string());
        let words: Vec<&str> = phrase.split_whitespace().collect();
        if words.len() > 1 {
            tokens.extend(words.into_iter().map(str::to_string));
        }
    }
    tokens
}
