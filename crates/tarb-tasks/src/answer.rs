// TARB - Table Artifact Robustness Benchmark
//
// Copyright (c) 2026 the TARB contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Scoring heuristics: extracting a model's answer from free text and
//! matching it against ground truth.
//!
//! Ground truth is the `answer` field of a task instance: a string, a
//! number, a flat list, or a list of lists when several recoveries each
//! contribute their own acceptable answers (any sublist matching counts
//! as correct).

use crate::error::{Result, TaskError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Marker the prompt instructs models to prefix their answer with.
pub const ANSWER_MARKER: &str = "The answer is:";

static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-?\d+(?:\.\d+)?").expect("number pattern is valid"));

/// Extract the text after the last (case-insensitive) answer marker.
pub fn extract_marked_answer(text: &str) -> Result<String> {
    let lower = text.to_lowercase();
    let marker = ANSWER_MARKER.to_lowercase();
    let idx = lower.rfind(&marker).ok_or(TaskError::MissingAnswerMarker)?;
    Ok(text[idx + marker.len()..].trim().to_string())
}

/// First numeric literal in a string, if any.
pub fn extract_first_number(text: &str) -> Option<&str> {
    NUMBER_RE.find(text).map(|m| m.as_str())
}

/// Match a predicted answer string against ground truth.
///
/// Strings compare case- and whitespace-insensitively. Numbers are
/// extracted from the prediction and compared with a tolerance derived
/// from the ground truth's printed precision. Flat string lists use set
/// semantics over comma-separated items; flat number lists compare
/// sorted, element-wise. A list of lists matches if any sublist does.
pub fn match_answer(predicted: &str, ground_truth: &Value) -> bool {
    match ground_truth {
        Value::Array(items) if items.iter().all(Value::is_array) => items
            .iter()
            .any(|sublist| match_flat_list(predicted, sublist.as_array().expect("checked"))),
        Value::Array(items) => match_flat_list(predicted, items),
        Value::String(s) => string_eq(predicted, s),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                int_match(predicted, i)
            } else {
                n.as_f64().is_some_and(|f| float_match(predicted, f))
            }
        }
        Value::Bool(b) => string_eq(predicted, &b.to_string()),
        Value::Null => false,
        Value::Object(_) => false,
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

fn string_eq(predicted: &str, expected: &str) -> bool {
    normalize(predicted) == normalize(expected)
}

fn int_match(predicted: &str, expected: i64) -> bool {
    let Some(num) = extract_first_number(predicted) else {
        return false;
    };
    match num.parse::<f64>() {
        Ok(value) => value.fract() == 0.0 && value as i64 == expected,
        Err(_) => false,
    }
}

/// Tolerance follows the ground truth's printed decimal places; a more
/// precise prediction (up to 3 decimals) tightens it.
fn float_match(predicted: &str, expected: f64) -> bool {
    let Some(num) = extract_first_number(predicted) else {
        return false;
    };
    let Ok(value) = num.parse::<f64>() else {
        return false;
    };
    let expected_str = expected.to_string();
    let mut decimals = decimal_places(&expected_str);
    let predicted_decimals = decimal_places(num);
    if predicted_decimals <= 3 {
        decimals = decimals.max(predicted_decimals);
    }
    let tolerance = 10f64.powi(-(decimals as i32));
    (value - expected).abs() <= tolerance
}

fn decimal_places(s: &str) -> usize {
    s.split_once('.').map_or(0, |(_, frac)| frac.len())
}

fn match_flat_list(predicted: &str, items: &[Value]) -> bool {
    if items.iter().all(Value::is_string) {
        let predicted_set: std::collections::BTreeSet<String> =
            predicted.split(',').map(normalize).collect();
        let expected_set: std::collections::BTreeSet<String> = items
            .iter()
            .map(|v| normalize(v.as_str().expect("checked")))
            .collect();
        return predicted_set == expected_set;
    }
    if items.iter().all(Value::is_number) {
        let Ok(mut predicted_nums) = predicted
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<std::result::Result<Vec<f64>, _>>()
        else {
            return false;
        };
        if predicted_nums.len() != items.len() {
            return false;
        }
        let mut expected_nums: Vec<&Value> = items.iter().collect();
        predicted_nums.sort_by(|a, b| a.total_cmp(b));
        expected_nums.sort_by(|a, b| {
            a.as_f64()
                .unwrap_or(f64::NAN)
                .total_cmp(&b.as_f64().unwrap_or(f64::NAN))
        });
        return predicted_nums
            .iter()
            .zip(expected_nums)
            .all(|(p, e)| match_answer(&p.to_string(), e));
    }
    false
}
