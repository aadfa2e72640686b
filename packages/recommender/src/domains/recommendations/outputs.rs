//! Turns the pipeline's parallel output arrays into candidate records.
//!
//! `first_names` decides how many candidates exist. Any other array that is
//! shorter, absent or `null` yields empty fields for the missing positions;
//! no candidate is dropped because a sibling array came back short.

use serde_json::{Map, Value};
use tracing::warn;

use super::error::{RecommendationError, Result};
use super::models::{CandidateRecord, Location};

pub const FIRST_NAMES: &str = "first_names";
pub const LAST_NAMES: &str = "last_names";
pub const JOB_TITLES: &str = "job_titles";
pub const HEADLINES: &str = "headlines";
pub const LINKS: &str = "links";
pub const PROFILE_PICTURES: &str = "profile_pictures";
pub const CITIES: &str = "cities";
pub const STATES: &str = "states";
pub const COUNTRIES: &str = "countries";
pub const CUSTOM_MESSAGES: &str = "custom_messages";

/// One named output array, with elements coerced to strings.
struct Column {
    values: Vec<String>,
}

impl Column {
    fn read(outputs: &Map<String, Value>, key: &str) -> Result<Option<Self>> {
        let items = match outputs.get(key) {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(RecommendationError::MalformedOutput(format!(
                    "`{}` should be an array, got {}",
                    key,
                    kind_of(other)
                )))
            }
        };

        let values = items
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::String(s) => Ok(s.clone()),
                Value::Null => Ok(String::new()),
                Value::Number(n) => Ok(n.to_string()),
                Value::Bool(b) => Ok(b.to_string()),
                other => Err(RecommendationError::MalformedOutput(format!(
                    "`{}[{}]` should be a string, got {}",
                    key,
                    index,
                    kind_of(other)
                ))),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(Self { values }))
    }

    fn empty() -> Self {
        Self { values: Vec::new() }
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    /// Out-of-range reads yield an empty field.
    fn at(&self, index: usize) -> String {
        self.values.get(index).cloned().unwrap_or_default()
    }

    fn non_empty_at(&self, index: usize) -> Option<String> {
        self.values.get(index).filter(|v| !v.is_empty()).cloned()
    }
}

pub(super) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Zip the outputs of a finished run into candidates, one per `first_names`
/// entry.
pub fn candidates_from_outputs(outputs: &Map<String, Value>) -> Result<Vec<CandidateRecord>> {
    let first_names = Column::read(outputs, FIRST_NAMES)?.ok_or_else(|| {
        RecommendationError::MalformedOutput(format!("missing `{}`", FIRST_NAMES))
    })?;
    let count = first_names.len();

    let sibling = |key: &str| -> Result<Column> {
        match Column::read(outputs, key)? {
            Some(column) => {
                if column.len() != count {
                    warn!(
                        key,
                        expected = count,
                        actual = column.len(),
                        "Output array length differs from first_names"
                    );
                }
                Ok(column)
            }
            None => {
                if count > 0 {
                    warn!(key, "Output array missing, leaving field empty");
                }
                Ok(Column::empty())
            }
        }
    };

    let last_names = sibling(LAST_NAMES)?;
    let job_titles = sibling(JOB_TITLES)?;
    let headlines = sibling(HEADLINES)?;
    let links = sibling(LINKS)?;
    let profile_pictures = sibling(PROFILE_PICTURES)?;
    let cities = sibling(CITIES)?;
    let states = sibling(STATES)?;
    let countries = sibling(COUNTRIES)?;
    let custom_messages = sibling(CUSTOM_MESSAGES)?;

    let records = (0..count)
        .map(|i| CandidateRecord {
            first_name: first_names.at(i),
            last_name: last_names.at(i),
            job_title: job_titles.at(i),
            headline: headlines.at(i),
            link: links.at(i),
            profile_picture: profile_pictures.at(i),
            location: Location {
                city: cities.at(i),
                state: states.at(i),
                country: countries.non_empty_at(i),
            },
            custom_message: custom_messages.at(i),
        })
        .collect();

    Ok(records)
}
