use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(i64),
    Text(String),
}

impl IntOrString {
    fn into_i32<E: de::Error>(self) -> Result<i32, E> {
        match self {
            IntOrString::Int(n) => i32::try_from(n).map_err(E::custom),
            IntOrString::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("expected an integer, got \"{}\"", s))),
        }
    }
}

/// Browser forms send ids as strings; accept `3` and `"3"` alike
pub fn int_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    IntOrString::deserialize(deserializer)?.into_i32()
}

pub fn opt_int_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i32>, D::Error> {
    Option::<IntOrString>::deserialize(deserializer)?
        .map(IntOrString::into_i32)
        .transpose()
}

/// Query-string number that falls back to `None` when blank or unparseable
pub fn lenient_usize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<usize>, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.and_then(|s| s.trim().parse().ok()))
}

/// A required string field, trimmed; `None` when absent or blank
pub fn required_text(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
