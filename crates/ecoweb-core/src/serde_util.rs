//! Lenient deserializers for fields the backend sends with varying JSON types.

use serde::{Deserialize, Deserializer, de::Error};

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Int(i64),
    Float(f64),
}

/// Accepts `"42"` or `42` for identifier fields.
pub fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::Int(i) => i.to_string(),
        StringOrNumber::Float(f) => f.to_string(),
    })
}

/// Accepts `12.5` or `"12.5"` for numeric fields.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .map_err(|e| D::Error::custom(format!("invalid number '{}': {}", s, e))),
        StringOrNumber::Int(i) => Ok(i as f64),
        StringOrNumber::Float(f) => Ok(f),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(deserialize_with = "id_string")]
        id: String,
        #[serde(deserialize_with = "lenient_f64")]
        quantity: f64,
    }

    #[test]
    fn test_numeric_id_and_string_quantity() {
        let sample: Sample = serde_json::from_str(r#"{"id": 7, "quantity": "12,5"}"#).unwrap();
        assert_eq!(sample.id, "7");
        assert_eq!(sample.quantity, 12.5);
    }

    #[test]
    fn test_invalid_quantity() {
        let result: Result<Sample, _> = serde_json::from_str(r#"{"id": "a", "quantity": "lots"}"#);
        assert!(result.is_err());
    }
}
