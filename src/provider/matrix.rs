//! Distance Matrix API response types.
//!
//! Only the fields the quote needs are modelled: the top-level status and the
//! distance of the first element of the first row, in meters.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct MatrixResponse {
    /// `"OK"` on success, otherwise an error code such as
    /// `"REQUEST_DENIED"` or `"OVER_QUERY_LIMIT"`.
    pub status: String,
    pub error_message: Option<String>,
    #[serde(default)]
    pub rows: Vec<MatrixRow>,
}

#[derive(Debug, Deserialize)]
pub struct MatrixRow {
    #[serde(default)]
    pub elements: Vec<MatrixElement>,
}

#[derive(Debug, Deserialize)]
pub struct MatrixElement {
    pub status: String,
    /// Kept loose so a malformed value surfaces as missing data rather than
    /// a decode failure.
    pub distance: Option<Value>,
}

impl MatrixResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "OK"
    }

    /// Distance of the single origin/destination pair, in meters.
    pub fn first_distance_meters(&self) -> Result<f64, String> {
        let element = self
            .rows
            .first()
            .and_then(|row| row.elements.first())
            .ok_or_else(|| "response has no elements".to_string())?;

        if element.status != "OK" {
            return Err(format!("element status {}", element.status));
        }

        let meters = element
            .distance
            .as_ref()
            .and_then(|distance| distance.get("value"))
            .and_then(Value::as_f64)
            .ok_or_else(|| "element has no numeric distance.value".to_string())?;

        if !meters.is_finite() || meters < 0.0 {
            return Err(format!("distance {meters} is not a valid length"));
        }

        Ok(meters)
    }
}
