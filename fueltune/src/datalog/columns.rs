//! Mapping from sample fields to datalog column headers.

use std::fmt;

/// A sample field read from a datalog column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Time,
    Load,
    Rpm,
    LambdaActual,
    LambdaTarget,
    Stft,
    Ltft,
    Throttle,
}

impl Field {
    /// Every field, in column-mapping order.
    pub const ALL: [Field; 8] = [
        Field::Time,
        Field::Load,
        Field::Rpm,
        Field::LambdaActual,
        Field::LambdaTarget,
        Field::Stft,
        Field::Ltft,
        Field::Throttle,
    ];

    /// Key used for this field in configuration files.
    pub fn key(&self) -> &'static str {
        match self {
            Field::Time => "time",
            Field::Load => "load",
            Field::Rpm => "rpm",
            Field::LambdaActual => "lambda_actual",
            Field::LambdaTarget => "lambda_target",
            Field::Stft => "stft",
            Field::Ltft => "ltft",
            Field::Throttle => "throttle",
        }
    }

    /// Parse a configuration key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.key() == key)
    }

    /// Header written by Cobb-style logging tools.
    pub fn default_header(&self) -> &'static str {
        match self {
            Field::Time => "Time (s)",
            Field::Load => "Load (MAF) (g/rev)",
            Field::Rpm => "Engine Speed (rpm)",
            Field::LambdaActual => "Air/Fuel Sensor #1 (λ)",
            Field::LambdaTarget => "Power Mode - Fuel Ratio Target (λ)",
            Field::Stft => "Fuel Trim - Short Term (%)",
            Field::Ltft => "Fuel Trim - Long Term (%)",
            Field::Throttle => "Throttle Position (%)",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Column header for each sample field.
///
/// # Example
///
/// ```
/// use fueltune::datalog::{ColumnMapping, Field};
///
/// let mapping = ColumnMapping::default().with_header(Field::Load, "Load (g/rev)");
/// assert_eq!(mapping.header(Field::Load), "Load (g/rev)");
/// assert_eq!(mapping.header(Field::Rpm), "Engine Speed (rpm)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    headers: [String; 8],
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            headers: Field::ALL.map(|f| f.default_header().to_string()),
        }
    }
}

impl ColumnMapping {
    /// Header mapped to a field.
    pub fn header(&self, field: Field) -> &str {
        &self.headers[field.slot()]
    }

    /// Map a field to a different header.
    pub fn with_header(mut self, field: Field, header: impl Into<String>) -> Self {
        self.headers[field.slot()] = header.into();
        self
    }

    /// `(field, header)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::ALL.iter().map(move |&f| (f, self.header(f)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_headers() {
        let mapping = ColumnMapping::default();
        assert_eq!(mapping.header(Field::Time), "Time (s)");
        assert_eq!(
            mapping.header(Field::LambdaTarget),
            "Power Mode - Fuel Ratio Target (λ)"
        );
        assert_eq!(mapping.iter().count(), 8);
    }

    #[test]
    fn test_field_keys_roundtrip() {
        for field in Field::ALL {
            assert_eq!(Field::from_key(field.key()), Some(field));
        }
        assert_eq!(Field::from_key("boost"), None);
    }

    #[test]
    fn test_override_leaves_others() {
        let mapping = ColumnMapping::default()
            .with_header(Field::Stft, "STFT")
            .with_header(Field::Ltft, "LTFT");
        assert_eq!(mapping.header(Field::Stft), "STFT");
        assert_eq!(mapping.header(Field::Ltft), "LTFT");
        assert_eq!(mapping.header(Field::Throttle), "Throttle Position (%)");
    }
}
