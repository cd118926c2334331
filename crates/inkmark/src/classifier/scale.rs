use std::path::Path;

use crate::error::RecognizeError;

/// Per-feature divisors fixed when the model was trained.
///
/// Features beyond the length of the range are passed through unscaled.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct ScaleRange(Vec<f64>);

impl Default for ScaleRange {
    /// Range shipped with the default models: variance, mean angle, two
    /// band percentages, ink percentage.
    fn default() -> Self {
        Self(vec![5000.0, 180.0, 100.0, 100.0, 100.0])
    }
}

impl ScaleRange {
    pub fn new(divisors: Vec<f64>) -> Result<Self, RecognizeError> {
        if divisors.is_empty() {
            return Err(RecognizeError::InvalidScaleRange {
                reason: "no divisors".to_string(),
            });
        }
        if let Some((i, d)) = divisors
            .iter()
            .enumerate()
            .find(|(_, d)| !d.is_finite() || **d <= 0.0)
        {
            return Err(RecognizeError::InvalidScaleRange {
                reason: format!("divisor {} is {}, expected a positive number", i, d),
            });
        }
        Ok(Self(divisors))
    }

    /// Parse numbers separated by whitespace, commas or newlines.
    pub fn from_text(text: &str) -> Result<Self, RecognizeError> {
        let divisors = text
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|tok| !tok.is_empty())
            .map(|tok| {
                tok.parse::<f64>()
                    .map_err(|e| RecognizeError::InvalidScaleRange {
                        reason: format!("'{}': {}", tok, e),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(divisors)
    }

    /// Load a plain-text scale range file.
    pub fn from_text_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_text(&text)?)
    }

    pub fn divisors(&self) -> &[f64] {
        &self.0
    }

    /// Divide each feature by its divisor where one exists.
    pub fn apply(&self, features: &[f64]) -> Vec<f64> {
        features
            .iter()
            .enumerate()
            .map(|(i, &f)| match self.0.get(i) {
                Some(d) => f / d,
                None => f,
            })
            .collect()
    }
}

impl TryFrom<Vec<f64>> for ScaleRange {
    type Error = RecognizeError;

    fn try_from(v: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(v)
    }
}

impl From<ScaleRange> for Vec<f64> {
    fn from(s: ScaleRange) -> Self {
        s.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_beyond_range_are_unscaled() {
        let s = ScaleRange::new(vec![2.0, 4.0]).unwrap();
        assert_eq!(s.apply(&[8.0, 8.0, 8.0, 8.0, 8.0]), vec![4.0, 2.0, 8.0, 8.0, 8.0]);
    }

    #[test]
    fn extra_divisors_are_ignored() {
        let s = ScaleRange::new(vec![2.0; 7]).unwrap();
        assert_eq!(s.apply(&[1.0, 2.0]), vec![0.5, 1.0]);
    }

    #[test]
    fn parses_mixed_separators() {
        let s = ScaleRange::from_text("3172.5, 180\n100 100\n\t87.25\n").unwrap();
        assert_eq!(s.divisors(), &[3172.5, 180.0, 100.0, 100.0, 87.25]);
    }

    #[test]
    fn rejects_bad_divisors() {
        assert!(ScaleRange::from_text("").is_err());
        assert!(ScaleRange::from_text("1 0 3").is_err());
        assert!(ScaleRange::from_text("1 -2").is_err());
        assert!(ScaleRange::from_text("1 abc").is_err());
        assert!(serde_json::from_str::<ScaleRange>("[1.0, 0.0]").is_err());
    }
}
