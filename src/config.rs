/// Namespace of IEEE 1855 fuzzy markup documents.
pub const IEEE1855_NAMESPACE: &str = "http://www.ieee1855.org";

/// Settings for reading fuzzy system documents.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParserConfig {
    /// Only elements in this namespace are matched below the root.
    pub namespace: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            namespace: IEEE1855_NAMESPACE.to_owned(),
        }
    }
}

impl ParserConfig {
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }
}

/// Settings for reading training data tables.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrainingDataConfig {
    pub delimiter: u8,
    /// Strip surrounding whitespace from headers and cells.
    pub trim: bool,
}

impl Default for TrainingDataConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
        }
    }
}

impl TrainingDataConfig {
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }
}
