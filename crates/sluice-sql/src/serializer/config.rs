/// Statement rendering options.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Prefix of generated parameter names. Parameters render as
    /// `@{prefix}{n}`.
    pub param_prefix: String,

    /// Reject string values longer than the column they are written to.
    pub check_string_length: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            param_prefix: "p".to_string(),
            check_string_length: true,
        }
    }
}
