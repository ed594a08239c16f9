//! Decoder configuration.

/// Id of the marker definition every marker uses by default.
pub const DEFAULT_NOTE_DEFINITION: &str = "ssp_note";

/// How a marker's field layout is chosen from the marker definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionLookup {
    /// Every marker uses the definition with this id.
    Fixed(String),
    /// A marker's type byte indexes the definition list.
    ByMarkerType,
}

impl Default for DefinitionLookup {
    fn default() -> Self {
        Self::Fixed(DEFAULT_NOTE_DEFINITION.to_string())
    }
}

/// Options controlling how a map is decoded.
///
/// # Example
///
/// ```
/// use sspm_format::{DecodeOptions, DefinitionLookup};
///
/// let options = DecodeOptions::new().with_definition_lookup(DefinitionLookup::ByMarkerType);
/// assert_eq!(options.definition_lookup, DefinitionLookup::ByMarkerType);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecodeOptions {
    /// Marker definition selection.
    pub definition_lookup: DefinitionLookup,
}

impl DecodeOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the marker definition selection.
    pub fn with_definition_lookup(mut self, lookup: DefinitionLookup) -> Self {
        self.definition_lookup = lookup;
        self
    }
}
