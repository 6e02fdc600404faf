#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Run [`crate::segment::validate_graph`] after extraction and fail on any issue.
    pub validate_graph: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            validate_graph: false,
        }
    }
}
