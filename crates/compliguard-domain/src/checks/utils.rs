use crate::catalog::CatalogError;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

/// Compile check patterns into a matcher. `None` when the list is empty.
pub fn build_globset(
    check_id: &str,
    patterns: &[String],
    case_insensitive: bool,
) -> Result<Option<GlobSet>, CatalogError> {
    if patterns.is_empty() {
        return Ok(None);
    }

    let invalid = |pattern: &str, message: String| CatalogError::InvalidPattern {
        check_id: check_id.to_string(),
        pattern: pattern.to_string(),
        message,
    };

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .case_insensitive(case_insensitive)
            .build()
            .map_err(|e| invalid(pattern, e.to_string()))?;
        builder.add(glob);
    }
    let set = builder
        .build()
        .map_err(|e| invalid(&patterns.join(","), e.to_string()))?;
    Ok(Some(set))
}

pub fn matches(set: Option<&GlobSet>, value: &str) -> bool {
    set.map(|s| s.is_match(value)).unwrap_or(false)
}
