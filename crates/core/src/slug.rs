//! URL slug derivation.
//!
//! Slugs are derived from titles/names at create time and re-derived when
//! the name changes. The stores enforce their uniqueness.

/// Derive a URL slug from a human-readable name.
///
/// Lowercases, keeps alphanumerics, and joins everything else into single
/// dashes. Leading/trailing dashes are stripped.
///
/// ```
/// use ridegear_core::slug::slugify;
///
/// assert_eq!(slugify("Apex Pro Helmet"), "apex-pro-helmet");
/// assert_eq!(slugify("  Gloves -- Size L  "), "gloves-size-l");
/// ```
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn lowercases_and_dashes() {
        assert_eq!(slugify("Apex Pro Helmet"), "apex-pro-helmet");
    }

    #[test]
    fn collapses_punctuation_runs() {
        assert_eq!(slugify("Gloves -- Size L!"), "gloves-size-l");
        assert_eq!(slugify("100% Waterproof (2-Layer)"), "100-waterproof-2-layer");
    }

    #[test]
    fn strips_edges() {
        assert_eq!(slugify("  trailing  "), "trailing");
        assert_eq!(slugify("---"), "");
    }
}
