use url::Url;

use crate::error::GistError;

/// Ids people paste from placeholder docs rather than real gists.
const PLACEHOLDER_IDS: [&str; 4] = ["test-gist", "gist-id", "your-gist-id", "example-gist"];

const MIN_ID_LEN: usize = 8;
const MAX_ID_LEN: usize = 40;
const MAX_HYPHENS: usize = 4;

/// Turn a bare id or a pasted gist URL into a canonical gist id.
///
/// Accepts `abc123def456`, `https://gist.github.com/user/abc123def456`,
/// trailing-slash and `#file-...` fragment variants of the latter.
pub fn normalize_gist_id(raw: &str) -> Result<String, GistError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(GistError::InvalidIdentifier(raw.to_string()));
    }

    if !trimmed.contains("://") {
        if is_plausible_id(trimmed) {
            return Ok(trimmed.to_string());
        }
        return Err(GistError::InvalidIdentifier(trimmed.to_string()));
    }

    let url = Url::parse(trimmed)
        .map_err(|_| GistError::UnresolvableIdentifier(trimmed.to_string()))?;
    let host = url.host_str().unwrap_or_default();
    if !is_gist_host(host) {
        return Err(GistError::UnresolvableIdentifier(trimmed.to_string()));
    }

    // Url already strips the fragment; a trailing slash just leaves an
    // empty last segment, so take the last non-empty one.
    let candidate = url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .ok_or_else(|| GistError::UnresolvableIdentifier(trimmed.to_string()))?;

    if candidate.contains('.') || !is_plausible_id(candidate) {
        return Err(GistError::UnresolvableIdentifier(trimmed.to_string()));
    }
    Ok(candidate.to_string())
}

fn is_gist_host(host: &str) -> bool {
    host == "github.com" || host == "gist.github.com" || host.ends_with(".github.com")
}

fn is_plausible_id(candidate: &str) -> bool {
    if candidate.len() < MIN_ID_LEN || candidate.len() > MAX_ID_LEN {
        return false;
    }
    if !candidate.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return false;
    }
    if candidate.chars().filter(|c| *c == '-').count() > MAX_HYPHENS {
        return false;
    }
    !PLACEHOLDER_IDS.iter().any(|p| candidate.eq_ignore_ascii_case(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bare_id_round_trips() {
        let id = "aa5a315d61ae9438b18d";
        assert_eq!(normalize_gist_id(id).unwrap(), id);
        assert_eq!(normalize_gist_id(&format!("  {id}  ")).unwrap(), id);
    }

    #[test]
    fn url_variants_normalize_identically() {
        let id = "aa5a315d61ae9438b18d";
        let plain = format!("https://gist.github.com/octocat/{id}");
        let slashed = format!("https://gist.github.com/octocat/{id}/");
        let fragment = format!("https://gist.github.com/octocat/{id}#file-main-py");
        assert_eq!(normalize_gist_id(&plain).unwrap(), id);
        assert_eq!(normalize_gist_id(&slashed).unwrap(), id);
        assert_eq!(normalize_gist_id(&fragment).unwrap(), id);
    }

    #[test]
    fn api_url_also_resolves() {
        let id = "aa5a315d61ae9438b18d";
        let url = format!("https://api.github.com/gists/{id}");
        assert_eq!(normalize_gist_id(&url).unwrap(), id);
    }

    #[test]
    fn empty_input_is_invalid() {
        assert!(matches!(
            normalize_gist_id("   "),
            Err(GistError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn wrong_domain_is_unresolvable() {
        assert!(matches!(
            normalize_gist_id("https://example.com/user/aa5a315d61ae9438b18d"),
            Err(GistError::UnresolvableIdentifier(_))
        ));
    }

    #[test]
    fn bare_domain_url_is_unresolvable() {
        assert!(matches!(
            normalize_gist_id("https://gist.github.com/"),
            Err(GistError::UnresolvableIdentifier(_))
        ));
    }

    #[test]
    fn dotted_last_segment_is_rejected() {
        assert!(matches!(
            normalize_gist_id("https://gist.github.com/user/archive.tar.gz"),
            Err(GistError::UnresolvableIdentifier(_))
        ));
    }

    #[test]
    fn length_bounds_are_enforced() {
        assert!(normalize_gist_id("abc1234").is_err());
        assert!(normalize_gist_id("abc12345").is_ok());
        assert!(normalize_gist_id(&"a".repeat(40)).is_ok());
        assert!(normalize_gist_id(&"a".repeat(41)).is_err());
    }

    #[test]
    fn hyphen_count_limit_is_enforced() {
        assert!(normalize_gist_id("a-b-c-d-e123").is_ok());
        assert!(normalize_gist_id("a-b-c-d-e-f12").is_err());
    }

    #[test]
    fn placeholder_ids_are_rejected() {
        assert!(matches!(
            normalize_gist_id("test-gist"),
            Err(GistError::InvalidIdentifier(_))
        ));
        assert!(matches!(
            normalize_gist_id("https://gist.github.com/user/your-gist-id"),
            Err(GistError::UnresolvableIdentifier(_))
        ));
    }

    #[test]
    fn non_alphanumeric_ids_are_rejected() {
        assert!(normalize_gist_id("abc_123456").is_err());
        assert!(normalize_gist_id("abc 123456").is_err());
    }
}
