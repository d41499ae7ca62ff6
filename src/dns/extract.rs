//! TXT record marker filtering.
//!
//! SPF and DKIM records are told apart from other TXT data by a version
//! marker at the start of the record. Matching is pure string logic and has
//! no DNS dependency.

use crate::config::{DKIM_VERSION_MARKER, SPF_VERSION_MARKER};

/// Returns `true` when `txt` is exactly `marker` or starts with `marker`
/// followed by a space.
///
/// Both sides are compared case-insensitively, so `V=SPF1 -all` and the
/// marker `v=DKIM1` behave the same as their lowercase forms.
///
/// # Examples
///
/// ```
/// use spf_dns::dns::has_version_marker;
///
/// assert!(has_version_marker("v=spf1", "v=spf1"));
/// assert!(has_version_marker("v=spf1 -all", "v=spf1"));
/// assert!(!has_version_marker("v=spf1test", "v=spf1"));
/// ```
pub fn has_version_marker(txt: &str, marker: &str) -> bool {
    marker_rest(txt, marker).is_some_and(|rest| rest.is_empty() || rest.starts_with(' '))
}

/// Text following a case-insensitive `marker` prefix.
fn marker_rest<'a>(txt: &'a str, marker: &str) -> Option<&'a str> {
    let head = txt.get(..marker.len())?;
    head.eq_ignore_ascii_case(marker)
        .then(|| &txt[marker.len()..])
}

/// SPF record test (RFC 7208 section 4.5): `v=spf1` alone or followed by a space.
pub fn is_spf_record(txt: &str) -> bool {
    has_version_marker(txt, SPF_VERSION_MARKER)
}

/// DKIM key record test.
///
/// DKIM keys are tag lists (`v=DKIM1; k=rsa; p=...`), so the marker may also
/// be terminated by the `;` tag separator.
pub fn is_dkim_record(txt: &str) -> bool {
    marker_rest(txt, DKIM_VERSION_MARKER)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with([' ', ';']))
}

/// Lowercases every TXT value and keeps those accepted by `is_record`, in answer order.
pub fn filter_marked_records<I, S>(values: I, is_record: fn(&str) -> bool) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|txt| txt.as_ref().to_lowercase())
        .filter(|txt| is_record(txt))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_marker_matches() {
        assert!(is_spf_record("v=spf1"));
        assert!(is_dkim_record("v=dkim1"));
    }

    #[test]
    fn test_spf_marker_requires_separating_space() {
        assert!(is_spf_record("v=spf1 include:example.com -all"));
        assert!(!is_spf_record("v=spf1test"));
        assert!(!is_spf_record("v=spf10 -all"));
        assert!(!is_spf_record("v=spf1\t-all"));
        assert!(!is_spf_record("v=spf1;-all"));
    }

    #[test]
    fn test_marker_is_case_insensitive() {
        assert!(is_spf_record("V=SPF1 -all"));
        assert!(has_version_marker("v=dkim1 k=rsa", "v=DKIM1"));
        assert!(has_version_marker("V=DKIM1", "v=dkim1"));
        assert!(is_dkim_record("V=DKIM1; K=RSA"));
    }

    #[test]
    fn test_dkim_tag_separator() {
        assert!(is_dkim_record("v=dkim1; k=rsa; p=mig"));
        assert!(is_dkim_record("v=dkim1 ; k=rsa"));
        assert!(!is_dkim_record("v=dkim10; k=rsa"));
        assert!(!is_dkim_record("k=rsa; p=mig"));
    }

    #[test]
    fn test_short_or_unrelated_text() {
        assert!(!has_version_marker("", SPF_VERSION_MARKER));
        assert!(!has_version_marker("v=sp", SPF_VERSION_MARKER));
        assert!(!has_version_marker(" v=spf1", SPF_VERSION_MARKER));
        assert!(!is_spf_record("google-site-verification=abc"));
    }

    #[test]
    fn test_multibyte_text_does_not_panic() {
        assert!(!is_spf_record("vé=spf1"));
        assert!(!is_spf_record("日本語テキスト"));
        assert!(!is_dkim_record("v=dkim€"));
    }

    #[test]
    fn test_filter_lowercases_and_keeps_order() {
        let records = vec![
            "google-site-verification=abc123",
            "V=SPF1 include:_spf.Example.com ~all",
            "v=spf1test",
            "v=spf1",
        ];
        assert_eq!(
            filter_marked_records(records, is_spf_record),
            vec![
                "v=spf1 include:_spf.example.com ~all".to_string(),
                "v=spf1".to_string()
            ]
        );
    }

    #[test]
    fn test_filter_empty_input() {
        let records: Vec<String> = Vec::new();
        assert!(filter_marked_records(records, is_spf_record).is_empty());
    }
}
