//! Stable user id extraction from composite Taskcluster client ids.
//!
//! Client ids issued through the Mozilla Auth0 login look like
//! `mozilla-auth0/<subject>/bugzilla-dashboard-<suffix>`. The subject part is
//! the same for every credential issued to the person, so it is what we use
//! as the user id.

const NAMESPACE: &str = "mozilla-auth0/";
const DASHBOARD_MARKER: &str = "/bugzilla-dashboard-";

/// Extracts the subject from a composite client id.
///
/// The pattern may appear anywhere in the input; the leftmost match wins.
/// Anything that does not match is returned unchanged.
///
/// - subject: one or more ASCII word characters, `-` or `|`
/// - suffix: one or more ASCII word characters or `-`
#[must_use]
pub fn extract_user_id(client_id: &str) -> &str {
    client_id
        .match_indices(NAMESPACE)
        .find_map(|(start, _)| subject_at(&client_id[start + NAMESPACE.len()..]))
        .unwrap_or(client_id)
}

/// Matches `<subject>/bugzilla-dashboard-<suffix>` at the start of `rest`.
fn subject_at(rest: &str) -> Option<&str> {
    let len = rest.bytes().take_while(|&b| is_subject_byte(b)).count();
    if len == 0 {
        return None;
    }
    let (subject, tail) = rest.split_at(len);
    let suffix = tail.strip_prefix(DASHBOARD_MARKER)?;
    suffix.bytes().next().filter(|&b| is_suffix_byte(b))?;
    Some(subject)
}

fn is_suffix_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

fn is_subject_byte(b: u8) -> bool {
    is_suffix_byte(b) || b == b'|'
}
