/// Cut trailing boilerplate from extracted article text.
///
/// Each marker is tried in order; when it occurs, everything from its first
/// occurrence on is dropped and the remainder is trimmed. Content without
/// any marker is returned untouched.
pub fn strip_boilerplate<S: AsRef<str>>(content: &str, markers: &[S]) -> String {
    let mut content = content.to_string();

    for marker in markers {
        let marker = marker.as_ref();
        if marker.is_empty() {
            continue;
        }
        if let Some(pos) = content.find(marker) {
            content = content[..pos].trim().to_string();
        }
    }

    content
}
