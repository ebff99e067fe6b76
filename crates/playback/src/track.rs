//! Track index resolution.
//!
//! Clients name tracks with tokens like `/007.mp3`, `7` or `0012_intro.mp3`.
//! The module only understands numeric indices, so the token is reduced to the
//! decimal number at its start.

use platform::TrackIndex;

/// Parse the leading decimal number of `token`, after one optional `/`.
///
/// Returns `None` when there is no leading digit or the number does not fit
/// in a `u32`. `0` is a successful parse; use [`track_index`] to also reject
/// it.
///
/// ```
/// use playback::track::resolve;
///
/// assert_eq!(resolve("/007.mp3"), Some(7));
/// assert_eq!(resolve("0foo"), Some(0));
/// assert_eq!(resolve("abc"), None);
/// ```
pub fn resolve(token: &str) -> Option<u32> {
    let rest = token.strip_prefix('/').unwrap_or(token);
    let digits = rest
        .split(|c: char| !c.is_ascii_digit())
        .next()
        .unwrap_or_default();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// [`resolve`] restricted to indices the module can play (1 and above).
pub fn track_index(token: &str) -> Option<TrackIndex> {
    resolve(token).and_then(TrackIndex::new)
}
