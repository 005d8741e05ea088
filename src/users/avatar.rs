use md5::{Digest, Md5};

/// Deterministic gravatar URL for an email address.
///
/// Size 200, pg rating, "mystery man" fallback for addresses without a
/// gravatar account.
pub fn gravatar_url(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    let digest = Md5::digest(normalized.as_bytes());
    format!(
        "https://gravatar.com/avatar/{}?s=200&r=pg&d=mm",
        hex::encode(digest)
    )
}
