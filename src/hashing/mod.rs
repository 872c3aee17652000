use blake3::Hasher;

/// Hashes a clause's text to a full 256-bit digest.
#[inline]
pub fn hash_clause(clause: &str) -> [u8; 32] {
    *blake3::hash(clause.as_bytes()).as_bytes()
}

/// Computes a 64-bit hash of the input data using BLAKE3, truncated from 256 bits.
///
/// # Truncation Rationale
///
/// The first 8 bytes of a BLAKE3 hash are enough for the ways covenant uses
/// hashes:
///
/// - **Run fingerprints**: correlating a response with its log lines
/// - **Deduplication**: spotting likely-identical documents across runs
///
/// With 64 bits the birthday bound sits around 4.3 billion items; for the
/// handful of documents a deployment ever sees, collisions are negligible.
/// Nothing downstream depends on uniqueness for correctness: a colliding
/// fingerprint only makes two unrelated runs look alike in logs. If stricter
/// guarantees are ever needed, use [`hash_clause`], which returns the full
/// 32-byte output.
#[inline]
pub fn hash_to_u64(data: &[u8]) -> u64 {
    let hash = blake3::hash(data);
    let bytes: [u8; 8] = hash.as_bytes()[0..8]
        .try_into()
        .expect("BLAKE3 always produces at least 8 bytes");
    u64::from_le_bytes(bytes)
}

/// Fingerprints a bank/partner document pair.
///
/// A separator byte between the two inputs keeps `("ab", "cd")` and
/// `("abc", "d")` from hashing identically.
#[inline]
pub fn fingerprint_documents(bank_text: &str, partner_text: &str) -> u64 {
    let mut hasher = Hasher::new();
    hasher.update(bank_text.as_bytes());
    hasher.update(b"|");
    hasher.update(partner_text.as_bytes());

    let hash = hasher.finalize();
    let bytes: [u8; 8] = hash.as_bytes()[0..8]
        .try_into()
        .expect("BLAKE3 always produces at least 8 bytes");
    u64::from_le_bytes(bytes)
}
