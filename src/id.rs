//! Package identifiers in UUID version-4 layout.

use crate::segment::Chapter;
use crate::util::{monotonic_seed_nanos, time_seed_nanos};

/// `x` is any hex digit, `y` carries the RFC 4122 variant bits.
const TEMPLATE: &str = "xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx";
const HEX: &[u8; 16] = b"0123456789abcdef";

/// How the package identifier is chosen for a conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum IdentifierMode {
    /// Fresh time-seeded identifier per conversion.
    #[default]
    Random,
    /// Derived from the title and chapter sequence; identical input gives
    /// identical archives.
    ContentHash,
    /// Use the given identifier verbatim (without the `urn:uuid:` prefix).
    Fixed(String),
}

impl IdentifierMode {
    pub fn resolve(&self, title: &str, chapters: &[Chapter]) -> String {
        match self {
            IdentifierMode::Random => generate_id(),
            IdentifierMode::ContentHash => content_id(title, chapters),
            IdentifierMode::Fixed(id) => id.clone(),
        }
    }
}

/// Generate a 36-character identifier with version-4 layout.
///
/// Each hex digit mixes the low nibble of a time seed with a pseudo-random
/// perturbation. The wall clock is consumed first, then the monotonic clock.
pub fn generate_id() -> String {
    let mut wall = time_seed_nanos();
    let mut mono = monotonic_seed_nanos();

    let mut rng = Lcg::new(wall ^ mono.rotate_left(32));
    fill_template(|| {
        let r = rng.next_nibble();
        let seed = if wall > 0 { &mut wall } else { &mut mono };
        let v = seed.wrapping_add(r) % 16;
        *seed /= 16;
        v as u8
    })
}

/// Identifier derived from a SHA-1 digest of the title and chapters.
pub fn content_id(title: &str, chapters: &[Chapter]) -> String {
    let mut hasher = sha1_smol::Sha1::new();
    hasher.update(title.as_bytes());
    for chapter in chapters {
        // NUL separators keep ("ab", "c") distinct from ("a", "bc")
        hasher.update(b"\0");
        hasher.update(chapter.title.as_bytes());
        hasher.update(b"\0");
        hasher.update(chapter.content.as_bytes());
    }
    let digest = hasher.digest().bytes();

    let mut nibbles = digest.iter().flat_map(|b| [b >> 4, b & 0x0f]);
    fill_template(|| nibbles.next().unwrap_or(0))
}

fn fill_template(mut next_nibble: impl FnMut() -> u8) -> String {
    TEMPLATE
        .chars()
        .map(|c| match c {
            'x' => hex_digit(next_nibble()),
            'y' => hex_digit((next_nibble() & 0x3) | 0x8),
            other => other,
        })
        .collect()
}

fn hex_digit(nibble: u8) -> char {
    HEX[(nibble & 0x0f) as usize] as char
}

/// Linear congruential generator (Knuth MMIX constants).
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_nibble(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 60) & 0x0f
    }
}
