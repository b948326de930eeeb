use hourai::commands::CommandError;
use rand::Rng;

/// The largest 24-bit RGB value Discord accepts for a role color.
pub const MAX_COLOR: u32 = 0xFF_FFFF;

/// Picks the color for a role: the explicit hex argument when one was given,
/// otherwise a uniformly random RGB value.
pub fn resolve<R: Rng>(explicit: Option<&str>, rng: &mut R) -> Result<u32, CommandError> {
    match explicit {
        Some(hex) => parse_hex(hex),
        None => Ok(rng.gen_range(0..=MAX_COLOR)),
    }
}

/// Parses a bare hex color such as `ff00aa`.
pub fn parse_hex(hex: &str) -> Result<u32, CommandError> {
    let invalid = || CommandError::InvalidColor(hex.to_owned());
    if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    match u32::from_str_radix(hex, 16) {
        Ok(value) if value <= MAX_COLOR => Ok(value),
        _ => Err(invalid()),
    }
}
