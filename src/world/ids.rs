use super::*;
use rand::rngs::OsRng;
use rand::RngCore;

pub(crate) const ID_ALPHABET: &[u8; 62] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
pub(crate) const ID_LENGTH: usize = 10;
// 62^10 candidates; hitting this cap means the RNG is broken, not that the world is full.
const MAX_ID_ATTEMPTS: u32 = 1024;

/// Random 10-character alphanumeric id not present in `existing`, drawn from the OS RNG.
pub(crate) fn generate_unique_id(existing: &HashSet<String>) -> Result<String, WorldError> {
    generate_unique_id_with(&mut OsRng, existing)
}

pub(super) fn generate_unique_id_with<R: RngCore + ?Sized>(
    rng: &mut R,
    existing: &HashSet<String>,
) -> Result<String, WorldError> {
    for attempt in 1..=MAX_ID_ATTEMPTS {
        let mut bytes = [0u8; ID_LENGTH];
        rng.fill_bytes(&mut bytes);
        let candidate: String = bytes
            .iter()
            .map(|b| ID_ALPHABET[*b as usize % ID_ALPHABET.len()] as char)
            .collect();
        if !existing.contains(&candidate) {
            if attempt > 1 {
                debug!("generated id {candidate} after {attempt} attempts");
            }
            return Ok(candidate);
        }
    }
    Err(WorldError::IdSpaceExhausted {
        attempts: MAX_ID_ATTEMPTS,
    })
}
