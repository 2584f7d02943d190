//! Packing of a signed Warp message into access-list storage keys for the
//! Warp precompile: `message || 0xFF`, zero-padded to a multiple of 32 bytes.

pub const STORAGE_KEY_LEN: usize = 32;
const TERMINATOR: u8 = 0xff;

pub fn warp_storage_keys(message: &[u8]) -> Vec<[u8; STORAGE_KEY_LEN]> {
    let mut padded = Vec::with_capacity(message.len() + STORAGE_KEY_LEN);
    padded.extend_from_slice(message);
    padded.push(TERMINATOR);
    let rem = padded.len() % STORAGE_KEY_LEN;
    if rem != 0 {
        padded.resize(padded.len() + STORAGE_KEY_LEN - rem, 0);
    }
    padded
        .chunks_exact(STORAGE_KEY_LEN)
        .map(|chunk| {
            let mut key = [0u8; STORAGE_KEY_LEN];
            key.copy_from_slice(chunk);
            key
        })
        .collect()
}
