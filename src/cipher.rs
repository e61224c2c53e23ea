//! Whole-archive XOR transform. Symmetric: applying the same key twice
//! yields the original bytes, and an empty key is the identity.

/// XORs `data` in place with `key` repeated cyclically.
pub fn xor_in_place(data: &mut [u8], key: &[u8]) {
    if key.is_empty() {
        return;
    }
    for (byte, k) in data.iter_mut().zip(key.iter().cycle()) {
        *byte ^= k;
    }
}

/// Allocating variant of [`xor_in_place`].
pub fn xor(data: &[u8], key: &[u8]) -> Vec<u8> {
    let mut out = data.to_vec();
    xor_in_place(&mut out, key);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_involution() {
        let data = (0u8..=255).collect::<Vec<_>>();
        let key = [0x13, 0x37, 0xF7];
        let once = xor(&data, &key);
        assert_ne!(once, data);
        assert_eq!(xor(&once, &key), data);
    }

    #[test]
    fn test_empty_key_is_identity() {
        let data = b"payload bytes".to_vec();
        assert_eq!(xor(&data, &[]), data);
    }

    #[test]
    fn test_key_repeats_cyclically() {
        let data = [0u8; 6];
        assert_eq!(
            xor(&data, &[0xAA, 0xBB]),
            [0xAA, 0xBB, 0xAA, 0xBB, 0xAA, 0xBB]
        );
    }

    #[test]
    fn test_single_byte_key() {
        assert_eq!(xor(&[0x00, 0xFF, 0xF7], &[0xF7]), [0xF7, 0x08, 0x00]);
    }
}
