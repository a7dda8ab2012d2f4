
/// Deterministic high-entropy bytes with every NUL replaced
fn noise(len: usize) -> Vec<u8> {
    let mut state: u32 = 0x9E37_79B9;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            match state.to_le_bytes()[0] {
                0 => 0xA5,
                b => b,
            }
        })
        .collect()
}
