pub trait SignExtend {
    fn sign_extend(self, bit_count: u8) -> u16;
}

impl SignExtend for u16 {
    /// Treats the low `bit_count` bits as a two's complement number and widens it to 16 bits.
    fn sign_extend(self, bit_count: u8) -> u16 {
        let value = self & field_mask(bit_count);

        if ((value >> (bit_count - 1)) & 1) == 1 {
            value | (0xFFFF << bit_count)
        } else {
            value
        }
    }
}

/// Extracts `width` bits of `word` starting at bit `shift`.
pub(crate) fn field(word: u16, shift: u8, width: u8) -> u16 {
    (word >> shift) & field_mask(width)
}

fn field_mask(width: u8) -> u16 {
    if width >= 16 {
        0xFFFF
    } else {
        (1 << width) - 1
    }
}
