//! 16-bit BMP header decoding
//!
//! Only the subset of the format the panel can show without conversion is
//! accepted: a `BM` file whose pixels are RGB565 words, at most one screen
//! in size. Rows are stored bottom-up and padded to a multiple of four
//! bytes; words are little-endian.

use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error::FormatError;

/// Bytes needed to decode every header field used here
pub const HEADER_LEN: usize = 30;

/// Only supported depth
pub const BITS_PER_PIXEL: u16 = 16;

const SIGNATURE: [u8; 2] = *b"BM";
const PIXEL_OFFSET_AT: usize = 10;
const WIDTH_AT: usize = 18;
const HEIGHT_AT: usize = 22;
const DEPTH_AT: usize = 28;

/// Decoded BMP header
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpHeader {
    /// Byte offset of the first pixel row
    pub pixel_offset: u16,
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
}

impl BmpHeader {
    /// Decode the first [`HEADER_LEN`] bytes of a file
    ///
    /// # Errors
    ///
    /// Fails on a short buffer, a wrong signature, a depth other than 16
    /// bits or a size that is empty or larger than the screen.
    pub fn parse(bytes: &[u8]) -> Result<Self, FormatError> {
        if bytes.len() < HEADER_LEN {
            return Err(FormatError::Truncated {
                expected: HEADER_LEN as u64,
                found: bytes.len() as u64,
            });
        }
        let signature = [bytes[0], bytes[1]];
        if signature != SIGNATURE {
            return Err(FormatError::BadSignature(signature));
        }

        let field = |at: usize| u16::from_le_bytes([bytes[at], bytes[at + 1]]);
        let depth = field(DEPTH_AT);
        if depth != BITS_PER_PIXEL {
            return Err(FormatError::UnsupportedDepth(depth));
        }

        let header = Self {
            pixel_offset: field(PIXEL_OFFSET_AT),
            width: field(WIDTH_AT),
            height: field(HEIGHT_AT),
        };
        check_size(header.width, header.height)?;
        Ok(header)
    }

    /// Pixel bytes in one row, without padding
    pub fn row_bytes(&self) -> usize {
        usize::from(self.width) * 2
    }

    /// Bytes between the starts of consecutive rows in the file
    pub fn row_stride(&self) -> usize {
        (self.row_bytes() + 3) & !3
    }

    /// Bytes of pixel data stored in the file, padding included
    pub fn pixel_bytes(&self) -> u64 {
        self.row_stride() as u64 * u64::from(self.height)
    }

    /// Smallest file length that holds every declared row
    pub fn file_len(&self) -> u64 {
        u64::from(self.pixel_offset) + self.pixel_bytes()
    }
}

/// Reject images that are empty or do not fit the screen
pub fn check_size(width: u16, height: u16) -> Result<(), FormatError> {
    if width == 0 || height == 0 || width > SCREEN_WIDTH || height > SCREEN_HEIGHT {
        return Err(FormatError::InvalidSize { width, height });
    }
    Ok(())
}

/// Top-left corner that centres a `width x height` image on the screen
pub fn centered(width: u16, height: u16) -> (u16, u16) {
    (
        SCREEN_WIDTH.saturating_sub(width) / 2,
        SCREEN_HEIGHT.saturating_sub(height) / 2,
    )
}

/// Convert little-endian RGB565 words in place to the controller's order
///
/// A trailing odd byte is left untouched.
pub fn to_device_order(pixels: &mut [u8]) {
    for word in pixels.chunks_exact_mut(2) {
        let value = u16::from_le_bytes([word[0], word[1]]);
        word.copy_from_slice(&value.to_be_bytes());
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use alloc::vec::Vec;

    /// Build a 16-bit BMP from bottom-up rows of RGB565 words
    pub(crate) fn bmp_file(width: u16, height: u16, rows: &[&[u16]]) -> Vec<u8> {
        let mut file = alloc::vec![0u8; 54];
        file[0..2].copy_from_slice(b"BM");
        file[10..12].copy_from_slice(&54u16.to_le_bytes());
        file[18..20].copy_from_slice(&width.to_le_bytes());
        file[22..24].copy_from_slice(&height.to_le_bytes());
        file[28..30].copy_from_slice(&16u16.to_le_bytes());
        for row in rows {
            let start = file.len();
            for word in row.iter() {
                file.extend_from_slice(&word.to_le_bytes());
            }
            while (file.len() - start) % 4 != 0 {
                file.push(0);
            }
        }
        file
    }

    #[test]
    fn test_parse_header_fields() {
        let file = bmp_file(3, 2, &[&[1, 2, 3], &[4, 5, 6]]);
        let header = BmpHeader::parse(&file).unwrap();
        assert_eq!(
            header,
            BmpHeader {
                pixel_offset: 54,
                width: 3,
                height: 2
            }
        );
        assert_eq!(header.row_bytes(), 6);
        assert_eq!(header.row_stride(), 8);
        assert_eq!(header.pixel_bytes(), 16);
        assert_eq!(header.file_len(), file.len() as u64);
    }

    #[test]
    fn test_parse_rejects_bad_signature() {
        let mut file = bmp_file(1, 1, &[&[0]]);
        file[0] = b'X';
        assert_eq!(
            BmpHeader::parse(&file),
            Err(FormatError::BadSignature([b'X', b'M']))
        );
    }

    #[test]
    fn test_parse_rejects_other_depths() {
        let mut file = bmp_file(1, 1, &[&[0]]);
        file[28] = 24;
        assert_eq!(
            BmpHeader::parse(&file),
            Err(FormatError::UnsupportedDepth(24))
        );
    }

    #[test]
    fn test_parse_rejects_oversized_and_empty() {
        let file = bmp_file(241, 1, &[]);
        assert!(matches!(
            BmpHeader::parse(&file),
            Err(FormatError::InvalidSize { width: 241, .. })
        ));
        let file = bmp_file(0, 5, &[]);
        assert!(matches!(
            BmpHeader::parse(&file),
            Err(FormatError::InvalidSize { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_short_header() {
        assert_eq!(
            BmpHeader::parse(b"BM"),
            Err(FormatError::Truncated {
                expected: 30,
                found: 2
            })
        );
    }

    #[test]
    fn test_to_device_order_swaps_words() {
        let mut bytes = [0x00, 0xF8, 0xE0, 0x07, 0xAA];
        to_device_order(&mut bytes);
        assert_eq!(bytes, [0xF8, 0x00, 0x07, 0xE0, 0xAA]);
    }

    #[test]
    fn test_centered_position() {
        assert_eq!(centered(240, 320), (0, 0));
        assert_eq!(centered(100, 20), (70, 150));
    }
}
