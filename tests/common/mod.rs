//! On-disk image fixtures for the probe tests.

use std::fs;
use std::path::Path;

// Byte offsets within the BMP file and info headers. The dimension probe
// only ever reads the signature, width, and height; the rest just has to be
// present and plausible.
const SIGNATURE: usize = 0;
const FILE_SIZE: usize = 2;
const PIXEL_DATA_OFFSET: usize = 10;
const INFO_HEADER_SIZE: usize = 14;
const WIDTH: usize = 18;
const HEIGHT: usize = 22;
const COLOR_PLANES: usize = 26;
const BIT_DEPTH: usize = 28;
const PIXEL_DATA_SIZE: usize = 34;
const HEADER_LEN: usize = 54;

/// Writes a minimal 24-bit BMP whose headers report the given dimensions.
///
/// Probing reads headers only, so the pixel rows stay a zeroed block of the
/// declared size.
pub fn write_probe_bmp(path: &Path, width: u32, height: u32) {
    let row_len = (width as usize * 3).next_multiple_of(4);
    let pixel_len = row_len * height as usize;

    let mut bmp = vec![0u8; HEADER_LEN + pixel_len];
    bmp[SIGNATURE..SIGNATURE + 2].copy_from_slice(b"BM");
    let file_size = bmp.len() as u32;
    patch_u32(&mut bmp, FILE_SIZE, file_size);
    patch_u32(&mut bmp, PIXEL_DATA_OFFSET, HEADER_LEN as u32);
    patch_u32(&mut bmp, INFO_HEADER_SIZE, 40);
    patch_u32(&mut bmp, WIDTH, width);
    patch_u32(&mut bmp, HEIGHT, height);
    patch_u16(&mut bmp, COLOR_PLANES, 1);
    patch_u16(&mut bmp, BIT_DEPTH, 24);
    patch_u32(&mut bmp, PIXEL_DATA_SIZE, pixel_len as u32);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, bmp).expect("write bmp fixture");
}

fn patch_u32(bmp: &mut [u8], offset: usize, value: u32) {
    bmp[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

fn patch_u16(bmp: &mut [u8], offset: usize, value: u16) {
    bmp[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}
