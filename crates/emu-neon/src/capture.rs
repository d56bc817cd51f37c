//! Headless capture: PNG screenshots.

use std::error::Error;
use std::fs;
use std::path::Path;

use neon_vdp::{SCREEN_HEIGHT, SCREEN_WIDTH};

use crate::{Board, Emulator};

/// Save an 832×300 ARGB32 frame as a PNG file.
pub fn save_screenshot(frame: &[u32], path: &Path) -> Result<(), Box<dyn Error>> {
    let pixels = SCREEN_WIDTH * SCREEN_HEIGHT;
    if frame.len() < pixels {
        return Err(format!("frame has {} pixels, need {pixels}", frame.len()).into());
    }

    let file = fs::File::create(path)?;
    let w = std::io::BufWriter::new(file);
    let mut encoder = png::Encoder::new(w, SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;

    // ARGB32 → RGBA bytes
    let mut rgba = Vec::with_capacity(pixels * 4);
    for &pixel in &frame[..pixels] {
        rgba.push((pixel >> 16) as u8);
        rgba.push((pixel >> 8) as u8);
        rgba.push(pixel as u8);
        rgba.push((pixel >> 24) as u8);
    }

    writer.write_image_data(&rgba)?;
    Ok(())
}

/// Run `num_frames` frames, saving each as a numbered PNG in `dir`.
///
/// Creates `dir/000001.png`, `dir/000002.png`, etc.
pub fn save_frame_sequence<B: Board>(
    emulator: &mut Emulator<B>,
    dir: &Path,
    num_frames: u32,
) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(dir)?;

    for i in 1..=num_frames {
        emulator.run_frame();
        let filename = dir.join(format!("{i:06}.png"));
        save_screenshot(emulator.prepare_screen(), &filename)?;
    }

    Ok(())
}
