//! Image persistence: plain-text PPM and PNG.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::info;

use crate::color::color_to_pixel;
use crate::integrator::PixelBuffer;

/// Write the buffer as a P3 portable pixmap: header, then one `R G B`
/// triplet per pixel in row-major order.
pub fn write_ppm<W: Write>(out: &mut W, image: &PixelBuffer, gamma: bool) -> io::Result<()> {
    writeln!(out, "P3")?;
    writeln!(out, "{} {}", image.width, image.height)?;
    writeln!(out, "255")?;

    for color in image.pixels() {
        let p = color_to_pixel(*color, gamma);
        writeln!(out, "{} {} {}", p.r, p.g, p.b)?;
    }

    Ok(())
}

/// Save the buffer as a gamma-encoded PPM file.
pub fn save_ppm<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> io::Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_ppm(&mut writer, image, true)?;
    writer.flush()?;

    info!("image saved as {}", path.as_ref().display());
    Ok(())
}

/// Save the buffer as a gamma-encoded 8-bit PNG file.
pub fn save_png<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> Result<(), image::ImageError> {
    let mut out = image::RgbImage::new(image.width, image.height);
    for y in 0..image.height {
        for x in 0..image.width {
            let p = color_to_pixel(image.get(x, y), true);
            out.put_pixel(x, y, image::Rgb([p.r, p.g, p.b]));
        }
    }
    out.save(path.as_ref())?;

    info!("image saved as {}", path.as_ref().display());
    Ok(())
}
