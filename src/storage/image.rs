//! Recompresión de fotos de perfil
//!
//! Las fotos de personal se reducen a un recorte cuadrado de 300×300 y se
//! recomprimen como JPEG calidad 80. Si la recompresión falla, el llamador
//! conserva el archivo original.

use image::{imageops::FilterType, ImageError, ImageOutputFormat};

const PHOTO_SIZE: u32 = 300;
const JPEG_QUALITY: u8 = 80;

/// Redimensionar y recomprimir una foto de perfil.
/// Devuelve los bytes JPEG resultantes.
pub fn compress_profile_photo(bytes: &[u8]) -> Result<Vec<u8>, ImageError> {
    let img = image::load_from_memory(bytes)?;
    // resize_to_fill equivale a un recorte "cover": llena 300×300 y recorta el exceso
    let resized = img.resize_to_fill(PHOTO_SIZE, PHOTO_SIZE, FilterType::Lanczos3);

    let mut out = Vec::new();
    resized.write_to(
        &mut std::io::Cursor::new(&mut out),
        ImageOutputFormat::Jpeg(JPEG_QUALITY),
    )?;
    Ok(out)
}

/// Nombre del archivo comprimido: `c-<stem>.jpg`
pub fn compressed_filename(original: &str) -> String {
    let stem = std::path::Path::new(original)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(original);
    format!("c-{}.jpg", stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GenericImageView, RgbImage};

    fn sample_png(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(
            width,
            height,
            image::Rgb([120, 30, 200]),
        ));
        let mut out = Vec::new();
        img.write_to(
            &mut std::io::Cursor::new(&mut out),
            ImageOutputFormat::Png,
        )
        .unwrap();
        out
    }

    #[test]
    fn test_compress_resizes_to_square() {
        let png = sample_png(640, 480);
        let jpeg = compress_profile_photo(&png).unwrap();

        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!(decoded.width(), 300);
        assert_eq!(decoded.height(), 300);
    }

    #[test]
    fn test_compress_rejects_garbage() {
        assert!(compress_profile_photo(b"esto no es una imagen").is_err());
    }

    #[test]
    fn test_compressed_filename() {
        assert_eq!(
            compressed_filename("personal-17000-42.png"),
            "c-personal-17000-42.jpg"
        );
        assert_eq!(compressed_filename("sinextension"), "c-sinextension.jpg");
    }
}
