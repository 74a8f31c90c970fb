//! Training plot references returned by the retrain endpoint.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use url::Url;

/// Where the rendered training plot lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlotImage {
    /// A `data:` URL carried inline in the response.
    Inline { mime: String, bytes: Vec<u8> },
    /// An image hosted by the API.
    Remote(Url),
}

/// Decoded RGBA pixels ready to upload as a texture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlotPixels {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl PlotImage {
    /// Classify a plot reference, returning `None` when it is neither form.
    pub fn parse(reference: &str) -> Option<Self> {
        let reference = reference.trim();
        if let Some(rest) = reference.strip_prefix("data:") {
            return parse_data_url(rest);
        }
        let url = Url::parse(reference).ok()?;
        matches!(url.scheme(), "http" | "https").then_some(Self::Remote(url))
    }

    /// Decode an inline plot; remote plots have nothing to decode.
    pub fn decode(&self) -> Option<Result<PlotPixels, image::ImageError>> {
        let Self::Inline { bytes, .. } = self else {
            return None;
        };
        Some(image::load_from_memory(bytes).map(|image| {
            let image = image.to_rgba8();
            let (width, height) = image.dimensions();
            PlotPixels {
                width,
                height,
                rgba: image.into_raw(),
            }
        }))
    }
}

fn parse_data_url(rest: &str) -> Option<PlotImage> {
    let (header, payload) = rest.split_once(',')?;
    let mime = header.strip_suffix(";base64")?;
    if !mime.starts_with("image/") {
        return None;
    }
    let payload: String = payload.chars().filter(|ch| !ch.is_whitespace()).collect();
    let bytes = STANDARD.decode(payload).ok()?;
    Some(PlotImage::Inline {
        mime: mime.to_string(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_png() -> Vec<u8> {
        let image = image::RgbaImage::from_pixel(2, 3, image::Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(image)
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn parses_and_decodes_inline_png() {
        let reference = format!("data:image/png;base64,{}", STANDARD.encode(tiny_png()));
        let plot = PlotImage::parse(&reference).unwrap();
        assert!(matches!(&plot, PlotImage::Inline { mime, .. } if mime == "image/png"));
        let pixels = plot.decode().unwrap().unwrap();
        assert_eq!((pixels.width, pixels.height), (2, 3));
        assert_eq!(pixels.rgba.len(), 2 * 3 * 4);
        assert_eq!(&pixels.rgba[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn parses_remote_url() {
        let plot = PlotImage::parse("https://telecom-api.example/static/plot.png").unwrap();
        assert!(matches!(plot, PlotImage::Remote(ref url) if url.path() == "/static/plot.png"));
        assert!(plot.decode().is_none());
    }

    #[test]
    fn rejects_unrecognised_references() {
        assert!(PlotImage::parse("iVBORw0KGgo").is_none());
        assert!(PlotImage::parse("data:text/plain;base64,aGk=").is_none());
        assert!(PlotImage::parse("data:image/png,notbase64").is_none());
        assert!(PlotImage::parse("file:///tmp/plot.png").is_none());
    }

    #[test]
    fn corrupt_inline_image_fails_to_decode() {
        let reference = format!("data:image/png;base64,{}", STANDARD.encode(b"not a png"));
        let plot = PlotImage::parse(&reference).unwrap();
        assert!(plot.decode().unwrap().is_err());
    }
}
