//! Decoded image side table
//!
//! Persisted elements only carry URLs. Decoded pixels live here, keyed
//! by element ID (the background has its own slot), so serialization
//! never sees a decoded handle and a failed decode just leaves a hole
//! the renderer skips.

use image::DynamicImage;
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use template::{AssetSource, Element, Template};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Slot {
    Background,
    Element(String),
}

/// Decoded images for one template
#[derive(Default)]
pub struct ImageStore {
    background: Option<DynamicImage>,
    elements: HashMap<String, DynamicImage>,
    failed: HashSet<String>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode every image URL in the template.
    ///
    /// Decodes run in parallel; each entry is independent, so one
    /// unreachable or corrupt image only blanks its own element.
    pub fn load(template: &Template, assets: &dyn AssetSource) -> Self {
        let mut jobs: Vec<(Slot, &str)> = Vec::new();
        if let Some(url) = &template.background_image_url {
            jobs.push((Slot::Background, url));
        }
        for element in &template.fields {
            if let Element::Image(e) = element {
                jobs.push((Slot::Element(e.id.clone()), &e.image_url));
            }
        }

        let decoded: Vec<(Slot, Option<DynamicImage>)> = jobs
            .into_par_iter()
            .map(|(slot, url)| (slot, decode(url, assets)))
            .collect();

        let mut store = Self::new();
        for (slot, result) in decoded {
            match (slot, result) {
                (Slot::Background, Some(img)) => store.background = Some(img),
                (Slot::Background, None) => {}
                (Slot::Element(id), Some(img)) => {
                    store.elements.insert(id, img);
                }
                (Slot::Element(id), None) => {
                    store.failed.insert(id);
                }
            }
        }
        store
    }

    /// Decode one element's image, replacing any previous entry.
    /// Used when an image element is added after the initial load.
    pub fn load_element(&mut self, id: &str, url: &str, assets: &dyn AssetSource) {
        match decode(url, assets) {
            Some(img) => {
                self.failed.remove(id);
                self.elements.insert(id.to_string(), img);
            }
            None => {
                self.elements.remove(id);
                self.failed.insert(id.to_string());
            }
        }
    }

    /// Drop an element's entry (after the element is deleted)
    pub fn remove(&mut self, id: &str) {
        self.elements.remove(id);
        self.failed.remove(id);
    }

    pub fn background(&self) -> Option<&DynamicImage> {
        self.background.as_ref()
    }

    pub fn get(&self, id: &str) -> Option<&DynamicImage> {
        self.elements.get(id)
    }

    /// Whether this element's decode was attempted and failed
    pub fn is_failed(&self, id: &str) -> bool {
        self.failed.contains(id)
    }
}

fn decode(url: &str, assets: &dyn AssetSource) -> Option<DynamicImage> {
    let bytes = match assets.fetch(url) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("failed to fetch image {url}: {e}");
            return None;
        }
    };
    match image::load_from_memory(&bytes) {
        Ok(img) => Some(img),
        Err(e) => {
            log::warn!("failed to decode image {url}: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbaImage};
    use std::io::Cursor;
    use template::MemoryAssets;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    fn template_with_images() -> Template {
        let mut template = Template::new("t");
        template.background_image_url = Some("bg.png".to_string());
        template.add_image("ok.png", 100.0, 100.0);
        template.add_image("missing.png", 100.0, 100.0);
        template
    }

    #[test]
    fn test_load_decodes_present_and_records_failures() {
        let template = template_with_images();
        let mut assets = MemoryAssets::new();
        assets.insert("bg.png", png_bytes(4, 2));
        assets.insert("ok.png", png_bytes(8, 8));

        let store = ImageStore::load(&template, &assets);

        assert!(store.background().is_some());

        let ids: Vec<&str> = template.fields.iter().map(|e| e.id()).collect();
        assert!(store.get(ids[0]).is_some());
        assert!(store.get(ids[1]).is_none());
        assert!(store.is_failed(ids[1]));
        assert!(!store.is_failed(ids[0]));
    }

    #[test]
    fn test_corrupt_bytes_fail_decode() {
        let mut template = Template::new("t");
        let id = template.add_image("bad.png", 50.0, 50.0);
        let mut assets = MemoryAssets::new();
        assets.insert("bad.png", vec![0xde, 0xad, 0xbe, 0xef]);

        let store = ImageStore::load(&template, &assets);
        assert!(store.is_failed(&id));
    }

    #[test]
    fn test_load_element_replaces_failure() {
        let mut store = ImageStore::new();
        let mut assets = MemoryAssets::new();

        store.load_element("a", "x.png", &assets);
        assert!(store.is_failed("a"));

        assets.insert("x.png", png_bytes(2, 2));
        store.load_element("a", "x.png", &assets);
        assert!(!store.is_failed("a"));
        assert!(store.get("a").is_some());
    }

    #[test]
    fn test_remove_clears_both_maps() {
        let mut store = ImageStore::new();
        let assets = MemoryAssets::new();
        store.load_element("a", "x.png", &assets);
        store.remove("a");
        assert!(!store.is_failed("a"));
    }
}
