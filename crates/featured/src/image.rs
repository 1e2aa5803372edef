use storefront_catalog::Product;

/// Named image rendition (e.g. the product page image).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImagePreset(String);

impl ImagePreset {
    pub const PRODUCT_PAGE: &'static str = "product_page_image";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn product_page() -> Self {
        Self::new(Self::PRODUCT_PAGE)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Builds absolute image URLs for products.
pub trait ImageUrlBuilder: Send + Sync {
    fn build(&self, product: &Product, preset: &ImagePreset, width: u32) -> String;
}

impl<S> ImageUrlBuilder for std::sync::Arc<S>
where
    S: ImageUrlBuilder + ?Sized,
{
    fn build(&self, product: &Product, preset: &ImagePreset, width: u32) -> String {
        (**self).build(product, preset, width)
    }
}

/// URLs into the media cache of resized renditions:
/// `{media}/catalog/product/cache/{preset}/{width}x/{file}`.
///
/// Products without an image get `{static}/placeholder/{preset}.jpg`.
/// A width of 0 means "original size" and drops the size segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaImageUrlBuilder {
    media_base_url: String,
    static_base_url: String,
}

impl MediaImageUrlBuilder {
    pub fn new(media_base_url: impl Into<String>, static_base_url: impl Into<String>) -> Self {
        Self {
            media_base_url: trim_base(media_base_url.into()),
            static_base_url: trim_base(static_base_url.into()),
        }
    }
}

fn trim_base(mut base: String) -> String {
    while base.ends_with('/') {
        base.pop();
    }
    base
}

impl ImageUrlBuilder for MediaImageUrlBuilder {
    fn build(&self, product: &Product, preset: &ImagePreset, width: u32) -> String {
        let Some(file) = product.image() else {
            return format!("{}/placeholder/{}.jpg", self.static_base_url, preset.as_str());
        };
        let file = file.trim().trim_start_matches('/');
        if width == 0 {
            format!(
                "{}/catalog/product/cache/{}/{}",
                self.media_base_url,
                preset.as_str(),
                file
            )
        } else {
            format!(
                "{}/catalog/product/cache/{}/{}x/{}",
                self.media_base_url,
                preset.as_str(),
                width,
                file
            )
        }
    }
}
