/* src/product.rs */

//! Catalog records as they arrive from the store.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub size: Vec<String>,
    #[serde(default)]
    pub has_variants: bool,
    #[serde(default)]
    pub color: Vec<String>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    #[serde(default)]
    pub color: Option<String>,
    pub url: String,
}

/// An image resolved for a specific variant color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorImage {
    pub color: String,
    pub url: String,
}

impl From<ProductImage> for ColorImage {
    fn from(image: ProductImage) -> Self {
        Self {
            color: image.color.unwrap_or_default(),
            url: image.url,
        }
    }
}

/// Ordered, non-empty list of variant images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorImages(Vec<ColorImage>);

impl ColorImages {
    pub fn new(images: Vec<ColorImage>) -> Option<Self> {
        if images.is_empty() {
            None
        } else {
            Some(Self(images))
        }
    }

    pub fn first(&self) -> &ColorImage {
        &self.0[0]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColorImage> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a ColorImages {
    type Item = &'a ColorImage;
    type IntoIter = std::slice::Iter<'a, ColorImage>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A product classified once at the boundary: either it expands into one
/// view per variant image, or it is shown as-is.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogEntry {
    Simple(Product),
    Varianted(Product, ColorImages),
}

impl From<Product> for CatalogEntry {
    fn from(mut product: Product) -> Self {
        if !product.has_variants {
            return CatalogEntry::Simple(product);
        }

        let images = std::mem::take(&mut product.images)
            .into_iter()
            .map(ColorImage::from)
            .collect();

        match ColorImages::new(images) {
            Some(images) => CatalogEntry::Varianted(product, images),
            None => CatalogEntry::Simple(product),
        }
    }
}
