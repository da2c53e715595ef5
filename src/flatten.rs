/* src/flatten.rs */

//! Expands variant products into one addressable view per color.

use crate::product::{CatalogEntry, ColorImage, Product};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;

/// Stock shown for each expanded color variant, regardless of the parent's
/// aggregate quantity.
pub const VARIANT_STOCK: u32 = 10;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

/// One color of a product presented as a standalone catalog entry. Never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualProduct {
    pub id: String,
    pub original_id: String,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub category: String,
    pub size: Vec<String>,
    pub selected_color: String,
    pub all_colors: Vec<String>,
    pub image: Option<String>,
}

/// Replaces each run of whitespace with a single `-`.
pub fn color_slug(color: &str) -> String {
    WHITESPACE.replace_all(color, "-").into_owned()
}

pub fn variant_id(original_id: &str, color: &str) -> String {
    format!("{}--{}", original_id, color_slug(color))
}

/// Flattens raw store records, in order.
pub fn flatten_products(products: &[Product]) -> Vec<VirtualProduct> {
    let entries: Vec<CatalogEntry> = products.iter().cloned().map(CatalogEntry::from).collect();
    flatten_entries(&entries)
}

/// Flattens already classified entries, in order. A `Varianted` entry
/// yields one view per image; a `Simple` entry yields exactly one.
pub fn flatten_entries(entries: &[CatalogEntry]) -> Vec<VirtualProduct> {
    let mut out = Vec::with_capacity(entries.len());

    for entry in entries {
        match entry {
            CatalogEntry::Varianted(product, images) => {
                out.extend(images.iter().map(|image| variant_view(product, image)));
            }
            CatalogEntry::Simple(product) => out.push(simple_view(product)),
        }
    }

    out
}

fn variant_view(product: &Product, image: &ColorImage) -> VirtualProduct {
    VirtualProduct {
        id: variant_id(&product.id, &image.color),
        original_id: product.id.clone(),
        name: product.name.clone(),
        price: product.price,
        quantity: VARIANT_STOCK,
        category: product.category.clone(),
        size: product.size.clone(),
        selected_color: image.color.clone(),
        all_colors: product.color.clone(),
        image: Some(image.url.clone()),
    }
}

fn simple_view(product: &Product) -> VirtualProduct {
    VirtualProduct {
        id: product.id.clone(),
        original_id: product.id.clone(),
        name: product.name.clone(),
        price: product.price,
        quantity: product.quantity,
        category: product.category.clone(),
        size: product.size.clone(),
        selected_color: product.color.first().cloned().unwrap_or_default(),
        all_colors: product.color.clone(),
        image: product.images.first().map(|i| i.url.clone()),
    }
}

/// Keeps the first view of each underlying product, in order, and stops
/// once `count` distinct products have been taken.
pub fn take_unique_originals<'a, I>(items: I, count: usize) -> Vec<&'a VirtualProduct>
where
    I: IntoIterator<Item = &'a VirtualProduct>,
{
    unique_originals_excluding(items, None, count)
}

/// Same policy as [`take_unique_originals`], but never returns views of
/// the product currently being shown.
pub fn related_products<'a, I>(
    items: I,
    current_original_id: &str,
    count: usize,
) -> Vec<&'a VirtualProduct>
where
    I: IntoIterator<Item = &'a VirtualProduct>,
{
    unique_originals_excluding(items, Some(current_original_id), count)
}

fn unique_originals_excluding<'a, I>(
    items: I,
    exclude: Option<&str>,
    count: usize,
) -> Vec<&'a VirtualProduct>
where
    I: IntoIterator<Item = &'a VirtualProduct>,
{
    let mut seen: HashSet<&str> = HashSet::new();
    let mut picked = Vec::with_capacity(count);

    for item in items {
        if picked.len() >= count {
            break;
        }
        if exclude == Some(item.original_id.as_str()) {
            continue;
        }
        if seen.insert(item.original_id.as_str()) {
            picked.push(item);
        }
    }

    picked
}
