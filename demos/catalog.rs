/* demos/catalog.rs */

use storefront_core::*;

fn product(id: &str, name: &str, colors: &[&str], variants: bool) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        price: 1200.0,
        quantity: 25,
        category: "women".to_string(),
        size: vec!["M".to_string(), "L".to_string()],
        has_variants: variants,
        color: colors.iter().map(|c| c.to_string()).collect(),
        images: if variants {
            colors
                .iter()
                .map(|c| ProductImage {
                    color: Some(c.to_string()),
                    url: format!("/uploads/{}/{}.jpg", id, color_slug(c)),
                })
                .collect()
        } else {
            Vec::new()
        },
    }
}

fn main() {
    println!("Starting catalog demo...\n");

    let products = vec![
        product("kurti-01", "Block Print Kurti", &["Mustard", "Navy Blue", "Rust"], true),
        product("scarf-07", "Silk Scarf", &["Ivory"], false),
        product("saree-03", "Jamdani Saree", &["Red"], true),
    ];

    println!("--- Listing view ---");
    let views = flatten_products(&products);
    for view in &views {
        println!(
            "  {:<24} color={:<10} stock={:<3} image={}",
            view.id,
            view.selected_color,
            view.quantity,
            view.image.as_deref().unwrap_or("-")
        );
    }
    assert_eq!(views.len(), 5);

    println!("\n--- Related products for kurti-01 ---");
    for view in related_products(&views, "kurti-01", 4) {
        println!("  {} ({})", view.name, view.id);
    }

    println!("\n--- Description ---");
    let parsed = parse_description(
        "[Specifications]\nFabric: Cotton\nWork: Hand block print\n[Description]\nBreathable everyday kurti.",
    );
    for spec in &parsed.specifications {
        println!("  {}: {}", spec.label, spec.value);
    }
    println!("  Summary: {}", parsed.summary);

    println!("\nCatalog demo completed.");
}
