//! Catalog inspection.

use std::io::{self, Write};

use teees_core::{Catalog, Pagination};

/// Print one catalog page, the way the storefront grid would show it.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn list(catalog: &Catalog, page: usize, out: &mut impl Write) -> io::Result<()> {
    let pagination = Pagination::new(catalog.len()).on_page(page);
    let visible = pagination.visible(catalog.products());

    writeln!(
        out,
        "Page {} of {} ({} products)",
        pagination.current_page(),
        pagination.page_count(),
        catalog.len()
    )?;

    if visible.is_empty() {
        writeln!(out, "  (no products on this page)")?;
    }

    for product in visible {
        writeln!(
            out,
            "  [{:>3}] {} - {} - {}",
            product.id.as_u32(),
            product.name,
            product.color,
            product.price
        )?;
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn catalog(n: u32) -> Catalog {
        let products: Vec<_> = (1..=n)
            .map(|i| {
                serde_json::json!({
                    "id": i, "name": format!("Wig {i}"), "color": "Black", "price": 1000 * u64::from(i)
                })
            })
            .collect();
        Catalog::from_json(&serde_json::to_string(&products).unwrap()).unwrap()
    }

    #[test]
    fn test_list_last_page() {
        let mut out = Vec::new();
        list(&catalog(13), 3, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Page 3 of 3 (13 products)"));
        assert!(text.contains("[ 13] Wig 13 - Black - #13,000"));
        assert!(!text.contains("Wig 12"));
    }

    #[test]
    fn test_list_past_end() {
        let mut out = Vec::new();
        list(&catalog(4), 2, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("no products on this page"));
    }
}
