//! Catalog listing and export.

use std::fmt::Write;

use serde::Serialize;

use facade_shop_core::{Catalog, CatalogQuery, Category, Facade, SortOrder};

use super::{CliError, ExportFormat};

/// Shape of `catalog export`: categories first, then every facade.
#[derive(Debug, Serialize)]
struct CatalogExport<'a> {
    categories: &'a [Category],
    facades: &'a [Facade],
}

/// Render the catalog as a plain-text table, sorted by name.
///
/// # Errors
///
/// Returns [`CliError::UnknownCategory`] if `category` names no category.
pub fn list(catalog: &Catalog, category: Option<&str>) -> Result<String, CliError> {
    if let Some(slug) = category
        && catalog.category_by_slug(slug).is_none()
    {
        return Err(CliError::UnknownCategory(slug.to_string()));
    }

    let query = CatalogQuery {
        category: category.map(str::to_string),
        sort: Some(SortOrder::Name),
        ..CatalogQuery::default()
    };
    let facades = catalog.search(&query);
    tracing::debug!(count = facades.len(), ?category, "Listing facades");

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>3}  {:<28} {:<20} {:<14} {:>10}  {}",
        "ID", "Название", "Категория", "Материал", "Цена/м²", "Наличие"
    );
    for facade in &facades {
        let category = catalog
            .category(facade.category_id)
            .map_or("-", |c| c.name.as_str());
        let stock = if facade.in_stock { "да" } else { "под заказ" };
        let _ = writeln!(
            out,
            "{:>3}  {:<28} {:<20} {:<14} {:>10}  {}",
            facade.id.to_string(),
            truncate(&facade.name, 28),
            truncate(category, 20),
            facade.material.label(),
            facade.price_per_sqm.display(),
            stock
        );
    }
    let _ = writeln!(out, "\nВсего: {}", facades.len());
    Ok(out)
}

/// Serialize categories and facades in the requested format.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn export(catalog: &Catalog, format: ExportFormat) -> Result<String, CliError> {
    let export = CatalogExport {
        categories: catalog.categories(),
        facades: catalog.facades(),
    };
    tracing::debug!(?format, facades = export.facades.len(), "Exporting catalog");

    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(&export)?),
        ExportFormat::Yaml => Ok(serde_yaml::to_string(&export)?),
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut cut: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_list_includes_every_facade() {
        let catalog = Catalog::seed();
        let out = list(&catalog, None).unwrap();
        assert!(out.contains(&format!("Всего: {}", catalog.facades().len())));
        assert!(out.contains("Классика с филёнкой"));
    }

    #[test]
    fn test_list_filters_by_category() {
        let catalog = Catalog::seed();
        let out = list(&catalog, Some("bathroom")).unwrap();
        assert!(out.contains("Влагостойкий МДФ"));
        assert!(!out.contains("Зеркальная дверь купе"));
    }

    #[test]
    fn test_list_unknown_category() {
        let catalog = Catalog::seed();
        let err = list(&catalog, Some("garage")).unwrap_err();
        assert!(matches!(err, CliError::UnknownCategory(slug) if slug == "garage"));
    }

    #[test]
    fn test_export_json_parses_back() {
        let catalog = Catalog::seed();
        let json = export(&catalog, ExportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value["facades"].as_array().unwrap().len(),
            catalog.facades().len()
        );
        assert_eq!(value["categories"][0]["slug"], "kitchen");
        // Decimals are exported as strings
        assert_eq!(value["facades"][0]["price_per_sqm"]["amount"], "5000");
    }

    #[test]
    fn test_export_yaml() {
        let catalog = Catalog::seed();
        let yaml = export(&catalog, ExportFormat::Yaml).unwrap();
        assert!(yaml.starts_with("categories:"));
        assert!(yaml.contains("slug: mdf-classic-frame"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Шкаф", 10), "Шкаф");
        assert_eq!(truncate("Стекло в рамке", 7), "Стекло…");
    }
}
