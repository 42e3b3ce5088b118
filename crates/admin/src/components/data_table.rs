//! Data table component types.
//!
//! These types define the configuration for reusable data tables in the admin panel.
//! The shared `partials/data_table_head.html` template renders the filter bar
//! and column headers from a [`DataTableConfig`]; each page renders its own rows.

use serde::{Deserialize, Serialize};

use facade_shop_core::{Category, OrderStatus};

/// Column definition for a data table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableColumn {
    /// Unique key for the column.
    pub key: String,
    /// Display label for the column header.
    pub label: String,
    /// Right-align numeric columns.
    pub numeric: bool,
}

impl TableColumn {
    /// Create a new text column.
    #[must_use]
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            numeric: false,
        }
    }

    /// Create a new right-aligned column.
    #[must_use]
    pub fn numeric(key: &str, label: &str) -> Self {
        Self {
            numeric: true,
            ..Self::new(key, label)
        }
    }
}

/// Filter type for data tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    /// Text input filter.
    Text,
    /// Single-select dropdown.
    Select,
}

/// Filter definition for a data table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableFilter {
    /// Filter parameter key.
    pub key: String,
    /// Display label.
    pub label: String,
    /// Filter type.
    pub filter_type: FilterType,
    /// Placeholder text (for text inputs).
    pub placeholder: String,
    /// Available options (for selects).
    pub options: Vec<FilterOption>,
    /// Value currently applied, empty when unset.
    pub value: String,
}

/// Option for select filters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterOption {
    /// Option value.
    pub value: String,
    /// Display label.
    pub label: String,
    /// Whether this option is currently applied.
    pub selected: bool,
}

impl FilterOption {
    /// Create a new filter option.
    #[must_use]
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            selected: false,
        }
    }
}

impl TableFilter {
    /// Create a text filter.
    #[must_use]
    pub fn text(key: &str, label: &str, placeholder: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            filter_type: FilterType::Text,
            placeholder: placeholder.to_string(),
            options: vec![],
            value: String::new(),
        }
    }

    /// Create a select filter.
    #[must_use]
    pub fn select(key: &str, label: &str, options: Vec<FilterOption>) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            filter_type: FilterType::Select,
            placeholder: String::new(),
            options,
            value: String::new(),
        }
    }

    /// Mark the applied value, selecting the matching option.
    #[must_use]
    pub fn with_value(mut self, value: Option<&str>) -> Self {
        let value = value.unwrap_or_default();
        for option in &mut self.options {
            option.selected = option.value == value;
        }
        self.value = value.to_string();
        self
    }

    #[must_use]
    pub fn is_text(&self) -> bool {
        self.filter_type == FilterType::Text
    }
}

/// Configuration for a data table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataTableConfig {
    /// Unique table identifier.
    pub table_id: String,
    /// Column definitions.
    pub columns: Vec<TableColumn>,
    /// Filter definitions.
    pub filters: Vec<TableFilter>,
    /// Title for empty state.
    pub empty_title: String,
    /// Description for empty state.
    pub empty_description: Option<String>,
    /// Whether to show filter panel.
    pub has_filters: bool,
}

impl DataTableConfig {
    /// Create a new data table configuration.
    #[must_use]
    pub fn new(table_id: &str) -> Self {
        Self {
            table_id: table_id.to_string(),
            columns: vec![],
            filters: vec![],
            empty_title: "Ничего не найдено".to_string(),
            empty_description: None,
            has_filters: false,
        }
    }

    /// Add a column.
    #[must_use]
    pub fn column(mut self, column: TableColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Add a filter.
    #[must_use]
    pub fn filter(mut self, filter: TableFilter) -> Self {
        self.has_filters = true;
        self.filters.push(filter);
        self
    }

    /// Set empty state configuration.
    #[must_use]
    pub fn empty_state(mut self, title: &str, description: Option<&str>) -> Self {
        self.empty_title = title.to_string();
        self.empty_description = description.map(ToString::to_string);
        self
    }

    /// Number of columns, for the empty-state `colspan`.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// Build the products table configuration.
#[must_use]
pub fn products_table_config(
    categories: &[Category],
    search: Option<&str>,
    category: Option<&str>,
) -> DataTableConfig {
    let mut category_options = vec![FilterOption::new("", "Все категории")];
    category_options.extend(
        categories
            .iter()
            .map(|c| FilterOption::new(&c.slug, &c.name)),
    );

    DataTableConfig::new("products")
        .column(TableColumn::new("name", "Фасад"))
        .column(TableColumn::new("category", "Категория"))
        .column(TableColumn::new("material", "Материал"))
        .column(TableColumn::numeric("price", "Цена за м²"))
        .column(TableColumn::new("in_stock", "Наличие"))
        .column(TableColumn::new("featured", "Витрина"))
        .column(TableColumn::new("actions", ""))
        .filter(TableFilter::text("q", "Поиск", "Название или описание").with_value(search))
        .filter(TableFilter::select("category", "Категория", category_options).with_value(category))
        .empty_state(
            "Фасады не найдены",
            Some("Измените условия поиска или добавьте фасад"),
        )
}

/// Build the categories table configuration.
#[must_use]
pub fn categories_table_config() -> DataTableConfig {
    DataTableConfig::new("categories")
        .column(TableColumn::new("name", "Название"))
        .column(TableColumn::new("slug", "Адрес"))
        .column(TableColumn::numeric("facades", "Фасадов"))
        .column(TableColumn::new("actions", ""))
        .empty_state("Категорий пока нет", None)
}

/// Build the orders table configuration.
#[must_use]
pub fn orders_table_config(status: Option<&str>) -> DataTableConfig {
    let mut options = vec![FilterOption::new("", "Все статусы")];
    options.extend(
        OrderStatus::ALL
            .iter()
            .map(|s| FilterOption::new(&s.to_string(), s.label())),
    );

    DataTableConfig::new("orders")
        .column(TableColumn::new("number", "Номер"))
        .column(TableColumn::new("customer", "Покупатель"))
        .column(TableColumn::new("created", "Дата"))
        .column(TableColumn::numeric("items", "Изделий"))
        .column(TableColumn::numeric("total", "Сумма"))
        .column(TableColumn::new("status", "Статус"))
        .filter(TableFilter::select("status", "Статус", options).with_value(status))
        .empty_state("Заказов нет", Some("Попробуйте другой статус"))
}

/// Build the users table configuration.
#[must_use]
pub fn users_table_config() -> DataTableConfig {
    DataTableConfig::new("users")
        .column(TableColumn::new("name", "Имя"))
        .column(TableColumn::new("email", "Email"))
        .column(TableColumn::new("registered", "Регистрация"))
        .column(TableColumn::new("role", "Роль"))
        .column(TableColumn::new("blocked", "Доступ"))
        .empty_state("Пользователей нет", None)
}

/// Build the comments table configuration.
#[must_use]
pub fn comments_table_config(pending_only: bool) -> DataTableConfig {
    let options = vec![
        FilterOption::new("", "Все"),
        FilterOption::new("pending", "На модерации"),
    ];

    DataTableConfig::new("comments")
        .column(TableColumn::new("author", "Автор"))
        .column(TableColumn::new("facade", "Фасад"))
        .column(TableColumn::new("text", "Отзыв"))
        .column(TableColumn::numeric("rating", "Оценка"))
        .column(TableColumn::new("created", "Дата"))
        .column(TableColumn::new("actions", ""))
        .filter(
            TableFilter::select("show", "Показать", options)
                .with_value(pending_only.then_some("pending")),
        )
        .empty_state("Отзывов нет", None)
}

/// Build the news table configuration.
#[must_use]
pub fn news_table_config() -> DataTableConfig {
    DataTableConfig::new("news")
        .column(TableColumn::new("title", "Заголовок"))
        .column(TableColumn::new("slug", "Адрес"))
        .column(TableColumn::new("published", "Дата"))
        .column(TableColumn::new("actions", ""))
        .empty_state("Новостей нет", Some("Создайте первую новость"))
}

/// Build the discounts table configuration.
#[must_use]
pub fn discounts_table_config() -> DataTableConfig {
    DataTableConfig::new("discounts")
        .column(TableColumn::new("code", "Промокод"))
        .column(TableColumn::numeric("percent", "Скидка"))
        .column(TableColumn::new("expires", "Действует до"))
        .column(TableColumn::new("status", "Статус"))
        .column(TableColumn::new("actions", ""))
        .empty_state("Промокодов нет", None)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use facade_shop_core::Catalog;

    use super::*;

    #[test]
    fn test_with_value_selects_option() {
        let config = orders_table_config(Some("shipped"));
        let filter = config.filters.first().unwrap();
        let selected: Vec<_> = filter
            .options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(selected, vec!["shipped"]);
        assert_eq!(filter.value, "shipped");
    }

    #[test]
    fn test_unset_filter_selects_placeholder_option() {
        let catalog = Catalog::seed();
        let config = products_table_config(catalog.categories(), None, None);
        assert!(config.has_filters);
        let category = config.filters.get(1).unwrap();
        assert!(category.options.first().unwrap().selected);
        assert_eq!(category.options.len(), catalog.categories().len() + 1);
    }

    #[test]
    fn test_tables_without_filters() {
        let config = news_table_config();
        assert!(!config.has_filters);
        assert_eq!(config.column_count(), 4);
    }
}
