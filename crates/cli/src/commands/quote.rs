//! Price quotes for a facade cut to size.

use std::fmt;

use rust_decimal::Decimal;

use facade_shop_core::{Catalog, Dimensions, FacadeId, Price, calculate_price};

use super::CliError;

/// A priced facade order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub facade: String,
    pub dimensions: Dimensions,
    pub quantity: u32,
    pub price_per_sqm: Price,
    pub area_sqm: Decimal,
    pub total: Price,
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.facade)?;
        writeln!(f, "  Размер:     {}", self.dimensions)?;
        writeln!(f, "  Количество: {} шт.", self.quantity)?;
        writeln!(f, "  Площадь:    {} м²", self.area_sqm)?;
        writeln!(f, "  Цена за м²: {}", self.price_per_sqm.display())?;
        write!(f, "  Итого:      {}", self.total.display())
    }
}

/// Price `quantity` pieces of a facade at `width_mm` × `height_mm`.
///
/// # Errors
///
/// Returns an error if the facade does not exist, a side is out of range or
/// the quantity is zero.
pub fn quote(
    catalog: &Catalog,
    facade_id: i32,
    width_mm: u32,
    height_mm: u32,
    quantity: u32,
) -> Result<Quote, CliError> {
    let id = FacadeId::new(facade_id);
    let facade = catalog.facade(id).ok_or(CliError::FacadeNotFound(id))?;
    let dimensions = Dimensions::new(width_mm, height_mm)?;
    let total = calculate_price(facade, dimensions, quantity)?;

    tracing::debug!(facade_id, %dimensions, quantity, total = %total.amount, "Quoted");

    Ok(Quote {
        facade: facade.name.clone(),
        dimensions,
        quantity,
        price_per_sqm: facade.price_per_sqm,
        area_sqm: dimensions.area_sqm() * Decimal::from(quantity),
        total,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use facade_shop_core::PricingError;

    use super::*;

    #[test]
    fn test_quote_two_doors() {
        let catalog = Catalog::seed();
        let quote = quote(&catalog, 1, 400, 600, 2).unwrap();
        assert_eq!(quote.total.amount, Decimal::new(2400, 0));
        assert_eq!(quote.area_sqm, Decimal::new(48, 2));

        let text = quote.to_string();
        assert!(text.contains("400×600 мм"));
        assert!(text.contains("2 400 ₽"));
    }

    #[test]
    fn test_quote_unknown_facade() {
        let catalog = Catalog::seed();
        let err = quote(&catalog, 999, 400, 600, 1).unwrap_err();
        assert!(matches!(err, CliError::FacadeNotFound(id) if id == FacadeId::new(999)));
    }

    #[test]
    fn test_quote_rejects_bad_input() {
        let catalog = Catalog::seed();
        assert!(matches!(
            quote(&catalog, 1, 20, 600, 1),
            Err(CliError::Pricing(PricingError::WidthOutOfRange(20)))
        ));
        assert!(matches!(
            quote(&catalog, 1, 400, 600, 0),
            Err(CliError::Pricing(PricingError::ZeroQuantity))
        ));
    }
}
