//! Price calculation for made-to-measure facades.
//!
//! A facade is priced by area: `width × height` converted to square metres,
//! multiplied by the facade's price per m² and by the quantity. There is no
//! surcharge for non-standard sizes. All arithmetic is exact decimal.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Facade;
use crate::types::Price;

/// Smallest side a facade can be cut to, in millimetres.
pub const MIN_SIDE_MM: u32 = 50;

/// Largest side a facade can be cut to, in millimetres.
pub const MAX_SIDE_MM: u32 = 3000;

const MM2_PER_M2: i64 = 1_000_000;

/// Errors from dimension validation and price calculation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PricingError {
    #[error("width must be between 50 and 3000 mm, got {0}")]
    WidthOutOfRange(u32),
    #[error("height must be between 50 and 3000 mm, got {0}")]
    HeightOutOfRange(u32),
    #[error("quantity must be at least 1")]
    ZeroQuantity,
}

/// Validated facade size in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDimensions")]
pub struct Dimensions {
    width_mm: u32,
    height_mm: u32,
}

#[derive(Deserialize)]
struct RawDimensions {
    width_mm: u32,
    height_mm: u32,
}

impl TryFrom<RawDimensions> for Dimensions {
    type Error = PricingError;

    fn try_from(raw: RawDimensions) -> Result<Self, Self::Error> {
        Self::new(raw.width_mm, raw.height_mm)
    }
}

impl Dimensions {
    /// Validate a width × height pair.
    ///
    /// # Errors
    ///
    /// Returns an error if either side is outside
    /// [`MIN_SIDE_MM`]`..=`[`MAX_SIDE_MM`].
    pub const fn new(width_mm: u32, height_mm: u32) -> Result<Self, PricingError> {
        if width_mm < MIN_SIDE_MM || width_mm > MAX_SIDE_MM {
            return Err(PricingError::WidthOutOfRange(width_mm));
        }
        if height_mm < MIN_SIDE_MM || height_mm > MAX_SIDE_MM {
            return Err(PricingError::HeightOutOfRange(height_mm));
        }
        Ok(Self {
            width_mm,
            height_mm,
        })
    }

    #[must_use]
    pub const fn width_mm(&self) -> u32 {
        self.width_mm
    }

    #[must_use]
    pub const fn height_mm(&self) -> u32 {
        self.height_mm
    }

    /// Area in square metres, exact.
    ///
    /// ```
    /// use facade_shop_core::Dimensions;
    /// use rust_decimal::Decimal;
    ///
    /// let dims = Dimensions::new(400, 600).unwrap();
    /// assert_eq!(dims.area_sqm(), Decimal::new(24, 2));
    /// ```
    #[must_use]
    pub fn area_sqm(&self) -> Decimal {
        let mm2 = Decimal::from(self.width_mm) * Decimal::from(self.height_mm);
        (mm2 / Decimal::from(MM2_PER_M2)).normalize()
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}×{} мм", self.width_mm, self.height_mm)
    }
}

/// Price of `quantity` facades cut to `dimensions`.
///
/// Pure: the same inputs always give the same price, and the price scales
/// linearly with quantity.
///
/// ```
/// use facade_shop_core::{Catalog, Dimensions, FacadeId, calculate_price};
/// use rust_decimal::Decimal;
///
/// let catalog = Catalog::seed();
/// let facade = catalog.facade(FacadeId::new(1)).unwrap(); // 5000 ₽/m²
/// let price = calculate_price(facade, Dimensions::new(400, 600).unwrap(), 2).unwrap();
/// assert_eq!(price.amount, Decimal::new(2400, 0));
/// ```
///
/// # Errors
///
/// Returns [`PricingError::ZeroQuantity`] when `quantity` is zero.
pub fn calculate_price(
    facade: &Facade,
    dimensions: Dimensions,
    quantity: u32,
) -> Result<Price, PricingError> {
    if quantity == 0 {
        return Err(PricingError::ZeroQuantity);
    }
    Ok(price_for_area(facade.price_per_sqm, dimensions, quantity))
}

/// Area × rate × quantity without a catalog lookup; used by cart lines that
/// carry a snapshot of the rate.
pub(crate) fn price_for_area(price_per_sqm: Price, dimensions: Dimensions, quantity: u32) -> Price {
    let amount =
        (price_per_sqm.amount * dimensions.area_sqm() * Decimal::from(quantity)).normalize();
    Price::new(amount, price_per_sqm.currency_code)
}

/// Named width × height shortcut offered by the dimension picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizePreset {
    pub name: &'static str,
    pub width_mm: u32,
    pub height_mm: u32,
}

impl SizePreset {
    /// The preset's size. Presets are always within range.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        Dimensions {
            width_mm: self.width_mm,
            height_mm: self.height_mm,
        }
    }
}

/// The preset used when a size is not chosen explicitly (moving a favorite
/// to the cart).
pub const STANDARD_PRESET: SizePreset = SizePreset {
    name: "Стандарт",
    width_mm: 400,
    height_mm: 700,
};

/// Standard sizes of kitchen and wardrobe modules.
pub const SIZE_PRESETS: [SizePreset; 6] = [
    SizePreset {
        name: "Узкий",
        width_mm: 300,
        height_mm: 700,
    },
    STANDARD_PRESET,
    SizePreset {
        name: "Широкий",
        width_mm: 600,
        height_mm: 700,
    },
    SizePreset {
        name: "Высокий",
        width_mm: 400,
        height_mm: 900,
    },
    SizePreset {
        name: "Ящик",
        width_mm: 600,
        height_mm: 150,
    },
    SizePreset {
        name: "Антресоль",
        width_mm: 600,
        height_mm: 350,
    },
];

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::types::FacadeId;

    fn facade_at(price: i64) -> Facade {
        let mut facade = Catalog::seed().facade(FacadeId::new(1)).unwrap().clone();
        facade.price_per_sqm = Price::rub(Decimal::new(price, 0));
        facade
    }

    #[test]
    fn test_reference_example() {
        let facade = facade_at(5000);
        let dims = Dimensions::new(400, 600).unwrap();
        assert_eq!(dims.area_sqm(), Decimal::new(24, 2));
        let price = calculate_price(&facade, dims, 2).unwrap();
        assert_eq!(price.amount, Decimal::new(2400, 0));
        assert_eq!(price.display(), "2 400 ₽");
    }

    #[test]
    fn test_price_is_pure() {
        let facade = facade_at(7300);
        let dims = Dimensions::new(597, 713).unwrap();
        let first = calculate_price(&facade, dims, 3).unwrap();
        let second = calculate_price(&facade, dims, 3).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_price_scales_with_quantity() {
        let facade = facade_at(6400);
        let dims = Dimensions::new(333, 777).unwrap();
        let one = calculate_price(&facade, dims, 1).unwrap();
        for k in [2_u32, 5, 17] {
            let many = calculate_price(&facade, dims, k).unwrap();
            assert_eq!(many.amount, one.amount * Decimal::from(k));
        }
    }

    #[test]
    fn test_zero_quantity_is_rejected() {
        let facade = facade_at(5000);
        let dims = Dimensions::new(400, 600).unwrap();
        assert_eq!(
            calculate_price(&facade, dims, 0),
            Err(PricingError::ZeroQuantity)
        );
    }

    #[test]
    fn test_dimension_bounds() {
        assert!(Dimensions::new(MIN_SIDE_MM, MAX_SIDE_MM).is_ok());
        assert_eq!(
            Dimensions::new(MIN_SIDE_MM - 1, 500),
            Err(PricingError::WidthOutOfRange(MIN_SIDE_MM - 1))
        );
        assert_eq!(
            Dimensions::new(500, MAX_SIDE_MM + 1),
            Err(PricingError::HeightOutOfRange(MAX_SIDE_MM + 1))
        );
    }

    #[test]
    fn test_dimensions_deserialize_validates() {
        let ok: Dimensions =
            serde_json::from_str(r#"{"width_mm": 400, "height_mm": 700}"#).unwrap();
        assert_eq!(ok.width_mm(), 400);
        assert!(serde_json::from_str::<Dimensions>(r#"{"width_mm": 0, "height_mm": 700}"#).is_err());
    }

    #[test]
    fn test_presets_are_in_range() {
        for preset in SIZE_PRESETS {
            let dims = Dimensions::new(preset.width_mm, preset.height_mm).unwrap();
            assert_eq!(dims, preset.dimensions());
        }
    }
}
