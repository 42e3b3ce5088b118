//! Cart store.
//!
//! A cart line is one facade cut to one size with one finish. Its price is
//! derived from the rate snapshot, the dimensions and the quantity, and is
//! recomputed by every operation that changes any of them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{Catalog, Coating, Color, Facade};
use crate::pricing::{Dimensions, PricingError, price_for_area};
use crate::types::{CartLineId, FacadeId, Price};

/// Largest quantity a single cart line may hold.
pub const MAX_LINE_QUANTITY: u32 = 999;

/// Errors from cart operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    #[error("cart line {0} not found")]
    LineNotFound(CartLineId),
    #[error("{facade} is not available with coating '{coating}'")]
    CoatingNotOffered { facade: String, coating: Coating },
    #[error("{facade} is not available in color '{color}'")]
    ColorNotOffered { facade: String, color: Color },
    #[error("quantity per line cannot exceed {MAX_LINE_QUANTITY}")]
    QuantityTooLarge,
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// `current + added`, bounded by [`MAX_LINE_QUANTITY`].
fn combined_quantity(current: u32, added: u32) -> Result<u32, CartError> {
    current
        .checked_add(added)
        .filter(|total| *total <= MAX_LINE_QUANTITY)
        .ok_or(CartError::QuantityTooLarge)
}

/// What the shopper chose for a facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineConfiguration {
    pub dimensions: Dimensions,
    pub quantity: u32,
    pub coating: Coating,
    pub color: Color,
}

impl LineConfiguration {
    /// The facade's first coating and color at the given size, quantity 1.
    #[must_use]
    pub fn default_for(facade: &Facade, dimensions: Dimensions) -> Option<Self> {
        Some(Self {
            dimensions,
            quantity: 1,
            coating: *facade.coatings.first()?,
            color: *facade.colors.first()?,
        })
    }
}

/// One line of the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: CartLineId,
    pub facade_id: FacadeId,
    pub facade_name: String,
    pub image: String,
    /// Rate snapshot taken from the facade.
    pub price_per_sqm: Price,
    pub dimensions: Dimensions,
    pub quantity: u32,
    pub coating: Coating,
    pub color: Color,
    /// Area × rate × quantity; kept in sync by the store.
    price: Price,
}

impl CartLine {
    /// Calculated price of the line.
    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    fn recalculate(&mut self) {
        self.price = price_for_area(self.price_per_sqm, self.dimensions, self.quantity);
    }

    fn same_configuration(&self, facade_id: FacadeId, config: &LineConfiguration) -> bool {
        self.facade_id == facade_id
            && self.dimensions == config.dimensions
            && self.coating == config.coating
            && self.color == config.color
    }
}

/// The cart of one shopper.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartStore {
    lines: Vec<CartLine>,
    last_line_id: i32,
}

impl CartStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a configured facade.
    ///
    /// A line with the same facade, size and finish absorbs the quantity;
    /// otherwise a new line is created. Returns the ID of the affected line.
    ///
    /// # Errors
    ///
    /// Fails if the quantity is zero, the line would exceed
    /// [`MAX_LINE_QUANTITY`], or the facade does not offer the chosen coating
    /// or color.
    pub fn add(&mut self, facade: &Facade, config: LineConfiguration) -> Result<CartLineId, CartError> {
        if config.quantity == 0 {
            return Err(PricingError::ZeroQuantity.into());
        }
        if config.quantity > MAX_LINE_QUANTITY {
            return Err(CartError::QuantityTooLarge);
        }
        if !facade.offers_coating(config.coating) {
            return Err(CartError::CoatingNotOffered {
                facade: facade.name.clone(),
                coating: config.coating,
            });
        }
        if !facade.offers_color(config.color) {
            return Err(CartError::ColorNotOffered {
                facade: facade.name.clone(),
                color: config.color,
            });
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.same_configuration(facade.id, &config))
        {
            line.quantity = combined_quantity(line.quantity, config.quantity)?;
            line.price_per_sqm = facade.price_per_sqm;
            line.recalculate();
            return Ok(line.id);
        }

        self.last_line_id += 1;
        let id = CartLineId::new(self.last_line_id);
        let mut line = CartLine {
            id,
            facade_id: facade.id,
            facade_name: facade.name.clone(),
            image: facade.image.clone(),
            price_per_sqm: facade.price_per_sqm,
            dimensions: config.dimensions,
            quantity: config.quantity,
            coating: config.coating,
            color: config.color,
            price: Price::zero(),
        };
        line.recalculate();
        self.lines.push(line);
        Ok(id)
    }

    /// Set a line's quantity. Zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns `LineNotFound` for an unknown line and `QuantityTooLarge` above
    /// [`MAX_LINE_QUANTITY`].
    pub fn update_quantity(&mut self, id: CartLineId, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return self.remove(id).map(|_| ());
        }
        if quantity > MAX_LINE_QUANTITY {
            return Err(CartError::QuantityTooLarge);
        }
        let line = self.line_mut(id)?;
        line.quantity = quantity;
        line.recalculate();
        Ok(())
    }

    /// Change a line's size.
    ///
    /// If another line already has the new size and the same finish, the two
    /// lines are merged into that one. Returns the ID of the line that holds
    /// the facades afterwards.
    ///
    /// # Errors
    ///
    /// Returns `LineNotFound` for an unknown line and `QuantityTooLarge` when
    /// the merged line would exceed [`MAX_LINE_QUANTITY`].
    pub fn update_dimensions(
        &mut self,
        id: CartLineId,
        dimensions: Dimensions,
    ) -> Result<CartLineId, CartError> {
        let line = self.line(id).ok_or(CartError::LineNotFound(id))?;
        let config = LineConfiguration {
            dimensions,
            quantity: line.quantity,
            coating: line.coating,
            color: line.color,
        };
        let facade_id = line.facade_id;

        if let Some(twin) = self
            .lines
            .iter_mut()
            .find(|other| other.id != id && other.same_configuration(facade_id, &config))
        {
            twin.quantity = combined_quantity(twin.quantity, config.quantity)?;
            twin.recalculate();
            let twin_id = twin.id;
            self.lines.retain(|line| line.id != id);
            return Ok(twin_id);
        }

        let line = self.line_mut(id)?;
        line.dimensions = dimensions;
        line.recalculate();
        Ok(id)
    }

    /// Remove a line, returning it.
    ///
    /// # Errors
    ///
    /// Returns `LineNotFound` for an unknown line.
    pub fn remove(&mut self, id: CartLineId) -> Result<CartLine, CartError> {
        let index = self
            .lines
            .iter()
            .position(|line| line.id == id)
            .ok_or(CartError::LineNotFound(id))?;
        Ok(self.lines.remove(index))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Refresh rate snapshots from the catalog.
    ///
    /// Lines whose facade left the catalog are dropped; their IDs are
    /// returned.
    pub fn sync_with_catalog(&mut self, catalog: &Catalog) -> Vec<CartLineId> {
        let mut dropped = Vec::new();
        self.lines.retain_mut(|line| match catalog.facade(line.facade_id) {
            Some(facade) => {
                if line.price_per_sqm != facade.price_per_sqm || line.facade_name != facade.name {
                    line.price_per_sqm = facade.price_per_sqm;
                    line.facade_name.clone_from(&facade.name);
                    line.recalculate();
                }
                true
            }
            None => {
                dropped.push(line.id);
                false
            }
        });
        dropped
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, id: CartLineId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of facades across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |count, line| count.saturating_add(line.quantity))
    }

    /// Sum of line prices.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lines.iter().map(CartLine::price).sum()
    }

    fn line_mut(&mut self, id: CartLineId) -> Result<&mut CartLine, CartError> {
        self.lines
            .iter_mut()
            .find(|line| line.id == id)
            .ok_or(CartError::LineNotFound(id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn facade() -> Facade {
        // 5000 ₽/m², matte/glossy, white/ivory/cream/beige
        Catalog::seed().facade(FacadeId::new(1)).unwrap().clone()
    }

    fn config(width: u32, height: u32, quantity: u32) -> LineConfiguration {
        LineConfiguration {
            dimensions: Dimensions::new(width, height).unwrap(),
            quantity,
            coating: Coating::Matte,
            color: Color::White,
        }
    }

    #[test]
    fn test_add_calculates_price() {
        let mut cart = CartStore::new();
        let id = cart.add(&facade(), config(400, 600, 2)).unwrap();
        assert_eq!(cart.line(id).unwrap().price().amount, Decimal::new(2400, 0));
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.subtotal().amount, Decimal::new(2400, 0));
    }

    #[test]
    fn test_identical_configuration_merges() {
        let mut cart = CartStore::new();
        let first = cart.add(&facade(), config(400, 600, 1)).unwrap();
        let second = cart.add(&facade(), config(400, 600, 2)).unwrap();
        assert_eq!(first, second);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.line(first).unwrap().quantity, 3);
        assert_eq!(cart.subtotal().amount, Decimal::new(3600, 0));

        let other_size = cart.add(&facade(), config(400, 700, 1)).unwrap();
        assert_ne!(other_size, first);
        assert_eq!(cart.lines().len(), 2);
    }

    #[test]
    fn test_finish_must_be_offered() {
        let mut cart = CartStore::new();
        let mut wrong_coating = config(400, 600, 1);
        wrong_coating.coating = Coating::SuperMatte;
        assert!(matches!(
            cart.add(&facade(), wrong_coating),
            Err(CartError::CoatingNotOffered { .. })
        ));

        let mut wrong_color = config(400, 600, 1);
        wrong_color.color = Color::Burgundy;
        assert!(matches!(
            cart.add(&facade(), wrong_color),
            Err(CartError::ColorNotOffered { .. })
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_quantity_update_rederives_price() {
        let mut cart = CartStore::new();
        let id = cart.add(&facade(), config(400, 600, 1)).unwrap();
        cart.update_quantity(id, 5).unwrap();
        assert_eq!(cart.line(id).unwrap().price().amount, Decimal::new(6000, 0));

        cart.update_quantity(id, 0).unwrap();
        assert!(cart.is_empty());
        assert_eq!(
            cart.update_quantity(id, 1),
            Err(CartError::LineNotFound(id))
        );
    }

    #[test]
    fn test_dimension_update_rederives_price() {
        let mut cart = CartStore::new();
        let id = cart.add(&facade(), config(400, 600, 1)).unwrap();
        cart.update_dimensions(id, Dimensions::new(500, 600).unwrap())
            .unwrap();
        // 0.3 m² × 5000
        assert_eq!(cart.line(id).unwrap().price().amount, Decimal::new(1500, 0));
    }

    #[test]
    fn test_dimension_update_merges_twins() {
        let mut cart = CartStore::new();
        let small = cart.add(&facade(), config(400, 600, 1)).unwrap();
        let large = cart.add(&facade(), config(500, 600, 2)).unwrap();
        let survivor = cart
            .update_dimensions(small, Dimensions::new(500, 600).unwrap())
            .unwrap();
        assert_eq!(survivor, large);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.line(large).unwrap().quantity, 3);
        assert!(cart.line(small).is_none());

        cart.update_quantity(survivor, 4).unwrap();
        // 0.3 m² × 5000 × 4
        assert_eq!(cart.subtotal().amount, Decimal::new(6000, 0));
    }

    #[test]
    fn test_quantity_is_capped_per_line() {
        let mut cart = CartStore::new();
        assert_eq!(
            cart.add(&facade(), config(400, 600, u32::MAX)),
            Err(CartError::QuantityTooLarge)
        );

        let id = cart
            .add(&facade(), config(400, 600, MAX_LINE_QUANTITY))
            .unwrap();
        assert_eq!(
            cart.add(&facade(), config(400, 600, 1)),
            Err(CartError::QuantityTooLarge)
        );
        assert_eq!(cart.line(id).unwrap().quantity, MAX_LINE_QUANTITY);
        assert_eq!(
            cart.update_quantity(id, MAX_LINE_QUANTITY + 1),
            Err(CartError::QuantityTooLarge)
        );

        let other = cart.add(&facade(), config(500, 600, 1)).unwrap();
        assert_eq!(
            cart.update_dimensions(other, Dimensions::new(400, 600).unwrap()),
            Err(CartError::QuantityTooLarge)
        );
        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.item_count(), MAX_LINE_QUANTITY + 1);
    }

    #[test]
    fn test_line_ids_are_not_reused() {
        let mut cart = CartStore::new();
        let first = cart.add(&facade(), config(400, 600, 1)).unwrap();
        cart.remove(first).unwrap();
        let second = cart.add(&facade(), config(400, 600, 1)).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_sync_with_catalog() {
        let mut catalog = Catalog::seed();
        let mut cart = CartStore::new();
        let facade = catalog.facade(FacadeId::new(1)).unwrap().clone();
        let kept = cart.add(&facade, config(400, 600, 2)).unwrap();
        let gone_facade = catalog.facade(FacadeId::new(2)).unwrap().clone();
        let gone = cart
            .add(
                &gone_facade,
                LineConfiguration::default_for(&gone_facade, Dimensions::new(400, 600).unwrap())
                    .unwrap(),
            )
            .unwrap();

        catalog.remove_facade(FacadeId::new(2)).unwrap();
        let mut draft_price = catalog.facade(FacadeId::new(1)).unwrap().clone();
        draft_price.price_per_sqm = Price::rub(Decimal::new(6000, 0));
        let catalog = Catalog::new(catalog.categories().to_vec(), vec![draft_price]);

        assert_eq!(cart.sync_with_catalog(&catalog), vec![gone]);
        assert_eq!(cart.line(kept).unwrap().price().amount, Decimal::new(2880, 0));
    }
}
