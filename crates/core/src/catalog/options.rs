//! Finish options: materials, coatings and the fixed color palette.

use serde::{Deserialize, Serialize};

/// Panel material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    /// Medium-density fibreboard.
    Mdf,
    /// Laminated chipboard.
    Chipboard,
    SolidWood,
    Plastic,
    Glass,
}

impl Material {
    pub const ALL: [Self; 5] = [
        Self::Mdf,
        Self::Chipboard,
        Self::SolidWood,
        Self::Plastic,
        Self::Glass,
    ];

    /// Value used in URLs and form fields.
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Mdf => "mdf",
            Self::Chipboard => "chipboard",
            Self::SolidWood => "solid_wood",
            Self::Plastic => "plastic",
            Self::Glass => "glass",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Mdf => "МДФ",
            Self::Chipboard => "ЛДСП",
            Self::SolidWood => "Массив дерева",
            Self::Plastic => "Пластик",
            Self::Glass => "Стекло",
        }
    }
}

/// Surface finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Coating {
    Glossy,
    Matte,
    SuperMatte,
}

impl Coating {
    pub const ALL: [Self; 3] = [Self::Glossy, Self::Matte, Self::SuperMatte];

    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Glossy => "glossy",
            Self::Matte => "matte",
            Self::SuperMatte => "super_matte",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Glossy => "Глянец",
            Self::Matte => "Матовое",
            Self::SuperMatte => "Супермат",
        }
    }
}

/// One of the fifteen swatches in the shop palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    White,
    Ivory,
    Cream,
    Beige,
    Cappuccino,
    LightGray,
    Graphite,
    Anthracite,
    Black,
    Olive,
    Sage,
    Navy,
    Burgundy,
    Terracotta,
    Walnut,
}

impl Color {
    pub const ALL: [Self; 15] = [
        Self::White,
        Self::Ivory,
        Self::Cream,
        Self::Beige,
        Self::Cappuccino,
        Self::LightGray,
        Self::Graphite,
        Self::Anthracite,
        Self::Black,
        Self::Olive,
        Self::Sage,
        Self::Navy,
        Self::Burgundy,
        Self::Terracotta,
        Self::Walnut,
    ];

    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Ivory => "ivory",
            Self::Cream => "cream",
            Self::Beige => "beige",
            Self::Cappuccino => "cappuccino",
            Self::LightGray => "light_gray",
            Self::Graphite => "graphite",
            Self::Anthracite => "anthracite",
            Self::Black => "black",
            Self::Olive => "olive",
            Self::Sage => "sage",
            Self::Navy => "navy",
            Self::Burgundy => "burgundy",
            Self::Terracotta => "terracotta",
            Self::Walnut => "walnut",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::White => "Белый",
            Self::Ivory => "Слоновая кость",
            Self::Cream => "Кремовый",
            Self::Beige => "Бежевый",
            Self::Cappuccino => "Капучино",
            Self::LightGray => "Светло-серый",
            Self::Graphite => "Графит",
            Self::Anthracite => "Антрацит",
            Self::Black => "Чёрный",
            Self::Olive => "Оливковый",
            Self::Sage => "Шалфей",
            Self::Navy => "Тёмно-синий",
            Self::Burgundy => "Бордовый",
            Self::Terracotta => "Терракота",
            Self::Walnut => "Орех",
        }
    }

    /// Swatch color as `#RRGGBB`.
    #[must_use]
    pub const fn hex(&self) -> &'static str {
        match self {
            Self::White => "#FFFFFF",
            Self::Ivory => "#FFFFF0",
            Self::Cream => "#F3E5AB",
            Self::Beige => "#D8C3A5",
            Self::Cappuccino => "#A67B5B",
            Self::LightGray => "#D3D3D3",
            Self::Graphite => "#474A51",
            Self::Anthracite => "#293133",
            Self::Black => "#0B0B0B",
            Self::Olive => "#708238",
            Self::Sage => "#9CAF88",
            Self::Navy => "#1F305E",
            Self::Burgundy => "#800020",
            Self::Terracotta => "#E2725B",
            Self::Walnut => "#773F1A",
        }
    }
}

macro_rules! impl_from_slug {
    ($ty:ident, $what:literal) => {
        impl std::str::FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .into_iter()
                    .find(|v| v.slug() == s)
                    .ok_or_else(|| format!(concat!("invalid ", $what, ": {}"), s))
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.slug())
            }
        }
    };
}

impl_from_slug!(Material, "material");
impl_from_slug!(Coating, "coating");
impl_from_slug!(Color, "color");

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_palette_has_fifteen_distinct_swatches() {
        let hexes: HashSet<_> = Color::ALL.iter().map(Color::hex).collect();
        assert_eq!(hexes.len(), 15);
        for hex in hexes {
            assert_eq!(hex.len(), 7);
            assert!(hex.starts_with('#'));
            assert!(hex.trim_start_matches('#').chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn test_slug_matches_serde_name() {
        for color in Color::ALL {
            let json = serde_json::to_string(&color).unwrap();
            assert_eq!(json, format!("\"{}\"", color.slug()));
            assert_eq!(color.slug().parse::<Color>().unwrap(), color);
        }
        for material in Material::ALL {
            let json = serde_json::to_string(&material).unwrap();
            assert_eq!(json, format!("\"{}\"", material.slug()));
        }
        for coating in Coating::ALL {
            assert_eq!(coating.to_string().parse::<Coating>().unwrap(), coating);
        }
    }

    #[test]
    fn test_unknown_slug_is_rejected() {
        assert!("chrome".parse::<Coating>().is_err());
        assert!("oak".parse::<Material>().is_err());
    }
}
