//! Catalog shipped with the site. Loaded once at startup; back-office edits
//! live in memory only.

use rust_decimal::Decimal;

use super::{Category, Coating, Color, Facade, Material, Rating};
use crate::types::{CategoryId, FacadeId, Price};

pub(super) fn categories() -> Vec<Category> {
    [
        (1, "kitchen", "Кухни", "Фасады для кухонных гарнитуров"),
        (2, "wardrobe", "Шкафы и гардеробные", "Двери для шкафов-купе и распашных шкафов"),
        (3, "bathroom", "Ванные комнаты", "Влагостойкие фасады для тумб и пеналов"),
        (4, "living-room", "Гостиные", "Фасады для стенок, комодов и ТВ-зон"),
    ]
    .into_iter()
    .map(|(id, slug, name, description)| Category {
        id: CategoryId::new(id),
        slug: slug.to_string(),
        name: name.to_string(),
        description: description.to_string(),
    })
    .collect()
}

struct Row {
    id: i32,
    slug: &'static str,
    name: &'static str,
    category: i32,
    material: Material,
    coatings: &'static [Coating],
    colors: &'static [Color],
    thickness_mm: u16,
    price: i64,
    in_stock: bool,
    score: i64,
    reviews: u32,
    featured: bool,
    description: &'static str,
}

const ROWS: &[Row] = &[
    Row {
        id: 1,
        slug: "mdf-classic-frame",
        name: "Классика с филёнкой",
        category: 1,
        material: Material::Mdf,
        coatings: &[Coating::Matte, Coating::Glossy],
        colors: &[Color::White, Color::Ivory, Color::Cream, Color::Beige],
        thickness_mm: 19,
        price: 5000,
        in_stock: true,
        score: 48,
        reviews: 124,
        featured: true,
        description: "Фрезерованный фасад из МДФ с классической филёнкой под плёнкой или эмалью.",
    },
    Row {
        id: 2,
        slug: "mdf-flat-enamel",
        name: "Гладкий эмаль",
        category: 1,
        material: Material::Mdf,
        coatings: &[Coating::Glossy, Coating::Matte, Coating::SuperMatte],
        colors: &[Color::White, Color::LightGray, Color::Graphite, Color::Black, Color::Navy],
        thickness_mm: 19,
        price: 7200,
        in_stock: true,
        score: 47,
        reviews: 98,
        featured: true,
        description: "Плоский фасад из МДФ, покрытый полиуретановой эмалью в несколько слоёв.",
    },
    Row {
        id: 3,
        slug: "chipboard-basic",
        name: "Базовый ЛДСП",
        category: 2,
        material: Material::Chipboard,
        coatings: &[Coating::Matte],
        colors: &[Color::White, Color::Beige, Color::Walnut, Color::Anthracite],
        thickness_mm: 16,
        price: 3200,
        in_stock: true,
        score: 42,
        reviews: 57,
        featured: false,
        description: "Экономичный фасад из ламинированной ДСП с кромкой ПВХ 2 мм.",
    },
    Row {
        id: 4,
        slug: "solid-oak-shaker",
        name: "Шейкер из массива",
        category: 1,
        material: Material::SolidWood,
        coatings: &[Coating::Matte, Coating::SuperMatte],
        colors: &[Color::Walnut, Color::Cappuccino, Color::Olive, Color::Sage],
        thickness_mm: 22,
        price: 18_500,
        in_stock: false,
        score: 49,
        reviews: 31,
        featured: true,
        description: "Рамочный фасад из массива дуба в стиле шейкер, тонированный маслом.",
    },
    Row {
        id: 5,
        slug: "acrylic-plastic-gloss",
        name: "Акриловый пластик",
        category: 1,
        material: Material::Plastic,
        coatings: &[Coating::Glossy],
        colors: &[Color::White, Color::Burgundy, Color::Terracotta, Color::Black],
        thickness_mm: 18,
        price: 6400,
        in_stock: true,
        score: 45,
        reviews: 76,
        featured: false,
        description: "МДФ-основа с акриловым пластиком высокого глянца и кромкой в цвет.",
    },
    Row {
        id: 6,
        slug: "fenix-super-matte",
        name: "Супермат антипальцевый",
        category: 4,
        material: Material::Plastic,
        coatings: &[Coating::SuperMatte],
        colors: &[Color::Anthracite, Color::Graphite, Color::Sage, Color::Navy],
        thickness_mm: 19,
        price: 9800,
        in_stock: true,
        score: 46,
        reviews: 43,
        featured: true,
        description: "Нанотехнологичный пластик с эффектом soft-touch, не оставляет отпечатков.",
    },
    Row {
        id: 7,
        slug: "glass-aluminium-frame",
        name: "Стекло в алюминиевой рамке",
        category: 4,
        material: Material::Glass,
        coatings: &[Coating::Glossy, Coating::Matte],
        colors: &[Color::Black, Color::Graphite, Color::Cream],
        thickness_mm: 20,
        price: 11_200,
        in_stock: true,
        score: 44,
        reviews: 22,
        featured: false,
        description: "Закалённое стекло 4 мм в узком алюминиевом профиле.",
    },
    Row {
        id: 8,
        slug: "bathroom-moisture-mdf",
        name: "Влагостойкий МДФ",
        category: 3,
        material: Material::Mdf,
        coatings: &[Coating::Glossy, Coating::SuperMatte],
        colors: &[Color::White, Color::LightGray, Color::Sage, Color::Terracotta],
        thickness_mm: 19,
        price: 6900,
        in_stock: false,
        score: 43,
        reviews: 18,
        featured: false,
        description: "Влагостойкий МДФ с торцами, закрытыми эмалью, для ванных комнат.",
    },
    Row {
        id: 9,
        slug: "wardrobe-mirror-glass",
        name: "Зеркальная дверь купе",
        category: 2,
        material: Material::Glass,
        coatings: &[Coating::Glossy],
        colors: &[Color::Ivory, Color::Beige, Color::Cappuccino],
        thickness_mm: 10,
        price: 8300,
        in_stock: true,
        score: 41,
        reviews: 64,
        featured: false,
        description: "Тонированное зеркало с защитной плёнкой для шкафов-купе.",
    },
    Row {
        id: 10,
        slug: "solid-ash-slatted",
        name: "Реечный ясень",
        category: 4,
        material: Material::SolidWood,
        coatings: &[Coating::Matte],
        colors: &[Color::Walnut, Color::Olive, Color::Burgundy, Color::Black],
        thickness_mm: 24,
        price: 15_400,
        in_stock: true,
        score: 50,
        reviews: 12,
        featured: false,
        description: "Фасад из реек массива ясеня на МДФ-основе, покрытие лаком.",
    },
];

pub(super) fn facades() -> Vec<Facade> {
    ROWS.iter()
        .map(|row| Facade {
            id: FacadeId::new(row.id),
            slug: row.slug.to_string(),
            name: row.name.to_string(),
            category_id: CategoryId::new(row.category),
            material: row.material,
            coatings: row.coatings.to_vec(),
            colors: row.colors.to_vec(),
            thickness_mm: row.thickness_mm,
            price_per_sqm: Price::rub(Decimal::new(row.price, 0)),
            in_stock: row.in_stock,
            rating: Rating {
                score: Decimal::new(row.score, 1),
                reviews: row.reviews,
            },
            featured: row.featured,
            image: format!("/static/images/facades/{}.jpg", row.slug),
            description: row.description.to_string(),
        })
        .collect()
}
