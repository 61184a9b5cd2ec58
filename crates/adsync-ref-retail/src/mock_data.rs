//! Simulated product feed for the ADSYNC retail reference runtime.
//!
//! All data in this module is hardcoded and fictional. No external systems are
//! contacted. The feed stands in for the catalogue export a merchant would
//! attach to a campaign set as its data source.

use serde_json::json;

use adsync_contracts::request::{ColumnType, DataSourceColumn, SampleRow};

// ── Columns ───────────────────────────────────────────────────────────────────

/// Columns the catalogue export declares.
pub fn catalogue_columns() -> Vec<DataSourceColumn> {
    vec![
        DataSourceColumn::new("sku", ColumnType::Text),
        DataSourceColumn::new("brand", ColumnType::Text),
        DataSourceColumn::new("title", ColumnType::Text),
        DataSourceColumn::new("short_title", ColumnType::Text),
        DataSourceColumn::new("category", ColumnType::Text),
        DataSourceColumn::new("price", ColumnType::Text),
        DataSourceColumn::new("url", ColumnType::Url),
    ]
}

// ── Rows ──────────────────────────────────────────────────────────────────────

/// Row index of the product whose only title is 46 characters long.
pub const LONG_TITLE_ROW: usize = 5;

/// Row index of the product exported without a landing page.
pub const MISSING_URL_ROW: usize = 9;

/// Row index of the product whose title fits Meta and TikTok but not Google.
pub const PARKA_ROW: usize = 10;

/// Row index of the product whose landing page lost its scheme in export.
pub const SCHEMELESS_URL_ROW: usize = 11;

fn product(
    sku: &str,
    brand: &str,
    title: &str,
    short_title: &str,
    category: &str,
    price: &str,
    url: &str,
) -> SampleRow {
    let mut row = SampleRow::new();
    row.insert("sku".to_string(), json!(sku));
    row.insert("brand".to_string(), json!(brand));
    row.insert("title".to_string(), json!(title));
    row.insert("short_title".to_string(), json!(short_title));
    row.insert("category".to_string(), json!(category));
    row.insert("price".to_string(), json!(price));
    row.insert("url".to_string(), json!(url));
    row
}

/// The catalogue export, in feed order.
///
/// Rows 0–9 are the spring launch range. Rows 10 and 11 are late additions
/// used by the multi-platform and broken-feed scenarios.
pub fn catalogue_rows() -> Vec<SampleRow> {
    vec![
        product(
            "TR-100",
            "Acme",
            "Trail Runner 2 Men's Running Shoe",
            "Trail Runner 2",
            "Running",
            "$129.00",
            "https://shop.acme.test/p/tr-100",
        ),
        product(
            "RD-200",
            "Acme",
            "Road Racer Elite Carbon Plate Shoe",
            "Road Racer Elite",
            "Running",
            "$189.00",
            "https://shop.acme.test/p/rd-200",
        ),
        product(
            "HK-300",
            "Summit",
            "Summit Hiking Boot, Waterproof Leather",
            "Summit Hiking Boot",
            "Hiking",
            "$159.00",
            "https://shop.acme.test/p/hk-300",
        ),
        product(
            "WP-400",
            "Summit",
            "Waterproof Shell Jacket",
            "Waterproof Shell Jacket",
            "Outerwear",
            "$219.00",
            "https://shop.acme.test/p/wp-400",
        ),
        product(
            "SK-500",
            "Northpeak",
            "Merino Trail Socks (3 Pack)",
            "Merino Trail Socks",
            "Accessories",
            "$24.00",
            "https://shop.acme.test/p/sk-500",
        ),
        product(
            "LT-600",
            "Acme",
            "Lightweight trail running shoes for every pace",
            "",
            "Running",
            "$139.00",
            "https://shop.acme.test/p/lt-600",
        ),
        product(
            "BP-700",
            "Northpeak",
            "Daypack 24L with Hydration Sleeve",
            "Daypack 24L",
            "Packs",
            "$89.00",
            "https://shop.acme.test/p/bp-700",
        ),
        product(
            "CP-800",
            "Summit",
            "Ultralight Inflatable Camp Pillow",
            "Ultralight Camp Pillow",
            "Camping",
            "$32.00",
            "https://shop.acme.test/p/cp-800",
        ),
        product(
            "HL-900",
            "Northpeak",
            "Rechargeable Headlamp 400 Lumen",
            "Rechargeable Headlamp",
            "Accessories",
            "$49.00",
            "https://shop.acme.test/p/hl-900",
        ),
        product("GT-010", "Acme", "Gaiter Pro", "Gaiter Pro", "Accessories", "$19.00", ""),
        product(
            "PK-110",
            "Summit",
            "Insulated winter parka with hood",
            "",
            "Outerwear",
            "$299.00",
            "https://shop.acme.test/p/pk-110",
        ),
        product(
            "TB-120",
            "Northpeak",
            "Trekking Poles",
            "Trekking Poles",
            "Hiking",
            "$79.00",
            "shop.acme.test/p/tb-120",
        ),
    ]
}

/// The spring launch range only (rows 0–9).
pub fn launch_rows() -> Vec<SampleRow> {
    catalogue_rows().into_iter().take(10).collect()
}
