use super::repository;
use contracts::domain::a003_product::aggregate::{Product, ProductDto};
use uuid::Uuid;

pub async fn create(dto: ProductDto) -> anyhow::Result<Uuid> {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("PRD-{}", Uuid::new_v4()));
    let mut aggregate = Product::new_for_insert(
        code,
        dto.name.clone(),
        dto.vintage.clone(),
        dto.price_per_case,
        dto.tasting_notes.clone().unwrap_or_default(),
        dto.category.clone(),
        dto.in_stock,
        dto.image_url.clone(),
    );
    aggregate.base.comment = dto.comment;

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();

    repository::insert(&aggregate).await
}

pub async fn update(dto: ProductDto) -> anyhow::Result<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| anyhow::anyhow!("Invalid ID"))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Not found"))?;

    aggregate.update(&dto);

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();

    repository::update(&aggregate).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Product>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> anyhow::Result<Vec<Product>> {
    repository::list_all().await
}

/// Заполнить каталог демонстрационными винами (идемпотентно:
/// пропускается, если каталог уже не пуст)
pub async fn insert_test_data() -> anyhow::Result<usize> {
    if repository::count_all().await? > 0 {
        tracing::info!("Product catalog is not empty, skipping test data");
        return Ok(0);
    }

    let data = vec![
        ProductDto {
            code: Some("PRD-MARGAUX".into()),
            name: "Château Margaux".into(),
            vintage: "2018".into(),
            price_per_case: 2400.0,
            tasting_notes: Some("Premier Grand Cru Classé from Bordeaux. Elegant and complex with notes of blackcurrant and cedar.".into()),
            category: "Red Wine".into(),
            in_stock: true,
            ..Default::default()
        },
        ProductDto {
            code: Some("PRD-DOMPER".into()),
            name: "Dom Pérignon".into(),
            vintage: "2012".into(),
            price_per_case: 1800.0,
            tasting_notes: Some("Prestigious Champagne with fine bubbles and notes of white flowers and citrus.".into()),
            category: "Champagne".into(),
            in_stock: true,
            ..Default::default()
        },
        ProductDto {
            code: Some("PRD-OPUSONE".into()),
            name: "Opus One".into(),
            vintage: "2019".into(),
            price_per_case: 3600.0,
            tasting_notes: Some("Napa Valley Bordeaux-style blend. Rich and powerful with layers of dark fruit and spice.".into()),
            category: "Red Wine".into(),
            in_stock: true,
            ..Default::default()
        },
        ProductDto {
            code: Some("PRD-CHABLIS".into()),
            name: "Chablis Premier Cru".into(),
            vintage: "2020".into(),
            price_per_case: 480.0,
            tasting_notes: Some("Crisp and mineral-driven Chardonnay from Burgundy with notes of green apple and oyster shell.".into()),
            category: "White Wine".into(),
            in_stock: true,
            ..Default::default()
        },
        ProductDto {
            code: Some("PRD-BAROLO".into()),
            name: "Barolo Brunate".into(),
            vintage: "2017".into(),
            price_per_case: 720.0,
            tasting_notes: Some("Traditional Nebbiolo from Piedmont. Full-bodied with tannins and notes of cherry and leather.".into()),
            category: "Red Wine".into(),
            in_stock: true,
            ..Default::default()
        },
        ProductDto {
            code: Some("PRD-SANCERRE".into()),
            name: "Sancerre".into(),
            vintage: "2021".into(),
            price_per_case: 360.0,
            tasting_notes: Some("Loire Valley Sauvignon Blanc with bright acidity and notes of gooseberry and herbs.".into()),
            category: "White Wine".into(),
            in_stock: true,
            ..Default::default()
        },
        ProductDto {
            code: Some("PRD-CAYMUS".into()),
            name: "Caymus Cabernet".into(),
            vintage: "2020".into(),
            price_per_case: 600.0,
            tasting_notes: Some("Napa Valley Cabernet Sauvignon with rich dark fruit flavors and smooth tannins.".into()),
            category: "Red Wine".into(),
            in_stock: true,
            ..Default::default()
        },
        ProductDto {
            code: Some("PRD-VEUVE".into()),
            name: "Veuve Clicquot".into(),
            vintage: "NV".into(),
            price_per_case: 540.0,
            tasting_notes: Some("Classic Champagne with a perfect balance of strength and silkiness.".into()),
            category: "Champagne".into(),
            in_stock: true,
            ..Default::default()
        },
        ProductDto {
            code: Some("PRD-RIESLING".into()),
            name: "Riesling Kabinett".into(),
            vintage: "2021".into(),
            price_per_case: 240.0,
            tasting_notes: Some("German Riesling with delicate sweetness balanced by crisp acidity and mineral notes.".into()),
            category: "White Wine".into(),
            in_stock: false,
            ..Default::default()
        },
        ProductDto {
            code: Some("PRD-PINOT".into()),
            name: "Pinot Noir Reserve".into(),
            vintage: "2019".into(),
            price_per_case: 420.0,
            tasting_notes: Some("Oregon Pinot Noir with bright cherry flavors and earthy undertones.".into()),
            category: "Red Wine".into(),
            in_stock: true,
            ..Default::default()
        },
    ];

    let count = data.len();
    for dto in data {
        create(dto).await?;
    }

    tracing::info!("Inserted {} demo products", count);

    Ok(count)
}
