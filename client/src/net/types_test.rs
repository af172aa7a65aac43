use super::*;

fn product(image: Option<&str>) -> Product {
    Product {
        id: 1,
        name: "Classic".to_owned(),
        price: 4.5,
        description: "Round and cold".to_owned(),
        image: image.map(str::to_owned),
    }
}

#[test]
fn product_decodes_backend_shape() {
    let json = r#"{"snowballId":7,"name":"Glitter","price":12,"description":"Sparkly","image":"https://cdn/x.png"}"#;
    let decoded: Product = serde_json::from_str(json).unwrap();
    assert_eq!(decoded.id, 7);
    assert_eq!(decoded.name, "Glitter");
    assert!((decoded.price - 12.0).abs() < f64::EPSILON);
    assert_eq!(decoded.image_url(), "https://cdn/x.png");
}

#[test]
fn product_tolerates_missing_optional_fields() {
    let decoded: Product = serde_json::from_str(r#"{"snowballId":1,"name":"Plain","price":1.5}"#).unwrap();
    assert_eq!(decoded.description, "");
    assert_eq!(decoded.image, None);
}

#[test]
fn image_falls_back_to_placeholder() {
    assert_eq!(product(None).image_url(), PLACEHOLDER_IMAGE);
    assert_eq!(product(Some("  ")).image_url(), PLACEHOLDER_IMAGE);
}

#[test]
fn price_label_has_two_decimals() {
    assert_eq!(product(None).price_label(), "Price: $4.50");
}
