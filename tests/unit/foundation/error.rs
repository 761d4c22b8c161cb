use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        DeckfitError::catalog("x")
            .to_string()
            .contains("catalog error:")
    );
    assert!(
        DeckfitError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        DeckfitError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = DeckfitError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn serde_json_errors_map_to_serde_variant() {
    let err: DeckfitError = serde_json::from_str::<serde_json::Value>("{")
        .unwrap_err()
        .into();
    assert!(matches!(err, DeckfitError::Serde(_)));
}
