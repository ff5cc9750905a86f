use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PulsatorError::configuration("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(PulsatorError::host("x").to_string().contains("host error:"));
    assert!(
        PulsatorError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        PulsatorError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PulsatorError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde() {
    let err: PulsatorError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, PulsatorError::Serde(_)));
    assert!(!err.is_configuration());
}
