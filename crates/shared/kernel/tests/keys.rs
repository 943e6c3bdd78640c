use confhub_kernel::keys::EntityKey;
use confhub_kernel::{SAFE_ALPHABET, safe_nanoid};

#[test]
fn generated_keys_carry_kind_and_safe_id() {
    let key = EntityKey::generate("conference");
    let (kind, id) = key.split_once(':').expect("kind prefix");

    assert_eq!(kind, "conference");
    assert_eq!(id.len(), 12);
    assert!(id.chars().all(|ch| SAFE_ALPHABET.contains(&ch)), "unexpected character in {id}");
    assert_eq!(EntityKey::verify(&key, "conference").unwrap(), key);
}

#[test]
fn bare_ids_are_prefixed_and_foreign_kinds_rejected() {
    assert_eq!(EntityKey::verify("V1StGXR8Z5jd", "session").unwrap(), "session:V1StGXR8Z5jd");
    assert!(EntityKey::verify("conference:V1StGXR8Z5jd", "session").is_err());
}

#[test]
fn custom_length_nanoid() {
    assert_eq!(safe_nanoid!(20).len(), 20);
}
