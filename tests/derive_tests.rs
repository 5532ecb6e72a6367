// tests/derive_tests.rs
mod common;

use apikey_vault::{derive_key, CoreError, KeyDeriver, MasterSecret, PlainSecret, UserId};
use zeroize::Zeroize;
use sha2::{Digest, Sha256};

#[test]
fn derive_is_deterministic() {
    common::setup();
    let deriver = KeyDeriver::from_bytes(common::TEST_SECRET).unwrap();

    let a = deriver.derive(UserId::new(42));
    let b = deriver.derive(UserId::new(42));
    assert_eq!(a.expose_secret(), b.expose_secret());
    assert_eq!(a.expose_secret().len(), 32);
}

#[test]
fn distinct_users_get_distinct_keys() {
    let deriver = KeyDeriver::from_bytes(common::TEST_SECRET).unwrap();

    let keys: Vec<[u8; 32]> = (-5i64..200)
        .map(|id| *deriver.derive(UserId::new(id)).expose_secret())
        .collect();

    for (i, a) in keys.iter().enumerate() {
        for b in &keys[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn distinct_secrets_give_distinct_keys() {
    let a = derive_key(b"s3cr3t", UserId::new(42)).unwrap();
    let b = derive_key(b"s3cr3u", UserId::new(42)).unwrap();
    assert_ne!(a.expose_secret(), b.expose_secret());
}

#[test]
fn key_is_sha256_of_secret_colon_decimal_id() {
    let key = derive_key(b"s3cr3t", UserId::new(42)).unwrap();
    let expected: [u8; 32] = Sha256::digest(b"s3cr3t:42").into();
    assert_eq!(*key.expose_secret(), expected);

    let negative = derive_key(b"s3cr3t", UserId::new(-7)).unwrap();
    let expected: [u8; 32] = Sha256::digest(b"s3cr3t:-7").into();
    assert_eq!(*negative.expose_secret(), expected);
}

#[test]
fn deriver_and_free_function_agree() {
    let deriver = KeyDeriver::new(MasterSecret::new(b"s3cr3t".to_vec())).unwrap();
    let from_deriver = deriver.derive(UserId::from(9u32));
    let from_fn = derive_key(b"s3cr3t", UserId::from(9i32)).unwrap();
    assert_eq!(from_deriver.expose_secret(), from_fn.expose_secret());
}

#[test]
fn empty_secret_is_a_configuration_error() {
    assert!(matches!(
        KeyDeriver::from_bytes(Vec::<u8>::new()),
        Err(CoreError::Configuration(_))
    ));
    assert!(matches!(
        derive_key(b"", UserId::new(1)),
        Err(CoreError::Configuration(_))
    ));
}

#[test]
fn debug_output_hides_the_master_secret() {
    let deriver = KeyDeriver::from_bytes("super-private-value").unwrap();
    let rendered = format!("{deriver:?}");
    assert!(!rendered.contains("super-private-value"));
    assert!(rendered.contains("REDACTED"));
}

#[test]
fn user_id_displays_as_plain_decimal() {
    assert_eq!(UserId::new(42).to_string(), "42");
    assert_eq!(UserId::new(-42).to_string(), "-42");
    assert_eq!(UserId::from(7u32).get(), 7);
}

#[test]
fn whitespace_secret_is_opaque_bytes() {
    let deriver = KeyDeriver::from_bytes(vec![b' ', b'\t']).unwrap();
    let key = deriver.derive(UserId::new(1));
    let expected: [u8; 32] = Sha256::digest(b" \t:1").into();
    assert_eq!(*key.expose_secret(), expected);
}

#[test]
fn derived_key_can_be_wiped() {
    let deriver = KeyDeriver::from_bytes(common::TEST_SECRET).unwrap();
    let mut key = deriver.derive(UserId::new(42));
    assert!(key.expose_secret().iter().any(|b| *b != 0));

    key.zeroize();
    assert!(key.expose_secret().iter().all(|b| *b == 0));
}

#[test]
fn variable_length_secrets_wipe_on_drop() {
    assert!(std::mem::needs_drop::<MasterSecret>());
    assert!(std::mem::needs_drop::<PlainSecret>());
}
