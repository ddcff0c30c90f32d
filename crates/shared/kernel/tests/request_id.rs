use fcheck_kernel::{REQUEST_ID_LEN, SAFE_ALPHABET, request_id};

#[test]
fn generates_expected_length_and_charset() {
    let id = request_id();
    assert_eq!(id.len(), REQUEST_ID_LEN);

    for ch in id.chars() {
        assert!(SAFE_ALPHABET.contains(&ch), "unexpected character in request id: {ch}");
    }
}

#[test]
fn ids_do_not_repeat() {
    assert_ne!(request_id(), request_id());
}
