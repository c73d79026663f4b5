use anchorchain_canonical::{
    block_header_hash, canonical_bytes, genesis_merkle_root, merkle_root_of_leaves, sha256_hex,
    CalendarDate, Digest, HeaderFields, Timestamp,
};
use serde::Serialize;

#[test]
fn genesis_root_is_sha256_of_literal() {
    assert_eq!(
        genesis_merkle_root().as_str(),
        "901131d838b17aac0f7885b81e03cbdc9f5157a00343d30ab22083685ed1416a"
    );
}

#[test]
fn two_leaves_hash_their_hex_concatenation() {
    let root = merkle_root_of_leaves(vec![sha256_hex("a"), sha256_hex("b")]);
    assert_eq!(
        root.as_str(),
        "62af5c3cb8da3e4f25061e829ebeea5c7513c54949115b1acc225930a90154da"
    );
}

#[test]
fn odd_leaf_is_paired_with_itself() {
    let root = merkle_root_of_leaves(vec![sha256_hex("a"), sha256_hex("b"), sha256_hex("c")]);
    assert_eq!(
        root.as_str(),
        "0bdf27bf7ec894ca7cadfe491ec1a3ece840f117989e8c5e9bd7086467bf6c38"
    );
}

#[test]
fn leaf_order_changes_the_root() {
    let forward = merkle_root_of_leaves(vec![sha256_hex("a"), sha256_hex("b")]);
    let reversed = merkle_root_of_leaves(vec![sha256_hex("b"), sha256_hex("a")]);
    assert_ne!(forward, reversed);
}

#[test]
fn header_hash_matches_pipe_delimited_layout() {
    let previous = Digest::zero();
    let timestamp = Timestamp::parse("2024-06-01T10:00:00.000Z").unwrap();
    let root = genesis_merkle_root();
    let date = CalendarDate::parse("2024-06-01").unwrap();
    let fields = HeaderFields {
        index: 1,
        previous_hash: &previous,
        timestamp: &timestamp,
        merkle_root: &root,
        date: &date,
    };

    assert_eq!(
        block_header_hash(&fields, 7).as_str(),
        "aeb827eb2cb470027d94f77ade365909d990eff58680c72a0736fe4679229c59"
    );
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnchorRecord {
    code_id: &'static str,
    anchor_hash: &'static str,
}

#[test]
fn canonical_bytes_follow_declaration_order() {
    let record = AnchorRecord {
        code_id: "X",
        anchor_hash: "Y",
    };
    let bytes = canonical_bytes(&record).unwrap();
    assert_eq!(bytes, br#"{"codeId":"X","anchorHash":"Y"}"#.to_vec());
    assert_eq!(
        sha256_hex(&bytes).as_str(),
        sha256_hex(r#"{"codeId":"X","anchorHash":"Y"}"#).as_str()
    );
}
