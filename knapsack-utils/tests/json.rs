use knapsack_utils::*;
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Unordered {
    zeta: u32,
    alpha: Vec<Inner>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Inner {
    y: i64,
    x: i64,
}

#[test]
fn test_jsonify_sorts_keys() {
    let obj = Unordered {
        zeta: 1,
        alpha: vec![Inner { y: 2, x: 3 }],
    };
    assert_eq!(
        jsonify(&obj).unwrap(),
        r#"{"alpha":[{"x":3,"y":2}],"zeta":1}"#
    );
}

#[test]
fn test_jsonify_unrepresentable() {
    let mut obj = std::collections::BTreeMap::new();
    obj.insert((1, 2), 3);
    assert!(jsonify(&obj).is_err());
}

#[test]
fn test_dejsonify() {
    let obj: Unordered = dejsonify(r#"{"zeta":7,"alpha":[{"x":1,"y":-1}]}"#).unwrap();
    assert_eq!(
        obj,
        Unordered {
            zeta: 7,
            alpha: vec![Inner { y: -1, x: 1 }],
        }
    );
    assert!(dejsonify::<Unordered>(r#"{"zeta":7}"#).is_err());
}

#[test]
fn test_read_json_arg() {
    assert_eq!(read_json_arg(r#"{"a":1}"#).unwrap(), r#"{"a":1}"#);

    let path = std::env::temp_dir().join(format!("knapsack_utils_{}.json", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(br#"{"b":2}"#).unwrap();
    drop(file);
    assert_eq!(read_json_arg(path.to_str().unwrap()).unwrap(), r#"{"b":2}"#);
    std::fs::remove_file(&path).unwrap();

    assert!(read_json_arg("/nonexistent/dir/missing.json").is_err());
}

#[test]
fn test_u8s_from_str() {
    let a = u8s_from_str("seed");
    assert_eq!(a, u8s_from_str("seed"));
    assert_ne!(a, u8s_from_str("other seed"));
    assert_eq!(a, <[u8; 32]>::from(blake3::hash(b"seed")));
}
