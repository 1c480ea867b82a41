//! Serde adapter that encodes a byte vector as a lower-case hex string.
//!
//! Used with `#[serde(with = "merkledag_types::hex_bytes")]` so that byte
//! fields render the same way in every serialised object.

use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S, T>(bytes: T, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: AsRef<[u8]>,
{
    serializer.serialize_str(&hex::encode(bytes.as_ref()))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    hex::decode(&s).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Wrapper {
        #[serde(with = "super")]
        data: Vec<u8>,
    }

    #[test]
    fn encodes_as_hex_string() {
        let w = Wrapper {
            data: b"blob".to_vec(),
        };
        let json = serde_json::to_string(&w).unwrap();
        assert_eq!(json, r#"{"data":"626c6f62"}"#);
    }

    #[test]
    fn empty_bytes_encode_as_empty_string() {
        let w = Wrapper { data: Vec::new() };
        assert_eq!(serde_json::to_string(&w).unwrap(), r#"{"data":""}"#);
    }

    #[test]
    fn rejects_non_hex() {
        let err = serde_json::from_str::<Wrapper>(r#"{"data":"zz"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn decodes_what_it_encodes() {
        let w = Wrapper {
            data: vec![0, 1, 0xfe, 0xff],
        };
        let json = serde_json::to_string(&w).unwrap();
        let back: Wrapper = serde_json::from_str(&json).unwrap();
        assert_eq!(w, back);
    }
}
