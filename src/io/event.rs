//! Parsing of bucket notification events

use crate::io::error::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Notification {
    #[serde(rename = "Records", default)]
    records: Vec<Record>,
}

#[derive(Debug, Deserialize)]
struct Record {
    s3: Entity,
}

#[derive(Debug, Deserialize)]
struct Entity {
    bucket: BucketEntity,
    object: ObjectEntity,
}

#[derive(Debug, Deserialize)]
struct BucketEntity {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ObjectEntity {
    key: String,
}

/// Location of an object named by a storage event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    /// Bucket holding the object
    pub bucket: String,
    /// Decoded object key
    pub key: String,
}

impl ObjectRef {
    /// Last path segment of the key
    pub fn file_name(&self) -> &str {
        self.key.rsplit('/').next().unwrap_or(&self.key)
    }

    /// File name up to its first `.`
    pub fn base_name(&self) -> &str {
        let file_name = self.file_name();
        file_name.split('.').next().unwrap_or(file_name)
    }
}

/// Extract every object reference from a notification document
///
/// A document without records yields an empty list.
///
/// # Errors
///
/// Returns an error if the document is not valid JSON or a record lacks its
/// bucket name or object key
pub fn parse_event(json: &str) -> Result<Vec<ObjectRef>> {
    let notification: Notification = serde_json::from_str(json)?;
    Ok(notification
        .records
        .into_iter()
        .map(|record| ObjectRef {
            bucket: record.s3.bucket.name,
            key: decode_key(&record.s3.object.key),
        })
        .collect())
}

/// Decode a form-encoded object key: `+` becomes a space and `%XX` a byte
///
/// Malformed escapes are kept literally and invalid UTF-8 is replaced.
pub fn decode_key(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut index = 0;

    while let Some(&byte) = bytes.get(index) {
        match byte {
            b'+' => {
                decoded.push(b' ');
                index += 1;
            }
            b'%' => {
                let escaped = bytes
                    .get(index + 1..index + 3)
                    .filter(|hex| hex.iter().all(u8::is_ascii_hexdigit))
                    .and_then(|hex| std::str::from_utf8(hex).ok())
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok());
                if let Some(value) = escaped {
                    decoded.push(value);
                    index += 3;
                } else {
                    decoded.push(byte);
                    index += 1;
                }
            }
            _ => {
                decoded.push(byte);
                index += 1;
            }
        }
    }

    String::from_utf8_lossy(&decoded).into_owned()
}
