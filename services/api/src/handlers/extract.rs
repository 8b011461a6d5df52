//! Request extractors that reject with [`ApiError`] instead of axum's defaults.

use std::fmt;

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde::Deserializer;
use serde::de::{self, DeserializeOwned, IgnoredAny, MapAccess, Visitor};

use crate::error::ApiError;

/// JSON request body.
///
/// Unlike `axum::Json` the `Content-Type` header is not checked, every decode
/// failure is a `400` carrying the decoder's message, and only the first JSON
/// value is read: anything after it is ignored.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::InvalidBody(e.body_text()))?;
        match serde_json::Deserializer::from_slice(&bytes)
            .into_iter::<T>()
            .next()
        {
            Some(Ok(value)) => Ok(JsonBody(value)),
            Some(Err(e)) => Err(ApiError::InvalidBody(e.to_string())),
            None => Err(ApiError::InvalidBody("EOF".to_owned())),
        }
    }
}

/// Integer `{id}` path segment.
///
/// Parsed from request parts, so a bad id is reported before the body is read.
/// Any 64-bit integer is accepted; ids outside the storage range simply match
/// no record.
#[derive(Debug, Clone, Copy)]
pub struct RecordId(pub i64);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::InvalidId)?;
        raw.parse().map(RecordId).map_err(|_| ApiError::InvalidId)
    }
}

/// Decode a JSON object down to one string field.
///
/// Keys match `name` ignoring ASCII case and the last match wins. A `null`
/// body or a `null` value leaves the field empty so the caller's presence
/// check reports it. Other keys are skipped.
pub fn string_field<'de, D>(deserializer: D, name: &'static str) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_option(StringFieldVisitor { name })
}

struct StringFieldVisitor {
    name: &'static str,
}

impl<'de> Visitor<'de> for StringFieldVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "an object with a string `{}` field", self.name)
    }

    fn visit_none<E: de::Error>(self) -> Result<String, E> {
        Ok(String::new())
    }

    fn visit_unit<E: de::Error>(self) -> Result<String, E> {
        Ok(String::new())
    }

    fn visit_some<D>(self, deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(self)
    }

    fn visit_map<A>(self, mut map: A) -> Result<String, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut value = String::new();
        while let Some(key) = map.next_key::<String>()? {
            if key.eq_ignore_ascii_case(self.name) {
                if let Some(v) = map.next_value::<Option<String>>()? {
                    value = v;
                }
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(value)
    }
}
