//! Request field binding
//!
//! Browsers post HTML forms, scripts post JSON, and GET lookups use the
//! query string. `FormFields` collapses all of them into one multimap so
//! handlers read `addedCoinIds` the same way whether it arrived as
//! `addedCoinIds=1&addedCoinIds=2`, `addedCoinIds[]=1`, `[1, 2]`, `1` or `"1,2"`.

use std::collections::BTreeMap;
use std::str::FromStr;

use axum::extract::{Form, FromRequest, Json, Query, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::Method;
use serde_json::Value;

use super::error::ApiError;
use crate::models::ValidationError;

/// Field name -> submitted values, in submission order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormFields {
    fields: BTreeMap<String, Vec<String>>,
}

impl FormFields {
    /// Build from decoded `key=value` pairs. A trailing `[]` on a key is dropped.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut fields = Self::default();
        for (key, value) in pairs {
            fields.push(key.as_ref(), value.into());
        }
        fields
    }

    /// Build from a JSON object. `null` counts as absent; nested objects are refused.
    pub fn from_json(value: Value) -> Result<Self, ApiError> {
        let Value::Object(map) = value else {
            return Err(ApiError::Malformed {
                message: "request body must be a JSON object".to_string(),
            });
        };

        let mut fields = Self::default();
        for (key, value) in map {
            match value {
                Value::Array(items) => {
                    for item in items {
                        if let Some(text) = scalar_text(&key, item)? {
                            fields.push(&key, text);
                        }
                    }
                }
                other => {
                    if let Some(text) = scalar_text(&key, other)? {
                        fields.push(&key, text);
                    }
                }
            }
        }
        Ok(fields)
    }

    fn push(&mut self, key: &str, value: String) {
        let key = key.strip_suffix("[]").unwrap_or(key);
        self.fields.entry(key.to_string()).or_default().push(value);
    }

    fn merge(&mut self, other: Self) {
        for (key, values) in other.fields {
            self.fields.entry(key).or_default().extend(values);
        }
    }

    /// All raw values submitted for a field.
    pub fn values(&self, name: &str) -> &[String] {
        self.fields.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First value of a field, untrimmed.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.values(name).first().map(String::as_str)
    }

    /// First value of a field, trimmed, treating blank as absent.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.text(name).map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn required_text(&self, field: &'static str) -> Result<&str, ValidationError> {
        self.text(field).ok_or(ValidationError::Missing { field })
    }

    /// Parse the first value. Absent or blank is `None`.
    pub fn parse<T: FromStr>(&self, field: &'static str) -> Result<Option<T>, ValidationError> {
        match self.lookup(field) {
            None => Ok(None),
            Some(raw) => raw.parse().map(Some).map_err(|_| ValidationError::InvalidValue {
                field,
                value: raw.to_string(),
            }),
        }
    }

    pub fn required<T: FromStr>(&self, field: &'static str) -> Result<T, ValidationError> {
        self.parse(field)?.ok_or(ValidationError::Missing { field })
    }

    /// Every value of a field, with comma-separated values split. Must not be empty.
    pub fn list<T: FromStr>(&self, field: &'static str) -> Result<Vec<T>, ValidationError> {
        let mut out = Vec::new();
        for raw in self
            .values(field)
            .iter()
            .flat_map(|v| v.split(','))
            .map(str::trim)
            .filter(|v| !v.is_empty())
        {
            let parsed = raw.parse().map_err(|_| ValidationError::InvalidValue {
                field,
                value: raw.to_string(),
            })?;
            out.push(parsed);
        }

        if out.is_empty() {
            return Err(ValidationError::Missing { field });
        }
        Ok(out)
    }

    /// Boolean field. The last value wins, so a hidden `false` input
    /// followed by a checked checkbox reads as `true`.
    pub fn flag(&self, field: &'static str) -> Result<Option<bool>, ValidationError> {
        let Some(raw) = self.values(field).last().map(|v| v.trim()) else {
            return Ok(None);
        };
        match raw.to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "true" | "on" | "1" | "yes" => Ok(Some(true)),
            "false" | "off" | "0" | "no" => Ok(Some(false)),
            _ => Err(ValidationError::InvalidValue {
                field,
                value: raw.to_string(),
            }),
        }
    }
}

fn scalar_text(key: &str, value: Value) -> Result<Option<String>, ApiError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Array(_) | Value::Object(_) => Err(ApiError::Malformed {
            message: format!("field '{}' must be a scalar or a list of scalars", key),
        }),
    }
}

fn query_fields(req: &Request) -> Result<FormFields, ApiError> {
    let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(req.uri()).map_err(|e| {
        ApiError::Malformed {
            message: e.body_text(),
        }
    })?;
    Ok(FormFields::from_pairs(pairs))
}

impl<S> FromRequest<S> for FormFields
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut fields = query_fields(&req)?;
        if req.method() == Method::GET || req.method() == Method::HEAD {
            return Ok(fields);
        }

        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_ascii_lowercase);

        match content_type.as_deref() {
            None => {}
            Some(ct) if ct.starts_with("application/json") => {
                let Json(value) = Json::<Value>::from_request(req, state)
                    .await
                    .map_err(|e| ApiError::Malformed {
                        message: e.body_text(),
                    })?;
                fields.merge(Self::from_json(value)?);
            }
            Some(ct) if ct.starts_with("application/x-www-form-urlencoded") => {
                let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                    .await
                    .map_err(|e| ApiError::Malformed {
                        message: e.body_text(),
                    })?;
                fields.merge(Self::from_pairs(pairs));
            }
            Some(other) => {
                return Err(ApiError::Malformed {
                    message: format!("unsupported content type '{}'", other),
                })
            }
        }

        Ok(fields)
    }
}
