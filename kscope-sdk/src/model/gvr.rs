use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GvrError;
use crate::model::meta::{ApiResource, GroupVersion, GroupVersionResource};

/// A resource kind written as `group/version/resource[:subresource]`.
///
/// The group may be omitted for core resources (`v1/pods`) and the version
/// may be omitted as well (`nodes`). The original text is kept and is what
/// `Display` renders back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Gvr {
    raw: String,
    group: String,
    version: String,
    resource: String,
    sub_resource: String,
}

impl Gvr {
    /// Parses a gvr string.
    pub fn new(gvr: &str) -> Result<Self, GvrError> {
        let mut path = gvr;
        let mut sub_resource = "";

        let tokens: Vec<&str> = gvr.split(':').collect();
        if let [head, sub] = tokens.as_slice() {
            path = *head;
            sub_resource = *sub;
        }

        let tokens: Vec<&str> = path.split('/').collect();
        let (group, version, resource) = match tokens.as_slice() {
            [g, v, r] => (*g, *v, *r),
            [v, r] => ("", *v, *r),
            [r] => ("", "", *r),
            _ => {
                return Err(GvrError::Malformed {
                    input: gvr.to_string(),
                    tokens: tokens.len(),
                })
            }
        };

        Ok(Self {
            raw: gvr.to_string(),
            group: group.to_string(),
            version: version.to_string(),
            resource: resource.to_string(),
            sub_resource: sub_resource.to_string(),
        })
    }

    /// Builds a gvr from a discovery record. Never fails.
    pub fn from_meta(meta: &ApiResource) -> Self {
        Self {
            raw: join_path(&[meta.group.as_str(), meta.version.as_str(), meta.name.as_str()]),
            group: meta.group.clone(),
            version: meta.version.clone(),
            resource: meta.name.clone(),
            sub_resource: String::new(),
        }
    }

    /// Builds a gvr from a `group/version` string and a resource name.
    pub fn from_gv_and_r(gv: &str, resource: &str) -> Result<Self, GvrError> {
        Self::new(&join_path(&[gv, resource]))
    }

    /// Returns a `.` separated descriptor shaped as resource.version.group.
    pub fn as_resource_name(&self) -> String {
        format!("{}.{}.{}", self.resource, self.version, self.group)
    }

    pub fn sub_resource(&self) -> &str {
        &self.sub_resource
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn as_gv(&self) -> GroupVersion {
        GroupVersion::new(&self.group, &self.version)
    }

    pub fn as_gvr(&self) -> GroupVersionResource {
        GroupVersionResource::new(self.to_g(), self.to_v(), self.to_r())
    }

    pub fn to_v(&self) -> &str {
        &self.version
    }

    /// Returns the resource and group names, in that order.
    pub fn to_r_and_g(&self) -> (&str, &str) {
        (&self.resource, &self.group)
    }

    pub fn to_r(&self) -> &str {
        &self.resource
    }

    pub fn to_g(&self) -> &str {
        &self.group
    }
}

impl fmt::Display for Gvr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Gvr {
    type Err = GvrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Gvr {
    type Error = GvrError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for Gvr {
    type Error = GvrError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Gvr> for String {
    fn from(gvr: Gvr) -> Self {
        gvr.raw
    }
}

/// Joins path segments with `/` and cleans the result lexically.
///
/// Empty segments are ignored. Repeated slashes collapse, `.` segments drop
/// out and `..` removes the segment before it. A leading `/` is kept. When
/// every segment is empty the result is empty, and a path that cleans away
/// completely becomes `.`.
pub fn join_path(segments: &[&str]) -> String {
    let joined = segments
        .iter()
        .filter(|segment| !segment.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/");

    if joined.is_empty() {
        return joined;
    }

    let rooted = joined.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for part in joined.split('/') {
        match part {
            "" | "." => {}
            ".." => match parts.last() {
                Some(last) if *last != ".." => {
                    parts.pop();
                }
                // `..` cannot climb above the root
                _ if rooted => {}
                _ => parts.push(".."),
            },
            _ => parts.push(part),
        }
    }

    let cleaned = parts.join("/");
    match (rooted, cleaned.is_empty()) {
        (true, _) => format!("/{}", cleaned),
        (false, true) => ".".to_string(),
        (false, false) => cleaned,
    }
}
