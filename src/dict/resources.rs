//! Resource mapping for rendered entries.
//!
//! A rendered entry references images as `src="<id>"`. Each distinct id is
//! fetched from the document once and decoded; anything that cannot be
//! shown is left out of the map, and callers treat a missing id as
//! unavailable.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use image::DynamicImage;
use log::{debug, warn};
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;

use crate::dict::types::document::DocumentSource;
use crate::dict::types::error::{DictError, Result};
use crate::dict::types::models::{ResourceBlob, ResourceKind};

/// Compiled regex for normalized resource references, e.g. `src="00012"`.
static RESOURCE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn resource_regex() -> &'static Regex {
    RESOURCE_PATTERN.get_or_init(|| Regex::new(r#"src="(\d+)""#).expect("Invalid resource regex pattern"))
}

/// A resource ready for display.
#[derive(Debug, Clone)]
pub enum DecodedResource {
    Raster(DynamicImage),
    /// SVG source text; rasterizing it is up to the presentation layer.
    Svg(String),
}

/// Resource id (as written in the markup) → decoded resource.
pub type ResourceMap = HashMap<String, DecodedResource>;

/// Distinct resource ids referenced by `markup`, in order of first appearance.
pub fn resource_ids(markup: &str) -> Vec<&str> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut ids: Vec<&str> = Vec::new();
    for cap in resource_regex().captures_iter(markup) {
        if let Some(id) = cap.get(1).map(|m| m.as_str()) {
            if seen.insert(id) {
                ids.push(id);
            }
        }
    }
    ids
}

/// Builds the resource map for a rendered entry.
pub fn extract_resources(source: &dyn DocumentSource, markup: &str) -> ResourceMap {
    let mut map = ResourceMap::new();
    for id in resource_ids(markup) {
        match load_resource(source, id) {
            Ok(Some(resource)) => {
                map.insert(id.to_owned(), resource);
            }
            Ok(None) => {}
            Err(e) => warn!("{}", e),
        }
    }
    debug!("Resolved {} resources for rendered entry", map.len());
    map
}

/// Fetches and decodes a single resource.
///
/// Returns `Ok(None)` for resources that are not images.
fn load_resource(source: &dyn DocumentSource, id: &str) -> Result<Option<DecodedResource>> {
    let uid: u32 = id
        .parse()
        .map_err(|_| DictError::ResourceUnavailable(format!("resource id {} is out of range", id)))?;
    let blob = source
        .resource_by_id(uid)
        .ok_or_else(|| DictError::ResourceUnavailable(format!("no resource for id {}", id)))?;

    if !blob.kind.is_image() {
        debug!("Ignoring resource {} of type {}", id, blob.kind);
        return Ok(None);
    }

    decode_image(blob)
        .map(Some)
        .map_err(|reason| DictError::ResourceUnavailable(format!("failed to load image for {}: {}", id, reason)))
}

/// Decodes an image blob according to its declared kind.
pub fn decode_image(blob: &ResourceBlob) -> std::result::Result<DecodedResource, String> {
    match blob.kind.raster_format() {
        Some(format) => image::load_from_memory_with_format(&blob.data, format)
            .map(DecodedResource::Raster)
            .map_err(|e| e.to_string()),
        None if blob.kind == ResourceKind::Svg => decode_svg(&blob.data),
        None => Err(format!("{} is not an image type", blob.kind)),
    }
}

/// Accepts SVG data when it is UTF-8 text whose root element is `<svg>`.
fn decode_svg(data: &[u8]) -> std::result::Result<DecodedResource, String> {
    let text = std::str::from_utf8(data).map_err(|e| format!("SVG is not UTF-8: {}", e))?;
    let mut reader = Reader::from_str(text);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                return if e.local_name().as_ref() == b"svg" {
                    Ok(DecodedResource::Svg(text.to_owned()))
                } else {
                    Err(format!(
                        "unexpected root element <{}>",
                        String::from_utf8_lossy(e.name().as_ref())
                    ))
                };
            }
            Ok(Event::Eof) => return Err("no root element found in SVG".to_string()),
            Err(e) => return Err(format!("malformed SVG: {}", e)),
            _ => {}
        }
    }
}
