//! Named form regions loaded from JSON.

use std::path::Path;

use crate::config::RegionFilterConfig;
use crate::error::RecognizeError;
use crate::geometry::Stroke;
use crate::region::Region;

pub const LAYOUT_SCHEMA_V1: &str = "inkmark.layout.v1";

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct RegionSpec {
    name: String,
    /// `[left, top, right, bottom]`.
    bounds: [i32; 4],
    #[serde(default)]
    extension: i32,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct RegionLayoutSpecV1 {
    schema: String,
    regions: Vec<RegionSpec>,
}

/// A region with the name it has in the layout.
#[derive(Debug, Clone)]
pub struct NamedRegion {
    pub name: String,
    pub region: Region,
}

/// The marked layout: an ordered list of named regions.
#[derive(Debug, Clone, Default)]
pub struct RegionLayout {
    regions: Vec<NamedRegion>,
}

impl RegionLayout {
    pub fn regions(&self) -> &[NamedRegion] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Apply `filter` to every region.
    pub fn with_filter(mut self, filter: &RegionFilterConfig) -> Self {
        for named in &mut self.regions {
            named.region.filter = filter.clone();
        }
        self
    }

    /// Offer `stroke` to every region and return how many accepted it.
    ///
    /// Each region filters its own copy, so one region's duplicate removal
    /// never changes what another region sees.
    pub fn route_stroke(&mut self, stroke: &Stroke, min_length: f64) -> Result<usize, RecognizeError> {
        let mut accepted = 0;
        for named in &mut self.regions {
            let mut copy = stroke.clone();
            if named.region.add_stroke(&mut copy, min_length)? {
                tracing::trace!("stroke {} -> region '{}'", stroke.id, named.name);
                accepted += 1;
            }
        }
        Ok(accepted)
    }

    pub fn from_json_str(data: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let spec: RegionLayoutSpecV1 = serde_json::from_str(data)?;
        Self::from_layout_spec(spec).map_err(Into::into)
    }

    /// Load a region layout from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    fn from_layout_spec(spec: RegionLayoutSpecV1) -> Result<Self, String> {
        if spec.schema != LAYOUT_SCHEMA_V1 {
            return Err(format!(
                "unsupported layout schema '{}' (expected '{}')",
                spec.schema, LAYOUT_SCHEMA_V1
            ));
        }
        validate_regions(&spec.regions)?;

        let regions = spec
            .regions
            .into_iter()
            .map(|r| {
                let [left, top, right, bottom] = r.bounds;
                NamedRegion {
                    name: r.name,
                    region: Region::new(left, top, right, bottom, r.extension),
                }
            })
            .collect();
        Ok(Self { regions })
    }
}

fn validate_regions(regions: &[RegionSpec]) -> Result<(), String> {
    if regions.is_empty() {
        return Err("layout must contain at least one region".to_string());
    }
    let mut seen = std::collections::HashSet::new();
    for r in regions {
        if r.name.trim().is_empty() {
            return Err("region name must not be empty".to_string());
        }
        if !seen.insert(r.name.as_str()) {
            return Err(format!("duplicate region name '{}'", r.name));
        }
        let [left, top, right, bottom] = r.bounds;
        if left > right || top > bottom {
            return Err(format!("region '{}' has inverted bounds", r.name));
        }
        if r.extension < 0 {
            return Err(format!("region '{}' has a negative extension", r.name));
        }
    }
    Ok(())
}
