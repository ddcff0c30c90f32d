//! Wire shapes of `POST /check-farm`.

use crate::pipeline::ClassificationResponse;
use crate::taxonomy::LandCoverClass;
use fcheck_derive::api_model;

#[api_model(deny_unknown_fields = false)]
/// Polygon to check
pub struct CheckFarmRequest {
    /// Ring of at least three `[x, y]` pairs (longitude, latitude); closing it is optional
    #[cfg_attr(feature = "server", schema(example = json!([[30.52, 50.45], [30.53, 50.45], [30.53, 50.46]])))]
    pub coordinates: Vec<Vec<f64>>,
}

#[api_model]
/// Land-cover classification of a polygon
pub struct CheckFarmResponse {
    /// Majority class is cropland and its area qualifies
    pub farm: bool,
    /// Majority class is forest and its area qualifies
    pub forest: bool,
    /// Label of the majority class, e.g. `cropland` or `water`
    pub r#type: String,
    /// Area in square meters, for qualifying classes
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub area_sq_meters: Option<f64>,
    /// Area in acres, for qualifying classes
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub area_acres: Option<f64>,
    /// Why no area was measured
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
}

impl From<ClassificationResponse> for CheckFarmResponse {
    fn from(response: ClassificationResponse) -> Self {
        match response {
            ClassificationResponse::Qualifying(measured) => {
                let (class, area) = (measured.class(), measured.area());
                Self {
                    farm: class == LandCoverClass::Cropland,
                    forest: class == LandCoverClass::Forest,
                    r#type: class.label().to_owned(),
                    area_sq_meters: Some(area.square_meters()),
                    area_acres: Some(area.acres()),
                    message: None,
                }
            },
            ClassificationResponse::NonQualifying { class, message } => Self {
                farm: false,
                forest: false,
                r#type: class.label().to_owned(),
                area_sq_meters: None,
                area_acres: None,
                message: Some(message),
            },
        }
    }
}
