use serde::{Deserialize, Serialize};

use growthchart_core::models::measurement::MeasurementType;
use growthchart_core::models::standard::Standard;

/// One reference file. A file carries both sexes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub standard: Standard,
    pub measurement: MeasurementType,
    /// Path relative to the dataset directory.
    pub file: String,
    /// A missing required file fails the load; a missing optional file is
    /// skipped with a warning.
    #[serde(default)]
    pub required: bool,
}

impl ManifestEntry {
    pub fn new(standard: Standard, measurement: MeasurementType, file: impl Into<String>) -> Self {
        Self {
            standard,
            measurement,
            file: file.into(),
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Declares which reference files make up a dataset bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetManifest {
    pub entries: Vec<ManifestEntry>,
}

impl DatasetManifest {
    /// File layout of the bundled datasets.
    pub fn builtin() -> Self {
        use MeasurementType::*;
        use Standard::*;

        let entry = ManifestEntry::new;
        DatasetManifest {
            entries: vec![
                entry(Who, Weight, "who_weight.json"),
                entry(Who, HeightLength, "who_length.json"),
                entry(Who, HeadCircumference, "who_head.json"),
                entry(Who, Bmi, "who_bmi.json"),
                entry(CdcInfant, Weight, "cdc_infant_weight.json"),
                entry(CdcInfant, HeightLength, "cdc_infant_length.json"),
                entry(CdcInfant, HeadCircumference, "cdc_infant_head.json"),
                entry(CdcChild, Weight, "cdc_child_weight.json"),
                entry(CdcChild, HeightLength, "cdc_child_height.json"),
                entry(CdcChild, Bmi, "cdc_child_bmi.json"),
                entry(Intergrowth, Weight, "intergrowth_weight.json"),
                entry(Intergrowth, HeightLength, "intergrowth_length.json"),
                entry(Intergrowth, HeadCircumference, "intergrowth_head.json"),
            ],
        }
    }

    pub fn new(entries: Vec<ManifestEntry>) -> Self {
        Self { entries }
    }
}

impl Default for DatasetManifest {
    fn default() -> Self {
        Self::builtin()
    }
}
