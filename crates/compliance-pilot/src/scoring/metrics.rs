use serde::{Deserialize, Serialize};
use std::fmt;

/// The four weighted compliance dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Ccr,
    Otf,
    Cvf,
    Paf,
}

impl Dimension {
    pub const fn ordered() -> [Self; 4] {
        [Self::Ccr, Self::Otf, Self::Cvf, Self::Paf]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Ccr => "ccr",
            Self::Otf => "otf",
            Self::Cvf => "cvf",
            Self::Paf => "paf",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Ccr => "Completion Rate",
            Self::Otf => "On-Time Factor",
            Self::Cvf => "Cert Validity",
            Self::Paf => "Policy Ack",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Dimension weights in whole percentage points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OclWeights {
    pub ccr: u32,
    pub otf: u32,
    pub cvf: u32,
    pub paf: u32,
}

impl OclWeights {
    pub const fn weight(&self, dimension: Dimension) -> u32 {
        match dimension {
            Dimension::Ccr => self.ccr,
            Dimension::Otf => self.otf,
            Dimension::Cvf => self.cvf,
            Dimension::Paf => self.paf,
        }
    }

    pub const fn total(&self) -> u32 {
        self.ccr + self.otf + self.cvf + self.paf
    }

    pub fn fraction(&self, dimension: Dimension) -> f32 {
        self.weight(dimension) as f32 / 100.0
    }
}

pub const OCL_WEIGHTS: OclWeights = OclWeights {
    ccr: 40,
    otf: 20,
    cvf: 25,
    paf: 15,
};

const _: () = assert!(OCL_WEIGHTS.total() == 100);

pub const METRIC_MIN: i32 = 0;
pub const METRIC_MAX: i32 = 100;

/// Per-dimension scores, each guaranteed to lie in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawComplianceMetrics")]
pub struct ComplianceMetrics {
    ccr: u8,
    otf: u8,
    cvf: u8,
    paf: u8,
}

impl ComplianceMetrics {
    pub fn new(ccr: i32, otf: i32, cvf: i32, paf: i32) -> Result<Self, InvalidMetricsError> {
        Ok(Self {
            ccr: checked(Dimension::Ccr, ccr)?,
            otf: checked(Dimension::Otf, otf)?,
            cvf: checked(Dimension::Cvf, cvf)?,
            paf: checked(Dimension::Paf, paf)?,
        })
    }

    /// Demo figures standing in for learning-management data.
    pub const fn mock() -> Self {
        Self {
            ccr: 94,
            otf: 87,
            cvf: 91,
            paf: 88,
        }
    }

    pub const fn ccr(&self) -> u8 {
        self.ccr
    }

    pub const fn otf(&self) -> u8 {
        self.otf
    }

    pub const fn cvf(&self) -> u8 {
        self.cvf
    }

    pub const fn paf(&self) -> u8 {
        self.paf
    }

    pub const fn value(&self, dimension: Dimension) -> u8 {
        match dimension {
            Dimension::Ccr => self.ccr,
            Dimension::Otf => self.otf,
            Dimension::Cvf => self.cvf,
            Dimension::Paf => self.paf,
        }
    }
}

fn checked(dimension: Dimension, value: i32) -> Result<u8, InvalidMetricsError> {
    if (METRIC_MIN..=METRIC_MAX).contains(&value) {
        Ok(value as u8)
    } else {
        Err(InvalidMetricsError { dimension, value })
    }
}

#[derive(Debug, Deserialize)]
struct RawComplianceMetrics {
    ccr: i32,
    otf: i32,
    cvf: i32,
    paf: i32,
}

impl TryFrom<RawComplianceMetrics> for ComplianceMetrics {
    type Error = InvalidMetricsError;

    fn try_from(raw: RawComplianceMetrics) -> Result<Self, Self::Error> {
        Self::new(raw.ccr, raw.otf, raw.cvf, raw.paf)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("metric {dimension} must be within 0..=100, got {value}")]
pub struct InvalidMetricsError {
    pub dimension: Dimension,
    pub value: i32,
}

/// Weighted composite of the four dimensions, rounded half away from zero.
///
/// Works in hundredths of a point so the result does not depend on float
/// representation of the weights: `{94, 87, 91, 88}` sums to exactly 90.95 and
/// rounds to 91.
pub fn compute_ocl(metrics: &ComplianceMetrics) -> i32 {
    let hundredths: u32 = Dimension::ordered()
        .into_iter()
        .map(|dimension| u32::from(metrics.value(dimension)) * OCL_WEIGHTS.weight(dimension))
        .sum();

    ((hundredths + 50) / 100) as i32
}
