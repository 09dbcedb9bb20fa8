use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::catalog::{Condition, MediaFormat};

/// The four pages of the sell wizard. Persisted as the numbers 1 through 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum WizardStep {
    #[default]
    Details,
    ConditionPrice,
    MediaDescription,
    Review,
}

impl WizardStep {
    pub fn number(&self) -> u8 {
        match self {
            Self::Details => 1,
            Self::ConditionPrice => 2,
            Self::MediaDescription => 3,
            Self::Review => 4,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Details),
            2 => Some(Self::ConditionPrice),
            3 => Some(Self::MediaDescription),
            4 => Some(Self::Review),
            _ => None,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Details => Self::ConditionPrice,
            Self::ConditionPrice => Self::MediaDescription,
            Self::MediaDescription | Self::Review => Self::Review,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Self::Details | Self::ConditionPrice => Self::Details,
            Self::MediaDescription => Self::ConditionPrice,
            Self::Review => Self::MediaDescription,
        }
    }

    /// Steps up to and including this one.
    pub fn through(&self) -> Vec<WizardStep> {
        (1..=self.number()).filter_map(Self::from_number).collect()
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Details => "details",
            Self::ConditionPrice => "condition & price",
            Self::MediaDescription => "media & description",
            Self::Review => "review",
        };
        write!(f, "step {} ({name})", self.number())
    }
}

impl Serialize for WizardStep {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.number())
    }
}

impl<'de> Deserialize<'de> for WizardStep {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let n = u8::deserialize(deserializer)?;
        Self::from_number(n).ok_or_else(|| {
            serde::de::Error::invalid_value(serde::de::Unexpected::Unsigned(n.into()), &"1..=4")
        })
    }
}

/// Partially filled listing form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DraftForm {
    pub title: String,
    pub artist: String,
    pub format: Option<MediaFormat>,
    pub year: Option<i32>,
    pub genre: String,
    pub condition: Option<Condition>,
    pub price: Option<f64>,
    pub description: String,
}

impl DraftForm {
    /// Names of the fields still blocking `step`.
    pub fn missing_fields(&self, step: WizardStep) -> Vec<&'static str> {
        let mut missing = Vec::new();
        match step {
            WizardStep::Details => {
                if self.title.trim().is_empty() {
                    missing.push("title");
                }
                if self.artist.trim().is_empty() {
                    missing.push("artist");
                }
                if self.format.is_none() {
                    missing.push("format");
                }
            }
            WizardStep::ConditionPrice => {
                if self.condition.is_none() {
                    missing.push("condition");
                }
                if !matches!(self.price, Some(p) if p.is_finite() && p > 0.0) {
                    missing.push("price");
                }
            }
            WizardStep::MediaDescription | WizardStep::Review => {}
        }
        missing
    }

    pub fn is_step_complete(&self, step: WizardStep) -> bool {
        self.missing_fields(step).is_empty()
    }

    pub fn is_complete(&self) -> bool {
        WizardStep::Review
            .through()
            .into_iter()
            .all(|step| self.is_step_complete(step))
    }
}

/// What lands under the draft slot when the seller saves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftState {
    pub form_data: DraftForm,
    pub current_step: WizardStep,
    pub image_preview: Option<String>,
    pub saved_at: String,
}
