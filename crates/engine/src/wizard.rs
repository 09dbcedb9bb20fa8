//! Four-step sell wizard.
//!
//! Editing the form is purely in memory. The draft slot is written only by
//! an explicit [`Marketplace::save_draft`] and cleared by publish or discard.

use chrono::Datelike;
use cratedigger_core::{
    DraftForm, DraftState, ListingId, PublishedListing, WizardStep, clock,
};
use cratedigger_storage::{KvWrite, keys};
use tracing::{debug, info, instrument};

use crate::Marketplace;
use crate::error::EngineError;
use crate::feedback::Feedback;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingWizard {
    form: DraftForm,
    step: WizardStep,
    image_preview: Option<String>,
}

impl ListingWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: DraftState) -> Self {
        Self {
            form: state.form_data,
            step: state.current_step,
            image_preview: state.image_preview,
        }
    }

    pub fn to_state(&self, saved_at: String) -> DraftState {
        DraftState {
            form_data: self.form.clone(),
            current_step: self.step,
            image_preview: self.image_preview.clone(),
            saved_at,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn form(&self) -> &DraftForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut DraftForm {
        &mut self.form
    }

    pub fn image_preview(&self) -> Option<&str> {
        self.image_preview.as_deref()
    }

    /// Usually a `data:` URI of the uploaded cover.
    pub fn set_image_preview(&mut self, preview: impl Into<String>) {
        self.image_preview = Some(preview.into());
    }

    pub fn clear_image(&mut self) {
        self.image_preview = None;
    }

    /// Advance one step if the current one is complete. Review is terminal.
    pub fn next(&mut self) -> Result<WizardStep, EngineError> {
        let missing = self.form.missing_fields(self.step);
        if !missing.is_empty() {
            return Err(EngineError::ValidationIncomplete {
                step: self.step,
                missing,
            });
        }
        self.step = self.step.next();
        Ok(self.step)
    }

    pub fn previous(&mut self) -> WizardStep {
        self.step = self.step.previous();
        self.step
    }

    /// Publishing needs the review step and every earlier step complete.
    pub fn check_publishable(&self) -> Result<(), EngineError> {
        if self.step != WizardStep::Review {
            return Err(EngineError::PublishNotReady { step: self.step });
        }
        for step in WizardStep::Review.through() {
            let missing = self.form.missing_fields(step);
            if !missing.is_empty() {
                return Err(EngineError::ValidationIncomplete { step, missing });
            }
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// How the wizard came up when the sell page was opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardMount {
    Restored { saved_at: String, step: WizardStep },
    Fresh,
}

impl WizardMount {
    /// Only a restored draft is announced.
    pub fn feedback(&self) -> Option<Feedback> {
        match self {
            Self::Restored { .. } => Some(Feedback::success(
                "Draft Restored",
                "Your previous listing draft has been restored.",
            )),
            Self::Fresh => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftSaved {
    pub saved_at: String,
    pub step: WizardStep,
}

impl From<&DraftSaved> for Feedback {
    fn from(_: &DraftSaved) -> Self {
        Feedback::success(
            "Draft Saved",
            "Your listing draft has been saved. You can continue later.",
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListingPublished {
    pub listing: PublishedListing,
}

impl ListingPublished {
    pub fn id(&self) -> ListingId {
        self.listing.id
    }
}

impl From<&ListingPublished> for Feedback {
    fn from(published: &ListingPublished) -> Self {
        Feedback::success(
            "Album Listed Successfully!",
            format!(
                "{} by {} has been added to the marketplace.",
                published.listing.title, published.listing.artist
            ),
        )
    }
}

impl Marketplace {
    pub fn wizard(&self) -> &ListingWizard {
        &self.wizard
    }

    pub fn wizard_mut(&mut self) -> &mut ListingWizard {
        &mut self.wizard
    }

    pub fn has_saved_draft(&self) -> bool {
        self.store
            .read_json_opt::<DraftState>(keys::ALBUM_DRAFT)
            .is_some()
    }

    /// Load the saved draft into the wizard, or start fresh if there is none.
    #[instrument(skip(self))]
    pub fn mount_wizard(&mut self) -> WizardMount {
        match self.store.read_json_opt::<DraftState>(keys::ALBUM_DRAFT) {
            Some(state) => {
                let mount = WizardMount::Restored {
                    saved_at: state.saved_at.clone(),
                    step: state.current_step,
                };
                self.wizard = ListingWizard::from_state(state);
                debug!(step = %self.wizard.step(), "draft restored");
                mount
            }
            None => {
                self.wizard.reset();
                WizardMount::Fresh
            }
        }
    }

    #[instrument(skip(self), fields(step = %self.wizard.step()))]
    pub fn save_draft(&mut self) -> Result<DraftSaved, EngineError> {
        let (_, saved_at) = self.timestamp()?;
        let state = self.wizard.to_state(saved_at.clone());
        self.store.write_json(keys::ALBUM_DRAFT, &state);
        info!(%saved_at, "draft saved");
        Ok(DraftSaved {
            saved_at,
            step: state.current_step,
        })
    }

    #[instrument(skip(self))]
    pub fn discard_draft(&mut self) {
        self.store.remove(keys::ALBUM_DRAFT);
        self.wizard.reset();
        debug!("draft discarded");
    }

    /// Turn the reviewed draft into a listing, clear the draft slot and reset
    /// the wizard. Nothing is written if validation fails.
    #[instrument(skip(self), fields(step = %self.wizard.step()))]
    pub fn publish_draft(&mut self) -> Result<ListingPublished, EngineError> {
        if let Err(e) = self.wizard.check_publishable() {
            debug!(error = %e, "publish rejected");
            return Err(e);
        }
        let listing = self.build_listing()?;

        let mut listings = self.listings();
        listings.push(listing.clone());
        self.store.write_batch(&[
            KvWrite::json(keys::USER_ALBUMS, &listings)?,
            KvWrite::remove(keys::ALBUM_DRAFT),
        ]);
        self.wizard.reset();

        info!(listing = %listing.id, title = %listing.title, "listing published");
        Ok(ListingPublished { listing })
    }

    fn build_listing(&mut self) -> Result<PublishedListing, EngineError> {
        let form = self.wizard.form();
        let (Some(format), Some(condition), Some(price)) = (form.format, form.condition, form.price)
        else {
            let step = if form.format.is_none() {
                WizardStep::Details
            } else {
                WizardStep::ConditionPrice
            };
            return Err(EngineError::ValidationIncomplete {
                step,
                missing: form.missing_fields(step),
            });
        };
        let explicit_year = form.year;

        let (ms, listed_at) = self.timestamp()?;
        let year = match explicit_year {
            Some(year) => year,
            None => clock::calendar_date(ms)?.year(),
        };

        let form = self.wizard.form();
        Ok(PublishedListing {
            id: ListingId::new(),
            title: form.title.trim().to_string(),
            artist: form.artist.trim().to_string(),
            format,
            price,
            condition,
            year,
            genre: form.genre.clone(),
            description: form.description.clone(),
            rating: self.config.default_rating,
            image_url: self
                .wizard
                .image_preview()
                .map_or_else(|| self.config.default_cover_url.clone(), str::to_string),
            is_premium: false,
            is_auction: false,
            listed_at,
        })
    }
}
