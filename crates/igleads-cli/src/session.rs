//! The profile an operator is currently working on.
//!
//! A session exists only for a profile that passed the lead gate. It is
//! handed from one command to the next through the draft store rather than
//! living in process-wide state.

use igleads_core::{
    evaluate, normalize_manual, normalize_with, score, CoreError, DraftStore, GateOutcome,
    GatePolicy, Gender, NormalizeOptions, NormalizedProfile, Rejection,
};
use serde_json::{json, Value};

/// Annotations supplied on the command line. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ManualInput {
    pub gender: Option<Gender>,
    pub niches: Option<Vec<String>>,
    pub location: Option<String>,
    /// On the scale of the configured schema revision.
    pub aesthetics_score: Option<f64>,
}

#[derive(Debug, Clone)]
pub(crate) struct Session {
    profile: NormalizedProfile,
    options: NormalizeOptions,
}

impl Session {
    /// Normalizes `raw` and opens a session if it passes `policy`.
    pub(crate) fn from_scrape(
        raw: &Value,
        options: NormalizeOptions,
        policy: &GatePolicy,
    ) -> Result<Self, Rejection> {
        let profile = normalize_with(raw, &options);
        Self::from_profile(profile, options, policy)
    }

    pub(crate) fn from_profile(
        profile: NormalizedProfile,
        options: NormalizeOptions,
        policy: &GatePolicy,
    ) -> Result<Self, Rejection> {
        match evaluate(&profile, policy) {
            GateOutcome::Accepted { .. } => Ok(Self { profile, options }),
            GateOutcome::Rejected(rejection) => Err(rejection),
        }
    }

    /// Reopens the saved draft, if any. The gate is not re-applied: a draft
    /// only exists for a profile that already passed it.
    pub(crate) fn resume(
        store: &impl DraftStore,
        options: NormalizeOptions,
    ) -> Result<Option<Self>, CoreError> {
        Ok(store.load()?.map(|profile| Self { profile, options }))
    }

    /// Merges `input` over the current annotations and re-normalizes the
    /// manual block, so blank niches are dropped and the score is clamped.
    pub(crate) fn annotate(&mut self, input: &ManualInput) -> &NormalizedProfile {
        let current = &self.profile.manual;
        let gender = input.gender.unwrap_or(current.gender);
        let niches = input
            .niches
            .clone()
            .unwrap_or_else(|| current.niches.clone());
        let location = input
            .location
            .clone()
            .unwrap_or_else(|| current.location.clone());
        let aesthetics = input
            .aesthetics_score
            .unwrap_or_else(|| f64::from(current.aesthetics_score));

        let raw = json!({
            "schemaVersion": self.options.schema.tag(),
            "manual": {
                "gender": gender.to_string(),
                "niches": niches,
                "location": location,
                "aestheticsScore": aesthetics,
            }
        });
        self.profile.manual = normalize_manual(&raw, &self.options);
        tracing::debug!(username = %self.profile.username(), "session annotated");
        &self.profile
    }

    pub(crate) fn profile(&self) -> &NormalizedProfile {
        &self.profile
    }

    pub(crate) fn score(&self) -> f64 {
        score(&self.profile)
    }

    /// # Errors
    ///
    /// Returns [`CoreError`] if the draft cannot be written.
    pub(crate) fn save(&self, store: &mut impl DraftStore) -> Result<(), CoreError> {
        store.save(&self.profile)
    }

    /// Ends the session and removes its draft.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError`] if the draft cannot be removed.
    pub(crate) fn clear(self, store: &mut impl DraftStore) -> Result<(), CoreError> {
        store.clear()?;
        tracing::debug!(username = %self.profile.username(), "session cleared");
        Ok(())
    }

    pub(crate) fn into_profile(self) -> NormalizedProfile {
        self.profile
    }
}
