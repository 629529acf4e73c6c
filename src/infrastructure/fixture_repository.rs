// Static fixture repository - samples read once from a JSON file
use crate::application::sample_repository::SampleRepository;
use crate::domain::error::RepositoryError;
use crate::domain::record::RawRecord;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct FixtureFile {
    channels: BTreeMap<String, Vec<RawRecord>>,
}

#[derive(Debug, Clone, Default)]
pub struct FixtureRepository {
    channels: BTreeMap<String, Vec<RawRecord>>,
}

impl FixtureRepository {
    pub fn new(channels: BTreeMap<String, Vec<RawRecord>>) -> Self {
        Self { channels }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let fixture: FixtureFile =
            serde_json::from_str(json).context("Failed to parse sample fixture")?;
        Ok(Self::new(fixture.channels))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read sample fixture {}", path.display()))?;
        let repository = Self::from_json(&json)?;

        tracing::info!(
            "Loaded {} channels from {}",
            repository.channels.len(),
            path.display()
        );
        Ok(repository)
    }
}

impl SampleRepository for FixtureRepository {
    fn list_channels(&self) -> Vec<String> {
        self.channels.keys().cloned().collect()
    }

    fn load_channel(&self, channel: &str) -> Result<Vec<RawRecord>> {
        let records = self
            .channels
            .get(channel)
            .ok_or_else(|| RepositoryError::UnknownChannel(channel.to_string()))?;

        tracing::debug!("Channel {} has {} raw records", channel, records.len());
        Ok(records.clone())
    }
}
