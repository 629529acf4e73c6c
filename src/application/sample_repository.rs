// Repository trait for raw sensor samples
use crate::domain::record::RawRecord;

pub trait SampleRepository: Send + Sync {
    /// List all channel names the source can supply
    fn list_channels(&self) -> Vec<String>;

    /// Raw records of one channel, in source order
    fn load_channel(&self, channel: &str) -> anyhow::Result<Vec<RawRecord>>;
}
