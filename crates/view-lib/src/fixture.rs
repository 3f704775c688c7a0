//! Synthetic fleet data
//!
//! Produces node records that satisfy every data-model invariant, for
//! exercising table models without a live farm manager.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{LockState, NodeRecord, NodeState};

/// Core counts a generated node may report
const CORE_CHOICES: [i32; 4] = [1, 2, 4, 8];

/// RAM sizes (MB) a generated node may report
const RAM_CHOICES: [i32; 3] = [4096, 8192, 16384];

/// Longest generated uptime (5 days)
const MAX_UPTIME_SECS: i64 = 5 * 24 * 60 * 60;

/// Generator of synthetic node records
#[derive(Debug, Clone)]
pub struct FleetFixture {
    pub cluster_name: String,
    pub platform: String,
    pub cpu_model: String,
    /// Epoch seconds boot times are measured back from; the current time if unset
    pub reference_time: Option<i64>,
}

impl Default for FleetFixture {
    fn default() -> Self {
        Self {
            cluster_name: "General".to_string(),
            platform: "Linux".to_string(),
            cpu_model: "Xeon 3.0Ghz".to_string(),
            reference_time: None,
        }
    }
}

impl FleetFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cluster_name(mut self, cluster_name: impl Into<String>) -> Self {
        self.cluster_name = cluster_name.into();
        self
    }

    pub fn with_reference_time(mut self, epoch_secs: i64) -> Self {
        self.reference_time = Some(epoch_secs);
        self
    }

    /// Generate `count` records from thread-local randomness
    pub fn generate(&self, count: usize) -> Vec<NodeRecord> {
        self.generate_with(&mut rand::rng(), count)
    }

    /// Generate `count` records reproducibly from `seed`
    pub fn generate_seeded(&self, count: usize, seed: u64) -> Vec<NodeRecord> {
        self.generate_with(&mut StdRng::seed_from_u64(seed), count)
    }

    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<NodeRecord> {
        let now = self
            .reference_time
            .unwrap_or_else(|| chrono::Utc::now().timestamp());

        (0..count).map(|i| self.record(rng, i, now)).collect()
    }

    fn record<R: Rng + ?Sized>(&self, rng: &mut R, sequence: usize, now: i64) -> NodeRecord {
        let total_cores = CORE_CHOICES[rng.random_range(0..CORE_CHOICES.len())];
        let total_ram_mb = RAM_CHOICES[rng.random_range(0..RAM_CHOICES.len())];
        let total_swap_mb = total_ram_mb / 2;
        let uptime = rng.random_range(10..=MAX_UPTIME_SECS);

        NodeRecord {
            name: format!("Host{:04}", sequence),
            cluster_name: self.cluster_name.clone(),
            state: NodeState::MEMBERS[rng.random_range(0..NodeState::MEMBERS.len())],
            lock_state: LockState::MEMBERS[rng.random_range(0..LockState::MEMBERS.len())],
            total_cores,
            idle_cores: total_cores - rng.random_range(0..=total_cores),
            boot_time: (now - uptime).max(0),
            platform: self.platform.clone(),
            cpu_model: self.cpu_model.clone(),
            total_ram_mb,
            free_ram_mb: total_ram_mb - rng.random_range(0..=total_ram_mb),
            total_swap_mb,
            free_swap_mb: total_swap_mb - rng.random_range(0..=total_swap_mb),
        }
    }
}

/// Generate `count` records with the default fixture
pub fn generate(count: usize) -> Vec<NodeRecord> {
    FleetFixture::default().generate(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_zero_count() {
        assert!(generate(0).is_empty());
    }

    #[test]
    fn test_generated_records_are_valid() {
        for count in [1, 7, 100, 1000] {
            let records = generate(count);
            assert_eq!(records.len(), count);
            for record in &records {
                assert_eq!(record.validate(), Ok(()), "invalid record {:?}", record);
            }
        }
    }

    #[test]
    fn test_many_batches_hold_invariants() {
        let fixture = FleetFixture::new();
        for seed in 0..200 {
            for r in fixture.generate_seeded(25, seed) {
                assert!(0 <= r.idle_cores && r.idle_cores <= r.total_cores);
                assert!(0 <= r.free_ram_mb && r.free_ram_mb <= r.total_ram_mb);
                assert!(0 <= r.free_swap_mb && r.free_swap_mb <= r.total_swap_mb);
                assert!(r.boot_time >= 0);
            }
        }
    }

    #[test]
    fn test_names_are_zero_padded_and_unique() {
        let records = generate(12);
        assert_eq!(records[0].name, "Host0000");
        assert_eq!(records[11].name, "Host0011");

        let names: HashSet<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names.len(), 12);
    }

    #[test]
    fn test_fixed_fields() {
        let records = FleetFixture::new()
            .with_cluster_name("Render")
            .generate(5);
        for r in &records {
            assert_eq!(r.cluster_name, "Render");
            assert_eq!(r.platform, "Linux");
            assert!(CORE_CHOICES.contains(&r.total_cores));
            assert!(RAM_CHOICES.contains(&r.total_ram_mb));
            assert_eq!(r.total_swap_mb, r.total_ram_mb / 2);
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let fixture = FleetFixture::new().with_reference_time(1_700_000_000);
        assert_eq!(fixture.generate_seeded(50, 42), fixture.generate_seeded(50, 42));
    }

    #[test]
    fn test_boot_time_within_uptime_window() {
        let now = 1_700_000_000;
        let records = FleetFixture::new().with_reference_time(now).generate(200);
        for r in records {
            assert!(r.boot_time <= now - 10);
            assert!(r.boot_time >= now - MAX_UPTIME_SECS);
        }
    }

    #[test]
    fn test_boot_time_clamped_at_epoch() {
        let records = FleetFixture::new().with_reference_time(5).generate(20);
        assert!(records.iter().all(|r| r.boot_time == 0));
    }

    #[test]
    fn test_state_domains_covered() {
        let records = FleetFixture::new().generate_seeded(500, 7);
        let states: HashSet<_> = records.iter().map(|r| r.state).collect();
        let locks: HashSet<_> = records.iter().map(|r| r.lock_state).collect();
        assert_eq!(states.len(), NodeState::MEMBERS.len());
        assert_eq!(locks.len(), LockState::MEMBERS.len());
    }
}
