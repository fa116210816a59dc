//! Deterministic snapshot generation.
//!
//! This module produces a complete, referentially consistent snapshot from a
//! [`GenerationConfig`]. The same configuration always produces an identical
//! snapshot: all randomness flows through one seeded ChaCha8 generator.
//!
//! Tables are generated in dependency order — users, items, machines, then
//! inventory, purchases and feedback — so every foreign key is drawn from a
//! pool that already exists.

use std::collections::HashMap;

use fake::Fake;
use fake::faker::internet::raw::SafeEmail;
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::EN;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::{GenerationConfig, TimeWindow};
use crate::entities::{
    Accessibility, FeedbackEntry, FeedbackId, FeedbackKind, InventoryRecord, Item, ItemId, Machine,
    MachineId, Purchase, PurchaseId, Timestamp, User, UserId,
};
use crate::error::ConfigError;
use crate::snapshot::Snapshot;

/// Fallback accessibility preference when the configured pool is empty.
const NO_PREFERENCE: &str = "None";

/// Generates a complete snapshot from the configuration.
///
/// Validation runs first, so a rejected configuration produces nothing.
/// Generation is destructive by contract: the returned snapshot fully
/// replaces any prior one, it is never merged.
///
/// # Errors
///
/// Returns [`ConfigError`] when the configuration is impossible (see
/// [`GenerationConfig::validate`]) or when a dependent table would draw
/// from an empty entity pool.
///
/// # Example
///
/// ```
/// use fleet_data::{GenerationConfig, generate};
///
/// let config = GenerationConfig {
///     seed: 42,
///     machine_count: 3,
///     ..GenerationConfig::default()
/// };
///
/// let snapshot = generate(&config).expect("generation succeeds");
/// assert_eq!(snapshot.machines.len(), 3);
///
/// // The same seed reproduces the same snapshot.
/// let again = generate(&config).expect("generation succeeds");
/// assert_eq!(snapshot, again);
/// ```
pub fn generate(config: &GenerationConfig) -> Result<Snapshot, ConfigError> {
    config.validate()?;

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    let users = generate_users(&mut rng, config);
    let items = generate_items(&mut rng, config);
    let machines = generate_machines(&mut rng, config);
    let inventory = generate_inventory(&mut rng, config, &machines, &items);
    let purchases = generate_purchases(&mut rng, config, &users, &machines, &items, &inventory)?;
    let feedback = generate_feedback(&mut rng, config, &machines, &items)?;

    Ok(Snapshot {
        users,
        items,
        machines,
        inventory,
        purchases,
        feedback,
    })
}

fn generate_users(rng: &mut ChaCha8Rng, config: &GenerationConfig) -> Vec<User> {
    let mut users = Vec::with_capacity(config.user_count);
    for _ in 0..config.user_count {
        let first: String = FirstName(EN).fake_with_rng(rng);
        let last: String = LastName(EN).fake_with_rng(rng);
        let email: String = SafeEmail(EN).fake_with_rng(rng);
        let credits = rng.random_range(config.credit_range.min..=config.credit_range.max);
        let accessibility_preference = config
            .accessibility_preferences
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| NO_PREFERENCE.to_owned());

        users.push(User {
            id: UserId::from_u128(rng.random()),
            name: format!("{first} {last}"),
            email,
            credits,
            accessibility_preference,
        });
    }
    users
}

/// Materialises the static catalog; item names stay unique because the
/// configuration rejects duplicates.
fn generate_items(rng: &mut ChaCha8Rng, config: &GenerationConfig) -> Vec<Item> {
    config
        .catalog
        .iter()
        .map(|entry| Item {
            id: ItemId::from_u128(rng.random()),
            name: entry.name.clone(),
            category: entry.category,
            price: entry.price,
        })
        .collect()
}

fn generate_machines(rng: &mut ChaCha8Rng, config: &GenerationConfig) -> Vec<Machine> {
    let mut machines = Vec::with_capacity(config.machine_count);
    let mut label_uses: HashMap<&str, u32> = HashMap::new();

    for base in config
        .location_labels
        .iter()
        .cycle()
        .take(config.machine_count)
    {
        let uses = label_uses.entry(base.as_str()).or_insert(0);
        *uses += 1;
        // Reused labels get a sequence suffix so addresses stay unique.
        let address = if *uses == 1 {
            base.clone()
        } else {
            format!("{base} {uses}")
        };

        machines.push(Machine {
            id: MachineId::from_u128(rng.random()),
            latitude: jittered(rng, config.geo.center_lat, config.geo.jitter_degrees, 90.0),
            longitude: jittered(rng, config.geo.center_lng, config.geo.jitter_degrees, 180.0),
            address,
            accessibility: Accessibility::ALL
                .choose(rng)
                .copied()
                .unwrap_or(Accessibility::Standard),
        });
    }
    machines
}

/// Offsets a coordinate by a uniform draw within the jitter radius, clamped
/// to the valid degree range.
#[expect(
    clippy::float_arithmetic,
    reason = "coordinate jitter is inherently floating point"
)]
fn jittered(rng: &mut ChaCha8Rng, center: f64, jitter: f64, bound: f64) -> f64 {
    if jitter <= 0.0 {
        return center;
    }
    (center + rng.random_range(-jitter..=jitter)).clamp(-bound, bound)
}

/// Stocks each machine with a sample of distinct items: subset size uniform
/// in the configured density range, quantity uniform in `[0, max_quantity]`.
fn generate_inventory(
    rng: &mut ChaCha8Rng,
    config: &GenerationConfig,
    machines: &[Machine],
    items: &[Item],
) -> Vec<InventoryRecord> {
    let item_ids: Vec<ItemId> = items.iter().map(|item| item.id).collect();
    let mut inventory = Vec::new();

    for machine in machines {
        let stocked = select_subset(
            rng,
            &item_ids,
            config.stocking.min_items_per_machine,
            config.stocking.max_items_per_machine,
        );
        for item_id in stocked {
            inventory.push(InventoryRecord {
                machine_id: machine.id,
                item_id,
                quantity: rng.random_range(0..=config.stocking.max_quantity),
            });
        }
    }
    inventory
}

fn generate_purchases(
    rng: &mut ChaCha8Rng,
    config: &GenerationConfig,
    users: &[User],
    machines: &[Machine],
    items: &[Item],
    inventory: &[InventoryRecord],
) -> Result<Vec<Purchase>, ConfigError> {
    let by_id: HashMap<ItemId, &Item> = items.iter().map(|item| (item.id, item)).collect();
    let mut stocked: HashMap<MachineId, Vec<ItemId>> = HashMap::new();
    for record in inventory {
        stocked
            .entry(record.machine_id)
            .or_default()
            .push(record.item_id);
    }

    let mut purchases = Vec::with_capacity(config.purchase_count);
    for _ in 0..config.purchase_count {
        let user = users.choose(rng).ok_or(ConfigError::EmptyPool {
            pool: "users",
            table: "purchases",
        })?;
        let machine = machines.choose(rng).ok_or(ConfigError::EmptyPool {
            pool: "machines",
            table: "purchases",
        })?;
        // Prefer items the machine actually lists; an unstocked machine
        // falls back to the whole catalog.
        let item = stocked
            .get(&machine.id)
            .and_then(|ids| ids.choose(rng))
            .and_then(|id| by_id.get(id).copied())
            .or_else(|| items.choose(rng))
            .ok_or(ConfigError::EmptyPool {
                pool: "catalog items",
                table: "purchases",
            })?;

        purchases.push(Purchase {
            id: PurchaseId::from_u128(rng.random()),
            user_id: user.id,
            machine_id: machine.id,
            item_id: item.id,
            timestamp: sample_timestamp(rng, &config.time_window),
            credits_charged: item.price,
        });
    }
    Ok(purchases)
}

fn generate_feedback(
    rng: &mut ChaCha8Rng,
    config: &GenerationConfig,
    machines: &[Machine],
    items: &[Item],
) -> Result<Vec<FeedbackEntry>, ConfigError> {
    let request_pool: Vec<&str> = items
        .iter()
        .map(|item| item.name.as_str())
        .chain(config.request_extras.iter().map(String::as_str))
        .collect();

    let mut feedback = Vec::with_capacity(config.feedback_count);
    for _ in 0..config.feedback_count {
        let machine = machines.choose(rng).ok_or(ConfigError::EmptyPool {
            pool: "machines",
            table: "feedback",
        })?;
        let kind = sample_kind(rng, config);
        let content = match kind {
            FeedbackKind::Request => request_pool
                .choose(rng)
                .map(|name| (*name).to_owned())
                .ok_or(ConfigError::EmptyPool {
                    pool: "request vocabulary",
                    table: "feedback",
                })?,
            FeedbackKind::Issue => {
                config
                    .issue_vocabulary
                    .choose(rng)
                    .cloned()
                    .ok_or(ConfigError::EmptyPool {
                        pool: "issue vocabulary",
                        table: "feedback",
                    })?
            }
        };

        feedback.push(FeedbackEntry {
            id: FeedbackId::from_u128(rng.random()),
            machine_id: machine.id,
            kind,
            content,
            timestamp: sample_timestamp(rng, &config.time_window),
        });
    }
    Ok(feedback)
}

/// Draws a feedback kind from the configured categorical weighting.
fn sample_kind(rng: &mut ChaCha8Rng, config: &GenerationConfig) -> FeedbackKind {
    let request = u64::from(config.feedback_mix.request_weight);
    let issue = u64::from(config.feedback_mix.issue_weight);
    // Weight sum is non-zero whenever feedback is generated (validated).
    if rng.random_range(0..request + issue) < request {
        FeedbackKind::Request
    } else {
        FeedbackKind::Issue
    }
}

/// Draws a timestamp uniformly within the window, at minute precision.
fn sample_timestamp(rng: &mut ChaCha8Rng, window: &TimeWindow) -> Timestamp {
    let start = window.start.as_naive();
    let span_minutes = (window.end.as_naive() - start).num_minutes();
    let offset = if span_minutes == 0 {
        0
    } else {
        rng.random_range(0..=span_minutes)
    };
    Timestamp::from_naive(start + chrono::Duration::minutes(offset))
}

/// Selects a sample without replacement from `ids`.
///
/// The sample size is uniform in `[min_count, max_count]`, clamped to the
/// number of available ids. Shuffle-and-truncate guarantees no duplicates.
fn select_subset(
    rng: &mut ChaCha8Rng,
    ids: &[ItemId],
    min_count: usize,
    max_count: usize,
) -> Vec<ItemId> {
    if ids.is_empty() {
        return Vec::new();
    }

    let clamped_min = min_count.min(ids.len());
    let clamped_max = max_count.min(ids.len());
    let count = if clamped_min == clamped_max {
        clamped_min
    } else {
        rng.random_range(clamped_min..=clamped_max)
    };

    let mut shuffled = ids.to_vec();
    shuffled.shuffle(rng);
    shuffled.truncate(count);
    shuffled
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rstest::{fixture, rstest};

    use super::*;
    use crate::config::FeedbackMix;

    #[fixture]
    fn small_config() -> GenerationConfig {
        GenerationConfig {
            seed: 42,
            user_count: 5,
            machine_count: 4,
            purchase_count: 20,
            feedback_count: 30,
            ..GenerationConfig::default()
        }
    }

    #[rstest]
    fn generates_configured_counts(small_config: GenerationConfig) {
        let snapshot = generate(&small_config).expect("generation succeeds");

        assert_eq!(snapshot.users.len(), 5);
        assert_eq!(snapshot.machines.len(), 4);
        assert_eq!(snapshot.purchases.len(), 20);
        assert_eq!(snapshot.feedback.len(), 30);
        assert_eq!(snapshot.items.len(), small_config.catalog.len());
    }

    #[rstest]
    fn generation_is_deterministic(small_config: GenerationConfig) {
        let first = generate(&small_config).expect("generation succeeds");
        let second = generate(&small_config).expect("generation succeeds");

        assert_eq!(first, second);
    }

    #[rstest]
    fn different_seeds_produce_different_snapshots(small_config: GenerationConfig) {
        let other_config = GenerationConfig {
            seed: 43,
            ..small_config.clone()
        };

        let first = generate(&small_config).expect("generation succeeds");
        let second = generate(&other_config).expect("generation succeeds");

        assert_ne!(first, second);
    }

    #[test]
    fn reused_labels_get_sequence_suffixes() {
        let config = GenerationConfig {
            machine_count: 5,
            location_labels: vec!["Union Building".to_owned(), "Wells Hall".to_owned()],
            ..GenerationConfig::default()
        };

        let snapshot = generate(&config).expect("generation succeeds");
        let addresses: Vec<&str> = snapshot
            .machines
            .iter()
            .map(|machine| machine.address.as_str())
            .collect();

        assert_eq!(
            addresses,
            [
                "Union Building",
                "Wells Hall",
                "Union Building 2",
                "Wells Hall 2",
                "Union Building 3",
            ]
        );
    }

    #[rstest]
    fn machine_coordinates_stay_within_jitter(small_config: GenerationConfig) {
        let snapshot = generate(&small_config).expect("generation succeeds");
        let geo = &small_config.geo;

        for machine in &snapshot.machines {
            assert!((machine.latitude - geo.center_lat).abs() <= geo.jitter_degrees);
            assert!((machine.longitude - geo.center_lng).abs() <= geo.jitter_degrees);
        }
    }

    #[rstest]
    fn all_request_weighting_yields_no_issues(small_config: GenerationConfig) {
        let config = GenerationConfig {
            feedback_mix: FeedbackMix {
                request_weight: 1,
                issue_weight: 0,
            },
            ..small_config
        };

        let snapshot = generate(&config).expect("generation succeeds");
        assert!(
            snapshot
                .feedback
                .iter()
                .all(|entry| entry.kind == FeedbackKind::Request)
        );
    }

    #[rstest]
    fn request_content_comes_from_catalog_or_extras(small_config: GenerationConfig) {
        let snapshot = generate(&small_config).expect("generation succeeds");
        let vocabulary: HashSet<&str> = small_config
            .catalog
            .iter()
            .map(|entry| entry.name.as_str())
            .chain(small_config.request_extras.iter().map(String::as_str))
            .collect();

        for entry in &snapshot.feedback {
            if entry.kind == FeedbackKind::Request {
                assert!(vocabulary.contains(entry.content.as_str()));
            }
        }
    }

    #[rstest]
    fn issue_content_comes_from_issue_vocabulary(small_config: GenerationConfig) {
        let snapshot = generate(&small_config).expect("generation succeeds");
        let vocabulary: HashSet<&str> = small_config
            .issue_vocabulary
            .iter()
            .map(String::as_str)
            .collect();

        for entry in &snapshot.feedback {
            if entry.kind == FeedbackKind::Issue {
                assert!(vocabulary.contains(entry.content.as_str()));
            }
        }
    }

    #[rstest]
    fn timestamps_fall_inside_the_window(small_config: GenerationConfig) {
        let snapshot = generate(&small_config).expect("generation succeeds");
        let window = &small_config.time_window;

        for purchase in &snapshot.purchases {
            assert!(purchase.timestamp >= window.start);
            assert!(purchase.timestamp <= window.end);
        }
        for entry in &snapshot.feedback {
            assert!(entry.timestamp >= window.start);
            assert!(entry.timestamp <= window.end);
        }
    }

    #[rstest]
    fn purchases_charge_the_item_price(small_config: GenerationConfig) {
        let snapshot = generate(&small_config).expect("generation succeeds");

        for purchase in &snapshot.purchases {
            let item = snapshot.item(purchase.item_id).expect("item exists");
            assert_eq!(purchase.credits_charged, item.price);
        }
    }

    #[test]
    fn select_subset_respects_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let ids: Vec<ItemId> = (0..10).map(ItemId::from_u128).collect();

        for _ in 0..100 {
            let subset = select_subset(&mut rng, &ids, 2, 5);
            assert!(subset.len() >= 2, "subset too small: {}", subset.len());
            assert!(subset.len() <= 5, "subset too large: {}", subset.len());
        }
    }

    #[test]
    fn select_subset_never_duplicates() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let ids: Vec<ItemId> = (0..8).map(ItemId::from_u128).collect();

        for _ in 0..100 {
            let subset = select_subset(&mut rng, &ids, 4, 8);
            let unique: HashSet<ItemId> = subset.iter().copied().collect();
            assert_eq!(unique.len(), subset.len());
        }
    }

    #[test]
    fn select_subset_handles_empty_slice() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let subset = select_subset(&mut rng, &[], 1, 3);
        assert!(subset.is_empty());
    }

    #[test]
    fn zero_counts_yield_an_empty_snapshot() {
        let config = GenerationConfig {
            user_count: 0,
            machine_count: 0,
            purchase_count: 0,
            feedback_count: 0,
            ..GenerationConfig::default()
        };

        let snapshot = generate(&config).expect("generation succeeds");
        assert!(snapshot.users.is_empty());
        assert!(snapshot.machines.is_empty());
        assert!(snapshot.inventory.is_empty());
        assert!(snapshot.purchases.is_empty());
        assert!(snapshot.feedback.is_empty());
        assert_eq!(snapshot.items.len(), config.catalog.len());
    }
}
